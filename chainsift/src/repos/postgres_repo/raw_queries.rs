use tokio_postgres::{types::ToSql, NoTls};

use crate::repos::repo::{
    ExecutesWithRawQuery, HasRawQueryClient, LoadsDataWithRawQuery, RepoError,
};
use crate::PostgresRepo;
use serde::de::DeserializeOwned;

/// Raw-query client carrying the source identity of its repo.
pub struct PostgresRepoClient {
    pub(crate) client: tokio_postgres::Client,
    pub source_id: String,
}

pub struct PostgresRepoTxnClient<'a> {
    pub(crate) txn: tokio_postgres::Transaction<'a>,
    pub source_id: String,
}

#[async_trait::async_trait]
impl HasRawQueryClient for PostgresRepo {
    type RawQueryClient = PostgresRepoClient;
    type RawQueryTxnClient<'a> = PostgresRepoTxnClient<'a>;

    async fn get_client(&self) -> PostgresRepoClient {
        let (client, conn) = tokio_postgres::connect(&self.url, NoTls).await.unwrap();

        tokio::spawn(async move {
            if let Err(error) = conn.await {
                tracing::error!(%error, "postgres connection error");
            }
        });

        PostgresRepoClient {
            client,
            source_id: self.source_id.to_string(),
        }
    }

    async fn get_txn_client<'a>(
        client: &'a mut PostgresRepoClient,
    ) -> Result<PostgresRepoTxnClient<'a>, RepoError> {
        let source_id = client.source_id.to_string();
        let txn = client.client.transaction().await.map_err(to_repo_error)?;

        Ok(PostgresRepoTxnClient { txn, source_id })
    }
}

#[async_trait::async_trait]
impl ExecutesWithRawQuery for PostgresRepo {
    async fn execute(client: &Self::RawQueryClient, query: &str) -> Result<u64, RepoError> {
        client
            .client
            .execute(query, &[] as &[&(dyn ToSql + Sync)])
            .await
            .map_err(to_repo_error)
    }

    async fn execute_in_txn<'a>(
        client: &Self::RawQueryTxnClient<'a>,
        query: &str,
    ) -> Result<u64, RepoError> {
        client
            .txn
            .execute(query, &[] as &[&(dyn ToSql + Sync)])
            .await
            .map_err(to_repo_error)
    }

    async fn commit_txns<'a>(client: Self::RawQueryTxnClient<'a>) -> Result<(), RepoError> {
        client.txn.commit().await.map_err(to_repo_error)
    }
}

#[async_trait::async_trait]
impl LoadsDataWithRawQuery for PostgresRepo {
    async fn load_data_from_raw_query<Data: Send + DeserializeOwned>(
        client: &Self::RawQueryClient,
        query: &str,
    ) -> Result<Option<Data>, RepoError> {
        let mut data_list: Vec<Data> = Self::load_data_list_from_raw_query(client, query).await?;

        Ok(data_list.pop())
    }

    async fn load_data_list_from_raw_query<Data: Send + DeserializeOwned>(
        client: &Self::RawQueryClient,
        query: &str,
    ) -> Result<Vec<Data>, RepoError> {
        let json_aggregate = get_json_aggregate(client, query).await?;

        if json_aggregate.is_array() {
            serde_json::from_value(json_aggregate)
                .map_err(|error| RepoError::Unknown(error.to_string()))
        } else {
            Ok(vec![])
        }
    }
}

async fn get_json_aggregate(
    client: &PostgresRepoClient,
    query: &str,
) -> Result<serde_json::Value, RepoError> {
    let rows = client
        .client
        .query(json_aggregate_query(query).as_str(), &[])
        .await
        .map_err(to_repo_error)?;

    match rows.first() {
        Some(row) => Ok(row.get(0)),
        None => Ok(serde_json::Value::Null),
    }
}

fn json_aggregate_query(query: &str) -> String {
    format!("WITH result AS ({query}) SELECT COALESCE(json_agg(result), '[]'::json) FROM result")
}

fn to_repo_error(error: tokio_postgres::Error) -> RepoError {
    RepoError::Unknown(error.to_string())
}
