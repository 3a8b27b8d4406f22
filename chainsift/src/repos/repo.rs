use derive_more::Display;
use std::fmt::Debug;

use serde::de::DeserializeOwned;

use crate::headers::{Header, UnsavedHeader};

pub const HEADERS_TABLE: &str = "chainsift_headers";
pub const CHECKED_HEADERS_TABLE: &str = "chainsift_checked_headers";

#[derive(Debug, Display)]
pub enum RepoError {
    NotConnected,
    Unknown(String),
}

#[async_trait::async_trait]
pub trait Repo:
    Sync + Send + Migratable + ExecutesWithRawQuery + LoadsDataWithRawQuery + Clone
{
    type Pool;
    type Conn<'a>;

    async fn get_pool(&self, max_size: u32) -> Self::Pool;
    async fn get_conn<'a>(pool: &'a Self::Pool) -> Self::Conn<'a>;

    async fn create_headers<'a>(
        conn: &mut Self::Conn<'a>,
        headers: &[UnsavedHeader],
    ) -> Result<Vec<i64>, RepoError>;
    async fn get_headers<'a>(
        conn: &mut Self::Conn<'a>,
        source_id: &str,
    ) -> Result<Vec<Header>, RepoError>;
    async fn delete_header<'a>(conn: &mut Self::Conn<'a>, header_id: i64)
        -> Result<(), RepoError>;
}

#[async_trait::async_trait]
pub trait HasRawQueryClient {
    type RawQueryClient: Send + Sync;
    type RawQueryTxnClient<'a>: Send + Sync;

    async fn get_client(&self) -> Self::RawQueryClient;
    async fn get_txn_client<'a>(
        client: &'a mut Self::RawQueryClient,
    ) -> Result<Self::RawQueryTxnClient<'a>, RepoError>;
}

#[async_trait::async_trait]
pub trait ExecutesWithRawQuery: HasRawQueryClient {
    async fn execute(client: &Self::RawQueryClient, query: &str) -> Result<u64, RepoError>;
    async fn execute_in_txn<'a>(
        client: &Self::RawQueryTxnClient<'a>,
        query: &str,
    ) -> Result<u64, RepoError>;
    async fn commit_txns<'a>(client: Self::RawQueryTxnClient<'a>) -> Result<(), RepoError>;
}

#[async_trait::async_trait]
pub trait LoadsDataWithRawQuery: HasRawQueryClient {
    async fn load_data_from_raw_query<Data: Send + DeserializeOwned>(
        client: &Self::RawQueryClient,
        query: &str,
    ) -> Result<Option<Data>, RepoError>;
    async fn load_data_list_from_raw_query<Data: Send + DeserializeOwned>(
        client: &Self::RawQueryClient,
        query: &str,
    ) -> Result<Vec<Data>, RepoError>;
}

pub trait RepoMigrations: Migratable {
    fn create_headers_migration() -> &'static [&'static str];
    fn create_checked_headers_migration() -> &'static [&'static str];

    fn get_internal_migrations() -> Vec<&'static str> {
        [
            Self::create_headers_migration(),
            Self::create_checked_headers_migration(),
        ]
        .concat()
    }
}

#[async_trait::async_trait]
pub trait Migratable: ExecutesWithRawQuery + Sync + Send {
    async fn migrate(
        client: &Self::RawQueryClient,
        migrations: Vec<impl AsRef<str> + Send + Sync>,
    ) -> Result<(), RepoError>
    where
        Self: Sized,
    {
        for migration in migrations {
            Self::execute(client, migration.as_ref()).await?;
        }

        Ok(())
    }
}

pub struct SQLikeMigrations;

impl SQLikeMigrations {
    pub fn create_headers() -> &'static [&'static str] {
        &[
            "CREATE TABLE IF NOT EXISTS chainsift_headers (
                id BIGSERIAL PRIMARY KEY,
                block_number BIGINT NOT NULL,
                block_hash VARCHAR NOT NULL,
                source_id VARCHAR NOT NULL,
                inserted_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )",
            "CREATE UNIQUE INDEX IF NOT EXISTS chainsift_headers_block_source_index
            ON chainsift_headers(block_number, source_id)",
        ]
    }

    pub fn create_checked_headers() -> &'static [&'static str] {
        &["CREATE TABLE IF NOT EXISTS chainsift_checked_headers (
                id SERIAL PRIMARY KEY,
                header_id BIGINT NOT NULL UNIQUE REFERENCES chainsift_headers(id) ON DELETE CASCADE
            )"]
    }
}
