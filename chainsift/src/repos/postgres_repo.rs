mod raw_queries;

pub use raw_queries::{PostgresRepoClient, PostgresRepoTxnClient};

use diesel::ExpressionMethods;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::headers::{Header, UnsavedHeader};

use super::repo::{Migratable, Repo, RepoError, RepoMigrations, SQLikeMigrations};

pub type Conn<'a> = bb8::PooledConnection<'a, AsyncDieselConnectionManager<AsyncPgConnection>>;
pub type Pool = bb8::Pool<AsyncDieselConnectionManager<AsyncPgConnection>>;

/// Postgres-backed repo. The source identity every header and watermark
/// query is scoped to travels with the repo and its clients.
#[derive(Clone)]
pub struct PostgresRepo {
    pub(super) url: String,
    pub(super) source_id: String,
}

impl PostgresRepo {
    pub fn new(url: &str, source_id: &str) -> Self {
        Self {
            url: url.to_string(),
            source_id: source_id.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl Repo for PostgresRepo {
    type Pool = Pool;
    type Conn<'a> = Conn<'a>;

    async fn get_pool(&self, max_size: u32) -> Pool {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&self.url);

        bb8::Pool::builder().max_size(max_size).build(manager).await.unwrap()
    }

    async fn get_conn<'a>(pool: &'a Pool) -> Conn<'a> {
        pool.get().await.unwrap()
    }

    async fn create_headers<'a>(
        conn: &mut Conn<'a>,
        headers: &[UnsavedHeader],
    ) -> Result<Vec<i64>, RepoError> {
        use crate::diesel::schema::chainsift_headers::dsl::{
            block_number, chainsift_headers, id, source_id,
        };

        diesel::insert_into(chainsift_headers)
            .values(headers)
            .on_conflict((block_number, source_id))
            .do_nothing()
            .returning(id)
            .get_results(conn)
            .await
            .map_err(to_repo_error)
    }

    async fn get_headers<'a>(
        conn: &mut Conn<'a>,
        source_id_value: &str,
    ) -> Result<Vec<Header>, RepoError> {
        use crate::diesel::schema::chainsift_headers::dsl::{
            block_hash, block_number, chainsift_headers, id, source_id,
        };
        use diesel::QueryDsl;

        chainsift_headers
            .filter(source_id.eq(source_id_value))
            .order(block_number.asc())
            .select((id, block_number, block_hash, source_id))
            .load(conn)
            .await
            .map_err(to_repo_error)
    }

    async fn delete_header<'a>(conn: &mut Conn<'a>, header_id: i64) -> Result<(), RepoError> {
        use crate::diesel::schema::chainsift_headers::dsl::{chainsift_headers, id};
        use diesel::QueryDsl;

        diesel::delete(chainsift_headers.filter(id.eq(header_id)))
            .execute(conn)
            .await
            .map_err(to_repo_error)?;

        Ok(())
    }
}

impl Migratable for PostgresRepo {}

impl RepoMigrations for PostgresRepo {
    fn create_headers_migration() -> &'static [&'static str] {
        SQLikeMigrations::create_headers()
    }

    fn create_checked_headers_migration() -> &'static [&'static str] {
        SQLikeMigrations::create_checked_headers()
    }
}

fn to_repo_error(error: diesel::result::Error) -> RepoError {
    RepoError::Unknown(error.to_string())
}
