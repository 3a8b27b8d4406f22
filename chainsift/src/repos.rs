mod postgres_repo;
mod repo;

pub use repo::{
    ExecutesWithRawQuery, HasRawQueryClient, LoadsDataWithRawQuery, Migratable, Repo, RepoError,
    RepoMigrations, SQLikeMigrations, CHECKED_HEADERS_TABLE, HEADERS_TABLE,
};

pub use postgres_repo::{
    Conn as PostgresRepoConn, Pool as PostgresRepoPool, PostgresRepo, PostgresRepoClient,
    PostgresRepoTxnClient,
};

pub use diesel_async::AsyncConnection as PostgresRepoAsyncConnection;
