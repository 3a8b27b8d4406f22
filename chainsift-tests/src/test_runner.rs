use std::future::Future;

use chainsift::{
    ChainsiftRepo, ChainsiftRepoClient, Contract, EventRegistry, HasRawQueryClient, Migratable,
    RepoMigrations,
};

use crate::db;

pub fn new_repo(source_id: &str) -> ChainsiftRepo {
    ChainsiftRepo::new(db::database_url().as_str(), source_id)
}

pub fn random_source_id() -> String {
    format!("test-node-{}", rand::random::<u32>())
}

/// Runs `test_fn` against a fresh repo client scoped to a random source id,
/// with the internal migrations applied. Scoping each test to its own
/// source keeps header and watermark state isolated without truncation.
pub async fn run_test<TestFn, Fut>(test_fn: TestFn)
where
    TestFn: FnOnce(ChainsiftRepo, ChainsiftRepoClient) -> Fut,
    Fut: Future<Output = ()>,
{
    db::setup();

    let repo = new_repo(&random_source_id());
    let client = repo.get_client().await;

    ChainsiftRepo::migrate(&client, ChainsiftRepo::get_internal_migrations()).await.unwrap();

    test_fn(repo, client).await;
}

pub async fn migrate_contract_tables(client: &ChainsiftRepoClient, contract: &Contract) {
    let registry = EventRegistry::for_contract(contract);

    ChainsiftRepo::migrate(client, registry.migrations()).await.unwrap();
}
