use chainsift::{ChainsiftRepo, HasRawQueryClient, Migratable, RepoMigrations};
use chainsift_tests::db;

#[tokio::main]
async fn main() {
    db::setup();
    let repo = ChainsiftRepo::new(db::database_url().as_str(), "setup-node");
    let client = repo.get_client().await;

    ChainsiftRepo::migrate(&client, ChainsiftRepo::get_internal_migrations()).await.unwrap();
}
