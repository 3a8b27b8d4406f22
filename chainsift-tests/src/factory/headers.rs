use chainsift::{ChainsiftRepo, Repo, UnsavedHeader};
use ethers::types::H256;

pub fn unsaved_header(block_number: i64, source_id: &str) -> UnsavedHeader {
    UnsavedHeader::new(block_number, &H256::from_low_u64_be(block_number as u64), source_id)
}

/// Persists one header per block number for `source_id`, returning the ids
/// of the newly created rows in insertion order.
pub async fn create_headers(
    repo: &ChainsiftRepo,
    source_id: &str,
    block_numbers: impl IntoIterator<Item = i64>,
) -> Vec<i64> {
    let pool = repo.get_pool(1).await;
    let mut conn = ChainsiftRepo::get_conn(&pool).await;

    let headers: Vec<_> = block_numbers
        .into_iter()
        .map(|block_number| unsaved_header(block_number, source_id))
        .collect();

    ChainsiftRepo::create_headers(&mut conn, &headers).await.unwrap()
}
