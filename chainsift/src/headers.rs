use diesel::{Insertable, Queryable};
use serde::Deserialize;

use crate::diesel::schema::chainsift_headers;
use crate::hashes::Hashes;

/// A block's identity, tracked per source. Headers are append-only: they
/// are created by header synchronization (an external collaborator) and
/// only referenced, never owned, by event rows.
#[derive(Debug, Clone, PartialEq, Deserialize, Queryable)]
pub struct Header {
    pub id: i64,
    pub block_number: i64,
    pub block_hash: String,
    pub source_id: String,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = chainsift_headers)]
pub struct UnsavedHeader {
    pub block_number: i64,
    pub block_hash: String,
    pub source_id: String,
    inserted_at: chrono::NaiveDateTime,
}

impl UnsavedHeader {
    pub fn new(block_number: i64, block_hash: &ethers::types::H256, source_id: &str) -> Self {
        Self {
            block_number,
            block_hash: Hashes::h256_to_string(block_hash).to_lowercase(),
            source_id: source_id.to_string(),
            inserted_at: chrono::Utc::now().naive_utc(),
        }
    }
}
