use derive_more::Display;

use crate::events::EventModel;
use crate::headers::Header;
use crate::registry::{to_snake_case, ConflictPolicy, EventTable};
use crate::repos::{
    ExecutesWithRawQuery, HasRawQueryClient, LoadsDataWithRawQuery, RepoError,
    CHECKED_HEADERS_TABLE, HEADERS_TABLE,
};
use crate::{ChainsiftRepo, ChainsiftRepoClient};

#[derive(Debug, Display)]
pub enum CheckpointError {
    Repo(RepoError),
}

impl From<RepoError> for CheckpointError {
    fn from(value: RepoError) -> Self {
        CheckpointError::Repo(value)
    }
}

/// What one `create` call did. `duplicates` counts rows rejected by the
/// table's uniqueness constraint; for multiple-per-header tables these are
/// expected re-deliveries, for single-per-header tables they are anomalies.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CreateOutcome {
    pub inserted: u64,
    pub duplicates: u64,
}

/// Per-event-type repository over one destination table, scoped to the
/// source identity carried by the repo client. The watermark it maintains
/// is the sole resumption mechanism: a crashed pipeline re-derives pending
/// work purely from `missing_headers`.
pub struct CheckpointStore<'a> {
    client: &'a mut ChainsiftRepoClient,
    table: &'a EventTable,
}

impl<'a> CheckpointStore<'a> {
    pub fn new(client: &'a mut ChainsiftRepoClient, table: &'a EventTable) -> Self {
        Self { client, table }
    }

    /// Idempotently persists `models` and marks the header checked, in one
    /// transaction: a header that is persisted but unchecked, or checked
    /// but unpersisted, must be unrepresentable. An empty batch still
    /// marks the header checked; absence of logs is a completed outcome.
    pub async fn create(
        &mut self,
        header_id: i64,
        models: &[EventModel],
    ) -> Result<CreateOutcome, CheckpointError> {
        let mut outcome = CreateOutcome::default();

        let txn_client = ChainsiftRepo::get_txn_client(self.client).await?;

        for model in models {
            let query = insert_query(self.table, header_id, model);
            let affected = ChainsiftRepo::execute_in_txn(&txn_client, &query).await?;

            if affected == 0 {
                outcome.duplicates += 1;
            } else {
                outcome.inserted += affected;
            }
        }

        let query = mark_checked_query(&self.table.checked_column, header_id);
        ChainsiftRepo::execute_in_txn(&txn_client, &query).await?;

        ChainsiftRepo::commit_txns(txn_client).await?;

        if outcome.duplicates > 0 && self.table.conflict == ConflictPolicy::SinglePerHeader {
            tracing::warn!(
                table = %self.table.name,
                header_id,
                duplicates = outcome.duplicates,
                "duplicate event for single-event-per-header table"
            );
        }

        Ok(outcome)
    }

    /// Upserts the event type's watermark column to true. Idempotent:
    /// repeated calls leave observable state unchanged.
    pub async fn mark_header_checked(&mut self, header_id: i64) -> Result<(), CheckpointError> {
        let query = mark_checked_query(&self.table.checked_column, header_id);
        ChainsiftRepo::execute(self.client, &query).await?;

        Ok(())
    }

    /// Headers of the calling source in `[start, end]` whose watermark for
    /// this event type is false or absent, ascending by block number.
    /// Headers of other sources never appear, even for identical blocks.
    pub async fn missing_headers(
        &mut self,
        start_block_number: u64,
        end_block_number: u64,
    ) -> Result<Vec<Header>, CheckpointError> {
        let query = format!(
            "SELECT h.id, h.block_number, h.block_hash, h.source_id
            FROM {HEADERS_TABLE} h
            LEFT JOIN {CHECKED_HEADERS_TABLE} ch ON ch.header_id = h.id
            WHERE h.source_id = '{source_id}'
            AND h.block_number >= {start_block_number}
            AND h.block_number <= {end_block_number}
            AND COALESCE(ch.{checked_column}, FALSE) = FALSE
            ORDER BY h.block_number ASC",
            source_id = escape(&self.client.source_id),
            checked_column = self.table.checked_column,
        );

        Ok(ChainsiftRepo::load_data_list_from_raw_query(self.client, &query).await?)
    }
}

fn insert_query(table: &EventTable, header_id: i64, model: &EventModel) -> String {
    let mut columns = vec!["header_id".to_string()];
    let mut values = vec![header_id.to_string()];

    for (name, value) in &model.values {
        columns.push(format!("\"{}\"", to_snake_case(name)));
        values.push(format!("'{}'", escape(value)));
    }

    columns.extend(["raw_log".to_string(), "tx_idx".to_string(), "log_idx".to_string()]);
    values.extend([
        format!("'{}'", escape(&model.raw_log.to_string())),
        model.transaction_index.to_string(),
        model.log_index.to_string(),
    ]);

    format!(
        "INSERT INTO {table} ({columns}) VALUES ({values})
        ON CONFLICT {conflict_target} DO NOTHING",
        table = table.name,
        columns = columns.join(", "),
        values = values.join(", "),
        conflict_target = table.conflict_target(),
    )
}

fn mark_checked_query(checked_column: &str, header_id: i64) -> String {
    format!(
        "INSERT INTO {CHECKED_HEADERS_TABLE} (header_id, {checked_column})
        VALUES ({header_id}, TRUE)
        ON CONFLICT (header_id) DO UPDATE SET {checked_column} = TRUE"
    )
}

fn escape(value: &str) -> String {
    value.replace('\'', "''")
}
