mod error;
pub mod provider;

pub use error::PipelineError;
pub use provider::{Provider, ProviderError};

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::interval;

use crate::checkpoints::{CheckpointStore, CreateOutcome};
use crate::contracts::Contract;
use crate::emitted::{self, CollectorHandle, EmittedBatch};
use crate::events::{AbiDecoder, LogDecoder};
use crate::registry::{EventMapping, EventRegistry};
use crate::repos::HasRawQueryClient;
use crate::{ChainsiftRepoClient, Config};

/// What one epoch accomplished, against the chain head it snapshotted.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EpochSummary {
    pub chain_head: u64,
    pub headers_checked: u64,
    pub rows_inserted: u64,
    pub duplicates: u64,
    pub logs_skipped: u64,
}

/// Spawns one sequential polling task per (contract, event-type). Units
/// never share watermark namespaces or destination tables, so they need no
/// cross-unit locking against the shared store.
pub async fn start(config: &Config) -> Vec<JoinHandle<()>> {
    let mut tasks = vec![];

    for contract in &config.contracts {
        let registry = EventRegistry::for_contract(contract);
        let collector = contract
            .create_addr_list
            .then(|| emitted::start(contract.clone()).0);

        for mapping in registry.into_mappings() {
            let config = config.clone();
            let contract = contract.clone();
            let collector = collector.clone();

            tasks.push(tokio::spawn(async move {
                let provider = provider::get(&config.json_rpc_url);
                let mut client = config.repo.get_client().await;
                let decoder = AbiDecoder;
                let mut poll_interval = interval(Duration::from_millis(config.poll_interval_ms));

                loop {
                    poll_interval.tick().await;

                    let result = run_epoch(
                        &mut client,
                        &provider,
                        &decoder,
                        &contract,
                        &mapping,
                        collector.as_ref(),
                    )
                    .await;

                    if let Err(error) = result {
                        tracing::warn!(
                            source_id = %client.source_id,
                            contract = %contract.name,
                            event = %mapping.event_name,
                            %error,
                            "epoch aborted; retrying on next poll tick"
                        );
                    }
                }
            }));
        }
    }

    tasks
}

/// One epoch for one (source, contract, event-type) unit:
/// gap detection, log fetch, decode/filter, persist, checkpoint.
///
/// Every epoch re-derives pending work from persisted watermarks; nothing
/// is cached across epochs, so restart-after-crash needs no recovery step
/// beyond running this again. Errors abort the epoch only; headers already
/// checkpointed are never rolled back or reprocessed.
pub async fn run_epoch(
    client: &mut ChainsiftRepoClient,
    provider: &Arc<impl Provider>,
    decoder: &impl LogDecoder,
    contract: &Contract,
    mapping: &EventMapping,
    collector: Option<&CollectorHandle>,
) -> Result<EpochSummary, PipelineError> {
    let source_id = client.source_id.to_string();

    let event = contract
        .events
        .get(&mapping.event_name)
        .ok_or_else(|| PipelineError::UnknownEvent(mapping.event_name.to_string()))?;
    let filter = contract
        .filters
        .get(&mapping.event_name)
        .ok_or_else(|| PipelineError::UnknownEvent(mapping.event_name.to_string()))?;

    let chain_head = provider.get_block_number().await?.as_u64();

    let mut summary = EpochSummary {
        chain_head,
        ..Default::default()
    };

    let mut store = CheckpointStore::new(client, &mapping.table);
    let missing_headers = store.missing_headers(contract.start_block_number, chain_head).await?;

    for header in missing_headers {
        let logs = provider.get_logs(&filter.for_block(header.block_number as u64)).await?;

        let mut models = vec![];
        let mut batch = EmittedBatch::default();

        for log in &logs {
            let model = match decoder.decode(event, log) {
                Ok(model) => model,
                Err(error) => {
                    tracing::warn!(
                        source_id = %source_id,
                        contract = %contract.name,
                        event = %mapping.event_name,
                        header_id = header.id,
                        %error,
                        "skipping undecodable log"
                    );
                    summary.logs_skipped += 1;
                    continue;
                }
            };

            if !contract.passes_event_filter(&model.named_values()) {
                summary.logs_skipped += 1;
                continue;
            }

            if contract.create_addr_list {
                batch.extend(emitted::collect_batch(event, &model));
            }

            models.push(model);
        }

        // Zero matching logs is a completed outcome, not "pending": an
        // empty create still marks the header checked.
        let CreateOutcome {
            inserted,
            duplicates,
        } = store.create(header.id, &models).await?;

        summary.rows_inserted += inserted;
        summary.duplicates += duplicates;
        summary.headers_checked += 1;

        if let Some(collector) = collector {
            if !batch.is_empty() {
                collector.send(batch);
            }
        }
    }

    Ok(summary)
}
