use std::collections::HashSet;

use ethers::abi::ParamType;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::contracts::Contract;
use crate::events::{Event, EventModel};

pub(crate) enum EmittedKind {
    Addr,
    Hash,
    Bytes,
}

// bytes32 fields carry hashes by convention; every other bytes shape is
// treated as an opaque byte array.
pub(crate) fn emitted_kind(kind: &ParamType) -> Option<EmittedKind> {
    match kind {
        ParamType::Address => Some(EmittedKind::Addr),
        ParamType::FixedBytes(32) => Some(EmittedKind::Hash),
        ParamType::FixedBytes(_) | ParamType::Bytes => Some(EmittedKind::Bytes),
        _ => None,
    }
}

/// Address/hash/bytes values extracted from one header's decoded logs,
/// batched for hand-off to the method-polling consumer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmittedBatch {
    pub addrs: Vec<String>,
    pub hashes: Vec<String>,
    pub bytes: Vec<String>,
}

impl EmittedBatch {
    pub fn is_empty(&self) -> bool {
        self.addrs.is_empty() && self.hashes.is_empty() && self.bytes.is_empty()
    }

    pub fn extend(&mut self, other: EmittedBatch) {
        self.addrs.extend(other.addrs);
        self.hashes.extend(other.hashes);
        self.bytes.extend(other.bytes);
    }
}

/// Extracts the emitted values of one decoded model, classified by the
/// event's field types.
pub fn collect_batch(event: &Event, model: &EventModel) -> EmittedBatch {
    let mut batch = EmittedBatch::default();

    for field in &event.fields {
        let Some(value) = model.get(&field.name) else {
            continue;
        };

        match emitted_kind(&field.kind) {
            Some(EmittedKind::Addr) => batch.addrs.push(value.to_string()),
            Some(EmittedKind::Hash) => batch.hashes.push(value.to_string()),
            Some(EmittedKind::Bytes) => batch.bytes.push(value.to_string()),
            None => {}
        }
    }

    batch
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmittedSnapshot {
    pub addrs: HashSet<String>,
    pub hashes: HashSet<String>,
    pub bytes: HashSet<String>,
}

enum Message {
    Batch(EmittedBatch),
    Snapshot(oneshot::Sender<EmittedSnapshot>),
}

/// Handle to the collector task owning a contract's emitted sets. Pipeline
/// units send completed batches; the method-polling consumer asks for
/// snapshots. The live sets are never shared across tasks.
#[derive(Clone)]
pub struct CollectorHandle {
    sender: mpsc::UnboundedSender<Message>,
}

impl CollectorHandle {
    pub fn send(&self, batch: EmittedBatch) {
        // A dropped collector means the process is shutting down; the
        // batch is re-derivable from persisted state on the next run.
        let _ = self.sender.send(Message::Batch(batch));
    }

    pub async fn snapshot(&self) -> EmittedSnapshot {
        let (response_sender, response) = oneshot::channel();

        if self.sender.send(Message::Snapshot(response_sender)).is_err() {
            return EmittedSnapshot::default();
        }

        response.await.unwrap_or_default()
    }
}

pub fn start(mut contract: Contract) -> (CollectorHandle, JoinHandle<Contract>) {
    let (sender, mut receiver) = mpsc::unbounded_channel();

    let handle = tokio::spawn(async move {
        while let Some(message) = receiver.recv().await {
            match message {
                Message::Batch(batch) => {
                    contract.add_emitted_addrs(batch.addrs);
                    contract.add_emitted_hashes(batch.hashes);
                    contract.add_emitted_bytes(batch.bytes);
                }
                Message::Snapshot(response_sender) => {
                    let snapshot = EmittedSnapshot {
                        addrs: contract.emitted_addrs.clone().unwrap_or_default(),
                        hashes: contract.emitted_hashes.clone().unwrap_or_default(),
                        bytes: contract.emitted_bytes.clone().unwrap_or_default(),
                    };

                    let _ = response_sender.send(snapshot);
                }
            }
        }

        contract
    });

    (CollectorHandle { sender }, handle)
}
