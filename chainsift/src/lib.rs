pub mod checkpoints;
mod config;
mod contracts;
mod diesel;
pub mod emitted;
pub mod events;
mod filters;
mod hashes;
mod headers;
pub mod pipeline;
pub mod registry;
mod repos;

pub use checkpoints::{CheckpointError, CheckpointStore, CreateOutcome};
pub use config::{Config, ConfigError};
pub use contracts::Contract;
pub use events::{AbiDecoder, DecodeError, Event, EventField, EventModel, LogDecoder, Method};
pub use filters::Filter;
pub use hashes::Hashes;
pub use headers::{Header, UnsavedHeader};
pub use pipeline::{EpochSummary, PipelineError};
pub use registry::{ConflictPolicy, EventMapping, EventRegistry, EventTable};
pub use repos::*;

use std::fmt::Debug;

#[cfg(feature = "postgres")]
pub type ChainsiftRepo = PostgresRepo;

#[cfg(feature = "postgres")]
pub type ChainsiftRepoPool = PostgresRepoPool;

#[cfg(feature = "postgres")]
pub type ChainsiftRepoConn<'a> = PostgresRepoConn<'a>;

#[cfg(feature = "postgres")]
pub type ChainsiftRepoClient = PostgresRepoClient;

#[cfg(feature = "postgres")]
pub type ChainsiftRepoTxnClient<'a> = PostgresRepoTxnClient<'a>;

#[cfg(feature = "postgres")]
pub use repos::PostgresRepoAsyncConnection as ChainsiftRepoAsyncConnection;

pub enum ChainsiftError {
    Config(ConfigError),
    Repo(RepoError),
}

impl From<ConfigError> for ChainsiftError {
    fn from(value: ConfigError) -> Self {
        ChainsiftError::Config(value)
    }
}

impl From<RepoError> for ChainsiftError {
    fn from(value: RepoError) -> Self {
        ChainsiftError::Repo(value)
    }
}

impl Debug for ChainsiftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChainsiftError::Config(config_error) => {
                write!(f, "Config Error: {config_error}")
            }
            ChainsiftError::Repo(repo_error) => {
                write!(f, "Repo Error: {repo_error}")
            }
        }
    }
}

/// Validates the configuration, builds every contract descriptor exactly
/// once, runs migrations and starts one indexing task per
/// (contract, event-type) unit.
pub async fn index_events(config: &Config) -> Result<Vec<tokio::task::JoinHandle<()>>, ChainsiftError> {
    config.validate()?;

    let mut config = config.clone();
    config.contracts = config
        .contracts
        .into_iter()
        .map(|mut contract| {
            contract.generate_filters()?;

            Ok(contract.init())
        })
        .collect::<Result<_, ConfigError>>()?;

    let client = config.repo.get_client().await;
    setup(&config, &client).await?;

    Ok(pipeline::start(&config).await)
}

/// Runs the internal migrations plus the per-event-type table and
/// watermark-column migrations derived from the registry.
pub async fn setup(config: &Config, client: &ChainsiftRepoClient) -> Result<(), ChainsiftError> {
    ChainsiftRepo::migrate(client, ChainsiftRepo::get_internal_migrations()).await?;

    for contract in &config.contracts {
        let registry = EventRegistry::for_contract(contract);
        ChainsiftRepo::migrate(client, registry.migrations()).await?;
    }

    Ok(())
}
