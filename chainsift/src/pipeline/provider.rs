use std::sync::Arc;

use ethers::prelude::Middleware;
use ethers::providers::{Http, Provider as EthersProvider, ProviderError as EthersProviderError};
use ethers::types::{Filter as EthersFilter, Log, U64};

pub type ProviderError = EthersProviderError;

/// The chain client the pipeline treats as a simple query surface. A failed
/// call aborts the current epoch; the next poll tick retries from persisted
/// watermark state.
#[async_trait::async_trait]
pub trait Provider: Clone + Sync + Send {
    async fn get_block_number(&self) -> Result<U64, ProviderError>;
    async fn get_logs(&self, filter: &EthersFilter) -> Result<Vec<Log>, ProviderError>;
}

#[async_trait::async_trait]
impl Provider for EthersProvider<Http> {
    async fn get_block_number(&self) -> Result<U64, ProviderError> {
        Middleware::get_block_number(&self).await
    }

    async fn get_logs(&self, filter: &EthersFilter) -> Result<Vec<Log>, ProviderError> {
        Middleware::get_logs(&self, filter).await
    }
}

pub fn get(json_rpc_url: &str) -> Arc<impl Provider> {
    Arc::new(EthersProvider::<Http>::try_from(json_rpc_url).unwrap())
}
