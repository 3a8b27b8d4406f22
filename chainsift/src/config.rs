use derive_more::Display;

use crate::contracts::Contract;
use crate::ChainsiftRepo;

#[derive(Debug, Display)]
pub enum ConfigError {
    #[display("there are no contracts to index")]
    NoContracts,
    #[display("no events or filters derivable for contract {_0}")]
    NoEvents(String),
    #[display("invalid contract address {_0}")]
    InvalidAddress(String),
}

/// Startup configuration, consumed once to build the contract descriptors.
/// There is no further configuration surface during steady-state operation.
#[derive(Clone)]
pub struct Config {
    pub repo: ChainsiftRepo,
    pub json_rpc_url: String,
    pub contracts: Vec<Contract>,
    pub poll_interval_ms: u64,
}

impl Config {
    pub fn new(repo: ChainsiftRepo, json_rpc_url: &str) -> Self {
        Self {
            repo,
            json_rpc_url: json_rpc_url.to_string(),
            contracts: vec![],
            poll_interval_ms: 10_000,
        }
    }

    pub fn add_contract(mut self, contract: Contract) -> Self {
        self.contracts.push(contract);

        self
    }

    pub fn with_poll_interval_ms(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;

        self
    }

    /// An inert configuration is a startup-time failure; the affected unit
    /// never begins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.contracts.is_empty() {
            return Err(ConfigError::NoContracts);
        }

        for contract in &self.contracts {
            if contract.events.is_empty() {
                return Err(ConfigError::NoEvents(contract.name.to_string()));
            }
        }

        Ok(())
    }
}
