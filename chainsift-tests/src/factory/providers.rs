use std::str::FromStr;
use std::sync::Arc;

use chainsift::pipeline::{Provider, ProviderError};
use ethers::types::{Bytes, Filter, Log, H160, H256, U64};

pub const TRANSFER_SENDER_ADDRESS: &str = "0xb518b3136e491101f22b77f385fe22269c515188";
pub const TRANSFER_RECIPIENT_ADDRESS: &str = "0x7dfd6013cf8d92b751e63d481b51fe0e4c5abf5e";
pub const TRANSFER_VALUE: &str = "100";

pub fn empty_provider() -> Arc<impl Provider> {
    #[derive(Clone)]
    struct TestProvider;
    #[async_trait::async_trait]
    impl Provider for TestProvider {
        async fn get_block_number(&self) -> Result<U64, ProviderError> {
            Ok(U64::from(0))
        }

        async fn get_logs(&self, _filter: &Filter) -> Result<Vec<Log>, ProviderError> {
            Ok(vec![])
        }
    }

    Arc::new(TestProvider)
}

/// A Transfer log as the chain client would return it for `block_number`,
/// emitted by `contract_address`, with the value argument in the data word.
pub fn transfer_log(contract_address: &str, block_number: u64) -> Log {
    let mut value_word = [0u8; 32];
    value_word[31] = 100;

    Log {
        address: H160::from_str(contract_address).unwrap(),
        topics: vec![
            h256("0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"),
            h256("0x000000000000000000000000b518b3136e491101f22b77f385fe22269c515188"),
            h256("0x0000000000000000000000007dfd6013cf8d92b751e63d481b51fe0e4c5abf5e"),
        ],
        data: Bytes::from(value_word.to_vec()),
        block_hash: Some(H256::from_low_u64_be(block_number)),
        block_number: Some(block_number.into()),
        transaction_hash: Some(h256(
            "0x83d751998ff98cd609bc9b18bb36bdef8659cde2f74d6d7a1b0fef2c2bf8f839",
        )),
        transaction_index: Some(89.into()),
        log_index: Some(218.into()),
        transaction_log_index: None,
        log_type: None,
        removed: Some(false),
    }
}

pub fn h256(str: &str) -> H256 {
    H256::from_str(str).unwrap()
}

#[macro_export]
macro_rules! provider_with_logs {
    ($contract_address:expr, $current_block_number:expr) => {{
        use chainsift::pipeline::{Provider, ProviderError};
        use ethers::types::{Filter, Log, U64};

        #[derive(Clone)]
        struct TestProvider;
        #[async_trait::async_trait]
        impl Provider for TestProvider {
            async fn get_block_number(&self) -> Result<U64, ProviderError> {
                Ok(U64::from($current_block_number))
            }

            async fn get_logs(&self, filter: &Filter) -> Result<Vec<Log>, ProviderError> {
                let block_number = filter.get_from_block().unwrap().as_u64();

                Ok(vec![$crate::factory::transfer_log($contract_address, block_number)])
            }
        }

        std::sync::Arc::new(TestProvider)
    }};
    ($contract_address:expr, $current_block_number:expr, $log_block_number:expr) => {{
        use chainsift::pipeline::{Provider, ProviderError};
        use ethers::types::{Filter, Log, U64};

        #[derive(Clone)]
        struct TestProvider;
        #[async_trait::async_trait]
        impl Provider for TestProvider {
            async fn get_block_number(&self) -> Result<U64, ProviderError> {
                Ok(U64::from($current_block_number))
            }

            async fn get_logs(&self, filter: &Filter) -> Result<Vec<Log>, ProviderError> {
                let block_number = filter.get_from_block().unwrap().as_u64();

                if block_number == $log_block_number {
                    Ok(vec![$crate::factory::transfer_log($contract_address, block_number)])
                } else {
                    Ok(vec![])
                }
            }
        }

        std::sync::Arc::new(TestProvider)
    }};
}

#[macro_export]
macro_rules! provider_with_empty_logs {
    ($current_block_number:expr) => {{
        use chainsift::pipeline::{Provider, ProviderError};
        use ethers::types::{Filter, Log, U64};

        #[derive(Clone)]
        struct TestProvider;
        #[async_trait::async_trait]
        impl Provider for TestProvider {
            async fn get_block_number(&self) -> Result<U64, ProviderError> {
                Ok(U64::from($current_block_number))
            }

            async fn get_logs(&self, _filter: &Filter) -> Result<Vec<Log>, ProviderError> {
                Ok(vec![])
            }
        }

        std::sync::Arc::new(TestProvider)
    }};
}

#[macro_export]
macro_rules! provider_with_filter_stubber {
    ($current_block_number:expr, $filter_stubber:expr) => {{
        use chainsift::pipeline::{Provider, ProviderError};
        use ethers::types::{Filter, Log, U64};

        #[derive(Clone)]
        struct TestProvider;
        #[async_trait::async_trait]
        impl Provider for TestProvider {
            async fn get_block_number(&self) -> Result<U64, ProviderError> {
                Ok(U64::from($current_block_number))
            }

            async fn get_logs(&self, filter: &Filter) -> Result<Vec<Log>, ProviderError> {
                ($filter_stubber)(filter);

                Ok(vec![])
            }
        }

        std::sync::Arc::new(TestProvider)
    }};
}
