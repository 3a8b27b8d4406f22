use ethers::types::{H160, H256};
use ethers::utils::keccak256;

pub struct Hashes;

impl Hashes {
    /// Deterministic topic0 for a canonical event signature,
    /// e.g. `Transfer(address,address,uint256)`.
    ///
    /// This must match the chain's log-emission convention exactly;
    /// a deviation yields zero matching logs rather than an error.
    pub fn event_topic0(signature: &str) -> H256 {
        H256::from(keccak256(signature.as_bytes()))
    }

    pub fn h160_to_string(h160: &H160) -> String {
        serde_json::to_value(h160).unwrap().as_str().unwrap().to_string()
    }

    pub fn h256_to_string(h256: &H256) -> String {
        serde_json::to_value(h256).unwrap().as_str().unwrap().to_string()
    }
}
