#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chainsift::Hashes;
    use ethers::types::{H160, H256};

    #[test]
    fn event_topic0_matches_the_chain_convention() {
        let topic0 = Hashes::event_topic0("Transfer(address,address,uint256)");

        assert_eq!(
            topic0,
            H256::from_str("0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef")
                .unwrap()
        );
    }

    #[test]
    fn event_topic0_is_signature_sensitive() {
        let transfer = Hashes::event_topic0("Transfer(address,address,uint256)");
        let approval = Hashes::event_topic0("Approval(address,address,uint256)");

        assert_ne!(transfer, approval);
    }

    #[test]
    fn h160_to_string_prefixes_and_pads() {
        let address = H160::from_str("0x8a90cab2b38dba80c64b7734e58ee1db38b8993e").unwrap();

        assert_eq!(
            Hashes::h160_to_string(&address).to_lowercase(),
            "0x8a90cab2b38dba80c64b7734e58ee1db38b8993e"
        );
    }

    #[test]
    fn h256_to_string_round_trips() {
        let hash = "0x83d751998ff98cd609bc9b18bb36bdef8659cde2f74d6d7a1b0fef2c2bf8f839";

        assert_eq!(Hashes::h256_to_string(&H256::from_str(hash).unwrap()), hash);
    }
}
