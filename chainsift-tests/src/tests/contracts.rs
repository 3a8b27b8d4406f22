#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chainsift::{ConfigError, Contract, Hashes};

    use crate::factory::{
        erc20_contract, APPROVAL_EVENT_ABI, BALANCE_OF_METHOD_ABI, ERC20_CONTRACT_ADDRESS,
        ERC20_START_BLOCK_NUMBER, TRANSFER_EVENT_ABI,
    };

    #[test]
    fn generates_one_filter_per_event() {
        let mut contract = Contract::new("Coin", ERC20_CONTRACT_ADDRESS, ERC20_START_BLOCK_NUMBER)
            .add_event(TRANSFER_EVENT_ABI)
            .add_event(APPROVAL_EVENT_ABI);

        contract.generate_filters().unwrap();

        assert_eq!(contract.filters.len(), 2);

        let transfer_filter = contract.filters.get("Transfer").unwrap();
        assert_eq!(transfer_filter.from_block, ERC20_START_BLOCK_NUMBER);
        assert_eq!(transfer_filter.to_block, None);
        assert_eq!(
            transfer_filter.topic0(),
            Hashes::event_topic0("Transfer(address,address,uint256)")
        );

        let approval_filter = contract.filters.get("Approval").unwrap();
        assert_eq!(
            approval_filter.topic0(),
            Hashes::event_topic0("Approval(address,address,uint256)")
        );
    }

    #[test]
    fn filters_convert_to_chain_queries() {
        let contract = erc20_contract("coin_query");
        let filter = contract.filters.get("Transfer").unwrap().clone();

        let query = filter.to_query();
        assert_eq!(query.get_from_block(), Some(ERC20_START_BLOCK_NUMBER.into()));
        assert_eq!(query.get_to_block(), None);

        let mut bounded = filter;
        bounded.to_block = Some(150);
        assert_eq!(bounded.to_query().get_to_block(), Some(150.into()));
    }

    #[test]
    fn rejects_contracts_without_events() {
        let mut contract = Contract::new("Coin", ERC20_CONTRACT_ADDRESS, ERC20_START_BLOCK_NUMBER);

        let error = contract.generate_filters().unwrap_err();

        assert!(matches!(error, ConfigError::NoEvents(name) if name == "Coin"));
    }

    #[test]
    fn rejects_unparseable_addresses() {
        let mut contract =
            Contract::new("Coin", "not-an-address", ERC20_START_BLOCK_NUMBER).add_event(TRANSFER_EVENT_ABI);

        let error = contract.generate_filters().unwrap_err();

        assert!(matches!(error, ConfigError::InvalidAddress(address) if address == "not-an-address"));
    }

    #[test]
    fn unset_and_empty_allow_lists_are_both_permissive() {
        let unrestricted = erc20_contract("coin_unrestricted");
        assert!(unrestricted.wanted_event_arg("0xanything"));

        let empty: Vec<String> = vec![];
        let empty_restricted = erc20_contract("coin_empty").with_event_args(empty);
        assert!(empty_restricted.wanted_event_arg("0xanything"));
    }

    #[test]
    fn non_empty_allow_list_restricts() {
        let contract = erc20_contract("coin_restricted").with_event_args(["0xdeadbeef"]);

        assert!(contract.wanted_event_arg("0xdeadbeef"));
        assert!(!contract.wanted_event_arg("0xanything"));
    }

    #[test]
    fn event_filter_passes_when_any_value_is_wanted() {
        let contract =
            erc20_contract("coin_any").with_event_args([crate::factory::TRANSFER_SENDER_ADDRESS]);

        let matching = HashMap::from([
            ("from".to_string(), crate::factory::TRANSFER_SENDER_ADDRESS.to_string()),
            ("to".to_string(), "0xsomeoneelse".to_string()),
        ]);
        assert!(contract.passes_event_filter(&matching));

        let non_matching = HashMap::from([
            ("from".to_string(), "0xsomeoneelse".to_string()),
            ("to".to_string(), "0xanother".to_string()),
        ]);
        assert!(!contract.passes_event_filter(&non_matching));
    }

    #[test]
    fn init_allocates_accumulators_for_present_field_kinds_only() {
        let contract = erc20_contract("coin_init");

        assert!(contract.emitted_addrs.is_some());
        assert!(contract.emitted_hashes.is_none());
        assert!(contract.emitted_bytes.is_none());
    }

    #[test]
    fn emitted_values_are_dropped_without_methods() {
        let mut contract = erc20_contract("coin_no_methods");

        contract.add_emitted_addrs(["0xb518b3136e491101f22b77f385fe22269c515188"]);

        assert_eq!(contract.emitted_addrs, Some(Default::default()));
    }

    #[test]
    fn emitted_values_honor_the_method_allow_list() {
        let wanted = "0xb518b3136e491101f22b77f385fe22269c515188";

        let mut contract = erc20_contract("coin_methods")
            .add_method(BALANCE_OF_METHOD_ABI)
            .with_method_args([wanted]);

        contract.add_emitted_addrs([wanted, "0xunwanted"]);

        let emitted_addrs = contract.emitted_addrs.as_ref().unwrap();
        assert_eq!(emitted_addrs.len(), 1);
        assert!(emitted_addrs.contains(wanted));
    }
}
