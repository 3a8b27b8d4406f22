#[cfg(test)]
mod tests {
    use chainsift::{ConflictPolicy, Contract, EventMapping, EventRegistry};

    use crate::factory::{
        APPROVAL_EVENT_ABI, ERC20_CONTRACT_ADDRESS, ERC20_START_BLOCK_NUMBER, TRANSFER_EVENT_ABI,
    };

    fn coin_registry_contract() -> Contract {
        Contract::new("CoinRegistry", ERC20_CONTRACT_ADDRESS, ERC20_START_BLOCK_NUMBER)
            .add_event(TRANSFER_EVENT_ABI)
            .add_single_row_event(APPROVAL_EVENT_ABI)
    }

    #[test]
    fn derives_snake_cased_table_and_watermark_names() {
        let registry = EventRegistry::for_contract(&coin_registry_contract());

        let mapping = registry.get("Transfer").unwrap();
        assert_eq!(mapping.table.name, "coin_registry_transfer");
        assert_eq!(mapping.table.checked_column, "coin_registry_transfer_checked");
        assert_eq!(
            mapping.table.columns,
            vec![
                ("from".to_string(), "TEXT".to_string()),
                ("to".to_string(), "TEXT".to_string()),
                ("value".to_string(), "TEXT".to_string()),
            ]
        );
    }

    #[test]
    fn single_row_events_get_the_per_header_conflict_policy() {
        let registry = EventRegistry::for_contract(&coin_registry_contract());

        let transfer = registry.get("Transfer").unwrap();
        assert_eq!(transfer.table.conflict, ConflictPolicy::MultiplePerHeader);
        assert_eq!(transfer.table.conflict_target(), "(header_id, tx_idx, log_idx)");

        let approval = registry.get("Approval").unwrap();
        assert_eq!(approval.table.conflict, ConflictPolicy::SinglePerHeader);
        assert_eq!(approval.table.conflict_target(), "(header_id)");
    }

    #[test]
    fn migrations_create_table_index_and_watermark_column() {
        let contract = coin_registry_contract();
        let event = contract.events.get("Transfer").unwrap();
        let mapping =
            EventMapping::for_event(&contract.name, event, ConflictPolicy::MultiplePerHeader);

        let migrations = mapping.table.migrations();
        assert_eq!(migrations.len(), 3);

        assert!(migrations[0].contains("CREATE TABLE IF NOT EXISTS coin_registry_transfer"));
        assert!(migrations[0].contains("header_id BIGINT NOT NULL REFERENCES chainsift_headers(id) ON DELETE CASCADE"));
        assert!(migrations[0].contains("raw_log JSON NOT NULL"));

        assert!(migrations[1].contains("CREATE UNIQUE INDEX IF NOT EXISTS coin_registry_transfer_unique_index"));
        assert!(migrations[1].contains("(header_id, tx_idx, log_idx)"));

        assert!(migrations[2].contains("ALTER TABLE chainsift_checked_headers"));
        assert!(migrations[2]
            .contains("ADD COLUMN IF NOT EXISTS coin_registry_transfer_checked BOOLEAN NOT NULL DEFAULT FALSE"));
    }

    #[test]
    fn registry_is_keyed_by_event_name() {
        let mut registry = EventRegistry::for_contract(&coin_registry_contract());

        assert!(registry.get("Transfer").is_some());
        assert!(registry.get("Burn").is_none());
        assert_eq!(registry.mappings().count(), 2);

        let replacement = registry.get("Transfer").unwrap().clone();
        registry.register(replacement);
        assert_eq!(registry.mappings().count(), 2);
    }
}
