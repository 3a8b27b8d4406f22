#[cfg(test)]
mod tests {
    use chainsift::emitted::{self, EmittedBatch};
    use chainsift::{Contract, Event, EventModel};

    use crate::factory::{
        erc20_contract, transfer_model, BALANCE_OF_METHOD_ABI, ERC20_CONTRACT_ADDRESS,
        ERC20_START_BLOCK_NUMBER, TRANSFER_EVENT_ABI, TRANSFER_RECIPIENT_ADDRESS,
        TRANSFER_SENDER_ADDRESS,
    };

    const SEALED_EVENT_ABI: &str =
        "event Sealed(address indexed keeper, bytes32 digest, bytes payload)";

    const DIGEST: &str = "0x83d751998ff98cd609bc9b18bb36bdef8659cde2f74d6d7a1b0fef2c2bf8f839";
    const PAYLOAD: &str = "0xdeadbeef";

    fn sealed_model() -> EventModel {
        EventModel {
            event_name: "Sealed".to_string(),
            values: vec![
                ("keeper".to_string(), TRANSFER_SENDER_ADDRESS.to_string()),
                ("digest".to_string(), DIGEST.to_string()),
                ("payload".to_string(), PAYLOAD.to_string()),
            ],
            raw_log: serde_json::json!({}),
            transaction_index: 1,
            log_index: 0,
        }
    }

    #[test]
    fn classifies_batch_values_by_field_type() {
        let event = Event::new(SEALED_EVENT_ABI);

        let batch = emitted::collect_batch(&event, &sealed_model());

        assert_eq!(batch.addrs, vec![TRANSFER_SENDER_ADDRESS.to_string()]);
        assert_eq!(batch.hashes, vec![DIGEST.to_string()]);
        assert_eq!(batch.bytes, vec![PAYLOAD.to_string()]);
    }

    #[test]
    fn batch_of_a_transfer_carries_both_parties() {
        let event = Event::new(TRANSFER_EVENT_ABI);

        let batch = emitted::collect_batch(&event, &transfer_model(1, 0));

        assert_eq!(
            batch.addrs,
            vec![TRANSFER_SENDER_ADDRESS.to_string(), TRANSFER_RECIPIENT_ADDRESS.to_string()]
        );
        assert!(batch.hashes.is_empty());
        assert!(batch.bytes.is_empty());
    }

    #[test]
    fn batches_extend_and_report_emptiness() {
        let mut batch = EmittedBatch::default();
        assert!(batch.is_empty());

        batch.extend(EmittedBatch {
            addrs: vec![TRANSFER_SENDER_ADDRESS.to_string()],
            ..Default::default()
        });

        assert!(!batch.is_empty());
        assert_eq!(batch.addrs.len(), 1);
    }

    #[tokio::test]
    async fn collector_accumulates_batches_into_snapshots() {
        let contract = erc20_contract("coin_collector").add_method(BALANCE_OF_METHOD_ABI);
        let (handle, task) = emitted::start(contract);

        handle.send(EmittedBatch {
            addrs: vec![TRANSFER_SENDER_ADDRESS.to_string()],
            ..Default::default()
        });
        handle.send(EmittedBatch {
            addrs: vec![TRANSFER_RECIPIENT_ADDRESS.to_string(), TRANSFER_SENDER_ADDRESS.to_string()],
            ..Default::default()
        });

        let snapshot = handle.snapshot().await;
        assert_eq!(snapshot.addrs.len(), 2);
        assert!(snapshot.addrs.contains(TRANSFER_SENDER_ADDRESS));
        assert!(snapshot.addrs.contains(TRANSFER_RECIPIENT_ADDRESS));

        drop(handle);
        let contract = task.await.unwrap();
        assert_eq!(contract.emitted_addrs.map(|addrs| addrs.len()), Some(2));
    }

    #[tokio::test]
    async fn collector_applies_the_method_allow_list() {
        let contract = erc20_contract("coin_collector_gated")
            .add_method(BALANCE_OF_METHOD_ABI)
            .with_method_args([TRANSFER_SENDER_ADDRESS]);
        let (handle, _task) = emitted::start(contract);

        handle.send(EmittedBatch {
            addrs: vec![TRANSFER_SENDER_ADDRESS.to_string(), TRANSFER_RECIPIENT_ADDRESS.to_string()],
            ..Default::default()
        });

        let snapshot = handle.snapshot().await;
        assert_eq!(snapshot.addrs.len(), 1);
        assert!(snapshot.addrs.contains(TRANSFER_SENDER_ADDRESS));
    }

    #[test]
    fn sealed_contract_allocates_every_accumulator_kind() {
        let contract = Contract::new("Vault", ERC20_CONTRACT_ADDRESS, ERC20_START_BLOCK_NUMBER)
            .add_event(SEALED_EVENT_ABI)
            .init();

        assert!(contract.emitted_addrs.is_some());
        assert!(contract.emitted_hashes.is_some());
        assert!(contract.emitted_bytes.is_some());
    }
}
