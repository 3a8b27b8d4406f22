use chainsift::EventModel;

use super::{TRANSFER_RECIPIENT_ADDRESS, TRANSFER_SENDER_ADDRESS, TRANSFER_VALUE};

/// A decoded Approval, keyed within its header by the given indices.
pub fn approval_model(transaction_index: i64, log_index: i64) -> EventModel {
    EventModel {
        event_name: "Approval".to_string(),
        values: vec![
            ("owner".to_string(), TRANSFER_SENDER_ADDRESS.to_string()),
            ("spender".to_string(), TRANSFER_RECIPIENT_ADDRESS.to_string()),
            ("value".to_string(), TRANSFER_VALUE.to_string()),
        ],
        raw_log: serde_json::json!({"address": TRANSFER_SENDER_ADDRESS}),
        transaction_index,
        log_index,
    }
}

/// A decoded Transfer, keyed within its header by the given indices.
pub fn transfer_model(transaction_index: i64, log_index: i64) -> EventModel {
    EventModel {
        event_name: "Transfer".to_string(),
        values: vec![
            ("from".to_string(), TRANSFER_SENDER_ADDRESS.to_string()),
            ("to".to_string(), TRANSFER_RECIPIENT_ADDRESS.to_string()),
            ("value".to_string(), TRANSFER_VALUE.to_string()),
        ],
        raw_log: serde_json::json!({"address": TRANSFER_SENDER_ADDRESS}),
        transaction_index,
        log_index,
    }
}
