use std::collections::HashMap;

use crate::contracts::Contract;
use crate::events::Event;
use crate::repos::{CHECKED_HEADERS_TABLE, HEADERS_TABLE};

/// Uniqueness shape of an event's destination table, made explicit so the
/// checkpoint store knows whether a duplicate-key conflict is an expected
/// no-op or an anomaly to surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConflictPolicy {
    /// Keyed by (header, tx index, log index); several events per header
    /// are legitimate and re-deliveries are swallowed.
    MultiplePerHeader,
    /// Keyed by header alone; a second insert indicates an unrepresentable
    /// second event and is surfaced as a counted anomaly.
    SinglePerHeader,
}

/// Destination table of one event type: decoded columns plus the watermark
/// column that marks headers checked for this type.
#[derive(Clone, Debug)]
pub struct EventTable {
    pub name: String,
    pub checked_column: String,
    pub columns: Vec<(String, String)>,
    pub conflict: ConflictPolicy,
}

impl EventTable {
    pub fn migrations(&self) -> Vec<String> {
        let columns: String = self
            .columns
            .iter()
            .map(|(column, sql_type)| format!("\"{column}\" {sql_type} NOT NULL,\n                "))
            .collect();

        let create_table = format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                id BIGSERIAL PRIMARY KEY,
                header_id BIGINT NOT NULL REFERENCES {headers}(id) ON DELETE CASCADE,
                {columns}raw_log JSON NOT NULL,
                tx_idx BIGINT NOT NULL,
                log_idx BIGINT NOT NULL
            )",
            table = self.name,
            headers = HEADERS_TABLE,
        );

        let unique_index = format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS {table}_unique_index
            ON {table}{conflict_target}",
            table = self.name,
            conflict_target = self.conflict_target(),
        );

        let checked_column = format!(
            "ALTER TABLE {CHECKED_HEADERS_TABLE}
            ADD COLUMN IF NOT EXISTS {column} BOOLEAN NOT NULL DEFAULT FALSE",
            column = self.checked_column,
        );

        vec![create_table, unique_index, checked_column]
    }

    pub fn conflict_target(&self) -> &'static str {
        match self.conflict {
            ConflictPolicy::MultiplePerHeader => "(header_id, tx_idx, log_idx)",
            ConflictPolicy::SinglePerHeader => "(header_id)",
        }
    }
}

/// One registry entry: the event name and where its decoded rows land.
#[derive(Clone, Debug)]
pub struct EventMapping {
    pub event_name: String,
    pub table: EventTable,
}

impl EventMapping {
    pub fn for_event(contract_name: &str, event: &Event, conflict: ConflictPolicy) -> Self {
        let table_name = format!("{}_{}", to_snake_case(contract_name), to_snake_case(&event.name));

        let columns = event
            .fields
            .iter()
            .map(|field| (to_snake_case(&field.name), "TEXT".to_string()))
            .collect();

        Self {
            event_name: event.name.to_string(),
            table: EventTable {
                checked_column: format!("{table_name}_checked"),
                name: table_name,
                columns,
                conflict,
            },
        }
    }
}

/// Data-driven lookup of (event name → destination table / watermark
/// column), consulted by the one generic pipeline instead of per-event
/// orchestration code.
#[derive(Clone, Debug, Default)]
pub struct EventRegistry {
    mappings: HashMap<String, EventMapping>,
}

impl EventRegistry {
    pub fn for_contract(contract: &Contract) -> Self {
        let mappings = contract
            .events
            .values()
            .map(|event| {
                let conflict = if contract.single_row_events.contains(&event.name) {
                    ConflictPolicy::SinglePerHeader
                } else {
                    ConflictPolicy::MultiplePerHeader
                };

                (
                    event.name.to_string(),
                    EventMapping::for_event(&contract.name, event, conflict),
                )
            })
            .collect();

        Self { mappings }
    }

    pub fn register(&mut self, mapping: EventMapping) {
        self.mappings.insert(mapping.event_name.to_string(), mapping);
    }

    pub fn get(&self, event_name: &str) -> Option<&EventMapping> {
        self.mappings.get(event_name)
    }

    pub fn mappings(&self) -> impl Iterator<Item = &EventMapping> {
        self.mappings.values()
    }

    pub fn into_mappings(self) -> Vec<EventMapping> {
        self.mappings.into_values().collect()
    }

    pub fn migrations(&self) -> Vec<String> {
        self.mappings.values().flat_map(|mapping| mapping.table.migrations()).collect()
    }
}

pub(crate) fn to_snake_case(value: &str) -> String {
    let mut snake = String::with_capacity(value.len());

    for (i, c) in value.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                snake.push('_');
            }
            snake.extend(c.to_lowercase());
        } else {
            snake.push(c);
        }
    }

    snake
}
