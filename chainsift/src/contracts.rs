use std::collections::{HashMap, HashSet};
use std::fmt::Debug;

use crate::config::ConfigError;
use crate::emitted::{self, EmittedKind};
use crate::events::{Event, Method};
use crate::filters::Filter;
use crate::hashes::Hashes;

/// Descriptor for one watched contract: event/method schema, block range,
/// argument allow-lists and the emitted-value accumulators. Built once at
/// startup; the pipeline only reads it afterwards, except for the emitted
/// sets which are mutated solely by the collector that owns the descriptor.
#[derive(Clone)]
pub struct Contract {
    pub name: String,
    pub address: String,
    /// Empty string is mainnet.
    pub network: String,
    pub start_block_number: u64,
    pub last_block_number: u64,
    pub events: HashMap<String, Event>,
    pub methods: HashMap<String, Method>,
    pub filters: HashMap<String, Filter>,
    /// Allow-list of values to filter event logs for. `None` and an empty
    /// set are both permissive; only a non-empty set restricts.
    pub event_args: Option<HashSet<String>>,
    /// Allow-list of values to limit method polling to. Same policy.
    pub method_args: Option<HashSet<String>>,
    pub emitted_addrs: Option<HashSet<String>>,
    pub emitted_hashes: Option<HashSet<String>>,
    pub emitted_bytes: Option<HashSet<String>>,
    /// Event names whose destination table holds at most one row per header.
    pub single_row_events: HashSet<String>,
    pub create_addr_list: bool,
}

impl Contract {
    pub fn new(name: &str, address: &str, start_block_number: u64) -> Self {
        Self {
            name: name.to_string(),
            address: address.to_string(),
            network: String::new(),
            start_block_number,
            last_block_number: start_block_number,
            events: HashMap::new(),
            methods: HashMap::new(),
            filters: HashMap::new(),
            event_args: None,
            method_args: None,
            emitted_addrs: None,
            emitted_hashes: None,
            emitted_bytes: None,
            single_row_events: HashSet::new(),
            create_addr_list: false,
        }
    }

    pub fn on_network(mut self, network: &str) -> Self {
        self.network = network.to_string();

        self
    }

    pub fn add_event(mut self, abi: &str) -> Self {
        let event = Event::new(abi);
        self.events.insert(event.name.to_string(), event);

        self
    }

    /// Like `add_event`, but the event's table is keyed by header alone,
    /// so a second insert for the same header is an anomaly.
    pub fn add_single_row_event(mut self, abi: &str) -> Self {
        let event = Event::new(abi);
        self.single_row_events.insert(event.name.to_string());
        self.events.insert(event.name.to_string(), event);

        self
    }

    pub fn add_method(mut self, abi: &str) -> Self {
        let method = Method::new(abi);
        self.methods.insert(method.name.to_string(), method);

        self
    }

    pub fn with_event_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.event_args = Some(args.into_iter().map(Into::into).collect());

        self
    }

    pub fn with_method_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.method_args = Some(args.into_iter().map(Into::into).collect());

        self
    }

    pub fn persist_addr_list(mut self) -> Self {
        self.create_addr_list = true;

        self
    }

    /// Allocates the emitted-value accumulators for every address, hash and
    /// bytes field across the watched events. Each set is allocated at most
    /// once no matter how many events reference that type.
    pub fn init(mut self) -> Self {
        for event in self.events.values() {
            for field in &event.fields {
                match emitted::emitted_kind(&field.kind) {
                    Some(EmittedKind::Addr) => {
                        self.emitted_addrs.get_or_insert_with(HashSet::new);
                    }
                    Some(EmittedKind::Hash) => {
                        self.emitted_hashes.get_or_insert_with(HashSet::new);
                    }
                    Some(EmittedKind::Bytes) => {
                        self.emitted_bytes.get_or_insert_with(HashSet::new);
                    }
                    None => {}
                }
            }
        }

        self
    }

    /// Builds one filter per event: from the contract's starting block,
    /// unbounded above, topic0 = the event's signature hash. An inert
    /// contract is a startup-time failure, not a silent no-op.
    pub fn generate_filters(&mut self) -> Result<(), ConfigError> {
        if self.events.is_empty() {
            return Err(ConfigError::NoEvents(self.name.to_string()));
        }

        let address = self
            .address
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(self.address.to_string()))?;

        self.filters = self
            .events
            .iter()
            .map(|(name, event)| {
                let topic0 = Hashes::event_topic0(&event.signature());

                (
                    name.to_string(),
                    Filter::new(name, address, self.start_block_number, topic0),
                )
            })
            .collect();

        Ok(())
    }

    /// True when `arg` is in the event allow-list, or when no restriction
    /// is configured. An unset list and an empty list are both permissive.
    pub fn wanted_event_arg(&self, arg: &str) -> bool {
        match &self.event_args {
            None => true,
            Some(args) if args.is_empty() => true,
            Some(args) => args.contains(arg),
        }
    }

    /// Identical policy, applied to the method-polling allow-list.
    pub fn wanted_method_arg(&self, arg: &str) -> bool {
        match &self.method_args {
            None => true,
            Some(args) if args.is_empty() => true,
            Some(args) => args.contains(arg),
        }
    }

    /// True iff at least one decoded value satisfies `wanted_event_arg`.
    pub fn passes_event_filter(&self, args: &HashMap<String, String>) -> bool {
        args.values().any(|arg| self.wanted_event_arg(arg))
    }

    pub fn add_emitted_addrs(&mut self, addrs: impl IntoIterator<Item = impl Into<String>>) {
        if self.methods.is_empty() {
            return;
        }

        for addr in addrs {
            let addr = addr.into();
            if self.wanted_method_arg(&addr) {
                if let Some(emitted_addrs) = &mut self.emitted_addrs {
                    emitted_addrs.insert(addr);
                }
            }
        }
    }

    pub fn add_emitted_hashes(&mut self, hashes: impl IntoIterator<Item = impl Into<String>>) {
        if self.methods.is_empty() {
            return;
        }

        for hash in hashes {
            let hash = hash.into();
            if self.wanted_method_arg(&hash) {
                if let Some(emitted_hashes) = &mut self.emitted_hashes {
                    emitted_hashes.insert(hash);
                }
            }
        }
    }

    pub fn add_emitted_bytes(&mut self, byte_arrays: impl IntoIterator<Item = impl Into<String>>) {
        if self.methods.is_empty() {
            return;
        }

        for bytes in byte_arrays {
            let bytes = bytes.into();
            if self.wanted_method_arg(&bytes) {
                if let Some(emitted_bytes) = &mut self.emitted_bytes {
                    emitted_bytes.insert(bytes);
                }
            }
        }
    }
}

impl Debug for Contract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Contract")
            .field("name", &self.name)
            .field("address", &self.address)
            .field("start_block_number", &self.start_block_number)
            .finish()
    }
}
