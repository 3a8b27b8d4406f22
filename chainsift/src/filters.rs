use ethers::types::{Address, Filter as EthersFilter, H256};

/// Log query descriptor for one event type. `to_block = None` is the
/// unbounded sentinel; `topics[0]` is always the event's signature hash.
#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    pub event_name: String,
    pub from_block: u64,
    pub to_block: Option<u64>,
    pub address: Address,
    pub topics: Vec<H256>,
}

impl Filter {
    pub(crate) fn new(event_name: &str, address: Address, from_block: u64, topic0: H256) -> Self {
        Self {
            event_name: event_name.to_string(),
            from_block,
            to_block: None,
            address,
            topics: vec![topic0],
        }
    }

    pub fn topic0(&self) -> H256 {
        self.topics[0]
    }

    pub fn to_query(&self) -> EthersFilter {
        let value = EthersFilter::new()
            .address(self.address)
            .topic0(self.topic0())
            .from_block(self.from_block);

        match self.to_block {
            Some(to_block) => value.to_block(to_block),
            None => value,
        }
    }

    /// The same query restricted to a single header's block.
    pub fn for_block(&self, block_number: u64) -> EthersFilter {
        EthersFilter::new()
            .address(self.address)
            .topic0(self.topic0())
            .from_block(block_number)
            .to_block(block_number)
    }
}
