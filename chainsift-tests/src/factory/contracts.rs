use chainsift::Contract;

pub const TRANSFER_EVENT_ABI: &str =
    "event Transfer(address indexed from, address indexed to, uint256 value)";

pub const APPROVAL_EVENT_ABI: &str =
    "event Approval(address indexed owner, address indexed spender, uint256 value)";

pub const BALANCE_OF_METHOD_ABI: &str =
    "function balanceOf(address owner) returns (uint256 balance)";

pub const ERC20_CONTRACT_ADDRESS: &str = "0x8a90CAb2b38dba80c64b7734e58Ee1dB38B8993e";
pub const ERC20_START_BLOCK_NUMBER: u64 = 100;

/// A ready-to-index Transfer watcher. Each test passes its own `name` so
/// its destination table and watermark column never collide with another
/// test's.
pub fn erc20_contract(name: &str) -> Contract {
    let mut contract = Contract::new(name, ERC20_CONTRACT_ADDRESS, ERC20_START_BLOCK_NUMBER)
        .add_event(TRANSFER_EVENT_ABI);

    contract.generate_filters().unwrap();

    contract.init()
}
