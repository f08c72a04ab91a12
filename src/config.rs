use crate::domain::amount::{DISPLAY_PRECISION, TOKEN_DECIMALS};
use alloy_primitives::{Address, address};

/// The deployed bill ledger on Alfajores.
pub const LEDGER_ADDRESS: Address = address!("0xea5B18A53004FD1AFa0386236F5F08565943a0B0");
/// The cUSD token on Alfajores.
pub const TOKEN_ADDRESS: Address = address!("0x874069Fa1Eb16D44d622F2e0Ca25eeA172369bC1");

pub const EXPLORER_URL: &str = "https://alfajores-blockscout.celo-testnet.org";

/// Static settings of a client run: where the contracts live and how amounts are shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub ledger_address: Address,
    pub token_address: Address,
    pub decimals: u32,
    pub display_precision: u32,
    pub currency_symbol: String,
    pub explorer_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ledger_address: LEDGER_ADDRESS,
            token_address: TOKEN_ADDRESS,
            decimals: TOKEN_DECIMALS,
            display_precision: DISPLAY_PRECISION,
            currency_symbol: "cUSD".to_string(),
            explorer_url: EXPLORER_URL.to_string(),
        }
    }
}
