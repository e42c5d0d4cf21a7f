// Scaling
pub const SCALING_FACTOR_DECIMALS: u128 = 1_000_000_000_000_000_000_000_000; // 1e24 == 1.0
pub const INITIAL_SCALING_FACTOR: u128 = SCALING_FACTOR_DECIMALS;

// Rebase
pub const DELTA_PRECISION_DECIMALS: u128 = 1_000_000_000_000_000_000; // 1e18

// Ledger account
pub const LEDGER_DISCRIMINATOR: [u8; 8] = *b"ELASTIC_";
pub const MAX_NAME_LEN: usize = 32;
pub const MAX_SYMBOL_LEN: usize = 10;
