// Index
pub const MAX_CVI_VALUE: u16 = 20_000;

// Ratios and time
pub const RATIO_DECIMALS: u128 = 10_000_000_000; // 1e10 == 1.0
pub const SECONDS_PER_HOUR: u64 = 60 * 60;
pub const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

// Funding fee rate curve
pub const FUNDING_FEE_RATE_DECIMALS: u128 = 1_000_000;
pub const MAX_FUNDING_FEE_RATE: u128 = 100_000;
pub const MIN_FUNDING_FEE_RATE: u128 = 2_000;
pub const FUNDING_FEE_RATE_BASE: u128 = 3_000;
pub const RATE_CURVE_START: u16 = 55;
pub const RATE_CURVE_END: u16 = 150;
pub const RATE_CURVE_STEP: u16 = 5;
pub const COEFFICIENTS: [u128; 5] = [100_000, 114_869, 131_950, 151_571, 174_110];

// Premium
pub const MAX_PREMIUM_FEE: u16 = 1_000;
pub const MAX_PERCENTAGE: u128 = 10_000;
pub const MIN_PREMIUM_RATIO: u128 = 8 * RATIO_DECIMALS / 10;

// Turbulence
pub const TURBULENCE_STEP: u16 = 100;
pub const MAX_TURBULENCE: u16 = 1_000;
pub const DEVIATION_PERCENT_DECIMALS: u64 = 10_000;
pub const TURBULENCE_DEVIATION_DIVISOR: u64 = 7_000 * 500;
pub const DEFAULT_HEARTBEAT: u64 = SECONDS_PER_HOUR;
pub const DEFAULT_ROUNDS: u32 = 1;
