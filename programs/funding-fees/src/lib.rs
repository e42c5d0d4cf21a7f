// Funding and premium fee model for the volatility index platform
// Pure computation shared by the on-chain programs - no accounts, no entrypoint

pub mod constants;
pub mod error;
pub mod premium;
pub mod single_unit_fee;
pub mod turbulence;

pub use error::{FeeResult, FundingFeeError};
pub use premium::{calculate_premium_fee, PremiumFee};
pub use single_unit_fee::{calculate_single_unit_fee, funding_fee_rate};
pub use turbulence::{calculate_next_average_turbulence, calculate_next_turbulence, TurbulenceConfig};
