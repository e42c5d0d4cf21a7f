//! Fixed-point conversions between underlying and value units
//!
//! Balances are stored in underlying units, which a rebase never touches.
//! Everything users see is in value units:
//! value = underlying * scaling_factor / SCALING_FACTOR_DECIMALS
//!
//! Products are taken in 256 bits so a full u128 balance can be scaled by a
//! full u128 factor; the quotient has to fit back into u128.

use primitive_types::U256;

use crate::{
    constants::{DELTA_PRECISION_DECIMALS, SCALING_FACTOR_DECIMALS},
    error::{ElasticTokenError, LedgerResult},
};

fn narrow(value: U256) -> LedgerResult<u128> {
    if value > U256::from(u128::MAX) {
        return Err(ElasticTokenError::ArithmeticOverflow);
    }
    Ok(value.low_u128())
}

fn mul_div_floor(a: u128, b: u128, divisor: u128) -> LedgerResult<u128> {
    if divisor == 0 {
        return Err(ElasticTokenError::ArithmeticOverflow);
    }
    let product = U256::from(a)
        .checked_mul(U256::from(b))
        .ok_or(ElasticTokenError::ArithmeticOverflow)?;
    narrow(product / U256::from(divisor))
}

/// floor(underlying * scaling_factor / 1e24)
pub fn underlying_to_value(underlying: u128, scaling_factor: u128) -> LedgerResult<u128> {
    mul_div_floor(underlying, scaling_factor, SCALING_FACTOR_DECIMALS)
}

/// floor(value * 1e24 / scaling_factor)
///
/// Read-side conversion. Spending paths use [`value_to_underlying_ceil`].
pub fn value_to_underlying(value: u128, scaling_factor: u128) -> LedgerResult<u128> {
    mul_div_floor(value, SCALING_FACTOR_DECIMALS, scaling_factor)
}

/// ceil(value * 1e24 / scaling_factor)
///
/// A receiver credited with this many underlying units reads back at least
/// `value`; the sender covers the rounding.
pub fn value_to_underlying_ceil(value: u128, scaling_factor: u128) -> LedgerResult<u128> {
    if scaling_factor == 0 {
        return Err(ElasticTokenError::ArithmeticOverflow);
    }
    let numerator = U256::from(value)
        .checked_mul(U256::from(SCALING_FACTOR_DECIMALS))
        .and_then(|n| n.checked_add(U256::from(scaling_factor - 1)))
        .ok_or(ElasticTokenError::ArithmeticOverflow)?;
    narrow(numerator / U256::from(scaling_factor))
}

/// scaling_factor * index_delta / 1e18
pub fn rebase_delta(scaling_factor: u128, index_delta: u128) -> LedgerResult<u128> {
    mul_div_floor(scaling_factor, index_delta, DELTA_PRECISION_DECIMALS)
}

/// Largest scaling factor for which the value-space total supply still fits u128.
pub fn max_scaling_factor(init_supply: u128) -> u128 {
    if init_supply == 0 {
        return u128::MAX;
    }
    let bound = U256::from(u128::MAX) * U256::from(SCALING_FACTOR_DECIMALS) / U256::from(init_supply);
    narrow(bound).unwrap_or(u128::MAX)
}
