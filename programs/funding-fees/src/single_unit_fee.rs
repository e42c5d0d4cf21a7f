use solana_program::msg;

use crate::{
    constants::*,
    error::{FeeResult, FundingFeeError},
};

/// Daily funding fee rate for an integer index level, in
/// `FUNDING_FEE_RATE_DECIMALS`.
///
/// Flat at the top of the curve up to 55, flat at the floor from 150, and
/// halving every 5 points in between with the coefficients interpolating
/// each step.
pub fn funding_fee_rate(int_cvi: u16) -> u128 {
    if int_cvi <= RATE_CURVE_START {
        return MAX_FUNDING_FEE_RATE;
    }
    if int_cvi >= RATE_CURVE_END {
        return MIN_FUNDING_FEE_RATE;
    }

    let offset = int_cvi - RATE_CURVE_START;
    let halvings = u32::from(offset / RATE_CURVE_STEP);
    let coefficient = COEFFICIENTS[usize::from(offset % RATE_CURVE_STEP)];

    RATIO_DECIMALS / 2u128.pow(halvings) / coefficient + FUNDING_FEE_RATE_BASE
}

/// Funding fee owed by one unit of position for `period_seconds` at
/// `cvi_value` (two decimals), in `RATIO_DECIMALS`.
pub fn calculate_single_unit_fee(cvi_value: u16, period_seconds: u64) -> FeeResult<u128> {
    if cvi_value > MAX_CVI_VALUE {
        msg!("CVI value {} above maximum {}", cvi_value, MAX_CVI_VALUE);
        return Err(FundingFeeError::InvalidCviValue);
    }
    if cvi_value == 0 || period_seconds == 0 {
        return Ok(0);
    }

    let rate = funding_fee_rate(cvi_value / 100);

    // Divisions stay in this order so the result floors exactly as the
    // on-chain fee did
    let numerator = u128::from(cvi_value)
        .checked_mul(RATIO_DECIMALS)
        .and_then(|v| v.checked_mul(rate))
        .and_then(|v| v.checked_mul(u128::from(period_seconds)))
        .ok_or(FundingFeeError::ArithmeticOverflow)?;

    Ok(numerator
        / u128::from(SECONDS_PER_DAY)
        / u128::from(MAX_CVI_VALUE)
        / FUNDING_FEE_RATE_DECIMALS)
}
