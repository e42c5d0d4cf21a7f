use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::msg;

use crate::{
    constants::*,
    error::{FeeResult, FundingFeeError},
};

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PremiumFee {
    /// Fee charged on the opened units
    pub fee: u128,
    /// Fee rate in `MAX_PERCENTAGE` basis points
    pub fee_percentage: u16,
}

/// Premium charged for opening `units` while the pool is `ratio` utilized
/// (`RATIO_DECIMALS`), after a previous utilization of `last_ratio`.
///
/// The premium grows with the inverse square of the remaining capacity once
/// utilization passes `MIN_PREMIUM_RATIO`. A position that crosses that
/// threshold only pays for the part above it. Turbulence is added on top and
/// the total is capped at `MAX_PREMIUM_FEE`.
pub fn calculate_premium_fee(
    units: u128,
    ratio: u128,
    last_ratio: u128,
    turbulence: u16,
) -> FeeResult<PremiumFee> {
    let mut premium = if ratio >= RATIO_DECIMALS {
        u128::from(MAX_PREMIUM_FEE)
    } else if ratio >= MIN_PREMIUM_RATIO {
        let complement = RATIO_DECIMALS - ratio;
        RATIO_DECIMALS * RATIO_DECIMALS / complement / complement
    } else {
        0
    };

    if premium > 0 && last_ratio < MIN_PREMIUM_RATIO {
        premium = premium
            .checked_mul(ratio - MIN_PREMIUM_RATIO)
            .ok_or(FundingFeeError::ArithmeticOverflow)?
            / (ratio - last_ratio);
        msg!("Premium prorated above threshold: {}", premium);
    }

    let fee_percentage = premium
        .saturating_add(u128::from(turbulence))
        .min(u128::from(MAX_PREMIUM_FEE)) as u16;

    let fee = u128::from(fee_percentage)
        .checked_mul(units)
        .ok_or(FundingFeeError::ArithmeticOverflow)?
        / MAX_PERCENTAGE;

    Ok(PremiumFee { fee, fee_percentage })
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNITS: u128 = 1_000_000;

    #[test]
    fn test_no_premium_below_threshold() {
        let result = calculate_premium_fee(UNITS, 5_000_000_000, 4_000_000_000, 0).unwrap();
        assert_eq!(result, PremiumFee { fee: 0, fee_percentage: 0 });

        // Turbulence is still charged
        let result = calculate_premium_fee(UNITS, 5_000_000_000, 4_000_000_000, 200).unwrap();
        assert_eq!(result, PremiumFee { fee: 20_000, fee_percentage: 200 });
    }

    #[test]
    fn test_premium_curve() {
        let result = calculate_premium_fee(UNITS, 9_000_000_000, 9_000_000_000, 0).unwrap();
        assert_eq!(result, PremiumFee { fee: 10_000, fee_percentage: 100 });

        let result = calculate_premium_fee(UNITS, 8_000_000_000, 8_000_000_000, 0).unwrap();
        assert_eq!(result.fee_percentage, 25);

        let result = calculate_premium_fee(UNITS, 9_900_000_000, 9_000_000_000, 0).unwrap();
        assert_eq!(result.fee_percentage, MAX_PREMIUM_FEE);
    }

    #[test]
    fn test_premium_prorated_across_threshold() {
        let result = calculate_premium_fee(UNITS, 9_000_000_000, 7_000_000_000, 0).unwrap();
        assert_eq!(result, PremiumFee { fee: 5_000, fee_percentage: 50 });
    }

    #[test]
    fn test_full_pool() {
        let result = calculate_premium_fee(UNITS, RATIO_DECIMALS, RATIO_DECIMALS, 0).unwrap();
        assert_eq!(result.fee_percentage, 1_000);
        assert_eq!(result.fee, 100_000);

        let result = calculate_premium_fee(UNITS, RATIO_DECIMALS, 0, 0).unwrap();
        assert_eq!(result.fee_percentage, 200);
    }

    #[test]
    fn test_turbulence_is_capped() {
        let result = calculate_premium_fee(UNITS, 9_000_000_000, 9_000_000_000, 950).unwrap();
        assert_eq!(result.fee_percentage, 1_000);
    }

    #[test]
    fn test_overflowing_units() {
        assert_eq!(
            calculate_premium_fee(u128::MAX, 9_000_000_000, 9_000_000_000, 0),
            Err(FundingFeeError::ArithmeticOverflow)
        );
    }
}
