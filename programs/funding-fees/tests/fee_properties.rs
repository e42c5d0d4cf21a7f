use funding_fees::{
    calculate_next_average_turbulence, calculate_next_turbulence, calculate_premium_fee,
    calculate_single_unit_fee,
    constants::{MAX_CVI_VALUE, MAX_PREMIUM_FEE, MAX_TURBULENCE, SECONDS_PER_DAY},
    FundingFeeError, TurbulenceConfig,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_single_unit_fee_grows_with_period(
        cvi in 1u16..=MAX_CVI_VALUE,
        period in 0u64..(365 * SECONDS_PER_DAY),
        extra in 0u64..SECONDS_PER_DAY,
    ) {
        let shorter = calculate_single_unit_fee(cvi, period).unwrap();
        let longer = calculate_single_unit_fee(cvi, period + extra).unwrap();
        prop_assert!(shorter <= longer);
    }

    #[test]
    fn test_single_unit_fee_rejects_out_of_range(
        cvi in (MAX_CVI_VALUE + 1)..=u16::MAX,
        period in any::<u64>(),
    ) {
        prop_assert_eq!(
            calculate_single_unit_fee(cvi, period),
            Err(FundingFeeError::InvalidCviValue)
        );
    }

    #[test]
    fn test_average_turbulence_stays_in_band(
        curr in 0u16..=MAX_TURBULENCE,
        time_diff in 0u64..100_000,
        heartbeat in 1u64..10_000,
        rounds in 0u32..50,
        last_cvi in 1u16..=MAX_CVI_VALUE,
        curr_cvi in 0u16..=MAX_CVI_VALUE,
    ) {
        let next = calculate_next_average_turbulence(
            curr, time_diff, heartbeat, rounds, last_cvi, curr_cvi,
        ).unwrap();
        prop_assert!(next <= MAX_TURBULENCE);
        prop_assert!(next == 0 || next >= 100);
    }

    #[test]
    fn test_next_turbulence_is_capped(
        curr in 0u16..=MAX_TURBULENCE,
        periods in prop::collection::vec(0u64..10_000, 0..20),
    ) {
        prop_assert!(calculate_next_turbulence(curr, &periods) <= MAX_TURBULENCE);
    }

    #[test]
    fn test_premium_fee_is_bounded(
        units in 0u128..1_000_000_000_000_000_000u128,
        ratio in 0u128..20_000_000_000u128,
        last_ratio in 0u128..20_000_000_000u128,
        turbulence in 0u16..=MAX_TURBULENCE,
    ) {
        let premium = calculate_premium_fee(units, ratio, last_ratio, turbulence).unwrap();
        prop_assert!(premium.fee_percentage <= MAX_PREMIUM_FEE);
        prop_assert!(premium.fee_percentage >= turbulence.min(MAX_PREMIUM_FEE));
        prop_assert_eq!(premium.fee, u128::from(premium.fee_percentage) * units / 10_000);
    }
}

#[test]
fn test_quiet_market_cools_down() {
    let config = TurbulenceConfig::default();
    let mut turbulence = 1_000;
    for _ in 0..4 {
        turbulence = config
            .next_average_turbulence(turbulence, config.heartbeat, 5_000, 5_000)
            .unwrap();
    }
    // 1000 -> 500 -> 250 -> 125 -> 62, which collapses to zero
    assert_eq!(turbulence, 0);
}

#[test]
fn test_turbulence_feeds_premium() {
    let config = TurbulenceConfig::default();
    let turbulence = config.next_average_turbulence(0, 0, 5_000, 8_000).unwrap();
    assert_eq!(turbulence, 100);

    let premium = calculate_premium_fee(1_000_000, 9_000_000_000, 9_000_000_000, turbulence).unwrap();
    assert_eq!(premium.fee_percentage, 200);
    assert_eq!(premium.fee, 20_000);
}
