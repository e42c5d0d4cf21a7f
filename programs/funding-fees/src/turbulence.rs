use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::msg;

use crate::{
    constants::*,
    error::{FeeResult, FundingFeeError},
};

/// Oracle cadence used when averaging turbulence over missed rounds.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurbulenceConfig {
    /// Seconds between oracle rounds
    pub heartbeat: u64,
    pub rounds: u32,
}

impl Default for TurbulenceConfig {
    fn default() -> Self {
        Self {
            heartbeat: DEFAULT_HEARTBEAT,
            rounds: DEFAULT_ROUNDS,
        }
    }
}

impl TurbulenceConfig {
    pub fn validate(&self) -> FeeResult<()> {
        if self.heartbeat == 0 {
            return Err(FundingFeeError::InvalidHeartbeat);
        }
        Ok(())
    }

    pub fn next_average_turbulence(
        &self,
        curr_turbulence: u16,
        time_diff: u64,
        last_cvi: u16,
        curr_cvi: u16,
    ) -> FeeResult<u16> {
        calculate_next_average_turbulence(
            curr_turbulence,
            time_diff,
            self.heartbeat,
            self.rounds,
            last_cvi,
            curr_cvi,
        )
    }
}

/// Turbulence after one oracle update.
///
/// Rounds the oracle missed (`time_diff / heartbeat`) decay the value by
/// halving. The remaining rounds add `TURBULENCE_STEP` each, as many as the
/// relative CVI move allows. Results below one step collapse to zero.
pub fn calculate_next_average_turbulence(
    curr_turbulence: u16,
    time_diff: u64,
    heartbeat: u64,
    rounds: u32,
    last_cvi: u16,
    curr_cvi: u16,
) -> FeeResult<u16> {
    if heartbeat == 0 {
        return Err(FundingFeeError::InvalidHeartbeat);
    }
    if last_cvi == 0 {
        return Err(FundingFeeError::DivisionByZero);
    }

    let hours = time_diff / heartbeat;
    let rounds = u64::from(rounds);

    let delta = u64::from(last_cvi.abs_diff(curr_cvi));
    let deviation = delta * DEVIATION_PERCENT_DECIMALS / u64::from(last_cvi);
    let allowed_times = deviation * DEVIATION_PERCENT_DECIMALS / TURBULENCE_DEVIATION_DIVISOR;

    let (decay_times, increase_times) = if hours >= rounds {
        (rounds, 0)
    } else {
        let increase = (rounds - hours).min(allowed_times);
        (rounds - increase, increase)
    };

    let decayed = if decay_times >= u64::from(u16::BITS) {
        0
    } else {
        u64::from(curr_turbulence) >> decay_times
    };
    let next = decayed
        .saturating_add(increase_times.saturating_mul(u64::from(TURBULENCE_STEP)))
        .min(u64::from(MAX_TURBULENCE));

    if next < u64::from(TURBULENCE_STEP) {
        return Ok(0);
    }

    msg!(
        "Turbulence {} -> {} ({} decays, {} increases)",
        curr_turbulence,
        next,
        decay_times,
        increase_times
    );
    Ok(next as u16)
}

/// Turbulence after a run of elapsed periods, applied in order.
///
/// A period of at least an hour halves the value, a shorter one adds
/// `TURBULENCE_STEP`. Only the final value is capped.
///
/// Each step starts from the previous step's result. Older fee tooling
/// restarted every step from `curr_turbulence`, so only its last period
/// counted: 900 over `[1, 1, 3600]` gives 550 here and 450 there.
pub fn calculate_next_turbulence(curr_turbulence: u16, periods: &[u64]) -> u16 {
    let next = periods.iter().fold(u32::from(curr_turbulence), |turbulence, &period| {
        if period >= SECONDS_PER_HOUR {
            turbulence / 2
        } else {
            turbulence.saturating_add(u32::from(TURBULENCE_STEP))
        }
    });

    next.min(u32::from(MAX_TURBULENCE)) as u16
}
