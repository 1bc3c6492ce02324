//! Time source and reward window helpers.

use anchor_lang::prelude::*;

use crate::constants::SECONDS_PER_DAY;
use crate::state::{ProgramConfig, RewardLedger};

/// Supplies the current unix timestamp to the engine.
///
/// Read once per operation.
pub trait TimeSource {
    fn unix_timestamp(&self) -> Result<i64>;
}

/// The Solana `Clock` sysvar.
#[derive(Clone, Copy, Debug, Default)]
pub struct SysvarClock;

impl TimeSource for SysvarClock {
    fn unix_timestamp(&self) -> Result<i64> {
        Ok(Clock::get()?.unix_timestamp)
    }
}

/// A fixed instant, used for simulations and tests.
impl TimeSource for i64 {
    fn unix_timestamp(&self) -> Result<i64> {
        Ok(*self)
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn unix_timestamp(&self) -> Result<i64> {
        (**self).unix_timestamp()
    }
}

/// Latest instant rewards may accrue up to.
///
/// Frozen at the last checkpoint while the program is inactive, capped at
/// `end_time` while it runs.
pub fn last_applicable_time(program: &ProgramConfig, rewards: &RewardLedger, now: i64) -> i64 {
    if !program.active {
        return rewards.last_update_time;
    }
    now.min(program.end_time)
}

pub fn is_expired(program: &ProgramConfig, now: i64) -> bool {
    now >= program.end_time
}

/// Whole days left in the running program, 0 when inactive or expired.
pub fn days_remaining(program: &ProgramConfig, now: i64) -> u64 {
    if !program.active || is_expired(program, now) {
        return 0;
    }
    (program.end_time.saturating_sub(now) / SECONDS_PER_DAY) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PROGRAM_DURATION;

    fn running(start: i64) -> ProgramConfig {
        ProgramConfig {
            active: true,
            start_time: start,
            end_time: start + PROGRAM_DURATION,
            ..ProgramConfig::default()
        }
    }

    #[test]
    fn test_inactive_program_freezes_window() {
        let program = ProgramConfig::default();
        let rewards = RewardLedger {
            last_update_time: 42,
            ..RewardLedger::default()
        };
        assert_eq!(last_applicable_time(&program, &rewards, 10_000), 42);
    }

    #[test]
    fn test_window_capped_at_end() {
        let program = running(1_000);
        let rewards = RewardLedger::default();
        assert_eq!(last_applicable_time(&program, &rewards, 2_000), 2_000);
        assert_eq!(
            last_applicable_time(&program, &rewards, program.end_time + 500),
            program.end_time
        );
    }

    #[test]
    fn test_days_remaining() {
        let program = running(0);
        assert_eq!(days_remaining(&program, 0), 365);
        assert_eq!(days_remaining(&program, SECONDS_PER_DAY + 1), 363);
        assert_eq!(days_remaining(&program, program.end_time), 0);
        assert_eq!(days_remaining(&ProgramConfig::default(), 0), 0);
    }

    #[test]
    fn test_fixed_instant_clock() {
        let now: i64 = 1_700_000_000;
        assert_eq!(now.unix_timestamp().unwrap(), 1_700_000_000);
        assert_eq!((&now).unix_timestamp().unwrap(), 1_700_000_000);
    }
}
