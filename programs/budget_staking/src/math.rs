//! Scaled-integer helpers.
//!
//! All results are floored, so rounding dust always stays with the pool.

use anchor_lang::prelude::*;

use crate::constants::BASIS_POINTS_DENOMINATOR;
use crate::error::StakingError;

/// Computes `floor(a * b / denom)`.
///
/// When `a * b` does not fit in a `u128` the product is split as
/// `(a / denom) * b + (a % denom) * b / denom`, which is exact under floor
/// division and keeps the intermediates small enough for every value the
/// reward accumulator produces.
pub fn mul_div(a: u128, b: u128, denom: u128) -> Result<u128> {
    require!(denom != 0, StakingError::DivisionByZero);

    if let Some(product) = a.checked_mul(b) {
        return Ok(product / denom);
    }

    let whole = (a / denom)
        .checked_mul(b)
        .ok_or(StakingError::MathOverflow)?;
    let fraction = (a % denom)
        .checked_mul(b)
        .ok_or(StakingError::MathOverflow)?
        / denom;

    Ok(whole
        .checked_add(fraction)
        .ok_or(StakingError::MathOverflow)?)
}

/// Fee share of `amount` at `bps` basis points, floored.
pub fn bps_of(amount: u64, bps: u16) -> Result<u64> {
    let share = mul_div(
        amount as u128,
        bps as u128,
        BASIS_POINTS_DENOMINATOR as u128,
    )?;
    to_u64(share)
}

pub fn to_u64(value: u128) -> Result<u64> {
    Ok(u64::try_from(value).map_err(|_| StakingError::ConversionOverflow)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PRECISION;

    #[test]
    fn test_mul_div_floors() {
        assert_eq!(mul_div(10, 3, 4).unwrap(), 7);
        assert_eq!(mul_div(1, 1, 2).unwrap(), 0);
        assert_eq!(mul_div(0, u128::MAX, 7).unwrap(), 0);
    }

    #[test]
    fn test_mul_div_survives_wide_product() {
        // 10^20 * 10^19 overflows u128 but the quotient does not
        let a = 100_000_000_000_000_000_000u128;
        let b = 10_000_000_000_000_000_000u128;
        assert_eq!(mul_div(a, b, PRECISION).unwrap(), 1_000_000_000_000_000_000_000);

        // remainder branch: (PRECISION + 1) * b / PRECISION
        let wide = u128::MAX / 2;
        let expected = wide + wide / PRECISION;
        assert_eq!(mul_div(PRECISION + 1, wide, PRECISION).unwrap(), expected);
    }

    #[test]
    fn test_mul_div_rejects_zero_denominator() {
        assert_eq!(
            mul_div(1, 1, 0).unwrap_err(),
            StakingError::DivisionByZero.into()
        );
    }

    #[test]
    fn test_mul_div_reports_overflow() {
        assert_eq!(
            mul_div(u128::MAX, u128::MAX, 1).unwrap_err(),
            StakingError::MathOverflow.into()
        );
    }

    #[test]
    fn test_bps_of() {
        assert_eq!(bps_of(10_000, 100).unwrap(), 100);
        assert_eq!(bps_of(99, 100).unwrap(), 0);
        assert_eq!(bps_of(u64::MAX, 1_000).unwrap(), u64::MAX / 10);
    }

    #[test]
    fn test_to_u64_bounds() {
        assert_eq!(to_u64(u64::MAX as u128).unwrap(), u64::MAX);
        assert_eq!(
            to_u64(u64::MAX as u128 + 1).unwrap_err(),
            StakingError::ConversionOverflow.into()
        );
    }
}
