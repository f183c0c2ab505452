//! Constant-pool LP share math with exact integer floors
//!
//! Preserves full precision by flooring once per token on a 512-bit
//! intermediate. Estimates here are client-side bounds: the exchange decides
//! the real share count on chain.

use crate::slippage::Haircut;
use crate::PoolMathError;
use lagoon_types::Amount;
use tracing::debug;

/// Share and withdrawal estimation for constant-pool AMMs
pub struct PoolMath;

impl PoolMath {
    /// Estimate LP shares minted for `supplied_amounts`
    ///
    /// For each token `i`:
    /// `candidate_i = floor(total_shares * supplied_i / pool_amounts_i)`.
    /// The smallest candidate wins so an unbalanced deposit is never
    /// over-credited, then [`Haircut::LP_SHARES`] (99.7%) is applied.
    ///
    /// # Arguments
    /// * `total_shares` - Pool's current share supply
    /// * `pool_amounts` - Pool reserves, in pool token order
    /// * `supplied_amounts` - Amounts the user deposits, same order
    pub fn lp_shares_from_amounts(
        total_shares: Amount,
        pool_amounts: &[Amount],
        supplied_amounts: &[Amount],
    ) -> Result<Amount, PoolMathError> {
        Self::check_lengths(pool_amounts, supplied_amounts.len())?;
        if total_shares.is_zero() || pool_amounts.iter().any(Amount::is_zero) {
            return Err(PoolMathError::EmptyPool);
        }

        let mut min_candidate: Option<Amount> = None;
        for (reserve, supplied) in pool_amounts.iter().zip(supplied_amounts) {
            let candidate = total_shares.mul_div_floor(*supplied, *reserve)?;
            min_candidate = Some(match min_candidate {
                Some(current) => current.min(candidate),
                None => candidate,
            });
        }

        let min_candidate = min_candidate.ok_or(PoolMathError::EmptyPool)?;
        let shares = Haircut::LP_SHARES.apply(min_candidate)?;
        debug!(%min_candidate, %shares, "estimated lp shares");
        Ok(shares)
    }

    /// Minimum tokens a withdrawal of `user_shares` must return
    ///
    /// Per token: `floor(pool_amounts_i * user_shares / total_shares)`, then
    /// [`Haircut::SLIPPAGE`] (99.9%).
    pub fn min_lp_amounts_out(
        user_shares: Amount,
        total_shares: Amount,
        pool_amounts: &[Amount],
    ) -> Result<Vec<Amount>, PoolMathError> {
        if total_shares.is_zero() {
            return Err(PoolMathError::EmptyPool);
        }
        if user_shares > total_shares {
            return Err(PoolMathError::SharesExceedSupply {
                requested: user_shares.to_string(),
                total: total_shares.to_string(),
            });
        }

        pool_amounts
            .iter()
            .map(|reserve| {
                let exact = reserve.mul_div_floor(user_shares, total_shares)?;
                Ok(Haircut::SLIPPAGE.apply(exact)?)
            })
            .collect()
    }

    fn check_lengths(pool_amounts: &[Amount], actual: usize) -> Result<(), PoolMathError> {
        if pool_amounts.len() != actual || actual == 0 {
            return Err(PoolMathError::LengthMismatch {
                expected: pool_amounts.len(),
                actual,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn amounts(values: &[u64]) -> Vec<Amount> {
        values.iter().map(|v| Amount::from(*v)).collect()
    }

    #[test]
    fn test_balanced_deposit_shares() {
        // Candidates 100_000 and 100_000, haircut to 99_700
        let shares = PoolMath::lp_shares_from_amounts(
            Amount::from(1_000_000u64),
            &amounts(&[100, 200]),
            &amounts(&[10, 20]),
        )
        .unwrap();
        assert_eq!(shares, Amount::from(99_700u64));
    }

    #[test]
    fn test_unbalanced_deposit_takes_minimum_candidate() {
        // Token 0 alone would earn 500_000, token 1 only 100_000
        let shares = PoolMath::lp_shares_from_amounts(
            Amount::from(1_000_000u64),
            &amounts(&[100, 200]),
            &amounts(&[50, 20]),
        )
        .unwrap();
        assert_eq!(shares, Amount::from(99_700u64));
    }

    #[test]
    fn test_shares_floor_each_step() {
        // candidate = floor(1000 * 1 / 3) = 333, floor(333 * 0.997) = 332
        let shares = PoolMath::lp_shares_from_amounts(
            Amount::from(1000u64),
            &amounts(&[3, 3]),
            &amounts(&[1, 1]),
        )
        .unwrap();
        assert_eq!(shares, Amount::from(332u64));
    }

    #[test]
    fn test_shares_reject_mismatched_lengths() {
        let err = PoolMath::lp_shares_from_amounts(
            Amount::from(1000u64),
            &amounts(&[100, 200]),
            &amounts(&[10]),
        )
        .unwrap_err();
        assert_eq!(err, PoolMathError::LengthMismatch { expected: 2, actual: 1 });
    }

    #[test]
    fn test_shares_reject_empty_pool() {
        assert_eq!(
            PoolMath::lp_shares_from_amounts(Amount::ZERO, &amounts(&[1, 1]), &amounts(&[1, 1])),
            Err(PoolMathError::EmptyPool)
        );
        assert_eq!(
            PoolMath::lp_shares_from_amounts(
                Amount::from(10u64),
                &amounts(&[0, 1]),
                &amounts(&[1, 1])
            ),
            Err(PoolMathError::EmptyPool)
        );
    }

    #[test]
    fn test_min_amounts_out() {
        let out = PoolMath::min_lp_amounts_out(
            Amount::from(100u64),
            Amount::from(1000u64),
            &amounts(&[500, 900]),
        )
        .unwrap();
        assert_eq!(out, amounts(&[49, 89]));
    }

    #[test]
    fn test_min_amounts_out_rejects_excess_shares() {
        assert!(matches!(
            PoolMath::min_lp_amounts_out(
                Amount::from(1001u64),
                Amount::from(1000u64),
                &amounts(&[500, 900])
            ),
            Err(PoolMathError::SharesExceedSupply { .. })
        ));
    }

    #[test]
    fn test_full_withdrawal_keeps_slippage_margin() {
        let out = PoolMath::min_lp_amounts_out(
            Amount::from(1000u64),
            Amount::from(1000u64),
            &amounts(&[500, 900]),
        )
        .unwrap();
        assert_eq!(out, amounts(&[499, 899]));
    }

    proptest! {
        #[test]
        fn prop_shares_never_exceed_proportional_credit(
            total in 1u64..u64::MAX,
            r0 in 1u64..u64::MAX,
            r1 in 1u64..u64::MAX,
            s0 in any::<u64>(),
            s1 in any::<u64>(),
        ) {
            let shares = PoolMath::lp_shares_from_amounts(
                Amount::from(total),
                &amounts(&[r0, r1]),
                &amounts(&[s0, s1]),
            ).unwrap();
            let c0 = Amount::from(total).mul_div_floor(Amount::from(s0), Amount::from(r0)).unwrap();
            let c1 = Amount::from(total).mul_div_floor(Amount::from(s1), Amount::from(r1)).unwrap();
            prop_assert!(shares <= c0.min(c1));
        }
    }
}
