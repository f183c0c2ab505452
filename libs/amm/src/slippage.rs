//! Fixed-ratio haircuts for slippage protection

use lagoon_types::{Amount, AmountError};

/// Keep `numerator / denominator` of an amount, rounding down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Haircut {
    pub numerator: u64,
    pub denominator: u64,
}

impl Haircut {
    /// 0.1% tolerance on swap outputs and withdrawal minimums
    pub const SLIPPAGE: Self = Self::new(999, 1000);

    /// 0.3% margin on estimated LP shares, absorbs ratio drift before submit
    pub const LP_SHARES: Self = Self::new(997, 1000);

    pub const fn new(numerator: u64, denominator: u64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// `floor(amount * numerator / denominator)`
    pub fn apply(&self, amount: Amount) -> Result<Amount, AmountError> {
        amount.mul_div_floor(Amount::from(self.numerator), Amount::from(self.denominator))
    }
}

/// Minimum acceptable output for each exact amount, at 0.1% slippage
///
/// Each token is cut independently: `floor(x * 999 / 1000)`.
pub fn minimum_output(exact_amounts: &[Amount]) -> Result<Vec<Amount>, AmountError> {
    exact_amounts
        .iter()
        .map(|amount| Haircut::SLIPPAGE.apply(*amount))
        .collect()
}
