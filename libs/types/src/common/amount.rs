//! Exact unsigned token amounts
//!
//! An [`Amount`] is a token quantity in its smallest indivisible unit
//! (yoctoNEAR for NEAR, `10^-decimals` for fungible tokens). It is stored as a
//! 256-bit unsigned integer and travels as a decimal string, the same way the
//! contracts encode `U128` values, so no value is ever routed through `f64`.
//!
//! Division truncates toward zero. Every slippage and share computation in
//! the workspace relies on that, so [`Amount::mul_div_floor`] computes the
//! intermediate product in 512 bits and floors exactly once at the end.

use crate::common::errors::AmountError;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

mod wide {
    #![allow(clippy::all, dead_code)]

    uint::construct_uint! {
        pub struct U256(4);
    }

    uint::construct_uint! {
        pub struct U512(8);
    }
}

use wide::{U256, U512};

fn widen(value: U256) -> U512 {
    let [a, b, c, d] = value.0;
    U512([a, b, c, d, 0, 0, 0, 0])
}

fn narrow(value: U512) -> Option<U256> {
    let words = value.0;
    if words[4..].iter().any(|w| *w != 0) {
        return None;
    }
    Some(U256([words[0], words[1], words[2], words[3]]))
}

/// Non-negative token quantity with exact integer arithmetic
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(U256);

impl Amount {
    /// Zero in any unit
    pub const ZERO: Self = Self(U256([0; 4]));

    /// Largest representable amount (2^256 - 1)
    pub const MAX: Self = Self(U256([u64::MAX; 4]));

    /// Const constructor, used for compile-time constants such as one yocto
    pub const fn from_u128(value: u128) -> Self {
        Self(U256([value as u64, (value >> 64) as u64, 0, 0]))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Value as `u128` when it fits (every NEP-141 balance does)
    pub fn as_u128(&self) -> Option<u128> {
        let [lo, hi, a, b] = self.0 .0;
        if a != 0 || b != 0 {
            return None;
        }
        Some(lo as u128 | ((hi as u128) << 64))
    }

    pub fn checked_add(self, rhs: Self) -> Result<Self, AmountError> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or(AmountError::Overflow)
    }

    pub fn checked_sub(self, rhs: Self) -> Result<Self, AmountError> {
        self.0
            .checked_sub(rhs.0)
            .map(Self)
            .ok_or_else(|| AmountError::Underflow {
                lhs: self.to_string(),
                rhs: rhs.to_string(),
            })
    }

    /// `self - rhs`, clamped at zero
    pub fn saturating_sub(self, rhs: Self) -> Self {
        self.0.checked_sub(rhs.0).map(Self).unwrap_or(Self::ZERO)
    }

    pub fn checked_mul(self, rhs: Self) -> Result<Self, AmountError> {
        self.0
            .checked_mul(rhs.0)
            .map(Self)
            .ok_or(AmountError::Overflow)
    }

    /// Truncating division
    pub fn checked_div(self, rhs: Self) -> Result<Self, AmountError> {
        if rhs.is_zero() {
            return Err(AmountError::DivisionByZero);
        }
        Ok(Self(self.0 / rhs.0))
    }

    /// `floor(self * numerator / denominator)` with a 512-bit intermediate
    ///
    /// The product of two 256-bit values always fits in 512 bits, so the only
    /// failure modes are a zero denominator and a quotient wider than 256 bits.
    pub fn mul_div_floor(self, numerator: Self, denominator: Self) -> Result<Self, AmountError> {
        if denominator.is_zero() {
            return Err(AmountError::DivisionByZero);
        }
        let product = widen(self.0) * widen(numerator.0);
        narrow(product / widen(denominator.0))
            .map(Self)
            .ok_or(AmountError::Overflow)
    }

    /// Smallest multiple of `step` that is greater than or equal to `self`
    ///
    /// Equivalent to `x + ((m - x mod m) mod m)`; a value that is already a
    /// multiple of `step` is returned unchanged.
    pub fn round_up_to_nearest(self, step: Self) -> Result<Self, AmountError> {
        if step.is_zero() {
            return Err(AmountError::DivisionByZero);
        }
        let remainder = self.0 % step.0;
        if remainder.is_zero() {
            return Ok(self);
        }
        self.checked_add(Self(step.0 - remainder))
    }

    /// Parse a human decimal ("1.25") into the smallest unit of a token with
    /// `decimals` fractional digits
    pub fn parse_units(input: &str, decimals: u32) -> Result<Self, AmountError> {
        let invalid = || AmountError::InvalidDigits {
            input: input.to_string(),
        };

        let (whole, fraction) = match input.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (input, ""),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let fraction = fraction.trim_end_matches('0');
        if fraction.len() > decimals as usize {
            return Err(AmountError::TooManyDecimals {
                input: input.to_string(),
                decimals,
            });
        }

        let mut digits = String::with_capacity(whole.len() + decimals as usize);
        digits.push_str(whole);
        digits.push_str(fraction);
        digits.extend(std::iter::repeat('0').take(decimals as usize - fraction.len()));
        if digits.is_empty() {
            return Ok(Self::ZERO);
        }
        digits.parse()
    }

    /// Render in human units with `decimals` fractional digits, trailing
    /// zeros dropped ("1.25", "0.005", "3")
    pub fn format_units(&self, decimals: u32) -> String {
        let raw = self.to_string();
        let decimals = decimals as usize;
        if decimals == 0 {
            return raw;
        }

        let padded = if raw.len() <= decimals {
            format!("{}{}", "0".repeat(decimals + 1 - raw.len()), raw)
        } else {
            raw
        };
        let (whole, fraction) = padded.split_at(padded.len() - decimals);
        let fraction = fraction.trim_end_matches('0');
        if fraction.is_empty() {
            whole.to_string()
        } else {
            format!("{whole}.{fraction}")
        }
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AmountError::InvalidDigits {
                input: s.to_string(),
            });
        }
        // Only digits remain, so the one possible failure is width
        U256::from_dec_str(s)
            .map(Self)
            .map_err(|_| AmountError::Overflow)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amount({})", self.0)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self::from_u128(value)
    }
}

impl From<near_sdk::json_types::U128> for Amount {
    fn from(value: near_sdk::json_types::U128) -> Self {
        Self::from_u128(value.0)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AmountVisitor;

        impl<'de> Visitor<'de> for AmountVisitor {
            type Value = Amount;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a decimal string or unsigned integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
                Ok(Amount::from(v))
            }

            fn visit_u128<E: de::Error>(self, v: u128) -> Result<Amount, E> {
                Ok(Amount::from(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
                u64::try_from(v)
                    .map(Amount::from)
                    .map_err(|_| E::custom(format!("negative amount: {v}")))
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}
