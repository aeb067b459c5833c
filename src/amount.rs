// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Exact conversion of caller input into money amounts.
//!
//! Every balance computation runs on [`Decimal`]. Inputs are converted
//! without passing through a binary float: strings are parsed as decimal
//! literals, integers convert losslessly, and floats go through their
//! shortest round-trip rendering so `0.1_f64` becomes exactly `0.1`.
//!
//! # Example
//!
//! ```
//! use ledger_slots::IntoAmount;
//! use rust_decimal_macros::dec;
//!
//! assert_eq!("123.45".into_amount(), Ok(dec!(123.45)));
//! assert_eq!(250_u32.into_amount(), Ok(dec!(250)));
//! assert_eq!(0.1_f64.into_amount(), Ok(dec!(0.1)));
//! ```

use crate::AccountError;
use rust_decimal::Decimal;

/// Conversion into an exact decimal amount.
///
/// Fails with [`AccountError::InvalidAmount`] when the input is not a
/// representable decimal number. Sign checks are left to the operation
/// consuming the amount.
pub trait IntoAmount {
    fn into_amount(self) -> Result<Decimal, AccountError>;
}

impl IntoAmount for Decimal {
    fn into_amount(self) -> Result<Decimal, AccountError> {
        Ok(self)
    }
}

impl IntoAmount for &Decimal {
    fn into_amount(self) -> Result<Decimal, AccountError> {
        Ok(*self)
    }
}

impl IntoAmount for &str {
    fn into_amount(self) -> Result<Decimal, AccountError> {
        parse_decimal(self)
    }
}

impl IntoAmount for String {
    fn into_amount(self) -> Result<Decimal, AccountError> {
        parse_decimal(&self)
    }
}

impl IntoAmount for &String {
    fn into_amount(self) -> Result<Decimal, AccountError> {
        parse_decimal(self)
    }
}

macro_rules! impl_into_amount_for_int {
    ($($int:ty),*) => {
        $(
            impl IntoAmount for $int {
                fn into_amount(self) -> Result<Decimal, AccountError> {
                    Ok(Decimal::from(self))
                }
            }
        )*
    };
}

impl_into_amount_for_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl IntoAmount for f64 {
    fn into_amount(self) -> Result<Decimal, AccountError> {
        if !self.is_finite() {
            return Err(AccountError::InvalidAmount);
        }
        parse_decimal(&self.to_string())
    }
}

impl IntoAmount for f32 {
    fn into_amount(self) -> Result<Decimal, AccountError> {
        if !self.is_finite() {
            return Err(AccountError::InvalidAmount);
        }
        parse_decimal(&self.to_string())
    }
}

/// Parses a decimal literal exactly.
///
/// Surrounding whitespace is ignored and scientific notation (`"1e3"`) is
/// accepted. Literals that would need rounding to fit are rejected rather
/// than silently rounded.
pub fn parse_decimal(input: &str) -> Result<Decimal, AccountError> {
    let literal = input.trim();
    let parsed = match literal.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => parse_scientific(mantissa, exponent),
        None => Decimal::from_str_exact(literal).ok(),
    };
    parsed.ok_or(AccountError::InvalidAmount)
}

/// Applies the exponent to the mantissa's integer digits and scale, so the
/// result is either exact or `None`.
fn parse_scientific(mantissa: &str, exponent: &str) -> Option<Decimal> {
    let mantissa = Decimal::from_str_exact(mantissa).ok()?;
    let exponent: i64 = exponent.parse().ok()?;
    if mantissa.is_zero() {
        return Some(Decimal::ZERO);
    }

    let mut digits = mantissa.mantissa();
    let mut scale = i64::from(mantissa.scale()).checked_sub(exponent)?;
    while scale < 0 {
        digits = digits.checked_mul(10)?;
        scale += 1;
    }
    while scale > MAX_SCALE && digits % 10 == 0 {
        digits /= 10;
        scale -= 1;
    }
    if scale > MAX_SCALE {
        return None;
    }
    Decimal::try_from_i128_with_scale(digits, u32::try_from(scale).ok()?).ok()
}

const MAX_SCALE: i64 = 28;

/// Converts `amount` and requires it to be strictly positive.
pub(crate) fn positive_amount(amount: impl IntoAmount) -> Result<Decimal, AccountError> {
    let amount = amount.into_amount()?;
    if amount <= Decimal::ZERO {
        return Err(AccountError::InvalidAmount);
    }
    Ok(amount)
}
