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

//! Error types for account and array operations.

use crate::base::AccountId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Account operation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// Holder name is empty or only whitespace
    #[error("holder name must be a non-empty string")]
    InvalidHolderName,

    /// Amount is not a decimal number, or is zero or negative
    #[error("invalid amount (must be a positive decimal number)")]
    InvalidAmount,

    /// Opening balance below zero
    #[error("initial balance cannot be negative")]
    NegativeInitialBalance,

    /// Withdrawal would exceed the balance
    #[error("insufficient funds: attempted to withdraw {requested}, but balance is only {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },

    /// Credit would push the balance past the largest representable amount
    #[error("balance overflow: amount cannot be credited")]
    BalanceOverflow,

    /// Transfer target does not resolve to an account
    #[error("transfer destination must be an account")]
    InvalidDestination,

    /// Referenced account does not exist
    #[error("account {0} not found")]
    AccountNotFound(AccountId),
}

/// Bounded array errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArrayError {
    /// Capacity is zero
    #[error("capacity must be positive")]
    InvalidCapacity,

    /// Initial values do not fit
    #[error("initial values list length ({len}) exceeds array capacity ({capacity})")]
    ListTooLarge { len: usize, capacity: usize },

    /// Every slot is occupied
    #[error("cannot insert: array is full (capacity {capacity})")]
    Full { capacity: usize },

    /// Index outside the range accepted by the insert operation
    #[error("index {index} out of bounds for array length {length}")]
    IndexOutOfRange { index: usize, length: usize },
}
