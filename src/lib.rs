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

//! # Ledger Slots
//!
//! Two independent components:
//!
//! - [`MoneyAccount`]: bank account with an exact-decimal balance that never
//!   goes negative, supporting deposits, withdrawals and transfers.
//! - [`BoundedArray`]: fixed-capacity array of optional slots with
//!   positional inserts, in-place deletion and linear search.
//!
//! [`Registry`] addresses accounts by [`AccountId`] for callers that only
//! hold ids, such as the command-line demo.
//!
//! ## Example
//!
//! ```
//! use ledger_slots::{ArrayError, BoundedArray, MoneyAccount};
//! use rust_decimal_macros::dec;
//!
//! let alice = MoneyAccount::new("Alice", "1000.00").unwrap();
//! assert_eq!(alice.deposit(dec!(0.10)), Ok(dec!(1000.10)));
//!
//! let mut array = BoundedArray::from_values(2, vec![1, 2]).unwrap();
//! assert_eq!(array.insert_first(0), Err(ArrayError::Full { capacity: 2 }));
//! ```
//!
//! ## Thread Safety
//!
//! Operations are specified for a single actor. Account balances sit behind
//! a mutex and account ids come from an atomic counter, so accounts may be
//! shared across threads; [`BoundedArray`] is a plain value mutated through
//! `&mut self`.

pub mod account;
mod amount;
pub mod array;
mod base;
pub mod error;
mod registry;

pub use account::{AccountInfo, MoneyAccount};
pub use amount::{IntoAmount, parse_decimal};
pub use array::{BoundedArray, Fill};
pub use base::AccountId;
pub use error::{AccountError, ArrayError};
pub use registry::Registry;
