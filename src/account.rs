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

//! Money accounts.
//!
//! A [`MoneyAccount`] holds an exact-decimal balance that never drops below
//! zero. Every mutation validates first and mutates second, so a rejected
//! operation leaves the balance exactly as it was.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use ledger_slots::MoneyAccount;
//!
//! let alice = MoneyAccount::new("Alice", 1000).unwrap();
//! let bob = MoneyAccount::new("Bob", 500).unwrap();
//!
//! assert_eq!(alice.deposit(250), Ok(dec!(1250)));
//! assert_eq!(alice.withdraw("150"), Ok(dec!(1100)));
//! assert_eq!(alice.transfer_to(&bob, 300), Ok((dec!(800), dec!(800))));
//! ```

use crate::amount::{IntoAmount, positive_amount};
use crate::base::{AccountId, mint_account_id};
use crate::AccountError;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Debug)]
struct AccountData {
    balance: Decimal,
}

impl AccountData {
    fn new(balance: Decimal) -> Self {
        let data = Self { balance };
        data.assert_invariants();
        data
    }

    fn assert_invariants(&self) {
        debug_assert!(
            self.balance >= Decimal::ZERO,
            "Invariant violated: balance went negative: {}",
            self.balance
        );
    }

    /// Increases the balance.
    fn deposit(&mut self, amount: Decimal) -> Result<Decimal, AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount);
        }
        self.balance = self.credited(amount)?;
        self.assert_invariants();
        Ok(self.balance)
    }

    /// Balance after crediting `amount`, without applying it.
    fn credited(&self, amount: Decimal) -> Result<Decimal, AccountError> {
        self.balance
            .checked_add(amount)
            .ok_or(AccountError::BalanceOverflow)
    }

    /// Decreases the balance.
    fn withdraw(&mut self, amount: Decimal) -> Result<Decimal, AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount);
        }
        if amount > self.balance {
            return Err(AccountError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        self.assert_invariants();
        Ok(self.balance)
    }
}

/// Point-in-time view of an account, suitable for reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountInfo {
    pub account_number: AccountId,
    pub name: String,
    pub balance: Decimal,
}

/// Bank account with an exact-decimal, never-negative balance.
///
/// Two accounts are equal when their ids match; holder name and balance
/// take no part in equality.
#[derive(Debug)]
pub struct MoneyAccount {
    id: AccountId,
    holder_name: String,
    inner: Mutex<AccountData>,
}

impl MoneyAccount {
    /// Opens an account for `holder_name` with `initial_balance`.
    ///
    /// The name is trimmed. The next account id is only consumed once both
    /// arguments are valid.
    ///
    /// # Errors
    ///
    /// - [`AccountError::InvalidHolderName`] - Name is empty after trimming.
    /// - [`AccountError::InvalidAmount`] - Balance is not a decimal number.
    /// - [`AccountError::NegativeInitialBalance`] - Balance is below zero.
    pub fn new(holder_name: &str, initial_balance: impl IntoAmount) -> Result<Self, AccountError> {
        let holder_name = holder_name.trim();
        if holder_name.is_empty() {
            return Err(AccountError::InvalidHolderName);
        }
        let balance = initial_balance.into_amount()?;
        if balance < Decimal::ZERO {
            return Err(AccountError::NegativeInitialBalance);
        }

        let id = mint_account_id();
        tracing::debug!(account = %id, holder = holder_name, %balance, "account opened");
        Ok(Self {
            id,
            holder_name: holder_name.to_owned(),
            inner: Mutex::new(AccountData::new(balance)),
        })
    }

    /// Opens an account with a zero balance.
    pub fn open(holder_name: &str) -> Result<Self, AccountError> {
        Self::new(holder_name, Decimal::ZERO)
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    pub fn balance(&self) -> Decimal {
        self.inner.lock().balance
    }

    pub fn info(&self) -> AccountInfo {
        AccountInfo {
            account_number: self.id,
            name: self.holder_name.clone(),
            balance: self.balance(),
        }
    }

    /// Adds a strictly positive `amount` and returns the new balance.
    ///
    /// # Errors
    ///
    /// - [`AccountError::InvalidAmount`] - Amount does not parse or is not positive.
    /// - [`AccountError::BalanceOverflow`] - New balance would not fit a `Decimal`.
    pub fn deposit(&self, amount: impl IntoAmount) -> Result<Decimal, AccountError> {
        let amount = positive_amount(amount).inspect_err(|e| self.rejected("deposit", e))?;
        self.inner
            .lock()
            .deposit(amount)
            .inspect_err(|e| self.rejected("deposit", e))
    }

    /// Removes a strictly positive `amount` and returns the new balance.
    ///
    /// # Errors
    ///
    /// - [`AccountError::InvalidAmount`] - Amount does not parse or is not positive.
    /// - [`AccountError::InsufficientFunds`] - Amount exceeds the balance.
    pub fn withdraw(&self, amount: impl IntoAmount) -> Result<Decimal, AccountError> {
        let amount = positive_amount(amount).inspect_err(|e| self.rejected("withdraw", e))?;
        self.inner
            .lock()
            .withdraw(amount)
            .inspect_err(|e| self.rejected("withdraw", e))
    }

    /// Moves `amount` from this account into `other`.
    ///
    /// Returns `(sender_balance, receiver_balance)`. Either both balances
    /// change or neither does. The two balances are locked in ascending id
    /// order, and a transfer to the same account only validates the amount
    /// and the funds without changing the balance.
    ///
    /// # Errors
    ///
    /// - [`AccountError::InvalidAmount`] - Amount does not parse or is not positive.
    /// - [`AccountError::InsufficientFunds`] - Amount exceeds the sender's balance.
    /// - [`AccountError::BalanceOverflow`] - Receiver's balance would not fit a `Decimal`.
    pub fn transfer_to(
        &self,
        other: &MoneyAccount,
        amount: impl IntoAmount,
    ) -> Result<(Decimal, Decimal), AccountError> {
        let amount = positive_amount(amount).inspect_err(|e| self.rejected("transfer", e))?;

        if self.id == other.id {
            let data = self.inner.lock();
            if amount > data.balance {
                let error = AccountError::InsufficientFunds {
                    requested: amount,
                    available: data.balance,
                };
                self.rejected("transfer", &error);
                return Err(error);
            }
            return Ok((data.balance, data.balance));
        }

        let (mut sender, mut receiver) = if self.id < other.id {
            let sender = self.inner.lock();
            (sender, other.inner.lock())
        } else {
            let receiver = other.inner.lock();
            (self.inner.lock(), receiver)
        };

        // Both sides are checked before either balance moves.
        receiver
            .credited(amount)
            .inspect_err(|e| self.rejected("transfer", e))?;
        let sender_balance = sender
            .withdraw(amount)
            .inspect_err(|e| self.rejected("transfer", e))?;
        let receiver_balance = receiver.deposit(amount)?;
        tracing::debug!(from = %self.id, to = %other.id, %amount, "transfer applied");
        Ok((sender_balance, receiver_balance))
    }

    fn rejected(&self, operation: &str, error: &AccountError) {
        tracing::debug!(account = %self.id, operation, %error, "operation rejected");
    }
}

impl PartialEq for MoneyAccount {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MoneyAccount {}

impl Hash for MoneyAccount {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for MoneyAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MoneyAccount(#{}, {}, Balance: ${})",
            self.id,
            self.holder_name,
            self.balance()
        )
    }
}

impl Serialize for MoneyAccount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.info().serialize(serializer)
    }
}
