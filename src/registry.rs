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

//! Accounts addressed by id.
//!
//! The [`Registry`] owns every account it opens and resolves
//! [`AccountId`]s for deposits, withdrawals and transfers. Each call is a
//! single account operation or a single two-account transfer; there is no
//! multi-step transaction or rollback.
//!
//! # Thread Safety
//!
//! Accounts live in a [`DashMap`] behind [`Arc`]s. Lookups clone the `Arc`
//! and release the map guard before any balance lock is taken, so a
//! transfer never holds two map guards at once.

use crate::account::{AccountInfo, MoneyAccount};
use crate::amount::IntoAmount;
use crate::base::AccountId;
use crate::AccountError;
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Collection of accounts indexed by id.
#[derive(Debug, Default)]
pub struct Registry {
    accounts: DashMap<AccountId, Arc<MoneyAccount>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Registry {
            accounts: DashMap::new(),
        }
    }

    /// Opens an account and returns its id.
    ///
    /// # Errors
    ///
    /// Whatever [`MoneyAccount::new`] rejects.
    pub fn open(
        &self,
        holder_name: &str,
        initial_balance: impl IntoAmount,
    ) -> Result<AccountId, AccountError> {
        let account = MoneyAccount::new(holder_name, initial_balance)?;
        let id = account.id();
        self.accounts.insert(id, Arc::new(account));
        Ok(id)
    }

    /// Deposits into account `id` and returns its new balance.
    ///
    /// # Errors
    ///
    /// - [`AccountError::AccountNotFound`] - No account with this id.
    /// - [`AccountError::InvalidAmount`] - Amount does not parse or is not positive.
    pub fn deposit(&self, id: AccountId, amount: impl IntoAmount) -> Result<Decimal, AccountError> {
        self.require(id)?.deposit(amount)
    }

    /// Withdraws from account `id` and returns its new balance.
    ///
    /// # Errors
    ///
    /// - [`AccountError::AccountNotFound`] - No account with this id.
    /// - [`AccountError::InvalidAmount`] - Amount does not parse or is not positive.
    /// - [`AccountError::InsufficientFunds`] - Amount exceeds the balance.
    pub fn withdraw(&self, id: AccountId, amount: impl IntoAmount) -> Result<Decimal, AccountError> {
        self.require(id)?.withdraw(amount)
    }

    /// Transfers between two accounts of this registry.
    ///
    /// Returns `(sender_balance, receiver_balance)`.
    ///
    /// # Errors
    ///
    /// - [`AccountError::AccountNotFound`] - `from` is unknown.
    /// - [`AccountError::InvalidDestination`] - `to` is unknown.
    /// - Anything [`MoneyAccount::transfer_to`] rejects.
    pub fn transfer(
        &self,
        from: AccountId,
        to: AccountId,
        amount: impl IntoAmount,
    ) -> Result<(Decimal, Decimal), AccountError> {
        let sender = self.require(from)?;
        let receiver = self
            .get_account(&to)
            .ok_or(AccountError::InvalidDestination)?;
        sender.transfer_to(&receiver, amount)
    }

    /// Retrieves an account by id.
    pub fn get_account(&self, id: &AccountId) -> Option<Arc<MoneyAccount>> {
        self.accounts.get(id).map(|entry| Arc::clone(entry.value()))
    }

    /// Returns an iterator over all accounts, in no particular order.
    pub fn accounts(&self) -> impl Iterator<Item = Arc<MoneyAccount>> + '_ {
        self.accounts.iter().map(|entry| Arc::clone(entry.value()))
    }

    /// Snapshots of every account, ordered by account number.
    pub fn report(&self) -> Vec<AccountInfo> {
        let mut report: Vec<AccountInfo> = self.accounts().map(|account| account.info()).collect();
        report.sort_by_key(|info| info.account_number);
        report
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn require(&self, id: AccountId) -> Result<Arc<MoneyAccount>, AccountError> {
        self.get_account(&id).ok_or(AccountError::AccountNotFound(id))
    }
}
