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

//! Account identifiers and the process-wide counter that mints them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a money account.
///
/// Minted once per successfully constructed account. Ids start at
/// [`AccountId::FIRST`] and only ever grow, so an account created later
/// always carries a strictly larger id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct AccountId(pub u64);

impl AccountId {
    /// Id handed to the first account of the process.
    pub const FIRST: AccountId = AccountId(1000);
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

static NEXT_ACCOUNT_ID: AtomicU64 = AtomicU64::new(AccountId::FIRST.0);

/// Takes the next id from the global counter.
///
/// Only account construction calls this, after all validation passed, so a
/// rejected construction never consumes an id.
pub(crate) fn mint_account_id() -> AccountId {
    AccountId(NEXT_ACCOUNT_ID.fetch_add(1, Ordering::Relaxed))
}
