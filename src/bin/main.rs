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

use clap::{Parser, Subcommand};
use csv::{ReaderBuilder, Trim, Writer};
use ledger_slots::{AccountError, AccountId, BoundedArray, Registry};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

/// Ledger Slots - replay account and array scripts
///
/// Reads a CSV script of operations, applies every valid row and writes the
/// resulting state to stdout. Rejected rows are reported on stderr.
#[derive(Parser, Debug)]
#[command(name = "ledger-slots")]
#[command(about = "Replays money account and bounded array scripts", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay an account script and print every account as CSV
    ///
    /// Expected format: op,holder,account,target,amount
    /// Example: ledger-slots accounts accounts.csv > balances.csv
    Accounts {
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
    /// Replay an array script against an array of the given capacity
    ///
    /// Expected format: op,index,value
    Array {
        /// Number of slots in the array
        #[arg(short, long)]
        capacity: usize,
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() {
    init_tracing();
    let args = Args::parse();

    let result = match args.command {
        Command::Accounts { input } => open(&input)
            .and_then(|file| process_accounts(BufReader::new(file)).map_err(|e| e.to_string()))
            .and_then(|registry| {
                write_accounts(&registry, std::io::stdout()).map_err(|e| e.to_string())
            }),
        Command::Array { capacity, input } => open(&input).and_then(|file| {
            let array = BoundedArray::new(capacity).map_err(|e| e.to_string())?;
            process_array(array, BufReader::new(file), std::io::stdout())
                .map(|_| ())
                .map_err(|e| e.to_string())
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Logs go to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open(path: &Path) -> Result<File, String> {
    File::open(path).map_err(|e| format!("opening file '{}': {}", path.display(), e))
}

fn script_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .has_headers(true)
        .from_reader(reader)
}

// === Account scripts ===

/// Raw CSV record of an account script.
///
/// Fields: `op, holder, account, target, amount`
#[derive(Debug, Deserialize)]
struct AccountRecord {
    op: String,
    #[serde(default)]
    holder: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    account: Option<u64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    target: Option<u64>,
    #[serde(default)]
    amount: Option<String>,
}

#[derive(Debug)]
enum AccountCommand {
    Open { holder: String, amount: Option<String> },
    Deposit { account: AccountId, amount: String },
    Withdraw { account: AccountId, amount: String },
    Transfer { from: AccountId, to: AccountId, amount: String },
}

impl AccountRecord {
    /// Returns `None` for unknown operations or missing required fields.
    fn into_command(self) -> Option<AccountCommand> {
        let account = self.account.map(AccountId);

        match self.op.to_lowercase().as_str() {
            "open" => Some(AccountCommand::Open {
                holder: self.holder.unwrap_or_default(),
                amount: self.amount,
            }),
            "deposit" => Some(AccountCommand::Deposit {
                account: account?,
                amount: self.amount?,
            }),
            "withdraw" | "withdrawal" => Some(AccountCommand::Withdraw {
                account: account?,
                amount: self.amount?,
            }),
            "transfer" => Some(AccountCommand::Transfer {
                from: account?,
                to: AccountId(self.target?),
                amount: self.amount?,
            }),
            _ => None,
        }
    }
}

/// Replays an account script into a fresh [`Registry`].
///
/// # CSV Format
///
/// ```csv
/// op,holder,account,target,amount
/// open,Alice,,,1000
/// open,Bob,,,500
/// deposit,,1000,,250
/// transfer,,1000,1001,300
/// ```
///
/// Amounts are kept as text and parsed exactly by the account. Invalid rows
/// and rejected operations are logged and skipped.
///
/// # Errors
///
/// Returns a CSV error only if the reader itself fails.
pub fn process_accounts<R: Read>(reader: R) -> Result<Registry, csv::Error> {
    let registry = Registry::new();

    for (row, result) in script_reader(reader).deserialize::<AccountRecord>().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(row, error = %e, "skipping malformed row");
                continue;
            }
        };
        let Some(command) = record.into_command() else {
            tracing::warn!(row, "skipping invalid account record");
            continue;
        };

        let outcome = apply_account_command(&registry, row, &command);
        if let Err(e) = outcome {
            tracing::warn!(row, ?command, error = %e, "skipping rejected operation");
        }
    }

    Ok(registry)
}

/// Applies one account command to `registry`, logging what it changed.
fn apply_account_command(
    registry: &Registry,
    row: usize,
    command: &AccountCommand,
) -> Result<(), AccountError> {
    match command {
        AccountCommand::Open { holder, amount } => registry
            .open(holder, amount.as_deref().unwrap_or("0"))
            .map(|id| tracing::info!(row, account = %id, "opened")),
        AccountCommand::Deposit { account, amount } => registry
            .deposit(*account, amount.as_str())
            .map(|balance| tracing::info!(row, %account, %balance, "deposited")),
        AccountCommand::Withdraw { account, amount } => registry
            .withdraw(*account, amount.as_str())
            .map(|balance| tracing::info!(row, %account, %balance, "withdrew")),
        AccountCommand::Transfer { from, to, amount } => registry
            .transfer(*from, *to, amount.as_str())
            .map(|(sent, received)| {
                tracing::info!(row, %from, %to, %sent, %received, "transferred")
            }),
    }
}

/// Writes every account as CSV, ordered by account number.
///
/// Columns: `account_number, name, balance`
pub fn write_accounts<W: Write>(registry: &Registry, writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);
    for info in registry.report() {
        wtr.serialize(&info)?;
    }
    wtr.flush()?;
    Ok(())
}

// === Array scripts ===

/// Raw CSV record of an array script.
///
/// Fields: `op, index, value`
#[derive(Debug, Deserialize)]
struct ArrayRecord {
    op: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    index: Option<usize>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    value: Option<i64>,
}

/// Replays an array script against `array`, printing search results as
/// they happen and the final state last.
///
/// # CSV Format
///
/// ```csv
/// op,index,value
/// insert_first,,3
/// insert_after,1,4
/// delete,,4
/// search,,3
/// ```
pub fn process_array<R: Read, W: Write>(
    mut array: BoundedArray<i64>,
    reader: R,
    mut out: W,
) -> Result<BoundedArray<i64>, Box<dyn std::error::Error>> {
    for (row, result) in script_reader(reader).deserialize::<ArrayRecord>().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(row, error = %e, "skipping malformed row");
                continue;
            }
        };
        let (Some(value), index) = (record.value, record.index) else {
            tracing::warn!(row, "skipping array record without a value");
            continue;
        };

        let outcome = match (record.op.to_lowercase().as_str(), index) {
            ("insert_first", _) => array.insert_first(value),
            ("insert_at", Some(index)) => array.insert_at_index(index, value),
            ("insert_after", Some(index)) => array.insert_after_index(index, value),
            ("insert_before", Some(index)) => array.insert_before_index(index, value),
            ("delete", _) => {
                let found = array.delete(&value);
                writeln!(out, "delete({value}) -> {found}")?;
                Ok(())
            }
            ("search", _) => {
                match array.search(&value) {
                    Some(position) => writeln!(out, "search({value}) -> {position}")?,
                    None => writeln!(out, "search({value}) -> not found")?,
                }
                Ok(())
            }
            ("insert_at" | "insert_after" | "insert_before", None) => {
                tracing::warn!(row, op = record.op.as_str(), "skipping array record: missing index");
                continue;
            }
            (op, _) => {
                tracing::warn!(row, op, "skipping invalid array record");
                continue;
            }
        };
        if let Err(e) = outcome {
            tracing::warn!(row, op = record.op.as_str(), error = %e, "skipping rejected operation");
        }
    }

    writeln!(out, "{array:#}")?;
    Ok(array)
}
