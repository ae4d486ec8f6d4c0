//! Single-file account format: `id;phone;balance` records separated by `|`

use std::path::Path;

use csv::{QuoteStyle, ReaderBuilder, Terminator, Trim, WriterBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::IoError;
use crate::domain::{Account, Money, Phone};
use crate::engine::WalletService;

/// One account as stored in the legacy file, fields in file order
#[derive(Debug, Serialize, Deserialize)]
pub struct LegacyAccountRecord {
    pub id: i64,
    pub phone: String,
    pub balance: i64,
}

impl From<&Account> for LegacyAccountRecord {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id(),
            phone: account.phone().to_string(),
            balance: account.balance().minor(),
        }
    }
}

/// Write every account to `path`, returning the record count
pub fn export_accounts_to_file(
    service: &WalletService,
    path: impl AsRef<Path>,
) -> Result<usize, IoError> {
    let path = path.as_ref();
    let mut writer = WriterBuilder::new()
        .delimiter(b';')
        .terminator(Terminator::Any(b'|'))
        .quote_style(QuoteStyle::Never)
        .has_headers(false)
        .from_path(path)?;

    let accounts = service.accounts();
    for account in &accounts {
        writer.serialize(LegacyAccountRecord::from(account))?;
    }
    writer.flush()?;

    debug!(path = %path.display(), accounts = accounts.len(), "Exported accounts");
    Ok(accounts.len())
}

/// Register every phone in `path` and deposit its balance when positive
///
/// Stored ids are ignored; accounts get fresh ids from the service.
pub fn import_accounts_from_file(
    service: &WalletService,
    path: impl AsRef<Path>,
) -> Result<usize, IoError> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .terminator(Terminator::Any(b'|'))
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_path(path)?;

    let mut imported = 0;
    for record in reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }

        let legacy: LegacyAccountRecord = record.deserialize(None)?;
        let account = service.register_account(Phone::new(legacy.phone))?;
        let balance = Money::from_minor(legacy.balance);
        if balance.is_positive() {
            service.deposit(account.id(), balance)?;
        }
        imported += 1;
    }

    debug!(path = %path.display(), accounts = imported, "Imported accounts");
    Ok(imported)
}
