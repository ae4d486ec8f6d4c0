use std::path::Path;

use tokio::fs::{self, File};
use tokio::io::BufWriter;
use tracing::debug;

use super::dump::{DumpPaths, DumpSummary};
use super::error::IoError;
use super::parse::{account_line, favorite_line, payment_line};
use crate::engine::WalletService;
use crate::storage::{AccountStore, RecordStore, Snapshot};

/// Write the ledger into `dir` as three `.dump` files
///
/// Empty collections produce no file, so an existing dump for them is left
/// untouched.
pub async fn export_dir(
    service: &WalletService,
    dir: impl AsRef<Path>,
) -> Result<DumpSummary, IoError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).await?;
    let paths = DumpPaths::new(dir);
    let mut summary = DumpSummary::default();

    let accounts = service.account_store();
    if !AccountStore::is_empty(accounts) {
        let writer = BufWriter::new(File::create(&paths.accounts).await?);
        summary.accounts = accounts.write_snapshot(writer, account_line).await?;
    }

    let payments = service.payment_store();
    if !RecordStore::is_empty(payments) {
        let writer = BufWriter::new(File::create(&paths.payments).await?);
        summary.payments = payments.write_snapshot(writer, payment_line).await?;
    }

    let favorites = service.favorite_store();
    if !RecordStore::is_empty(favorites) {
        let writer = BufWriter::new(File::create(&paths.favorites).await?);
        summary.favorites = favorites.write_snapshot(writer, favorite_line).await?;
    }

    debug!(
        dir = %dir.display(),
        accounts = summary.accounts,
        payments = summary.payments,
        favorites = summary.favorites,
        "Exported dump"
    );

    Ok(summary)
}
