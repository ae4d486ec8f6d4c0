use std::io::ErrorKind;
use std::path::Path;
use std::pin::pin;

use csv_async::AsyncReaderBuilder;
use futures::StreamExt;
use tokio::fs::File;
use tokio_util::compat::TokioAsyncReadCompatExt;
use tracing::{debug, warn};

use super::dump::{DumpPaths, DumpSummary};
use super::error::IoError;
use super::parse::DumpRecord;
use crate::engine::WalletService;

/// Read every non-blank line of a dump file through `parse`
///
/// Returns `None` when the file does not exist. The whole file is parsed
/// before anything is applied, so a malformed line leaves the ledger as it
/// was for that collection.
async fn read_dump<T, P>(path: &Path, parse: P) -> Result<Option<Vec<T>>, IoError>
where
    P: Fn(&DumpRecord<'_>) -> Result<T, IoError>,
{
    let file = match File::open(path).await {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "Dump file missing, skipping");
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };

    let reader = AsyncReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .create_reader(file.compat());
    let mut records = pin!(reader.into_records());

    let mut items = Vec::new();
    while let Some(record) = records.next().await {
        let record = record?;
        let fields = DumpRecord::new(record.iter());
        if fields.is_blank() {
            continue;
        }
        items.push(parse(&fields)?);
    }

    Ok(Some(items))
}

/// Load the three `.dump` files from `dir` into `service`
///
/// Records are upserted by id. Missing files are skipped with a warning.
pub async fn import_dir(
    service: &WalletService,
    dir: impl AsRef<Path>,
) -> Result<DumpSummary, IoError> {
    let dir = dir.as_ref();
    let paths = DumpPaths::new(dir);
    let mut summary = DumpSummary::default();

    if let Some(accounts) = read_dump(&paths.accounts, |record| record.account()).await? {
        summary.accounts = accounts.len();
        for account in accounts {
            service.restore_account(account);
        }
    }

    if let Some(payments) = read_dump(&paths.payments, |record| record.payment()).await? {
        summary.payments = payments.len();
        for payment in payments {
            service.restore_payment(payment);
        }
    }

    if let Some(favorites) = read_dump(&paths.favorites, |record| record.favorite()).await? {
        summary.favorites = favorites.len();
        for favorite in favorites {
            service.restore_favorite(favorite);
        }
    }

    debug!(
        dir = %dir.display(),
        accounts = summary.accounts,
        payments = summary.payments,
        favorites = summary.favorites,
        "Imported dump"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Money, PaymentCategory, PaymentStatus, Phone};
    use crate::io::export_dir;

    fn write(dir: &Path, name: &str, contents: &str) {
        std::fs::write(dir.join(name), contents).unwrap();
    }

    #[tokio::test]
    async fn imports_hand_written_dump() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "accounts.dump", "1;+992000000001;700;\n2;+992000000002;0;\n");
        write(dir.path(), "payments.dump", "p-1;1;300;auto;OK;\n");
        write(dir.path(), "favorites.dump", "f-1;1;car;300;auto\n");

        let service = WalletService::new();
        let summary = import_dir(&service, dir.path()).await.unwrap();

        assert_eq!(
            summary,
            DumpSummary {
                accounts: 2,
                payments: 1,
                favorites: 1
            }
        );
        assert_eq!(
            service.find_account_by_id(1).unwrap().balance(),
            Money::from_minor(700)
        );
        assert_eq!(service.find_payment_by_id("p-1").unwrap().status, PaymentStatus::Ok);
        assert_eq!(service.find_favorite_by_id("f-1").unwrap().name, "car");
    }

    #[tokio::test]
    async fn missing_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "accounts.dump", "5;+7;10;\n");

        let service = WalletService::new();
        let summary = import_dir(&service, dir.path()).await.unwrap();

        assert_eq!(summary.accounts, 1);
        assert_eq!(summary.payments, 0);
        assert_eq!(summary.favorites, 0);
        assert!(service.payments().is_empty());
    }

    #[tokio::test]
    async fn empty_directory_imports_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let service = WalletService::new();

        let summary = import_dir(&service, dir.path()).await.unwrap();
        assert_eq!(summary, DumpSummary::default());
    }

    #[tokio::test]
    async fn import_overwrites_existing_records() {
        let dir = tempfile::tempdir().unwrap();
        let service = WalletService::new();
        let account = service.register_account(Phone::from("+1")).unwrap();
        service.deposit(account.id(), Money::from_minor(50)).unwrap();

        write(
            dir.path(),
            "accounts.dump",
            &format!("{};+1;999;\n", account.id()),
        );
        import_dir(&service, dir.path()).await.unwrap();

        assert_eq!(service.accounts().len(), 1);
        assert_eq!(
            service.find_account_by_id(account.id()).unwrap().balance(),
            Money::from_minor(999)
        );
    }

    #[tokio::test]
    async fn new_accounts_do_not_reuse_imported_ids() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "accounts.dump", "41;+41;0;\n");

        let service = WalletService::new();
        import_dir(&service, dir.path()).await.unwrap();

        let fresh = service.register_account(Phone::from("+42")).unwrap();
        assert_eq!(fresh.id(), 42);
    }

    #[tokio::test]
    async fn malformed_number_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "accounts.dump", "1;+1;lots;\n");

        let service = WalletService::new();
        let err = import_dir(&service, dir.path()).await.unwrap_err();

        assert!(matches!(err, IoError::InvalidNumber { ref field, .. } if field == "balance"));
        assert!(service.accounts().is_empty());
    }

    #[tokio::test]
    async fn unknown_status_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "payments.dump", "p-1;1;300;auto;PENDING;\n");

        let service = WalletService::new();
        let err = import_dir(&service, dir.path()).await.unwrap_err();
        assert!(matches!(err, IoError::InvalidStatus(ref s) if s == "PENDING"));
    }

    #[tokio::test]
    async fn short_line_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "favorites.dump", "f-1;1;car\n");

        let service = WalletService::new();
        let err = import_dir(&service, dir.path()).await.unwrap_err();
        assert!(matches!(err, IoError::MissingField(ref name) if name == "amount"));
    }

    #[tokio::test]
    async fn export_then_import_restores_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let source = WalletService::new();
        let account = source.register_account(Phone::from("+992900000000")).unwrap();
        source.deposit(account.id(), Money::from_minor(10_000)).unwrap();
        let payment = source
            .pay(account.id(), Money::from_minor(2_500), PaymentCategory::from("food"))
            .unwrap();
        source.reject(&payment.id).unwrap();
        source.favorite_payment(&payment.id, "lunch").unwrap();

        export_dir(&source, dir.path()).await.unwrap();

        let target = WalletService::new();
        import_dir(&target, dir.path()).await.unwrap();

        assert_eq!(target.accounts(), source.accounts());
        assert_eq!(target.payments(), source.payments());
        assert_eq!(target.favorites(), source.favorites());
    }
}
