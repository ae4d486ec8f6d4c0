use std::path::{Path, PathBuf};

pub const ACCOUNTS_FILE: &str = "accounts.dump";
pub const PAYMENTS_FILE: &str = "payments.dump";
pub const FAVORITES_FILE: &str = "favorites.dump";

/// Record counts moved by one export or import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpSummary {
    pub accounts: usize,
    pub payments: usize,
    pub favorites: usize,
}

impl DumpSummary {
    pub fn total(&self) -> usize {
        self.accounts + self.payments + self.favorites
    }
}

/// Paths of the three dump files inside `dir`
#[derive(Debug, Clone)]
pub struct DumpPaths {
    pub accounts: PathBuf,
    pub payments: PathBuf,
    pub favorites: PathBuf,
}

impl DumpPaths {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            accounts: dir.join(ACCOUNTS_FILE),
            payments: dir.join(PAYMENTS_FILE),
            favorites: dir.join(FAVORITES_FILE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_live_in_dir() {
        let paths = DumpPaths::new("/tmp/wallet");

        assert_eq!(paths.accounts, Path::new("/tmp/wallet/accounts.dump"));
        assert_eq!(paths.payments, Path::new("/tmp/wallet/payments.dump"));
        assert_eq!(paths.favorites, Path::new("/tmp/wallet/favorites.dump"));
    }

    #[test]
    fn summary_total() {
        let summary = DumpSummary {
            accounts: 2,
            payments: 3,
            favorites: 1,
        };
        assert_eq!(summary.total(), 6);
        assert_eq!(DumpSummary::default().total(), 0);
    }
}
