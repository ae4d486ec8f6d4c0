pub mod dump;
pub mod dump_reader;
pub mod dump_writer;
pub mod error;
pub mod legacy;
pub mod parse;

// Re-export commonly used types
pub use dump::{DumpPaths, DumpSummary};
pub use dump_reader::import_dir;
pub use dump_writer::export_dir;
pub use error::IoError;
pub use legacy::{LegacyAccountRecord, export_accounts_to_file, import_accounts_from_file};
pub use parse::DumpRecord;
