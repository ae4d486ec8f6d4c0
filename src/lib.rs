//! In-memory wallet ledger with a parallel payment aggregator
//!
//! Layers, bottom up: `domain` value types and balance rules, `storage`
//! concurrent stores, `aggregate` the partitioned fan-out sum, `engine` the
//! `WalletService` facade, `io` dump files, `app` the CLI plumbing.

pub mod aggregate;
pub mod app;
pub mod domain;
pub mod engine;
pub mod io;
pub mod prelude;
pub mod storage;
