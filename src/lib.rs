//! # Petty Cash to QuickBooks IIF
//!
//! Converts petty cash till records into QuickBooks IIF import files. Each
//! input row is classified from its free-text fields and written as a
//! balanced TRNS/SPL transaction block.
//!
//! ## Design Principles
//!
//! - **Flexible headers**: column names are matched case, spacing and
//!   punctuation insensitively against known aliases
//! - **Fixed-point arithmetic**: amounts use 2 decimal places via `rust_decimal`
//! - **Two-tier errors**: missing columns abort the run, bad rows are skipped
//!   with a warning
//! - **No ambient state**: every run owns its own sequence counter
//!
//! ## Example
//!
//! ```
//! use petty_cash_iif::{convert_csv, Config};
//! use std::io::Cursor;
//!
//! let csv = "Pay Type,Till No,Transaction Date,Detail,Transacted Amount,User Name\n\
//!            Petty Cash,T1,2024-01-05,fare for driver,500,Jane\n";
//! let conversion = convert_csv(Cursor::new(csv), &Config::default()).unwrap();
//! let iif = conversion.to_iif_string().unwrap();
//! assert!(iif.contains("Expense:Interbranch Transport Cost\tJane\t500.00"));
//! ```

pub mod amount;
pub mod classify;
pub mod columns;
pub mod config;
pub mod engine;
pub mod error;
pub mod iif;
pub mod ledger;
pub mod record;

pub use amount::Amount;
pub use classify::{classify, Category, Classification};
pub use columns::{resolve_columns, CanonicalField, ColumnMap};
pub use config::{Accounts, Config, InputOptions};
pub use engine::{convert_csv, convert_table, Conversion, Converter, Summary};
pub use error::{ConvertError, Result, RowError, RowWarning};
pub use iif::write_iif;
pub use ledger::{build_entry, DocNum, LedgerEntry, LedgerLine, LineKind, TrnsType};
pub use record::{CanonicalRow, RawTable};
