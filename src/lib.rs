//! Budgeteer - Expense-tracking API Library
//!
//! A minimal expense tracker:
//! - In-memory expense store behind an injectable trait
//! - Monthly proration calculator over arbitrary date windows
//! - axum HTTP API for CRUD and range totals
//!
//! # Example
//!
//! ```
//! use budgeteer::expense::{calc, DateWindow, ExpenseRecord, Recurrence};
//! use chrono::TimeZone;
//!
//! let record = ExpenseRecord {
//!     id: 1,
//!     recurrence: Recurrence::Monthly,
//!     amount: 1,
//!     active_from: chrono::Utc.with_ymd_and_hms(2020, 2, 22, 0, 0, 0).unwrap(),
//!     active_until: chrono::Utc.with_ymd_and_hms(2022, 2, 22, 0, 0, 0).unwrap(),
//! };
//! let window = DateWindow::new(
//!     chrono::Utc.with_ymd_and_hms(2020, 2, 22, 0, 0, 0).unwrap(),
//!     chrono::Utc.with_ymd_and_hms(2021, 2, 22, 0, 0, 0).unwrap(),
//! );
//! assert_eq!(calc::prorate(&record, window), 12);
//! ```

pub mod cli;
pub mod config;
pub mod expense;
pub mod server;

// Re-export commonly used types for convenience
pub use config::Config;

pub use expense::{
    calc::{month_index_diff, prorate, window_total},
    store::{ExpenseStore, InMemoryStore},
    DateWindow, ExpenseError, ExpenseRecord, NewExpense, Recurrence,
};

pub use server::{
    router,
    ServerState,
    start as start_server,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
