//! Expense domain types
//!
//! Shared types for expense records, recurrence kinds, and query windows.
//! The calculator and the store both operate on these.

pub mod calc;
pub mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Domain errors for expense lookup and construction
#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error("unsupported recurrence type: {0}")]
    UnsupportedRecurrence(i64),
    #[error("no expense with id {0}")]
    NotFound(u64),
}

/// Billing cadence of an expense record
///
/// Closed enum: every variant has a calculation strategy in [`calc`], so a
/// new cadence is a compile-time extension rather than a silent fallthrough.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Recurrence {
    /// Amount applies once per calendar month
    Monthly,
}

impl Recurrence {
    /// Wire code for the monthly cadence
    pub const MONTHLY_CODE: i64 = 1;

    /// Parse an integer wire code into a recurrence kind
    pub fn from_code(code: i64) -> Result<Self, ExpenseError> {
        match code {
            Self::MONTHLY_CODE => Ok(Recurrence::Monthly),
            other => Err(ExpenseError::UnsupportedRecurrence(other)),
        }
    }

    /// Integer wire code for this recurrence kind
    pub fn code(&self) -> i64 {
        match self {
            Recurrence::Monthly => Self::MONTHLY_CODE,
        }
    }
}

impl std::fmt::Display for Recurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recurrence::Monthly => write!(f, "Monthly"),
        }
    }
}

/// A stored expense record
///
/// `active_from`/`active_until` bound the record's validity; the record
/// contributes to a query window only where the two intervals intersect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseRecord {
    pub id: u64,
    pub recurrence: Recurrence,
    /// Integer monetary amount per occurrence (per month for Monthly)
    pub amount: i64,
    pub active_from: DateTime<Utc>,
    pub active_until: DateTime<Utc>,
}

/// Fields a caller supplies when creating or replacing a record
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub recurrence: Recurrence,
    pub amount: i64,
    pub active_from: DateTime<Utc>,
    pub active_until: DateTime<Utc>,
}

/// A concrete query window handed to the calculator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateWindow {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }
}
