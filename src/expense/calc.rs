//! Monthly-expense proration
//!
//! Computes the amount an expense record contributes to a query window by
//! counting whole months of overlap between the record's active interval and
//! the window, then multiplying by the per-month amount.
//!
//! The month count is a calendar month-index difference: day-of-month is
//! ignored entirely, so two dates in the same month count as 0 and crossing a
//! month boundary counts as 1 no matter how many days elapsed. Partial months
//! are never prorated.

use chrono::{DateTime, Datelike, Utc};

use super::{DateWindow, ExpenseRecord, Recurrence};

/// Number of calendar month boundaries between `earlier` and `later`
///
/// `(y2 - y1) * 12 + (m2 - m1)`; negative when `later` is in an earlier
/// month than `earlier`.
pub fn month_index_diff(later: DateTime<Utc>, earlier: DateTime<Utc>) -> i64 {
    let years = i64::from(later.year() - earlier.year());
    let months = i64::from(later.month()) - i64::from(earlier.month());
    years * 12 + months
}

/// Total amount attributable to `record` within `window`
///
/// Dispatches on the record's recurrence kind; each variant has its own
/// strategy. Pure and deterministic, no side effects.
pub fn prorate(record: &ExpenseRecord, window: DateWindow) -> i64 {
    match record.recurrence {
        Recurrence::Monthly => monthly_total(record, window),
    }
}

/// Sum of [`prorate`] over a set of records, for one window query
pub fn window_total(records: &[ExpenseRecord], window: DateWindow) -> i64 {
    records.iter().map(|record| prorate(record, window)).sum()
}

fn monthly_total(record: &ExpenseRecord, window: DateWindow) -> i64 {
    // Effective window is the intersection: later of the starts, earlier of
    // the ends.
    let effective_start = record.active_from.max(window.from);
    let effective_end = record.active_until.min(window.to);

    // An empty or inverted intersection contributes nothing; the raw
    // difference would go negative here.
    let months = month_index_diff(effective_end, effective_start).max(0);
    months * record.amount
}
