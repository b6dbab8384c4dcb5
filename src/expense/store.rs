//! Expense storage
//!
//! [`ExpenseStore`] is the seam between the HTTP layer and whatever holds the
//! records, so handlers and the calculator stay testable without a concrete
//! backend. [`InMemoryStore`] is the reference backend: a single-lock ordered
//! list with no durability across restarts.

use std::sync::Mutex;

use chrono::{DateTime, Utc};

use super::{ExpenseError, ExpenseRecord, NewExpense};

/// Abstraction over backends capable of storing expense records
pub trait ExpenseStore: Send + Sync {
    fn get(&self, id: u64) -> Result<ExpenseRecord, ExpenseError>;
    fn list(&self) -> Vec<ExpenseRecord>;
    fn add(&self, new: NewExpense) -> ExpenseRecord;
    fn update(&self, id: u64, new: NewExpense) -> Result<ExpenseRecord, ExpenseError>;
    fn delete(&self, id: u64) -> Result<(), ExpenseError>;

    /// Records whose active interval overlaps `[from, to]`
    ///
    /// `to = None` leaves the window open-ended on the right.
    fn in_range(&self, from: DateTime<Utc>, to: Option<DateTime<Utc>>) -> Vec<ExpenseRecord>;
}

struct Inner {
    entries: Vec<ExpenseRecord>,
    next_id: u64,
}

/// In-memory reference backend
///
/// Ids come from a monotonically increasing counter and are never reused,
/// even after a delete, so stale ids stay invalid instead of pointing at a
/// later record.
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Build a store pre-populated with the given entries
    pub fn with_seed(seed: impl IntoIterator<Item = NewExpense>) -> Self {
        let store = Self::new();
        for entry in seed {
            store.add(entry);
        }
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock means a panic mid-mutation; the data is a plain
        // Vec, so recover with whatever state is there.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpenseStore for InMemoryStore {
    fn get(&self, id: u64) -> Result<ExpenseRecord, ExpenseError> {
        self.lock()
            .entries
            .iter()
            .find(|entry| entry.id == id)
            .cloned()
            .ok_or(ExpenseError::NotFound(id))
    }

    fn list(&self) -> Vec<ExpenseRecord> {
        self.lock().entries.clone()
    }

    fn add(&self, new: NewExpense) -> ExpenseRecord {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        let record = ExpenseRecord {
            id,
            recurrence: new.recurrence,
            amount: new.amount,
            active_from: new.active_from,
            active_until: new.active_until,
        };
        inner.entries.push(record.clone());
        record
    }

    fn update(&self, id: u64, new: NewExpense) -> Result<ExpenseRecord, ExpenseError> {
        let mut inner = self.lock();
        let entry = inner
            .entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or(ExpenseError::NotFound(id))?;
        entry.recurrence = new.recurrence;
        entry.amount = new.amount;
        entry.active_from = new.active_from;
        entry.active_until = new.active_until;
        Ok(entry.clone())
    }

    fn delete(&self, id: u64) -> Result<(), ExpenseError> {
        let mut inner = self.lock();
        let position = inner
            .entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or(ExpenseError::NotFound(id))?;
        inner.entries.remove(position);
        Ok(())
    }

    fn in_range(&self, from: DateTime<Utc>, to: Option<DateTime<Utc>>) -> Vec<ExpenseRecord> {
        self.lock()
            .entries
            .iter()
            .filter(|entry| {
                entry.active_until >= from && to.map_or(true, |to| entry.active_from <= to)
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::Recurrence;
    use chrono::TimeZone;

    fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    fn new_expense(amount: i64, from: DateTime<Utc>, until: DateTime<Utc>) -> NewExpense {
        NewExpense {
            recurrence: Recurrence::Monthly,
            amount,
            active_from: from,
            active_until: until,
        }
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let store = InMemoryStore::new();
        let first = store.add(new_expense(10, date(2020, 1, 1), date(2021, 1, 1)));
        let second = store.add(new_expense(20, date(2020, 1, 1), date(2021, 1, 1)));
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.list().len(), 2);
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let store = InMemoryStore::new();
        let first = store.add(new_expense(10, date(2020, 1, 1), date(2021, 1, 1)));
        store.delete(first.id).unwrap();
        let second = store.add(new_expense(20, date(2020, 1, 1), date(2021, 1, 1)));
        assert_ne!(second.id, first.id);
        assert!(matches!(
            store.get(first.id),
            Err(ExpenseError::NotFound(id)) if id == first.id
        ));
    }

    #[test]
    fn test_get_and_update_roundtrip() {
        let store = InMemoryStore::new();
        let created = store.add(new_expense(10, date(2020, 1, 1), date(2021, 1, 1)));

        let updated = store
            .update(created.id, new_expense(25, date(2020, 3, 1), date(2022, 3, 1)))
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.amount, 25);
        assert_eq!(store.get(created.id).unwrap(), updated);
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let store = InMemoryStore::new();
        let result = store.update(42, new_expense(1, date(2020, 1, 1), date(2021, 1, 1)));
        assert!(matches!(result, Err(ExpenseError::NotFound(42))));
    }

    #[test]
    fn test_delete_unknown_id_is_not_found() {
        let store = InMemoryStore::new();
        assert!(matches!(store.delete(7), Err(ExpenseError::NotFound(7))));
    }

    #[test]
    fn test_in_range_keeps_only_overlapping_records() {
        let store = InMemoryStore::new();
        let inside = store.add(new_expense(1, date(2020, 1, 1), date(2020, 12, 1)));
        let straddles = store.add(new_expense(2, date(2019, 1, 1), date(2020, 6, 1)));
        // Ends before the window opens.
        store.add(new_expense(3, date(2018, 1, 1), date(2019, 1, 1)));
        // Starts after the window closes.
        store.add(new_expense(4, date(2022, 1, 1), date(2023, 1, 1)));

        let hits = store.in_range(date(2020, 1, 1), Some(date(2021, 1, 1)));
        let ids: Vec<u64> = hits.iter().map(|entry| entry.id).collect();
        assert_eq!(ids, vec![inside.id, straddles.id]);
    }

    #[test]
    fn test_in_range_open_ended() {
        let store = InMemoryStore::new();
        store.add(new_expense(1, date(2018, 1, 1), date(2019, 1, 1)));
        let future = store.add(new_expense(2, date(2022, 1, 1), date(2023, 1, 1)));

        let hits = store.in_range(date(2020, 1, 1), None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, future.id);
    }

    #[test]
    fn test_with_seed_populates_entries() {
        let store = InMemoryStore::with_seed(vec![
            new_expense(1234, date(2020, 2, 22), date(2022, 11, 28)),
            new_expense(21323, date(2020, 2, 22), date(2020, 11, 28)),
        ]);
        assert_eq!(store.list().len(), 2);
        assert_eq!(store.get(1).unwrap().amount, 1234);
        assert_eq!(store.get(2).unwrap().amount, 21323);
    }
}
