//! Staff credit ledger
//!
//! A cumulative per-user counter, incremented by exactly one for every
//! successful claim action. Credits are never deducted. A corrupt or
//! non-integer stored value counts as zero before incrementing.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;
use crate::storage::{documents, DocumentStore, DocumentStoreExt};
use crate::surface::UserId;

#[derive(Clone)]
pub struct StaffCreditLedger {
    store: Arc<dyn DocumentStore>,
}

impl StaffCreditLedger {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Current credit count for a user
    #[must_use]
    pub fn get(&self, user: UserId) -> u64 {
        coerce(self.load_all().get(&user.to_string()))
    }

    /// Record one claim for the user and persist
    pub fn credit(&self, user: UserId) -> Result<u64> {
        let mut all = self.load_all();
        let key = user.to_string();
        let next = coerce(all.get(&key)) + 1;
        all.insert(key, serde_json::Value::from(next));
        self.store.save_map(documents::CREDITS, &all)?;
        tracing::debug!(user = %user, credits = next, "staff credit recorded");
        Ok(next)
    }

    fn load_all(&self) -> HashMap<String, serde_json::Value> {
        self.store.load_map(documents::CREDITS)
    }
}

/// A stored value that is not a non-negative integer counts as zero
fn coerce(value: Option<&serde_json::Value>) -> u64 {
    value.and_then(serde_json::Value::as_u64).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::JsonStore;
    use tempfile::TempDir;

    fn ledger() -> (TempDir, StaffCreditLedger) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = Arc::new(JsonStore::new(dir.path()));
        (dir, StaffCreditLedger::new(store))
    }

    #[test]
    fn first_credit_starts_at_one() {
        let (_dir, ledger) = ledger();
        assert_eq!(ledger.get(UserId(1)), 0);
        assert_eq!(ledger.credit(UserId(1)).unwrap(), 1);
        assert_eq!(ledger.get(UserId(1)), 1);
    }

    #[test]
    fn repeated_credits_accumulate() {
        let (_dir, ledger) = ledger();
        for expected in 1..=5 {
            assert_eq!(ledger.credit(UserId(2)).unwrap(), expected);
        }
        assert_eq!(ledger.get(UserId(2)), 5);
    }

    #[test]
    fn corrupt_value_counts_as_zero() {
        let (dir, ledger) = ledger();
        std::fs::write(
            dir.path().join("credits.json"),
            r#"{"3": "lots", "4": -2, "5": 10}"#,
        )
        .unwrap();

        assert_eq!(ledger.credit(UserId(3)).unwrap(), 1);
        assert_eq!(ledger.credit(UserId(4)).unwrap(), 1);
        assert_eq!(ledger.credit(UserId(5)).unwrap(), 11);
    }

    #[test]
    fn credits_are_per_user() {
        let (_dir, ledger) = ledger();
        ledger.credit(UserId(7)).unwrap();
        ledger.credit(UserId(8)).unwrap();
        ledger.credit(UserId(8)).unwrap();
        assert_eq!(ledger.get(UserId(7)), 1);
        assert_eq!(ledger.get(UserId(8)), 2);
    }
}
