//! Identifier generation for new ledger entities
//!
//! The ledger store never mints ids on its own; callers hand it an
//! [`IdGenerator`]. Tests use [`SequentialIds`] for predictable ids, the CLI
//! uses [`UuidIds`].

use std::sync::atomic::{AtomicU64, Ordering};

/// Source of unique entity ids
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Monotonic counter ids: `"{prefix}-1"`, `"{prefix}-2"`, ...
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::starting_at(prefix, 1)
    }

    pub fn starting_at(prefix: impl Into<String>, first: u64) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(first),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        format!("{}-{}", self.prefix, n)
    }
}

/// Random v4 UUID ids
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sequential_ids() {
        let ids = SequentialIds::new("tx");
        assert_eq!(ids.next_id(), "tx-1");
        assert_eq!(ids.next_id(), "tx-2");

        let ids = SequentialIds::starting_at("acct", 10);
        assert_eq!(ids.next_id(), "acct-10");
    }

    #[test]
    fn test_uuid_ids_do_not_collide_in_rapid_succession() {
        let ids = UuidIds;
        let generated: HashSet<String> = (0..1000).map(|_| ids.next_id()).collect();
        assert_eq!(generated.len(), 1000);
    }
}
