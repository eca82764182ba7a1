use serde::{Deserialize, Serialize};
use tracing::trace;

/// Monotonic version stamp of one piece of mutable state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Revision(u64);

impl Revision {
    #[must_use]
    pub const fn initial() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Counter bumped on every mutation of the state it guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RevisionCounter {
    current: Revision,
}

impl RevisionCounter {
    #[must_use]
    pub const fn current(self) -> Revision {
        self.current
    }

    pub fn bump(&mut self) -> Revision {
        self.current = Revision(self.current.0.wrapping_add(1));
        self.current
    }
}

/// Single-slot cache for a derived value.
///
/// The key lists every revision (or input) the value depends on; a lookup with
/// a different key recomputes.
#[derive(Debug, Clone)]
pub struct Memo<K, T> {
    slot: Option<(K, T)>,
}

impl<K, T> Default for Memo<K, T> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<K: PartialEq + Copy, T: Clone> Memo<K, T> {
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> T) -> T {
        if let Some((cached_key, value)) = &self.slot {
            if *cached_key == key {
                trace!("memo hit");
                return value.clone();
            }
        }
        let value = compute();
        self.slot = Some((key, value.clone()));
        value
    }

    pub fn invalidate(&mut self) {
        self.slot = None;
    }

    #[must_use]
    pub fn is_cached_for(&self, key: K) -> bool {
        matches!(&self.slot, Some((cached_key, _)) if *cached_key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::{Memo, RevisionCounter};

    #[test]
    fn counter_bumps_monotonically() {
        let mut counter = RevisionCounter::default();
        let first = counter.bump();
        let second = counter.bump();
        assert!(second > first);
        assert_eq!(counter.current(), second);
    }

    #[test]
    fn memo_recomputes_only_on_key_change() {
        let mut memo: Memo<u64, u32> = Memo::default();
        let mut calls = 0;
        let mut compute = |v: u32| {
            calls += 1;
            v
        };
        assert_eq!(memo.get_or_compute(1, || compute(10)), 10);
        assert_eq!(memo.get_or_compute(1, || compute(20)), 10);
        assert_eq!(memo.get_or_compute(2, || compute(30)), 30);
        assert_eq!(calls, 2);
    }
}
