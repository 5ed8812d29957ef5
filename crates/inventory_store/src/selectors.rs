//! Argument-keyed selector memoization bound to a collection revision.

use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;

/// Caches one result per distinct argument for a single collection revision.
///
/// Results computed against an older revision are dropped wholesale the first time the cache is
/// read with a newer one, so the cache never holds more than the arguments seen for the current
/// snapshot.
#[derive(Debug)]
pub(crate) struct SelectorCache<K, V> {
    inner: RefCell<CacheInner<K, V>>,
}

#[derive(Debug)]
struct CacheInner<K, V> {
    revision: u64,
    entries: HashMap<K, Rc<[V]>>,
}

impl<K, V> Default for SelectorCache<K, V> {
    fn default() -> Self {
        Self {
            inner: RefCell::new(CacheInner {
                revision: 0,
                entries: HashMap::new(),
            }),
        }
    }
}

impl<K: Clone, V> Clone for SelectorCache<K, V> {
    fn clone(&self) -> Self {
        let inner = self.inner.borrow();
        Self {
            inner: RefCell::new(CacheInner {
                revision: inner.revision,
                entries: inner.entries.clone(),
            }),
        }
    }
}

impl<K: Eq + Hash, V> SelectorCache<K, V> {
    pub(crate) fn get_or_compute(
        &self,
        revision: u64,
        key: K,
        compute: impl FnOnce() -> Vec<V>,
    ) -> Rc<[V]> {
        let mut inner = self.inner.borrow_mut();
        if inner.revision != revision {
            inner.entries.clear();
            inner.revision = revision;
        }
        inner
            .entries
            .entry(key)
            .or_insert_with(|| Rc::from(compute()))
            .clone()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn same_argument_and_revision_reuses_result() {
        let cache = SelectorCache::<&str, u32>::default();
        let calls = Cell::new(0);
        let compute = || {
            calls.set(calls.get() + 1);
            vec![1, 2]
        };

        let first = cache.get_or_compute(1, "a", compute);
        let second = cache.get_or_compute(1, "a", || unreachable!("cached"));

        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn new_revision_drops_every_entry() {
        let cache = SelectorCache::<&str, u32>::default();
        cache.get_or_compute(1, "a", || vec![1]);
        cache.get_or_compute(1, "b", || vec![2]);
        assert_eq!(cache.len(), 2);

        let fresh = cache.get_or_compute(2, "a", || vec![9]);
        assert_eq!(&*fresh, &[9]);
        assert_eq!(cache.len(), 1);
    }
}
