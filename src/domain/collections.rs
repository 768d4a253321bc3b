//! Small generic helpers for slices and maps.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use std::sync::OnceLock;

use crate::domain::error::{DomainError, DomainResult};

fn out_of_range(index: usize, len: usize) -> DomainError {
    DomainError::IndexOutOfRange {
        index: i64::try_from(index).unwrap_or(i64::MAX),
        len,
    }
}

/// Swap two elements in place.
///
/// # Errors
/// `IndexOutOfRange` when either index is outside the slice.
pub fn swap_elements<T>(items: &mut [T], first: usize, second: usize) -> DomainResult<()> {
    for index in [first, second] {
        if index >= items.len() {
            return Err(out_of_range(index, items.len()));
        }
    }
    items.swap(first, second);
    Ok(())
}

/// Stable sort of triples by one column (0, 1 or 2).
///
/// # Errors
/// `IndexOutOfRange` for any other column.
pub fn sort_tuples<A: Ord, B: Ord, C: Ord>(
    items: &mut [(A, B, C)],
    column: usize,
    ascending: bool,
) -> DomainResult<()> {
    let direction = |ordering: Ordering| {
        if ascending {
            ordering
        } else {
            ordering.reverse()
        }
    };
    match column {
        0 => items.sort_by(|x, y| direction(x.0.cmp(&y.0))),
        1 => items.sort_by(|x, y| direction(x.1.cmp(&y.1))),
        2 => items.sort_by(|x, y| direction(x.2.cmp(&y.2))),
        _ => return Err(out_of_range(column, 3)),
    }
    Ok(())
}

/// Memoizing lookup on map-like caches.
pub trait CacheExt<K, V> {
    /// Return the value cached under `key`, building and storing it first
    /// when the key is missing. `builder` runs at most once.
    fn get_or_build<F: FnOnce() -> V>(&mut self, key: K, builder: F) -> &V;
}

impl<K: Eq + Hash, V, S: BuildHasher> CacheExt<K, V> for HashMap<K, V, S> {
    fn get_or_build<F: FnOnce() -> V>(&mut self, key: K, builder: F) -> &V {
        self.entry(key).or_insert_with(builder)
    }
}

impl<K: Ord, V> CacheExt<K, V> for BTreeMap<K, V> {
    fn get_or_build<F: FnOnce() -> V>(&mut self, key: K, builder: F) -> &V {
        self.entry(key).or_insert_with(builder)
    }
}

/// Lazily initialized, thread-safe single instance of `T`.
///
/// ```
/// use seqtree::domain::Singleton;
///
/// static NAMES: Singleton<Vec<String>> = Singleton::new();
/// assert!(NAMES.instance().is_empty());
/// assert!(std::ptr::eq(NAMES.instance(), NAMES.instance()));
/// ```
#[derive(Debug)]
pub struct Singleton<T> {
    cell: OnceLock<T>,
}

impl<T: Default> Singleton<T> {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    pub fn instance(&self) -> &T {
        self.cell.get_or_init(T::default)
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T: Default> Default for Singleton<T> {
    fn default() -> Self {
        Self::new()
    }
}
