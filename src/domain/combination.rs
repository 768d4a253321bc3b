//! k-element combinations of a source collection.
//!
//! Combinations are emitted lazily in lexicographic order of source
//! positions, which is the order a choose-before-skip recursion produces.

use std::hash::Hash;

use itertools::Itertools;

use crate::domain::error::{DomainError, DomainResult};

/// All combinations of `count` distinct elements drawn from `source`.
///
/// Duplicate source elements are collapsed (first occurrence wins) before
/// generation, so no two emitted combinations are equal as sets. Each
/// combination lists its elements in source order.
///
/// # Errors
/// `IndexOutOfRange` when `count` is negative or larger than the number of
/// distinct source elements.
///
/// # Example
/// ```
/// use seqtree::domain::generate_combinations;
///
/// let pairs: Vec<Vec<i32>> = generate_combinations(&[1, 2, 3], 2).unwrap().collect();
/// assert_eq!(pairs, vec![vec![1, 2], vec![1, 3], vec![2, 3]]);
/// ```
pub fn generate_combinations<T>(source: &[T], count: i64) -> DomainResult<Combinations<T>>
where
    T: Clone + Eq + Hash,
{
    let pool: Vec<T> = source.iter().unique().cloned().collect();
    let size = usize::try_from(count)
        .ok()
        .filter(|&size| size <= pool.len())
        .ok_or(DomainError::IndexOutOfRange {
            index: count,
            len: pool.len(),
        })?;
    Ok(Combinations::new(pool, size))
}

/// Binomial coefficient C(n, k), None on overflow.
pub fn combination_count(n: usize, k: usize) -> Option<usize> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    // result * (n - i) is always divisible by (i + 1)
    (0..k).try_fold(1usize, |acc, i| acc.checked_mul(n - i).map(|v| v / (i + 1)))
}

/// Lazy iterator over combinations, see [`generate_combinations`].
#[derive(Debug, Clone)]
pub struct Combinations<T> {
    pool: Vec<T>,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl<T: Clone> Combinations<T> {
    fn new(pool: Vec<T>, size: usize) -> Self {
        Self {
            pool,
            indices: (0..size).collect(),
            started: false,
            done: false,
        }
    }

    fn current(&self) -> Vec<T> {
        self.indices.iter().map(|&i| self.pool[i].clone()).collect()
    }

    /// Move `indices` to the next combination, false when exhausted.
    fn advance(&mut self) -> bool {
        let n = self.pool.len();
        let k = self.indices.len();
        // rightmost position that can still move to the right
        let Some(pos) = (0..k).rev().find(|&i| self.indices[i] < n - k + i) else {
            return false;
        };
        self.indices[pos] += 1;
        for i in pos + 1..k {
            self.indices[i] = self.indices[i - 1] + 1;
        }
        true
    }
}

impl<T: Clone> Iterator for Combinations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
        } else if !self.advance() {
            self.done = true;
            return None;
        }
        Some(self.current())
    }
}
