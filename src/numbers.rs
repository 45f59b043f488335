//! Number-set primitives shared by the game verifiers.
//!
//! Match counting treats the winning side as a membership set; combination
//! enumeration walks every size-r subset of a selection in index order.

use std::collections::HashSet;
use std::hash::Hash;

/// Count how many items of `a` also occur in `b`.
///
/// `b` is indexed once, so this is O(|a| + |b|). Duplicates in `a` are
/// counted once per occurrence.
pub fn intersect_count<'a, 'b, T, I>(a: I, b: &'b [T]) -> usize
where
    T: Eq + Hash + 'a + 'b,
    I: IntoIterator<Item = &'a T>,
{
    let index: HashSet<&T> = b.iter().collect();
    a.into_iter().filter(|x| index.contains(*x)).count()
}

/// Number of size-`r` subsets of an `n`-element set. `None` on overflow.
pub fn binomial(n: usize, r: usize) -> Option<u64> {
    if r > n {
        return Some(0);
    }
    let r = r.min(n - r);
    let mut acc: u64 = 1;
    for i in 0..r {
        // acc * (n - i) is always divisible by (i + 1) at this point
        acc = acc.checked_mul((n - i) as u64)? / (i as u64 + 1);
    }
    Some(acc)
}

// ---------------------------------------------------------------------------
// Combinations
// ---------------------------------------------------------------------------

/// Lazy iterator over every size-`r` subset of a slice.
///
/// Subsets come out in lexicographic index order and keep the relative
/// order of the source slice. `r == 0` yields one empty subset; `r` larger
/// than the slice yields nothing.
pub struct Combinations<'a, T> {
    items: &'a [T],
    indices: Vec<usize>,
    started: bool,
    exhausted: bool,
}

impl<'a, T> Combinations<'a, T> {
    pub fn new(items: &'a [T], r: usize) -> Self {
        Self {
            items,
            indices: (0..r).collect(),
            started: false,
            exhausted: r > items.len(),
        }
    }

    /// Advance `indices` to the next subset. Returns false when done.
    fn advance(&mut self) -> bool {
        let n = self.items.len();
        let r = self.indices.len();
        let mut i = r;
        loop {
            if i == 0 {
                return false;
            }
            i -= 1;
            if self.indices[i] < n - r + i {
                break;
            }
        }
        self.indices[i] += 1;
        for j in i + 1..r {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        true
    }
}

impl<'a, T> Iterator for Combinations<'a, T> {
    type Item = Vec<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        if self.started {
            if !self.advance() {
                self.exhausted = true;
                return None;
            }
        } else {
            self.started = true;
        }
        Some(self.indices.iter().map(|&i| &self.items[i]).collect())
    }
}

/// Collect every size-`r` subset of `items`.
///
/// Materializes C(len, r) vectors; callers with large inputs should bound
/// `items.len()` first or iterate [`Combinations`] directly.
pub fn k_combinations<T>(items: &[T], r: usize) -> Vec<Vec<&T>> {
    Combinations::new(items, r).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
