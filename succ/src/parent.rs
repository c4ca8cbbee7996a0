//! The array-parent family: one parent array, five compression policies.
//!
//! A single array `a` over {0, ..., n+1} with `a[i] >= i` everywhere and
//! `a[n+1] = n+1` always. An element is live iff `a[i] == i`; deleting i
//! points it at its right neighbour, and `successor(i)` is the fixpoint
//! reached by following `a` from i. The five public variants share the
//! array and the deletes and differ only in how much of the walked path
//! they rewrite on the way.

use crate::SuccessorDelete;

/// The shared core. Not a candidate by itself; the variant wrappers below
/// pick one of its successor walks.
#[derive(Debug, Clone)]
pub struct ParentArray {
    a: Vec<usize>,
    n: usize,
}

impl ParentArray {
    /// Allocates for universes up to `cap`. `init` never allocates.
    pub fn new(cap: usize) -> Self {
        Self {
            a: vec![0; cap + 2],
            n: 0,
        }
    }

    pub fn init(&mut self, n: usize) {
        assert!(
            n + 2 <= self.a.len(),
            "universe {} exceeds allocated capacity {}",
            n,
            self.a.len() - 2
        );
        for (i, slot) in self.a.iter_mut().enumerate().take(n + 2) {
            *slot = i;
        }
        self.n = n;
    }

    #[inline]
    pub fn delete(&mut self, i: usize) {
        debug_assert!(1 <= i && i <= self.n, "delete({}) outside 1..={}", i, self.n);
        self.a[i] = i + 1;
    }

    /// Idempotent delete: an already removed slot keeps its pointer, so
    /// compression survives a repeat.
    #[inline]
    pub fn delete_checked(&mut self, i: usize) {
        debug_assert!(1 <= i && i <= self.n, "delete({}) outside 1..={}", i, self.n);
        if self.a[i] == i {
            self.a[i] = i + 1;
        }
    }

    /// Follows the chain without touching it.
    #[inline]
    pub fn succ_naive(&self, i: usize) -> usize {
        let mut j = i;
        while self.a[j] != j {
            j = self.a[j];
        }
        j
    }

    /// Full compression by unwinding the recursion. Stack depth equals the
    /// chain length, so callers cap n for this variant.
    pub fn succ_recursive(&mut self, i: usize) -> usize {
        if self.a[i] > i {
            let r = self.succ_recursive(self.a[i]);
            self.a[i] = r;
        }
        self.a[i]
    }

    /// Full compression, iterative: locate the root, then rewalk from i
    /// rewriting every slot that still points below it.
    #[inline]
    pub fn succ_two_pass(&mut self, i: usize) -> usize {
        let mut r = i;
        while self.a[r] != r {
            r = self.a[r];
        }
        let mut j = i;
        while self.a[j] < r {
            let up = self.a[j];
            self.a[j] = r;
            j = up;
        }
        r
    }

    /// Path halving: every visited slot is pointed at its grandparent in
    /// the same pass.
    #[inline]
    pub fn succ_halving(&mut self, i: usize) -> usize {
        let mut j = i;
        while self.a[j] != j {
            self.a[j] = self.a[self.a[j]];
            j = self.a[j];
        }
        j
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Read-only view of the parent slot, for assertions in tests.
    #[inline]
    pub fn slot(&self, i: usize) -> usize {
        self.a[i]
    }
}

/// Chain walk with no mutation at all. Degenerates to a linear scan once
/// long runs of deletions build up.
#[derive(Debug, Clone)]
pub struct Naive(ParentArray);

/// Literal recursive compression.
#[derive(Debug, Clone)]
pub struct Recursive(ParentArray);

/// Iterative two-pass compression. This variant doubles as the reference
/// the workload generator replays to produce expected outputs, and as the
/// array binding of the micro-set composite.
#[derive(Debug, Clone)]
pub struct TwoPass(ParentArray);

/// Two-pass compression paired with the idempotent delete.
#[derive(Debug, Clone)]
pub struct TwoPassChecked(ParentArray);

/// Path halving.
#[derive(Debug, Clone)]
pub struct Halving(ParentArray);

macro_rules! variant_new {
    ($($t:ident),*) => {
        $(
            impl $t {
                pub fn new(cap: usize) -> Self {
                    Self(ParentArray::new(cap))
                }
            }
        )*
    };
}

variant_new!(Naive, Recursive, TwoPass, TwoPassChecked, Halving);

impl SuccessorDelete for Naive {
    fn name(&self) -> &'static str {
        "naive"
    }
    fn init(&mut self, n: usize) {
        self.0.init(n)
    }
    fn delete(&mut self, i: usize) {
        self.0.delete(i)
    }
    fn successor(&mut self, i: usize) -> usize {
        self.0.succ_naive(i)
    }
}

impl SuccessorDelete for Recursive {
    fn name(&self) -> &'static str {
        "recursive"
    }
    fn init(&mut self, n: usize) {
        self.0.init(n)
    }
    fn delete(&mut self, i: usize) {
        self.0.delete(i)
    }
    fn successor(&mut self, i: usize) -> usize {
        self.0.succ_recursive(i)
    }
}

impl SuccessorDelete for TwoPass {
    fn name(&self) -> &'static str {
        "2-pass"
    }
    fn init(&mut self, n: usize) {
        self.0.init(n)
    }
    fn delete(&mut self, i: usize) {
        self.0.delete(i)
    }
    fn successor(&mut self, i: usize) -> usize {
        self.0.succ_two_pass(i)
    }
}

impl SuccessorDelete for TwoPassChecked {
    fn name(&self) -> &'static str {
        "2-pass checked"
    }
    fn init(&mut self, n: usize) {
        self.0.init(n)
    }
    fn delete(&mut self, i: usize) {
        self.0.delete_checked(i)
    }
    fn successor(&mut self, i: usize) -> usize {
        self.0.succ_two_pass(i)
    }
}

impl SuccessorDelete for Halving {
    fn name(&self) -> &'static str {
        "halving"
    }
    fn init(&mut self, n: usize) {
        self.0.init(n)
    }
    fn delete(&mut self, i: usize) {
        self.0.delete(i)
    }
    fn successor(&mut self, i: usize) -> usize {
        self.0.succ_halving(i)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fresh_array_is_identity() {
        let mut pa = ParentArray::new(16);
        pa.init(8);
        for i in 0..=9 {
            assert_eq!(pa.succ_naive(i), i);
        }
    }

    #[test]
    fn two_pass_rewrites_the_walked_prefix() {
        let mut pa = ParentArray::new(8);
        pa.init(6);
        for i in 1..=6 {
            pa.delete(i);
        }
        assert_eq!(pa.succ_two_pass(1), 7);
        // every slot on the walked chain now points straight at the root
        for i in 1..=6 {
            assert_eq!(pa.slot(i), 7);
        }
        assert_eq!(pa.slot(7), 7);
    }

    #[test]
    fn halving_reaches_the_root_and_shortens() {
        let mut pa = ParentArray::new(8);
        pa.init(6);
        for i in 1..=6 {
            pa.delete(i);
        }
        assert_eq!(pa.succ_halving(1), 7);
        // halving skips every other node, so the chain is at most half as long
        let mut hops = 0;
        let mut j = 1;
        while pa.slot(j) != j {
            j = pa.slot(j);
            hops += 1;
        }
        assert!(hops <= 3, "chain of 6 should have collapsed, got {} hops", hops);
    }

    #[test]
    fn recursive_matches_two_pass() {
        let mut lhs = ParentArray::new(40);
        let mut rhs = ParentArray::new(40);
        lhs.init(30);
        rhs.init(30);
        for &i in &[5, 6, 7, 8, 2, 29, 28, 14] {
            lhs.delete(i);
            rhs.delete(i);
        }
        for q in 0..=31 {
            assert_eq!(lhs.succ_recursive(q), rhs.succ_two_pass(q), "query {}", q);
        }
    }

    #[test]
    fn checked_delete_keeps_compression() {
        let mut pa = ParentArray::new(8);
        pa.init(6);
        for i in 1..=4 {
            pa.delete(i);
        }
        assert_eq!(pa.succ_two_pass(1), 5);
        assert_eq!(pa.slot(1), 5);
        // a repeat through the checked form must not reset the pointer
        pa.delete_checked(1);
        assert_eq!(pa.slot(1), 5);
        // while the unchecked delete does (still correct, merely slower)
        pa.delete(1);
        assert_eq!(pa.slot(1), 2);
        assert_eq!(pa.succ_two_pass(1), 5);
    }

    #[test]
    fn returned_root_is_a_fixpoint() {
        let mut pa = ParentArray::new(16);
        pa.init(12);
        for &i in &[3, 4, 5, 9, 10, 1] {
            pa.delete(i);
        }
        for q in 0..=13 {
            let r = pa.succ_two_pass(q);
            assert!(r >= q);
            assert_eq!(pa.slot(r), r);
        }
    }
}
