//! Weighted quick-find with constant-time successor.
//!
//! The universe is partitioned into contiguous ranges. Every slot stores
//! the representative (`root`) of the range containing it; the
//! representative's slots in `weight` and `succ` hold the range size and
//! the smallest live element at-or-after the whole range. A live element
//! is always the last (and only live) member of its range, so `delete`
//! only ever merges two neighbouring ranges, and contiguity is preserved.
//! Index 0 stays a singleton forever: its range can never be on the right
//! of a merge (deletes start at 1) and never on the left (0 is live).

use crate::SuccessorDelete;

#[derive(Debug, Clone)]
pub struct QuickFind {
    root: Vec<usize>,
    weight: Vec<usize>,
    succ: Vec<usize>,
    n: usize,
}

impl QuickFind {
    /// Allocates for universes up to `cap`. `init` never allocates.
    pub fn new(cap: usize) -> Self {
        Self {
            root: vec![0; cap + 2],
            weight: vec![0; cap + 2],
            succ: vec![0; cap + 2],
            n: 0,
        }
    }
}

impl SuccessorDelete for QuickFind {
    fn name(&self) -> &'static str {
        "quick-find"
    }

    fn init(&mut self, n: usize) {
        assert!(
            n + 2 <= self.root.len(),
            "universe {} exceeds allocated capacity {}",
            n,
            self.root.len() - 2
        );
        for i in 0..n + 2 {
            self.root[i] = i;
            self.weight[i] = 1;
            self.succ[i] = i;
        }
        self.n = n;
    }

    fn delete(&mut self, i: usize) {
        debug_assert!(1 <= i && i <= self.n, "delete({}) outside 1..={}", i, self.n);
        let r1 = self.root[i];
        if self.succ[r1] != i {
            // i is not the live tail of its range, i.e. already deleted
            return;
        }
        let r2 = self.root[i + 1];
        if self.weight[r2] <= self.weight[r1] {
            // fold the right range into r1, scanning right from i+1
            let mut k = i + 1;
            while k <= self.n + 1 && self.root[k] == r2 {
                self.root[k] = r1;
                k += 1;
            }
            self.weight[r1] += self.weight[r2];
            self.succ[r1] = self.succ[r2];
        } else {
            // fold the left range into r2, scanning left from i.
            // root[0] is 0 and 0 is never a member of r1, so the scan
            // stops before underflowing.
            let mut k = i;
            while self.root[k] == r1 {
                self.root[k] = r2;
                if k == 0 {
                    break;
                }
                k -= 1;
            }
            self.weight[r2] += self.weight[r1];
            // succ[r2] already names the merged range's successor
        }
    }

    #[inline]
    fn successor(&mut self, i: usize) -> usize {
        self.succ[self.root[i]]
    }
}
