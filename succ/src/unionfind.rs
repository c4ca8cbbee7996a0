//! Classical union-find, weighted union plus two-pass path compression,
//! with a successor slot riding on every root.
//!
//! Deleting i unions the trees of i and i+1. The tree containing i+1 lies
//! to the right of the merged span, so its root's `succ` is the answer for
//! the whole merge: it is copied to the winner whenever that side loses.
//! A repeated delete finds both ends in the same tree and falls out as a
//! no-op.

use crate::SuccessorDelete;

#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    weight: Vec<usize>,
    succ: Vec<usize>,
    n: usize,
}

impl UnionFind {
    /// Allocates for universes up to `cap`. `init` never allocates.
    pub fn new(cap: usize) -> Self {
        Self {
            parent: vec![0; cap + 2],
            weight: vec![0; cap + 2],
            succ: vec![0; cap + 2],
            n: 0,
        }
    }

    /// Two-pass find: locate the root, then point the whole query path at
    /// it.
    #[inline]
    fn find(&mut self, i: usize) -> usize {
        let mut r = i;
        while self.parent[r] != r {
            r = self.parent[r];
        }
        let mut j = i;
        while self.parent[j] != r {
            let up = self.parent[j];
            self.parent[j] = r;
            j = up;
        }
        r
    }
}

impl SuccessorDelete for UnionFind {
    fn name(&self) -> &'static str {
        "union-find"
    }

    fn init(&mut self, n: usize) {
        assert!(
            n + 2 <= self.parent.len(),
            "universe {} exceeds allocated capacity {}",
            n,
            self.parent.len() - 2
        );
        for i in 0..n + 2 {
            self.parent[i] = i;
            self.weight[i] = 1;
            self.succ[i] = i;
        }
        self.n = n;
    }

    fn delete(&mut self, i: usize) {
        debug_assert!(1 <= i && i <= self.n, "delete({}) outside 1..={}", i, self.n);
        let ri = self.find(i);
        let rj = self.find(i + 1);
        if ri == rj {
            return;
        }
        let (win, lose) = if self.weight[ri] >= self.weight[rj] {
            (ri, rj)
        } else {
            (rj, ri)
        };
        self.parent[lose] = win;
        self.weight[win] += self.weight[lose];
        if lose == rj {
            // the right tree carries the successor of the merged span
            self.succ[win] = self.succ[rj];
        }
    }

    #[inline]
    fn successor(&mut self, i: usize) -> usize {
        let r = self.find(i);
        self.succ[r]
    }
}
