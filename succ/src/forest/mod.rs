//! Height-tracking successor forest.
//!
//! ## Description
//! A parent-pointer forest over {0, ..., n+1} whose roots are exactly the
//! live elements: deleting i hangs i (with its whole subtree) under i+1,
//! and `successor` walks to the root with two-pass compression, exactly
//! like the plain array variants. On top of that the forest keeps, for
//! every node, its height, and threads all nodes of equal height on one
//! circular list. That bookkeeping is what pays for `deepest_node`: pick
//! any node from the topmost non-empty height list (necessarily a root)
//! and descend through children one height level at a time, O(max height)
//! in total.
//!
//! The deepest node is the most expensive element to query, which makes
//! the forest the oracle the adversarial workload builder consults -- and
//! since it supports the full operation set itself, it also runs as a
//! candidate in its own right.
//!
//! ## Bookkeeping
//! Per node: `parent` (self iff root), the `(next, prev)` equal-height
//! ring, the `(left, right)` sibling ring, and `child` (an arbitrary child
//! or [`NIL`]). Globally `by_height[h]` holds an arbitrary member of the
//! height-h ring and `max_height` is kept *exact* after every operation:
//! a relocating delete can lower the tallest tree as well as raise one,
//! and `deepest_node` dereferences `by_height[max_height]` without
//! checking.
//!
//! Interior nodes detached by compression get their new height found in
//! O(1) because *all* nodes live on height rings, not just roots.

use crate::SuccessorDelete;

/// Absent-node marker for `child` and `by_height` slots.
pub const NIL: usize = usize::MAX;

pub struct HeightForest {
    parent: Vec<usize>,
    height: Vec<usize>,
    /// Circular ring through all nodes of equal height.
    next: Vec<usize>,
    prev: Vec<usize>,
    /// Circular ring through all children of a common parent.
    left: Vec<usize>,
    right: Vec<usize>,
    /// An arbitrary child, or NIL.
    child: Vec<usize>,
    /// An arbitrary member of the height-h ring, or NIL.
    by_height: Vec<usize>,
    max_height: usize,
    n: usize,
}

impl HeightForest {
    /// Allocates for universes up to `cap`. `init` never allocates.
    pub fn new(cap: usize) -> Self {
        let size = cap + 2;
        Self {
            parent: vec![0; size],
            height: vec![0; size],
            next: vec![0; size],
            prev: vec![0; size],
            left: vec![0; size],
            right: vec![0; size],
            child: vec![0; size],
            by_height: vec![NIL; size],
            max_height: 0,
            n: 0,
        }
    }

    /// Largest height of any node, i.e. the depth of the deepest node.
    #[inline]
    pub fn max_height(&self) -> usize {
        self.max_height
    }

    #[inline]
    pub fn height(&self, i: usize) -> usize {
        self.height[i]
    }

    /// An arbitrary member of the height-h ring, or NIL if empty.
    #[inline]
    pub fn any_of_height(&self, h: usize) -> usize {
        self.by_height[h]
    }

    /// A node of maximal depth in the forest: start from any node of
    /// maximal height (such a node is always a root) and step down one
    /// height level per child hop.
    pub fn deepest_node(&self) -> usize {
        let mut v = self.by_height[self.max_height];
        debug_assert_ne!(v, NIL, "height rings out of step with max_height");
        let mut h = self.max_height;
        while h > 0 {
            let head = self.child[v];
            let mut c = head;
            loop {
                if self.height[c] == h - 1 {
                    break;
                }
                c = self.right[c];
                debug_assert_ne!(c, head, "no child one level below {}", v);
            }
            v = c;
            h -= 1;
        }
        v
    }

    /// Takes i out of its equal-height ring, leaving it a singleton.
    fn drop_from_height_ring(&mut self, i: usize) {
        let h = self.height[i];
        if self.next[i] == i {
            self.by_height[h] = NIL;
        } else {
            let (p, nx) = (self.prev[i], self.next[i]);
            self.next[p] = nx;
            self.prev[nx] = p;
            if self.by_height[h] == i {
                self.by_height[h] = nx;
            }
            self.next[i] = i;
            self.prev[i] = i;
        }
    }

    /// Splices the singleton i into the height-h ring and records h.
    fn push_on_height_ring(&mut self, i: usize, h: usize) {
        debug_assert_eq!(self.next[i], i, "node {} is still on a ring", i);
        self.height[i] = h;
        let head = self.by_height[h];
        if head == NIL {
            self.by_height[h] = i;
        } else {
            let tail = self.prev[head];
            self.next[tail] = i;
            self.prev[i] = tail;
            self.next[i] = head;
            self.prev[head] = i;
        }
    }

    /// Makes root i the first child of j.
    fn link(&mut self, i: usize, j: usize) {
        debug_assert_eq!(self.parent[i], i, "link of non-root {}", i);
        debug_assert!(j > i, "link({}, {}) must point rightwards", i, j);
        self.parent[i] = j;
        let head = self.child[j];
        if head != NIL {
            let tail = self.left[head];
            self.right[tail] = i;
            self.left[i] = tail;
            self.right[i] = head;
            self.left[head] = i;
        }
        self.child[j] = i;
    }

    /// Detaches i from its parent's child ring; i keeps its own subtree
    /// and becomes a root with singleton rings.
    fn unlink(&mut self, i: usize) {
        let p = self.parent[i];
        debug_assert_ne!(p, i, "unlink of root {}", i);
        if self.right[i] == i {
            self.child[p] = NIL;
        } else {
            let (l, r) = (self.left[i], self.right[i]);
            self.right[l] = r;
            self.left[r] = l;
            if self.child[p] == i {
                self.child[p] = r;
            }
            self.left[i] = i;
            self.right[i] = i;
        }
        self.parent[i] = i;
    }

    /// Recomputes i's height from its children and re-slots it in the
    /// height rings. Returns the new height.
    // TODO: this rescans the whole child ring; a per-node histogram of
    // child heights would bring the recompute down to O(1).
    fn fix_height(&mut self, i: usize) -> usize {
        self.drop_from_height_ring(i);
        let mut h = 0;
        let head = self.child[i];
        if head != NIL {
            let mut c = head;
            loop {
                h = h.max(self.height[c] + 1);
                c = self.right[c];
                if c == head {
                    break;
                }
            }
        }
        self.push_on_height_ring(i, h);
        h
    }

    /// Re-slots every node from i up to its root; returns the root.
    fn fix_heights_upward(&mut self, i: usize) -> usize {
        let mut a = i;
        loop {
            self.fix_height(a);
            if self.parent[a] == a {
                return a;
            }
            a = self.parent[a];
        }
    }

    /// Raises `max_height` to `candidate` if needed, then trims empty
    /// levels so it lands exactly on the topmost occupied ring.
    fn settle_max_height(&mut self, candidate: usize) {
        if candidate > self.max_height {
            self.max_height = candidate;
        }
        while self.max_height > 0 && self.by_height[self.max_height] == NIL {
            self.max_height -= 1;
        }
    }

    /// Exhaustive structural audit; test support. Panics on the first
    /// violated invariant.
    pub fn check_invariants(&self) {
        use vob::Vob;

        let size = self.n + 2;
        for i in 0..size {
            assert!(self.parent[i] >= i, "parent[{}] points left", i);
            assert!(self.parent[i] < size, "parent[{}] out of range", i);
        }
        assert_eq!(self.parent[0], 0, "sentinel 0 must stay a root");
        assert_eq!(self.parent[size - 1], size - 1, "sentinel {} must stay a root", size - 1);

        // sibling rings: mutually consistent, one common parent, and the
        // parent's child slot names a member
        for i in 0..size {
            assert_eq!(self.right[self.left[i]], i, "sibling ring broken at {}", i);
            assert_eq!(self.left[self.right[i]], i, "sibling ring broken at {}", i);
            if self.parent[i] != i {
                let p = self.parent[i];
                let head = self.child[p];
                assert_ne!(head, NIL, "parent {} of {} has no child slot", p, i);
                let mut c = head;
                let mut found = false;
                loop {
                    assert_eq!(self.parent[c], p, "sibling {} under wrong parent", c);
                    if c == i {
                        found = true;
                    }
                    c = self.right[c];
                    if c == head {
                        break;
                    }
                }
                assert!(found, "{} missing from its parent's child ring", i);
            }
        }
        for p in 0..size {
            if self.child[p] != NIL {
                assert_eq!(
                    self.parent[self.child[p]],
                    p,
                    "child slot of {} names a stranger",
                    p
                );
            }
        }

        // heights derive from children
        for i in 0..size {
            let mut want = 0;
            let head = self.child[i];
            if head != NIL {
                let mut c = head;
                loop {
                    want = want.max(self.height[c] + 1);
                    c = self.right[c];
                    if c == head {
                        break;
                    }
                }
            }
            assert_eq!(self.height[i], want, "height[{}] stale", i);
        }

        // every node sits on exactly the ring its height names
        let mut seen = Vob::new();
        seen.resize(size, false);
        for h in 0..size {
            let head = self.by_height[h];
            if head == NIL {
                continue;
            }
            let mut c = head;
            loop {
                assert_eq!(self.height[c], h, "{} on the wrong height ring", c);
                assert_eq!(self.next[self.prev[c]], c, "height ring broken at {}", c);
                assert_eq!(self.prev[self.next[c]], c, "height ring broken at {}", c);
                assert!(!seen.get(c).unwrap(), "{} threaded on two rings", c);
                seen.set(c, true);
                c = self.next[c];
                if c == head {
                    break;
                }
            }
        }
        for i in 0..size {
            assert!(seen.get(i).unwrap(), "{} missing from every height ring", i);
        }

        // max_height is exact
        if self.max_height > 0 {
            assert_ne!(self.by_height[self.max_height], NIL, "max_height overshoots");
        }
        for h in self.max_height + 1..size {
            assert_eq!(self.by_height[h], NIL, "max_height undershoots {}", h);
        }
    }
}

impl SuccessorDelete for HeightForest {
    fn name(&self) -> &'static str {
        "height forest"
    }

    fn init(&mut self, n: usize) {
        let size = n + 2;
        assert!(
            size <= self.parent.len(),
            "universe {} exceeds allocated capacity {}",
            n,
            self.parent.len() - 2
        );
        for i in 0..size {
            self.parent[i] = i;
            self.height[i] = 0;
            // one ring holding the entire universe at height 0
            self.next[i] = if i + 1 == size { 0 } else { i + 1 };
            self.prev[i] = if i == 0 { size - 1 } else { i - 1 };
            self.left[i] = i;
            self.right[i] = i;
            self.child[i] = NIL;
        }
        for slot in self.by_height.iter_mut().take(size) {
            *slot = NIL;
        }
        self.by_height[0] = 0;
        self.max_height = 0;
        self.n = n;
    }

    /// Hangs i under its right neighbour. If i is already deleted it is
    /// relocated: detached from wherever compression left it and re-hung
    /// under i+1, so a repeat delete stays sound.
    fn delete(&mut self, i: usize) {
        debug_assert!(1 <= i && i <= self.n, "delete({}) outside 1..={}", i, self.n);
        if self.parent[i] != i {
            let p = self.parent[i];
            self.unlink(i);
            self.fix_heights_upward(p);
        }
        self.link(i, i + 1);
        let root = self.fix_heights_upward(i + 1);
        let root_height = self.height[root];
        self.settle_max_height(root_height);
    }

    /// Two-pass compression: find the root, then re-hang every node of
    /// the walked path directly under it, re-slotting heights bottom-up.
    fn successor(&mut self, i: usize) -> usize {
        let mut r = i;
        while self.parent[r] != r {
            r = self.parent[r];
        }
        let mut j = i;
        while j != r {
            let up = self.parent[j];
            self.unlink(j);
            self.link(j, r);
            self.fix_height(j);
            j = up;
        }
        let root_height = self.fix_height(r);
        self.settle_max_height(root_height);
        r
    }
}
