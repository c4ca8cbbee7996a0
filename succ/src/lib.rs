//! # Successor–delete structures
//!
//! ## Description
//! Data structures maintaining a subset S of the integer universe
//! {0, 1, ..., n+1}, initially full, under two operations: `delete(i)`
//! removes i from S (1 <= i <= n), and `successor(i)` reports the smallest
//! member of S that is >= i. The boundary elements 0 and n+1 are sentinels:
//! always present, never deletable, so every query has an answer.
//!
//! ## Idea
//! All structures here answer `successor` by some form of pointer chasing
//! over dense index arrays, and differ in how aggressively they collapse
//! the chased paths. The family ranges from a bare parent array (five
//! compression policies), over a weighted quick-find with constant-time
//! queries, a classical union-find, and word-parallel composites that put
//! a bit-packed micro layer in front of any of the former, to a
//! height-tracking forest that additionally knows where its deepest node
//! is (the ingredient the adversarial workload builder needs).
//!
//! Capacity is allocated once, up front: every structure takes its maximum
//! universe size in the constructor and `init` merely rewrites the prefix
//! in use, so re-initialisation inside a timing loop never allocates.

pub mod forest;
pub mod microset;
pub mod parent;
pub mod quickfind;
pub mod unionfind;

#[cfg(test)]
mod test;

/// The capability set every candidate structure exposes.
///
/// `init(n)` resets the structure to the full universe {0, ..., n+1};
/// `delete` and `successor` then operate under the usual preconditions
/// (1 <= i <= n for deletes, 0 <= i <= n+1 for queries). Violating a
/// precondition is a programming error and may panic; it is never
/// reported as a value.
pub trait SuccessorDelete {
    /// Stable display name, used for reporting and result rows.
    fn name(&self) -> &'static str;

    /// Resets to the full universe {0, ..., n+1}. Allocation-free; n must
    /// not exceed the capacity given at construction.
    fn init(&mut self, n: usize);

    /// Removes i from the set.
    fn delete(&mut self, i: usize);

    /// Returns the smallest live j with j >= i.
    fn successor(&mut self, i: usize) -> usize;
}

/// The full candidate roster as one tagged variant per concrete structure.
///
/// Dispatch is a plain `match`, so driving a `Structure` through a replay
/// loop monomorphises to direct calls on the concrete type. The order of
/// `all` is the order results are reported in.
pub enum Structure {
    Naive(parent::Naive),
    Recursive(parent::Recursive),
    TwoPass(parent::TwoPass),
    TwoPassChecked(parent::TwoPassChecked),
    Halving(parent::Halving),
    QuickFind(quickfind::QuickFind),
    UnionFind(unionfind::UnionFind),
    MicroQuickFind(microset::MicroSet<quickfind::QuickFind>),
    MicroUnionFind(microset::MicroSet<unionfind::UnionFind>),
    MicroTwoPass(microset::MicroSet<parent::TwoPass>),
    Forest(forest::HeightForest),
}

macro_rules! each_structure {
    ($self:ident, $s:ident => $body:expr) => {
        match $self {
            Structure::Naive($s) => $body,
            Structure::Recursive($s) => $body,
            Structure::TwoPass($s) => $body,
            Structure::TwoPassChecked($s) => $body,
            Structure::Halving($s) => $body,
            Structure::QuickFind($s) => $body,
            Structure::UnionFind($s) => $body,
            Structure::MicroQuickFind($s) => $body,
            Structure::MicroUnionFind($s) => $body,
            Structure::MicroTwoPass($s) => $body,
            Structure::Forest($s) => $body,
        }
    };
}

impl Structure {
    /// Builds the whole roster, every member pre-allocated for universes
    /// up to `cap`.
    pub fn all(cap: usize) -> Vec<Structure> {
        let mcap = microset::macro_capacity(cap);
        vec![
            Structure::Naive(parent::Naive::new(cap)),
            Structure::Recursive(parent::Recursive::new(cap)),
            Structure::TwoPass(parent::TwoPass::new(cap)),
            Structure::TwoPassChecked(parent::TwoPassChecked::new(cap)),
            Structure::Halving(parent::Halving::new(cap)),
            Structure::QuickFind(quickfind::QuickFind::new(cap)),
            Structure::UnionFind(unionfind::UnionFind::new(cap)),
            Structure::MicroQuickFind(microset::MicroSet::new(
                cap,
                quickfind::QuickFind::new(mcap),
                "micro quick-find",
            )),
            Structure::MicroUnionFind(microset::MicroSet::new(
                cap,
                unionfind::UnionFind::new(mcap),
                "micro union-find",
            )),
            Structure::MicroTwoPass(microset::MicroSet::new(
                cap,
                parent::TwoPass::new(mcap),
                "micro 2-pass",
            )),
            Structure::Forest(forest::HeightForest::new(cap)),
        ]
    }
}

impl SuccessorDelete for Structure {
    fn name(&self) -> &'static str {
        each_structure!(self, s => s.name())
    }

    fn init(&mut self, n: usize) {
        each_structure!(self, s => s.init(n))
    }

    fn delete(&mut self, i: usize) {
        each_structure!(self, s => s.delete(i))
    }

    fn successor(&mut self, i: usize) -> usize {
        each_structure!(self, s => s.successor(i))
    }
}
