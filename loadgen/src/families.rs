//! The three workload families.
//!
//! Every family interleaves deletions with queries and ends with the 0
//! terminator. `worst_case` and `random` steer their queries with the
//! height forest: after each deletion, queries are issued against the
//! forest's current deepest node -- and applied to the forest -- until
//! ⌊i·α⌋ of them are out, so each query lands on the most expensive spot
//! the previous ones left behind. Expected replies come from a replay on
//! the 2-pass array reference.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use succ::forest::HeightForest;
use succ::parent::TwoPass;
use succ::SuccessorDelete;

use crate::stream::{max_ops, Stream, StreamBuf};

/// Reporting seam for the generator's informational lines. The driver
/// implements it on its progress arena; tests use a sink.
pub trait ProgressLog {
    fn info(&self, msg: &str);
}

/// No-op log for callers that do not care.
pub struct SilentLog;

impl ProgressLog for SilentLog {
    fn info(&self, _msg: &str) {}
}

/// Builds operation streams plus expected replies into a reusable arena.
pub struct Generator {
    cap: usize,
    forest: HeightForest,
    reference: TwoPass,
    buf: StreamBuf,
}

impl Generator {
    /// Allocates the stream arena and both helper structures for
    /// universes up to `cap`.
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            forest: HeightForest::new(cap),
            reference: TwoPass::new(cap),
            buf: StreamBuf::new(cap),
        }
    }

    /// Deletes 1..=n, then hammers `successor(1)` n times. The family
    /// that separates compressing walks from bare scans.
    pub fn query_one(&mut self, n: usize, log: &dyn ProgressLog) -> Stream<'_> {
        assert!(n <= self.cap, "n = {} exceeds generator capacity {}", n, self.cap);
        self.buf.clear();
        for i in 1..=n {
            self.buf.ops.push(-(i as i64));
        }
        for _ in 0..n {
            self.buf.ops.push(1);
        }
        self.finish(n, "query_one".to_string(), log)
    }

    /// Deletes 1..=n in order; after deleting i, queries the forest's
    /// deepest node until ⌊i·α⌋ queries are out, applying each query to
    /// the forest so the next target reflects the compressed shape.
    pub fn worst_case(&mut self, n: usize, alpha: f64, log: &dyn ProgressLog) -> Stream<'_> {
        assert!(n <= self.cap, "n = {} exceeds generator capacity {}", n, self.cap);
        self.buf.clear();
        self.forest.init(n);
        let mut queries = 0usize;
        for i in 1..=n {
            self.buf.ops.push(-(i as i64));
            self.forest.delete(i);
            let due = (i as f64 * alpha) as usize;
            while queries < due {
                let d = self.forest.deepest_node();
                debug_assert!(1 <= d && d <= n, "deepest node {} is not deletable", d);
                self.buf.ops.push(d as i64);
                self.forest.successor(d);
                queries += 1;
            }
        }
        self.finish(n, format!("worst_case {:.3}", alpha), log)
    }

    /// Same interleaving as `worst_case`, but every deletion picks a
    /// uniform index in [1, n-1], duplicates and all. The forest
    /// relocates a re-deleted node, so the oracle stays sound.
    pub fn random(&mut self, n: usize, alpha: f64, seed: u64, log: &dyn ProgressLog) -> Stream<'_> {
        assert!(n <= self.cap, "n = {} exceeds generator capacity {}", n, self.cap);
        assert!(n >= 2, "random workload needs at least two elements");
        let mut rng = StdRng::seed_from_u64(seed);
        self.buf.clear();
        self.forest.init(n);
        let mut queries = 0usize;
        for i in 1..=n {
            let d = rng.gen_range(1..n);
            self.buf.ops.push(-(d as i64));
            self.forest.delete(d);
            let due = (i as f64 * alpha) as usize;
            while queries < due {
                let q = self.forest.deepest_node();
                debug_assert!(1 <= q && q <= n, "deepest node {} is not deletable", q);
                self.buf.ops.push(q as i64);
                self.forest.successor(q);
                queries += 1;
            }
        }
        self.finish(n, format!("random {:.3}", alpha), log)
    }

    /// Terminates the stream, checks the length bound, fills the expected
    /// replies from the reference structure and reports one info line.
    fn finish(&mut self, n: usize, label: String, log: &dyn ProgressLog) -> Stream<'_> {
        self.buf.ops.push(0);
        assert!(
            self.buf.ops.len() <= max_ops(n),
            "{} operations overflow the {} budget for n = {}",
            self.buf.ops.len(),
            max_ops(n),
            n
        );
        self.reference.init(n);
        for k in 0..self.buf.ops.len() {
            let op = self.buf.ops[k];
            let reply = if op > 0 {
                self.reference.successor(op as usize) as i64
            } else {
                if op < 0 {
                    self.reference.delete(-op as usize);
                }
                0
            };
            self.buf.expected.push(reply);
        }
        log.info(&format!("{}: n = {}, {} operations", label, n, self.buf.ops.len()));
        Stream {
            n,
            label,
            ops: &self.buf.ops,
            expected: &self.buf.expected,
        }
    }
}
