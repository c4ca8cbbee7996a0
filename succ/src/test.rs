use super::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Drives a 0-terminated op script (positive = query, negative = delete)
/// and collects one reply per entry: the successor for queries, 0
/// otherwise.
fn drive(s: &mut Structure, n: usize, script: &[i64]) -> Vec<i64> {
    s.init(n);
    let mut out = Vec::with_capacity(script.len());
    for &op in script {
        if op > 0 {
            out.push(s.successor(op as usize) as i64);
        } else {
            if op < 0 {
                s.delete(-op as usize);
            }
            out.push(0);
        }
    }
    out
}

/// Ground truth: a plain boolean set scanned linearly.
struct BoolSet {
    live: Vec<bool>,
}

impl BoolSet {
    fn new(n: usize) -> Self {
        Self {
            live: vec![true; n + 2],
        }
    }
    fn delete(&mut self, i: usize) {
        self.live[i] = false;
    }
    fn successor(&self, i: usize) -> usize {
        (i..self.live.len()).find(|&j| self.live[j]).unwrap()
    }
}

#[test]
fn drain_then_query_everything_lands_on_the_sentinel() {
    let script = [-1, -2, -3, -4, 1, 1, 1, 1, 0];
    let want = [0, 0, 0, 0, 5, 5, 5, 5, 0];
    for s in Structure::all(4).iter_mut() {
        assert_eq!(drive(s, 4, &script), want, "structure `{}`", s.name());
    }
}

#[test]
fn interleaved_deletes_and_queries() {
    let script = [1, -1, 1, -2, 2, 0];
    let want = [1, 0, 2, 0, 3, 0];
    for s in Structure::all(4).iter_mut() {
        assert_eq!(drive(s, 4, &script), want, "structure `{}`", s.name());
    }
}

#[test]
fn single_hole_is_routed_around() {
    let script = [-2, 1, 2, 3, 0];
    let want = [0, 1, 3, 3, 0];
    for s in Structure::all(4).iter_mut() {
        assert_eq!(drive(s, 4, &script), want, "structure `{}`", s.name());
    }
}

#[test]
fn fresh_init_answers_identity_everywhere() {
    let n = 130;
    for s in Structure::all(n).iter_mut() {
        s.init(n);
        for i in 0..=n + 1 {
            assert_eq!(s.successor(i), i, "structure `{}` at {}", s.name(), i);
        }
    }
}

#[test]
fn replies_are_live_bounded_fixpoints() {
    let n = 130;
    let mut rng = StdRng::seed_from_u64(7);
    let mut truth = BoolSet::new(n);
    let mut roster = Structure::all(n);
    for s in roster.iter_mut() {
        s.init(n);
    }
    for _ in 0..300 {
        let i = rng.gen_range(1..=n);
        if rng.gen_bool(0.5) {
            truth.delete(i);
            for s in roster.iter_mut() {
                s.delete(i);
            }
        } else {
            let want = truth.successor(i);
            for s in roster.iter_mut() {
                let got = s.successor(i);
                assert_eq!(got, want, "structure `{}` queried at {}", s.name(), i);
                assert!(got >= i && got <= n + 1);
                // a reply is live, so querying it is a fixpoint
                assert_eq!(s.successor(got), got, "structure `{}`", s.name());
            }
        }
    }
}

#[test]
fn duplicate_deletes_are_harmless_for_every_candidate() {
    let n = 80;
    let mut rng = StdRng::seed_from_u64(99);
    let mut truth = BoolSet::new(n);
    let mut roster = Structure::all(n);
    for s in roster.iter_mut() {
        s.init(n);
    }
    // draw deletions with replacement so repeats are certain, and
    // interleave queries that compress paths between the repeats
    for _ in 0..400 {
        let i = rng.gen_range(1..n);
        truth.delete(i);
        for s in roster.iter_mut() {
            s.delete(i);
        }
        let q = rng.gen_range(0..=n + 1);
        let want = truth.successor(q);
        for s in roster.iter_mut() {
            assert_eq!(s.successor(q), want, "structure `{}` at {}", s.name(), q);
        }
    }
}

#[test]
fn reinit_resets_previous_state() {
    let n = 40;
    for s in Structure::all(n).iter_mut() {
        s.init(n);
        for i in 1..=n {
            s.delete(i);
        }
        assert_eq!(s.successor(1), n + 1, "structure `{}`", s.name());
        // a smaller re-init must wipe every trace of the old run
        s.init(10);
        for i in 0..=11 {
            assert_eq!(s.successor(i), i, "structure `{}` after re-init", s.name());
        }
    }
}

#[test]
fn adjacent_live_elements_bound_each_other() {
    let n = 30;
    for s in Structure::all(n).iter_mut() {
        s.init(n);
        for &i in &[2, 3, 7, 8, 9, 10, 25] {
            s.delete(i);
        }
        // between a query point and the next live element there is
        // nothing for successor to skip to
        let live = [0, 1, 4, 5, 6, 11, 12, 24, 26, 31];
        for w in live.windows(2) {
            let (a, b) = (w[0], w[1]);
            for q in a..=b {
                let r = s.successor(q);
                assert!(
                    r == a || r == b || (r > a && r < b && r == q),
                    "structure `{}`: successor({}) = {}",
                    s.name(),
                    q,
                    r
                );
                assert!(r >= q && r <= b, "structure `{}` overshot {}", s.name(), q);
            }
        }
    }
}
