//! Word-parallel micro-sets over a macro successor structure.
//!
//! One liveness bit per element, packed into 64-bit words. Queries inside
//! a word are answered by masking and a hardware count-trailing-zeros;
//! only when the rest of the home word is dead does the composite ask the
//! macro structure -- instantiated over the *bucket* domain -- for the
//! next live word. A bucket is live in the macro structure exactly while
//! its word is non-zero.
//!
//! The words holding the sentinels 0 and n+1 can never go dead, so the
//! first and last buckets serve as the macro structure's own sentinels and
//! the macro universe is `buckets - 2`.

use crate::SuccessorDelete;

/// Bits per packed word.
pub const WORD_BITS: usize = 64;

/// Number of words covering the universe {0, ..., n+1}.
#[inline]
pub fn words_for(n: usize) -> usize {
    (n + 2 + WORD_BITS - 1) / WORD_BITS
}

/// Macro-universe size matching an element capacity of `cap`.
#[inline]
pub fn macro_capacity(cap: usize) -> usize {
    words_for(cap).saturating_sub(2)
}

/// Bit-packed composite. Construct with the macro structure instance it
/// should delegate cross-word queries to; only that one binding is active
/// for the composite's lifetime.
pub struct MicroSet<M> {
    words: Vec<u64>,
    in_use: usize,
    macro_set: M,
    name: &'static str,
}

impl<M: SuccessorDelete> MicroSet<M> {
    /// Allocates words for universes up to `cap`; `macro_set` must itself
    /// have capacity for at least `macro_capacity(cap)`.
    pub fn new(cap: usize, macro_set: M, name: &'static str) -> Self {
        Self {
            words: vec![0; words_for(cap)],
            in_use: 0,
            macro_set,
            name,
        }
    }
}

impl<M: SuccessorDelete> SuccessorDelete for MicroSet<M> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn init(&mut self, n: usize) {
        let words = words_for(n);
        assert!(
            words <= self.words.len(),
            "universe {} exceeds allocated capacity",
            n
        );
        for w in self.words.iter_mut().take(words) {
            *w = !0u64;
        }
        self.in_use = words;
        self.macro_set.init(words.saturating_sub(2));
    }

    #[inline]
    fn delete(&mut self, i: usize) {
        let b = i / WORD_BITS;
        self.words[b] &= !(1u64 << (i % WORD_BITS));
        if self.words[b] == 0 {
            self.macro_set.delete(b);
        }
    }

    #[inline]
    fn successor(&mut self, i: usize) -> usize {
        let b = i / WORD_BITS;
        let masked = self.words[b] & (!0u64 << (i % WORD_BITS));
        if masked != 0 {
            return b * WORD_BITS + masked.trailing_zeros() as usize;
        }
        // the home word is dead above i; the macro structure names the
        // next live word without scanning the gap
        let b2 = self.macro_set.successor(b + 1);
        debug_assert_ne!(self.words[b2], 0);
        b2 * WORD_BITS + self.words[b2].trailing_zeros() as usize
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parent::TwoPass;
    use crate::quickfind::QuickFind;
    use crate::unionfind::UnionFind;

    fn micro_qf(cap: usize) -> MicroSet<QuickFind> {
        MicroSet::new(cap, QuickFind::new(macro_capacity(cap)), "micro quick-find")
    }

    #[test]
    fn fresh_set_answers_identity() {
        let mut ms = micro_qf(130);
        ms.init(130);
        for &i in &[0, 1, 63, 64, 65, 128, 131] {
            assert_eq!(ms.successor(i), i);
        }
    }

    #[test]
    fn query_jumps_a_dead_word_through_the_macro_layer() {
        let mut ms = micro_qf(130);
        ms.init(130);
        // kill every deletable bit of word 0; bit 0 is the sentinel and
        // stays, so the word itself remains live
        for i in 1..64 {
            ms.delete(i);
        }
        assert_eq!(ms.successor(0), 0);
        assert_eq!(ms.successor(1), 64);
        assert_eq!(ms.successor(63), 64);
        // now kill all of word 1; the macro structure must route the query
        // to word 2
        for i in 64..128 {
            ms.delete(i);
        }
        assert_eq!(ms.successor(1), 128);
        assert_eq!(ms.successor(64), 128);
        assert_eq!(ms.successor(127), 128);
        assert_eq!(ms.successor(128), 128);
    }

    #[test]
    fn word_boundaries_are_exact() {
        let mut ms = micro_qf(200);
        ms.init(200);
        ms.delete(64);
        assert_eq!(ms.successor(64), 65);
        ms.delete(63);
        assert_eq!(ms.successor(63), 65);
        for i in 65..128 {
            ms.delete(i);
        }
        assert_eq!(ms.successor(63), 128);
        assert_eq!(ms.successor(62), 62);
    }

    #[test]
    fn all_three_bindings_agree() {
        let n = 190;
        let mut qf = micro_qf(n);
        let mut uf = MicroSet::new(n, UnionFind::new(macro_capacity(n)), "micro union-find");
        let mut tp = MicroSet::new(n, TwoPass::new(macro_capacity(n)), "micro 2-pass");
        qf.init(n);
        uf.init(n);
        tp.init(n);
        let deletes: Vec<usize> = (1..=n).filter(|i| i % 3 != 0 || *i < 100).collect();
        for &i in &deletes {
            qf.delete(i);
            uf.delete(i);
            tp.delete(i);
        }
        for q in 0..=n + 1 {
            let want = qf.successor(q);
            assert_eq!(uf.successor(q), want, "union-find binding at {}", q);
            assert_eq!(tp.successor(q), want, "2-pass binding at {}", q);
        }
    }

    #[test]
    fn repeat_delete_leaves_the_set_unchanged() {
        let mut ms = micro_qf(130);
        ms.init(130);
        for i in 1..64 {
            ms.delete(i);
        }
        ms.delete(40);
        assert_eq!(ms.successor(1), 64);
        for i in 64..128 {
            ms.delete(i);
        }
        // word 1 is fully dead; deleting inside it again must stay sound
        ms.delete(70);
        assert_eq!(ms.successor(1), 128);
    }
}
