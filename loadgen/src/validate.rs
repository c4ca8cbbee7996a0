//! Replay check of a candidate against the expected replies.
//!
//! Runs before any timing so that only known-correct code gets measured.

use thiserror::Error;

use succ::SuccessorDelete;

use crate::stream::Stream;

/// A candidate disagreed with the reference.
#[derive(Debug, Error)]
#[error(
    "`{name}` diverged on `{label}` (n = {n}) at op {index}: successor({arg}) = {got}, want {want}"
)]
pub struct MismatchError {
    pub name: &'static str,
    pub label: String,
    pub n: usize,
    pub index: usize,
    pub arg: usize,
    pub got: i64,
    pub want: i64,
}

/// Replays the stream on a fresh init of `s` and compares every query
/// reply elementwise against the expected array.
pub fn validate<S: SuccessorDelete>(s: &mut S, stream: &Stream<'_>) -> Result<(), MismatchError> {
    s.init(stream.n);
    for (index, &op) in stream.ops.iter().enumerate() {
        if op > 0 {
            let arg = op as usize;
            let got = s.successor(arg) as i64;
            let want = stream.expected[index];
            if got != want {
                return Err(MismatchError {
                    name: s.name(),
                    label: stream.label.clone(),
                    n: stream.n,
                    index,
                    arg,
                    got,
                    want,
                });
            }
        } else if op < 0 {
            s.delete(-op as usize);
        } else {
            break;
        }
    }
    Ok(())
}
