//! Workload generation, validation and timing for the successor-delete
//! structures.
//!
//! A workload is a flat, 0-terminated stream of signed operations
//! (positive = query, negative = delete) together with the reply every
//! query is expected to produce. The generator builds three stream
//! families -- a drain-then-hammer scan, an adversarial family steered by
//! the height forest's deepest node, and a random-delete family -- and
//! fills the expected replies by replaying the stream on the 2-pass array
//! reference. The validator replays candidates against those replies; the
//! timer measures best-of-k adaptive wall-clock per whole-stream replay.

pub mod families;
pub mod stream;
pub mod timing;
pub mod validate;

pub use families::{Generator, ProgressLog};
pub use stream::{max_ops, replay, Stream, StreamBuf};
pub use timing::{measure, Measurement, BEST_OF, MIN_REPEATS, MIN_TEST_TIME};
pub use validate::{validate, MismatchError};
