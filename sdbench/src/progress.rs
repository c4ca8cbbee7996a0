//! Progress reporting for the benchmark run.
//!
//! One `MultiProgress` arena owns every bar; log lines go through the
//! bar's `println` so they scroll above it instead of tearing it. The
//! arena only draws while some thread is joined on it, so the driver
//! parks a thread on `join` for the whole run.

use std::sync::Arc;

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

use loadgen::ProgressLog;

#[derive(Clone)]
pub struct Progress {
    mp: Arc<MultiProgress>,
}

/// The single bar tracking measurement rows.
#[derive(Clone)]
pub struct RunBar {
    pb: ProgressBar,
}

impl Progress {
    pub fn new() -> Self {
        Self {
            mp: Arc::new(MultiProgress::with_draw_target(ProgressDrawTarget::stdout())),
        }
    }

    pub fn new_run_bar(&self, len: u64) -> RunBar {
        let pb = self.mp.add(ProgressBar::new(len));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:60.cyan/blue} {pos:>5}/{len:5} {msg}")
                .progress_chars("#>-"),
        );
        RunBar { pb }
    }

    /// Blocks until every bar is finished; run this on its own thread.
    pub fn join(&self) {
        self.mp.join().unwrap();
    }
}

impl RunBar {
    pub fn inc(&self, delta: u64) {
        self.pb.inc(delta);
    }

    pub fn set_message(&self, msg: &str) {
        self.pb.set_message(msg);
    }

    pub fn finish_with_message(&self, msg: &str) {
        self.pb.finish_with_message(msg);
    }

    /// Prints a log line above the bar.
    pub fn println(&self, msg: &str) {
        self.pb.println(msg);
    }
}

impl ProgressLog for RunBar {
    fn info(&self, msg: &str) {
        self.pb.println(msg);
    }
}
