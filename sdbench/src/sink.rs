//! CSV result sink.
//!
//! One row per measurement, appended and flushed with the file closed
//! again immediately, so an interrupted run keeps every row it completed.

use std::fs;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("could not create the parent directory of `{path}`: {source}")]
    Create {
        path: String,
        source: std::io::Error,
    },
    #[error("could not append to `{path}`: {source}")]
    Append {
        path: String,
        source: std::io::Error,
    },
}

pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    /// Prepares the sink, creating the parent directory if needed. The
    /// file itself is only touched on the first append.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, SinkError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::DirBuilder::new()
                    .recursive(true)
                    .create(parent)
                    .map_err(|source| SinkError::Create {
                        path: path.display().to_string(),
                        source,
                    })?;
            }
        }
        Ok(Self { path })
    }

    /// Appends one result row: quoted name and label, n, seconds in
    /// scientific notation with 10 significant digits.
    pub fn append(&self, name: &str, label: &str, n: usize, secs: f64) -> Result<(), SinkError> {
        let wrap = |source| SinkError::Append {
            path: self.path.display().to_string(),
            source,
        };
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(wrap)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "\"{}\", \"{}\", {}, {:.9e}", name, label, n, secs).map_err(wrap)?;
        writer.flush().map_err(wrap)?;
        Ok(())
    }
}
