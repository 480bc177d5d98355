//! Error type for conditions outside the compiled program's control —
//! the CLI's own file handling, as opposed to diagnostics the pipeline
//! reports about the source it was given.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to read {path}: {source}")]
    ReadSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
