//! Host-level failures: the ones that happen around a program rather than
//! inside it.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("cannot read '{}': {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read input: {0}")]
    Input(#[from] io::Error),

    #[error("{0}")]
    Usage(String),
}
