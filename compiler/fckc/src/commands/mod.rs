//! Command handlers for the `fck` binary.
//!
//! Each submodule implements one mode of the command line. Handlers return
//! the process exit status; host-level failures come back as `DriverError`
//! and `main` turns them into exit status 2.

use std::path::Path;

use crate::DriverError;

mod debug;
mod explain;
pub(crate) mod run;

pub use debug::{ast_summary, token_listing};
pub use explain::explain;
pub use run::{run_code, run_file};

/// Read a script, mapping failures to a `DriverError` naming the path.
pub(crate) fn read_file(path: &Path) -> Result<String, DriverError> {
    std::fs::read_to_string(path).map_err(|source| DriverError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}
