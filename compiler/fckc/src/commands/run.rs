//! Running a script file or a `-c` code string.

use std::path::Path;

use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS};
use crate::{DriverError, RunResult, Session};

use super::read_file;

/// Run a script file to completion.
pub fn run_file(session: &mut Session, path: &Path) -> Result<i32, DriverError> {
    let text = read_file(path)?;
    let result = session.run_complete(&path.display().to_string(), &text);
    Ok(finish(session, &result, false))
}

/// Run a code string, echoing its value the way the REPL does.
pub fn run_code(session: &mut Session, code: &str) -> i32 {
    let name = session.config().source_name.clone();
    let result = session.run_complete(&name, code);
    finish(session, &result, true)
}

/// Report the outcome and pick the exit status.
fn finish(session: &Session, result: &RunResult, echo: bool) -> i32 {
    if let Some(code) = result.exit {
        return code;
    }
    if let Some(error) = &result.error {
        session.report(error);
        return EXIT_FAILURE;
    }
    if echo {
        echo_value(session, result);
    }
    EXIT_SUCCESS
}

/// Show a non-null result in its debug form.
pub(crate) fn echo_value(session: &Session, result: &RunResult) {
    if let Some(value) = result.value.as_ref().filter(|v| !matches!(v, fck_eval::Value::Null)) {
        session.interpreter().print_handler().println(&value.to_string());
    }
}
