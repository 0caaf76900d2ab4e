//! Interactive read-eval-print loop.
//!
//! Each line goes through `Session::run`. A line with unclosed brackets is
//! held back and the prompt switches to `... ` until the brackets balance;
//! only then does the whole entry run, once.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::cli::EXIT_SUCCESS;
use crate::commands::run::echo_value;
use crate::{DriverError, PendingInput, Session};

pub const PROMPT: &str = ">>> ";
pub const CONTINUATION_PROMPT: &str = "... ";

/// Run the loop until `quit()` or the end of `input`.
///
/// Prompts go to `prompt_out`; program output and echoed values go through
/// the session's print handler. Returns the exit status.
pub fn run_repl(
    session: &mut Session,
    mut input: impl BufRead,
    mut prompt_out: impl Write,
) -> Result<i32, DriverError> {
    let source_name = session.config().source_name.clone();
    let mut pending: Option<PendingInput> = None;
    let mut line = String::new();

    loop {
        let prompt = if pending.is_some() {
            CONTINUATION_PROMPT
        } else {
            PROMPT
        };
        prompt_out.write_all(prompt.as_bytes())?;
        prompt_out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            // End of input; a half-typed entry is dropped.
            if pending.is_some() {
                debug!("discarding unfinished entry");
            }
            prompt_out.write_all(b"\n")?;
            return Ok(EXIT_SUCCESS);
        }
        let text = line.trim_end_matches(['\n', '\r']);

        let result = session.run(&source_name, text, pending.take());
        if result.is_partial {
            pending = result.pending;
            continue;
        }
        if let Some(code) = result.exit {
            return Ok(code);
        }
        match &result.error {
            Some(error) => session.report(error),
            None => echo_value(session, &result),
        }
    }
}

#[cfg(test)]
mod tests;
