//! Command-line arguments.

use std::path::PathBuf;

use fck_diagnostic::emitter::ColorMode;

use crate::DriverError;

/// Exit status after a clean run.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit status after a reported fatal error.
pub const EXIT_FAILURE: i32 = 1;
/// Exit status for bad arguments and unreadable files.
pub const EXIT_USAGE: i32 = 2;

/// What the invocation asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Repl,
    RunFile(PathBuf),
    RunCode(String),
    Explain(String),
    Tokens(PathBuf),
    Ast(PathBuf),
    Help,
    Version,
}

/// Parsed command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cli {
    pub command: Command,
    pub color: ColorMode,
    /// Mute warnings.
    pub quiet: bool,
}

impl Cli {
    /// Parse the arguments after the program name.
    pub fn parse<I>(args: I) -> Result<Cli, DriverError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        let mut command = None;
        let mut color = ColorMode::Auto;
        let mut quiet = false;

        while let Some(arg) = args.next() {
            let next = match arg.as_str() {
                "--no-color" => {
                    color = ColorMode::Never;
                    continue;
                }
                "--quiet" | "-q" => {
                    quiet = true;
                    continue;
                }
                "-h" | "--help" => Command::Help,
                "-V" | "--version" => Command::Version,
                "-f" => Command::RunFile(value_for(&mut args, &arg, "a file path")?.into()),
                "-c" => Command::RunCode(value_for(&mut args, &arg, "code to run")?),
                "--explain" | "-e" | "-w" => {
                    Command::Explain(value_for(&mut args, &arg, "an error or warning code")?)
                }
                "--tokens" => Command::Tokens(value_for(&mut args, &arg, "a file path")?.into()),
                "--ast" => Command::Ast(value_for(&mut args, &arg, "a file path")?.into()),
                flag if flag.starts_with('-') && flag.len() > 1 => {
                    return Err(DriverError::Usage(format!("unknown option '{flag}'")));
                }
                _ => Command::RunFile(PathBuf::from(arg)),
            };
            if let Some(previous) = &command {
                // Help and version win over anything else on the line.
                if matches!(previous, Command::Help | Command::Version) {
                    continue;
                }
                if !matches!(next, Command::Help | Command::Version) {
                    return Err(DriverError::Usage(
                        "only one of a file, -c, --explain, --tokens or --ast may be given"
                            .to_string(),
                    ));
                }
            }
            command = Some(next);
        }

        Ok(Cli {
            command: command.unwrap_or(Command::Repl),
            color,
            quiet,
        })
    }
}

fn value_for(
    args: &mut impl Iterator<Item = String>,
    flag: &str,
    what: &str,
) -> Result<String, DriverError> {
    args.next()
        .ok_or_else(|| DriverError::Usage(format!("expected {what} after '{flag}'")))
}

pub fn usage() -> String {
    format!(
        "\
fck {version}

Usage: fck [options] [file]

With no file, starts an interactive session.

Options:
  -f <file>           Run a script file
  -c <code>           Run the given code
  -e, -w, --explain <code>
                      Explain an error or warning code (e.g. E022, w001)
  --tokens <file>     Print the token stream of a file
  --ast <file>        Print a summary of the parsed file
  --no-color          Never color diagnostics
  -q, --quiet         Do not show warnings
  -h, --help          Show this help
  -V, --version       Show version information

Environment:
  FCK_LOG             Tracing filter, e.g. 'fck_eval=debug' (falls back to RUST_LOG)
  FCK_LOG_TREE=1      Show tracing output as an indented tree",
        version = env!("CARGO_PKG_VERSION")
    )
}
