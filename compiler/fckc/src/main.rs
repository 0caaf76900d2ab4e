//! The `fck` command line.

use std::io;

use fckc::cli::{usage, Cli, Command, EXIT_SUCCESS, EXIT_USAGE};
use fckc::commands::{ast_summary, explain, run_code, run_file, token_listing};
use fckc::repl::run_repl;
use fckc::tracing_setup::init_tracing;
use fckc::{builtins, DriverError, Session};

fn main() {
    init_tracing();

    let cli = match Cli::parse(std::env::args().skip(1)) {
        Ok(cli) => cli,
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!("Run 'fck --help' for usage.");
            std::process::exit(EXIT_USAGE);
        }
    };

    match execute(&cli) {
        Ok(code) => std::process::exit(code),
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(EXIT_USAGE);
        }
    }
}

fn execute(cli: &Cli) -> Result<i32, DriverError> {
    match &cli.command {
        Command::Help => {
            println!("{}", usage());
            return Ok(EXIT_SUCCESS);
        }
        Command::Version => {
            println!("fck {}", env!("CARGO_PKG_VERSION"));
            return Ok(EXIT_SUCCESS);
        }
        Command::Explain(code) => {
            println!("{}", explain(code)?);
            return Ok(EXIT_SUCCESS);
        }
        _ => {}
    }

    let mut session = Session::builder()
        .source_name(match cli.command {
            Command::RunCode(_) => "<string>",
            _ => "<stdin>",
        })
        .color(cli.color)
        .log(!cli.quiet)
        .build()
        .with_std_builtins();
    builtins::install_quit(&mut session);

    match &cli.command {
        Command::RunFile(path) => run_file(&mut session, path),
        Command::RunCode(code) => Ok(run_code(&mut session, code)),
        Command::Tokens(path) => token_listing(&session, path),
        Command::Ast(path) => ast_summary(&session, path),
        Command::Repl => run_repl(&mut session, io::stdin().lock(), io::stdout()),
        Command::Help | Command::Version | Command::Explain(_) => Ok(EXIT_SUCCESS),
    }
}
