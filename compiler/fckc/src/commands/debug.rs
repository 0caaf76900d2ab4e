//! Debug aids: `--tokens` and `--ast` for inspecting the front end.

use std::fmt::Write as _;
use std::path::Path;
use std::rc::Rc;

use fck_diagnostic::sink::SilentWarningSink;
use fck_diagnostic::Diagnostic;
use fck_ir::{ExprKind, SourceFile, StringInterner, TokenKind};

use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS};
use crate::{DriverError, Session};

use super::read_file;

/// Print the token stream of a file.
pub fn token_listing(session: &Session, path: &Path) -> Result<i32, DriverError> {
    let source = Rc::new(SourceFile::new(path.display().to_string(), read_file(path)?));
    Ok(report(session, list_tokens(&source, session.interpreter().interner())))
}

/// Print the statement count and root span of a parsed file.
pub fn ast_summary(session: &Session, path: &Path) -> Result<i32, DriverError> {
    let source = Rc::new(SourceFile::new(path.display().to_string(), read_file(path)?));
    Ok(report(session, summarize(&source, session.interpreter().interner())))
}

fn report(session: &Session, listing: Result<String, Diagnostic>) -> i32 {
    match listing {
        Ok(text) => {
            print!("{text}");
            EXIT_SUCCESS
        }
        Err(error) => {
            session.report(&error);
            EXIT_FAILURE
        }
    }
}

fn list_tokens(source: &Rc<SourceFile>, interner: &StringInterner) -> Result<String, Diagnostic> {
    let tokens = fck_lexer::tokenize(source, interner, &SilentWarningSink)
        .map_err(|error| error.with_source(source))?;

    let mut out = format!("Tokens for '{}' ({} tokens):\n", source.name(), tokens.len());
    for token in tokens.iter() {
        let _ = match token.kind {
            TokenKind::Ident(name) => {
                writeln!(out, "  Ident({}) @ {:?}", interner.lookup(name), token.span)
            }
            TokenKind::Str(name) => {
                writeln!(out, "  Str({:?}) @ {:?}", interner.lookup(name), token.span)
            }
            _ => writeln!(out, "  {token:?}"),
        };
    }
    Ok(out)
}

fn summarize(source: &Rc<SourceFile>, interner: &StringInterner) -> Result<String, Diagnostic> {
    let tokens = fck_lexer::tokenize(source, interner, &SilentWarningSink)
        .map_err(|error| error.with_source(source))?;
    let parsed = fck_parse::parse(&tokens, interner);
    if let Some(error) = parsed.error {
        return Err(error.with_source(source));
    }

    let root = parsed.arena.get_expr(parsed.root);
    let statements = match root.kind {
        ExprKind::Block(range) => parsed.arena.get_expr_list(range).len(),
        _ => 1,
    };
    let mut out = format!("Parse result for '{}':\n", source.name());
    let _ = writeln!(out, "  Statements: {statements}");
    let _ = writeln!(out, "  Expressions: {}", parsed.arena.expr_count());
    let _ = writeln!(out, "  Root span: {:?} (from {})", root.span, root.span);
    let _ = writeln!(out, "  Warnings: {}", parsed.warnings.len());
    Ok(out)
}
