//! Lexer for fck.
//!
//! Turns source text into a `TokenList` ending in `Eof`. Identifiers and
//! string literals are interned; keywords are resolved here so the parser
//! only ever matches on `TokenKind`.
//!
//! Lexing is all-or-nothing for errors: an illegal character or malformed
//! operator aborts with a `Diagnostic` and no tokens. Warnings (an
//! unterminated string, an unknown pragma) go to the caller's
//! `WarningSink` and lexing carries on.

mod cursor;
mod scanner;

use fck_diagnostic::{Diagnostic, WarningSink};
use fck_ir::{Position, SourceFile, StringInterner, Token, TokenKind, TokenList};
use tracing::debug;

use cursor::Cursor;
use scanner::Scanner;

/// A `#!name` pragma recognised in the source.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GlobalOption {
    /// `#!log` (`true`) or `#!nolog` (`false`): show or mute warnings.
    Log(bool),
}

/// Tokens plus the pragmas seen while producing them, in source order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LexOutput {
    pub tokens: TokenList,
    pub options: Vec<GlobalOption>,
}

/// Lex a whole source file.
pub fn tokenize(
    source: &SourceFile,
    interner: &StringInterner,
    sink: &dyn WarningSink,
) -> Result<TokenList, Diagnostic> {
    lex(source, Position::START, interner, sink).map(|output| output.tokens)
}

/// Lex `source` starting at `start`.
///
/// Used when a REPL line continues earlier input: the source holds the joined
/// text so spans and line numbers stay true, and only the new part is
/// scanned.
pub fn tokenize_from(
    source: &SourceFile,
    start: Position,
    interner: &StringInterner,
    sink: &dyn WarningSink,
) -> Result<TokenList, Diagnostic> {
    lex(source, start, interner, sink).map(|output| output.tokens)
}

/// Lex from `start` and also report the pragmas found.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(source = source.name(), start = start.offset)
)]
pub fn lex(
    source: &SourceFile,
    start: Position,
    interner: &StringInterner,
    sink: &dyn WarningSink,
) -> Result<LexOutput, Diagnostic> {
    let text = source.text();
    let mut scanner = Scanner::new(Cursor::new(text, start), interner, sink);
    let remaining = text.len().saturating_sub(start.offset as usize);
    let mut tokens = TokenList::with_capacity(remaining / 2 + 1);

    loop {
        let (kind, span) = scanner.next_token()?;
        tokens.push(Token::new(kind, span));
        if kind == TokenKind::Eof {
            break;
        }
    }

    debug!(tokens = tokens.len(), options = scanner.options.len(), "lexed");
    Ok(LexOutput {
        tokens,
        options: scanner.options,
    })
}
