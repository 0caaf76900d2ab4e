//! Lexing a continuation line against the joined source of a REPL entry.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use fck_diagnostic::sink::SilentWarningSink;
use fck_ir::{Keyword, SourceFile, StringInterner, TokenKind};
use fck_lexer::{tokenize, tokenize_from};
use pretty_assertions::assert_eq;

#[test]
fn partial_line_then_continuation() {
    let interner = StringInterner::new();
    let first = SourceFile::new("<stdin>", "iterate 5 {");
    let mut pending = tokenize(&first, &interner, &SilentWarningSink).expect("lexes");
    assert_eq!(pending.bracket_depth(), 1);
    pending.strip_eof();

    let joined_text = format!("{}\n{}", first.text(), "print(1) }");
    let joined = SourceFile::new("<stdin>", joined_text);
    // Lexing resumes at the joining newline so it separates the two lines.
    let start = joined.position_at(first.text().len());
    let rest = tokenize_from(&joined, start, &interner, &SilentWarningSink).expect("lexes");
    pending.extend(rest);

    assert_eq!(pending.bracket_depth(), 0);
    let kinds: Vec<_> = pending.iter().map(|t| t.kind).collect();
    assert_eq!(kinds[0], TokenKind::Keyword(Keyword::Iterate));
    assert_eq!(kinds.last(), Some(&TokenKind::Eof));

    assert_eq!(kinds[3], TokenKind::Newline);

    let print = pending.get(4).expect("print token");
    assert_eq!(print.span.start.line, 1);
    assert_eq!(joined.snippet(print.span), "print");
}
