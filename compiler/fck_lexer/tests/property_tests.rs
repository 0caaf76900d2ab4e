//! Property-based tests for the fck lexer.
//!
//! 1. Single-character tokens: one token per non-whitespace character, plus Eof
//! 2. Operator disambiguation holds wherever the operator appears
//! 3. Identifiers and integers survive lexing with their text and value

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::uninlined_format_args,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use fck_diagnostic::sink::SilentWarningSink;
use fck_ir::{Keyword, SourceFile, StringInterner, TokenKind};
use fck_lexer::tokenize;
use proptest::prelude::*;

/// Characters that always lex to exactly one token on their own, whatever
/// their neighbours from the same set are.
const SINGLES: &[char] = &[
    '+', '-', '%', '(', ')', '{', '}', '[', ']', ',', '?', '@', '.', '<', '>', '!', ';', '\n',
];

fn lex_kinds(text: &str, interner: &StringInterner) -> Vec<TokenKind> {
    let source = SourceFile::new("<prop>", text);
    tokenize(&source, interner, &SilentWarningSink)
        .expect("input should lex")
        .iter()
        .map(|t| t.kind)
        .collect()
}

fn singles_strategy() -> impl Strategy<Value = String> {
    let ch = prop_oneof![
        3 => prop::sample::select(SINGLES.to_vec()),
        1 => prop::sample::select(vec![' ', '\t']),
    ];
    prop::collection::vec(ch, 0..64).prop_map(|chars| chars.into_iter().collect())
}

fn identifier_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_]{0,15}")
        .expect("valid regex")
        .prop_filter("not a keyword", |s| Keyword::from_ident(s).is_none())
}

proptest! {
    #[test]
    fn one_token_per_single_char(text in singles_strategy()) {
        let interner = StringInterner::new();
        let kinds = lex_kinds(&text, &interner);
        let visible = text.chars().filter(|c| !matches!(c, ' ' | '\t')).count();
        prop_assert_eq!(kinds.len(), visible + 1);
        prop_assert_eq!(kinds.last(), Some(&TokenKind::Eof));
        prop_assert_eq!(kinds.iter().filter(|k| **k == TokenKind::Eof).count(), 1);
    }

    #[test]
    fn bang_disambiguation(name in identifier_strategy()) {
        let interner = StringInterner::new();
        let not_eq = lex_kinds(&format!("{name} != 1"), &interner);
        prop_assert_eq!(not_eq[1], TokenKind::NotEq);
        let not = lex_kinds(&format!("!{name}"), &interner);
        prop_assert_eq!(not[0], TokenKind::Not);
        prop_assert_eq!(not.len(), 3);
    }

    #[test]
    fn star_disambiguation(a in 0u32..1000, b in 0u32..1000) {
        let interner = StringInterner::new();
        let mul = lex_kinds(&format!("{a}*{b}"), &interner);
        prop_assert_eq!(mul[1], TokenKind::Star);
        let pow = lex_kinds(&format!("{a}**{b}"), &interner);
        prop_assert_eq!(pow[1], TokenKind::StarStar);
        prop_assert_eq!(pow.len(), 4);
    }

    #[test]
    fn identifiers_keep_their_text(name in identifier_strategy()) {
        let interner = StringInterner::new();
        let kinds = lex_kinds(&name, &interner);
        match kinds[0] {
            TokenKind::Ident(n) => prop_assert_eq!(interner.lookup(n), name.as_str()),
            other => prop_assert!(false, "expected identifier, got {:?}", other),
        }
    }

    #[test]
    fn integers_keep_their_value(n in 0i64..=i64::MAX) {
        let interner = StringInterner::new();
        let kinds = lex_kinds(&n.to_string(), &interner);
        prop_assert_eq!(kinds, vec![TokenKind::Int(n), TokenKind::Eof]);
    }
}

#[test]
fn every_keyword_is_recognised() {
    let interner = StringInterner::new();
    for kw in Keyword::ALL {
        let kinds = lex_kinds(kw.as_str(), &interner);
        assert_eq!(kinds[0], TokenKind::Keyword(kw));
    }
}
