//! Hand-written scanner.
//!
//! `next_token` dispatches on the current character to one focused method per
//! token family. Each method consumes its characters and returns the token
//! kind, or `None` for trivia (whitespace, comments, pragmas). Fatal faults
//! come back as `Err`; warnings go straight to the sink and scanning
//! continues.

use fck_diagnostic::{Diagnostic, ErrorKind, WarningKind, WarningSink};
use fck_ir::{AssignOp, Keyword, Position, Span, StringInterner, TokenKind};
use tracing::trace;

use crate::cursor::Cursor;
use crate::GlobalOption;

pub(crate) struct Scanner<'a> {
    cursor: Cursor<'a>,
    interner: &'a StringInterner,
    sink: &'a dyn WarningSink,
    /// Kind of the last token produced, for the `.5` versus `a.len` split.
    prev: Option<TokenKind>,
    pub(crate) options: Vec<GlobalOption>,
}

type ScanResult = Result<Option<TokenKind>, Diagnostic>;

impl<'a> Scanner<'a> {
    pub(crate) fn new(
        cursor: Cursor<'a>,
        interner: &'a StringInterner,
        sink: &'a dyn WarningSink,
    ) -> Self {
        Scanner {
            cursor,
            interner,
            sink,
            prev: None,
            options: Vec::new(),
        }
    }

    /// Produce the next token, skipping trivia. Returns `Eof` once the input
    /// is exhausted, and keeps returning it.
    pub(crate) fn next_token(&mut self) -> Result<(TokenKind, Span), Diagnostic> {
        loop {
            let start = self.cursor.position();
            if self.cursor.is_eof() {
                return Ok((TokenKind::Eof, Span::point(start)));
            }
            let scanned = match self.cursor.current() {
                ' ' | '\t' | '\r' => self.whitespace(),
                '\n' | ';' => self.single(TokenKind::Newline),
                'a'..='z' | 'A'..='Z' | '_' => Ok(Some(self.identifier(start))),
                '0'..='9' => self.number(start),
                '.' => self.dot(start),
                '"' | '\'' => Ok(Some(self.string(start))),
                '#' => self.hash(start),
                '!' => Ok(Some(self.bang())),
                '=' => self.equal(start),
                '<' => Ok(Some(self.pair('=', TokenKind::Lt, TokenKind::LtEq))),
                '>' => Ok(Some(self.pair('=', TokenKind::Gt, TokenKind::GtEq))),
                '*' => Ok(Some(self.pair('*', TokenKind::Star, TokenKind::StarStar))),
                '/' => Ok(Some(self.pair('/', TokenKind::Slash, TokenKind::SlashSlash))),
                ':' => self.colon(start),
                '+' => self.single(TokenKind::Plus),
                '-' => self.single(TokenKind::Minus),
                '%' => self.single(TokenKind::Percent),
                '?' => self.single(TokenKind::Question),
                ',' => self.single(TokenKind::Comma),
                '@' => self.single(TokenKind::At),
                '(' => self.single(TokenKind::LParen),
                ')' => self.single(TokenKind::RParen),
                '{' => self.single(TokenKind::LBrace),
                '}' => self.single(TokenKind::RBrace),
                '[' => self.single(TokenKind::LBracket),
                ']' => self.single(TokenKind::RBracket),
                other => Err(self.illegal_char(start, other)),
            }?;
            if let Some(kind) = scanned {
                self.prev = Some(kind);
                return Ok((kind, Span::new(start, self.cursor.position())));
            }
        }
    }

    // ─── Trivia ───

    fn whitespace(&mut self) -> ScanResult {
        self.cursor.eat_while(|c| matches!(c, ' ' | '\t' | '\r'));
        Ok(None)
    }

    /// `##` line comment, `#!name` pragma, or `#...#` block comment.
    fn hash(&mut self, start: Position) -> ScanResult {
        self.cursor.advance();
        match self.cursor.current() {
            '#' => self.cursor.eat_while(|c| c != '\n'),
            '!' => {
                self.cursor.advance();
                self.pragma(start);
            }
            _ => {
                self.cursor.eat_while(|c| c != '#');
                self.cursor.eat('#');
            }
        }
        Ok(None)
    }

    fn pragma(&mut self, start: Position) {
        let name_start = self.cursor.position();
        self.cursor.eat_while(is_ident_continue);
        let name = self.cursor.slice_from(name_start);
        let span = Span::new(start, self.cursor.position());
        self.cursor.eat_while(|c| c != '\n');

        trace!(pragma = name, "global option");
        match name {
            "log" => self.options.push(GlobalOption::Log(true)),
            "nolog" => self.options.push(GlobalOption::Log(false)),
            _ => self
                .sink
                .warn(Diagnostic::warning(WarningKind::UnknownGlobalOpt, span).with_arg(name)),
        }
    }

    // ─── Literals ───

    fn identifier(&mut self, start: Position) -> TokenKind {
        self.cursor.eat_while(is_ident_continue);
        let text = self.cursor.slice_from(start);
        match Keyword::from_ident(text) {
            Some(kw) => TokenKind::Keyword(kw),
            None => TokenKind::Ident(self.interner.intern(text)),
        }
    }

    /// Decimal digits with at most one `.`; a second `.` ends the literal.
    fn number(&mut self, start: Position) -> ScanResult {
        let mut seen_dot = false;
        loop {
            match self.cursor.current() {
                '0'..='9' => self.cursor.advance(),
                '.' if !seen_dot => {
                    seen_dot = true;
                    self.cursor.advance();
                }
                _ => break,
            }
        }

        let text = self.cursor.slice_from(start);
        let span = Span::new(start, self.cursor.position());
        if seen_dot {
            let value = text.parse::<f64>().map_err(|_| {
                Diagnostic::error(ErrorKind::IllegalValue, span)
                    .with_arg(format_args!("'{text}' is not a valid number"))
            })?;
            Ok(Some(TokenKind::Float(value)))
        } else {
            let value = text.parse::<i64>().map_err(|_| {
                Diagnostic::error(ErrorKind::IllegalValue, span)
                    .with_arg(format_args!("Integer literal {text} does not fit in 64 bits"))
            })?;
            Ok(Some(TokenKind::Int(value)))
        }
    }

    /// `.5` is a float unless it follows something `.` could be an
    /// attribute of.
    fn dot(&mut self, start: Position) -> ScanResult {
        let attribute_position = matches!(
            self.prev,
            Some(TokenKind::Ident(_) | TokenKind::RParen | TokenKind::RBracket)
        );
        if !attribute_position && self.cursor.peek().is_ascii_digit() {
            return self.number(start);
        }
        self.single(TokenKind::Dot)
    }

    /// A string closed by the delimiter that opened it. Running into the end
    /// of the line warns and ends the string there.
    fn string(&mut self, start: Position) -> TokenKind {
        let delimiter = self.cursor.current();
        self.cursor.advance();
        let mut value = String::new();

        loop {
            if self.cursor.is_eof() || self.cursor.current() == '\n' {
                let span = Span::new(start, self.cursor.position());
                self.sink.warn(
                    Diagnostic::warning(WarningKind::NoStringEnd, span)
                        .with_arg(format_args!("{delimiter:?}")),
                );
                break;
            }
            let ch = self.cursor.current();
            self.cursor.advance();
            if ch == delimiter {
                break;
            }
            if ch == '\\' && !self.cursor.is_eof() && self.cursor.current() != '\n' {
                let escaped = self.cursor.current();
                self.cursor.advance();
                value.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    other => other,
                });
            } else {
                value.push(ch);
            }
        }

        TokenKind::Str(self.interner.intern(&value))
    }

    // ─── Operators ───

    fn single(&mut self, kind: TokenKind) -> ScanResult {
        self.cursor.advance();
        Ok(Some(kind))
    }

    /// A one-character operator that doubles as a two-character one when
    /// `second` follows.
    fn pair(&mut self, second: char, one: TokenKind, two: TokenKind) -> TokenKind {
        self.cursor.advance();
        if self.cursor.eat(second) {
            two
        } else {
            one
        }
    }

    fn bang(&mut self) -> TokenKind {
        self.pair('=', TokenKind::Not, TokenKind::NotEq)
    }

    fn equal(&mut self, start: Position) -> ScanResult {
        self.cursor.advance();
        if self.cursor.eat('=') {
            return Ok(Some(TokenKind::EqEq));
        }
        let span = Span::new(start, self.cursor.position());
        Err(Diagnostic::error(ErrorKind::ExpectedChar, span).with_arg("'==' (use '::' to assign)"))
    }

    /// The assignment family: `::`, `:>`, `:<op>:` and `:<op>>`.
    ///
    /// `:+` and `:-` without a terminator back up to just after the colon so
    /// `cond ? a :-1` reads as a ternary with a negative else branch.
    fn colon(&mut self, start: Position) -> ScanResult {
        self.cursor.advance();
        if self.cursor.eat(':') {
            return Ok(Some(TokenKind::Set(AssignOp::Plain)));
        }
        if self.cursor.eat('>') {
            return Ok(Some(TokenKind::SetYield(AssignOp::Plain)));
        }

        let after_colon = self.cursor.position();
        let op = match self.cursor.current() {
            '+' => AssignOp::Add,
            '-' => AssignOp::Sub,
            '%' => AssignOp::Mod,
            '*' if self.cursor.peek() == '*' => AssignOp::Pow,
            '*' => AssignOp::Mul,
            '/' if self.cursor.peek() == '/' => AssignOp::FloorDiv,
            '/' => AssignOp::Div,
            _ => return Ok(Some(TokenKind::Colon)),
        };
        self.cursor.advance();
        if matches!(op, AssignOp::Pow | AssignOp::FloorDiv) {
            self.cursor.advance();
        }

        if self.cursor.eat(':') {
            return Ok(Some(TokenKind::Set(op)));
        }
        if self.cursor.eat('>') {
            return Ok(Some(TokenKind::SetYield(op)));
        }
        if matches!(op, AssignOp::Add | AssignOp::Sub) {
            self.cursor.reset(after_colon);
            return Ok(Some(TokenKind::Colon));
        }

        let found = describe_char(&self.cursor);
        self.cursor.advance();
        let span = Span::new(start, self.cursor.position());
        Err(Diagnostic::error(ErrorKind::ExpectedAssignmentOperator, span).with_arg(found))
    }

    fn illegal_char(&mut self, start: Position, ch: char) -> Diagnostic {
        self.cursor.advance();
        let span = Span::new(start, self.cursor.position());
        Diagnostic::error(ErrorKind::IllegalChar, span)
            .with_arg(format_args!("{ch:?}"))
            .with_arg(start)
    }
}

#[inline]
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn describe_char(cursor: &Cursor<'_>) -> String {
    if cursor.is_eof() {
        "end of input".to_string()
    } else {
        format!("{:?}", cursor.current())
    }
}
