//! Token types for the fck lexer.
//!
//! The token set is closed: literals, identifiers, keywords, the operator
//! and punctuation set, and the assignment family where every assignment
//! operator exists both as a plain set (`::`, `:+:`) and as set-and-yield
//! (`:>`, `:+>`).

use super::{Name, Span};
use std::fmt;

/// A token with its span in the source.
#[derive(Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }

    /// Create a dummy token for tests.
    pub fn dummy(kind: TokenKind) -> Self {
        Token {
            kind,
            span: Span::DUMMY,
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Token kinds for fck.
///
/// `PartialEq` only: float literals carry their `f64`.
#[derive(Clone, Copy, PartialEq)]
pub enum TokenKind {
    // ─── Literals ───
    Int(i64),
    Float(f64),
    /// String literal with escapes already resolved.
    Str(Name),
    Ident(Name),
    Keyword(Keyword),

    // ─── Arithmetic ───
    Plus,
    Minus,
    Star,
    /// `**`
    StarStar,
    Slash,
    /// `//`
    SlashSlash,
    Percent,

    // ─── Comparison and logic ───
    /// `==`
    EqEq,
    /// `!=`
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    /// `!`
    Not,

    // ─── Assignment family ───
    /// `::` and `:<op>:`
    Set(AssignOp),
    /// `:>` and `:<op>>`
    SetYield(AssignOp),

    // ─── Punctuation ───
    Colon,
    Question,
    Comma,
    Dot,
    At,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    /// Newline or `;`
    Newline,
    Eof,
}

impl TokenKind {
    /// Human-readable description, used in "expected X" messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Int(_) => "integer",
            TokenKind::Float(_) => "float",
            TokenKind::Str(_) => "string",
            TokenKind::Ident(_) => "identifier",
            TokenKind::Keyword(kw) => kw.as_str(),
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::StarStar => "**",
            TokenKind::Slash => "/",
            TokenKind::SlashSlash => "//",
            TokenKind::Percent => "%",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::Not => "!",
            TokenKind::Set(op) => op.set_symbol(),
            TokenKind::SetYield(op) => op.yield_symbol(),
            TokenKind::Colon => ":",
            TokenKind::Question => "?",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::At => "@",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Newline => "newline",
            TokenKind::Eof => "end of input",
        }
    }

    #[inline]
    pub fn is_keyword(&self, kw: Keyword) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == kw)
    }

    /// Bracket depth change: `+1` for openers, `-1` for closers.
    #[inline]
    pub fn bracket_delta(&self) -> i32 {
        match self {
            TokenKind::LParen | TokenKind::LBrace | TokenKind::LBracket => 1,
            TokenKind::RParen | TokenKind::RBrace | TokenKind::RBracket => -1,
            _ => 0,
        }
    }
}

impl fmt::Debug for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Int(n) => write!(f, "Int({n})"),
            TokenKind::Float(v) => write!(f, "Float({v:?})"),
            TokenKind::Str(name) => write!(f, "Str({name:?})"),
            TokenKind::Ident(name) => write!(f, "Ident({name:?})"),
            TokenKind::Keyword(kw) => write!(f, "Keyword({})", kw.as_str()),
            TokenKind::Set(op) => write!(f, "Set({op:?})"),
            TokenKind::SetYield(op) => write!(f, "SetYield({op:?})"),
            _ => write!(f, "{}", self.display_name()),
        }
    }
}

/// Reserved words.
///
/// `true`, `false` and `null` are not keywords: they are constants in the
/// root environment.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Keyword {
    And,
    Or,
    Not,
    If,
    Elif,
    Else,
    Case,
    Option,
    Default,
    Iterate,
    To,
    Step,
    While,
    Def,
    Return,
    Continue,
    Break,
    As,
    Int,
    Float,
    Bool,
    List,
    Str,
    Auto,
}

impl Keyword {
    pub const ALL: [Keyword; 24] = [
        Keyword::And,
        Keyword::Or,
        Keyword::Not,
        Keyword::If,
        Keyword::Elif,
        Keyword::Else,
        Keyword::Case,
        Keyword::Option,
        Keyword::Default,
        Keyword::Iterate,
        Keyword::To,
        Keyword::Step,
        Keyword::While,
        Keyword::Def,
        Keyword::Return,
        Keyword::Continue,
        Keyword::Break,
        Keyword::As,
        Keyword::Int,
        Keyword::Float,
        Keyword::Bool,
        Keyword::List,
        Keyword::Str,
        Keyword::Auto,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::And => "and",
            Keyword::Or => "or",
            Keyword::Not => "not",
            Keyword::If => "if",
            Keyword::Elif => "elif",
            Keyword::Else => "else",
            Keyword::Case => "case",
            Keyword::Option => "option",
            Keyword::Default => "default",
            Keyword::Iterate => "iterate",
            Keyword::To => "to",
            Keyword::Step => "step",
            Keyword::While => "while",
            Keyword::Def => "def",
            Keyword::Return => "return",
            Keyword::Continue => "continue",
            Keyword::Break => "break",
            Keyword::As => "as",
            Keyword::Int => "int",
            Keyword::Float => "float",
            Keyword::Bool => "bool",
            Keyword::List => "list",
            Keyword::Str => "str",
            Keyword::Auto => "auto",
        }
    }

    pub fn from_ident(s: &str) -> Option<Keyword> {
        Some(match s {
            "and" => Keyword::And,
            "or" => Keyword::Or,
            "not" => Keyword::Not,
            "if" => Keyword::If,
            "elif" => Keyword::Elif,
            "else" => Keyword::Else,
            "case" => Keyword::Case,
            "option" => Keyword::Option,
            "default" => Keyword::Default,
            "iterate" => Keyword::Iterate,
            "to" => Keyword::To,
            "step" => Keyword::Step,
            "while" => Keyword::While,
            "def" => Keyword::Def,
            "return" => Keyword::Return,
            "continue" => Keyword::Continue,
            "break" => Keyword::Break,
            "as" => Keyword::As,
            "int" => Keyword::Int,
            "float" => Keyword::Float,
            "bool" => Keyword::Bool,
            "list" => Keyword::List,
            "str" => Keyword::Str,
            "auto" => Keyword::Auto,
            _ => return None,
        })
    }

    /// The declaration type this keyword names, if any.
    pub fn var_type(self) -> Option<VarType> {
        match self {
            Keyword::Auto => Some(VarType::Auto),
            other => other.type_kind().map(VarType::Typed),
        }
    }

    /// The concrete value kind this keyword names (`auto` excluded).
    pub fn type_kind(self) -> Option<TypeKind> {
        match self {
            Keyword::Int => Some(TypeKind::Int),
            Keyword::Float => Some(TypeKind::Float),
            Keyword::Bool => Some(TypeKind::Bool),
            Keyword::Str => Some(TypeKind::Str),
            Keyword::List => Some(TypeKind::List),
            _ => None,
        }
    }
}

/// Base operator of an assignment-family token.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AssignOp {
    /// `::` / `:>`
    Plain,
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
}

impl AssignOp {
    /// The binary operator a compound assignment applies, `None` for a plain set.
    pub fn as_binary(self) -> Option<crate::BinaryOp> {
        use crate::BinaryOp;
        match self {
            AssignOp::Plain => None,
            AssignOp::Add => Some(BinaryOp::Add),
            AssignOp::Sub => Some(BinaryOp::Sub),
            AssignOp::Mul => Some(BinaryOp::Mul),
            AssignOp::Div => Some(BinaryOp::Div),
            AssignOp::FloorDiv => Some(BinaryOp::FloorDiv),
            AssignOp::Mod => Some(BinaryOp::Mod),
            AssignOp::Pow => Some(BinaryOp::Pow),
        }
    }

    pub fn set_symbol(self) -> &'static str {
        match self {
            AssignOp::Plain => "::",
            AssignOp::Add => ":+:",
            AssignOp::Sub => ":-:",
            AssignOp::Mul => ":*:",
            AssignOp::Div => ":/:",
            AssignOp::FloorDiv => "://:",
            AssignOp::Mod => ":%:",
            AssignOp::Pow => ":**:",
        }
    }

    pub fn yield_symbol(self) -> &'static str {
        match self {
            AssignOp::Plain => ":>",
            AssignOp::Add => ":+>",
            AssignOp::Sub => ":->",
            AssignOp::Mul => ":*>",
            AssignOp::Div => ":/>",
            AssignOp::FloorDiv => "://>",
            AssignOp::Mod => ":%>",
            AssignOp::Pow => ":**>",
        }
    }
}

/// A concrete value kind named by a type keyword.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeKind {
    Int,
    Float,
    Bool,
    Str,
    List,
}

impl TypeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeKind::Int => "int",
            TypeKind::Float => "float",
            TypeKind::Bool => "bool",
            TypeKind::Str => "str",
            TypeKind::List => "list",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared type of a variable or parameter.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum VarType {
    /// `auto`: accepts any value unchanged.
    Auto,
    Typed(TypeKind),
}

impl VarType {
    pub fn as_str(self) -> &'static str {
        match self {
            VarType::Auto => "auto",
            VarType::Typed(kind) => kind.as_str(),
        }
    }
}

/// Lexer output: the tokens of one input, ending in `Eof` when complete.
#[derive(Clone, Default, PartialEq)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        TokenList {
            tokens: Vec::with_capacity(capacity),
        }
    }

    pub fn from_vec(tokens: Vec<Token>) -> Self {
        TokenList { tokens }
    }

    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Append every token of `other`.
    pub fn extend(&mut self, other: TokenList) {
        self.tokens.extend(other.tokens);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Drop a trailing `Eof`, leaving the tokens ready to be continued.
    pub fn strip_eof(&mut self) {
        if matches!(self.tokens.last(), Some(t) if t.kind == TokenKind::Eof) {
            self.tokens.pop();
        }
    }

    /// Net count of unclosed brackets; negative when closers outnumber openers.
    pub fn bracket_depth(&self) -> i32 {
        self.tokens.iter().map(|t| t.kind.bracket_delta()).sum()
    }
}

impl fmt::Debug for TokenList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.tokens.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
