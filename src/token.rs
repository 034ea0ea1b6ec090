//! Token values shared by the tokenizer, the automaton tracer and both parsers.
//!
//!     A token is a piece of source text plus its position and its classified type. The type is
//!     always derived by [classify](classification::classify) when the token is built, so nothing
//!     else in the crate stores or recomputes it.
//!
//!     Operators and delimiters keep their exact lexeme in the type. Grammar rules dispatch on the
//!     literal symbol (`+` and `-` expand differently from `*`), so a bare "operator" category
//!     would not be enough.

pub mod classification;
pub mod table;

pub use classification::classify;
pub use table::{TokenRow, TokenTable};

use serde::Serialize;
use std::fmt;

/// The lexeme used as end-of-input marker by the parsers.
pub const END_MARKER: &str = "$";

/// Arithmetic and assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Plus,
    Minus,
    Star,
    Slash,
    FloorDiv,
    Percent,
    Power,
    Assign,
}

impl Operator {
    pub const ALL: [Operator; 8] = [
        Operator::Plus,
        Operator::Minus,
        Operator::Star,
        Operator::Slash,
        Operator::FloorDiv,
        Operator::Percent,
        Operator::Power,
        Operator::Assign,
    ];

    pub fn lexeme(&self) -> &'static str {
        match self {
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Star => "*",
            Operator::Slash => "/",
            Operator::FloorDiv => "//",
            Operator::Percent => "%",
            Operator::Power => "**",
            Operator::Assign => "=",
        }
    }

    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.lexeme() == lexeme)
    }

    /// `+` and `-`, the operators of `ExprRest`.
    pub fn is_additive(&self) -> bool {
        matches!(self, Operator::Plus | Operator::Minus)
    }

    /// `*`, `/`, `//`, `%` and `**`, the operators of `TermRest`.
    pub fn is_multiplicative(&self) -> bool {
        matches!(
            self,
            Operator::Star
                | Operator::Slash
                | Operator::FloorDiv
                | Operator::Percent
                | Operator::Power
        )
    }
}

/// Brackets, braces and parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
}

impl Delimiter {
    pub const ALL: [Delimiter; 6] = [
        Delimiter::OpenParen,
        Delimiter::CloseParen,
        Delimiter::OpenBracket,
        Delimiter::CloseBracket,
        Delimiter::OpenBrace,
        Delimiter::CloseBrace,
    ];

    pub fn lexeme(&self) -> &'static str {
        match self {
            Delimiter::OpenParen => "(",
            Delimiter::CloseParen => ")",
            Delimiter::OpenBracket => "[",
            Delimiter::CloseBracket => "]",
            Delimiter::OpenBrace => "{",
            Delimiter::CloseBrace => "}",
        }
    }

    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.lexeme() == lexeme)
    }

    pub fn is_opening(&self) -> bool {
        matches!(
            self,
            Delimiter::OpenParen | Delimiter::OpenBracket | Delimiter::OpenBrace
        )
    }

    /// The opener a closing delimiter must match, `None` for openers.
    pub fn opener(&self) -> Option<Delimiter> {
        match self {
            Delimiter::CloseParen => Some(Delimiter::OpenParen),
            Delimiter::CloseBracket => Some(Delimiter::OpenBracket),
            Delimiter::CloseBrace => Some(Delimiter::OpenBrace),
            _ => None,
        }
    }

    /// The closer an opening delimiter expects, `None` for closers.
    pub fn closer(&self) -> Option<Delimiter> {
        match self {
            Delimiter::OpenParen => Some(Delimiter::CloseParen),
            Delimiter::OpenBracket => Some(Delimiter::CloseBracket),
            Delimiter::OpenBrace => Some(Delimiter::CloseBrace),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.lexeme())
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.lexeme())
    }
}

/// The classification of a token. Serializes as its [name](TokenType::name).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Number,
    Identifier,
    StringLiteral,
    Operator(Operator),
    Delimiter(Delimiter),
    EndOfInput,
    Invalid,
}

impl TokenType {
    /// Category name as shown in the token table: `number`, `id`, `string`, the literal lexeme
    /// for operators and delimiters, `$` and `INVALID`.
    pub fn name(&self) -> &'static str {
        match self {
            TokenType::Number => "number",
            TokenType::Identifier => "id",
            TokenType::StringLiteral => "string",
            TokenType::Operator(op) => op.lexeme(),
            TokenType::Delimiter(d) => d.lexeme(),
            TokenType::EndOfInput => END_MARKER,
            TokenType::Invalid => "INVALID",
        }
    }

    /// Inverse of [TokenType::name].
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "number" => Some(TokenType::Number),
            "id" => Some(TokenType::Identifier),
            "string" => Some(TokenType::StringLiteral),
            "INVALID" => Some(TokenType::Invalid),
            END_MARKER => Some(TokenType::EndOfInput),
            other => Operator::from_lexeme(other)
                .map(TokenType::Operator)
                .or_else(|| Delimiter::from_lexeme(other).map(TokenType::Delimiter)),
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, TokenType::Invalid)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for TokenType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl Serialize for Operator {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.lexeme())
    }
}

impl Serialize for Delimiter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.lexeme())
    }
}

/// A classified piece of source text. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    text: String,
    #[serde(rename = "type")]
    kind: TokenType,
    line: usize,
    column: usize,
}

impl Token {
    /// Builds a token, classifying `text`.
    pub fn new(text: impl Into<String>, line: usize, column: usize) -> Self {
        let text = text.into();
        let kind = classify(&text);
        Self {
            text,
            kind,
            line,
            column,
        }
    }

    /// The `$` marker parsers append after the last real token.
    pub fn end_marker(line: usize, column: usize) -> Self {
        Self {
            text: END_MARKER.to_string(),
            kind: TokenType::EndOfInput,
            line,
            column,
        }
    }

    /// Builds a token at position 0:0, for callers without source positions.
    pub fn detached(text: impl Into<String>) -> Self {
        Self::new(text, 0, 0)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> TokenType {
        self.kind
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn is_end_marker(&self) -> bool {
        self.kind == TokenType::EndOfInput
    }

    /// Column just past the token, for placing an end marker after it.
    pub fn end_column(&self) -> usize {
        self.column + self.text.chars().count()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Returns `tokens` with an end marker appended unless the last token already is one.
///
/// Empty input stays empty so callers can tell "no input" apart from an empty program.
pub fn with_end_marker(tokens: &[Token]) -> Vec<Token> {
    let mut stream = tokens.to_vec();
    match stream.last() {
        None => {}
        Some(last) if last.is_end_marker() => {}
        Some(last) => {
            let marker = Token::end_marker(last.line(), last.end_column());
            stream.push(marker);
        }
    }
    stream
}
