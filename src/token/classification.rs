//! Token classification.
//!
//!     Rules are tried in a fixed order and the first match wins:
//!
//!         1. exact match against the literal set `$ + - * / // % ** = ( ) [ ] { }`
//!         2. first character is a decimal digit: number
//!         3. first character is a letter or `_`: identifier
//!         4. first character is `"` or `'`: string literal
//!         5. anything else: invalid
//!
//!     Rules 2 to 4 pick the category from the first character and then require the whole token
//!     to have that category's shape. A token that starts like a number but is not one (`12ab`,
//!     `1.`) is `Invalid` rather than a number, and the empty string is `Invalid`.

use super::{Delimiter, Operator, TokenType, END_MARKER};
use once_cell::sync::Lazy;
use regex::Regex;

static NUMBER_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(?:\.[0-9]+)?$").expect("number pattern compiles"));

static IDENTIFIER_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{Alphabetic}_][\p{Alphabetic}0-9_]*$").expect("identifier pattern compiles")
});

static STRING_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)^(?:"(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*')$"#)
        .expect("string pattern compiles")
});

/// Maps raw token text to its [TokenType]. Pure and total.
pub fn classify(text: &str) -> TokenType {
    if let Some(literal) = classify_literal(text) {
        return literal;
    }

    let Some(first) = text.chars().next() else {
        return TokenType::Invalid;
    };

    if first.is_ascii_digit() {
        shaped(text, &NUMBER_SHAPE, TokenType::Number)
    } else if is_identifier_start(first) {
        shaped(text, &IDENTIFIER_SHAPE, TokenType::Identifier)
    } else if is_quote(first) {
        shaped(text, &STRING_SHAPE, TokenType::StringLiteral)
    } else {
        TokenType::Invalid
    }
}

fn classify_literal(text: &str) -> Option<TokenType> {
    if text == END_MARKER {
        return Some(TokenType::EndOfInput);
    }
    Operator::from_lexeme(text)
        .map(TokenType::Operator)
        .or_else(|| Delimiter::from_lexeme(text).map(TokenType::Delimiter))
}

fn shaped(text: &str, shape: &Regex, kind: TokenType) -> TokenType {
    if shape.is_match(text) {
        kind
    } else {
        TokenType::Invalid
    }
}

pub(crate) fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

pub(crate) fn is_identifier_continue(c: char) -> bool {
    c.is_alphabetic() || c.is_ascii_digit() || c == '_'
}

pub(crate) fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals_take_priority() {
        assert_eq!(classify("-"), TokenType::Operator(Operator::Minus));
        assert_eq!(classify("//"), TokenType::Operator(Operator::FloorDiv));
        assert_eq!(classify("**"), TokenType::Operator(Operator::Power));
        assert_eq!(classify("{"), TokenType::Delimiter(Delimiter::OpenBrace));
        assert_eq!(classify("$"), TokenType::EndOfInput);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(classify("0"), TokenType::Number);
        assert_eq!(classify("42"), TokenType::Number);
        assert_eq!(classify("3.14"), TokenType::Number);
    }

    #[test]
    fn test_malformed_numbers_are_invalid() {
        assert_eq!(classify("12ab"), TokenType::Invalid);
        assert_eq!(classify("1."), TokenType::Invalid);
        assert_eq!(classify("1.2.3"), TokenType::Invalid);
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(classify("x"), TokenType::Identifier);
        assert_eq!(classify("_tmp1"), TokenType::Identifier);
        assert_eq!(classify("größe"), TokenType::Identifier);
        assert_eq!(classify("a-b"), TokenType::Invalid);
    }

    #[test]
    fn test_strings() {
        assert_eq!(classify("\"hi\""), TokenType::StringLiteral);
        assert_eq!(classify("'it''"), TokenType::Invalid);
        assert_eq!(classify("'a\"b'"), TokenType::StringLiteral);
        assert_eq!(classify(r#""say \"hi\"""#), TokenType::StringLiteral);
        assert_eq!(classify("\"open"), TokenType::Invalid);
        assert_eq!(classify("\""), TokenType::Invalid);
    }

    #[test]
    fn test_fallthrough_and_empty() {
        assert_eq!(classify("@"), TokenType::Invalid);
        assert_eq!(classify("#x"), TokenType::Invalid);
        assert_eq!(classify(""), TokenType::Invalid);
    }
}
