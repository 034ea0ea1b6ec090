//! Source tokenization.
//!
//!     Turns free text into the ordered token list the parsers consume. Raw scanning is done by
//!     the logos lexer below; it only decides where tokens start and end. The token's type is
//!     always assigned afterwards by [classify](crate::token::classify), so the tokenizer and the
//!     classifier can never disagree.
//!
//!     The scanner is deliberately greedy about malformed input: a run that starts with a digit
//!     swallows trailing letters (`12ab`), and an unterminated string runs to the end of the line.
//!     Those runs reach the classifier as a single token and come out `Invalid`. Characters no
//!     rule recognises become one-character tokens, also `Invalid`.

use crate::token::Token;
use logos::Logos;

/// Raw token shapes recognised by the scanner.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum RawToken {
    #[token("**")]
    #[token("//")]
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("%")]
    #[token("=")]
    Operator,

    #[token("(")]
    #[token(")")]
    #[token("[")]
    #[token("]")]
    #[token("{")]
    #[token("}")]
    Delimiter,

    #[regex(r"[0-9][0-9\p{Alphabetic}_.]*")]
    NumberLike,

    #[regex(r"[\p{Alphabetic}_][\p{Alphabetic}0-9_]*")]
    Word,

    #[regex(r#""([^"\\\n]|\\[^\n])*"?"#)]
    #[regex(r#"'([^'\\\n]|\\[^\n])*'?"#)]
    StringLike,
}

/// Maps byte offsets to 1-based line and column numbers.
#[derive(Debug, Clone)]
pub struct SourceLocator<'a> {
    source: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> SourceLocator<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .char_indices()
                .filter(|(_, c)| *c == '\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            source,
            line_starts,
        }
    }

    /// Line and column of `offset`. Columns count characters, not bytes.
    pub fn locate(&self, offset: usize) -> (usize, usize) {
        let line_index = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[line_index];
        let column = self.source[line_start..offset].chars().count() + 1;
        (line_index + 1, column)
    }
}

/// Tokenizes `source` into classified tokens with positions.
///
/// Never fails: unrecognised characters become `Invalid` tokens. No end marker is appended.
pub fn tokenize(source: &str) -> Vec<Token> {
    let locator = SourceLocator::new(source);
    let mut lexer = RawToken::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let (line, column) = locator.locate(span.start);
        if result.is_err() {
            log::trace!("unrecognised input {:?} at {}:{}", lexer.slice(), line, column);
        }
        tokens.push(Token::new(lexer.slice(), line, column));
    }

    log::debug!("tokenized {} tokens", tokens.len());
    tokens
}

/// The token texts of `source`, handy for tests and quick inspection.
pub fn token_texts(source: &str) -> Vec<String> {
    tokenize(source)
        .into_iter()
        .map(|token| token.text().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Operator, TokenType};

    #[test]
    fn test_tokenizes_assignment() {
        assert_eq!(token_texts("x = 1 + 2 * 3"), vec!["x", "=", "1", "+", "2", "*", "3"]);
    }

    #[test]
    fn test_longest_operator_wins() {
        let tokens = tokenize("a**b//c");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                TokenType::Identifier,
                TokenType::Operator(Operator::Power),
                TokenType::Identifier,
                TokenType::Operator(Operator::FloorDiv),
                TokenType::Identifier,
            ]
        );
    }

    #[test]
    fn test_positions_are_one_based() {
        let tokens = tokenize("a = 1\n  bb = 'hi'");
        let positions: Vec<_> = tokens.iter().map(|t| (t.line(), t.column())).collect();
        assert_eq!(positions, vec![(1, 1), (1, 3), (1, 5), (2, 3), (2, 6), (2, 8)]);
        assert_eq!(tokens[5].kind(), TokenType::StringLiteral);
    }

    #[test]
    fn test_malformed_runs_stay_whole() {
        let tokens = tokenize("12ab \"open");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text(), "12ab");
        assert_eq!(tokens[0].kind(), TokenType::Invalid);
        assert_eq!(tokens[1].text(), "\"open");
        assert_eq!(tokens[1].kind(), TokenType::Invalid);
    }

    #[test]
    fn test_unknown_characters_become_invalid_tokens() {
        let tokens = tokenize("x @ y");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].text(), "@");
        assert_eq!(tokens[1].kind(), TokenType::Invalid);
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \n\t ").is_empty());
    }

    #[test]
    fn test_locator_counts_characters() {
        let locator = SourceLocator::new("é = 1");
        assert_eq!(locator.locate(3), (1, 3));
    }
}
