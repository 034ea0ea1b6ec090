//! Token table rows: token text, type name, line, column.

use super::Token;
use serde::Serialize;

/// One row of the token table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenRow {
    pub token: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub line: usize,
    pub column: usize,
}

impl From<&Token> for TokenRow {
    fn from(token: &Token) -> Self {
        Self {
            token: token.text().to_string(),
            type_name: token.kind().name().to_string(),
            line: token.line(),
            column: token.column(),
        }
    }
}

/// The table handed from the lexical stage to the syntax stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenTable {
    rows: Vec<TokenRow>,
}

impl TokenTable {
    pub const HEADERS: [&'static str; 4] = ["Token", "Type", "Line", "Column"];

    pub fn from_tokens(tokens: &[Token]) -> Self {
        Self {
            rows: tokens.iter().map(TokenRow::from).collect(),
        }
    }

    pub fn rows(&self) -> &[TokenRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rebuilds tokens from the table, skipping rows whose token text is blank.
    ///
    /// Types are re-derived from the text, never read back from the type column.
    pub fn to_tokens(&self) -> Vec<Token> {
        self.rows
            .iter()
            .filter(|row| !row.token.trim().is_empty())
            .map(|row| Token::new(row.token.clone(), row.line, row.column))
            .collect()
    }
}
