//! Library error type.
//!
//! Parse rejections are not errors; they are [Verdict](crate::parsing::Verdict) values. This type
//! covers the few operations that can genuinely fail.

use thiserror::Error;

pub type Result<T, E = crate::Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown token type '{0}' (expected number, id, string, INVALID or a literal lexeme)")]
    UnknownTokenType(String),
    #[error("unknown parse mode '{0}' (expected grammar or balance)")]
    UnknownParseMode(String),
    #[error("unknown output format '{0}' (expected text or json)")]
    UnknownOutputFormat(String),
}
