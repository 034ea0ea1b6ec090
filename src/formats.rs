//! Renderers for the values the core produces.
//!
//! `text` renders the token table, `q0 --label--> q1` animation lines and the
//! `STACK: ... | INPUT: ...` parser log. `json` serializes the same values for other front ends.

pub mod json;
pub mod text;

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(crate::Error::UnknownOutputFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names_parse_back() {
        for format in [OutputFormat::Text, OutputFormat::Json] {
            assert_eq!(format.to_string().parse::<OutputFormat>().ok(), Some(format));
        }
    }

    #[test]
    fn test_unknown_format_names_the_input() {
        let err = "yaml".parse::<OutputFormat>().expect_err("yaml is not a format");
        assert!(matches!(err, crate::Error::UnknownOutputFormat(ref name) if name == "yaml"));
        assert_eq!(err.to_string(), "unknown output format 'yaml' (expected text or json)");
    }
}
