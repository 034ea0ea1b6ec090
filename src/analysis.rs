//! End-to-end analysis: tokenize, classify, then run one checker.
//!
//! The automaton tracer is not part of this path; traces are requested per token with
//! [trace_token](crate::automata::trace_token).

use crate::lexing::tokenize;
use crate::parsing::{run, ParseMode, RunOutcome, Verdict};
use crate::token::{Token, TokenTable};
use serde::Serialize;

/// Tokens of one source text and the outcome of checking them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    tokens: Vec<Token>,
    outcome: RunOutcome,
}

impl Analysis {
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn outcome(&self) -> &RunOutcome {
        &self.outcome
    }

    pub fn verdict(&self) -> &Verdict {
        self.outcome.verdict()
    }

    pub fn table(&self) -> TokenTable {
        TokenTable::from_tokens(&self.tokens)
    }

    /// Tokens that classified as `Invalid`.
    pub fn invalid_tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|token| token.kind().is_invalid())
    }
}

/// Tokenizes `source` and checks it in `mode`.
pub fn analyze(source: &str, mode: ParseMode) -> Analysis {
    let tokens = tokenize(source);
    log::debug!("analyzing {} tokens in {} mode", tokens.len(), mode);
    let outcome = run(&tokens, mode);
    Analysis { tokens, outcome }
}
