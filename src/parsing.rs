//! Syntax checking over a classified token stream.
//!
//!     Two checkers live here and they are kept apart on purpose:
//!
//!     - [predictive]: a pushdown automaton driven by the [grammar](crate::grammar). This is the
//!       real syntax check.
//!     - [balance]: a quick delimiter balance check. It only matches `(`, `[` and `{` against
//!       their closers and narrates the rest. It is strictly weaker than the grammar check, and
//!       input it accepts can still be rejected by the grammar.
//!
//!     Both produce an [Outcome]: the full step trace plus a single [Verdict]. Every step is
//!     recorded before its action is applied, so replaying a trace shows the state each action
//!     started from. Runs share nothing, and running either checker twice on the same tokens
//!     yields the same trace and verdict.

pub mod balance;
pub mod predictive;

pub use balance::{check_balance, BalanceAction, BalanceOutcome, BalanceStep};
pub use predictive::{parse, ParseAction, ParseOutcome, ParseStep};

use crate::grammar::{NonTerminal, Terminal};
use crate::token::{Delimiter, Token};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which checker to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Full predictive grammar check.
    #[default]
    Grammar,
    /// Delimiter balance only.
    Balance,
}

impl FromStr for ParseMode {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grammar" => Ok(ParseMode::Grammar),
            "balance" => Ok(ParseMode::Balance),
            other => Err(crate::Error::UnknownParseMode(other.to_string())),
        }
    }
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseMode::Grammar => f.write_str("grammar"),
            ParseMode::Balance => f.write_str("balance"),
        }
    }
}

/// Why a run was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RejectReason {
    #[error("no input")]
    NoInput,
    #[error("terminal mismatch: expected {expected}, found {found}")]
    TerminalMismatch { expected: Terminal, found: String },
    #[error("no production for lookahead: {non_terminal} cannot start with {lookahead}")]
    NoApplicableProduction {
        non_terminal: NonTerminal,
        lookahead: String,
    },
    #[error("unconsumed input starting at {found}")]
    UnconsumedInput { found: String },
    #[error("unclosed expansion: expected {expected} before end of input")]
    UnclosedExpansion { expected: Terminal },
    #[error("unmatched closing delimiter: found {found}, {}", describe_expected(.expected))]
    UnmatchedClosingDelimiter {
        found: Delimiter,
        expected: Option<Delimiter>,
    },
    #[error("unclosed delimiters: {}", join_delimiters(.openers))]
    UnclosedDelimiters { openers: Vec<Delimiter> },
}

fn describe_expected(expected: &Option<Delimiter>) -> String {
    match expected {
        Some(closer) => format!("expected {}", closer),
        None => "no opener".to_string(),
    }
}

fn join_delimiters(delimiters: &[Delimiter]) -> String {
    delimiters
        .iter()
        .map(Delimiter::lexeme)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Final result of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Accepted,
    Rejected(RejectReason),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    pub fn reason(&self) -> Option<&RejectReason> {
        match self {
            Verdict::Accepted => None,
            Verdict::Rejected(reason) => Some(reason),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Accepted => f.write_str("ACCEPTED"),
            Verdict::Rejected(reason) => write!(f, "REJECTED: {}", reason),
        }
    }
}

/// A finished run: every step taken, in order, and the verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome<S> {
    steps: Vec<S>,
    verdict: Verdict,
}

impl<S> Outcome<S> {
    pub(crate) fn new(steps: Vec<S>, verdict: Verdict) -> Self {
        log::debug!("verdict after {} steps: {}", steps.len(), verdict);
        Self { steps, verdict }
    }

    pub fn steps(&self) -> &[S] {
        &self.steps
    }

    pub fn verdict(&self) -> &Verdict {
        &self.verdict
    }

    pub fn is_accepted(&self) -> bool {
        self.verdict.is_accepted()
    }
}

/// Runs the checker selected by `mode`.
pub fn run(tokens: &[Token], mode: ParseMode) -> RunOutcome {
    match mode {
        ParseMode::Grammar => RunOutcome::Grammar(parse(tokens)),
        ParseMode::Balance => RunOutcome::Balance(check_balance(tokens)),
    }
}

/// Outcome of whichever checker ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunOutcome {
    Grammar(ParseOutcome),
    Balance(BalanceOutcome),
}

impl RunOutcome {
    pub fn mode(&self) -> ParseMode {
        match self {
            RunOutcome::Grammar(_) => ParseMode::Grammar,
            RunOutcome::Balance(_) => ParseMode::Balance,
        }
    }

    pub fn verdict(&self) -> &Verdict {
        match self {
            RunOutcome::Grammar(outcome) => outcome.verdict(),
            RunOutcome::Balance(outcome) => outcome.verdict(),
        }
    }
}
