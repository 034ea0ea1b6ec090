//! Delimiter balance check.
//!
//!     Scans tokens left to right with a stack of opening delimiters. Openers are pushed; a
//!     closer must match the opener on top, otherwise the scan stops right there and the remaining
//!     tokens are never looked at. At the end marker the stack must be empty.
//!
//!     Assignments (`id` followed by `=`) and arithmetic operators are recognised only so the trace
//!     can narrate them. They never influence the verdict. This mode does not validate the
//!     grammar: `+ + ( )` balances fine.

use super::{Outcome, RejectReason, Verdict};
use crate::token::{with_end_marker, Delimiter, Operator, Token, TokenType};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BalanceAction {
    Push(Delimiter),
    /// Pop `opener`, closed by the current token.
    Pop { opener: Delimiter },
    /// Narration only: `target` is about to be assigned.
    Assignment { target: String },
    /// Narration only: an arithmetic operator.
    Arithmetic(Operator),
    /// Any other token.
    Pass,
    Accept,
    Reject(RejectReason),
}

impl fmt::Display for BalanceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BalanceAction::Push(opener) => write!(f, "push {}", opener),
            BalanceAction::Pop { opener } => write!(f, "pop {}", opener),
            BalanceAction::Assignment { target } => write!(f, "assignment to {}", target),
            BalanceAction::Arithmetic(op) => write!(f, "arithmetic {}", op),
            BalanceAction::Pass => f.write_str("pass"),
            BalanceAction::Accept => f.write_str("accept"),
            BalanceAction::Reject(reason) => write!(f, "reject: {}", reason),
        }
    }
}

/// Opener stack before one token was handled, and what was done with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceStep {
    /// Pending openers, oldest first.
    pub stack: Vec<Delimiter>,
    pub token: Token,
    pub action: BalanceAction,
}

impl BalanceStep {
    pub fn stack_text(&self) -> String {
        self.stack
            .iter()
            .map(Delimiter::lexeme)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub type BalanceOutcome = Outcome<BalanceStep>;

/// Runs the balance check over `tokens`. The last step is always taken at the end marker,
/// unless a mismatch stopped the scan first.
pub fn check_balance(tokens: &[Token]) -> BalanceOutcome {
    if tokens.is_empty() {
        return Outcome::new(Vec::new(), Verdict::Rejected(RejectReason::NoInput));
    }

    let stream = with_end_marker(tokens);
    let last = stream.len() - 1;
    let mut stack: Vec<Delimiter> = Vec::new();
    let mut steps = Vec::new();

    for (index, token) in stream[..last].iter().enumerate() {
        let action = scan_action(&stack, token, stream.get(index + 1));
        record(&mut steps, &stack, token, &action);

        match action {
            BalanceAction::Push(opener) => stack.push(opener),
            BalanceAction::Pop { .. } => {
                stack.pop();
            }
            BalanceAction::Reject(reason) => {
                return Outcome::new(steps, Verdict::Rejected(reason));
            }
            _ => {}
        }
    }

    let action = closing_action(&stack);
    record(&mut steps, &stack, &stream[last], &action);
    let verdict = match action {
        BalanceAction::Reject(reason) => Verdict::Rejected(reason),
        _ => Verdict::Accepted,
    };
    Outcome::new(steps, verdict)
}

fn record(steps: &mut Vec<BalanceStep>, stack: &[Delimiter], token: &Token, action: &BalanceAction) {
    log::debug!("openers [{}] token {:?}: {}", stack.len(), token.text(), action);
    steps.push(BalanceStep {
        stack: stack.to_vec(),
        token: token.clone(),
        action: action.clone(),
    });
}

fn scan_action(stack: &[Delimiter], token: &Token, next: Option<&Token>) -> BalanceAction {
    match token.kind() {
        TokenType::Delimiter(delim) if delim.is_opening() => BalanceAction::Push(delim),
        TokenType::Delimiter(closer) => match stack.last() {
            Some(&top) if Some(top) == closer.opener() => BalanceAction::Pop { opener: top },
            top => BalanceAction::Reject(RejectReason::UnmatchedClosingDelimiter {
                found: closer,
                expected: top.and_then(Delimiter::closer),
            }),
        },
        TokenType::Identifier
            if next.is_some_and(|t| t.kind() == TokenType::Operator(Operator::Assign)) =>
        {
            BalanceAction::Assignment {
                target: token.text().to_string(),
            }
        }
        TokenType::Operator(op) if op != Operator::Assign => BalanceAction::Arithmetic(op),
        _ => BalanceAction::Pass,
    }
}

fn closing_action(stack: &[Delimiter]) -> BalanceAction {
    if stack.is_empty() {
        BalanceAction::Accept
    } else {
        BalanceAction::Reject(RejectReason::UnclosedDelimiters {
            openers: stack.to_vec(),
        })
    }
}
