//! Predictive pushdown parser.
//!
//!     The stack starts as `$ Program` (bottom to top) and the token stream always ends with a `$`
//!     end marker. Each iteration looks at the stack top and the current token:
//!
//!     - `$` on top and `$` as lookahead: accept.
//!     - a non-terminal on top: replace it with the right-hand side of the production chosen by
//!       the lookahead, pushed in reverse so the leftmost symbol ends up on top.
//!     - a terminal on top: it must match the lookahead; pop it and advance.
//!
//!     Any other combination rejects immediately. Each iteration either consumes a token, pops a
//!     symbol, or expands under a lookahead guard, and the grammar has no ε cycles, so the loop
//!     always terminates.

use super::{Outcome, RejectReason, Verdict};
use crate::grammar::{self, GrammarSymbol, NonTerminal, Production, Terminal};
use crate::token::{with_end_marker, Token};
use serde::Serialize;
use std::fmt;

/// What one iteration did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ParseAction {
    /// Replace a non-terminal with a production's right-hand side.
    Expand(Production),
    /// Pop a terminal that matched the lookahead and advance.
    Match(Terminal),
    Accept,
    Reject(RejectReason),
}

impl fmt::Display for ParseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAction::Expand(production) => write!(f, "expand {}", production),
            ParseAction::Match(terminal) => write!(f, "match {}", terminal),
            ParseAction::Accept => f.write_str("accept"),
            ParseAction::Reject(reason) => write!(f, "reject: {}", reason),
        }
    }
}

/// Parser state before one iteration, and what the iteration did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseStep {
    /// Stack contents, bottom first.
    pub stack: Vec<GrammarSymbol>,
    pub lookahead: Token,
    pub action: ParseAction,
}

impl ParseStep {
    /// The stack as space separated symbols, bottom first.
    pub fn stack_text(&self) -> String {
        self.stack
            .iter()
            .map(|symbol| symbol.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub type ParseOutcome = Outcome<ParseStep>;

/// Runs the grammar check over `tokens`.
///
/// An end marker is appended unless the last token already is one. An empty slice is rejected
/// with [RejectReason::NoInput]; a slice holding only the end marker is the empty program and is
/// accepted.
pub fn parse(tokens: &[Token]) -> ParseOutcome {
    if tokens.is_empty() {
        return Outcome::new(Vec::new(), Verdict::Rejected(RejectReason::NoInput));
    }

    let stream = with_end_marker(tokens);
    let mut stack = vec![
        GrammarSymbol::Terminal(Terminal::End),
        GrammarSymbol::NonTerminal(NonTerminal::Program),
    ];
    let mut cursor = 0;
    let mut steps = Vec::new();

    let verdict = loop {
        let lookahead = &stream[cursor];
        let action = decide(&stack, &stream, cursor);
        log::debug!(
            "stack [{}] lookahead {:?}: {}",
            stack.iter().map(|s| s.to_string()).collect::<Vec<_>>().join(" "),
            lookahead.text(),
            action
        );
        steps.push(ParseStep {
            stack: stack.clone(),
            lookahead: lookahead.clone(),
            action: action.clone(),
        });

        match action {
            ParseAction::Expand(production) => {
                stack.pop();
                stack.extend(production.rhs.iter().rev().copied());
            }
            ParseAction::Match(_) => {
                stack.pop();
                cursor += 1;
            }
            ParseAction::Accept => break final_verdict(&stack, &stream, cursor),
            ParseAction::Reject(reason) => break Verdict::Rejected(reason),
        }
    };

    Outcome::new(steps, verdict)
}

fn decide(stack: &[GrammarSymbol], stream: &[Token], cursor: usize) -> ParseAction {
    let lookahead = &stream[cursor];
    let Some(top) = stack.last() else {
        return ParseAction::Reject(RejectReason::UnconsumedInput {
            found: lookahead.text().to_string(),
        });
    };

    match top {
        GrammarSymbol::Terminal(Terminal::End) if lookahead.is_end_marker() => ParseAction::Accept,
        GrammarSymbol::Terminal(Terminal::End) => {
            ParseAction::Reject(RejectReason::UnconsumedInput {
                found: lookahead.text().to_string(),
            })
        }
        GrammarSymbol::NonTerminal(nt) => {
            match grammar::select(*nt, lookahead, stream.get(cursor + 1)) {
                Some(production) => ParseAction::Expand(production.clone()),
                None => ParseAction::Reject(RejectReason::NoApplicableProduction {
                    non_terminal: *nt,
                    lookahead: lookahead.text().to_string(),
                }),
            }
        }
        GrammarSymbol::Terminal(terminal) if terminal.matches(lookahead) => {
            ParseAction::Match(*terminal)
        }
        GrammarSymbol::Terminal(terminal) if lookahead.is_end_marker() => {
            ParseAction::Reject(RejectReason::UnclosedExpansion {
                expected: *terminal,
            })
        }
        GrammarSymbol::Terminal(terminal) => ParseAction::Reject(RejectReason::TerminalMismatch {
            expected: *terminal,
            found: lookahead.text().to_string(),
        }),
    }
}

/// Accept only with the stack down to `$` and the cursor on the final end marker. A `$` typed
/// in the middle of the input reaches the accept rule early and is caught here.
fn final_verdict(stack: &[GrammarSymbol], stream: &[Token], cursor: usize) -> Verdict {
    let stack_is_bottom = stack == [GrammarSymbol::Terminal(Terminal::End)];
    let at_last_token = cursor + 1 == stream.len();
    if stack_is_bottom && at_last_token {
        return Verdict::Accepted;
    }
    let found = stream
        .get(cursor + 1)
        .map_or_else(|| stream[cursor].text().to_string(), |t| t.text().to_string());
    Verdict::Rejected(RejectReason::UnconsumedInput { found })
}
