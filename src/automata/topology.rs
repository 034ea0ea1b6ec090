//! Canonical automaton per token type.
//!
//!     States are named `q0`..`qN` in creation order, `q0` is always the start state and the
//!     error sink is [DEAD_STATE]. Operators, delimiters and the end marker get a straight chain
//!     with one edge per lexeme character. Every automaton lists [DEAD_STATE] among its states.
//!     The `Invalid` automaton has no accept state at all, only an edge from `q0` into the sink.

use crate::token::classification::{is_identifier_continue, is_identifier_start, is_quote};
use crate::token::{Delimiter, Operator, TokenType, END_MARKER};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

/// Error sink shared by every automaton.
pub const DEAD_STATE: &str = "dead";

/// Which characters an edge accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CharClass {
    Exact(char),
    Digit,
    IdentifierStart,
    IdentifierContinue,
    /// Opening `"` or `'`.
    Quote,
    /// The same quote character that opened the literal.
    ClosingQuote,
    Escape,
    /// Any character, used after an escape.
    Any,
    /// Any character except the opening quote and `\`.
    StringChar,
    /// Non-consuming edge taken once the token's characters run out.
    Lookahead,
}

impl CharClass {
    pub fn label(&self) -> String {
        match self {
            CharClass::Exact(c) => c.to_string(),
            CharClass::Digit => "digit".to_string(),
            CharClass::IdentifierStart => "letter|_".to_string(),
            CharClass::IdentifierContinue => "letter|digit|_".to_string(),
            CharClass::Quote | CharClass::ClosingQuote => "quote".to_string(),
            CharClass::Escape => "\\".to_string(),
            CharClass::Any => "any".to_string(),
            CharClass::StringChar => "char".to_string(),
            CharClass::Lookahead => "other".to_string(),
        }
    }

    /// Whether `c` can take this edge. `opener` is the quote that opened a string literal.
    pub fn matches(&self, c: char, opener: Option<char>) -> bool {
        match self {
            CharClass::Exact(expected) => c == *expected,
            CharClass::Digit => c.is_ascii_digit(),
            CharClass::IdentifierStart => is_identifier_start(c),
            CharClass::IdentifierContinue => is_identifier_continue(c),
            CharClass::Quote => is_quote(c),
            CharClass::ClosingQuote => opener == Some(c),
            CharClass::Escape => c == '\\',
            CharClass::Any => true,
            CharClass::StringChar => c != '\\' && opener.map_or(!is_quote(c), |q| c != q),
            CharClass::Lookahead => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct State {
    pub id: String,
    pub accepting: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: String,
    pub to: String,
    pub class: CharClass,
}

impl Transition {
    pub fn label(&self) -> String {
        self.class.label()
    }
}

/// A token-shape automaton: states, labelled edges, start and accept state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Automaton {
    kind: TokenType,
    states: Vec<State>,
    transitions: Vec<Transition>,
    start: String,
    accept: Option<String>,
}

static AUTOMATA: Lazy<HashMap<TokenType, Automaton>> = Lazy::new(|| {
    let mut kinds = vec![
        TokenType::Number,
        TokenType::Identifier,
        TokenType::StringLiteral,
        TokenType::EndOfInput,
        TokenType::Invalid,
    ];
    kinds.extend(Operator::ALL.into_iter().map(TokenType::Operator));
    kinds.extend(Delimiter::ALL.into_iter().map(TokenType::Delimiter));
    kinds
        .into_iter()
        .map(|kind| (kind, Automaton::build(kind)))
        .collect()
});

impl Automaton {
    /// The canonical automaton for `kind`.
    pub fn for_type(kind: TokenType) -> &'static Automaton {
        AUTOMATA
            .get(&kind)
            .expect("every token type has a prebuilt automaton")
    }

    fn build(kind: TokenType) -> Self {
        match kind {
            TokenType::Identifier => Builder::new(kind, 3)
                .edge(0, 1, CharClass::IdentifierStart)
                .edge(1, 1, CharClass::IdentifierContinue)
                .edge(1, 2, CharClass::Lookahead)
                .finish(Some(2)),
            TokenType::Number => Builder::new(kind, 5)
                .edge(0, 1, CharClass::Digit)
                .edge(1, 1, CharClass::Digit)
                .edge(1, 2, CharClass::Exact('.'))
                .edge(2, 3, CharClass::Digit)
                .edge(3, 3, CharClass::Digit)
                .edge(1, 4, CharClass::Lookahead)
                .edge(3, 4, CharClass::Lookahead)
                .finish(Some(4)),
            TokenType::StringLiteral => Builder::new(kind, 5)
                .edge(0, 1, CharClass::Quote)
                .edge(1, 2, CharClass::Escape)
                .edge(2, 1, CharClass::Any)
                .edge(1, 3, CharClass::ClosingQuote)
                .edge(1, 1, CharClass::StringChar)
                .edge(3, 4, CharClass::Lookahead)
                .finish(Some(4)),
            TokenType::Operator(op) => Self::literal(kind, op.lexeme()),
            TokenType::Delimiter(delim) => Self::literal(kind, delim.lexeme()),
            TokenType::EndOfInput => Self::literal(kind, END_MARKER),
            TokenType::Invalid => Builder::new(kind, 1)
                .dead_edge(0, CharClass::Any)
                .finish(None),
        }
    }

    fn literal(kind: TokenType, lexeme: &str) -> Self {
        let chars: Vec<char> = lexeme.chars().collect();
        let last = chars.len();
        let builder = chars
            .iter()
            .enumerate()
            .fold(Builder::new(kind, last + 2), |builder, (i, c)| {
                builder.edge(i, i + 1, CharClass::Exact(*c))
            });
        builder
            .edge(last, last + 1, CharClass::Lookahead)
            .finish(Some(last + 1))
    }

    pub fn kind(&self) -> TokenType {
        self.kind
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn start_state(&self) -> &str {
        &self.start
    }

    /// The accept state, `None` for the `Invalid` automaton.
    pub fn accept_state(&self) -> Option<&str> {
        self.accept.as_deref()
    }

    pub fn has_state(&self, id: &str) -> bool {
        self.states.iter().any(|state| state.id == id)
    }

    /// First consuming edge out of `state` that accepts `c`, in declaration order.
    pub fn consume(&self, state: &str, c: char, opener: Option<char>) -> Option<&Transition> {
        self.transitions
            .iter()
            .filter(|t| t.from == state)
            .find(|t| t.class.matches(c, opener))
    }

    /// The `other` edge out of `state`, if the token may end there.
    pub fn lookahead(&self, state: &str) -> Option<&Transition> {
        self.transitions
            .iter()
            .find(|t| t.from == state && t.class == CharClass::Lookahead)
    }
}

struct Builder {
    kind: TokenType,
    state_count: usize,
    transitions: Vec<Transition>,
}

impl Builder {
    fn new(kind: TokenType, state_count: usize) -> Self {
        Self {
            kind,
            state_count,
            transitions: Vec::new(),
        }
    }

    fn edge(mut self, from: usize, to: usize, class: CharClass) -> Self {
        self.transitions.push(Transition {
            from: state_id(from),
            to: state_id(to),
            class,
        });
        self
    }

    fn dead_edge(mut self, from: usize, class: CharClass) -> Self {
        self.transitions.push(Transition {
            from: state_id(from),
            to: DEAD_STATE.to_string(),
            class,
        });
        self
    }

    fn finish(self, accept: Option<usize>) -> Automaton {
        let states = (0..self.state_count)
            .map(|i| State {
                id: state_id(i),
                accepting: Some(i) == accept,
            })
            .chain(std::iter::once(State {
                id: DEAD_STATE.to_string(),
                accepting: false,
            }))
            .collect();
        Automaton {
            kind: self.kind,
            states,
            transitions: self.transitions,
            start: state_id(0),
            accept: accept.map(state_id),
        }
    }
}

fn state_id(index: usize) -> String {
    format!("q{}", index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_edge_connects_known_states() {
        for automaton in AUTOMATA.values() {
            for t in automaton.transitions() {
                assert!(automaton.has_state(&t.from), "{:?}: {}", automaton.kind(), t.from);
                assert!(automaton.has_state(&t.to), "{:?}: {}", automaton.kind(), t.to);
            }
            assert_eq!(automaton.start_state(), "q0");
        }
    }

    #[test]
    fn test_accept_state_is_reached_only_by_lookahead() {
        for automaton in AUTOMATA.values() {
            let Some(accept) = automaton.accept_state() else {
                continue;
            };
            for t in automaton.transitions().iter().filter(|t| t.to == accept) {
                assert_eq!(t.class, CharClass::Lookahead);
            }
        }
    }

    #[test]
    fn test_power_operator_chain() {
        let automaton = Automaton::for_type(TokenType::Operator(Operator::Power));
        let labels: Vec<_> = automaton.transitions().iter().map(|t| t.label()).collect();
        assert_eq!(labels, vec!["*", "*", "other"]);
        assert_eq!(automaton.accept_state(), Some("q3"));
    }

    #[test]
    fn test_invalid_automaton_has_no_accept_state() {
        let automaton = Automaton::for_type(TokenType::Invalid);
        assert_eq!(automaton.accept_state(), None);
        let ids: Vec<_> = automaton.states().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["q0", DEAD_STATE]);
        assert!(automaton.states().iter().all(|s| !s.accepting));

        let edges: Vec<_> = automaton
            .transitions()
            .iter()
            .map(|t| (t.from.as_str(), t.to.as_str(), t.class))
            .collect();
        assert_eq!(edges, vec![("q0", DEAD_STATE, CharClass::Any)]);
    }

    #[test]
    fn test_dead_state_is_listed_and_never_accepting() {
        for automaton in AUTOMATA.values() {
            assert!(automaton.has_state(DEAD_STATE), "{:?}", automaton.kind());
            assert!(!automaton.has_state("q99"));
            let dead = automaton.states().iter().find(|s| s.id == DEAD_STATE);
            assert_eq!(dead.map(|s| s.accepting), Some(false));
        }
    }

    #[test]
    fn test_string_char_excludes_only_the_opener() {
        assert!(CharClass::StringChar.matches('\'', Some('"')));
        assert!(!CharClass::StringChar.matches('"', Some('"')));
        assert!(!CharClass::StringChar.matches('\\', Some('"')));
    }
}
