//! Finite automata for token shapes, and the step tracer that animates them.
//!
//!     Every token type has one small canonical automaton ([topology]). The tracer walks a token's
//!     characters through the automaton of its type and records each transition taken as an
//!     [AnimationStep]. A renderer replays the steps one at a time; the core hands over the whole
//!     sequence up front and keeps no playback state.
//!
//!     Step sequences always chain: the first step leaves the start state, each step begins where
//!     the previous one ended, and a well-formed token's last step enters the accept state. The
//!     last edge is a non-consuming `other` edge, the lookahead a real scanner would use to decide
//!     the token is over.

pub mod topology;
pub mod tracer;

pub use topology::{Automaton, CharClass, State, Transition, DEAD_STATE};
pub use tracer::{trace_steps, trace_token};

use serde::Serialize;
use std::fmt;

/// One transition taken while tracing a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationStep {
    pub from_state: String,
    pub to_state: String,
    pub transition_label: String,
}

impl AnimationStep {
    pub fn new(
        from_state: impl Into<String>,
        to_state: impl Into<String>,
        transition_label: impl Into<String>,
    ) -> Self {
        Self {
            from_state: from_state.into(),
            to_state: to_state.into(),
            transition_label: transition_label.into(),
        }
    }

    pub fn enters_dead_state(&self) -> bool {
        self.to_state == DEAD_STATE
    }
}

impl fmt::Display for AnimationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} --{}--> {}",
            self.from_state, self.transition_label, self.to_state
        )
    }
}
