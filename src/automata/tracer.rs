//! Replayable step traces.
//!
//!     A trace is recomputed from scratch on every call and depends only on the token text and the
//!     type it is traced as. Characters that leave the automaton end the trace with a single step
//!     into [DEAD_STATE], labelled with the offending character. That only happens when the caller
//!     traces a token as a type that does not describe it; tracing a token as its own classified
//!     type always ends in the accept state.

use super::topology::{Automaton, CharClass, DEAD_STATE};
use super::AnimationStep;
use crate::token::{Token, TokenType};

/// Label of the step taken when an `Invalid` token has no first character.
const EMPTY_LABEL: &str = "ε";

/// Steps for `text` walked through the canonical automaton of `kind`.
pub fn trace_steps(text: &str, kind: TokenType) -> Vec<AnimationStep> {
    let automaton = Automaton::for_type(kind);
    let start = automaton.start_state();

    if kind.is_invalid() {
        let label = text
            .chars()
            .next()
            .map_or_else(|| EMPTY_LABEL.to_string(), |c| c.to_string());
        return vec![AnimationStep::new(start, DEAD_STATE, label)];
    }

    let mut steps = Vec::new();
    let mut state = start.to_string();
    let mut opener = None;

    for c in text.chars() {
        let Some(transition) = automaton.consume(&state, c, opener) else {
            log::trace!("{:?} rejects {:?} in state {}", kind, c, state);
            steps.push(AnimationStep::new(state, DEAD_STATE, c.to_string()));
            return steps;
        };
        if transition.class == CharClass::Quote {
            opener = Some(c);
        }
        log::trace!("{} --{}--> {}", transition.from, transition.label(), transition.to);
        steps.push(AnimationStep::new(
            transition.from.clone(),
            transition.to.clone(),
            transition.label(),
        ));
        state = transition.to.clone();
    }

    match automaton.lookahead(&state) {
        Some(transition) => steps.push(AnimationStep::new(
            transition.from.clone(),
            transition.to.clone(),
            transition.label(),
        )),
        None => steps.push(AnimationStep::new(
            state,
            DEAD_STATE,
            CharClass::Lookahead.label(),
        )),
    }
    steps
}

/// Steps for a token traced as its own classified type.
pub fn trace_token(token: &Token) -> Vec<AnimationStep> {
    trace_steps(token.text(), token.kind())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{classify, Operator};

    fn rendered(steps: &[AnimationStep]) -> Vec<String> {
        steps.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_identifier_trace() {
        let steps = trace_steps("ab1", TokenType::Identifier);
        assert_eq!(
            rendered(&steps),
            vec![
                "q0 --letter|_--> q1",
                "q1 --letter|digit|_--> q1",
                "q1 --letter|digit|_--> q1",
                "q1 --other--> q2",
            ]
        );
    }

    #[test]
    fn test_decimal_number_trace() {
        let steps = trace_steps("3.14", TokenType::Number);
        assert_eq!(
            rendered(&steps),
            vec![
                "q0 --digit--> q1",
                "q1 --.--> q2",
                "q2 --digit--> q3",
                "q3 --digit--> q3",
                "q3 --other--> q4",
            ]
        );
    }

    #[test]
    fn test_string_with_escape_trace() {
        let steps = trace_steps(r#""a\"""#, TokenType::StringLiteral);
        assert_eq!(
            rendered(&steps),
            vec![
                "q0 --quote--> q1",
                "q1 --char--> q1",
                "q1 --\\--> q2",
                "q2 --any--> q1",
                "q1 --quote--> q3",
                "q3 --other--> q4",
            ]
        );
    }

    #[test]
    fn test_operator_trace() {
        let steps = trace_steps("//", TokenType::Operator(Operator::FloorDiv));
        assert_eq!(
            rendered(&steps),
            vec!["q0 --/--> q1", "q1 --/--> q2", "q2 --other--> q3"]
        );
    }

    #[test]
    fn test_invalid_goes_straight_to_dead() {
        assert_eq!(
            trace_steps("@x", TokenType::Invalid),
            vec![AnimationStep::new("q0", DEAD_STATE, "@")]
        );
        assert_eq!(
            trace_steps("", TokenType::Invalid),
            vec![AnimationStep::new("q0", DEAD_STATE, "ε")]
        );
    }

    #[test]
    fn test_wrong_type_ends_in_dead_state() {
        let steps = trace_steps("1a", TokenType::Number);
        assert_eq!(rendered(&steps), vec!["q0 --digit--> q1", "q1 --a--> dead"]);

        let steps = trace_steps("1.", TokenType::Number);
        assert_eq!(steps.last().map(|s| s.to_string()).as_deref(), Some("q2 --other--> dead"));
    }

    #[test]
    fn test_steps_stay_inside_the_topology() {
        let cases = [
            ("@", TokenType::Invalid),
            ("", TokenType::Invalid),
            ("1a", TokenType::Number),
            ("1.", TokenType::Number),
            ("x", TokenType::Operator(Operator::Plus)),
            ("'it'", TokenType::StringLiteral),
            ("**", TokenType::Operator(Operator::Power)),
        ];
        for (text, kind) in cases {
            let automaton = Automaton::for_type(kind);
            for step in trace_steps(text, kind) {
                assert!(automaton.has_state(&step.from_state), "{:?} {}: {}", kind, text, step);
                assert!(automaton.has_state(&step.to_state), "{:?} {}: {}", kind, text, step);
            }
        }
    }

    #[test]
    fn test_trace_is_recomputed_identically() {
        let token = Token::detached("total_2");
        assert_eq!(token.kind(), classify("total_2"));
        assert_eq!(trace_token(&token), trace_token(&token));
    }
}
