//! Property-based tests for classification, automaton traces and both checkers.

use lexsyn::automata::DEAD_STATE;
use lexsyn::{
    check_balance, classify, parse, tokenize, trace_steps, Automaton, Delimiter, TokenType,
};
use proptest::prelude::*;

const LITERALS: [&str; 15] = [
    "$", "+", "-", "*", "/", "//", "%", "**", "=", "(", ")", "[", "]", "{", "}",
];

const SOUP: [&str; 14] = [
    "x", "count", "1", "2.5", "'s'", "+", "*", "//", "=", "(", ")", "[", "]", "{",
];

fn token_like() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z_][a-zA-Z0-9_]{0,8}",
        "[0-9]{1,5}",
        "[0-9]{1,4}\\.[0-9]{1,3}",
        "\"[a-z ]{0,6}\"",
        "'[a-z ]{0,6}'",
        "\"[a-z]{0,3}\\\\[a-z\"][a-z]{0,3}\"",
        prop::sample::select(LITERALS.to_vec()).prop_map(str::to_string),
    ]
}

fn soup_source() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(SOUP.to_vec()), 0..16)
        .prop_map(|words| words.join(" "))
}

fn nested_delimiters() -> impl Strategy<Value = Vec<Delimiter>> {
    prop::collection::vec(
        prop::sample::select(vec![
            Delimiter::OpenParen,
            Delimiter::OpenBracket,
            Delimiter::OpenBrace,
        ]),
        0..8,
    )
}

proptest! {
    #[test]
    fn classify_never_panics(text in ".*") {
        let _ = classify(&text);
    }

    #[test]
    fn literals_take_priority(literal in prop::sample::select(LITERALS.to_vec())) {
        let kind = classify(literal);
        prop_assert!(
            matches!(kind, TokenType::Operator(_) | TokenType::Delimiter(_) | TokenType::EndOfInput),
            "{} classified as {:?}", literal, kind
        );
        prop_assert_eq!(kind.name(), literal);
    }

    #[test]
    fn traces_chain_from_start_to_accept(text in token_like()) {
        let kind = classify(&text);
        prop_assume!(!kind.is_invalid());

        let automaton = Automaton::for_type(kind);
        let steps = trace_steps(&text, kind);

        prop_assert!(!steps.is_empty());
        prop_assert_eq!(steps[0].from_state.as_str(), automaton.start_state());
        for pair in steps.windows(2) {
            prop_assert_eq!(&pair[0].to_state, &pair[1].from_state);
        }
        let last = steps.last().map(|step| step.to_state.as_str());
        prop_assert_eq!(last, automaton.accept_state());
    }

    #[test]
    fn invalid_traces_go_straight_to_dead_state(text in "[#@!?;,.~^&|][a-z]{0,4}") {
        prop_assert_eq!(classify(&text), TokenType::Invalid);

        let steps = trace_steps(&text, TokenType::Invalid);
        prop_assert_eq!(steps.len(), 1);
        prop_assert_eq!(steps[0].from_state.as_str(), "q0");
        prop_assert_eq!(steps[0].to_state.as_str(), DEAD_STATE);
    }

    #[test]
    fn every_step_names_states_of_the_automaton(
        text in "\\PC{0,6}",
        literal in prop::sample::select(LITERALS.to_vec())
    ) {
        for kind in [classify(&text), TokenType::Invalid, TokenType::Number, classify(literal)] {
            let automaton = Automaton::for_type(kind);
            let states: Vec<&str> = automaton.states().iter().map(|s| s.id.as_str()).collect();
            for step in trace_steps(&text, kind) {
                prop_assert!(states.contains(&step.from_state.as_str()), "{:?}: {}", kind, step);
                prop_assert!(states.contains(&step.to_state.as_str()), "{:?}: {}", kind, step);
            }
        }
    }

    #[test]
    fn tracing_is_repeatable(text in token_like()) {
        let kind = classify(&text);
        prop_assert_eq!(trace_steps(&text, kind), trace_steps(&text, kind));
    }

    #[test]
    fn parsing_is_idempotent(source in soup_source()) {
        let tokens = tokenize(&source);
        prop_assert_eq!(parse(&tokens), parse(&tokens));
        prop_assert_eq!(check_balance(&tokens), check_balance(&tokens));
    }

    #[test]
    fn grammar_acceptance_implies_balance(source in soup_source()) {
        let tokens = tokenize(&source);
        if parse(&tokens).is_accepted() {
            prop_assert!(check_balance(&tokens).is_accepted(), "source: {}", source);
        }
    }

    #[test]
    fn properly_nested_delimiters_balance(openers in nested_delimiters()) {
        let closers = openers.iter().rev().filter_map(|d| d.closer());
        let source = openers
            .iter()
            .copied()
            .chain(closers)
            .map(|d| d.lexeme())
            .collect::<Vec<_>>()
            .join(" x ");

        let tokens = tokenize(&source);
        prop_assume!(!tokens.is_empty());
        prop_assert!(check_balance(&tokens).is_accepted(), "source: {}", source);
    }
}
