//! JSON output.

use crate::Result;
use serde::Serialize;

/// Pretty-printed JSON for any core value.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automata::trace_steps;
    use crate::lexing::tokenize;
    use crate::parsing::parse;
    use crate::token::{Token, TokenType};

    #[test]
    fn test_animation_steps_use_wire_field_names() {
        let steps = trace_steps("7", TokenType::Number);
        let value: serde_json::Value =
            serde_json::from_str(&to_json(&steps).expect("serializes")).expect("parses back");
        assert_eq!(value[0]["fromState"], "q0");
        assert_eq!(value[0]["toState"], "q1");
        assert_eq!(value[0]["transitionLabel"], "digit");
        assert_eq!(value[1]["transitionLabel"], "other");
    }

    #[test]
    fn test_token_serializes_type_field() {
        let json = to_json(&Token::new("+", 2, 4)).expect("serializes");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parses back");
        assert_eq!(value["text"], "+");
        assert_eq!(value["type"], "+");
        assert_eq!(value["line"], 2);
    }

    #[test]
    fn test_stack_symbols_serialize_as_printed() {
        let outcome = parse(&tokenize("x = (1"));
        let value: serde_json::Value =
            serde_json::from_str(&to_json(&outcome).expect("serializes")).expect("parses back");

        let first = &value["steps"][0];
        assert_eq!(first["stack"], serde_json::json!(["$", "Program"]));
        assert_eq!(first["lookahead"]["type"], "id");

        let expansion = &value["steps"][2]["action"]["Expand"];
        assert_eq!(expansion["lhs"], "Assignment");
        assert_eq!(expansion["rhs"], serde_json::json!(["id", "=", "Expression"]));

        let reason = &value["verdict"]["Rejected"]["UnclosedExpansion"];
        assert_eq!(reason["expected"], ")");
    }
}
