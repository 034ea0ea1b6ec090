//! The fixed predictive grammar.
//!
//!     Program    → Statement Program | ε
//!     Statement  → Block | Assignment | Expression
//!     Block      → '{' Program '}'
//!     Assignment → id '=' Expression
//!     Expression → Term ExprRest
//!     ExprRest   → ('+'|'-') Term ExprRest | ε
//!     Term       → Factor TermRest
//!     TermRest   → ('*'|'/'|'//'|'%'|'**') Factor TermRest | ε
//!     Factor     → '(' Expression ')' | id | number | string
//!
//!     Recursion is on the right only, so expansion is always guarded by the lookahead and there
//!     is no ε cycle. Every choice is made from the current token except `Statement`, which peeks
//!     one token further to tell `id = ...` apart from an expression that starts with `id`.
//!
//!     Alternatives with an ε branch take it whenever the lookahead cannot start any other branch.
//!     Alternatives without one yield no production, and the parser rejects.

use crate::token::{Delimiter, Operator, Token, TokenType};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NonTerminal {
    Program,
    Statement,
    Block,
    Assignment,
    Expression,
    ExprRest,
    Term,
    TermRest,
    Factor,
}

impl NonTerminal {
    pub fn name(&self) -> &'static str {
        match self {
            NonTerminal::Program => "Program",
            NonTerminal::Statement => "Statement",
            NonTerminal::Block => "Block",
            NonTerminal::Assignment => "Assignment",
            NonTerminal::Expression => "Expression",
            NonTerminal::ExprRest => "ExprRest",
            NonTerminal::Term => "Term",
            NonTerminal::TermRest => "TermRest",
            NonTerminal::Factor => "Factor",
        }
    }
}

impl fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A terminal matches a token either by category (`id`, `number`, `string`) or by exact lexeme.
/// Serializes as its [name](Terminal::name).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terminal {
    Identifier,
    Number,
    StringLiteral,
    Operator(Operator),
    Delimiter(Delimiter),
    /// The `$` end marker at the bottom of the stack.
    End,
}

impl Terminal {
    pub fn matches(&self, token: &Token) -> bool {
        match (self, token.kind()) {
            (Terminal::Identifier, TokenType::Identifier)
            | (Terminal::Number, TokenType::Number)
            | (Terminal::StringLiteral, TokenType::StringLiteral)
            | (Terminal::End, TokenType::EndOfInput) => true,
            (Terminal::Operator(expected), TokenType::Operator(found)) => *expected == found,
            (Terminal::Delimiter(expected), TokenType::Delimiter(found)) => *expected == found,
            _ => false,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Terminal::Identifier => TokenType::Identifier.name(),
            Terminal::Number => TokenType::Number.name(),
            Terminal::StringLiteral => TokenType::StringLiteral.name(),
            Terminal::Operator(op) => op.lexeme(),
            Terminal::Delimiter(delim) => delim.lexeme(),
            Terminal::End => TokenType::EndOfInput.name(),
        }
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A symbol on the parser stack. Serializes as the text the trace prints for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrammarSymbol {
    Terminal(Terminal),
    NonTerminal(NonTerminal),
}

impl fmt::Display for GrammarSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarSymbol::Terminal(t) => t.fmt(f),
            GrammarSymbol::NonTerminal(nt) => nt.fmt(f),
        }
    }
}

impl Serialize for Terminal {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl Serialize for GrammarSymbol {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GrammarSymbol::Terminal(t) => t.serialize(serializer),
            GrammarSymbol::NonTerminal(nt) => nt.serialize(serializer),
        }
    }
}

impl From<Terminal> for GrammarSymbol {
    fn from(t: Terminal) -> Self {
        GrammarSymbol::Terminal(t)
    }
}

impl From<NonTerminal> for GrammarSymbol {
    fn from(nt: NonTerminal) -> Self {
        GrammarSymbol::NonTerminal(nt)
    }
}

/// One alternative: `lhs → rhs`. An empty `rhs` is the ε alternative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Production {
    pub lhs: NonTerminal,
    pub rhs: Vec<GrammarSymbol>,
}

impl Production {
    fn new(lhs: NonTerminal, rhs: Vec<GrammarSymbol>) -> Self {
        Self { lhs, rhs }
    }

    pub fn is_epsilon(&self) -> bool {
        self.rhs.is_empty()
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} →", self.lhs)?;
        if self.rhs.is_empty() {
            return write!(f, " ε");
        }
        for symbol in &self.rhs {
            write!(f, " {}", symbol)?;
        }
        Ok(())
    }
}

use GrammarSymbol::{NonTerminal as N, Terminal as T};

static PRODUCTIONS: Lazy<Vec<Production>> = Lazy::new(|| {
    use NonTerminal::*;

    let mut productions = vec![
        Production::new(Program, vec![N(Statement), N(Program)]),
        Production::new(Program, vec![]),
        Production::new(Statement, vec![N(Block)]),
        Production::new(Statement, vec![N(Assignment)]),
        Production::new(Statement, vec![N(Expression)]),
        Production::new(
            Block,
            vec![
                T(Terminal::Delimiter(Delimiter::OpenBrace)),
                N(Program),
                T(Terminal::Delimiter(Delimiter::CloseBrace)),
            ],
        ),
        Production::new(
            Assignment,
            vec![
                T(Terminal::Identifier),
                T(Terminal::Operator(Operator::Assign)),
                N(Expression),
            ],
        ),
        Production::new(Expression, vec![N(Term), N(ExprRest)]),
    ];
    productions.extend(
        Operator::ALL
            .into_iter()
            .filter(Operator::is_additive)
            .map(|op| Production::new(ExprRest, vec![T(Terminal::Operator(op)), N(Term), N(ExprRest)])),
    );
    productions.push(Production::new(ExprRest, vec![]));
    productions.push(Production::new(Term, vec![N(Factor), N(TermRest)]));
    productions.extend(
        Operator::ALL
            .into_iter()
            .filter(Operator::is_multiplicative)
            .map(|op| {
                Production::new(TermRest, vec![T(Terminal::Operator(op)), N(Factor), N(TermRest)])
            }),
    );
    productions.push(Production::new(TermRest, vec![]));
    productions.extend([
        Production::new(
            Factor,
            vec![
                T(Terminal::Delimiter(Delimiter::OpenParen)),
                N(Expression),
                T(Terminal::Delimiter(Delimiter::CloseParen)),
            ],
        ),
        Production::new(Factor, vec![T(Terminal::Identifier)]),
        Production::new(Factor, vec![T(Terminal::Number)]),
        Production::new(Factor, vec![T(Terminal::StringLiteral)]),
    ]);
    productions
});

/// Every production, grouped by left-hand side in grammar order.
pub fn productions() -> &'static [Production] {
    &PRODUCTIONS
}

/// The grammar as text, one numbered alternative per line.
pub fn listing() -> String {
    productions()
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{}. {}", i + 1, p))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Picks the production for `nt` given the lookahead and, for `Statement`, the token after it.
///
/// Returns `None` when no alternative applies and `nt` has no ε alternative.
pub fn select(
    nt: NonTerminal,
    lookahead: &Token,
    after: Option<&Token>,
) -> Option<&'static Production> {
    let alternatives = || productions().iter().filter(move |p| p.lhs == nt);
    let starting_with = |t: Terminal| {
        alternatives().find(|p| matches!(p.rhs.first(), Some(T(first)) if *first == t))
    };
    let leading = |first: NonTerminal| {
        alternatives().find(|p| matches!(p.rhs.first(), Some(N(n)) if *n == first))
    };
    let epsilon = || alternatives().find(|p| p.is_epsilon());
    let kind = lookahead.kind();

    match nt {
        NonTerminal::Program if starts_statement(kind) => leading(NonTerminal::Statement),
        NonTerminal::Program => epsilon(),
        NonTerminal::Statement => {
            let assigns = after.is_some_and(|t| t.kind() == TokenType::Operator(Operator::Assign));
            if kind == TokenType::Delimiter(Delimiter::OpenBrace) {
                leading(NonTerminal::Block)
            } else if kind == TokenType::Identifier && assigns {
                leading(NonTerminal::Assignment)
            } else if starts_expression(kind) {
                leading(NonTerminal::Expression)
            } else {
                None
            }
        }
        NonTerminal::Expression if starts_expression(kind) => leading(NonTerminal::Term),
        NonTerminal::Term if starts_expression(kind) => leading(NonTerminal::Factor),
        NonTerminal::Expression | NonTerminal::Term => None,
        NonTerminal::Block | NonTerminal::Assignment | NonTerminal::Factor => {
            terminal_for(kind).and_then(starting_with)
        }
        NonTerminal::ExprRest | NonTerminal::TermRest => {
            terminal_for(kind).and_then(starting_with).or_else(epsilon)
        }
    }
}

/// The terminal a token of `kind` would match, if any.
fn terminal_for(kind: TokenType) -> Option<Terminal> {
    match kind {
        TokenType::Identifier => Some(Terminal::Identifier),
        TokenType::Number => Some(Terminal::Number),
        TokenType::StringLiteral => Some(Terminal::StringLiteral),
        TokenType::Operator(op) => Some(Terminal::Operator(op)),
        TokenType::Delimiter(delim) => Some(Terminal::Delimiter(delim)),
        TokenType::EndOfInput => Some(Terminal::End),
        TokenType::Invalid => None,
    }
}

/// FIRST(Expression) = FIRST(Term) = FIRST(Factor).
fn starts_expression(kind: TokenType) -> bool {
    matches!(
        kind,
        TokenType::Identifier
            | TokenType::Number
            | TokenType::StringLiteral
            | TokenType::Delimiter(Delimiter::OpenParen)
    )
}

fn starts_statement(kind: TokenType) -> bool {
    starts_expression(kind) || kind == TokenType::Delimiter(Delimiter::OpenBrace)
}
