//! # lexsyn
//!
//! The front end of a compiler, small enough to watch: token classification, finite-automaton
//! traces of how each token is recognised, and a pushdown-automaton check of a token stream
//! against a fixed expression grammar.
//!
//! Layout
//!
//!     token        Token values, the classifier and the token table.
//!     lexing       Source text to classified tokens (logos scanner).
//!     automata     Per-type automaton topologies and the animation step tracer.
//!     grammar      Grammar symbols and the production table.
//!     parsing      The predictive PDA parser and the separate delimiter balance check.
//!     analysis     Tokenize and check in one call.
//!     formats      Text and JSON renderers.
//!
//! Everything here is pure: no I/O, no state kept between calls. Rendering, playback pacing and
//! user interaction belong to the caller; see the `lexsyn-cli` crate for one such caller.
//!
//! Typical use
//!
//!     let analysis = lexsyn::analyze("x = 1 + 2 * 3", ParseMode::Grammar);
//!     assert!(analysis.verdict().is_accepted());
//!
//!     let token = &analysis.tokens()[0];
//!     for step in lexsyn::trace_token(token) { println!("{}", step); }

pub mod analysis;
pub mod automata;
pub mod error;
pub mod formats;
pub mod grammar;
pub mod lexing;
pub mod parsing;
pub mod token;

pub use analysis::{analyze, Analysis};
pub use automata::{trace_steps, trace_token, AnimationStep, Automaton};
pub use error::{Error, Result};
pub use formats::OutputFormat;
pub use grammar::{GrammarSymbol, NonTerminal, Terminal};
pub use lexing::tokenize;
pub use parsing::{
    check_balance, parse, BalanceOutcome, ParseMode, ParseOutcome, ParseStep, RejectReason,
    RunOutcome, Verdict,
};
pub use token::{classify, Delimiter, Operator, Token, TokenType};
