//! Plain text output.

use crate::analysis::Analysis;
use crate::automata::AnimationStep;
use crate::parsing::{BalanceOutcome, ParseOutcome, RunOutcome};
use crate::token::{TokenTable, TokenType};

/// Shown for an empty delimiter stack.
const EMPTY_STACK: &str = "ε";

/// The token table with left-aligned columns.
pub fn token_table(table: &TokenTable) -> String {
    let rows: Vec<[String; 4]> = table
        .rows()
        .iter()
        .map(|row| {
            [
                row.token.clone(),
                row.type_name.clone(),
                row.line.to_string(),
                row.column.to_string(),
            ]
        })
        .collect();

    let mut widths = TokenTable::HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header = TokenTable::HEADERS.map(str::to_string);
    std::iter::once(&header)
        .chain(rows.iter())
        .map(|cells| aligned(cells, &widths))
        .collect::<Vec<_>>()
        .join("\n")
}

fn aligned(cells: &[String; 4], widths: &[usize; 4]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Header naming the token and the type it was traced as, then one line per step.
pub fn animation(text: &str, kind: TokenType, steps: &[AnimationStep]) -> String {
    let mut lines = vec![format!("token: {}", text), format!("type: {}", kind)];
    lines.extend(steps.iter().map(|step| step.to_string()));
    lines.join("\n")
}

/// Parser log. With `show_trace` off only the verdict line is printed.
pub fn parse_trace(outcome: &ParseOutcome, show_trace: bool) -> String {
    let mut lines = Vec::new();
    if show_trace {
        lines.push("START PDA".to_string());
        lines.extend(outcome.steps().iter().map(|step| {
            format!(
                "STACK: {} | INPUT: {} | {}",
                step.stack_text(),
                step.lookahead.text(),
                step.action
            )
        }));
    }
    lines.push(outcome.verdict().to_string());
    lines.join("\n")
}

/// Balance check log, same shape as [parse_trace].
pub fn balance_trace(outcome: &BalanceOutcome, show_trace: bool) -> String {
    let mut lines = Vec::new();
    if show_trace {
        lines.push("START BALANCE CHECK".to_string());
        lines.extend(outcome.steps().iter().map(|step| {
            let stack = step.stack_text();
            format!(
                "STACK: {} | INPUT: {} | {}",
                if stack.is_empty() { EMPTY_STACK } else { stack.as_str() },
                step.token.text(),
                step.action
            )
        }));
    }
    lines.push(outcome.verdict().to_string());
    lines.join("\n")
}

pub fn run_trace(outcome: &RunOutcome, show_trace: bool) -> String {
    match outcome {
        RunOutcome::Grammar(outcome) => parse_trace(outcome, show_trace),
        RunOutcome::Balance(outcome) => balance_trace(outcome, show_trace),
    }
}

/// Token table followed by the run log.
pub fn analysis(analysis: &Analysis, show_trace: bool) -> String {
    format!(
        "{}\n\n{}",
        token_table(&analysis.table()),
        run_trace(analysis.outcome(), show_trace)
    )
}
