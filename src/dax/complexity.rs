use super::tokens::{tokenize, TokenKind};
use serde::Serialize;

/// Functions that weigh most heavily in the score.
const SCORED_FUNCTIONS: [&str; 6] = ["IF", "SWITCH", "CALCULATE", "FILTER", "ALL", "VALUES"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Medium,
    Complex,
}

impl Complexity {
    pub fn as_str(self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Medium => "medium",
            Complexity::Complex => "complex",
        }
    }

    pub fn i18n_key(self) -> &'static str {
        match self {
            Complexity::Simple => "complexity_simple",
            Complexity::Medium => "complexity_medium",
            Complexity::Complex => "complexity_complex",
        }
    }
}

/// Scores an expression: 3 points per scored function, 1 per operator
/// character, 2 per level of maximum parenthesis nesting, 1 per 50 chars.
pub fn complexity_score(expr: &str) -> u32 {
    if expr.is_empty() {
        return 0;
    }

    let mut score = 0u32;
    for token in tokenize(expr) {
        match token.kind {
            TokenKind::Function if SCORED_FUNCTIONS.contains(&token.text) => score += 3,
            TokenKind::Operator => score += token.text.len() as u32,
            _ => {}
        }
    }

    let mut depth = 0i32;
    let mut max_depth = 0i32;
    for ch in expr.chars() {
        if ch == '(' {
            depth += 1;
            max_depth = max_depth.max(depth);
        } else if ch == ')' {
            depth -= 1;
        }
    }
    score += max_depth.max(0) as u32 * 2;

    score + (expr.len() / 50) as u32
}

pub fn rate(expr: &str) -> Complexity {
    match complexity_score(expr) {
        0..=5 => Complexity::Simple,
        6..=15 => Complexity::Medium,
        _ => Complexity::Complex,
    }
}
