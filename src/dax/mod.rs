//! Cleaning and re-indentation of DAX expressions. This is a regex reflow
//! with a bracket stack, not a parser: malformed expressions format oddly
//! but never fail.

pub mod complexity;
pub mod tokens;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Functions whose argument lists are broken onto indented lines.
const BLOCK_FUNCTIONS: [&str; 10] = [
    "CALCULATE",
    "IF",
    "SWITCH",
    "FILTER",
    "TOTALYTD",
    "TOTALQTD",
    "TOTALMTD",
    "SAMEPERIODLASTYEAR",
    "DATESYTD",
    "DIVIDE",
];

static WHITESPACE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]+").expect("whitespace regex"));
static BLOCK_HEAD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(CALCULATE|IF|SWITCH|FILTER|TOTALYTD|TOTALQTD|TOTALMTD|SAMEPERIODLASTYEAR|DATESYTD|DIVIDE)\s*\(",
    )
    .expect("block head regex")
});
static COMMA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*").expect("comma regex"));
static BLANK_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").expect("blank line regex"));

/// Normalizes an expression for storage: trailing whitespace trimmed, empty
/// lines dropped, runs of spaces and tabs collapsed.
pub fn clean_expression(expr: &str) -> String {
    let lines: Vec<&str> = expr
        .split('\n')
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect();
    WHITESPACE_RUN_RE
        .replace_all(&lines.join("\n"), " ")
        .into_owned()
}

/// Re-indents an expression: block-function argument lists are broken onto
/// indented lines and each lone closing parenthesis is aligned with the line
/// that opened its block.
pub fn format_expression(expr: &str, indent_width: usize) -> String {
    if expr.trim().is_empty() {
        return String::new();
    }

    let indent = " ".repeat(indent_width);
    let cleaned = clean_expression(expr);

    let reflowed = BLOCK_HEAD_RE.replace_all(&cleaned, |caps: &Captures| {
        format!("{}(\n{indent}", &caps[1])
    });
    let reflowed = COMMA_RE.replace_all(&reflowed, format!(",\n{indent}").as_str());
    let aligned = align_closing_parens(&reflowed);
    let collapsed = BLANK_LINE_RE.replace_all(&aligned, "\n");

    collapsed.trim().to_string()
}

fn align_closing_parens(text: &str) -> String {
    let mut stack: Vec<usize> = Vec::new();
    let mut out: Vec<String> = Vec::new();

    for line in text.lines() {
        let stripped = line.trim();
        if is_block_function_line(stripped) {
            stack.push(line.len() - line.trim_start().len());
            out.push(line.to_string());
        } else if stripped == ")" {
            match stack.pop() {
                Some(head_indent) => out.push(format!("{})", " ".repeat(head_indent))),
                None => out.push(line.to_string()),
            }
        } else {
            out.push(line.to_string());
        }
    }

    out.join("\n")
}

fn is_block_function_line(stripped: &str) -> bool {
    let upper = stripped.to_ascii_uppercase();
    BLOCK_FUNCTIONS
        .iter()
        .any(|name| upper.starts_with(&format!("{name}(")))
}

/// Escapes backslashes and backticks so expressions survive Markdown
/// fenced blocks.
pub fn escape_for_markdown(text: &str) -> String {
    text.replace('\\', "\\\\").replace('`', "\\`")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_collapses_whitespace_and_drops_empty_lines() {
        let cleaned = clean_expression("SUM(\t Sales[Amount] )  \n\n   + 1  ");
        assert_eq!(cleaned, "SUM( Sales[Amount] )\n + 1");
    }

    #[test]
    fn clean_of_empty_input_is_empty() {
        assert_eq!(clean_expression(""), "");
        assert_eq!(clean_expression("   \n  \n"), "");
    }

    #[test]
    fn format_breaks_block_function_arguments() {
        let formatted = format_expression("CALCULATE(SUM(Sales[Amount]), Sales[Year] = 2024)", 4);
        let lines: Vec<&str> = formatted.lines().collect();
        assert_eq!(lines[0], "CALCULATE(");
        assert!(lines[1].starts_with("    SUM(Sales[Amount])"));
        assert!(lines[2].trim().starts_with("Sales[Year]"));
    }

    #[test]
    fn lone_closing_parens_align_with_their_block_head() {
        let aligned = align_closing_parens(
            "CALCULATE(\n    SUM(x),\n    FILTER(\n        T,\n        T[x] > 0\n        )\n        )",
        );
        let lines: Vec<&str> = aligned.lines().collect();
        assert_eq!(lines[5], "    )");
        assert_eq!(lines[6], ")");
    }

    #[test]
    fn format_preserves_and_aligns_existing_multiline_closers() {
        let formatted = format_expression("DIVIDE(\n[A],\n[B]\n)", 4);
        assert!(
            formatted.ends_with("\n)"),
            "closing paren should align with DIVIDE at column zero: {formatted:?}"
        );
    }

    #[test]
    fn format_respects_indent_width() {
        let formatted = format_expression("DIVIDE([A], [B])", 2);
        assert!(formatted.contains("\n  [A]"));
        assert!(!formatted.contains("\n    [A]"));
    }

    #[test]
    fn format_is_case_insensitive_for_function_heads() {
        let formatted = format_expression("calculate(sum(T[x]), T[y] > 1)", 4);
        assert!(formatted.starts_with("calculate(\n"));
    }

    #[test]
    fn format_of_blank_input_is_empty() {
        assert_eq!(format_expression("  ", 4), "");
    }

    #[test]
    fn unbalanced_expression_still_formats() {
        let formatted = format_expression("CALCULATE(SUM(Sales[Amount]", 4);
        assert!(formatted.contains("CALCULATE("));
    }

    #[test]
    fn markdown_escape_protects_backticks_and_backslashes() {
        assert_eq!(escape_for_markdown(r"a\b`c"), r"a\\b\`c");
    }
}
