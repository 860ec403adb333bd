use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Function,
    Logical,
    Date,
    Operator,
    Punctuation,
    ColumnRef,
    Number,
    Str,
    Whitespace,
    Identifier,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub kind: TokenKind,
}

static PATTERNS: Lazy<Vec<(Regex, TokenKind)>> = Lazy::new(|| {
    [
        (
            r"^(?:IF|SWITCH|CALCULATE|SUM|COUNT|AVERAGE|MAX|MIN|DISTINCTCOUNT|FILTER|ALL|VALUES|HASONEVALUE|ISBLANK|BLANK|IFERROR|COALESCE)\b",
            TokenKind::Function,
        ),
        (r"^(?:AND|OR|NOT|TRUE|FALSE)\b", TokenKind::Logical),
        (
            r"^(?:YEAR|MONTH|DAY|DATE|TODAY|NOW|EDATE|EOMONTH)\b",
            TokenKind::Date,
        ),
        (r"^[+\-*/=<>!]+", TokenKind::Operator),
        (r"^[(),]", TokenKind::Punctuation),
        (r"^\[[^\]]+\]", TokenKind::ColumnRef),
        (r"^\d+(?:\.\d+)?\b", TokenKind::Number),
        (r#"^"[^"]*""#, TokenKind::Str),
        (r"^\s+", TokenKind::Whitespace),
        (r"^[a-zA-Z_][a-zA-Z0-9_]*", TokenKind::Identifier),
    ]
    .into_iter()
    .map(|(pattern, kind)| (Regex::new(pattern).expect("token regex"), kind))
    .collect()
});

/// Splits an expression into token classes. Anything that matches no class
/// becomes a single-character unknown token, so tokenization never fails.
pub fn tokenize(expr: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < expr.len() {
        let rest = &expr[pos..];
        let matched = PATTERNS
            .iter()
            .find_map(|(re, kind)| re.find(rest).map(|m| (m.end(), *kind)));

        match matched {
            Some((len, kind)) if len > 0 => {
                tokens.push(Token {
                    text: &rest[..len],
                    kind,
                });
                pos += len;
            }
            _ => {
                let len = rest
                    .chars()
                    .next()
                    .map(|c| c.len_utf8())
                    .unwrap_or(1);
                tokens.push(Token {
                    text: &rest[..len],
                    kind: TokenKind::Unknown,
                });
                pos += len;
            }
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(expr: &str) -> Vec<TokenKind> {
        tokenize(expr)
            .into_iter()
            .filter(|token| token.kind != TokenKind::Whitespace)
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn classifies_function_call_with_column_ref() {
        assert_eq!(
            kinds("SUM(Sales[Amount])"),
            vec![
                TokenKind::Function,
                TokenKind::Punctuation,
                TokenKind::Identifier,
                TokenKind::ColumnRef,
                TokenKind::Punctuation,
            ]
        );
    }

    #[test]
    fn classifies_operators_numbers_and_strings() {
        assert_eq!(
            kinds(r#"[A] >= 1.5 + "x""#),
            vec![
                TokenKind::ColumnRef,
                TokenKind::Operator,
                TokenKind::Number,
                TokenKind::Operator,
                TokenKind::Str,
            ]
        );
    }

    #[test]
    fn function_prefix_of_identifier_stays_identifier() {
        // ALLSELECTED starts with ALL but is not the ALL function.
        let tokens = tokenize("ALLSELECTED(Sales)");
        assert_eq!(tokens[0].text, "ALLSELECTED");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
    }

    #[test]
    fn unknown_bytes_become_single_char_tokens() {
        let tokens = tokenize("a;b");
        assert_eq!(tokens[1].text, ";");
        assert_eq!(tokens[1].kind, TokenKind::Unknown);
    }

    #[test]
    fn round_trips_the_input_text() {
        let expr = "IF([A] > 0, SUM(T[B]), BLANK())";
        let rebuilt: String = tokenize(expr).iter().map(|token| token.text).collect();
        assert_eq!(rebuilt, expr);
    }
}
