use encoding_rs::{UTF_16BE, UTF_16LE, UTF_8};
use once_cell::sync::Lazy;
use regex::Regex;

/// Decodes schema bytes with a fallback chain: UTF-8 (BOM-aware, which also
/// covers UTF-16 inputs carrying a BOM), then UTF-16LE, then UTF-16BE, then
/// Latin-1. Latin-1 maps every byte, so decoding always yields text.
pub fn decode_with_fallback(bytes: &[u8]) -> String {
    let (text, _, had_errors) = UTF_8.decode(bytes);
    if !had_errors {
        return text.into_owned();
    }
    let (text, _, had_errors) = UTF_16LE.decode(bytes);
    if !had_errors {
        return text.into_owned();
    }
    let (text, _, had_errors) = UTF_16BE.decode(bytes);
    if !had_errors {
        return text.into_owned();
    }
    encoding_rs::mem::decode_latin1(bytes).into_owned()
}

static LINE_COMMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)(^|[\s{,\[])[ \t]*//.*$").expect("line comment regex"));
static BLOCK_COMMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("block comment regex"));
static TRAILING_COMMA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",\s*([}\]])").expect("trailing comma regex"));

/// Strips a BOM, NUL bytes, `//` and `/* */` comments, and trailing commas.
/// Applied only when a direct JSON parse fails.
pub fn clean_json_text(text: &str) -> String {
    let cleaned = text.trim_start_matches('\u{feff}').replace('\u{0}', "");
    let cleaned = LINE_COMMENT_RE.replace_all(&cleaned, "$1");
    let cleaned = BLOCK_COMMENT_RE.replace_all(&cleaned, "");
    TRAILING_COMMA_RE.replace_all(&cleaned, "$1").into_owned()
}
