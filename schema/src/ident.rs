//! SQL identifier validation and quoting.

use regex_lite::Regex;
use std::sync::OnceLock;

fn identifier_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid"))
}

/// Returns true if `name` may be used as a table or column name.
///
/// Identifiers are spliced into statement text, so only plain ASCII names
/// are accepted.
pub fn is_valid_identifier(name: &str) -> bool {
    identifier_regex().is_match(name)
}

/// Quote an identifier for statement text.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
