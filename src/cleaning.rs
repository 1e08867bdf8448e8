//! Text cleaning.
//!
//! Light, safe normalization for forum text using pre-compiled regexes:
//! invisible characters are removed, whitespace runs are collapsed and raw
//! URLs are replaced by a placeholder token.
use lazy_static::lazy_static;
use regex::Regex;

/// Placeholder written over every matched URL.
pub const URL_TOKEN: &str = "<URL>";

lazy_static! {
    /// Zero-width space, BOM and no-break space.
    static ref INVISIBLE_RE: Regex = Regex::new("[\u{200b}\u{feff}\u{a0}]").unwrap();
    static ref WS_RE: Regex = Regex::new(r"\s+").unwrap();
    static ref URL_RE: Regex = Regex::new(r"https?://\S+").unwrap();
}

/// Clean one post's text.
///
/// Returns the empty string when nothing survives; callers drop such records.
pub fn clean(text: &str) -> String {
    let text = INVISIBLE_RE.replace_all(text, " ");
    let text = WS_RE.replace_all(&text, " ");
    let text = URL_RE.replace_all(text.trim(), URL_TOKEN);
    text.into_owned()
}
