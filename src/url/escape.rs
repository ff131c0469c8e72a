//! Source escaping and path predicates
//!
//! Remote URLs delivered through `fetch`-style types are embedded as a path
//! segment, so they are percent-encoded while keeping `/` and `:` readable.

use regex::Regex;
use std::sync::OnceLock;

/// Runs of `/` that do not directly follow a `:`
static SLASH_RUN_PATTERN: OnceLock<Regex> = OnceLock::new();

fn get_slash_run_pattern() -> &'static Regex {
    SLASH_RUN_PATTERN.get_or_init(|| {
        // SAFETY: compile-time constant pattern, covered by the collapse tests
        Regex::new(r"([^:])/+").expect("Invalid slash regex - this is a compile-time bug")
    })
}

/// Percent-encode a path-like string, keeping `/` and `:` as-is
pub fn smart_escape(source: &str) -> String {
    urlencoding::encode(source)
        .replace("%2F", "/")
        .replace("%3A", ":")
}

/// `http:/` or `https:/` prefix, ASCII case-insensitive
pub fn is_remote_url(source: &str) -> bool {
    has_scheme_prefix(source, true)
}

/// Same prefix check as [`is_remote_url`] but case-sensitive
///
/// Used for version inference, which only skips lower-case schemes.
pub(crate) fn is_literal_remote_url(source: &str) -> bool {
    has_scheme_prefix(source, false)
}

fn has_scheme_prefix(source: &str, ignore_case: bool) -> bool {
    let starts_with = |prefix: &str| match source.get(..prefix.len()) {
        Some(head) if ignore_case => head.eq_ignore_ascii_case(prefix),
        Some(head) => head == prefix,
        None => false,
    };
    starts_with("http:/") || starts_with("https:/")
}

/// `v` followed by at least one ASCII digit, anchored at the start
pub fn is_versioned(source: &str) -> bool {
    let mut chars = source.chars();
    chars.next() == Some('v') && chars.next().is_some_and(|c| c.is_ascii_digit())
}

/// Collapse runs of `/` into one, except right after a `:`
///
/// A run following `:` keeps at most two slashes so `scheme://` survives.
pub fn collapse_slashes(url: &str) -> String {
    get_slash_run_pattern().replace_all(url, "$1/").into_owned()
}
