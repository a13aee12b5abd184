//! crates/wishlist_core/src/sanitize.rs
//!
//! Simple string transforms applied to game titles on their way to and from
//! the remote API. The remote storage layer expects quote and backslash
//! characters to arrive backslash-escaped, and hands them back the same way.

/// Escape a string for the remote storage layer.
///
/// Single quotes, double quotes and backslashes each gain a leading
/// backslash. `reverse_for_database` undoes this exactly.
pub fn for_database(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\'' | '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Reverse `for_database`: drop one level of backslash escaping.
///
/// A trailing lone backslash is dropped, matching the behavior of the
/// storage layer's own unescape.
pub fn reverse_for_database(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Strip markup tags, keeping only text content.
pub fn remove_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Trim leading and trailing whitespace.
pub fn cleanup(s: &str) -> String {
    s.trim().to_string()
}
