//! Message and number formatting helpers.
//!
//! The comment and the job summary intentionally flatten messages
//! differently: the comment squeezes every whitespace run into one
//! `&nbsp;` so the message fits a markdown table cell, the summary keeps
//! line structure and only replaces ASCII spaces.

/// Marker appended to truncated text
pub const ELLIPSIS: &str = "...";

/// Non-breaking space entity used inside table cells
pub const NBSP: &str = "&nbsp;";

/// Truncate `s` to `max_length` UTF-16 code units, appending `...` when cut.
///
/// Lengths are counted in UTF-16 units to match GitHub's own string
/// handling. A surrogate pair split by the cut becomes U+FFFD.
pub fn truncate(s: &str, max_length: usize) -> String {
    let units: Vec<u16> = s.encode_utf16().collect();
    if units.len() <= max_length {
        return s.to_string();
    }
    format!("{}{}", String::from_utf16_lossy(&units[..max_length]), ELLIPSIS)
}

/// Replace literal `\n` escapes (backslash, n) with real line breaks
fn unescape_newlines(s: &str) -> String {
    s.replace("\\n", "\n")
}

/// Flatten a message into a single table-safe line.
pub fn compact_message(s: &str) -> String {
    unescape_newlines(s).split_whitespace().collect::<Vec<_>>().join(NBSP)
}

/// Render a message as a `<details>` block.
///
/// The first line becomes the summary, the remaining lines are joined
/// with `<br>` as the hidden body.
pub fn collapsible_message(s: &str) -> String {
    let normalized = unescape_newlines(s);
    let spaced = normalized.trim().replace(' ', NBSP);
    let mut lines = spaced.split('\n');
    let summary = lines.next().unwrap_or_default();
    let body = lines.collect::<Vec<_>>().join("<br>");

    format!("<details>\n<summary>{}</summary>\n\n{}\n</details>\n", summary, body)
}

/// Truncate `x` toward zero to `precision` decimal digits.
///
/// Never rounds to nearest, so displayed sums stay conservative. The value
/// is first reduced to 15 significant digits and shifted by its decimal
/// exponent, so `2.3` stays `2.3` and `22.999999999999996` reads as `23`.
pub fn floor(x: f64, precision: u32) -> f64 {
    if !x.is_finite() {
        return x;
    }
    let decimal = significant(x);
    let truncated = shift(decimal, precision as i32).trunc();
    shift(truncated, -(precision as i32))
}

fn significant(x: f64) -> f64 {
    format!("{:.14e}", x).parse().unwrap_or(x)
}

/// Multiply by `10^exponent` through the decimal representation
fn shift(x: f64, exponent: i32) -> f64 {
    format!("{}e{}", x, exponent).parse().unwrap_or(x)
}

/// Shortest decimal rendering without trailing zeros ("3", "30.05").
pub fn format_number(x: f64) -> String {
    // avoid "-0"
    if x == 0.0 { "0".to_string() } else { x.to_string() }
}
