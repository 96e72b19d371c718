//! Markup escaping for user-entered text.
//!
//! Draft text is escaped once, when it leaves the form, so it can be sent to
//! the backend and later interpolated into rendered markup. Escaping is not
//! idempotent: `&` in an already escaped string is escaped again.

/// Escape markup-significant characters (`& < > " '`).
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
