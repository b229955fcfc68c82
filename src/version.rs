/// Characters that end a version token.
fn is_separator(c: char) -> bool {
    c.is_ascii_whitespace() || matches!(c, ';' | '(' | ')' | ',')
}

/// Read the raw version token starting at byte offset `start` of `ua`, up to
/// the next separator. The token is returned as found: no numeric parsing and
/// no truncation of trailing components (`44.18363.8131` stays whole).
///
/// Returns `None` for an empty token or an offset that is not a char
/// boundary of `ua`.
pub(crate) fn token_at(ua: &str, start: usize) -> Option<&str> {
    let rest = ua.get(start..)?;
    let end = rest.find(is_separator).unwrap_or(rest.len());
    let token = &rest[..end];
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
