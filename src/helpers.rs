/// Is `sub` contained in `s`, comparing ASCII letters case-insensitively?
///
/// An empty `sub` never matches, so an empty device token in a user catalog
/// cannot label every UA.
pub(crate) fn contains_ignore_ascii_case(s: &str, sub: &str) -> bool {
    let (s, sub) = (s.as_bytes(), sub.as_bytes());
    if sub.is_empty() || sub.len() > s.len() {
        return false;
    }
    s.windows(sub.len())
        .any(|window| window.eq_ignore_ascii_case(sub))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_ascii_case() {
        assert!(contains_ignore_ascii_case("Mozilla/5.0 (iPhone; CPU)", "iphone"));
        assert!(contains_ignore_ascii_case("IPOD TOUCH", "iPod touch"));
        assert!(!contains_ignore_ascii_case("Mozilla/5.0 (iPad)", "iPhone"));
    }

    #[test]
    fn empty_and_oversized_needles() {
        assert!(!contains_ignore_ascii_case("anything", ""));
        assert!(!contains_ignore_ascii_case("iPo", "iPod"));
    }
}
