use regex_syntax::{
    hir::literal::{ExtractKind, Extractor},
    parse,
};

/// Extract the literal prefixes every match of `pattern` must start with, for
/// use as Aho-Corasick prefilter keys.
///
/// All-or-nothing: if the prefix set is infinite, or any prefix is shorter
/// than `min_len` bytes or is not ASCII, an empty vec is returned and the
/// rule becomes an "always candidate". Dropping only the short prefixes would
/// let the regex match through a branch the prefilter never reports; non-ASCII
/// prefixes fold differently under the automaton's ASCII-only case
/// insensitivity than under the regex's Unicode `(?i)`.
pub(crate) fn extract_literals(pattern: &str, min_len: usize) -> Vec<String> {
    let hir = match parse(pattern) {
        Ok(h) => h,
        Err(_) => return Vec::new(),
    };

    let mut extractor = Extractor::new();
    extractor.kind(ExtractKind::Prefix);

    let seq = extractor.extract(&hir);
    let Some(literals) = seq.literals() else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(literals.len());
    for lit in literals {
        match std::str::from_utf8(lit.as_bytes()) {
            Ok(s) if s.len() >= min_len && s.is_ascii() => out.push(s.to_ascii_lowercase()),
            _ => return Vec::new(),
        }
    }
    out.sort();
    out.dedup();
    out
}
