use aho_corasick::{AhoCorasick, MatchKind};
use rayon::prelude::*;

use crate::error::Result;
use crate::literal::extract_literals;

/// Literal prefixes shorter than this are too common to be useful as
/// prefilter keys; rules that only have such prefixes are always tried.
const MIN_LITERAL_LEN: usize = 3;

/// Build the full case-insensitive regex string for a catalog pattern.
pub(crate) fn full_pattern(pattern: &str) -> String {
    format!("(?i)(?:{})", pattern)
}

// ---------------------------------------------------------------------------
// Matcher: one compiled pattern, regex when possible, fancy_regex otherwise
// ---------------------------------------------------------------------------

pub(crate) enum Matcher {
    Standard(regex::Regex),
    /// Patterns that need PCRE features (look-around, backreferences).
    Fancy(fancy_regex::Regex),
}

impl Matcher {
    /// Compile a catalog pattern. Patterns the `regex` crate rejects fall back
    /// to fancy_regex; if that fails too its error is returned.
    pub fn compile(pattern: &str) -> Result<Self> {
        let full = full_pattern(pattern);
        match regex::Regex::new(&full) {
            Ok(re) => Ok(Matcher::Standard(re)),
            Err(_) => Ok(Matcher::Fancy(fancy_regex::Regex::new(&full)?)),
        }
    }

    /// Captures of the leftmost match. A fancy_regex runtime error (backtrack
    /// limit) counts as no match.
    pub fn captures<'a>(&self, ua: &'a str) -> Option<Captures<'a>> {
        match self {
            Matcher::Standard(re) => re.captures(ua).map(Captures::Standard),
            Matcher::Fancy(re) => re.captures(ua).ok().flatten().map(Captures::Fancy),
        }
    }

    /// Byte offset just past the leftmost match.
    pub fn find_end(&self, ua: &str) -> Option<usize> {
        match self {
            Matcher::Standard(re) => re.find(ua).map(|m| m.end()),
            Matcher::Fancy(re) => re.find(ua).ok().flatten().map(|m| m.end()),
        }
    }

    pub fn is_fancy(&self) -> bool {
        matches!(self, Matcher::Fancy(_))
    }
}

// ---------------------------------------------------------------------------
// Captures: unified enum over regex::Captures and fancy_regex::Captures
// ---------------------------------------------------------------------------

/// Lightweight wrapper so callers don't need to know which regex engine
/// produced the match.
pub(crate) enum Captures<'a> {
    Standard(regex::Captures<'a>),
    Fancy(fancy_regex::Captures<'a>),
}

impl<'a> Captures<'a> {
    /// Get the matched text for capture group `i`, or `None` if the group
    /// didn't participate in the match.
    pub fn get_str(&self, i: usize) -> Option<&'a str> {
        match self {
            Captures::Standard(c) => c.get(i).map(|m| m.as_str()),
            Captures::Fancy(c) => c.get(i).map(|m| m.as_str()),
        }
    }

    /// Byte offset just past capture group `i`.
    pub fn end(&self, i: usize) -> Option<usize> {
        match self {
            Captures::Standard(c) => c.get(i).map(|m| m.end()),
            Captures::Fancy(c) => c.get(i).map(|m| m.end()),
        }
    }
}

// ---------------------------------------------------------------------------
// CompiledParser: ordered first-match-wins rule table
// ---------------------------------------------------------------------------

pub(crate) struct CompiledEntry<T> {
    pub matcher: Matcher,
    pub data: T,
}

/// Result of a successful match.
pub(crate) struct MatchResult<'a, T> {
    pub data: &'a T,
    pub captures: Captures<'a>,
}

/// Core matching engine: Aho-Corasick literal prefilter + per-rule regex.
///
/// Entry order is precedence. The prefilter only narrows the set of rules
/// worth running; candidates are always tried in ascending entry order, so
/// the result is the same as trying every rule in order.
///
/// The automaton folds ASCII case only, while the regexes fold Unicode case
/// (U+212A KELVIN SIGN matches `k`). Non-ASCII input therefore skips the
/// prefilter and is matched against every rule.
///
/// `T` is the data attached to each rule (robot name, browser name, ...).
pub(crate) struct CompiledParser<T> {
    /// Case-insensitive automaton over the literal prefixes of all rules.
    prefilter: Option<AhoCorasick>,
    /// Maps automaton pattern id → entry index.
    literal_to_entry: Vec<usize>,
    /// Entries without usable literals, in ascending order. Tried on every
    /// input.
    always: Vec<usize>,
    entries: Vec<CompiledEntry<T>>,
}

impl<T> CompiledParser<T> {
    /// Build a CompiledParser from an iterator of (regex_pattern, data) pairs.
    ///
    /// Patterns are compiled and their literals extracted in parallel; the
    /// order of `items` is kept as the match order.
    pub fn build(table: &'static str, items: impl IntoIterator<Item = (String, T)>) -> Result<Self>
    where
        T: Send,
    {
        let (patterns, data): (Vec<String>, Vec<T>) = items.into_iter().unzip();

        // Phase 1: compile matchers and extract literals in parallel.
        let compiled: Vec<(Matcher, Vec<String>)> = patterns
            .par_iter()
            .map(|pattern| -> Result<(Matcher, Vec<String>)> {
                let matcher = Matcher::compile(pattern)?;
                Ok((matcher, extract_literals(pattern, MIN_LITERAL_LEN)))
            })
            .collect::<Result<Vec<_>>>()?;

        // Phase 2: flatten literals into the automaton, remembering owners.
        let mut literals: Vec<String> = Vec::new();
        let mut literal_to_entry: Vec<usize> = Vec::new();
        let mut always: Vec<usize> = Vec::new();
        let mut entries: Vec<CompiledEntry<T>> = Vec::with_capacity(data.len());

        for (idx, ((matcher, lits), data)) in compiled.into_iter().zip(data).enumerate() {
            if lits.is_empty() {
                always.push(idx);
            }
            for lit in lits {
                literals.push(lit);
                literal_to_entry.push(idx);
            }
            entries.push(CompiledEntry { matcher, data });
        }

        let prefilter = if literals.is_empty() {
            None
        } else {
            Some(
                AhoCorasick::builder()
                    .ascii_case_insensitive(true)
                    .match_kind(MatchKind::Standard)
                    .build(&literals)?,
            )
        };

        tracing::debug!(
            table,
            rules = entries.len(),
            literals = literals.len(),
            always = always.len(),
            fancy = entries.iter().filter(|e| e.matcher.is_fancy()).count(),
            "rule table compiled"
        );

        Ok(Self {
            prefilter,
            literal_to_entry,
            always,
            entries,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Find the first matching entry in table order.
    pub fn match_first<'a>(&'a self, ua: &'a str) -> Option<MatchResult<'a, T>> {
        let Some(ac) = self.prefilter.as_ref().filter(|_| ua.is_ascii()) else {
            return self.first_of(0..self.entries.len(), ua);
        };

        let mut candidates: Vec<usize> = self.always.clone();
        candidates.extend(
            ac.find_overlapping_iter(ua)
                .map(|m| self.literal_to_entry[m.pattern().as_usize()]),
        );
        candidates.sort_unstable();
        candidates.dedup();

        self.first_of(candidates, ua)
    }

    /// First entry among `indices` (ascending) whose regex matches.
    fn first_of<'a>(
        &'a self,
        indices: impl IntoIterator<Item = usize>,
        ua: &'a str,
    ) -> Option<MatchResult<'a, T>> {
        indices.into_iter().find_map(|idx| {
            let entry = &self.entries[idx];
            entry.matcher.captures(ua).map(|captures| MatchResult {
                data: &entry.data,
                captures,
            })
        })
    }
}
