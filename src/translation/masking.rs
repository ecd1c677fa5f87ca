/*!
 * Preserve-term masking.
 *
 * Terms the caller wants left untranslated are swapped for placeholder
 * tokens before a chunk goes to the translator and swapped back afterwards.
 * Placeholders look like `TERM_3_X`: no spaces, no punctuation a translator
 * would rewrite, and the trailing `_X` keeps `TERM_1_X` from being a prefix
 * of `TERM_11_X`.
 *
 * Replacement happens term by term in list order. A term that is a substring
 * of an earlier term, or of an already inserted placeholder, is affected by
 * that order. Placeholder-shaped text already present in the input is not
 * escaped.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Capitalized words of three or more letters, used for term suggestions
static CAPITALIZED_WORD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z][a-zA-Z]{2,}\b").expect("valid capitalized word regex")
});

/// Placeholder for the term at `index` in the caller's list
pub fn placeholder(index: usize) -> String {
    format!("TERM_{}_X", index)
}

/// Whether `token` has the exact shape of a placeholder
pub fn is_placeholder(token: &str) -> bool {
    token
        .strip_prefix("TERM_")
        .and_then(|rest| rest.strip_suffix("_X"))
        .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
}

/// Placeholder-to-term mapping for a single chunk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermMap {
    entries: Vec<(String, String)>,
}

impl TermMap {
    /// Number of placeholders
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no term was registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Term registered for a placeholder
    pub fn term_for(&self, placeholder: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == placeholder)
            .map(|(_, term)| term.as_str())
    }

    /// Placeholder/term pairs in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, t)| (p.as_str(), t.as_str()))
    }
}

/// Replace every occurrence of each term with its placeholder
///
/// Every non-empty term gets an entry in the map, even when it does not occur
/// in `text`, so placeholder numbering always follows the caller's list.
pub fn mask<S: AsRef<str>>(text: &str, terms: &[S]) -> (String, TermMap) {
    let mut masked = text.to_string();
    let mut map = TermMap::default();

    for (index, term) in terms.iter().enumerate() {
        let term = term.as_ref();
        if term.is_empty() {
            continue;
        }

        let token = placeholder(index);
        if masked.contains(term) {
            masked = masked.replace(term, &token);
        }
        map.entries.push((token, term.to_string()));
    }

    (masked, map)
}

/// Restore every placeholder in `text` to its original term
pub fn unmask(text: &str, map: &TermMap) -> String {
    let mut restored = text.to_string();
    for (token, term) in map.iter() {
        if restored.contains(token) {
            restored = restored.replace(token, term);
        }
    }
    restored
}

/// Suggest preserve terms: distinct capitalized words, sorted
pub fn suggest_terms(transcript: &str) -> Vec<String> {
    CAPITALIZED_WORD_REGEX
        .find_iter(transcript)
        .map(|m| m.as_str().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Trim caller-supplied terms and drop the empty ones
pub fn normalize_terms<S: AsRef<str>>(terms: &[S]) -> Vec<String> {
    terms
        .iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
