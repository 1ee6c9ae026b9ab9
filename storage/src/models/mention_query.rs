//! Case-insensitive "contains any term" predicate over post text.
//!
//! Used by PostStore::find. Terms are literal substrings; they are never interpreted as patterns.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MentionQuery {
    terms: Vec<String>,
}

impl MentionQuery {
    /// Builds a query from raw terms. Terms are lowercased; empty terms and duplicates are dropped,
    /// first occurrence order is kept.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for term in terms {
            let term = term.as_ref().to_lowercase();
            if !term.is_empty() && !out.contains(&term) {
                out.push(term);
            }
        }
        Self { terms: out }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// A query without terms matches nothing.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Compiles the terms into one case-insensitive alternation of escaped literals.
    pub fn to_regex(&self) -> Result<Regex, regex::Error> {
        let alternation = self
            .terms
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        RegexBuilder::new(&alternation).case_insensitive(true).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terms_are_lowercased_and_deduplicated() {
        let q = MentionQuery::new(["@Alice", "Alice Smith", "alice smith", "", "Smith"]);
        assert_eq!(q.terms(), &["@alice", "alice smith", "smith"]);
    }

    #[test]
    fn regex_matches_literally_and_ignores_case() {
        let q = MentionQuery::new(["@bob", "b.b"]);
        let re = q.to_regex().unwrap();
        assert!(re.is_match("hi @BOB!"));
        assert!(re.is_match("the B.B show"));
        assert!(!re.is_match("bob and bxb"));
    }
}
