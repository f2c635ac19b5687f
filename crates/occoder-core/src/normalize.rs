//! Freetext cleanup: canonical lowercase token sequences for matching.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::lang::Lang;

/// Per-scheme dictionaries that unlock advanced normalization: the known
/// vocabulary of the scheme and a lemma -> replacement synonym map.
#[derive(Debug, Default)]
pub struct VocabDicts {
    pub known_words: HashSet<String>,
    pub synonyms: HashMap<String, String>,
}

/// Cleans freetext into the canonical form the matcher operates on:
/// lowercase alphabetic tokens separated by single spaces.
///
/// With scheme dictionaries present, tokens are additionally lemmatized and
/// synonym-expanded, and callers may restrict output to the scheme
/// vocabulary. Without them the normalizer runs in basic mode and stops
/// after the character-level cleanup.
#[derive(Debug)]
pub struct Normalizer {
    lang: Arc<Lang>,
    dicts: Option<VocabDicts>,
}

impl Normalizer {
    pub fn new(lang: Arc<Lang>, dicts: Option<VocabDicts>) -> Self {
        Self { lang, dicts }
    }

    /// Whether scheme dictionaries are loaded (advanced mode).
    pub fn is_advanced(&self) -> bool {
        self.dicts.is_some()
    }

    pub fn lang(&self) -> &Arc<Lang> {
        &self.lang
    }

    /// Character-level cleanup: drop HTML-tag-like spans, lowercase, map
    /// everything outside `[a-z ]` to a space, collapse whitespace, trim.
    pub fn scrub(text: &str) -> String {
        let mut stripped = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(open) = rest.find('<') {
            stripped.push_str(&rest[..open]);
            match rest[open..].find('>') {
                Some(close) => {
                    stripped.push(' ');
                    rest = &rest[open + close + 1..];
                }
                None => {
                    // No closing bracket; not a tag, keep the text.
                    stripped.push_str(&rest[open..]);
                    rest = "";
                }
            }
        }
        stripped.push_str(rest);

        let lowered = stripped.to_lowercase();
        let mapped: String = lowered
            .chars()
            .map(|c| if c.is_ascii_lowercase() { c } else { ' ' })
            .collect();
        mapped.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Full cleanup. `known_only` restricts the output to the scheme
    /// vocabulary minus stopwords; it has no effect in basic mode.
    pub fn clean(&self, text: &str, known_only: bool) -> String {
        let base = Self::scrub(text);
        let Some(dicts) = &self.dicts else {
            return base;
        };

        let mut tokens: Vec<String> = base
            .split_whitespace()
            .map(|t| self.lang.lemma(t))
            .map(|t| dicts.synonyms.get(&t).cloned().unwrap_or(t))
            .collect();
        if known_only {
            tokens.retain(|t| dicts.known_words.contains(t));
            tokens.retain(|t| !self.lang.is_stopword(t));
        }
        tokens.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advanced() -> Normalizer {
        let mut dicts = VocabDicts::default();
        for w in ["physicist", "ground", "worker", "economist", "nurse"] {
            dicts.known_words.insert(w.to_string());
        }
        dicts
            .synonyms
            .insert("rgn".to_string(), "nurse".to_string());
        Normalizer::new(Arc::new(Lang::english()), Some(dicts))
    }

    #[test]
    fn scrub_strips_markup_digits_punctuation() {
        let out = Normalizer::scrub("<p>Senior  Physicist (Grade 7)</p>");
        assert_eq!(out, "senior physicist grade");
    }

    #[test]
    fn scrub_output_alphabet() {
        let out = Normalizer::scrub("Café-Manager & Kellner, 40% Teilzeit!");
        assert!(out.chars().all(|c| c.is_ascii_lowercase() || c == ' '));
        assert!(!out.starts_with(' ') && !out.ends_with(' '));
        assert!(!out.contains("  "));
    }

    #[test]
    fn unclosed_bracket_is_kept_as_text() {
        assert_eq!(Normalizer::scrub("salary < 30k"), "salary k");
    }

    #[test]
    fn clean_lemmatizes_and_expands() {
        let norm = advanced();
        assert_eq!(norm.clean("RGN needed", false), "nurse needed");
        assert_eq!(norm.clean("Ground workers", true), "ground worker");
    }

    #[test]
    fn clean_restricts_to_vocabulary() {
        let norm = advanced();
        assert_eq!(norm.clean("Senior physicist of the lab", true), "physicist");
    }

    #[test]
    fn clean_is_idempotent() {
        let norm = advanced();
        for text in ["Ground workers", "Physicist", "RGN needed urgently"] {
            for known_only in [false, true] {
                let once = norm.clean(text, known_only);
                assert_eq!(norm.clean(&once, known_only), once);
            }
        }
    }

    #[test]
    fn basic_mode_skips_token_stages() {
        let norm = Normalizer::new(Arc::new(Lang::english()), None);
        assert_eq!(norm.clean("Ground workers", true), "ground workers");
    }
}
