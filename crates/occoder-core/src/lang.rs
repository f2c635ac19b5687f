//! Fixed English language resources for normalization.
//!
//! Everything here is immutable after construction. Build one [`Lang`] per
//! process and share it by reference; nothing in this module touches global
//! state.

use std::collections::{HashMap, HashSet};

/// Common English stopwords, applied when a caller asks for
/// vocabulary-restricted normalization and when the similarity index
/// tokenizes bucket texts.
const STOPWORDS: [&str; 152] = [
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such",
    "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can",
    "will", "just", "don", "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain",
    "aren", "couldn", "didn", "doesn", "hadn", "hasn", "haven", "isn", "mightn", "mustn",
    "needn", "shan", "shouldn", "wasn", "weren", "won", "wouldn",
];

/// Domain plurals that must pass through lemmatization unchanged: in job
/// text these are terms in their own right, not inflections ("sales
/// assistant", "grounds keeper").
const PLURAL_DOMAIN_TERMS: [&str; 15] = [
    "accounts", "claims", "communications", "complaints", "events", "goods", "grounds",
    "lettings", "loans", "operations", "relations", "sales", "services", "systems", "years",
];

/// Nouns whose singular is not reachable by suffix rules.
const IRREGULAR_NOUNS: [(&str, &str); 15] = [
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("people", "person"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
    ("mice", "mouse"),
    ("lives", "life"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("shelves", "shelf"),
    ("halves", "half"),
    ("selves", "self"),
];

/// Words ending in "s" that are not plurals at all.
const UNINFLECTED: [&str; 22] = [
    "news", "series", "species", "data", "gas", "has", "was", "does", "goes", "its", "yes",
    "physics", "mathematics", "economics", "statistics", "politics", "electronics",
    "genetics", "linguistics", "mechanics", "ethics", "logistics",
];

/// Immutable bundle of stopwords, lemmatizer exclusions and noun tables.
/// Construct once (see [`Lang::english`]) and pass by reference.
#[derive(Debug)]
pub struct Lang {
    stopwords: HashSet<&'static str>,
    plural_domain_terms: HashSet<&'static str>,
    irregular_nouns: HashMap<&'static str, &'static str>,
    uninflected: HashSet<&'static str>,
}

impl Lang {
    pub fn english() -> Self {
        Self {
            stopwords: STOPWORDS.iter().copied().collect(),
            plural_domain_terms: PLURAL_DOMAIN_TERMS.iter().copied().collect(),
            irregular_nouns: IRREGULAR_NOUNS.iter().copied().collect(),
            uninflected: UNINFLECTED.iter().copied().collect(),
        }
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    /// Noun lemma of a single lowercase token. Idempotent: feeding a lemma
    /// back in returns it unchanged.
    pub fn lemma(&self, token: &str) -> String {
        if self.plural_domain_terms.contains(token) || self.uninflected.contains(token) {
            return token.to_string();
        }
        if let Some(&singular) = self.irregular_nouns.get(token) {
            return singular.to_string();
        }
        singularize(token)
    }
}

/// Suffix-rule singularization for regular English nouns.
fn singularize(token: &str) -> String {
    let n = token.len();
    if n < 3 || !token.ends_with('s') {
        return token.to_string();
    }
    if token.ends_with("ss") || token.ends_with("us") || token.ends_with("is") {
        return token.to_string();
    }
    if token.ends_with("ies") && n > 4 {
        return format!("{}y", &token[..n - 3]);
    }
    if token.ends_with("xes")
        || token.ends_with("zes")
        || token.ends_with("ches")
        || token.ends_with("shes")
        || token.ends_with("sses")
    {
        return token[..n - 2].to_string();
    }
    if token.ends_with("oes") && n > 4 {
        return token[..n - 2].to_string();
    }
    token[..n - 1].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_plurals() {
        let lang = Lang::english();
        assert_eq!(lang.lemma("workers"), "worker");
        assert_eq!(lang.lemma("calculations"), "calculation");
        assert_eq!(lang.lemma("houses"), "house");
        assert_eq!(lang.lemma("activities"), "activity");
        assert_eq!(lang.lemma("boxes"), "box");
        assert_eq!(lang.lemma("churches"), "church");
        assert_eq!(lang.lemma("classes"), "class");
    }

    #[test]
    fn exclusions_pass_through() {
        let lang = Lang::english();
        assert_eq!(lang.lemma("sales"), "sales");
        assert_eq!(lang.lemma("grounds"), "grounds");
        assert_eq!(lang.lemma("operations"), "operations");
        assert_eq!(lang.lemma("physics"), "physics");
        assert_eq!(lang.lemma("bus"), "bus");
        assert_eq!(lang.lemma("analysis"), "analysis");
    }

    #[test]
    fn irregular_plurals() {
        let lang = Lang::english();
        assert_eq!(lang.lemma("women"), "woman");
        assert_eq!(lang.lemma("children"), "child");
    }

    #[test]
    fn lemma_is_idempotent() {
        let lang = Lang::english();
        for word in ["workers", "activities", "physicist", "grounds", "boxes"] {
            let once = lang.lemma(word);
            assert_eq!(lang.lemma(&once), once);
        }
    }
}
