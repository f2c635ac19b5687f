use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use occoder_core::error::{Error, Result};
use occoder_core::lang::Lang;
use occoder_core::normalize::Normalizer;

/// Aggregated descriptive text for one scheme code, the raw material of the
/// similarity index. Table order is preserved from the dictionary file.
#[derive(Debug, Clone)]
pub struct Bucket {
    pub code: String,
    pub text: String,
}

/// All lookup structures for one scheme, immutable after [`SchemeLexicon::load`].
#[derive(Debug)]
pub struct SchemeLexicon {
    scheme: String,
    normalizer: Normalizer,
    /// Exact-title lists in dictionary file order.
    titles: Vec<(String, Vec<String>)>,
    title_pos: HashMap<String, usize>,
    buckets: Vec<Bucket>,
    labels: HashMap<String, String>,
}

impl SchemeLexicon {
    /// Load the scheme directory under `lookup_dir`. Title and bucket
    /// dictionaries are required; the vocabulary/synonym pair is optional
    /// and its absence downgrades the scheme to basic normalization.
    pub fn load(lookup_dir: &Path, scheme: &str, lang: Arc<Lang>) -> Result<Self> {
        let scheme = scheme.to_lowercase();
        let dir = lookup_dir.join(&scheme);
        if !dir.is_dir() {
            return Err(Error::DictionaryMissing {
                scheme: scheme.clone(),
                name: dir.display().to_string(),
            });
        }

        let dicts = match crate::load::vocab_dicts(&dir, &scheme) {
            Ok(d) => Some(d),
            Err(Error::DictionaryMissing { scheme, name }) => {
                warn!(
                    scheme = %scheme,
                    missing = %name,
                    "advanced dictionaries unavailable, falling back to basic normalization"
                );
                None
            }
            Err(e) => return Err(e),
        };
        let normalizer = Normalizer::new(lang, dicts);

        let raw_titles = crate::load::titles(&dir, &scheme)?;
        // Title lists get the same cleanup job records get, so exact
        // comparison is string equality.
        let titles: Vec<(String, Vec<String>)> = raw_titles
            .into_iter()
            .map(|(code, list)| {
                let cleaned = list.iter().map(|t| normalizer.clean(t, false)).collect();
                (code, cleaned)
            })
            .collect();
        let title_pos = titles
            .iter()
            .enumerate()
            .map(|(i, (code, _))| (code.clone(), i))
            .collect();

        let buckets = crate::load::buckets(&dir, &scheme)?;
        let labels = crate::load::labels(&dir, &scheme)?.unwrap_or_default();

        debug!(
            scheme = %scheme,
            codes = titles.len(),
            buckets = buckets.len(),
            advanced = normalizer.is_advanced(),
            "scheme lexicon loaded"
        );

        Ok(Self { scheme, normalizer, titles, title_pos, buckets, labels })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Exact lookup of a normalized title, truncated to its first three
    /// tokens. Every code's list is scanned in dictionary file order; when
    /// several codes carry the same title, the last one wins.
    pub fn exact_match(&self, normalized_title: &str) -> Option<&str> {
        let truncated = normalized_title
            .split_whitespace()
            .take(3)
            .collect::<Vec<_>>()
            .join(" ");
        if truncated.is_empty() {
            return None;
        }
        let mut hit = None;
        for (code, titles) in &self.titles {
            if titles.iter().any(|t| t == &truncated) {
                hit = Some(code.as_str());
            }
        }
        hit
    }

    /// Cleaned exact-title list for a code, if the code exists.
    pub fn titles_for(&self, code: &str) -> Option<&[String]> {
        self.title_pos
            .get(code)
            .map(|&i| self.titles[i].1.as_slice())
    }

    /// Human-readable label for a code; absent codes yield `None`.
    pub fn code_label(&self, code: &str) -> Option<&str> {
        self.labels.get(code).map(String::as_str)
    }
}

/// Scheme directories available under a lookup dir (one subdirectory per
/// scheme).
pub fn list_schemes(lookup_dir: &Path) -> Vec<String> {
    let mut schemes: Vec<String> = walkdir::WalkDir::new(lookup_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
        .filter_map(|e| e.file_name().to_str().map(str::to_string))
        .collect();
    schemes.sort();
    schemes
}
