use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use occoder_core::error::Result;
use occoder_core::lang::Lang;
use occoder_core::types::{JobRecord, MatchResult, OutputMode, RankedCode};
use occoder_index::TfidfIndex;
use occoder_lexicon::SchemeLexicon;

use crate::fuzzy;

/// Candidate codes pulled from the similarity index per record.
const DEFAULT_TOP_N: usize = 5;
/// Ranked codes kept in multi output.
const MULTI_KEEP: usize = 3;

/// One scheme's matching pipeline. Everything inside is immutable after
/// construction, so a `Coder` can be shared freely across worker threads.
pub struct Coder {
    lexicon: SchemeLexicon,
    index: TfidfIndex,
    lang: Arc<Lang>,
    output: OutputMode,
    top_n: usize,
}

impl Coder {
    pub fn new(lookup_dir: &Path, scheme: &str, output: OutputMode) -> Result<Self> {
        Self::with_lang(lookup_dir, scheme, output, Arc::new(Lang::english()))
    }

    /// Build with a shared [`Lang`] (cheaper when loading several schemes).
    pub fn with_lang(
        lookup_dir: &Path,
        scheme: &str,
        output: OutputMode,
        lang: Arc<Lang>,
    ) -> Result<Self> {
        let lexicon = SchemeLexicon::load(lookup_dir, scheme, lang.clone())?;
        let index = TfidfIndex::build(
            lexicon
                .buckets()
                .iter()
                .map(|b| (b.code.clone(), b.text.clone())),
            &lang,
        );
        debug!(scheme = %lexicon.scheme(), buckets = index.len(), "coder ready");
        Ok(Self { lexicon, index, lang, output, top_n: DEFAULT_TOP_N })
    }

    pub fn scheme(&self) -> &str {
        self.lexicon.scheme()
    }

    pub fn output(&self) -> OutputMode {
        self.output
    }

    pub fn lexicon(&self) -> &SchemeLexicon {
        &self.lexicon
    }

    /// Candidate codes for some normalized text, worst first, best last.
    pub fn candidates(&self, text: &str) -> Vec<String> {
        self.index.query(text, self.top_n, &self.lang)
    }

    /// Code a single record: exact title hit short-circuits, otherwise
    /// TF-IDF candidates over title+sector+description are fuzzy-scored
    /// against each candidate's known titles.
    pub fn code_record(&self, record: &JobRecord) -> MatchResult {
        let normalizer = self.lexicon.normalizer();
        let clean_title = normalizer.clean(&record.title, true);

        if let Some(code) = self.lexicon.exact_match(&clean_title) {
            return MatchResult::Code(code.to_string());
        }

        let mut all_text = clean_title.clone();
        for extra in [record.sector.as_deref(), record.description.as_deref()]
            .into_iter()
            .flatten()
        {
            let cleaned = normalizer.clean(extra, false);
            if !cleaned.is_empty() {
                if !all_text.is_empty() {
                    all_text.push(' ');
                }
                all_text.push_str(&cleaned);
            }
        }

        let candidates = self.candidates(&all_text);
        self.disambiguate(&clean_title, candidates)
    }

    /// Fuzzy-score each candidate's title list and pick. Candidates arrive
    /// ascending by similarity and are reversed first, so on equal fuzzy
    /// scores the code the index ranked higher wins the first-maximum scan.
    fn disambiguate(&self, clean_title: &str, candidates: Vec<String>) -> MatchResult {
        let mut options: Vec<RankedCode> = candidates
            .iter()
            .map(|code| {
                let titles = self.lexicon.titles_for(code).unwrap_or(&[]);
                match fuzzy::extract_best(clean_title, titles) {
                    Some((_, score)) => RankedCode { code: Some(code.clone()), score },
                    None => RankedCode { code: None, score: 0 },
                }
            })
            .collect();
        options.reverse();

        match self.output {
            OutputMode::Single => {
                let mut best: Option<&RankedCode> = None;
                for option in &options {
                    let better = match best {
                        None => true,
                        Some(b) => option.score > b.score,
                    };
                    if better {
                        best = Some(option);
                    }
                }
                match best.and_then(|b| b.code.clone()) {
                    Some(code) => MatchResult::Code(code),
                    None => MatchResult::NoMatch,
                }
            }
            OutputMode::Multi => {
                // Stable sort: ties keep the higher-similarity candidate first.
                options.sort_by(|a, b| b.score.cmp(&a.score));
                options.truncate(MULTI_KEEP);
                if options.is_empty() {
                    MatchResult::NoMatch
                } else {
                    MatchResult::Ranked(options)
                }
            }
        }
    }
}
