//! TF-IDF vector space over word 1-3 grams.
//!
//! Term weights use the smoothed inverse document frequency
//! `ln((1 + N) / (1 + df)) + 1` with raw term counts; document and query
//! vectors are L2-normalized so cosine similarity is a sparse dot product.

use std::cmp::Ordering;
use std::collections::HashMap;

use occoder_core::lang::Lang;

const NGRAM_MAX: usize = 3;
/// Tokens shorter than this carry no signal and are dropped.
const MIN_TOKEN_LEN: usize = 2;

pub struct TfidfIndex {
    vocab: HashMap<String, usize>,
    idf: Vec<f64>,
    /// One normalized sparse vector per bucket, term ids ascending.
    rows: Vec<Vec<(usize, f64)>>,
    /// Bucket codes in table order.
    codes: Vec<String>,
}

impl TfidfIndex {
    /// Build the index from `(code, text)` bucket rows. Table order is
    /// retained; it breaks similarity ties at query time.
    pub fn build<I>(docs: I, lang: &Lang) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut codes = Vec::new();
        let mut grams_per_doc: Vec<Vec<String>> = Vec::new();
        for (code, text) in docs {
            codes.push(code);
            grams_per_doc.push(ngrams(&text, lang));
        }

        let mut vocab: HashMap<String, usize> = HashMap::new();
        let mut df: Vec<usize> = Vec::new();
        for grams in &grams_per_doc {
            let mut seen: Vec<usize> = grams
                .iter()
                .map(|g| {
                    let next = vocab.len();
                    let id = *vocab.entry(g.clone()).or_insert(next);
                    if id == df.len() {
                        df.push(0);
                    }
                    id
                })
                .collect();
            seen.sort_unstable();
            seen.dedup();
            for id in seen {
                df[id] += 1;
            }
        }

        let n_docs = grams_per_doc.len() as f64;
        let idf: Vec<f64> = df
            .iter()
            .map(|&d| ((1.0 + n_docs) / (1.0 + d as f64)).ln() + 1.0)
            .collect();

        let rows = grams_per_doc
            .iter()
            .map(|grams| {
                let mut counts: HashMap<usize, f64> = HashMap::new();
                for g in grams {
                    *counts.entry(vocab[g]).or_insert(0.0) += 1.0;
                }
                normalized_row(counts, &idf)
            })
            .collect();

        Self { vocab, idf, rows, codes }
    }

    /// Number of indexed buckets.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Codes of the up-to-`top_n` most similar buckets, in ASCENDING
    /// similarity order (best last). Equal similarities keep bucket-table
    /// order. Unknown query terms contribute nothing.
    pub fn query(&self, text: &str, top_n: usize, lang: &Lang) -> Vec<String> {
        let scores = self.similarities(text, lang);
        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| {
            scores[a]
                .partial_cmp(&scores[b])
                .unwrap_or(Ordering::Equal)
                .then(a.cmp(&b))
        });
        let start = order.len().saturating_sub(top_n);
        order[start..].iter().map(|&i| self.codes[i].clone()).collect()
    }

    /// Cosine similarity of the query against every bucket, table order.
    pub fn similarities(&self, text: &str, lang: &Lang) -> Vec<f64> {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for g in ngrams(text, lang) {
            if let Some(&id) = self.vocab.get(&g) {
                *counts.entry(id).or_insert(0.0) += 1.0;
            }
        }
        let query_vec: HashMap<usize, f64> = normalized_row(counts, &self.idf).into_iter().collect();

        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|(id, w)| w * query_vec.get(id).copied().unwrap_or(0.0))
                    .sum()
            })
            .collect()
    }
}

/// Weight the counts by idf and scale to unit length. An empty or fully
/// out-of-vocabulary input yields an empty (all-zero) vector.
fn normalized_row(counts: HashMap<usize, f64>, idf: &[f64]) -> Vec<(usize, f64)> {
    let mut row: Vec<(usize, f64)> = counts
        .into_iter()
        .map(|(id, tf)| (id, tf * idf[id]))
        .collect();
    row.sort_unstable_by_key(|&(id, _)| id);
    let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for (_, w) in &mut row {
            *w /= norm;
        }
    }
    row
}

/// Word 1..=3-grams over stopword-filtered tokens of at least two chars.
fn ngrams(text: &str, lang: &Lang) -> Vec<String> {
    let tokens: Vec<&str> = text
        .split_whitespace()
        .filter(|t| t.len() >= MIN_TOKEN_LEN && !lang.is_stopword(t))
        .collect();
    let mut grams = Vec::new();
    for n in 1..=NGRAM_MAX {
        if tokens.len() < n {
            break;
        }
        for window in tokens.windows(n) {
            grams.push(window.join(" "));
        }
    }
    grams
}
