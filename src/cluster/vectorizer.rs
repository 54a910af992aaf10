// TF-IDF vectorization over a crawled document collection.
//
// Terms come from lowercased text split at non-alphanumeric boundaries,
// filtered against the stop-words English list. Weights are raw term
// frequency times smoothed inverse document frequency, and every document
// row is L2-normalized. The vocabulary is sorted so that a term's index is
// its feature-space coordinate on every run over the same corpus.

use std::collections::{BTreeMap, HashMap, HashSet};

use stop_words::{get, LANGUAGE};
use tracing::info;

use crate::error::AnalysisError;

/// Tokens shorter than this are dropped; single characters are noise.
const MIN_TOKEN_CHARS: usize = 2;

/// Sparse TF-IDF row for one document. Indices are vocabulary positions in
/// strictly ascending order; weights are parallel to indices.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
    pub indices: Vec<usize>,
    pub weights: Vec<f64>,
}

impl SparseVector {
    /// Dot product against a dense vector of vocabulary length.
    pub fn dot_dense(&self, dense: &[f64]) -> f64 {
        self.indices
            .iter()
            .zip(&self.weights)
            .map(|(&i, &w)| w * dense[i])
            .sum()
    }

    pub fn norm(&self) -> f64 {
        self.weights.iter().map(|w| w * w).sum::<f64>().sqrt()
    }
}

/// Frozen result of fitting the vectorizer: the ordered term vocabulary plus
/// one sparse row per document, rows aligned with `doc_keys`.
#[derive(Debug, Clone)]
pub struct CorpusVectors {
    pub vocabulary: Vec<String>,
    pub doc_keys: Vec<String>,
    pub rows: Vec<SparseVector>,
}

impl CorpusVectors {
    pub fn n_docs(&self) -> usize {
        self.rows.len()
    }

    pub fn n_terms(&self) -> usize {
        self.vocabulary.len()
    }
}

/// TF-IDF vectorizer with a fixed English stop-word list.
pub struct TfidfVectorizer {
    stop_words: HashSet<String>,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        // English stop words from the stop-words crate
        let stop_words: Vec<String> = get(LANGUAGE::English);
        Self {
            stop_words: stop_words.into_iter().collect(),
        }
    }

    /// Build the vocabulary and the TF-IDF matrix for a corpus in one pass.
    ///
    /// Document order is the map's sorted key order, so row indices are
    /// stable across runs. Fails if the corpus is empty or if no term at all
    /// survives stop-word removal; a single document losing every token is
    /// fine and keeps a zero row.
    pub fn fit_transform(
        &self,
        corpus: &BTreeMap<String, String>,
    ) -> Result<CorpusVectors, AnalysisError> {
        if corpus.is_empty() {
            return Err(AnalysisError::insufficient_data("no documents to vectorize"));
        }

        // Tokenize every document once, keeping per-document counts
        let mut doc_keys = Vec::with_capacity(corpus.len());
        let mut doc_counts: Vec<HashMap<String, usize>> = Vec::with_capacity(corpus.len());
        for (key, text) in corpus {
            let mut counts: HashMap<String, usize> = HashMap::new();
            for token in tokenize(text) {
                if self.stop_words.contains(&token) {
                    continue;
                }
                *counts.entry(token).or_insert(0) += 1;
            }
            doc_keys.push(key.clone());
            doc_counts.push(counts);
        }

        // Vocabulary: every surviving term, sorted so index = coordinate
        let mut vocabulary: Vec<String> = doc_counts
            .iter()
            .flat_map(|counts| counts.keys().cloned())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        vocabulary.sort();

        if vocabulary.is_empty() {
            return Err(AnalysisError::insufficient_data(format!(
                "vocabulary is empty after stop-word removal across {} document(s)",
                doc_counts.len()
            )));
        }

        let vocab_index: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.as_str(), i))
            .collect();

        // Document frequency per term
        let mut df = vec![0usize; vocabulary.len()];
        for counts in &doc_counts {
            for term in counts.keys() {
                df[vocab_index[term.as_str()]] += 1;
            }
        }

        // Smoothed IDF: ln((1 + n) / (1 + df)) + 1. A term present in every
        // document still carries weight 1, never zero.
        let n = doc_counts.len() as f64;
        let idf: Vec<f64> = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
            .collect();

        // TF x IDF, then L2-normalize each row
        let mut rows = Vec::with_capacity(doc_counts.len());
        for counts in &doc_counts {
            let mut entries: Vec<(usize, f64)> = counts
                .iter()
                .map(|(term, &tf)| {
                    let i = vocab_index[term.as_str()];
                    (i, tf as f64 * idf[i])
                })
                .collect();
            entries.sort_by_key(|&(i, _)| i);

            let norm = entries.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                for entry in &mut entries {
                    entry.1 /= norm;
                }
            }

            rows.push(SparseVector {
                indices: entries.iter().map(|&(i, _)| i).collect(),
                weights: entries.iter().map(|&(_, w)| w).collect(),
            });
        }

        info!(
            documents = rows.len(),
            terms = vocabulary.len(),
            "Vectorized corpus"
        );

        Ok(CorpusVectors {
            vocabulary,
            doc_keys,
            rows,
        })
    }
}

/// Lowercase and split at non-alphanumeric boundaries, dropping tokens
/// shorter than MIN_TOKEN_CHARS. The sentiment lexicon shares this so a
/// document is read the same way in both stages.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}
