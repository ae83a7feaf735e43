//! Pure-Rust TF-IDF vectorizer and cosine ranker for offer tag strings.
//!
//! Uses raw term counts, smooth IDF `ln((1 + n) / (1 + df)) + 1`, tokens of two
//! or more word characters with English stop words removed, and L2-normalized
//! sparse vectors so cosine similarity is a plain dot product.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use super::stop_words::is_stop_word;
use crate::core::{Error, Result};

/// Number of offers returned by a ranking.
pub const TOP_K: usize = 10;

/// Sparse vector: parallel arrays of column indices and values.
#[derive(Debug, Clone, Default, PartialEq)]
struct SparseVec {
    indices: Vec<u32>,
    values: Vec<f64>,
}

impl SparseVec {
    fn dot(&self, other: &SparseVec) -> f64 {
        let mut sum = 0.0f64;
        let (mut i, mut j) = (0, 0);
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Equal => {
                    sum += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
            }
        }
        sum
    }

    fn l2_normalize(&mut self) {
        let norm: f64 = self.values.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for v in &mut self.values {
                *v /= norm;
            }
        }
    }
}

/// Vectorizer fitted on a corpus. Queries are projected onto the corpus
/// vocabulary; terms the corpus never saw carry no weight.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocab: HashMap<String, u32>,
    idf: Vec<f64>,
    doc_vectors: Vec<SparseVec>,
}

impl TfidfVectorizer {
    /// Fit the vocabulary and IDF weights on `corpus`.
    pub fn fit<S: AsRef<str>>(corpus: &[S]) -> Result<Self> {
        if corpus.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        let n = corpus.len() as f64;
        let tokenized: Vec<Vec<String>> = corpus.iter().map(|doc| tokenize(doc.as_ref())).collect();

        // Document frequency per term, in term order
        let mut df: BTreeMap<&str, u32> = BTreeMap::new();
        for tokens in &tokenized {
            let seen: BTreeSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in seen {
                *df.entry(term).or_insert(0) += 1;
            }
        }

        let vocab: HashMap<String, u32> = df
            .keys()
            .enumerate()
            .map(|(idx, term)| (term.to_string(), idx as u32))
            .collect();
        let idf: Vec<f64> = df
            .values()
            .map(|&doc_freq| ((1.0 + n) / (1.0 + doc_freq as f64)).ln() + 1.0)
            .collect();

        let doc_vectors: Vec<SparseVec> = tokenized
            .iter()
            .map(|tokens| build_tfidf_vector(tokens, &vocab, &idf))
            .collect();

        debug!(documents = corpus.len(), vocabulary = vocab.len(), "fitted tf-idf vectorizer");

        Ok(Self {
            vocab,
            idf,
            doc_vectors,
        })
    }

    /// Cosine similarity of `query` against every fitted document, in corpus order.
    pub fn similarities(&self, query: &str) -> Vec<f64> {
        let query_vec = build_tfidf_vector(&tokenize(query), &self.vocab, &self.idf);
        self.doc_vectors
            .iter()
            .map(|doc_vec| query_vec.dot(doc_vec))
            .collect()
    }
}

/// Scores for every document plus the indices of the best ones.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    /// Best documents first, at most [`TOP_K`] of them.
    pub top_indices: Vec<usize>,
    /// Similarity of every document, index-aligned to the corpus.
    pub scores: Vec<f64>,
}

/// Rank `corpus` against `query` and keep the top [`TOP_K`].
pub fn rank<S: AsRef<str>>(corpus: &[S], query: &str) -> Result<Ranking> {
    let vectorizer = TfidfVectorizer::fit(corpus)?;
    let scores = vectorizer.similarities(query);
    let top_indices = top_k(&scores, TOP_K);
    Ok(Ranking {
        top_indices,
        scores,
    })
}

/// Indices of the `k` highest scores, best first.
///
/// Equal scores keep their corpus order.
pub fn top_k(scores: &[f64], k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order.truncate(k);
    order
}

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("valid regex"))
}

/// Lower-case `text` and split it into tokens of two or more word characters,
/// dropping stop words.
fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    token_pattern()
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

/// Build a TF-IDF sparse vector from tokens, L2-normalized.
fn build_tfidf_vector(tokens: &[String], vocab: &HashMap<String, u32>, idf: &[f64]) -> SparseVec {
    let mut tf: BTreeMap<u32, u32> = BTreeMap::new();
    for token in tokens {
        if let Some(&idx) = vocab.get(token) {
            *tf.entry(idx).or_insert(0) += 1;
        }
    }

    let (indices, values): (Vec<u32>, Vec<f64>) = tf
        .into_iter()
        .map(|(idx, count)| (idx, count as f64 * idf[idx as usize]))
        .unzip();

    let mut vec = SparseVec { indices, values };
    vec.l2_normalize();
    vec
}
