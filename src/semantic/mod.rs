//! Similarity ranking of offers against a search term.
//!
//! Uses TF-IDF over the offer tag corpus, with cosine similarity between the
//! query tags and every offer. Pure Rust; nothing is persisted between runs.
//!
//! # Architecture
//!
//! - **stop_words**: fixed English stop-word list
//! - **tfidf**: vectorizer (vocabulary, IDF, sparse vectors) and top-k ranking

pub mod stop_words;
pub mod tfidf;

use tracing::debug;

use crate::core::Result;
use crate::data::ReferenceData;
use crate::tags::{build_offer_corpus, query_tags, Classified};

pub use tfidf::{rank, top_k, Ranking, TfidfVectorizer, TOP_K};

/// Build the offer corpus and query tags for `classified`, then rank.
pub fn find_offers(data: &ReferenceData, classified: &Classified) -> Result<Ranking> {
    let corpus = build_offer_corpus(data);
    let query = query_tags(data, classified);
    debug!(query = %query, "built query tags");
    rank(&corpus, &query)
}
