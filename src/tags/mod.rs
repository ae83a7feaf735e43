//! Tag construction: classify a search term, then build the tag strings that
//! get compared by the similarity ranker.
//!
//! - **classify**: maps raw input onto a retailer, brand, or category
//! - **query**: builds the tag string for a classified search term
//! - **corpus**: builds one tag string per offer, index-aligned to the offer table

pub mod classify;
pub mod corpus;
pub mod query;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use classify::{classify_and_normalize, Classified};
pub use corpus::{build_offer_corpus, summarize_brands, BrandSummary};
pub use query::{brand_tags, category_tags, query_tags, retailer_tags};

/// Which reference table a search term matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchKind {
    #[serde(rename = "Retail")]
    Retailer,
    Brand,
    Category,
}

impl SearchKind {
    /// Label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Retailer => "Retail",
            Self::Brand => "Brand",
            Self::Category => "Category",
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Join distinct values with single spaces, in sorted order.
pub(crate) fn join_distinct<'a>(values: impl IntoIterator<Item = &'a str>) -> String {
    values
        .into_iter()
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect::<Vec<_>>()
        .join(" ")
}
