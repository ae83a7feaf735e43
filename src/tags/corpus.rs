//! Offer tag corpus: one lower-cased tag string per offer.
//!
//! Each tag is `offer retailer brand categories parents`, where the brand's
//! categories and parents are joined with `", "` without deduplication. The
//! output is index-aligned to the offer table.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::data::{non_empty_or_placeholder, ReferenceData, PLACEHOLDER};

/// A brand's direct categories and their parents, each joined with `", "`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandSummary<'a> {
    pub brand: &'a str,
    pub categories: String,
    pub parents: String,
}

/// Group the brand table by brand label, in sorted label order.
///
/// Every row of a brand contributes its category, so a brand listed under two
/// categories keeps both. Parents follow a left join: every parent row of each
/// category is kept, and a category without parent rows contributes the
/// placeholder.
pub fn summarize_brands(data: &ReferenceData) -> BTreeMap<&str, BrandSummary<'_>> {
    data.brand_groups()
        .into_iter()
        .map(|(brand, rows)| {
            let categories: Vec<&str> = rows
                .iter()
                .map(|&i| {
                    non_empty_or_placeholder(Some(data.brands()[i].belongs_to_category.as_str()))
                })
                .collect();
            let parents: Vec<&str> = rows
                .iter()
                .flat_map(|&i| data.joined_parents(&data.brands()[i].belongs_to_category))
                .collect();
            (
                brand,
                BrandSummary {
                    brand,
                    categories: categories.join(", "),
                    parents: parents.join(", "),
                },
            )
        })
        .collect()
}

/// Build the tag string for every offer, in offer-table order.
///
/// Offers whose brand is absent from the brand table still get a tag, with
/// the placeholder in place of categories and parents.
pub fn build_offer_corpus(data: &ReferenceData) -> Vec<String> {
    let summaries = summarize_brands(data);
    let mut missing_reference = 0usize;

    let corpus: Vec<String> = data
        .offers()
        .iter()
        .map(|offer| {
            let (categories, parents) = match summaries.get(offer.brand.as_str()) {
                Some(summary) => (summary.categories.as_str(), summary.parents.as_str()),
                None => {
                    missing_reference += 1;
                    (PLACEHOLDER, PLACEHOLDER)
                }
            };
            format!(
                "{} {} {} {} {}",
                non_empty_or_placeholder(Some(offer.offer_text.as_str())),
                non_empty_or_placeholder(offer.retailer.as_deref()),
                non_empty_or_placeholder(Some(offer.brand.as_str())),
                categories,
                parents
            )
            .to_lowercase()
        })
        .collect();

    if missing_reference > 0 {
        warn!(
            offers = missing_reference,
            "offers reference brands missing from the brand table"
        );
    }
    debug!(documents = corpus.len(), "built offer tag corpus");
    corpus
}
