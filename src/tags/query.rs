//! Query tag strings for a classified search term.
//!
//! These joins deduplicate through a set and separate with single spaces,
//! except the brand tag, which reuses the offer corpus brand summaries.

use super::corpus::summarize_brands;
use super::{join_distinct, Classified, SearchKind};
use crate::data::{non_empty_or_placeholder, ReferenceData, PLACEHOLDER};

/// Build the tag string for a classified search term.
pub fn query_tags(data: &ReferenceData, classified: &Classified) -> String {
    match classified.kind {
        SearchKind::Retailer => retailer_tags(data, &classified.term),
        SearchKind::Brand => brand_tags(data, &classified.term),
        SearchKind::Category => category_tags(data, &classified.term),
    }
}

/// `category parents`, with the distinct parents of every row for `category`.
pub fn category_tags(data: &ReferenceData, category: &str) -> String {
    let parents = join_distinct(
        data.parents_of_category(category)
            .map(non_empty_or_placeholder),
    );
    if parents.is_empty() {
        format!("{category} {PLACEHOLDER}")
    } else {
        format!("{category} {parents}")
    }
}

/// `brand categories parents` for every brand whose label starts with `term`.
///
/// This is a prefix match: searching `COCA` also pulls in `COCA-COLA` and
/// `COCA-COLA ZERO`.
pub fn brand_tags(data: &ReferenceData, term: &str) -> String {
    summarize_brands(data)
        .into_values()
        .filter(|summary| summary.brand.starts_with(term))
        .map(|summary| {
            format!(
                "{} {} {}",
                summary.brand, summary.categories, summary.parents
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `retailer brands categories parents` over every offer sold by `retailer`.
///
/// Offers without a retailer never match. Brands missing from the brand table
/// and categories missing from the category table contribute the placeholder.
pub fn retailer_tags(data: &ReferenceData, retailer: &str) -> String {
    let mut brands = Vec::new();
    let mut categories = Vec::new();
    let mut parents = Vec::new();

    for offer in data
        .offers()
        .iter()
        .filter(|offer| offer.retailer.as_deref() == Some(retailer))
    {
        brands.push(non_empty_or_placeholder(Some(offer.brand.as_str())));

        let direct: Vec<&str> = data.categories_of_brand(&offer.brand).collect();
        if direct.is_empty() {
            categories.push(PLACEHOLDER);
            parents.push(PLACEHOLDER);
            continue;
        }
        for category in direct {
            categories.push(non_empty_or_placeholder(Some(category)));
            parents.extend(data.joined_parents(category));
        }
    }

    format!(
        "{retailer} {} {} {}",
        join_distinct(brands),
        join_distinct(categories),
        join_distinct(parents)
    )
}
