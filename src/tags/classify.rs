//! Search term classification against the three reference tables.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::SearchKind;
use crate::core::{Error, Result};
use crate::data::ReferenceData;

/// A search term normalized to the casing of the table it matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classified {
    pub term: String,
    pub kind: SearchKind,
}

/// Classify `raw_term` as a retailer, brand, or category.
///
/// Retailers and brands are stored upper-case, so the term is upper-cased
/// first and matched exactly. Otherwise the term is title-cased and looked up
/// among categories, falling back to sentence case ("Dairy & eggs").
pub fn classify_and_normalize(data: &ReferenceData, raw_term: &str) -> Result<Classified> {
    let upper = raw_term.to_uppercase();

    let classified = if data.all_retailers().contains(&upper) {
        Classified {
            term: upper,
            kind: SearchKind::Retailer,
        }
    } else if data.all_brands().contains(&upper) {
        Classified {
            term: upper,
            kind: SearchKind::Brand,
        }
    } else {
        let title = title_case(&upper);
        let sentence = sentence_case(&upper);
        let term = if data.all_categories().contains(&title) {
            title
        } else if data.all_categories().contains(&sentence) {
            sentence
        } else {
            return Err(Error::not_found(raw_term));
        };
        Classified {
            term,
            kind: SearchKind::Category,
        }
    };

    debug!(term = %classified.term, kind = %classified.kind, "classified search term");
    Ok(classified)
}

/// Upper-case the first letter of every word and lower-case the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        at_word_start = !(c.is_alphanumeric() || c == '\'');
    }
    out
}

/// Upper-case the first character and lower-case the rest.
pub fn sentence_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}
