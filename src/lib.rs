//! offer-search - rank promotional offers against a retailer, brand, or
//! product category.
//!
//! Every offer gets a tag string built from its retailer, brand, the brand's
//! categories, and their parent categories. A search term is classified
//! against the reference tables and expanded into its own tag string, then
//! offers are ranked by TF-IDF cosine similarity.
//!
//! # Example
//!
//! ```no_run
//! use offer_search::data::{ReferenceData, TableSources};
//! use offer_search::output::{Format, Report};
//! use offer_search::semantic::find_offers;
//! use offer_search::tags::classify_and_normalize;
//!
//! let data = ReferenceData::load(&TableSources::default()).unwrap();
//! let classified = classify_and_normalize(&data, "walmart").unwrap();
//! let ranking = find_offers(&data, &classified).unwrap();
//! let report = Report::new(&ranking, data.offers(), &classified);
//! print!("{}", Format::Text.render(&report).unwrap());
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod data;
pub mod output;
pub mod prompt;
pub mod semantic;
pub mod tags;

pub use core::{Error, Result};
