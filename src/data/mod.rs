//! Reference Data Store: brand, category, and offer tables held in memory.
//!
//! Every column is read as an opaque string. Empty cells are missing values;
//! downstream tag builders substitute the `None` placeholder for them instead
//! of rejecting the row.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Error, Result};

/// Placeholder written wherever a joined value is missing.
pub const PLACEHOLDER: &str = "None";

/// One row of the brand-to-category table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandRecord {
    pub brand: String,
    pub belongs_to_category: String,
}

/// One category-to-parent edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRecord {
    pub product_category: String,
    pub parent_category: Option<String>,
}

/// One promotional offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferRecord {
    pub offer_text: String,
    pub retailer: Option<String>,
    pub brand: String,
}

/// A table row built from its cells, looked up by header name.
///
/// `cells` holds one entry per name in `COLUMNS`, in that order. A cell past
/// the end of a short row is `None`.
trait TableRow: Sized {
    const COLUMNS: &'static [&'static str];

    fn from_cells(cells: &[Option<&str>]) -> Self;
}

impl TableRow for BrandRecord {
    const COLUMNS: &'static [&'static str] = &["BRAND", "BRAND_BELONGS_TO_CATEGORY"];

    fn from_cells(cells: &[Option<&str>]) -> Self {
        Self {
            brand: text_cell(cells[0]),
            belongs_to_category: text_cell(cells[1]),
        }
    }
}

impl TableRow for CategoryRecord {
    const COLUMNS: &'static [&'static str] = &["PRODUCT_CATEGORY", "IS_CHILD_CATEGORY_TO"];

    fn from_cells(cells: &[Option<&str>]) -> Self {
        Self {
            product_category: text_cell(cells[0]),
            parent_category: optional_cell(cells[1]),
        }
    }
}

impl TableRow for OfferRecord {
    const COLUMNS: &'static [&'static str] = &["OFFER", "RETAILER", "BRAND"];

    fn from_cells(cells: &[Option<&str>]) -> Self {
        Self {
            offer_text: text_cell(cells[0]),
            retailer: optional_cell(cells[1]),
            brand: text_cell(cells[2]),
        }
    }
}

/// Missing cells become the empty string.
fn text_cell(cell: Option<&str>) -> String {
    cell.unwrap_or_default().to_string()
}

/// Missing and empty cells both become `None`.
fn optional_cell(cell: Option<&str>) -> Option<String> {
    cell.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Locations of the three input tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSources {
    /// Brand-to-category table.
    pub brands: PathBuf,
    /// Category-to-parent table.
    pub categories: PathBuf,
    /// Offer table.
    pub offers: PathBuf,
}

impl Default for TableSources {
    fn default() -> Self {
        Self {
            brands: PathBuf::from("data/brand_category.csv"),
            categories: PathBuf::from("data/categories.csv"),
            offers: PathBuf::from("data/offer_retailer.csv"),
        }
    }
}

/// In-memory reference tables, loaded once and read-only afterwards.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    brands: Vec<BrandRecord>,
    categories: Vec<CategoryRecord>,
    offers: Vec<OfferRecord>,
    retailer_set: BTreeSet<String>,
    brand_set: BTreeSet<String>,
    category_set: BTreeSet<String>,
    /// Brand label -> row indices into `brands`, in table order.
    brand_rows: HashMap<String, Vec<usize>>,
    /// Category label -> row indices into `categories`, in table order.
    category_rows: HashMap<String, Vec<usize>>,
}

impl ReferenceData {
    /// Build the store from already-parsed rows.
    pub fn new(
        brands: Vec<BrandRecord>,
        categories: Vec<CategoryRecord>,
        offers: Vec<OfferRecord>,
    ) -> Self {
        let retailer_set = offers
            .iter()
            .filter_map(|o| o.retailer.clone())
            .collect();
        let brand_set = brands.iter().map(|b| b.brand.clone()).collect();
        let category_set = categories
            .iter()
            .map(|c| c.product_category.clone())
            .collect();

        let mut brand_rows: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, row) in brands.iter().enumerate() {
            brand_rows.entry(row.brand.clone()).or_default().push(i);
        }
        let mut category_rows: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, row) in categories.iter().enumerate() {
            category_rows
                .entry(row.product_category.clone())
                .or_default()
                .push(i);
        }

        Self {
            brands,
            categories,
            offers,
            retailer_set,
            brand_set,
            category_set,
            brand_rows,
            category_rows,
        }
    }

    /// Load all three tables from disk.
    pub fn load(sources: &TableSources) -> Result<Self> {
        let brands = read_table_file(&sources.brands)?;
        let categories = read_table_file(&sources.categories)?;
        let offers = read_table_file(&sources.offers)?;
        let data = Self::new(brands, categories, offers);
        debug!(
            brands = data.brands.len(),
            categories = data.categories.len(),
            offers = data.offers.len(),
            "loaded reference tables"
        );
        Ok(data)
    }

    /// Load all three tables from arbitrary readers.
    pub fn from_readers(
        brands: impl Read,
        categories: impl Read,
        offers: impl Read,
    ) -> Result<Self> {
        Ok(Self::new(
            read_table(brands, Path::new("<brands>"))?,
            read_table(categories, Path::new("<categories>"))?,
            read_table(offers, Path::new("<offers>"))?,
        ))
    }

    pub fn all_retailers(&self) -> &BTreeSet<String> {
        &self.retailer_set
    }

    pub fn all_brands(&self) -> &BTreeSet<String> {
        &self.brand_set
    }

    pub fn all_categories(&self) -> &BTreeSet<String> {
        &self.category_set
    }

    pub fn brands(&self) -> &[BrandRecord] {
        &self.brands
    }

    pub fn categories(&self) -> &[CategoryRecord] {
        &self.categories
    }

    pub fn offers(&self) -> &[OfferRecord] {
        &self.offers
    }

    /// Direct categories listed for `brand`, one per brand row, in table order.
    ///
    /// Empty when the brand has no rows.
    pub fn categories_of_brand<'a>(&'a self, brand: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.brand_rows
            .get(brand)
            .into_iter()
            .flatten()
            .map(|&i| self.brands[i].belongs_to_category.as_str())
    }

    /// Parent categories listed for `category`, one per category row, in table order.
    ///
    /// A row whose parent cell is empty yields `None`; a category with no rows
    /// yields nothing.
    pub fn parents_of_category<'a>(
        &'a self,
        category: &str,
    ) -> impl Iterator<Item = Option<&'a str>> + 'a {
        self.category_rows
            .get(category)
            .into_iter()
            .flatten()
            .map(|&i| self.categories[i].parent_category.as_deref())
    }

    /// Parents of `category` as a left join would produce them: a missing
    /// category row or an empty parent cell both become the placeholder.
    pub fn joined_parents<'a>(&'a self, category: &str) -> Vec<&'a str> {
        let parents: Vec<&str> = self
            .parents_of_category(category)
            .map(non_empty_or_placeholder)
            .collect();
        if parents.is_empty() {
            vec![PLACEHOLDER]
        } else {
            parents
        }
    }

    /// Brand labels grouped with their row indices, in sorted label order.
    pub(crate) fn brand_groups(&self) -> BTreeMap<&str, &[usize]> {
        self.brand_rows
            .iter()
            .map(|(brand, rows)| (brand.as_str(), rows.as_slice()))
            .collect()
    }
}

/// Substitute the placeholder for a missing or empty cell.
pub fn non_empty_or_placeholder(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => PLACEHOLDER,
    }
}

fn read_table_file<T: TableRow>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).map_err(|e| Error::table(path, e))?;
    read_table(file, path)
}

/// Read every row of a table, picking `T::COLUMNS` by header name.
///
/// Extra columns are ignored. Short rows are kept; their absent cells are
/// missing values.
fn read_table<T: TableRow, R: Read>(reader: R, path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = reader.headers().map_err(|e| Error::csv(path, e))?;
    let indices = T::COLUMNS
        .iter()
        .map(|&column| {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| Error::MissingColumn {
                    path: path.to_path_buf(),
                    column,
                })
        })
        .collect::<Result<Vec<usize>>>()?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| Error::csv(path, e))?;
        let cells: Vec<Option<&str>> = indices.iter().map(|&i| record.get(i)).collect();
        rows.push(T::from_cells(&cells));
    }
    Ok(rows)
}
