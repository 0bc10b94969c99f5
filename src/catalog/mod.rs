//! Item catalog: the typed, fully-populated table the engine is built from.
//!
//! Raw tabular input (a CSV file, a spreadsheet tab, hand-built records) goes
//! through a [`CatalogSchema`] once at load time. After that every item has a
//! title, optional text fields and a popularity value, so nothing downstream
//! has to ask whether a column exists.

pub mod schema;

use std::{fs::File, io::Read, path::Path};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

pub use schema::{CatalogSchema, RawTable};

/// One row of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique key of the item
    pub title: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    /// Non-negative popularity signal, 0.0 when the source has none
    #[serde(default)]
    pub popularity: f64,
}

impl Item {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            short_description: None,
            tags: None,
            popularity: 0.0,
        }
    }

    pub fn with_short_description(mut self, text: impl Into<String>) -> Self {
        self.short_description = Some(text.into());
        self
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    pub fn with_popularity(mut self, popularity: f64) -> Self {
        self.popularity = popularity;
        self
    }
}

/// Immutable, title-indexed collection of items.
///
/// Row order is the order the items were loaded in; it is the index space
/// shared by the similarity matrix and the popularity vector.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: IndexMap<String, Item>,
}

impl Catalog {
    /// Build a catalog from in-memory records.
    ///
    /// Titles are trimmed. Fails on empty or duplicate titles and on
    /// popularity values that are not finite and non-negative.
    pub fn from_items<I>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = Item>,
    {
        Self::from_rows(items.into_iter().enumerate())
    }

    /// Like [`Catalog::from_items`], with each item tagged by the source row
    /// that errors should report.
    pub(crate) fn from_rows<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, Item)>,
    {
        let mut map: IndexMap<String, Item> = IndexMap::new();
        let mut source_rows = Vec::new();
        for (row, mut item) in rows {
            let title = item.title.trim();
            if title.is_empty() {
                return Err(Error::invalid_value(row, "title", "title is empty"));
            }
            if title.len() != item.title.len() {
                item.title = title.to_string();
            }
            if !item.popularity.is_finite() || item.popularity < 0.0 {
                return Err(Error::invalid_value(
                    row,
                    "popularity",
                    format!("expected a finite non-negative number, got {}", item.popularity),
                ));
            }
            if let Some(first) = map.get_index_of(&item.title) {
                return Err(Error::DuplicateTitle {
                    title: item.title,
                    first_row: source_rows[first],
                    row,
                });
            }
            source_rows.push(row);
            map.insert(item.title.clone(), item);
        }
        Ok(Self { items: map })
    }

    /// Load a catalog from CSV data using the given schema.
    pub fn from_csv_reader<R: Read>(reader: R, schema: &CatalogSchema) -> Result<Self> {
        let table = RawTable::from_csv_reader(reader)?;
        schema.apply(&table)
    }

    /// Load a catalog from a CSV file using the given schema.
    pub fn from_csv_path<P: AsRef<Path>>(path: P, schema: &CatalogSchema) -> Result<Self> {
        let path = path.as_ref();
        let catalog = Self::from_csv_reader(File::open(path)?, schema)?;
        debug!(path = %path.display(), rows = catalog.len(), "catalog loaded from csv");
        Ok(catalog)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in row order
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Titles in row order
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn get(&self, title: &str) -> Option<&Item> {
        self.items.get(title)
    }

    /// Item at a row position
    pub fn get_index(&self, index: usize) -> Option<&Item> {
        self.items.get_index(index).map(|(_, item)| item)
    }

    /// Row position of a title
    pub fn position(&self, title: &str) -> Option<usize> {
        self.items.get_index_of(title)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.items.contains_key(title)
    }

    /// Popularity column as a vector aligned with row order
    pub fn popularity(&self) -> Vec<f64> {
        self.items.values().map(|item| item.popularity).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_items_keeps_row_order() {
        let catalog = Catalog::from_items(vec![
            Item::new("b").with_popularity(2.0),
            Item::new("a").with_popularity(1.0),
            Item::new("c"),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.titles().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert_eq!(catalog.position("a"), Some(1));
        assert_eq!(catalog.popularity(), vec![2.0, 1.0, 0.0]);
        assert_eq!(catalog.get_index(2).map(|i| i.title.as_str()), Some("c"));
    }

    #[test]
    fn duplicate_titles_are_rejected() {
        let err = Catalog::from_items(vec![Item::new("x"), Item::new("y"), Item::new("x")])
            .unwrap_err();
        match err {
            Error::DuplicateTitle { title, first_row, row } => {
                assert_eq!(title, "x");
                assert_eq!(first_row, 0);
                assert_eq!(row, 2);
            }
            other => panic!("expected DuplicateTitle, got {other:?}"),
        }
    }

    #[test]
    fn negative_or_nan_popularity_is_rejected() {
        assert!(matches!(
            Catalog::from_items(vec![Item::new("x").with_popularity(-1.0)]),
            Err(Error::InvalidValue { .. })
        ));
        assert!(matches!(
            Catalog::from_items(vec![Item::new("x").with_popularity(f64::NAN)]),
            Err(Error::InvalidValue { .. })
        ));
    }

    #[test]
    fn empty_title_is_rejected() {
        assert!(matches!(
            Catalog::from_items(vec![Item::new("  ")]),
            Err(Error::InvalidValue { .. })
        ));
    }

    #[test]
    fn titles_are_trimmed_on_load() {
        let catalog = Catalog::from_items(vec![Item::new(" a "), Item::new("b\t")]).unwrap();
        assert_eq!(catalog.titles().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(matches!(
            Catalog::from_items(vec![Item::new("a"), Item::new(" a")]),
            Err(Error::DuplicateTitle { first_row: 0, row: 1, .. })
        ));
    }

    #[test]
    fn unknown_title_has_no_position() {
        let catalog = Catalog::from_items(vec![Item::new("x")]).unwrap();
        assert_eq!(catalog.position("nope"), None);
        assert!(!catalog.contains("nope"));
        assert!(catalog.get("nope").is_none());
    }
}
