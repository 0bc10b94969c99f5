use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Item};

/// Text field of an item that can take part in its document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextField {
    Title,
    ShortDescription,
    Tags,
}

impl TextField {
    /// title, short description, tags
    pub const DEFAULT_ORDER: [TextField; 3] = [
        TextField::Title,
        TextField::ShortDescription,
        TextField::Tags,
    ];

    /// Field value of an item, None when absent
    #[inline]
    pub fn value<'a>(&self, item: &'a Item) -> Option<&'a str> {
        match self {
            TextField::Title => Some(item.title.as_str()),
            TextField::ShortDescription => item.short_description.as_deref(),
            TextField::Tags => item.tags.as_deref(),
        }
    }
}

/// Join the given fields of one item with a single space.
/// Missing fields contribute an empty string, so the separators stay in place.
/// Nothing is trimmed, case-folded or filtered here.
pub fn compose_document(item: &Item, fields: &[TextField]) -> String {
    fields
        .iter()
        .map(|field| field.value(item).unwrap_or(""))
        .collect::<Vec<&str>>()
        .join(" ")
}

/// One composed document per catalog row, in row order
pub fn compose_documents(catalog: &Catalog, fields: &[TextField]) -> Vec<String> {
    catalog
        .items()
        .map(|item| compose_document(item, fields))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_fields_in_order() {
        let item = Item::new("Dune")
            .with_short_description("desert planet")
            .with_tags("scifi classic");
        assert_eq!(
            compose_document(&item, &TextField::DEFAULT_ORDER),
            "Dune desert planet scifi classic"
        );
        assert_eq!(
            compose_document(&item, &[TextField::Tags, TextField::Title]),
            "scifi classic Dune"
        );
    }

    #[test]
    fn missing_fields_are_empty() {
        let item = Item::new("Dune").with_tags("scifi");
        assert_eq!(compose_document(&item, &TextField::DEFAULT_ORDER), "Dune  scifi");
    }

    #[test]
    fn empty_field_set_gives_empty_string() {
        let item = Item::new("Dune");
        assert_eq!(compose_document(&item, &[]), "");
    }

    #[test]
    fn no_case_folding() {
        let item = Item::new("The BIG One");
        assert_eq!(compose_document(&item, &[TextField::Title]), "The BIG One");
    }
}
