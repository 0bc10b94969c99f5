use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::{
    catalog::{Catalog, RawTable},
    utils::sort::argsort_desc_stable,
};

/// One ranked neighbor of the anchor item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub hybrid_score: f64,
    pub popularity: f64,
}

/// Ranked recommendations, best first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recommendations {
    pub list: Vec<Recommendation>,
}

impl Recommendations {
    pub fn new(list: Vec<Recommendation>) -> Self {
        Recommendations { list }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recommendation> {
        self.list.iter()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.list.iter().map(|r| r.title.as_str()).collect()
    }

    /// `title, hybrid_score, popularity` table, e.g. for a spreadsheet tab
    pub fn to_table(&self) -> RawTable {
        RawTable::new(
            vec![
                "title".to_string(),
                "hybrid_score".to_string(),
                "popularity".to_string(),
            ],
            self.list
                .iter()
                .map(|r| {
                    vec![
                        r.title.clone(),
                        r.hybrid_score.to_string(),
                        r.popularity.to_string(),
                    ]
                })
                .collect(),
        )
    }
}

impl IntoIterator for Recommendations {
    type Item = Recommendation;
    type IntoIter = std::vec::IntoIter<Recommendation>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}

impl Display for Recommendations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.list.is_empty() {
            return writeln!(f, "(no results)");
        }
        let width = self
            .list
            .iter()
            .map(|r| r.title.chars().count())
            .max()
            .unwrap_or(0)
            .max("title".len());
        writeln!(f, "{:<width$}  {:>12}  {:>12}", "title", "hybrid_score", "popularity")?;
        for r in &self.list {
            writeln!(
                f,
                "{:<width$}  {:>12.6}  {:>12}",
                r.title, r.hybrid_score, r.popularity
            )?;
        }
        Ok(())
    }
}

/// Order rows by hybrid score (descending, ties by row order), drop the
/// anchor row, keep the first `topn`.
///
/// `scores` and the catalog must be index-aligned.
pub fn rank(catalog: &Catalog, scores: &[f64], anchor: usize, topn: usize) -> Recommendations {
    if topn == 0 {
        return Recommendations::default();
    }
    let list = argsort_desc_stable(scores)
        .into_iter()
        .filter(|&idx| idx != anchor)
        .take(topn)
        .filter_map(|idx| {
            catalog.get_index(idx).map(|item| Recommendation {
                title: item.title.clone(),
                hybrid_score: scores[idx],
                popularity: item.popularity,
            })
        })
        .collect();
    Recommendations::new(list)
}
