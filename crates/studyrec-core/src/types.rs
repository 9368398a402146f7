//! Domain types shared by the catalog, the vector-space engine and callers.

use serde::{Deserialize, Serialize};

pub type MaterialId = u64;

/// One study material in the catalog.
///
/// - `id`: unique, stable identity within a catalog
/// - `title`/`description`: free text, both indexed
/// - `category`: display facet, filtered by substring but not indexed
/// - `tags`: comma-joined free-form tags, indexed
///
/// Missing text fields deserialize to the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRecord {
    pub id: MaterialId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: String,
}

impl MaterialRecord {
    pub fn new(
        id: MaterialId,
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        tags: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            category: category.into(),
            tags: tags.into(),
        }
    }

    /// Iterates the comma-separated tags, trimmed, skipping empty entries.
    pub fn tag_list(&self) -> impl Iterator<Item = &str> {
        self.tags.split(',').map(str::trim).filter(|t| !t.is_empty())
    }
}

/// A ranked recommendation returned to callers.
///
/// `similarity` is the cosine similarity between the query and the record,
/// always within `[0, 1]`; higher is better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: MaterialId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: String,
    pub similarity: f32,
}

impl Recommendation {
    pub fn from_record(record: &MaterialRecord, similarity: f32) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            description: record.description.clone(),
            category: record.category.clone(),
            tags: record.tags.clone(),
            similarity,
        }
    }
}
