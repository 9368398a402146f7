use crate::error::Result;
use crate::types::{MaterialRecord, Recommendation};

/// Ranks catalog records against free-text queries.
pub trait Recommender: Send + Sync {
    fn recommend(&self, query: &str, top_n: usize) -> Result<Vec<Recommendation>>;
    fn search_by_category(&self, category: &str) -> Vec<MaterialRecord>;
    fn search_by_tag(&self, tag: &str) -> Vec<MaterialRecord>;
}
