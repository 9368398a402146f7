use std::sync::Arc;

use tracing::debug;

use studyrec_core::config::EngineSettings;
use studyrec_core::traits::Recommender;
use studyrec_core::{Catalog, Error, MaterialId, MaterialRecord, Recommendation, Result};
use studyrec_text::{RankOptions, VectorSpaceIndex};

/// A catalog bound to the vector space fitted over it.
///
/// Built once; every query method takes `&self`, so one instance can be
/// shared across threads behind an `Arc`.
#[derive(Debug, Clone)]
pub struct StudyRecommender {
    catalog: Catalog,
    index: Arc<VectorSpaceIndex>,
    settings: EngineSettings,
}

impl StudyRecommender {
    pub fn fit(catalog: Catalog, settings: EngineSettings) -> Result<Self> {
        let index = VectorSpaceIndex::fit(catalog.records(), &settings)?;
        Ok(Self { catalog, index: Arc::new(index), settings })
    }

    /// Top `top_n` records for `query`, best first. A query sharing no
    /// terms with the catalog yields an empty list.
    pub fn recommend(&self, query: &str, top_n: usize) -> Result<Vec<Recommendation>> {
        if top_n == 0 {
            return Err(Error::InvalidQuery("top_n must be at least 1".into()));
        }
        let options = RankOptions { top_n, min_score: self.settings.min_score };
        let results: Vec<Recommendation> = self
            .index
            .search(query, &options)
            .into_iter()
            .filter_map(|hit| self.catalog.get(hit.row).map(|r| Recommendation::from_record(r, hit.similarity)))
            .collect();
        debug!(query, top_n, returned = results.len(), "recommend");
        Ok(results)
    }

    /// `recommend` with the configured `default_top_n`.
    pub fn recommend_default(&self, query: &str) -> Result<Vec<Recommendation>> {
        self.recommend(query, self.settings.default_top_n)
    }

    pub fn search_by_category(&self, category: &str) -> Vec<MaterialRecord> { self.catalog.search_by_category(category) }

    pub fn search_by_tag(&self, tag: &str) -> Vec<MaterialRecord> { self.catalog.search_by_tag(tag) }

    pub fn all_materials(&self) -> &[MaterialRecord] { self.catalog.records() }

    pub fn get(&self, id: MaterialId) -> Result<&MaterialRecord> { self.catalog.find(id) }

    pub fn catalog(&self) -> &Catalog { &self.catalog }

    pub fn index(&self) -> &VectorSpaceIndex { &self.index }

    pub fn settings(&self) -> &EngineSettings { &self.settings }
}

impl Recommender for StudyRecommender {
    fn recommend(&self, query: &str, top_n: usize) -> Result<Vec<Recommendation>> { Self::recommend(self, query, top_n) }
    fn search_by_category(&self, category: &str) -> Vec<MaterialRecord> { Self::search_by_category(self, category) }
    fn search_by_tag(&self, tag: &str) -> Vec<MaterialRecord> { Self::search_by_tag(self, tag) }
}
