//! Swappable recommender for callers that re-fit while serving queries.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use studyrec_core::{Catalog, Result};

use crate::recommender::StudyRecommender;

/// Holds the live recommender. Readers take a cheap `Arc` snapshot; a
/// re-fit builds the replacement off-lock and swaps it in.
#[derive(Debug)]
pub struct RecommenderHandle {
    current: RwLock<Arc<StudyRecommender>>,
}

impl RecommenderHandle {
    pub fn new(recommender: StudyRecommender) -> Self { Self { current: RwLock::new(Arc::new(recommender)) } }

    pub fn current(&self) -> Arc<StudyRecommender> { self.current.read().clone() }

    /// Fits `catalog` with the live settings and swaps it in. On error the
    /// previous recommender stays in service.
    pub fn refit(&self, catalog: Catalog) -> Result<Arc<StudyRecommender>> {
        let settings = self.current().settings().clone();
        let fresh = match StudyRecommender::fit(catalog, settings) {
            Ok(r) => Arc::new(r),
            Err(e) => {
                warn!(error = %e, "re-fit failed, keeping previous index");
                return Err(e);
            }
        };
        *self.current.write() = Arc::clone(&fresh);
        info!(documents = fresh.all_materials().len(), "swapped in re-fitted index");
        Ok(fresh)
    }
}
