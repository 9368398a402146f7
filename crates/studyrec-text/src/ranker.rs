use crate::vectorizer::SparseVector;

/// Result-count and threshold knobs for a single ranking pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankOptions {
    pub top_n: usize,
    /// Rows must score strictly above this to be kept.
    pub min_score: f32,
}

impl Default for RankOptions {
    fn default() -> Self { Self { top_n: 3, min_score: 0.0 } }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedResult {
    /// Position of the record in the corpus.
    pub row: usize,
    pub similarity: f32,
}

/// Scores every row against `query` and returns the best `top_n`,
/// highest similarity first. Equal scores keep corpus order.
pub fn rank(query: &SparseVector, rows: &[SparseVector], options: &RankOptions) -> Vec<RankedResult> {
    if query.is_zero() || options.top_n == 0 {
        return Vec::new();
    }
    let mut scored: Vec<RankedResult> = rows
        .iter()
        .enumerate()
        .map(|(row, doc)| RankedResult { row, similarity: query.dot(doc).clamp(0.0, 1.0) })
        .filter(|r| r.similarity > options.min_score)
        .collect();
    // sort_by is stable, so ties stay in row order.
    scored.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    scored.truncate(options.top_n);
    scored
}
