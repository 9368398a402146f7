//! Fitted vocabulary and the sparse vectors built against it.

use std::collections::HashMap;

/// Term to column mapping plus the per-column IDF weight.
///
/// Columns are assigned in lexicographic term order.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    columns: HashMap<String, u32>,
    terms: Vec<String>,
    idf: Vec<f32>,
}

impl Vocabulary {
    /// Builds the vocabulary from `(term, document frequency)` pairs over
    /// a corpus of `n_docs` documents.
    pub(crate) fn from_document_frequencies(mut entries: Vec<(String, usize)>, n_docs: usize) -> Self {
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        let n = n_docs as f32;
        let mut columns = HashMap::with_capacity(entries.len());
        let mut terms = Vec::with_capacity(entries.len());
        let mut idf = Vec::with_capacity(entries.len());
        for (col, (term, df)) in entries.into_iter().enumerate() {
            idf.push((n / (1.0 + df as f32)).ln() + 1.0);
            columns.insert(term.clone(), col as u32);
            terms.push(term);
        }
        Self { columns, terms, idf }
    }

    pub fn len(&self) -> usize { self.terms.len() }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }

    pub fn column(&self, term: &str) -> Option<u32> { self.columns.get(term).copied() }

    pub fn term(&self, column: u32) -> Option<&str> { self.terms.get(column as usize).map(String::as_str) }

    pub fn idf(&self, column: u32) -> Option<f32> { self.idf.get(column as usize).copied() }

    /// Terms in column order.
    pub fn terms(&self) -> &[String] { &self.terms }

    /// Weights `terms` by raw count times IDF and L2-normalizes.
    /// Terms outside the vocabulary are ignored.
    pub fn vectorize<S: AsRef<str>>(&self, terms: &[S]) -> SparseVector {
        let mut counts: HashMap<u32, f32> = HashMap::new();
        for t in terms {
            if let Some(col) = self.column(t.as_ref()) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }
        let weighted = counts
            .into_iter()
            .map(|(col, tf)| (col, tf * self.idf[col as usize]));
        SparseVector::normalized(weighted)
    }
}

/// Sparse row: strictly increasing column indices with matching weights.
///
/// Vectors produced by [`Vocabulary::vectorize`] have unit L2 norm or are
/// all-zero (empty).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    indices: Vec<u32>,
    values: Vec<f32>,
}

impl SparseVector {
    /// Builds a unit-norm vector from unordered `(column, weight)` pairs.
    /// Non-positive weights are dropped; if nothing remains the vector is empty.
    pub fn normalized<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (u32, f32)>,
    {
        let mut pairs: Vec<(u32, f32)> = entries.into_iter().filter(|(_, w)| *w > 0.0).collect();
        pairs.sort_by_key(|(col, _)| *col);
        let norm = pairs.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        if norm == 0.0 || !norm.is_finite() {
            return Self::default();
        }
        let (indices, values) = pairs.into_iter().map(|(c, w)| (c, w / norm)).unzip();
        Self { indices, values }
    }

    pub fn is_zero(&self) -> bool { self.indices.is_empty() }

    /// Number of stored (non-zero) entries.
    pub fn nnz(&self) -> usize { self.indices.len() }

    pub fn norm(&self) -> f32 { self.values.iter().map(|v| v * v).sum::<f32>().sqrt() }

    pub fn iter(&self) -> impl Iterator<Item = (u32, f32)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Dot product by merging the two sorted index lists.
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut acc = 0.0f32;
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    acc += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
            }
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idf_follows_smoothed_formula() {
        let vocab = Vocabulary::from_document_frequencies(vec![("b".into(), 1), ("a".into(), 3)], 4);
        assert_eq!(vocab.terms(), &["a".to_string(), "b".to_string()]);
        let a = vocab.idf(0).unwrap();
        let b = vocab.idf(1).unwrap();
        assert!((a - 1.0).abs() < 1e-6);
        assert!((b - (2.0f32.ln() + 1.0)).abs() < 1e-6);
    }

    #[test]
    fn vectorize_normalizes_and_ignores_unknown_terms() {
        let vocab = Vocabulary::from_document_frequencies(vec![("a".into(), 1), ("b".into(), 1)], 4);
        let v = vocab.vectorize(["a", "a", "b", "zzz"].as_slice());
        assert_eq!(v.nnz(), 2);
        assert!((v.norm() - 1.0).abs() < 1e-5);
        assert!(vocab.vectorize(["zzz"].as_slice()).is_zero());
    }

    #[test]
    fn dot_merges_sorted_indices() {
        let x = SparseVector::normalized(vec![(3, 1.0), (1, 1.0)]);
        let y = SparseVector::normalized(vec![(1, 1.0), (7, 1.0)]);
        assert!((x.dot(&y) - 0.5).abs() < 1e-6);
        assert!((x.dot(&x) - 1.0).abs() < 1e-6);
        assert_eq!(x.dot(&SparseVector::default()), 0.0);
    }
}
