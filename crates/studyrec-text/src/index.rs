use std::collections::HashMap;

use tracing::{debug, info};

use studyrec_core::config::EngineSettings;
use studyrec_core::{Error, MaterialRecord, Result};

use crate::analyzer::Analyzer;
use crate::normalize::combined_text;
use crate::ranker::{rank, RankOptions, RankedResult};
use crate::vectorizer::{SparseVector, Vocabulary};

/// TF-IDF matrix over a fixed corpus, one unit-norm row per record.
///
/// Immutable after [`VectorSpaceIndex::fit`]; row `i` belongs to record `i`
/// of the slice it was fitted on.
#[derive(Debug, Clone)]
pub struct VectorSpaceIndex {
	analyzer: Analyzer,
	vocabulary: Vocabulary,
	rows: Vec<SparseVector>,
}

struct TermStats {
	first_seen: usize,
	total: usize,
	df: usize,
}

impl VectorSpaceIndex {
	pub fn fit(records: &[MaterialRecord], settings: &EngineSettings) -> Result<Self> {
		let analyzer = Analyzer::new(settings)?;
		if records.is_empty() {
			return Err(Error::EmptyCorpus);
		}

		let docs: Vec<Vec<String>> = records.iter().map(|r| analyzer.terms(&combined_text(r))).collect();

		let mut stats: HashMap<&str, TermStats> = HashMap::new();
		for terms in &docs {
			let mut counts: HashMap<&str, usize> = HashMap::new();
			for t in terms {
				*counts.entry(t.as_str()).or_insert(0) += 1;
				let next = stats.len();
				stats.entry(t.as_str()).or_insert(TermStats { first_seen: next, total: 0, df: 0 });
			}
			for (t, c) in counts {
				if let Some(s) = stats.get_mut(t) {
					s.total += c;
					s.df += 1;
				}
			}
		}
		if stats.is_empty() {
			return Err(Error::EmptyVocabulary);
		}

		let mut ranked: Vec<(&str, TermStats)> = stats.into_iter().collect();
		if let Some(cap) = settings.max_features {
			if ranked.len() > cap {
				ranked.sort_by(|a, b| b.1.total.cmp(&a.1.total).then(a.1.first_seen.cmp(&b.1.first_seen)));
				ranked.truncate(cap);
			}
		}
		let entries = ranked.into_iter().map(|(t, s)| (t.to_string(), s.df)).collect();
		let vocabulary = Vocabulary::from_document_frequencies(entries, records.len());
		let rows: Vec<SparseVector> = docs.iter().map(|terms| vocabulary.vectorize(terms.as_slice())).collect();

		info!(documents = rows.len(), vocabulary = vocabulary.len(), "fitted vector space");
		Ok(Self { analyzer, vocabulary, rows })
	}

	/// Projects free text into the fitted space. Unknown terms are dropped;
	/// text with no known terms yields the zero vector.
	pub fn encode(&self, query: &str) -> SparseVector {
		let terms = self.analyzer.terms(query);
		self.vocabulary.vectorize(terms.as_slice())
	}

	pub fn search(&self, query: &str, options: &RankOptions) -> Vec<RankedResult> {
		let q = self.encode(query);
		let hits = rank(&q, &self.rows, options);
		debug!(query, terms = q.nnz(), hits = hits.len(), "ranked query");
		hits
	}

	pub fn len(&self) -> usize { self.rows.len() }

	pub fn is_empty(&self) -> bool { self.rows.is_empty() }

	pub fn rows(&self) -> &[SparseVector] { &self.rows }

	pub fn vocabulary(&self) -> &Vocabulary { &self.vocabulary }

	pub fn analyzer(&self) -> &Analyzer { &self.analyzer }
}
