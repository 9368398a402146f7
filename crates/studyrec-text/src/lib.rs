//! studyrec-text
//!
//! TF-IDF vector space over the catalog: tokenization and n-grams (`analyzer`),
//! the fitted vocabulary and sparse vectors (`vectorizer`), the per-record
//! matrix (`index`) and cosine ranking (`ranker`).

pub mod analyzer;
pub mod index;
pub mod normalize;
pub mod ranker;
pub mod stop_words;
pub mod vectorizer;

pub use analyzer::Analyzer;
pub use index::VectorSpaceIndex;
pub use normalize::combined_text;
pub use ranker::{rank, RankOptions, RankedResult};
pub use vectorizer::{SparseVector, Vocabulary};
