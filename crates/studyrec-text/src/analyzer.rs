//! Tokenizer, stop-word filter and n-gram expansion shared by fit and query encoding.

use std::collections::HashSet;

use studyrec_core::config::{BuiltinStopWords, EngineSettings, NgramStopWordPolicy, StopWords};
use studyrec_core::{Error, Result};
use tantivy::tokenizer::{LowerCaser, RegexTokenizer, TextAnalyzer, Token, TokenStream};

use crate::stop_words::ENGLISH_STOP_WORDS;

/// Turns raw text into the list of terms the vector space is built over.
///
/// Tokens are maximal runs of word characters, lower-cased. Terms are
/// emitted grouped by n-gram length (all unigrams, then all bigrams, ...),
/// each group in stream order.
#[derive(Clone)]
pub struct Analyzer {
    tokenizer: TextAnalyzer,
    stop_words: HashSet<String>,
    min_n: usize,
    max_n: usize,
    policy: NgramStopWordPolicy,
}

impl Analyzer {
    /// Validates `settings` and builds the analyzer they describe.
    pub fn new(settings: &EngineSettings) -> Result<Self> {
        settings.validate()?;
        let regex = RegexTokenizer::new(r"\w+").map_err(|e| Error::InvalidConfig(format!("tokenizer: {e}")))?;
        let tokenizer = TextAnalyzer::builder(regex).filter(LowerCaser).build();
        Ok(Self {
            tokenizer,
            stop_words: stop_word_set(&settings.stop_words),
            min_n: settings.min_n,
            max_n: settings.max_n,
            policy: settings.ngram_stop_words,
        })
    }

    /// Lower-cased word tokens in stream order, stop words included.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        // token_stream needs &mut; a clone keeps the analyzer shareable across threads.
        let mut tokenizer = self.tokenizer.clone();
        let mut stream = tokenizer.token_stream(text);
        let mut out = Vec::new();
        stream.process(&mut |token: &Token| out.push(token.text.clone()));
        out
    }

    pub fn is_stop_word(&self, token: &str) -> bool { self.stop_words.contains(token) }

    /// All terms of `text` after stop-word removal and n-gram expansion.
    pub fn terms(&self, text: &str) -> Vec<String> {
        let tokens = self.tokens(text);
        let kept: Vec<&str> = tokens
            .iter()
            .map(String::as_str)
            .filter(|t| !self.is_stop_word(t))
            .collect();

        let mut terms = Vec::new();
        for n in self.min_n..=self.max_n {
            if n == 1 {
                terms.extend(kept.iter().map(|t| (*t).to_string()));
                continue;
            }
            match self.policy {
                NgramStopWordPolicy::Collapse => {
                    terms.extend(kept.windows(n).map(|w| w.join(" ")));
                }
                NgramStopWordPolicy::DropIfAny => {
                    for w in tokens.windows(n) {
                        if w.iter().all(|t| !self.is_stop_word(t)) {
                            terms.push(w.join(" "));
                        }
                    }
                }
                NgramStopWordPolicy::DropIfAll => {
                    for w in tokens.windows(n) {
                        if !w.iter().all(|t| self.is_stop_word(t)) {
                            terms.push(w.join(" "));
                        }
                    }
                }
            }
        }
        terms
    }
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("stop_words", &self.stop_words.len())
            .field("min_n", &self.min_n)
            .field("max_n", &self.max_n)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

fn stop_word_set(source: &StopWords) -> HashSet<String> {
    match source {
        StopWords::Builtin(BuiltinStopWords::English) => {
            ENGLISH_STOP_WORDS.iter().map(|w| (*w).to_string()).collect()
        }
        StopWords::Builtin(BuiltinStopWords::None) => HashSet::new(),
        StopWords::Custom(words) => words.iter().map(|w| w.to_lowercase()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer(policy: NgramStopWordPolicy) -> Analyzer {
        let settings = EngineSettings { ngram_stop_words: policy, ..EngineSettings::default() };
        Analyzer::new(&settings).unwrap()
    }

    #[test]
    fn tokenizes_word_runs_and_lowercases() {
        let a = analyzer(NgramStopWordPolicy::DropIfAny);
        assert_eq!(a.tokens("Data-Science, SQL_db!"), vec!["data", "science", "sql_db"]);
    }

    #[test]
    fn unigrams_come_before_bigrams() {
        let a = analyzer(NgramStopWordPolicy::DropIfAny);
        assert_eq!(a.terms("neural networks deep"), vec![
            "neural",
            "networks",
            "deep",
            "neural networks",
            "networks deep"
        ]);
    }

    #[test]
    fn drop_if_any_skips_bigrams_touching_stop_words() {
        let a = analyzer(NgramStopWordPolicy::DropIfAny);
        assert_eq!(a.terms("basics of python"), vec!["basics", "python"]);
    }

    #[test]
    fn collapse_joins_across_removed_stop_words() {
        let a = analyzer(NgramStopWordPolicy::Collapse);
        assert_eq!(a.terms("basics of python"), vec!["basics", "python", "basics python"]);
    }

    #[test]
    fn drop_if_all_keeps_mixed_bigrams() {
        let a = analyzer(NgramStopWordPolicy::DropIfAll);
        assert_eq!(a.terms("basics of the python"), vec![
            "basics",
            "python",
            "basics of",
            "the python"
        ]);
    }

    #[test]
    fn custom_stop_words_are_case_insensitive() {
        let settings = EngineSettings {
            stop_words: StopWords::Custom(vec!["Python".into()]),
            max_n: 1,
            ..EngineSettings::default()
        };
        let a = Analyzer::new(&settings).unwrap();
        assert_eq!(a.terms("python and rust"), vec!["and", "rust"]);
    }

    #[test]
    fn rejects_inverted_range() {
        let settings = EngineSettings { min_n: 3, max_n: 2, ..EngineSettings::default() };
        assert!(matches!(Analyzer::new(&settings), Err(Error::InvalidConfig(_))));
    }
}
