//! Per-word sentiment scoring for movie reviews.
//!
//! A training file of scored reviews is folded into two [`BstMap`](bst_map::BstMap)s keyed by
//! word: how often each word occurs, and the sum of the scores of the reviews it occurs in.
//! Stopwords are then dropped from both maps, and new reviews are scored by averaging the
//! mean score of every word the corpus has seen.

pub mod analysis;
pub mod corpus;
pub mod error;
pub mod stopwords;

pub use analysis::{ReviewReport, WordVerdict, analyze_review, prompt, run_interactive};
pub use corpus::{Corpus, ScoredLine, parse_line};
pub use error::CorpusError;
pub use stopwords::Stopwords;
