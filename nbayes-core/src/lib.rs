//! Naive Bayes text classification with character n-gram tokenization.
//!
//! This crate provides:
//! - A language-agnostic n-gram tokenizer, replaceable by any `Tokenize` strategy
//! - Sparse per-category frequency tables
//! - Log-domain scoring with add-one smoothing and argmax classification
//! - Corpus loading and evaluation helpers
//!
//! ```
//! use nbayes_core::NaiveBayes;
//!
//! let mut model = NaiveBayes::new(2).unwrap();
//! model.train("the match ended with a late goal", "sports");
//! model.train("the vote was postponed by parliament", "politics");
//! assert_eq!(model.classify("a goal in the last minute").unwrap(), "sports");
//! ```

/// Error type shared by every fallible operation.
pub mod error;

/// Tokenizer, frequency store and classifier.
pub mod model;

/// Corpus configuration, training and test files.
pub mod corpus;

/// Accuracy reporting over labeled test documents.
pub mod evaluation;

/// File helpers used by the corpus loader.
///
/// Not exposed
pub(crate) mod io;

pub use error::{ClassifierError, Result};
pub use model::{CategoryScore, FrequencyStore, NGramTokenizer, NaiveBayes, TokenCounts, Tokenize};
