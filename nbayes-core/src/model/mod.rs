//! Top-level module for the classification engine.
//!
//! This module provides:
//! - Pluggable document tokenization (`Tokenize`, `NGramTokenizer`)
//! - Sparse frequency accounting (`FrequencyStore`)
//! - Training, scoring and classification (`NaiveBayes`)
//! - Multithreaded training helpers (`train_parallel`)

/// Naive Bayes model: training, log-domain scoring and classification.
pub mod naive_bayes;

/// Tokenizer capability and the default character n-gram strategy.
pub mod tokenizer;

/// Per-category document counts, per-category token counts and vocabulary.
///
/// Exposed read-only through `NaiveBayes::store`.
pub mod frequency;

/// Builds models on worker threads and merges them.
pub mod training;

pub use frequency::FrequencyStore;
pub use naive_bayes::{CategoryScore, NaiveBayes};
pub use tokenizer::{NGramTokenizer, TokenCounts, Tokenize};
pub use training::train_parallel;
