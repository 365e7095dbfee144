use std::fmt::Debug;

use log::debug;
use serde::Serialize;

use super::frequency::FrequencyStore;
use super::tokenizer::{NGramTokenizer, TokenCounts, Tokenize};
use crate::error::{ClassifierError, Result};

/// Log-score of one category for a given document.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CategoryScore {
	pub category: String,
	pub score: f64,
}

/// Multinomial Naive Bayes text classifier.
///
/// The model learns, from labeled documents, how often each token shows up in
/// each category, then assigns an unseen document to the category with the
/// highest log-posterior score.
///
/// # Responsibilities
/// - Tokenize documents through the injected [`Tokenize`] strategy
/// - Fold training documents into a [`FrequencyStore`]
/// - Score every trained category and return the best one
/// - Merge with another model built with the same tokenizer
///
/// # Scoring
/// ```text
/// score = ln(documents(c) / categories)
///       + Σ count(t) × ln((occurrences(c, t) + 1) / (total(c) + |vocabulary|))
/// ```
/// The prior divides by the number of distinct categories, not by the number
/// of training documents. Add-one smoothing keeps every likelihood strictly
/// positive. Scores are only ever summed in the log domain.
///
/// # Concurrency
/// The model has no internal synchronization. `train` needs `&mut self`;
/// `classify` and `score` only need `&self`, so a reader-writer lock allows
/// concurrent classification while no training is in flight.
#[derive(Clone, Debug)]
pub struct NaiveBayes<T: Tokenize = NGramTokenizer> {
	tokenizer: T,
	store: FrequencyStore,
}

impl NaiveBayes<NGramTokenizer> {
	/// Creates an empty model splitting documents into `n`-character grams.
	///
	/// # Errors
	/// Returns `InvalidConfiguration` if `n == 0`.
	pub fn new(n: usize) -> Result<Self> {
		Ok(Self::with_tokenizer(NGramTokenizer::new(n)?))
	}
}

impl<T: Tokenize> NaiveBayes<T> {
	/// Creates an empty model using a custom tokenizer.
	pub fn with_tokenizer(tokenizer: T) -> Self {
		Self { tokenizer, store: FrequencyStore::new() }
	}

	pub fn tokenizer(&self) -> &T {
		&self.tokenizer
	}

	/// Read-only view of the learned counts.
	pub fn store(&self) -> &FrequencyStore {
		&self.store
	}

	/// Trained categories, in first-trained order.
	pub fn categories(&self) -> impl Iterator<Item = &str> {
		self.store.categories()
	}

	/// Trains the model with one document labeled `category`.
	///
	/// Can be called any number of times for the same category: counts
	/// accumulate. An empty document (or one shorter than the gram size)
	/// contributes no token but still counts as one document of evidence.
	pub fn train(&mut self, document: &str, category: &str) {
		let tokens = self.tokenizer.tokenize(document);
		debug!("training '{}' with {} distinct tokens", category, tokens.len());
		self.store.record(category, &tokens);
	}

	/// Smoothed likelihood of `token` given `category`.
	///
	/// `category_token_total` is the value of
	/// [`FrequencyStore::category_token_total`] for `category`.
	///
	/// # Notes
	/// - Always strictly positive thanks to add-one smoothing.
	/// - When nothing at all has been learned (no token in any category), the
	///   denominator is clamped to 1 so the term stays finite.
	fn likelihood_with_total(&self, category: &str, token: &str, category_token_total: usize) -> f64 {
		let numerator = self.store.token_count(category, token) as f64 + 1.0;
		let denominator = (category_token_total + self.store.vocabulary_size()).max(1) as f64;
		numerator / denominator
	}

	/// Smoothed likelihood of `token` given `category`.
	///
	/// # Errors
	/// Returns `UnknownCategory` if `category` was never trained.
	pub fn likelihood(&self, category: &str, token: &str) -> Result<f64> {
		if !self.store.contains_category(category) {
			return Err(ClassifierError::UnknownCategory(category.to_owned()));
		}
		let total = self.store.category_token_total(category);
		Ok(self.likelihood_with_total(category, token, total))
	}

	/// Log-posterior score of `category` for an already tokenized document,
	/// up to a constant shared by all categories.
	///
	/// # Errors
	/// Returns `UnknownCategory` if `category` was never trained.
	pub fn score(&self, tokens: &TokenCounts, category: &str, category_token_total: usize) -> Result<f64> {
		if !self.store.contains_category(category) {
			return Err(ClassifierError::UnknownCategory(category.to_owned()));
		}

		let prior = self.store.category_count(category) as f64 / self.store.category_total() as f64;
		let mut score = prior.ln();
		for (token, count) in tokens {
			let likelihood = self.likelihood_with_total(category, token, category_token_total);
			score += *count as f64 * likelihood.ln();
		}
		Ok(score)
	}

	/// Scores `document` against every trained category, in first-trained order.
	///
	/// # Errors
	/// Returns `EmptyModel` if no category has been trained.
	pub fn scores(&self, document: &str) -> Result<Vec<CategoryScore>> {
		if self.store.is_empty() {
			return Err(ClassifierError::EmptyModel);
		}

		let tokens = self.tokenizer.tokenize(document);
		let mut scores = Vec::with_capacity(self.store.category_total());
		for category in self.store.categories() {
			let total = self.store.category_token_total(category);
			let score = self.score(&tokens, category, total)?;
			scores.push(CategoryScore { category: category.to_owned(), score });
		}
		Ok(scores)
	}

	/// Returns the category with the highest score for `document`.
	///
	/// Categories are evaluated in first-trained order and only a strictly
	/// greater score replaces the current best, so ties go to the category
	/// trained first.
	///
	/// # Errors
	/// Returns `EmptyModel` if no category has been trained.
	pub fn classify(&self, document: &str) -> Result<String> {
		let mut best: Option<CategoryScore> = None;
		for candidate in self.scores(document)? {
			if best.as_ref().is_none_or(|current| candidate.score > current.score) {
				best = Some(candidate);
			}
		}
		best.map(|best| best.category).ok_or(ClassifierError::EmptyModel)
	}
}

impl<T: Tokenize + PartialEq + Debug> NaiveBayes<T> {
	/// Merges another model into this one.
	///
	/// # Notes
	/// - Both models must use equal tokenizers (same gram size for n-grams).
	/// - Counts are summed; categories new to `self` are appended in the
	///   order `other` first trained them.
	///
	/// # Errors
	/// Returns `ModelMismatch` if the tokenizers differ.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		if self.tokenizer != other.tokenizer {
			return Err(ClassifierError::ModelMismatch(format!(
				"tokenizer mismatch: self={:?}, other={:?}",
				self.tokenizer, other.tokenizer
			)));
		}
		debug!("merging model with {} categories", other.store.category_total());
		self.store.merge(&other.store);
		Ok(())
	}
}
