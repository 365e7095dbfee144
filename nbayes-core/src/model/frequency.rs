use std::collections::{HashMap, HashSet};

use super::tokenizer::TokenCounts;

/// Sparse counting tables learned from training documents.
///
/// Three structures are kept side by side:
/// - per-category document counts (how many training calls a category received)
/// - per-category token counts (cumulative occurrences of every token seen
///   in that category)
/// - the global vocabulary (every token seen in any category)
///
/// ## Responsibilities:
/// - Fold tokenized documents into the tables
/// - Answer count lookups for scoring (missing entries read as 0)
/// - Merge with another store (ex. partial stores built on worker threads)
///
/// ## Invariants
/// - Every token of every category table is in `vocabulary`
/// - `categories`, `category_counts` and `token_counts` share the same keys
/// - Counts only ever grow
#[derive(Clone, Debug, Default)]
pub struct FrequencyStore {
	/// Categories in the order they were first trained.
	categories: Vec<String>,
	/// Number of training calls per category.
	category_counts: HashMap<String, usize>,
	/// Token occurrences per category.
	/// Example: { "sports" => { "ba" => 12, "al" => 3 } }
	token_counts: HashMap<String, TokenCounts>,
	/// Every token seen during training, regardless of category.
	vocabulary: HashSet<String>,
}

impl FrequencyStore {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one training document for `category`.
	///
	/// - Each token is added to the vocabulary.
	/// - Token occurrences are added into the category table (created on first use).
	/// - The category document count is incremented by one, even if `tokens` is empty.
	pub fn record(&mut self, category: &str, tokens: &TokenCounts) {
		let table = self.table_mut(category);
		for (token, occurrence) in tokens {
			*table.entry(token.clone()).or_insert(0) += occurrence;
		}
		self.vocabulary.extend(tokens.keys().cloned());
		*self.category_counts.entry(category.to_owned()).or_insert(0) += 1;
	}

	/// Returns the token table of `category`, registering the category if new.
	fn table_mut(&mut self, category: &str) -> &mut TokenCounts {
		if !self.token_counts.contains_key(category) {
			self.categories.push(category.to_owned());
		}
		self.token_counts.entry(category.to_owned()).or_default()
	}

	/// Returns `true` if no category has been trained yet.
	pub fn is_empty(&self) -> bool {
		self.categories.is_empty()
	}

	/// Iterates over the trained categories in first-trained order.
	pub fn categories(&self) -> impl Iterator<Item = &str> {
		self.categories.iter().map(String::as_str)
	}

	/// Number of distinct categories trained so far.
	pub fn category_total(&self) -> usize {
		self.categories.len()
	}

	/// Returns `true` if `category` received at least one training call.
	pub fn contains_category(&self, category: &str) -> bool {
		self.category_counts.contains_key(category)
	}

	/// Number of training calls recorded for `category` (0 if unknown).
	pub fn category_count(&self, category: &str) -> usize {
		self.category_counts.get(category).copied().unwrap_or(0)
	}

	/// Occurrences of `token` recorded for `category` (0 if either is unknown).
	pub fn token_count(&self, category: &str, token: &str) -> usize {
		self.token_counts
			.get(category)
			.and_then(|table| table.get(token))
			.copied()
			.unwrap_or(0)
	}

	/// Sum of every token occurrence recorded for `category`.
	///
	/// Recomputed on each call: O(tokens in the category). Callers compute it
	/// once per category per classification, not once per token.
	pub fn category_token_total(&self, category: &str) -> usize {
		self.token_counts
			.get(category)
			.map(|table| table.values().sum())
			.unwrap_or(0)
	}

	/// Number of distinct tokens seen across all categories.
	pub fn vocabulary_size(&self) -> usize {
		self.vocabulary.len()
	}

	/// Returns `true` if `token` was seen in any category.
	pub fn contains_token(&self, token: &str) -> bool {
		self.vocabulary.contains(token)
	}

	/// Merges another store into this one.
	///
	/// Counts are summed and vocabularies united. Categories unknown to `self`
	/// are appended in the order `other` first trained them.
	pub fn merge(&mut self, other: &Self) {
		for category in &other.categories {
			let table = self.table_mut(category);
			if let Some(other_table) = other.token_counts.get(category) {
				for (token, occurrence) in other_table {
					*table.entry(token.clone()).or_insert(0) += *occurrence;
				}
			}
			*self.category_counts.entry(category.clone()).or_insert(0) += other.category_count(category);
		}
		self.vocabulary.extend(other.vocabulary.iter().cloned());
	}
}
