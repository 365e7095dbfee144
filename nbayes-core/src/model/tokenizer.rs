use std::collections::HashMap;

use crate::error::{ClassifierError, Result};

/// Occurrence count of every token found in a document.
///
/// Keys are opaque tokens, values are strictly positive counts.
pub type TokenCounts = HashMap<String, usize>;

/// Capability to split a document into counted tokens.
///
/// The classifier only ever talks to this trait, so any splitting strategy
/// (character n-grams, dictionary or morphology based segmentation, ...) can be
/// injected without the rest of the model noticing.
///
/// `Send + Sync` is required so models can be built on worker threads and
/// shared behind a lock.
pub trait Tokenize: Send + Sync {
	/// Splits `document` and returns how many times each token occurs.
	///
	/// Never fails: an empty document yields an empty map.
	fn tokenize(&self, document: &str) -> TokenCounts;
}

/// Language-agnostic tokenizer producing overlapping character n-grams.
///
/// Every window of `n` consecutive characters is a token (stride 1), so a
/// document of `L` characters yields `L - n + 1` token occurrences when
/// `L >= n`, and nothing otherwise.
///
/// # Invariants
/// - `n` is always >= 1
/// - Windows are measured in Unicode scalar values, never in bytes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NGramTokenizer {
	n: usize, // must be >= 1
}

impl NGramTokenizer {
	/// Creates a tokenizer producing windows of `n` characters.
	///
	/// # Errors
	/// Returns `InvalidConfiguration` if `n == 0`.
	pub fn new(n: usize) -> Result<Self> {
		if n == 0 {
			return Err(ClassifierError::invalid_configuration("n-gram width must be >= 1"));
		}
		Ok(Self { n })
	}

	/// Width of the generated windows.
	pub fn n(&self) -> usize {
		self.n
	}
}

impl Tokenize for NGramTokenizer {
	fn tokenize(&self, document: &str) -> TokenCounts {
		let chars: Vec<char> = document.chars().collect();
		let mut counts = TokenCounts::new();
		if chars.len() < self.n {
			// Document too short, no window fits
			return counts;
		}

		for window in chars.windows(self.n) {
			*counts.entry(window.iter().collect()).or_insert(0) += 1;
		}
		counts
	}
}
