use serde::Serialize;

use crate::error::{ClassifierError, Result};
use crate::model::{NaiveBayes, Tokenize};

/// Outcome of classifying one evaluation document.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Prediction {
	pub document: String,
	pub expected: String,
	pub predicted: String,
}

impl Prediction {
	pub fn is_correct(&self) -> bool {
		self.expected == self.predicted
	}
}

/// Predictions made over a whole evaluation set, in input order.
#[derive(Serialize, Clone, Debug, Default)]
pub struct Evaluation {
	pub predictions: Vec<Prediction>,
}

impl Evaluation {
	/// Number of wrong predictions.
	pub fn errors(&self) -> usize {
		self.predictions.iter().filter(|p| !p.is_correct()).count()
	}

	pub fn is_all_correct(&self) -> bool {
		self.errors() == 0
	}

	/// Share of correct predictions, `None` for an empty evaluation set.
	pub fn accuracy(&self) -> Option<f64> {
		if self.predictions.is_empty() {
			return None;
		}
		let correct = self.predictions.len() - self.errors();
		Some(correct as f64 / self.predictions.len() as f64)
	}
}

/// Classifies every `(expected index, document)` pair of `test_data`.
///
/// # Errors
/// - `Format` if an index is outside `categories`.
/// - `EmptyModel` if the model was never trained.
pub fn evaluate<T: Tokenize>(
	model: &NaiveBayes<T>,
	categories: &[String],
	test_data: &[(usize, String)],
) -> Result<Evaluation> {
	let mut predictions = Vec::with_capacity(test_data.len());
	for (index, document) in test_data {
		let expected = categories.get(*index).ok_or_else(|| {
			ClassifierError::format(format!("category index {} out of range (0..{})", index, categories.len()))
		})?;
		predictions.push(Prediction {
			document: document.clone(),
			expected: expected.clone(),
			predicted: model.classify(document)?,
		});
	}
	Ok(Evaluation { predictions })
}
