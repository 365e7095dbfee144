use std::fmt::Debug;
use std::sync::mpsc;
use std::thread;

use log::debug;

use super::naive_bayes::NaiveBayes;
use super::tokenizer::Tokenize;
use crate::error::Result;

/// Trains a model from `(category, document)` pairs using worker threads.
///
/// # Behavior
/// - Splits the pairs into chunks (based on CPU cores).
/// - Each thread trains an independent partial model on its chunk.
/// - Partial models are merged back in input order.
///
/// # Notes
/// - The result is the same as calling `train` sequentially in input order,
///   including the category order used to break ties.
/// - Every model instance is only touched by one thread at a time.
pub fn train_parallel<T>(tokenizer: &T, documents: &[(String, String)]) -> Result<NaiveBayes<T>>
where
	T: Tokenize + Clone + PartialEq + Debug,
{
	let mut model = NaiveBayes::with_tokenizer(tokenizer.clone());
	if documents.is_empty() {
		return Ok(model);
	}

	let cpus = num_cpus::get().max(1);
	let chunk_size = documents.len().div_ceil(cpus);

	let (tx, rx) = mpsc::channel();
	thread::scope(|scope| {
		for (index, chunk) in documents.chunks(chunk_size).enumerate() {
			let tx = tx.clone();
			let tokenizer = tokenizer.clone();

			scope.spawn(move || {
				let mut partial_model = NaiveBayes::with_tokenizer(tokenizer);
				for (category, document) in chunk {
					partial_model.train(document, category);
				}
				// The receiver lives until every scoped thread has joined
				let _ = tx.send((index, partial_model));
			});
		}
	});
	drop(tx);

	let mut partial_models: Vec<(usize, NaiveBayes<T>)> = rx.iter().collect();
	partial_models.sort_by_key(|(index, _)| *index);
	debug!("merging {} partial models", partial_models.len());

	for (_, partial_model) in &partial_models {
		model.merge(partial_model)?;
	}
	Ok(model)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::tokenizer::NGramTokenizer;

	fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
		items.iter().map(|(c, d)| (c.to_string(), d.to_string())).collect()
	}

	#[test]
	fn empty_input_gives_empty_model() {
		let tokenizer = NGramTokenizer::new(2).unwrap();
		let model = train_parallel(&tokenizer, &[]).unwrap();
		assert!(model.store().is_empty());
	}

	#[test]
	fn matches_sequential_training() {
		let tokenizer = NGramTokenizer::new(2).unwrap();
		let mut documents = Vec::new();
		for i in 0..64 {
			let category = ["red", "green", "blue"][i % 3];
			documents.push((category.to_string(), format!("{category} sample number {i}")));
		}

		let parallel = train_parallel(&tokenizer, &documents).unwrap();
		let mut sequential = NaiveBayes::with_tokenizer(tokenizer.clone());
		for (category, document) in &documents {
			sequential.train(document, category);
		}

		assert_eq!(parallel.categories().collect::<Vec<_>>(), vec!["red", "green", "blue"]);
		assert_eq!(parallel.store().vocabulary_size(), sequential.store().vocabulary_size());
		for category in ["red", "green", "blue"] {
			assert_eq!(parallel.store().category_count(category), sequential.store().category_count(category));
			assert_eq!(
				parallel.store().category_token_total(category),
				sequential.store().category_token_total(category)
			);
		}
		assert_eq!(parallel.classify("green sample").unwrap(), sequential.classify("green sample").unwrap());
	}

	#[test]
	fn keeps_input_category_order() {
		let tokenizer = NGramTokenizer::new(1).unwrap();
		let documents = pairs(&[("b", "x"), ("a", "y"), ("c", "z"), ("a", "y")]);
		let model = train_parallel(&tokenizer, &documents).unwrap();
		assert_eq!(model.categories().collect::<Vec<_>>(), vec!["b", "a", "c"]);
		assert_eq!(model.store().category_count("a"), 2);
	}
}
