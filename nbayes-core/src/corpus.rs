use std::collections::HashMap;
use std::fmt::Debug;
use std::path::Path;

use log::{info, warn};

use crate::error::{ClassifierError, Result};
use crate::io::{read_lines, sibling_path, split_cells};
use crate::model::{NaiveBayes, Tokenize, train_parallel};

/// Number of lines of a corpus configuration file.
const CONFIG_LINES: usize = 4;

/// Labeled training texts and evaluation documents loaded from disk.
///
/// A corpus is described by a tab-separated configuration file of exactly
/// four lines:
/// 1. locale name
/// 2. category labels
/// 3. training file names
/// 4. test file name
///
/// File names are relative to the configuration file directory.
///
/// # Training files
/// Line `i` of every training file belongs to category `i`. Lines are
/// concatenated without separator, file after file. Lines past the number
/// of categories are ignored.
///
/// # Test file
/// Each line is `category index<TAB>document`. Lines with fewer than two
/// cells (including `index<TAB>` with nothing after it) are skipped.
#[derive(Debug, Clone)]
pub struct Corpus {
	/// Locale declared by the configuration. Informational only: text is
	/// always decoded as UTF-8.
	pub locale: String,
	/// Category labels, in declaration order.
	pub categories: Vec<String>,
	/// Concatenated training text per category.
	pub training: HashMap<String, String>,
	/// `(expected category index, document)` evaluation pairs.
	pub test_data: Vec<(usize, String)>,
}

impl Corpus {
	/// Loads a corpus from its configuration file.
	///
	/// # Errors
	/// - `Io` if the configuration or one of the files it lists can't be read.
	/// - `Format` if the configuration doesn't have 4 lines, misses a value,
	///   or if a test line has an invalid category index.
	pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
		let config_path = config_path.as_ref();
		let lines = read_lines(config_path)?;
		if lines.len() != CONFIG_LINES {
			return Err(ClassifierError::format(format!(
				"{}: expected {} lines, got {}",
				config_path.display(),
				CONFIG_LINES,
				lines.len()
			)));
		}

		let locale = split_cells(&lines[0])
			.into_iter()
			.next()
			.ok_or_else(|| ClassifierError::format("missing locale"))?;
		// Positional: training line i and test index i refer to the i-th cell
		let categories = split_cells(&lines[1]);
		let training_files = non_empty_cells(&lines[2]);
		let test_file = non_empty_cells(&lines[3])
			.into_iter()
			.next()
			.ok_or_else(|| ClassifierError::format("missing test file name"))?;

		if categories.is_empty() {
			return Err(ClassifierError::format("no category declared"));
		}

		let mut training: HashMap<String, String> = HashMap::new();
		for file in &training_files {
			let path = sibling_path(config_path, file);
			for (line, category) in read_lines(&path)?.into_iter().zip(&categories) {
				training.entry(category.clone()).or_default().push_str(&line);
			}
		}

		let test_path = sibling_path(config_path, &test_file);
		let test_data = parse_test_lines(&read_lines(&test_path)?, categories.len())?;

		info!(
			"loaded corpus {} ({} categories, {} training files, {} test documents)",
			config_path.display(),
			categories.len(),
			training_files.len(),
			test_data.len()
		);

		Ok(Self { locale, categories, training, test_data })
	}

	/// Returns `(category, text)` pairs in category declaration order.
	///
	/// Categories without any training line are left out.
	pub fn training_documents(&self) -> Vec<(String, String)> {
		self.categories
			.iter()
			.filter_map(|category| {
				self.training
					.get(category)
					.map(|text| (category.clone(), text.clone()))
			})
			.collect()
	}

	/// Trains a new model with one training call per category.
	pub fn train<T>(&self, tokenizer: &T) -> Result<NaiveBayes<T>>
	where
		T: Tokenize + Clone + PartialEq + Debug,
	{
		train_parallel(tokenizer, &self.training_documents())
	}
}

fn non_empty_cells(line: &str) -> Vec<String> {
	split_cells(line).into_iter().filter(|cell| !cell.is_empty()).collect()
}

/// Parses `index<TAB>document` lines.
fn parse_test_lines(lines: &[String], category_count: usize) -> Result<Vec<(usize, String)>> {
	let mut test_data = Vec::new();
	for (number, line) in lines.iter().enumerate() {
		let cells = split_cells(line);
		if cells.len() < 2 {
			if !line.is_empty() {
				warn!("skipping test line {}: expected 2 cells", number + 1);
			}
			continue;
		}

		let index: usize = cells[0].trim().parse().map_err(|_| {
			ClassifierError::format(format!("test line {}: invalid category index '{}'", number + 1, cells[0]))
		})?;
		if index >= category_count {
			return Err(ClassifierError::format(format!(
				"test line {}: category index {} out of range (0..{})",
				number + 1,
				index,
				category_count
			)));
		}
		test_data.push((index, cells[1].clone()));
	}
	Ok(test_data)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::NGramTokenizer;
	use std::fs;
	use tempfile::TempDir;

	fn write_corpus(dir: &TempDir, config: &str) -> std::path::PathBuf {
		fs::write(dir.path().join("train1.txt"), "sunny warm day\r\nrain and clouds\nextra line\n").unwrap();
		fs::write(dir.path().join("train2.txt"), " bright sun\nheavy rain\n").unwrap();
		fs::write(dir.path().join("test.txt"), "0\tsunny\n1\train storm\n\nbroken\n").unwrap();
		let config_path = dir.path().join("corpus.tsv");
		fs::write(&config_path, config).unwrap();
		config_path
	}

	#[test]
	fn load_reads_all_files() {
		let dir = TempDir::new().unwrap();
		let path = write_corpus(&dir, "en_US.UTF-8\nsun\train\ntrain1.txt\ttrain2.txt\ntest.txt\n");

		let corpus = Corpus::load(&path).unwrap();
		assert_eq!(corpus.locale, "en_US.UTF-8");
		assert_eq!(corpus.categories, vec!["sun", "rain"]);
		assert_eq!(corpus.training["sun"], "sunny warm day bright sun");
		assert_eq!(corpus.training["rain"], "rain and cloudsheavy rain");
		assert_eq!(corpus.test_data, vec![(0, "sunny".to_owned()), (1, "rain storm".to_owned())]);
	}

	#[test]
	fn wrong_line_count_is_a_format_error() {
		let dir = TempDir::new().unwrap();
		let path = write_corpus(&dir, "en_US.UTF-8\nsun\train\ntrain1.txt\n");
		assert!(matches!(Corpus::load(&path), Err(ClassifierError::Format(_))));
	}

	#[test]
	fn missing_training_file_is_an_io_error() {
		let dir = TempDir::new().unwrap();
		let path = write_corpus(&dir, "C\nsun\train\nnope.txt\ntest.txt\n");
		assert!(matches!(Corpus::load(&path), Err(ClassifierError::Io(_))));
	}

	#[test]
	fn invalid_test_index_is_a_format_error() {
		let lines = vec!["x\tdoc".to_owned()];
		assert!(matches!(parse_test_lines(&lines, 2), Err(ClassifierError::Format(_))));

		let lines = vec!["5\tdoc".to_owned()];
		assert!(matches!(parse_test_lines(&lines, 2), Err(ClassifierError::Format(_))));
	}

	#[test]
	fn empty_category_cell_keeps_positions() {
		let dir = TempDir::new().unwrap();
		fs::write(dir.path().join("t.txt"), "alpha\nmiddle\nbeta\n").unwrap();
		fs::write(dir.path().join("v.txt"), "2\tbeta\n0\talpha\n").unwrap();
		let path = dir.path().join("corpus.tsv");
		fs::write(&path, "C\na\t\tb\nt.txt\nv.txt\n").unwrap();

		let corpus = Corpus::load(&path).unwrap();
		assert_eq!(corpus.categories, vec!["a", "", "b"]);
		assert_eq!(corpus.training["a"], "alpha");
		assert_eq!(corpus.training[""], "middle");
		assert_eq!(corpus.training["b"], "beta");
		assert_eq!(corpus.test_data, vec![(2, "beta".to_owned()), (0, "alpha".to_owned())]);
	}

	#[test]
	fn index_without_document_is_skipped() {
		let lines = vec!["0\t".to_owned(), "1\tdoc".to_owned(), "1".to_owned()];
		let test_data = parse_test_lines(&lines, 2).unwrap();
		assert_eq!(test_data, vec![(1, "doc".to_owned())]);
	}

	#[test]
	fn training_documents_follow_category_order() {
		let corpus = Corpus {
			locale: String::new(),
			categories: vec!["b".into(), "missing".into(), "a".into()],
			training: HashMap::from([("a".into(), "aaa".into()), ("b".into(), "bbb".into())]),
			test_data: Vec::new(),
		};
		let documents = corpus.training_documents();
		assert_eq!(documents, vec![("b".to_owned(), "bbb".to_owned()), ("a".to_owned(), "aaa".to_owned())]);

		let model = corpus.train(&NGramTokenizer::new(2).unwrap()).unwrap();
		assert_eq!(model.categories().collect::<Vec<_>>(), vec!["b", "a"]);
		assert_eq!(model.classify("aa").unwrap(), "a");
	}
}
