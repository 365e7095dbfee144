use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` and removes every `\r`
pub(crate) fn read_lines<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents.lines().map(|line| line.replace('\r', "")).collect())
}

/// Splits a line into its tab-separated cells.
///
/// Empty cells between two tabs are kept so positions are preserved.
/// A single trailing tab doesn't open a new cell, and an empty line has no cell.
pub(crate) fn split_cells(line: &str) -> Vec<String> {
	let line = line.strip_suffix('\t').unwrap_or(line);
	if line.is_empty() {
		return Vec::new();
	}
	line.split('\t').map(str::to_owned).collect()
}

/// Resolves `name` against the directory holding `reference`.
///
/// Example:
/// `data/corpus.tsv` + `"train.txt"` → `data/train.txt`
pub(crate) fn sibling_path<P: AsRef<Path>>(reference: P, name: &str) -> PathBuf {
	let parent = reference.as_ref().parent().unwrap_or_else(|| Path::new("."));
	parent.join(name)
}
