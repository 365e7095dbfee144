//! Error types for the classifier and its corpus loader.
//!
//! Every fallible operation in this crate returns [`Result`], whose error
//! side is [`ClassifierError`].

use std::io;

use thiserror::Error;

/// Errors produced by the classifier, the trainer helpers and the corpus loader.
///
/// # Variants
/// - `InvalidConfiguration`: a model or tokenizer was built with unusable
///   parameters (ex. an n-gram width of 0). Detected at construction.
/// - `EmptyModel`: classification or scoring was requested before any
///   category was trained.
/// - `UnknownCategory`: a score was requested for a category with no training.
/// - `ModelMismatch`: two models built with different tokenizers were merged.
/// - `Io`: a corpus file could not be read.
/// - `Format`: a corpus configuration or test file is malformed.
#[derive(Error, Debug)]
pub enum ClassifierError {
	#[error("Invalid configuration: {0}")]
	InvalidConfiguration(String),

	#[error("Model has no trained category")]
	EmptyModel,

	#[error("Unknown category: {0}")]
	UnknownCategory(String),

	#[error("Model mismatch: {0}")]
	ModelMismatch(String),

	#[error("I/O error: {0}")]
	Io(#[from] io::Error),

	#[error("Format error: {0}")]
	Format(String),
}

impl ClassifierError {
	pub fn invalid_configuration<S: Into<String>>(msg: S) -> Self {
		Self::InvalidConfiguration(msg.into())
	}

	pub fn format<S: Into<String>>(msg: S) -> Self {
		Self::Format(msg.into())
	}
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ClassifierError>;
