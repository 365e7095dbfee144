use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use env_logger::Builder;
use log::{LevelFilter, info};

use nbayes_core::corpus::Corpus;
use nbayes_core::evaluation::{Evaluation, evaluate};
use nbayes_core::NGramTokenizer;

/// Trains a Naive Bayes classifier from a corpus and checks it against the
/// corpus test documents.
#[derive(Parser, Debug)]
#[command(name = "nbayes-eval")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct EvalArgs {
	/// Path to the corpus configuration file to process.
	config: PathBuf,

	/// Number of characters per n-gram.
	#[arg(default_value_t = 2)]
	ngram_size: usize,

	/// Verbosity level (repeat for more)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,

	/// Only print errors
	#[arg(short, long)]
	quiet: bool,
}

impl EvalArgs {
	fn log_level(&self) -> LevelFilter {
		if self.quiet {
			return LevelFilter::Error;
		}
		match self.verbose {
			0 => LevelFilter::Warn,
			1 => LevelFilter::Info,
			_ => LevelFilter::Debug,
		}
	}
}

fn run(args: &EvalArgs) -> Result<Evaluation, Box<dyn std::error::Error>> {
	let corpus = Corpus::load(&args.config)?;
	info!("corpus locale: {}", corpus.locale);

	let tokenizer = NGramTokenizer::new(args.ngram_size)?;
	let model = corpus.train(&tokenizer)?;
	Ok(evaluate(&model, &corpus.categories, &corpus.test_data)?)
}

/// Writes one line per prediction, then the error summary.
///
/// Wrong predictions end with `*`.
fn write_report<W: Write>(out: &mut W, evaluation: &Evaluation) -> io::Result<()> {
	for prediction in &evaluation.predictions {
		let marker = if prediction.is_correct() { "" } else { "*" };
		writeln!(
			out,
			"{:<30}\t=> Response: {:<6} (Correct: {}){}",
			prediction.document, prediction.predicted, prediction.expected, marker
		)?;
	}
	writeln!(out)?;

	let errors = evaluation.errors();
	if errors > 0 {
		writeln!(out, "\t{} errors", errors)?;
	} else {
		writeln!(out, "\tAll correct")?;
	}
	if let Some(accuracy) = evaluation.accuracy() {
		info!("accuracy: {:.2}%", accuracy * 100.0);
	}
	Ok(())
}

fn main() {
	let args = EvalArgs::parse();

	Builder::new()
		.filter_level(args.log_level())
		.format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
		.init();

	let result = run(&args).and_then(|evaluation| {
		write_report(&mut io::stdout().lock(), &evaluation)?;
		Ok(())
	});
	if let Err(e) = result {
		eprintln!("Error: {e}");
		process::exit(1);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use nbayes_core::evaluation::Prediction;

	fn prediction(document: &str, expected: &str, predicted: &str) -> Prediction {
		Prediction {
			document: document.to_owned(),
			expected: expected.to_owned(),
			predicted: predicted.to_owned(),
		}
	}

	fn report(evaluation: &Evaluation) -> String {
		let mut out = Vec::new();
		write_report(&mut out, evaluation).unwrap();
		String::from_utf8(out).unwrap()
	}

	#[test]
	fn report_marks_wrong_answers_and_counts_errors() {
		let evaluation = Evaluation {
			predictions: vec![prediction("sunny day", "sun", "sun"), prediction("heavy storm", "rain", "sun")],
		};
		let expected = format!(
			"{}\t=> Response: sun    (Correct: sun)\n{}\t=> Response: sun    (Correct: rain)*\n\n\t1 errors\n",
			format!("{:<30}", "sunny day"),
			format!("{:<30}", "heavy storm"),
		);
		assert_eq!(report(&evaluation), expected);
	}

	#[test]
	fn report_announces_all_correct() {
		let evaluation = Evaluation { predictions: vec![prediction("sunny day", "sun", "sun")] };
		let text = report(&evaluation);
		assert!(text.starts_with("sunny day                     \t=> Response: sun    (Correct: sun)\n"));
		assert!(text.ends_with("\n\tAll correct\n"));
		assert!(!text.contains('*'));
	}

	#[test]
	fn verbosity_maps_to_level() {
		let args = EvalArgs::parse_from(["nbayes-eval", "corpus.tsv", "-vv"]);
		assert_eq!(args.ngram_size, 2);
		assert_eq!(args.log_level(), LevelFilter::Debug);

		let args = EvalArgs::parse_from(["nbayes-eval", "corpus.tsv", "3", "-q"]);
		assert_eq!(args.ngram_size, 3);
		assert_eq!(args.log_level(), LevelFilter::Error);
	}
}
