use std::io;
use std::path::PathBuf;
use std::sync::RwLock;

use actix_cors::Cors;
use actix_web::middleware::{Condition, Logger};
use actix_web::{get, post, put, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use log::info;
use serde::Deserialize;

use nbayes_core::corpus::Corpus;
use nbayes_core::{ClassifierError, NGramTokenizer, NaiveBayes};

/// HTTP service classifying documents with a shared Naive Bayes model.
#[derive(Parser, Debug)]
#[command(name = "nbayes-server")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct ServerArgs {
	/// Address to bind
	#[arg(long, env = "NBAYES_HOST", default_value = "127.0.0.1")]
	host: String,

	/// Port to listen on
	#[arg(long, env = "NBAYES_PORT", default_value_t = 5000)]
	port: u16,

	/// Number of characters per n-gram
	#[arg(long, env = "NBAYES_NGRAM", default_value_t = 2)]
	ngram: usize,

	/// Corpus configuration to train from at startup
	#[arg(long, env = "NBAYES_CORPUS")]
	corpus: Option<PathBuf>,

	/// Accept cross-origin requests from any origin
	#[arg(long)]
	cors: bool,
}

#[derive(Deserialize)]
struct TrainQuery {
	category: Option<String>,
}

#[derive(Deserialize)]
struct CorpusQuery {
	path: Option<String>,
}

struct SharedData {
	model: NaiveBayes,
}

type SharedModel = web::Data<RwLock<SharedData>>;

/// HTTP PUT endpoint `/v1/train?category=<label>`
///
/// Trains the model with the request body labeled `category`.
#[put("/v1/train")]
async fn put_train(data: SharedModel, query: web::Query<TrainQuery>, body: String) -> impl Responder {
	let category = match &query.category {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty category"),
	};

	let mut shared_data = match data.write() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	shared_data.model.train(&body, category);
	HttpResponse::Ok().body("Trained")
}

/// HTTP POST endpoint `/v1/classify`
///
/// Returns the best category for the request body.
#[post("/v1/classify")]
async fn post_classify(data: SharedModel, body: String) -> impl Responder {
	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match shared_data.model.classify(&body) {
		Ok(category) => HttpResponse::Ok().body(category),
		Err(e @ ClassifierError::EmptyModel) => HttpResponse::Conflict().body(e.to_string()),
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

/// HTTP POST endpoint `/v1/scores`
///
/// Returns every category with its log-score as JSON.
#[post("/v1/scores")]
async fn post_scores(data: SharedModel, body: String) -> impl Responder {
	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match shared_data.model.scores(&body) {
		Ok(scores) => HttpResponse::Ok().json(scores),
		Err(e @ ClassifierError::EmptyModel) => HttpResponse::Conflict().body(e.to_string()),
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

#[get("/v1/categories")]
async fn get_categories(data: SharedModel) -> impl Responder {
	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	HttpResponse::Ok().body(shared_data.model.categories().collect::<Vec<_>>().join("\n"))
}

/// HTTP PUT endpoint `/v1/load_corpus?path=<config>`
///
/// Replaces the model with one trained from a corpus configuration file.
/// Training happens outside the lock; only the swap takes the write lock.
#[put("/v1/load_corpus")]
async fn put_corpus(data: SharedModel, query: web::Query<CorpusQuery>) -> impl Responder {
	let path = match &query.path {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty corpus path"),
	};

	let tokenizer = match data.read() {
		Ok(m) => m.model.tokenizer().clone(),
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let model = match Corpus::load(path).and_then(|corpus| corpus.train(&tokenizer)) {
		Ok(m) => m,
		Err(e) => return HttpResponse::InternalServerError().body(format!("Failed to load corpus: {e}")),
	};

	let mut shared_data = match data.write() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	shared_data.model = model;
	info!("corpus {} loaded", path);
	HttpResponse::Ok().body("Corpus loaded successfully")
}

fn routes(cfg: &mut web::ServiceConfig) {
	cfg.service(put_train)
		.service(post_classify)
		.service(post_scores)
		.service(get_categories)
		.service(put_corpus);
}

fn build_model(args: &ServerArgs) -> nbayes_core::Result<NaiveBayes> {
	let tokenizer = NGramTokenizer::new(args.ngram)?;
	match &args.corpus {
		Some(path) => Corpus::load(path)?.train(&tokenizer),
		None => Ok(NaiveBayes::with_tokenizer(tokenizer)),
	}
}

/// Main entry point for the server.
///
/// Builds the model (optionally from a corpus), wraps it in a `RwLock` so
/// classification requests run concurrently while training is exclusive,
/// and starts an Actix-web HTTP server.
#[actix_web::main]
async fn main() -> io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let args = ServerArgs::parse();
	let model = build_model(&args).map_err(io::Error::other)?;
	let shared_model = web::Data::new(RwLock::new(SharedData { model }));

	info!("listening on {}:{}", args.host, args.port);
	let cors = args.cors;
	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Condition::new(cors, Cors::permissive()))
			.app_data(shared_model.clone())
			.configure(routes)
	})
		.bind((args.host.as_str(), args.port))?
		.run()
		.await
}
