use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use sdnrag_ai::answer::answer_query;
use sdnrag_ai::embeddings::ollama_embed::OllamaEmbedder;
use sdnrag_ai::index::{IndexBuildInput, VectorIndex, DEFAULT_TOP_K};
use sdnrag_ai::llm::ollama_llm::OllamaLlm;
use sdnrag_ai::ollama::OllamaClient;
use sdnrag_core::corpus::build_corpus;
use sdnrag_core::error::{AppError, ValidationWarning};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Everything the run needs, resolved once at startup and passed down
/// explicitly. Environment overrides exist for each field; the artifact
/// directory can also come first on the command line.
#[derive(Debug, Clone)]
struct AppConfig {
    artifact_dir: PathBuf,
    index_root: PathBuf,
    collection: String,
    ollama_base_url: String,
    embed_model: String,
    llm_model: String,
    top_k: u32,
}

impl AppConfig {
    fn resolve() -> Self {
        let artifact_dir = env::args()
            .nth(1)
            .or_else(|| env::var("SDNRAG_ARTIFACT_DIR").ok())
            .unwrap_or_else(|| "./artifacts".to_string());

        let top_k = env::var("SDNRAG_TOP_K")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|k| *k > 0)
            .unwrap_or(DEFAULT_TOP_K);

        Self {
            artifact_dir: PathBuf::from(artifact_dir),
            index_root: PathBuf::from(
                env::var("SDNRAG_INDEX_DIR").unwrap_or_else(|_| "./sdn_vector_db".to_string()),
            ),
            collection: env::var("SDNRAG_COLLECTION")
                .unwrap_or_else(|_| "sdn_attack_knowledge".to_string()),
            ollama_base_url: env::var("SDNRAG_OLLAMA_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:11434".to_string()),
            embed_model: env::var("SDNRAG_EMBED_MODEL")
                .unwrap_or_else(|_| "nomic-embed-text".to_string()),
            llm_model: env::var("SDNRAG_LLM_MODEL").unwrap_or_else(|_| "llama3.1:8b".to_string()),
            top_k,
        }
    }
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(err) => {
            eprintln!("sdnrag error: {err}");
            if let Some(details) = &err.details {
                eprintln!("  {details}");
            }
            std::process::exit(2);
        }
    }
}

fn run() -> Result<(), AppError> {
    let cfg = AppConfig::resolve();

    let client = OllamaClient::new(&cfg.ollama_base_url)?;
    client.health_check()?;
    let embedder = OllamaEmbedder::new(client.clone());
    let llm = OllamaLlm::new(client);

    println!("[+] Loading evidence artifacts from {}", cfg.artifact_dir.display());
    let corpus = build_corpus(&cfg.artifact_dir)?;
    for warning in &corpus.warnings {
        report_warning(warning);
    }
    if corpus.units.is_empty() {
        return Err(AppError::new(
            "INGEST_CORPUS_EMPTY",
            "No evidence units were produced; nothing to index",
        )
        .with_details(format!("dir={}", cfg.artifact_dir.display())));
    }
    println!("[+] {} evidence units loaded", corpus.units.len());

    let index = VectorIndex::open(cfg.index_root.clone(), cfg.collection.clone(), cfg.top_k);
    let status = index.build(
        &corpus.units,
        &embedder,
        IndexBuildInput {
            model: cfg.embed_model.clone(),
            updated_at: now_rfc3339_utc()?,
        },
    )?;
    println!(
        "[+] Indexed {} units into collection \"{}\"",
        status.record_count,
        index.collection()
    );
    println!("[+] Ready. Ask a question; Ctrl+D or Ctrl+C exits.");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!(">> ");
        io::stdout().flush().map_err(|e| {
            AppError::new("QUERY_IO_FAILED", "Failed to flush stdout").with_details(e.to_string())
        })?;

        line.clear();
        let read = stdin.lock().read_line(&mut line).map_err(|e| {
            AppError::new("QUERY_IO_FAILED", "Failed to read query from stdin")
                .with_details(e.to_string())
        })?;
        if read == 0 {
            println!();
            break;
        }

        let query = line.trim();
        if query.is_empty() {
            continue;
        }

        let hits = index.retrieve(&embedder, query)?;
        let answer = answer_query(&llm, &cfg.llm_model, &hits, query)?;
        println!("\nANSWER:\n{answer}\n");
        println!("{}", "=".repeat(70));
    }

    Ok(())
}

fn report_warning(warning: &ValidationWarning) {
    match &warning.details {
        Some(details) => eprintln!("[!] [{}] {} ({details})", warning.code, warning.message),
        None => eprintln!("[!] [{}] {}", warning.code, warning.message),
    }
}

fn now_rfc3339_utc() -> Result<String, AppError> {
    OffsetDateTime::now_utc().format(&Rfc3339).map_err(|e| {
        AppError::new("INDEX_BUILD_FAILED", "Failed to format build timestamp")
            .with_details(e.to_string())
    })
}
