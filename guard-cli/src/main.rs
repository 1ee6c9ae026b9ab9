//! mguard CLI: scan mentions, link profiles, import posts, classify text. Config from env
//! (optionally `.env`) and CLI args.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use classifier::{ClassifierConfig, LlmClassifier};
use guard_cli::{AppConfig, Cli, Commands};
use guard_core::{init_tracing, Classification, Identity};
use llm_client::{EnvLlmConfig, LlmConfig, OpenAIClassificationProvider};
use mention_pipeline::{link_identity, MentionPipeline};
use storage::{ImportBundle, SqlitePostRepository};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load();
    init_tracing(&config.log_file)?;

    match cli.command {
        Commands::Scan {
            handle,
            name,
            profile,
            concurrency,
            pretty,
        } => handle_scan(&config, handle, name, profile, concurrency, pretty).await,
        Commands::Link { profile } => handle_link(&config, &profile).await,
        Commands::Import { file } => handle_import(&config, file).await,
        Commands::Classify { text } => handle_classify(&text).await,
    }
}

/// Opens the SQLite post store, creating the parent directory of a file database.
async fn open_repository(config: &AppConfig) -> Result<SqlitePostRepository> {
    let url = config.database_url.as_str();
    if !url.ends_with(":memory:") {
        if let Some(parent) = Path::new(url).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating database directory {}", parent.display()))?;
            }
        }
    }
    SqlitePostRepository::new(url)
        .await
        .with_context(|| format!("opening post store at {}", url))
}

/// Builds the provider-backed classifier from OPENAI_* / MODEL / LLM_* / CLASSIFIER_* env.
fn build_classifier() -> Result<LlmClassifier> {
    let llm = EnvLlmConfig::from_env()
        .context("Load LLM config from .env (OPENAI_API_KEY, OPENAI_BASE_URL, MODEL)")?;
    let classifier_config = ClassifierConfig::from_env();
    info!(
        model = %llm.model(),
        base_url = %llm.base_url(),
        timeout_secs = classifier_config.timeout.as_secs(),
        max_attempts = classifier_config.max_attempts,
        "Classifier configured"
    );
    let provider = OpenAIClassificationProvider::from_config(&llm);
    Ok(LlmClassifier::new(Arc::new(provider), classifier_config))
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}

async fn handle_scan(
    config: &AppConfig,
    handle: Option<String>,
    name: Option<String>,
    profile: Option<String>,
    concurrency: Option<usize>,
    pretty: bool,
) -> Result<()> {
    let repo = Arc::new(open_repository(config).await?);

    let identity = match (handle, name, profile) {
        (_, _, Some(profile)) => link_identity(&profile, repo.as_ref()).await?,
        (Some(handle), Some(name), None) => Identity::new(handle, name),
        _ => bail!("scan needs --handle and --name, or --profile"),
    };

    let classifier = build_classifier()?;
    let pipeline = MentionPipeline::new(repo, Arc::new(classifier))
        .with_concurrency(concurrency.unwrap_or(config.pipeline_concurrency));

    let report = pipeline.run(&identity).await?;
    info!(stats = ?report.stats(), handle = %identity.handle, "Scan finished");
    print_json(&report, pretty)
}

async fn handle_link(config: &AppConfig, profile: &str) -> Result<()> {
    let repo = open_repository(config).await?;
    let identity = link_identity(profile, &repo).await?;
    print_json(&identity, true)
}

async fn handle_import(config: &AppConfig, file: PathBuf) -> Result<()> {
    let json = std::fs::read_to_string(&file)
        .with_context(|| format!("reading import file {}", file.display()))?;
    let bundle = ImportBundle::from_json(&json)
        .with_context(|| format!("parsing import file {}", file.display()))?;

    let repo = open_repository(config).await?;
    let (profiles, inserted) = repo.import(&bundle).await?;
    let skipped = bundle.posts.len().saturating_sub(inserted);

    println!(
        "Profiles: {}, Posts inserted: {}, Already present: {}",
        profiles, inserted, skipped
    );
    Ok(())
}

async fn handle_classify(text: &str) -> Result<()> {
    let classifier = build_classifier()?;
    let classification = match classifier.try_classify(text).await {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "Classification failed; using Error label");
            Classification::error()
        }
    };
    print_json(&classification, false)
}
