//! vietsent CLI — Vietnamese sentiment service.
//!
//! Usage:
//!   vietsent serve [--bind addr] [--offline] [--config path] [--db path] [--model-token T]
//!   vietsent analyze <text> [--offline] [--config path] [--db path]
//!   vietsent history [--limit N] [--config path] [--db path]

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use vietsent::{
    Classifier, Config, HttpModel, Lexicon, MockModel, Normalizer, OpenStore, Pipeline,
    SentimentModel, SqliteStore,
};

#[derive(Parser)]
#[command(name = "vietsent", version, about = "Vietnamese text sentiment service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Path to YAML configuration file
    #[arg(long, global = true, env = "VIETSENT_CONFIG")]
    config: Option<PathBuf>,
    /// Path to SQLite database file
    #[arg(long, global = true, env = "VIETSENT_DB")]
    db: Option<PathBuf>,
    /// Path to the replacement dictionary (JSON object)
    #[arg(long, global = true, env = "VIETSENT_LEXICON")]
    lexicon: Option<PathBuf>,
    /// Bearer token for the model service
    #[arg(long, global = true, env = "VIETSENT_MODEL_TOKEN", hide_env_values = true)]
    model_token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind, e.g. 127.0.0.1:5000
        #[arg(long, env = "VIETSENT_BIND")]
        bind: Option<String>,
        /// Skip the model service; every text is classified NEUTRAL
        #[arg(long)]
        offline: bool,
    },
    /// Analyze one text and record it
    Analyze {
        text: String,
        /// Skip the model service; every text is classified NEUTRAL
        #[arg(long)]
        offline: bool,
    },
    /// Show recent analyses
    History {
        /// Maximum number of records to show
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config, String> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path).map_err(|e| e.to_string())?,
        None => Config::default(),
    };
    if let Some(db) = &cli.db {
        config.database_path = db.clone();
    }
    if let Some(lexicon) = &cli.lexicon {
        config.lexicon_path = lexicon.clone();
    }
    if let Some(token) = &cli.model_token {
        config.model.api_token = Some(token.clone());
    }
    Ok(config)
}

fn build_model(config: &Config, offline: bool) -> Result<Arc<dyn SentimentModel>, String> {
    if offline {
        tracing::warn!("offline mode: no model service, all texts classified NEUTRAL");
        return Ok(Arc::new(MockModel::returning("NEU", 1.0)));
    }
    let model = HttpModel::from_config(&config.model)
        .map_err(|e| format!("Failed to create model client: {}", e))?;
    tracing::info!(model = %config.model.name, url = model.url(), "using model service");
    Ok(Arc::new(model))
}

fn open_store(config: &Config) -> Result<Arc<SqliteStore>, String> {
    let store = SqliteStore::open(&config.database_path).map_err(|e| {
        format!("Failed to open database at {}: {}", config.database_path.display(), e)
    })?;
    Ok(Arc::new(store))
}

fn build_pipeline(config: &Config, offline: bool) -> Result<Pipeline, String> {
    let lexicon = Arc::new(Lexicon::load(&config.lexicon_path));
    let classifier = Classifier::new(build_model(config, offline)?)
        .with_min_confidence(config.min_confidence);
    let store = open_store(config)?;
    Ok(Pipeline::new(Normalizer::new(lexicon), classifier, store)
        .with_history_limit(config.history_limit))
}

fn runtime() -> Result<tokio::runtime::Runtime, String> {
    tokio::runtime::Runtime::new().map_err(|e| format!("failed to create tokio runtime: {}", e))
}

fn cmd_serve(config: &mut Config, bind: Option<String>, offline: bool) -> Result<(), String> {
    if let Some(bind) = bind {
        config.bind_address = bind;
    }
    let addr = config.bind_addr().map_err(|e| e.to_string())?;
    let pipeline = Arc::new(build_pipeline(config, offline)?);

    runtime()?.block_on(async move {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| format!("Failed to bind {}: {}", addr, e))?;
        vietsent::server::serve(listener, pipeline)
            .await
            .map_err(|e| format!("Server error: {}", e))
    })
}

fn cmd_analyze(config: &Config, text: &str, offline: bool) -> Result<(), String> {
    let pipeline = build_pipeline(config, offline)?;
    let analysis = runtime()?
        .block_on(pipeline.handle(Some(text)))
        .map_err(|e| e.to_string())?;
    let json = serde_json::to_string_pretty(&analysis).map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}

fn cmd_history(config: &Config, limit: Option<usize>) -> Result<(), String> {
    use vietsent::HistoryStore;

    let store = open_store(config)?;
    let records = store
        .list_recent(limit.unwrap_or(config.history_limit))
        .map_err(|e| e.to_string())?;
    if records.is_empty() {
        println!("No analyses recorded.");
        return Ok(());
    }
    println!("{:>6}  {:<26}  {:<9}  {}", "ID", "TIMESTAMP", "SENTIMENT", "TEXT");
    println!("{}", "-".repeat(72));
    for record in records {
        println!(
            "{:>6}  {:<26}  {:<9}  {}",
            record.id, record.timestamp, record.sentiment_label, record.text_input
        );
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let mut config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Serve { bind, offline } => cmd_serve(&mut config, bind, offline),
        Commands::Analyze { text, offline } => cmd_analyze(&config, &text, offline),
        Commands::History { limit } => cmd_history(&config, limit),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_token_flag_overrides_config() {
        let cli = Cli::try_parse_from(["vietsent", "history", "--model-token", "hf_secret"]).unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(config.model.api_token.as_deref(), Some("hf_secret"));
    }
}
