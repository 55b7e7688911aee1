use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use skillcompass_common::{logger, AppConfig};
use skillcompass_server::state::load_corpus_index;
use std::path::PathBuf;

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    match find_project_root().map(|root| root.join(".env")) {
        Some(env_path) if env_path.exists() => {
            dotenv::from_path(&env_path).ok();
        }
        _ => {
            dotenv::dotenv().ok();
        }
    }
}

#[derive(Parser)]
#[command(name = "skillcompass")]
#[command(about = "SkillCompass - assessment question similarity search", long_about = None)]
struct Cli {
    /// Question corpus CSV file
    #[arg(long, global = true)]
    corpus: Option<PathBuf>,

    /// CSV column holding the question text
    #[arg(long, global = true)]
    column: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,
    },

    /// Rank corpus questions against a query and print them
    Query {
        /// Free-text query
        text: String,

        /// Number of results
        #[arg(short, long)]
        k: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    load_dotenv_from_project_root();

    let mut config = AppConfig::from_env()?;
    if let Some(corpus) = cli.corpus {
        config.corpus_path = corpus;
    }
    if let Some(column) = cli.column {
        config.question_column = column;
    }

    match cli.command {
        Some(Commands::Serve { host, port }) => {
            if let Some(host) = host {
                config.server_host = host;
            }
            if let Some(port) = port {
                config.server_port = port;
            }
            serve(config).await
        }
        Some(Commands::Query { text, k }) => query(config, &text, k),
        None => serve(config).await,
    }
}

async fn serve(config: AppConfig) -> Result<()> {
    config.validate()?;
    logger::setup_logging(&config)?;

    tracing::info!("SkillCompass starting...");
    tracing::info!("  Bind: {}", config.server_bind_address());
    tracing::info!("  Corpus: {}", config.corpus_path.display());

    println!("Server listening on http://{}", config.server_bind_address());

    skillcompass_server::start_server(config).await?;
    Ok(())
}

fn query(config: AppConfig, text: &str, k: Option<usize>) -> Result<()> {
    config.validate()?;
    logger::setup_console_logging(&config.log_level)?;

    let index = load_corpus_index(&config)
        .with_context(|| format!("failed to index {}", config.corpus_path.display()))?;
    let hits = index.search_hits(text, config.resolve_top_k(k))?;

    for hit in hits {
        println!(
            "{:>3}. [{:.4}] {}",
            hit.rank + 1,
            hit.distance,
            hit.record.question
        );
    }

    Ok(())
}
