use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use tiki_menu::config::{Config, StorageBackend};
use tiki_menu::domain::{seed_catalog, Category, Session};
use tiki_menu::infra::StaticSessionResolver;
use tiki_menu::state::AppState;
use tiki_menu::{logging, metrics, open_store, server};

#[derive(Parser)]
#[command(name = "tiki_menu")]
#[command(about = "Menu catalog service for the Tiki restaurant website")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the TOML configuration (defaults to $TIKI_CONFIG or ./config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Port to listen on (overrides config and $PORT)
        #[arg(short, long)]
        port: Option<u16>,
        /// Keep the catalog in memory instead of the configured store
        #[arg(long)]
        memory: bool,
        /// Install the Prometheus exporter
        #[arg(long)]
        metrics: bool,
    },
    /// Print the catalog as JSON
    Show {
        /// Only this category (entrees, plats, desserts, boissons)
        #[arg(long)]
        category: Option<String>,
    },
    /// Overwrite the configured store with the opening carte
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;

    // Keep the guard alive so file logs are flushed on exit
    let _log_guard = logging::init_logging(&config.logging);

    match cli.command {
        Commands::Serve {
            port,
            memory,
            metrics: with_metrics,
        } => {
            if memory {
                config.storage.backend = StorageBackend::Memory;
            }
            if with_metrics {
                metrics::init_metrics();
            }
            let port = port.unwrap_or(config.server.port);

            let store = open_store(&config.storage).await?;
            let sessions = Arc::new(StaticSessionResolver::new(&config.sessions));
            if config.sessions.is_empty() {
                info!("No [[sessions]] configured; the editor API will reject every request");
            }

            let state = AppState::new(store, sessions);
            if let Err(e) = server::start_server(state, &config.server.assets_dir, port).await {
                error!("Server stopped: {}", e);
                return Err(e);
            }
        }
        Commands::Show { category } => {
            let store = open_store(&config.storage).await?;
            let json = match category {
                Some(key) => {
                    let category: Category = key.parse()?;
                    serde_json::to_string_pretty(&store.read(category).await?)?
                }
                None => serde_json::to_string_pretty(&store.read_all().await?)?,
            };
            println!("{json}");
        }
        Commands::Reset => {
            let mut storage = config.storage.clone();
            storage.seed = false;
            let store = open_store(&storage).await?;
            // Operator command with direct access to the store file
            store
                .replace_all(&Session::admin("cli"), &seed_catalog())
                .await?;
            info!("Catalog reset to the opening carte");
        }
    }
    Ok(())
}
