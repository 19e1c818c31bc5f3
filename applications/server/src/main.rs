/// Retro Replay - Game library server
use clap::{Parser, Subcommand};
use replay_core::{GameStatus, ListFilter, Provider};
use replay_server::{config::ServerConfig, create_router, state::AppState};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "replay-server")]
#[command(about = "Retro Replay game library server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Import a game from a metadata provider
    Import {
        /// Provider name (igdb or mobygames)
        provider: String,
        /// The provider's id for the game
        external_id: String,
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// List library entries
    List {
        /// Only show entries with this status
        #[arg(short, long)]
        status: Option<String>,
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "replay_server=info,replay_storage=info,replay_providers=info,tower_http=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(config).await?;
        }
        Commands::Import {
            provider,
            external_id,
            config,
        } => {
            import(config, &provider, &external_id).await?;
        }
        Commands::List { status, config } => {
            list(config, status.as_deref()).await?;
        }
    }

    Ok(())
}

/// Load and validate configuration, then open the catalog and providers
async fn build_state(config_path: Option<PathBuf>) -> anyhow::Result<(ServerConfig, AppState)> {
    let config = ServerConfig::load(config_path.as_deref())?;
    config.validate()?;

    let catalog = replay_storage::open_catalog(
        &config.storage.database_url,
        config.storage.max_connections,
    )
    .await?;
    let providers = config.providers.build_registry()?;

    let app_state = AppState::new(Arc::new(catalog), providers);
    Ok((config, app_state))
}

async fn serve(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let (config, app_state) = build_state(config_path).await?;

    tracing::info!("Starting Retro Replay server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);
    tracing::info!("Enabled providers: {:?}", app_state.providers.enabled());

    let app = create_router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn import(
    config_path: Option<PathBuf>,
    provider: &str,
    external_id: &str,
) -> anyhow::Result<()> {
    let provider: Provider = provider.parse()?;
    let (_, app_state) = build_state(config_path).await?;

    let entry = app_state.importer.import(provider, external_id).await?;
    println!("Imported \"{}\" as {}", entry.title, entry.id);

    Ok(())
}

async fn list(config_path: Option<PathBuf>, status: Option<&str>) -> anyhow::Result<()> {
    let filter = ListFilter {
        status: status.map(str::parse::<GameStatus>).transpose()?,
        ..ListFilter::default()
    };
    let (_, app_state) = build_state(config_path).await?;

    let games = app_state.catalog.list_games(&filter).await?;

    println!("Games:");
    for game in games {
        println!("  {}  {:<12}  {}", game.id, game.status.as_str(), game.title);
    }

    Ok(())
}
