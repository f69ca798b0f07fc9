use clap::Parser;
use std::path::PathBuf;
use survey_api::{ApiConfig, ApiServer, AppState};
use survey_core::FormValidator;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Survey submission API server
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(short = 'H', long, env = "SURVEY_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "SURVEY_PORT")]
    port: Option<u16>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "SURVEY_LOG_LEVEL")]
    log_level: Option<String>,

    /// Config file path
    #[arg(short, long, env = "SURVEY_CONFIG")]
    config_file: Option<PathBuf>,

    /// Disable Swagger UI
    #[arg(long, env = "SURVEY_DISABLE_SWAGGER", default_value_t = false)]
    disable_swagger: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let (mut config, load_error) = match &cli.config_file {
        Some(path) => match ApiConfig::load_from_file(path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (ApiConfig::default(), Some(e)),
        },
        None => (ApiConfig::default(), None),
    };

    // Override with CLI options
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level;
    }
    if cli.disable_swagger {
        config.enable_swagger = false;
    }

    // Initialize logging
    let filter = format!("survey_api={},tower_http=debug", config.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match (&cli.config_file, load_error) {
        (Some(path), None) => info!("Configuration loaded from: {}", path.display()),
        (Some(_), Some(e)) => warn!(
            "Failed to load config file: {}. Using default configuration.",
            e
        ),
        _ => {}
    }

    let enable_swagger = config.enable_swagger;
    let state = AppState::new(FormValidator::new(), config);
    let server = ApiServer::new(state)?;

    info!("Starting server on: {}", server.addr());
    if enable_swagger {
        info!("Swagger UI: http://{}/swagger-ui", server.addr());
    }

    server.serve().await
}
