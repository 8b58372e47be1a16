// src/main.rs

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error, info, Level};

use mindreader::config::{
    AppConfig, ConfigOptions, SecretStore, DEFAULT_API_BASE_URL, DEFAULT_HOST, DEFAULT_MODEL, DEFAULT_PORT,
    DEFAULT_SECRETS_FILE,
};
use mindreader::server;

#[derive(Parser, Debug)]
#[command(name = "mindreader", version, about = "官場現形記：政治讀心模擬器")]
struct Cli {
    /// Address to bind
    #[arg(long, env = "MINDREADER_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Port to listen on
    #[arg(long, env = "MINDREADER_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Gemini model name
    #[arg(long, env = "MINDREADER_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Base URL of the generative language API
    #[arg(long, env = "MINDREADER_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    api_base_url: String,

    /// Sampling temperature (0.0 - 2.0); the model default when unset
    #[arg(long, env = "MINDREADER_TEMPERATURE")]
    temperature: Option<f32>,

    /// Custom prompt template using {person} and {event}
    #[arg(long, env = "MINDREADER_TEMPLATE")]
    template: Option<PathBuf>,

    /// TOML secrets file consulted when GEMINI_API_KEY isn't in the environment
    #[arg(long, env = "MINDREADER_SECRETS_FILE", default_value = DEFAULT_SECRETS_FILE)]
    secrets_file: PathBuf,

    /// Enable debug logging
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

impl Cli {
    fn options(&self) -> ConfigOptions {
        ConfigOptions {
            host: self.host.clone(),
            port: self.port,
            model: self.model.clone(),
            api_base_url: self.api_base_url.clone(),
            temperature: self.temperature,
            template: self.template.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Before parsing, so env-backed flags see .env values
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .init();

    match dotenv {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) => debug!("No .env loaded: {}", e),
    }

    let store = SecretStore::new(Some(cli.secrets_file.clone()));
    debug!("Secrets file: {:?}", store.file());
    let config = match AppConfig::load(cli.options(), &store) {
        Ok(config) => config,
        Err(e) => {
            // Never serve half-configured
            error!("Configuration error: {}", e);
            eprintln!("{}\n{}", e.banner(), e);
            return ExitCode::from(2);
        }
    };

    info!("Starting mindreader");
    debug!("{:?}", config);

    if let Err(e) = server::run(&config).await {
        error!("Server error: {:#}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
