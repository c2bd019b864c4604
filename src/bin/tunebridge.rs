use clap::Parser;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

use tunebridge::{server, Config};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).try_init() {
        eprintln!("tracing init failed: {}", e);
    }

    let config = Config::parse();
    let orchestrator = config.build_orchestrator().map_err(|e| {
        error!("Failed to build upstream clients: {}", e);
        std::io::Error::other(e)
    })?;

    server::run(&config, orchestrator).await
}
