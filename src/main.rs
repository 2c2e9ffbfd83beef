mod cli;

use std::sync::Arc;

use clap::Parser;
use cli::{Cli, Commands};
use moviebox::api::{self, MovieRouter, state::AppState};
use moviebox::config::Config;
use moviebox::{observability, storage};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), lambda_http::Error> {
    let cli = Cli::parse();

    let config = Config::load()?;
    observability::init_tracing(&config.telemetry);

    // One client per process, shared by every invocation
    let store = storage::connect(&config.storage).await?;
    info!(provider = ?config.storage.provider, "Storage backend ready");
    let router = Arc::new(MovieRouter::new(Arc::clone(&store)));

    match cli.command.unwrap_or(Commands::Lambda) {
        Commands::Lambda => api::lambda::run(router).await?,
        Commands::Serve(args) => {
            let address = args.address.unwrap_or(config.server.bind_addr);
            api::run(address, AppState::new(config, router)).await?;
            store.flush()?;
        }
    }

    Ok(())
}
