use anyhow::{Context, Result};
use clap::Parser;

use hobbyist::cli::Cli;
use hobbyist::config::HobbyistConfig;
use hobbyist::graphql::build_schema;
use hobbyist::{logging, server, storage};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let (config, root) = HobbyistConfig::load(&cwd).context("Failed to load configuration")?;
    logging::init(&config.log);

    let store = storage::open(&config, &root).context("Failed to open store")?;
    let schema = build_schema(store);

    tokio::runtime::Runtime::new()?
        .block_on(server::run_server(schema, &config.server, cli.port))
        .context("GraphQL server failed")?;
    Ok(())
}
