use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shopharvest_core::Environment;
use tracing_subscriber::EnvFilter;

mod scrape;

#[derive(Debug, Parser)]
#[command(name = "shopharvest")]
#[command(about = "Scrape a storefront's catalog, collections, blogs and store details")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape one store and write the aggregate as JSON.
    Scrape {
        /// Store base URL; `https://` is assumed when no scheme is given.
        store_url: String,
        /// Write JSON here instead of stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Pretty-print the JSON.
        #[arg(long)]
        pretty: bool,
    },
    /// Print the effective configuration.
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = shopharvest_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(ansi_logs(&config.env))
        .init();

    match cli.command {
        Some(Commands::Scrape {
            store_url,
            output,
            pretty,
        }) => scrape::run_scrape(&config, &store_url, output.as_deref(), pretty).await,
        Some(Commands::Config) => {
            println!("{config:#?}");
            Ok(())
        }
        None => {
            println!("shopharvest: run `shopharvest scrape <STORE_URL>` or `shopharvest --help`");
            Ok(())
        }
    }
}

/// Production logs go to collectors that do not render terminal colors.
fn ansi_logs(env: &Environment) -> bool {
    *env != Environment::Production
}
