use crate::config::{Settings, DEFAULT_DETAIL_FILE, DEFAULT_LIST_FILE};
use crate::domain::apartment::load_apartments;
use crate::errors::PipelineError;
use crate::registry::RegistryClient;
use crate::router::{handle, Dataset};
use astra::Server;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

mod config;
mod domain;
mod errors;
mod pipeline;
mod registry;
mod responses;
mod router;
mod spreadsheets;
mod store;
mod templates;


#[derive(Debug, Parser)]
#[command(name = "apt_registry", about = "Apartment registry fetcher and dashboard")]
struct Cli {
    /// Output of `list`, input of `detail`
    #[arg(long, global = true, default_value = DEFAULT_LIST_FILE)]
    list_file: PathBuf,

    /// Output of `detail`, input of `dashboard`
    #[arg(long, global = true, default_value = DEFAULT_DETAIL_FILE)]
    detail_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch every complex from the list endpoint and overwrite the list file
    List,
    /// Fetch details for complexes not yet in the detail file
    Detail {
        /// Stop after this many unprocessed complexes
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Serve the dashboard over the detail file
    Dashboard {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
        #[arg(long, default_value_t = 8)]
        workers: usize,
    },
}

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), PipelineError> {
    match cli.command {
        Command::List => {
            let settings = Settings::from_env(cli.list_file, cli.detail_file)?;
            let client = RegistryClient::new(&settings)?;
            pipeline::run_list_fetch(&client, &settings)?;
        }
        Command::Detail { limit } => {
            let settings = Settings::from_env(cli.list_file, cli.detail_file)?;
            let client = RegistryClient::new(&settings)?;
            pipeline::run_detail_fetch(&client, &settings, limit)?;
        }
        Command::Dashboard { addr, workers } => serve(&cli.detail_file, addr, workers)?,
    }
    Ok(())
}

fn serve(detail_file: &std::path::Path, addr: SocketAddr, workers: usize) -> Result<(), PipelineError> {
    let apartments = load_apartments(detail_file)?;
    info!(rows = apartments.len(), path = %detail_file.display(), "detail file loaded");

    let data = Arc::new(Dataset::new(detail_file.display().to_string(), apartments));

    println!("Starting server at http://{addr}");
    let server = Server::bind(&addr).max_workers(workers);

    server
        .serve(move |req, _info| match handle(req, &data) {
            Ok(resp) => resp,
            Err(err) => responses::html_error_response(err),
        })
        .map_err(PipelineError::Io)?;

    info!("server shut down cleanly");
    Ok(())
}
