mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use findmybike_lib::Client;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "findmybike")]
#[command(about = "Browse bicycle classifieds by predicted type, frame and color")]
struct Cli {
    /// Output format: table, json, csv or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Base URL of the Find-My-Bike API
    #[arg(long, env = "FINDMYBIKE_BACKEND_URL", global = true, hide_env_values = true)]
    backend_url: Option<String>,

    /// API key sent as the access_token header
    #[arg(long, env = "FINDMYBIKE_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search postings and page through the results
    Postings(commands::postings::PostingsArgs),
    /// Submit a corrected prediction for a posting
    Correct(commands::correct::CorrectArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("findmybike=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "markdown" | "md" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    let backend_url = cli
        .backend_url
        .context("no backend URL: pass --backend-url or set FINDMYBIKE_BACKEND_URL")?;
    let api_key = cli
        .api_key
        .context("no API key: pass --api-key or set FINDMYBIKE_API_KEY")?;
    let client = Client::new(&backend_url, &api_key)?;

    match &cli.command {
        Commands::Postings(args) => commands::postings::run(args, client, &format).await?,
        Commands::Correct(args) => commands::correct::run(args, &client).await?,
    }

    Ok(())
}
