use anyhow::Result;
use clap::Args;
use findmybike_lib::types::Aspect;
use findmybike_lib::validation;
use findmybike_lib::{Client, FeedController, Query, QueryState};
use indicatif::{ProgressBar, ProgressStyle};

use crate::output::{
    print_json, print_postings_csv, print_postings_markdown, print_postings_table, OutputFormat,
};

#[derive(Args)]
pub struct PostingsArgs {
    /// Filter by bike type: bike, children, cargo
    #[arg(long, default_value = "")]
    pub bike: String,

    /// Filter by frame: diamond, trapeze, swan_neck, low_entry, x, y
    #[arg(long, default_value = "")]
    pub frame: String,

    /// Filter by color: black, white, gray, blue, red, yellow, green
    #[arg(long, default_value = "")]
    pub color: String,

    /// Postings per page
    #[arg(long, default_value = "10")]
    pub limit: u64,

    /// Number of pages to load
    #[arg(long, default_value = "1")]
    pub pages: u32,
}

pub async fn run(args: &PostingsArgs, client: Client, format: &OutputFormat) -> Result<()> {
    let limit = validation::validate_page_size(args.limit)?;
    let pages = validation::validate_pages(args.pages)?;

    let mut query = QueryState::default();
    query.set_field(Aspect::Bike, &args.bike)?;
    query.set_field(Aspect::Frame, &args.frame)?;
    query.set_field(Aspect::Color, &args.color)?;

    let mut controller = FeedController::new(client, limit);

    let pb = ProgressBar::new(pages as u64);
    pb.set_style(ProgressStyle::with_template("{spinner} [{pos}/{len}] {msg}")?);
    pb.set_message("searching postings...");

    controller.search(&query.to_query()).await?;
    pb.inc(1);

    let mut loaded = 1;
    while loaded < pages && controller.feed().can_load_more() {
        pb.set_message(format!("loading page {}...", loaded + 1));
        controller.load_more().await?;
        loaded += 1;
        pb.inc(1);
    }
    pb.finish_and_clear();

    let feed = controller.feed();
    let filter = match feed.active_query() {
        Some(query) if !query.is_unfiltered() => query.to_query_string(),
        _ => "no filter".to_string(),
    };
    eprintln!(
        "{} postings for {} over {} page(s) of {}{}",
        feed.len(),
        filter,
        loaded,
        feed.page_size(),
        if feed.is_exhausted() {
            " (end of results)"
        } else {
            ""
        }
    );

    match format {
        OutputFormat::Table => print_postings_table(feed),
        OutputFormat::Json => print_json(&feed.postings()),
        OutputFormat::Csv => print_postings_csv(feed)?,
        OutputFormat::Markdown => print_postings_markdown(feed),
    }

    Ok(())
}
