use anyhow::Result;
use chrono::NaiveDate;
use findmybike_lib::types::Posting;
use findmybike_lib::{AspectMatch, PostingFeed};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

#[derive(Tabled, Serialize)]
struct PostingRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
    #[tabled(rename = "Bike")]
    #[serde(rename = "Bike")]
    bike: String,
    #[tabled(rename = "Frame")]
    #[serde(rename = "Frame")]
    frame: String,
    #[tabled(rename = "Color")]
    #[serde(rename = "Color")]
    color: String,
    #[tabled(rename = "Location")]
    #[serde(rename = "Location")]
    location: String,
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "URL")]
    #[serde(rename = "URL")]
    url: String,
}

// -- Row builders --

/// Builds rows for display. Aspects matching the active filter are marked
/// with a trailing `*` when `mark_matches` is set.
fn build_posting_rows(
    postings: &[Posting],
    matches: impl Fn(&Posting) -> AspectMatch,
    mark_matches: bool,
) -> Vec<PostingRow> {
    postings
        .iter()
        .map(|p| {
            let m = matches(p);
            let mark = |value: &str, matched: bool| {
                if mark_matches && matched {
                    format!("{}*", value)
                } else {
                    value.to_string()
                }
            };
            PostingRow {
                id: p.id.to_string(),
                title: p.title.clone(),
                bike: mark(p.prediction.bike.as_str(), m.bike),
                frame: mark(p.prediction.frame.as_str(), m.frame),
                color: mark(p.prediction.color.as_str(), m.color),
                location: p.location.clone().unwrap_or_default(),
                date: format_date(p.date),
                url: p.url.clone(),
            }
        })
        .collect()
}

fn feed_rows(feed: &PostingFeed, mark_matches: bool) -> Vec<PostingRow> {
    build_posting_rows(
        feed.postings(),
        |p| feed.aspect_matches(&p.prediction),
        mark_matches,
    )
}

// -- Table output --

pub fn print_postings_table(feed: &PostingFeed) {
    println!("{}", Table::new(feed_rows(feed, true)));
}

// -- Markdown output --

pub fn print_postings_markdown(feed: &PostingFeed) {
    let mut table = Table::new(feed_rows(feed, true));
    table.with(Style::markdown());
    println!("{}", table);
}

// -- CSV output --

pub fn print_postings_csv(feed: &PostingFeed) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in feed_rows(feed, false) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

/// Long-form date, e.g. "April 2, 2022".
fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_default()
}
