use clap::Parser;

use crate::normalize::Status;

/// Scrape a comic page and add it to a Notion database.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Comic page URL to scrape (must be http/https).
    pub url: String,

    /// Desired status: r (To Read), b (To Buy), o (Ordered), w (Wishlist).
    #[arg(short, long, default_value = "r", value_parser = parse_status)]
    pub status: Status,

    /// Path to the main configuration file.
    #[arg(long, default_value = "config.json")]
    pub config: String,

    /// Directory holding the per-site `xpath-<host>.json` selector files.
    #[arg(long, default_value = ".")]
    pub selectors_dir: String,

    /// Override the Notion API base URL from the configuration file.
    #[arg(long)]
    pub notion_base_url: Option<String>,

    /// Print the Notion payload instead of creating the page.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

fn parse_status(flag: &str) -> Result<Status, crate::error::ScrapeError> {
    Status::parse_flag(flag)
}
