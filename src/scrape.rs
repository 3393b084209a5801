use std::io::Write as _;
use std::path::Path;

use anyhow::Context as _;

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::error::ScrapeError;
use crate::extract::{extract_fields, parse_document};
use crate::fetch;
use crate::normalize::{NormalizedRecord, Status, normalize};
use crate::notion;
use crate::selectors::{SelectorRegistry, sanitize_host};

pub fn run(args: Cli) -> anyhow::Result<()> {
    let url = url::Url::parse(&args.url).map_err(|err| ScrapeError::InvalidUrl {
        url: args.url.clone(),
        reason: err.to_string(),
    })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ScrapeError::InvalidUrl {
            url: args.url.clone(),
            reason: "url must be http/https".to_owned(),
        }
        .into());
    }

    let config = AppConfig::load(Path::new(&args.config)).context("load main config")?;

    let host = sanitize_host(&args.url)?;
    let mut registry = SelectorRegistry::new();
    registry
        .load_host(Path::new(&args.selectors_dir), &host)
        .context("load site selectors")?;

    let client = fetch::http_client()?;

    tracing::info!(url = %args.url, host = %host, "fetch page");
    let html = fetch::fetch_page(&client, &args.url)?;

    let record = scrape_record(&registry, &config, &args.url, &html, args.status)?;
    tracing::info!(
        title = %record.title,
        pages = record.page_count,
        publication = %record.publication_date,
        status = record.status.label(),
        "scraped comic"
    );

    let payload = notion::build_payload(&record, &config.notion_database_id);
    tracing::debug!(%payload, "notion payload");

    if args.dry_run {
        let pretty = serde_json::to_string_pretty(&payload).context("serialize payload")?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{pretty}").context("write payload")?;
        return Ok(());
    }

    let base_url = args
        .notion_base_url
        .as_deref()
        .unwrap_or(config.notion_base_url.as_str());
    let endpoint = notion::pages_endpoint(base_url);
    tracing::info!(endpoint = %endpoint, "create notion page");
    notion::create_page(
        &client,
        &endpoint,
        &config.notion_token,
        &config.notion_version,
        &payload,
    )?;

    println!("Page created successfully in Notion.");
    Ok(())
}

/// Runs extraction and normalization for an already fetched page.
pub fn scrape_record(
    registry: &SelectorRegistry,
    config: &AppConfig,
    url: &str,
    html: &str,
    status: Status,
) -> crate::error::Result<NormalizedRecord> {
    let selectors = registry.resolve(url)?;
    let months = selectors
        .month_table()
        .unwrap_or_else(|| config.month_table());

    let package = parse_document(html);
    let raw = extract_fields(&package.as_document(), selectors)?;
    normalize(raw, status, &months)
}
