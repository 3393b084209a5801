use anyhow::Context as _;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde_json::{Value, json};

use crate::error::{Result, ScrapeError};
use crate::normalize::NormalizedRecord;

pub fn pages_endpoint(base_url: &str) -> String {
    let base_url = base_url.trim_end_matches('/');
    format!("{base_url}/pages")
}

/// Builds the body of a `POST /pages` request creating `record` in the
/// database `database_id`.
pub fn build_payload(record: &NormalizedRecord, database_id: &str) -> Value {
    json!({
        "parent": { "database_id": database_id },
        "properties": {
            "Name": { "title": [{ "text": { "content": record.title } }] },
            "Author": { "rich_text": [{ "text": { "content": record.author } }] },
            "Publication": {
                "date": { "start": record.publication_date.format("%Y-%m-%d").to_string() }
            },
            "Series": { "select": { "name": record.series } },
            "Status": { "select": { "name": record.status.label() } },
            "Cover": {
                "files": [{
                    "type": "external",
                    "name": record.title,
                    "external": { "url": record.cover_image_url },
                }]
            },
            "Pages": { "number": record.page_count },
        },
        "children": [{
            "object": "block",
            "type": "paragraph",
            "paragraph": {
                "rich_text": [{ "type": "text", "text": { "content": record.content } }]
            }
        }],
    })
}

pub fn create_page(
    client: &reqwest::blocking::Client,
    endpoint: &str,
    token: &str,
    notion_version: &str,
    payload: &Value,
) -> Result<()> {
    let response = client
        .post(endpoint)
        .header(reqwest::header::AUTHORIZATION, token)
        .header(CONTENT_TYPE, "application/json")
        .header("Notion-Version", notion_version)
        .json(payload)
        .send()
        .with_context(|| format!("POST {endpoint}"))
        .map_err(|err| ScrapeError::transport(endpoint, err))?;

    let status = response.status();
    if status == StatusCode::OK {
        return Ok(());
    }

    let raw = response.text().unwrap_or_default();
    let message = parse_error_message(&raw).unwrap_or(raw);
    Err(ScrapeError::DestinationApi {
        status: status.as_u16(),
        message,
    })
}

fn parse_error_message(raw_json: &str) -> Option<String> {
    let value: Value = serde_json::from_str(raw_json).ok()?;
    let message = value.get("message")?.as_str()?.to_owned();
    Some(message)
}
