use std::time::Duration;

use anyhow::Context as _;

use crate::error::{Result, ScrapeError};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub fn http_client() -> Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("build http client")
        .map_err(|err| ScrapeError::transport("<client setup>", err))
}

pub fn fetch_page(client: &reqwest::blocking::Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .with_context(|| format!("GET {url}"))
        .map_err(|err| ScrapeError::transport(url, err))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::transport(
            url,
            anyhow::anyhow!("unexpected HTTP status {status}"),
        ));
    }

    response
        .text()
        .context("read page body")
        .map_err(|err| ScrapeError::transport(url, err))
}
