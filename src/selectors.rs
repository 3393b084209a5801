use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::{Host, Url};

use crate::error::{Field, Result, ScrapeError};
use crate::normalize::MonthTable;

/// XPath expressions locating each comic field on one site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSelectorSet {
    #[serde(rename = "cover_image_xpath")]
    pub cover_image_expr: String,
    #[serde(rename = "pages_xpath")]
    pub pages_expr: String,
    #[serde(rename = "title_xpath")]
    pub title_expr: String,
    #[serde(rename = "content_xpath")]
    pub content_expr: String,
    #[serde(rename = "author_xpath")]
    pub author_expr: String,
    #[serde(rename = "publication_date_xpath")]
    pub publication_date_expr: String,
    /// Month abbreviations the site prints dates with, January first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_names: Option<Vec<String>>,
}

impl SiteSelectorSet {
    pub fn expr(&self, field: Field) -> &str {
        match field {
            Field::CoverImage => &self.cover_image_expr,
            Field::Pages => &self.pages_expr,
            Field::Title => &self.title_expr,
            Field::Content => &self.content_expr,
            Field::Author => &self.author_expr,
            Field::PublicationDate => &self.publication_date_expr,
        }
    }

    pub fn from_json(resource: &str, json: &str) -> Result<Self> {
        let set: SiteSelectorSet =
            serde_json::from_str(json).map_err(|err| ScrapeError::malformed(resource, err))?;
        set.validate(resource)?;
        Ok(set)
    }

    fn validate(&self, resource: &str) -> Result<()> {
        let factory = sxd_xpath::Factory::new();
        for field in Field::ALL {
            let expr = self.expr(field);
            if expr.trim().is_empty() {
                return Err(ScrapeError::malformed(
                    resource,
                    format!("`{}` is empty", field.config_key()),
                ));
            }
            factory.build(expr).map_err(|err| {
                ScrapeError::malformed(
                    resource,
                    format!("`{}` is not a valid XPath {expr:?}: {err:?}", field.config_key()),
                )
            })?;
        }
        if let Some(names) = &self.month_names {
            MonthTable::from_names(names).map_err(|reason| ScrapeError::malformed(resource, reason))?;
        }
        Ok(())
    }

    /// The site's own month table, if it declares one.
    pub fn month_table(&self) -> Option<MonthTable> {
        self.month_names
            .as_deref()
            .and_then(|names| MonthTable::from_names(names).ok())
    }
}

/// Reduces a page URL to the host its selector set is keyed by: no scheme,
/// no `www.` prefix, no port, path or query. Internationalized domains keep
/// their Unicode spelling (`fumettì.it`, not `xn--fumett-1va.it`).
pub fn sanitize_host(url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(|err| ScrapeError::InvalidUrl {
        url: url.to_owned(),
        reason: err.to_string(),
    })?;
    let host = match parsed.host() {
        Some(Host::Domain(domain)) if !domain.is_empty() => {
            let (unicode, decoded) = idna::domain_to_unicode(domain);
            if decoded.is_ok() {
                unicode
            } else {
                domain.to_owned()
            }
        }
        Some(Host::Domain(_)) | None => {
            return Err(ScrapeError::InvalidUrl {
                url: url.to_owned(),
                reason: "url must have a host".to_owned(),
            });
        }
        Some(_) => parsed.host_str().unwrap_or_default().to_owned(),
    };
    let host = host.strip_prefix("www.").unwrap_or(host.as_str());
    Ok(host.to_lowercase())
}

pub fn resource_file_name(host: &str) -> String {
    format!("xpath-{host}.json")
}

pub fn load_site_selectors(dir: &Path, host: &str) -> Result<SiteSelectorSet> {
    let path = dir.join(resource_file_name(host));
    let resource = path.display().to_string();
    let json = match std::fs::read_to_string(&path) {
        Ok(json) => json,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(ScrapeError::not_found(resource));
        }
        Err(err) => return Err(ScrapeError::malformed(resource, err)),
    };
    SiteSelectorSet::from_json(&resource, &json)
}

/// Selector sets keyed by sanitized host.
#[derive(Debug, Default, Clone)]
pub struct SelectorRegistry {
    map: HashMap<String, SiteSelectorSet>,
}

impl SelectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, host: impl Into<String>, selectors: SiteSelectorSet) {
        self.map.insert(host.into(), selectors);
    }

    pub fn get(&self, host: &str) -> Option<&SiteSelectorSet> {
        self.map.get(host)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Reads `xpath-<host>.json` from `dir` and registers it under `host`.
    pub fn load_host(&mut self, dir: &Path, host: &str) -> Result<&SiteSelectorSet> {
        let selectors = load_site_selectors(dir, host)?;
        tracing::debug!(host, "loaded site selectors");
        Ok(&*self.map.entry(host.to_owned()).insert_entry(selectors).into_mut())
    }

    pub fn resolve(&self, url: &str) -> Result<&SiteSelectorSet> {
        let host = sanitize_host(url)?;
        self.get(&host)
            .ok_or_else(|| ScrapeError::not_found(format!("selectors for host {host}")))
    }
}
