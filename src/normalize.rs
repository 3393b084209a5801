use chrono::{Datelike as _, NaiveDate};

use crate::error::{Result, ScrapeError};
use crate::extract::RawExtraction;

/// Every record lands in this series; sorting into real series happens in Notion.
pub const DEFAULT_SERIES: &str = "To Sort";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    ToRead,
    ToBuy,
    Ordered,
    Wishlist,
}

impl Status {
    /// Maps a single-letter flag to its status, falling back to `ToRead` for
    /// anything it does not recognize.
    pub fn from_flag(flag: &str) -> Self {
        Self::parse_flag(flag).unwrap_or_default()
    }

    pub fn parse_flag(flag: &str) -> Result<Self> {
        match flag {
            "r" => Ok(Status::ToRead),
            "b" => Ok(Status::ToBuy),
            "o" => Ok(Status::Ordered),
            "w" => Ok(Status::Wishlist),
            other => Err(ScrapeError::InvalidStatusFlag(other.to_owned())),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::ToRead => "To Read",
            Status::ToBuy => "To Buy",
            Status::Ordered => "Ordered",
            Status::Wishlist => "Wishlist",
        }
    }
}

/// Month abbreviations used to read publication dates, January first.
///
/// Source pages print dates in their own language, so the table is part of the
/// site configuration instead of the process locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthTable {
    names: [String; 12],
}

const ITALIAN_MONTHS: [&str; 12] = [
    "gen", "feb", "mar", "apr", "mag", "giu", "lug", "ago", "set", "ott", "nov", "dic",
];

const ENGLISH_MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

impl MonthTable {
    pub fn italian() -> Self {
        Self::from_static(ITALIAN_MONTHS)
    }

    pub fn english() -> Self {
        Self::from_static(ENGLISH_MONTHS)
    }

    fn from_static(names: [&str; 12]) -> Self {
        Self {
            names: names.map(str::to_owned),
        }
    }

    /// Builds a table from configuration. Exactly twelve non-empty, distinct
    /// names are required; matching is case-insensitive.
    pub fn from_names(names: &[String]) -> std::result::Result<Self, String> {
        let names: [String; 12] = names
            .iter()
            .map(|name| name.trim().trim_end_matches('.').to_lowercase())
            .collect::<Vec<_>>()
            .try_into()
            .map_err(|names: Vec<String>| {
                format!("month_names must list 12 months, got {}", names.len())
            })?;

        for (idx, name) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(format!("month_names[{idx}] is empty"));
            }
            if names[..idx].contains(name) {
                return Err(format!("month_names[{idx}] duplicates {name:?}"));
            }
        }

        Ok(Self { names })
    }

    fn month_number(&self, name: &str) -> Option<u32> {
        let name = name.trim_end_matches('.').to_lowercase();
        self.names
            .iter()
            .position(|candidate| *candidate == name)
            .map(|idx| idx as u32 + 1)
    }

    /// Parses `<day> <month> <year>`, e.g. `15 mar 2021`.
    pub fn parse_date(&self, text: &str) -> Result<NaiveDate> {
        let mismatch = || ScrapeError::DateFormatMismatch {
            text: text.to_owned(),
        };

        let mut parts = text.split_whitespace();
        let (Some(day), Some(month), Some(year), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(mismatch());
        };

        let day: u32 = day.parse().map_err(|_| mismatch())?;
        let month = self.month_number(month).ok_or_else(mismatch)?;
        let year: i32 = year.parse().map_err(|_| mismatch())?;

        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(mismatch)
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        let month = &self.names[date.month0() as usize];
        format!("{:02} {month} {}", date.day(), date.year())
    }
}

impl Default for MonthTable {
    fn default() -> Self {
        Self::italian()
    }
}

pub fn parse_page_count(text: &str) -> Result<u32> {
    let trimmed = text.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ScrapeError::PageCountUnparseable {
            text: text.to_owned(),
        });
    }
    trimmed
        .parse()
        .map_err(|_| ScrapeError::PageCountUnparseable {
            text: text.to_owned(),
        })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub title: String,
    pub author: String,
    pub publication_date: NaiveDate,
    pub page_count: u32,
    pub cover_image_url: String,
    pub content: String,
    pub status: Status,
    pub series: String,
}

pub fn normalize(
    raw: RawExtraction,
    status: Status,
    months: &MonthTable,
) -> Result<NormalizedRecord> {
    let page_count = parse_page_count(&raw.pages)?;
    let publication_date = months.parse_date(raw.publication_date.trim())?;

    Ok(NormalizedRecord {
        title: raw.title,
        author: raw.author.trim().to_owned(),
        publication_date,
        page_count,
        cover_image_url: raw.cover_image,
        content: raw.content,
        status,
        series: DEFAULT_SERIES.to_owned(),
    })
}
