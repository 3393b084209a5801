use std::fmt;

/// The fields every site selector set must locate on a comic page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    CoverImage,
    Pages,
    Title,
    Content,
    Author,
    PublicationDate,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::CoverImage,
        Field::Pages,
        Field::Title,
        Field::Content,
        Field::Author,
        Field::PublicationDate,
    ];

    /// Key of the selector for this field in `xpath-<host>.json`.
    pub fn config_key(self) -> &'static str {
        match self {
            Field::CoverImage => "cover_image_xpath",
            Field::Pages => "pages_xpath",
            Field::Title => "title_xpath",
            Field::Content => "content_xpath",
            Field::Author => "author_xpath",
            Field::PublicationDate => "publication_date_xpath",
        }
    }

    /// Short values read from an element's own leading text; trailing child
    /// markup such as `<small> pagine</small>` is not part of the value.
    pub fn is_leading_text(self) -> bool {
        matches!(self, Field::Pages | Field::Author | Field::PublicationDate)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Field::CoverImage => "cover image",
            Field::Pages => "page count",
            Field::Title => "title",
            Field::Content => "content",
            Field::Author => "author",
            Field::PublicationDate => "publication date",
        };
        f.write_str(s)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("config not found: {resource}")]
    ConfigNotFound { resource: String },

    #[error("malformed config {resource}: {reason}")]
    ConfigMalformed { resource: String, reason: String },

    #[error("invalid Notion API configuration: `{key}` is missing or empty")]
    InvalidDestinationCredentials { key: &'static str },

    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("unknown status flag {0:?} (expected one of r, b, o, w)")]
    InvalidStatusFlag(String),

    #[error("{field} not found on page (selector: {expr})")]
    FieldNotFound { field: Field, expr: String },

    #[error("unable to extract the page count from {text:?}")]
    PageCountUnparseable { text: String },

    #[error("publication date {text:?} does not match `<day> <month> <year>`")]
    DateFormatMismatch { text: String },

    #[error("request to {url} failed")]
    TransportFailure {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("error creating the page in Notion (status {status}): {message}")]
    DestinationApi { status: u16, message: String },
}

impl ScrapeError {
    pub fn transport(url: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::TransportFailure {
            url: url.into(),
            source: source.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::ConfigNotFound {
            resource: resource.into(),
        }
    }

    pub fn malformed(resource: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::ConfigMalformed {
            resource: resource.into(),
            reason: reason.to_string(),
        }
    }

    /// Process exit code for this failure kind. Configuration problems keep
    /// exit code 1; every other kind gets its own code.
    pub fn exit_code(&self) -> u8 {
        match self {
            ScrapeError::ConfigNotFound { .. }
            | ScrapeError::ConfigMalformed { .. }
            | ScrapeError::InvalidDestinationCredentials { .. } => 1,
            ScrapeError::InvalidUrl { .. } | ScrapeError::InvalidStatusFlag(_) => 2,
            ScrapeError::FieldNotFound { .. } => 3,
            ScrapeError::PageCountUnparseable { .. } => 4,
            ScrapeError::DateFormatMismatch { .. } => 5,
            ScrapeError::TransportFailure { .. } => 6,
            ScrapeError::DestinationApi { .. } => 7,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
