#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod logging;
pub mod normalize;
pub mod notion;
pub mod scrape;
pub mod selectors;

pub use crate::error::{Field, ScrapeError};
