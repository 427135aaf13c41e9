mod file;
mod rest;
pub(crate) use self::file::JsonFileSource;
pub(crate) use self::rest::{RestSource, DEFAULT_TABLE};
use crate::promo::Promotion;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use time::Date;

/// Read access to the store of promotions
pub(crate) trait PromotionSource: fmt::Debug + Send + Sync {
    fn fetch_all(&self) -> Result<Vec<Promotion>, SourceError>;

    /// Promotions with `start_date <= date <= end_date`, in source order
    fn fetch_active_on(&self, date: Date) -> Result<Vec<Promotion>, SourceError>;
}

#[derive(Debug, Error)]
pub(crate) enum SourceError {
    #[error("failed to read {}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to decode promotion rows")]
    Decode(#[from] serde_json::Error),
    #[error("invalid source URL {url:?}")]
    Url { url: String, source: url::ParseError },
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed")]
    Http { url: String, source: reqwest::Error },
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Serves a fixed set of promotions
#[cfg(test)]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct StaticSource(pub(crate) Vec<Promotion>);

#[cfg(test)]
impl PromotionSource for StaticSource {
    fn fetch_all(&self) -> Result<Vec<Promotion>, SourceError> {
        Ok(self.0.clone())
    }

    fn fetch_active_on(&self, date: Date) -> Result<Vec<Promotion>, SourceError> {
        Ok(crate::promo::active_on(self.0.clone(), date))
    }
}
