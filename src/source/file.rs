use super::{PromotionSource, SourceError};
use crate::promo::{active_on, from_rows, Promotion, PromotionRow};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use time::Date;

/// Promotions stored as a JSON array of rows in a local file.  The file is
/// reread on every query so that edits show up on reload.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub(crate) fn new<P: Into<PathBuf>>(path: P) -> JsonFileSource {
        JsonFileSource { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<Promotion>, SourceError> {
        debug!("Reading promotions from {}", self.path.display());
        let src = fs::read_to_string(&self.path).map_err(|source| SourceError::Read {
            path: self.path.clone(),
            source,
        })?;
        let rows = serde_json::from_str::<Vec<PromotionRow>>(&src)?;
        Ok(from_rows(rows))
    }
}

impl PromotionSource for JsonFileSource {
    fn fetch_all(&self) -> Result<Vec<Promotion>, SourceError> {
        self.load()
    }

    fn fetch_active_on(&self, date: Date) -> Result<Vec<Promotion>, SourceError> {
        self.load().map(|promos| active_on(promos, date))
    }
}
