use super::{PromotionSource, SourceError};
use crate::promo::{active_on, from_rows, Promotion, PromotionRow};
use log::debug;
use reqwest::blocking::Client;
use time::Date;
use url::Url;

pub(crate) const DEFAULT_TABLE: &str = "promotions";

/// Promotions served by a PostgREST endpoint (as exposed by Supabase)
#[derive(Clone, Debug)]
pub(crate) struct RestSource {
    http: Client,
    base: Url,
    table: String,
    api_key: String,
}

impl RestSource {
    pub(crate) fn new(base: &str, table: &str, api_key: &str) -> Result<RestSource, SourceError> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(SourceError::Client)?;
        Ok(RestSource {
            http,
            base: parse_base(base)?,
            table: table.to_owned(),
            api_key: api_key.to_owned(),
        })
    }

    fn table_url(&self) -> Result<Url, SourceError> {
        let path = format!("rest/v1/{}", self.table);
        self.base.join(&path).map_err(|source| SourceError::Url {
            url: format!("{}{path}", self.base),
            source,
        })
    }

    pub(crate) fn all_url(&self) -> Result<Url, SourceError> {
        let mut url = self.table_url()?;
        url.query_pairs_mut().append_pair("select", "*");
        Ok(url)
    }

    pub(crate) fn active_on_url(&self, date: Date) -> Result<Url, SourceError> {
        let mut url = self.table_url()?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("start_date", &format!("lte.{date}"))
            .append_pair("end_date", &format!("gte.{date}"));
        Ok(url)
    }

    fn get(&self, url: Url) -> Result<Vec<Promotion>, SourceError> {
        debug!("GET {url}");
        let response = self
            .http
            .get(url.clone())
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
            .send()
            .map_err(|source| SourceError::Http {
                url: url.to_string(),
                source,
            })?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|source| SourceError::Http {
            url: url.to_string(),
            source,
        })?;
        decode_rows(status, &body)
    }
}

impl PromotionSource for RestSource {
    fn fetch_all(&self) -> Result<Vec<Promotion>, SourceError> {
        self.get(self.all_url()?)
    }

    fn fetch_active_on(&self, date: Date) -> Result<Vec<Promotion>, SourceError> {
        // The server already filters; filtering again guards against a
        // misbehaving endpoint
        self.get(self.active_on_url(date)?)
            .map(|promos| active_on(promos, date))
    }
}

fn parse_base(base: &str) -> Result<Url, SourceError> {
    // Without a trailing slash, `Url::join()` would replace the last path
    // segment
    let normalized = if base.ends_with('/') {
        base.to_owned()
    } else {
        format!("{base}/")
    };
    Url::parse(&normalized).map_err(|source| SourceError::Url {
        url: base.to_owned(),
        source,
    })
}

fn decode_rows(status: u16, body: &str) -> Result<Vec<Promotion>, SourceError> {
    if !(200..300).contains(&status) {
        return Err(SourceError::Status {
            status,
            body: body.to_owned(),
        });
    }
    let rows = serde_json::from_str::<Vec<PromotionRow>>(body)?;
    Ok(from_rows(rows))
}
