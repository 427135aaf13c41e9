mod list;
mod widget;
pub(crate) use self::list::{active_on, ListView};
pub(crate) use self::widget::PromotionPane;
use crate::calendar::PromotionRange;
use log::warn;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use time::{format_description::FormatItem, macros::format_description, Date};

pub(crate) static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// A promotion as stored by the data source
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub(crate) struct PromotionRow {
    #[serde(deserialize_with = "string_or_number")]
    pub(crate) id: String,
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(default)]
    pub(crate) brand_icon_url: Option<String>,
    pub(crate) start_date: String,
    pub(crate) end_date: String,
    #[serde(default)]
    pub(crate) source_url: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Promotion {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) icon_url: String,
    pub(crate) source_url: String,
    period: PromotionRange,
}

impl Promotion {
    pub(crate) fn range(&self) -> PromotionRange {
        self.period
    }

    pub(crate) fn covers(&self, date: Date) -> bool {
        self.period.covers(date)
    }

    /// The run of the promotion as shown to users, e.g. `2024-03-01 ~
    /// 2024-03-20`
    pub(crate) fn period_text(&self) -> String {
        format!("{} ~ {}", self.period.start(), self.period.end())
    }
}

impl TryFrom<PromotionRow> for Promotion {
    type Error = RowError;

    fn try_from(row: PromotionRow) -> Result<Promotion, RowError> {
        let start = parse_ymd(&row.id, "start_date", &row.start_date)?;
        let end = parse_ymd(&row.id, "end_date", &row.end_date)?;
        Ok(Promotion {
            id: row.id,
            title: row.title,
            description: row.description.unwrap_or_default(),
            icon_url: row.brand_icon_url.unwrap_or_default(),
            source_url: row.source_url.unwrap_or_default(),
            period: PromotionRange::new(start, end),
        })
    }
}

fn parse_ymd(id: &str, field: &'static str, value: &str) -> Result<Date, RowError> {
    Date::parse(value, &YMD_FMT).map_err(|source| RowError {
        id: id.to_owned(),
        field,
        value: value.to_owned(),
        source,
    })
}

#[derive(Debug, Error)]
#[error("promotion {id:?} has invalid {field} {value:?}")]
pub(crate) struct RowError {
    id: String,
    field: &'static str,
    value: String,
    source: time::error::Parse,
}

/// Converts rows to promotions, dropping (and logging) any row whose dates
/// are not `YYYY-MM-DD`
pub(crate) fn from_rows(rows: Vec<PromotionRow>) -> Vec<Promotion> {
    rows.into_iter()
        .filter_map(|row| match Promotion::try_from(row) {
            Ok(p) => Some(p),
            Err(e) => {
                warn!("Skipping malformed row: {e}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
pub(crate) fn sample(id: &str, start: Date, end: Date) -> Promotion {
    Promotion {
        id: id.to_owned(),
        title: format!("Promotion {id}"),
        description: format!("Details of {id}"),
        icon_url: format!("https://img.example.com/{id}.png"),
        source_url: format!("https://shop.example.com/{id}"),
        period: PromotionRange::new(start, end),
    }
}
