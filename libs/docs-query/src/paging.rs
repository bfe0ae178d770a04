//! Page windows, page requests and result pages.

use crate::config::PagingConfig;
use crate::sort::SortSpec;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Validated `(limit, offset)` pair bounding one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    limit: i64,
    offset: i64,
}

impl PageWindow {
    /// Normalize raw caller values.
    ///
    /// - missing or non-positive `limit` uses `config.default_limit`
    /// - `limit` above `config.max_limit` is clamped
    /// - missing or negative `offset` is 0
    pub fn new(limit: Option<i64>, offset: Option<i64>, config: &PagingConfig) -> Self {
        let limit = match limit {
            Some(l) if l > 0 => l.min(config.max_limit),
            _ => config.default_limit,
        };
        let offset = offset.unwrap_or(0).max(0);
        Self { limit, offset }
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(None, None, &PagingConfig::default())
    }
}

/// Raw paging and sort parameters as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageRequest {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sort_column: Option<i32>,
    pub asc: Option<bool>,
}

impl PageRequest {
    /// Parse from query/form pairs. Unknown keys are left for the caller (they carry
    /// criteria fields).
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut request = PageRequest::default();
        for (key, value) in pairs {
            match key {
                "limit" => request.limit = Some(parse_number(key, value)?),
                "offset" => request.offset = Some(parse_number(key, value)?),
                "sort_column" => request.sort_column = Some(parse_number(key, value)?),
                "asc" => request.asc = Some(parse_bool(key, value)?),
                _ => {}
            }
        }
        Ok(request)
    }

    /// Sort specification; `asc` defaults to descending when a column is given.
    pub fn sort(&self) -> Option<SortSpec> {
        self.sort_column
            .map(|column| SortSpec::new(column, self.asc.unwrap_or(false)))
    }

    pub fn window(&self, config: &PagingConfig) -> PageWindow {
        PageWindow::new(self.limit, self.offset, config)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::invalid_criteria(format!("Invalid {key} value: {value}")))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(Error::invalid_criteria(format!(
            "Invalid {key} value: {value}"
        ))),
    }
}

/// One page of typed records plus the count of all matching rows.
///
/// `total` is computed by a separate round trip without the window applied; rows
/// written between the two round trips can make it differ from what a rerun of the
/// page query would see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultPage<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

impl<T> ResultPage<T> {
    /// Whether rows exist past this page.
    pub fn has_more(&self) -> bool {
        self.offset + (self.items.len() as i64) < self.total
    }
}
