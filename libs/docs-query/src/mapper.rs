//! Row mapping helpers.
//!
//! A [`RowReader`] walks a raw row strictly left to right. Family mappers read each
//! projected column exactly once and call [`RowReader::finish`], so any drift between a
//! base query's projection and its mapper surfaces as [`Error::MalformedRow`].

use crate::family::Family;
use crate::value::{ColumnValue, RawRow};
use crate::{Error, Result};

pub struct RowReader {
    family: Family,
    values: std::vec::IntoIter<ColumnValue>,
    position: usize,
}

impl RowReader {
    /// Start reading `row`, which must have exactly `expected` columns.
    pub fn new(family: Family, row: RawRow, expected: usize) -> Result<Self> {
        if row.len() != expected {
            return Err(malformed(
                family,
                format!("expected {expected} columns, got {}", row.len()),
            ));
        }
        Ok(Self {
            family,
            values: row.into_iter(),
            position: 0,
        })
    }

    fn next_value(&mut self) -> Result<ColumnValue> {
        let position = self.position;
        self.position += 1;
        let Some(value) = self.values.next() else {
            let reason = format!("row exhausted at column {position}");
            return Err(malformed(self.family, reason));
        };
        Ok(value)
    }

    fn required<T>(
        &mut self,
        expected: &str,
        convert: impl FnOnce(ColumnValue) -> std::result::Result<Option<T>, ColumnValue>,
    ) -> Result<T> {
        let position = self.position;
        match self.optional(expected, convert)? {
            Some(v) => Ok(v),
            None => Err(malformed(
                self.family,
                format!("column {position} is null but the column is not nullable"),
            )),
        }
    }

    fn optional<T>(
        &mut self,
        expected: &str,
        convert: impl FnOnce(ColumnValue) -> std::result::Result<Option<T>, ColumnValue>,
    ) -> Result<Option<T>> {
        let position = self.position;
        let value = self.next_value()?;
        convert(value).map_err(|other| {
            malformed(
                self.family,
                format!(
                    "column {position}: expected {expected}, got {}",
                    other.kind()
                ),
            )
        })
    }

    pub fn text(&mut self) -> Result<String> {
        self.required("text", text)
    }

    pub fn opt_text(&mut self) -> Result<Option<String>> {
        self.optional("text", text)
    }

    /// Identifier column; integer keys are rendered as strings.
    pub fn id(&mut self) -> Result<String> {
        self.required("identifier", identifier)
    }

    pub fn opt_id(&mut self) -> Result<Option<String>> {
        self.optional("identifier", identifier)
    }

    pub fn int(&mut self) -> Result<i64> {
        self.required("integer", |v| match v {
            ColumnValue::Int(i) => Ok(Some(i)),
            ColumnValue::Null => Ok(None),
            other => Err(other),
        })
    }

    /// Timestamp column as epoch milliseconds.
    pub fn timestamp_millis(&mut self) -> Result<i64> {
        self.required("timestamp", timestamp_millis)
    }

    pub fn opt_timestamp_millis(&mut self) -> Result<Option<i64>> {
        self.optional("timestamp", timestamp_millis)
    }

    /// Fail if any column was left unread.
    pub fn finish(mut self) -> Result<()> {
        if self.values.next().is_some() {
            return Err(malformed(
                self.family,
                format!("column {} and later were not consumed", self.position),
            ));
        }
        Ok(())
    }
}

fn text(value: ColumnValue) -> std::result::Result<Option<String>, ColumnValue> {
    match value {
        ColumnValue::Text(s) => Ok(Some(s)),
        ColumnValue::Null => Ok(None),
        other => Err(other),
    }
}

fn identifier(value: ColumnValue) -> std::result::Result<Option<String>, ColumnValue> {
    match value {
        ColumnValue::Text(s) => Ok(Some(s)),
        ColumnValue::Int(i) => Ok(Some(i.to_string())),
        ColumnValue::Null => Ok(None),
        other => Err(other),
    }
}

fn timestamp_millis(value: ColumnValue) -> std::result::Result<Option<i64>, ColumnValue> {
    match value {
        ColumnValue::Timestamp(ts) => Ok(Some(ts.timestamp_millis())),
        ColumnValue::Null => Ok(None),
        other => Err(other),
    }
}

pub(crate) fn malformed(family: Family, reason: String) -> Error {
    tracing::error!(
        family = %family,
        reason = %reason,
        "Row does not match the family projection; base query and mapper have drifted"
    );
    Error::MalformedRow { family, reason }
}
