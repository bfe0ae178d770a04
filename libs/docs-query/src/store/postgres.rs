//! PostgreSQL store backed by a `sqlx` pool.

use super::QueryStore;
use crate::config::DatabaseConfig;
use crate::value::{BindValue, ColumnValue, RawRow};
use crate::{Error, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::postgres::{PgArguments, PgPoolOptions, PgRow};
use sqlx::{Column, PgPool, Postgres, Row, TypeInfo};
use std::time::Duration;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool from configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.pool_max_size)
            .acquire_timeout(Duration::from_secs(config.pool_timeout_seconds))
            .connect(&config.url)
            .await?;
        Ok(Self { pool })
    }
}

fn bind_all<'q>(
    mut query: sqlx::query::Query<'q, Postgres, PgArguments>,
    bind_params: &[BindValue],
) -> sqlx::query::Query<'q, Postgres, PgArguments> {
    for value in bind_params {
        query = match value {
            BindValue::Text(v) => query.bind(v.clone()),
            BindValue::Int(v) => query.bind(*v),
        };
    }
    query
}

#[async_trait]
impl QueryStore for PgStore {
    async fn run_query(&self, sql: &str, bind_params: &[BindValue]) -> Result<Vec<RawRow>> {
        let rows = bind_all(sqlx::query(sql), bind_params)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(decode_row).collect()
    }

    async fn run_count(&self, sql: &str, bind_params: &[BindValue]) -> Result<i64> {
        let mut query = sqlx::query_scalar::<_, i64>(sql);
        for value in bind_params {
            query = match value {
                BindValue::Text(v) => query.bind(v.clone()),
                BindValue::Int(v) => query.bind(*v),
            };
        }
        let total = query.fetch_one(&self.pool).await?;
        Ok(total)
    }
}

fn decode_row(row: &PgRow) -> Result<RawRow> {
    row.columns()
        .iter()
        .map(|column| decode_column(row, column.ordinal(), column.type_info().name()))
        .collect()
}

/// Rust type a PostgreSQL column is read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decode {
    Text,
    Int2,
    Int4,
    Int8,
    TimestampTz,
    Timestamp,
}

// Names as reported by `PgTypeInfo::name()`; `CHAR(n)` columns report "CHAR".
fn decode_as(type_name: &str) -> Option<Decode> {
    match type_name {
        "TEXT" | "VARCHAR" | "CHAR" | "NAME" => Some(Decode::Text),
        "INT2" => Some(Decode::Int2),
        "INT4" => Some(Decode::Int4),
        "INT8" => Some(Decode::Int8),
        "TIMESTAMPTZ" => Some(Decode::TimestampTz),
        "TIMESTAMP" => Some(Decode::Timestamp),
        _ => None,
    }
}

fn decode_column(row: &PgRow, idx: usize, type_name: &str) -> Result<ColumnValue> {
    let Some(decode) = decode_as(type_name) else {
        return Err(Error::store(format!(
            "unsupported column type {type_name} at position {idx}"
        )));
    };
    let value: ColumnValue = match decode {
        Decode::Text => row.try_get::<Option<String>, _>(idx)?.into(),
        Decode::Int2 => row.try_get::<Option<i16>, _>(idx)?.map(i64::from).into(),
        Decode::Int4 => row.try_get::<Option<i32>, _>(idx)?.map(i64::from).into(),
        Decode::Int8 => row.try_get::<Option<i64>, _>(idx)?.into(),
        Decode::TimestampTz => row.try_get::<Option<DateTime<Utc>>, _>(idx)?.into(),
        Decode::Timestamp => row
            .try_get::<Option<NaiveDateTime>, _>(idx)?
            .map(|ts| ts.and_utc())
            .into(),
    };
    Ok(value)
}
