//! Test stores.
//!
//! `MemoryStore` evaluates the statements the composer produces over fixture rows keyed
//! by qualified column name. It understands exactly that shape:
//!
//! `SELECT <cols> FROM <from> WHERE <pred>[ AND <pred>]* ORDER BY <col> <dir>[, ...] LIMIT $a OFFSET $b`
//! `SELECT COUNT(*) FROM <from> WHERE <pred>[ AND <pred>]*`
//!
//! where each predicate is `<col> IS NULL` or `<col> = $n`. Anything else panics, so a
//! change in statement shape shows up as a test failure rather than silently passing.

#![allow(dead_code)]

pub mod fixtures;

use async_trait::async_trait;
use docs_query::{BindValue, ColumnValue, Error, QueryStore, RawRow, Result};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Mutex;

pub type FixtureRow = BTreeMap<&'static str, ColumnValue>;

#[derive(Default)]
pub struct MemoryStore {
    tables: HashMap<&'static str, Vec<FixtureRow>>,
    statements: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register rows for the family whose base query uses `from`.
    pub fn with_table(mut self, from: &'static str, rows: Vec<FixtureRow>) -> Self {
        self.tables.insert(from, rows);
        self
    }

    pub fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }

    fn record(&self, sql: &str) {
        self.statements.lock().unwrap().push(sql.to_string());
    }

    fn matching_rows(&self, statement: &Statement, bind_params: &[BindValue]) -> Vec<FixtureRow> {
        let rows = self
            .tables
            .get(statement.from.as_str())
            .unwrap_or_else(|| panic!("no fixture table for FROM {}", statement.from));

        rows.iter()
            .filter(|row| {
                statement
                    .predicates
                    .iter()
                    .all(|p| p.matches(row, bind_params))
            })
            .cloned()
            .collect()
    }
}

#[async_trait]
impl QueryStore for MemoryStore {
    async fn run_query(&self, sql: &str, bind_params: &[BindValue]) -> Result<Vec<RawRow>> {
        self.record(sql);
        let statement = Statement::parse(sql);
        let projection = statement
            .projection
            .as_ref()
            .unwrap_or_else(|| panic!("page statement has no projection: {sql}"));

        let mut rows = self.matching_rows(&statement, bind_params);
        rows.sort_by(|a, b| {
            for (column, ascending) in &statement.order {
                let ord = compare(column_value(a, column), column_value(b, column));
                let ord = if *ascending { ord } else { ord.reverse() };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            Ordering::Equal
        });

        let (limit_idx, offset_idx) = statement
            .window
            .unwrap_or_else(|| panic!("page statement has no window: {sql}"));
        let limit = int_bind(bind_params, limit_idx);
        let offset = int_bind(bind_params, offset_idx);

        Ok(rows
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|row| {
                projection
                    .iter()
                    .map(|column| column_value(row, column).clone())
                    .collect()
            })
            .collect())
    }

    async fn run_count(&self, sql: &str, bind_params: &[BindValue]) -> Result<i64> {
        self.record(sql);
        let statement = Statement::parse(sql);
        assert!(
            statement.projection.is_none(),
            "count statement projects columns: {sql}"
        );
        assert!(
            statement.order.is_empty(),
            "count statement is ordered: {sql}"
        );
        assert!(
            statement.window.is_none(),
            "count statement is windowed: {sql}"
        );
        Ok(self.matching_rows(&statement, bind_params).len() as i64)
    }
}

struct Statement {
    /// `None` for `COUNT(*)`.
    projection: Option<Vec<String>>,
    from: String,
    predicates: Vec<Predicate>,
    order: Vec<(String, bool)>,
    window: Option<(usize, usize)>,
}

enum Predicate {
    IsNull(String),
    Eq(String, usize),
}

impl Predicate {
    fn matches(&self, row: &FixtureRow, bind_params: &[BindValue]) -> bool {
        match self {
            Predicate::IsNull(column) => column_value(row, column).is_null(),
            Predicate::Eq(column, idx) => match (&bind_params[idx - 1], column_value(row, column)) {
                (BindValue::Text(expected), ColumnValue::Text(actual)) => expected == actual,
                (BindValue::Int(expected), ColumnValue::Int(actual)) => expected == actual,
                _ => false,
            },
        }
    }
}

impl Statement {
    fn parse(sql: &str) -> Self {
        let rest = sql
            .strip_prefix("SELECT ")
            .unwrap_or_else(|| panic!("not a SELECT: {sql}"));
        let (select, rest) = rest
            .split_once(" FROM ")
            .unwrap_or_else(|| panic!("no FROM: {sql}"));
        let (from, rest) = rest
            .split_once(" WHERE ")
            .unwrap_or_else(|| panic!("no WHERE: {sql}"));

        let (where_part, order_part, window_part) = match rest.split_once(" ORDER BY ") {
            Some((where_part, order_rest)) => {
                let (order_part, window_part) = order_rest
                    .split_once(" LIMIT ")
                    .map(|(o, w)| (o, Some(w)))
                    .unwrap_or((order_rest, None));
                (where_part, Some(order_part), window_part)
            }
            None => (rest, None, None),
        };

        let projection = if select == "COUNT(*)" {
            None
        } else {
            Some(select.split(", ").map(str::to_string).collect())
        };

        let predicates = where_part
            .split(" AND ")
            .map(|p| {
                if let Some(column) = p.strip_suffix(" IS NULL") {
                    Predicate::IsNull(column.to_string())
                } else {
                    let (column, idx) = p
                        .split_once(" = $")
                        .unwrap_or_else(|| panic!("unsupported predicate: {p}"));
                    Predicate::Eq(column.to_string(), parse_placeholder(idx))
                }
            })
            .collect();

        let order = order_part
            .map(|o| {
                o.split(", ")
                    .map(|term| {
                        let (column, dir) = term
                            .rsplit_once(' ')
                            .unwrap_or_else(|| panic!("unsupported order term: {term}"));
                        let ascending = match dir {
                            "ASC" => true,
                            "DESC" => false,
                            other => panic!("unsupported direction: {other}"),
                        };
                        (column.to_string(), ascending)
                    })
                    .collect()
            })
            .unwrap_or_default();

        let window = window_part.map(|w| {
            let (limit, offset) = w
                .split_once(" OFFSET ")
                .unwrap_or_else(|| panic!("unsupported window: {w}"));
            (
                parse_placeholder(limit.trim_start_matches('$')),
                parse_placeholder(offset.trim_start_matches('$')),
            )
        });

        Self {
            projection,
            from: from.to_string(),
            predicates,
            order,
            window,
        }
    }
}

fn parse_placeholder(idx: &str) -> usize {
    idx.parse()
        .unwrap_or_else(|_| panic!("bad placeholder index: {idx}"))
}

fn int_bind(bind_params: &[BindValue], idx: usize) -> i64 {
    match &bind_params[idx - 1] {
        BindValue::Int(v) => *v,
        other => panic!("window placeholder ${idx} bound to {other:?}"),
    }
}

fn column_value<'a>(row: &'a FixtureRow, column: &str) -> &'a ColumnValue {
    row.get(column)
        .unwrap_or_else(|| panic!("fixture row has no column {column}"))
}

/// PostgreSQL ordering: nulls sort after every value.
fn compare(a: &ColumnValue, b: &ColumnValue) -> Ordering {
    match (a, b) {
        (ColumnValue::Null, ColumnValue::Null) => Ordering::Equal,
        (ColumnValue::Null, _) => Ordering::Greater,
        (_, ColumnValue::Null) => Ordering::Less,
        (ColumnValue::Text(x), ColumnValue::Text(y)) => x.cmp(y),
        (ColumnValue::Int(x), ColumnValue::Int(y)) => x.cmp(y),
        (ColumnValue::Timestamp(x), ColumnValue::Timestamp(y)) => x.cmp(y),
        (x, y) => panic!("cannot compare {x:?} with {y:?}"),
    }
}

/// Store that fails one or both round trips, or returns canned data.
pub struct ScriptedStore {
    pub query_result: fn() -> Result<Vec<RawRow>>,
    pub count_result: fn() -> Result<i64>,
    calls: AtomicUsize,
}

impl ScriptedStore {
    pub fn new(
        query_result: fn() -> Result<Vec<RawRow>>,
        count_result: fn() -> Result<i64>,
    ) -> Self {
        Self {
            query_result,
            count_result,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(AtomicOrdering::SeqCst)
    }
}

#[async_trait]
impl QueryStore for ScriptedStore {
    async fn run_query(&self, _sql: &str, _bind_params: &[BindValue]) -> Result<Vec<RawRow>> {
        self.calls.fetch_add(1, AtomicOrdering::SeqCst);
        (self.query_result)()
    }

    async fn run_count(&self, _sql: &str, _bind_params: &[BindValue]) -> Result<i64> {
        self.calls.fetch_add(1, AtomicOrdering::SeqCst);
        (self.count_result)()
    }
}

pub fn connection_refused() -> Error {
    Error::store("connection refused")
}
