//! Sort column resolution.
//!
//! Callers sort by a column *index* (a UI column position), never by a column name.
//! Each family has a static table mapping index to a whitelisted column expression.
//! This module is the only place an `ORDER BY` expression is chosen, and it only ever
//! returns strings from those tables.

use crate::families::{activity, document, tag};
use crate::family::Family;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Caller-supplied sort request: a column index and a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: i32,
    pub ascending: bool,
}

impl SortSpec {
    pub fn new(column: i32, ascending: bool) -> Self {
        Self { column, ascending }
    }
}

/// Per-family sort column table. Indices are a public contract with callers and must
/// stay stable; new columns are only ever appended.
#[derive(Debug)]
pub struct SortTable {
    pub columns: &'static [&'static str],
    /// Index of the column used when no (valid) sort is requested.
    pub default_column: usize,
    pub default_ascending: bool,
    /// Index of the primary-key column, appended as a tiebreak.
    pub primary_key: usize,
}

impl SortTable {
    fn get(&self, column: i32) -> Option<&'static str> {
        usize::try_from(column)
            .ok()
            .and_then(|idx| self.columns.get(idx).copied())
    }

    fn default_expr(&self) -> &'static str {
        self.columns[self.default_column]
    }

    fn primary_key_expr(&self) -> &'static str {
        self.columns[self.primary_key]
    }
}

pub fn table(family: Family) -> &'static SortTable {
    match family {
        Family::Activity => &activity::SORT_TABLE,
        Family::Tag => &tag::SORT_TABLE,
        Family::Document => &document::SORT_TABLE,
    }
}

/// Outcome of looking up one column index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    Whitelisted(&'static str),
    Fallback(&'static str),
}

impl Resolution {
    fn expr(self) -> &'static str {
        match self {
            Resolution::Whitelisted(expr) | Resolution::Fallback(expr) => expr,
        }
    }
}

fn resolution(table: &SortTable, column: i32) -> Resolution {
    match table.get(column) {
        Some(expr) => Resolution::Whitelisted(expr),
        None => Resolution::Fallback(table.default_expr()),
    }
}

/// Resolve a column index to its whitelisted expression.
///
/// Out-of-range indices (including negative ones) resolve to the family default.
pub fn resolve(family: Family, column: i32) -> &'static str {
    resolution(table(family), column).expr()
}

/// Fully resolved `ORDER BY` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub column: &'static str,
    pub ascending: bool,
    pub tiebreak: Option<&'static str>,
}

impl OrderBy {
    pub fn to_sql(&self) -> String {
        let dir = if self.ascending { "ASC" } else { "DESC" };
        match self.tiebreak {
            Some(pk) => format!("{} {dir}, {pk} {dir}", self.column),
            None => format!("{} {dir}", self.column),
        }
    }
}

/// Resolve the requested sort into an `ORDER BY`.
///
/// A missing sort spec and an out-of-range index both produce the family's default
/// order, default direction included.
pub fn resolve_order(family: Family, sort: Option<SortSpec>) -> OrderBy {
    let table = table(family);

    let (column, ascending) = match sort {
        Some(spec) => match resolution(table, spec.column) {
            Resolution::Whitelisted(column) => (column, spec.ascending),
            Resolution::Fallback(column) => {
                note_stale_index(family, spec.column);
                (column, table.default_ascending)
            }
        },
        None => (table.default_expr(), table.default_ascending),
    };

    let pk = table.primary_key_expr();
    OrderBy {
        column,
        ascending,
        tiebreak: (column != pk).then_some(pk),
    }
}

#[allow(clippy::declare_interior_mutable_const)]
const ZERO: AtomicU64 = AtomicU64::new(0);

static STALE_INDEX_COUNTS: [AtomicU64; Family::ALL.len()] = [ZERO; Family::ALL.len()];

// Out-of-range indices usually mean a client built against an older column layout.
fn note_stale_index(family: Family, column: i32) {
    let seen = STALE_INDEX_COUNTS[family.ordinal()].fetch_add(1, Ordering::Relaxed) + 1;
    if seen.is_power_of_two() {
        tracing::warn!(
            family = %family,
            column,
            occurrences = seen,
            "Sort column index out of range, using default order"
        );
    } else {
        tracing::debug!(family = %family, column, "Sort column index out of range");
    }
}
