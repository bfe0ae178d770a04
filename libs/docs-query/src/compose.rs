//! SQL composition for family searches.
//!
//! Builds the page statement and its count statement from:
//! - the family's trusted base query (projection, joins, soft-delete baseline)
//! - one equality predicate per present criteria field, bound as `$n`
//! - an `ORDER BY` resolved through [`crate::sort`]
//!
//! The statement text depends only on which criteria fields are present, never on
//! their values, so each family has a small fixed set of statement shapes.

use crate::criteria::CriteriaField;
use crate::family::{BaseQuery, EntityFamily, Family};
use crate::paging::PageWindow;
use crate::sort::{self, SortSpec};
use crate::value::{push_bind, BindValue};
use crate::Result;

/// Fully assembled page and count statements sharing one set of filter bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedQuery {
    /// Filtered and ordered page statement, without a window.
    pub sql: String,
    /// `COUNT(*)` over the same predicates, without ordering or window.
    pub count_sql: String,
    /// Filter bindings for `$1..$n`, shared by both statements.
    pub bind_params: Vec<BindValue>,
}

impl ComposedQuery {
    /// Page statement with `LIMIT`/`OFFSET` appended as bound parameters.
    ///
    /// The window comes after `ORDER BY`, so page boundaries follow the sort.
    pub fn windowed(&self, window: PageWindow) -> (String, Vec<BindValue>) {
        let mut bind_params = self.bind_params.clone();
        let limit_idx = push_bind(&mut bind_params, BindValue::Int(window.limit()));
        let offset_idx = push_bind(&mut bind_params, BindValue::Int(window.offset()));
        let sql = format!("{} LIMIT ${limit_idx} OFFSET ${offset_idx}", self.sql);
        (sql, bind_params)
    }

    pub fn count(&self) -> (&str, &[BindValue]) {
        (&self.count_sql, &self.bind_params)
    }
}

/// Compose the search statements for family `F`.
///
/// Fails with `InvalidCriteria` when a present field does not match its value kind.
pub fn compose<F: EntityFamily>(
    criteria: &F::Criteria,
    sort: Option<SortSpec>,
) -> Result<ComposedQuery> {
    compose_parts(
        F::FAMILY,
        &F::BASE_QUERY,
        &F::criteria_fields(criteria),
        sort,
    )
}

pub(crate) fn compose_parts(
    family: Family,
    base: &BaseQuery,
    fields: &[CriteriaField<'_>],
    sort: Option<SortSpec>,
) -> Result<ComposedQuery> {
    let mut bind_params = Vec::new();
    let mut where_clause = String::from(base.baseline);

    for field in fields {
        let Some(value) = field.value else {
            continue;
        };
        field.kind.validate(field.name, value)?;
        let idx = push_bind(&mut bind_params, BindValue::Text(value.to_string()));
        where_clause.push_str(&format!(" AND {} = ${idx}", field.column));
    }

    let order_by = sort::resolve_order(family, sort);

    let sql = format!(
        "SELECT {} FROM {} WHERE {} ORDER BY {}",
        base.projection.join(", "),
        base.from,
        where_clause,
        order_by.to_sql()
    );
    let count_sql = format!("SELECT COUNT(*) FROM {} WHERE {}", base.from, where_clause);

    tracing::debug!(
        family = %family,
        sql = %sql,
        bind_count = bind_params.len(),
        "Composed search statement"
    );

    Ok(ComposedQuery {
        sql,
        count_sql,
        bind_params,
    })
}
