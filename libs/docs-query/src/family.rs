//! Entity families: the closed set of searchable record types.
//!
//! Every family owns a trusted base query, the ordered list of criteria columns it can
//! filter on, and a row mapper. Sort column tables are looked up by the [`Family`] tag
//! alone (see [`crate::sort`]), so a sort index is always interpreted against the table
//! of the family that is being queried.

use crate::criteria::CriteriaField;
use crate::value::RawRow;
use crate::Result;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Activity,
    Tag,
    Document,
}

impl Family {
    pub const ALL: [Family; 3] = [Family::Activity, Family::Tag, Family::Document];

    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Activity => "activity",
            Family::Tag => "tag",
            Family::Document => "document",
        }
    }

    /// Position in [`Family::ALL`].
    pub(crate) fn ordinal(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hand-written statement fragments for one family.
///
/// None of these strings are influenced by callers.
#[derive(Debug)]
pub struct BaseQuery {
    /// Select list, in the exact order the row mapper consumes it.
    pub projection: &'static [&'static str],
    /// `FROM` table plus joins.
    pub from: &'static str,
    /// Predicate that is always applied (soft-delete filter).
    pub baseline: &'static str,
}

impl BaseQuery {
    pub fn arity(&self) -> usize {
        self.projection.len()
    }
}

/// A searchable record type.
pub trait EntityFamily {
    const FAMILY: Family;
    const BASE_QUERY: BaseQuery;

    type Criteria;
    type Record;

    /// Filterable columns paired with the caller's values, in a fixed declaration order.
    fn criteria_fields(criteria: &Self::Criteria) -> Vec<CriteriaField<'_>>;

    /// Convert one row of `BASE_QUERY.projection` into a typed record.
    fn map_row(row: RawRow) -> Result<Self::Record>;
}
