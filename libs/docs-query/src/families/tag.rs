//! Tags, owned by a user and optionally nested under a parent tag.

use crate::criteria::{CriteriaField, ValueKind};
use crate::family::{BaseQuery, EntityFamily, Family};
use crate::mapper::RowReader;
use crate::sort::SortTable;
use crate::value::RawRow;
use crate::Result;
use serde::{Deserialize, Serialize};

const COLUMNS: &[&str] = &[
    "t.TAG_ID_C",
    "t.TAG_NAME_C",
    "t.TAG_COLOR_C",
    "t.TAG_IDPARENT_C",
    "u.USE_USERNAME_C",
];

pub(crate) static SORT_TABLE: SortTable = SortTable {
    columns: COLUMNS,
    default_column: 1,
    default_ascending: true,
    primary_key: 0,
};

pub struct Tag;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TagCriteria {
    pub user_id: Option<String>,
    pub parent_id: Option<String>,
    pub name: Option<String>,
}

impl TagCriteria {
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_parent_id(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagRecord {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub username: String,
}

impl EntityFamily for Tag {
    const FAMILY: Family = Family::Tag;
    const BASE_QUERY: BaseQuery = BaseQuery {
        projection: COLUMNS,
        from: "T_TAG t JOIN T_USER u ON t.TAG_IDUSER_C = u.USE_ID_C",
        baseline: "t.TAG_DELETEDATE_D IS NULL",
    };

    type Criteria = TagCriteria;
    type Record = TagRecord;

    fn criteria_fields(criteria: &TagCriteria) -> Vec<CriteriaField<'_>> {
        vec![
            CriteriaField::new(
                "user_id",
                "t.TAG_IDUSER_C",
                ValueKind::Identifier,
                criteria.user_id.as_deref(),
            ),
            CriteriaField::new(
                "parent_id",
                "t.TAG_IDPARENT_C",
                ValueKind::Identifier,
                criteria.parent_id.as_deref(),
            ),
            CriteriaField::new(
                "name",
                "t.TAG_NAME_C",
                ValueKind::Text { max_len: 36 },
                criteria.name.as_deref(),
            ),
        ]
    }

    fn map_row(row: RawRow) -> Result<TagRecord> {
        let mut r = RowReader::new(Family::Tag, row, COLUMNS.len())?;
        let record = TagRecord {
            id: r.id()?,
            name: r.text()?,
            color: r.text()?,
            parent_id: r.opt_id()?,
            username: r.text()?,
        };
        r.finish()?;
        Ok(record)
    }
}
