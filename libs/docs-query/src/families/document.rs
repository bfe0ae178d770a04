//! Documents, owned by a user.

use crate::criteria::{CriteriaField, ValueKind};
use crate::family::{BaseQuery, EntityFamily, Family};
use crate::mapper::RowReader;
use crate::sort::SortTable;
use crate::value::RawRow;
use crate::Result;
use serde::{Deserialize, Serialize};

const COLUMNS: &[&str] = &[
    "d.DOC_ID_C",
    "d.DOC_TITLE_C",
    "d.DOC_DESCRIPTION_C",
    "d.DOC_CREATEDATE_D",
    "d.DOC_UPDATEDATE_D",
    "u.USE_USERNAME_C",
];

pub(crate) static SORT_TABLE: SortTable = SortTable {
    columns: COLUMNS,
    default_column: 3,
    default_ascending: false,
    primary_key: 0,
};

pub struct Document;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DocumentCriteria {
    pub user_id: Option<String>,
    pub language: Option<String>,
}

impl DocumentCriteria {
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRecord {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub create_timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_timestamp: Option<i64>,
    pub username: String,
}

impl EntityFamily for Document {
    const FAMILY: Family = Family::Document;
    const BASE_QUERY: BaseQuery = BaseQuery {
        projection: COLUMNS,
        from: "T_DOCUMENT d JOIN T_USER u ON d.DOC_IDUSER_C = u.USE_ID_C",
        baseline: "d.DOC_DELETEDATE_D IS NULL",
    };

    type Criteria = DocumentCriteria;
    type Record = DocumentRecord;

    fn criteria_fields(criteria: &DocumentCriteria) -> Vec<CriteriaField<'_>> {
        vec![
            CriteriaField::new(
                "user_id",
                "d.DOC_IDUSER_C",
                ValueKind::Identifier,
                criteria.user_id.as_deref(),
            ),
            CriteriaField::new(
                "language",
                "d.DOC_LANGUAGE_C",
                ValueKind::Text { max_len: 7 },
                criteria.language.as_deref(),
            ),
        ]
    }

    fn map_row(row: RawRow) -> Result<DocumentRecord> {
        let mut r = RowReader::new(Family::Document, row, COLUMNS.len())?;
        let record = DocumentRecord {
            id: r.id()?,
            title: r.text()?,
            description: r.opt_text()?,
            create_timestamp: r.timestamp_millis()?,
            update_timestamp: r.opt_timestamp_millis()?,
            username: r.text()?,
        };
        r.finish()?;
        Ok(record)
    }
}
