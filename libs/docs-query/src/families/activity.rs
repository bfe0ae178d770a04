//! User activity records (planned/completed work items tied to a user and optionally a document).

use crate::criteria::{CriteriaField, ValueKind};
use crate::family::{BaseQuery, EntityFamily, Family};
use crate::mapper::RowReader;
use crate::sort::SortTable;
use crate::value::RawRow;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Projection order doubles as the sort column index space.
const COLUMNS: &[&str] = &[
    "ua.UTA_ID_C",
    "ua.UTA_IDUSER_C",
    "u.USE_USERNAME_C",
    "ua.UTA_ACTIVITY_TYPE_C",
    "ua.UTA_ENTITY_ID_C",
    "d.DOC_TITLE_C",
    "ua.UTA_PROGRESS_N",
    "ua.UTA_PLANNED_DATE_D",
    "ua.UTA_COMPLETED_DATE_D",
    "ua.UTA_CREATEDATE_D",
];

pub(crate) static SORT_TABLE: SortTable = SortTable {
    columns: COLUMNS,
    default_column: 9,
    default_ascending: false,
    primary_key: 0,
};

pub struct Activity;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ActivityCriteria {
    pub user_id: Option<String>,
    pub activity_type: Option<String>,
    pub entity_id: Option<String>,
}

impl ActivityCriteria {
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_activity_type(mut self, activity_type: impl Into<String>) -> Self {
        self.activity_type = Some(activity_type.into());
        self
    }

    pub fn with_entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityRecord {
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub activity_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    pub progress: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_date_timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date_timestamp: Option<i64>,
    pub create_timestamp: i64,
}

impl EntityFamily for Activity {
    const FAMILY: Family = Family::Activity;
    const BASE_QUERY: BaseQuery = BaseQuery {
        projection: COLUMNS,
        from: "T_USER_ACTIVITY ua \
               JOIN T_USER u ON ua.UTA_IDUSER_C = u.USE_ID_C \
               LEFT JOIN T_DOCUMENT d ON ua.UTA_ENTITY_ID_C = d.DOC_ID_C",
        baseline: "ua.UTA_DELETEDATE_D IS NULL",
    };

    type Criteria = ActivityCriteria;
    type Record = ActivityRecord;

    fn criteria_fields(criteria: &ActivityCriteria) -> Vec<CriteriaField<'_>> {
        vec![
            CriteriaField::new(
                "user_id",
                "ua.UTA_IDUSER_C",
                ValueKind::Identifier,
                criteria.user_id.as_deref(),
            ),
            CriteriaField::new(
                "activity_type",
                "ua.UTA_ACTIVITY_TYPE_C",
                ValueKind::Text { max_len: 50 },
                criteria.activity_type.as_deref(),
            ),
            CriteriaField::new(
                "entity_id",
                "ua.UTA_ENTITY_ID_C",
                ValueKind::Identifier,
                criteria.entity_id.as_deref(),
            ),
        ]
    }

    fn map_row(row: RawRow) -> Result<ActivityRecord> {
        let mut r = RowReader::new(Family::Activity, row, COLUMNS.len())?;
        let record = ActivityRecord {
            id: r.id()?,
            user_id: r.id()?,
            username: r.text()?,
            activity_type: r.text()?,
            entity_id: r.opt_id()?,
            entity_name: r.opt_text()?,
            progress: r.int()?,
            planned_date_timestamp: r.opt_timestamp_millis()?,
            completed_date_timestamp: r.opt_timestamp_millis()?,
            create_timestamp: r.timestamp_millis()?,
        };
        r.finish()?;
        Ok(record)
    }
}
