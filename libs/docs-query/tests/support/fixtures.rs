//! Fixture rows for each family, keyed by the qualified columns the base queries use.

use super::{FixtureRow, MemoryStore};
use chrono::{DateTime, Duration, TimeZone, Utc};
use docs_query::families::{Activity, Document, Tag};
use docs_query::{ColumnValue, EntityFamily};

fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap() + Duration::days(n)
}

fn deleted_at(deleted: bool) -> ColumnValue {
    if deleted {
        day(30).into()
    } else {
        ColumnValue::Null
    }
}

fn activity(
    id: &'static str,
    user: (&'static str, &'static str),
    activity_type: &'static str,
    entity: Option<(&'static str, &'static str)>,
    progress: i64,
    created_day: i64,
    deleted: bool,
) -> FixtureRow {
    let planned = (created_day % 2 == 0).then(|| day(created_day + 7));
    let completed = (progress == 100).then(|| day(created_day + 1));
    FixtureRow::from([
        ("ua.UTA_ID_C", id.into()),
        ("ua.UTA_IDUSER_C", user.0.into()),
        ("u.USE_USERNAME_C", user.1.into()),
        ("ua.UTA_ACTIVITY_TYPE_C", activity_type.into()),
        ("ua.UTA_ENTITY_ID_C", entity.map(|e| e.0).into()),
        ("d.DOC_TITLE_C", entity.map(|e| e.1).into()),
        ("ua.UTA_PROGRESS_N", progress.into()),
        ("ua.UTA_PLANNED_DATE_D", planned.into()),
        ("ua.UTA_COMPLETED_DATE_D", completed.into()),
        ("ua.UTA_CREATEDATE_D", day(created_day).into()),
        ("ua.UTA_DELETEDATE_D", deleted_at(deleted)),
    ])
}

const ALICE: (&str, &str) = ("u1", "alice");
const BOB: (&str, &str) = ("u2", "bob");
const CAROL: (&str, &str) = ("u3", "carol");

const BUDGET: Option<(&str, &str)> = Some(("doc-1", "Budget"));
const ROADMAP: Option<(&str, &str)> = Some(("doc-2", "Roadmap"));
const MINUTES: Option<(&str, &str)> = Some(("doc-3", "Minutes"));

/// Fourteen activities, two of them soft-deleted (`a08`, `a11`).
///
/// `a05` and `a06` share a creation date; several rows share progress 40.
pub fn activities() -> Vec<FixtureRow> {
    vec![
        activity("a01", ALICE, "review", BUDGET, 40, 1, false),
        activity("a02", ALICE, "upload", None, 100, 2, false),
        activity("a03", BOB, "review", ROADMAP, 10, 3, false),
        activity("a04", ALICE, "approve", BUDGET, 40, 4, false),
        activity("a05", CAROL, "review", None, 0, 5, false),
        activity("a06", BOB, "upload", MINUTES, 75, 5, false),
        activity("a07", ALICE, "review", ROADMAP, 40, 6, false),
        activity("a08", BOB, "approve", None, 100, 7, true),
        activity("a09", ALICE, "upload", MINUTES, 20, 8, false),
        activity("a10", CAROL, "approve", BUDGET, 60, 9, false),
        activity("a11", ALICE, "review", None, 90, 10, true),
        activity("a12", ALICE, "review", MINUTES, 55, 11, false),
        activity("a13", BOB, "review", BUDGET, 40, 12, false),
        activity("a14", ALICE, "upload", ROADMAP, 5, 13, false),
    ]
}

fn tag(
    id: &'static str,
    name: &'static str,
    color: &'static str,
    parent: Option<&'static str>,
    user: (&'static str, &'static str),
    deleted: bool,
) -> FixtureRow {
    FixtureRow::from([
        ("t.TAG_ID_C", id.into()),
        ("t.TAG_NAME_C", name.into()),
        ("t.TAG_COLOR_C", color.into()),
        ("t.TAG_IDPARENT_C", parent.into()),
        ("u.USE_USERNAME_C", user.1.into()),
        ("t.TAG_IDUSER_C", user.0.into()),
        ("t.TAG_DELETEDATE_D", deleted_at(deleted)),
    ])
}

/// Six tags, one soft-deleted (`t5`).
pub fn tags() -> Vec<FixtureRow> {
    vec![
        tag("t0", "finance", "#3a87ad", None, ALICE, false),
        tag("t1", "invoices", "#ff0000", Some("t0"), ALICE, false),
        tag("t2", "contracts", "#00ff00", Some("t0"), ALICE, false),
        tag("t3", "archive", "#cccccc", None, BOB, false),
        tag("t4", "receipts", "#ff8800", Some("t0"), ALICE, false),
        tag("t5", "drafts", "#999999", None, ALICE, true),
    ]
}

#[allow(clippy::too_many_arguments)]
fn document(
    id: &'static str,
    title: &'static str,
    description: Option<&'static str>,
    created_day: i64,
    updated_day: Option<i64>,
    user: (&'static str, &'static str),
    language: &'static str,
    deleted: bool,
) -> FixtureRow {
    FixtureRow::from([
        ("d.DOC_ID_C", id.into()),
        ("d.DOC_TITLE_C", title.into()),
        ("d.DOC_DESCRIPTION_C", description.into()),
        ("d.DOC_CREATEDATE_D", day(created_day).into()),
        ("d.DOC_UPDATEDATE_D", updated_day.map(day).into()),
        ("u.USE_USERNAME_C", user.1.into()),
        ("d.DOC_IDUSER_C", user.0.into()),
        ("d.DOC_LANGUAGE_C", language.into()),
        ("d.DOC_DELETEDATE_D", deleted_at(deleted)),
    ])
}

/// Five documents, one soft-deleted (`doc-5`).
pub fn documents() -> Vec<FixtureRow> {
    vec![
        document(
            "doc-1",
            "Budget",
            Some("2024 budget"),
            1,
            Some(4),
            ALICE,
            "eng",
            false,
        ),
        document("doc-2", "Roadmap", None, 2, None, ALICE, "eng", false),
        document(
            "doc-3",
            "Minutes",
            Some("Weekly sync"),
            3,
            Some(3),
            BOB,
            "fra",
            false,
        ),
        document("doc-4", "Rapport", None, 4, None, BOB, "fra", false),
        document("doc-5", "Old draft", None, 5, None, ALICE, "eng", true),
    ]
}

/// A store loaded with every family's fixtures.
pub fn store() -> MemoryStore {
    MemoryStore::new()
        .with_table(Activity::BASE_QUERY.from, activities())
        .with_table(Tag::BASE_QUERY.from, tags())
        .with_table(Document::BASE_QUERY.from, documents())
}
