//! Searchable entity families.

pub mod activity;
pub mod document;
pub mod tag;

pub use activity::{Activity, ActivityCriteria, ActivityRecord};
pub use document::{Document, DocumentCriteria, DocumentRecord};
pub use tag::{Tag, TagCriteria, TagRecord};
