//! Criteria-driven paginated queries for the document-management backend.
//!
//! A search for one entity family goes through:
//! - criteria validation and predicate composition ([`compose`])
//! - sort column resolution against the family whitelist ([`sort`])
//! - a windowed page statement plus an unwindowed count ([`execute`])
//! - row mapping into typed records ([`families`])
//!
//! ```no_run
//! use docs_query::families::{Activity, ActivityCriteria};
//! use docs_query::{find_page, PageWindow, PgStore, SortSpec};
//!
//! # async fn run(store: PgStore) -> docs_query::Result<()> {
//! let criteria = ActivityCriteria::default().with_user_id("u1");
//! let page = find_page::<Activity, _>(
//!     &store,
//!     &criteria,
//!     Some(SortSpec::new(6, true)),
//!     PageWindow::default(),
//! )
//! .await?;
//! println!("{} of {}", page.items.len(), page.total);
//! # Ok(())
//! # }
//! ```

pub mod compose;
pub mod config;
pub mod criteria;
pub mod engine;
pub mod error;
pub mod execute;
pub mod families;
pub mod family;
pub mod mapper;
pub mod paging;
pub mod sort;
pub mod store;
pub mod value;

pub use compose::{compose, ComposedQuery};
pub use config::{DatabaseConfig, PagingConfig, QueryConfig};
pub use engine::{find_page, SearchEngine};
pub use error::{Error, Result};
pub use family::{EntityFamily, Family};
pub use paging::{PageRequest, PageWindow, ResultPage};
pub use sort::SortSpec;
pub use store::{PgStore, QueryStore};
pub use value::{BindValue, ColumnValue, RawRow};
