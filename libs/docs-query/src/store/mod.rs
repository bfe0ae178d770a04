//! Store capability consumed by the engine.
//!
//! The engine never reaches for an ambient connection: every search receives the
//! store handle explicitly. Any backend that can run a native statement with
//! positional bindings can implement [`QueryStore`].

use crate::value::{BindValue, RawRow};
use crate::Result;
use async_trait::async_trait;

mod postgres;

pub use postgres::PgStore;

#[async_trait]
pub trait QueryStore: Send + Sync {
    /// Run a statement and return its rows, each in projection order.
    async fn run_query(&self, sql: &str, bind_params: &[BindValue]) -> Result<Vec<RawRow>>;

    /// Run a statement projecting a single row count.
    async fn run_count(&self, sql: &str, bind_params: &[BindValue]) -> Result<i64>;
}
