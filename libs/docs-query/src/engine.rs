//! Search entry points.

use crate::compose::compose;
use crate::config::PagingConfig;
use crate::execute::execute;
use crate::family::EntityFamily;
use crate::paging::{PageRequest, PageWindow, ResultPage};
use crate::sort::SortSpec;
use crate::store::QueryStore;
use crate::Result;

/// Find one page of family `F` records matching `criteria`.
#[tracing::instrument(
    name = "find_page",
    skip_all,
    fields(family = %F::FAMILY, limit = window.limit(), offset = window.offset())
)]
pub async fn find_page<F, S>(
    store: &S,
    criteria: &F::Criteria,
    sort: Option<SortSpec>,
    window: PageWindow,
) -> Result<ResultPage<F::Record>>
where
    F: EntityFamily,
    S: QueryStore + ?Sized,
{
    let query = compose::<F>(criteria, sort)?;
    let (rows, total) = execute(store, &query, window).await?;

    let items = rows
        .into_iter()
        .map(F::map_row)
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(rows = items.len(), total, "Search page fetched");

    Ok(ResultPage {
        items,
        total,
        limit: window.limit(),
        offset: window.offset(),
    })
}

/// Search engine bound to paging configuration.
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    paging: PagingConfig,
}

impl SearchEngine {
    pub fn new(paging: PagingConfig) -> Self {
        Self { paging }
    }

    /// Search with raw paging parameters, normalizing the window against configuration.
    pub async fn search<F, S>(
        &self,
        store: &S,
        criteria: &F::Criteria,
        request: &PageRequest,
    ) -> Result<ResultPage<F::Record>>
    where
        F: EntityFamily,
        S: QueryStore + ?Sized,
    {
        find_page::<F, S>(
            store,
            criteria,
            request.sort(),
            request.window(&self.paging),
        )
        .await
    }
}
