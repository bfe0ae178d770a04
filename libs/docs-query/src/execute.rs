use crate::compose::ComposedQuery;
use crate::paging::PageWindow;
use crate::store::QueryStore;
use crate::value::RawRow;
use crate::{Error, Result};

/// Run the windowed page statement and the count statement.
///
/// The two round trips are issued concurrently and share no snapshot. Store errors are
/// returned as-is; nothing here retries or substitutes an empty page.
pub async fn execute<S>(
    store: &S,
    query: &ComposedQuery,
    window: PageWindow,
) -> Result<(Vec<RawRow>, i64)>
where
    S: QueryStore + ?Sized,
{
    let (page_sql, page_binds) = query.windowed(window);
    let (count_sql, count_binds) = query.count();

    let (rows, total) = futures::try_join!(
        store.run_query(&page_sql, &page_binds),
        store.run_count(count_sql, count_binds),
    )?;

    if total < 0 {
        return Err(Error::store(format!(
            "count statement returned a negative total ({total})"
        )));
    }

    Ok((rows, total))
}
