use crate::{BoxFuture, Result, Value};

/// Runs a query on the store and tells whether it returned at least one row.
pub trait QueryAny: Send + Sync {
    fn query_any<'a>(
        &'a self,
        sql: &'a str,
        params: &'a [Value<'a>],
    ) -> BoxFuture<'a, Result<bool>>;
}

impl<P> QueryAny for &P
where
    P: QueryAny + ?Sized,
{
    fn query_any<'a>(
        &'a self,
        sql: &'a str,
        params: &'a [Value<'a>],
    ) -> BoxFuture<'a, Result<bool>> {
        (**self).query_any(sql, params)
    }
}

impl<P> QueryAny for std::sync::Arc<P>
where
    P: QueryAny + ?Sized,
{
    fn query_any<'a>(
        &'a self,
        sql: &'a str,
        params: &'a [Value<'a>],
    ) -> BoxFuture<'a, Result<bool>> {
        (**self).query_any(sql, params)
    }
}
