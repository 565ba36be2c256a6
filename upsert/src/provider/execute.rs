use crate::{BoxFuture, Result, Value};

/// Executes a command on the store and returns the number of rows affected.
///
/// Parameters are bound by position: `params[0]` is parameter 1.
pub trait Execute: Send + Sync {
    fn execute<'a>(&'a self, sql: &'a str, params: &'a [Value<'a>]) -> BoxFuture<'a, Result<u64>>;
}

impl<P> Execute for &P
where
    P: Execute + ?Sized,
{
    fn execute<'a>(&'a self, sql: &'a str, params: &'a [Value<'a>]) -> BoxFuture<'a, Result<u64>> {
        (**self).execute(sql, params)
    }
}

impl<P> Execute for std::sync::Arc<P>
where
    P: Execute + ?Sized,
{
    fn execute<'a>(&'a self, sql: &'a str, params: &'a [Value<'a>]) -> BoxFuture<'a, Result<u64>> {
        (**self).execute(sql, params)
    }
}
