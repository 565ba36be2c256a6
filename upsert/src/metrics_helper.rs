use std::future::Future;

pub(crate) async fn merge_wrap<F, T>(f: F, table: &str) -> F::Output
where
    F: Future<Output = crate::Result<T>>,
{
    op_wrap(f, table, "merge").await
}

pub(crate) async fn upsert_wrap<F, T>(f: F, table: &str) -> F::Output
where
    F: Future<Output = crate::Result<T>>,
{
    op_wrap(f, table, "upsert").await
}

#[allow(unused_variables)]
async fn op_wrap<F, T>(f: F, table: &str, op: &'static str) -> F::Output
where
    F: Future<Output = crate::Result<T>>,
{
    #[cfg(feature = "telemetry")]
    {
        let d = std::time::Instant::now();
        let r = f.await;

        counter_impl(table, op, d, r.is_ok());

        r
    }

    #[cfg(not(feature = "telemetry"))]
    {
        f.await
    }
}

#[cfg(feature = "telemetry")]
fn counter_impl(table: &str, op: &'static str, instant: std::time::Instant, ok: bool) {
    let d = instant.elapsed();
    let table = table.to_owned();

    metrics::counter!("upsert_count", "table" => table.clone(), "op" => op).increment(1);
    metrics::counter!("upsert_ms", "table" => table.clone(), "op" => op)
        .increment(d.as_millis() as u64);

    if !ok {
        metrics::counter!("upsert_errors", "table" => table, "op" => op).increment(1);
    }
}
