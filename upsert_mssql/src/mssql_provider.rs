use crate::{Client, ClientFactory, Parameter};
use tiberius::ToSql;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{instrument, Instrument};
use upsert::{BoxFuture, Error, Execute, QueryAny, Result, Value};

/// Runs the commands on a single sql server connection, opened on first use.
///
/// A connection that failed a command is dropped and a new one is opened by
/// the next call.
pub struct MssqlProvider<F> {
    client_factory: F,
    state: Mutex<Option<Client>>,
}

impl<F: ClientFactory> MssqlProvider<F> {
    pub fn new(client_factory: F) -> Self {
        Self {
            client_factory,
            state: Mutex::new(None),
        }
    }

    async fn state_client(&self) -> Result<(MutexGuard<'_, Option<Client>>, Client)> {
        let mut state = self.state.lock().await;

        let client = match state.take() {
            Some(client) => client,
            None => self.client_factory.create_client().await?,
        };

        Ok((state, client))
    }
}

impl<F: ClientFactory> Execute for MssqlProvider<F> {
    #[instrument(name = "MssqlProvider::execute", skip(self, params))]
    fn execute<'a>(&'a self, sql: &'a str, params: &'a [Value<'a>]) -> BoxFuture<'a, Result<u64>> {
        Box::pin(
            async move {
                let params = params.iter().map(Parameter).collect::<Vec<_>>();
                let params = params.iter().map(|p| p as &dyn ToSql).collect::<Vec<_>>();

                let (mut state, mut client) = self.state_client().await?;

                let count = client
                    .execute(sql, &params)
                    .await
                    .map_err(Error::std)?
                    .total();

                *state = Some(client);
                Ok(count)
            }
            .in_current_span(),
        )
    }
}

impl<F: ClientFactory> QueryAny for MssqlProvider<F> {
    #[instrument(name = "MssqlProvider::query_any", skip(self, params))]
    fn query_any<'a>(
        &'a self,
        sql: &'a str,
        params: &'a [Value<'a>],
    ) -> BoxFuture<'a, Result<bool>> {
        Box::pin(
            async move {
                let params = params.iter().map(Parameter).collect::<Vec<_>>();
                let params = params.iter().map(|p| p as &dyn ToSql).collect::<Vec<_>>();

                let (mut state, mut client) = self.state_client().await?;

                // reads the whole result so the connection can take another query.
                let rows = client
                    .query(sql, &params)
                    .await
                    .map_err(Error::std)?
                    .into_first_result()
                    .await
                    .map_err(Error::std)?;

                *state = Some(client);
                Ok(!rows.is_empty())
            }
            .in_current_span(),
        )
    }
}
