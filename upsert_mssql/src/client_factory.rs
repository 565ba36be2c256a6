use crate::{Client, MssqlProvider};
use tiberius::{Config, SqlBrowser};
use tokio::net::TcpStream;
use tokio_util::compat::TokioAsyncWriteCompatExt;
use tracing::{instrument, Instrument};
use upsert::{BoxFuture, Error, Result};

/// Opens the connections used by a [MssqlProvider](MssqlProvider).
pub trait ClientFactory: Send + Sync + 'static {
    fn create_client(&self) -> BoxFuture<'_, Result<Client>>;

    fn create_provider(self) -> MssqlProvider<Self>
    where
        Self: Sized,
    {
        MssqlProvider::new(self)
    }
}

impl ClientFactory for Config {
    #[instrument(name = "ClientFactory::create_client", skip(self))]
    fn create_client(&self) -> BoxFuture<'_, Result<Client>> {
        Box::pin(
            async move {
                // resolves named instances through the sql browser.
                let tcp = TcpStream::connect_named(self).await.map_err(Error::std)?;
                tcp.set_nodelay(true).map_err(Error::std)?;

                let client = Client::connect(self.clone(), tcp.compat_write())
                    .await
                    .map_err(Error::std)?;

                Ok(client)
            }
            .in_current_span(),
        )
    }
}
