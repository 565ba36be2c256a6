//! Sql server store for the [upsert](upsert) crate, on top of tiberius.
//!
//! ```no_run
//! use upsert::{dialect::Mssql, Context, Model};
//! use upsert_mssql::MssqlFactory;
//!
//! # fn main() -> upsert::Result<()> {
//! let provider = MssqlFactory::from_env("DB")?.create_provider();
//! let ctx = Context::new(Model::builder().build(), Mssql, provider);
//! # let _ = ctx;
//! # Ok(())
//! # }
//! ```

mod client_factory;
mod error;
mod mssql_factory;
mod mssql_provider;
mod parameter;

pub use client_factory::ClientFactory;
pub use error::Error;
pub use mssql_factory::MssqlFactory;
pub use mssql_provider::MssqlProvider;
pub use parameter::Parameter;
pub use upsert::dialect::Mssql;

pub type Client = tiberius::Client<tokio_util::compat::Compat<tokio::net::TcpStream>>;
