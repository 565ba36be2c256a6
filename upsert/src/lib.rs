//! Merge and upsert helpers over a data context of mapped entities.
//!
//! - [Context::merge](Context::merge) inserts or updates an entity by primary key using the
//!   native merge statement of the store.
//! - [Context::upsert_by](Context::upsert_by) looks a row up with a [Filter](Filter) then
//!   inserts or updates the entity.
//! - [Model::entity_types](Model::entity_types) and [EntityInfoIterExt](EntityInfoIterExt)
//!   enumerate the mapped types.

mod context;
mod descriptor;
pub mod dialect;
mod discovery;
mod error;
mod filter;
mod merge;
mod metrics_helper;
mod model;
pub mod provider;
mod statement;
mod string_ext;
mod upsert_state;
mod value;

pub use context::Context;
pub use descriptor::{Column, EntityDescriptor};
pub use dialect::Dialect;
pub use discovery::EntityInfoIterExt;
pub use error::Error;
pub use filter::{And, ByKey, ColumnEq, Filter, Raw};
pub use merge::merge_statement;
pub use model::{EntityInfo, EntityType, Model, ModelBuilder, Registration, Templates};
pub use provider::{Execute, QueryAny};
pub use statement::Statement;
pub use upsert_state::UpsertState;
pub use value::{ToValue, Value};

pub type BoxFuture<'a, T> = std::pin::Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(feature = "derive")]
pub use upsert_derive::EntityDescriptor;
