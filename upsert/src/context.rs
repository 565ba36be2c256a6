use crate::{
    merge_statement,
    metrics_helper::{merge_wrap, upsert_wrap},
    provider::{Execute, QueryAny},
    Dialect, EntityDescriptor, EntityInfo, Error, Filter, Model, Result, UpsertState,
};
use futures::executor::block_on;
use std::{any::type_name, sync::Arc};
use tracing::{debug, instrument};

/// A data context: the model of the mapped entities, the dialect of the store
/// and the provider running the commands on it.
///
/// Dropping a future returned by the context cancels the call; whether the
/// command was applied is then up to the store.
pub struct Context<P> {
    dialect: Box<dyn Dialect>,
    model: Arc<Model>,
    provider: P,
}

impl<P> Context<P> {
    pub fn new<D>(model: impl Into<Arc<Model>>, dialect: D, provider: P) -> Self
    where
        D: Dialect + 'static,
    {
        Self {
            dialect: Box::new(dialect),
            model: model.into(),
            provider,
        }
    }

    pub fn dialect(&self) -> &dyn Dialect {
        &*self.dialect
    }

    /// Every mapped entity type of the context.
    pub fn entity_types(&self) -> impl Iterator<Item = &EntityInfo> {
        self.model.entity_types()
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn into_provider(self) -> P {
        self.provider
    }
}

impl<P: Execute> Context<P> {
    /// Inserts the entity, or updates the row with the same primary key, with
    /// a single statement native to the store. Returns the rows affected.
    ///
    /// Fails before reaching the store when `T` is not registered in the
    /// model or has no primary key. Store errors are returned as raised.
    #[instrument(name = "Context::merge", skip_all, fields(ty = type_name::<T>()), err)]
    pub async fn merge<T: EntityDescriptor>(&self, entity: &T) -> Result<u64> {
        let statement = merge_statement(&self.model, &*self.dialect, entity)?;
        let table = self.model.resolve::<T>()?.table();

        debug!(sql = &*statement.sql, "merge");

        merge_wrap(statement.execute(&self.provider), table).await
    }

    pub fn merge_blocking<T: EntityDescriptor>(&self, entity: &T) -> Result<u64> {
        block_on(self.merge(entity))
    }
}

impl<P: Execute + QueryAny> Context<P> {
    /// Looks for a row matching `filter`; inserts the entity when there is
    /// none, updates it otherwise.
    ///
    /// Unlike [merge](Self::merge) this takes two round trips, the lookup
    /// and the write, and the filter is free to match on any column.
    ///
    /// A filter rendering no condition fails with
    /// [Error::EmptyFilter](Error::EmptyFilter) before reaching the store.
    #[instrument(name = "Context::upsert_by", skip_all, fields(ty = type_name::<T>()), err)]
    pub async fn upsert_by<T, F>(&self, entity: &T, filter: F) -> Result<UpsertState>
    where
        T: EntityDescriptor,
        F: Filter,
    {
        let ty = self.model.resolve::<T>()?;

        ty.ensure_key()?;

        let templates = ty.templates(&*self.dialect);
        let mut sql = String::new();
        let mut params = Vec::new();

        filter.filter_sql(&*self.dialect, &mut sql, &mut params);

        if is_empty_condition(&sql) {
            return Err(Error::EmptyFilter {
                table: ty.table().to_owned().into(),
            });
        }

        upsert_wrap(
            async {
                let exists = self.dialect.exists_sql(ty.table(), &sql);

                debug!(sql = %exists, "upsert lookup");

                let values = entity.read_values();

                if self.provider.query_any(&exists, &params).await? {
                    if let Some(update) = templates.update.as_deref() {
                        debug!(sql = update, "upsert update");
                        self.provider.execute(update, &values).await?;
                    }

                    Ok(UpsertState::Updated)
                } else {
                    debug!(sql = &*templates.insert, "upsert insert");
                    self.provider.execute(&templates.insert, &values).await?;
                    Ok(UpsertState::Inserted)
                }
            },
            ty.table(),
        )
        .await
    }

    pub fn upsert_by_blocking<T, F>(&self, entity: &T, filter: F) -> Result<UpsertState>
    where
        T: EntityDescriptor,
        F: Filter,
    {
        block_on(self.upsert_by(entity, filter))
    }
}

/// `true` when the rendered filter holds nothing but parentheses.
fn is_empty_condition(sql: &str) -> bool {
    sql.chars().all(|c| c.is_whitespace() || c == '(' || c == ')')
}
