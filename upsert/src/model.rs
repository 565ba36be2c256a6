use crate::{dialect::ColumnDef, Dialect, EntityDescriptor, Error, Result};
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::{
    any::{type_name, Any, TypeId},
    borrow::Cow,
    fmt::{self, Debug},
    sync::Arc,
};
use tracing::trace;

/// The mapped entity types of a context, registered at startup.
///
/// ```
/// use upsert::{EntityDescriptor, Model};
///
/// #[derive(EntityDescriptor)]
/// #[upsert(table = "Customer", keys = "Id", rename_all = "PascalCase")]
/// struct Customer {
///     id: i32,
///     name: String,
/// }
///
/// let model = Model::builder().register::<Customer>().build();
///
/// assert_eq!(model.resolve::<Customer>().unwrap().table(), "Customer");
/// ```
#[derive(Default)]
pub struct Model {
    records: Vec<Rec>,
}

impl Model {
    pub fn builder() -> ModelBuilder {
        ModelBuilder::default()
    }

    /// Every registered entity type.
    pub fn entity_types(&self) -> impl Iterator<Item = &EntityInfo> {
        self.records.iter().map(|r| &r.info)
    }

    pub fn info<T: 'static>(&self) -> Option<&EntityInfo> {
        self.find_index(TypeId::of::<T>())
            .ok()
            .map(|index| &self.records[index].info)
    }

    /// Resolves the mapping of `T`.
    ///
    /// Fails with [Error::UnknownEntity](Error::UnknownEntity) when `T` was
    /// never registered.
    pub fn resolve<T: EntityDescriptor>(&self) -> Result<&EntityType<T>> {
        self.find_index(TypeId::of::<T>())
            .ok()
            .and_then(|index| self.records[index].entity.downcast_ref())
            .ok_or(Error::UnknownEntity { ty: type_name::<T>() })
    }

    fn find_index(&self, type_id: TypeId) -> std::result::Result<usize, usize> {
        self.records
            .binary_search_by(|probe| probe.info.type_id.cmp(&type_id))
    }
}

impl Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entity_types()).finish()
    }
}

#[derive(Default)]
pub struct ModelBuilder {
    records: Vec<Rec>,
}

impl ModelBuilder {
    pub fn register<T: EntityDescriptor>(self) -> Self {
        self.register_with::<T, _>(|_| {})
    }

    /// Registers `T`, letting `f` adjust the mapping.
    ///
    /// Registering the same type twice keeps the last registration.
    pub fn register_with<T, F>(mut self, f: F) -> Self
    where
        T: EntityDescriptor,
        F: FnOnce(&mut Registration<T>),
    {
        let mut reg = Registration {
            info: EntityInfo {
                interfaces: Vec::new(),
                table: Cow::Borrowed(T::TABLE),
                type_id: TypeId::of::<T>(),
                type_name: type_name::<T>(),
            },
            _entity: std::marker::PhantomData,
        };

        f(&mut reg);

        trace!(ty = reg.info.type_name, table = %reg.info.table, "register entity");

        let entity = EntityType::<T> {
            columns: T::COLUMNS
                .iter()
                .map(|c| ColumnDef {
                    name: c.name,
                    key: c.key,
                })
                .collect(),
            table: reg.info.table.clone(),
            templates: Default::default(),
            _entity: std::marker::PhantomData,
        };

        let rec = Rec {
            entity: Box::new(entity),
            info: reg.info,
        };

        match self
            .records
            .binary_search_by(|probe| probe.info.type_id.cmp(&rec.info.type_id))
        {
            Ok(index) => self.records[index] = rec,
            Err(index) => self.records.insert(index, rec),
        }

        self
    }

    pub fn build(self) -> Model {
        Model {
            records: self.records,
        }
    }
}

/// Adjusts how a type is registered in the [Model](Model).
pub struct Registration<T> {
    info: EntityInfo,
    _entity: std::marker::PhantomData<fn() -> T>,
}

impl<T: 'static> Registration<T> {
    /// Overrides the table given by the descriptor.
    pub fn table(&mut self, table: impl Into<Cow<'static, str>>) -> &mut Self {
        self.info.table = table.into();
        self
    }

    /// Declares that `T` implements the interface `I`, usually a `dyn Trait`.
    ///
    /// `cast` is only there to have the compiler prove the claim:
    /// `r.implements::<dyn Audited>(|e| e)`.
    pub fn implements<I: ?Sized + 'static>(&mut self, _cast: fn(&T) -> &I) -> &mut Self {
        let id = TypeId::of::<I>();

        if !self.info.interfaces.iter().any(|i| i.0 == id) {
            self.info.interfaces.push((id, type_name::<I>()));
        }

        self
    }
}

/// Type erased description of a registered entity type.
#[derive(Clone)]
pub struct EntityInfo {
    interfaces: Vec<(TypeId, &'static str)>,
    table: Cow<'static, str>,
    type_id: TypeId,
    type_name: &'static str,
}

impl EntityInfo {
    pub fn implements<I: ?Sized + 'static>(&self) -> bool {
        let id = TypeId::of::<I>();
        self.interfaces.iter().any(|i| i.0 == id)
    }

    /// Names of the interfaces declared at registration.
    pub fn interfaces(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.interfaces.iter().map(|i| i.1)
    }

    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Full path of the rust type, i.e. `app::entities::Customer`.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl Debug for EntityInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityInfo")
            .field("type_name", &self.type_name)
            .field("table", &self.table)
            .field("interfaces", &self.interfaces().collect::<Vec<_>>())
            .finish()
    }
}

/// Resolved mapping of the entity `T`.
pub struct EntityType<T> {
    columns: Vec<ColumnDef<'static>>,
    table: Cow<'static, str>,
    templates: RwLock<FxHashMap<&'static str, Arc<Templates>>>,
    _entity: std::marker::PhantomData<fn() -> T>,
}

impl<T: EntityDescriptor> EntityType<T> {
    pub fn columns(&self) -> &[ColumnDef<'static>] {
        &self.columns
    }

    pub fn key_columns(&self) -> impl Iterator<Item = &ColumnDef<'static>> {
        self.columns.iter().filter(|c| c.key)
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Fails with [Error::NoPrimaryKey](Error::NoPrimaryKey) on a keyless mapping.
    pub(crate) fn ensure_key(&self) -> Result<()> {
        match self.key_columns().next() {
            Some(_) => Ok(()),
            None => Err(Error::NoPrimaryKey {
                table: self.table.clone(),
            }),
        }
    }

    /// Statements of `T` for the dialect, generated once then reused.
    pub fn templates(&self, dialect: &dyn Dialect) -> Arc<Templates> {
        let name = dialect.name();

        if let Some(t) = self.templates.read().get(name) {
            return t.clone();
        }

        self.templates
            .write()
            .entry(name)
            .or_insert_with(|| {
                let t = Templates {
                    insert: dialect.insert_sql(&self.table, &self.columns).into(),
                    merge: dialect.merge_sql(&self.table, &self.columns).into(),
                    update: dialect.update_sql(&self.table, &self.columns).map(Into::into),
                };

                trace!(
                    table = %self.table,
                    dialect = name,
                    merge = %t.merge,
                    "templates generated"
                );
                Arc::new(t)
            })
            .clone()
    }
}

/// Statements generated for an entity type in a given dialect.
///
/// All of them bind one parameter per column, in column order.
#[derive(Debug)]
pub struct Templates {
    pub insert: Arc<str>,
    pub merge: Arc<str>,
    pub update: Option<Arc<str>>,
}

struct Rec {
    entity: Box<dyn Any + Send + Sync>,
    info: EntityInfo,
}
