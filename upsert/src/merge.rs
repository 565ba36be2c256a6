use crate::{Dialect, EntityDescriptor, Model, Result, Statement};

/// Builds the statement inserting `entity`, or updating the row having the
/// same primary key when it exists.
///
/// The metadata is checked before anything else: an unregistered or keyless
/// type fails here, without reaching the store.
///
/// ```
/// use upsert::{dialect::Mssql, merge_statement, EntityDescriptor, Model, Value};
///
/// #[derive(EntityDescriptor)]
/// #[upsert(table = "Customer", keys = "Id", rename_all = "PascalCase")]
/// struct Customer {
///     id: i32,
///     name: String,
/// }
///
/// let model = Model::builder().register::<Customer>().build();
/// let customer = Customer { id: 7, name: "Alice".into() };
/// let statement = merge_statement(&model, &Mssql, &customer).unwrap();
///
/// assert!(statement.sql.starts_with("MERGE INTO [Customer] AS [target]"));
/// assert_eq!(statement.params, vec![Value::from(7), Value::from("Alice")]);
/// ```
pub fn merge_statement<'e, T: EntityDescriptor>(
    model: &Model,
    dialect: &dyn Dialect,
    entity: &'e T,
) -> Result<Statement<'e>> {
    let ty = model.resolve::<T>()?;

    ty.ensure_key()?;

    Ok(Statement {
        sql: ty.templates(dialect).merge.clone(),
        params: entity.read_values(),
    })
}
