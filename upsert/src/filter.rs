use crate::{Dialect, EntityDescriptor, Value};

/// A predicate locating rows, rendered as a sql condition.
///
/// Parameters are numbered after the ones already pushed in `params`, so
/// filters compose:
///
/// ```
/// use upsert::{dialect::Mssql, And, ColumnEq, Filter};
///
/// let filter = And(ColumnEq("Name", "Alice".into()), ColumnEq("Age", 30.into()));
/// let mut sql = String::new();
/// let mut params = Vec::new();
///
/// filter.filter_sql(&Mssql, &mut sql, &mut params);
///
/// assert_eq!(sql, "([Name]=@p1) AND ([Age]=@p2)");
/// assert_eq!(params.len(), 2);
/// ```
pub trait Filter: Send + Sync {
    fn filter_sql<'a>(
        &'a self,
        dialect: &dyn Dialect,
        sql: &mut String,
        params: &mut Vec<Value<'a>>,
    );
}

impl<F: Filter> Filter for &F {
    fn filter_sql<'a>(
        &'a self,
        dialect: &dyn Dialect,
        sql: &mut String,
        params: &mut Vec<Value<'a>>,
    ) {
        (**self).filter_sql(dialect, sql, params)
    }
}

/// Matches the row having the same primary key as the entity.
pub struct ByKey<'e, E>(pub &'e E);

impl<E: EntityDescriptor> Filter for ByKey<'_, E> {
    fn filter_sql<'a>(
        &'a self,
        dialect: &dyn Dialect,
        sql: &mut String,
        params: &mut Vec<Value<'a>>,
    ) {
        for (index, column) in E::primary_key_columns().enumerate() {
            if index > 0 {
                sql.push_str(" AND ");
            }

            params.push(column.read_value(self.0));
            push_eq(dialect, sql, column.name, params.len());
        }
    }
}

/// `column = value`.
pub struct ColumnEq<'v>(pub &'static str, pub Value<'v>);

impl Filter for ColumnEq<'_> {
    fn filter_sql<'a>(
        &'a self,
        dialect: &dyn Dialect,
        sql: &mut String,
        params: &mut Vec<Value<'a>>,
    ) {
        params.push(self.1.clone());
        push_eq(dialect, sql, self.0, params.len());
    }
}

/// Both filters must match.
pub struct And<A, B>(pub A, pub B);

impl<A: Filter, B: Filter> Filter for And<A, B> {
    fn filter_sql<'a>(
        &'a self,
        dialect: &dyn Dialect,
        sql: &mut String,
        params: &mut Vec<Value<'a>>,
    ) {
        self.0.filter_sql(dialect, sql, params);
        sql.push_str(" AND ");
        self.1.filter_sql(dialect, sql, params);
    }
}

/// A condition written in the dialect of the store.
///
/// Parameter markers must account for the parameters of the filters
/// preceding it; alone, its first parameter is number 1.
pub struct Raw<'v>(pub &'v str, pub Vec<Value<'v>>);

impl Filter for Raw<'_> {
    fn filter_sql<'a>(&'a self, _: &dyn Dialect, sql: &mut String, params: &mut Vec<Value<'a>>) {
        sql.push('(');
        sql.push_str(self.0);
        sql.push(')');
        params.extend(self.1.iter().cloned());
    }
}

fn push_eq(dialect: &dyn Dialect, sql: &mut String, column: &str, param: usize) {
    sql.push('(');
    dialect.quote_ident(sql, column);
    sql.push('=');
    dialect.param(sql, param);
    sql.push(')');
}
