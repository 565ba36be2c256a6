use crate::Value;

/// A mapped column of the entity `E`.
pub struct Column<E> {
    pub name: &'static str,
    pub key: bool,
    pub read: for<'a> fn(&'a E) -> Value<'a>,
}

impl<E> Column<E> {
    #[inline]
    pub fn read_value<'a>(&self, entity: &'a E) -> Value<'a> {
        (self.read)(entity)
    }
}

impl<E> Clone for Column<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Column<E> {}

impl<E> std::fmt::Debug for Column<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("key", &self.key)
            .finish()
    }
}

/// Describes how an entity maps to a table.
///
/// Usually implemented with `#[derive(EntityDescriptor)]`:
///
/// ```
/// use upsert::EntityDescriptor;
///
/// #[derive(EntityDescriptor)]
/// #[upsert(table = "Customer", keys = "Id", rename_all = "PascalCase")]
/// struct Customer {
///     id: i32,
///     name: String,
///     email: Option<String>,
/// }
///
/// assert_eq!(Customer::table_name(), "Customer");
/// assert_eq!(Customer::primary_key_columns().count(), 1);
/// ```
pub trait EntityDescriptor: Send + Sync + Sized + 'static {
    const TABLE: &'static str;

    /// Mapped columns, in the order used to bind parameters.
    const COLUMNS: &'static [Column<Self>];

    #[inline]
    fn table_name() -> &'static str {
        Self::TABLE
    }

    #[inline]
    fn all_columns() -> &'static [Column<Self>] {
        Self::COLUMNS
    }

    fn primary_key_columns() -> impl Iterator<Item = &'static Column<Self>> {
        Self::COLUMNS.iter().filter(|c| c.key)
    }

    /// Reads one value per column, in column order.
    fn read_values(&self) -> Vec<Value<'_>> {
        Self::COLUMNS.iter().map(|c| c.read_value(self)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ToValue;

    struct Item {
        a: i32,
        b: String,
    }

    impl EntityDescriptor for Item {
        const TABLE: &'static str = "Item";
        const COLUMNS: &'static [Column<Self>] = &[
            Column {
                name: "A",
                key: true,
                read: |e| e.a.to_value(),
            },
            Column {
                name: "B",
                key: false,
                read: |e| e.b.to_value(),
            },
        ];
    }

    #[test]
    fn read_values_in_column_order() {
        let item = Item {
            a: 3,
            b: "x".into(),
        };

        assert_eq!(
            item.read_values(),
            vec![Value::I32(Some(3)), "x".to_value().into_owned()]
        );

        let keys = Item::primary_key_columns().map(|c| c.name).collect::<Vec<_>>();
        assert_eq!(keys, ["A"]);
    }
}
