use std::borrow::Cow;
use tiberius::{ColumnData, ToSql};
use upsert::Value;

/// Binds a [Value](Value) as a tiberius parameter, borrowing its content.
pub struct Parameter<'a>(pub &'a Value<'a>);

impl ToSql for Parameter<'_> {
    fn to_sql(&self) -> ColumnData<'_> {
        fn cow<'b, T: ?Sized + ToOwned>(o: &'b Option<Cow<'_, T>>) -> Option<Cow<'b, T>> {
            o.as_deref().map(Cow::Borrowed)
        }

        match self.0 {
            Value::Binary(v) => ColumnData::Binary(cow(v)),
            Value::Bit(v) => ColumnData::Bit(*v),
            Value::Date(Some(v)) => v.to_sql(),
            Value::Date(None) => ColumnData::Date(None),
            Value::DateTime(Some(v)) => v.to_sql(),
            Value::DateTime(None) => ColumnData::DateTime2(None),
            Value::DateTimeOffset(Some(v)) => v.to_sql(),
            Value::DateTimeOffset(None) => ColumnData::DateTimeOffset(None),
            Value::DateTimeUtc(Some(v)) => v.to_sql(),
            Value::DateTimeUtc(None) => ColumnData::DateTimeOffset(None),
            Value::F32(v) => ColumnData::F32(*v),
            Value::F64(v) => ColumnData::F64(*v),
            Value::Guid(v) => ColumnData::Guid(*v),
            Value::I16(v) => ColumnData::I16(*v),
            Value::I32(v) => ColumnData::I32(*v),
            Value::I64(v) => ColumnData::I64(*v),
            Value::String(v) => ColumnData::String(cow(v)),
            Value::Time(Some(v)) => v.to_sql(),
            Value::Time(None) => ColumnData::Time(None),
            Value::U8(v) => ColumnData::U8(*v),
        }
    }
}
