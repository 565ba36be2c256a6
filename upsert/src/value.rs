use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::Serialize;
use std::borrow::Cow;
use uuid::Uuid;

/// A column value read from an entity.
///
/// Each variant carries an `Option` so a null still knows its sql type,
/// which matters for stores binding typed parameters.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value<'a> {
    Binary(Option<Cow<'a, [u8]>>),
    Bit(Option<bool>),
    Date(Option<NaiveDate>),
    DateTime(Option<NaiveDateTime>),
    DateTimeOffset(Option<DateTime<FixedOffset>>),
    DateTimeUtc(Option<DateTime<Utc>>),
    F32(Option<f32>),
    F64(Option<f64>),
    Guid(Option<Uuid>),
    I16(Option<i16>),
    I32(Option<i32>),
    I64(Option<i64>),
    String(Option<Cow<'a, str>>),
    Time(Option<NaiveTime>),
    U8(Option<u8>),
}

impl<'a> Value<'a> {
    pub fn is_null(&self) -> bool {
        match self {
            Self::Binary(v) => v.is_none(),
            Self::Bit(v) => v.is_none(),
            Self::Date(v) => v.is_none(),
            Self::DateTime(v) => v.is_none(),
            Self::DateTimeOffset(v) => v.is_none(),
            Self::DateTimeUtc(v) => v.is_none(),
            Self::F32(v) => v.is_none(),
            Self::F64(v) => v.is_none(),
            Self::Guid(v) => v.is_none(),
            Self::I16(v) => v.is_none(),
            Self::I32(v) => v.is_none(),
            Self::I64(v) => v.is_none(),
            Self::String(v) => v.is_none(),
            Self::Time(v) => v.is_none(),
            Self::U8(v) => v.is_none(),
        }
    }

    /// Detach the value from the entity it was read from.
    pub fn into_owned(self) -> Value<'static> {
        fn cow<T: ?Sized + ToOwned>(o: Option<Cow<'_, T>>) -> Option<Cow<'static, T>> {
            o.map(|v| Cow::Owned(v.into_owned()))
        }

        match self {
            Self::Binary(v) => Value::Binary(cow(v)),
            Self::Bit(v) => Value::Bit(v),
            Self::Date(v) => Value::Date(v),
            Self::DateTime(v) => Value::DateTime(v),
            Self::DateTimeOffset(v) => Value::DateTimeOffset(v),
            Self::DateTimeUtc(v) => Value::DateTimeUtc(v),
            Self::F32(v) => Value::F32(v),
            Self::F64(v) => Value::F64(v),
            Self::Guid(v) => Value::Guid(v),
            Self::I16(v) => Value::I16(v),
            Self::I32(v) => Value::I32(v),
            Self::I64(v) => Value::I64(v),
            Self::String(v) => Value::String(cow(v)),
            Self::Time(v) => Value::Time(v),
            Self::U8(v) => Value::U8(v),
        }
    }
}

/// Converts a field into a [Value](Value).
pub trait ToValue: Send + Sync {
    fn to_value(&self) -> Value<'_>;

    /// The typed null used when an `Option<Self>` is `None`.
    fn null_value() -> Value<'static>
    where
        Self: Sized;
}

impl<T: Sized + ToValue> ToValue for &T {
    #[inline]
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }

    #[inline]
    fn null_value() -> Value<'static> {
        T::null_value()
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value<'_> {
        match self.as_ref() {
            Some(v) => v.to_value(),
            None => T::null_value(),
        }
    }

    #[inline]
    fn null_value() -> Value<'static> {
        T::null_value()
    }
}

impl<T: ToValue> ToValue for Box<T> {
    #[inline]
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }

    #[inline]
    fn null_value() -> Value<'static> {
        T::null_value()
    }
}

impl<T: ToValue> ToValue for std::sync::Arc<T> {
    #[inline]
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }

    #[inline]
    fn null_value() -> Value<'static> {
        T::null_value()
    }
}

impl ToValue for Cow<'_, str> {
    #[inline]
    fn to_value(&self) -> Value<'_> {
        Value::String(Some(Cow::Borrowed(self.as_ref())))
    }

    #[inline]
    fn null_value() -> Value<'static> {
        Value::String(None)
    }
}

macro_rules! to_value {
    (borrowed $t:ty => $n:ident) => {
        impl ToValue for $t {
            #[inline]
            fn to_value(&self) -> Value<'_> {
                Value::$n(Some(Cow::Borrowed(&self[..])))
            }

            #[inline]
            fn null_value() -> Value<'static> {
                Value::$n(None)
            }
        }
    };
    (copied $t:ty => $n:ident) => {
        impl ToValue for $t {
            #[inline]
            fn to_value(&self) -> Value<'_> {
                Value::$n(Some(*self))
            }

            #[inline]
            fn null_value() -> Value<'static> {
                Value::$n(None)
            }
        }
    };
}

to_value!(borrowed Box<[u8]> => Binary);
to_value!(borrowed Box<str> => String);
to_value!(borrowed String => String);
to_value!(borrowed Vec<u8> => Binary);
to_value!(borrowed &str => String);

to_value!(copied bool => Bit);
to_value!(copied f32 => F32);
to_value!(copied f64 => F64);
to_value!(copied i16 => I16);
to_value!(copied i32 => I32);
to_value!(copied i64 => I64);
to_value!(copied u8 => U8);

to_value!(copied DateTime<FixedOffset> => DateTimeOffset);
to_value!(copied DateTime<Utc> => DateTimeUtc);
to_value!(copied NaiveDate => Date);
to_value!(copied NaiveDateTime => DateTime);
to_value!(copied NaiveTime => Time);
to_value!(copied Uuid => Guid);

impl<'a> From<&'a str> for Value<'a> {
    fn from(v: &'a str) -> Self {
        Value::String(Some(Cow::Borrowed(v)))
    }
}

impl From<String> for Value<'static> {
    fn from(v: String) -> Self {
        Value::String(Some(Cow::Owned(v)))
    }
}

macro_rules! from_copied {
    ($($t:ty => $n:ident),*) => {
        $(
            impl From<$t> for Value<'static> {
                #[inline]
                fn from(v: $t) -> Self {
                    Value::$n(Some(v))
                }
            }
        )*
    };
}

from_copied!(bool => Bit, f64 => F64, i16 => I16, i32 => I32, i64 => I64, Uuid => Guid);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_none_keeps_type() {
        let name: Option<String> = None;
        let age: Option<i32> = None;

        assert_eq!(name.to_value(), Value::String(None));
        assert_eq!(age.to_value(), Value::I32(None));
        assert!(age.to_value().is_null());
    }

    #[test]
    fn strings_are_borrowed() {
        let name = "Alice".to_string();

        match name.to_value() {
            Value::String(Some(Cow::Borrowed(s))) => assert_eq!(s, "Alice"),
            v => panic!("unexpected {v:?}"),
        }
    }

    #[test]
    fn into_owned_detaches() {
        let owned = {
            let bytes = vec![1u8, 2, 3];
            bytes.to_value().into_owned()
        };

        assert_eq!(owned, Value::Binary(Some(Cow::Owned(vec![1, 2, 3]))));
    }

    #[test]
    fn from_literals() {
        assert_eq!(Value::from(30), Value::I32(Some(30)));
        assert_eq!(Value::from("a"), Value::String(Some(Cow::Borrowed("a"))));
    }

    #[test]
    fn serialize_untagged() {
        let v = Some(7i64).to_value();
        assert_eq!(serde_json::to_string(&v).unwrap(), "7");
        assert_eq!(serde_json::to_string(&Value::Bit(None)).unwrap(), "null");
    }
}
