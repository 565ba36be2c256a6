use std::{
    borrow::Cow,
    fmt::{self, Debug, Display},
};

pub enum Error {
    /// The predicate of an upsert renders no condition.
    EmptyFilter { table: Cow<'static, str> },

    /// The entity type is mapped but declares no primary key.
    NoPrimaryKey { table: Cow<'static, str> },

    /// A store failure, kept as raised by the store.
    Std(StdError),

    /// The type was never registered in the model.
    UnknownEntity { ty: &'static str },
}

impl Error {
    pub fn std<E: Into<StdError>>(e: E) -> Self {
        Self::Std(e.into())
    }

    /// Returns the store error when this error came from the store.
    pub fn store_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Std(e) => Some(e.as_ref()),
            _ => None,
        }
    }

    /// The call was rejected before reaching the store.
    pub fn is_metadata(&self) -> bool {
        matches!(
            self,
            Self::EmptyFilter { .. } | Self::NoPrimaryKey { .. } | Self::UnknownEntity { .. }
        )
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Std(e) => Debug::fmt(e, f),
            e => Display::fmt(e, f),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFilter { table } => write!(f, "Empty filter on table {table}."),
            Self::NoPrimaryKey { table } => {
                write!(f, "Entity on table {table} has no primary key.")
            }
            Self::Std(e) => Display::fmt(e, f),
            Self::UnknownEntity { ty } => write!(f, "{ty} is not a known entity."),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Std(e) => e.source(),
            _ => None,
        }
    }
}

type StdError = Box<dyn std::error::Error + Send + Sync>;
