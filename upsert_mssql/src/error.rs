use std::env::VarError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed parse ado connection string; {0}")]
    ParseAdoConnStr(#[source] tiberius::error::Error),

    #[error("failed accessing env var {name}, {error}")]
    Var { error: VarError, name: String },
}

impl From<Error> for upsert::Error {
    fn from(value: Error) -> Self {
        upsert::Error::std(value)
    }
}
