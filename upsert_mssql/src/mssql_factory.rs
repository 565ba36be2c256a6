use crate::{ClientFactory, Error, MssqlProvider};
use std::env::var;
use tiberius::Config;
use upsert::Result;

/// Configuration of the connection, read from an ado connection string.
///
/// `Server=tcp:localhost,1433;Database=app;User Id=sa;Password=...`
#[derive(Clone, Debug)]
pub struct MssqlFactory(pub Config);

impl MssqlFactory {
    pub fn from_ado_string(conn_str: &str) -> Result<Self> {
        Ok(Self(Config::from_ado_string(conn_str).map_err(Error::ParseAdoConnStr)?))
    }

    pub fn from_env(var_name: &str) -> Result<Self> {
        Self::from_env_with_trust(var_name, false)
    }

    /// Reads the connection string from the env var `var_name`.
    ///
    /// `trust` accepts the certificate of the server without validation.
    pub fn from_env_with_trust(var_name: &str, trust: bool) -> Result<Self> {
        let conn_str = var(var_name).map_err(|error| Error::Var {
            error,
            name: var_name.to_string(),
        })?;

        let mut this = Self::from_ado_string(&conn_str)?;

        if trust {
            this.0.trust_cert();
        }

        Ok(this)
    }

    pub fn create_provider(&self) -> MssqlProvider<Config> {
        self.0.clone().create_provider()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_env_var() {
        let err = MssqlFactory::from_env("UPSERT_MSSQL_TEST_NOT_DEFINED").unwrap_err();
        assert!(err.to_string().contains("UPSERT_MSSQL_TEST_NOT_DEFINED"));
    }

    #[test]
    fn parse_ado() {
        let f = MssqlFactory::from_ado_string(
            "Server=tcp:localhost,1433;Database=app;User Id=sa;Password=pwd",
        )
        .unwrap();

        assert_eq!(f.0.get_addr(), "localhost:1433");
    }
}
