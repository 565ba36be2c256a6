use crate::{provider::Execute, Result, Value};
use std::sync::Arc;

/// A command ready to run: the sql text and its positional parameters.
#[derive(Clone, Debug)]
pub struct Statement<'a> {
    pub sql: Arc<str>,
    pub params: Vec<Value<'a>>,
}

impl<'a> Statement<'a> {
    pub async fn execute<P: Execute + ?Sized>(&self, provider: &P) -> Result<u64> {
        provider.execute(&self.sql, &self.params).await
    }
}
