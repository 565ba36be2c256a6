#![allow(dead_code)]

use parking_lot::Mutex;
use std::{collections::HashMap, fmt, sync::Arc};
use upsert::{BoxFuture, Error, Execute, QueryAny, Result, Value};

/// In memory stand in for a sql server database.
///
/// Understands the commands generated by the `Mssql` dialect: `MERGE`,
/// `INSERT`, `UPDATE` and the existence lookup of `upsert_by`. Rows are kept
/// as the positional parameters they were written with.
#[derive(Clone, Default)]
pub struct FakeStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    fail: Option<ConstraintViolation>,
    log: Vec<(String, Vec<Value<'static>>)>,
    tables: HashMap<String, Table>,
}

struct Table {
    columns: Vec<&'static str>,
    keys: Vec<usize>,
    rows: Vec<Vec<Value<'static>>>,
}

impl Table {
    fn position(&self, key: &[Value<'_>]) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| self.keys.iter().all(|&k| row[k] == key[k]))
    }
}

impl FakeStore {
    /// Declares a table; `keys` are the names of the primary key columns.
    pub fn with_table(self, name: &str, columns: &[&'static str], keys: &[&str]) -> Self {
        let keys = keys
            .iter()
            .filter_map(|k| columns.iter().position(|c| c == k))
            .collect();

        self.inner.lock().tables.insert(
            name.to_string(),
            Table {
                columns: columns.to_vec(),
                keys,
                rows: Vec::new(),
            },
        );

        self
    }

    /// The next command fails with a constraint violation.
    pub fn fail_next(&self, constraint: &'static str) {
        self.inner.lock().fail = Some(ConstraintViolation(constraint));
    }

    /// Commands received so far, lookups included.
    pub fn log(&self) -> Vec<(String, Vec<Value<'static>>)> {
        self.inner.lock().log.clone()
    }

    pub fn rows(&self, table: &str) -> Vec<Vec<Value<'static>>> {
        self.inner
            .lock()
            .tables
            .get(table)
            .map(|t| t.rows.clone())
            .unwrap_or_default()
    }

    /// Reads a row back by its primary key.
    pub fn find(&self, table: &str, key: &[Value<'_>]) -> Option<Vec<Value<'static>>> {
        let inner = self.inner.lock();
        let table = inner.tables.get(table)?;

        table
            .rows
            .iter()
            .find(|row| table.keys.iter().zip(key).all(|(&k, v)| row[k] == *v))
            .cloned()
    }

    fn run(&self, sql: &str, params: &[Value<'_>]) -> Result<u64> {
        let mut inner = self.inner.lock();
        let params = params.iter().cloned().map(Value::into_owned).collect::<Vec<_>>();

        inner.log.push((sql.to_string(), params.clone()));

        if let Some(e) = inner.fail.take() {
            return Err(Error::std(e));
        }

        let (verb, name) = parse_command(sql).ok_or_else(|| Error::std(Unsupported(sql.into())))?;
        let table = inner
            .tables
            .get_mut(&name)
            .ok_or_else(|| Error::std(Unsupported(format!("unknown table {name}"))))?;

        match (verb, table.position(&params)) {
            ("MERGE", Some(index)) | ("UPDATE", Some(index)) => {
                table.rows[index] = params;
                Ok(1)
            }
            ("MERGE", None) | ("INSERT", None) => {
                table.rows.push(params);
                Ok(1)
            }
            ("INSERT", Some(_)) => Err(Error::std(ConstraintViolation("PK"))),
            ("UPDATE", None) => Ok(0),
            _ => Err(Error::std(Unsupported(sql.into()))),
        }
    }

    fn exists(&self, sql: &str, params: &[Value<'_>]) -> Result<bool> {
        let mut inner = self.inner.lock();

        inner.log.push((
            sql.to_string(),
            params.iter().cloned().map(Value::into_owned).collect(),
        ));

        if let Some(e) = inner.fail.take() {
            return Err(Error::std(e));
        }

        let (_, name) = parse_command(sql).ok_or_else(|| Error::std(Unsupported(sql.into())))?;
        let table = inner
            .tables
            .get(&name)
            .ok_or_else(|| Error::std(Unsupported(format!("unknown table {name}"))))?;

        let filter = sql.split(" WHERE ").nth(1).unwrap_or_default();
        let mut terms = Vec::new();

        for (column, index) in parse_terms(filter) {
            let c = table
                .columns
                .iter()
                .position(|c| *c == column)
                .ok_or_else(|| Error::std(Unsupported(format!("unknown column {column}"))))?;

            terms.push((c, &params[index - 1]));
        }

        Ok(table
            .rows
            .iter()
            .any(|row| terms.iter().all(|(c, v)| row[*c] == **v)))
    }
}

impl Execute for FakeStore {
    fn execute<'a>(&'a self, sql: &'a str, params: &'a [Value<'a>]) -> BoxFuture<'a, Result<u64>> {
        Box::pin(async move { self.run(sql, params) })
    }
}

impl QueryAny for FakeStore {
    fn query_any<'a>(
        &'a self,
        sql: &'a str,
        params: &'a [Value<'a>],
    ) -> BoxFuture<'a, Result<bool>> {
        Box::pin(async move { self.exists(sql, params) })
    }
}

/// Error raised by the store, as a real driver would.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstraintViolation(pub &'static str);

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "constraint {} violated", self.0)
    }
}

impl std::error::Error for ConstraintViolation {}

#[derive(Debug)]
struct Unsupported(String);

impl fmt::Display for Unsupported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported command: {}", self.0)
    }
}

impl std::error::Error for Unsupported {}

/// Verb and table of a command, `[dbo].[T]` read as `dbo.T`.
fn parse_command(sql: &str) -> Option<(&'static str, String)> {
    let (verb, rest) = if let Some(rest) = sql.strip_prefix("MERGE INTO ") {
        ("MERGE", rest)
    } else if let Some(rest) = sql.strip_prefix("INSERT INTO ") {
        ("INSERT", rest)
    } else if let Some(rest) = sql.strip_prefix("UPDATE ") {
        ("UPDATE", rest)
    } else if let Some(rest) = sql.strip_prefix("SELECT TOP 1 1 FROM ") {
        ("SELECT", rest)
    } else {
        return None;
    };

    let table = rest.split(' ').next()?.replace(['[', ']'], "");

    Some((verb, table))
}

/// `([Col]=@pN)` terms of a filter.
fn parse_terms(filter: &str) -> Vec<(String, usize)> {
    filter
        .split("([")
        .skip(1)
        .filter_map(|term| {
            let (column, rest) = term.split_once("]=@p")?;
            let digits = rest.chars().take_while(char::is_ascii_digit).collect::<String>();

            Some((column.to_string(), digits.parse().ok()?))
        })
        .collect()
}
