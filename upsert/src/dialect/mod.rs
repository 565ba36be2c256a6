mod mssql;
mod postgres;

pub use mssql::Mssql;
pub use postgres::Postgres;

use crate::string_ext::StringExt;

/// Name and key flag of a mapped column, as seen by a dialect.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ColumnDef<'a> {
    pub name: &'a str,
    pub key: bool,
}

/// Store specific formatting of the generated commands.
///
/// Every command binds its parameters in column order: parameter `n` always
/// holds the value of the `n`th column. This lets one extraction of the
/// entity values serve the merge, insert and update commands alike.
pub trait Dialect: Send + Sync {
    /// Identifies the dialect in the template cache.
    fn name(&self) -> &'static str;

    fn quote_ident(&self, out: &mut String, ident: &str);

    /// Writes the marker of the 1-based positional parameter `index`.
    fn param(&self, out: &mut String, index: usize);

    /// Insert-or-update by primary key, in a single statement.
    fn merge_sql(&self, table: &str, columns: &[ColumnDef<'_>]) -> String;

    /// `SELECT` returning at least one row when `filter` matches.
    fn exists_sql(&self, table: &str, filter: &str) -> String;

    fn quote_table(&self, out: &mut String, table: &str) {
        for (index, segment) in split_table(table).into_iter().enumerate() {
            if index > 0 {
                out.push('.');
            }

            if is_quoted(segment) {
                out.push_str(segment);
            } else {
                self.quote_ident(out, segment);
            }
        }
    }

    fn insert_sql(&self, table: &str, columns: &[ColumnDef<'_>]) -> String {
        let mut sql = String::from("INSERT INTO ");

        self.quote_table(&mut sql, table);

        sql.add_str(" (")
            .add_list(columns, ",", |s, c| self.quote_ident(s, c.name))
            .add_str(") VALUES (")
            .add_list(1..=columns.len(), ",", |s, i| self.param(s, i))
            .add(')');

        sql
    }

    /// `None` when there is nothing to update: no key to locate the row, or
    /// no column outside of the key.
    fn update_sql(&self, table: &str, columns: &[ColumnDef<'_>]) -> Option<String> {
        let fields = columns.iter().enumerate().filter(|t| !t.1.key);
        let keys = columns.iter().enumerate().filter(|t| t.1.key);

        if fields.clone().next().is_none() || keys.clone().next().is_none() {
            return None;
        }

        let mut sql = String::from("UPDATE ");

        self.quote_table(&mut sql, table);

        sql.add_str(" SET ")
            .add_list(fields, ",", |s, (i, c)| {
                self.quote_ident(s, c.name);
                s.push('=');
                self.param(s, i + 1);
            })
            .add_str(" WHERE ")
            .add_list(keys, " AND ", |s, (i, c)| {
                s.push('(');
                self.quote_ident(s, c.name);
                s.push('=');
                self.param(s, i + 1);
                s.push(')');
            });

        Some(sql)
    }
}

/// Doubles every occurrence of `close` so the identifier stays inside its quotes.
pub(crate) fn quote_with(out: &mut String, ident: &str, open: char, close: char) {
    out.push(open);

    for ch in ident.chars() {
        if ch == close {
            out.push(close);
        }

        out.push(ch);
    }

    out.push(close);
}

fn is_quoted(segment: &str) -> bool {
    (segment.starts_with('[') && segment.ends_with(']'))
        || (segment.len() > 1 && segment.starts_with('"') && segment.ends_with('"'))
}

/// Splits `schema.table` on the dots found outside of quotes.
fn split_table(table: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut close = None;
    let mut start = 0;

    for (index, ch) in table.char_indices() {
        match (close, ch) {
            (Some(c), ch) if c == ch => close = None,
            (Some(_), _) => {}
            (None, '[') => close = Some(']'),
            (None, '"') => close = Some('"'),
            (None, '.') => {
                segments.push(&table[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }

    segments.push(&table[start..]);
    segments
}
