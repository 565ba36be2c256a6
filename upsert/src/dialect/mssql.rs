use super::{quote_with, ColumnDef, Dialect};
use crate::string_ext::StringExt;

/// Sql Server, using the native `MERGE` statement.
#[derive(Clone, Copy, Debug, Default)]
pub struct Mssql;

impl Dialect for Mssql {
    fn name(&self) -> &'static str {
        "mssql"
    }

    fn quote_ident(&self, out: &mut String, ident: &str) {
        quote_with(out, ident, '[', ']');
    }

    fn param(&self, out: &mut String, index: usize) {
        out.add_str("@p").add_str(&index.to_string());
    }

    fn merge_sql(&self, table: &str, columns: &[ColumnDef<'_>]) -> String {
        let keys = columns.iter().filter(|c| c.key);
        let mut sql = String::from("MERGE INTO ");

        self.quote_table(&mut sql, table);

        sql.add_str(" AS [target] USING (SELECT ")
            .add_list(columns.iter().enumerate(), ",", |s, (i, c)| {
                self.param(s, i + 1);
                s.push_str(" AS ");
                self.quote_ident(s, c.name);
            })
            .add_str(") AS [source] ON (")
            .add_list(keys, " AND ", |s, c| {
                s.push_str("[target].");
                self.quote_ident(s, c.name);
                s.push_str("=[source].");
                self.quote_ident(s, c.name);
            })
            .add_str(") WHEN MATCHED THEN UPDATE SET ")
            .add_list(columns, ",", |s, c| {
                s.push_str("[target].");
                self.quote_ident(s, c.name);
                s.push_str("=[source].");
                self.quote_ident(s, c.name);
            })
            .add_str(" WHEN NOT MATCHED THEN INSERT (")
            .add_list(columns, ",", |s, c| self.quote_ident(s, c.name))
            .add_str(") VALUES (")
            .add_list(columns, ",", |s, c| {
                s.push_str("[source].");
                self.quote_ident(s, c.name);
            })
            .add_str(");");

        sql
    }

    fn exists_sql(&self, table: &str, filter: &str) -> String {
        let mut sql = String::from("SELECT TOP 1 1 FROM ");
        self.quote_table(&mut sql, table);
        sql.add_str(" WHERE ").add_str(filter);
        sql
    }
}
