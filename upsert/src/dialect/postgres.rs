use super::{quote_with, ColumnDef, Dialect};
use crate::string_ext::StringExt;

/// PostgreSql, using `INSERT .. ON CONFLICT .. DO UPDATE`.
///
/// The conflict target is the primary key; `EXCLUDED` plays the role of the
/// source row.
#[derive(Clone, Copy, Debug, Default)]
pub struct Postgres;

impl Dialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn quote_ident(&self, out: &mut String, ident: &str) {
        quote_with(out, ident, '"', '"');
    }

    fn param(&self, out: &mut String, index: usize) {
        out.add('$').add_str(&index.to_string());
    }

    fn merge_sql(&self, table: &str, columns: &[ColumnDef<'_>]) -> String {
        let mut sql = self.insert_sql(table, columns);

        sql.add_str(" ON CONFLICT (")
            .add_list(columns.iter().filter(|c| c.key), ",", |s, c| {
                self.quote_ident(s, c.name)
            })
            .add_str(") DO UPDATE SET ")
            .add_list(columns, ",", |s, c| {
                self.quote_ident(s, c.name);
                s.push_str("=EXCLUDED.");
                self.quote_ident(s, c.name);
            });

        sql
    }

    fn exists_sql(&self, table: &str, filter: &str) -> String {
        let mut sql = String::from("SELECT 1 FROM ");
        self.quote_table(&mut sql, table);
        sql.add_str(" WHERE ").add_str(filter).add_str(" LIMIT 1");
        sql
    }
}
