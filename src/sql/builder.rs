//! Builds parameterized INSERT, SELECT, UPDATE, DELETE for the admin tables.

use crate::sql::PgBindValue;

/// Static description of a table: identifiers only, never user input.
#[derive(Clone, Copy, Debug)]
pub struct Table {
    pub name: &'static str,
    pub pk: &'static str,
    pub columns: &'static [&'static str],
}

pub const ANALYTICS: Table = Table {
    name: "analytics",
    pk: "id",
    columns: &["id", "restaurant_id", "report_date", "total_orders", "total_revenue"],
};

pub const RESTAURANTS: Table = Table {
    name: "restaurants",
    pk: "id",
    columns: &["id", "name"],
};

/// Quote identifier for PostgreSQL.
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
pub fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<PgBindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: PgBindValue) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

fn column_list(table: &Table) -> String {
    table
        .columns
        .iter()
        .map(|c| quoted(c))
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT every row, in storage order.
pub fn select_list(schema: &str, table: &Table) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT {} FROM {}", column_list(table), qualified_table(schema, table.name));
    q
}

/// SELECT by primary key. Caller binds the id as `$1`.
pub fn select_by_id(schema: &str, table: &Table, id: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(PgBindValue::from(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${}",
        column_list(table),
        qualified_table(schema, table.name),
        quoted(table.pk),
        n
    );
    q
}

/// INSERT the given (column, value) pairs. Columns not in the table are skipped.
pub fn insert(schema: &str, table: &Table, values: Vec<(&str, PgBindValue)>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for (col, v) in values {
        if !table.columns.contains(&col) {
            continue;
        }
        let n = q.push_param(v);
        cols.push(quoted(col));
        placeholders.push(format!("${}", n));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        qualified_table(schema, table.name),
        cols.join(", "),
        placeholders.join(", "),
        column_list(table)
    );
    q
}

/// UPDATE by id: SET only the given columns. With nothing to set this degrades to a SELECT by id
/// so callers still get the current row back.
pub fn update(schema: &str, table: &Table, id: &str, values: Vec<(&str, PgBindValue)>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for (col, v) in values {
        if !table.columns.contains(&col) {
            continue;
        }
        let n = q.push_param(v);
        sets.push(format!("{} = ${}", quoted(col), n));
    }
    if sets.is_empty() {
        return select_by_id(schema, table, id);
    }
    let id_param = q.push_param(PgBindValue::from(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
        qualified_table(schema, table.name),
        sets.join(", "),
        quoted(table.pk),
        id_param,
        column_list(table)
    );
    q
}

/// DELETE by id, returning the removed row.
pub fn delete(schema: &str, table: &Table, id: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(PgBindValue::from(id));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ${} RETURNING {}",
        qualified_table(schema, table.name),
        quoted(table.pk),
        n,
        column_list(table)
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_list_names_every_column() {
        let q = select_list("public", &ANALYTICS);
        assert_eq!(
            q.sql,
            r#"SELECT "id", "restaurant_id", "report_date", "total_orders", "total_revenue" FROM "public"."analytics""#
        );
        assert!(q.params.is_empty());
    }

    #[test]
    fn insert_skips_unknown_columns_and_numbers_params() {
        let q = insert(
            "admin",
            &RESTAURANTS,
            vec![("id", "r1".into()), ("bogus", 1i64.into()), ("name", "Deli".into())],
        );
        assert_eq!(
            q.sql,
            r#"INSERT INTO "admin"."restaurants" ("id", "name") VALUES ($1, $2) RETURNING "id", "name""#
        );
        assert_eq!(q.params.len(), 2);
    }

    #[test]
    fn update_binds_id_last() {
        let q = update("public", &ANALYTICS, "a1", vec![("total_orders", 9i64.into())]);
        assert_eq!(
            q.sql,
            r#"UPDATE "public"."analytics" SET "total_orders" = $1 WHERE "id" = $2 RETURNING "id", "restaurant_id", "report_date", "total_orders", "total_revenue""#
        );
        assert!(matches!(q.params[1], PgBindValue::String(ref s) if s == "a1"));
    }

    #[test]
    fn empty_update_reads_current_row() {
        let q = update("public", &ANALYTICS, "a1", Vec::new());
        assert!(q.sql.starts_with("SELECT "));
        assert_eq!(q.params.len(), 1);
    }

    #[test]
    fn identifiers_are_escaped() {
        assert_eq!(quoted(r#"we"ird"#), r#""we""ird""#);
    }
}
