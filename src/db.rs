//! Database gateway: pool construction plus execution of statements whose
//! shape is only known at runtime.

use anyhow::Result;
use diesel::QueryableByName;
use diesel_async::{
    AsyncPgConnection, RunQueryDsl,
    pooled_connection::{
        AsyncDieselConnectionManager,
        bb8::{Pool, PooledConnection},
    },
};
use serde_json::{Map, Value};

use crate::{config::DatabaseConfig, errors::AppError};

pub type DbPool = Pool<AsyncPgConnection>;
pub type DbConn<'a> = PooledConnection<'a, AsyncPgConnection>;

/// Rows decoded from a dynamic statement keep the statement's column names
/// and order.
pub type DynamicRow = Map<String, Value>;

pub enum StatementOutcome {
    Rows(Vec<DynamicRow>),
    Executed(usize),
}

pub async fn connect(database: &DatabaseConfig) -> Result<DbPool> {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database.url());
    let pool = Pool::builder().build(manager).await?;
    Ok(pool)
}

#[derive(QueryableByName)]
struct TableNameRow {
    #[diesel(sql_type = diesel::sql_types::Text)]
    tablename: String,
}

#[derive(QueryableByName)]
struct JsonRow {
    #[diesel(sql_type = diesel::sql_types::Json)]
    row: Value,
}

/// Names of all user tables, excluding the system schemas.
pub async fn list_tables(conn: &mut DbConn<'_>) -> Result<Vec<String>, AppError> {
    let names: Vec<TableNameRow> = diesel::sql_query(
        "SELECT tablename::text AS tablename FROM pg_catalog.pg_tables \
         WHERE schemaname != 'pg_catalog' AND schemaname != 'information_schema' \
         ORDER BY tablename",
    )
    .get_results(conn)
    .await?;
    Ok(names.into_iter().map(|name| name.tablename).collect())
}

/// Run a row-returning statement and decode every row into a JSON object.
///
/// The statement is folded into a `row_to_json` subquery so column names and
/// order survive without a compile-time row type.
pub async fn select_rows(
    conn: &mut DbConn<'_>,
    statement: &str,
) -> Result<Vec<DynamicRow>, AppError> {
    let rows: Vec<JsonRow> = diesel::sql_query(wrap_as_json_rows(statement))
        .get_results(conn)
        .await?;
    Ok(rows
        .into_iter()
        .map(|decoded| match decoded.row {
            Value::Object(map) => map,
            other => Map::from_iter([("row".to_string(), other)]),
        })
        .collect())
}

/// Run a statement that returns no rows; yields the affected-row count.
pub async fn execute(conn: &mut DbConn<'_>, statement: &str) -> Result<usize, AppError> {
    let affected = diesel::sql_query(statement.to_string())
        .execute(conn)
        .await?;
    Ok(affected)
}

/// Execute a caller-supplied statement verbatim, dispatching on whether its
/// leading keyword produces a row set.
pub async fn run_statement(
    conn: &mut DbConn<'_>,
    statement: &str,
) -> Result<StatementOutcome, AppError> {
    if returns_rows(statement) {
        Ok(StatementOutcome::Rows(select_rows(conn, statement).await?))
    } else {
        Ok(StatementOutcome::Executed(execute(conn, statement).await?))
    }
}

fn wrap_as_json_rows(statement: &str) -> String {
    format!(
        "SELECT row_to_json(t) AS \"row\" FROM ({}) t",
        strip_terminator(statement)
    )
}

/// A trailing semicolon would end the subquery early.
fn strip_terminator(statement: &str) -> &str {
    statement.trim().trim_end_matches(';').trim_end()
}

pub fn returns_rows(statement: &str) -> bool {
    let keyword = statement
        .trim_start()
        .trim_start_matches('(')
        .split(|c: char| !c.is_ascii_alphabetic())
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    // Only forms that are legal inside a FROM subquery; anything else goes
    // through the execute path.
    matches!(keyword.as_str(), "select" | "with" | "values" | "table")
}

/// Double-quote an identifier so a validated table name can be spliced into
/// `SELECT * FROM ...` untouched by keyword folding.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_row_returning_statements() {
        assert!(returns_rows("SELECT 1"));
        assert!(returns_rows("  select * from patients"));
        assert!(returns_rows("WITH t AS (SELECT 1) SELECT * FROM t"));
        assert!(returns_rows("(select 1)"));
        assert!(returns_rows("VALUES (1), (2)"));
        assert!(returns_rows("TABLE doctors"));
    }

    #[test]
    fn classifies_commands_without_row_sets() {
        assert!(!returns_rows("INSERT INTO doctors VALUES (1)"));
        assert!(!returns_rows("update billing set amount = 0"));
        assert!(!returns_rows("DELETE FROM appointments"));
        assert!(!returns_rows("CREATE TABLE t (id int)"));
        assert!(!returns_rows("EXPLAIN SELECT 1"));
        assert!(!returns_rows(""));
        assert!(!returns_rows("   "));
    }

    #[test]
    fn wraps_statements_and_strips_terminators() {
        assert_eq!(
            wrap_as_json_rows("SELECT * FROM doctors;  "),
            "SELECT row_to_json(t) AS \"row\" FROM (SELECT * FROM doctors) t"
        );
        assert_eq!(
            wrap_as_json_rows("SELECT 1"),
            "SELECT row_to_json(t) AS \"row\" FROM (SELECT 1) t"
        );
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_ident("doctors"), "\"doctors\"");
        assert_eq!(quote_ident("odd\"name"), "\"odd\"\"name\"");
    }
}
