use anyhow::Context;
use axum::{
    Form, Router,
    extract::State,
    response::{Html, IntoResponse},
    routing,
};
use serde::Deserialize;

use crate::{
    db::{self, StatementOutcome},
    errors::AppError,
    state::AppState,
    views,
};

/// Schema exploration and the ad-hoc query console.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tables", routing::get(list_tables))
        .route("/show-table", routing::post(show_table))
        .route("/run-query", routing::post(run_query))
}

/// Render the names of all non-system tables.
async fn list_tables(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    let tables = db::list_tables(conn).await?;
    Ok(Html(views::tables_page(&tables)))
}

#[derive(Deserialize)]
struct ShowTableReq {
    #[serde(rename = "tableName")]
    table_name: String,
}

/// Render every row of one table. The submitted name must match a table
/// from the catalog listing before it is spliced into the statement.
async fn show_table(
    State(state): State<AppState>,
    Form(body): Form<ShowTableReq>,
) -> Result<impl IntoResponse, AppError> {
    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    let tables = db::list_tables(conn).await?;
    if !tables.iter().any(|name| name == &body.table_name) {
        return Err(AppError::UnknownTable(body.table_name));
    }

    let statement = format!("SELECT * FROM {}", db::quote_ident(&body.table_name));
    let rows = db::select_rows(conn, &statement).await?;
    Ok(Html(views::result_page(&rows)))
}

#[derive(Deserialize)]
struct RunQueryReq {
    #[serde(rename = "sqlQuery")]
    sql_query: Option<String>,
    query: Option<String>,
}

/// Execute a caller-supplied statement verbatim and render the outcome.
async fn run_query(
    State(state): State<AppState>,
    Form(body): Form<RunQueryReq>,
) -> Result<impl IntoResponse, AppError> {
    if !state.raw_queries {
        return Err(AppError::RawQueriesDisabled);
    }

    // Whichever of the two field names carries a non-blank statement wins;
    // a blank submission must not reach the database.
    let statement = [body.sql_query, body.query]
        .into_iter()
        .flatten()
        .map(|text| text.trim().to_string())
        .find(|text| !text.is_empty())
        .ok_or(AppError::EmptyQuery)?;

    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    tracing::info!("Running ad-hoc statement");
    match db::run_statement(conn, &statement).await? {
        StatementOutcome::Rows(rows) => Ok(Html(views::result_page(&rows)).into_response()),
        StatementOutcome::Executed(affected) => {
            Ok(Html(views::executed_page(affected)).into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::pages::tests::test_state;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt;

    async fn post_run_query(state: AppState, form_body: &'static str) -> (StatusCode, String) {
        let app = routes().with_state(state);
        let request = Request::builder()
            .method("POST")
            .uri("/run-query")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form_body))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn missing_query_field_short_circuits() {
        let (status, body) = post_run_query(test_state(true), "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Error: No SQL query provided");
    }

    #[tokio::test]
    async fn blank_query_fields_short_circuit() {
        let (status, body) = post_run_query(test_state(true), "sqlQuery=++&query=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Error: No SQL query provided");
    }

    #[tokio::test]
    async fn disabled_console_rejects_statements() {
        let (status, body) = post_run_query(test_state(false), "sqlQuery=SELECT+1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Error: the raw query console is disabled");
    }
}
