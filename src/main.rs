use anyhow::Result;
use axum::Router;
use clinic_console::{bootstrap, config, db, routes, state::AppState};
use tower_http::{services::ServeDir, trace::TraceLayer};

#[tokio::main]
async fn main() -> Result<()> {
    bootstrap::init_tracing();
    bootstrap::init_env();

    let config = config::load()?;

    tracing::info!("Connecting to the database...");
    let db_pool = db::connect(&config.database).await?;

    if config.console.raw_queries {
        tracing::warn!("Raw query console is enabled; statements posted to /run-query run verbatim");
    }

    let state = AppState {
        db_pool,
        raw_queries: config.console.raw_queries,
    };

    let app = Router::new()
        .merge(routes::pages::routes())
        .merge(routes::explorer::routes())
        .merge(routes::records::routes())
        .nest_service("/public", ServeDir::new("public"))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    bootstrap::serve(app, config.server.port).await
}
