use axum::{extract::State, response::Json, routing::get, Router};
use clap::Parser;
use common::{AppState, Config};
use database::Database;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize Logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Load Config from CLI args
    let config = Config::parse();

    // 3. Initialize Database
    let db = Database::new(&config.database_url).await?;
    db.run_migrations().await?;

    let state = Arc::new(AppState {
        db,
        config: config.clone(),
    });

    // 4. Routing
    let app = Router::<Arc<AppState>>::new()
        .route("/api/health", get(health))
        .nest("/api/expenses", expenses::handler::expenses_router(state.clone()))
        .nest("/api/budgets", budgets::handler::budgets_router(state.clone()))
        .nest("/api/reports", reports::handler::reports_router(state.clone()))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // 5. Start Server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    let database = match sqlx::query("SELECT 1").execute(&state.db.pool).await {
        Ok(_) => "connected",
        Err(_) => "disconnected",
    };

    Json(json!({
        "status": "ok",
        "database": database,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
