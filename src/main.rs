use std::env;

use energy_advisor::app;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    let dotenv_result = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "energy_advisor=info,tower_http=info".into()),
        )
        .with(JsonStorageLayer)
        .with(BunyanFormattingLayer::new(
            "energy-advisor".into(),
            std::io::stdout,
        ))
        .init();

    match dotenv_result {
        Ok(path) => info!(path = %path.display(), "Loaded environment file"),
        Err(e) if e.not_found() => {}
        Err(e) => error!(error = %e, "Failed to load .env file, later entries are ignored"),
    }

    let database_url = env::var("DATABASE_URL").expect("Env variable `DATABASE_URL` should be set");
    let db_pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!()
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");

    let addr = env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listener");
    info!(%addr, "Server starting");

    axum::serve(listener, app(db_pool).into_make_service())
        .await
        .expect("Server error");
}
