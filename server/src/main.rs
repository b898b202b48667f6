//! SSR host for the EventSpark front-end.
//!
//! Loads `.env`, initialises tracing, and serves the Leptos app. The identity
//! backend is only ever called from the browser; the startup check below is
//! informational.

mod config;
mod error;
mod routes;

use config::ServerConfig;
use error::ServerError;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "server exited");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let config = ServerConfig::from_env();

    match identity::SupabaseConfig::from_env() {
        Ok(supabase) => tracing::info!(url = %supabase.url, "identity backend configured"),
        Err(e) => tracing::warn!(error = %e, "identity backend not configured in this environment"),
    }

    let app = routes::leptos_app()?;
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind { addr: addr.clone(), source })?;

    tracing::info!(%addr, "event-spark listening");
    axum::serve(listener, app).await?;
    Ok(())
}
