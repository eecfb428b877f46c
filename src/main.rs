use anyhow::Result;
use assetbot::respond::assemble;
use assetbot::sheet::{self, LoadError, Table};
use serde::Deserialize;
use std::{env, path::PathBuf};
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};
use warp::{reject::Rejection, reply::Reply, Filter};

/// The form-encoded slash-command body. Slack sends many more fields
/// (team, channel, trigger id); only the query text matters here and a
/// missing `text` is treated the same as a blank one.
#[derive(Debug, Deserialize)]
struct SlashRequest {
    #[serde(default)]
    text: String,
}

/// Produce the table for one request: the configured CSV when
/// `ASSET_SHEET` is set, the built-in demo records otherwise. Always a
/// fresh immutable value, so concurrent requests never share state.
fn load_table() -> Result<Table, LoadError> {
    match env::var("ASSET_SHEET") {
        Ok(path) => sheet::load_csv(PathBuf::from(path)),
        Err(_) => Ok(sheet::demo_table()),
    }
}

async fn health() -> Result<impl Reply, Rejection> {
    Ok("Asset Bot is Alive!")
}

async fn asset_lookup(req: SlashRequest) -> Result<impl Reply, Rejection> {
    info!(query = %req.text.trim(), "incoming asset lookup");
    // Domain errors ride inside the payload; the HTTP status stays 200
    // or Slack drops the reply.
    Ok(warp::reply::json(&assemble(&req.text, load_table)))
}

fn routes() -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let health = warp::path::end().and(warp::get()).and_then(health);

    let asset = warp::path("asset")
        .and(warp::post())
        .and(warp::body::form())
        .and_then(asset_lookup);

    health.or(asset)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(log_level.parse().unwrap_or(Level::INFO.into())),
        )
        .init();

    info!("Starting asset lookup service");

    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .unwrap_or(3000);

    info!("Server starting on port {}", port);
    info!("Health check: http://localhost:{}/", port);
    info!("Slash command: POST http://localhost:{}/asset", port);

    warp::serve(routes()).run(([0, 0, 0, 0], port)).await;

    Ok(())
}
