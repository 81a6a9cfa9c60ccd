pub mod app;
pub mod handlers;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::pipeline::DashboardData;

/// Starts the read-only dashboard API. The tables are built once before the
/// listener comes up; every request shares the same immutable `Arc`.
pub async fn start_server(
    port: u16,
    data: Arc<DashboardData>,
    cors_origin: Option<&str>,
) -> Result<()> {
    let app = app::create_app(data, cors_origin)?;

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Dashboard API listening on port {}", port);
    axum::serve(listener, app).await?;
    Ok(())
}
