use std::sync::Arc;

use anyhow::Result;
use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use super::handlers::{categories, customers, health, summary, trends};
use crate::pipeline::DashboardData;

#[derive(Clone)]
pub struct AppState {
    pub data: Arc<DashboardData>,
}

pub fn create_app(data: Arc<DashboardData>, cors_origin: Option<&str>) -> Result<Router> {
    let state = AppState { data };

    let cors = match cors_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<axum::http::HeaderValue>()?)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    let app = Router::new()
        // Health check endpoint
        .route("/health", get(health::health_check))
        // API v1 routes
        .nest("/api/v1", api_v1_routes())
        // Add middleware
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state);

    Ok(app)
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .route("/summary", get(summary::get_summary))
        .route("/revenue", get(summary::get_revenue))
        .route("/trends/monthly-orders", get(trends::monthly_orders))
        .route("/trends/monthly-revenue", get(trends::monthly_revenue))
        .route("/orders/quarterly", get(trends::quarterly_volume))
        .route("/categories", get(categories::top_categories))
        .route("/customers/repeat", get(customers::repeat_buyers))
}
