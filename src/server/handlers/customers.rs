use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::analytics;
use crate::server::app::AppState;

/// Repeat-buyer stats over the full OrdersMain table. Unfiltered by design:
/// repeat behavior is measured across the whole history, with the raw
/// customer table row count as the rate denominator.
pub async fn repeat_buyers(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let stats = analytics::repeat_buyers(&state.data.orders_main, state.data.customers.len());
    Ok(Json(json!(stats)))
}
