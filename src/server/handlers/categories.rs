use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

use super::FilterParams;
use crate::analytics;
use crate::server::app::AppState;

const DEFAULT_TOP_N: usize = 10;

/// Top-N product categories by distinct order count over the filtered item
/// view.
pub async fn top_categories(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Value>, StatusCode> {
    let filter = params.view_filter(&state.data.orders_main)?;
    let items = analytics::filter_items(&state.data.full_items, &filter);
    let top_n = params.top_n.unwrap_or(DEFAULT_TOP_N);

    Ok(Json(json!({
        "categories": analytics::top_categories(&items, top_n)
            .iter()
            .map(|(category, orders)| json!({"category": category, "orders": orders}))
            .collect::<Vec<_>>(),
    })))
}
