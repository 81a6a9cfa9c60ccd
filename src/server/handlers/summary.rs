use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

use super::FilterParams;
use crate::analytics;
use crate::server::app::AppState;

/// Metric cards: total revenue (summed payments), distinct orders and
/// distinct customers over the filtered order view.
pub async fn get_summary(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Value>, StatusCode> {
    let filter = params.view_filter(&state.data.orders_main)?;
    let orders = analytics::filter_orders(&state.data.orders_main, &filter);

    Ok(Json(json!({
        "total_revenue": analytics::total_payment(&orders),
        "total_orders": analytics::unique_order_count(&orders),
        "unique_customers": analytics::unique_customer_count(&orders),
    })))
}

/// Revenue breakdown over the filtered item view: the line-item price sum
/// next to the payment total counted once per order.
pub async fn get_revenue(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Value>, StatusCode> {
    let filter = params.view_filter(&state.data.orders_main)?;
    let items = analytics::filter_items(&state.data.full_items, &filter);

    Ok(Json(json!({
        "item_price_total": analytics::item_price_total(&items),
        "payment_total": analytics::order_payment_total(&items),
    })))
}
