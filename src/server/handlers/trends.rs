use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

use super::FilterParams;
use crate::analytics::{self, ViewFilter};
use crate::server::app::AppState;

/// All-time monthly order counts with the all-time mean. Deliberately
/// unfiltered: the trend panel shows the whole series regardless of the
/// sidebar selection.
pub async fn monthly_orders(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let filter = ViewFilter::all(&state.data.orders_main);
    let orders = analytics::filter_orders(&state.data.orders_main, &filter);
    let buckets = analytics::orders_per_month(&orders);
    let mean = analytics::mean_monthly_orders(&buckets);

    Ok(Json(json!({
        "months": buckets
            .iter()
            .map(|(month, orders)| json!({"month": month.to_string(), "orders": orders}))
            .collect::<Vec<_>>(),
        "mean": mean,
    })))
}

/// Monthly revenue over the filtered order view.
pub async fn monthly_revenue(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Value>, StatusCode> {
    let filter = params.view_filter(&state.data.orders_main)?;
    let orders = analytics::filter_orders(&state.data.orders_main, &filter);
    let buckets = analytics::revenue_per_month(&orders);

    Ok(Json(json!({
        "months": buckets
            .iter()
            .map(|(month, revenue)| json!({"month": month.to_string(), "revenue": revenue}))
            .collect::<Vec<_>>(),
    })))
}

/// Distinct order volume per (year, quarter) over the filtered view.
pub async fn quarterly_volume(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Value>, StatusCode> {
    let filter = params.view_filter(&state.data.orders_main)?;
    let orders = analytics::filter_orders(&state.data.orders_main, &filter);

    Ok(Json(json!({
        "quarters": analytics::quarterly_order_volume(&orders)
            .iter()
            .map(|((year, quarter), orders)| {
                json!({"year": year, "quarter": quarter, "orders": orders})
            })
            .collect::<Vec<_>>(),
    })))
}
