pub mod to_csv_items;
pub mod to_csv_orders;
pub mod to_html;
pub mod to_json;

use anyhow::Result;
use serde_json::{json, Value};

use crate::analytics::{self, ViewFilter};
use crate::config::{ExportFileType, ExportProfileItem};
use crate::pipeline::DashboardData;

const DEFAULT_TOP_CATEGORIES: usize = 10;

/// Renders one export profile to a string; the caller decides where it goes.
pub fn render(data: &DashboardData, profile: &ExportProfileItem, title: &str) -> Result<String> {
    let top_n = profile.top_categories.unwrap_or(DEFAULT_TOP_CATEGORIES);
    match profile.exporter {
        ExportFileType::Html => to_html::render(data, top_n, title),
        ExportFileType::CsvOrders => to_csv_orders::render(data),
        ExportFileType::CsvItems => to_csv_items::render(data),
        ExportFileType::Json => to_json::render(data, top_n, title),
    }
}

/// Shared template context for the summary-style renderers: metric cards,
/// monthly trends, quarterly volumes, category ranking, revenue breakdown and
/// repeat-buyer stats, all computed over the full tables (no filter applied).
pub(crate) fn dashboard_context(data: &DashboardData, top_n: usize, title: &str) -> Value {
    let filter = ViewFilter::all(&data.orders_main);
    let orders = analytics::filter_orders(&data.orders_main, &filter);
    let items = analytics::filter_items(&data.full_items, &filter);

    let monthly_orders = analytics::orders_per_month(&orders);
    let monthly_mean = analytics::mean_monthly_orders(&monthly_orders);
    let monthly_revenue = analytics::revenue_per_month(&orders);
    let repeat = analytics::repeat_buyers(&data.orders_main, data.customers.len());

    json!({
        "title": title,
        "summary": {
            "total_revenue": analytics::total_payment(&orders),
            "total_orders": analytics::unique_order_count(&orders),
            "unique_customers": analytics::unique_customer_count(&orders),
        },
        "monthly_orders": monthly_orders
            .iter()
            .map(|(month, orders)| json!({"month": month.to_string(), "orders": orders}))
            .collect::<Vec<_>>(),
        "monthly_mean": monthly_mean,
        "monthly_revenue": monthly_revenue
            .iter()
            .map(|(month, revenue)| json!({"month": month.to_string(), "revenue": revenue}))
            .collect::<Vec<_>>(),
        "quarterly": analytics::quarterly_order_volume(&orders)
            .iter()
            .map(|((year, quarter), orders)| {
                json!({"year": year, "quarter": format!("Q{quarter}"), "orders": orders})
            })
            .collect::<Vec<_>>(),
        "categories": analytics::top_categories(&items, top_n)
            .iter()
            .map(|(category, orders)| json!({"category": category, "orders": orders}))
            .collect::<Vec<_>>(),
        "revenue_breakdown": {
            "item_price_total": analytics::item_price_total(&items),
            "payment_total": analytics::order_payment_total(&items),
        },
        "repeat": repeat,
    })
}
