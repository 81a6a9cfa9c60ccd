use anyhow::Result;
use csv::Writer;

use crate::pipeline::DashboardData;

/// Renders the OrdersMain table as CSV, one row per order.
pub fn render(data: &DashboardData) -> Result<String> {
    let mut wtr = Writer::from_writer(vec![]);

    wtr.write_record([
        "order_id",
        "customer_id",
        "customer_unique_id",
        "customer_city",
        "customer_state",
        "order_purchase_timestamp",
        "order_approved_at",
        "order_delivered_carrier_date",
        "order_delivered_customer_date",
        "order_estimated_delivery_date",
        "payment_value",
        "order_purchase_year",
        "order_purchase_month",
        "order_purchase_month_name",
        "order_purchase_quarter",
        "order_purchase_month_year",
    ])?;

    for row in &data.orders_main {
        wtr.write_record([
            row.order_id.clone(),
            row.customer_id.clone(),
            row.customer_unique_id.clone().unwrap_or_default(),
            row.customer_city.clone().unwrap_or_default(),
            row.customer_state.clone().unwrap_or_default(),
            row.purchase_timestamp.to_string(),
            row.approved_at.to_string(),
            row.delivered_carrier_date.to_string(),
            row.delivered_customer_date.to_string(),
            row.estimated_delivery_date
                .map(|ts| ts.to_string())
                .unwrap_or_default(),
            format!("{:.2}", row.payment_value),
            row.calendar.year.to_string(),
            row.calendar.month.to_string(),
            row.calendar.month_name.clone(),
            row.calendar.quarter.to_string(),
            row.calendar.month_year.to_string(),
        ])?;
    }

    let csv_string = String::from_utf8(wtr.into_inner()?)?;
    Ok(csv_string)
}
