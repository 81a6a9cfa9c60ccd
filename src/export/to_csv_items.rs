use anyhow::Result;
use csv::Writer;

use crate::pipeline::DashboardData;

/// Renders the FullItems table as CSV, one row per line item.
pub fn render(data: &DashboardData) -> Result<String> {
    let mut wtr = Writer::from_writer(vec![]);

    wtr.write_record([
        "order_id",
        "order_item_id",
        "product_id",
        "product_category_name_english",
        "price",
        "freight_value",
        "customer_unique_id",
        "order_purchase_timestamp",
        "payment_value",
        "order_purchase_year",
        "order_purchase_quarter",
        "order_purchase_month_year",
    ])?;

    for row in &data.full_items {
        wtr.write_record([
            row.order_id.clone(),
            row.order_item_id.to_string(),
            row.product_id.clone(),
            row.product_category_name_english.clone(),
            format!("{:.2}", row.price),
            row.freight_value
                .map(|v| format!("{v:.2}"))
                .unwrap_or_default(),
            row.customer_unique_id.clone().unwrap_or_default(),
            row.purchase_timestamp.to_string(),
            format!("{:.2}", row.payment_value),
            row.calendar.year.to_string(),
            row.calendar.quarter.to_string(),
            row.calendar.month_year.to_string(),
        ])?;
    }

    let csv_string = String::from_utf8(wtr.into_inner()?)?;
    Ok(csv_string)
}
