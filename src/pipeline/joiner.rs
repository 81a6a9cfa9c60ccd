use std::collections::HashMap;

use tracing::debug;

use crate::pipeline::features::CalendarFeatures;
use crate::records::{
    CategoryTranslation, CleanOrder, CustomerRecord, ItemRow, OrderItemRecord, OrderRow,
    PaymentRecord, ProductRecord,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct JoinStats {
    /// Cleaned orders with no payment aggregate; dropped from OrdersMain.
    pub orders_without_payment: usize,
    /// Items whose order did not qualify for OrdersMain; they never fan out.
    pub items_without_order: usize,
    /// Items dropped for a null English category or a null price.
    pub items_missing_category_or_price: usize,
}

/// Sums payment values per order. One entry per order id; an order with zero
/// payment rows is absent from the map, never zero-filled. A payment row with
/// a null value adds zero but still creates the order's entry, so an order
/// whose only payment rows carry null values keeps a total of 0.0.
pub fn aggregate_payments(payments: &[PaymentRecord]) -> HashMap<String, f64> {
    let mut totals: HashMap<String, f64> = HashMap::new();
    for payment in payments {
        *totals.entry(payment.order_id.clone()).or_insert(0.0) +=
            payment.payment_value.unwrap_or(0.0);
    }
    debug!(
        "Aggregated {} payment rows into {} order totals",
        payments.len(),
        totals.len()
    );
    totals
}

/// Builds OrdersMain: cleaned orders joined with customers and the payment
/// aggregate, then enriched with calendar features.
///
/// The customer join is a left join. An unresolved customer leaves the
/// customer fields null; it never drops the order. The payment join is what
/// enforces "every row has a payment total": orders whose payments never
/// resolved are dropped here.
pub fn build_orders_main(
    orders: &[CleanOrder],
    customers: &[CustomerRecord],
    payment_totals: &HashMap<String, f64>,
) -> (Vec<OrderRow>, usize) {
    let customers_by_id: HashMap<&str, &CustomerRecord> = customers
        .iter()
        .map(|c| (c.customer_id.as_str(), c))
        .collect();

    let mut rows = Vec::with_capacity(orders.len());
    let mut without_payment = 0usize;

    for order in orders {
        let Some(&payment_value) = payment_totals.get(&order.order_id) else {
            without_payment += 1;
            continue;
        };

        let customer = customers_by_id.get(order.customer_id.as_str());
        rows.push(OrderRow {
            order_id: order.order_id.clone(),
            customer_id: order.customer_id.clone(),
            customer_unique_id: customer.map(|c| c.customer_unique_id.clone()),
            customer_city: customer.and_then(|c| c.customer_city.clone()),
            customer_state: customer.and_then(|c| c.customer_state.clone()),
            purchase_timestamp: order.purchase_timestamp,
            approved_at: order.approved_at,
            delivered_carrier_date: order.delivered_carrier_date,
            delivered_customer_date: order.delivered_customer_date,
            estimated_delivery_date: order.estimated_delivery_date,
            payment_value,
            calendar: CalendarFeatures::derive(order.purchase_timestamp),
        });
    }

    (rows, without_payment)
}

/// Builds FullItems by fanning each OrdersMain row out into one row per line
/// item.
///
/// Products are first joined with the category translation table (left join;
/// untranslated categories stay null). Items then resolve their product, and
/// only items whose order qualifies for OrdersMain survive the fan-out.
/// Finally, rows with a null English category or a null price are dropped:
/// those items are excluded from product/category analysis by design.
///
/// Payment values were aggregated before this fan-out, so `payment_value`
/// stays correct at order granularity and is merely duplicated across an
/// order's items.
pub fn build_full_items(
    orders_main: &[OrderRow],
    items: &[OrderItemRecord],
    products: &[ProductRecord],
    translations: &[CategoryTranslation],
) -> (Vec<ItemRow>, JoinStats) {
    let english_by_category: HashMap<&str, &str> = translations
        .iter()
        .map(|t| {
            (
                t.product_category_name.as_str(),
                t.product_category_name_english.as_str(),
            )
        })
        .collect();

    // products + translations: adds a nullable English category per product
    let category_by_product: HashMap<&str, Option<&str>> = products
        .iter()
        .map(|p| {
            let english = p
                .product_category_name
                .as_deref()
                .and_then(|name| english_by_category.get(name).copied());
            (p.product_id.as_str(), english)
        })
        .collect();

    let orders_by_id: HashMap<&str, &OrderRow> = orders_main
        .iter()
        .map(|o| (o.order_id.as_str(), o))
        .collect();

    let mut stats = JoinStats::default();
    let mut rows = Vec::with_capacity(items.len());

    for item in items {
        let Some(&order) = orders_by_id.get(item.order_id.as_str()) else {
            stats.items_without_order += 1;
            continue;
        };

        let english = category_by_product
            .get(item.product_id.as_str())
            .copied()
            .flatten();

        let (Some(english), Some(price)) = (english, item.price) else {
            stats.items_missing_category_or_price += 1;
            continue;
        };

        rows.push(ItemRow {
            order_id: item.order_id.clone(),
            order_item_id: item.order_item_id,
            product_id: item.product_id.clone(),
            product_category_name_english: english.to_string(),
            price,
            freight_value: item.freight_value,
            customer_unique_id: order.customer_unique_id.clone(),
            purchase_timestamp: order.purchase_timestamp,
            payment_value: order.payment_value,
            calendar: order.calendar.clone(),
        });
    }

    (rows, stats)
}
