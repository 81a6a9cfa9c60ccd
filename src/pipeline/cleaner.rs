use chrono::NaiveDateTime;
use tracing::debug;

use crate::records::{CleanOrder, OrderRecord};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Default, Clone, Copy)]
pub struct CleanerStats {
    /// Orders missing one of the approval/carrier/customer delivery timestamps.
    pub dropped_missing_lifecycle: usize,
    /// Orders whose required timestamps were present but unparseable.
    pub dropped_unparseable: usize,
}

fn parse_ts(value: &Option<String>) -> Option<NaiveDateTime> {
    value
        .as_deref()
        .and_then(|s| NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).ok())
}

/// Drops orders that never completed the delivery lifecycle and parses all
/// timestamp columns into datetimes.
///
/// Orders without an approval, carrier hand-off or customer delivery
/// timestamp are cancelled or incomplete; excluding them is a business rule,
/// and it biases every downstream metric toward fulfilled orders. A required
/// timestamp that is present but unparseable also drops the row, counted
/// separately. The estimated delivery date stays optional and never drops a
/// row.
pub fn clean_orders(orders: &[OrderRecord]) -> (Vec<CleanOrder>, CleanerStats) {
    let mut stats = CleanerStats::default();
    let mut cleaned = Vec::with_capacity(orders.len());

    for order in orders {
        let has_lifecycle = [
            &order.order_approved_at,
            &order.order_delivered_carrier_date,
            &order.order_delivered_customer_date,
        ]
        .iter()
        .all(|v| v.as_deref().is_some_and(|s| !s.trim().is_empty()));

        if !has_lifecycle {
            stats.dropped_missing_lifecycle += 1;
            continue;
        }

        let purchase = parse_ts(&order.order_purchase_timestamp);
        let approved = parse_ts(&order.order_approved_at);
        let carrier = parse_ts(&order.order_delivered_carrier_date);
        let customer = parse_ts(&order.order_delivered_customer_date);

        match (purchase, approved, carrier, customer) {
            (Some(purchase), Some(approved), Some(carrier), Some(customer)) => {
                cleaned.push(CleanOrder {
                    order_id: order.order_id.clone(),
                    customer_id: order.customer_id.clone(),
                    order_status: order.order_status.clone(),
                    purchase_timestamp: purchase,
                    approved_at: approved,
                    delivered_carrier_date: carrier,
                    delivered_customer_date: customer,
                    estimated_delivery_date: parse_ts(&order.order_estimated_delivery_date),
                });
            }
            _ => {
                stats.dropped_unparseable += 1;
            }
        }
    }

    debug!(
        "Cleaner kept {} of {} orders ({} missing lifecycle, {} unparseable)",
        cleaned.len(),
        orders.len(),
        stats.dropped_missing_lifecycle,
        stats.dropped_unparseable
    );

    (cleaned, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: &str, approved: Option<&str>, carrier: Option<&str>, customer: Option<&str>) -> OrderRecord {
        OrderRecord {
            order_id: id.to_string(),
            customer_id: format!("C-{id}"),
            order_status: Some("delivered".to_string()),
            order_purchase_timestamp: Some("2017-11-03 10:00:00".to_string()),
            order_approved_at: approved.map(str::to_string),
            order_delivered_carrier_date: carrier.map(str::to_string),
            order_delivered_customer_date: customer.map(str::to_string),
            order_estimated_delivery_date: Some("2017-11-20 00:00:00".to_string()),
        }
    }

    #[test]
    fn drops_orders_missing_any_lifecycle_timestamp() {
        let orders = vec![
            order(
                "O1",
                Some("2017-11-03 10:05:00"),
                Some("2017-11-04 08:00:00"),
                Some("2017-11-08 14:30:00"),
            ),
            order("O2", None, Some("2017-11-04 08:00:00"), Some("2017-11-08 14:30:00")),
            order("O3", Some("2017-11-03 10:05:00"), None, Some("2017-11-08 14:30:00")),
            order("O4", Some("2017-11-03 10:05:00"), Some("2017-11-04 08:00:00"), None),
        ];

        let (cleaned, stats) = clean_orders(&orders);
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].order_id, "O1");
        assert_eq!(stats.dropped_missing_lifecycle, 3);
        assert_eq!(stats.dropped_unparseable, 0);
    }

    #[test]
    fn parses_all_timestamps_as_datetimes() {
        let orders = vec![order(
            "O1",
            Some("2017-11-03 10:05:00"),
            Some("2017-11-04 08:00:00"),
            Some("2017-11-08 14:30:00"),
        )];

        let (cleaned, _) = clean_orders(&orders);
        let o = &cleaned[0];
        assert_eq!(o.purchase_timestamp.to_string(), "2017-11-03 10:00:00");
        assert_eq!(o.approved_at.to_string(), "2017-11-03 10:05:00");
        assert_eq!(o.delivered_carrier_date.to_string(), "2017-11-04 08:00:00");
        assert_eq!(o.delivered_customer_date.to_string(), "2017-11-08 14:30:00");
        assert!(o.estimated_delivery_date.is_some());
    }

    #[test]
    fn unparseable_required_timestamp_drops_the_row() {
        let orders = vec![order(
            "O1",
            Some("yesterday"),
            Some("2017-11-04 08:00:00"),
            Some("2017-11-08 14:30:00"),
        )];

        let (cleaned, stats) = clean_orders(&orders);
        assert!(cleaned.is_empty());
        assert_eq!(stats.dropped_unparseable, 1);
    }

    #[test]
    fn missing_estimate_is_tolerated() {
        let mut o = order(
            "O1",
            Some("2017-11-03 10:05:00"),
            Some("2017-11-04 08:00:00"),
            Some("2017-11-08 14:30:00"),
        );
        o.order_estimated_delivery_date = None;

        let (cleaned, stats) = clean_orders(&[o]);
        assert_eq!(cleaned.len(), 1);
        assert!(cleaned[0].estimated_delivery_date.is_none());
        assert_eq!(stats.dropped_missing_lifecycle, 0);
    }
}
