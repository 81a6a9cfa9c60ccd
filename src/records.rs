use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::pipeline::features::CalendarFeatures;

// Raw record types, one per source CSV. Field names match the dataset column
// headers so the csv crate can deserialize by header. Columns that may be
// empty or malformed in the extracts are `Option<_>`; they flow through the
// pipeline as nulls and are resolved or dropped at the stage that needs them.

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CustomerRecord {
    pub customer_id: String,
    pub customer_unique_id: String,
    pub customer_zip_code_prefix: Option<String>,
    pub customer_city: Option<String>,
    pub customer_state: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderRecord {
    pub order_id: String,
    pub customer_id: String,
    pub order_status: Option<String>,
    pub order_purchase_timestamp: Option<String>,
    pub order_approved_at: Option<String>,
    pub order_delivered_carrier_date: Option<String>,
    pub order_delivered_customer_date: Option<String>,
    pub order_estimated_delivery_date: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderItemRecord {
    pub order_id: String,
    pub order_item_id: u32,
    pub product_id: String,
    pub seller_id: Option<String>,
    pub price: Option<f64>,
    pub freight_value: Option<f64>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PaymentRecord {
    pub order_id: String,
    pub payment_sequential: Option<u32>,
    pub payment_type: Option<String>,
    pub payment_installments: Option<u32>,
    /// Nullable at parse level; a null value contributes zero to the order's
    /// aggregate but still marks the order as paid.
    pub payment_value: Option<f64>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ProductRecord {
    pub product_id: String,
    pub product_category_name: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CategoryTranslation {
    pub product_category_name: String,
    pub product_category_name_english: String,
}

/// An order that survived the cleaner: all four lifecycle timestamps are
/// parsed, non-null datetimes. The estimated delivery date is informational
/// and stays optional.
#[derive(Serialize, Clone, Debug)]
pub struct CleanOrder {
    pub order_id: String,
    pub customer_id: String,
    pub order_status: Option<String>,
    pub purchase_timestamp: NaiveDateTime,
    pub approved_at: NaiveDateTime,
    pub delivered_carrier_date: NaiveDateTime,
    pub delivered_customer_date: NaiveDateTime,
    pub estimated_delivery_date: Option<NaiveDateTime>,
}

/// One row of the canonical order-level table (OrdersMain): a cleaned order
/// with its customer attributes, the summed payment total and the calendar
/// features derived from the purchase timestamp.
///
/// Customer attributes are optional: an order whose customer never resolves
/// keeps its row with null customer fields rather than being dropped.
#[derive(Serialize, Clone, Debug)]
pub struct OrderRow {
    pub order_id: String,
    pub customer_id: String,
    pub customer_unique_id: Option<String>,
    pub customer_city: Option<String>,
    pub customer_state: Option<String>,
    pub purchase_timestamp: NaiveDateTime,
    pub approved_at: NaiveDateTime,
    pub delivered_carrier_date: NaiveDateTime,
    pub delivered_customer_date: NaiveDateTime,
    pub estimated_delivery_date: Option<NaiveDateTime>,
    pub payment_value: f64,
    #[serde(flatten)]
    pub calendar: CalendarFeatures,
}

/// One row of the canonical item-level table (FullItems): a line item whose
/// order qualifies for OrdersMain, with the order-level fields duplicated
/// across the fan-out. English category and price are non-null by
/// construction.
#[derive(Serialize, Clone, Debug)]
pub struct ItemRow {
    pub order_id: String,
    pub order_item_id: u32,
    pub product_id: String,
    pub product_category_name_english: String,
    pub price: f64,
    pub freight_value: Option<f64>,
    pub customer_unique_id: Option<String>,
    pub purchase_timestamp: NaiveDateTime,
    pub payment_value: f64,
    #[serde(flatten)]
    pub calendar: CalendarFeatures,
}
