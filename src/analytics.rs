use std::collections::{BTreeMap, HashSet};

use indexmap::IndexMap;
use serde::Serialize;

use crate::pipeline::features::{CalendarFeatures, YearMonth};
use crate::records::{ItemRow, OrderRow};

/// Year/quarter selection applied to the analytical tables. Filtering
/// produces borrowed views; the base tables are never mutated.
///
/// An empty set in either dimension selects nothing, matching a dashboard
/// with no boxes ticked: downstream metrics degrade to zero totals and empty
/// series rather than erroring.
#[derive(Debug, Clone)]
pub struct ViewFilter {
    pub years: HashSet<i32>,
    pub quarters: HashSet<u32>,
}

impl ViewFilter {
    pub fn new(years: impl IntoIterator<Item = i32>, quarters: impl IntoIterator<Item = u32>) -> Self {
        Self {
            years: years.into_iter().collect(),
            quarters: quarters.into_iter().collect(),
        }
    }

    /// Selects every year and quarter present in the table — the dashboard's
    /// default state with all options ticked.
    pub fn all(orders: &[OrderRow]) -> Self {
        Self {
            years: orders.iter().map(|o| o.calendar.year).collect(),
            quarters: orders.iter().map(|o| o.calendar.quarter).collect(),
        }
    }

    pub fn matches(&self, calendar: &CalendarFeatures) -> bool {
        self.years.contains(&calendar.year) && self.quarters.contains(&calendar.quarter)
    }
}

pub fn filter_orders<'a>(orders: &'a [OrderRow], filter: &ViewFilter) -> Vec<&'a OrderRow> {
    orders.iter().filter(|o| filter.matches(&o.calendar)).collect()
}

pub fn filter_items<'a>(items: &'a [ItemRow], filter: &ViewFilter) -> Vec<&'a ItemRow> {
    items.iter().filter(|i| filter.matches(&i.calendar)).collect()
}

pub fn total_payment(orders: &[&OrderRow]) -> f64 {
    orders.iter().map(|o| o.payment_value).sum()
}

pub fn unique_order_count(orders: &[&OrderRow]) -> usize {
    orders
        .iter()
        .map(|o| o.order_id.as_str())
        .collect::<HashSet<_>>()
        .len()
}

pub fn unique_customer_count(orders: &[&OrderRow]) -> usize {
    orders
        .iter()
        .filter_map(|o| o.customer_unique_id.as_deref())
        .collect::<HashSet<_>>()
        .len()
}

/// Inserts a zero entry for every calendar month between the first and last
/// bucket, so a trend series covers the whole span including months with no
/// orders.
fn fill_gap_months<V: Copy>(buckets: &mut BTreeMap<YearMonth, V>, zero: V) {
    let Some((&first, _)) = buckets.first_key_value() else {
        return;
    };
    let Some((&last, _)) = buckets.last_key_value() else {
        return;
    };

    let mut month = first;
    while month < last {
        buckets.entry(month).or_insert(zero);
        month = month.next();
    }
}

/// Order counts per calendar month, chronological, with gap months
/// zero-filled. The mean over these buckets therefore counts empty months.
pub fn orders_per_month(orders: &[&OrderRow]) -> BTreeMap<YearMonth, usize> {
    let mut buckets = BTreeMap::new();
    for order in orders {
        *buckets.entry(order.calendar.month_year).or_insert(0) += 1;
    }
    fill_gap_months(&mut buckets, 0);
    buckets
}

pub fn revenue_per_month(orders: &[&OrderRow]) -> BTreeMap<YearMonth, f64> {
    let mut buckets = BTreeMap::new();
    for order in orders {
        *buckets.entry(order.calendar.month_year).or_insert(0.0) += order.payment_value;
    }
    fill_gap_months(&mut buckets, 0.0);
    buckets
}

pub fn mean_monthly_orders(buckets: &BTreeMap<YearMonth, usize>) -> f64 {
    if buckets.is_empty() {
        return 0.0;
    }
    buckets.values().sum::<usize>() as f64 / buckets.len() as f64
}

/// Distinct order volume per (year, quarter), chronological.
pub fn quarterly_order_volume(orders: &[&OrderRow]) -> BTreeMap<(i32, u32), usize> {
    let mut sets: BTreeMap<(i32, u32), HashSet<&str>> = BTreeMap::new();
    for order in orders {
        sets.entry((order.calendar.year, order.calendar.quarter))
            .or_default()
            .insert(order.order_id.as_str());
    }
    sets.into_iter().map(|(k, v)| (k, v.len())).collect()
}

/// Distinct orders per English category, most-ordered first. Accumulation
/// uses an IndexMap so ties keep a deterministic first-seen order.
pub fn orders_by_category(items: &[&ItemRow]) -> Vec<(String, usize)> {
    let mut sets: IndexMap<&str, HashSet<&str>> = IndexMap::new();
    for item in items {
        sets.entry(item.product_category_name_english.as_str())
            .or_default()
            .insert(item.order_id.as_str());
    }

    let mut counts: Vec<(String, usize)> = sets
        .into_iter()
        .map(|(category, orders)| (category.to_string(), orders.len()))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

pub fn top_categories(items: &[&ItemRow], n: usize) -> Vec<(String, usize)> {
    let mut counts = orders_by_category(items);
    counts.truncate(n);
    counts
}

/// Sum of line-item prices over an item view.
pub fn item_price_total(items: &[&ItemRow]) -> f64 {
    items.iter().map(|i| i.price).sum()
}

/// Payment total over an item view, counted once per distinct order. The
/// fan-out duplicates `payment_value` across an order's items, so a plain sum
/// would overcount multi-item orders.
pub fn order_payment_total(items: &[&ItemRow]) -> f64 {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|i| seen.insert(i.order_id.as_str()))
        .map(|i| i.payment_value)
        .sum()
}

#[derive(Serialize, Debug, Clone, Copy)]
pub struct RepeatBuyerStats {
    pub repeat_customers: usize,
    pub total_customer_entries: usize,
    pub repeat_rate_pct: f64,
}

/// Repeat buyers over the full (unfiltered) OrdersMain table: customers whose
/// unique id carries more than one distinct order. The rate denominator is
/// the raw customer table row count, matching the source dashboard's
/// calculation.
pub fn repeat_buyers(orders: &[OrderRow], total_customer_entries: usize) -> RepeatBuyerStats {
    let mut orders_per_customer: IndexMap<&str, HashSet<&str>> = IndexMap::new();
    for order in orders {
        if let Some(unique_id) = order.customer_unique_id.as_deref() {
            orders_per_customer
                .entry(unique_id)
                .or_default()
                .insert(order.order_id.as_str());
        }
    }

    let repeat_customers = orders_per_customer
        .values()
        .filter(|orders| orders.len() > 1)
        .count();

    let repeat_rate_pct = if total_customer_entries == 0 {
        0.0
    } else {
        repeat_customers as f64 / total_customer_entries as f64 * 100.0
    };

    RepeatBuyerStats {
        repeat_customers,
        total_customer_entries,
        repeat_rate_pct,
    }
}
