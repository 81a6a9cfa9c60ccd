use anyhow::Result;

use crate::pipeline::DashboardData;

/// Renders a static HTML dashboard page: metric cards, monthly trend and
/// quarterly volume tables, the top-N category ranking and repeat-buyer
/// stats.
pub fn render(data: &DashboardData, top_n: usize, title: &str) -> Result<String> {
    let handlebars = crate::common::get_handlebars();
    let context = super::dashboard_context(data, top_n, title);
    let res = handlebars.render_template(&get_template(), &context)?;
    Ok(res)
}

pub fn get_template() -> String {
    let template = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{title}}</title>
<style>
  body { font-family: sans-serif; margin: 2rem; color: #2c3e50; }
  .cards { display: flex; gap: 1rem; }
  .card { border: 1px solid #ddd; border-radius: 6px; padding: 1rem 2rem; }
  .card .value { font-size: 1.6rem; font-weight: bold; }
  table { border-collapse: collapse; margin: 1rem 0; }
  th, td { border: 1px solid #ddd; padding: 0.3rem 0.8rem; text-align: right; }
  th:first-child, td:first-child { text-align: left; }
</style>
</head>
<body>
<h1>{{title}}</h1>

<div class="cards">
  <div class="card"><div>Total Revenue (Payment)</div><div class="value">{{money summary.total_revenue}}</div></div>
  <div class="card"><div>Total Orders</div><div class="value">{{count summary.total_orders}}</div></div>
  <div class="card"><div>Unique Customers</div><div class="value">{{count summary.unique_customers}}</div></div>
</div>

<h2>Monthly Order Volume</h2>
<p>Mean per month: {{fixed1 monthly_mean}}</p>
<table>
  <tr><th>Month</th><th>Orders</th></tr>
  {{#each monthly_orders as |row|}}
  <tr><td>{{row.month}}</td><td>{{count row.orders}}</td></tr>
  {{/each}}
</table>

<h2>Monthly Revenue</h2>
<table>
  <tr><th>Month</th><th>Revenue</th></tr>
  {{#each monthly_revenue as |row|}}
  <tr><td>{{row.month}}</td><td>{{money row.revenue}}</td></tr>
  {{/each}}
</table>

<h2>Order Volume per Quarter</h2>
<table>
  <tr><th>Year</th><th>Quarter</th><th>Orders</th></tr>
  {{#each quarterly as |row|}}
  <tr><td>{{row.year}}</td><td>{{row.quarter}}</td><td>{{count row.orders}}</td></tr>
  {{/each}}
</table>

<h2>Top Product Categories</h2>
<table>
  <tr><th>Category</th><th>Orders</th></tr>
  {{#each categories as |row|}}
  <tr><td>{{row.category}}</td><td>{{count row.orders}}</td></tr>
  {{/each}}
</table>

<h2>Revenue Breakdown</h2>
<p>Item price total: {{money revenue_breakdown.item_price_total}};
payment total (once per order): {{money revenue_breakdown.payment_total}}.</p>

<h2>Repeat Buyers</h2>
<p>{{count repeat.repeat_customers}} customers placed more than one order
({{pct repeat.repeat_rate_pct}} of {{count repeat.total_customer_entries}} customer entries).</p>

</body>
</html>
"##;

    template.to_string()
}
