use anyhow::Result;

use crate::pipeline::DashboardData;

/// Renders the summary context as pretty JSON for external chart consumers.
pub fn render(data: &DashboardData, top_n: usize, title: &str) -> Result<String> {
    let context = super::dashboard_context(data, top_n, title);
    Ok(serde_json::to_string_pretty(&context)?)
}
