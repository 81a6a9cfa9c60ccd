use std::path::Path;

use serde::{Deserialize, Serialize};

/// ## Structure
/// This module contains the data structures for the dashboard plan file.
///
/// ```text
/// DashboardPlan
///   ├── meta: Option<PlanMeta>
///   │   └── name: Option<String>
///   ├── data: DataConfig
///   │   ├── dir: String            (relative to the plan file)
///   │   └── six dataset file names (defaulting to the standard extract names)
///   └── export: ExportConfig
///       └── profiles: Vec<ExportProfileItem>
///           ├── filename: String
///           ├── exporter: ExportFileType (Html | CsvOrders | CsvItems | Json)
///           └── top_categories: Option<usize>
/// ```

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct DashboardPlan {
    #[serde(default)]
    pub meta: Option<PlanMeta>,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct PlanMeta {
    pub name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub dir: String,
    #[serde(default = "default_customers")]
    pub customers: String,
    #[serde(default = "default_orders")]
    pub orders: String,
    #[serde(default = "default_order_items")]
    pub order_items: String,
    #[serde(default = "default_payments")]
    pub payments: String,
    #[serde(default = "default_products")]
    pub products: String,
    #[serde(default = "default_category_translation")]
    pub category_translation: String,
}

fn default_data_dir() -> String {
    "data".to_string()
}
fn default_customers() -> String {
    "customers_dataset.csv".to_string()
}
fn default_orders() -> String {
    "orders_dataset.csv".to_string()
}
fn default_order_items() -> String {
    "order_items_dataset.csv".to_string()
}
fn default_payments() -> String {
    "order_payments_dataset.csv".to_string()
}
fn default_products() -> String {
    "products_dataset.csv".to_string()
}
fn default_category_translation() -> String {
    "product_category_name_translation.csv".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            customers: default_customers(),
            orders: default_orders(),
            order_items: default_order_items(),
            payments: default_payments(),
            products: default_products(),
            category_translation: default_category_translation(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ExportConfig {
    pub profiles: Vec<ExportProfileItem>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ExportProfileItem {
    pub filename: String,
    pub exporter: ExportFileType,
    /// Category limit for renderers that show a top-N table.
    #[serde(default)]
    pub top_categories: Option<usize>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub enum ExportFileType {
    Html,
    CsvOrders,
    CsvItems,
    Json,
}

impl DashboardPlan {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let plan: DashboardPlan = serde_yaml::from_str(&content)?;
        Ok(plan)
    }

    /// Plan written by `init`: standard file names, one export of each kind.
    pub fn sample() -> Self {
        Self {
            meta: Some(PlanMeta {
                name: Some("E-Commerce Dashboard".to_string()),
            }),
            data: DataConfig::default(),
            export: ExportConfig {
                profiles: vec![
                    ExportProfileItem {
                        filename: "dashboard.html".to_string(),
                        exporter: ExportFileType::Html,
                        top_categories: Some(10),
                    },
                    ExportProfileItem {
                        filename: "orders_main.csv".to_string(),
                        exporter: ExportFileType::CsvOrders,
                        top_categories: None,
                    },
                    ExportProfileItem {
                        filename: "full_items.csv".to_string(),
                        exporter: ExportFileType::CsvItems,
                        top_categories: None,
                    },
                ],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization() {
        let config = ExportConfig {
            profiles: vec![ExportProfileItem {
                filename: "dashboard.html".to_string(),
                exporter: ExportFileType::Html,
                top_categories: Some(10),
            }],
        };

        let yaml_str = serde_yaml::to_string(&config).unwrap();
        assert!(yaml_str.contains("profiles"));
        assert!(yaml_str.contains("Html"));
    }

    #[test]
    fn test_deserialization_with_defaults() {
        let yaml_str = r#"
data:
  dir: ./data
"#;

        let plan: DashboardPlan = serde_yaml::from_str(yaml_str).unwrap();
        assert_eq!(plan.data.dir, "./data");
        assert_eq!(plan.data.customers, "customers_dataset.csv");
        assert_eq!(plan.data.orders, "orders_dataset.csv");
        assert_eq!(
            plan.data.category_translation,
            "product_category_name_translation.csv"
        );
        assert!(plan.export.profiles.is_empty());
    }

    #[test]
    fn test_planfile_deserialization() {
        let yaml_str = r#"
meta:
  name: Store analytics
data:
  dir: data
export:
  profiles:
    - filename: dashboard.html
      exporter: Html
      top_categories: 15
    - filename: orders_main.csv
      exporter: CsvOrders
    - filename: full_items.csv
      exporter: CsvItems
    - filename: summary.json
      exporter: Json
"#;

        let plan: DashboardPlan = serde_yaml::from_str(yaml_str).unwrap();
        assert_eq!(plan.export.profiles.len(), 4);
        assert_eq!(plan.export.profiles[0].top_categories, Some(15));
    }
}
