use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::DataConfig;
use crate::errors::PipelineError;
use crate::records::{
    CategoryTranslation, CustomerRecord, OrderItemRecord, OrderRecord, PaymentRecord,
    ProductRecord,
};

/// The six raw tables, loaded as-is. No cleaning has happened yet.
#[derive(Debug)]
pub struct RawTables {
    pub customers: Vec<CustomerRecord>,
    pub orders: Vec<OrderRecord>,
    pub order_items: Vec<OrderItemRecord>,
    pub payments: Vec<PaymentRecord>,
    pub products: Vec<ProductRecord>,
    pub translations: Vec<CategoryTranslation>,
    /// Rows across all files that failed typed deserialization and were skipped.
    pub malformed_rows: usize,
}

pub fn get_headers_from_file(path: &Path) -> Result<Vec<String>, PipelineError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    if let Some(Ok(header)) = lines.next() {
        let headers: Vec<String> = header
            .split(',')
            .map(|col_name| col_name.trim().to_string())
            .collect();
        Ok(headers)
    } else {
        Err(PipelineError::MissingColumn {
            file: path.display().to_string(),
            column: "<header row>".to_string(),
        })
    }
}

/// Verifies that the columns later stages address by name are present.
/// Anything beyond that is not validated; malformed values surface as nulls
/// downstream.
pub fn verify_headers(path: &Path, required: &[&str]) -> Result<(), PipelineError> {
    let headers = get_headers_from_file(path)?;
    for &col in required {
        if !headers.iter().any(|h| h == col) {
            return Err(PipelineError::MissingColumn {
                file: path.display().to_string(),
                column: col.to_string(),
            });
        }
    }
    Ok(())
}

/// Loads one CSV into typed records. Rows that fail to deserialize are
/// skipped with a warning and counted; they never abort the load.
pub fn load_csv<T: DeserializeOwned>(path: &Path) -> Result<(Vec<T>, usize), PipelineError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|source| PipelineError::Csv {
            file: path.display().to_string(),
            source,
        })?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for row in reader.deserialize::<T>() {
        match row {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!("{}: skipping malformed row: {}", path.display(), e);
                skipped += 1;
            }
        }
    }

    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok((records, skipped))
}

/// Loads all six raw tables from `data_dir`.
///
/// Existence of every file is checked up front: if any are missing the whole
/// load fails with a single `MissingDataFiles` error naming all of them, and
/// no partial dataset is returned.
pub fn load_raw_tables(data_dir: &Path, cfg: &DataConfig) -> Result<RawTables, PipelineError> {
    let files = [
        &cfg.customers,
        &cfg.orders,
        &cfg.order_items,
        &cfg.payments,
        &cfg.products,
        &cfg.category_translation,
    ];

    let missing: Vec<String> = files
        .iter()
        .map(|name| data_dir.join(name))
        .filter(|path| !path.is_file())
        .map(|path| path.display().to_string())
        .collect();
    if !missing.is_empty() {
        return Err(PipelineError::MissingDataFiles(missing));
    }

    let customers_path = data_dir.join(&cfg.customers);
    let orders_path = data_dir.join(&cfg.orders);
    let items_path = data_dir.join(&cfg.order_items);
    let payments_path = data_dir.join(&cfg.payments);
    let products_path = data_dir.join(&cfg.products);
    let translation_path = data_dir.join(&cfg.category_translation);

    verify_headers(&customers_path, &["customer_id", "customer_unique_id"])?;
    verify_headers(
        &orders_path,
        &[
            "order_id",
            "customer_id",
            "order_purchase_timestamp",
            "order_approved_at",
            "order_delivered_carrier_date",
            "order_delivered_customer_date",
            "order_estimated_delivery_date",
        ],
    )?;
    verify_headers(&items_path, &["order_id", "product_id", "price"])?;
    verify_headers(&payments_path, &["order_id", "payment_value"])?;
    verify_headers(&products_path, &["product_id", "product_category_name"])?;
    verify_headers(
        &translation_path,
        &["product_category_name", "product_category_name_english"],
    )?;

    let mut malformed_rows = 0usize;
    let (customers, skipped) = load_csv(&customers_path)?;
    malformed_rows += skipped;
    let (orders, skipped) = load_csv(&orders_path)?;
    malformed_rows += skipped;
    let (order_items, skipped) = load_csv(&items_path)?;
    malformed_rows += skipped;
    let (payments, skipped) = load_csv(&payments_path)?;
    malformed_rows += skipped;
    let (products, skipped) = load_csv(&products_path)?;
    malformed_rows += skipped;
    let (translations, skipped) = load_csv(&translation_path)?;
    malformed_rows += skipped;

    Ok(RawTables {
        customers,
        orders,
        order_items,
        payments,
        products,
        translations,
        malformed_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_files_reported_in_one_error() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = DataConfig::default();
        let err = load_raw_tables(dir.path(), &cfg).unwrap_err();
        match err {
            PipelineError::MissingDataFiles(missing) => {
                assert_eq!(missing.len(), 6);
            }
            other => panic!("expected MissingDataFiles, got {other:?}"),
        }
    }

    #[test]
    fn malformed_rows_are_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payments.csv");
        let mut f = File::create(&path).unwrap();
        writeln!(
            f,
            "order_id,payment_sequential,payment_type,payment_installments,payment_value"
        )
        .unwrap();
        writeln!(f, "O1,1,credit_card,1,50.00").unwrap();
        writeln!(f, "O2,1,credit_card,1,not-a-number").unwrap();
        writeln!(f, "O3,1,credit_card,1,").unwrap();
        drop(f);

        let (rows, skipped) = load_csv::<PaymentRecord>(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(skipped, 1);
        assert_eq!(rows[0].order_id, "O1");
        // an empty value is a null, not a malformed row
        assert_eq!(rows[1].order_id, "O3");
        assert!(rows[1].payment_value.is_none());
    }

    #[test]
    fn header_verification_names_the_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.csv");
        let mut f = File::create(&path).unwrap();
        writeln!(f, "product_id,product_weight_g").unwrap();
        writeln!(f, "P1,200").unwrap();
        drop(f);

        let err = verify_headers(&path, &["product_id", "product_category_name"]).unwrap_err();
        match err {
            PipelineError::MissingColumn { column, .. } => {
                assert_eq!(column, "product_category_name");
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }
}
