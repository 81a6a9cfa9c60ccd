pub mod categories;
pub mod customers;
pub mod health;
pub mod summary;
pub mod trends;

use std::collections::HashSet;
use std::str::FromStr;

use axum::http::StatusCode;
use serde::Deserialize;

use crate::analytics::ViewFilter;
use crate::records::OrderRow;

/// Year/quarter selection carried on the query string as comma-separated
/// lists. An absent parameter means "everything"; a present-but-empty one is
/// an empty selection (no boxes ticked) and yields empty results.
#[derive(Deserialize, Debug, Default)]
pub struct FilterParams {
    pub years: Option<String>,
    pub quarters: Option<String>,
    pub top_n: Option<usize>,
}

fn parse_list<T>(raw: &str) -> Result<HashSet<T>, StatusCode>
where
    T: FromStr + Eq + std::hash::Hash,
{
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| token.parse::<T>().map_err(|_| StatusCode::BAD_REQUEST))
        .collect()
}

impl FilterParams {
    pub fn view_filter(&self, orders: &[OrderRow]) -> Result<ViewFilter, StatusCode> {
        let years = match &self.years {
            None => orders.iter().map(|o| o.calendar.year).collect(),
            Some(raw) => parse_list(raw)?,
        };
        let quarters = match &self.quarters {
            None => orders.iter().map(|o| o.calendar.quarter).collect(),
            Some(raw) => parse_list(raw)?,
        };
        Ok(ViewFilter { years, quarters })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_params_select_everything() {
        let params = FilterParams::default();
        let filter = params.view_filter(&[]).unwrap();
        assert!(filter.years.is_empty()); // empty table, nothing to select
    }

    #[test]
    fn empty_param_is_an_empty_selection() {
        let params = FilterParams {
            years: Some(String::new()),
            quarters: Some("1,2".to_string()),
            top_n: None,
        };
        let filter = params.view_filter(&[]).unwrap();
        assert!(filter.years.is_empty());
        assert_eq!(filter.quarters.len(), 2);
    }

    #[test]
    fn bad_tokens_are_rejected() {
        let params = FilterParams {
            years: Some("2017,xyz".to_string()),
            quarters: None,
            top_n: None,
        };
        assert_eq!(
            params.view_filter(&[]).unwrap_err(),
            StatusCode::BAD_REQUEST
        );
    }
}
