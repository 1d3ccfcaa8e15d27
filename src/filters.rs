// src/filters.rs
//
// Query-string filters -> parameterized WHERE fragment for `public.sales`.

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

/// A filterable categorical column and the `SalesFilter` field feeding it.
pub struct FilterColumn {
    pub column: &'static str,
    pub value: fn(&SalesFilter) -> Option<&str>,
}

/// Order here is the order conditions are emitted in.
pub const CATEGORY_COLUMNS: [FilterColumn; 5] = [
    FilterColumn { column: "region", value: |f| f.region.as_deref() },
    FilterColumn { column: "product", value: |f| f.product.as_deref() },
    FilterColumn { column: "category", value: |f| f.category.as_deref() },
    FilterColumn { column: "channel", value: |f| f.channel.as_deref() },
    FilterColumn { column: "customer_tier", value: |f| f.tier.as_deref() },
];

#[derive(Debug, Default, Clone, Deserialize)]
pub struct SalesFilter {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub region: Option<String>,
    pub product: Option<String>,
    pub category: Option<String>,
    pub channel: Option<String>,
    pub tier: Option<String>,
}

/// A positional parameter bound to `$n`.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    TextList(Vec<String>),
    Date(NaiveDate),
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Predicate {
    pub fragment: String,
    pub params: Vec<FilterValue>,
}

impl Predicate {
    pub fn is_empty(&self) -> bool {
        self.fragment.is_empty()
    }

    pub fn where_clause(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.fragment)
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("invalid {param} '{value}': expected YYYY-MM-DD")]
    InvalidDate { param: &'static str, value: String },
    #[error("start_date {start} is after end_date {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

pub fn build_predicate(filter: &SalesFilter) -> Result<Predicate, FilterError> {
    let mut conditions: Vec<String> = Vec::new();
    let mut params: Vec<FilterValue> = Vec::new();

    let start = parse_date("start_date", filter.start_date.as_deref())?;
    let end = parse_date("end_date", filter.end_date.as_deref())?;
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(FilterError::InvertedRange { start, end });
        }
    }

    if let Some(d) = start {
        params.push(FilterValue::Date(d));
        conditions.push(format!("order_date >= ${}", params.len()));
    }
    if let Some(d) = end {
        params.push(FilterValue::Date(d));
        conditions.push(format!("order_date <= ${}", params.len()));
    }

    for FilterColumn { column, value } in &CATEGORY_COLUMNS {
        let mut values = split_values(value(filter));
        match values.len() {
            0 => {}
            1 => {
                params.push(FilterValue::Text(values.remove(0)));
                conditions.push(format!("{column} = ${}", params.len()));
            }
            _ => {
                params.push(FilterValue::TextList(values));
                conditions.push(format!("{column} = ANY(${})", params.len()));
            }
        }
    }

    Ok(Predicate { fragment: conditions.join(" AND "), params })
}

fn is_unset(v: &str) -> bool {
    v.is_empty() || v.eq_ignore_ascii_case("all")
}

/// Strict `YYYY-MM-DD`: chrono alone also takes `2024-1-5` and `+12024-01-01`.
fn is_iso_date_shape(v: &str) -> bool {
    v.len() == 10
        && v.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn parse_date(
    param: &'static str,
    raw: Option<&str>,
) -> Result<Option<NaiveDate>, FilterError> {
    let Some(raw) = raw.map(str::trim).filter(|v| !is_unset(v)) else {
        return Ok(None);
    };
    let invalid = || FilterError::InvalidDate { param, value: raw.to_string() };
    if !is_iso_date_shape(raw) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map(Some).map_err(|_| invalid())
}

fn split_values(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else { return Vec::new() };
    if is_unset(raw.trim()) {
        return Vec::new();
    }
    raw.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect()
}
