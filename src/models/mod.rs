// src/models/mod.rs

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

// ───────────────────────────────────────
// Rows
// ───────────────────────────────────────
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct LabelValue {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Default, FromRow)]
pub struct TotalsRow {
    pub total_revenue: f64,
    pub total_orders: i64,
    pub total_customers: i64,
    pub total_units: i64,
}

#[derive(Debug, FromRow)]
pub struct DateRangeRow {
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
}

// ───────────────────────────────────────
// Response payloads
// ───────────────────────────────────────
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

impl ChartData {
    pub fn from_rows(rows: Vec<LabelValue>) -> Self {
        let (labels, data) = rows
            .into_iter()
            .map(|r| (r.label, round2(r.value)))
            .unzip();
        ChartData { labels, data }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Kpis {
    pub total_revenue: f64,
    pub total_orders: i64,
    pub total_customers: i64,
    pub total_units: i64,
    pub avg_order_value: f64,
    pub revenue_growth: Option<f64>, // % vs previous month
}

impl Kpis {
    pub fn from_totals(t: TotalsRow, monthly_revenue: &[f64]) -> Self {
        let avg_order_value = if t.total_orders > 0 {
            round2(t.total_revenue / t.total_orders as f64)
        } else {
            0.0
        };
        Kpis {
            total_revenue: round2(t.total_revenue),
            total_orders: t.total_orders,
            total_customers: t.total_customers,
            total_units: t.total_units,
            avg_order_value,
            revenue_growth: month_over_month(monthly_revenue),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DateRange {
    pub min: Option<NaiveDate>,
    pub max: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct FilterOptions {
    pub regions: Vec<String>,
    pub products: Vec<String>,
    pub categories: Vec<String>,
    pub channels: Vec<String>,
    pub tiers: Vec<String>,
    pub date_range: DateRange,
}

// ───────────────────────────────────────
// Helpers
// ───────────────────────────────────────
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Growth of the last month over the one before it, in percent.
pub fn month_over_month(series: &[f64]) -> Option<f64> {
    let [.., prev, last] = series else { return None };
    if *prev == 0.0 {
        return None;
    }
    Some(round2((last - prev) / prev * 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mom_needs_two_months() {
        assert_eq!(month_over_month(&[]), None);
        assert_eq!(month_over_month(&[120.0]), None);
    }

    #[test]
    fn mom_uses_last_two_points() {
        assert_eq!(month_over_month(&[10.0, 100.0, 125.0]), Some(25.0));
        assert_eq!(month_over_month(&[200.0, 150.0]), Some(-25.0));
        assert_eq!(month_over_month(&[300.0, 0.0]), Some(-100.0));
    }

    #[test]
    fn mom_zero_previous_is_undefined() {
        assert_eq!(month_over_month(&[0.0, 50.0]), None);
    }

    #[test]
    fn mom_rounds_to_cents() {
        assert_eq!(month_over_month(&[3.0, 4.0]), Some(33.33));
    }

    #[test]
    fn chart_data_keeps_row_order() {
        let chart = ChartData::from_rows(vec![
            LabelValue { label: "West".into(), value: 1500.456 },
            LabelValue { label: "East".into(), value: 900.0 },
        ]);
        assert_eq!(chart.labels, vec!["West", "East"]);
        assert_eq!(chart.data, vec![1500.46, 900.0]);
    }

    #[test]
    fn empty_rows_serialize_as_empty_arrays() {
        let chart = ChartData::from_rows(Vec::new());
        assert_eq!(
            serde_json::to_value(&chart).unwrap(),
            serde_json::json!({ "labels": [], "data": [] })
        );
    }

    #[test]
    fn kpis_from_totals() {
        let totals = TotalsRow {
            total_revenue: 1000.0,
            total_orders: 3,
            total_customers: 2,
            total_units: 12,
        };
        let k = Kpis::from_totals(totals, &[400.0, 600.0]);
        assert_eq!(k.avg_order_value, 333.33);
        assert_eq!(k.revenue_growth, Some(50.0));
        assert_eq!(k.total_units, 12);
    }

    #[test]
    fn kpis_with_no_orders_are_zeroed() {
        let k = Kpis::from_totals(TotalsRow::default(), &[]);
        assert_eq!(k.avg_order_value, 0.0);
        assert_eq!(k.total_revenue, 0.0);
        assert_eq!(k.revenue_growth, None);
    }

    #[test]
    fn kpis_wire_shape() {
        let k = Kpis::from_totals(TotalsRow::default(), &[125.0]);
        assert_eq!(
            serde_json::to_value(&k).unwrap(),
            serde_json::json!({
                "total_revenue": 0.0,
                "total_orders": 0,
                "total_customers": 0,
                "total_units": 0,
                "avg_order_value": 0.0,
                "revenue_growth": null,
            })
        );
    }

    #[test]
    fn filter_options_on_empty_table() {
        let opts = FilterOptions {
            regions: Vec::new(),
            products: Vec::new(),
            categories: Vec::new(),
            channels: Vec::new(),
            tiers: Vec::new(),
            date_range: DateRange { min: None, max: None },
        };
        assert_eq!(
            serde_json::to_value(&opts).unwrap(),
            serde_json::json!({
                "regions": [],
                "products": [],
                "categories": [],
                "channels": [],
                "tiers": [],
                "date_range": { "min": null, "max": null },
            })
        );
    }

    #[test]
    fn filter_options_dates_are_iso() {
        let opts = FilterOptions {
            regions: vec!["East".into(), "West".into()],
            products: Vec::new(),
            categories: Vec::new(),
            channels: vec!["Online".into()],
            tiers: Vec::new(),
            date_range: DateRange {
                min: NaiveDate::from_ymd_opt(2023, 1, 1),
                max: NaiveDate::from_ymd_opt(2024, 6, 30),
            },
        };
        let v = serde_json::to_value(&opts).unwrap();
        assert_eq!(v["regions"], serde_json::json!(["East", "West"]));
        assert_eq!(v["date_range"]["min"], "2023-01-01");
        assert_eq!(v["date_range"]["max"], "2024-06-30");
    }
}
