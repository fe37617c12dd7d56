use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One line of the source CSV, exactly as it appears on disk. Every field is
/// optional and stringly-typed; `loader` turns this into a `SalesRecord`.
#[derive(Debug, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Row_ID")]
    pub row_id: Option<String>,
    #[serde(rename = "Order_ID")]
    pub order_id: Option<String>,
    #[serde(rename = "Order_Date")]
    pub order_date: Option<String>,
    #[serde(rename = "Ship_Date")]
    pub ship_date: Option<String>,
    #[serde(rename = "Ship_Mode")]
    pub ship_mode: Option<String>,
    #[serde(rename = "Customer_ID")]
    pub customer_id: Option<String>,
    #[serde(rename = "Customer_Name")]
    pub customer_name: Option<String>,
    #[serde(rename = "Segment")]
    pub segment: Option<String>,
    #[serde(rename = "Country")]
    pub country: Option<String>,
    #[serde(rename = "City")]
    pub city: Option<String>,
    #[serde(rename = "State")]
    pub state: Option<String>,
    #[serde(rename = "Postal_Code")]
    pub postal_code: Option<String>,
    #[serde(rename = "Region")]
    pub region: Option<String>,
    #[serde(rename = "Product_ID")]
    pub product_id: Option<String>,
    #[serde(rename = "Category")]
    pub category: Option<String>,
    #[serde(rename = "Sub_Category")]
    pub sub_category: Option<String>,
    #[serde(rename = "Product_Name")]
    pub product_name: Option<String>,
    #[serde(rename = "Sales")]
    pub sales: Option<String>,
}

/// A typed sales-order line item. Dates stay as their source strings in
/// day-first `D/M/YYYY` form; the analytics layer splits them itself.
#[derive(Debug, Clone)]
pub struct SalesRecord {
    pub row_id: i32,
    pub order_id: String,
    pub order_date: String,
    pub ship_date: String,
    pub ship_mode: String,
    pub customer_id: String,
    pub customer_name: String,
    pub segment: String,
    pub country: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub region: String,
    pub product_id: String,
    pub category: String,
    pub sub_category: String,
    pub product_name: String,
    pub sales: f64,
}

/// Top-line summary numbers. Totals are left unrounded; display formatting
/// is the caller's concern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSummary {
    pub total_sales: f64,
    pub total_orders: usize,
    pub avg_order_value: f64,
    pub total_customers: usize,
}

/// A dimension label paired with its summed sales, rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct DimensionSlice {
    #[serde(rename = "Name")]
    #[tabled(rename = "Name")]
    pub name: String,
    #[serde(rename = "Sales")]
    #[tabled(rename = "Sales", display_with = "crate::util::fmt_money")]
    pub value: f64,
}

/// Per-region sales sum and distinct-order count.
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct RegionSummary {
    #[serde(rename = "Region")]
    #[tabled(rename = "Region")]
    pub name: String,
    #[serde(rename = "Sales")]
    #[tabled(rename = "Sales", display_with = "crate::util::fmt_money")]
    pub sales: f64,
    #[serde(rename = "Orders")]
    #[tabled(rename = "Orders")]
    pub orders: usize,
}

/// One calendar-month bucket of the sales trend, keyed `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct MonthlyPoint {
    #[serde(rename = "Month")]
    #[tabled(rename = "Month")]
    pub month: String,
    #[serde(rename = "Sales")]
    #[tabled(rename = "Sales", display_with = "crate::util::fmt_money")]
    pub sales: f64,
    #[serde(rename = "Orders")]
    #[tabled(rename = "Orders")]
    pub orders: usize,
}

/// A ranked product: display name (cut to 40 chars), summed sales and the
/// category of its first-seen contributing record.
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct TopProduct {
    #[serde(rename = "Product")]
    #[tabled(rename = "Product")]
    pub name: String,
    #[serde(rename = "Sales")]
    #[tabled(rename = "Sales", display_with = "crate::util::fmt_money")]
    pub sales: f64,
    #[serde(rename = "Category")]
    #[tabled(rename = "Category")]
    pub category: String,
}

/// Payload of `kpi_summary.json`: the KPI block flattened alongside the
/// export metadata.
#[derive(Debug, Serialize)]
pub struct KpiReport {
    #[serde(flatten)]
    pub kpis: KpiSummary,
    pub record_count: usize,
    pub generated_at: String,
}
