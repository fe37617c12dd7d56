// Aggregation engine: pure transforms from a slice of sales records to the
// derived summaries the reports are built from.
//
// Every function here is stateless and total: it reads its input, allocates a
// fresh result and never panics on empty or odd data. Grouping is by exact
// (case-sensitive, untrimmed) string equality. Sums accumulate in f64 and are
// rounded to cents once, at output time. Where output order matters it is the
// order of first occurrence of each group key, so a plain `HashMap` is paired
// with an explicit ordered accumulator list.
use crate::types::{DimensionSlice, KpiSummary, MonthlyPoint, RegionSummary, SalesRecord, TopProduct};
use crate::util::{round2, truncate_name};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Result-count limit used by the top-N reports unless a call site asks for
/// more (the product report shows 15).
pub const DEFAULT_LIMIT: usize = 10;

/// Product names longer than this are cut for display.
const PRODUCT_NAME_MAX: usize = 40;

/// Year substituted when an order date has no year segment. A known quirk,
/// kept deliberately; see DESIGN.md.
const FALLBACK_YEAR: &str = "2017";

/// Top-line totals: sales sum, distinct orders, distinct customers, and
/// average order value. The sums are deliberately not rounded here.
///
/// With zero records there are zero distinct orders; the average order value
/// is then defined as 0.0 rather than NaN.
pub fn kpi_summary(data: &[SalesRecord]) -> KpiSummary {
    let total_sales: f64 = data.iter().map(|r| r.sales).sum();
    let orders: HashSet<&str> = data.iter().map(|r| r.order_id.as_str()).collect();
    let customers: HashSet<&str> = data.iter().map(|r| r.customer_id.as_str()).collect();
    let avg_order_value = if orders.is_empty() {
        0.0
    } else {
        total_sales / orders.len() as f64
    };
    KpiSummary {
        total_sales,
        total_orders: orders.len(),
        avg_order_value,
        total_customers: customers.len(),
    }
}

/// Group-and-sum over an arbitrary string dimension, output in first-occurrence
/// order of the key. The chart legends depend on that order, so it is part of
/// the contract, not an accident.
pub fn sum_by_dimension<'a, F>(data: &'a [SalesRecord], key: F) -> Vec<DimensionSlice>
where
    F: Fn(&'a SalesRecord) -> &'a str,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<(&'a str, f64)> = Vec::new();
    for r in data {
        let k = key(r);
        let i = *index.entry(k).or_insert_with(|| {
            groups.push((k, 0.0));
            groups.len() - 1
        });
        groups[i].1 += r.sales;
    }
    groups
        .into_iter()
        .map(|(name, sum)| DimensionSlice {
            name: name.to_string(),
            value: round2(sum),
        })
        .collect()
}

pub fn sales_by_category(data: &[SalesRecord]) -> Vec<DimensionSlice> {
    sum_by_dimension(data, |r| &r.category)
}

pub fn sales_by_segment(data: &[SalesRecord]) -> Vec<DimensionSlice> {
    sum_by_dimension(data, |r| &r.segment)
}

pub fn sales_by_ship_mode(data: &[SalesRecord]) -> Vec<DimensionSlice> {
    sum_by_dimension(data, |r| &r.ship_mode)
}

/// Sub-category rollup, sorted descending by summed sales. All groups are
/// returned; the dashboard call site cuts the list for display.
pub fn sales_by_sub_category(data: &[SalesRecord]) -> Vec<DimensionSlice> {
    let mut slices = sum_by_dimension(data, |r| &r.sub_category);
    // Stable sort, so equal sums keep first-occurrence order.
    slices.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
    slices
}

/// Per-region sales sum and distinct-order count, first-occurrence order.
pub fn sales_by_region(data: &[SalesRecord]) -> Vec<RegionSummary> {
    struct Acc<'a> {
        sales: f64,
        orders: HashSet<&'a str>,
    }
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Acc)> = Vec::new();
    for r in data {
        let k = r.region.as_str();
        let i = *index.entry(k).or_insert_with(|| {
            groups.push((
                k,
                Acc {
                    sales: 0.0,
                    orders: HashSet::new(),
                },
            ));
            groups.len() - 1
        });
        let acc = &mut groups[i].1;
        acc.sales += r.sales;
        acc.orders.insert(r.order_id.as_str());
    }
    groups
        .into_iter()
        .map(|(name, acc)| RegionSummary {
            name: name.to_string(),
            sales: round2(acc.sales),
            orders: acc.orders.len(),
        })
        .collect()
}

/// Monthly sales trend, keyed `YYYY-MM` and sorted ascending by key.
///
/// Order dates are day-first `D/M/YYYY`, parsed by splitting on `/`: segment 1
/// is the month, segment 2 the year. A missing or empty year segment falls
/// back to [`FALLBACK_YEAR`]. A record whose date yields fewer than two
/// segments is skipped from this series only; it still counts everywhere else.
pub fn monthly_sales(data: &[SalesRecord]) -> Vec<MonthlyPoint> {
    struct Acc<'a> {
        sales: f64,
        orders: HashSet<&'a str>,
    }
    let mut buckets: HashMap<String, Acc> = HashMap::new();
    for r in data {
        let parts: Vec<&str> = r.order_date.split('/').collect();
        if parts.len() < 2 {
            continue;
        }
        let year = parts
            .get(2)
            .copied()
            .filter(|y| !y.is_empty())
            .unwrap_or(FALLBACK_YEAR);
        let key = format!("{}-{:0>2}", year, parts[1]);
        let acc = buckets.entry(key).or_insert_with(|| Acc {
            sales: 0.0,
            orders: HashSet::new(),
        });
        acc.sales += r.sales;
        acc.orders.insert(r.order_id.as_str());
    }
    let mut points: Vec<MonthlyPoint> = buckets
        .into_iter()
        .map(|(month, acc)| MonthlyPoint {
            month,
            sales: round2(acc.sales),
            orders: acc.orders.len(),
        })
        .collect();
    points.sort_by(|a, b| a.month.cmp(&b.month));
    points
}

/// Top `limit` products by summed sales, descending. The category shown is
/// the one on the first record seen for that product name; when the data
/// carries a product under two categories, first occurrence wins.
pub fn top_products(data: &[SalesRecord], limit: usize) -> Vec<TopProduct> {
    struct Acc<'a> {
        sales: f64,
        category: &'a str,
    }
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Acc)> = Vec::new();
    for r in data {
        let k = r.product_name.as_str();
        let i = *index.entry(k).or_insert_with(|| {
            groups.push((
                k,
                Acc {
                    sales: 0.0,
                    category: &r.category,
                },
            ));
            groups.len() - 1
        });
        groups[i].1.sales += r.sales;
    }
    groups.sort_by(|a, b| b.1.sales.partial_cmp(&a.1.sales).unwrap_or(Ordering::Equal));
    groups
        .into_iter()
        .take(limit)
        .map(|(name, acc)| TopProduct {
            name: truncate_name(name, PRODUCT_NAME_MAX),
            sales: round2(acc.sales),
            category: acc.category.to_string(),
        })
        .collect()
}

/// Top `limit` groups of an arbitrary dimension by summed sales, descending.
pub fn top_by_dimension<'a, F>(data: &'a [SalesRecord], key: F, limit: usize) -> Vec<DimensionSlice>
where
    F: Fn(&'a SalesRecord) -> &'a str,
{
    let mut slices = sum_by_dimension(data, key);
    slices.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
    slices.truncate(limit);
    slices
}

pub fn top_states(data: &[SalesRecord], limit: usize) -> Vec<DimensionSlice> {
    top_by_dimension(data, |r| &r.state, limit)
}

/// Sorted unique values of a dimension; feeds the filter prompts.
pub fn distinct_values<'a, F>(data: &'a [SalesRecord], key: F) -> Vec<String>
where
    F: Fn(&'a SalesRecord) -> &'a str,
{
    let set: HashSet<&str> = data.iter().map(key).collect();
    let mut values: Vec<String> = set.into_iter().map(str::to_string).collect();
    values.sort();
    values
}
