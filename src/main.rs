// Entry point and high-level CLI flow.
//
// The binary drives the Superstore sales analysis from a small menu:
// - Option [1] loads the sales CSV, printing diagnostics.
// - Option [2] sets or clears the dimension filters (region, category,
//   segment) applied to every report.
// - Option [3] generates the full report set: KPI summary, monthly trend,
//   category/segment/ship-mode/sub-category rollups, region summary, top
//   products and top states. Each tabular report is exported as CSV and
//   previewed on the console; the KPI block is exported as JSON.
mod analytics;
mod filter;
mod loader;
mod output;
mod types;
mod util;

use chrono::Local;
use filter::Filters;
use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::sync::Mutex;
use types::{KpiReport, SalesRecord};

// Simple in-memory app state so we only load the CSV once but can change
// filters and regenerate reports multiple times in a single run.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| {
    Mutex::new(AppState {
        data: None,
        filters: Filters::default(),
    })
});

struct AppState {
    data: Option<Vec<SalesRecord>>,
    filters: Filters,
}

/// Read a single line of input after printing the common "Enter choice:" prompt.
fn read_choice() -> String {
    print!("Enter choice: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Handle option [1]: load the CSV file into memory.
fn handle_load() {
    let path = "superstore_sales.csv";
    match loader::load_sales(path) {
        Ok((data, load_report)) => {
            println!(
                "Processing dataset... ({} rows read, {} records loaded)",
                util::format_int(load_report.total_rows as i64),
                util::format_int(load_report.loaded_rows as i64)
            );
            if load_report.parse_errors > 0 {
                println!(
                    "Note: {} rows skipped due to parse/validation errors.",
                    util::format_int(load_report.parse_errors as i64)
                );
            }
            println!("");
            let mut state = APP_STATE.lock().unwrap();
            state.data = Some(data);
        }
        Err(e) => {
            eprintln!("Failed to load file: {}\n", e);
        }
    }
}

/// Prompt for one dimension filter: list the distinct values, `0` meaning no
/// constraint. An unrecognized choice leaves the current value untouched.
fn prompt_dimension(label: &str, choices: &[String], current: &str) -> String {
    println!("{} [current: {}]", label, if current.is_empty() { "All" } else { current });
    println!("  [0] All");
    for (i, v) in choices.iter().enumerate() {
        println!("  [{}] {}", i + 1, v);
    }
    match read_choice().parse::<usize>() {
        Ok(0) => String::new(),
        Ok(n) if n <= choices.len() => choices[n - 1].clone(),
        _ => current.to_string(),
    }
}

/// Handle option [2]: set or clear the report filters.
fn handle_filters() {
    let data = {
        let state = APP_STATE.lock().unwrap();
        state.data.clone()
    };
    let Some(data) = data else {
        println!("Error: No data loaded. Please load the CSV file first (option 1).\n");
        return;
    };

    let regions = analytics::distinct_values(&data, |r| &r.region);
    let categories = analytics::distinct_values(&data, |r| &r.category);
    let segments = analytics::distinct_values(&data, |r| &r.segment);

    let mut filters = {
        let state = APP_STATE.lock().unwrap();
        state.filters.clone()
    };
    filters.region = prompt_dimension("Region", &regions, &filters.region);
    filters.category = prompt_dimension("Category", &categories, &filters.category);
    filters.segment = prompt_dimension("Segment", &segments, &filters.segment);

    println!("Filters set: {}\n", filters.describe());
    let mut state = APP_STATE.lock().unwrap();
    state.filters = filters;
}

/// Handle option [3]: generate all reports over the filtered records.
fn handle_generate_reports() {
    let (data, filters) = {
        let state = APP_STATE.lock().unwrap();
        (state.data.clone(), state.filters.clone())
    };
    let Some(data) = data else {
        println!("Error: No data loaded. Please load the CSV file first (option 1).\n");
        return;
    };

    let data = filters.apply(&data);
    println!("Generating reports... ({})", filters.describe());
    println!(
        "{} records in scope.\n",
        util::format_int(data.len() as i64)
    );

    let kpis = analytics::kpi_summary(&data);
    println!("KPI Summary");
    println!("  Total Sales:      {}", util::format_number(kpis.total_sales, 2));
    println!("  Total Orders:     {}", util::format_int(kpis.total_orders as i64));
    println!("  Avg Order Value:  {}", util::format_number(kpis.avg_order_value, 2));
    println!(
        "  Total Customers:  {}\n",
        util::format_int(kpis.total_customers as i64)
    );
    let kpi_report = KpiReport {
        kpis,
        record_count: data.len(),
        generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    };
    if let Err(e) = output::write_json("kpi_summary.json", &kpi_report) {
        eprintln!("Write error: {}", e);
    }
    println!("(KPI summary exported to kpi_summary.json)\n");

    let monthly = analytics::monthly_sales(&data);
    let file = "monthly_sales.csv";
    if let Err(e) = output::write_csv(file, &monthly) {
        eprintln!("Write error: {}", e);
    }
    println!("Monthly Sales Trend\n");
    output::preview_table_rows(&monthly, 3);
    println!("(Full table exported to {})\n", file);

    let categories = analytics::sales_by_category(&data);
    let file = "sales_by_category.csv";
    if let Err(e) = output::write_csv(file, &categories) {
        eprintln!("Write error: {}", e);
    }
    println!("Sales by Category\n");
    output::preview_table_rows(&categories, 3);
    println!("(Full table exported to {})\n", file);

    let segments = analytics::sales_by_segment(&data);
    let file = "sales_by_segment.csv";
    if let Err(e) = output::write_csv(file, &segments) {
        eprintln!("Write error: {}", e);
    }
    println!("Sales by Segment\n");
    output::preview_table_rows(&segments, 3);
    println!("(Full table exported to {})\n", file);

    let ship_modes = analytics::sales_by_ship_mode(&data);
    let file = "sales_by_ship_mode.csv";
    if let Err(e) = output::write_csv(file, &ship_modes) {
        eprintln!("Write error: {}", e);
    }
    println!("Sales by Ship Mode\n");
    output::preview_table_rows(&ship_modes, 3);
    println!("(Full table exported to {})\n", file);

    let regions = analytics::sales_by_region(&data);
    let file = "sales_by_region.csv";
    if let Err(e) = output::write_csv(file, &regions) {
        eprintln!("Write error: {}", e);
    }
    println!("Sales by Region\n");
    output::preview_table_rows(&regions, 4);
    println!("(Full table exported to {})\n", file);

    let sub_categories = analytics::sales_by_sub_category(&data);
    let file = "top_sub_categories.csv";
    if let Err(e) = output::write_csv(file, &sub_categories) {
        eprintln!("Write error: {}", e);
    }
    println!("Top Sub-Categories");
    println!("(Sorted by sales, top 10 shown)\n");
    output::preview_table_rows(&sub_categories, 10);
    println!("(Full table exported to {})\n", file);

    let top_products = analytics::top_products(&data, 15);
    let file = "top_products.csv";
    if let Err(e) = output::write_csv(file, &top_products) {
        eprintln!("Write error: {}", e);
    }
    println!("Top Products");
    println!("(Top 15 by Sales)\n");
    output::preview_table_rows(&top_products, 3);
    println!("(Full table exported to {})\n", file);

    let top_states = analytics::top_states(&data, analytics::DEFAULT_LIMIT);
    let file = "top_states.csv";
    if let Err(e) = output::write_csv(file, &top_states) {
        eprintln!("Write error: {}", e);
    }
    println!("Top States by Sales");
    println!("(Top 10 by Sales)\n");
    output::preview_table_rows(&top_states, 3);
    println!("(Full table exported to {})\n", file);
}

fn main() {
    loop {
        println!("Superstore Sales Analysis:");
        println!("[1] Load the file");
        println!("[2] Set filters");
        println!("[3] Generate Reports");
        println!("[4] Exit\n");
        match read_choice().as_str() {
            "1" => {
                handle_load();
            }
            "2" => {
                handle_filters();
            }
            "3" => {
                println!("");
                handle_generate_reports();
            }
            "4" => {
                println!("Exiting the program.");
                break;
            }
            _ => {
                println!("Invalid choice. Please enter 1-4.\n");
            }
        }
    }
}
