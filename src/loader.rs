use crate::types::{RawRow, SalesRecord};
use crate::util::{parse_f64_safe, parse_i32_safe};
use csv::ReaderBuilder;
use std::error::Error;

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub parse_errors: usize,
}

/// Read the sales CSV into typed records.
///
/// A row is dropped (and counted in `parse_errors`) when it cannot be
/// deserialized, when `Sales` is missing or not a finite number, or when the
/// order/customer keys are empty. String dimensions are passed through
/// untouched; grouping downstream is by exact string value, so no trimming or
/// case folding happens here.
pub fn load_sales(path: &str) -> Result<(Vec<SalesRecord>, LoadReport), Box<dyn Error>> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;
    let mut total_rows = 0usize;
    let mut parse_errors = 0usize;
    let mut records: Vec<SalesRecord> = Vec::new();

    for result in rdr.deserialize::<RawRow>() {
        total_rows += 1;
        let row = match result {
            Ok(r) => r,
            Err(_) => {
                parse_errors += 1;
                continue;
            }
        };

        let sales = match parse_f64_safe(row.sales.as_deref()) {
            Some(v) if v.is_finite() => v,
            _ => {
                parse_errors += 1;
                continue;
            }
        };
        let order_id = row.order_id.unwrap_or_default();
        let customer_id = row.customer_id.unwrap_or_default();
        if order_id.is_empty() || customer_id.is_empty() {
            parse_errors += 1;
            continue;
        }

        records.push(SalesRecord {
            row_id: parse_i32_safe(row.row_id.as_deref()).unwrap_or(0),
            order_id,
            order_date: row.order_date.unwrap_or_default(),
            ship_date: row.ship_date.unwrap_or_default(),
            ship_mode: row.ship_mode.unwrap_or_default(),
            customer_id,
            customer_name: row.customer_name.unwrap_or_default(),
            segment: row.segment.unwrap_or_default(),
            country: row.country.unwrap_or_default(),
            city: row.city.unwrap_or_default(),
            state: row.state.unwrap_or_default(),
            postal_code: row.postal_code.unwrap_or_default(),
            region: row.region.unwrap_or_default(),
            product_id: row.product_id.unwrap_or_default(),
            category: row.category.unwrap_or_default(),
            sub_category: row.sub_category.unwrap_or_default(),
            product_name: row.product_name.unwrap_or_default(),
            sales,
        });
    }

    let loaded_rows = records.len();
    let report = LoadReport {
        total_rows,
        loaded_rows,
        parse_errors,
    };
    Ok((records, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    const HEADER: &str = "Row_ID,Order_ID,Order_Date,Ship_Date,Ship_Mode,Customer_ID,Customer_Name,Segment,Country,City,State,Postal_Code,Region,Product_ID,Category,Sub_Category,Product_Name,Sales";

    fn write_fixture(name: &str, rows: &[&str]) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("superstore_loader_{}_{}.csv", name, std::process::id()));
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "{}", HEADER).unwrap();
        for r in rows {
            writeln!(f, "{}", r).unwrap();
        }
        path
    }

    #[test]
    fn loads_well_formed_rows() {
        let path = write_fixture(
            "ok",
            &[
                "1,CA-2017-1,5/3/2017,8/3/2017,Standard Class,C1,Alice,Consumer,United States,Seattle,Washington,98103,West,FUR-1,Furniture,Bookcases,Bookcase,261.96",
                "2,CA-2017-2,6/3/2017,9/3/2017,Second Class,C2,Bob,Corporate,United States,Austin,Texas,73301,Central,TEC-1,Technology,Phones,Phone,99.99",
            ],
        );
        let (records, report) = load_sales(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(report.total_rows, 2);
        assert_eq!(report.loaded_rows, 2);
        assert_eq!(report.parse_errors, 0);
        assert_eq!(records[0].order_id, "CA-2017-1");
        assert_eq!(records[0].sales, 261.96);
        assert_eq!(records[1].region, "Central");
    }

    #[test]
    fn bad_sales_and_missing_keys_are_counted() {
        let path = write_fixture(
            "bad",
            &[
                "1,CA-2017-1,5/3/2017,8/3/2017,Standard Class,C1,Alice,Consumer,US,Seattle,Washington,98103,West,FUR-1,Furniture,Bookcases,Bookcase,not-a-number",
                "2,,5/3/2017,8/3/2017,Standard Class,C1,Alice,Consumer,US,Seattle,Washington,98103,West,FUR-1,Furniture,Bookcases,Bookcase,10.0",
                "3,CA-2017-3,5/3/2017,8/3/2017,Standard Class,C3,Cara,Consumer,US,Seattle,Washington,98103,West,FUR-1,Furniture,Bookcases,Bookcase,10.0",
            ],
        );
        let (records, report) = load_sales(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(report.total_rows, 3);
        assert_eq!(report.loaded_rows, 1);
        assert_eq!(report.parse_errors, 2);
        assert_eq!(records[0].order_id, "CA-2017-3");
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_sales("/nonexistent/superstore.csv").is_err());
    }
}
