//! Load dated cash flows from CSV

use std::error::Error;
use std::path::Path;

use chrono::NaiveDate;
use csv::Reader;

use super::flow::CashFlow;

/// Raw CSV row with `Date` (ISO 8601) and `Amount` columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Amount")]
    amount: f64,
}

/// Load a cash-flow series from a CSV file
pub fn load_cash_flows<P: AsRef<Path>>(path: P) -> Result<Vec<CashFlow>, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    let mut flows = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        flows.push(CashFlow::new(row.date, row.amount));
    }

    Ok(flows)
}

/// Load a cash-flow series from any reader (e.g., string buffer, network stream)
pub fn load_cash_flows_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<CashFlow>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut flows = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        flows.push(CashFlow::new(row.date, row.amount));
    }

    Ok(flows)
}
