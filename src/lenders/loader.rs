//! Load lender tables from CSV
//!
//! Expected columns: `LenderID,Name,Spread,MinDownPayment,MaxTerm`

use super::{LenderConfig, LenderProfile};
use crate::error::ConfigError;
use csv::Reader;
use std::path::Path;

/// Raw CSV row matching the lender table columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "LenderID")]
    lender_id: u32,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Spread")]
    spread: f64,
    #[serde(rename = "MinDownPayment")]
    min_down_payment: f64,
    #[serde(rename = "MaxTerm")]
    max_term: u32,
}

impl CsvRow {
    fn into_profile(self) -> LenderProfile {
        LenderProfile::new(
            self.lender_id,
            self.name.trim(),
            self.spread,
            self.min_down_payment,
            self.max_term,
        )
    }
}

/// Load all lender profiles from a CSV file
pub fn load_lenders<P: AsRef<Path>>(path: P) -> Result<Vec<LenderProfile>, ConfigError> {
    let reader = Reader::from_path(path)?;
    read_rows(reader)
}

/// Load lender profiles from any reader (e.g., string buffer)
pub fn load_lenders_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<LenderProfile>, ConfigError> {
    read_rows(Reader::from_reader(reader))
}

/// Load a lender table and pair it with a reference index
pub fn load_lender_config<P: AsRef<Path>>(
    path: P,
    reference_index: f64,
) -> Result<LenderConfig, ConfigError> {
    let lenders = load_lenders(path)?;
    log::info!("Loaded {} lenders", lenders.len());
    LenderConfig::new(reference_index, lenders)
}

fn read_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<LenderProfile>, ConfigError> {
    let mut lenders = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        lenders.push(row.into_profile());
    }

    Ok(lenders)
}
