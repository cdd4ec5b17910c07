//! CSV output for schedules and offer summaries

use super::{Installment, OfferSummary};
use std::io::Write;
use std::path::Path;

/// Write schedule rows as CSV (`number,value,amortization,interest,balance`)
pub fn write_schedule_csv<W: Write>(writer: W, installments: &[Installment]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for installment in installments {
        csv_writer.serialize(installment)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write schedule rows to a CSV file
pub fn write_schedule_csv_path<P: AsRef<Path>>(path: P, installments: &[Installment]) -> Result<(), csv::Error> {
    let file = std::fs::File::create(path)?;
    write_schedule_csv(file, installments)
}

/// Write one CSV row per offer
pub fn write_summaries_csv<W: Write>(writer: W, summaries: &[OfferSummary]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for summary in summaries {
        csv_writer.serialize(summary)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write offer summaries to a CSV file
pub fn write_summaries_csv_path<P: AsRef<Path>>(path: P, summaries: &[OfferSummary]) -> Result<(), csv::Error> {
    let file = std::fs::File::create(path)?;
    write_summaries_csv(file, summaries)
}
