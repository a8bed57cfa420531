use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::Transaction;

pub const CSV_HEADER: [&str; 5] = ["Date", "Description", "Category", "Type", "Amount"];

pub fn default_export_name(today: NaiveDate) -> String {
    format!("financial-report-{}.csv", today.format("%Y-%m-%d"))
}

pub fn write_csv<W: Write>(writer: W, transactions: &[Transaction]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for t in transactions {
        wtr.write_record([
            t.date.format("%Y-%m-%d").to_string(),
            t.description.clone(),
            t.category.clone(),
            t.kind.to_string(),
            format!("{:.2}", t.amount),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn export_to_file(path: &Path, transactions: &[Transaction]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_csv(file, transactions)
}
