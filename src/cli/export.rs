use std::path::PathBuf;

use crate::cli::{open_ledger, today, FilterArgs};
use crate::error::Result;
use crate::export::{default_export_name, export_to_file};
use crate::reports::filter_transactions;

pub fn run(filter: &FilterArgs, output: Option<String>) -> Result<()> {
    let (settings, ledger) = open_ledger()?;
    let today = today();
    let filter = filter.to_filter(today)?;

    let mut rows = filter_transactions(ledger.transactions(), &filter);
    rows.sort_by(|a, b| b.date.cmp(&a.date));

    let path = match output {
        Some(p) => PathBuf::from(p),
        None => settings.exports_dir().join(default_export_name(today)),
    };
    export_to_file(&path, &rows)?;
    println!("Wrote {} ({} transactions)", path.display(), rows.len());
    Ok(())
}
