use std::path::Path;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::categorizer::{categorize_transactions, default_rules};
use crate::cli::{open_ledger, today};
use crate::error::Result;
use crate::ingest::{HttpExtractor, IngestOutcome, IngestQueue, UploadStatus};

pub fn run(files: &[String]) -> Result<()> {
    let (settings, mut ledger) = open_ledger()?;
    let extractor = HttpExtractor::new(&settings.upload_endpoint)?;

    let mut queue = IngestQueue::new();
    let today = today();
    for f in files {
        queue.enqueue(Path::new(f), today);
    }

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let mut extracted = rt.block_on(queue.run_all(&extractor))?;

    let skipped = ledger.retain_unseen(&mut extracted);
    let result = categorize_transactions(&mut extracted, &default_rules());
    let added = ledger.extend_front(extracted)?;
    if added > 0 {
        ledger.save(&settings.ledger_path())?;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "File", "Type", "Status", "Result"]);
    for f in queue.files() {
        let status = match f.status {
            UploadStatus::Completed => f.status.to_string().green(),
            UploadStatus::Failed => f.status.to_string().red(),
            _ => f.status.to_string().normal(),
        };
        let detail = match &f.outcome {
            Some(IngestOutcome::Extracted(txns)) => format!("{} transactions", txns.len()),
            Some(IngestOutcome::Failed { reason }) => reason.clone(),
            None => String::new(),
        };
        table.add_row(vec![
            Cell::new(&f.id),
            Cell::new(&f.name),
            Cell::new(f.media_type),
            Cell::new(status),
            Cell::new(detail),
        ]);
    }
    println!("Uploads\n{table}");
    println!("Added {added} transactions ({} auto-categorized).", result.categorized);
    if skipped > 0 {
        println!("Skipped {skipped} duplicates.");
    }
    Ok(())
}
