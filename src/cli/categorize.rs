use crate::categorizer::{categorize_transactions, default_rules};
use crate::cli::open_ledger;
use crate::error::Result;

pub fn run() -> Result<()> {
    let (settings, mut ledger) = open_ledger()?;
    let result = categorize_transactions(ledger.transactions_mut(), &default_rules());
    if result.categorized > 0 {
        ledger.save(&settings.ledger_path())?;
    }
    println!("Categorized: {}", result.categorized);
    println!("Still uncategorized: {}", result.unmatched);
    Ok(())
}
