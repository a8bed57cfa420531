use colored::Colorize;

use crate::cli::today;
use crate::error::Result;
use crate::fmt::money;
use crate::ledger::Ledger;
use crate::reports::summary_totals;
use crate::sample;
use crate::settings::load_settings;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let txns = sample::generate(today(), &mut rand::thread_rng());
    let totals = summary_totals(&txns);
    let ledger = Ledger::new(txns);
    ledger.save(&settings.ledger_path())?;

    println!("{}", "Demo data loaded.".green().bold());
    println!("  Transactions: {}", ledger.len());
    println!("  Income:       {}", money(totals.total_income));
    println!("  Expenses:     {}", money(totals.total_expenses));
    println!();
    println!("Try `finhub report --range quarter` next.");
    Ok(())
}
