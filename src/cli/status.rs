use crate::cli::open_ledger;
use crate::error::Result;

pub fn run() -> Result<()> {
    let (settings, ledger) = open_ledger()?;
    let ledger_path = settings.ledger_path();

    println!("Data dir:   {}", settings.data_dir);
    println!("Ledger:     {}", ledger_path.display());
    println!("Upload to:  {}", settings.upload_endpoint);

    if !ledger_path.exists() {
        println!();
        println!("Ledger not found. Run `finhub init` to set up.");
        return Ok(());
    }

    if ledger.is_empty() {
        println!();
        println!("Transactions:  0");
        println!("Run `finhub demo` or `finhub tx add` to add some.");
        return Ok(());
    }

    let income = ledger.transactions().iter().filter(|t| t.is_income()).count();
    let expenses = ledger.len() - income;
    println!();
    println!("Transactions:  {}", ledger.len());
    println!("Income:        {income}");
    println!("Expenses:      {expenses}");
    if let (Some(first), Some(last)) = (
        ledger.transactions().iter().map(|t| t.date).min(),
        ledger.transactions().iter().map(|t| t.date).max(),
    ) {
        println!("Date range:    {first} to {last}");
    }
    Ok(())
}
