use comfy_table::{Cell, Table};

use crate::categories::default_categories;
use crate::cli::open_ledger;
use crate::error::Result;
use crate::models::CategoryType;

pub fn list() -> Result<()> {
    let (_, ledger) = open_ledger()?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Type", "Color", "In Use"]);
    for cat in default_categories() {
        let used = ledger
            .transactions()
            .iter()
            .filter(|t| t.category == cat.name)
            .count();
        let kind = match cat.kind {
            CategoryType::Income => "income",
            CategoryType::Expense => "expense",
            CategoryType::Both => "both",
        };
        table.add_row(vec![
            Cell::new(&cat.id),
            Cell::new(&cat.name),
            Cell::new(kind),
            Cell::new(&cat.color),
            Cell::new(used),
        ]);
    }
    println!("Categories\n{table}");
    Ok(())
}
