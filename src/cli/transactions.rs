use chrono::Local;
use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::{open_ledger, today};
use crate::error::{FinhubError, Result};
use crate::fmt::signed_money;
use crate::ledger::TransactionQuery;
use crate::models::{parse_date, Transaction, TransactionType};

pub fn list(
    search: Option<String>,
    category: Option<String>,
    kind: Option<TransactionType>,
    limit: usize,
) -> Result<()> {
    let (_, ledger) = open_ledger()?;
    let query = TransactionQuery {
        term: search.unwrap_or_default(),
        category,
        kind,
    };
    let rows = ledger.search(&query);

    if rows.is_empty() {
        println!("No transactions found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Description", "Category", "Amount"]);
    for tx in rows.iter().take(limit) {
        let amount = match tx.kind {
            TransactionType::Income => signed_money(tx).green(),
            TransactionType::Expense => signed_money(tx).normal(),
        };
        table.add_row(vec![
            Cell::new(&tx.id),
            Cell::new(tx.date),
            Cell::new(&tx.description),
            Cell::new(&tx.category),
            Cell::new(amount),
        ]);
    }
    println!("Transactions\n{table}");
    if rows.len() > limit {
        println!("Showing {limit} of {} matches.", rows.len());
    }
    Ok(())
}

pub fn add(
    date: Option<String>,
    description: &str,
    amount: f64,
    category: &str,
    kind: TransactionType,
    merchant: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    let (settings, mut ledger) = open_ledger()?;
    let date = match date {
        Some(raw) => parse_date(&raw)?,
        None => today(),
    };
    let id = ledger.next_manual_id(Local::now().timestamp_millis());
    let mut tx = Transaction::new(id, date, description, amount, category, kind)?;
    tx.merchant = merchant;
    tx.notes = notes;

    let summary = format!("Added {}: {} {}", tx.id, tx.description, signed_money(&tx));
    ledger.add(tx)?;
    ledger.save(&settings.ledger_path())?;
    println!("{summary}");
    Ok(())
}

pub fn edit(
    id: &str,
    date: Option<String>,
    description: Option<String>,
    amount: Option<f64>,
    category: Option<String>,
    kind: Option<TransactionType>,
    merchant: Option<String>,
) -> Result<()> {
    let (settings, mut ledger) = open_ledger()?;
    let mut tx = ledger
        .get(id)
        .cloned()
        .ok_or_else(|| FinhubError::UnknownTransaction(id.to_string()))?;

    if let Some(raw) = date {
        tx.date = parse_date(&raw)?;
    }
    if let Some(d) = description {
        tx.description = d;
    }
    if let Some(a) = amount {
        tx.amount = a;
    }
    if let Some(c) = category {
        tx.category = c;
    }
    if let Some(k) = kind {
        tx.kind = k;
    }
    if merchant.is_some() {
        tx.merchant = merchant;
    }

    ledger.update(tx)?;
    ledger.save(&settings.ledger_path())?;
    println!("Updated transaction {id}");
    Ok(())
}

pub fn delete(id: &str) -> Result<()> {
    let (settings, mut ledger) = open_ledger()?;
    let removed = ledger.delete(id)?;
    ledger.save(&settings.ledger_path())?;
    println!("Deleted {}: {}", removed.id, removed.description);
    Ok(())
}
