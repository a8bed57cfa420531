use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::categories::{color_for, default_categories};
use crate::cli::{open_ledger, today, FilterArgs};
use crate::error::Result;
use crate::fmt::{money, percent};
use crate::reports::{build_report, Report};

fn range_label(report: &Report) -> String {
    match (report.start_date, report.end_date) {
        (Some(s), Some(e)) => format!("{s} to {e}"),
        (Some(s), None) => format!("from {s}"),
        (None, Some(e)) => format!("through {e}"),
        (None, None) => "all time".to_string(),
    }
}

pub fn run(filter: &FilterArgs, json: bool) -> Result<()> {
    let (settings, ledger) = open_ledger()?;
    let today = today();
    let filter = filter.to_filter(today)?;
    let report = build_report(
        ledger.transactions(),
        &filter,
        today,
        settings.trend_months,
        settings.top_categories,
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_summary(&report);
    print_breakdown(&report);
    print_trend(&report);
    Ok(())
}

fn print_summary(report: &Report) {
    let totals = &report.totals;
    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec![
        Cell::new("Total Income".green().bold()),
        Cell::new(money(totals.total_income)),
    ]);
    table.add_row(vec![
        Cell::new("Total Expenses".red().bold()),
        Cell::new(money(totals.total_expenses)),
    ]);
    let net_label = if totals.net_savings >= 0.0 {
        "Net Savings".green().bold()
    } else {
        "Net Savings".red().bold()
    };
    table.add_row(vec![Cell::new(net_label), Cell::new(money(totals.net_savings))]);
    table.add_row(vec![
        Cell::new("Savings Rate"),
        Cell::new(percent(report.savings_rate)),
    ]);
    table.add_row(vec![
        Cell::new("Avg Daily Spending"),
        Cell::new(money(report.average_daily_spending)),
    ]);
    table.add_row(vec![Cell::new("Transactions"), Cell::new(report.transaction_count)]);
    println!("Summary ({})\n{table}", range_label(report));
}

fn print_breakdown(report: &Report) {
    if report.breakdown.is_empty() {
        println!();
        println!("No expenses in this range.");
        return;
    }
    let categories = default_categories();

    let mut table = Table::new();
    table.set_header(vec!["Category", "Amount", "Share", "Color"]);
    for share in &report.breakdown {
        table.add_row(vec![
            Cell::new(&share.category),
            Cell::new(money(share.amount)),
            Cell::new(percent(share.percentage)),
            Cell::new(color_for(&categories, &share.category)),
        ]);
    }
    println!();
    println!("Expenses by Category\n{table}");

    let mut top = Table::new();
    top.set_header(vec!["#", "Category", "Amount"]);
    for (rank, cat) in report.top_expenses.iter().enumerate() {
        top.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&cat.category),
            Cell::new(money(cat.amount)),
        ]);
    }
    println!();
    println!("Top Expense Categories\n{top}");
}

fn print_trend(report: &Report) {
    let mut table = Table::new();
    table.set_header(vec!["Month", "Income", "Expenses", "Savings"]);
    for m in &report.trend {
        let savings = if m.savings >= 0.0 {
            money(m.savings).green().to_string()
        } else {
            money(m.savings).red().to_string()
        };
        table.add_row(vec![
            Cell::new(&m.label),
            Cell::new(money(m.income)),
            Cell::new(money(m.expenses)),
            Cell::new(savings),
        ]);
    }
    println!();
    println!("Monthly Trend\n{table}");
}
