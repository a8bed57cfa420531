use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::error::{FinhubError, Result};
use crate::models::{ReportFilter, Transaction};

pub const DEFAULT_TREND_MONTHS: usize = 12;
pub const DEFAULT_TOP_CATEGORIES: usize = 5;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn round_cents(val: f64) -> f64 {
    (val * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Keep the transactions inside the filter's date bounds and category set,
/// preserving their relative order.
pub fn filter_transactions(transactions: &[Transaction], filter: &ReportFilter) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| filter.matches(t))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Date range presets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRangePreset {
    Week,
    Month,
    Quarter,
    Year,
}

impl FromStr for DateRangePreset {
    type Err = FinhubError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            "year" => Ok(Self::Year),
            other => Err(FinhubError::Other(format!(
                "unknown range '{other}' (expected week, month, quarter or year)"
            ))),
        }
    }
}

impl DateRangePreset {
    /// Inclusive `(start, end)` bounds for the preset; `end` is always `today`.
    pub fn bounds(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = match self {
            Self::Week => today - Duration::days(7),
            Self::Month => first_of_month(today),
            Self::Quarter => {
                let first_month = (today.month0() / 3) * 3 + 1;
                NaiveDate::from_ymd_opt(today.year(), first_month, 1).unwrap_or(today)
            }
            Self::Year => NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today),
        };
        (start, today)
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

// ---------------------------------------------------------------------------
// Category breakdown
// ---------------------------------------------------------------------------

/// Expense totals per category, rounded to cents. Categories without any
/// expense are absent.
pub fn category_breakdown(transactions: &[Transaction]) -> BTreeMap<String, f64> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for t in transactions.iter().filter(|t| t.is_expense()) {
        *totals.entry(t.category.clone()).or_default() += t.amount;
    }
    for total in totals.values_mut() {
        *total = round_cents(*total);
    }
    totals
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}

/// Largest expense categories first; equal amounts are ordered by name.
pub fn top_expense_categories(transactions: &[Transaction], n: usize) -> Vec<CategoryTotal> {
    let mut ranked: Vec<CategoryTotal> = category_breakdown(transactions)
        .into_iter()
        .map(|(category, amount)| CategoryTotal { category, amount })
        .collect();
    ranked.sort_by(|a, b| {
        b.amount
            .total_cmp(&a.amount)
            .then_with(|| a.category.cmp(&b.category))
    });
    ranked.truncate(n);
    ranked
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category: String,
    pub amount: f64,
    pub percentage: f64,
}

/// Every expense category with its share of total expenses, ranked like
/// [`top_expense_categories`].
pub fn category_shares(transactions: &[Transaction]) -> Vec<CategoryShare> {
    let ranked = top_expense_categories(transactions, usize::MAX);
    let total: f64 = ranked.iter().map(|c| c.amount).sum();
    ranked
        .into_iter()
        .map(|c| CategoryShare {
            percentage: if total > 0.0 { c.amount / total * 100.0 } else { 0.0 },
            category: c.category,
            amount: c.amount,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Monthly trend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrendEntry {
    /// Short label, e.g. "Mar 24".
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub income: f64,
    pub expenses: f64,
    pub savings: f64,
}

/// One entry per calendar month, oldest first, ending at `today`'s month.
pub fn monthly_trend(
    transactions: &[Transaction],
    month_count: usize,
    today: NaiveDate,
) -> Vec<MonthlyTrendEntry> {
    let mut buckets: HashMap<(i32, u32), (f64, f64)> = HashMap::new();
    for t in transactions {
        let bucket = buckets.entry((t.date.year(), t.date.month())).or_default();
        if t.is_income() {
            bucket.0 += t.amount;
        } else {
            bucket.1 += t.amount;
        }
    }

    // Months since year 0, so walking backwards never needs a calendar lookup.
    let current = i64::from(today.year()) * 12 + i64::from(today.month0());
    (0..month_count)
        .rev()
        .map(|offset| {
            let index = current - offset as i64;
            let year = index.div_euclid(12) as i32;
            let month0 = index.rem_euclid(12) as usize;
            let month = month0 as u32 + 1;
            let (income, expenses) = buckets.get(&(year, month)).copied().unwrap_or_default();
            MonthlyTrendEntry {
                label: format!("{} {:02}", MONTH_ABBREVIATIONS[month0], year.rem_euclid(100)),
                year,
                month,
                income,
                expenses,
                savings: income - expenses,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Summary figures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTotals {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_savings: f64,
}

pub fn summary_totals(transactions: &[Transaction]) -> SummaryTotals {
    let mut total_income = 0.0f64;
    let mut total_expenses = 0.0f64;
    for t in transactions {
        if t.is_income() {
            total_income += t.amount;
        } else {
            total_expenses += t.amount;
        }
    }
    SummaryTotals {
        total_income,
        total_expenses,
        net_savings: total_income - total_expenses,
    }
}

/// Expenses per day across the range. A same-day range counts as one day.
/// The span is whole calendar days, so a range ending today does not count
/// today itself as an extra day.
pub fn average_daily_spending(total_expenses: f64, start_date: NaiveDate, end_date: NaiveDate) -> f64 {
    let days = (end_date - start_date).num_days().abs().max(1);
    total_expenses / days as f64
}

/// Percentage of income kept; `0` when there is no income.
pub fn savings_rate(total_income: f64, total_expenses: f64) -> f64 {
    if total_income > 0.0 {
        (total_income - total_expenses) / total_income * 100.0
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Full report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub transaction_count: usize,
    pub totals: SummaryTotals,
    pub breakdown: Vec<CategoryShare>,
    pub top_expenses: Vec<CategoryTotal>,
    /// Built from the unfiltered input so the chart always spans full months.
    pub trend: Vec<MonthlyTrendEntry>,
    pub average_daily_spending: f64,
    pub savings_rate: f64,
}

pub fn build_report(
    transactions: &[Transaction],
    filter: &ReportFilter,
    today: NaiveDate,
    trend_months: usize,
    top_n: usize,
) -> Report {
    let filtered = filter_transactions(transactions, filter);
    let totals = summary_totals(&filtered);

    // Open-ended bounds fall back to the span of the filtered data.
    let start = filter
        .start_date
        .or_else(|| filtered.iter().map(|t| t.date).min())
        .unwrap_or(today);
    let end = filter.end_date.unwrap_or(today);

    Report {
        start_date: filter.start_date,
        end_date: filter.end_date,
        transaction_count: filtered.len(),
        totals,
        breakdown: category_shares(&filtered),
        top_expenses: top_expense_categories(&filtered, top_n),
        trend: monthly_trend(transactions, trend_months, today),
        average_daily_spending: average_daily_spending(totals.total_expenses, start, end),
        savings_rate: savings_rate(totals.total_income, totals.total_expenses),
    }
}
