pub mod categories;
pub mod categorize;
pub mod demo;
pub mod export;
pub mod init;
pub mod report;
pub mod status;
pub mod transactions;
pub mod upload;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};

use crate::error::Result;
use crate::ledger::Ledger;
use crate::models::{parse_date, ReportFilter, TransactionType};
use crate::reports::DateRangePreset;
use crate::settings::{load_settings, Settings};

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub(crate) fn open_ledger() -> Result<(Settings, Ledger)> {
    let settings = load_settings();
    let ledger = Ledger::load(&settings.ledger_path())?;
    Ok((settings, ledger))
}

#[derive(Parser)]
#[command(name = "finhub", about = "Track, edit and report on personal transactions.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose a data directory and write the settings file.
    Init {
        /// Path for finhub data (default: ~/Documents/finhub)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
        /// Extraction service that receives uploaded files
        #[arg(long)]
        endpoint: Option<String>,
    },
    /// Replace the ledger with six months of sample data.
    Demo,
    /// Show settings and ledger statistics.
    Status,
    /// Manage transactions.
    Tx {
        #[command(subcommand)]
        command: TxCommands,
    },
    /// List categories and their display colors.
    Categories,
    /// Apply keyword rules to transactions still in the catch-all category.
    Categorize,
    /// Income, expense and category report for a date range.
    Report {
        #[command(flatten)]
        filter: FilterArgs,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export the filtered transactions to CSV.
    Export {
        #[command(flatten)]
        filter: FilterArgs,
        /// Output file (default: <data_dir>/exports/financial-report-YYYY-MM-DD.csv)
        #[arg(long)]
        output: Option<String>,
    },
    /// Send statements or receipts to the extraction service.
    Upload {
        /// Files to upload (PDF, CSV, images)
        #[arg(required = true)]
        files: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum TxCommands {
    /// List transactions, newest first.
    List {
        /// Match against description or merchant
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// income or expense
        #[arg(long = "type")]
        kind: Option<TransactionType>,
        /// Maximum rows to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// Add a transaction by hand.
    Add {
        /// Date: YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        description: String,
        /// Positive amount; the sign comes from --type
        #[arg(long)]
        amount: f64,
        #[arg(long, default_value = crate::categories::CATCH_ALL_EXPENSE)]
        category: String,
        /// income or expense
        #[arg(long = "type", default_value = "expense")]
        kind: TransactionType,
        #[arg(long)]
        merchant: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Replace fields of an existing transaction.
    Edit {
        /// Transaction id (shown in `finhub tx list`)
        id: String,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long = "type")]
        kind: Option<TransactionType>,
        #[arg(long)]
        merchant: Option<String>,
    },
    /// Delete a transaction by id.
    Delete {
        /// Transaction id (shown in `finhub tx list`)
        id: String,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Preset range ending today: week, month, quarter, year
    #[arg(long, conflicts_with_all = ["from_date", "to_date"])]
    pub range: Option<DateRangePreset>,
    /// Start date: YYYY-MM-DD
    #[arg(long = "from")]
    pub from_date: Option<String>,
    /// End date: YYYY-MM-DD
    #[arg(long = "to")]
    pub to_date: Option<String>,
    /// Restrict to a category (repeatable)
    #[arg(long = "category")]
    pub categories: Vec<String>,
}

impl FilterArgs {
    /// Build the report filter. Without a preset or explicit dates the
    /// current month is used.
    pub fn to_filter(&self, today: NaiveDate) -> Result<ReportFilter> {
        let filter = match (self.range, &self.from_date, &self.to_date) {
            (Some(preset), _, _) => {
                let (start, end) = preset.bounds(today);
                ReportFilter::between(start, end)
            }
            (None, None, None) => {
                let (start, end) = DateRangePreset::Month.bounds(today);
                ReportFilter::between(start, end)
            }
            (None, from, to) => ReportFilter {
                start_date: from.as_deref().map(parse_date).transpose()?,
                end_date: to.as_deref().map(parse_date).transpose()?,
                ..ReportFilter::default()
            },
        };
        Ok(filter.with_categories(&self.categories))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_filter_defaults_to_current_month() {
        let filter = FilterArgs::default().to_filter(d("2024-03-20")).unwrap();
        assert_eq!(filter.start_date, Some(d("2024-03-01")));
        assert_eq!(filter.end_date, Some(d("2024-03-20")));
        assert!(filter.categories.is_empty());
    }

    #[test]
    fn test_filter_open_ended_from() {
        let args = FilterArgs {
            from_date: Some("2024-01-01".into()),
            categories: vec!["Travel".into()],
            ..Default::default()
        };
        let filter = args.to_filter(d("2024-03-20")).unwrap();
        assert_eq!(filter.start_date, Some(d("2024-01-01")));
        assert_eq!(filter.end_date, None);
        assert!(filter.categories.contains("Travel"));
    }

    #[test]
    fn test_filter_rejects_bad_date() {
        let args = FilterArgs {
            to_date: Some("03/20/2024".into()),
            ..Default::default()
        };
        let err = args.to_filter(d("2024-03-20")).unwrap_err();
        assert!(err.to_string().contains("expected YYYY-MM-DD"));
    }

    #[test]
    fn test_cli_parses_report_range() {
        let cli = Cli::try_parse_from(["finhub", "report", "--range", "quarter", "--category", "Travel"]).unwrap();
        match cli.command {
            Commands::Report { filter, json } => {
                assert_eq!(filter.range, Some(DateRangePreset::Quarter));
                assert_eq!(filter.categories, vec!["Travel".to_string()]);
                assert!(!json);
            }
            _ => panic!("expected report command"),
        }
    }

    #[test]
    fn test_cli_rejects_range_with_dates() {
        let result = Cli::try_parse_from(["finhub", "report", "--range", "week", "--from", "2024-01-01"]);
        assert!(result.is_err());
    }
}
