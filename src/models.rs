use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{FinhubError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = FinhubError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(FinhubError::Other(format!(
                "unknown transaction type '{other}' (expected income or expense)"
            ))),
        }
    }
}

/// Where a transaction came from. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    #[default]
    Manual,
    Csv,
    Pdf,
    Image,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Csv => "csv",
            Self::Pdf => "pdf",
            Self::Image => "image",
        }
    }

    /// Source implied by an uploaded file's media type.
    pub fn from_media_type(media_type: &str) -> Self {
        match media_type {
            "application/pdf" => Self::Pdf,
            "text/csv" | "application/vnd.ms-excel" => Self::Csv,
            m if m.starts_with("image/") => Self::Image,
            _ => Self::Manual,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub source: Source,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_category: Option<String>,
}

impl Transaction {
    /// Build a transaction, rejecting negative or non-finite amounts.
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        kind: TransactionType,
    ) -> Result<Self> {
        let tx = Self {
            id: id.into(),
            date,
            description: description.into(),
            amount,
            category: category.into(),
            kind,
            merchant: None,
            notes: None,
            source: Source::Manual,
            original_category: None,
        };
        tx.validate()?;
        Ok(tx)
    }

    pub fn with_source(mut self, source: Source) -> Self {
        self.source = source;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(FinhubError::InvalidAmount(self.amount));
        }
        Ok(())
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Income,
    Expense,
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(rename = "type")]
    pub kind: CategoryType,
}

/// Date range and category restriction applied before aggregation.
///
/// Both bounds are inclusive and optional. An empty `categories` set means
/// no category restriction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilter {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub categories: BTreeSet<String>,
}

impl ReportFilter {
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: Some(start),
            end_date: Some(end),
            categories: BTreeSet::new(),
        }
    }

    pub fn with_categories<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        if self.start_date.is_some_and(|start| tx.date < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| tx.date > end) {
            return false;
        }
        self.categories.is_empty() || self.categories.contains(&tx.category)
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| FinhubError::InvalidDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_new_rejects_negative_amount() {
        let err = Transaction::new("t1", d("2024-03-15"), "Refund", -5.0, "Groceries", TransactionType::Expense)
            .unwrap_err();
        assert!(matches!(err, FinhubError::InvalidAmount(a) if a == -5.0));
    }

    #[test]
    fn test_new_rejects_nan() {
        let result = Transaction::new("t1", d("2024-03-15"), "X", f64::NAN, "Groceries", TransactionType::Expense);
        assert!(result.is_err());
    }

    #[test]
    fn test_transaction_json_shape() {
        let tx = Transaction::new("t1", d("2024-03-15"), "Whole Foods", 100.0, "Groceries", TransactionType::Expense)
            .unwrap()
            .with_source(Source::Pdf);
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["date"], "2024-03-15");
        assert_eq!(json["source"], "pdf");
        assert!(json.get("merchant").is_none());
    }

    #[test]
    fn test_transaction_deserializes_camel_case() {
        let raw = r#"{
            "id": "x", "date": "2024-01-02", "description": "Uber", "amount": 12.5,
            "category": "Transportation", "type": "expense", "originalCategory": "Other Expense"
        }"#;
        let tx: Transaction = serde_json::from_str(raw).unwrap();
        assert_eq!(tx.source, Source::Manual);
        assert_eq!(tx.original_category.as_deref(), Some("Other Expense"));
    }

    #[test]
    fn test_filter_bounds_are_inclusive() {
        let filter = ReportFilter::between(d("2024-03-01"), d("2024-03-31"));
        let on_start = Transaction::new("a", d("2024-03-01"), "", 1.0, "X", TransactionType::Expense).unwrap();
        let on_end = Transaction::new("b", d("2024-03-31"), "", 1.0, "X", TransactionType::Expense).unwrap();
        let after = Transaction::new("c", d("2024-04-01"), "", 1.0, "X", TransactionType::Expense).unwrap();
        assert!(filter.matches(&on_start));
        assert!(filter.matches(&on_end));
        assert!(!filter.matches(&after));
    }

    #[test]
    fn test_parse_type() {
        assert_eq!("Income".parse::<TransactionType>().unwrap(), TransactionType::Income);
        assert!("refund".parse::<TransactionType>().is_err());
    }
}
