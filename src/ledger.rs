use std::collections::HashSet;
use std::path::Path;

use crate::error::{FinhubError, Result};
use crate::models::{Transaction, TransactionType};

pub const LEDGER_FILE: &str = "transactions.json";

/// The transaction collection a command works on. Newest additions sit at the
/// front; display order comes from [`Ledger::sorted_by_date_desc`].
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

/// Transaction-list search: free text over description and merchant plus
/// optional exact category and type.
#[derive(Debug, Clone, Default)]
pub struct TransactionQuery {
    pub term: String,
    pub category: Option<String>,
    pub kind: Option<TransactionType>,
}

impl TransactionQuery {
    pub fn matches(&self, tx: &Transaction) -> bool {
        let term = self.term.trim().to_lowercase();
        let matches_search = term.is_empty()
            || tx.description.to_lowercase().contains(&term)
            || tx
                .merchant
                .as_deref()
                .is_some_and(|m| m.to_lowercase().contains(&term));
        let matches_category = self.category.as_deref().map_or(true, |c| tx.category == c);
        let matches_type = self.kind.map_or(true, |k| tx.kind == k);
        matches_search && matches_category && matches_type
    }
}

impl Ledger {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transactions_mut(&mut self) -> &mut [Transaction] {
        &mut self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| FinhubError::UnknownTransaction(id.to_string()))
    }

    pub fn add(&mut self, tx: Transaction) -> Result<()> {
        tx.validate()?;
        if self.get(&tx.id).is_some() {
            return Err(FinhubError::DuplicateId(tx.id));
        }
        self.transactions.insert(0, tx);
        Ok(())
    }

    /// Prepend a batch, e.g. the output of a file upload. Nothing is added
    /// unless every record is valid and every id is new.
    pub fn extend_front(&mut self, batch: Vec<Transaction>) -> Result<usize> {
        let mut seen: HashSet<&str> = self.transactions.iter().map(|t| t.id.as_str()).collect();
        for tx in &batch {
            tx.validate()?;
            if !seen.insert(tx.id.as_str()) {
                return Err(FinhubError::DuplicateId(tx.id.clone()));
            }
        }
        let added = batch.len();
        self.transactions.splice(0..0, batch);
        Ok(added)
    }

    /// Drop records whose id is already stored or appears earlier in the
    /// batch. Returns how many were dropped.
    pub fn retain_unseen(&self, batch: &mut Vec<Transaction>) -> usize {
        let mut seen: HashSet<String> = self.transactions.iter().map(|t| t.id.clone()).collect();
        let before = batch.len();
        batch.retain(|t| {
            let fresh = seen.insert(t.id.clone());
            if !fresh {
                tracing::warn!(id = %t.id, "dropping duplicate transaction");
            }
            fresh
        });
        before - batch.len()
    }

    /// Replace the stored record that has the same id.
    pub fn update(&mut self, tx: Transaction) -> Result<()> {
        tx.validate()?;
        let idx = self.position(&tx.id)?;
        self.transactions[idx] = tx;
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> Result<Transaction> {
        let idx = self.position(id)?;
        Ok(self.transactions.remove(idx))
    }

    /// Newest first; transactions on the same date keep their stored order.
    pub fn sorted_by_date_desc(&self) -> Vec<&Transaction> {
        let mut rows: Vec<&Transaction> = self.transactions.iter().collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows
    }

    pub fn search(&self, query: &TransactionQuery) -> Vec<&Transaction> {
        self.sorted_by_date_desc()
            .into_iter()
            .filter(|t| query.matches(t))
            .collect()
    }

    /// `manual-<millis>`, bumped until it does not collide with a stored id.
    pub fn next_manual_id(&self, now_millis: i64) -> String {
        let mut stamp = now_millis;
        loop {
            let id = format!("manual-{stamp}");
            if self.get(&id).is_none() {
                return id;
            }
            stamp += 1;
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no ledger file yet, starting empty");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let transactions: Vec<Transaction> = serde_json::from_str(&content)?;
        for tx in &transactions {
            tx.validate()?;
        }
        tracing::debug!(path = %path.display(), count = transactions.len(), "loaded ledger");
        Ok(Self { transactions })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.transactions)?;
        std::fs::write(path, format!("{json}\n"))?;
        tracing::debug!(path = %path.display(), count = self.transactions.len(), "saved ledger");
        Ok(())
    }
}
