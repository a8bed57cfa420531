use regex::Regex;

use crate::categories::CATCH_ALL_EXPENSE;
use crate::models::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchType {
    Contains,
    StartsWith,
    Regex,
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub pattern: String,
    pub category: String,
    pub match_type: MatchType,
    pub priority: i64,
}

// (pattern, category, match type, priority) suggestions applied to
// extracted statements.
const KEYWORD_RULES: &[(&str, &str, MatchType, i64)] = &[
    ("UBER EATS", "Dining Out", MatchType::Contains, 10),
    ("UBER", "Transportation", MatchType::Contains, 0),
    ("LYFT", "Transportation", MatchType::Contains, 0),
    ("STARBUCKS", "Dining Out", MatchType::Contains, 0),
    (r"(?i)^safeway\b", "Groceries", MatchType::Regex, 0),
    ("WHOLE FOODS", "Groceries", MatchType::Contains, 0),
    ("NETFLIX", "Entertainment", MatchType::Contains, 0),
    ("SPOTIFY", "Entertainment", MatchType::Contains, 0),
    ("AMAZON", "Shopping", MatchType::Contains, 0),
    ("SHELL", "Transportation", MatchType::StartsWith, 0),
    ("CHEVRON", "Transportation", MatchType::Contains, 0),
    ("PG&E", "Bills & Utilities", MatchType::Contains, 0),
    ("COMCAST", "Bills & Utilities", MatchType::Contains, 0),
    ("CVS", "Healthcare", MatchType::Contains, 0),
    ("WALGREENS", "Healthcare", MatchType::Contains, 0),
];

pub fn default_rules() -> Vec<Rule> {
    KEYWORD_RULES
        .iter()
        .map(|&(pattern, category, match_type, priority)| Rule {
            pattern: pattern.to_string(),
            category: category.to_string(),
            match_type,
            priority,
        })
        .collect()
}

fn matches(description: &str, pattern: &str, match_type: MatchType) -> bool {
    let desc_upper = description.to_uppercase();
    let pat_upper = pattern.to_uppercase();
    match match_type {
        MatchType::Contains => desc_upper.contains(&pat_upper),
        MatchType::StartsWith => desc_upper.starts_with(&pat_upper),
        MatchType::Regex => Regex::new(pattern)
            .map(|re| re.is_match(description))
            .unwrap_or(false),
    }
}

/// Category suggested by the highest-priority matching rule. Among rules of
/// equal priority the first one listed wins.
pub fn suggest<'a>(rules: &'a [Rule], description: &str) -> Option<&'a str> {
    let mut best: Option<&Rule> = None;
    for rule in rules {
        if !matches(description, &rule.pattern, rule.match_type) {
            continue;
        }
        if best.map_or(true, |b| rule.priority > b.priority) {
            best = Some(rule);
        }
    }
    best.map(|r| r.category.as_str())
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CategorizeResult {
    pub categorized: usize,
    pub unmatched: usize,
}

/// Re-categorize expenses still sitting in the catch-all category. The old
/// category is kept in `original_category`.
pub fn categorize_transactions(transactions: &mut [Transaction], rules: &[Rule]) -> CategorizeResult {
    let mut result = CategorizeResult::default();
    for tx in transactions
        .iter_mut()
        .filter(|t| t.is_expense() && t.category == CATCH_ALL_EXPENSE)
    {
        let text = match &tx.merchant {
            Some(m) => format!("{} {m}", tx.description),
            None => tx.description.clone(),
        };
        match suggest(rules, &text) {
            Some(category) => {
                tracing::debug!(id = %tx.id, %category, "categorized transaction");
                tx.original_category = Some(std::mem::replace(&mut tx.category, category.to_string()));
                result.categorized += 1;
            }
            None => result.unmatched += 1,
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{parse_date, TransactionType};

    fn uncategorized(id: &str, description: &str) -> Transaction {
        Transaction::new(
            id,
            parse_date("2025-01-15").unwrap(),
            description,
            50.0,
            CATCH_ALL_EXPENSE,
            TransactionType::Expense,
        )
        .unwrap()
    }

    #[test]
    fn test_contains_rule_is_case_insensitive() {
        let rules = default_rules();
        assert_eq!(suggest(&rules, "UBER TRIP HELP.UBER.COM"), Some("Transportation"));
        assert_eq!(suggest(&rules, "Starbucks #1234"), Some("Dining Out"));
        assert_eq!(suggest(&rules, "Local Bistro"), None);
    }

    #[test]
    fn test_default_rules_prefer_specific_match() {
        let rules = default_rules();
        assert_eq!(suggest(&rules, "UBER EATS 8005928996"), Some("Dining Out"));
        assert_eq!(suggest(&rules, "Safeway Store #1802"), Some("Groceries"));
        assert_eq!(suggest(&rules, "Shell Gas Station"), Some("Transportation"));
        assert_eq!(suggest(&rules, "SEASHELL GIFTS"), None);
    }

    #[test]
    fn test_starts_with_rule() {
        let rules = vec![Rule {
            pattern: "SHELL".into(),
            category: "Transportation".into(),
            match_type: MatchType::StartsWith,
            priority: 0,
        }];
        assert_eq!(suggest(&rules, "Shell Gas Station"), Some("Transportation"));
        assert_eq!(suggest(&rules, "SEASHELL GIFTS"), None);
    }

    #[test]
    fn test_regex_rule() {
        let rules = vec![Rule {
            pattern: r"^Safeway Store #\d+$".into(),
            category: "Groceries".into(),
            match_type: MatchType::Regex,
            priority: 0,
        }];
        assert_eq!(suggest(&rules, "Safeway Store #1802"), Some("Groceries"));
        assert_eq!(suggest(&rules, "Safeway Fuel"), None);
    }

    #[test]
    fn test_higher_priority_wins() {
        let mut rules = default_rules();
        rules.push(Rule {
            pattern: "AMAZON PRIME VIDEO".into(),
            category: "Entertainment".into(),
            match_type: MatchType::Contains,
            priority: 10,
        });
        assert_eq!(suggest(&rules, "AMAZON PRIME VIDEO"), Some("Entertainment"));
        assert_eq!(suggest(&rules, "Amazon.com"), Some("Shopping"));
    }

    #[test]
    fn test_categorize_records_original_category() {
        let mut txns = vec![uncategorized("a", "NETFLIX.COM"), uncategorized("b", "RANDOM VENDOR XYZ")];
        let result = categorize_transactions(&mut txns, &default_rules());
        assert_eq!(result, CategorizeResult { categorized: 1, unmatched: 1 });
        assert_eq!(txns[0].category, "Entertainment");
        assert_eq!(txns[0].original_category.as_deref(), Some(CATCH_ALL_EXPENSE));
        assert_eq!(txns[1].category, CATCH_ALL_EXPENSE);
        assert!(txns[1].original_category.is_none());
    }

    #[test]
    fn test_categorize_leaves_classified_transactions_alone() {
        let mut tx = uncategorized("a", "CVS Pharmacy");
        tx.category = "Shopping".into();
        let mut txns = vec![tx];
        let result = categorize_transactions(&mut txns, &default_rules());
        assert_eq!(result, CategorizeResult::default());
        assert_eq!(txns[0].category, "Shopping");
    }
}
