use crate::models::{Category, CategoryType};

/// Color used for categories that have no entry in the category table.
pub const FALLBACK_COLOR: &str = "#64748b";

/// Catch-all category for expenses nobody has classified yet.
pub const CATCH_ALL_EXPENSE: &str = "Other Expense";

// (id, name, color, type)
const DEFAULT_CATEGORIES: &[(&str, &str, &str, CategoryType)] = &[
    ("1", "Groceries", "#10b981", CategoryType::Expense),
    ("2", "Transportation", "#3b82f6", CategoryType::Expense),
    ("3", "Entertainment", "#8b5cf6", CategoryType::Expense),
    ("4", "Bills & Utilities", "#ef4444", CategoryType::Expense),
    ("5", "Shopping", "#f59e0b", CategoryType::Expense),
    ("6", "Dining Out", "#ec4899", CategoryType::Expense),
    ("7", "Healthcare", "#06b6d4", CategoryType::Expense),
    ("8", "Education", "#6366f1", CategoryType::Expense),
    ("9", "Travel", "#84cc16", CategoryType::Expense),
    ("10", "Salary", "#22c55e", CategoryType::Income),
    ("11", "Freelance", "#14b8a6", CategoryType::Income),
    ("12", "Investments", "#0ea5e9", CategoryType::Income),
    ("13", "Other Income", "#10b981", CategoryType::Income),
    ("14", CATCH_ALL_EXPENSE, FALLBACK_COLOR, CategoryType::Expense),
];

pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(id, name, color, kind)| Category {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            kind: *kind,
        })
        .collect()
}

/// Look up a category by its exact name.
pub fn find_category<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
    categories.iter().find(|c| c.name == name)
}

/// Display color for a category name, or [`FALLBACK_COLOR`] when unknown.
pub fn color_for<'a>(categories: &'a [Category], name: &str) -> &'a str {
    find_category(categories, name)
        .map(|c| c.color.as_str())
        .unwrap_or(FALLBACK_COLOR)
}
