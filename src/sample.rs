use chrono::{Datelike, Months, NaiveDate};
use rand::Rng;

use crate::categories::CATCH_ALL_EXPENSE;
use crate::models::{Source, Transaction, TransactionType};

const MONTHS_OF_HISTORY: u32 = 6;
const SALARY: f64 = 8500.0;

/// Expense category, its merchants, and the (min, spread) of a typical amount.
struct MerchantGroup {
    category: &'static str,
    merchants: &'static [&'static str],
    min: f64,
    spread: f64,
}

const MERCHANTS: &[MerchantGroup] = &[
    MerchantGroup {
        category: "Groceries",
        merchants: &["Whole Foods Market", "Safeway Store #1802", "Trader Joe's", "Kroger", "Target Grocery"],
        min: 50.0,
        spread: 150.0,
    },
    MerchantGroup {
        category: "Transportation",
        merchants: &["UBER TRIP HELP.UBER.COM", "LYFT RIDE", "Shell Gas Station", "Chevron", "Metro Transit"],
        min: 10.0,
        spread: 60.0,
    },
    MerchantGroup {
        category: "Entertainment",
        merchants: &["NETFLIX.COM", "Spotify Premium", "AMC Theaters", "Steam Games", "Disney+"],
        min: 10.0,
        spread: 50.0,
    },
    MerchantGroup {
        category: "Dining Out",
        merchants: &["Starbucks", "McDonald's", "Chipotle Mexican Grill", "Pizza Hut", "Local Bistro"],
        min: 15.0,
        spread: 80.0,
    },
    MerchantGroup {
        category: "Shopping",
        merchants: &["Amazon.com", "Best Buy", "Walmart", "Nike Store", "Apple Store"],
        min: 30.0,
        spread: 300.0,
    },
    MerchantGroup {
        category: "Bills & Utilities",
        merchants: &["Comcast Internet", "PG&E Electric", "AT&T Mobile", "Water Utility", "Rent Payment"],
        min: 50.0,
        spread: 200.0,
    },
    MerchantGroup {
        category: "Healthcare",
        merchants: &["CVS Pharmacy", "Kaiser Permanente", "Walgreens", "Dr. Smith Office", "LabCorp"],
        min: 20.0,
        spread: 200.0,
    },
    MerchantGroup {
        category: "Travel",
        merchants: &["United Airlines", "Marriott Hotel", "Airbnb", "Hertz Car Rental", "Expedia"],
        min: 100.0,
        spread: 1000.0,
    },
];

fn days_in_month(first: NaiveDate) -> u32 {
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map_or(28, |last| last.day())
}

fn round_cents(val: f64) -> f64 {
    (val * 100.0).round() / 100.0
}

fn pick_source<R: Rng>(rng: &mut R) -> Source {
    if rng.gen_bool(0.3) {
        Source::Manual
    } else if rng.gen_bool(0.5) {
        Source::Csv
    } else {
        Source::Pdf
    }
}

/// Six months of plausible household transactions ending at `today`'s month,
/// newest first.
pub fn generate<R: Rng>(today: NaiveDate, rng: &mut R) -> Vec<Transaction> {
    let this_month = today - chrono::Duration::days(i64::from(today.day0()));
    let mut txns = Vec::new();

    for offset in (0..MONTHS_OF_HISTORY).rev() {
        let Some(first) = this_month.checked_sub_months(Months::new(offset)) else {
            continue;
        };
        let month_days = days_in_month(first);

        txns.push(Transaction {
            id: format!("salary-{offset}"),
            date: first,
            description: "Monthly Salary - Tech Corp".to_string(),
            amount: SALARY,
            category: "Salary".to_string(),
            kind: TransactionType::Income,
            merchant: Some("Tech Corp".to_string()),
            notes: None,
            source: Source::Csv,
            original_category: None,
        });

        if rng.gen_bool(0.7) {
            txns.push(Transaction {
                id: format!("freelance-{offset}"),
                date: first + chrono::Duration::days(14),
                description: "Freelance Project Payment".to_string(),
                amount: round_cents(1500.0 + rng.gen::<f64>() * 2000.0),
                category: "Freelance".to_string(),
                kind: TransactionType::Income,
                merchant: Some("Client ABC".to_string()),
                notes: None,
                source: Source::Manual,
                original_category: None,
            });
        }

        let count = rng.gen_range(40..60);
        for i in 0..count {
            let group = &MERCHANTS[rng.gen_range(0..MERCHANTS.len())];
            let merchant = group.merchants[rng.gen_range(0..group.merchants.len())];
            let day = rng.gen_range(0..month_days);
            let original = if rng.gen_bool(0.2) {
                CATCH_ALL_EXPENSE
            } else {
                group.category
            };
            txns.push(Transaction {
                id: format!("trans-{offset}-{i}"),
                date: first + chrono::Duration::days(i64::from(day)),
                description: merchant.to_string(),
                amount: round_cents(group.min + rng.gen::<f64>() * group.spread),
                category: group.category.to_string(),
                kind: TransactionType::Expense,
                merchant: Some(merchant.to_string()),
                notes: None,
                source: pick_source(rng),
                original_category: Some(original.to_string()),
            });
        }
    }

    txns.sort_by(|a, b| b.date.cmp(&a.date));
    txns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_date;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_covers_six_months() {
        let today = parse_date("2024-08-20").unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let txns = generate(today, &mut rng);

        let salaries: Vec<_> = txns.iter().filter(|t| t.category == "Salary").collect();
        assert_eq!(salaries.len(), 6);
        assert!(salaries.iter().all(|t| t.date.day() == 1 && t.amount == SALARY));

        let oldest = txns.iter().map(|t| t.date).min().unwrap();
        let newest = txns.iter().map(|t| t.date).max().unwrap();
        assert!(oldest >= parse_date("2024-03-01").unwrap());
        assert!(newest <= parse_date("2024-08-31").unwrap());
    }

    #[test]
    fn test_generate_is_sorted_and_valid() {
        let today = parse_date("2024-02-10").unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let txns = generate(today, &mut rng);
        assert!(txns.windows(2).all(|w| w[0].date >= w[1].date));
        assert!(txns.iter().all(|t| t.validate().is_ok()));
        let expenses = txns.iter().filter(|t| t.is_expense()).count();
        assert!((240..360).contains(&expenses), "got {expenses}");
    }

    #[test]
    fn test_generate_ids_are_unique() {
        let today = parse_date("2024-12-31").unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let txns = generate(today, &mut rng);
        let mut ids: Vec<_> = txns.iter().map(|t| t.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), txns.len());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(parse_date("2024-02-01").unwrap()), 29);
        assert_eq!(days_in_month(parse_date("2023-02-01").unwrap()), 28);
        assert_eq!(days_in_month(parse_date("2024-12-01").unwrap()), 31);
    }
}
