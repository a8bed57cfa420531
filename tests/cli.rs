use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Env {
    config: TempDir,
    data: TempDir,
}

impl Env {
    fn new() -> Self {
        let env = Self {
            config: TempDir::new().unwrap(),
            data: TempDir::new().unwrap(),
        };
        env.cmd()
            .args(["init", "--data-dir"])
            .arg(env.data.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Data directory:"));
        env
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("finhub").unwrap();
        cmd.env("FINHUB_CONFIG_DIR", self.config.path())
            .env_remove("FINHUB_LOG");
        cmd
    }

    fn add(&self, date: &str, description: &str, amount: &str, category: &str, kind: &str) {
        self.cmd()
            .args([
                "tx",
                "add",
                "--date",
                date,
                "--description",
                description,
                "--amount",
                amount,
                "--category",
                category,
                "--type",
                kind,
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Added manual-"));
    }
}

#[test]
fn test_init_creates_empty_ledger() {
    let env = Env::new();
    assert!(env.data.path().join("transactions.json").exists());
    env.cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Transactions:  0"));
}

#[test]
fn test_add_then_list() {
    let env = Env::new();
    env.add("2024-03-15", "Whole Foods", "100", "Groceries", "expense");
    env.add("2024-03-14", "Paycheck", "2000", "Salary", "income");

    env.cmd()
        .args(["tx", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Whole Foods"))
        .stdout(predicate::str::contains("-$100.00"))
        .stdout(predicate::str::contains("+$2,000.00"));

    env.cmd()
        .args(["tx", "list", "--type", "income"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Paycheck"))
        .stdout(predicate::str::contains("Whole Foods").not());
}

#[test]
fn test_report_json_totals() {
    let env = Env::new();
    env.add("2024-03-15", "Whole Foods", "100", "Groceries", "expense");
    env.add("2024-03-14", "Paycheck", "2000", "Salary", "income");
    env.add("2024-05-01", "Flight", "400", "Travel", "expense");

    let out = env
        .cmd()
        .args(["report", "--from", "2024-03-01", "--to", "2024-03-31", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["totals"]["totalIncome"], 2000.0);
    assert_eq!(report["totals"]["totalExpenses"], 100.0);
    assert_eq!(report["totals"]["netSavings"], 1900.0);
    assert_eq!(report["transactionCount"], 2);
    assert_eq!(report["topExpenses"][0]["category"], "Groceries");
    assert_eq!(report["trend"].as_array().unwrap().len(), 12);
}

#[test]
fn test_report_category_filter() {
    let env = Env::new();
    env.add("2024-03-15", "Whole Foods", "100", "Groceries", "expense");
    env.add("2024-03-16", "Flight", "400", "Travel", "expense");

    let out = env
        .cmd()
        .args(["report", "--from", "2024-03-01", "--category", "Travel", "--json"])
        .output()
        .unwrap();
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["totals"]["totalExpenses"], 400.0);
    assert_eq!(report["breakdown"].as_array().unwrap().len(), 1);
}

#[test]
fn test_negative_amount_rejected() {
    let env = Env::new();
    env.cmd()
        .args(["tx", "add", "--description", "Refund", "--amount=-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount"));
}

#[test]
fn test_edit_and_delete() {
    let env = Env::new();
    env.add("2024-03-15", "UBER TRIP", "25", "Other Expense", "expense");

    let ledger = std::fs::read_to_string(env.data.path().join("transactions.json")).unwrap();
    let rows: serde_json::Value = serde_json::from_str(&ledger).unwrap();
    let id = rows[0]["id"].as_str().unwrap().to_string();

    env.cmd()
        .args(["tx", "edit", &id, "--amount", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated transaction"));

    env.cmd()
        .args(["tx", "list"])
        .assert()
        .stdout(predicate::str::contains("-$30.00"));

    env.cmd()
        .args(["tx", "delete", &id])
        .assert()
        .success();

    env.cmd()
        .args(["tx", "delete", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown transaction"));
}

#[test]
fn test_categorize_uses_keyword_rules() {
    let env = Env::new();
    env.add("2024-03-15", "UBER TRIP HELP.UBER.COM", "25", "Other Expense", "expense");
    env.add("2024-03-16", "Mystery Shop", "10", "Other Expense", "expense");

    env.cmd()
        .arg("categorize")
        .assert()
        .success()
        .stdout(predicate::str::contains("Categorized: 1"))
        .stdout(predicate::str::contains("Still uncategorized: 1"));

    env.cmd()
        .args(["tx", "list", "--category", "Transportation"])
        .assert()
        .stdout(predicate::str::contains("UBER TRIP"));
}

#[test]
fn test_demo_then_export() {
    let env = Env::new();
    env.cmd()
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Demo data loaded."));

    let out_path = env.data.path().join("out.csv");
    env.cmd()
        .args(["export", "--range", "year", "--output"])
        .arg(&out_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let csv = std::fs::read_to_string(&out_path).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("Date,Description,Category,Type,Amount"));
    assert!(lines.next().is_some());
}

#[test]
fn test_upload_missing_file_is_reported() {
    let env = Env::new();
    env.cmd()
        .args(["upload", "/nonexistent/statement.pdf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("failed"))
        .stdout(predicate::str::contains("Added 0 transactions"));
}

#[test]
fn test_range_conflicts_with_dates() {
    let env = Env::new();
    env.cmd()
        .args(["report", "--range", "week", "--to", "2024-01-01"])
        .assert()
        .failure();
}
