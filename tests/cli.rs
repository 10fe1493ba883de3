use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use tempfile::tempdir;

const CONFIG: &str = r#"{
    "revenue_club": 1000.0,
    "revenue_non_members": 500.0,
    "months": 3,
    "tax_rate": 0.1,
    "contingency_rate": 0.05
}"#;

const EXPENSES: &str = r#"[{"name": "rent", "monthly_base_amount": 200.0}]"#;

#[test]
fn prints_table_and_summary_without_export() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    let expenses = dir.path().join("expenses.json");
    fs::write(&config, CONFIG).unwrap();
    fs::write(&expenses, EXPENSES).unwrap();

    let mut cmd = Command::cargo_bin("cashflow_projection").unwrap();
    cmd.current_dir(dir.path())
        .args(["--export", "none", "--config"])
        .arg(&config)
        .arg("--expenses")
        .arg(&expenses)
        .assert()
        .success()
        .stdout(contains("Taxes (10%)"))
        .stdout(contains("Total Profit:    3,420.00"))
        .stdout(contains("Payback:         Aug 2025"));

    assert!(!dir.path().join("cashflow.xlsx").exists());
}

#[test]
fn writes_csv_export() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    let output = dir.path().join("projection.csv");
    fs::write(&config, CONFIG).unwrap();

    let mut cmd = Command::cargo_bin("cashflow_projection").unwrap();
    cmd.args(["--export", "csv", "--start", "2026-01-31", "--config"])
        .arg(&config)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(contains("Exported to"));

    let csv = fs::read_to_string(&output).unwrap();
    let dates: Vec<_> = csv.lines().skip(1).map(|l| l.split(',').next().unwrap()).collect();
    assert_eq!(dates, vec!["2026-01-31", "2026-02-28", "2026-03-31"]);
}

#[test]
fn validation_failure_exits_non_zero() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, CONFIG).unwrap();

    let mut cmd = Command::cargo_bin("cashflow_projection").unwrap();
    cmd.args(["--export", "none", "--months", "0", "--config"])
        .arg(&config)
        .assert()
        .code(2)
        .stderr(contains("projection months must be positive"));
}

#[test]
fn duplicate_expense_names_are_rejected() {
    let dir = tempdir().unwrap();
    let expenses = dir.path().join("expenses.json");
    fs::write(
        &expenses,
        r#"[{"name": "rent", "monthly_base_amount": 1.0}, {"name": "rent", "monthly_base_amount": 2.0}]"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("cashflow_projection").unwrap();
    cmd.args(["--export", "none", "--expenses"])
        .arg(&expenses)
        .assert()
        .code(2)
        .stderr(contains("duplicate expense name: rent"));
}

#[test]
fn default_export_writes_workbook() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, CONFIG).unwrap();

    let mut cmd = Command::cargo_bin("cashflow_projection").unwrap();
    cmd.current_dir(dir.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(contains("cashflow.xlsx"));

    let bytes = fs::read(dir.path().join("cashflow.xlsx")).unwrap();
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn expense_named_after_a_column_is_rejected() {
    let dir = tempdir().unwrap();
    let expenses = dir.path().join("expenses.json");
    fs::write(&expenses, r#"{"Capex": 200.0}"#).unwrap();

    let mut cmd = Command::cargo_bin("cashflow_projection").unwrap();
    cmd.args(["--export", "none", "--expenses"])
        .arg(&expenses)
        .assert()
        .code(2)
        .stderr(contains("collides with a projection column label"));
}
