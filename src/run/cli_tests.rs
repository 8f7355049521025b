#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;
use crate::api::fake::{Call, FakeApi};

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

// ── add ───────────────────────────────────────────────────────

#[test]
fn test_parse_add_args() {
    let txn = parse_add_args(&args(&["expense", "12.50", "Transport", "Bus", "pass"])).unwrap();
    assert_eq!(txn.transaction_type, TransactionType::Expense);
    assert_eq!(txn.amount, dec!(12.50));
    assert_eq!(txn.category, Category::Transport);
    assert_eq!(txn.description, "Bus pass");
}

#[test]
fn test_parse_add_args_custom_category() {
    let txn = parse_add_args(&args(&["income", "300", "Other: Freelance", "Logo"])).unwrap();
    assert_eq!(txn.transaction_type, TransactionType::Income);
    assert_eq!(txn.category, Category::Custom("Freelance".into()));
}

#[test]
fn test_parse_add_args_errors() {
    assert!(parse_add_args(&args(&["expense", "10"])).is_err());
    assert!(parse_add_args(&args(&["spend", "10", "Rent", "May"])).is_err());
    assert!(parse_add_args(&args(&["expense", "-10", "Rent", "May"])).is_err());
    assert!(parse_add_args(&args(&["expense", "10", "rent", "May"])).is_err());
    assert!(parse_add_args(&args(&["expense", "10", "Rent"])).is_err());
}

#[test]
fn test_add_posts_transaction() {
    let api = FakeApi::default();
    as_cli(&args(&["fintrack", "add", "expense", "40", "Groceries", "Market"]), &api).unwrap();

    let stored = api.stored_transactions();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].amount, dec!(40));
    assert_eq!(stored[0].description, "Market");
}

#[test]
fn test_add_failure_is_error() {
    let api = FakeApi::default();
    api.fail_on(Call::CreateTransaction);
    let err = as_cli(&args(&["fintrack", "add", "expense", "40", "Rent", "May"]), &api).unwrap_err();
    assert!(err.to_string().contains("Failed to add transaction"));
}

// ── set-budget / delete ───────────────────────────────────────

#[test]
fn test_parse_budget_args() {
    let today = NaiveDate::from_ymd_opt(2025, 2, 14).unwrap();
    let req = parse_budget_args(&args(&["Other", "75"]), today).unwrap();
    assert_eq!(req.category, Category::Other);
    assert_eq!(req.amount, dec!(75));
    assert_eq!((req.month, req.year), (2, 2025));

    assert!(parse_budget_args(&args(&["Rent"]), today).is_err());
    assert!(parse_budget_args(&args(&["Rent", "0"]), today).is_err());
}

#[test]
fn test_delete_requires_single_id() {
    let api = FakeApi::default();
    assert!(as_cli(&args(&["fintrack", "delete"]), &api).is_err());
    as_cli(&args(&["fintrack", "delete", "t9"]), &api).unwrap();
    assert_eq!(api.calls(), vec![Call::DeleteTransaction]);
}

// ── reads ─────────────────────────────────────────────────────

#[test]
fn test_summary_fails_when_store_rejects() {
    let api = FakeApi::default();
    api.fail_on(Call::ListBudgets);
    assert!(as_cli(&args(&["fintrack", "summary"]), &api).is_err());
}

#[test]
fn test_unknown_command() {
    let api = FakeApi::default();
    assert!(as_cli(&args(&["fintrack", "frobnicate"]), &api).is_err());
}

#[test]
fn test_export_command_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let api = FakeApi::default();

    as_cli(&args(&["fintrack", "export", path.to_str().unwrap()]), &api).unwrap();

    assert!(path.exists());
}

// ── paths ─────────────────────────────────────────────────────

#[test]
fn test_shellexpand() {
    assert_eq!(shellexpand("/tmp/out.csv"), "/tmp/out.csv");
    assert_eq!(shellexpand("out.csv"), "out.csv");
    let expanded = shellexpand("~/out.csv");
    assert!(!expanded.starts_with('~'));
    assert!(expanded.ends_with("out.csv"));
}

#[test]
fn test_default_export_path() {
    assert!(default_export_path().ends_with("fintrack-export.csv"));
}
