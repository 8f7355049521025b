#![allow(clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;

use super::*;
use crate::models::{Category, TransactionType};

fn sample() -> Vec<Transaction> {
    vec![
        Transaction {
            id: "t1".into(),
            account_id: "a".into(),
            amount: dec!(1250),
            transaction_type: TransactionType::Income,
            category: Category::Other,
            description: "Salary".into(),
            date: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        },
        Transaction {
            id: "t2".into(),
            account_id: "a".into(),
            amount: dec!(4.5),
            transaction_type: TransactionType::Expense,
            category: Category::Custom("Coffee, beans".into()),
            description: "Roaster".into(),
            date: Utc.with_ymd_and_hms(2024, 3, 2, 18, 30, 0).unwrap(),
        },
    ]
}

#[test]
fn test_write_csv_rows() {
    let mut buf = Vec::new();
    let count = write_csv(&mut buf, &sample()).unwrap();
    let text = String::from_utf8(buf).unwrap();

    assert_eq!(count, 2);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "date,type,category,description,amount");
    assert_eq!(lines[1], "2024-03-01,Income,Other,Salary,1250.00");
    // Commas inside a label are quoted
    assert_eq!(lines[2], "2024-03-02,Expense,\"Other: Coffee, beans\",Roaster,4.50");
}

#[test]
fn test_write_csv_empty_has_header_only() {
    let mut buf = Vec::new();
    assert_eq!(write_csv(&mut buf, &[]).unwrap(), 0);
    assert_eq!(String::from_utf8(buf).unwrap(), "date,type,category,description,amount\n");
}

#[test]
fn test_export_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    let count = export_to_csv(&path, &sample()).unwrap();

    assert_eq!(count, 2);
    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[1][2], "Other: Coffee, beans");
}

#[test]
fn test_export_to_missing_dir_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.csv");
    assert!(export_to_csv(&path, &sample()).is_err());
}
