#![allow(clippy::unwrap_used)]

use chrono::Utc;
use rust_decimal_macros::dec;

use super::util::*;
use crate::models::{Category, Transaction, TransactionType};

fn txn(kind: TransactionType, amount: rust_decimal::Decimal) -> Transaction {
    Transaction {
        id: "t".into(),
        account_id: "a".into(),
        amount,
        transaction_type: kind,
        category: Category::Rent,
        description: String::new(),
        date: Utc::now(),
    }
}

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("rent", 10), "rent");
    assert_eq!(truncate("rent", 4), "rent");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("Other: Gym membership", 10), "Other: Gy…");
}

#[test]
fn test_truncate_edges() {
    assert_eq!(truncate("", 5), "");
    assert_eq!(truncate("groceries", 0), "");
    assert_eq!(truncate("groceries", 1), "…");
}

#[test]
fn test_truncate_multibyte() {
    assert_eq!(truncate("café crème", 5), "café…");
}

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount() {
    assert_eq!(format_amount(dec!(0)), "$0.00");
    assert_eq!(format_amount(dec!(5)), "$5.00");
    assert_eq!(format_amount(dec!(1.5)), "$1.50");
    assert_eq!(format_amount(dec!(999.99)), "$999.99");
    assert_eq!(format_amount(dec!(1234567.89)), "$1,234,567.89");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-42.5)), "-$42.50");
    assert_eq!(format_amount(dec!(-99999.01)), "-$99,999.01");
}

#[test]
fn test_signed_amount_follows_type() {
    assert_eq!(signed_amount(&txn(TransactionType::Income, dec!(2500))), "+$2,500.00");
    assert_eq!(signed_amount(&txn(TransactionType::Expense, dec!(12))), "-$12.00");
}

// ── text_bar ──────────────────────────────────────────────────

#[test]
fn test_text_bar() {
    assert_eq!(text_bar(0.0, 4), "[----]");
    assert_eq!(text_bar(0.5, 4), "[##--]");
    assert_eq!(text_bar(1.0, 4), "[####]");
}

#[test]
fn test_text_bar_clamps() {
    assert_eq!(text_bar(3.0, 4), "[####]");
    assert_eq!(text_bar(-1.0, 4), "[----]");
}

// ── scrolling ─────────────────────────────────────────────────

#[test]
fn test_scroll_down_follows_cursor() {
    let (mut index, mut scroll) = (0, 0);
    for _ in 0..5 {
        scroll_down(&mut index, &mut scroll, 10, 3);
    }
    assert_eq!(index, 5);
    assert_eq!(scroll, 3);
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (2, 0);
    scroll_down(&mut index, &mut scroll, 3, 10);
    assert_eq!(index, 2);
}

#[test]
fn test_scroll_up_and_jumps() {
    let (mut index, mut scroll) = (5, 5);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (4, 4));

    scroll_to_bottom(&mut index, &mut scroll, 10, 4);
    assert_eq!((index, scroll), (9, 6));

    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}
