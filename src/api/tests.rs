#![allow(clippy::unwrap_used)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

use rust_decimal_macros::dec;

use super::*;
use crate::models::{Category, TransactionType};

// ── One-shot HTTP responder ───────────────────────────────────

struct Captured {
    method: String,
    path: String,
    body: String,
}

fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let captured = read_request(&stream);
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        captured
    });
    (format!("http://{addr}"), handle)
}

fn read_request(stream: &TcpStream) -> Captured {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut request_line = String::new();
    reader.read_line(&mut request_line).unwrap();

    let mut content_length = 0;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        if line == "\r\n" || line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap();
            }
        }
    }

    let mut body = vec![0; content_length];
    reader.read_exact(&mut body).unwrap();

    let mut parts = request_line.split_whitespace();
    Captured {
        method: parts.next().unwrap().to_string(),
        path: parts.next().unwrap().to_string(),
        body: String::from_utf8(body).unwrap(),
    }
}

fn client(base_url: &str) -> HttpApi {
    HttpApi::new(base_url, Box::new(FixedAccount("acct-42".into()))).unwrap()
}

// ── Reads ─────────────────────────────────────────────────────

#[test]
fn test_list_transactions() {
    let (url, server) = serve_once(
        "200 OK",
        r#"[{"id":"t1","accountId":"a","amount":12.5,"transactionType":"Expense","category":"Rent","description":"June","date":"2024-06-01T00:00:00Z"}]"#,
    );
    let txns = client(&url).list_transactions().unwrap();
    let req = server.join().unwrap();

    assert_eq!(req.method, "GET");
    assert_eq!(req.path, "/Transaction");
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].amount, dec!(12.5));
    assert_eq!(txns[0].category, Category::Rent);
}

#[test]
fn test_list_budgets() {
    let (url, server) = serve_once(
        "200 OK",
        r#"[{"id":"b1","category":"Other: Gym","amount":40,"month":5,"year":2024}]"#,
    );
    let budgets = client(&url).list_budgets().unwrap();
    let req = server.join().unwrap();

    assert_eq!(req.method, "GET");
    assert_eq!(req.path, "/Budget");
    assert_eq!(budgets[0].category, Category::Custom("Gym".into()));
}

#[test]
fn test_base_url_path_prefix_is_kept() {
    let (url, server) = serve_once("200 OK", "[]");
    let budgets = client(&format!("{url}/api/")).list_budgets().unwrap();
    let req = server.join().unwrap();

    assert!(budgets.is_empty());
    assert_eq!(req.path, "/api/Budget");
}

// ── Writes ────────────────────────────────────────────────────

#[test]
fn test_create_transaction_adds_account_and_date() {
    let (url, server) = serve_once("201 Created", "");
    let txn = NewTransaction {
        amount: dec!(19.99),
        transaction_type: TransactionType::Expense,
        category: Category::Custom("Gym".into()),
        description: "Day pass".into(),
    };
    client(&url).create_transaction(&txn).unwrap();
    let req = server.join().unwrap();

    assert_eq!(req.method, "POST");
    assert_eq!(req.path, "/Transaction");
    let body: serde_json::Value = serde_json::from_str(&req.body).unwrap();
    assert_eq!(body["accountId"], "acct-42");
    assert_eq!(body["category"], "Other: Gym");
    assert_eq!(body["transactionType"], "Expense");
    assert_eq!(body["description"], "Day pass");
    assert_eq!(body["amount"], 19.99);
    let date = body["date"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(date).is_ok(), "{date}");
}

#[test]
fn test_delete_transaction_path() {
    let (url, server) = serve_once("204 No Content", "");
    client(&url).delete_transaction("abc-123").unwrap();
    let req = server.join().unwrap();

    assert_eq!(req.method, "DELETE");
    assert_eq!(req.path, "/Transaction/abc-123");
}

#[test]
fn test_delete_transaction_id_is_one_segment() {
    let (url, server) = serve_once("200 OK", "");
    client(&url).delete_transaction("a/b").unwrap();
    let req = server.join().unwrap();

    assert_eq!(req.path, "/Transaction/a%2Fb");
}

#[test]
fn test_set_budget_body() {
    let (url, server) = serve_once("200 OK", "{}");
    let req = SetBudgetRequest {
        category: Category::Groceries,
        amount: dec!(300),
        month: 7,
        year: 2024,
    };
    client(&url).set_budget(&req).unwrap();
    let captured = server.join().unwrap();

    assert_eq!(captured.method, "POST");
    assert_eq!(captured.path, "/Budget");
    let body: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({"category": "Groceries", "amount": 300.0, "month": 7, "year": 2024})
    );
}

// ── Failures ──────────────────────────────────────────────────

#[test]
fn test_non_success_status_is_rejected() {
    let (url, server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#);
    let err = client(&url)
        .create_transaction(&NewTransaction {
            amount: dec!(1),
            transaction_type: TransactionType::Income,
            category: Category::Other,
            description: String::new(),
        })
        .unwrap_err();
    server.join().unwrap();

    match err {
        ApiError::Rejected { status, .. } => assert_eq!(status.as_u16(), 500),
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[test]
fn test_not_found_is_rejected() {
    let (url, server) = serve_once("404 Not Found", "");
    let err = client(&url).list_budgets().unwrap_err();
    server.join().unwrap();
    assert!(matches!(err, ApiError::Rejected { .. }));
}

#[test]
fn test_bad_json_is_decode_error() {
    let (url, server) = serve_once("200 OK", r#"{"not":"a list"}"#);
    let err = client(&url).list_transactions().unwrap_err();
    server.join().unwrap();
    assert!(matches!(err, ApiError::Decode { .. }));
}

#[test]
fn test_unreachable_store_is_transport_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let err = client(&format!("http://127.0.0.1:{port}"))
        .list_transactions()
        .unwrap_err();
    assert!(matches!(err, ApiError::Transport { .. }));
}

#[test]
fn test_invalid_base_url() {
    for bad in ["not a url", "ftp://localhost:5000", "mailto:someone@example.com"] {
        let result = HttpApi::new(bad, Box::new(FixedAccount("a".into())));
        assert!(matches!(result, Err(ApiError::InvalidUrl(_))), "{bad}");
    }
}

#[test]
fn test_client_init_error_is_not_a_url_error() {
    let source = reqwest::blocking::Client::new()
        .get("not a url")
        .build()
        .unwrap_err();
    let err = ApiError::ClientInit(source);
    assert!(err.to_string().starts_with("failed to build HTTP client"), "{err}");
    assert!(!matches!(err, ApiError::InvalidUrl(_)));
}
