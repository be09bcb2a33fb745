//! Integration tests for transaction CRUD and input validation.

mod common;

use axum::http::StatusCode;
use common::TestClient;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
struct TransactionRow {
    id: String,
    date: String,
    #[serde(rename = "type")]
    txn_type: String,
    amount: f64,
    category: String,
    description: String,
}

#[tokio::test]
async fn test_list_empty() {
    let client = TestClient::new();
    let (status, body) = client.get("/api/transactions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");
}

#[tokio::test]
async fn test_create_and_list() {
    let client = TestClient::new();
    assert!(
        client
            .create_transaction("2024-01-05", "debit", 120.0, "", "lunch at mess")
            .await
    );

    let (status, parsed): (_, Option<Vec<TransactionRow>>) =
        client.get_json("/api/transactions").await;
    assert_eq!(status, StatusCode::OK);
    let rows = parsed.expect("Failed to parse transaction list");
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert!(!row.id.is_empty());
    assert_eq!(row.date, "2024-01-05");
    assert_eq!(row.txn_type, "debit");
    assert_eq!(row.amount, 120.0);
    // No category supplied -> reserved fallback
    assert_eq!(row.category, "Other");
    // Description is trimmed and upper-cased on save
    assert_eq!(row.description, "LUNCH AT MESS");
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let client = TestClient::new();
    for (date, desc) in [
        ("2024-01-01", "FIRST"),
        ("2024-01-02", "SECOND"),
        ("2024-01-03", "THIRD"),
    ] {
        assert!(
            client
                .create_transaction(date, "debit", 10.0, "", desc)
                .await
        );
    }

    let (_, parsed): (_, Option<Vec<TransactionRow>>) = client.get_json("/api/transactions").await;
    let rows = parsed.unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].description, "THIRD");
    assert_eq!(rows[2].description, "FIRST");
}

#[tokio::test]
async fn test_list_limit() {
    let client = TestClient::new();
    for i in 1..=5 {
        assert!(
            client
                .create_transaction("2024-01-01", "debit", i as f64, "", "X")
                .await
        );
    }

    let (_, parsed): (_, Option<Vec<TransactionRow>>) =
        client.get_json("/api/transactions?limit=3").await;
    assert_eq!(parsed.unwrap().len(), 3);
}

#[tokio::test]
async fn test_create_validation_errors() {
    let client = TestClient::new();

    // Empty description
    let (status, body) = client
        .post_json(
            "/api/transactions",
            json!({"date": "2024-01-01", "type": "debit", "amount": 10.0, "description": "   "}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("error"));

    // Zero and negative amounts
    for amount in [0.0, -5.0] {
        let (status, _) = client
            .post_json(
                "/api/transactions",
                json!({"date": "2024-01-01", "type": "debit", "amount": amount, "description": "X"}),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    // Type outside the closed enumeration
    let (status, _) = client
        .post_json(
            "/api/transactions",
            json!({"date": "2024-01-01", "type": "refund", "amount": 10.0, "description": "X"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Malformed date
    let (status, _) = client
        .post_json(
            "/api/transactions",
            json!({"date": "01/02/2024", "type": "debit", "amount": 10.0, "description": "X"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Category that doesn't exist
    let (status, _) = client
        .post_json(
            "/api/transactions",
            json!({"date": "2024-01-01", "type": "debit", "amount": 10.0,
                   "category": "Nonexistent", "description": "X"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nothing slipped through
    let (_, body) = client.get("/api/transactions").await;
    assert_eq!(body, "[]");
}

#[tokio::test]
async fn test_category_stored_with_canonical_spelling() {
    let client = TestClient::new();
    client.create_category("Food").await;

    assert!(
        client
            .create_transaction("2024-01-01", "debit", 10.0, "fOOD", "LUNCH")
            .await
    );

    let (_, parsed): (_, Option<Vec<TransactionRow>>) = client.get_json("/api/transactions").await;
    assert_eq!(parsed.unwrap()[0].category, "Food");
}

#[tokio::test]
async fn test_update_transaction() {
    let client = TestClient::new();
    assert!(
        client
            .create_transaction("2024-01-01", "debit", 10.0, "", "before")
            .await
    );
    let (_, parsed): (_, Option<Vec<TransactionRow>>) = client.get_json("/api/transactions").await;
    let id = parsed.unwrap()[0].id.clone();

    let (status, _) = client
        .put_json(
            &format!("/api/transactions/{}", id),
            json!({"date": "2024-02-01", "type": "credit", "amount": 99.5, "description": "after"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, parsed): (_, Option<Vec<TransactionRow>>) = client.get_json("/api/transactions").await;
    let row = &parsed.unwrap()[0];
    assert_eq!(row.date, "2024-02-01");
    assert_eq!(row.txn_type, "credit");
    assert_eq!(row.amount, 99.5);
    assert_eq!(row.description, "AFTER");
}

#[tokio::test]
async fn test_update_unknown_id_is_404() {
    let client = TestClient::new();
    let (status, _) = client
        .put_json(
            "/api/transactions/no-such-id",
            json!({"date": "2024-01-01", "type": "debit", "amount": 1.0, "description": "X"}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_transaction() {
    let client = TestClient::new();
    assert!(
        client
            .create_transaction("2024-01-01", "debit", 10.0, "", "X")
            .await
    );
    let (_, parsed): (_, Option<Vec<TransactionRow>>) = client.get_json("/api/transactions").await;
    let id = parsed.unwrap()[0].id.clone();

    let (status, _) = client.delete(&format!("/api/transactions/{}", id)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = client.delete(&format!("/api/transactions/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = client.get("/api/transactions").await;
    assert_eq!(body, "[]");
}

#[tokio::test]
async fn test_delete_all_transactions() {
    let client = TestClient::new();
    for i in 1..=4 {
        assert!(
            client
                .create_transaction("2024-01-01", "debit", i as f64, "", "X")
                .await
        );
    }

    let (status, body) = client.delete("/api/transactions").await;
    assert_eq!(status, StatusCode::OK);
    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["deleted"], 4);

    let (_, body) = client.get("/api/transactions").await;
    assert_eq!(body, "[]");
}

#[tokio::test]
async fn test_users_are_namespaced() {
    let client = TestClient::new();
    assert!(
        client
            .create_transaction("2024-01-01", "debit", 10.0, "", "MINE")
            .await
    );

    let other = client.as_user("ravi");
    let (_, body) = other.get("/api/transactions").await;
    assert_eq!(body, "[]");

    assert!(
        other
            .create_transaction("2024-01-02", "credit", 5.0, "", "THEIRS")
            .await
    );
    let (_, parsed): (_, Option<Vec<TransactionRow>>) = client.get_json("/api/transactions").await;
    assert_eq!(parsed.unwrap().len(), 1);
}

#[derive(Debug, Deserialize)]
struct Totals {
    debit: f64,
    credit: f64,
    cash: f64,
    balance: f64,
}

#[derive(Debug, Deserialize)]
struct DashboardResponse {
    totals: Totals,
    recent_transactions: Vec<TransactionRow>,
}

#[tokio::test]
async fn test_dashboard_totals_and_recent_window() {
    let client = TestClient::new();
    // 13 debits of 1.0 plus one credit; the table shows at most 12 rows but
    // the totals cover everything.
    for i in 1..=13 {
        assert!(
            client
                .create_transaction("2024-01-01", "debit", 1.0, "", &format!("D{}", i))
                .await
        );
    }
    assert!(
        client
            .create_transaction("2024-01-02", "credit", 20.0, "", "SALARY")
            .await
    );

    let (status, parsed): (_, Option<DashboardResponse>) = client.get_json("/api/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    let dashboard = parsed.unwrap();
    assert_eq!(dashboard.recent_transactions.len(), 12);
    assert_eq!(dashboard.recent_transactions[0].description, "SALARY");
    assert_eq!(dashboard.totals.debit, 13.0);
    assert_eq!(dashboard.totals.credit, 20.0);
    assert_eq!(dashboard.totals.cash, 0.0);
    assert_eq!(dashboard.totals.balance, 7.0);
}
