use axum::extract::{Path, Query, State};
use axum::response::Json;
use axum::Extension;
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::CurrentUser;
use crate::db::queries::{categories, transactions};
use crate::error::{AppError, AppResult};
use crate::models::category::OTHER_CATEGORY;
use crate::models::transaction::{NewTransaction, Transaction, TransactionType};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
}

pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<Transaction>>> {
    let conn = state.db.get()?;
    let txns = transactions::list_transactions(&conn, &user.0, params.limit)?;
    Ok(Json(txns))
}

/// Normalize and validate user input before it reaches the store: closed
/// type enum, positive amount, ISO date, non-empty upper-cased description,
/// and a category that exists (stored with its canonical spelling) or the
/// "Other" fallback.
fn validate(conn: &Connection, username: &str, mut form: NewTransaction) -> AppResult<NewTransaction> {
    let kind = TransactionType::parse(&form.txn_type).ok_or_else(|| {
        AppError::Validation(format!("Unknown transaction type: {}", form.txn_type))
    })?;
    form.txn_type = kind.as_str().into();

    if !(form.amount > 0.0) || !form.amount.is_finite() {
        return Err(AppError::Validation(
            "Amount must be greater than zero".into(),
        ));
    }

    if NaiveDate::parse_from_str(&form.date, "%Y-%m-%d").is_err() {
        return Err(AppError::Validation(
            "Date must be in YYYY-MM-DD format".into(),
        ));
    }

    let description = form.description.trim();
    if description.is_empty() {
        return Err(AppError::Validation("Description is required".into()));
    }
    form.description = description.to_uppercase();

    let category = form.category.trim();
    if category.is_empty() || category == OTHER_CATEGORY {
        form.category = OTHER_CATEGORY.into();
    } else {
        let existing = categories::find_by_name(conn, username, category)?.ok_or_else(|| {
            AppError::Validation(format!("Unknown category: {}", category))
        })?;
        form.category = existing.name;
    }

    Ok(form)
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(form): Json<NewTransaction>,
) -> AppResult<Json<Value>> {
    let conn = state.db.get()?;
    let form = validate(&conn, &user.0, form)?;
    let id = transactions::create_transaction(&conn, &user.0, &form)?;
    Ok(Json(json!({ "id": id })))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(form): Json<NewTransaction>,
) -> AppResult<Json<Value>> {
    let conn = state.db.get()?;
    let form = validate(&conn, &user.0, form)?;
    if !transactions::update_transaction(&conn, &user.0, &id, &form)? {
        return Err(AppError::NotFound("Transaction not found".into()));
    }
    Ok(Json(json!({ "ok": true })))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let conn = state.db.get()?;
    if !transactions::delete_transaction(&conn, &user.0, &id)? {
        return Err(AppError::NotFound("Transaction not found".into()));
    }
    Ok(Json(json!({ "ok": true })))
}

/// Danger zone: wipe every transaction for this user.
pub async fn delete_all(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Value>> {
    let conn = state.db.get()?;
    let deleted = transactions::delete_all_transactions(&conn, &user.0)?;
    Ok(Json(json!({ "deleted": deleted })))
}
