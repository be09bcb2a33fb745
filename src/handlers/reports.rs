use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Json};
use axum::Extension;
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::db::queries::transactions;
use crate::error::AppResult;
use crate::models::transaction::Transaction;
use crate::services::aggregation::{self, Totals};
use crate::services::reports::ReportFilter;
use crate::services::{csv_export, pdf_export};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReportParams {
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(rename = "type")]
    pub txn_type: Option<String>,
    pub category: Option<String>,
}

impl ReportParams {
    fn filter(&self) -> ReportFilter {
        ReportFilter {
            from: self.from.clone(),
            to: self.to.clone(),
            txn_type: self.txn_type.clone(),
            category: self.category.clone(),
        }
        .normalized()
    }
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub totals: Totals,
    pub count: usize,
    pub transactions: Vec<Transaction>,
}

fn load_filtered(
    state: &AppState,
    username: &str,
    params: &ReportParams,
) -> AppResult<Vec<Transaction>> {
    let conn = state.db.get()?;
    let txns = transactions::list_transactions(&conn, username, None)?;
    Ok(params.filter().apply(txns))
}

pub async fn index(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<ReportParams>,
) -> AppResult<Json<ReportResponse>> {
    let filtered = load_filtered(&state, &user.0, &params)?;
    let totals = aggregation::compute_totals(&filtered);

    Ok(Json(ReportResponse {
        totals,
        count: filtered.len(),
        transactions: filtered,
    }))
}

pub async fn export_csv(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<ReportParams>,
) -> AppResult<impl IntoResponse> {
    let filtered = load_filtered(&state, &user.0, &params)?;
    let bytes = csv_export::transactions_csv(&filtered)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"spendwise-report.csv\"".to_string(),
            ),
        ],
        bytes,
    ))
}

pub async fn export_pdf(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<ReportParams>,
) -> AppResult<impl IntoResponse> {
    let filtered = load_filtered(&state, &user.0, &params)?;
    let totals = aggregation::compute_totals(&filtered);
    let bytes = pdf_export::render_report(&user.0, &totals, &filtered)?;

    let filename = format!(
        "SpendWise_Report_{}.pdf",
        chrono::Local::now().format("%Y-%m-%d")
    );
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    ))
}
