use axum::extract::State;
use axum::response::Json;
use axum::Extension;
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::db::queries::transactions;
use crate::error::AppResult;
use crate::models::transaction::Transaction;
use crate::services::aggregation::{self, Totals};
use crate::state::AppState;

/// Number of transactions shown in the dashboard table.
const RECENT_LIMIT: usize = 12;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub totals: Totals,
    pub recent_transactions: Vec<Transaction>,
}

pub async fn index(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<DashboardResponse>> {
    let conn = state.db.get()?;
    let txns = transactions::list_transactions(&conn, &user.0, None)?;

    let totals = aggregation::compute_totals(&txns);
    let recent_transactions = txns.into_iter().take(RECENT_LIMIT).collect();

    Ok(Json(DashboardResponse {
        totals,
        recent_transactions,
    }))
}
