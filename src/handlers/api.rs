//! Chart JSON endpoints. Each accepts the report-filter params so the
//! reports page can show the same charts over a filtered subset.

use axum::extract::{Query, State};
use axum::response::Json;
use axum::Extension;
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::db::queries::transactions;
use crate::error::AppResult;
use crate::services::aggregation::{self, BalancePoint, CategorySpending, DailySpending};
use crate::services::reports::ReportFilter;
use crate::state::AppState;

const DEFAULT_DAY_WINDOW: usize = 10;
const DEFAULT_TOP_CATEGORIES: usize = 6;
const DEFAULT_BALANCE_WINDOW: usize = 20;

#[derive(Debug, Deserialize)]
pub struct ChartParams {
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(rename = "type")]
    pub txn_type: Option<String>,
    pub category: Option<String>,
    pub window: Option<usize>,
    pub top: Option<usize>,
}

impl ChartParams {
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

pub async fn daily_spending(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<ChartParams>,
) -> AppResult<Json<Vec<DailySpending>>> {
    let conn = state.db.get()?;
    let txns = transactions::list_transactions(&conn, &user.0, None)?;
    let filtered = params.filter().apply(txns);

    let window = params.window.unwrap_or(DEFAULT_DAY_WINDOW);
    Ok(Json(aggregation::daily_series(&filtered, window)))
}

pub async fn category_breakdown(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<ChartParams>,
) -> AppResult<Json<Vec<CategorySpending>>> {
    let conn = state.db.get()?;
    let txns = transactions::list_transactions(&conn, &user.0, None)?;
    let filtered = params.filter().apply(txns);

    let top = params.top.unwrap_or(DEFAULT_TOP_CATEGORIES);
    Ok(Json(aggregation::category_series(&filtered, top)))
}

pub async fn balance_over_time(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<ChartParams>,
) -> AppResult<Json<Vec<BalancePoint>>> {
    let conn = state.db.get()?;
    let txns = transactions::list_transactions(&conn, &user.0, None)?;
    let filtered = params.filter().apply(txns);

    let mut points = aggregation::balance_series(&filtered);
    let window = params.window.unwrap_or(DEFAULT_BALANCE_WINDOW);
    if points.len() > window {
        points = points.split_off(points.len() - window);
    }
    Ok(Json(points))
}
