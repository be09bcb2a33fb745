pub mod api;
pub mod categories;
pub mod dashboard;
pub mod reports;
pub mod settings;
pub mod transactions;

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // Session
        .route("/api/session", get(auth::session))
        // Dashboard
        .route("/api/dashboard", get(dashboard::index))
        // Transaction CRUD
        .route("/api/transactions", get(transactions::list))
        .route("/api/transactions", post(transactions::create))
        .route("/api/transactions", delete(transactions::delete_all))
        .route("/api/transactions/:id", put(transactions::update))
        .route("/api/transactions/:id", delete(transactions::delete))
        // Category management
        .route("/api/categories", get(categories::list))
        .route("/api/categories", post(categories::create))
        .route("/api/categories/defaults", post(categories::seed_defaults))
        .route("/api/categories/:id", put(categories::rename))
        .route("/api/categories/:id", delete(categories::delete))
        // Reports and exports
        .route("/api/reports", get(reports::index))
        .route("/api/reports/export/csv", get(reports::export_csv))
        .route("/api/reports/export/pdf", get(reports::export_pdf))
        // Chart JSON
        .route("/api/charts/daily-spending", get(api::daily_spending))
        .route("/api/charts/category-breakdown", get(api::category_breakdown))
        .route("/api/charts/balance-over-time", get(api::balance_over_time))
        // Settings
        .route("/api/settings", get(settings::index))
        .route("/api/settings/theme", put(settings::update_theme))
        // Health check
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}
