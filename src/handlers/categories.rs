use axum::extract::{Path, State};
use axum::response::Json;
use axum::Extension;
use serde_json::{json, Value};

use crate::auth::CurrentUser;
use crate::db::queries::categories;
use crate::error::{AppError, AppResult};
use crate::models::category::{Category, NewCategory};
use crate::services;
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Category>>> {
    let conn = state.db.get()?;
    let cats = categories::list_categories(&conn, &user.0)?;
    Ok(Json(cats))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(form): Json<NewCategory>,
) -> AppResult<Json<Value>> {
    let conn = state.db.get()?;

    let name = form.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation("Category name is required".into()));
    }
    if categories::find_by_name(&conn, &user.0, &name)?.is_some() {
        return Err(AppError::Validation(format!(
            "Category \"{}\" already exists",
            name
        )));
    }

    let id = categories::create_category(&conn, &user.0, &NewCategory { name })?;
    Ok(Json(json!({ "id": id })))
}

/// Load the default category list, skipping names already present.
pub async fn seed_defaults(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Value>> {
    let mut conn = state.db.get()?;
    let added = services::categories::seed_default_categories(&mut conn, &user.0)?;

    let message = if added == 0 {
        "Default categories already loaded".to_string()
    } else {
        format!("Loaded {} categories", added)
    };
    Ok(Json(json!({ "added": added, "message": message })))
}

#[derive(Debug, serde::Deserialize)]
pub struct RenameRequest {
    pub name: String,
}

pub async fn rename(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(form): Json<RenameRequest>,
) -> AppResult<Json<Value>> {
    let mut conn = state.db.get()?;
    let updated = services::categories::rename_category(&mut conn, &user.0, &id, &form.name)?;
    Ok(Json(json!({ "ok": true, "transactions_updated": updated })))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let mut conn = state.db.get()?;
    let reassigned = services::categories::delete_category(&mut conn, &user.0, &id)?;
    Ok(Json(json!({ "ok": true, "transactions_reassigned": reassigned })))
}
