use axum::extract::State;
use axum::response::Json;
use axum::Extension;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::CurrentUser;
use crate::db::queries::settings;
use crate::error::{AppError, AppResult};
use crate::models::settings::{Settings, THEME_DARK, THEME_LIGHT};
use crate::state::AppState;

pub async fn index(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Settings>> {
    let conn = state.db.get()?;
    let theme =
        settings::get_setting(&conn, &user.0, "theme")?.unwrap_or_else(|| THEME_LIGHT.into());
    Ok(Json(Settings { theme }))
}

#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    pub theme: String,
}

pub async fn update_theme(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(form): Json<ThemeRequest>,
) -> AppResult<Json<Value>> {
    if form.theme != THEME_LIGHT && form.theme != THEME_DARK {
        return Err(AppError::Validation(format!(
            "Unknown theme: {}",
            form.theme
        )));
    }

    let conn = state.db.get()?;
    settings::set_setting(&conn, &user.0, "theme", &form.theme)?;
    Ok(Json(json!({ "ok": true })))
}
