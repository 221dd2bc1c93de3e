use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};
use tracing::warn;

use super::super::{AppError, AppState};
use crate::db::services;
use crate::web::models::{LoginRequest, LoginResponse};

async fn login_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let (usuario, contrasena) = match (payload.usuario, payload.contrasena) {
        (Some(u), Some(c)) if !u.is_empty() && !c.is_empty() => (u, c),
        _ => {
            return Err(AppError::InvalidInput(
                "Usuario y contraseña son requeridos".to_string(),
            ));
        }
    };

    let Some(technician) =
        services::get_technician_by_username(&app_state.db_pool, &usuario).await?
    else {
        warn!(usuario = %usuario, "login attempt for unknown user");
        return Err(AppError::InvalidCredentials);
    };

    if !bcrypt::verify(&contrasena, &technician.contrasena)? {
        warn!(usuario = %usuario, "login attempt with wrong password");
        return Err(AppError::InvalidCredentials);
    }

    Ok(Json(LoginResponse {
        legajo: technician.legajo,
        apellido: technician.apellido,
        nombre: technician.nombre,
    }))
}

pub fn create_auth_router() -> Router<Arc<AppState>> {
    Router::new().route("/login", post(login_handler))
}
