use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use tracing::info;

use super::super::{AppError, AppState};
use crate::db::models::{SessionAnswerRow, SessionDetail};
use crate::db::services::{self, AnswerInsert, NewSession};
use crate::forms;
use crate::web::models::{
    AnswerBatchRequest, AnswerBatchResponse, CreateSessionRequest, CreateSessionResponse,
    blank_to_none,
};

const REQUIRED_SESSION_FIELDS: &str = "legajo e idTipoChequeo son requeridos";

async fn create_session_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<Json<CreateSessionResponse>, AppError> {
    let legajo = payload
        .legajo
        .ok_or_else(|| AppError::InvalidInput(REQUIRED_SESSION_FIELDS.to_string()))?;
    let id_tipo_chequeo = payload
        .id_tipo_chequeo
        .ok_or_else(|| AppError::InvalidInput(REQUIRED_SESSION_FIELDS.to_string()))?;

    if let Some(id_modelo) = payload.modelo_maquina {
        if !services::model_exists(&app_state.db_pool, id_modelo).await? {
            return Err(AppError::InvalidInput("Modelo de máquina inválido".to_string()));
        }
    }

    let session = NewSession {
        legajo,
        id_tipo_chequeo,
        cliente: blank_to_none(payload.cliente),
        hora_maquina: blank_to_none(payload.hora_maquina),
        serie_maquina: blank_to_none(payload.serie_maquina),
        fecha: blank_to_none(payload.fecha),
        temp_durante_la_prueba: blank_to_none(payload.temp_durante_la_prueba),
        modelo_maquina: payload.modelo_maquina,
        cor_involucrada: blank_to_none(payload.cor_involucrada),
        num_servicio: blank_to_none(payload.num_servicio),
        fecha_inicio: blank_to_none(payload.fecha_inicio),
        fecha_fin: blank_to_none(payload.fecha_fin),
    };

    let id_sesion = services::create_session(&app_state.db_pool, &session).await?;
    info!(id_sesion, legajo, id_tipo_chequeo, "checklist session created");
    Ok(Json(CreateSessionResponse { id_sesion }))
}

async fn insert_answers_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<AnswerBatchRequest>,
) -> Result<Json<AnswerBatchResponse>, AppError> {
    if payload.respuestas.is_empty() {
        return Err(AppError::InvalidInput("No hay respuestas para guardar".to_string()));
    }

    let mut rows = Vec::with_capacity(payload.respuestas.len());
    for item in payload.respuestas {
        let (id_pregunta, id_sesion) = match (item.id_pregunta, item.id_sesion) {
            (Some(p), Some(s)) if p > 0 && s > 0 => (p, s),
            _ => {
                return Err(AppError::InvalidInput(
                    "idPregunta e idSesion son requeridos en cada respuesta".to_string(),
                ));
            }
        };
        // Blank values are filtered client-side too; skip them here so
        // a replay never shows empty answer rows.
        let Some(respuesta) = blank_to_none(item.respuesta) else {
            continue;
        };
        rows.push(AnswerInsert {
            id_pregunta,
            id_sesion,
            respuesta: Some(respuesta),
            fecha_respuesta: blank_to_none(item.fecha_respuesta),
        });
    }

    let affected_rows = services::insert_answers(&app_state.db_pool, &rows).await?;
    info!(affected_rows, "answer batch stored");
    Ok(Json(AnswerBatchResponse { affected_rows }))
}

async fn session_detail_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id_sesion): Path<i32>,
) -> Result<Json<SessionDetail>, AppError> {
    services::get_session_detail(&app_state.db_pool, id_sesion)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Sesión no encontrada".to_string()))
}

async fn session_answers_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id_sesion): Path<i32>,
) -> Result<Json<Vec<SessionAnswerRow>>, AppError> {
    let rows = services::get_session_answers(&app_state.db_pool, id_sesion).await?;
    Ok(Json(rows))
}

/// Read-only replay: session header plus its form layout hydrated with
/// the recorded answers, or the generic listing when the checklist
/// type has no catalogued layout.
async fn session_replay_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id_sesion): Path<i32>,
) -> Result<Json<forms::ReplayDocument>, AppError> {
    let sesion = services::get_session_detail(&app_state.db_pool, id_sesion)
        .await?
        .ok_or_else(|| AppError::NotFound("Sesión no encontrada".to_string()))?;
    let rows = services::get_session_answers(&app_state.db_pool, id_sesion).await?;

    let body = match forms::layout_for(sesion.id_tipo_chequeo) {
        Some(layout) => {
            let answers: HashMap<i32, String> = rows
                .iter()
                .filter_map(|r| r.respuesta.clone().map(|v| (r.id_pregunta, v)))
                .collect();
            forms::hydrate(layout, &answers)
        }
        None => forms::replay::generic_body(&rows),
    };

    Ok(Json(forms::ReplayDocument { sesion, body }))
}

pub fn create_session_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sesiones", post(create_session_handler))
        .route("/sesiones/{id_sesion}", get(session_detail_handler))
        .route("/sesiones/{id_sesion}/respuestas", get(session_answers_handler))
        .route("/sesiones/{id_sesion}/replay", get(session_replay_handler))
        .route("/respuestas", post(insert_answers_handler))
}
