use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use std::sync::Arc;

use super::super::{AppError, AppState};
use crate::db::models::{ChecklistType, MachineModel, MachineType};
use crate::db::services;

async fn machine_types_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<MachineType>>, AppError> {
    let types = services::get_machine_types(&app_state.db_pool).await?;
    Ok(Json(types))
}

async fn machine_models_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id_tipo_maquina): Path<i32>,
) -> Result<Json<Vec<MachineModel>>, AppError> {
    let models =
        services::get_models_by_machine_type(&app_state.db_pool, id_tipo_maquina).await?;
    Ok(Json(models))
}

async fn checklists_for_model_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id_modelo): Path<i32>,
) -> Result<Json<Vec<ChecklistType>>, AppError> {
    let checklists = services::get_checklists_for_model(&app_state.db_pool, id_modelo).await?;
    Ok(Json(checklists))
}

async fn checklists_for_machine_type_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id_tipo_maquina): Path<i32>,
) -> Result<Json<Vec<ChecklistType>>, AppError> {
    let checklists =
        services::get_checklists_for_machine_type(&app_state.db_pool, id_tipo_maquina).await?;
    Ok(Json(checklists))
}

async fn checklist_types_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<ChecklistType>>, AppError> {
    let types = services::get_checklist_types(&app_state.db_pool).await?;
    Ok(Json(types))
}

/// The general machine check applies to every model; the model id in
/// the path is accepted for route compatibility but not used.
async fn general_checklist_for_model_handler(
    State(app_state): State<Arc<AppState>>,
    Path(_id_modelo): Path<i32>,
) -> Result<Json<Vec<ChecklistType>>, AppError> {
    let general = services::get_general_checklist_type(&app_state.db_pool).await?;
    Ok(Json(general.into_iter().collect()))
}

async fn general_checklist_type_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<ChecklistType>, AppError> {
    services::get_general_checklist_type(&app_state.db_pool)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Tipo Chequeo General no encontrado".to_string()))
}

pub fn create_catalog_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tipos-maquinas", get(machine_types_handler))
        .route("/modelos-maquinas/{id_tipo_maquina}", get(machine_models_handler))
        .route("/chequeos-maquina/{id_modelo}", get(checklists_for_model_handler))
        .route(
            "/chequeos-tipo-maquina/{id_tipo_maquina}",
            get(checklists_for_machine_type_handler),
        )
        .route("/chequeo-general/{id_modelo}", get(general_checklist_for_model_handler))
        .route("/tipo-chequeo-general", get(general_checklist_type_handler))
        .route("/tipos-chequeos", get(checklist_types_handler))
}
