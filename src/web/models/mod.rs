//! Request and response bodies of the REST surface. Field names keep
//! the capture client's wire contract (`idSesion`, snake-case session
//! columns, camel-case date bounds).

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub legajo: Option<i32>,
    #[serde(rename = "idTipoChequeo")]
    pub id_tipo_chequeo: Option<i32>,
    pub cliente: Option<String>,
    pub hora_maquina: Option<String>,
    pub serie_maquina: Option<String>,
    pub fecha: Option<String>,
    pub temp_durante_la_prueba: Option<String>,
    pub modelo_maquina: Option<i32>,
    pub cor_involucrada: Option<String>,
    pub num_servicio: Option<String>,
    #[serde(rename = "fechaInicio")]
    pub fecha_inicio: Option<String>,
    #[serde(rename = "fechaFin")]
    pub fecha_fin: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    #[serde(rename = "idSesion")]
    pub id_sesion: i32,
}

#[derive(Debug, Deserialize)]
pub struct AnswerBatchRequest {
    pub respuestas: Vec<AnswerItem>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerItem {
    #[serde(rename = "idPregunta")]
    pub id_pregunta: Option<i32>,
    #[serde(rename = "idSesion")]
    pub id_sesion: Option<i32>,
    pub respuesta: Option<String>,
    #[serde(rename = "fechaRespuesta")]
    pub fecha_respuesta: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnswerBatchResponse {
    #[serde(rename = "affectedRows")]
    pub affected_rows: u64,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub usuario: Option<String>,
    pub contrasena: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub legajo: i32,
    pub apellido: String,
    pub nombre: String,
}

/// Maps empty or whitespace-only strings to None, matching the
/// original server's `value || null` column handling.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
