use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Machine type id for tractors; tractor models additionally get the
/// general tractor report checklist.
pub const TRACTOR_MACHINE_TYPE: i32 = 4;

/// Checklist type ids with dedicated form layouts.
pub const PRESSURE_CHECK: i32 = 1;
pub const TIRE_CHECK: i32 = 2;
pub const INJECTOR_TURBO_CHECK: i32 = 3;
pub const GENERAL_MACHINE_CHECK: i32 = 6;
pub const TRACTOR_REPORT: i32 = 7;

/// Display name of the general machine checklist, looked up by name
/// because historical databases assigned it different ids.
pub const GENERAL_CHECK_NAME: &str = "Chequeo General Maquina";

/// Represents a machine category (harvester, tractor, ...).
/// Corresponds to the `tipos_maquinas` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MachineType {
    pub id_tipo_maquina: i32,
    pub tipo_maquina: String,
}

/// Represents a concrete machine model belonging to a machine type.
/// Corresponds to the `modelos_maquinas` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MachineModel {
    pub id_modelo: i32,
    pub modelo: String,
    pub id_tipo_maquina: i32,
}

/// Represents a kind of inspection checklist (pressures, tires, ...).
/// Corresponds to the `tipos_chequeos` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistType {
    pub id_tipo_chequeo: i32,
    pub tipo: String,
}

/// A single checklist question with its stable numeric id. Form inputs
/// are bound to these ids (`idPreg{N}` on the client side).
/// Corresponds to the `preguntas` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id_pregunta: i32,
    pub pregunta: String,
    pub id_tipo_chequeo: i32,
}

/// A technician account. `contrasena` holds a bcrypt hash and is never
/// serialized; login responses use a dedicated DTO.
/// Corresponds to the `usuarios` table.
#[derive(Debug, Clone, FromRow)]
pub struct Technician {
    pub legajo: i32,
    pub usuario: String,
    pub contrasena: String,
    pub apellido: String,
    pub nombre: String,
}

/// One inspection event: a technician filling one checklist for one
/// machine. Date fields keep the client's `YYYY-MM-DD[ HH:MI:SS]`
/// strings as submitted.
/// Corresponds to the `sesiones` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    #[serde(rename = "idSesion")]
    pub id_sesion: i32,
    pub legajo: i32,
    #[serde(rename = "idTipoChequeo")]
    pub id_tipo_chequeo: i32,
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

/// One recorded answer within a session.
/// Corresponds to the `respuestas` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Answer {
    #[serde(rename = "idPregunta")]
    pub id_pregunta: i32,
    #[serde(rename = "idSesion")]
    pub id_sesion: i32,
    pub respuesta: Option<String>,
    #[serde(rename = "fechaRespuesta")]
    pub fecha_respuesta: Option<String>,
}

/// Session row joined to its lookup names, as returned by
/// `GET /api/sesiones/{id}`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SessionDetail {
    #[serde(rename = "idSesion")]
    pub id_sesion: i32,
    pub legajo: i32,
    #[serde(rename = "idTipoChequeo")]
    pub id_tipo_chequeo: i32,
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
    #[serde(rename = "tipoChequeo")]
    pub tipo_chequeo: Option<String>,
    pub modelo: Option<String>,
    #[serde(rename = "tipoMaquina")]
    pub tipo_maquina: Option<String>,
}

/// Answer of a session joined to its question text and the session
/// header fields, as returned by `GET /api/sesiones/{id}/respuestas`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SessionAnswerRow {
    pub cliente: Option<String>,
    pub hora_maquina: Option<String>,
    pub serie_maquina: Option<String>,
    pub fecha: Option<String>,
    pub temp_durante_la_prueba: Option<String>,
    pub modelo_maquina: Option<i32>,
    pub cor_involucrada: Option<String>,
    pub num_servicio: Option<String>,
    #[serde(rename = "idPregunta")]
    pub id_pregunta: i32,
    pub pregunta: String,
    pub respuesta: Option<String>,
    #[serde(rename = "fechaRespuesta")]
    pub fecha_respuesta: Option<String>,
}

/// One row of the filtered history listing.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct HistoryEntry {
    #[serde(rename = "idSesion")]
    pub id_sesion: i32,
    pub fecha: Option<String>,
    #[serde(rename = "fechaInicio")]
    pub fecha_inicio: Option<String>,
    #[serde(rename = "fechaFin")]
    pub fecha_fin: Option<String>,
    pub cliente: Option<String>,
    pub legajo: i32,
    pub serie_maquina: Option<String>,
    #[serde(rename = "tipoChequeo")]
    pub tipo_chequeo: Option<String>,
    #[serde(rename = "tipoMaquina")]
    pub tipo_maquina: Option<String>,
    pub modelo: Option<String>,
}
