use sqlx::{PgPool, Postgres, QueryBuilder, Result};

use crate::db::models::{SessionAnswerRow, SessionDetail};

/// Column values for one new session row. Handlers normalize blank
/// strings to None before building this.
#[derive(Debug, Clone, Default)]
pub struct NewSession {
    pub legajo: i32,
    pub id_tipo_chequeo: i32,
    pub cliente: Option<String>,
    pub hora_maquina: Option<String>,
    pub serie_maquina: Option<String>,
    pub fecha: Option<String>,
    pub temp_durante_la_prueba: Option<String>,
    pub modelo_maquina: Option<i32>,
    pub cor_involucrada: Option<String>,
    pub num_servicio: Option<String>,
    pub fecha_inicio: Option<String>,
    pub fecha_fin: Option<String>,
}

/// One answer row of a batched insert, already validated and non-blank.
#[derive(Debug, Clone)]
pub struct AnswerInsert {
    pub id_pregunta: i32,
    pub id_sesion: i32,
    pub respuesta: Option<String>,
    pub fecha_respuesta: Option<String>,
}

/// True when the model id references an existing machine model.
pub async fn model_exists(pool: &PgPool, id_modelo: i32) -> Result<bool> {
    let found = sqlx::query_scalar::<_, i32>(
        "SELECT 1 FROM modelos_maquinas WHERE id_modelo = $1 LIMIT 1",
    )
    .bind(id_modelo)
    .fetch_optional(pool)
    .await?;
    Ok(found.is_some())
}

/// Inserts one session row and returns its generated id.
pub async fn create_session(pool: &PgPool, session: &NewSession) -> Result<i32> {
    sqlx::query_scalar::<_, i32>(
        "INSERT INTO sesiones \
           (legajo, id_tipo_chequeo, cliente, hora_maquina, serie_maquina, fecha, \
            temp_durante_la_prueba, modelo_maquina, cor_involucrada, num_servicio, \
            fecha_inicio, fecha_fin) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
         RETURNING id_sesion",
    )
    .bind(session.legajo)
    .bind(session.id_tipo_chequeo)
    .bind(&session.cliente)
    .bind(&session.hora_maquina)
    .bind(&session.serie_maquina)
    .bind(&session.fecha)
    .bind(&session.temp_durante_la_prueba)
    .bind(session.modelo_maquina)
    .bind(&session.cor_involucrada)
    .bind(&session.num_servicio)
    .bind(&session.fecha_inicio)
    .bind(&session.fecha_fin)
    .fetch_one(pool)
    .await
}

/// Builds the multi-row INSERT for one answer batch.
pub fn build_answer_insert(rows: &[AnswerInsert]) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(
        "INSERT INTO respuestas (id_pregunta, id_sesion, respuesta, fecha_respuesta) ",
    );
    qb.push_values(rows.iter().cloned(), |mut b, row| {
        b.push_bind(row.id_pregunta)
            .push_bind(row.id_sesion)
            .push_bind(row.respuesta)
            .push_bind(row.fecha_respuesta);
    });
    qb
}

/// Inserts all answers of one submission in a single statement and
/// returns the number of inserted rows.
pub async fn insert_answers(pool: &PgPool, rows: &[AnswerInsert]) -> Result<u64> {
    if rows.is_empty() {
        return Ok(0);
    }
    let mut qb = build_answer_insert(rows);
    let result = qb.build().execute(pool).await?;
    Ok(result.rows_affected())
}

/// Retrieves one session joined to its checklist type, model and
/// machine type names.
pub async fn get_session_detail(pool: &PgPool, id_sesion: i32) -> Result<Option<SessionDetail>> {
    sqlx::query_as::<_, SessionDetail>(
        "SELECT s.id_sesion, s.legajo, s.id_tipo_chequeo, s.cliente, s.hora_maquina, \
                s.serie_maquina, s.fecha, s.temp_durante_la_prueba, s.modelo_maquina, \
                s.cor_involucrada, s.num_servicio, s.fecha_inicio, s.fecha_fin, \
                tc.tipo AS tipo_chequeo, mm.modelo, tm.tipo_maquina \
         FROM sesiones s \
         LEFT JOIN tipos_chequeos tc ON tc.id_tipo_chequeo = s.id_tipo_chequeo \
         LEFT JOIN modelos_maquinas mm ON mm.id_modelo = s.modelo_maquina \
         LEFT JOIN tipos_maquinas tm ON tm.id_tipo_maquina = mm.id_tipo_maquina \
         WHERE s.id_sesion = $1",
    )
    .bind(id_sesion)
    .fetch_optional(pool)
    .await
}

/// Retrieves the answers of a session joined to their question text and
/// the session header fields, ordered by question id.
pub async fn get_session_answers(pool: &PgPool, id_sesion: i32) -> Result<Vec<SessionAnswerRow>> {
    sqlx::query_as::<_, SessionAnswerRow>(
        "SELECT s.cliente, s.hora_maquina, s.serie_maquina, s.fecha, \
                s.temp_durante_la_prueba, s.modelo_maquina, s.cor_involucrada, \
                s.num_servicio, r.id_pregunta, p.pregunta, r.respuesta, r.fecha_respuesta \
         FROM respuestas r \
         INNER JOIN preguntas p ON p.id_pregunta = r.id_pregunta \
         INNER JOIN sesiones s ON s.id_sesion = r.id_sesion \
         WHERE s.id_sesion = $1 \
         ORDER BY r.id_pregunta",
    )
    .bind(id_sesion)
    .fetch_all(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_insert_numbers_placeholders_per_row() {
        let rows = vec![
            AnswerInsert {
                id_pregunta: 1,
                id_sesion: 5,
                respuesta: Some("360".to_string()),
                fecha_respuesta: Some("2025-06-01 09:40:12".to_string()),
            },
            AnswerInsert {
                id_pregunta: 2,
                id_sesion: 5,
                respuesta: Some("355".to_string()),
                fecha_respuesta: Some("2025-06-01 09:40:12".to_string()),
            },
        ];
        let mut qb = build_answer_insert(&rows);
        let sql = qb.sql();
        assert!(sql.starts_with(
            "INSERT INTO respuestas (id_pregunta, id_sesion, respuesta, fecha_respuesta) VALUES "
        ));
        assert!(sql.contains("($1, $2, $3, $4)"));
        assert!(sql.contains("($5, $6, $7, $8)"));
    }
}
