use sqlx::{PgPool, Result};

use crate::db::models::Technician;

/// Retrieves a technician account by its login name.
pub async fn get_technician_by_username(
    pool: &PgPool,
    usuario: &str,
) -> Result<Option<Technician>> {
    sqlx::query_as::<_, Technician>(
        "SELECT legajo, usuario, contrasena, apellido, nombre FROM usuarios WHERE usuario = $1",
    )
    .bind(usuario)
    .fetch_optional(pool)
    .await
}
