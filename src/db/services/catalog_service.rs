use sqlx::{PgPool, Result};

use crate::db::models::{
    ChecklistType, GENERAL_CHECK_NAME, INJECTOR_TURBO_CHECK, MachineModel, MachineType,
    TIRE_CHECK, TRACTOR_MACHINE_TYPE, TRACTOR_REPORT,
};

/// Retrieves all machine types.
pub async fn get_machine_types(pool: &PgPool) -> Result<Vec<MachineType>> {
    sqlx::query_as::<_, MachineType>(
        "SELECT id_tipo_maquina, tipo_maquina FROM tipos_maquinas ORDER BY id_tipo_maquina",
    )
    .fetch_all(pool)
    .await
}

/// Retrieves the models belonging to one machine type.
pub async fn get_models_by_machine_type(
    pool: &PgPool,
    id_tipo_maquina: i32,
) -> Result<Vec<MachineModel>> {
    sqlx::query_as::<_, MachineModel>(
        "SELECT id_modelo, modelo, id_tipo_maquina FROM modelos_maquinas \
         WHERE id_tipo_maquina = $1 ORDER BY modelo",
    )
    .bind(id_tipo_maquina)
    .fetch_all(pool)
    .await
}

/// Retrieves all checklist types ordered by id.
pub async fn get_checklist_types(pool: &PgPool) -> Result<Vec<ChecklistType>> {
    sqlx::query_as::<_, ChecklistType>(
        "SELECT id_tipo_chequeo, tipo FROM tipos_chequeos ORDER BY id_tipo_chequeo",
    )
    .fetch_all(pool)
    .await
}

/// Retrieves the "Chequeo General Maquina" checklist type, if configured.
pub async fn get_general_checklist_type(pool: &PgPool) -> Result<Option<ChecklistType>> {
    sqlx::query_as::<_, ChecklistType>(
        "SELECT id_tipo_chequeo, tipo FROM tipos_chequeos WHERE tipo = $1 LIMIT 1",
    )
    .bind(GENERAL_CHECK_NAME)
    .fetch_optional(pool)
    .await
}

/// Retrieves the machine type a model belongs to, or None for an
/// unknown model id.
pub async fn get_machine_type_of_model(pool: &PgPool, id_modelo: i32) -> Result<Option<i32>> {
    sqlx::query_scalar::<_, i32>(
        "SELECT id_tipo_maquina FROM modelos_maquinas WHERE id_modelo = $1",
    )
    .bind(id_modelo)
    .fetch_optional(pool)
    .await
}

/// Checklist types applicable to a model: the rows assigned through the
/// join table, merged with the always-offered extras (general machine
/// check, tire check, injector/turbo check, and the tractor report when
/// the model is a tractor).
pub async fn get_checklists_for_model(
    pool: &PgPool,
    id_modelo: i32,
) -> Result<Vec<ChecklistType>> {
    let assigned = sqlx::query_as::<_, ChecklistType>(
        "SELECT tc.id_tipo_chequeo, tc.tipo \
         FROM modelosmaquinas_chequeos mc \
         INNER JOIN tipos_chequeos tc ON mc.id_tipo_chequeo = tc.id_tipo_chequeo \
         WHERE mc.id_modelo_maquina = $1",
    )
    .bind(id_modelo)
    .fetch_all(pool)
    .await?;

    let machine_type = get_machine_type_of_model(pool, id_modelo).await?;
    let is_tractor = machine_type == Some(TRACTOR_MACHINE_TYPE);

    let extras = if is_tractor {
        sqlx::query_as::<_, ChecklistType>(
            "SELECT id_tipo_chequeo, tipo FROM tipos_chequeos \
             WHERE tipo = $1 OR id_tipo_chequeo = $2 OR id_tipo_chequeo = $3 OR id_tipo_chequeo = $4",
        )
        .bind(GENERAL_CHECK_NAME)
        .bind(TIRE_CHECK)
        .bind(INJECTOR_TURBO_CHECK)
        .bind(TRACTOR_REPORT)
        .fetch_all(pool)
        .await?
    } else {
        sqlx::query_as::<_, ChecklistType>(
            "SELECT id_tipo_chequeo, tipo FROM tipos_chequeos \
             WHERE tipo = $1 OR id_tipo_chequeo = $2 OR id_tipo_chequeo = $3",
        )
        .bind(GENERAL_CHECK_NAME)
        .bind(TIRE_CHECK)
        .bind(INJECTOR_TURBO_CHECK)
        .fetch_all(pool)
        .await?
    };

    Ok(merge_checklists(assigned, extras))
}

/// Checklist types offered for a machine type without a concrete model:
/// tractors get the general tractor report, everything else gets none.
pub async fn get_checklists_for_machine_type(
    pool: &PgPool,
    id_tipo_maquina: i32,
) -> Result<Vec<ChecklistType>> {
    if id_tipo_maquina != TRACTOR_MACHINE_TYPE {
        return Ok(Vec::new());
    }
    sqlx::query_as::<_, ChecklistType>(
        "SELECT id_tipo_chequeo, tipo FROM tipos_chequeos WHERE id_tipo_chequeo = $1",
    )
    .bind(TRACTOR_REPORT)
    .fetch_all(pool)
    .await
}

/// Appends `extras` to `base`, skipping checklist types already present.
/// Order of `base` is preserved; extras keep their query order.
pub fn merge_checklists(
    base: Vec<ChecklistType>,
    extras: Vec<ChecklistType>,
) -> Vec<ChecklistType> {
    let mut merged = base;
    for extra in extras {
        if !merged
            .iter()
            .any(|c| c.id_tipo_chequeo == extra.id_tipo_chequeo)
        {
            merged.push(extra);
        }
    }
    merged
}
