use serde::Deserialize;
use sqlx::{PgPool, Postgres, QueryBuilder, Result};

use crate::db::models::{HistoryEntry, TRACTOR_MACHINE_TYPE, TRACTOR_REPORT};

/// At most this many rows are returned per history query.
const HISTORY_LIMIT: i64 = 500;

/// All-optional filters of `GET /api/historial-chequeos`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryFilter {
    #[serde(rename = "idTipoMaquina")]
    pub id_tipo_maquina: Option<i32>,
    #[serde(rename = "idModelo")]
    pub id_modelo: Option<i32>,
    pub serie: Option<String>,
    #[serde(rename = "idTipoChequeo")]
    pub id_tipo_chequeo: Option<i32>,
    pub cliente: Option<String>,
    pub desde: Option<String>,
    pub hasta: Option<String>,
}

/// Composes the history query for one filter set. Pure so the generated
/// SQL can be asserted without a database.
pub fn build_history_query(filter: &HistoryFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(
        "SELECT s.id_sesion, s.fecha, s.fecha_inicio, s.fecha_fin, s.cliente, s.legajo, \
                s.serie_maquina, tc.tipo AS tipo_chequeo, tm.tipo_maquina, mm.modelo \
         FROM sesiones s \
         LEFT JOIN tipos_chequeos tc ON tc.id_tipo_chequeo = s.id_tipo_chequeo \
         LEFT JOIN modelos_maquinas mm ON mm.id_modelo = s.modelo_maquina \
         LEFT JOIN tipos_maquinas tm ON tm.id_tipo_maquina = mm.id_tipo_maquina",
    );

    let mut sep = " WHERE ";
    let mut and = |qb: &mut QueryBuilder<'static, Postgres>| {
        qb.push(sep);
        sep = " AND ";
    };

    if let Some(id) = filter.id_tipo_chequeo {
        and(&mut qb);
        qb.push("s.id_tipo_chequeo = ").push_bind(id);
    }
    if let Some(cliente) = &filter.cliente {
        and(&mut qb);
        qb.push("s.cliente ILIKE ").push_bind(format!("%{cliente}%"));
    }
    if let Some(serie) = &filter.serie {
        and(&mut qb);
        qb.push("s.serie_maquina ILIKE ").push_bind(format!("%{serie}%"));
    }
    if let Some(desde) = &filter.desde {
        and(&mut qb);
        qb.push("(s.fecha >= ")
            .push_bind(desde.clone())
            .push(" OR s.fecha_inicio >= ")
            .push_bind(desde.clone())
            .push(")");
    }
    if let Some(hasta) = &filter.hasta {
        and(&mut qb);
        qb.push("(s.fecha <= ")
            .push_bind(hasta.clone())
            .push(" OR s.fecha_fin <= ")
            .push_bind(hasta.clone())
            .push(")");
    }
    if let Some(id) = filter.id_modelo {
        and(&mut qb);
        qb.push("s.modelo_maquina = ").push_bind(id);
    }
    if let Some(id) = filter.id_tipo_maquina {
        and(&mut qb);
        // Tractor report sessions may lack a model link; the tractor
        // filter admits them by checklist type as well.
        if id == TRACTOR_MACHINE_TYPE {
            qb.push("(tm.id_tipo_maquina = ")
                .push_bind(id)
                .push(format!(" OR s.id_tipo_chequeo = {TRACTOR_REPORT})"));
        } else {
            qb.push("tm.id_tipo_maquina = ").push_bind(id);
        }
    }

    qb.push(" ORDER BY COALESCE(s.fecha, s.fecha_inicio) DESC, s.id_sesion DESC LIMIT ");
    qb.push_bind(HISTORY_LIMIT);
    qb
}

/// Runs the filtered history query.
pub async fn search_history(pool: &PgPool, filter: &HistoryFilter) -> Result<Vec<HistoryEntry>> {
    let mut qb = build_history_query(filter);
    qb.build_query_as::<HistoryEntry>().fetch_all(pool).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_has_no_where_clause() {
        let mut sql_owned = build_history_query(&HistoryFilter::default());
        let sql = sql_owned.sql();
        assert!(!sql.contains("WHERE"));
        assert!(sql.contains("ORDER BY COALESCE(s.fecha, s.fecha_inicio) DESC, s.id_sesion DESC"));
        assert!(sql.ends_with("LIMIT $1"));
    }

    #[test]
    fn single_filter_starts_the_where_clause() {
        let filter = HistoryFilter {
            id_tipo_chequeo: Some(2),
            ..Default::default()
        };
        let mut qb = build_history_query(&filter);
        assert!(qb.sql().contains(" WHERE s.id_tipo_chequeo = $1"));
    }

    #[test]
    fn filters_chain_with_and_in_declaration_order() {
        let filter = HistoryFilter {
            cliente: Some("trinidad".to_string()),
            serie: Some("CH570".to_string()),
            desde: Some("2025-01-01".to_string()),
            ..Default::default()
        };
        let mut qb = build_history_query(&filter);
        let sql = qb.sql();
        assert!(sql.contains(" WHERE s.cliente ILIKE $1"));
        assert!(sql.contains(" AND s.serie_maquina ILIKE $2"));
        assert!(sql.contains(" AND (s.fecha >= $3 OR s.fecha_inicio >= $4)"));
    }

    #[test]
    fn date_range_compares_both_session_date_columns() {
        let filter = HistoryFilter {
            hasta: Some("2025-12-31".to_string()),
            ..Default::default()
        };
        let mut qb = build_history_query(&filter);
        assert!(qb.sql().contains("(s.fecha <= $1 OR s.fecha_fin <= $2)"));
    }

    #[test]
    fn tractor_machine_type_also_admits_tractor_report_sessions() {
        let filter = HistoryFilter {
            id_tipo_maquina: Some(TRACTOR_MACHINE_TYPE),
            ..Default::default()
        };
        let mut qb = build_history_query(&filter);
        assert!(
            qb.sql()
                .contains("(tm.id_tipo_maquina = $1 OR s.id_tipo_chequeo = 7)")
        );
    }

    #[test]
    fn non_tractor_machine_type_filters_by_model_linkage_only() {
        let filter = HistoryFilter {
            id_tipo_maquina: Some(2),
            ..Default::default()
        };
        let mut qb = build_history_query(&filter);
        let sql = qb.sql();
        assert!(sql.contains(" WHERE tm.id_tipo_maquina = $1"));
        assert!(!sql.contains("id_tipo_chequeo = 7"));
    }

    #[test]
    fn query_params_deserialize_from_camel_case_names() {
        let filter: HistoryFilter = serde_json::from_value(serde_json::json!({
            "idTipoMaquina": 4,
            "idModelo": 12,
            "serie": "A123",
            "cliente": "ingenio"
        }))
        .unwrap();
        assert_eq!(filter.id_tipo_maquina, Some(4));
        assert_eq!(filter.id_modelo, Some(12));
        assert_eq!(filter.serie.as_deref(), Some("A123"));
        assert!(filter.desde.is_none());
    }
}
