use once_cell::sync::Lazy;
use serde::Serialize;

use crate::db::models::{
    GENERAL_MACHINE_CHECK, INJECTOR_TURBO_CHECK, PRESSURE_CHECK, TIRE_CHECK, TRACTOR_REPORT,
};

/// Input kind of one checklist field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Control {
    /// Free text input.
    Text,
    /// Multi-line observations field.
    TextArea,
    /// si / no select.
    YesNo,
    /// bueno / regular / malo radio group.
    Rating,
}

impl Control {
    /// Allowed values for option controls; None for free text.
    pub fn options(self) -> Option<&'static [&'static str]> {
        match self {
            Control::YesNo => Some(&["si", "no"]),
            Control::Rating => Some(&["bueno", "regular", "malo"]),
            Control::Text | Control::TextArea => None,
        }
    }
}

/// One answerable field: a stable question id plus its label.
#[derive(Debug, Clone, Serialize)]
pub struct Field {
    #[serde(rename = "idPregunta")]
    pub question_id: i32,
    pub label: String,
    pub control: Control,
}

/// A titled group of fields, one per card/table of the original form.
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub title: &'static str,
    pub fields: Vec<Field>,
}

/// Complete layout of one checklist type.
#[derive(Debug, Clone, Serialize)]
pub struct FormLayout {
    #[serde(rename = "idTipoChequeo")]
    pub checklist_type: i32,
    pub title: &'static str,
    pub sections: Vec<Section>,
}

fn text(question_id: i32, label: impl Into<String>) -> Field {
    Field {
        question_id,
        label: label.into(),
        control: Control::Text,
    }
}

/// Eight text fields laid out PRE CARGA/ALTA x DERECHA/IZQUIERDA x
/// AVANCE/REVERSA, the repeating pump-pressure table shape.
fn pressure_table(title: &'static str, first_id: i32) -> Section {
    let mut fields = Vec::with_capacity(8);
    let mut id = first_id;
    for row in ["PRE CARGA", "ALTA"] {
        for side in ["DERECHA", "IZQUIERDA"] {
            for dir in ["AVANCE", "REVERSA"] {
                fields.push(text(id, format!("{row} {side} {dir}")));
                id += 1;
            }
        }
    }
    Section { title, fields }
}

/// Tire grid of one axle: MARCA/RODADO/ESTADO rows x right/left x
/// cubierta/llanta columns.
fn tire_axle(title: &'static str, first_id: i32) -> Section {
    let mut fields = Vec::with_capacity(12);
    let mut id = first_id;
    for row in ["MARCA", "RODADO", "ESTADO"] {
        for side in ["DERECHA", "IZQUIERDA"] {
            for part in ["CUBIERTA", "LLANTA"] {
                fields.push(text(id, format!("{row} {side} {part}")));
                id += 1;
            }
        }
    }
    Section { title, fields }
}

const READING_ORDINALS: [&str; 3] = ["1ra.", "2da.", "3ra."];

/// Single VALORES row of three acceleration readings (blow-by tables).
fn acceleration_row(title: &'static str, first_id: i32) -> Section {
    let fields = READING_ORDINALS
        .iter()
        .enumerate()
        .map(|(i, ord)| text(first_id + i as i32, format!("VALORES {ord} ACELERACION")))
        .collect();
    Section { title, fields }
}

/// Six numbered rows of three readings each; ids advance by three per
/// row, as in the injector-drip and compression tables.
fn reading_grid(
    title: &'static str,
    row_label: &str,
    col_label: &str,
    first_id: i32,
) -> Section {
    let mut fields = Vec::with_capacity(18);
    for row in 0..6 {
        for (col, ord) in READING_ORDINALS.iter().enumerate() {
            fields.push(text(
                first_id + row * 3 + col as i32,
                format!("{row_label} {} {ord} {col_label}", row + 1),
            ));
        }
    }
    Section { title, fields }
}

/// Rating items with a free-text comment each; ids alternate
/// item/comment as in the tractor report tables.
fn rating_items(title: &'static str, items: &[(i32, &str)]) -> Section {
    let mut fields = Vec::with_capacity(items.len() * 2);
    for &(id, label) in items {
        fields.push(Field {
            question_id: id,
            label: label.to_string(),
            control: Control::Rating,
        });
        fields.push(text(id + 1, format!("{label} - Comentario")));
    }
    Section { title, fields }
}

fn pressure_check_layout() -> FormLayout {
    FormLayout {
        checklist_type: PRESSURE_CHECK,
        title: "CHEQUEO DE PRESIONES MAQUINA",
        sections: vec![
            pressure_table("BOMBA Y MOTOR TRANSMISIÓN", 1),
            pressure_table("BOMBA TRANSMISIÓN", 9),
            pressure_table("SISTEMA DE CORTADOR DE BASE - TROCEADOR", 17),
            pressure_table("BOMBA CORTADOR DE BASE - TROCEADOR", 25),
            Section {
                title: "SISTEMA DE EXTRACTOR PRIMARIO",
                fields: vec![
                    text(33, "PRE CARGA AVANCE AMBIENTE"),
                    text(34, "PRE CARGA AVANCE BLOQ"),
                    text(35, "ALTA AVANCE AMBIENTE"),
                    text(36, "ALTA AVANCE BLOQ"),
                ],
            },
            Section {
                title: "PAQ. DE ENFRIAMIENTO",
                fields: vec![
                    text(37, "PRESION ACELERACION 1°"),
                    text(38, "PRESION ACELERACION 2°"),
                    text(39, "PRESION ACELERACION 3°"),
                ],
            },
            Section {
                title: "FUNCIÓN DE CILINDROS",
                fields: vec![text(40, "PRESION")],
            },
            Section {
                title: "DESPUNTADOR",
                fields: vec![text(41, "PRESION DERECHA"), text(42, "PRESION IZQUIERDA")],
            },
        ],
    }
}

fn tire_check_layout() -> FormLayout {
    FormLayout {
        checklist_type: TIRE_CHECK,
        title: "CHEQUEO DE NEUMATICOS",
        sections: vec![
            tire_axle("TREN DELANTERO", 96),
            tire_axle("TREN TRASERO", 108),
        ],
    }
}

fn injector_turbo_layout() -> FormLayout {
    FormLayout {
        checklist_type: INJECTOR_TURBO_CHECK,
        title: "CHEQUEO DE INYECTORES, TURBO Y AFTERCOOLER",
        sections: vec![
            acceleration_row("CHEQUEO BLOW-BY CON TURBO", 120),
            acceleration_row("CHEQUEO BLOW-BY SIN TURBO", 123),
            reading_grid("GOTEO DE INYECTORES EN UN MINUTO", "INY", "ACELERACION", 126),
            reading_grid(
                "DATOS DE PRUEBA DE COMPRESION CON SERVICE ADVISOR",
                "CIL",
                "PRUEBA",
                144,
            ),
        ],
    }
}

const GENERAL_MACHINE_ITEMS: [&str; 15] = [
    "DESPUNTADOR",
    "PONTON DERECHO",
    "PONTON IZQUIERDO",
    "CORTADOR DE BASE",
    "TROCEADORES",
    "EXTRACTOR PRIMARIO",
    "CUENTA VUELTAS DEL EXTRACTOR PRIMARIO",
    "CAPOTA PRIMARIA",
    "ELEVADOR",
    "GIRO DEL ELEVADOR",
    "BIN FLAP",
    "CAPOTA SECUNDARIA",
    "SISTEMA ELECTRICO DE SENSORES DE ALTURA",
    "SENSOR DE NIVEL DE COMBUSTIBLE",
    "COMPONENTES ELECTRICOS DE LA CABINA",
];

fn general_machine_layout() -> FormLayout {
    // Function selects sit at odd ids 65..93, their observation inputs
    // at the following even id; 95 is the closing observations box.
    let mut fields = Vec::with_capacity(GENERAL_MACHINE_ITEMS.len() * 2);
    for (idx, item) in GENERAL_MACHINE_ITEMS.iter().enumerate() {
        let select_id = 65 + (idx as i32) * 2;
        fields.push(Field {
            question_id: select_id,
            label: (*item).to_string(),
            control: Control::YesNo,
        });
        fields.push(text(select_id + 1, format!("{item} - OBSERVACIONES")));
    }
    FormLayout {
        checklist_type: GENERAL_MACHINE_CHECK,
        title: "CONTROL DE FUNCIONAMIENTO GENERAL DE MAQUINA",
        sections: vec![
            Section {
                title: "DETALLE / FUNCIONA / OBSERVACIONES",
                fields,
            },
            Section {
                title: "OBSERVACIONES",
                fields: vec![Field {
                    question_id: 95,
                    label: "OBSERVACIONES".to_string(),
                    control: Control::TextArea,
                }],
            },
        ],
    }
}

/// Front/rear axle items of the tractor report; the four cubierta
/// items additionally carry a percent-wear input at ids 255..258.
fn tractor_axle_section() -> Section {
    let items: [(i32, &str, Option<i32>); 7] = [
        (229, "Precaps/Rótulas/Ejes/etc", None),
        (231, "Llantas delanteras", None),
        (233, "Llantas traseras", None),
        (235, "Cubierta delantera izquierda", Some(255)),
        (237, "Cubierta delantera derecha", Some(256)),
        (239, "Cubierta trasera izquierda", Some(257)),
        (241, "Cubierta trasera derecha", Some(258)),
    ];
    let mut fields = Vec::with_capacity(items.len() * 2 + 4);
    for (id, label, desgaste_id) in items {
        fields.push(Field {
            question_id: id,
            label: label.to_string(),
            control: Control::Rating,
        });
        fields.push(text(id + 1, format!("{label} - Comentario")));
        if let Some(desgaste_id) = desgaste_id {
            fields.push(text(desgaste_id, format!("{label} - % Desgaste")));
        }
    }
    Section {
        title: "TREN DELANTERO Y TRASERO",
        fields,
    }
}

fn tractor_report_layout() -> FormLayout {
    FormLayout {
        checklist_type: TRACTOR_REPORT,
        title: "INFORME DE REVISION GENERAL DE TRACTOR",
        sections: vec![
            rating_items(
                "MOTOR",
                &[
                    (162, "Arranque en frío"),
                    (164, "Refrigeración"),
                    (166, "Paquete de enfriamiento"),
                    (168, "Admisión"),
                    (170, "Alimentación"),
                    (172, "Gaseo"),
                    (174, "Instalación eléctrica"),
                    (176, "Batería"),
                    (178, "Pérdidas de aceite"),
                    (180, "Pérdidas de combustible"),
                    (182, "Motor de arranque"),
                    (184, "Alternador"),
                    (186, "Cableado"),
                ],
            ),
            Section {
                title: "FILTROS",
                fields: vec![
                    text(188, "Filtro de aceite código"),
                    text(189, "Filtro de Aire 1º código"),
                    text(190, "Filtro de Aire 2º código"),
                    text(191, "Filtro de combustible 1° código"),
                    text(192, "Filtro de combustible 2º código"),
                    text(193, "Filtro de aceite hidráulico"),
                    text(194, "Filtro de aceite de transmisión"),
                ],
            },
            rating_items(
                "PUESTO DEL OPERADOR",
                &[
                    (195, "Instrumental (tablero)"),
                    (197, "Controles y perillas"),
                    (199, "Aire acondicionado"),
                    (201, "Asiento"),
                    (203, "Techo"),
                    (205, "Piso / Alfombra"),
                    (207, "Accesorios"),
                    (209, "Bocina"),
                    (211, "Luces"),
                    (213, "Vidrios/Puerta/Ventana/Cerraduras"),
                ],
            ),
            rating_items(
                "SISTEMA HIDRAULICO",
                &[
                    (215, "Levante de 3 puntos"),
                    (217, "Enganche/barra de tiro"),
                    (219, "Toma de Fuerza"),
                    (221, "Dirección"),
                    (223, "Doble tracción"),
                    (225, "Mandos finales"),
                    (227, "Válvulas comando a distancia (VCS)"),
                ],
            ),
            tractor_axle_section(),
            rating_items(
                "CARROCERIA/FUNCIONAMIENTO",
                &[
                    (243, "Chapas y protecciones"),
                    (245, "Pintura en general"),
                    (247, "Caja de cambios y Grupos"),
                    (249, "Funcionamiento de luces y faros"),
                    (251, "Funcionamiento de embrague"),
                    (253, "Funcionamiento de frenos"),
                ],
            ),
        ],
    }
}

static LAYOUTS: Lazy<Vec<FormLayout>> = Lazy::new(|| {
    vec![
        pressure_check_layout(),
        tire_check_layout(),
        injector_turbo_layout(),
        general_machine_layout(),
        tractor_report_layout(),
    ]
});

/// The form layout of a checklist type, or None for checklist types
/// without a dedicated form (replay falls back to a generic listing).
pub fn layout_for(checklist_type: i32) -> Option<&'static FormLayout> {
    LAYOUTS.iter().find(|l| l.checklist_type == checklist_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn all_question_ids() -> Vec<i32> {
        LAYOUTS
            .iter()
            .flat_map(|l| l.sections.iter())
            .flat_map(|s| s.fields.iter())
            .map(|f| f.question_id)
            .collect()
    }

    #[test]
    fn question_ids_are_globally_unique() {
        let ids = all_question_ids();
        let unique: HashSet<i32> = ids.iter().copied().collect();
        assert_eq!(ids.len(), unique.len());
    }

    #[test]
    fn every_catalogued_checklist_type_resolves() {
        for id in [1, 2, 3, 6, 7] {
            let layout = layout_for(id).unwrap();
            assert_eq!(layout.checklist_type, id);
        }
        assert!(layout_for(99).is_none());
    }

    #[test]
    fn pressure_check_covers_ids_1_through_42() {
        let layout = layout_for(1).unwrap();
        let ids: Vec<i32> = layout
            .sections
            .iter()
            .flat_map(|s| s.fields.iter())
            .map(|f| f.question_id)
            .collect();
        assert_eq!(ids, (1..=42).collect::<Vec<i32>>());
    }

    #[test]
    fn tire_check_covers_ids_96_through_119() {
        let layout = layout_for(2).unwrap();
        let ids: Vec<i32> = layout
            .sections
            .iter()
            .flat_map(|s| s.fields.iter())
            .map(|f| f.question_id)
            .collect();
        assert_eq!(ids, (96..=119).collect::<Vec<i32>>());
    }

    #[test]
    fn injector_turbo_covers_ids_120_through_161() {
        let layout = layout_for(3).unwrap();
        let ids: Vec<i32> = layout
            .sections
            .iter()
            .flat_map(|s| s.fields.iter())
            .map(|f| f.question_id)
            .collect();
        assert_eq!(ids, (120..=161).collect::<Vec<i32>>());
    }

    #[test]
    fn injector_and_compression_tables_have_six_rows_each() {
        let layout = layout_for(3).unwrap();
        let injectors = &layout.sections[2];
        assert_eq!(injectors.title, "GOTEO DE INYECTORES EN UN MINUTO");
        assert_eq!(injectors.fields.len(), 18);
        assert_eq!(injectors.fields[3].question_id, 129);
        assert_eq!(injectors.fields[3].label, "INY 2 1ra. ACELERACION");
        let compression = &layout.sections[3];
        assert_eq!(compression.fields.len(), 18);
        assert_eq!(compression.fields[3].question_id, 147);
        assert_eq!(compression.fields[3].label, "CIL 2 1ra. PRUEBA");
    }

    #[test]
    fn cubierta_items_carry_percent_wear_fields() {
        let layout = layout_for(7).unwrap();
        let fields: Vec<&Field> = layout
            .sections
            .iter()
            .flat_map(|s| s.fields.iter())
            .collect();
        for id in 255..=258 {
            let wear = fields
                .iter()
                .find(|f| f.question_id == id)
                .unwrap_or_else(|| panic!("missing wear field {id}"));
            assert_eq!(wear.control, Control::Text);
            assert!(wear.label.contains("% Desgaste"));
        }
    }

    #[test]
    fn general_machine_pairs_selects_with_observations() {
        let layout = layout_for(6).unwrap();
        let fields: Vec<&Field> = layout
            .sections
            .iter()
            .flat_map(|s| s.fields.iter())
            .collect();
        let selects: Vec<&&Field> = fields
            .iter()
            .filter(|f| f.control == Control::YesNo)
            .collect();
        assert_eq!(selects.len(), 15);
        for select in selects {
            assert_eq!(select.question_id % 2, 1);
            assert!(fields.iter().any(|f| {
                f.question_id == select.question_id + 1 && f.control == Control::Text
            }));
        }
        assert!(fields.iter().any(|f| {
            f.question_id == 95 && f.control == Control::TextArea
        }));
    }

    #[test]
    fn tractor_report_rates_items_at_even_ids_with_odd_comments() {
        let layout = layout_for(7).unwrap();
        let motor = &layout.sections[0];
        assert_eq!(motor.title, "MOTOR");
        assert_eq!(motor.fields[0].question_id, 162);
        assert_eq!(motor.fields[0].control, Control::Rating);
        assert_eq!(motor.fields[1].question_id, 163);
        assert_eq!(motor.fields[1].control, Control::Text);
    }

    #[test]
    fn option_controls_expose_their_allowed_values() {
        assert_eq!(Control::YesNo.options(), Some(["si", "no"].as_slice()));
        assert_eq!(
            Control::Rating.options(),
            Some(["bueno", "regular", "malo"].as_slice())
        );
        assert!(Control::Text.options().is_none());
    }
}
