use std::collections::HashMap;

use serde::Serialize;

use crate::db::models::{SessionAnswerRow, SessionDetail};
use crate::forms::catalog::{Control, FormLayout};

/// One field of a replayed form, carrying the recorded value.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayField {
    #[serde(rename = "idPregunta")]
    pub question_id: i32,
    pub label: String,
    pub control: Control,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplaySection {
    pub title: &'static str,
    pub fields: Vec<ReplayField>,
}

/// Generic question/answer row for checklist types without a layout.
#[derive(Debug, Clone, Serialize)]
pub struct GenericRow {
    #[serde(rename = "idPregunta")]
    pub question_id: i32,
    pub pregunta: String,
    pub respuesta: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ReplayBody {
    /// Hydrated form layout of a catalogued checklist type.
    Form {
        title: &'static str,
        sections: Vec<ReplaySection>,
    },
    /// Fallback listing when no layout exists for the checklist type.
    Generic { rows: Vec<GenericRow> },
}

/// Read-only replay of one session, as returned by
/// `GET /api/sesiones/{id}/replay`.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayDocument {
    pub sesion: SessionDetail,
    #[serde(flatten)]
    pub body: ReplayBody,
}

/// Normalizes a recorded value against a field's control: option
/// controls match trimmed and case-insensitive, free text keeps the
/// raw value. Values matching no option are kept raw so nothing
/// recorded is dropped on display.
fn normalize(control: Control, raw: &str) -> String {
    match control.options() {
        Some(options) => {
            let folded = raw.trim().to_lowercase();
            if options.contains(&folded.as_str()) {
                folded
            } else {
                raw.to_string()
            }
        }
        None => raw.to_string(),
    }
}

/// Fills a layout with the answers of one session. Unanswered fields
/// carry None.
pub fn hydrate(layout: &FormLayout, answers: &HashMap<i32, String>) -> ReplayBody {
    let sections = layout
        .sections
        .iter()
        .map(|section| ReplaySection {
            title: section.title,
            fields: section
                .fields
                .iter()
                .map(|field| ReplayField {
                    question_id: field.question_id,
                    label: field.label.clone(),
                    control: field.control,
                    value: answers
                        .get(&field.question_id)
                        .map(|raw| normalize(field.control, raw)),
                })
                .collect(),
        })
        .collect();
    ReplayBody::Form {
        title: layout.title,
        sections,
    }
}

/// Generic fallback body from the joined answer rows.
pub fn generic_body(rows: &[SessionAnswerRow]) -> ReplayBody {
    ReplayBody::Generic {
        rows: rows
            .iter()
            .map(|r| GenericRow {
                question_id: r.id_pregunta,
                pregunta: r.pregunta.clone(),
                respuesta: r.respuesta.clone(),
            })
            .collect(),
    }
}
