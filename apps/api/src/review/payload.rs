//! Request payload for `POST /generate`.
//!
//! Producers send the nested fields in several shapes (object, single-item list,
//! JSON-encoded string). Everything is resolved here into canonical records so
//! the section code only ever sees one shape.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use tracing::warn;

use super::normalize::{format_name_from_email, PLACEHOLDER};

/// Raw request body as received.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(default, deserialize_with = "loose_text")]
    pub evaluado: String,
    #[serde(default, deserialize_with = "loose_text")]
    pub mes_ano: String,
    #[serde(default)]
    pub autoevaluacion: Option<Value>,
    #[serde(default)]
    pub autoev: Option<Value>,
    #[serde(default)]
    pub evaluaciones: Option<Value>,
    #[serde(default, deserialize_with = "loose_text")]
    pub resumen: String,
}

/// Answers to the three fixed review questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SelfAssessmentRecord {
    #[serde(default, rename = "positivos", deserialize_with = "loose_text")]
    pub positives: String,
    #[serde(default, rename = "mejorar", deserialize_with = "loose_text")]
    pub improvements: String,
    #[serde(default, rename = "algo_mas", deserialize_with = "loose_text")]
    pub additional: String,
}

impl SelfAssessmentRecord {
    pub fn is_blank(&self) -> bool {
        [&self.positives, &self.improvements, &self.additional]
            .iter()
            .all(|v| v.trim().is_empty())
    }
}

/// One peer's evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EvaluationRecord {
    #[serde(default, rename = "evaluador", deserialize_with = "loose_text")]
    pub evaluator: String,
    #[serde(default, rename = "positivos", deserialize_with = "loose_text")]
    pub positives: String,
    #[serde(default, rename = "mejorar", deserialize_with = "loose_text")]
    pub improvements: String,
    #[serde(default, rename = "algo_mas", deserialize_with = "loose_text")]
    pub additional: String,
}

/// Canonical, display-ready input for rendering a review.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewInput {
    /// Normalized evaluated-person name, or the placeholder.
    pub evaluado: String,
    /// Period label, or the placeholder.
    pub period: String,
    pub self_assessment: Option<SelfAssessmentRecord>,
    pub evaluations: Vec<EvaluationRecord>,
    pub summary: String,
}

impl From<GenerateRequest> for ReviewInput {
    fn from(request: GenerateRequest) -> Self {
        let evaluado = non_blank_or_placeholder(format_name_from_email(&request.evaluado));
        let period = non_blank_or_placeholder(request.mes_ano.trim().to_string());
        let self_assessment = resolve_self_assessment(request.autoevaluacion.or(request.autoev));
        let evaluations = resolve_evaluations(request.evaluaciones);

        Self {
            evaluado,
            period,
            self_assessment,
            evaluations,
            summary: request.resumen,
        }
    }
}

/// The shapes a nested field has been seen arriving in.
#[derive(Debug, Clone, PartialEq)]
pub enum LooseField {
    Absent,
    Object(Map<String, Value>),
    List(Vec<Value>),
    /// Present but unusable (unparseable string, bare scalar).
    Malformed(String),
}

impl LooseField {
    /// Classifies a raw value, decoding JSON-encoded strings once.
    pub fn from_value(value: Option<Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Absent,
            Some(Value::Object(map)) => Self::Object(map),
            Some(Value::Array(items)) => Self::List(items),
            Some(Value::String(s)) if s.trim().is_empty() => Self::Absent,
            Some(Value::String(s)) => match serde_json::from_str::<Value>(&s) {
                Ok(Value::Object(map)) => Self::Object(map),
                Ok(Value::Array(items)) => Self::List(items),
                Ok(Value::Null) => Self::Absent,
                Ok(other) => Self::Malformed(other.to_string()),
                Err(e) => Self::Malformed(e.to_string()),
            },
            Some(other) => Self::Malformed(other.to_string()),
        }
    }
}

pub fn resolve_self_assessment(value: Option<Value>) -> Option<SelfAssessmentRecord> {
    let map = match LooseField::from_value(value) {
        LooseField::Absent => return None,
        LooseField::Object(map) => map,
        LooseField::List(items) => {
            if items.len() > 1 {
                warn!("autoevaluacion has {} items; using the first", items.len());
            }
            match items
                .into_iter()
                .next()
                .map(|item| LooseField::from_value(Some(item)))
            {
                Some(LooseField::Object(map)) => map,
                _ => return None,
            }
        }
        LooseField::Malformed(reason) => {
            warn!("Ignoring malformed autoevaluacion: {reason}");
            return None;
        }
    };

    record_from_map(map, "autoevaluacion")
}

pub fn resolve_evaluations(value: Option<Value>) -> Vec<EvaluationRecord> {
    let items = match LooseField::from_value(value) {
        LooseField::Absent => return Vec::new(),
        LooseField::Object(map) => vec![Value::Object(map)],
        LooseField::List(items) => items,
        LooseField::Malformed(reason) => {
            warn!("Ignoring malformed evaluaciones: {reason}");
            return Vec::new();
        }
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match LooseField::from_value(Some(item)) {
            LooseField::Object(map) => record_from_map::<EvaluationRecord>(map, "evaluaciones"),
            _ => {
                warn!("Skipping evaluaciones[{i}]: not an object");
                None
            }
        })
        .collect()
}

fn record_from_map<T: serde::de::DeserializeOwned>(
    map: Map<String, Value>,
    field: &str,
) -> Option<T> {
    match serde_json::from_value(Value::Object(map)) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!("Ignoring malformed {field} entry: {e}");
            None
        }
    }
}

fn non_blank_or_placeholder(value: String) -> String {
    if value.trim().is_empty() {
        PLACEHOLDER.to_string()
    } else {
        value
    }
}

/// Accepts strings, numbers and booleans as text; `null` becomes empty.
fn loose_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    })
}
