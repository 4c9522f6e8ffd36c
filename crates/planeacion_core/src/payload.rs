//! Request payload for plan generation.
//!
//! The payload is free-form: every field is optional and defaults to an
//! empty value. Scalar fields accept strings, numbers and booleans; list
//! fields also accept a single scalar. Anything structurally off (an object
//! where text is expected) is rejected when the request is interpreted.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::PlanError;

/// Grade → learning elements, per content item.
pub type GradesByContent = IndexMap<String, IndexMap<String, Vec<String>>>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlanRequest {
    #[serde(deserialize_with = "lenient::text")]
    pub modalidad: String,
    #[serde(deserialize_with = "lenient::text")]
    pub titulo: String,

    // General information
    #[serde(deserialize_with = "lenient::text")]
    pub periodo_aplicacion: String,
    #[serde(deserialize_with = "lenient::text")]
    pub proposito: String,
    #[serde(deserialize_with = "lenient::text")]
    pub relevancia_social: String,

    // Curricular content
    #[serde(deserialize_with = "lenient::text_list")]
    pub campos_formativos: Vec<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub contenidos: Vec<String>,
    #[serde(deserialize_with = "lenient::processes")]
    pub procesos_desarrollo: Vec<DevelopmentProcess>,
    #[serde(deserialize_with = "lenient::text_map")]
    pub relacion_contenidos: IndexMap<String, String>,
    #[serde(deserialize_with = "lenient::text")]
    pub eje_articulador: String,

    // Moments
    #[serde(deserialize_with = "lenient::text_map")]
    pub momentos: IndexMap<String, String>,

    // Variants and resources
    #[serde(deserialize_with = "lenient::text")]
    pub posibles_variantes: String,
    #[serde(deserialize_with = "lenient::text_list")]
    pub materiales: Vec<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub espacios: Vec<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub produccion_sugerida: Vec<String>,
}

/// Older clients send these names. The current name wins when both appear.
const LEGACY_FIELDS: [(&str, &str); 2] = [
    ("variantes", "posiblesVariantes"),
    ("produccion_sugerida", "produccionSugerida"),
];

/// Development processes attached to one formative field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DevelopmentProcess {
    pub grados_por_contenido: GradesByContent,
}

impl DevelopmentProcess {
    /// Flatten into the indented bullet block shown in a table cell.
    pub fn to_cell_text(&self) -> String {
        let mut out = String::new();
        for (content, grades) in &self.grados_por_contenido {
            out.push_str(content);
            out.push('\n');
            for (grade, elements) in grades {
                out.push_str(&format!("  Grado {grade}:\n"));
                for element in elements {
                    out.push_str(&format!("    • {element}\n"));
                }
            }
        }
        out.trim().to_string()
    }
}

impl PlanRequest {
    /// Interpret an already-parsed JSON body.
    pub fn from_value(mut value: Value) -> Result<Self, PlanError> {
        if let Value::Object(map) = &mut value {
            for (legacy, current) in LEGACY_FIELDS {
                if let Some(v) = map.remove(legacy)
                    && !map.contains_key(current)
                {
                    map.insert(current.to_string(), v);
                }
            }
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Read only the `modalidad` field, so the modality can be validated
    /// before the rest of the payload is interpreted.
    pub fn modality_of(value: &Value) -> Result<String, PlanError> {
        match value.get("modalidad") {
            Some(v) => lenient::value_to_text(v)
                .map_err(|e| PlanError::Assembly(format!("modalidad: {e}"))),
            None => Ok(String::new()),
        }
    }
}

/// Parse a raw request body into a non-empty JSON object.
pub fn parse_json_body(body: &[u8]) -> Result<Value, PlanError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(PlanError::MissingPayload);
    }
    let value: Value =
        serde_json::from_slice(body).map_err(|e| PlanError::InvalidJson(e.to_string()))?;
    match &value {
        Value::Object(map) if !map.is_empty() => Ok(value),
        _ => Err(PlanError::MissingPayload),
    }
}

// ---------------------------------------------------------------------------
// Lenient field decoding
// ---------------------------------------------------------------------------

mod lenient {
    use indexmap::IndexMap;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::{DevelopmentProcess, GradesByContent};

    fn kind(v: &Value) -> &'static str {
        match v {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "a list",
            Value::Object(_) => "an object",
        }
    }

    pub fn value_to_text(v: &Value) -> Result<String, String> {
        match v {
            Value::Null => Ok(String::new()),
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(format!("expected text, found {}", kind(other))),
        }
    }

    fn value_to_list(v: &Value) -> Result<Vec<String>, String> {
        match v {
            Value::Array(items) => items.iter().map(value_to_text).collect(),
            Value::Null => Ok(Vec::new()),
            Value::String(s) if s.is_empty() => Ok(Vec::new()),
            scalar => value_to_text(scalar).map(|s| vec![s]),
        }
    }

    fn value_to_map(v: &Value) -> Result<IndexMap<String, String>, String> {
        match v {
            Value::Null => Ok(IndexMap::new()),
            Value::Object(map) => map
                .iter()
                .map(|(k, v)| value_to_text(v).map(|text| (k.clone(), text)))
                .collect(),
            other => Err(format!("expected a mapping, found {}", kind(other))),
        }
    }

    fn value_to_process(v: &Value) -> Result<DevelopmentProcess, String> {
        let Value::Object(entry) = v else {
            return Err(format!(
                "procesosDesarrollo entries must be objects, found {}",
                kind(v)
            ));
        };
        let mut grados_por_contenido = GradesByContent::new();
        let grades = match entry.get("gradosPorContenido") {
            None | Some(Value::Null) => return Ok(DevelopmentProcess::default()),
            Some(Value::Object(grades)) => grades,
            Some(other) => {
                return Err(format!(
                    "gradosPorContenido must be an object, found {}",
                    kind(other)
                ));
            }
        };
        for (content, by_grade) in grades {
            let Value::Object(by_grade) = by_grade else {
                return Err(format!(
                    "grades for '{content}' must be an object, found {}",
                    kind(by_grade)
                ));
            };
            let mut levels = IndexMap::new();
            for (grade, elements) in by_grade {
                levels.insert(grade.clone(), value_to_list(elements)?);
            }
            grados_por_contenido.insert(content.clone(), levels);
        }
        Ok(DevelopmentProcess {
            grados_por_contenido,
        })
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        let v = Value::deserialize(d)?;
        value_to_text(&v).map_err(D::Error::custom)
    }

    pub fn text_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        let v = Value::deserialize(d)?;
        value_to_list(&v).map_err(D::Error::custom)
    }

    pub fn text_map<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<IndexMap<String, String>, D::Error> {
        let v = Value::deserialize(d)?;
        value_to_map(&v).map_err(D::Error::custom)
    }

    pub fn processes<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Vec<DevelopmentProcess>, D::Error> {
        match Value::deserialize(d)? {
            Value::Null => Ok(Vec::new()),
            Value::Array(items) => items
                .iter()
                .map(value_to_process)
                .collect::<Result<_, _>>()
                .map_err(D::Error::custom),
            other => Err(D::Error::custom(format!(
                "procesosDesarrollo must be a list, found {}",
                kind(&other)
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let req = PlanRequest::from_value(json!({"modalidad": "ABJ"})).unwrap();
        assert_eq!(req.modalidad, "ABJ");
        assert!(req.titulo.is_empty());
        assert!(req.campos_formativos.is_empty());
        assert!(req.procesos_desarrollo.is_empty());
        assert!(req.momentos.is_empty());
    }

    #[test]
    fn test_camel_case_fields() {
        let req = PlanRequest::from_value(json!({
            "periodoAplicacion": "Marzo",
            "relevanciaSocial": "Alta",
            "camposFormativos": ["Lenguajes", "Saberes"],
            "ejeArticulador": "Inclusión",
            "posiblesVariantes": "Ninguna",
            "produccionSugerida": ["Mural"],
        }))
        .unwrap();
        assert_eq!(req.periodo_aplicacion, "Marzo");
        assert_eq!(req.relevancia_social, "Alta");
        assert_eq!(req.campos_formativos, vec!["Lenguajes", "Saberes"]);
        assert_eq!(req.eje_articulador, "Inclusión");
        assert_eq!(req.posibles_variantes, "Ninguna");
        assert_eq!(req.produccion_sugerida, vec!["Mural"]);
    }

    #[test]
    fn test_legacy_field_aliases() {
        let req = PlanRequest::from_value(json!({
            "variantes": "Adaptar la dificultad",
            "produccion_sugerida": "Libro ilustrado",
        }))
        .unwrap();
        assert_eq!(req.posibles_variantes, "Adaptar la dificultad");
        assert_eq!(req.produccion_sugerida, vec!["Libro ilustrado"]);
    }

    #[test]
    fn test_current_name_wins_over_legacy() {
        let req = PlanRequest::from_value(json!({
            "modalidad": "ABJ",
            "posiblesVariantes": "A",
            "variantes": "B",
            "produccionSugerida": ["Mural"],
            "produccion_sugerida": ["Cartel"],
        }))
        .unwrap();
        assert_eq!(req.posibles_variantes, "A");
        assert_eq!(req.produccion_sugerida, vec!["Mural"]);
    }

    #[test]
    fn test_scalar_list_fields() {
        let req = PlanRequest::from_value(json!({
            "materiales": "Tarjetas numéricas",
            "espacios": "",
            "contenidos": [1, true, null],
        }))
        .unwrap();
        assert_eq!(req.materiales, vec!["Tarjetas numéricas"]);
        assert!(req.espacios.is_empty());
        assert_eq!(req.contenidos, vec!["1", "true", ""]);
    }

    #[test]
    fn test_object_in_text_field_is_rejected() {
        let err = PlanRequest::from_value(json!({"titulo": {"a": 1}})).unwrap_err();
        assert!(matches!(err, PlanError::Assembly(_)));
        assert!(err.to_string().contains("expected text"));
    }

    #[test]
    fn test_momentos_keep_caller_order() {
        let req = PlanRequest::from_value(json!({
            "momentos": {"z": "1", "a": "2", "m": "3"}
        }))
        .unwrap();
        let keys: Vec<&str> = req.momentos.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_development_process_flattening() {
        let req = PlanRequest::from_value(json!({
            "procesosDesarrollo": [{
                "gradosPorContenido": {
                    "Conteo": {"1": ["Cuenta hasta 10", "Compara"], "2": ["Cuenta hasta 20"]}
                }
            }]
        }))
        .unwrap();
        assert_eq!(
            req.procesos_desarrollo[0].to_cell_text(),
            "Conteo\n  Grado 1:\n    • Cuenta hasta 10\n    • Compara\n  Grado 2:\n    • Cuenta hasta 20"
        );
    }

    #[test]
    fn test_process_without_grades_is_empty() {
        let req = PlanRequest::from_value(json!({"procesosDesarrollo": [{}]})).unwrap();
        assert_eq!(req.procesos_desarrollo.len(), 1);
        assert_eq!(req.procesos_desarrollo[0].to_cell_text(), "");
    }

    #[test]
    fn test_malformed_process_is_rejected() {
        let err = PlanRequest::from_value(json!({"procesosDesarrollo": ["texto"]})).unwrap_err();
        assert!(err.to_string().contains("procesosDesarrollo entries must be objects"));
    }

    #[test]
    fn test_parse_json_body() {
        assert!(matches!(parse_json_body(b""), Err(PlanError::MissingPayload)));
        assert!(matches!(parse_json_body(b"  \n"), Err(PlanError::MissingPayload)));
        assert!(matches!(parse_json_body(b"{}"), Err(PlanError::MissingPayload)));
        assert!(matches!(parse_json_body(b"null"), Err(PlanError::MissingPayload)));
        assert!(matches!(parse_json_body(b"[1]"), Err(PlanError::MissingPayload)));
        assert!(matches!(parse_json_body(b"{oops"), Err(PlanError::InvalidJson(_))));
        assert!(parse_json_body(br#"{"modalidad":"ABJ"}"#).is_ok());
    }

    #[test]
    fn test_modality_of() {
        assert_eq!(PlanRequest::modality_of(&json!({"modalidad": "ABJ"})).unwrap(), "ABJ");
        assert_eq!(PlanRequest::modality_of(&json!({"titulo": "T"})).unwrap(), "");
        assert!(PlanRequest::modality_of(&json!({"modalidad": ["ABJ"]})).is_err());
    }
}
