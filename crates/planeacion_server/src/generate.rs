//! Request body → DOCX pipeline.

use planeacion_core::payload::parse_json_body;
use planeacion_core::{ModalityRegistry, PlanError, PlanRequest};
use planeacion_docs::{assemble_plan, render_docx};
use tracing::{debug, info};

/// A finished document ready to be sent as a download.
#[derive(Debug, Clone)]
pub struct GeneratedPlan {
    pub modality: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Validate the body, resolve its modality and build the document.
///
/// The modality is checked before the rest of the payload is interpreted,
/// so an unknown modality is reported even when other fields are malformed.
pub fn generate_plan(registry: &ModalityRegistry, body: &[u8]) -> Result<GeneratedPlan, PlanError> {
    let value = parse_json_body(body)?;

    let requested = PlanRequest::modality_of(&value)?;
    info!("Modalidad recibida: '{requested}'");
    let modality = registry.resolve(&requested)?;

    let request = PlanRequest::from_value(value)?;
    debug!(
        "Momentos recibidos: {:?}",
        request.momentos.keys().collect::<Vec<_>>()
    );

    let document = assemble_plan(modality, &request);
    let bytes = render_docx(&document)?;
    info!(
        "Generando archivo para modalidad: {} ({} bytes)",
        modality.name,
        bytes.len()
    );

    Ok(GeneratedPlan {
        modality: modality.name.clone(),
        file_name: document.file_name,
        bytes,
    })
}

/// `Content-Disposition` value for an attachment.
///
/// Non-ASCII names get an ASCII fallback in `filename` plus the exact name
/// percent-encoded in `filename*` (RFC 5987).
pub fn content_disposition(file_name: &str) -> String {
    if file_name.is_ascii() {
        return format!("attachment; filename=\"{file_name}\"");
    }
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        ascii_fallback(file_name),
        urlencoding::encode(file_name)
    )
}

fn ascii_fallback(name: &str) -> String {
    name.chars()
        .filter_map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => Some('a'),
            'é' | 'è' | 'ë' | 'ê' => Some('e'),
            'í' | 'ì' | 'ï' | 'î' => Some('i'),
            'ó' | 'ò' | 'ö' | 'ô' => Some('o'),
            'ú' | 'ù' | 'ü' | 'û' => Some('u'),
            'ñ' => Some('n'),
            'Á' | 'À' | 'Ä' | 'Â' => Some('A'),
            'É' | 'È' | 'Ë' | 'Ê' => Some('E'),
            'Í' | 'Ì' | 'Ï' | 'Î' => Some('I'),
            'Ó' | 'Ò' | 'Ö' | 'Ô' => Some('O'),
            'Ú' | 'Ù' | 'Ü' | 'Û' => Some('U'),
            'Ñ' => Some('N'),
            '"' | '\\' => None,
            c if c.is_ascii() && !c.is_ascii_control() => Some(c),
            _ => None,
        })
        .collect()
}
