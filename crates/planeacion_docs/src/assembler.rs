//! Builds the lesson-plan document for a resolved modality.
//!
//! Layout, in order: title, general information, curricular content,
//! modality moments, possible variants, resources. A spacer paragraph
//! follows every table except the last.

use planeacion_core::{MatchTier, Modality, PlanRequest, resolve_moment};
use tracing::debug;

use crate::model::{Block, PlanDocument, TableBlock};

const GENERAL_HEADERS: [&str; 3] = ["Periodo de Aplicación", "Propósito", "Relevancia Social"];
const CURRICULAR_HEADERS: [&str; 5] = [
    "Campos Formativos",
    "Contenidos",
    "Procesos de Desarrollo",
    "Relación de Contenidos",
    "Eje Articulador",
];
const MOMENT_HEADERS: [&str; 2] = ["Momentos", "Descripción"];
const VARIANT_HEADERS: [&str; 1] = ["Posibles Variantes"];
const RESOURCE_HEADERS: [&str; 3] = ["Materiales", "Espacios", "Producción Sugerida"];

/// Assemble the full document for `request` under `modality`.
pub fn assemble_plan(modality: &Modality, request: &PlanRequest) -> PlanDocument {
    let tables = [
        general_table(request),
        curricular_table(request),
        moments_table(modality, request),
        variants_table(request),
        resources_table(request),
    ];

    let mut blocks = vec![
        Block::Title(format!("Planeación {}: {}", modality.name, request.titulo)),
        Block::Spacer,
    ];
    let last = tables.len() - 1;
    for (i, table) in tables.into_iter().enumerate() {
        blocks.push(Block::Table(table));
        if i != last {
            blocks.push(Block::Spacer);
        }
    }

    PlanDocument {
        file_name: modality.file_name(),
        blocks,
    }
}

fn general_table(request: &PlanRequest) -> TableBlock {
    TableBlock::new(
        &GENERAL_HEADERS,
        vec![vec![
            request.periodo_aplicacion.clone(),
            request.proposito.clone(),
            request.relevancia_social.clone(),
        ]],
    )
}

/// One row per index of the longest of fields / contents / processes.
fn curricular_table(request: &PlanRequest) -> TableBlock {
    let campos = &request.campos_formativos;
    let contenidos = &request.contenidos;
    let procesos = &request.procesos_desarrollo;
    let row_count = campos.len().max(contenidos.len()).max(procesos.len());

    let rows = (0..row_count)
        .map(|i| {
            let campo = campos.get(i).cloned().unwrap_or_default();
            let relacion = request
                .relacion_contenidos
                .get(&campo)
                .cloned()
                .unwrap_or_default();
            let eje = if i == 0 {
                request.eje_articulador.clone()
            } else {
                String::new()
            };
            vec![
                campo,
                contenidos.get(i).cloned().unwrap_or_default(),
                procesos.get(i).map(|p| p.to_cell_text()).unwrap_or_default(),
                relacion,
                eje,
            ]
        })
        .collect();

    TableBlock::new(&CURRICULAR_HEADERS, rows)
}

fn moments_table(modality: &Modality, request: &PlanRequest) -> TableBlock {
    let rows = modality
        .moments
        .iter()
        .map(|moment| {
            let resolved = resolve_moment(moment, &request.momentos);
            if resolved.tier != MatchTier::Exact {
                debug!(
                    "Moment '{}' resolved via {:?} ({} chars)",
                    moment.label,
                    resolved.tier,
                    resolved.text.len()
                );
            }
            vec![moment.label.clone(), resolved.text.to_string()]
        })
        .collect();

    TableBlock::new(&MOMENT_HEADERS, rows)
}

fn variants_table(request: &PlanRequest) -> TableBlock {
    TableBlock::new(&VARIANT_HEADERS, vec![vec![request.posibles_variantes.clone()]])
}

fn resources_table(request: &PlanRequest) -> TableBlock {
    TableBlock::new(
        &RESOURCE_HEADERS,
        vec![vec![
            bullets(&request.materiales),
            bullets(&request.espacios),
            bullets(&request.produccion_sugerida),
        ]],
    )
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("• {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}
