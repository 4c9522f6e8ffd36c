use docx_rs::*;
use planeacion_core::PlanError;
use std::io::Cursor;

use crate::model::{Block, PlanDocument, TableBlock};

// Sizes are in half-points.
const TITLE_SIZE: usize = 40; // 20pt
const HEADER_SIZE: usize = 24; // 12pt
const CONTENT_SIZE: usize = 20; // 10pt
/// Border width in eighths of a point (4 = 0.5pt).
const BORDER_SIZE: usize = 4;
const BORDER_COLOR: &str = "000000";

/// Render a plan document to DOCX bytes.
///
/// The title is a large, bold, centered paragraph. Every table gets single
/// black borders on all edges and inside lines, a bold centered header row,
/// and left-aligned body rows. Newlines in cell text become line breaks.
pub fn render_docx(document: &PlanDocument) -> Result<Vec<u8>, PlanError> {
    let mut docx = Docx::new();

    for block in &document.blocks {
        docx = match block {
            Block::Title(title) => {
                let run = Run::new().add_text(title).bold().size(TITLE_SIZE);
                docx.add_paragraph(
                    Paragraph::new()
                        .add_run(run)
                        .align(AlignmentType::Center),
                )
            }
            Block::Table(table) => docx.add_table(render_table(table)),
            Block::Spacer => docx.add_paragraph(Paragraph::new()),
        };
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| PlanError::Render(format!("Failed to pack DOCX: {e}")))?;

    Ok(buf.into_inner())
}

fn render_table(table: &TableBlock) -> Table {
    let mut rows = Vec::with_capacity(table.row_count());

    // Header row
    let header_cells: Vec<TableCell> = table
        .header
        .iter()
        .map(|h| {
            let run = text_run(h).bold().size(HEADER_SIZE);
            TableCell::new().add_paragraph(
                Paragraph::new()
                    .add_run(run)
                    .align(AlignmentType::Center),
            )
        })
        .collect();
    rows.push(TableRow::new(header_cells));

    // Data rows
    for row in &table.rows {
        let cells: Vec<TableCell> = row
            .iter()
            .map(|cell_text| {
                let run = text_run(cell_text).size(CONTENT_SIZE);
                TableCell::new().add_paragraph(
                    Paragraph::new()
                        .add_run(run)
                        .align(AlignmentType::Left),
                )
            })
            .collect();
        rows.push(TableRow::new(cells));
    }

    Table::new(rows)
        .set_borders(black_borders())
        .align(TableAlignmentType::Center)
}

/// A run holding `text`, with `\n` turned into line breaks.
fn text_run(text: &str) -> Run {
    let mut run = Run::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        if !line.is_empty() {
            run = run.add_text(line);
        }
    }
    run
}

fn black_borders() -> TableBorders {
    [
        TableBorderPosition::Top,
        TableBorderPosition::Left,
        TableBorderPosition::Bottom,
        TableBorderPosition::Right,
        TableBorderPosition::InsideH,
        TableBorderPosition::InsideV,
    ]
    .into_iter()
    .fold(TableBorders::new(), |borders, position| {
        borders.set(
            TableBorder::new(position)
                .border_type(BorderType::Single)
                .size(BORDER_SIZE)
                .color(BORDER_COLOR),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::assemble_plan;
    use planeacion_core::{ModalityRegistry, PlanRequest};
    use serde_json::json;
    use std::io::Read;

    fn document_xml(bytes: &[u8]) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name("word/document.xml").unwrap();
        let mut xml = String::new();
        file.read_to_string(&mut xml).unwrap();
        xml
    }

    fn plan(payload: serde_json::Value) -> PlanDocument {
        let modality = ModalityRegistry::global()
            .resolve(&PlanRequest::modality_of(&payload).unwrap())
            .unwrap();
        assemble_plan(modality, &PlanRequest::from_value(payload).unwrap())
    }

    #[test]
    fn test_render_is_a_zip() {
        let bytes = render_docx(&plan(json!({"modalidad": "ABJ", "titulo": "T"}))).unwrap();
        // DOCX is a zip file -- starts with PK magic bytes
        assert!(bytes.len() > 100);
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn test_render_contains_cell_text() {
        let bytes = render_docx(&plan(json!({
            "modalidad": "ABJ",
            "titulo": "Jugando con los números",
            "momentos": {"planteamiento_juego": "intro"},
        })))
        .unwrap();
        let xml = document_xml(&bytes);
        assert!(xml.contains("Jugando con los números"));
        assert!(xml.contains("Planteamiento del Juego"));
        assert!(xml.contains("intro"));
        assert!(xml.contains("Relevancia Social"));
    }

    #[test]
    fn test_render_applies_borders() {
        let bytes = render_docx(&plan(json!({"modalidad": "Proyecto"}))).unwrap();
        let xml = document_xml(&bytes);
        assert!(xml.contains("insideH"));
        assert!(xml.contains("insideV"));
        assert!(xml.contains("000000"));
    }

    #[test]
    fn test_render_multiline_cells() {
        let bytes = render_docx(&plan(json!({
            "modalidad": "Centros de Interés",
            "materiales": ["Imágenes", "Grabaciones"],
        })))
        .unwrap();
        let xml = document_xml(&bytes);
        assert!(xml.contains("• Imágenes"));
        assert!(xml.contains("• Grabaciones"));
        assert!(xml.contains("w:br"));
    }

    #[test]
    fn test_render_special_characters() {
        let bytes = render_docx(&plan(json!({
            "modalidad": "Proyecto",
            "titulo": "Precio: $100 & 10% <off>",
            "proposito": "She said \"hello\"",
        })))
        .unwrap();
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn test_render_empty_document() {
        let doc = PlanDocument {
            file_name: "vacio.docx".into(),
            blocks: vec![],
        };
        let bytes = render_docx(&doc).unwrap();
        assert_eq!(&bytes[0..2], b"PK");
    }
}
