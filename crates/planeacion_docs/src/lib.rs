// Lesson-plan document generation (model, assembly, DOCX rendering)

pub mod assembler;
pub mod docx;
pub mod model;

pub use assembler::assemble_plan;
pub use docx::render_docx;
pub use model::{Block, PlanDocument, TableBlock};

/// MIME type of the generated documents.
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
