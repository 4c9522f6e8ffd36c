use thiserror::Error;

/// Errors raised while turning a request into a generated plan document.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("No se recibieron datos")]
    MissingPayload,

    #[error("JSON inválido: {0}")]
    InvalidJson(String),

    #[error("Modalidad '{requested}' no válida")]
    UnknownModality {
        requested: String,
        available: Vec<String>,
    },

    #[error("Error interno del servidor: {0}")]
    Assembly(String),

    #[error("Error al generar el documento: {0}")]
    Render(String),
}

/// Broad classification used to pick a transport status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller sent something we cannot work with.
    ClientError,
    /// Something failed while building or packing the document.
    ServerError,
}

impl PlanError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingPayload | Self::InvalidJson(_) | Self::UnknownModality { .. } => {
                ErrorCategory::ClientError
            }
            Self::Assembly(_) | Self::Render(_) => ErrorCategory::ServerError,
        }
    }

    /// Valid modality keys, when the error is an unknown modality.
    pub fn available_modalities(&self) -> Option<&[String]> {
        match self {
            Self::UnknownModality { available, .. } => Some(available),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PlanError {
    fn from(err: serde_json::Error) -> Self {
        Self::Assembly(err.to_string())
    }
}
