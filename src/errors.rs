// ============================================================================
// ERRORS - Taxonomía de errores del núcleo
// ============================================================================

/// Errores de transporte / respuesta del backend
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Request timed out after {0} ms")]
    Timeout(u32),
    /// El backend respondió con un status no-2xx; `message` viene del body
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Not signed in")]
    NotAuthenticated,
    #[error("{0}")]
    InvalidCredentialUpdate(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    #[error("localStorage is not available")]
    Unavailable,
    #[error("could not write {key}")]
    Write { key: String },
    #[error("could not remove {key}")]
    Remove { key: String },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorkflowError {
    /// Dato corrupto: el backend devolvió un status fuera de la máquina de estados
    #[error("ticket #{ticket_id} has unrecognized status {status:?}")]
    UnknownStatus { ticket_id: i64, status: String },
    #[error("action {action} is not allowed while ticket is {status}")]
    NotPermitted { action: String, status: String },
    #[error(transparent)]
    Request(#[from] ApiError),
    #[error("Not signed in")]
    NotAuthenticated,
    /// Un employee pidió tickets fuera de su división
    #[error("division {division} is outside your scope")]
    ScopeNotAllowed { division: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_error_displays_backend_message_verbatim() {
        let err = AuthError::from(ApiError::Rejected {
            status: 401,
            message: "Invalid credentials".to_string(),
        });
        assert_eq!(err.to_string(), "Invalid credentials");
    }
}
