//! Error handling for the Seed Production Management Platform
//!
//! Provides consistent error responses in French and English

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::codes::CodeError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_fr: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] validator::ValidationErrors),

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Business logic errors
    #[error("Confirmation required: {0}")]
    ConfirmationRequired(String),

    // External service errors
    #[error("Insights service unavailable: {0}")]
    InsightsUnavailable(String),

    #[error("Data load error: {0}")]
    DataLoad(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Field-level validation error
    pub fn validation(field: &str, message: &str, message_fr: &str) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: message.to_string(),
            message_fr: message_fr.to_string(),
        }
    }

    /// Wrap a rule from `shared::validation`, which only reports in English
    pub fn rule(field: &str, message: &'static str) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: message.to_string(),
            message_fr: format!("Valeur invalide pour {} : {}", field, message),
        }
    }

    /// A referenced record does not exist
    pub fn unknown_reference(field: &str, id: &str) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: format!("Unknown reference: {}", id),
            message_fr: format!("Référence inconnue : {}", id),
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

impl From<CodeError> for AppError {
    fn from(err: CodeError) -> Self {
        let message_fr = match &err {
            CodeError::MissingFields(_) => {
                "Veuillez renseigner l'année de récolte, l'espèce et la provenance pour générer un ID."
                    .to_string()
            }
            CodeError::SpeciesNotFound(_) => "Espèce non trouvée.".to_string(),
            CodeError::ProvenanceNotFound(_) => "Provenance non trouvée.".to_string(),
            CodeError::RegionNotFound(_) => "Région de provenance non trouvée.".to_string(),
            CodeError::SequenceExhausted(prefix) => {
                format!("Plus aucun numéro de lot disponible pour {}.", prefix)
            }
        };
        AppError::Validation {
            field: err.field().to_string(),
            message: err.to_string(),
            message_fr,
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_fr: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation {
                field,
                message,
                message_fr,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: message.clone(),
                    message_fr: message_fr.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::InvalidInput(errors) => {
                let field = errors.field_errors().keys().next().map(|f| f.to_string());
                (
                    StatusCode::BAD_REQUEST,
                    ErrorDetail {
                        code: "VALIDATION_ERROR".to_string(),
                        message_en: format!("Invalid input: {}", errors),
                        message_fr: "Certains champs obligatoires sont manquants ou invalides"
                            .to_string(),
                        field,
                    },
                )
            }
            AppError::DuplicateEntry(field) => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "DUPLICATE_ENTRY".to_string(),
                    message_en: format!("A record with this {} already exists", field),
                    message_fr: format!("Un enregistrement avec ce {} existe déjà", field),
                    field: Some(field.clone()),
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message_en: format!("{} not found", resource),
                    message_fr: format!("{} introuvable", resource),
                    field: None,
                },
            ),
            AppError::ConfirmationRequired(resource) => (
                StatusCode::PRECONDITION_REQUIRED,
                ErrorDetail {
                    code: "CONFIRMATION_REQUIRED".to_string(),
                    message_en: format!(
                        "Deleting {} requires confirmation (confirm=true)",
                        resource
                    ),
                    message_fr: format!(
                        "La suppression de {} doit être confirmée (confirm=true)",
                        resource
                    ),
                    field: Some("confirm".to_string()),
                },
            ),
            AppError::InsightsUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail {
                    code: "INSIGHTS_UNAVAILABLE".to_string(),
                    message_en: format!("Insights service unavailable: {}", msg),
                    message_fr: "Impossible de générer les aperçus. Veuillez réessayer.".to_string(),
                    field: None,
                },
            ),
            AppError::DataLoad(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "DATA_LOAD_ERROR".to_string(),
                    message_en: format!("Failed to load data: {}", msg),
                    message_fr: "Échec du chargement des données. Veuillez réessayer.".to_string(),
                    field: None,
                },
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CONFIGURATION_ERROR".to_string(),
                    message_en: format!("Configuration error: {}", msg),
                    message_fr: format!("Erreur de configuration : {}", msg),
                    field: None,
                },
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: msg.clone(),
                    message_fr: "Erreur interne du serveur".to_string(),
                    field: None,
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
