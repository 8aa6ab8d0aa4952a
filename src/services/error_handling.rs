use thiserror::Error;
use tracing::{error, warn};

use crate::services::validation::ValidationErrors;

/// Errors surfaced by the back-office services
#[derive(Error, Debug)]
pub enum DeskError {
    /// The backend could not be reached at all.
    #[error("Transport error during {operation}: {message}")]
    Transport { operation: String, message: String },

    #[error("Backend rejected {operation} with HTTP {status}: {message}")]
    Rejected {
        operation: String,
        status: u16,
        message: String,
    },

    /// A success response whose body could not be read.
    #[error("Unreadable response from {operation}: {message}")]
    Decode { operation: String, message: String },

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("{resource} {id} not found")]
    NotFound { resource: String, id: String },

    #[error("Unparseable date: '{value}'")]
    Parse { value: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("No data to export")]
    NothingToExport,

    #[error("Export failed: {message}")]
    Export { message: String },

    #[error("Local cache error: {message}")]
    Cache { message: String },
}

pub type DeskResult<T> = Result<T, DeskError>;

impl DeskError {
    pub fn transport(operation: impl Into<String>, message: impl Into<String>) -> Self {
        DeskError::Transport {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn rejected(operation: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        DeskError::Rejected {
            operation: operation.into(),
            status,
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>, id: impl ToString) -> Self {
        DeskError::NotFound {
            resource: resource.into(),
            id: id.to_string(),
        }
    }

    /// Only an unreachable backend is worth retrying or caching locally.
    pub fn is_transport(&self) -> bool {
        matches!(self, DeskError::Transport { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            DeskError::Rejected { status, .. } => Some(*status),
            DeskError::NotFound { .. } => Some(404),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for DeskError {
    fn from(err: reqwest::Error) -> Self {
        let operation = err
            .url()
            .map(|url| url.path().to_string())
            .unwrap_or_else(|| "request".to_string());
        let message = err.to_string();

        if err.is_builder() {
            DeskError::Configuration { message }
        } else if err.is_decode() || err.is_body() {
            DeskError::Decode { operation, message }
        } else if let Some(status) = err.status() {
            DeskError::Rejected {
                operation,
                status: status.as_u16(),
                message,
            }
        } else {
            DeskError::Transport { operation, message }
        }
    }
}

impl From<ValidationErrors> for DeskError {
    fn from(errors: ValidationErrors) -> Self {
        DeskError::Validation(errors)
    }
}

impl From<std::io::Error> for DeskError {
    fn from(err: std::io::Error) -> Self {
        DeskError::Cache {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for DeskError {
    fn from(err: serde_json::Error) -> Self {
        DeskError::Export {
            message: err.to_string(),
        }
    }
}

impl From<csv::Error> for DeskError {
    fn from(err: csv::Error) -> Self {
        DeskError::Export {
            message: err.to_string(),
        }
    }
}

/// Structured logging helpers
pub struct LogHelper;

impl LogHelper {
    pub fn log_error_with_context(context: &str, error: &DeskError) {
        match error {
            DeskError::Validation(errors) => {
                for field_error in errors.iter() {
                    Self::log_validation_failure(&field_error.field, &field_error.reason);
                }
            }
            DeskError::Transport { operation, .. } => {
                error!(
                    context = %context,
                    operation = %operation,
                    error = %error,
                    "Backend unreachable"
                );
            }
            DeskError::Rejected {
                operation, status, ..
            } => {
                warn!(
                    context = %context,
                    operation = %operation,
                    status = status,
                    error = %error,
                    "Backend rejected request"
                );
            }
            _ => {
                error!(context = %context, error = %error, "Error occurred");
            }
        }
    }

    pub fn log_validation_failure(field: &str, reason: &str) {
        warn!(field = %field, reason = %reason, "Validation failed");
    }

    pub fn log_skipped_records(context: &str, skipped: usize) {
        if skipped > 0 {
            warn!(
                context = %context,
                skipped = skipped,
                "Records with unparseable dates were left out of the report"
            );
        }
    }
}

/// User-friendly error messages
pub struct UserErrorFormatter;

impl UserErrorFormatter {
    pub fn format_for_ui(error: &DeskError) -> String {
        match error {
            DeskError::Rejected { status: 401, .. } => {
                "Authentication required. Please login as admin.".to_string()
            }
            DeskError::Rejected { status: 403, .. } => {
                "Access denied. Admin privileges required.".to_string()
            }
            DeskError::Rejected { status: 400, .. } => {
                "Invalid data. Please check all fields.".to_string()
            }
            DeskError::Rejected { status: 500.., .. } => {
                "Server error. Please try again later.".to_string()
            }
            DeskError::Rejected { status, .. } => {
                format!("Request failed (HTTP {}). Please try again.", status)
            }
            DeskError::Transport { .. } => {
                "Network connection error. Please check your connection and try again.".to_string()
            }
            DeskError::Decode { .. } => {
                "Unexpected response from the server. Please refresh before retrying.".to_string()
            }
            DeskError::Validation(_) => "Please fill all required fields correctly.".to_string(),
            DeskError::NotFound { resource, .. } => {
                format!("The requested {} could not be found.", resource)
            }
            DeskError::Parse { value } => format!("Could not read date '{}'", value),
            DeskError::NothingToExport => "No data to export".to_string(),
            DeskError::Export { .. } => "Error exporting data. Please try again.".to_string(),
            DeskError::Configuration { message } => format!("Configuration error: {}", message),
            DeskError::Cache { .. } => "Could not save data locally.".to_string(),
        }
    }
}
