use thiserror::Error;

/// Errors that can occur while building, storing, rendering or exporting invoices.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InvoiceError {
    /// One or more validation rules failed. Nothing was saved.
    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    /// No invoice or client with the given id exists.
    #[error("not found: {0}")]
    NotFound(String),

    /// The invoice references a client that no longer exists.
    #[error("unknown client: {0}")]
    UnknownClient(String),

    /// Reading or writing the storage backend failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// A backup document could not be produced or parsed.
    #[error("backup error: {0}")]
    Backup(String),

    /// PDF generation failed.
    #[error("PDF error: {0}")]
    Pdf(String),
}

impl InvoiceError {
    /// The individual validation failures, if this is a validation error.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::Validation(errors) => errors,
            _ => &[],
        }
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Name of the invalid field (e.g. "client_id", "items").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
    /// Rule identifier if applicable (e.g. "INV-01").
    pub rule: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(rule) = &self.rule {
            write!(f, "[{}] {}: {}", rule, self.field, self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

impl ValidationError {
    /// Create a validation error without a rule ID.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Create a validation error with a rule ID.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}
