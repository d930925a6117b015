use neofeed_types::{PercentageError, QuantityError};

/// A clinical input field was outside its documented domain.
///
/// Raised while converting a [`crate::RawClinicalInput`] into a [`crate::ClinicalInput`]. The
/// evaluator itself never sees such values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputContractViolation {
    #[error("{field}: {source}")]
    Quantity {
        field: &'static str,
        #[source]
        source: QuantityError,
    },
    #[error("{field}: {source}")]
    Percentage {
        field: &'static str,
        #[source]
        source: PercentageError,
    },
}

impl InputContractViolation {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Quantity { field, .. } | Self::Percentage { field, .. } => field,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputContractViolation),
    #[error("failed to read case file: {0}")]
    FileRead(std::io::Error),
    #[error("case file schema mismatch at {path}: {message}")]
    CaseSchema { path: String, message: String },
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
