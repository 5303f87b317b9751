//! # Error Types
//!
//! Domain-specific error types for farol-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  farol-core errors (this file)                                         │
//! │  ├── CoreError        - Order editing failures (stock, lines)          │
//! │  └── ValidationError  - Form field failures                            │
//! │                                                                         │
//! │  fiscal::TaxpayerIdError - internal CPF/CNPJ taxonomy, collapses into  │
//! │                            ValidationError::InvalidTaxpayerId          │
//! │                                                                         │
//! │  farol-console errors (separate crate)                                 │
//! │  ├── ClientError      - REST backend failures                          │
//! │  └── ActionError      - What the UI sees (code + message)              │
//! │                                                                         │
//! │  Flow: TaxpayerIdError → ValidationError → CoreError → ActionError     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Messages
//! Display strings are the Portuguese messages shown next to the form
//! field, since they surface unchanged in the console.

use thiserror::Error;

use crate::fiscal::TaxpayerIdError;

// =============================================================================
// Core Error
// =============================================================================

/// Order editing errors.
///
/// Raised by the line-editing working set ([`crate::order::OrderDraft`])
/// and by order submission. None of them are fatal: the dialog shows the
/// message and the user keeps editing.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The part is not in the inventory snapshot the dialog was opened with.
    #[error("Peça não encontrada: {0}")]
    PartNotFound(String),

    /// Requested quantity exceeds the part's stock snapshot.
    ///
    /// ## User Workflow
    /// ```text
    /// Add part (qty: 3), line already holds 2
    ///      │
    ///      ▼
    /// Merged quantity 5 vs stock 4
    ///      │
    ///      ▼
    /// InsufficientStock { part: "FILTRO DE OLEO", available: 4, requested: 5 }
    ///      │
    ///      ▼
    /// Dialog shows the message, line list unchanged
    /// ```
    #[error(
        "Quantidade solicitada maior que o estoque disponível para {part}: disponível {available}, solicitado {requested}"
    )]
    InsufficientStock {
        part: String,
        available: i64,
        requested: i64,
    },

    /// Line index does not exist in the working set.
    #[error("Linha {index} não existe na ordem de serviço")]
    LineNotFound { index: usize },

    /// An order must carry at least one service line.
    #[error("Adicione pelo menos um serviço")]
    NoServices,

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when a submitted form doesn't meet requirements.
/// Each variant renders as the message shown to the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} é obrigatório")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} deve ter pelo menos {min} caracteres")]
    TooShort { field: String, min: usize },

    /// Numeric value is out of range.
    #[error("{field} deve estar entre {min} e {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be at least some minimum.
    #[error("{field} deve ser maior ou igual a {min}")]
    BelowMinimum { field: String, min: i64 },

    /// Value must be strictly positive.
    #[error("{field} deve ser positivo")]
    MustBePositive { field: String },

    /// Invalid format (e.g. malformed e-mail, id, amount).
    #[error("{field} inválido: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} deve ser um de: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// CPF/CNPJ rejected. The precise cause stays internal.
    #[error("CPF ou CNPJ inválido")]
    InvalidTaxpayerId(#[source] TaxpayerIdError),
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    /// Shorthand for [`ValidationError::InvalidFormat`].
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<TaxpayerIdError> for ValidationError {
    fn from(err: TaxpayerIdError) -> Self {
        ValidationError::InvalidTaxpayerId(err)
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            part: "FILTRO DE OLEO".to_string(),
            available: 4,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Quantidade solicitada maior que o estoque disponível para FILTRO DE OLEO: disponível 4, solicitado 5"
        );
        assert_eq!(CoreError::NoServices.to_string(), "Adicione pelo menos um serviço");
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("Nome").to_string(), "Nome é obrigatório");

        let err = ValidationError::TooShort {
            field: "Senha".to_string(),
            min: 6,
        };
        assert_eq!(err.to_string(), "Senha deve ter pelo menos 6 caracteres");
    }

    #[test]
    fn test_taxpayer_errors_collapse_to_one_message() {
        let causes = [
            TaxpayerIdError::InvalidFormat { digits: 9 },
            TaxpayerIdError::DegenerateInput,
            TaxpayerIdError::InvalidCheckDigit {
                kind: crate::fiscal::TaxpayerKind::Cpf,
            },
        ];
        for cause in causes {
            let err: ValidationError = cause.into();
            assert_eq!(err.to_string(), "CPF ou CNPJ inválido");
        }
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("Peça").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "Peça é obrigatório");
    }
}
