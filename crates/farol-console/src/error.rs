//! # Action Error Type
//!
//! Unified error type for console actions.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Farol Web                              │
//! │                                                                         │
//! │  Browser form                 Server action                             │
//! │  ────────────                 ─────────────                             │
//! │                                                                         │
//! │  submit(createClient)                                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Action Function                                                 │  │
//! │  │  Result<T, ActionError>                                          │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Invalid form? ──── ValidationError ──────────────┐             │  │
//! │  │         │                                          │             │  │
//! │  │         ▼                                          ▼             │  │
//! │  │  Backend refused? ── ClientError::Api ────── ActionError ──────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  toast.error(e.message)   // "CPF ou CNPJ inválido"                     │
//! │  if (e.code === "UNAUTHORIZED") router.push("/login")                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::error;

use farol_core::{CoreError, ValidationError};

use crate::api::ClientError;
use crate::config::ConfigError;

/// Error returned from console actions.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INSUFFICIENT_STOCK",
///   "message": "Quantidade solicitada maior que o estoque disponível ..."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Message shown to the user
    pub message: String,
}

/// Error codes for action responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Form input rejected before or by the backend
    ValidationError,

    /// Part line exceeds the stock snapshot
    InsufficientStock,

    /// Record does not exist
    NotFound,

    /// Session missing or rejected by the backend
    Unauthorized,

    /// Backend failed or is unreachable
    BackendError,

    /// Bug or misconfiguration on the console side
    Internal,

    /// Order draft edit failed (bad line index)
    DraftError,
}

impl ActionError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ActionError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ActionError::new(
            ErrorCode::NotFound,
            format!("Registro não encontrado: {} {}", resource, id),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ActionError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ActionError::new(ErrorCode::Internal, message)
    }
}

impl From<ValidationError> for ActionError {
    fn from(err: ValidationError) -> Self {
        ActionError::validation(err.to_string())
    }
}

impl From<CoreError> for ActionError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::PartNotFound(_) => ActionError::new(ErrorCode::NotFound, message),
            CoreError::InsufficientStock { .. } => {
                ActionError::new(ErrorCode::InsufficientStock, message)
            }
            CoreError::LineNotFound { .. } => ActionError::new(ErrorCode::DraftError, message),
            CoreError::NoServices | CoreError::Validation(_) => ActionError::validation(message),
        }
    }
}

/// Converts REST client errors to action errors.
impl From<ClientError> for ActionError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Unauthorized => ActionError::new(
                ErrorCode::Unauthorized,
                "Sessão expirada. Faça login novamente",
            ),
            ClientError::Api { status: 404, message } => {
                ActionError::new(ErrorCode::NotFound, message)
            }
            ClientError::Api {
                status: 400 | 409 | 422,
                message,
            } => ActionError::validation(message),
            ClientError::Api { status, message } => {
                error!(status, %message, "Backend returned an error");
                ActionError::new(ErrorCode::BackendError, message)
            }
            ClientError::RequestFailed(e) => {
                // Log the transport error but return a generic message
                error!("Backend request failed: {}", e);
                ActionError::new(
                    ErrorCode::BackendError,
                    "Não foi possível conectar ao servidor",
                )
            }
            ClientError::ResponseParseFailed(e) => {
                error!("Unexpected backend response: {}", e);
                ActionError::new(ErrorCode::BackendError, "Resposta inesperada do servidor")
            }
            ClientError::InvalidUrl(e) => {
                error!("Invalid backend URL: {}", e);
                ActionError::internal("Configuração inválida do servidor")
            }
        }
    }
}

impl From<ConfigError> for ActionError {
    fn from(err: ConfigError) -> Self {
        error!("Configuration error: {}", err);
        ActionError::internal("Configuração inválida do servidor")
    }
}

impl std::fmt::Display for ActionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ActionError {}
