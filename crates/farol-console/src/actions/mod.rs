//! # Console Actions
//!
//! Server-side handlers behind every console form and table.
//!
//! ## Action Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fn create_x(api, session, input) -> Result<_, ActionError>            │
//! │                                                                         │
//! │   1. debug!() entry with structured fields                             │
//! │   2. input.validate()  ── Err ──► ActionError::VALIDATION_ERROR         │
//! │   3. api.post("x", ...) ── Err ──► ActionError (UNAUTHORIZED, ...)      │
//! │   4. info!() on success                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Write actions return the backend's success envelope so the page can
//! show its message; list actions return the records.

pub mod clients;
pub mod dashboard;
pub mod orders;
pub mod parts;
pub mod users;
pub mod vehicles;

use farol_core::validation::validate_record_id;

use crate::error::ActionError;

/// Envelope returned by write actions.
pub type WriteResponse = crate::api::ApiResponse<serde_json::Value>;

/// `resource/<id>` after checking the id, so a bad id never reaches the
/// backend.
pub(crate) fn record_path(resource: &str, field: &str, id: &str) -> Result<String, ActionError> {
    let id = validate_record_id(field, id)?;
    Ok(format!("{resource}/{id}"))
}
