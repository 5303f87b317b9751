//! # Validation Module
//!
//! Field-level validators and normalizers shared by the record inputs.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Browser form                                                 │
//! │  └── Input masks, immediate feedback                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Server action (farol-console)                                │
//! │  └── inputs::*::validate() built from THIS MODULE                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend REST API                                             │
//! │  └── Persistence rules, uniqueness, stock                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Normalizers never fail: they return the cleaned value (or `None` for a
//! blank optional). Validators return the first violated rule.

use chrono::Datelike;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Role;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Minimum password length accepted for console users.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Oldest model year accepted on a vehicle.
pub const MIN_VEHICLE_YEAR: i32 = 1900;

// =============================================================================
// Normalizers
// =============================================================================

/// Trims and upper-cases; `None` when nothing is left.
pub fn normalize_upper(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_uppercase())
}

/// Trims an optional free-text field; blank becomes `None`.
pub fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Normalizes a license plate: drops everything but letters and digits,
/// then upper-cases.
///
/// ```rust
/// use farol_core::validation::normalize_plate;
///
/// assert_eq!(normalize_plate("abc-1d23"), "ABC1D23");
/// ```
pub fn normalize_plate(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

// =============================================================================
// String Validators
// =============================================================================

/// Required text field: trimmed, non-empty, upper-cased.
pub fn validate_required_upper(field: &str, value: &str) -> ValidationResult<String> {
    normalize_upper(value).ok_or_else(|| ValidationError::required(field))
}

/// Validates a license plate and returns its normalized form.
pub fn validate_plate(raw: &str) -> ValidationResult<String> {
    let plate = normalize_plate(raw);
    if plate.is_empty() {
        return Err(ValidationError::required("Placa"));
    }
    Ok(plate)
}

/// Validates an e-mail address and returns it trimmed.
///
/// ## Rules
/// - exactly one `@` with a non-empty local part
/// - a domain with at least one dot and no empty labels
/// - no whitespace
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = email.trim();
    let invalid = || ValidationError::invalid("Email", "formato de e-mail esperado");

    if email.is_empty() {
        return Err(ValidationError::required("Email"));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }

    Ok(email.to_string())
}

/// Validates a password's length (counted in characters).
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "Senha".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

/// Validates a backend record id (UUID) and returns it trimmed.
///
/// ```rust
/// use farol_core::validation::validate_record_id;
///
/// assert!(validate_record_id("Cliente", "550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_record_id("Cliente", "").is_err());
/// ```
pub fn validate_record_id(field: &str, id: &str) -> ValidationResult<String> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ValidationError::required(field));
    }

    uuid::Uuid::parse_str(id)
        .map_err(|_| ValidationError::invalid(field, "identificador inválido"))?;

    Ok(id.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Odometer reading: at least 1 km.
pub fn validate_kilometers(km: i64) -> ValidationResult<()> {
    if km < 1 {
        return Err(ValidationError::required("Quilometragem"));
    }
    Ok(())
}

/// Vehicle model year: between 1900 and next year.
pub fn validate_year(year: i32, current_year: i32) -> ValidationResult<()> {
    let max = current_year + 1;
    if !(MIN_VEHICLE_YEAR..=max).contains(&year) {
        return Err(ValidationError::OutOfRange {
            field: "Ano".to_string(),
            min: i64::from(MIN_VEHICLE_YEAR),
            max: i64::from(max),
        });
    }
    Ok(())
}

/// [`validate_year`] against today's calendar.
pub fn validate_year_now(year: i32) -> ValidationResult<()> {
    validate_year(year, chrono::Utc::now().year())
}

/// Units in stock: zero or more.
pub fn validate_stock_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::BelowMinimum {
            field: "Quantidade".to_string(),
            min: 0,
        });
    }
    Ok(())
}

/// Units on an order line: strictly positive and within `u32`.
pub fn validate_line_quantity(quantity: i64) -> ValidationResult<u32> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "Quantidade".to_string(),
        });
    }
    u32::try_from(quantity).map_err(|_| ValidationError::OutOfRange {
        field: "Quantidade".to_string(),
        min: 1,
        max: i64::from(u32::MAX),
    })
}

/// Amount that may be zero but not negative (prices, discounts).
pub fn validate_non_negative_amount(field: &str, amount: Money) -> ValidationResult<Money> {
    if amount.is_negative() {
        return Err(ValidationError::BelowMinimum {
            field: field.to_string(),
            min: 0,
        });
    }
    Ok(amount)
}

/// Amount that must be above zero.
pub fn validate_positive_amount(field: &str, amount: Money) -> ValidationResult<Money> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(amount)
}

/// Reads a form amount (number in reais) and rounds it to centavos.
pub fn parse_amount(field: &str, value: f64) -> ValidationResult<Money> {
    Money::from_f64(value).map_err(|e| ValidationError::invalid(field, e.to_string()))
}

// =============================================================================
// Enum Validators
// =============================================================================

/// Roles the console may assign. `SUPER_ADMIN` is provisioned elsewhere.
pub fn validate_assignable_role(role: Role) -> ValidationResult<Role> {
    match role {
        Role::Admin | Role::User => Ok(role),
        Role::SuperAdmin => Err(ValidationError::NotAllowed {
            field: "Função".to_string(),
            allowed: vec![Role::Admin.as_str().to_string(), Role::User.as_str().to_string()],
        }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
