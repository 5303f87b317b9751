//! # Domain Types
//!
//! Core domain types used throughout Farol Web.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ServiceLine    │   │    PartLine     │   │      Part       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  description    │   │  part_id ───────┼──►│  id             │       │
//! │  │  price          │   │  quantity       │   │  quantity(stock)│       │
//! │  └─────────────────┘   │  unit_price     │   │  unit_price     │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  OrderStatus    │   │      Role       │                             │
//! │  │  IN_PROGRESS    │   │  SUPER_ADMIN    │                             │
//! │  │  COMPLETED      │   │  ADMIN          │                             │
//! │  │  CANCELLED      │   │  USER           │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Line types serialize exactly as the backend expects them inside an
//! order payload (camelCase, amounts in reais).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::{self, Money};
use crate::validation::{normalize_upper, ValidationResult};

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle of a service order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Vehicle is in the shop.
    #[default]
    InProgress,
    /// Work finished and billed.
    Completed,
    /// Order dropped.
    Cancelled,
}

// =============================================================================
// Role
// =============================================================================

/// User roles as carried in session claims.
///
/// `SuperAdmin` is provisioned by the backend; the console can only create
/// `Admin` and `User` accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    Admin,
    User,
}

impl Role {
    /// Wire name, as found in the `role` claim.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }
}

// =============================================================================
// Part (inventory snapshot)
// =============================================================================

/// A part as listed by the inventory service.
///
/// The order dialog works against a snapshot of these taken when it
/// opened; `quantity` is the stock available at that moment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub id: String,
    pub name: String,
    /// Units in stock.
    pub quantity: i64,
    #[serde(with = "money::reais")]
    #[ts(type = "number")]
    pub unit_price: Money,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Part {
    /// Whether `quantity` units can be taken from the snapshot.
    pub fn has_stock_for(&self, quantity: i64) -> bool {
        quantity <= self.quantity
    }
}

// =============================================================================
// Service Line
// =============================================================================

/// A billable labor item on a service order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLine {
    /// Upper-cased, never empty.
    pub description: String,
    /// Rounded to centavos when captured.
    #[serde(with = "money::reais")]
    #[ts(type = "number")]
    pub price: Money,
}

impl ServiceLine {
    /// Builds a line from form values.
    ///
    /// ## Rules
    /// - description trimmed, must not be empty, upper-cased
    /// - price must not be negative
    pub fn new(description: &str, price: Money) -> ValidationResult<Self> {
        let description = normalize_upper(description)
            .ok_or_else(|| ValidationError::required("Descrição"))?;

        if price.is_negative() {
            return Err(ValidationError::BelowMinimum {
                field: "Preço".to_string(),
                min: 0,
            });
        }

        Ok(ServiceLine { description, price })
    }
}

// =============================================================================
// Part Line
// =============================================================================

/// A billable inventory item on a service order.
///
/// `unit_price` is frozen when the line is created; later price changes in
/// the inventory don't touch existing lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PartLine {
    pub part_id: String,
    /// Always at least 1.
    pub quantity: u32,
    #[serde(with = "money::reais")]
    #[ts(type = "number")]
    pub unit_price: Money,
}

impl PartLine {
    /// Captures a line from a part snapshot.
    pub fn from_part(part: &Part, quantity: u32) -> Self {
        PartLine {
            part_id: part.id.clone(),
            quantity,
            unit_price: part.unit_price,
        }
    }

    /// unit_price × quantity, exact.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::InProgress).unwrap(),
            r#""IN_PROGRESS""#
        );
        let status: OrderStatus = serde_json::from_str(r#""CANCELLED""#).unwrap();
        assert_eq!(status, OrderStatus::Cancelled);
        assert_eq!(OrderStatus::default(), OrderStatus::InProgress);
    }

    #[test]
    fn test_role_wire_names() {
        assert_eq!(serde_json::to_string(&Role::SuperAdmin).unwrap(), r#""SUPER_ADMIN""#);
        assert_eq!(Role::Admin.as_str(), "ADMIN");
    }

    #[test]
    fn test_service_line_normalizes_description() {
        let line = ServiceLine::new("  troca de óleo ", Money::from_cents(12000)).unwrap();
        assert_eq!(line.description, "TROCA DE ÓLEO");
        assert_eq!(line.price.cents(), 12000);
    }

    #[test]
    fn test_service_line_rejects_bad_input() {
        assert_eq!(
            ServiceLine::new("   ", Money::from_cents(100)),
            Err(ValidationError::required("Descrição"))
        );
        assert!(ServiceLine::new("ALINHAMENTO", Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_part_deserializes_backend_shape() {
        let json = r#"{
            "id": "3f1c2a9e-5b7d-4c1e-9a2b-1d2e3f4a5b6c",
            "name": "FILTRO DE OLEO",
            "quantity": 12,
            "unitPrice": "25.00",
            "description": null,
            "createdAt": "2025-03-01T12:00:00Z",
            "updatedAt": "2025-03-01T12:00:00Z"
        }"#;
        let part: Part = serde_json::from_str(json).unwrap();
        assert_eq!(part.unit_price.cents(), 2500);
        assert!(part.has_stock_for(12));
        assert!(!part.has_stock_for(13));
    }

    #[test]
    fn test_part_line_serializes_in_reais() {
        let line = PartLine {
            part_id: "p1".to_string(),
            quantity: 4,
            unit_price: Money::from_cents(2500),
        };
        assert_eq!(line.line_total().cents(), 10000);
        assert_eq!(
            serde_json::to_string(&line).unwrap(),
            r#"{"partId":"p1","quantity":4,"unitPrice":25.0}"#
        );
    }
}
