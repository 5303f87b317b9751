//! # Read Models
//!
//! Records as the backend lists them. Decimal columns arrive either as JSON
//! numbers or as numeric strings; both land in [`Money`].
//!
//! ```text
//! GET /api/v1/orders
//! { "success": true, "data": { "orders": [ OrderRecord, ... ] } }
//!                              └──────┬──────────────────────┘
//!                                 OrderList
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use farol_core::money::{self, Money};
use farol_core::{OrderDraft, OrderStatus, OrderTotals, Part, PartLine, Role, ServiceLine};

// =============================================================================
// Embedded references
// =============================================================================

/// Client as embedded in vehicle and order records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRef {
    pub id: String,
    pub name: String,
    pub cpf_cnpj: String,
}

/// Vehicle as embedded in order records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRef {
    pub id: String,
    pub plate: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
}

/// Part as embedded in order item records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartRef {
    pub id: String,
    pub name: String,
}

// =============================================================================
// Records
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    pub id: String,
    pub name: String,
    pub cpf_cnpj: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub vehicles: Vec<VehicleRecord>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    pub id: String,
    pub plate: String,
    pub model: String,
    pub brand: String,
    pub kilometers: i64,
    #[serde(default)]
    pub year: Option<i32>,
    pub client_id: String,
    #[serde(default)]
    pub client: Option<ClientRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Service line as stored on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderServiceRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub description: String,
    #[serde(with = "money::reais")]
    pub price: Money,
}

/// Part line as stored on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub part_id: String,
    pub quantity: u32,
    #[serde(with = "money::reais")]
    pub unit_price: Money,
    #[serde(default)]
    pub part: Option<PartRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub id: String,
    pub client_id: String,
    pub vehicle_id: String,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub description: Option<String>,
    pub kilometers: i64,
    #[serde(with = "money::reais", default)]
    pub discount: Money,
    #[serde(with = "money::reais")]
    pub total_value: Money,
    #[serde(default)]
    pub client: Option<ClientRef>,
    #[serde(default)]
    pub vehicle: Option<VehicleRef>,
    #[serde(default)]
    pub services: Vec<OrderServiceRecord>,
    #[serde(default)]
    pub items: Vec<OrderItemRecord>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl OrderRecord {
    pub fn service_lines(&self) -> Vec<ServiceLine> {
        self.services
            .iter()
            .map(|s| ServiceLine {
                description: s.description.clone(),
                price: s.price,
            })
            .collect()
    }

    /// Stored item lines, keeping the prices captured at the time.
    pub fn part_lines(&self) -> Vec<PartLine> {
        self.items
            .iter()
            .map(|i| PartLine {
                part_id: i.part_id.clone(),
                quantity: i.quantity,
                unit_price: i.unit_price,
            })
            .collect()
    }

    /// Working set for editing this order.
    pub fn to_draft(&self) -> OrderDraft {
        OrderDraft::load(self.service_lines(), self.part_lines())
    }

    /// Totals recomputed from the stored lines and discount.
    pub fn recomputed_totals(&self) -> OrderTotals {
        OrderTotals::compute(&self.service_lines(), &self.part_lines(), self.discount)
    }
}

// =============================================================================
// List payloads
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientList {
    #[serde(default)]
    pub clients: Vec<ClientRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleList {
    #[serde(default)]
    pub vehicles: Vec<VehicleRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartList {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserList {
    #[serde(default)]
    pub users: Vec<UserRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderList {
    #[serde(default)]
    pub orders: Vec<OrderRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderEnvelope {
    pub order: Option<OrderRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDER_JSON: &str = r#"{
        "id": "0b6f9a52-1c4e-4d8a-9f3e-2a1b3c4d5e6f",
        "clientId": "550e8400-e29b-41d4-a716-446655440000",
        "vehicleId": "6fa459ea-ee8a-3ca4-894e-db77e160355e",
        "orderId": "0b6f9a52-1c4e-4d8a-9f3e-2a1b3c4d5e6f",
        "status": "COMPLETED",
        "description": "REVISÃO",
        "kilometers": 85000,
        "discount": "50.00",
        "totalValue": "385.00",
        "createdAt": "2025-03-10T14:30:00.000Z",
        "updatedAt": "2025-03-10T14:30:00.000Z",
        "client": { "id": "550e8400-e29b-41d4-a716-446655440000", "name": "ANA", "cpfCnpj": "52998224725" },
        "vehicle": { "id": "6fa459ea-ee8a-3ca4-894e-db77e160355e", "plate": "ABC1D23" },
        "services": [
            { "id": "s1", "orderId": "o", "description": "REVISÃO", "price": "120.00" },
            { "id": "s2", "orderId": "o", "description": "FREIOS", "price": 180 }
        ],
        "items": [
            { "id": "i1", "orderId": "o", "partId": "a", "quantity": 4, "unitPrice": "25.00",
              "part": { "id": "a", "name": "PASTILHA" } },
            { "id": "i2", "orderId": "o", "partId": "b", "quantity": 1, "unitPrice": 35 }
        ]
    }"#;

    #[test]
    fn test_order_record_decodes_backend_shape() {
        let order: OrderRecord = serde_json::from_str(ORDER_JSON).unwrap();
        assert_eq!(order.status, OrderStatus::Completed);
        assert_eq!(order.discount.cents(), 5000);
        assert_eq!(order.total_value.cents(), 38500);
        assert_eq!(order.items[0].part.as_ref().unwrap().name, "PASTILHA");
        assert!(order.created_at.is_some());
    }

    #[test]
    fn test_order_record_totals_match_stored_total() {
        let order: OrderRecord = serde_json::from_str(ORDER_JSON).unwrap();
        let totals = order.recomputed_totals();
        assert_eq!(totals.subtotal.cents(), 43500);
        assert_eq!(totals.final_total, order.total_value);
    }

    #[test]
    fn test_to_draft_keeps_stored_prices() {
        let order: OrderRecord = serde_json::from_str(ORDER_JSON).unwrap();
        let draft = order.to_draft();
        assert_eq!(draft.services().len(), 2);
        assert_eq!(draft.items()[0].unit_price.cents(), 2500);
        assert_eq!(draft.items()[1].quantity, 1);
    }

    #[test]
    fn test_missing_status_defaults_to_in_progress() {
        let json = r#"{
            "id": "o1", "clientId": "c", "vehicleId": "v",
            "kilometers": 10, "totalValue": 0
        }"#;
        let order: OrderRecord = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, OrderStatus::InProgress);
        assert!(order.services.is_empty());
        assert_eq!(order.discount, Money::zero());
    }

    #[test]
    fn test_vehicle_record_nullable_year() {
        let json = r#"{
            "id": "v1", "plate": "ABC1234", "model": "CIVIC", "brand": "HONDA",
            "kilometers": 1000, "year": null, "clientId": "c1",
            "client": { "id": "c1", "name": "ANA", "cpfCnpj": "52998224725" },
            "_count": { "oders": 2 }
        }"#;
        let vehicle: VehicleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(vehicle.year, None);
        assert_eq!(vehicle.client.unwrap().name, "ANA");
    }
}
