//! # Record Inputs
//!
//! One raw input struct per console operation, each with a `validate()`
//! that produces the normalized payload sent to the backend.
//!
//! ## Raw → Validated
//! ```text
//! ┌──────────────────────┐   validate()   ┌──────────────────────┐
//! │  CreateClientInput   │ ─────────────► │  NewClient           │
//! │  (form, camelCase)   │                │  (API body)          │
//! │  cpfCnpj: "529.982…" │                │  cpfCnpj: "5299822…" │
//! │  name: "ana souza"   │                │  name: "ANA SOUZA"   │
//! └──────────────────────┘                └──────────────────────┘
//! ```
//!
//! Required fields are plain types, optional ones are `Option`. Update
//! payloads skip absent fields so the backend only patches what changed.
//! `validate()` stops at the first violated rule.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::fiscal::TaxpayerId;
use crate::money::{self, Money};
use crate::order::OrderDraft;
use crate::types::{OrderStatus, PartLine, Role, ServiceLine};
use crate::validation::{
    normalize_optional, normalize_upper, parse_amount, validate_assignable_role, validate_email,
    validate_kilometers, validate_line_quantity, validate_non_negative_amount, validate_password,
    validate_plate, validate_positive_amount, validate_record_id, validate_required_upper,
    validate_stock_quantity, validate_year_now, ValidationResult,
};

/// Parses an optional CPF/CNPJ field.
fn taxpayer_id(raw: &str) -> ValidationResult<TaxpayerId> {
    Ok(TaxpayerId::parse(raw)?)
}

/// Blank optional e-mail is treated as absent.
fn optional_email(email: Option<&str>) -> ValidationResult<Option<String>> {
    normalize_optional(email)
        .map(|e| validate_email(&e))
        .transpose()
}

fn optional_upper(value: Option<&str>) -> Option<String> {
    value.and_then(normalize_upper)
}

// =============================================================================
// Clients
// =============================================================================

/// Client registration form.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientInput {
    pub name: String,
    pub cpf_cnpj: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Validated client, as posted to `clients`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    pub name: String,
    pub cpf_cnpj: TaxpayerId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl CreateClientInput {
    pub fn validate(&self) -> ValidationResult<NewClient> {
        Ok(NewClient {
            name: validate_required_upper("Nome", &self.name)?,
            cpf_cnpj: taxpayer_id(&self.cpf_cnpj)?,
            phone: normalize_optional(self.phone.as_deref()),
            email: optional_email(self.email.as_deref())?,
            address: normalize_optional(self.address.as_deref()),
        })
    }
}

/// Client edit form. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cpf_cnpj: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Validated client patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpf_cnpj: Option<TaxpayerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl UpdateClientInput {
    pub fn validate(&self) -> ValidationResult<ClientChanges> {
        Ok(ClientChanges {
            name: self
                .name
                .as_deref()
                .map(|n| validate_required_upper("Nome", n))
                .transpose()?,
            cpf_cnpj: self.cpf_cnpj.as_deref().map(taxpayer_id).transpose()?,
            phone: normalize_optional(self.phone.as_deref()),
            email: optional_email(self.email.as_deref())?,
            address: normalize_optional(self.address.as_deref()),
        })
    }
}

// =============================================================================
// Vehicles
// =============================================================================

/// Vehicle registration form.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleInput {
    pub plate: String,
    pub model: String,
    pub brand: String,
    pub kilometers: i64,
    #[serde(default)]
    pub year: Option<i32>,
    pub client_id: String,
}

/// Validated vehicle, as posted to `vehicles`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVehicle {
    pub plate: String,
    pub model: String,
    pub brand: String,
    pub kilometers: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub client_id: String,
}

impl CreateVehicleInput {
    pub fn validate(&self) -> ValidationResult<NewVehicle> {
        let plate = validate_plate(&self.plate)?;
        let model = validate_required_upper("Modelo", &self.model)?;
        let brand = validate_required_upper("Marca", &self.brand)?;
        validate_kilometers(self.kilometers)?;
        if let Some(year) = self.year {
            validate_year_now(year)?;
        }
        let client_id = validate_record_id("Cliente", &self.client_id)?;

        Ok(NewVehicle {
            plate,
            model,
            brand,
            kilometers: self.kilometers,
            year: self.year,
            client_id,
        })
    }
}

/// Vehicle edit form. The odometer reading is always resubmitted.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleInput {
    #[serde(default)]
    pub plate: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    pub kilometers: i64,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub client_id: Option<String>,
}

/// Validated vehicle patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub kilometers: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

impl UpdateVehicleInput {
    pub fn validate(&self) -> ValidationResult<VehicleChanges> {
        let plate = self.plate.as_deref().map(validate_plate).transpose()?;
        let model = self
            .model
            .as_deref()
            .map(|m| validate_required_upper("Modelo", m))
            .transpose()?;
        let brand = self
            .brand
            .as_deref()
            .map(|b| validate_required_upper("Marca", b))
            .transpose()?;
        validate_kilometers(self.kilometers)?;
        if let Some(year) = self.year {
            validate_year_now(year)?;
        }
        let client_id = self
            .client_id
            .as_deref()
            .map(|id| validate_record_id("Cliente", id))
            .transpose()?;

        Ok(VehicleChanges {
            plate,
            model,
            brand,
            kilometers: self.kilometers,
            year: self.year,
            client_id,
        })
    }
}

// =============================================================================
// Parts
// =============================================================================

/// Inventory part registration form. `unit_price` is in reais.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartInput {
    pub name: String,
    pub quantity: i64,
    pub unit_price: f64,
    #[serde(default)]
    pub description: Option<String>,
}

/// Validated part, as posted to `parts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPart {
    pub name: String,
    pub quantity: i64,
    #[serde(with = "money::reais")]
    pub unit_price: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreatePartInput {
    pub fn validate(&self) -> ValidationResult<NewPart> {
        let name = validate_required_upper("Nome", &self.name)?;
        validate_stock_quantity(self.quantity)?;
        let unit_price =
            validate_non_negative_amount("Preço", parse_amount("Preço", self.unit_price)?)?;

        Ok(NewPart {
            name,
            quantity: self.quantity,
            unit_price,
            description: optional_upper(self.description.as_deref()),
        })
    }
}

/// Part edit form.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePartInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub unit_price: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Validated part patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(
        with = "money::reais::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub unit_price: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UpdatePartInput {
    pub fn validate(&self) -> ValidationResult<PartChanges> {
        let name = self
            .name
            .as_deref()
            .map(|n| validate_required_upper("Nome", n))
            .transpose()?;
        if let Some(quantity) = self.quantity {
            validate_stock_quantity(quantity)?;
        }
        let unit_price = self
            .unit_price
            .map(|p| {
                parse_amount("Preço unitário", p)
                    .and_then(|m| validate_positive_amount("Preço unitário", m))
            })
            .transpose()?;

        Ok(PartChanges {
            name,
            quantity: self.quantity,
            unit_price,
            description: optional_upper(self.description.as_deref()),
        })
    }
}

// =============================================================================
// Users
// =============================================================================

/// Console user registration form.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserInput {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
}

/// Validated user, as posted to `users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
}

impl CreateUserInput {
    pub fn validate(&self) -> ValidationResult<NewUser> {
        let email = validate_email(&self.email)?;
        validate_password(&self.password)?;
        let name = validate_required_upper("Nome", &self.name)?;
        let role = validate_assignable_role(self.role)?;

        Ok(NewUser {
            email,
            password: self.password.clone(),
            name,
            role,
        })
    }
}

/// User edit form.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInput {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Validated user patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl UpdateUserInput {
    pub fn validate(&self) -> ValidationResult<UserChanges> {
        let email = self.email.as_deref().map(validate_email).transpose()?;
        // A blank password on the edit form means "keep the current one"
        let password = normalize_optional(self.password.as_deref());
        if let Some(password) = &password {
            validate_password(password)?;
        }
        let name = self
            .name
            .as_deref()
            .map(|n| validate_required_upper("Nome", n))
            .transpose()?;
        let role = self.role.map(validate_assignable_role).transpose()?;

        Ok(UserChanges {
            email,
            password,
            name,
            role,
        })
    }
}

// =============================================================================
// Orders
// =============================================================================

/// Order dialog header fields for a new order. Lines come from the draft.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderInput {
    pub client_id: String,
    pub vehicle_id: String,
    #[serde(default)]
    pub description: Option<String>,
    pub kilometers: i64,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    /// Reais; absent means no discount.
    #[serde(default)]
    pub discount: Option<f64>,
}

/// Order dialog header fields when editing. All optional.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderInput {
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub vehicle_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub kilometers: Option<i64>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub discount: Option<f64>,
}

/// Body of an order create (POST) or update (PATCH).
///
/// Header fields are optional so one type serves both; a create always
/// fills client, vehicle, kilometers and discount. `totalValue` is the
/// subtotal minus the discount, unclamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kilometers: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(with = "money::reais")]
    pub discount: Money,
    pub services: Vec<ServiceLine>,
    pub items: Vec<PartLine>,
    #[serde(with = "money::reais")]
    pub total_value: Money,
}

fn validate_discount(discount: Option<f64>) -> ValidationResult<Option<Money>> {
    discount
        .map(|d| {
            parse_amount("Desconto", d).and_then(|m| validate_non_negative_amount("Desconto", m))
        })
        .transpose()
}

fn validate_lines(draft: &OrderDraft) -> CoreResult<(Vec<ServiceLine>, Vec<PartLine>)> {
    draft.ensure_submittable()?;
    for item in draft.items() {
        validate_line_quantity(i64::from(item.quantity))?;
    }
    Ok((draft.services().to_vec(), draft.items().to_vec()))
}

impl CreateOrderInput {
    /// Validates the header and combines it with the draft lines.
    pub fn validate(&self, draft: &OrderDraft) -> CoreResult<OrderPayload> {
        let client_id = validate_record_id("Cliente", &self.client_id)?;
        let vehicle_id = validate_record_id("Veículo", &self.vehicle_id)?;
        validate_kilometers(self.kilometers)?;
        let discount = validate_discount(self.discount)?.unwrap_or_default();
        let (services, items) = validate_lines(draft)?;
        let totals = draft.totals(discount);

        Ok(OrderPayload {
            client_id: Some(client_id),
            vehicle_id: Some(vehicle_id),
            description: optional_upper(self.description.as_deref()),
            kilometers: Some(self.kilometers),
            status: self.status,
            discount,
            services,
            items,
            total_value: totals.final_total,
        })
    }
}

impl UpdateOrderInput {
    /// Validates the changed header fields and combines them with the draft
    /// lines. `stored_discount` is used for the total when the form leaves
    /// the discount untouched.
    pub fn validate(&self, draft: &OrderDraft, stored_discount: Money) -> CoreResult<OrderPayload> {
        let client_id = self
            .client_id
            .as_deref()
            .map(|id| validate_record_id("Cliente", id))
            .transpose()?;
        let vehicle_id = self
            .vehicle_id
            .as_deref()
            .map(|id| validate_record_id("Veículo", id))
            .transpose()?;
        if let Some(km) = self.kilometers {
            validate_kilometers(km)?;
        }
        let discount = validate_discount(self.discount)?.unwrap_or(stored_discount);
        let (services, items) = validate_lines(draft)?;
        let totals = draft.totals(discount);

        Ok(OrderPayload {
            client_id,
            vehicle_id,
            description: optional_upper(self.description.as_deref()),
            kilometers: self.kilometers,
            status: self.status,
            discount,
            services,
            items,
            total_value: totals.final_total,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
