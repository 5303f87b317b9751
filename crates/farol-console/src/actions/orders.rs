//! # Service Order Actions
//!
//! Two groups:
//! - draft actions edit the dialog's working set held in [`DraftState`]
//!   and never touch the network
//! - record actions talk to `orders` on the backend
//!
//! ## Order Dialog Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐  open_order(id)   ┌──────────┐                           │
//! │  │  Empty   │ ────────────────► │  Lines   │ ◄──┐ add_service_line     │
//! │  │  draft   │ ────────────────► │ loaded   │ ───┘ add_part_line        │
//! │  └──────────┘  add_*_line       └────┬─────┘      update_part_line     │
//! │       ▲                              │            remove_*_line        │
//! │       │                              ▼                                  │
//! │       │                    create_order / update_order                 │
//! │       └──────── clear on success ───┘                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info};

use farol_core::inputs::{CreateOrderInput, OrderPayload, UpdateOrderInput};
use farol_core::validation::parse_amount;
use farol_core::{
    DraftPhase, Money, OrderDraft, OrderTotals, Part, PartLine, ServiceLine, ValidationError,
};

use super::{record_path, WriteResponse};
use crate::api::ApiClient;
use crate::error::ActionError;
use crate::models::{OrderEnvelope, OrderList, OrderRecord};
use crate::session::Session;
use crate::state::DraftState;

// =============================================================================
// Draft actions
// =============================================================================

/// Draft as shown in the dialog after every edit.
///
/// The discount lives in the dialog form, so totals here stop at the
/// subtotal; [`draft_totals`] gives the full breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftView {
    pub phase: DraftPhase,
    pub services: Vec<ServiceLine>,
    pub items: Vec<PartLine>,
    #[serde(with = "farol_core::money::reais")]
    pub subtotal: Money,
}

impl From<&OrderDraft> for DraftView {
    fn from(draft: &OrderDraft) -> Self {
        DraftView {
            phase: draft.phase(),
            services: draft.services().to_vec(),
            items: draft.items().to_vec(),
            subtotal: draft.totals(Money::zero()).subtotal,
        }
    }
}

/// Quantity typed in the dialog, as a line quantity (0 allowed).
fn form_quantity(quantity: i64) -> Result<u32, ActionError> {
    u32::try_from(quantity).map_err(|_| {
        ValidationError::OutOfRange {
            field: "Quantidade".to_string(),
            min: 0,
            max: i64::from(u32::MAX),
        }
        .into()
    })
}

pub fn get_draft(drafts: &DraftState) -> DraftView {
    drafts.with_draft(|d| DraftView::from(d))
}

pub fn add_service_line(
    drafts: &DraftState,
    description: &str,
    price: f64,
) -> Result<DraftView, ActionError> {
    debug!(description, price, "add_service_line action");

    let price = parse_amount("Preço", price)?;
    drafts.with_draft_mut(|d| {
        d.add_service(description, price)?;
        Ok(DraftView::from(&*d))
    })
}

pub fn remove_service_line(drafts: &DraftState, index: usize) -> Result<DraftView, ActionError> {
    debug!(index, "remove_service_line action");

    drafts.with_draft_mut(|d| {
        d.remove_service(index)?;
        Ok(DraftView::from(&*d))
    })
}

/// Adds units of a part from the dialog's stock snapshot.
pub fn add_part_line(
    drafts: &DraftState,
    part_id: &str,
    quantity: i64,
    parts: &[Part],
) -> Result<DraftView, ActionError> {
    debug!(part_id, quantity, "add_part_line action");

    let quantity = form_quantity(quantity)?;
    drafts.with_draft_mut(|d| {
        d.add_item(part_id, quantity, parts)?;
        Ok(DraftView::from(&*d))
    })
}

/// Sets a part line's quantity; 0 removes the line.
pub fn update_part_line(
    drafts: &DraftState,
    index: usize,
    quantity: i64,
    parts: &[Part],
) -> Result<DraftView, ActionError> {
    debug!(index, quantity, "update_part_line action");

    let quantity = form_quantity(quantity)?;
    drafts.with_draft_mut(|d| {
        d.update_item_quantity(index, quantity, parts)?;
        Ok(DraftView::from(&*d))
    })
}

pub fn remove_part_line(drafts: &DraftState, index: usize) -> Result<DraftView, ActionError> {
    debug!(index, "remove_part_line action");

    drafts.with_draft_mut(|d| {
        d.remove_item(index)?;
        Ok(DraftView::from(&*d))
    })
}

/// Full breakdown for the discount currently typed in the dialog.
pub fn draft_totals(drafts: &DraftState, discount: f64) -> Result<OrderTotals, ActionError> {
    let discount = parse_amount("Desconto", discount)?;
    Ok(drafts.with_draft(|d| d.totals(discount)))
}

/// Dialog closed without saving.
pub fn discard_draft(drafts: &DraftState) {
    debug!("discard_draft action");
    drafts.clear();
}

// =============================================================================
// Record actions
// =============================================================================

/// Submits a new order built from the dialog header and the current draft.
/// The draft is cleared once the backend accepts it, unless it was edited
/// while the request was in flight.
pub async fn create_order(
    api: &ApiClient,
    session: &Session,
    drafts: &DraftState,
    input: &CreateOrderInput,
) -> Result<WriteResponse, ActionError> {
    debug!(
        client_id = %input.client_id,
        vehicle_id = %input.vehicle_id,
        "create_order action"
    );

    let submitted = drafts.snapshot();
    let payload = input.validate(&submitted)?;
    let response = api.post("orders", session, &payload).await?;
    drafts.clear_if_unchanged(&submitted);

    log_saved("Order created", &payload);
    Ok(response)
}

/// Submits changes to an existing order. `stored_discount` is the order's
/// current discount, used when the form leaves it unchanged.
pub async fn update_order(
    api: &ApiClient,
    session: &Session,
    drafts: &DraftState,
    id: &str,
    input: &UpdateOrderInput,
    stored_discount: Money,
) -> Result<WriteResponse, ActionError> {
    debug!(order_id = %id, "update_order action");

    let path = record_path("orders", "Ordem", id)?;
    let submitted = drafts.snapshot();
    let payload = input.validate(&submitted, stored_discount)?;
    let response = api.patch(&path, session, &payload).await?;
    drafts.clear_if_unchanged(&submitted);

    log_saved("Order updated", &payload);
    Ok(response)
}

fn log_saved(what: &str, payload: &OrderPayload) {
    info!(
        total = %payload.total_value,
        services = payload.services.len(),
        items = payload.items.len(),
        "{}",
        what
    );
}

pub async fn delete_order(api: &ApiClient, session: &Session, id: &str) -> Result<(), ActionError> {
    debug!(order_id = %id, "delete_order action");

    let path = record_path("orders", "Ordem", id)?;
    api.delete(&path, session).await?;

    info!(order_id = %id, "Order deleted");
    Ok(())
}

pub async fn list_orders(api: &ApiClient, session: &Session) -> Result<Vec<OrderRecord>, ActionError> {
    debug!("list_orders action");

    let response = api.get::<OrderList>("orders", session).await?;
    Ok(response.data.unwrap_or_default().orders)
}

pub async fn get_order(api: &ApiClient, session: &Session, id: &str) -> Result<OrderRecord, ActionError> {
    debug!(order_id = %id, "get_order action");

    let path = record_path("orders", "Ordem", id)?;
    let response = api.get::<OrderEnvelope>(&path, session).await?;
    response
        .data
        .and_then(|d| d.order)
        .ok_or_else(|| ActionError::not_found("ordem", id))
}

/// Loads an order and makes its lines the current draft (edit mode).
pub async fn open_order(
    api: &ApiClient,
    session: &Session,
    drafts: &DraftState,
    id: &str,
) -> Result<OrderRecord, ActionError> {
    let order = get_order(api, session, id).await?;
    drafts.replace(order.to_draft());
    Ok(order)
}

/// Printable order, as rendered by the backend.
pub async fn order_pdf(api: &ApiClient, session: &Session, id: &str) -> Result<Vec<u8>, ActionError> {
    debug!(order_id = %id, "order_pdf action");

    let path = format!("{}/pdf", record_path("orders", "Ordem", id)?);
    let pdf = api.get_bytes(&path, session).await?;

    debug!(order_id = %id, bytes = pdf.len(), "Order PDF downloaded");
    Ok(pdf)
}
