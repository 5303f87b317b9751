//! # Order Module
//!
//! Service-order totals and the line-editing working set behind the order
//! dialog.
//!
//! ## Totals
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  services  ──► Σ price                    = services_total             │
//! │  items     ──► Σ quantity × unit_price    = items_total                │
//! │                                             ─────────────              │
//! │                services_total + items_total = subtotal                 │
//! │                subtotal − discount          = final_total              │
//! │                                                                         │
//! │  Amounts are rounded once, at capture. Sums are exact centavos.        │
//! │  final_total is NOT clamped: a discount above the subtotal yields a    │
//! │  negative total, which is passed through unchanged.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Working Set
//! ```text
//!            add_service / add_item
//!   ┌───────┐ ─────────────────────► ┌──────────┐ ──┐ add / remove /
//!   │ Empty │                        │ HasLines │   │ update_quantity
//!   └───────┘ ◄───────────────────── └──────────┘ ◄─┘
//!            last line removed
//! ```
//! The draft is discarded (cleared) on submit success or dialog close.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{self, Money};
use crate::types::{Part, PartLine, ServiceLine};
use crate::validation::validate_line_quantity;

// =============================================================================
// Totals
// =============================================================================

/// Monetary breakdown of a service order. Derived, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    #[serde(with = "money::reais")]
    #[ts(type = "number")]
    pub services_total: Money,
    #[serde(with = "money::reais")]
    #[ts(type = "number")]
    pub items_total: Money,
    #[serde(with = "money::reais")]
    #[ts(type = "number")]
    pub subtotal: Money,
    #[serde(with = "money::reais")]
    #[ts(type = "number")]
    pub discount: Money,
    #[serde(with = "money::reais")]
    #[ts(type = "number")]
    pub final_total: Money,
}

impl OrderTotals {
    /// Computes the breakdown for a set of lines and a discount.
    ///
    /// Pure: the same lines and discount always give the same totals.
    ///
    /// ```rust
    /// use farol_core::money::Money;
    /// use farol_core::order::OrderTotals;
    /// use farol_core::types::{PartLine, ServiceLine};
    ///
    /// let services = [
    ///     ServiceLine::new("REVISAO", Money::from_cents(12000)).unwrap(),
    ///     ServiceLine::new("ALINHAMENTO", Money::from_cents(18000)).unwrap(),
    /// ];
    /// let items = [
    ///     PartLine { part_id: "a".into(), quantity: 4, unit_price: Money::from_cents(2500) },
    ///     PartLine { part_id: "b".into(), quantity: 1, unit_price: Money::from_cents(3500) },
    /// ];
    ///
    /// let totals = OrderTotals::compute(&services, &items, Money::from_cents(5000));
    /// assert_eq!(totals.subtotal.cents(), 43500);
    /// assert_eq!(totals.final_total.cents(), 38500);
    /// ```
    pub fn compute(services: &[ServiceLine], items: &[PartLine], discount: Money) -> Self {
        let services_total: Money = services.iter().map(|s| s.price).sum();
        let items_total: Money = items.iter().map(PartLine::line_total).sum();
        let subtotal = services_total + items_total;

        OrderTotals {
            services_total,
            items_total,
            subtotal,
            discount,
            final_total: subtotal - discount,
        }
    }
}

// =============================================================================
// Draft (line-editing working set)
// =============================================================================

/// Whether the working set holds any line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum DraftPhase {
    Empty,
    HasLines,
}

/// Service and part lines being edited in the order dialog.
///
/// ## Invariants
/// - part lines are unique by `part_id` (adding the same part merges)
/// - every part line has quantity ≥ 1
/// - a merged or updated quantity never exceeds the stock snapshot of a
///   part present in that snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    services: Vec<ServiceLine>,
    items: Vec<PartLine>,
}

impl OrderDraft {
    /// Creates an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the lines of an existing order (edit mode).
    pub fn load(services: Vec<ServiceLine>, items: Vec<PartLine>) -> Self {
        OrderDraft { services, items }
    }

    pub fn services(&self) -> &[ServiceLine] {
        &self.services
    }

    pub fn items(&self) -> &[PartLine] {
        &self.items
    }

    /// Current phase of the working set.
    pub fn phase(&self) -> DraftPhase {
        if self.services.is_empty() && self.items.is_empty() {
            DraftPhase::Empty
        } else {
            DraftPhase::HasLines
        }
    }

    pub fn is_empty(&self) -> bool {
        self.phase() == DraftPhase::Empty
    }

    /// Adds a service line from dialog values.
    ///
    /// The dialog requires a description and a price above zero.
    pub fn add_service(&mut self, description: &str, price: Money) -> CoreResult<()> {
        if description.trim().is_empty() || !price.is_positive() {
            return Err(ValidationError::invalid(
                "Serviço",
                "preencha a descrição e preço do serviço",
            )
            .into());
        }
        self.services.push(ServiceLine::new(description, price)?);
        Ok(())
    }

    /// Removes the service line at `index`.
    pub fn remove_service(&mut self, index: usize) -> CoreResult<ServiceLine> {
        if index >= self.services.len() {
            return Err(CoreError::LineNotFound { index });
        }
        Ok(self.services.remove(index))
    }

    /// Adds `quantity` units of a part, merging into an existing line for
    /// the same part.
    ///
    /// ## Behavior
    /// - part must be in the `parts` snapshot
    /// - new line: unit price is captured from the snapshot
    /// - existing line: quantity accumulates, captured price is kept
    /// - rejected when the resulting quantity exceeds the part's stock
    pub fn add_item(&mut self, part_id: &str, quantity: u32, parts: &[Part]) -> CoreResult<()> {
        if quantity == 0 {
            return Err(ValidationError::MustBePositive {
                field: "Quantidade".to_string(),
            }
            .into());
        }

        let part = parts
            .iter()
            .find(|p| p.id == part_id)
            .ok_or_else(|| CoreError::PartNotFound(part_id.to_string()))?;

        let existing = self.items.iter().position(|i| i.part_id == part_id);
        let current = existing.map_or(0, |idx| self.items[idx].quantity);
        let requested = i64::from(current) + i64::from(quantity);

        if !part.has_stock_for(requested) {
            return Err(CoreError::InsufficientStock {
                part: part.name.clone(),
                available: part.quantity,
                requested,
            });
        }

        let merged = validate_line_quantity(requested)?;
        match existing {
            Some(idx) => self.items[idx].quantity = merged,
            None => self.items.push(PartLine::from_part(part, quantity)),
        }
        Ok(())
    }

    /// Removes the part line at `index`.
    pub fn remove_item(&mut self, index: usize) -> CoreResult<PartLine> {
        if index >= self.items.len() {
            return Err(CoreError::LineNotFound { index });
        }
        Ok(self.items.remove(index))
    }

    /// Sets the quantity of the part line at `index`.
    ///
    /// ## Behavior
    /// - quantity 0 removes the line
    /// - checked against the stock snapshot when the part is in it; a line
    ///   whose part left the snapshot (edit mode) is updated unchecked
    pub fn update_item_quantity(
        &mut self,
        index: usize,
        quantity: u32,
        parts: &[Part],
    ) -> CoreResult<()> {
        if index >= self.items.len() {
            return Err(CoreError::LineNotFound { index });
        }
        if quantity == 0 {
            self.items.remove(index);
            return Ok(());
        }

        let line = &mut self.items[index];
        if let Some(part) = parts.iter().find(|p| p.id == line.part_id) {
            if !part.has_stock_for(i64::from(quantity)) {
                return Err(CoreError::InsufficientStock {
                    part: part.name.clone(),
                    available: part.quantity,
                    requested: i64::from(quantity),
                });
            }
        }

        line.quantity = quantity;
        Ok(())
    }

    /// Totals for the current lines.
    pub fn totals(&self, discount: Money) -> OrderTotals {
        OrderTotals::compute(&self.services, &self.items, discount)
    }

    /// Checks the draft can be submitted: at least one service line.
    pub fn ensure_submittable(&self) -> CoreResult<()> {
        if self.services.is_empty() {
            return Err(CoreError::NoServices);
        }
        Ok(())
    }

    /// Drops every line.
    pub fn clear(&mut self) {
        self.services.clear();
        self.items.clear();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn part(id: &str, stock: i64, price_cents: i64) -> Part {
        Part {
            id: id.to_string(),
            name: format!("PECA {}", id),
            quantity: stock,
            unit_price: Money::from_cents(price_cents),
            description: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn service(price_cents: i64) -> ServiceLine {
        ServiceLine::new("SERVICO", Money::from_cents(price_cents)).unwrap()
    }

    #[test]
    fn test_reference_scenario() {
        let services = [service(12000), service(18000)];
        let items = [
            PartLine {
                part_id: "a".to_string(),
                quantity: 4,
                unit_price: Money::from_cents(2500),
            },
            PartLine {
                part_id: "b".to_string(),
                quantity: 1,
                unit_price: Money::from_cents(3500),
            },
        ];

        let totals = OrderTotals::compute(&services, &items, Money::from_cents(5000));
        assert_eq!(totals.services_total.cents(), 30000);
        assert_eq!(totals.items_total.cents(), 13500);
        assert_eq!(totals.subtotal.cents(), 43500);
        assert_eq!(totals.discount.cents(), 5000);
        assert_eq!(totals.final_total.cents(), 38500);
    }

    #[test]
    fn test_empty_order_goes_negative_with_discount() {
        let totals = OrderTotals::compute(&[], &[], Money::from_cents(5000));
        assert_eq!(totals.subtotal, Money::zero());
        assert_eq!(totals.final_total.cents(), -5000);
    }

    #[test]
    fn test_discount_above_subtotal_is_not_clamped() {
        let totals = OrderTotals::compute(&[service(3000)], &[], Money::from_cents(5000));
        assert_eq!(totals.final_total.cents(), -2000);
    }

    #[test]
    fn test_largest_amounts_do_not_overflow() {
        let line: PartLine = serde_json::from_str(
            r#"{"partId":"a","quantity":4294967295,"unitPrice":"1000000000000"}"#,
        )
        .unwrap();
        let totals = OrderTotals::compute(&[], &[line.clone(), line], Money::zero());
        assert_eq!(totals.items_total.cents(), i64::MAX);
        assert_eq!(totals.final_total.cents(), i64::MAX);

        let too_big: Result<PartLine, _> = serde_json::from_str(
            r#"{"partId":"a","quantity":2,"unitPrice":"90000000000000000"}"#,
        );
        assert!(too_big.is_err());
    }

    #[test]
    fn test_totals_serialize_in_reais() {
        let totals = OrderTotals::compute(&[service(12050)], &[], Money::zero());
        let json = serde_json::to_value(totals).unwrap();
        assert_eq!(json["servicesTotal"], 120.5);
        assert_eq!(json["finalTotal"], 120.5);
    }

    #[test]
    fn test_draft_phases() {
        let parts = [part("a", 10, 2500)];
        let mut draft = OrderDraft::new();
        assert_eq!(draft.phase(), DraftPhase::Empty);

        draft.add_item("a", 2, &parts).unwrap();
        assert_eq!(draft.phase(), DraftPhase::HasLines);

        draft.add_service("troca de pastilhas", Money::from_cents(9000)).unwrap();
        draft.remove_item(0).unwrap();
        assert_eq!(draft.phase(), DraftPhase::HasLines);

        draft.remove_service(0).unwrap();
        assert_eq!(draft.phase(), DraftPhase::Empty);
    }

    #[test]
    fn test_add_item_merges_same_part() {
        let parts = [part("a", 10, 2500)];
        let mut draft = OrderDraft::new();

        draft.add_item("a", 2, &parts).unwrap();
        draft.add_item("a", 3, &parts).unwrap();

        assert_eq!(draft.items().len(), 1);
        assert_eq!(draft.items()[0].quantity, 5);
    }

    #[test]
    fn test_merge_keeps_captured_price() {
        let mut parts = vec![part("a", 10, 2500)];
        let mut draft = OrderDraft::new();
        draft.add_item("a", 1, &parts).unwrap();

        parts[0].unit_price = Money::from_cents(9900);
        draft.add_item("a", 1, &parts).unwrap();

        assert_eq!(draft.items()[0].unit_price.cents(), 2500);
        assert_eq!(draft.totals(Money::zero()).items_total.cents(), 5000);
    }

    #[test]
    fn test_merged_quantity_checked_against_stock() {
        let parts = [part("a", 4, 2500)];
        let mut draft = OrderDraft::new();
        draft.add_item("a", 3, &parts).unwrap();

        let err = draft.add_item("a", 2, &parts).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 4,
                requested: 5,
                ..
            }
        ));
        assert_eq!(draft.items()[0].quantity, 3);
    }

    #[test]
    fn test_add_item_errors() {
        let parts = [part("a", 4, 2500)];
        let mut draft = OrderDraft::new();

        assert!(matches!(
            draft.add_item("zz", 1, &parts),
            Err(CoreError::PartNotFound(id)) if id == "zz"
        ));
        assert!(matches!(
            draft.add_item("a", 0, &parts),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            draft.add_item("a", 5, &parts),
            Err(CoreError::InsufficientStock { .. })
        ));
        assert!(draft.is_empty());
    }

    #[test]
    fn test_add_service_requires_description_and_price() {
        let mut draft = OrderDraft::new();
        assert!(draft.add_service("", Money::from_cents(100)).is_err());
        assert!(draft.add_service("LAVAGEM", Money::zero()).is_err());
        assert!(draft.is_empty());
    }

    #[test]
    fn test_update_item_quantity() {
        let parts = [part("a", 6, 2500)];
        let mut draft = OrderDraft::new();
        draft.add_item("a", 1, &parts).unwrap();

        draft.update_item_quantity(0, 6, &parts).unwrap();
        assert_eq!(draft.items()[0].quantity, 6);

        assert!(matches!(
            draft.update_item_quantity(0, 7, &parts),
            Err(CoreError::InsufficientStock { .. })
        ));
        assert_eq!(draft.items()[0].quantity, 6);

        assert!(matches!(
            draft.update_item_quantity(3, 1, &parts),
            Err(CoreError::LineNotFound { index: 3 })
        ));

        draft.update_item_quantity(0, 0, &parts).unwrap();
        assert!(draft.is_empty());
    }

    #[test]
    fn test_update_quantity_without_snapshot_entry() {
        let mut draft = OrderDraft::load(
            vec![],
            vec![PartLine {
                part_id: "gone".to_string(),
                quantity: 1,
                unit_price: Money::from_cents(1000),
            }],
        );
        draft.update_item_quantity(0, 40, &[]).unwrap();
        assert_eq!(draft.items()[0].quantity, 40);
    }

    #[test]
    fn test_submittable_needs_service() {
        let parts = [part("a", 6, 2500)];
        let mut draft = OrderDraft::new();
        draft.add_item("a", 1, &parts).unwrap();
        assert!(matches!(draft.ensure_submittable(), Err(CoreError::NoServices)));

        draft.add_service("REVISAO", Money::from_cents(100)).unwrap();
        assert!(draft.ensure_submittable().is_ok());

        draft.clear();
        assert!(draft.is_empty());
    }

    fn service_strategy() -> impl Strategy<Value = ServiceLine> {
        (0i64..1_000_000).prop_map(service)
    }

    fn item_strategy() -> impl Strategy<Value = PartLine> {
        ("[a-d]", 1u32..50, 0i64..100_000).prop_map(|(id, quantity, cents)| PartLine {
            part_id: id,
            quantity,
            unit_price: Money::from_cents(cents),
        })
    }

    proptest! {
        #[test]
        fn totals_are_idempotent(
            services in prop::collection::vec(service_strategy(), 0..8),
            items in prop::collection::vec(item_strategy(), 0..8),
            discount in 0i64..1_000_000,
        ) {
            let discount = Money::from_cents(discount);
            let first = OrderTotals::compute(&services, &items, discount);
            let second = OrderTotals::compute(&services, &items, discount);
            prop_assert_eq!(first, second);
            prop_assert_eq!(first.final_total, first.subtotal - discount);
        }

        #[test]
        fn adding_a_service_is_additive(
            services in prop::collection::vec(service_strategy(), 0..8),
            items in prop::collection::vec(item_strategy(), 0..8),
            price in 0i64..1_000_000,
        ) {
            let before = OrderTotals::compute(&services, &items, Money::zero());
            let mut more = services.clone();
            more.push(service(price));
            let after = OrderTotals::compute(&more, &items, Money::zero());

            prop_assert_eq!(after.services_total - before.services_total, Money::from_cents(price));
            prop_assert_eq!(after.subtotal - before.subtotal, Money::from_cents(price));
            prop_assert_eq!(after.items_total, before.items_total);
        }

        #[test]
        fn draft_never_duplicates_parts(adds in prop::collection::vec((0usize..3, 1u32..4), 0..20)) {
            let parts = [part("a", 1_000, 100), part("b", 1_000, 200), part("c", 1_000, 300)];
            let mut draft = OrderDraft::new();
            for (which, qty) in adds {
                draft.add_item(&parts[which].id, qty, &parts).unwrap();
            }

            let mut ids: Vec<&str> = draft.items().iter().map(|i| i.part_id.as_str()).collect();
            let total = ids.len();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), total);
        }
    }
}
