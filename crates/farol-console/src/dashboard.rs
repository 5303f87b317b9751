//! # Dashboard Summary
//!
//! Figures shown on the console home page, computed from the record lists.
//!
//! ```text
//! ┌──────────────┬──────────────┬──────────────┬──────────────┐
//! │ Clientes  42 │ Veículos  57 │ Peças     80 │ Ordens   130 │
//! │              │              │ 6 em baixa   │              │
//! └──────────────┴──────────────┴──────────────┴──────────────┘
//!  Faturamento (concluídas): R$ 48.210,00
//!  Em andamento 12 · Concluídas 110 · Canceladas 8
//! ```

use serde::Serialize;

use farol_core::money::{self, Money};
use farol_core::{OrderStatus, Part};

use crate::models::{ClientRecord, OrderRecord, VehicleRecord};

/// A part with fewer units than this is flagged as low stock.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Orders per page in the "recent orders" table.
pub const RECENT_ORDERS_PAGE_SIZE: usize = 10;

/// Orders per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub in_progress: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl StatusCounts {
    fn record(&mut self, status: OrderStatus) {
        match status {
            OrderStatus::InProgress => self.in_progress += 1,
            OrderStatus::Completed => self.completed += 1,
            OrderStatus::Cancelled => self.cancelled += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_clients: usize,
    pub total_vehicles: usize,
    pub total_parts: usize,
    pub low_stock_parts: usize,
    pub total_orders: usize,
    pub orders_by_status: StatusCounts,
    /// Sum of `totalValue` over completed orders.
    #[serde(with = "money::reais")]
    pub revenue: Money,
}

impl DashboardSummary {
    pub fn compute(
        clients: &[ClientRecord],
        vehicles: &[VehicleRecord],
        parts: &[Part],
        orders: &[OrderRecord],
    ) -> Self {
        let mut orders_by_status = StatusCounts::default();
        for order in orders {
            orders_by_status.record(order.status);
        }

        let revenue = orders
            .iter()
            .filter(|o| o.status == OrderStatus::Completed)
            .map(|o| o.total_value)
            .sum();

        DashboardSummary {
            total_clients: clients.len(),
            total_vehicles: vehicles.len(),
            total_parts: parts.len(),
            low_stock_parts: parts
                .iter()
                .filter(|p| p.quantity < LOW_STOCK_THRESHOLD)
                .count(),
            total_orders: orders.len(),
            orders_by_status,
            revenue,
        }
    }
}

/// One page of orders, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentOrders {
    pub orders: Vec<OrderRecord>,
    /// 1-based, clamped into range.
    pub page: usize,
    pub total_pages: usize,
}

/// Pages the order list by creation date, newest first. Orders without a
/// timestamp sort last.
pub fn recent_orders(orders: &[OrderRecord], page: usize) -> RecentOrders {
    let mut sorted: Vec<&OrderRecord> = orders.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let total_pages = sorted.len().div_ceil(RECENT_ORDERS_PAGE_SIZE);
    let page = page.clamp(1, total_pages.max(1));
    let start = (page - 1) * RECENT_ORDERS_PAGE_SIZE;

    RecentOrders {
        orders: sorted
            .into_iter()
            .skip(start)
            .take(RECENT_ORDERS_PAGE_SIZE)
            .cloned()
            .collect(),
        page,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn order(id: usize, status: OrderStatus, total_cents: i64) -> OrderRecord {
        OrderRecord {
            id: format!("o{id}"),
            client_id: "c".to_string(),
            vehicle_id: "v".to_string(),
            status,
            description: None,
            kilometers: 1,
            discount: Money::zero(),
            total_value: Money::from_cents(total_cents),
            client: None,
            vehicle: None,
            services: Vec::new(),
            items: Vec::new(),
            created_at: Some(Utc.timestamp_opt(1_700_000_000 + id as i64 * 60, 0).unwrap()),
            updated_at: None,
        }
    }

    fn part(quantity: i64) -> Part {
        Part {
            id: format!("p{quantity}"),
            name: "PEÇA".to_string(),
            quantity,
            unit_price: Money::from_cents(100),
            description: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_summary() {
        let orders = vec![
            order(1, OrderStatus::Completed, 38500),
            order(2, OrderStatus::Completed, 10000),
            order(3, OrderStatus::InProgress, 99999),
            order(4, OrderStatus::Cancelled, 5000),
        ];
        let parts = vec![part(0), part(9), part(10), part(50)];

        let summary = DashboardSummary::compute(&[], &[], &parts, &orders);
        assert_eq!(summary.total_orders, 4);
        assert_eq!(summary.total_parts, 4);
        assert_eq!(summary.low_stock_parts, 2);
        assert_eq!(summary.revenue.cents(), 48500);
        assert_eq!(
            summary.orders_by_status,
            StatusCounts {
                in_progress: 1,
                completed: 2,
                cancelled: 1
            }
        );

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["revenue"], 485.0);
        assert_eq!(json["ordersByStatus"]["completed"], 2);
    }

    #[test]
    fn test_empty_summary() {
        let summary = DashboardSummary::compute(&[], &[], &[], &[]);
        assert_eq!(summary.revenue, Money::zero());
        assert_eq!(summary.total_orders, 0);
    }

    #[test]
    fn test_recent_orders_paging() {
        let orders: Vec<OrderRecord> = (1..=23)
            .map(|i| order(i, OrderStatus::InProgress, 100))
            .collect();

        let first = recent_orders(&orders, 1);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.orders.len(), 10);
        assert_eq!(first.orders[0].id, "o23");

        let last = recent_orders(&orders, 3);
        assert_eq!(last.orders.len(), 3);
        assert_eq!(last.orders[2].id, "o1");

        let clamped = recent_orders(&orders, 99);
        assert_eq!(clamped.page, 3);

        let none = recent_orders(&[], 1);
        assert_eq!(none.page, 1);
        assert_eq!(none.total_pages, 0);
        assert!(none.orders.is_empty());
    }
}
