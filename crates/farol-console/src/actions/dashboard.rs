//! Console home page.

use tracing::{debug, info};

use super::clients::list_clients;
use super::orders::list_orders;
use super::parts::list_parts;
use super::vehicles::list_vehicles;
use crate::api::ApiClient;
use crate::dashboard::{recent_orders, DashboardSummary, RecentOrders};
use crate::error::ActionError;
use crate::session::Session;

/// Summary figures plus the requested page of recent orders.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub summary: DashboardSummary,
    pub recent_orders: RecentOrders,
}

/// Fetches the four lists concurrently; the first failure wins.
pub async fn load_dashboard(
    api: &ApiClient,
    session: &Session,
    page: usize,
) -> Result<DashboardView, ActionError> {
    debug!(page, "load_dashboard action");

    let (clients, vehicles, parts, orders) = tokio::try_join!(
        list_clients(api, session),
        list_vehicles(api, session),
        list_parts(api, session),
        list_orders(api, session),
    )?;

    let summary = DashboardSummary::compute(&clients, &vehicles, &parts, &orders);
    info!(
        clients = summary.total_clients,
        orders = summary.total_orders,
        low_stock = summary.low_stock_parts,
        "Dashboard loaded"
    );

    Ok(DashboardView {
        summary,
        recent_orders: recent_orders(&orders, page),
    })
}
