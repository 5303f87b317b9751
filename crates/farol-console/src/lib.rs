//! # farol-console: Server-Side Console Layer
//!
//! Everything the Farol Web console does on the server: reading the session
//! cookie, guarding routes, and running the actions behind each page against
//! the TechCar REST API.
//!
//! ## Module Organization
//! ```text
//! farol_console/
//! ├── lib.rs          ◄─── You are here (exports, tracing setup)
//! ├── config.rs       ◄─── Backend URL, timeout, cookie name
//! ├── session.rs      ◄─── Session token from the cookie
//! ├── access.rs       ◄─── Route guard (login, role-protected routes)
//! ├── api.rs          ◄─── ApiClient over /api/v1
//! ├── models.rs       ◄─── Records as the backend returns them
//! ├── dashboard.rs    ◄─── Home page figures and recent orders
//! ├── state.rs        ◄─── Shared order draft
//! ├── actions/
//! │   ├── clients.rs  ◄─── Client CRUD
//! │   ├── vehicles.rs ◄─── Vehicle CRUD
//! │   ├── parts.rs    ◄─── Part CRUD (stock)
//! │   ├── users.rs    ◄─── User CRUD (super admin)
//! │   ├── orders.rs   ◄─── Draft editing, order CRUD, PDF
//! │   └── dashboard.rs◄─── Home page loader
//! └── error.rs        ◄─── ActionError returned to the page
//! ```
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET /ordens                                                            │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  Session::from_cookie_header ──► access::evaluate_now ──► Redirect?     │
//! │     │                                                                   │
//! │     ▼ Continue                                                          │
//! │  actions::orders::list_orders(&api, &session)                           │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  ApiClient::get("orders") ──► GET {api_url}/api/v1/orders               │
//! │                               Authorization: Bearer <token>            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod access;
pub mod actions;
pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod session;
pub mod state;

pub use access::{AccessDecision, SessionClaims};
pub use api::{ApiClient, ApiResponse, ClientError};
pub use config::{ConfigError, ConsoleConfig};
pub use error::{ActionError, ErrorCode};
pub use session::Session;
pub use state::DraftState;

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=farol_console=trace` - Show trace for the console only
/// - Default: INFO, DEBUG for the farol crates
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,farol=debug,reqwest=warn"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
