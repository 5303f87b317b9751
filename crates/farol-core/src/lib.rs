//! # farol-core: Shop Rules for Farol Web
//!
//! Pure logic behind the TechCar repair-shop console: taxpayer ids,
//! money in centavos, record validation and the service-order draft.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Farol Web Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser (console pages)                      │   │
//! │  │    Clients ──► Vehicles ──► Parts ──► Orders ──► Dashboard     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ form submit                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 farol-console (server actions)                  │   │
//! │  │    session, route guard, ApiClient, actions::*                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ farol-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  fiscal   │  │   money   │  │   order   │  │  inputs   │  │   │
//! │  │   │ CPF/CNPJ  │  │   Money   │  │ OrderDraft│  │ validate()│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • DETERMINISTIC                           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 TechCar REST API (/api/v1)                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`fiscal`] - CPF/CNPJ check digits and [`TaxpayerId`]
//! - [`money`] - Money type in centavos with reais (de)serialization
//! - [`types`] - Domain types (Part, ServiceLine, PartLine, OrderStatus, Role)
//! - [`order`] - Order draft editing and totals
//! - [`validation`] - Field validators and normalizers
//! - [`inputs`] - Per-operation record inputs
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use farol_core::{Money, OrderDraft, TaxpayerId};
//!
//! let id = TaxpayerId::parse("529.982.247-25").unwrap();
//! assert_eq!(id.formatted(), "529.982.247-25");
//!
//! let mut draft = OrderDraft::new();
//! draft.add_service("alinhamento", Money::from_cents(8000)).unwrap();
//! let totals = draft.totals(Money::from_cents(1000));
//! assert_eq!(totals.final_total.cents(), 7000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod fiscal;
pub mod inputs;
pub mod money;
pub mod order;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use fiscal::{TaxpayerId, TaxpayerIdError, TaxpayerKind};
pub use money::Money;
pub use order::{DraftPhase, OrderDraft, OrderTotals};
pub use types::*;
