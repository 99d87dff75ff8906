//! # quanta-session: Page-Session Orchestration for Quanta Checkout
//!
//! Ties the pure pricing engine ([`quanta_core`]) to the backend client
//! ([`quanta_api`]) for one admin panel page session.
//!
//! ## What Lives Here
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         quanta-session                                  │
//! │                                                                         │
//! │  state.rs     PricingSession: shared CalculationState behind a mutex,  │
//! │               coupon/offer operations, breakdown snapshots             │
//! │  debounce.rs  Debouncer: trailing-edge scheduling for bursty input     │
//! │  sequence.rs  RequestSequence: latest-wins guard for async fetches     │
//! │  hooks.rs     BreakdownObserver: render callback, wired at composition │
//! │  config.rs    SessionConfig: TOML file + QUANTA_* env overrides        │
//! │  error.rs     SessionError: pricing/API passthrough + session faults   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Typical Wiring
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use quanta_api::ApiClient;
//! use quanta_session::{Debouncer, PricingSession, RequestSequence, SessionConfig};
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SessionConfig::load_or_default(None);
//! let client = ApiClient::new(config.client_config())?;
//!
//! let session = PricingSession::new();
//! let debouncer = Debouncer::new(config.debounce_interval());
//! let refresh_seq = Arc::new(RequestSequence::new());
//!
//! // hydrate reference data for this user
//! session
//!     .refresh_reference_data(&client, "agent_7", &refresh_seq)
//!     .await?;
//!
//! // each keystroke in the token field
//! let s = session.clone();
//! debouncer.schedule(async move {
//!     let _ = s.set_token_count(1000);
//! });
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod debounce;
pub mod error;
pub mod hooks;
pub mod sequence;
pub mod state;

pub use config::{BackendSettings, PricingSettings, SessionConfig};
pub use debounce::Debouncer;
pub use error::{SessionError, SessionResult};
pub use hooks::BreakdownObserver;
pub use sequence::RequestSequence;
pub use state::{PricingBreakdown, PricingSession, ReferenceData};
