//! Pure application state for the cartoon-diary client.
//!
//! The shell owns the browser; this crate owns the decisions. Every state
//! transition goes through [`state::apply_action`], which returns the side
//! effects the shell must execute (network calls, persistence, alerts).
//! Nothing here touches the DOM, storage, or the network, which is what
//! makes the product's behavioral contracts unit-testable.

pub mod feed;
pub mod flow;
pub mod route;
pub mod search;
pub mod state;

pub use route::AppRoute;
pub use state::{AppAction, AppEffect, AppState, apply_action};
