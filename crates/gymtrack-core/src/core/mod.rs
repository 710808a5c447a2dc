//! Core module: UI-agnostic session and navigation state.
//!
//! - `session`: session state holder (sign-in / sign-out lifecycle)
//! - `routes`: route selection from session state
//! - `interrupt`: Ctrl+C handling

pub mod interrupt;
pub mod routes;
pub mod session;
