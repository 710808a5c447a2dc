//! Core gymtrack library (session, routing, API client, forms, config).

pub mod api;
pub mod config;
pub mod core;
pub mod forms;
pub mod logging;
