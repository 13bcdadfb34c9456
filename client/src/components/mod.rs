//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render marketplace chrome (navigation, cards, step progress,
//! error panels) and read or write shared state through Leptos context.

pub mod error_panel;
pub mod navbar;
pub mod service_card;
pub mod step_indicator;
