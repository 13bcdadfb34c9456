//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by page concern (`registration`, `services`, `playground`,
//! `wallet`) so each route depends on a small focused model that can be
//! tested without a browser.

pub mod playground;
pub mod registration;
pub mod services;
pub mod wallet;
