//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (fetches, timers, navigation)
//! and delegates state transitions to `state` and rendering details to
//! `components`.

pub mod add_new_service;
pub mod playground;
pub mod resource_detail;
pub mod resources;
