//! Networking modules for the marketplace REST contracts.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` issues HTTP calls to the service registry and the Alith assistant,
//! `types` defines the shared wire schema, and `error` the failure taxonomy
//! every flow reports through.

pub mod api;
pub mod error;
pub mod types;
