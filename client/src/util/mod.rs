//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns (clock, clipboard, wallet
//! provider) and rendering helpers from page logic.

pub mod browser;
pub mod markdown;
pub mod wallet;
