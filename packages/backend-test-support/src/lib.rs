//! Backend test support utilities
//!
//! Shared by the backend's unit and integration tests: one-time logging
//! initialization and assertions for the gate's plain-text rejections.

pub mod logging;
pub mod rejection;
