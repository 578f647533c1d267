//! Helpers for turning a selection into an injected service-worker bundle.

pub mod inject;
pub mod manifest;
