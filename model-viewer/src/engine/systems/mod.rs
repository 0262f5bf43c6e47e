//! Runtime systems for user-facing status.

/// Loading status overlay: native UI text, or a DOM element on the web.
pub mod status_overlay;
