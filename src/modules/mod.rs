//! Modules layer - Infrastructure components for external integrations
//!
//! Contains adapters for collaborators outside the request path, such as
//! error diagnostics.

pub mod diagnostics;
