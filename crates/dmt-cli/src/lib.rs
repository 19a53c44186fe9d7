//! CLI library components for the DMT builder.

pub mod logging;
pub mod pipeline;
pub mod settings;
pub mod types;
