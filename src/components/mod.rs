//! UI components.

pub mod sunburst;
