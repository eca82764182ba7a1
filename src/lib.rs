//! chart-editor-rs: configuration store and responsive layout for embeddable charts.
//!
//! The crate tracks a chart's editable configuration with dirty/saved state and
//! a save/publish workflow, and derives the pixel bounds every sub-renderer
//! receives from the container size and render mode.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

#[cfg(feature = "http-transport")]
pub mod platform_http;

pub use api::{ChartView, ConfigStore, LayoutPolicy, ResponsiveLayoutEngine};
pub use error::{ChartError, ChartResult};
