mod frame;
mod null_renderer;

pub use frame::{OverlayLayer, PrimaryLayer, RenderPass};
pub use null_renderer::NullRenderer;

use crate::error::ChartResult;

/// Contract implemented by whatever draws the chart.
///
/// Renderers receive a fully resolved `RenderPass` so drawing code stays
/// isolated from configuration state and layout policy.
pub trait Renderer {
    fn render(&mut self, pass: &RenderPass) -> ChartResult<()>;
}
