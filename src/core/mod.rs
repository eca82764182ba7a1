pub mod axis_config;
pub mod bounds;
pub mod chart_config;
mod lenient;
pub mod map_config;
pub mod typography;
pub mod viewport;

pub use axis_config::{AxisConfig, AxisName};
pub use bounds::LayoutBounds;
pub use chart_config::{
    ChartConfiguration, ChartDimension, ChartId, ChartType, ChartVariable, Margins, PrimaryView,
    SelectedEntity, ViewerTab,
};
pub use map_config::MapConfig;
pub use typography::base_font_size_for_width;
pub use viewport::{ContainerSize, HostFacts, Orientation, RenderModeRequest, Viewport};
