use std::time::Instant;

use tracing::{debug, trace};

use crate::core::{ChartConfiguration, ContainerSize, RenderModeRequest};
use crate::error::ChartResult;
use crate::interaction::TabStateMachine;
use crate::render::{OverlayLayer, PrimaryLayer, RenderPass, Renderer};

use super::{
    EditorSettings, HostEnvironment, LayoutPolicy, RenderLayout, ResizeThrottle,
    ResponsiveLayoutEngine,
};

/// Mounted chart: layout inputs, resize throttling and render-pass assembly.
#[derive(Debug, Clone)]
pub struct ChartView {
    engine: ResponsiveLayoutEngine,
    throttle: ResizeThrottle,
    data_ready: bool,
    selecting_data: bool,
}

impl ChartView {
    /// Mounts a view for a container sampled once at startup.
    ///
    /// Non-export passes are withheld until [`Self::set_data_ready`] is called.
    pub fn bootstrap(
        policy: LayoutPolicy,
        settings: &EditorSettings,
        container: ContainerSize,
        request: RenderModeRequest,
        host: &impl HostEnvironment,
    ) -> ChartResult<Self> {
        let engine = ResponsiveLayoutEngine::new(policy, container, request, host)?;
        debug!(
            width = container.width,
            height = container.height,
            ?request,
            "chart view mounted"
        );
        Ok(Self {
            engine,
            throttle: ResizeThrottle::new(settings.resize_throttle_interval()),
            data_ready: false,
            selecting_data: false,
        })
    }

    #[must_use]
    pub fn engine(&self) -> &ResponsiveLayoutEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ResponsiveLayoutEngine {
        &mut self.engine
    }

    pub fn layout(&mut self) -> RenderLayout {
        self.engine.layout()
    }

    /// Feeds a container resize. Returns `true` when the layout inputs changed now.
    pub fn on_resize(&mut self, size: ContainerSize, now: Instant) -> ChartResult<bool> {
        size.validate()?;
        match self.throttle.on_resize(size, now) {
            Some(size) => self.engine.set_container(size),
            None => Ok(false),
        }
    }

    /// Applies a resize deferred by the throttle once it is due.
    pub fn poll_resize(&mut self, now: Instant) -> ChartResult<bool> {
        match self.throttle.poll(now) {
            Some(size) => {
                trace!(
                    width = size.width,
                    height = size.height,
                    "applying deferred resize"
                );
                self.engine.set_container(size)
            }
            None => Ok(false),
        }
    }

    #[must_use]
    pub fn resize_deadline(&self) -> Option<Instant> {
        self.throttle.deadline()
    }

    #[must_use]
    pub fn is_data_ready(&self) -> bool {
        self.data_ready
    }

    pub fn set_data_ready(&mut self, ready: bool) {
        self.data_ready = ready;
    }

    #[must_use]
    pub fn is_selecting_data(&self) -> bool {
        self.selecting_data
    }

    pub fn begin_data_selection(&mut self) {
        self.selecting_data = true;
    }

    pub fn dismiss_data_selection(&mut self) {
        self.selecting_data = false;
    }

    /// Assembles the layers for one draw.
    ///
    /// The primary view gets the padded inner bounds, the overlay the full
    /// drawing surface. Export passes carry only the primary view and are
    /// produced even before data is ready.
    pub fn build_pass(
        &mut self,
        config: &ChartConfiguration,
        tabs: &TabStateMachine,
    ) -> Option<RenderPass> {
        let layout = self.engine.layout();
        let primary = PrimaryLayer {
            view: config.primary_view(),
            bounds: layout.inner_bounds,
        };

        if layout.viewport.is_export {
            return Some(RenderPass {
                layout,
                class_names: layout.class_names(),
                primary,
                footer: None,
                overlay: None,
                popups: Vec::new(),
                show_data_selector: false,
            });
        }

        if !self.data_ready {
            trace!("data not ready; skipping render pass");
            return None;
        }

        Some(RenderPass {
            layout,
            class_names: layout.class_names(),
            primary,
            footer: Some(layout.footer_bounds()),
            overlay: tabs.overlay().map(|tab| OverlayLayer {
                tab,
                bounds: layout.svg_bounds,
            }),
            popups: tabs.popups().as_slice().to_vec(),
            show_data_selector: self.selecting_data,
        })
    }

    /// Builds a pass and hands it to `renderer`. Returns `false` if nothing was drawn.
    pub fn render<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        config: &ChartConfiguration,
        tabs: &TabStateMachine,
    ) -> ChartResult<bool> {
        match self.build_pass(config, tabs) {
            Some(pass) => {
                renderer.render(&pass)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
