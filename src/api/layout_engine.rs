use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{
    ContainerSize, HostFacts, LayoutBounds, Orientation, RenderModeRequest, Viewport,
    base_font_size_for_width,
};
use crate::error::ChartResult;

use super::{AuthorSize, HostEnvironment, LayoutPolicy, Memo, Revision, RevisionCounter};

/// Geometry for one render of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderLayout {
    pub viewport: Viewport,
    pub orientation: Orientation,
    pub author_size: AuthorSize,
    /// Stretch to the container instead of keeping the authored ratio.
    pub fit_bounds: bool,
    pub scale_to_fit_ideal: f64,
    pub ideal_width: f64,
    pub ideal_height: f64,
    pub render_width: f64,
    pub render_height: f64,
    /// Drawing surface: render size minus the controls footer.
    pub svg_bounds: LayoutBounds,
    /// `svg_bounds` with interior padding; handed to the primary view.
    pub inner_bounds: LayoutBounds,
    pub base_font_size: f64,
}

pub type ClassNames = SmallVec<[&'static str; 4]>;

impl RenderLayout {
    /// Area below the drawing surface reserved for the controls footer.
    #[must_use]
    pub fn footer_bounds(&self) -> LayoutBounds {
        LayoutBounds::new(
            0.0,
            self.svg_bounds.bottom(),
            self.render_width,
            (self.render_height - self.svg_bounds.height).max(0.0),
        )
    }

    #[must_use]
    pub fn class_names(&self) -> ClassNames {
        let mut names: ClassNames = SmallVec::new();
        names.push("chart");
        if self.viewport.is_export {
            names.push("export");
        }
        if self.viewport.is_editor {
            names.push("editor");
        }
        if self.viewport.is_embed {
            names.push("embed");
        }
        names.push(match self.orientation {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        });
        names
    }
}

/// Pure layout computation.
///
/// Editor views always keep the authored ratio. Otherwise the chart fills the
/// container when embedded, exported, or when the container is smaller than
/// the authored size on either axis.
#[must_use]
pub fn compute_layout(policy: &LayoutPolicy, viewport: Viewport) -> RenderLayout {
    let orientation = viewport.orientation();
    let author_size = policy.author_size(orientation);

    let fit_bounds = if viewport.is_editor {
        false
    } else {
        viewport.is_embed
            || viewport.is_export
            || viewport.height < author_size.height
            || viewport.width < author_size.width
    };

    let padded_width = viewport.width * policy.ideal_padding_ratio;
    let padded_height = viewport.height * policy.ideal_padding_ratio;
    let scale_to_fit_ideal =
        (padded_width / author_size.width).min(padded_height / author_size.height);
    let ideal_width = author_size.width * scale_to_fit_ideal;
    let ideal_height = author_size.height * scale_to_fit_ideal;

    let (render_width, render_height) = if fit_bounds {
        let margin = if viewport.is_export {
            0.0
        } else {
            policy.fit_margin_px
        };
        (
            (viewport.width - margin).max(0.0),
            (viewport.height - margin).max(0.0),
        )
    } else {
        (ideal_width, ideal_height)
    };

    let footer_height = if viewport.is_export {
        0.0
    } else {
        policy.footer_height_px
    };
    let svg_bounds = LayoutBounds::from_size(render_width, render_height).pad_bottom(footer_height);
    let inner_bounds = LayoutBounds::from_size(svg_bounds.width, svg_bounds.height)
        .pad(policy.inner_padding_px);

    RenderLayout {
        viewport,
        orientation,
        author_size,
        fit_bounds,
        scale_to_fit_ideal,
        ideal_width,
        ideal_height,
        render_width,
        render_height,
        svg_bounds,
        inner_bounds,
        base_font_size: base_font_size_for_width(viewport.width),
    }
}

/// Owns the layout inputs and memoizes the derived layout per input revision.
#[derive(Debug, Clone)]
pub struct ResponsiveLayoutEngine {
    policy: LayoutPolicy,
    container: ContainerSize,
    request: RenderModeRequest,
    host: HostFacts,
    inputs: RevisionCounter,
    cache: Memo<Revision, RenderLayout>,
}

impl ResponsiveLayoutEngine {
    pub fn new(
        policy: LayoutPolicy,
        container: ContainerSize,
        request: RenderModeRequest,
        host: &impl HostEnvironment,
    ) -> ChartResult<Self> {
        policy.validate()?;
        container.validate()?;
        Ok(Self {
            policy,
            container,
            request,
            host: host.facts(),
            inputs: RevisionCounter::default(),
            cache: Memo::default(),
        })
    }

    #[must_use]
    pub fn policy(&self) -> &LayoutPolicy {
        &self.policy
    }

    #[must_use]
    pub fn container(&self) -> ContainerSize {
        self.container
    }

    #[must_use]
    pub fn mode_request(&self) -> RenderModeRequest {
        self.request
    }

    #[must_use]
    pub fn revision(&self) -> Revision {
        self.inputs.current()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::resolve(self.container, self.request, self.host)
    }

    /// Records a new container size. Returns `true` if it differs from the last one.
    pub fn set_container(&mut self, container: ContainerSize) -> ChartResult<bool> {
        container.validate()?;
        if container == self.container {
            return Ok(false);
        }
        debug!(
            width = container.width,
            height = container.height,
            "layout container resized"
        );
        self.container = container;
        self.inputs.bump();
        Ok(true)
    }

    pub fn set_mode_request(&mut self, request: RenderModeRequest) {
        if request != self.request {
            debug!(?request, "layout mode changed");
            self.request = request;
            self.inputs.bump();
        }
    }

    /// Re-samples host facts (frame nesting, mobile) from the environment.
    pub fn refresh_host(&mut self, host: &impl HostEnvironment) {
        let facts = host.facts();
        if facts != self.host {
            self.host = facts;
            self.inputs.bump();
        }
    }

    pub fn set_policy(&mut self, policy: LayoutPolicy) -> ChartResult<()> {
        policy.validate()?;
        self.policy = policy;
        self.inputs.bump();
        Ok(())
    }

    pub fn layout(&mut self) -> RenderLayout {
        let policy = self.policy;
        let viewport = self.viewport();
        self.cache
            .get_or_compute(self.inputs.current(), || compute_layout(&policy, viewport))
    }
}

#[cfg(test)]
mod tests {
    use super::compute_layout;
    use crate::api::LayoutPolicy;
    use crate::core::{ContainerSize, HostFacts, RenderModeRequest, Viewport};

    fn viewport(width: f64, height: f64, request: RenderModeRequest) -> Viewport {
        Viewport::resolve(
            ContainerSize::new(width, height).expect("valid size"),
            request,
            HostFacts::default(),
        )
    }

    #[test]
    fn export_layout_skips_margin_and_footer() {
        let layout = compute_layout(
            &LayoutPolicy::default(),
            viewport(640.0, 480.0, RenderModeRequest::export()),
        );
        assert!(layout.fit_bounds);
        assert_eq!(layout.render_width, 640.0);
        assert_eq!(layout.svg_bounds.height, 480.0);
    }

    #[test]
    fn class_names_reflect_mode_and_orientation() {
        let layout = compute_layout(
            &LayoutPolicy::default(),
            viewport(300.0, 500.0, RenderModeRequest::editor()),
        );
        assert_eq!(
            layout.class_names().as_slice(),
            &["chart", "editor", "embed", "portrait"]
        );
    }
}
