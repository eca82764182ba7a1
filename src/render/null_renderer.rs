use crate::core::PrimaryView;
use crate::error::ChartResult;
use crate::interaction::OverlayTab;
use crate::render::{RenderPass, Renderer};

/// No-op renderer used by tests and headless sessions.
///
/// It still validates each pass so tests catch invalid geometry.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub passes: usize,
    pub last_primary: Option<PrimaryView>,
    pub last_overlay: Option<OverlayTab>,
    pub last_popup_count: usize,
    pub last_had_footer: bool,
}

impl Renderer for NullRenderer {
    fn render(&mut self, pass: &RenderPass) -> ChartResult<()> {
        pass.validate()?;
        self.passes += 1;
        self.last_primary = Some(pass.primary.view);
        self.last_overlay = pass.overlay.map(|overlay| overlay.tab);
        self.last_popup_count = pass.popups.len();
        self.last_had_footer = pass.footer.is_some();
        Ok(())
    }
}
