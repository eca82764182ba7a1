use serde::{Deserialize, Serialize};

use crate::api::{ClassNames, RenderLayout};
use crate::core::{LayoutBounds, PrimaryView};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{OverlayTab, Popup};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrimaryLayer {
    pub view: PrimaryView,
    pub bounds: LayoutBounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayLayer {
    pub tab: OverlayTab,
    pub bounds: LayoutBounds,
}

/// Everything a renderer needs for one draw of the chart, bottom layer first.
///
/// Export passes carry only the primary layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPass {
    pub layout: RenderLayout,
    pub class_names: ClassNames,
    pub primary: PrimaryLayer,
    pub footer: Option<LayoutBounds>,
    pub overlay: Option<OverlayLayer>,
    pub popups: Vec<Popup>,
    pub show_data_selector: bool,
}

impl RenderPass {
    #[must_use]
    pub fn is_export(&self) -> bool {
        self.layout.viewport.is_export
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.layout.svg_bounds.validate()?;
        self.primary.bounds.validate()?;
        if let Some(footer) = self.footer {
            footer.validate()?;
        }
        if let Some(overlay) = self.overlay {
            overlay.bounds.validate()?;
        }
        if !self.layout.base_font_size.is_finite() || self.layout.base_font_size <= 0.0 {
            return Err(ChartError::InvalidData(
                "base font size must be finite and > 0".to_owned(),
            ));
        }
        if self.is_export()
            && (self.footer.is_some() || self.overlay.is_some() || !self.popups.is_empty())
        {
            return Err(ChartError::InvalidData(
                "export pass must only contain the primary layer".to_owned(),
            ));
        }
        Ok(())
    }
}
