use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Container size in device-independent units, as sampled from the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl ContainerSize {
    pub fn new(width: f64, height: f64) -> ChartResult<Self> {
        let size = Self { width, height };
        size.validate()?;
        Ok(size)
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.width.is_finite()
            || !self.height.is_finite()
            || self.width < 0.0
            || self.height < 0.0
        {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Render-mode flags requested by whoever mounts the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderModeRequest {
    #[serde(default)]
    pub editor: bool,
    #[serde(default)]
    pub embed: bool,
    #[serde(default)]
    pub export: bool,
}

impl RenderModeRequest {
    #[must_use]
    pub const fn page() -> Self {
        Self {
            editor: false,
            embed: false,
            export: false,
        }
    }

    #[must_use]
    pub const fn editor() -> Self {
        Self {
            editor: true,
            embed: false,
            export: false,
        }
    }

    #[must_use]
    pub const fn embed() -> Self {
        Self {
            editor: false,
            embed: true,
            export: false,
        }
    }

    #[must_use]
    pub const fn export() -> Self {
        Self {
            editor: false,
            embed: false,
            export: true,
        }
    }
}

/// Facts about the hosting environment that the chart cannot decide itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HostFacts {
    /// Running inside a frame whose top-level document is someone else's page.
    pub in_foreign_frame: bool,
    pub is_mobile: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Container dimensions plus the resolved render mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub is_mobile: bool,
    pub is_editor: bool,
    pub is_embed: bool,
    pub is_export: bool,
}

impl Viewport {
    /// Resolves mode flags against the host.
    ///
    /// Embed mode is on when requested explicitly, or when the view is not an
    /// export and it either sits in a foreign frame or runs inside the editor.
    #[must_use]
    pub fn resolve(size: ContainerSize, request: RenderModeRequest, host: HostFacts) -> Self {
        let is_embed =
            request.embed || (!request.export && (host.in_foreign_frame || request.editor));
        Self {
            width: size.width,
            height: size.height,
            is_mobile: host.is_mobile,
            is_editor: request.editor,
            is_embed,
            is_export: request.export,
        }
    }

    #[must_use]
    pub fn size(self) -> ContainerSize {
        ContainerSize {
            width: self.width,
            height: self.height,
        }
    }

    #[must_use]
    pub fn orientation(self) -> Orientation {
        if self.width < self.height {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }

    #[must_use]
    pub fn is_portrait(self) -> bool {
        self.orientation() == Orientation::Portrait
    }
}
