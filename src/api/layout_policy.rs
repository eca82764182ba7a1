use serde::{Deserialize, Serialize};

use crate::core::Orientation;
use crate::error::{ChartError, ChartResult};

/// Authored design size a chart is laid out against before scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AuthorSize {
    pub width: f64,
    pub height: f64,
}

impl AuthorSize {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Constants that drive the responsive layout.
///
/// Serializable so hosts can tune layout without code changes; every field
/// falls back to its default when absent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutPolicy {
    #[serde(default = "default_landscape_author_size")]
    pub landscape_author_size: AuthorSize,
    #[serde(default = "default_portrait_author_size")]
    pub portrait_author_size: AuthorSize,
    /// Share of the container usable when preserving the authored ratio.
    #[serde(default = "default_ideal_padding_ratio")]
    pub ideal_padding_ratio: f64,
    /// Trimmed from each axis when fitting outside export mode.
    #[serde(default = "default_fit_margin_px")]
    pub fit_margin_px: f64,
    #[serde(default = "default_footer_height_px")]
    pub footer_height_px: f64,
    #[serde(default = "default_inner_padding_px")]
    pub inner_padding_px: f64,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self {
            landscape_author_size: default_landscape_author_size(),
            portrait_author_size: default_portrait_author_size(),
            ideal_padding_ratio: default_ideal_padding_ratio(),
            fit_margin_px: default_fit_margin_px(),
            footer_height_px: default_footer_height_px(),
            inner_padding_px: default_inner_padding_px(),
        }
    }
}

impl LayoutPolicy {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let policy: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidConfiguration(format!("failed to parse layout policy: {e}"))
        })?;
        policy.validate()?;
        Ok(policy)
    }

    #[must_use]
    pub fn author_size(&self, orientation: Orientation) -> AuthorSize {
        match orientation {
            Orientation::Portrait => self.portrait_author_size,
            Orientation::Landscape => self.landscape_author_size,
        }
    }

    #[must_use]
    pub fn with_landscape_author_size(mut self, width: f64, height: f64) -> Self {
        self.landscape_author_size = AuthorSize::new(width, height);
        self
    }

    #[must_use]
    pub fn with_portrait_author_size(mut self, width: f64, height: f64) -> Self {
        self.portrait_author_size = AuthorSize::new(width, height);
        self
    }

    #[must_use]
    pub fn with_footer_height_px(mut self, footer_height_px: f64) -> Self {
        self.footer_height_px = footer_height_px;
        self
    }

    #[must_use]
    pub fn with_fit_margin_px(mut self, fit_margin_px: f64) -> Self {
        self.fit_margin_px = fit_margin_px;
        self
    }

    #[must_use]
    pub fn with_inner_padding_px(mut self, inner_padding_px: f64) -> Self {
        self.inner_padding_px = inner_padding_px;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (name, size) in [
            ("landscape", self.landscape_author_size),
            ("portrait", self.portrait_author_size),
        ] {
            if !(size.width.is_finite() && size.width > 0.0)
                || !(size.height.is_finite() && size.height > 0.0)
            {
                return Err(ChartError::InvalidConfiguration(format!(
                    "{name} author size must be finite and > 0"
                )));
            }
        }
        if !self.ideal_padding_ratio.is_finite()
            || self.ideal_padding_ratio <= 0.0
            || self.ideal_padding_ratio > 1.0
        {
            return Err(ChartError::InvalidConfiguration(
                "ideal padding ratio must be in (0, 1]".to_owned(),
            ));
        }
        for (name, value) in [
            ("fit margin", self.fit_margin_px),
            ("footer height", self.footer_height_px),
            ("inner padding", self.inner_padding_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfiguration(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

fn default_landscape_author_size() -> AuthorSize {
    AuthorSize::new(850.0, 600.0)
}

fn default_portrait_author_size() -> AuthorSize {
    AuthorSize::new(400.0, 640.0)
}

fn default_ideal_padding_ratio() -> f64 {
    0.9
}

fn default_fit_margin_px() -> f64 {
    5.0
}

fn default_footer_height_px() -> f64 {
    40.0
}

fn default_inner_padding_px() -> f64 {
    15.0
}

#[cfg(test)]
mod tests {
    use super::LayoutPolicy;

    #[test]
    fn partial_json_keeps_defaults() {
        let policy = LayoutPolicy::from_json_str(r#"{"footer_height_px": 32.0}"#)
            .expect("partial policy parses");
        assert_eq!(policy.footer_height_px, 32.0);
        assert_eq!(policy.landscape_author_size.width, 850.0);
        assert_eq!(policy.inner_padding_px, 15.0);
    }

    #[test]
    fn validation_rejects_zero_author_size() {
        let err = LayoutPolicy::default()
            .with_portrait_author_size(0.0, 640.0)
            .validate()
            .expect_err("zero width must fail");
        assert!(format!("{err}").contains("portrait author size"));
    }
}
