use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Immutable pixel rectangle handed to every sub-renderer.
///
/// Padding helpers return new instances and never produce negative extents.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl LayoutBounds {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at the origin.
    #[must_use]
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    /// Shrinks every side by `amount`.
    #[must_use]
    pub fn pad(self, amount: f64) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            (self.width - amount * 2.0).max(0.0),
            (self.height - amount * 2.0).max(0.0),
        )
    }

    #[must_use]
    pub fn pad_top(self, amount: f64) -> Self {
        Self::new(
            self.x,
            self.y + amount,
            self.width,
            (self.height - amount).max(0.0),
        )
    }

    #[must_use]
    pub fn pad_bottom(self, amount: f64) -> Self {
        Self::new(self.x, self.y, self.width, (self.height - amount).max(0.0))
    }

    #[must_use]
    pub fn pad_left(self, amount: f64) -> Self {
        Self::new(
            self.x + amount,
            self.y,
            (self.width - amount).max(0.0),
            self.height,
        )
    }

    #[must_use]
    pub fn pad_right(self, amount: f64) -> Self {
        Self::new(self.x, self.y, (self.width - amount).max(0.0), self.height)
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "bounds origin must be finite".to_owned(),
            ));
        }
        if !self.width.is_finite() || !self.height.is_finite() {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::LayoutBounds;

    #[test]
    fn pad_shrinks_all_sides() {
        let padded = LayoutBounds::from_size(100.0, 60.0).pad(15.0);
        assert_eq!(padded, LayoutBounds::new(15.0, 15.0, 70.0, 30.0));
    }

    #[test]
    fn pad_bottom_keeps_origin() {
        let padded = LayoutBounds::new(4.0, 8.0, 100.0, 60.0).pad_bottom(20.0);
        assert_eq!(padded, LayoutBounds::new(4.0, 8.0, 100.0, 40.0));
    }

    #[test]
    fn padding_clamps_at_zero() {
        let padded = LayoutBounds::from_size(10.0, 10.0).pad(20.0);
        assert_eq!(padded.width, 0.0);
        assert_eq!(padded.height, 0.0);
        padded.validate().expect("clamped bounds stay valid");
    }

    #[test]
    fn validate_rejects_non_finite_extent() {
        let err = LayoutBounds::from_size(f64::NAN, 10.0)
            .validate()
            .expect_err("nan width must fail");
        assert!(format!("{err}").contains("invalid viewport"));
    }
}
