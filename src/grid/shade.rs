//! Wall weight to stroke color.
//!
//! Weights only affect how dark a wall is drawn. The mapping is linear from light gray
//! (weight 0, brightness 230) towards black, and anything at or above the solid threshold is
//! pure black. Colors are quantized to one [`WallShade`] per brightness level so the renderer
//! can batch every wall of a shade into a single stroke.

use crate::foundation::core::Rgba8Premul;

/// Brightness of a weight-0 wall.
pub const LIGHTEST_WALL: u8 = 230;

/// Quantized wall color: the gray level shared by all walls in one stroke batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WallShade(pub u8);

impl WallShade {
    pub const SOLID: Self = Self(0);

    pub fn brightness(self) -> u8 {
        self.0
    }

    pub fn color(self) -> Rgba8Premul {
        Rgba8Premul::gray(self.0)
    }

    pub fn is_solid(self) -> bool {
        self == Self::SOLID
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallShading {
    pub solid_threshold: u32,
}

impl Default for WallShading {
    fn default() -> Self {
        Self {
            solid_threshold: crate::config::SOLID_WALL_THRESHOLD,
        }
    }
}

impl WallShading {
    pub fn new(solid_threshold: u32) -> Self {
        Self { solid_threshold }
    }

    /// `230 - weight * 230 / 255`, rounded and clamped to `[0, 230]`; solid walls are 0.
    pub fn brightness(self, weight: u32) -> u8 {
        if weight >= self.solid_threshold {
            return 0;
        }
        let b = f64::from(LIGHTEST_WALL) - f64::from(weight) * (f64::from(LIGHTEST_WALL) / 255.0);
        b.round().clamp(0.0, f64::from(LIGHTEST_WALL)) as u8
    }

    pub fn shade(self, weight: u32) -> WallShade {
        WallShade(self.brightness(weight))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/shade.rs"]
mod tests;
