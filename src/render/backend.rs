use crate::foundation::error::{MazeViewError, MazeViewResult};
use crate::render::plan::RenderPlan;

/// Read back pixels, row-major RGBA8.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Copy of the `w x h` region at `(x, y)`. Fails if the region leaves the frame.
    pub fn crop(&self, x: u32, y: u32, w: u32, h: u32) -> MazeViewResult<FrameRGBA> {
        let fits = x.checked_add(w).is_some_and(|r| r <= self.width)
            && y.checked_add(h).is_some_and(|b| b <= self.height);
        if !fits {
            return Err(MazeViewError::render(format!(
                "crop {w}x{h}+{x}+{y} outside {}x{} frame",
                self.width, self.height
            )));
        }
        let stride = self.width as usize * 4;
        let mut data = Vec::with_capacity(w as usize * h as usize * 4);
        for row in y..y + h {
            let start = row as usize * stride + x as usize * 4;
            data.extend_from_slice(&self.data[start..start + w as usize * 4]);
        }
        Ok(FrameRGBA {
            width: w,
            height: h,
            data,
            premultiplied: self.premultiplied,
        })
    }

    /// Straight-alpha copy, as image encoders expect.
    pub fn to_straight(&self) -> FrameRGBA {
        if !self.premultiplied {
            return self.clone();
        }
        let mut data = self.data.clone();
        for px in data.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 {
                px.copy_from_slice(&[0, 0, 0, 0]);
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        FrameRGBA {
            width: self.width,
            height: self.height,
            data,
            premultiplied: false,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RenderSettings {
    /// Straight RGBA background replacing the plan's clear color.
    pub clear_rgba: Option<[u8; 4]>,
}

/// Executes a [`RenderPlan`] and reads the surface back.
///
/// Every call must start from a cleared surface, so repeated calls with the same plan return
/// identical pixels.
pub trait RenderBackend {
    fn render_plan(&mut self, plan: &RenderPlan) -> MazeViewResult<FrameRGBA>;
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
