use crate::foundation::core::Size;

/// Pixel size of one cell that fits `rows x cols` inside `container` minus `padding`.
///
/// `min((w - pad) / cols, (h - pad) / rows)`. Returns 0 when the container is not measured
/// yet or the padding eats all of it; zero dimensions are treated as 1.
pub fn resolve_cell_size(container: Size, padding: f64, rows: usize, cols: usize) -> f64 {
    if container.is_empty() || !padding.is_finite() {
        return 0.0;
    }
    let avail_w = container.width - padding;
    let avail_h = container.height - padding;
    if avail_w <= 0.0 || avail_h <= 0.0 {
        return 0.0;
    }
    let cols = cols.max(1) as f64;
    let rows = rows.max(1) as f64;
    (avail_w / cols).min(avail_h / rows)
}

/// Remembers the last observed container box and recomputes the cell size on change.
#[derive(Clone, Debug, Default)]
pub struct CellSizeResolver {
    padding: f64,
    container: Size,
    rows: usize,
    cols: usize,
    cell_size: f64,
}

impl CellSizeResolver {
    pub fn new(padding: f64) -> Self {
        Self {
            padding,
            ..Self::default()
        }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn container(&self) -> Size {
        self.container
    }

    /// Feed a resize observation. Returns the new cell size when it changed.
    pub fn observe(&mut self, container: Size) -> Option<f64> {
        self.container = container;
        self.recompute()
    }

    /// Feed new grid dimensions. Returns the new cell size when it changed.
    pub fn set_grid_dims(&mut self, rows: usize, cols: usize) -> Option<f64> {
        self.rows = rows;
        self.cols = cols;
        self.recompute()
    }

    fn recompute(&mut self) -> Option<f64> {
        let next = resolve_cell_size(self.container, self.padding, self.rows, self.cols);
        if next == self.cell_size {
            return None;
        }
        self.cell_size = next;
        Some(next)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/cell_size.rs"]
mod tests;
