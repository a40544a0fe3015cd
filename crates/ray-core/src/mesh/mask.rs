use serde::{Deserialize, Serialize};

/// Keeps or discards quads by normalized `(segment, ring)` coordinate.
///
/// Both coordinates are in [0,1): `segment` around the ray, `ring` from base
/// to tip.
pub trait VisibilityMask: Send + Sync {
    fn is_visible(&self, segment: f32, ring: f32) -> bool;
}

impl<F> VisibilityMask for F
where
    F: Fn(f32, f32) -> bool + Send + Sync,
{
    fn is_visible(&self, segment: f32, ring: f32) -> bool {
        self(segment, ring)
    }
}

/// Authored bitmap mask sampled with nearest-cell lookup.
///
/// `cells` is row-major with `rows` rows (rings) of `columns` entries
/// (segments). A mask with missing cells shows them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridMask {
    pub columns: u32,
    pub rows: u32,
    pub cells: Vec<bool>,
}

impl GridMask {
    pub fn new(columns: u32, rows: u32, cells: Vec<bool>) -> Self {
        Self { columns, rows, cells }
    }

    /// Mask showing every `period`-th segment column.
    pub fn stripes(columns: u32, period: u32) -> Self {
        let period = period.max(1);
        let cells = (0..columns).map(|c| c % period == 0).collect();
        Self::new(columns, 1, cells)
    }
}

impl VisibilityMask for GridMask {
    fn is_visible(&self, segment: f32, ring: f32) -> bool {
        if self.columns == 0 || self.rows == 0 {
            return true;
        }
        let columns = self.columns as usize;
        let rows = self.rows as usize;
        let col = ((segment.clamp(0.0, 1.0) * self.columns as f32) as usize).min(columns - 1);
        let row = ((ring.clamp(0.0, 1.0) * self.rows as f32) as usize).min(rows - 1);
        row.checked_mul(columns)
            .and_then(|base| base.checked_add(col))
            .and_then(|index| self.cells.get(index))
            .copied()
            .unwrap_or(true)
    }
}
