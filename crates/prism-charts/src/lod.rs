//! LOD banding: one section band per detail level, only one band visible.

use crate::data::ChartDataset;

/// LOD options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LodConfig {
    levels: usize,
    reduce_factor: usize,
    /// Camera distances at which each coarser level starts.
    pub distance_thresholds: [f32; 3],
}

impl Default for LodConfig {
    fn default() -> Self {
        Self {
            levels: 4,
            reduce_factor: 2,
            distance_thresholds: [1500.0, 3000.0, 6000.0],
        }
    }
}

impl LodConfig {
    /// A single full-detail level.
    pub fn single() -> Self {
        Self {
            levels: 1,
            ..Self::default()
        }
    }

    pub fn levels(&self) -> usize {
        self.levels
    }

    pub fn reduce_factor(&self) -> usize {
        self.reduce_factor
    }

    /// Number of levels, at least 1.
    pub fn with_levels(mut self, levels: usize) -> Self {
        self.levels = levels.max(1);
        self
    }

    /// Detail reduction per level, at least 2.
    pub fn with_reduce_factor(mut self, factor: usize) -> Self {
        self.reduce_factor = factor.max(2);
        self
    }

    /// Angular sampling step in degrees for pie level `level`.
    pub fn pie_angle_step(&self, level: usize) -> f32 {
        (level * self.reduce_factor + 1) as f32
    }
}

/// Sections belonging to one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LodBand {
    /// First section slot of the band.
    pub offset: usize,
    pub rows: usize,
    pub cols: usize,
    /// Source cells merged per reduced cell along each axis.
    pub step: usize,
}

impl LodBand {
    pub fn count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn contains(&self, section: usize) -> bool {
        section >= self.offset && section < self.offset + self.count()
    }
}

/// Section layout of every LOD level of one chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LodTable {
    bands: Vec<LodBand>,
    current: usize,
}

impl LodTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.bands.clear();
        self.current = 0;
    }

    /// Append a band of `rows x cols` sections. Returns its offset.
    pub fn push_band(&mut self, rows: usize, cols: usize, step: usize) -> usize {
        let offset = self.total_sections();
        self.bands.push(LodBand {
            offset,
            rows,
            cols,
            step: step.max(1),
        });
        offset
    }

    pub fn levels(&self) -> usize {
        self.bands.len()
    }

    pub fn band(&self, level: usize) -> Option<&LodBand> {
        self.bands.get(level)
    }

    pub fn total_sections(&self) -> usize {
        self.bands.iter().map(LodBand::count).sum()
    }

    pub fn current_level(&self) -> usize {
        self.current
    }

    /// Switch levels. Returns `true` if the level changed.
    pub fn set_level(&mut self, level: usize) -> bool {
        let level = level.min(self.bands.len().saturating_sub(1));
        let changed = level != self.current;
        if changed {
            tracing::debug!("LOD level {} -> {}", self.current, level);
        }
        self.current = level;
        changed
    }

    /// Slot of level-0 section `index` within `level`'s band.
    pub fn section_index_of_lod(&self, index: usize, level: usize) -> Option<usize> {
        let base = self.bands.first()?;
        let band = self.bands.get(level)?;
        if index >= base.count() || base.cols == 0 {
            return None;
        }
        let row = index / base.cols / band.step;
        let col = index % base.cols / band.step;
        Some(band.offset + row * band.cols + col)
    }

    /// Whether a section slot belongs to the visible band.
    pub fn is_visible(&self, section: usize) -> bool {
        self.bands
            .get(self.current)
            .is_some_and(|band| band.contains(section))
    }
}

/// Level for a camera distance: the first threshold beyond `distance`,
/// else the last level.
pub fn select_level(distance: f32, thresholds: &[f32], levels: usize) -> usize {
    let last = levels.saturating_sub(1);
    thresholds
        .iter()
        .position(|t| distance < *t)
        .unwrap_or(thresholds.len())
        .min(last)
}

/// One cell of a reduced grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReducedCell {
    pub row: usize,
    pub col: usize,
    /// Mean of the source cells in the block.
    pub value: f32,
}

/// Average `step x step` blocks of a dataset over the cells that exist.
pub fn reduce_grid(dataset: &ChartDataset, step: usize) -> Vec<ReducedCell> {
    let step = step.max(1);
    let mut sums: std::collections::BTreeMap<(usize, usize), (f32, u32)> = Default::default();
    for (row, col, value) in dataset.cells() {
        let entry = sums
            .entry((row as usize / step, col as usize / step))
            .or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|((row, col), (sum, n))| ReducedCell {
            row,
            col,
            value: sum / n as f32,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataPoint;

    fn grid_table() -> LodTable {
        let mut table = LodTable::new();
        table.push_band(4, 4, 1);
        table.push_band(2, 2, 2);
        table.push_band(2, 2, 3);
        table
    }

    #[test]
    fn test_band_offsets() {
        let table = grid_table();
        assert_eq!(table.band(1).unwrap().offset, 16);
        assert_eq!(table.band(2).unwrap().offset, 20);
        assert_eq!(table.total_sections(), 24);
    }

    #[test]
    fn test_section_index_of_lod() {
        let table = grid_table();
        assert_eq!(table.section_index_of_lod(5, 0), Some(5));
        // Row 1, col 1 falls in reduced cell (0, 0) at step 2.
        assert_eq!(table.section_index_of_lod(5, 1), Some(16));
        // Row 3, col 3 -> reduced (1, 1).
        assert_eq!(table.section_index_of_lod(15, 1), Some(19));
        assert_eq!(table.section_index_of_lod(15, 2), Some(23));
        assert_eq!(table.section_index_of_lod(16, 0), None);
    }

    #[test]
    fn test_visibility_follows_level() {
        let mut table = grid_table();
        assert!(table.is_visible(3));
        assert!(!table.is_visible(17));
        assert!(table.set_level(1));
        assert!(table.is_visible(17));
        assert!(!table.is_visible(3));
        assert!(!table.set_level(1));
        table.set_level(9);
        assert_eq!(table.current_level(), 2);
    }

    #[test]
    fn test_select_level() {
        let thresholds = [100.0, 200.0, 400.0];
        assert_eq!(select_level(50.0, &thresholds, 4), 0);
        assert_eq!(select_level(150.0, &thresholds, 4), 1);
        assert_eq!(select_level(1000.0, &thresholds, 4), 3);
        assert_eq!(select_level(1000.0, &thresholds, 2), 1);
    }

    #[test]
    fn test_reduce_grid_averages_existing_cells() {
        let dataset = ChartDataset::from_points(&[
            DataPoint::new(0, 0, 2.0),
            DataPoint::new(0, 1, 4.0),
            DataPoint::new(1, 0, 6.0),
            DataPoint::new(2, 2, 9.0),
        ])
        .unwrap();
        let cells = reduce_grid(&dataset, 2);
        assert_eq!(
            cells,
            vec![
                ReducedCell { row: 0, col: 0, value: 4.0 },
                ReducedCell { row: 1, col: 1, value: 9.0 },
            ]
        );
    }

    #[test]
    fn test_pie_angle_step() {
        let config = LodConfig::default();
        assert_eq!(config.pie_angle_step(0), 1.0);
        assert_eq!(config.pie_angle_step(3), 7.0);
    }
}
