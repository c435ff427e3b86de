//! Responsive grid layout
//!
//! Turns a catalog size plus the available viewport into centered card
//! rectangles, either as one flat grid or as a group bar with a sub-grid
//! below it. Everything here is pure: the same inputs always produce the
//! same rectangles, and calling it every frame is O(item count).

use egui::{pos2, vec2, Rect, Vec2};

/// Width below which the grid is forced to two columns
const BREAKPOINT_NARROW: f32 = 600.0;

/// Width below which the grid is forced to three columns
const BREAKPOINT_MEDIUM: f32 = 900.0;

/// Width change that triggers a new window-size request
const RELAYOUT_EPSILON: f32 = 10.0;

/// Tunable geometry for one picker style.
///
/// All values are logical units before the UI scale factor is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Nominal card edge length
    pub card_size: f32,
    /// Lower clamp for the card edge
    pub min_card_size: f32,
    /// Upper clamp for the card edge
    pub max_card_size: f32,
    /// Gap between cards, and between the grid and its edges
    pub spacing: f32,
    /// Fewest columns the responsive grid may collapse to
    pub min_columns: usize,
    /// Most columns the responsive grid may grow to
    pub max_columns: usize,
    /// Vertical room reserved above the grid for the URL bar
    pub header_allowance: f32,
    /// Vertical room reserved below each card row for the name label
    pub label_allowance: f32,
    /// Outer margin added around the grid footprint for the window size
    pub margin: f32,
    /// Smallest window the picker will ever request
    pub floor_size: Vec2,
    /// Fixed square edge for group cards in the two-level bar
    pub group_square: f32,
    /// Gap between group squares in the two-level bar
    pub group_spacing: f32,
}

impl LayoutConfig {
    /// Glass-morphism flat grid, the default look.
    pub fn glass() -> Self {
        Self {
            card_size: 140.0,
            min_card_size: 96.0,
            max_card_size: 180.0,
            spacing: 24.0,
            min_columns: 2,
            max_columns: 4,
            header_allowance: 96.0,
            label_allowance: 40.0,
            margin: 32.0,
            floor_size: vec2(480.0, 360.0),
            group_square: 60.0,
            group_spacing: 10.0,
        }
    }

    /// Compact card grid with denser spacing.
    pub fn cards() -> Self {
        Self {
            card_size: 80.0,
            min_card_size: 64.0,
            max_card_size: 120.0,
            spacing: 12.0,
            min_columns: 2,
            max_columns: 4,
            header_allowance: 80.0,
            label_allowance: 28.0,
            margin: 24.0,
            floor_size: vec2(420.0, 300.0),
            group_square: 60.0,
            group_spacing: 10.0,
        }
    }

    /// Two-level browser bar plus profile sub-grid.
    pub fn two_level() -> Self {
        Self {
            card_size: 40.0,
            min_card_size: 32.0,
            max_card_size: 64.0,
            spacing: 5.0,
            min_columns: 2,
            max_columns: 6,
            header_allowance: 80.0,
            label_allowance: 20.0,
            margin: 24.0,
            floor_size: vec2(480.0, 260.0),
            group_square: 60.0,
            group_spacing: 10.0,
        }
    }

    /// Card edge after clamping and scaling.
    pub fn scaled_card(&self, scale: f32) -> f32 {
        self.card_size.clamp(self.min_card_size, self.max_card_size) * scale.max(0.1)
    }
}

/// Result of one layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    /// One rectangle per catalog entry, row-major
    pub cells: Vec<Rect>,
    pub columns: usize,
    pub rows: usize,
    /// Smallest viewport that fits the whole grid plus margins
    pub min_size: Vec2,
}

impl GridLayout {
    fn empty(cfg: &LayoutConfig) -> Self {
        Self {
            cells: Vec::new(),
            columns: 0,
            rows: 0,
            min_size: cfg.floor_size,
        }
    }
}

/// Ideal column count for a square-ish grid, before breakpoints.
fn ideal_columns(item_count: usize, cfg: &LayoutConfig) -> usize {
    let root = (item_count as f32).sqrt().ceil() as usize;
    root.max(1).min(cfg.max_columns)
}

/// Column count after applying the width breakpoints.
///
/// A mathematically square grid is unusable below a minimum per-card
/// width, so narrow viewports override the ideal count.
pub fn breakpoint_columns(item_count: usize, available_width: f32, cfg: &LayoutConfig) -> usize {
    let ideal = ideal_columns(item_count, cfg);
    let cols = if available_width < BREAKPOINT_NARROW {
        2
    } else if available_width < BREAKPOINT_MEDIUM {
        3
    } else {
        ideal
    };
    cols.clamp(cfg.min_columns.max(1), cfg.max_columns.max(1))
        .min(item_count.max(1))
}

/// Lay out `item_count` cards in a centered responsive grid.
///
/// `top` is the y coordinate where the grid area starts (below the
/// header). An empty catalog yields an empty cell list and the floor
/// size; degenerate widths never panic or divide by zero.
pub fn grid(item_count: usize, available: Vec2, top: f32, scale: f32, cfg: &LayoutConfig) -> GridLayout {
    if item_count == 0 {
        return GridLayout::empty(cfg);
    }

    let cols = breakpoint_columns(item_count, available.x.max(0.0), cfg);
    let rows = item_count.div_ceil(cols);

    let card = cfg.scaled_card(scale);
    let spacing = cfg.spacing * scale;
    let label = cfg.label_allowance * scale;

    let grid_width = cols as f32 * card + (cols as f32 + 1.0) * spacing;
    let start_x = ((available.x - grid_width) / 2.0).max(0.0);
    let row_stride = card + label + spacing;

    let mut cells = Vec::with_capacity(item_count);
    for idx in 0..item_count {
        let row = idx / cols;
        let col = idx % cols;
        let x = start_x + spacing + col as f32 * (card + spacing);
        let y = top + spacing + row as f32 * row_stride;
        cells.push(Rect::from_min_size(pos2(x, y), vec2(card, card)));
    }

    let footprint_h = top + rows as f32 * row_stride + spacing;
    let min_size = vec2(
        (grid_width + 2.0 * cfg.margin).max(cfg.floor_size.x),
        (footprint_h + 2.0 * cfg.margin).max(cfg.floor_size.y),
    );

    GridLayout {
        cells,
        columns: cols,
        rows,
        min_size,
    }
}

/// Lay out the group bar of the two-level picker: one centered row of
/// fixed squares, independent of the responsive card sizing.
pub fn group_bar(group_count: usize, available_width: f32, top: f32, scale: f32, cfg: &LayoutConfig) -> GridLayout {
    if group_count == 0 {
        return GridLayout::empty(cfg);
    }

    let square = cfg.group_square * scale;
    let spacing = cfg.group_spacing * scale;
    let bar_width = group_count as f32 * square + (group_count as f32 + 1.0) * spacing;
    let start_x = ((available_width - bar_width) / 2.0).max(0.0);

    let cells = (0..group_count)
        .map(|i| {
            let x = start_x + spacing + i as f32 * (square + spacing);
            Rect::from_min_size(pos2(x, top + spacing), vec2(square, square))
        })
        .collect();

    GridLayout {
        cells,
        columns: group_count,
        rows: 1,
        min_size: vec2(
            (bar_width + 2.0 * cfg.margin).max(cfg.floor_size.x),
            cfg.floor_size.y,
        ),
    }
}

/// Emits a window-size request only when the viewport width moved by
/// more than a small epsilon since the last request. The layout itself
/// is recomputed every frame regardless; this only throttles resize
/// traffic to the host.
#[derive(Debug, Default)]
pub struct WidthDebounce {
    last_width: Option<f32>,
}

impl WidthDebounce {
    pub fn should_request(&mut self, width: f32) -> bool {
        match self.last_width {
            Some(last) if (width - last).abs() <= RELAYOUT_EPSILON => false,
            _ => {
                self.last_width = Some(width);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn glass() -> LayoutConfig {
        LayoutConfig::glass()
    }

    #[test]
    fn empty_catalog_yields_no_cells_and_floor_size() {
        let cfg = glass();
        let out = grid(0, vec2(800.0, 600.0), 96.0, 1.0, &cfg);
        assert!(out.cells.is_empty());
        assert_eq!(out.min_size, cfg.floor_size);
        assert!(out.min_size.x > 0.0 && out.min_size.y > 0.0);
    }

    #[test]
    fn identical_inputs_are_deterministic() {
        let cfg = glass();
        let a = grid(7, vec2(1024.0, 768.0), 96.0, 1.25, &cfg);
        let b = grid(7, vec2(1024.0, 768.0), 96.0, 1.25, &cfg);
        assert_eq!(a, b);
    }

    #[test]
    fn cells_do_not_overlap_and_stay_in_bounds() {
        let cfg = glass();
        let avail = vec2(1200.0, 1400.0);
        let out = grid(9, avail, 96.0, 1.0, &cfg);
        assert_eq!(out.cells.len(), 9);
        for (i, a) in out.cells.iter().enumerate() {
            assert!(a.min.x >= 0.0 && a.min.y >= 0.0);
            assert!(a.max.x <= avail.x && a.max.y <= avail.y);
            for b in &out.cells[i + 1..] {
                assert!(!a.intersects(b.shrink(0.1)), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[rstest]
    #[case(500.0, 2, 5)]
    #[case(800.0, 3, 3)]
    #[case(1200.0, 3, 3)]
    fn breakpoints_for_nine_items(#[case] width: f32, #[case] cols: usize, #[case] rows: usize) {
        let cfg = glass();
        let out = grid(9, vec2(width, 2000.0), 96.0, 1.0, &cfg);
        assert_eq!(out.columns, cols);
        assert_eq!(out.rows, rows);
    }

    #[test]
    fn single_item_collapses_to_one_column() {
        let out = grid(1, vec2(1200.0, 800.0), 96.0, 1.0, &glass());
        assert_eq!(out.columns, 1);
        assert_eq!(out.rows, 1);
        assert_eq!(out.cells.len(), 1);
    }

    #[test]
    fn degenerate_viewport_does_not_panic() {
        let out = grid(3, vec2(0.0, 0.0), 0.0, 0.0, &glass());
        assert_eq!(out.cells.len(), 3);
        for c in &out.cells {
            assert!(c.width() > 0.0);
        }
    }

    #[test]
    fn grid_is_horizontally_centered() {
        let cfg = glass();
        let avail = vec2(1000.0, 1200.0);
        let out = grid(4, avail, 96.0, 1.0, &cfg);
        let left = out.cells.iter().map(|c| c.min.x).fold(f32::INFINITY, f32::min);
        let right = out.cells.iter().map(|c| c.max.x).fold(0.0f32, f32::max);
        let slack_left = left;
        let slack_right = avail.x - right;
        assert!((slack_left - slack_right).abs() < 1.0);
    }

    #[test]
    fn group_bar_is_a_single_row_of_fixed_squares() {
        let cfg = LayoutConfig::two_level();
        let out = group_bar(5, 900.0, 80.0, 1.0, &cfg);
        assert_eq!(out.rows, 1);
        assert_eq!(out.cells.len(), 5);
        for c in &out.cells {
            assert_eq!(c.width(), cfg.group_square);
            assert_eq!(c.height(), cfg.group_square);
        }
    }

    #[test]
    fn scale_grows_cards_but_not_count() {
        let cfg = glass();
        let small = grid(6, vec2(1200.0, 1200.0), 96.0, 1.0, &cfg);
        let big = grid(6, vec2(1200.0, 1200.0), 96.0, 1.25, &cfg);
        assert_eq!(small.cells.len(), big.cells.len());
        assert!(big.cells[0].width() > small.cells[0].width());
    }

    #[test]
    fn debounce_swallows_small_width_jitter() {
        let mut d = WidthDebounce::default();
        assert!(d.should_request(800.0));
        assert!(!d.should_request(804.0));
        assert!(!d.should_request(796.0));
        assert!(d.should_request(860.0));
        assert!(!d.should_request(862.0));
    }
}
