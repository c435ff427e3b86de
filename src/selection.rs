//! Selection state machine
//!
//! Reconciles the two input channels, pointer hover/click and digit
//! shortcuts, into at most one committed pick per session. Hit-testing
//! runs against whatever rectangles the layout produced this frame;
//! indexes that fall outside the current catalog are ignored rather
//! than surfaced as errors.

use egui::{Pos2, Rect};

/// Everything the controller consumes in one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Pointer position, if the pointer is over the window
    pub pointer: Option<Pos2>,
    /// Left button was clicked this frame
    pub clicked: bool,
    /// Digit keys 1..=9 newly pressed this frame, index 0 is "1"
    pub digits: [bool; 9],
    /// Escape was newly pressed this frame
    pub escape: bool,
}

impl FrameInput {
    /// First pressed digit scanned in ascending order, as a zero-based
    /// index. At most one keyboard selection is possible per frame.
    pub fn first_digit(&self) -> Option<usize> {
        self.digits.iter().position(|&pressed| pressed)
    }
}

/// Terminal result of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The user committed to one catalog entry
    Picked { group: usize, item: usize },
    /// The session ended with no decision
    Dismissed,
}

/// Per-frame selection state, exposed so the renderer can style cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Pointer-derived hover, last containing rectangle wins
    pub hovered: Option<usize>,
    /// Digit pressed this frame, cleared every frame
    pub keyboard: Option<usize>,
    /// Expanded group in two-level mode
    pub active_group: Option<usize>,
    /// Focused item inside the expanded group
    pub active_item: Option<usize>,
}

/// Whether the controller sees one flat list or a group bar with an
/// expandable item sub-grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Flat,
    TwoLevel,
}

/// Owns the selection state machine for one picker session.
///
/// Once an outcome is produced the controller is terminal: further
/// frames are ignored entirely.
#[derive(Debug)]
pub struct SelectionController {
    mode: SelectionMode,
    state: SelectionState,
    terminal: Option<Outcome>,
}

/// Hit-test a pointer against a cell list. Later rectangles overwrite
/// earlier ones, which only matters at shared edges.
fn hit_test(pointer: Option<Pos2>, cells: &[Rect]) -> Option<usize> {
    let pos = pointer?;
    let mut hit = None;
    for (idx, rect) in cells.iter().enumerate() {
        if rect.contains(pos) {
            hit = Some(idx);
        }
    }
    hit
}

impl SelectionController {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            state: SelectionState::default(),
            terminal: None,
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Outcome of the session, once committed.
    pub fn terminal(&self) -> Option<Outcome> {
        self.terminal
    }

    fn commit(&mut self, outcome: Outcome) -> Option<Outcome> {
        self.terminal = Some(outcome);
        Some(outcome)
    }

    /// Advance the flat-grid state machine by one frame.
    ///
    /// `cells` are this frame's rectangles for the flattened catalog and
    /// must match `entry_count`; a stale list (catalog changed since the
    /// rectangles were computed) skips hit-testing until the caller has
    /// relaid out.
    pub fn frame_flat(&mut self, input: &FrameInput, cells: &[Rect], entry_count: usize) -> Option<Outcome> {
        if self.terminal.is_some() {
            return None;
        }

        self.state.keyboard = None;
        if input.escape {
            return self.commit(Outcome::Dismissed);
        }

        if cells.len() != entry_count {
            self.state.hovered = None;
            return None;
        }

        self.state.hovered = hit_test(input.pointer, cells);

        // Keyboard wins over a same-frame click.
        if let Some(digit) = input.first_digit() {
            if digit < entry_count {
                self.state.keyboard = Some(digit);
                return self.commit(Outcome::Picked { group: 0, item: digit });
            }
        }

        if input.clicked {
            if let Some(idx) = self.state.hovered {
                return self.commit(Outcome::Picked { group: 0, item: idx });
            }
        }

        None
    }

    /// Advance the two-level state machine by one frame.
    ///
    /// `group_cells` covers the group bar, `group_sizes` the child count
    /// per group, and `item_cells` the sub-grid of the currently expanded
    /// group (empty when none is expanded).
    pub fn frame_two_level(
        &mut self,
        input: &FrameInput,
        group_cells: &[Rect],
        group_sizes: &[usize],
        item_cells: &[Rect],
    ) -> Option<Outcome> {
        if self.terminal.is_some() {
            return None;
        }

        self.state.keyboard = None;
        if input.escape {
            return self.pop_one_level();
        }

        if group_cells.len() != group_sizes.len() {
            self.state.hovered = None;
            return None;
        }

        // Items sit below the bar; an item hit takes priority and is
        // tracked as the focused item, `hovered` stays group-scoped.
        let group_hit = hit_test(input.pointer, group_cells);
        let item_hit = hit_test(input.pointer, item_cells);
        self.state.hovered = group_hit;

        // Keyboard first: digits address groups while the bar has focus,
        // items once a group is expanded.
        if let Some(digit) = input.first_digit() {
            match self.state.active_group {
                Some(group) => {
                    let size = group_sizes.get(group).copied().unwrap_or(0);
                    if digit < size {
                        self.state.keyboard = Some(digit);
                        return self.commit(Outcome::Picked { group, item: digit });
                    }
                }
                None => {
                    if digit < group_cells.len() {
                        self.state.keyboard = Some(digit);
                        return self.select_group(digit, group_sizes);
                    }
                }
            }
        }

        if let Some(item) = item_hit {
            self.state.active_item = Some(item);
            if input.clicked {
                if let Some(group) = self.state.active_group {
                    return self.commit(Outcome::Picked { group, item });
                }
            }
        } else if let Some(group) = group_hit {
            match group_sizes.get(group).copied().unwrap_or(0) {
                0 => {}
                1 => {
                    // Single-child groups commit directly, no expansion.
                    if input.clicked {
                        return self.commit(Outcome::Picked { group, item: 0 });
                    }
                }
                _ => {
                    if self.state.active_group != Some(group) {
                        self.state.active_group = Some(group);
                        self.state.active_item = None;
                    }
                }
            }
        }

        None
    }

    /// Hover or keyboard selection of a group: expand when it has more
    /// than one child, commit outright when it has exactly one.
    fn select_group(&mut self, group: usize, group_sizes: &[usize]) -> Option<Outcome> {
        match group_sizes.get(group).copied().unwrap_or(0) {
            0 => None,
            1 => self.commit(Outcome::Picked { group, item: 0 }),
            _ => {
                if self.state.active_group != Some(group) {
                    self.state.active_group = Some(group);
                    self.state.active_item = None;
                }
                None
            }
        }
    }

    /// Escape pops exactly one level: item focus, then group expansion,
    /// then the session itself.
    fn pop_one_level(&mut self) -> Option<Outcome> {
        if self.state.active_item.is_some() {
            self.state.active_item = None;
            None
        } else if self.state.active_group.is_some() {
            self.state.active_group = None;
            None
        } else {
            self.commit(Outcome::Dismissed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2, Rect};

    fn row_of(n: usize) -> Vec<Rect> {
        row_of_at(n, 0.0)
    }

    fn row_of_at(n: usize, y: f32) -> Vec<Rect> {
        (0..n)
            .map(|i| Rect::from_min_size(pos2(i as f32 * 110.0, y), vec2(100.0, 100.0)))
            .collect()
    }

    fn hover_click(cell: usize, cells: &[Rect]) -> FrameInput {
        FrameInput {
            pointer: Some(cells[cell].center()),
            clicked: true,
            ..FrameInput::default()
        }
    }

    fn digit(d: usize) -> FrameInput {
        let mut digits = [false; 9];
        digits[d - 1] = true;
        FrameInput {
            digits,
            ..FrameInput::default()
        }
    }

    #[test]
    fn hover_click_commits_hovered_cell() {
        let cells = row_of(4);
        let mut c = SelectionController::new(SelectionMode::Flat);
        let out = c.frame_flat(&hover_click(2, &cells), &cells, 4);
        assert_eq!(out, Some(Outcome::Picked { group: 0, item: 2 }));
    }

    #[test]
    fn session_is_terminal_after_first_commit() {
        let cells = row_of(4);
        let mut c = SelectionController::new(SelectionMode::Flat);
        assert!(c.frame_flat(&hover_click(1, &cells), &cells, 4).is_some());
        // Same input again, and a different input: no second decision.
        assert_eq!(c.frame_flat(&hover_click(3, &cells), &cells, 4), None);
        assert_eq!(c.frame_flat(&digit(2), &cells, 4), None);
        assert_eq!(c.terminal(), Some(Outcome::Picked { group: 0, item: 1 }));
    }

    #[test]
    fn keyboard_beats_same_frame_click() {
        let cells = row_of(4);
        let mut input = hover_click(0, &cells);
        input.digits[2] = true; // "3"
        let mut c = SelectionController::new(SelectionMode::Flat);
        let out = c.frame_flat(&input, &cells, 4);
        assert_eq!(out, Some(Outcome::Picked { group: 0, item: 2 }));
    }

    #[test]
    fn first_pressed_digit_wins_ascending() {
        let cells = row_of(9);
        let mut input = FrameInput::default();
        input.digits[4] = true;
        input.digits[1] = true;
        let mut c = SelectionController::new(SelectionMode::Flat);
        let out = c.frame_flat(&input, &cells, 9);
        assert_eq!(out, Some(Outcome::Picked { group: 0, item: 1 }));
    }

    #[test]
    fn out_of_range_digit_is_ignored() {
        let cells = row_of(2);
        let mut c = SelectionController::new(SelectionMode::Flat);
        assert_eq!(c.frame_flat(&digit(7), &cells, 2), None);
        assert!(c.terminal().is_none());
    }

    #[test]
    fn stale_geometry_skips_hit_testing() {
        let cells = row_of(3);
        let mut c = SelectionController::new(SelectionMode::Flat);
        // Catalog claims 5 entries but only 3 rectangles exist.
        let out = c.frame_flat(&hover_click(1, &cells), &cells, 5);
        assert_eq!(out, None);
        assert_eq!(c.state().hovered, None);
    }

    #[test]
    fn overlapping_cells_last_one_wins() {
        let a = Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0));
        let b = Rect::from_min_size(pos2(50.0, 0.0), vec2(100.0, 100.0));
        let cells = vec![a, b];
        let mut c = SelectionController::new(SelectionMode::Flat);
        let input = FrameInput {
            pointer: Some(pos2(75.0, 50.0)),
            clicked: true,
            ..FrameInput::default()
        };
        let out = c.frame_flat(&input, &cells, 2);
        assert_eq!(out, Some(Outcome::Picked { group: 0, item: 1 }));
    }

    #[test]
    fn escape_dismisses_flat_session() {
        let cells = row_of(3);
        let mut c = SelectionController::new(SelectionMode::Flat);
        let input = FrameInput {
            escape: true,
            ..FrameInput::default()
        };
        assert_eq!(c.frame_flat(&input, &cells, 3), Some(Outcome::Dismissed));
    }

    #[test]
    fn hovering_a_multi_child_group_expands_it() {
        let groups = row_of(3);
        let sizes = [2, 3, 1];
        let mut c = SelectionController::new(SelectionMode::TwoLevel);
        let input = FrameInput {
            pointer: Some(groups[1].center()),
            ..FrameInput::default()
        };
        assert_eq!(c.frame_two_level(&input, &groups, &sizes, &[]), None);
        assert_eq!(c.state().active_group, Some(1));
        assert_eq!(c.state().active_item, None);
    }

    #[test]
    fn single_child_group_commits_without_expanding() {
        let groups = row_of(3);
        let sizes = [2, 3, 1];
        let mut c = SelectionController::new(SelectionMode::TwoLevel);
        let input = FrameInput {
            pointer: Some(groups[2].center()),
            clicked: true,
            ..FrameInput::default()
        };
        let out = c.frame_two_level(&input, &groups, &sizes, &[]);
        assert_eq!(out, Some(Outcome::Picked { group: 2, item: 0 }));
    }

    #[test]
    fn digit_commits_item_once_group_is_expanded() {
        let groups = row_of(2);
        let sizes = [3, 2];
        let mut c = SelectionController::new(SelectionMode::TwoLevel);
        // Expand group 0 by keyboard.
        assert_eq!(c.frame_two_level(&digit(1), &groups, &sizes, &[]), None);
        assert_eq!(c.state().active_group, Some(0));
        // Now "2" addresses item index 1 of that group.
        let items = row_of_at(3, 200.0);
        let out = c.frame_two_level(&digit(2), &groups, &sizes, &items);
        assert_eq!(out, Some(Outcome::Picked { group: 0, item: 1 }));
    }

    #[test]
    fn escape_pops_exactly_one_level_per_press() {
        let groups = row_of(2);
        let sizes = [3, 2];
        let items = row_of_at(3, 200.0);
        let mut c = SelectionController::new(SelectionMode::TwoLevel);

        // Expand group 0, then focus an item inside it.
        let expand = FrameInput {
            pointer: Some(groups[0].center()),
            ..FrameInput::default()
        };
        assert_eq!(c.frame_two_level(&expand, &groups, &sizes, &[]), None);
        let focus = FrameInput {
            pointer: Some(items[1].center()),
            ..FrameInput::default()
        };
        assert_eq!(c.frame_two_level(&focus, &groups, &sizes, &items), None);
        assert_eq!(c.state().active_group, Some(0));
        assert_eq!(c.state().active_item, Some(1));

        let esc = FrameInput {
            escape: true,
            ..FrameInput::default()
        };
        // Press 1: item focus collapses, group stays expanded.
        assert_eq!(c.frame_two_level(&esc, &groups, &sizes, &items), None);
        assert_eq!(c.state().active_item, None);
        assert_eq!(c.state().active_group, Some(0));
        // Press 2: group collapses.
        assert_eq!(c.frame_two_level(&esc, &groups, &sizes, &[]), None);
        assert_eq!(c.state().active_group, None);
        // Press 3: session ends with no decision.
        let out = c.frame_two_level(&esc, &groups, &sizes, &[]);
        assert_eq!(out, Some(Outcome::Dismissed));
    }

    #[test]
    fn hovering_another_group_switches_expansion() {
        let groups = row_of(3);
        let sizes = [2, 4, 2];
        let items = row_of_at(2, 200.0);
        let mut c = SelectionController::new(SelectionMode::TwoLevel);

        let hover0 = FrameInput {
            pointer: Some(groups[0].center()),
            ..FrameInput::default()
        };
        c.frame_two_level(&hover0, &groups, &sizes, &[]);
        assert_eq!(c.state().active_group, Some(0));

        let focus = FrameInput {
            pointer: Some(items[0].center()),
            ..FrameInput::default()
        };
        c.frame_two_level(&focus, &groups, &sizes, &items);
        assert_eq!(c.state().active_item, Some(0));

        let hover1 = FrameInput {
            pointer: Some(groups[1].center()),
            ..FrameInput::default()
        };
        c.frame_two_level(&hover1, &groups, &sizes, &items);
        assert_eq!(c.state().active_group, Some(1));
        assert_eq!(c.state().active_item, None);
    }
}
