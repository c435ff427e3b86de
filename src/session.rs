//! Picker session
//!
//! Owns all mutable state for one invocation and wires the per-frame
//! pipeline: layout, then selection, then the radial menu, then the
//! connection segments. The caller feeds it one `FrameInput` per frame
//! and draws whatever comes back; the first terminal event ends the
//! session.

use egui::{pos2, vec2, Rect, Vec2};

use crate::actions::default_action_items;
use crate::catalog::Catalog;
use crate::config::{PickerConfig, PickerStyle};
use crate::connection::{connections, Connection};
use crate::layout::{grid, group_bar, GridLayout, LayoutConfig, WidthDebounce};
use crate::radial::RadialMenu;
use crate::selection::{FrameInput, Outcome, SelectionController, SelectionMode};
use crate::style::CellState;

/// Radius of the expanded radial menu
const RADIAL_RADIUS: f32 = 44.0;

/// Hit/draw radius of one radial item
const RADIAL_ITEM_RADIUS: f32 = 14.0;

/// Edge of the collapsed "more" button
const MORE_BUTTON_SIZE: f32 = 28.0;

/// Gap between the group bar and the profile sub-grid
const SUB_GRID_GAP: f32 = 28.0;

/// Terminal result of a session, reported exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The user picked a profile
    Picked { group: usize, item: usize },
    /// A radial menu action was committed
    Action(String),
    /// Cancelled with no decision
    Dismissed,
}

/// One rectangle to draw this frame, with its interaction state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Card {
    pub rect: Rect,
    /// Owning browser index
    pub group: usize,
    /// Profile index, `None` for a group card in the two-level bar
    pub item: Option<usize>,
    pub state: CellState,
    /// Digit badge 1..=9, when the card is keyboard-addressable
    pub shortcut: Option<u8>,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Default)]
pub struct FrameOutput {
    /// Profile cards: the flat grid, or the expanded sub-grid
    pub cards: Vec<Card>,
    /// Group cards of the two-level bar, empty in flat styles
    pub group_cards: Vec<Card>,
    pub connections: Vec<Connection>,
    /// Window size the host should grow to, emitted on width changes
    pub request_min_size: Option<Vec2>,
    /// Terminal event; the session ignores all input afterwards
    pub event: Option<SessionEvent>,
}

/// State machine driving one picker invocation.
pub struct PickerSession {
    catalog: Catalog,
    style: PickerStyle,
    layout_cfg: LayoutConfig,
    scale: f32,
    controller: SelectionController,
    radial: RadialMenu,
    debounce: WidthDebounce,
    terminal: Option<SessionEvent>,
}

impl PickerSession {
    pub fn new(catalog: Catalog, config: &PickerConfig) -> Self {
        let mode = if config.style.is_two_level() {
            SelectionMode::TwoLevel
        } else {
            SelectionMode::Flat
        };
        Self {
            catalog,
            style: config.style,
            layout_cfg: config.layout(),
            scale: if config.ui_scale.is_finite() && config.ui_scale > 0.0 {
                config.ui_scale
            } else {
                1.0
            },
            controller: SelectionController::new(mode),
            radial: RadialMenu::new(default_action_items(), RADIAL_RADIUS, RADIAL_ITEM_RADIUS),
            debounce: WidthDebounce::default(),
            terminal: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn style(&self) -> PickerStyle {
        self.style
    }

    pub fn radial(&self) -> &RadialMenu {
        &self.radial
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn margin(&self) -> f32 {
        self.layout_cfg.margin
    }

    pub fn terminal(&self) -> Option<&SessionEvent> {
        self.terminal.as_ref()
    }

    /// Collapsed anchor of the radial action menu, top-right of the
    /// header next to the URL bar.
    pub fn more_button_rect(&self, viewport: Vec2) -> Rect {
        let size = MORE_BUTTON_SIZE * self.scale;
        let margin = self.layout_cfg.margin;
        Rect::from_min_size(
            pos2(viewport.x - margin - size, margin + 2.0),
            vec2(size, size),
        )
    }

    /// Advance the session by one frame.
    pub fn frame(&mut self, input: &FrameInput, viewport: Vec2) -> FrameOutput {
        if self.terminal.is_some() {
            // Terminal sessions stay inert; the caller is tearing down.
            return FrameOutput::default();
        }

        let mut out = match self.style {
            PickerStyle::TwoLevel => self.frame_two_level(input, viewport),
            _ => self.frame_flat(input, viewport),
        };

        // Radial menu rides on top of whatever the grid decided, but a
        // profile commit this frame wins over opening the menu.
        if out.event.is_none() {
            if let Some(action) = self.frame_radial(input, viewport) {
                out.event = Some(action);
            }
        }

        if let Some(event) = &out.event {
            self.terminal = Some(event.clone());
        }
        out
    }

    fn header_top(&self) -> f32 {
        self.layout_cfg.header_allowance * self.scale
    }

    fn frame_flat(&mut self, input: &FrameInput, viewport: Vec2) -> FrameOutput {
        let n = self.catalog.len();
        let layout = grid(n, viewport, self.header_top(), self.scale, &self.layout_cfg);

        let outcome = self
            .controller
            .frame_flat(input, &layout.cells, n)
            .map(|o| self.map_flat_outcome(o));

        let state = *self.controller.state();
        let cards = layout
            .cells
            .iter()
            .enumerate()
            .filter_map(|(i, rect)| {
                let (group, item) = self.catalog.flat_pair(i)?;
                Some(Card {
                    rect: *rect,
                    group,
                    item: Some(item),
                    state: CellState::from_flags(
                        state.hovered == Some(i),
                        state.keyboard == Some(i),
                    ),
                    shortcut: shortcut_badge(i),
                })
            })
            .collect();

        FrameOutput {
            cards,
            group_cards: Vec::new(),
            connections: Vec::new(),
            request_min_size: self.size_request(viewport, layout.min_size),
            event: outcome,
        }
    }

    fn frame_two_level(&mut self, input: &FrameInput, viewport: Vec2) -> FrameOutput {
        let sizes = self.catalog.group_sizes();
        let bar = group_bar(
            sizes.len(),
            viewport.x,
            self.header_top(),
            self.scale,
            &self.layout_cfg,
        );

        // Sub-grid geometry comes from last frame's expansion state;
        // expanding this frame shows its grid on the next one.
        let active_group = self.controller.state().active_group;
        let sub = match active_group {
            Some(g) if g < sizes.len() => {
                let top = self.header_top()
                    + self.layout_cfg.group_spacing * self.scale
                    + self.layout_cfg.group_square * self.scale
                    + SUB_GRID_GAP * self.scale;
                grid(sizes[g], viewport, top, self.scale, &self.layout_cfg)
            }
            _ => GridLayout {
                cells: Vec::new(),
                columns: 0,
                rows: 0,
                min_size: bar.min_size,
            },
        };

        let outcome = self
            .controller
            .frame_two_level(input, &bar.cells, &sizes, &sub.cells)
            .map(|o| match o {
                Outcome::Picked { group, item } => SessionEvent::Picked { group, item },
                Outcome::Dismissed => SessionEvent::Dismissed,
            });

        let state = *self.controller.state();
        let group_cards = bar
            .cells
            .iter()
            .enumerate()
            .map(|(g, rect)| Card {
                rect: *rect,
                group: g,
                item: None,
                state: CellState::from_flags(
                    state.hovered == Some(g),
                    state.active_group == Some(g)
                        || (state.active_group.is_none() && state.keyboard == Some(g)),
                ),
                shortcut: if state.active_group.is_none() {
                    shortcut_badge(g)
                } else {
                    None
                },
            })
            .collect();

        let cards = match state.active_group {
            Some(g) => sub
                .cells
                .iter()
                .enumerate()
                .map(|(i, rect)| Card {
                    rect: *rect,
                    group: g,
                    item: Some(i),
                    state: CellState::from_flags(
                        state.active_item == Some(i),
                        state.keyboard == Some(i) && state.active_group.is_some(),
                    ),
                    shortcut: shortcut_badge(i),
                })
                .collect(),
            None => Vec::new(),
        };

        let segments = match state.active_group {
            Some(g) => bar
                .cells
                .get(g)
                .map(|parent| connections(*parent, &sub.cells, state.active_item))
                .unwrap_or_default(),
            None => Vec::new(),
        };

        let min_size = vec2(
            bar.min_size.x.max(sub.min_size.x),
            bar.min_size.y.max(sub.min_size.y),
        );

        FrameOutput {
            cards,
            group_cards,
            connections: segments,
            request_min_size: self.size_request(viewport, min_size),
            event: outcome,
        }
    }

    fn frame_radial(&mut self, input: &FrameInput, viewport: Vec2) -> Option<SessionEvent> {
        let owner = self.more_button_rect(viewport);
        let hovered = match input.pointer {
            Some(pos) => owner.contains(pos) || self.radial.hit_test(pos).is_some(),
            None => false,
        };
        self.radial.frame(hovered, owner.center());

        if input.clicked {
            if let Some(pos) = input.pointer {
                if let Some(id) = self.radial.hit_test(pos) {
                    return Some(SessionEvent::Action(id.to_string()));
                }
            }
        }
        None
    }

    fn map_flat_outcome(&self, outcome: Outcome) -> SessionEvent {
        match outcome {
            Outcome::Picked { item, .. } => match self.catalog.flat_pair(item) {
                Some((group, item)) => SessionEvent::Picked { group, item },
                // Cannot happen: the controller validated the index.
                None => SessionEvent::Dismissed,
            },
            Outcome::Dismissed => SessionEvent::Dismissed,
        }
    }

    fn size_request(&mut self, viewport: Vec2, min_size: Vec2) -> Option<Vec2> {
        if self.debounce.should_request(viewport.x) {
            Some(min_size)
        } else {
            None
        }
    }
}

/// Digit badge for the first nine cards.
fn shortcut_badge(index: usize) -> Option<u8> {
    (index < 9).then(|| index as u8 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BrowserEntry, PickerConfig, PickerStyle, ProfileEntry};

    fn profile(name: &str) -> ProfileEntry {
        ProfileEntry {
            name: name.into(),
            id: None,
            icon: None,
            incognito: false,
            hidden: false,
        }
    }

    fn catalog(shape: &[usize]) -> Catalog {
        let entries: Vec<BrowserEntry> = shape
            .iter()
            .enumerate()
            .map(|(i, &n)| BrowserEntry {
                name: format!("Browser{i}"),
                command: "browser".into(),
                icon: None,
                profile_arg: None,
                private_arg: None,
                hidden: false,
                profiles: (0..n).map(|p| profile(&format!("p{p}"))).collect(),
            })
            .collect();
        Catalog::build(&entries)
    }

    fn flat_session(shape: &[usize]) -> PickerSession {
        PickerSession::new(catalog(shape), &PickerConfig::default())
    }

    fn two_level_session(shape: &[usize]) -> PickerSession {
        let config = PickerConfig {
            style: PickerStyle::TwoLevel,
            ..PickerConfig::default()
        };
        PickerSession::new(catalog(shape), &config)
    }

    const VIEWPORT: Vec2 = vec2(1000.0, 1400.0);

    fn digit(d: usize) -> FrameInput {
        let mut digits = [false; 9];
        digits[d - 1] = true;
        FrameInput {
            digits,
            ..FrameInput::default()
        }
    }

    #[test]
    fn empty_catalog_renders_nothing_and_never_commits() {
        let mut s = flat_session(&[]);
        let out = s.frame(&FrameInput::default(), VIEWPORT);
        assert!(out.cards.is_empty());
        assert!(out.event.is_none());
        let out = s.frame(
            &FrameInput {
                clicked: true,
                pointer: Some(pos2(500.0, 500.0)),
                ..FrameInput::default()
            },
            VIEWPORT,
        );
        assert!(out.event.is_none());
        assert!(s.terminal().is_none());
    }

    #[test]
    fn hover_click_commits_and_session_goes_terminal() {
        let mut s = flat_session(&[2, 1]);
        // First frame lays out with no interaction.
        let out = s.frame(&FrameInput::default(), VIEWPORT);
        assert_eq!(out.cards.len(), 3);
        let target = out.cards[2];

        let out = s.frame(
            &FrameInput {
                pointer: Some(target.rect.center()),
                clicked: true,
                ..FrameInput::default()
            },
            VIEWPORT,
        );
        assert_eq!(out.event, Some(SessionEvent::Picked { group: 1, item: 0 }));

        // A later frame produces nothing further.
        let out = s.frame(&digit(1), VIEWPORT);
        assert!(out.event.is_none());
        assert!(out.cards.is_empty());
    }

    #[test]
    fn keyboard_beats_pointer_in_the_same_frame() {
        let mut s = flat_session(&[3]);
        let out = s.frame(&FrameInput::default(), VIEWPORT);
        let hovered = out.cards[0].rect.center();

        let mut input = digit(3);
        input.pointer = Some(hovered);
        input.clicked = true;
        let out = s.frame(&input, VIEWPORT);
        assert_eq!(out.event, Some(SessionEvent::Picked { group: 0, item: 2 }));
    }

    #[test]
    fn flat_cards_expose_shortcut_badges_in_order() {
        let mut s = flat_session(&[12]);
        let out = s.frame(&FrameInput::default(), VIEWPORT);
        let badges: Vec<Option<u8>> = out.cards.iter().map(|c| c.shortcut).collect();
        assert_eq!(badges[0], Some(1));
        assert_eq!(badges[8], Some(9));
        assert_eq!(badges[9], None);
    }

    #[test]
    fn min_size_requests_are_debounced() {
        let mut s = flat_session(&[4]);
        let out = s.frame(&FrameInput::default(), VIEWPORT);
        assert!(out.request_min_size.is_some());
        // Same width again: no request.
        let out = s.frame(&FrameInput::default(), VIEWPORT);
        assert!(out.request_min_size.is_none());
        // A real resize re-requests.
        let out = s.frame(&FrameInput::default(), vec2(700.0, 1400.0));
        assert!(out.request_min_size.is_some());
    }

    #[test]
    fn two_level_expansion_produces_sub_grid_and_connections() {
        let mut s = two_level_session(&[3, 2]);
        let out = s.frame(&FrameInput::default(), VIEWPORT);
        assert_eq!(out.group_cards.len(), 2);
        assert!(out.cards.is_empty());

        // Hover the first group to expand it.
        let bar0 = out.group_cards[0].rect.center();
        let out = s.frame(
            &FrameInput {
                pointer: Some(bar0),
                ..FrameInput::default()
            },
            VIEWPORT,
        );
        assert!(out.event.is_none());

        // Next frame carries the sub-grid plus one segment per child.
        let out = s.frame(&FrameInput::default(), VIEWPORT);
        assert_eq!(out.cards.len(), 3);
        assert_eq!(out.connections.len(), 3);
        assert!(out.connections.iter().all(|c| !c.emphasized));
    }

    #[test]
    fn two_level_digit_expands_then_commits() {
        let mut s = two_level_session(&[3, 2]);
        s.frame(&FrameInput::default(), VIEWPORT);
        let out = s.frame(&digit(2), VIEWPORT);
        assert!(out.event.is_none(), "multi-child group expands, not commits");
        let out = s.frame(&digit(1), VIEWPORT);
        assert_eq!(out.event, Some(SessionEvent::Picked { group: 1, item: 0 }));
    }

    #[test]
    fn radial_click_commits_an_action() {
        let mut s = flat_session(&[2]);
        let owner = s.more_button_rect(VIEWPORT).center();

        // Hover long enough for the menu to fully expand.
        for _ in 0..80 {
            s.frame(
                &FrameInput {
                    pointer: Some(owner),
                    ..FrameInput::default()
                },
                VIEWPORT,
            );
        }
        let target = s.radial().items()[1].pos;
        let out = s.frame(
            &FrameInput {
                pointer: Some(target),
                clicked: true,
                ..FrameInput::default()
            },
            VIEWPORT,
        );
        assert_eq!(out.event, Some(SessionEvent::Action("email".into())));
        assert!(s.terminal().is_some());
    }

    #[test]
    fn escape_cancels_with_no_decision() {
        let mut s = flat_session(&[2]);
        let out = s.frame(
            &FrameInput {
                escape: true,
                ..FrameInput::default()
            },
            VIEWPORT,
        );
        assert_eq!(out.event, Some(SessionEvent::Dismissed));
    }
}
