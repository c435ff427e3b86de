//! Visual state styling
//!
//! Hover/active card appearance used to be computed ad hoc at every
//! draw site; it is factored into one pure `style_for` so every picker
//! style renders interaction state the same way.

use egui::Color32;

/// Interaction state of one cell this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Idle,
    Hovered,
    /// Selected by keyboard or expanded/focused
    Active,
}

impl CellState {
    pub fn from_flags(hovered: bool, active: bool) -> Self {
        if active {
            Self::Active
        } else if hovered {
            Self::Hovered
        } else {
            Self::Idle
        }
    }
}

/// Everything the renderer needs to draw one cell chrome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleTokens {
    pub fill: Color32,
    pub border: Color32,
    pub border_width: f32,
    pub rounding: f32,
    /// Alpha of the drop shadow under the card
    pub shadow_alpha: u8,
    pub text: Color32,
}

/// Color palette for one theme mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub accent: Color32,
    pub card_idle: Color32,
    pub card_hover: Color32,
    pub card_active: Color32,
    pub border_idle: Color32,
    pub border_hover: Color32,
    pub border_active: Color32,
    pub text: Color32,
    pub text_dim: Color32,
    pub connection: Color32,
    /// Gradient corners for the glass background, clockwise from top-left
    pub background: [Color32; 4],
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            accent: Color32::from_rgb(59, 130, 246),
            card_idle: Color32::from_rgba_unmultiplied(255, 255, 255, 20),
            card_hover: Color32::from_rgba_unmultiplied(255, 255, 255, 40),
            card_active: Color32::from_rgba_unmultiplied(59, 130, 246, 80),
            border_idle: Color32::from_rgba_unmultiplied(255, 255, 255, 60),
            border_hover: Color32::from_rgba_unmultiplied(255, 255, 255, 100),
            border_active: Color32::from_rgba_unmultiplied(59, 130, 246, 180),
            text: Color32::from_rgba_unmultiplied(242, 242, 250, 255),
            text_dim: Color32::from_rgba_unmultiplied(179, 179, 191, 204),
            connection: Color32::from_rgba_unmultiplied(255, 255, 255, 90),
            background: [
                Color32::from_rgb(102, 126, 234),
                Color32::from_rgb(118, 75, 162),
                Color32::from_rgb(147, 51, 234),
                Color32::from_rgb(59, 130, 246),
            ],
        }
    }

    pub fn light() -> Self {
        Self {
            accent: Color32::from_rgb(37, 99, 235),
            card_idle: Color32::from_rgba_unmultiplied(255, 255, 255, 140),
            card_hover: Color32::from_rgba_unmultiplied(255, 255, 255, 200),
            card_active: Color32::from_rgba_unmultiplied(37, 99, 235, 70),
            border_idle: Color32::from_rgba_unmultiplied(30, 41, 59, 60),
            border_hover: Color32::from_rgba_unmultiplied(30, 41, 59, 110),
            border_active: Color32::from_rgba_unmultiplied(37, 99, 235, 190),
            text: Color32::from_rgb(24, 29, 39),
            text_dim: Color32::from_rgba_unmultiplied(24, 29, 39, 170),
            connection: Color32::from_rgba_unmultiplied(30, 41, 59, 110),
            background: [
                Color32::from_rgb(191, 219, 254),
                Color32::from_rgb(221, 214, 254),
                Color32::from_rgb(196, 181, 253),
                Color32::from_rgb(147, 197, 253),
            ],
        }
    }

    pub fn from_dark_mode(dark: bool) -> Self {
        if dark {
            Self::dark()
        } else {
            Self::light()
        }
    }
}

/// Map a cell's interaction state to its draw tokens.
pub fn style_for(state: CellState, palette: &Palette) -> StyleTokens {
    let (fill, border, border_width, shadow_alpha) = match state {
        CellState::Idle => (palette.card_idle, palette.border_idle, 1.0, 25),
        CellState::Hovered => (palette.card_hover, palette.border_hover, 2.0, 35),
        CellState::Active => (palette.card_active, palette.border_active, 2.0, 45),
    };
    StyleTokens {
        fill,
        border,
        border_width,
        rounding: 20.0,
        shadow_alpha,
        text: palette.text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_outranks_hover() {
        assert_eq!(CellState::from_flags(true, true), CellState::Active);
        assert_eq!(CellState::from_flags(true, false), CellState::Hovered);
        assert_eq!(CellState::from_flags(false, false), CellState::Idle);
    }

    #[test]
    fn states_map_to_distinct_tokens() {
        let p = Palette::dark();
        let idle = style_for(CellState::Idle, &p);
        let hover = style_for(CellState::Hovered, &p);
        let active = style_for(CellState::Active, &p);
        assert_ne!(idle.fill, hover.fill);
        assert_ne!(hover.fill, active.fill);
        assert_eq!(active.border, p.border_active);
    }
}
