//! Radial action menu
//!
//! A small set of action buttons that fans out from a collapsed "more"
//! icon while it is hovered. Each item sweeps from angle 0 to its final
//! angle in fixed steps per frame, never overshooting; losing hover
//! snaps everything back to collapsed on the next frame.

use std::f32::consts::PI;

use egui::{pos2, Pos2};

/// Angle advanced per hovered frame, in radians
pub const SWEEP_STEP: f32 = 0.1;

/// One action in the menu.
#[derive(Debug, Clone)]
pub struct ActionItem {
    /// Identifier dispatched to the action handler on commit
    pub id: String,
    /// Single glyph drawn inside the button
    pub glyph: char,
    pub tooltip: String,
    /// Current sweep angle
    pub angle: f32,
    /// Target angle, set when the menu opens
    pub angle_final: f32,
    /// Resolved screen position for drawing and hit-testing
    pub pos: Pos2,
}

impl ActionItem {
    pub fn new(id: impl Into<String>, glyph: char, tooltip: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            glyph,
            tooltip: tooltip.into(),
            angle: 0.0,
            angle_final: 0.0,
            pos: pos2(0.0, 0.0),
        }
    }
}

/// Expanding circular menu anchored to one owning element.
#[derive(Debug)]
pub struct RadialMenu {
    items: Vec<ActionItem>,
    center: Pos2,
    /// Distance from the owner center to each expanded item
    radius: f32,
    /// Hit radius of one expanded item
    item_radius: f32,
    open: bool,
}

impl RadialMenu {
    pub fn new(items: Vec<ActionItem>, radius: f32, item_radius: f32) -> Self {
        Self {
            items,
            center: pos2(0.0, 0.0),
            radius,
            item_radius,
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn items(&self) -> &[ActionItem] {
        &self.items
    }

    pub fn item_radius(&self) -> f32 {
        self.item_radius
    }

    /// Advance the menu by one frame.
    ///
    /// While the owner is hovered the items sweep towards their final
    /// angles, distributed evenly across a half circle. On hover loss
    /// both angles reset immediately, with no exit animation.
    pub fn frame(&mut self, owner_hovered: bool, owner_center: Pos2) {
        self.center = owner_center;

        if !owner_hovered {
            self.open = false;
            for item in &mut self.items {
                item.angle = 0.0;
                item.angle_final = 0.0;
                item.pos = owner_center;
            }
            return;
        }

        if !self.open {
            self.open = true;
            let n = self.items.len().max(1);
            for (i, item) in self.items.iter_mut().enumerate() {
                item.angle = 0.0;
                item.angle_final = i as f32 * PI / n as f32;
            }
        }

        for item in &mut self.items {
            if item.angle < item.angle_final {
                item.angle = (item.angle + SWEEP_STEP).min(item.angle_final);
            }
            // The owner anchors at the top-right corner, so the fan
            // opens leftwards and down.
            item.pos = pos2(
                self.center.x - self.radius * item.angle.cos(),
                self.center.y + self.radius * item.angle.sin(),
            );
        }
    }

    /// Hit-test the expanded items, each independently, and return the
    /// action id under the pointer.
    pub fn hit_test(&self, pointer: Pos2) -> Option<&str> {
        if !self.open {
            return None;
        }
        self.items
            .iter()
            .find(|item| item.pos.distance(pointer) <= self.item_radius)
            .map(|item| item.id.as_str())
    }
}
