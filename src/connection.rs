//! Connection affordances
//!
//! Derives the line segments drawn between an expanded group card and
//! its profile cards. Only endpoints and an emphasis flag are produced;
//! stroking is the renderer's job.

use egui::{Pos2, Rect};

/// One parent-to-child segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    /// Bottom-center of the parent rectangle
    pub from: Pos2,
    /// Top-center of the child rectangle
    pub to: Pos2,
    /// The currently hovered/focused child gets a heavier stroke
    pub emphasized: bool,
}

/// Build one segment per child, flagging the active child for emphasis.
pub fn connections(parent: Rect, children: &[Rect], active: Option<usize>) -> Vec<Connection> {
    children
        .iter()
        .enumerate()
        .map(|(idx, child)| Connection {
            from: parent.center_bottom(),
            to: child.center_top(),
            emphasized: active == Some(idx),
        })
        .collect()
}
