//! eframe frontend
//!
//! Thin immediate-mode shell around [`PickerSession`]: collects raw
//! input, hands it to the session, and paints whatever geometry comes
//! back. All interaction decisions live in the session; this module
//! only draws and forwards.

use std::sync::{Arc, Mutex};

use egui::{
    pos2, vec2, Align2, Color32, Context, CornerRadius, FontId, Key, Mesh, Pos2, Rect, Shape,
    Stroke, StrokeKind, TextEdit, ViewportCommand,
};
use tracing::warn;

use crate::catalog::Profile;
use crate::icons::IconCache;
use crate::selection::FrameInput;
use crate::session::{Card, FrameOutput, PickerSession, SessionEvent};
use crate::style::{style_for, Palette};

/// Longest profile name shown untruncated
const NAME_LIMIT: usize = 14;

/// Kept prefix when a name is truncated
const NAME_KEEP: usize = 11;

/// Icon raster size requested from the theme
const ICON_SIZE: u16 = 64;

const DIGIT_KEYS: [Key; 9] = [
    Key::Num1,
    Key::Num2,
    Key::Num3,
    Key::Num4,
    Key::Num5,
    Key::Num6,
    Key::Num7,
    Key::Num8,
    Key::Num9,
];

/// Shorten long profile names so labels never overrun the card.
pub fn truncate_name(name: &str) -> String {
    if name.chars().count() > NAME_LIMIT {
        let kept: String = name.chars().take(NAME_KEEP).collect();
        format!("{kept}...")
    } else {
        name.to_string()
    }
}

/// What the session decided, published once when the window closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickOutcome {
    pub event: SessionEvent,
    /// The link as it read when the decision landed; the user may have
    /// edited it in the header field.
    pub url: String,
}

/// The picker window. The terminal outcome is published through a
/// shared slot so `main` can act on it after the event loop exits.
pub struct PickerWindow {
    session: PickerSession,
    url: String,
    icons: IconCache,
    close_on_focus_loss: bool,
    url_focused: bool,
    result: Arc<Mutex<Option<PickOutcome>>>,
}

impl PickerWindow {
    pub fn new(
        session: PickerSession,
        url: String,
        close_on_focus_loss: bool,
        result: Arc<Mutex<Option<PickOutcome>>>,
    ) -> Self {
        Self {
            session,
            url,
            icons: IconCache::default(),
            close_on_focus_loss,
            url_focused: false,
            result,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn gather_input(&self, ctx: &Context) -> FrameInput {
        ctx.input(|i| {
            let mut digits = [false; 9];
            // Digits type into the URL field when it has focus.
            if !self.url_focused {
                for (slot, key) in digits.iter_mut().zip(DIGIT_KEYS) {
                    *slot = i.key_pressed(key);
                }
            }
            FrameInput {
                pointer: i.pointer.hover_pos(),
                clicked: i.pointer.primary_clicked(),
                digits,
                escape: i.key_pressed(Key::Escape),
            }
        })
    }

    fn publish(&self, ctx: &Context, event: SessionEvent) {
        let outcome = PickOutcome {
            event,
            url: self.url.clone(),
        };
        match self.result.lock() {
            Ok(mut slot) => *slot = Some(outcome),
            Err(poisoned) => {
                warn!("result slot poisoned");
                *poisoned.into_inner() = Some(outcome);
            }
        }
        ctx.send_viewport_cmd(ViewportCommand::Close);
    }
}

impl eframe::App for PickerWindow {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::TRANSPARENT.to_array()
    }

    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let palette = Palette::from_dark_mode(ctx.style().visuals.dark_mode);

        if self.close_on_focus_loss
            && ctx.input(|i| i.viewport().focused) == Some(false)
            && self.session.terminal().is_none()
        {
            self.publish(ctx, SessionEvent::Dismissed);
            return;
        }

        let input = self.gather_input(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(Color32::TRANSPARENT))
            .show(ctx, |ui| {
                let viewport = ui.max_rect().size();
                paint_background(ui, ui.max_rect(), &palette);

                let out = self.session.frame(&input, viewport);

                self.draw_header(ui, viewport);
                self.draw_frame_output(ui, &out, &palette);
                self.draw_radial(ui, viewport, input.pointer, &palette);

                if let Some(min) = out.request_min_size {
                    ctx.send_viewport_cmd(ViewportCommand::MinInnerSize(min));
                    if viewport.x < min.x || viewport.y < min.y {
                        ctx.send_viewport_cmd(ViewportCommand::InnerSize(min.max(viewport)));
                    }
                }

                if let Some(event) = out.event {
                    self.publish(ctx, event);
                }
            });

        // The radial sweep animates between input events.
        ctx.request_repaint();
    }
}

impl PickerWindow {
    fn draw_header(&mut self, ui: &mut egui::Ui, viewport: egui::Vec2) {
        let margin = self.session.margin();
        let more = self.session.more_button_rect(viewport);
        let bar = Rect::from_min_max(
            pos2(margin, margin),
            pos2(more.left() - 12.0, margin + 30.0),
        );
        let response = ui.put(
            bar,
            TextEdit::singleline(&mut self.url)
                .hint_text("Link to open")
                .font(FontId::proportional(14.0)),
        );
        self.url_focused = response.has_focus();
    }

    fn draw_frame_output(&mut self, ui: &egui::Ui, out: &FrameOutput, palette: &Palette) {
        for seg in &out.connections {
            let (width, color) = if seg.emphasized {
                (2.5, palette.accent)
            } else {
                (1.0, palette.connection)
            };
            ui.painter()
                .line_segment([seg.from, seg.to], Stroke::new(width, color));
        }

        for card in &out.group_cards {
            self.draw_group_card(ui, card, palette);
        }
        for card in &out.cards {
            self.draw_profile_card(ui, card, palette);
        }
    }

    fn draw_profile_card(&mut self, ui: &egui::Ui, card: &Card, palette: &Palette) {
        let Some(item) = card.item else { return };
        let Some(profile) = self.session.catalog().profile(card.group, item) else {
            return;
        };
        let profile = profile.clone();
        let browser_icon = self
            .session
            .catalog()
            .browser(card.group)
            .and_then(|b| b.icon.clone());

        let tokens = style_for(card.state, palette);
        let painter = ui.painter();
        let rounding = CornerRadius::same(tokens.rounding as u8);

        painter.rect_filled(
            card.rect.translate(vec2(0.0, 4.0)),
            rounding,
            Color32::from_black_alpha(tokens.shadow_alpha),
        );
        painter.rect_filled(card.rect, rounding, tokens.fill);
        painter.rect_stroke(
            card.rect,
            rounding,
            Stroke::new(tokens.border_width, tokens.border),
            StrokeKind::Inside,
        );

        self.draw_icon(ui, card.rect, &profile, browser_icon.as_deref(), palette);

        if let Some(digit) = card.shortcut {
            draw_shortcut_badge(ui.painter(), card.rect, digit, palette);
        }

        painter.text(
            pos2(card.rect.center().x, card.rect.bottom() + 14.0),
            Align2::CENTER_CENTER,
            truncate_name(&profile.name),
            FontId::proportional(13.0),
            tokens.text,
        );
    }

    fn draw_group_card(&mut self, ui: &egui::Ui, card: &Card, palette: &Palette) {
        let Some(browser) = self.session.catalog().browser(card.group) else {
            return;
        };
        let name = browser.name.clone();
        let icon = browser.icon.clone();

        let tokens = style_for(card.state, palette);
        let rounding = CornerRadius::same(12);
        let painter = ui.painter();
        painter.rect_filled(card.rect, rounding, tokens.fill);
        painter.rect_stroke(
            card.rect,
            rounding,
            Stroke::new(tokens.border_width, tokens.border),
            StrokeKind::Inside,
        );

        let icon_rect = card.rect.shrink(10.0);
        let texture = icon
            .as_deref()
            .and_then(|n| self.icons.get(ui.ctx(), n, ICON_SIZE));
        let painter = ui.painter();
        match texture {
            Some(tex) => {
                painter.image(
                    tex.id(),
                    icon_rect,
                    Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                    Color32::WHITE,
                );
            }
            None => draw_letter_placeholder(painter, icon_rect, &name, palette),
        }

        if let Some(digit) = card.shortcut {
            draw_shortcut_badge(ui.painter(), card.rect, digit, palette);
        }

        ui.painter().text(
            pos2(card.rect.center().x, card.rect.bottom() + 12.0),
            Align2::CENTER_CENTER,
            truncate_name(&name),
            FontId::proportional(12.0),
            tokens.text,
        );
    }

    fn draw_icon(
        &mut self,
        ui: &egui::Ui,
        rect: Rect,
        profile: &Profile,
        browser_icon: Option<&str>,
        palette: &Palette,
    ) {
        let icon_edge = rect.width().min(rect.height()) * 0.55;
        let icon_rect = Rect::from_center_size(
            pos2(rect.center().x, rect.top() + rect.height() * 0.42),
            vec2(icon_edge, icon_edge),
        );
        // Private profiles show the incognito mask, never the icon.
        if profile.incognito {
            draw_incognito_mask(ui.painter(), icon_rect);
            return;
        }
        let texture = profile
            .icon
            .as_deref()
            .or(browser_icon)
            .and_then(|n| self.icons.get(ui.ctx(), n, ICON_SIZE));
        let painter = ui.painter();
        match texture {
            Some(tex) => {
                painter.image(
                    tex.id(),
                    icon_rect,
                    Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                    Color32::WHITE,
                );
            }
            None => draw_letter_placeholder(painter, icon_rect, &profile.name, palette),
        }
    }

    fn draw_radial(
        &mut self,
        ui: &egui::Ui,
        viewport: egui::Vec2,
        pointer: Option<Pos2>,
        palette: &Palette,
    ) {
        let owner = self.session.more_button_rect(viewport);
        let painter = ui.painter();

        let owner_hovered = pointer.is_some_and(|p| owner.contains(p));
        painter.circle_filled(
            owner.center(),
            owner.width() / 2.0,
            if owner_hovered || self.session.radial().is_open() {
                palette.card_hover
            } else {
                palette.card_idle
            },
        );
        painter.text(
            owner.center(),
            Align2::CENTER_CENTER,
            "+",
            FontId::proportional(18.0),
            palette.text,
        );

        if !self.session.radial().is_open() {
            return;
        }

        let item_radius = self.session.radial().item_radius();
        let hovered_id = pointer.and_then(|p| self.session.radial().hit_test(p));
        for item in self.session.radial().items() {
            let hovered = hovered_id == Some(item.id.as_str());
            painter.circle_filled(
                item.pos,
                item_radius,
                if hovered {
                    palette.card_active
                } else {
                    palette.card_hover
                },
            );
            painter.circle_stroke(
                item.pos,
                item_radius,
                Stroke::new(1.0, palette.border_hover),
            );
            painter.text(
                item.pos,
                Align2::CENTER_CENTER,
                item.glyph.to_string(),
                FontId::proportional(13.0),
                palette.text,
            );
            if hovered {
                painter.text(
                    item.pos + vec2(0.0, item_radius + 12.0),
                    Align2::CENTER_CENTER,
                    &item.tooltip,
                    FontId::proportional(11.0),
                    palette.text_dim,
                );
            }
        }
    }
}

/// Four-corner gradient fill behind the whole window.
fn paint_background(ui: &egui::Ui, rect: Rect, palette: &Palette) {
    let mut mesh = Mesh::default();
    mesh.colored_vertex(rect.left_top(), palette.background[0]);
    mesh.colored_vertex(rect.right_top(), palette.background[1]);
    mesh.colored_vertex(rect.right_bottom(), palette.background[2]);
    mesh.colored_vertex(rect.left_bottom(), palette.background[3]);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    ui.painter().add(Shape::mesh(mesh));
}

/// Accent circle with the first letter, used when no icon resolves.
fn draw_letter_placeholder(painter: &egui::Painter, rect: Rect, name: &str, palette: &Palette) {
    let radius = rect.width().min(rect.height()) / 2.0;
    painter.circle_filled(rect.center(), radius, palette.accent);
    let initial = name.chars().next().unwrap_or('?').to_uppercase().to_string();
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        initial,
        FontId::proportional(radius),
        Color32::WHITE,
    );
}

/// Domino-mask glyph for private/incognito profiles, drawn from
/// primitives so no icon theme is involved.
fn draw_incognito_mask(painter: &egui::Painter, rect: Rect) {
    let center = rect.center();
    let radius = rect.width().min(rect.height()) / 2.0;
    painter.circle_filled(center, radius, Color32::from_rgb(40, 40, 55));
    let eye = radius * 0.22;
    let spread = radius * 0.38;
    painter.circle_filled(center + vec2(-spread, 0.0), eye, Color32::from_gray(210));
    painter.circle_filled(center + vec2(spread, 0.0), eye, Color32::from_gray(210));
    painter.line_segment(
        [
            center + vec2(-radius * 0.8, -eye * 1.6),
            center + vec2(radius * 0.8, -eye * 1.6),
        ],
        Stroke::new(radius * 0.12, Color32::from_gray(210)),
    );
}

/// Numbered keyboard hint in the top-left card corner.
fn draw_shortcut_badge(painter: &egui::Painter, rect: Rect, digit: u8, palette: &Palette) {
    let center = pos2(rect.left() + 13.0, rect.top() + 13.0);
    painter.circle_filled(center, 8.0, Color32::from_black_alpha(130));
    painter.text(
        center,
        Align2::CENTER_CENTER,
        digit.to_string(),
        FontId::proportional(11.0),
        palette.text,
    );
}
