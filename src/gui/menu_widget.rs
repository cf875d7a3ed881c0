//! Menu Widgets
//!
//! Headers and options share one data structure, a [`LabeledRect`]; what a
//! widget can do is decided by its [`WidgetKind`]. Headers are static bars,
//! options track hover/click/lock state and report left-clicks.

use crate::error::UiError;
use crate::gui::context_menu::MenuStyle;
use crate::input_system::{PointerButton, UiEvent};
use crate::render::Surface;
use crate::text::{draw_text, text_height, text_width};
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};

/// Gap kept between an overflowing label and the widget edge
const LABEL_INSET: i32 = 2;

/// A rectangle with a single line of bitmap text
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledRect {
    pub rect: Rect,
    pub text: String,
    pub text_scale: u32,
    /// Top-left corner of the text, recomputed on every refresh
    text_origin: Point,
}

impl LabeledRect {
    pub fn new(rect: Rect, text: &str, text_scale: u32) -> Self {
        let mut label = LabeledRect {
            rect,
            text: text.to_string(),
            text_scale,
            text_origin: rect.top_left(),
        };
        // Overflow is reported again by refresh()
        let _ = label.layout_text();
        label
    }

    pub fn text_origin(&self) -> Point {
        self.text_origin
    }

    /// Centers the text in the rectangle.
    ///
    /// A label wider than the rectangle is left-aligned at the inset instead
    /// and reported as `LabelOverflow`.
    fn layout_text(&mut self) -> Result<(), UiError> {
        let needed = text_width(&self.text, self.text_scale);
        let available = self.rect.width();
        let y = self.rect.y() + (self.rect.height() as i32 - text_height(self.text_scale) as i32) / 2;

        if needed > available {
            self.text_origin = Point::new(self.rect.x() + LABEL_INSET, y);
            return Err(UiError::LabelOverflow {
                label: self.text.clone(),
                needed,
                available,
            });
        }

        let x = self.rect.x() + (available - needed) as i32 / 2;
        self.text_origin = Point::new(x, y);
        Ok(())
    }
}

/// Visual and interaction state of a clickable option
#[derive(Debug, Clone, PartialEq)]
pub struct OptionState {
    pub section: String,
    pub hover: bool,
    pub clicked: bool,
    pub locked: bool,
    pub active_color: Color,
    pub inactive_color: Color,
    pub locked_color: Color,
    pub locked_text_color: Color,
    pub hover_border_color: Color,
    color: Color,
    text_color: Color,
    base_text_color: Color,
}

impl OptionState {
    /// Current background color
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn text_color(&self) -> Color {
        self.text_color
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetKind {
    /// Non-interactive section title bar
    Header { background: Color, text_color: Color },
    /// Clickable entry
    Option(OptionState),
}

/// One row of the context menu
#[derive(Debug, Clone, PartialEq)]
pub struct MenuWidget {
    pub label: LabeledRect,
    pub kind: WidgetKind,
}

impl MenuWidget {
    pub fn header(rect: Rect, text: &str, style: &MenuStyle) -> Self {
        MenuWidget {
            label: LabeledRect::new(rect, text, style.header_text_scale),
            kind: WidgetKind::Header {
                background: style.header_color,
                text_color: style.header_text_color,
            },
        }
    }

    pub fn option(rect: Rect, text: &str, section: &str, locked: bool, style: &MenuStyle) -> Self {
        let mut widget = MenuWidget {
            label: LabeledRect::new(rect, text, style.text_scale),
            kind: WidgetKind::Option(OptionState {
                section: section.to_string(),
                hover: false,
                clicked: false,
                locked,
                active_color: style.item_active_color,
                inactive_color: style.item_inactive_color,
                locked_color: style.locked_color,
                locked_text_color: style.locked_text_color,
                hover_border_color: style.hover_border_color,
                color: style.item_inactive_color,
                text_color: style.option_text_color,
                base_text_color: style.option_text_color,
            }),
        };
        widget.apply_colors();
        widget
    }

    pub fn text(&self) -> &str {
        &self.label.text
    }

    pub fn rect(&self) -> Rect {
        self.label.rect
    }

    pub fn is_option(&self) -> bool {
        matches!(self.kind, WidgetKind::Option(_))
    }

    pub fn option_state(&self) -> Option<&OptionState> {
        match &self.kind {
            WidgetKind::Option(state) => Some(state),
            WidgetKind::Header { .. } => None,
        }
    }

    pub fn set_locked(&mut self, locked: bool) {
        if let WidgetKind::Option(state) = &mut self.kind {
            state.locked = locked;
        }
        self.apply_colors();
    }

    /// Per-frame state pass: hover, colors, label placement.
    ///
    /// Hover and colors are always updated; only the label layout can fail.
    pub fn refresh(&mut self, pointer: Point) -> Result<(), UiError> {
        if let WidgetKind::Option(state) = &mut self.kind {
            state.hover = self.label.rect.contains_point(pointer);
        }
        self.apply_colors();
        self.label.layout_text()
    }

    /// Returns `true` once per left-press on a hovered, unlocked option
    pub fn handle_event(&mut self, event: &UiEvent) -> bool {
        let WidgetKind::Option(state) = &mut self.kind else {
            return false;
        };
        if state.locked {
            return false;
        }

        match *event {
            UiEvent::PointerDown { button: PointerButton::Left, pos } => {
                state.hover = self.label.rect.contains_point(pos);
                if state.hover {
                    state.clicked = true;
                }
                state.hover
            }
            _ => false,
        }
    }

    fn apply_colors(&mut self) {
        if let WidgetKind::Option(state) = &mut self.kind {
            if state.locked {
                state.color = state.locked_color;
                state.text_color = state.locked_text_color;
            } else {
                state.color = if state.hover {
                    state.active_color
                } else {
                    state.inactive_color
                };
                state.text_color = state.base_text_color;
            }
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) -> Result<(), String> {
        let rect = self.label.rect;
        let origin = self.label.text_origin();

        match &self.kind {
            WidgetKind::Header { background, text_color } => {
                surface.set_draw_color(*background);
                surface.fill_rect(rect)?;
                draw_text(surface, &self.label.text, origin.x(), origin.y(), *text_color, self.label.text_scale)?;
            }
            WidgetKind::Option(state) => {
                surface.set_draw_color(state.color);
                surface.fill_rect(rect)?;
                draw_text(surface, &self.label.text, origin.x(), origin.y(), state.text_color, self.label.text_scale)?;
                if state.hover {
                    surface.set_draw_color(state.hover_border_color);
                    surface.draw_rect(rect)?;
                }
            }
        }

        Ok(())
    }
}
