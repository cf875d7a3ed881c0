//! Context Menu Component
//!
//! A floating, sectioned menu opened with a right-click. Each section is a
//! header followed by its options; the widget list is always rebuilt from the
//! section list, never edited in place.
//!
//! # States
//!
//! - Hidden -> Visible: right-click while hidden, at the click point
//! - Visible -> Hidden: any press outside the menu, or `hide()`
//!
//! Presses inside the menu go to the options. A press on an unlocked option
//! queues a [`MenuSelection`] which the host drains with
//! [`ContextMenu::take_selections`].

use crate::config::ColorDef;
use crate::error::UiError;
use crate::gui::menu_widget::MenuWidget;
use crate::input_system::{PointerButton, UiEvent};
use crate::render::Surface;
use log::{debug, info};
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Layout constants and colors for the context menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuStyle {
    /// Inner padding, also the gap kept to the screen edge when clamping
    pub padding: u32,

    /// Option row height
    pub item_height: u32,

    /// Section header height
    pub header_height: u32,

    pub min_width: u32,

    /// Width budget per label character when sizing the menu
    pub per_char_width: u32,

    /// Bitmap font scale for options
    pub text_scale: u32,

    /// Bitmap font scale for headers
    pub header_text_scale: u32,

    /// Drop shadow offset in pixels
    pub shadow_offset: i32,

    #[serde(with = "ColorDef")]
    pub background_color: Color,
    #[serde(with = "ColorDef")]
    pub border_color: Color,
    #[serde(with = "ColorDef")]
    pub shadow_color: Color,
    #[serde(with = "ColorDef")]
    pub header_color: Color,
    #[serde(with = "ColorDef")]
    pub header_text_color: Color,
    #[serde(with = "ColorDef")]
    pub item_active_color: Color,
    #[serde(with = "ColorDef")]
    pub item_inactive_color: Color,
    #[serde(with = "ColorDef")]
    pub option_text_color: Color,
    #[serde(with = "ColorDef")]
    pub locked_color: Color,
    #[serde(with = "ColorDef")]
    pub locked_text_color: Color,
    #[serde(with = "ColorDef")]
    pub hover_border_color: Color,
}

impl Default for MenuStyle {
    fn default() -> Self {
        MenuStyle {
            padding: 9,
            item_height: 28,
            header_height: 32,
            min_width: 180,
            per_char_width: 10,
            text_scale: 1,
            header_text_scale: 1,
            shadow_offset: 3,
            background_color: Color::RGB(169, 169, 169),
            border_color: Color::RGB(153, 153, 153),
            shadow_color: Color::RGB(77, 77, 77),
            header_color: Color::RGB(0, 0, 0),
            header_text_color: Color::RGB(255, 255, 255),
            item_active_color: Color::RGB(16, 78, 139),
            item_inactive_color: Color::RGB(229, 229, 229),
            option_text_color: Color::RGB(0, 0, 0),
            locked_color: Color::RGB(204, 204, 204),
            locked_text_color: Color::RGB(127, 127, 127),
            hover_border_color: Color::RGB(255, 255, 255),
        }
    }
}

/// One option as declared in a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuOptionConfig {
    pub label: String,
    #[serde(default)]
    pub locked: bool,
}

impl MenuOptionConfig {
    pub fn new(label: &str) -> Self {
        MenuOptionConfig {
            label: label.to_string(),
            locked: false,
        }
    }
}

/// A titled group of options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSection {
    pub title: String,
    pub options: Vec<MenuOptionConfig>,
}

impl MenuSection {
    pub fn new(title: &str, labels: &[&str]) -> Self {
        MenuSection {
            title: title.to_string(),
            options: labels.iter().map(|label| MenuOptionConfig::new(label)).collect(),
        }
    }
}

/// Game State / Building Options / Service Options
pub fn default_sections() -> Vec<MenuSection> {
    vec![
        MenuSection::new("Game State", &["Stop/Play", "Game Speed +1", "Settings", "Exit"]),
        MenuSection::new(
            "Building Options",
            &["Remove", "Rename", "Check Price", "Move", "Change Color"],
        ),
        MenuSection::new("Service Options", &["Open/Close"]),
    ]
}

/// An option the user picked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSelection {
    pub section: String,
    pub label: String,
}

pub struct ContextMenu {
    style: MenuStyle,
    position: Point,
    anchor: Point,
    width: u32,
    height: u32,
    sections: Vec<MenuSection>,
    items: Vec<MenuWidget>,
    visible: bool,
    screen: (u32, u32),
    pointer: Point,
    selections: Vec<MenuSelection>,
}

impl ContextMenu {
    /// Creates a hidden menu for a screen of the given size
    pub fn new(style: MenuStyle, sections: Vec<MenuSection>, screen: (u32, u32)) -> Self {
        let mut menu = ContextMenu {
            style,
            position: Point::new(0, 0),
            anchor: Point::new(0, 0),
            width: 0,
            height: 0,
            sections,
            items: Vec::new(),
            visible: false,
            screen,
            pointer: Point::new(0, 0),
            selections: Vec::new(),
        };
        menu.update_layout();
        menu
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Point the menu was last opened at, before clamping
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position.x(), self.position.y(), self.width, self.height)
    }

    pub fn sections(&self) -> &[MenuSection] {
        &self.sections
    }

    /// Headers and options in draw order
    pub fn items(&self) -> &[MenuWidget] {
        &self.items
    }

    pub fn style(&self) -> &MenuStyle {
        &self.style
    }

    pub fn set_screen_size(&mut self, width: u32, height: u32) {
        self.screen = (width, height);
    }

    /// Menu size for the current sections:
    /// widest label vs. `min_width`, stacked headers and rows, plus padding
    fn measure(&self) -> (u32, u32) {
        let style = &self.style;
        let longest = self
            .sections
            .iter()
            .flat_map(|section| {
                std::iter::once(section.title.as_str())
                    .chain(section.options.iter().map(|option| option.label.as_str()))
            })
            .map(|text| text.chars().count() as u32)
            .max()
            .unwrap_or(0);

        let width = style
            .min_width
            .max(longest * style.per_char_width + style.padding * 2);
        let height = self
            .sections
            .iter()
            .map(|section| section.options.len() as u32 * style.item_height + style.header_height)
            .sum::<u32>()
            + style.padding * 2;

        (width, height)
    }

    /// Rebuilds size and the widget list from the sections and position
    fn update_layout(&mut self) {
        let (width, height) = self.measure();
        self.width = width;
        self.height = height;

        let padding = self.style.padding as i32;
        let inner_width = width.saturating_sub(self.style.padding * 2).max(1);
        let x = self.position.x() + padding;
        let mut y = self.position.y() + padding;

        let mut items = Vec::with_capacity(
            self.sections.iter().map(|section| section.options.len() + 1).sum(),
        );
        for section in &self.sections {
            let header_rect = Rect::new(x, y, inner_width, self.style.header_height);
            items.push(MenuWidget::header(header_rect, &section.title, &self.style));
            y += self.style.header_height as i32;

            for option in &section.options {
                let rect = Rect::new(x, y, inner_width, self.style.item_height);
                items.push(MenuWidget::option(rect, &option.label, &section.title, option.locked, &self.style));
                y += self.style.item_height as i32;
            }
        }
        self.items = items;
    }

    /// Opens the menu at `at`, pulled back inside the screen if it would
    /// overflow the right or bottom edge
    pub fn show(&mut self, at: Point) {
        let (width, height) = self.measure();
        let (screen_w, screen_h) = (self.screen.0 as i32, self.screen.1 as i32);
        let padding = self.style.padding as i32;

        let mut x = at.x();
        let mut y = at.y();
        if x + width as i32 > screen_w {
            x = (screen_w - width as i32 - padding).max(0);
        }
        if y + height as i32 > screen_h {
            y = (screen_h - height as i32 - padding).max(0);
        }

        self.anchor = at;
        self.position = Point::new(x, y);
        self.update_layout();
        self.visible = true;
        info!("Context menu opened at ({}, {})", x, y);
    }

    pub fn hide(&mut self) {
        if self.visible {
            info!("Context menu closed");
        }
        self.visible = false;
    }

    /// Replaces all sections
    pub fn set_sections(&mut self, sections: Vec<MenuSection>) {
        self.sections = sections;
        self.update_layout();
    }

    /// Locks or unlocks one option
    pub fn set_locked(&mut self, section: &str, label: &str, locked: bool) -> Result<(), UiError> {
        self.find_option(section, label)?.locked = locked;
        self.update_layout();
        Ok(())
    }

    /// Changes an option's label (e.g. a speed counter)
    pub fn rename_option(&mut self, section: &str, label: &str, new_label: &str) -> Result<(), UiError> {
        self.find_option(section, label)?.label = new_label.to_string();
        self.update_layout();
        Ok(())
    }

    fn find_option(&mut self, section: &str, label: &str) -> Result<&mut MenuOptionConfig, UiError> {
        self.sections
            .iter_mut()
            .filter(|s| s.title == section)
            .flat_map(|s| s.options.iter_mut())
            .find(|option| option.label == label)
            .ok_or_else(|| UiError::UnknownOption {
                section: section.to_string(),
                label: label.to_string(),
            })
    }

    /// Selections made since the last call
    pub fn take_selections(&mut self) -> Vec<MenuSelection> {
        std::mem::take(&mut self.selections)
    }

    /// Handles one pointer event; returns `true` when the menu consumed it
    pub fn handle_event(&mut self, event: &UiEvent) -> bool {
        self.pointer = event.position();

        if !self.visible {
            if let UiEvent::PointerDown { button: PointerButton::Right, pos } = *event {
                self.show(pos);
                return true;
            }
            return false;
        }

        match *event {
            UiEvent::PointerDown { pos, .. } => {
                if !self.rect().contains_point(pos) {
                    self.hide();
                    return true;
                }

                for widget in &mut self.items {
                    if widget.handle_event(event) {
                        if let Some(state) = widget.option_state() {
                            debug!("Menu option selected: {} / {}", state.section, widget.text());
                            self.selections.push(MenuSelection {
                                section: state.section.clone(),
                                label: widget.text().to_string(),
                            });
                        }
                    }
                }
                true
            }
            // Releases pass through so a drag started elsewhere can finish
            UiEvent::PointerUp { .. } | UiEvent::PointerMove { .. } => false,
        }
    }

    /// Draws the menu when visible.
    ///
    /// Each widget gets a state refresh first; a failed refresh is logged and
    /// the widget is drawn with whatever state it has.
    pub fn draw(&mut self, surface: &mut dyn Surface) -> Result<(), String> {
        if !self.visible {
            return Ok(());
        }

        let rect = self.rect();
        let mut shadow = rect;
        shadow.offset(self.style.shadow_offset, self.style.shadow_offset);
        surface.set_draw_color(self.style.shadow_color);
        surface.fill_rect(shadow)?;

        surface.set_draw_color(self.style.background_color);
        surface.fill_rect(rect)?;
        surface.set_draw_color(self.style.border_color);
        surface.draw_rect(rect)?;

        let pointer = self.pointer;
        for widget in &mut self.items {
            if let Err(e) = widget.refresh(pointer) {
                debug!("Menu widget refresh failed: {}", e);
            }
            widget.draw(surface)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::RecordingSurface;

    fn menu() -> ContextMenu {
        ContextMenu::new(MenuStyle::default(), default_sections(), (800, 600))
    }

    fn press(button: PointerButton, x: i32, y: i32) -> UiEvent {
        UiEvent::PointerDown { button, pos: Point::new(x, y) }
    }

    fn widget_center(menu: &ContextMenu, label: &str) -> Point {
        menu.items()
            .iter()
            .find(|widget| widget.text() == label)
            .map(|widget| widget.rect().center())
            .unwrap()
    }

    #[test]
    fn test_default_layout_size() {
        let menu = menu();
        // "Building Options" is 16 chars: 16*10 + 18 = 178 < 180
        assert_eq!(menu.size(), (180, 10 * 28 + 3 * 32 + 18));
        assert_eq!(menu.items().len(), 13);
        assert!(!menu.is_visible());
    }

    #[test]
    fn test_long_label_widens_menu() {
        let mut menu = menu();
        menu.set_sections(vec![MenuSection::new("A", &["A very long option label here"])]);
        // 29 chars
        assert_eq!(menu.size().0, 29 * 10 + 18);
        assert_eq!(menu.size().1, 28 + 32 + 18);
    }

    #[test]
    fn test_items_follow_section_order() {
        let menu = menu();
        let texts: Vec<&str> = menu.items().iter().map(|w| w.text()).collect();
        assert_eq!(
            texts,
            vec![
                "Game State", "Stop/Play", "Game Speed +1", "Settings", "Exit",
                "Building Options", "Remove", "Rename", "Check Price", "Move", "Change Color",
                "Service Options", "Open/Close",
            ]
        );
        assert!(!menu.items()[0].is_option());
        assert!(menu.items()[1].is_option());
    }

    #[test]
    fn test_widgets_stack_from_padding() {
        let mut menu = menu();
        menu.show(Point::new(50, 50));
        let items = menu.items();
        assert_eq!(items[0].rect(), Rect::new(59, 59, 162, 32));
        assert_eq!(items[1].rect(), Rect::new(59, 91, 162, 28));
        assert_eq!(items[5].rect(), Rect::new(59, 91 + 4 * 28, 162, 32));
        let last = items.last().unwrap().rect();
        assert_eq!(last.bottom(), menu.rect().bottom() - 9);
    }

    #[test]
    fn test_right_click_opens_unclamped() {
        let mut menu = menu();
        assert!(menu.handle_event(&press(PointerButton::Right, 50, 50)));
        assert!(menu.is_visible());
        assert_eq!(menu.position(), Point::new(50, 50));
    }

    #[test]
    fn test_left_click_does_not_open() {
        let mut menu = menu();
        assert!(!menu.handle_event(&press(PointerButton::Left, 50, 50)));
        assert!(!menu.is_visible());
    }

    #[test]
    fn test_right_click_near_corner_is_clamped() {
        let mut menu = menu();
        menu.handle_event(&press(PointerButton::Right, 790, 590));
        let (w, h) = menu.size();
        assert_eq!(menu.position(), Point::new(800 - w as i32 - 9, 600 - h as i32 - 9));
        assert_eq!(menu.anchor(), Point::new(790, 590));
    }

    #[test]
    fn test_clamped_menu_fits_screen() {
        for (sw, sh) in [(800, 600), (1024, 768), (1920, 1080)] {
            let mut menu = ContextMenu::new(MenuStyle::default(), default_sections(), (sw, sh));
            menu.show(Point::new(sw as i32 - 1, sh as i32 - 1));
            let rect = menu.rect();
            assert!(rect.right() <= sw as i32, "{}x{}", sw, sh);
            assert!(rect.bottom() <= sh as i32, "{}x{}", sw, sh);
        }
    }

    #[test]
    fn test_clamp_only_affects_overflowing_axis() {
        let mut menu = menu();
        menu.show(Point::new(700, 20));
        assert_eq!(menu.position(), Point::new(800 - 180 - 9, 20));
    }

    #[test]
    fn test_click_outside_hides() {
        let mut menu = menu();
        menu.show(Point::new(50, 50));
        assert!(menu.handle_event(&press(PointerButton::Left, 600, 500)));
        assert!(!menu.is_visible());
    }

    #[test]
    fn test_right_click_outside_hides_without_reopening() {
        let mut menu = menu();
        menu.show(Point::new(50, 50));
        assert!(menu.handle_event(&press(PointerButton::Right, 600, 500)));
        assert!(!menu.is_visible());
    }

    #[test]
    fn test_release_and_move_pass_through() {
        let mut menu = menu();
        menu.show(Point::new(50, 50));
        let inside = Point::new(100, 100);
        assert!(!menu.handle_event(&UiEvent::PointerUp { button: PointerButton::Left, pos: inside }));
        assert!(!menu.handle_event(&UiEvent::PointerMove { pos: inside }));
        assert!(menu.is_visible());
    }

    #[test]
    fn test_option_click_queues_selection() {
        let mut menu = menu();
        menu.show(Point::new(50, 50));
        let exit = widget_center(&menu, "Exit");

        assert!(menu.handle_event(&press(PointerButton::Left, exit.x(), exit.y())));
        assert!(menu.is_visible());
        assert_eq!(
            menu.take_selections(),
            vec![MenuSelection { section: "Game State".to_string(), label: "Exit".to_string() }]
        );
        assert!(menu.take_selections().is_empty());
    }

    #[test]
    fn test_header_click_selects_nothing() {
        let mut menu = menu();
        menu.show(Point::new(50, 50));
        let header = widget_center(&menu, "Service Options");
        assert!(menu.handle_event(&press(PointerButton::Left, header.x(), header.y())));
        assert!(menu.take_selections().is_empty());
    }

    #[test]
    fn test_locked_option_selects_nothing() {
        let mut menu = menu();
        menu.set_locked("Game State", "Settings", true).unwrap();
        menu.show(Point::new(50, 50));
        let settings = widget_center(&menu, "Settings");

        assert!(menu.handle_event(&press(PointerButton::Left, settings.x(), settings.y())));
        assert!(menu.take_selections().is_empty());
    }

    #[test]
    fn test_unknown_option_errors() {
        let mut menu = menu();
        assert!(matches!(
            menu.set_locked("Game State", "Remove", true),
            Err(UiError::UnknownOption { .. })
        ));
        assert!(menu.rename_option("Nope", "Exit", "Quit").is_err());
    }

    #[test]
    fn test_rename_rebuilds_items() {
        let mut menu = menu();
        menu.rename_option("Game State", "Game Speed +1", "Game Speed +2").unwrap();
        assert!(menu.items().iter().any(|w| w.text() == "Game Speed +2"));
        assert!(!menu.items().iter().any(|w| w.text() == "Game Speed +1"));
    }

    #[test]
    fn test_layout_is_pure_function_of_state() {
        let mut a = menu();
        let mut b = menu();
        a.show(Point::new(120, 80));
        a.rename_option("Game State", "Exit", "Quit").unwrap();
        b.rename_option("Game State", "Exit", "Quit").unwrap();
        b.show(Point::new(120, 80));
        assert_eq!(a.items(), b.items());
    }

    #[test]
    fn test_hidden_menu_draws_nothing() {
        let mut menu = menu();
        let mut surface = RecordingSurface::new(800, 600);
        menu.draw(&mut surface).unwrap();
        assert!(surface.ops.is_empty());
    }

    #[test]
    fn test_draw_order_and_hover_from_pointer() {
        let mut menu = menu();
        menu.show(Point::new(50, 50));
        let remove = widget_center(&menu, "Remove");
        menu.handle_event(&UiEvent::PointerMove { pos: remove });

        let mut surface = RecordingSurface::new(800, 600);
        menu.draw(&mut surface).unwrap();

        let fills = surface.fills();
        let style = MenuStyle::default();
        assert_eq!(fills[0], (Rect::new(53, 53, 180, 394), style.shadow_color));
        assert_eq!(fills[1], (menu.rect(), style.background_color));

        let hovered: Vec<&str> = menu
            .items()
            .iter()
            .filter(|w| w.option_state().is_some_and(|s| s.hover))
            .map(|w| w.text())
            .collect();
        assert_eq!(hovered, vec!["Remove"]);
    }

    #[test]
    fn test_every_widget_drawn_even_when_refresh_fails() {
        let style = MenuStyle { per_char_width: 1, min_width: 20, ..Default::default() };
        let mut menu = ContextMenu::new(style.clone(), default_sections(), (800, 600));
        menu.show(Point::new(10, 10));

        let mut surface = RecordingSurface::new(800, 600);
        menu.draw(&mut surface).unwrap();

        let filled: Vec<Rect> = surface.fills().iter().map(|(rect, _)| *rect).collect();
        for widget in menu.items() {
            assert!(filled.contains(&widget.rect()), "{} not drawn", widget.text());
        }
    }
}
