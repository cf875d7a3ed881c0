//! Building Panel
//!
//! A palette of building pieces laid out in a fixed-column grid. Pressing
//! the left button on a swatch spawns a fresh [`PlaceableItem`] that follows
//! the pointer (snapped to the placement grid) until the button is released.
//!
//! # Drag protocol
//!
//! ```text
//! Idle --press on swatch--> Dragging --release--> Placed   (cell free)
//!                                             \-> Rejected (cell taken)
//! ```
//!
//! A rejected piece is removed from the render set and never enters the
//! placement collection. Every drag builds a new instance.

use crate::config::ColorDef;
use crate::grid::Grid;
use crate::input_system::{PointerButton, UiEvent};
use crate::placeable::{darken, ItemId, PlaceableItem, PlacedItems, SpriteSet};
use crate::render::Surface;
use log::debug;
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Builds new pieces for one palette entry
pub trait ItemFactory {
    /// Display name of the entry
    fn label(&self) -> &str;

    /// Base color of the pieces this entry builds
    fn preview_color(&self) -> Color;

    /// Builds a new, unplaced piece centered near `position`
    fn build(&self, position: Point, grid: &Grid) -> PlaceableItem;
}

/// Plain colored building segment, the standard palette entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemTemplate {
    pub label: String,
    pub size: (u32, u32),
    #[serde(with = "ColorDef")]
    pub color: Color,
}

impl ItemTemplate {
    pub fn new(label: &str, size: (u32, u32), color: Color) -> Self {
        ItemTemplate {
            label: label.to_string(),
            size,
            color,
        }
    }
}

impl ItemFactory for ItemTemplate {
    fn label(&self) -> &str {
        &self.label
    }

    fn preview_color(&self) -> Color {
        self.color
    }

    fn build(&self, position: Point, grid: &Grid) -> PlaceableItem {
        PlaceableItem::new(position, self.size, grid, self.color)
    }
}

/// Layout and colors of the panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelStyle {
    /// Top-left corner in screen pixels
    pub position: (i32, i32),

    /// Swatch size in pixels
    pub item_size: (u32, u32),

    /// Gap around and between swatches
    pub padding: u32,

    pub items_per_row: u32,

    #[serde(with = "ColorDef")]
    pub background_color: Color,

    #[serde(with = "ColorDef")]
    pub border_color: Color,
}

impl Default for PanelStyle {
    fn default() -> Self {
        PanelStyle {
            position: (10, 10),
            item_size: (40, 40),
            padding: 10,
            items_per_row: 2,
            background_color: Color::RGB(190, 190, 190),
            border_color: Color::RGB(0, 0, 0),
        }
    }
}

/// Where the panel is in the drag protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging(ItemId),
}

/// Result of the most recent drop
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// Committed to the placement collection
    Placed(ItemId),
    /// Cell was already occupied; the piece was discarded
    Rejected(PlaceableItem),
}

pub struct BuildingPanel {
    style: PanelStyle,
    rect: Rect,
    entries: Vec<Box<dyn ItemFactory>>,
    drag: DragState,
    last_drop: Option<DropOutcome>,
}

impl BuildingPanel {
    /// Creates an empty panel
    pub fn new(style: PanelStyle) -> Self {
        let rect = Rect::new(style.position.0, style.position.1, 1, 1);
        let mut panel = BuildingPanel {
            style,
            rect,
            entries: Vec::new(),
            drag: DragState::Idle,
            last_drop: None,
        };
        panel.recompute_size();
        panel
    }

    /// Appends a palette entry and grows the panel to fit
    pub fn add_entry(&mut self, factory: impl ItemFactory + 'static) {
        debug!("Palette entry added: {}", factory.label());
        self.entries.push(Box::new(factory));
        self.recompute_size();
    }

    /// Resizes the panel for the current entry count
    pub fn recompute_size(&mut self) {
        let (width, height) = panel_size(&self.style, self.entries.len());
        self.rect.set_width(width);
        self.rect.set_height(height);
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn style(&self) -> &PanelStyle {
        &self.style
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn last_drop(&self) -> Option<&DropOutcome> {
        self.last_drop.as_ref()
    }

    /// Swatch rectangle for entry `index`; shared by drawing and hit-testing
    pub fn cell_rect(&self, index: usize) -> Option<Rect> {
        if index >= self.entries.len() {
            return None;
        }

        let columns = self.style.items_per_row.max(1) as usize;
        let (item_w, item_h) = self.style.item_size;
        let padding = self.style.padding as i32;
        let row = (index / columns) as i32;
        let col = (index % columns) as i32;

        let x = self.rect.left() + padding + col * (item_w as i32 + padding);
        let y = self.rect.top() + padding + row * (item_h as i32 + padding);
        Some(Rect::new(x, y, item_w, item_h))
    }

    /// Index of the entry whose swatch contains `point`
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        (0..self.entries.len()).find(|&index| {
            self.cell_rect(index)
                .is_some_and(|cell| cell.contains_point(point))
        })
    }

    /// Feeds one pointer event through the drag protocol.
    ///
    /// Returns `true` when the event was consumed by the panel.
    pub fn handle_event(
        &mut self,
        event: &UiEvent,
        grid: &Grid,
        sprites: &mut SpriteSet,
        placed: &mut PlacedItems,
    ) -> bool {
        match (*event, self.drag) {
            (UiEvent::PointerDown { button: PointerButton::Left, pos }, DragState::Idle) => {
                match self.hit_test(pos) {
                    Some(index) => {
                        let item = self.entries[index].build(pos, grid);
                        let id = sprites.insert(item);
                        debug!("Drag started from palette entry {} ({:?})", index, id);
                        self.drag = DragState::Dragging(id);
                        true
                    }
                    None => self.rect.contains_point(pos),
                }
            }
            (UiEvent::PointerDown { button: PointerButton::Left, .. }, DragState::Dragging(_)) => true,
            (UiEvent::PointerMove { pos }, DragState::Dragging(id)) => {
                if let Some(item) = sprites.get_mut(id) {
                    item.x = pos.x();
                    item.y = pos.y();
                    item.snap_to_grid(grid, pos);
                }
                true
            }
            (UiEvent::PointerUp { button: PointerButton::Left, .. }, DragState::Dragging(id)) => {
                self.drop_dragged(id, grid, sprites, placed);
                true
            }
            _ => false,
        }
    }

    /// Commits the dragged piece, or discards it if its cell is taken
    fn drop_dragged(&mut self, id: ItemId, grid: &Grid, sprites: &mut SpriteSet, placed: &mut PlacedItems) {
        self.drag = DragState::Idle;

        let Some((center, already_placed)) = sprites.get(id).map(|item| (item.center(), item.placed)) else {
            self.last_drop = None;
            return;
        };

        let occupant = placed.occupant_at(center, sprites, Some(id));
        if occupant.is_none() && !already_placed {
            if let Some(item) = sprites.get_mut(id) {
                item.snap_to_grid(grid, center);
                item.placed = true;
            }
            placed.commit(id);
            debug!("Placed {:?} at ({}, {})", id, center.x(), center.y());
            self.last_drop = Some(DropOutcome::Placed(id));
        } else {
            debug!("Drop at ({}, {}) rejected, cell occupied by {:?}", center.x(), center.y(), occupant);
            self.last_drop = sprites.remove(id).map(DropOutcome::Rejected);
        }
    }

    /// Draws the panel background and one darkened swatch per entry
    pub fn draw(&self, surface: &mut dyn Surface) -> Result<(), String> {
        surface.set_draw_color(self.style.background_color);
        surface.fill_rect(self.rect)?;
        surface.set_draw_color(self.style.border_color);
        surface.draw_rect(self.rect)?;

        for (index, entry) in self.entries.iter().enumerate() {
            if let Some(cell) = self.cell_rect(index) {
                surface.set_draw_color(darken(entry.preview_color()));
                surface.fill_rect(cell)?;
            }
        }

        Ok(())
    }
}

/// Panel size for `count` entries:
/// `columns*item_w + (columns+1)*padding` by `rows*item_h + (rows+1)*padding`
pub fn panel_size(style: &PanelStyle, count: usize) -> (u32, u32) {
    let columns = style.items_per_row.max(1);
    let rows = (count as u32).div_ceil(columns);
    let (item_w, item_h) = style.item_size;
    let width = columns * item_w + (columns + 1) * style.padding;
    let height = rows * item_h + (rows + 1) * style.padding;
    (width, height)
}
