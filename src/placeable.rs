//! Placeable building pieces
//!
//! A [`PlaceableItem`] is a colored square that lives on the placement grid.
//! The building panel spawns one per drag; once it is committed to the
//! [`PlacedItems`] collection it is part of the permanent layout.
//!
//! # Architecture
//!
//! - [`SpriteSet`]: owns every live item (the render set) in stable slots
//! - [`PlacedItems`]: ids of the items committed to the layout, in order
//! - The grid is passed into every call that snaps or draws, items never
//!   hold on to it

use crate::grid::Grid;
use crate::render::Surface;
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};

/// Channel multiplier for the hover/outline shade
const DARKEN_FACTOR: f32 = 0.4;

/// Darkened variant of `color` (0.4 per channel, alpha kept)
pub fn darken(color: Color) -> Color {
    let shade = |channel: u8| (channel as f32 * DARKEN_FACTOR) as u8;
    Color::RGBA(shade(color.r), shade(color.g), shade(color.b), color.a)
}

/// A grid-snapped building piece
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceableItem {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub placed: bool,
    pub hovered: bool,
    base_color: Color,
    color: Color,
}

impl PlaceableItem {
    /// Creates an item centered on the grid point nearest to `position`
    pub fn new(position: Point, size: (u32, u32), grid: &Grid, color: Color) -> Self {
        let mut item = PlaceableItem {
            x: position.x(),
            y: position.y(),
            width: size.0,
            height: size.1,
            placed: false,
            hovered: false,
            base_color: color,
            color,
        };
        item.snap_to_grid(grid, position);
        item
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Color the item is currently drawn with
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn base_color(&self) -> Color {
        self.base_color
    }

    /// Bounding rectangle centered on the item
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.center(), self.width, self.height)
    }

    /// Moves the item's center to the grid point nearest to `point`
    pub fn snap_to_grid(&mut self, grid: &Grid, point: Point) {
        let snapped = grid.snap(point);
        self.x = snapped.x();
        self.y = snapped.y();
    }

    /// Follows a grid pan and/or zoom.
    ///
    /// Translation happens first, then the size is reset to the current
    /// grid spacing, then the center is re-snapped. The zoom factor itself
    /// is not applied to the size, so repeated calls settle on the same
    /// result.
    pub fn update_transform(&mut self, grid: &Grid, offset: Option<(i32, i32)>, zoom: Option<f32>) {
        if let Some((dx, dy)) = offset {
            self.x += dx;
            self.y += dy;
        }
        if zoom.is_some() {
            let (width, height) = grid.spacing();
            self.width = width;
            self.height = height;
        }
        self.snap_to_grid(grid, self.center());
    }

    /// Moves the item to the same cell index after the grid spacing changed
    /// from `old_spacing`, keeping neighbouring items on distinct cells
    pub fn rescale(&mut self, old_spacing: (u32, u32), grid: &Grid) {
        let (offset_x, offset_y) = grid.offset();
        let (spacing_x, spacing_y) = grid.spacing();
        self.x = rescale_axis(self.x, offset_x, old_spacing.0, spacing_x);
        self.y = rescale_axis(self.y, offset_y, old_spacing.1, spacing_y);
    }

    /// Updates hover state and swaps the display color
    pub fn handle_hover(&mut self, pointer: Point) {
        self.hovered = self.rect().contains_point(pointer);
        self.color = if self.hovered {
            darken(self.base_color)
        } else {
            self.base_color
        };
    }

    /// Draws the item, shrunk to leave a 1 px gap to neighbouring cells
    pub fn draw(&self, surface: &mut dyn Surface, grid: &Grid) -> Result<(), String> {
        let (spacing_x, spacing_y) = grid.spacing();
        let width = self.width.min(spacing_x.saturating_sub(2)).max(1);
        let height = self.height.min(spacing_y.saturating_sub(2)).max(1);
        let body = Rect::from_center(self.center(), width, height);

        surface.set_draw_color(self.color);
        surface.fill_rect(body)?;
        surface.set_draw_color(darken(self.color));
        surface.draw_rect(body)
    }
}

fn rescale_axis(p: i32, offset: i32, old: u32, new: u32) -> i32 {
    let cells = ((p - offset) as f64 / old as f64).round() as i32;
    offset + cells * new as i32
}

/// Handle to an item stored in a [`SpriteSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(usize);

/// Every live item, updated and drawn once per frame.
///
/// Slots are never reused, so an [`ItemId`] stays valid (or stays empty)
/// for the lifetime of the set.
#[derive(Debug, Default)]
pub struct SpriteSet {
    slots: Vec<Option<PlaceableItem>>,
}

impl SpriteSet {
    pub fn new() -> Self {
        SpriteSet { slots: Vec::new() }
    }

    pub fn insert(&mut self, item: PlaceableItem) -> ItemId {
        self.slots.push(Some(item));
        ItemId(self.slots.len() - 1)
    }

    pub fn remove(&mut self, id: ItemId) -> Option<PlaceableItem> {
        self.slots.get_mut(id.0).and_then(Option::take)
    }

    pub fn get(&self, id: ItemId) -> Option<&PlaceableItem> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut PlaceableItem> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &PlaceableItem)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|item| (ItemId(index), item)))
    }

    /// Per-frame hover pass
    pub fn update(&mut self, pointer: Point) {
        for item in self.slots.iter_mut().flatten() {
            item.handle_hover(pointer);
        }
    }

    /// Keeps every item on its cell across a spacing change
    pub fn rescale(&mut self, old_spacing: (u32, u32), grid: &Grid) {
        for item in self.slots.iter_mut().flatten() {
            item.rescale(old_spacing, grid);
        }
    }

    /// Applies a grid pan/zoom to every item
    pub fn update_transform(&mut self, grid: &Grid, offset: Option<(i32, i32)>, zoom: Option<f32>) {
        for item in self.slots.iter_mut().flatten() {
            item.update_transform(grid, offset, zoom);
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, grid: &Grid) -> Result<(), String> {
        for item in self.slots.iter().flatten() {
            item.draw(surface, grid)?;
        }
        Ok(())
    }
}

/// Items committed to the permanent layout, in placement order
#[derive(Debug, Default)]
pub struct PlacedItems {
    ids: Vec<ItemId>,
}

impl PlacedItems {
    pub fn new() -> Self {
        PlacedItems { ids: Vec::new() }
    }

    pub fn commit(&mut self, id: ItemId) {
        self.ids.push(id);
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[ItemId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Forgets an item (e.g. after the host demolishes it)
    pub fn release(&mut self, id: ItemId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|placed| *placed != id);
        self.ids.len() != before
    }

    /// First placed item other than `except` centered exactly on `center`.
    ///
    /// Linear scan over the placed items.
    pub fn occupant_at(&self, center: Point, sprites: &SpriteSet, except: Option<ItemId>) -> Option<ItemId> {
        self.ids.iter().copied().find(|&id| {
            Some(id) != except
                && sprites
                    .get(id)
                    .is_some_and(|item| item.placed && item.center() == center)
        })
    }
}
