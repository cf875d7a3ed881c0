//! UI chrome for a 2D grid building game: a drag-and-drop building palette,
//! grid-snapped placeable items and a sectioned right-click context menu.
//!
//! Everything is driven by the host's frame loop. Each frame the host feeds
//! pointer events to the components (menu first, then panel), then draws
//! grid, items, panel and menu in that order.

pub mod building_panel;
pub mod config;
pub mod error;
pub mod grid;
pub mod gui;
pub mod input_system;
pub mod placeable;
pub mod render;
pub mod text;
