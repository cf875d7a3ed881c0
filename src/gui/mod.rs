//! Screen-Space GUI System
//!
//! Floating UI elements drawn on top of the grid and the building panel.
//!
//! # Architecture
//!
//! Screen-space GUI elements:
//! - Use screen coordinates (pixels from the window's top-left corner)
//! - Render on the top layer, after the grid, sprites and panel
//! - Are stateful (the context menu can be shown/hidden and queues selections)
//! - Use procedural rendering through [`crate::render::Surface`]
//!
//! # Available Components
//!
//! - [`ContextMenu`] - Right-click menu with titled sections
//! - [`MenuWidget`] - One header or option row of the menu
//!
//! # Example Usage
//!
//! ```ignore
//! use grid_builder::gui::{default_sections, ContextMenu, MenuStyle};
//!
//! // Create menu once
//! let mut menu = ContextMenu::new(MenuStyle::default(), default_sections(), (800, 600));
//!
//! // Handle input
//! let consumed = menu.handle_event(&event);
//!
//! // Render
//! menu.draw(&mut canvas)?;
//!
//! // Check selections
//! for selection in menu.take_selections() {
//!     match selection.label.as_str() {
//!         "Exit" => { /* ... */ }
//!         _ => { /* ... */ }
//!     }
//! }
//! ```

pub mod context_menu;
pub mod menu_widget;

pub use context_menu::{default_sections, ContextMenu, MenuOptionConfig, MenuSection, MenuSelection, MenuStyle};
pub use menu_widget::{LabeledRect, MenuWidget, OptionState, WidgetKind};
