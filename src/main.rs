use grid_builder::building_panel::BuildingPanel;
use grid_builder::config::UiConfig;
use grid_builder::grid::Grid;
use grid_builder::gui::{ContextMenu, MenuSelection};
use grid_builder::input_system::{HostAction, InputSystem};
use grid_builder::placeable::{PlacedItems, SpriteSet};
use grid_builder::render::Surface;
use log::{info, warn};
use sdl2::pixels::Color;
use sdl2::rect::Rect;

const BACKGROUND_COLOR: Color = Color::RGB(40, 40, 40);
const GRID_LINE_COLOR: Color = Color::RGB(70, 70, 70);

const GAME_STATE: &str = "Game State";
const BUILDING_OPTIONS: &str = "Building Options";
const SPEED_PREFIX: &str = "Game Speed +";

/// Demo state the menu's "Game State" section drives
struct GameState {
    running: bool,
    paused: bool,
    speed: u32,
}

impl GameState {
    fn new() -> Self {
        GameState {
            running: true,
            paused: false,
            speed: 1,
        }
    }
}

/// Applies one menu selection to the demo
fn apply_selection(
    selection: &MenuSelection,
    state: &mut GameState,
    menu: &mut ContextMenu,
    sprites: &mut SpriteSet,
    placed: &mut PlacedItems,
) -> Result<(), String> {
    match (selection.section.as_str(), selection.label.as_str()) {
        (GAME_STATE, "Exit") => state.running = false,
        (GAME_STATE, "Stop/Play") => {
            state.paused = !state.paused;
            info!("Game {}", if state.paused { "stopped" } else { "playing" });
        }
        (GAME_STATE, label) if label.starts_with(SPEED_PREFIX) => {
            state.speed = state.speed % 5 + 1;
            let new_label = format!("{}{}", SPEED_PREFIX, state.speed);
            menu.rename_option(GAME_STATE, label, &new_label)?;
            info!("Game speed set to {}", state.speed);
        }
        (BUILDING_OPTIONS, "Remove") => {
            // Acts on the piece under the right-click that opened the menu
            let anchor = menu.anchor();
            let target = placed.ids().iter().copied().find(|&id| {
                sprites
                    .get(id)
                    .is_some_and(|item| item.rect().contains_point(anchor))
            });
            match target {
                Some(id) => {
                    placed.release(id);
                    sprites.remove(id);
                    info!("Removed piece at ({}, {})", anchor.x(), anchor.y());
                }
                None => info!("Nothing to remove at ({}, {})", anchor.x(), anchor.y()),
            }
            menu.hide();
        }
        (section, label) => info!("Menu: {} / {}", section, label),
    }
    Ok(())
}

fn main() -> Result<(), String> {
    env_logger::init();

    let config = UiConfig::load_or_default(UiConfig::default_path())?;
    let (screen_w, screen_h) = config.screen;

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;

    let window = video_subsystem
        .window("Grid Builder", screen_w, screen_h)
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;

    let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
    canvas.set_logical_size(screen_w, screen_h).map_err(|e| e.to_string())?;
    let mut event_pump = sdl_context.event_pump()?;

    let mut grid = Grid::from_config(&config.grid)?;

    let mut panel = BuildingPanel::new(config.panel.clone());
    for template in config.palette.iter().cloned() {
        panel.add_entry(template);
    }
    info!("Building panel ready with {} entries", panel.len());

    let mut menu = ContextMenu::new(config.menu.clone(), config.sections.clone(), config.screen);
    if let Err(e) = menu.set_locked(GAME_STATE, "Settings", true) {
        warn!("Could not lock Settings: {}", e);
    }

    let mut sprites = SpriteSet::new();
    let mut placed = PlacedItems::new();
    let mut input = InputSystem::new();
    let mut state = GameState::new();

    println!("Controls:");
    println!("Left Drag - Drag a piece from the panel onto the grid");
    println!("Right Click - Open context menu (Remove acts on the piece under it)");
    println!("Arrow Keys - Pan grid");
    println!("+ / - - Zoom grid");
    println!("ESC - Close menu / Quit");

    'running: loop {
        input.update_context(menu.is_visible());

        for action in input.poll_events(&mut event_pump) {
            match action {
                HostAction::Quit => break 'running,
                HostAction::CloseMenu => menu.hide(),
                HostAction::Pan(dx, dy) => {
                    grid.pan(dx, dy);
                    sprites.update_transform(&grid, Some((dx, dy)), None);
                }
                HostAction::Zoom(factor) => {
                    let old_spacing = grid.spacing();
                    grid.zoom(factor);
                    sprites.rescale(old_spacing, &grid);
                    sprites.update_transform(&grid, None, Some(factor));
                }
                HostAction::Pointer(event) => {
                    // Menu sits on top, so it sees events first
                    if !menu.handle_event(&event) {
                        panel.handle_event(&event, &grid, &mut sprites, &mut placed);
                    }
                    sprites.update(event.position());
                }
            }
        }

        for selection in menu.take_selections() {
            apply_selection(&selection, &mut state, &mut menu, &mut sprites, &mut placed)?;
        }
        if !state.running {
            break 'running;
        }

        canvas.set_draw_color(BACKGROUND_COLOR);
        canvas.clear();

        let (view_w, view_h) = Surface::size(&canvas);
        grid.draw(&mut canvas, Rect::new(0, 0, view_w, view_h), GRID_LINE_COLOR)?;
        sprites.draw(&mut canvas, &grid)?;
        panel.draw(&mut canvas)?;
        menu.draw(&mut canvas)?;

        canvas.present();
        std::thread::sleep(std::time::Duration::new(0, 1_000_000_000u32 / 60));
    }

    info!("{} pieces placed, exiting", placed.len());
    Ok(())
}
