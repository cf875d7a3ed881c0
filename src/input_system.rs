use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::rect::Point;
use sdl2::EventPump;

/// Pointer button, numbered the way SDL2 numbers them (1 = left, 3 = right)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
    Other(u8),
}

impl From<MouseButton> for PointerButton {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => PointerButton::Left,
            MouseButton::Middle => PointerButton::Middle,
            MouseButton::Right => PointerButton::Right,
            MouseButton::X1 => PointerButton::Other(4),
            MouseButton::X2 => PointerButton::Other(5),
            MouseButton::Unknown => PointerButton::Other(0),
        }
    }
}

/// Per-frame pointer event consumed by the UI components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    PointerDown { button: PointerButton, pos: Point },
    PointerUp { button: PointerButton, pos: Point },
    PointerMove { pos: Point },
}

impl UiEvent {
    pub fn position(&self) -> Point {
        match self {
            UiEvent::PointerDown { pos, .. }
            | UiEvent::PointerUp { pos, .. }
            | UiEvent::PointerMove { pos } => *pos,
        }
    }
}

/// Actions the host loop performs in response to input
///
/// Pointer input is passed through untouched for the UI components; keys
/// become host commands.
#[derive(Debug, Clone, PartialEq)]
pub enum HostAction {
    Pointer(UiEvent),

    // === Grid camera ===
    Pan(i32, i32),
    Zoom(f32),

    // === Menu ===
    CloseMenu,

    // === System ===
    Quit,
}

/// Which keys are live this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    /// Building on the grid - camera keys active
    Building,
    /// Context menu is open - camera keys ignored, Escape closes the menu
    MenuOpen,
}

/// Pixels the grid moves per arrow key press
const PAN_STEP: i32 = 20;
const ZOOM_IN: f32 = 1.25;
const ZOOM_OUT: f32 = 0.8;

/// InputSystem turns SDL2 events into HostActions
///
/// # Architecture
///
/// 1. Host sets the InputContext from UI state (`update_context`)
/// 2. `poll_events` drains the SDL2 event pump
/// 3. Mouse events become `HostAction::Pointer`
/// 4. Keys are filtered by context and mapped to host commands
pub struct InputSystem {
    pub context: InputContext,
}

impl InputSystem {
    pub fn new() -> Self {
        InputSystem {
            context: InputContext::Building,
        }
    }

    /// Switch context based on whether the context menu is showing
    pub fn update_context(&mut self, menu_visible: bool) {
        self.context = if menu_visible {
            InputContext::MenuOpen
        } else {
            InputContext::Building
        };
    }

    /// Drains pending SDL2 events into actions for this frame
    pub fn poll_events(&self, event_pump: &mut EventPump) -> Vec<HostAction> {
        event_pump
            .poll_iter()
            .filter_map(|event| self.translate(&event))
            .collect()
    }

    /// Maps one SDL2 event; unhandled events yield `None`
    pub fn translate(&self, event: &Event) -> Option<HostAction> {
        match *event {
            Event::Quit { .. } => Some(HostAction::Quit),
            Event::KeyDown { keycode: Some(key), .. } => self.translate_key(key),
            Event::MouseButtonDown { mouse_btn, x, y, .. } => Some(HostAction::Pointer(UiEvent::PointerDown {
                button: mouse_btn.into(),
                pos: Point::new(x, y),
            })),
            Event::MouseButtonUp { mouse_btn, x, y, .. } => Some(HostAction::Pointer(UiEvent::PointerUp {
                button: mouse_btn.into(),
                pos: Point::new(x, y),
            })),
            Event::MouseMotion { x, y, .. } => Some(HostAction::Pointer(UiEvent::PointerMove {
                pos: Point::new(x, y),
            })),
            _ => None,
        }
    }

    /// Maps a key press for the current context
    pub fn translate_key(&self, key: Keycode) -> Option<HostAction> {
        match self.context {
            InputContext::Building => match key {
                Keycode::Escape => Some(HostAction::Quit),
                Keycode::Left => Some(HostAction::Pan(-PAN_STEP, 0)),
                Keycode::Right => Some(HostAction::Pan(PAN_STEP, 0)),
                Keycode::Up => Some(HostAction::Pan(0, -PAN_STEP)),
                Keycode::Down => Some(HostAction::Pan(0, PAN_STEP)),
                Keycode::Equals | Keycode::Plus | Keycode::KpPlus => Some(HostAction::Zoom(ZOOM_IN)),
                Keycode::Minus | Keycode::KpMinus => Some(HostAction::Zoom(ZOOM_OUT)),
                _ => None,
            },
            InputContext::MenuOpen => match key {
                Keycode::Escape => Some(HostAction::CloseMenu),
                _ => None,
            },
        }
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}
