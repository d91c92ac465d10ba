//! Input events routed to nodes and overlays.

use crate::geom::Point;

/// Mouse button codes.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Button {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button.
    Middle,
    /// No button (for moves).
    None,
}

/// Mouse action kinds.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Action {
    /// Button press.
    Down,
    /// Button release.
    Up,
    /// Mouse drag with button held.
    Drag,
    /// Mouse moved without button.
    Moved,
}

/// The broad class of an input event.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum EventKind {
    /// Pointer buttons and motion.
    Mouse,
    /// Keyboard input.
    Key,
    /// Wheel or trackpad scrolling.
    Scroll,
}

/// A mouse event in screen coordinates.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct MouseEvent {
    /// Pointer position.
    pub pos: Point,
    /// Button involved.
    pub button: Button,
    /// What happened.
    pub action: Action,
}

impl MouseEvent {
    /// A left-button press at a position.
    pub fn press(x: i32, y: i32) -> Self {
        Self {
            pos: Point::new(x, y),
            button: Button::Left,
            action: Action::Down,
        }
    }

    /// A left-button release at a position.
    pub fn release(x: i32, y: i32) -> Self {
        Self {
            pos: Point::new(x, y),
            button: Button::Left,
            action: Action::Up,
        }
    }

    /// A pointer move to a position.
    pub fn moved(x: i32, y: i32) -> Self {
        Self {
            pos: Point::new(x, y),
            button: Button::None,
            action: Action::Moved,
        }
    }

    /// Is this a button press?
    pub fn is_press(&self) -> bool {
        self.action == Action::Down
    }
}

/// Keyboard modifiers.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Mods {
    /// Shift held.
    pub shift: bool,
    /// Control held.
    pub ctrl: bool,
    /// Alt held.
    pub alt: bool,
}

/// Key identities.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Key {
    /// A printable character.
    Char(char),
    /// Return key.
    Enter,
    /// Escape key.
    Escape,
    /// Tab key.
    Tab,
    /// Backspace key.
    Backspace,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
}

/// A key press.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct KeyEvent {
    /// Key pressed.
    pub key: Key,
    /// Modifiers held.
    pub mods: Mods,
}

impl From<Key> for KeyEvent {
    fn from(key: Key) -> Self {
        Self {
            key,
            mods: Mods::default(),
        }
    }
}

impl From<char> for KeyEvent {
    fn from(c: char) -> Self {
        Key::Char(c).into()
    }
}

/// A wheel or trackpad scroll, in notches.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct ScrollEvent {
    /// Pointer position.
    pub pos: Point,
    /// Horizontal and vertical notches. Positive values scroll towards the
    /// end of the content.
    pub delta: Point,
}

impl ScrollEvent {
    /// A vertical scroll at a position.
    pub fn vertical(x: i32, y: i32, notches: i32) -> Self {
        Self {
            pos: Point::new(x, y),
            delta: Point::new(0, notches),
        }
    }

    /// A horizontal scroll at a position.
    pub fn horizontal(x: i32, y: i32, notches: i32) -> Self {
        Self {
            pos: Point::new(x, y),
            delta: Point::new(notches, 0),
        }
    }
}
