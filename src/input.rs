//! Discrete input events delivered by the window layer.

/// Keys with a dedicated action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
    Space,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    /// Paints with the selected tool.
    Primary,
    /// Pans while held.
    Secondary,
    /// Pans while held.
    Middle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    KeyPressed(Key),
    CharPressed(char),
    ButtonPressed(MouseButton),
    ButtonReleased(MouseButton),
    /// Pointer position in window pixels, top-left origin.
    PointerMoved { x: i32, y: i32 },
    /// Wheel steps since the last event.
    Scrolled(i32),
    Resized { width: u32, height: u32 },
    CloseRequested,
}

/// Which mouse buttons are currently held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Buttons {
    pub primary: bool,
    pub secondary: bool,
    pub middle: bool,
}

impl Buttons {
    pub fn set(&mut self, button: MouseButton, held: bool) {
        match button {
            MouseButton::Primary => self.primary = held,
            MouseButton::Secondary => self.secondary = held,
            MouseButton::Middle => self.middle = held,
        }
    }

    pub fn panning(&self) -> bool {
        self.secondary || self.middle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons() {
        let mut buttons = Buttons::default();
        assert!(!buttons.panning());

        buttons.set(MouseButton::Middle, true);
        assert!(buttons.panning());

        buttons.set(MouseButton::Middle, false);
        buttons.set(MouseButton::Primary, true);
        assert!(!buttons.panning());
        assert!(buttons.primary);
    }
}
