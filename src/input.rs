use glam::Vec2;
use parking_lot::RwLock;

/// Identifier for a physical keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Named(NamedKey),
    Character(char),
}

/// Friendly names for the non-character keys the scene binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Escape,
    Space,
    Left,
    Right,
    Up,
    Down,
}

/// Identifier for a mouse button (left button is zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseButton(u8);

impl MouseButton {
    pub const LEFT: Self = Self(0);

    pub fn new(index: u8) -> Self {
        Self(index)
    }
}

/// Direction of a fixed-step first-person move, in world axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDir {
    Forward,
    Back,
    Left,
    Right,
}

impl MoveDir {
    /// World-space (dx, dz) for one movement step of the given size.
    pub fn step(self, size: f32) -> (f32, f32) {
        match self {
            MoveDir::Forward => (0.0, -size),
            MoveDir::Back => (0.0, size),
            MoveDir::Left => (-size, 0.0),
            MoveDir::Right => (size, 0.0),
        }
    }
}

/// Discrete scene mutations a key press can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleCameraMode,
    ToggleDayNight,
    TogglePause,
    Move(MoveDir),
}

/// Fixed key bindings. WASD and the arrow keys are deliberately duplicate
/// movement bindings.
pub fn bound_action(key: KeyCode) -> Option<Action> {
    let action = match key {
        KeyCode::Named(NamedKey::Escape) => Action::Quit,
        KeyCode::Named(NamedKey::Space) => Action::TogglePause,
        KeyCode::Character('C') => Action::ToggleCameraMode,
        KeyCode::Character('L') => Action::ToggleDayNight,
        KeyCode::Character('W') | KeyCode::Named(NamedKey::Up) => Action::Move(MoveDir::Forward),
        KeyCode::Character('S') | KeyCode::Named(NamedKey::Down) => Action::Move(MoveDir::Back),
        KeyCode::Character('A') | KeyCode::Named(NamedKey::Left) => Action::Move(MoveDir::Left),
        KeyCode::Character('D') | KeyCode::Named(NamedKey::Right) => Action::Move(MoveDir::Right),
        _ => return None,
    };
    Some(action)
}

/// Mouse snapshot used to turn cursor motion into look deltas.
///
/// Written only from the event path and read only from the same thread, but
/// kept behind locks so the app can hold it alongside the renderer without
/// borrow gymnastics.
#[derive(Debug, Default)]
pub struct InputState {
    mouse_buttons: RwLock<Vec<MouseButton>>,
    cursor: RwLock<Option<Vec2>>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_mouse_button_down(&self, button: MouseButton) {
        let mut buttons = self.mouse_buttons.write();
        if !buttons.contains(&button) {
            buttons.push(button);
        }
    }

    pub fn set_mouse_button_up(&self, button: MouseButton) {
        self.mouse_buttons.write().retain(|&held| held != button);
        // a released drag must not produce a jump on the next press
        if button == MouseButton::LEFT {
            *self.cursor.write() = None;
        }
    }

    pub fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons.read().contains(&button)
    }

    /// Records the new cursor position. While the left button is held the
    /// delta from the previous position is returned; otherwise `None`.
    pub fn update_cursor(&self, position: Vec2) -> Option<Vec2> {
        let previous = self.cursor.write().replace(position);
        if !self.is_mouse_button_down(MouseButton::LEFT) {
            return None;
        }
        previous.map(|last| position - last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_and_movement_are_bound() {
        assert_eq!(
            bound_action(KeyCode::Character('C')),
            Some(Action::ToggleCameraMode)
        );
        assert_eq!(
            bound_action(KeyCode::Character('L')),
            Some(Action::ToggleDayNight)
        );
        assert_eq!(
            bound_action(KeyCode::Named(NamedKey::Escape)),
            Some(Action::Quit)
        );
        assert_eq!(bound_action(KeyCode::Character('X')), None);
    }

    #[test]
    fn arrows_duplicate_wasd() {
        assert_eq!(
            bound_action(KeyCode::Character('W')),
            bound_action(KeyCode::Named(NamedKey::Up))
        );
        assert_eq!(
            bound_action(KeyCode::Character('A')),
            bound_action(KeyCode::Named(NamedKey::Left))
        );
    }

    #[test]
    fn drag_deltas_require_the_left_button() {
        let input = InputState::new();
        assert_eq!(input.update_cursor(Vec2::new(10.0, 10.0)), None);

        input.set_mouse_button_down(MouseButton::LEFT);
        // first sample after the press anchors the drag
        input.update_cursor(Vec2::new(20.0, 10.0));
        assert_eq!(
            input.update_cursor(Vec2::new(25.0, 13.0)),
            Some(Vec2::new(5.0, 3.0))
        );

        input.set_mouse_button_up(MouseButton::LEFT);
        assert_eq!(input.update_cursor(Vec2::new(0.0, 0.0)), None);
    }

    #[test]
    fn move_steps_follow_world_axes() {
        assert_eq!(MoveDir::Forward.step(0.5), (0.0, -0.5));
        assert_eq!(MoveDir::Right.step(0.5), (0.5, 0.0));
    }
}
