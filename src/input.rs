use std::collections::HashSet;

use glutin::event::{ElementState, VirtualKeyCode};

use crate::window::SurfaceEvent;

/// Held keys and whether the window has been asked to close.
#[derive(Debug, Default)]
pub struct InputState {
    keys_down: HashSet<VirtualKeyCode>,
    close_requested: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &SurfaceEvent) {
        match *event {
            SurfaceEvent::CloseRequested => self.close_requested = true,
            SurfaceEvent::Key { key, state } => match state {
                ElementState::Pressed => {
                    self.keys_down.insert(key);
                }
                ElementState::Released => {
                    self.keys_down.remove(&key);
                }
            },
            // Releases delivered while unfocused are lost.
            SurfaceEvent::Focused(false) => self.keys_down.clear(),
            SurfaceEvent::Focused(true) | SurfaceEvent::Resized { .. } => {}
        }
    }

    /// Escape held closes the window.
    pub fn process(&mut self) {
        if self.is_pressed(VirtualKeyCode::Escape) {
            self.close_requested = true;
        }
    }

    pub fn is_pressed(&self, key: VirtualKeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn should_close(&self) -> bool {
        self.close_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: VirtualKeyCode, state: ElementState) -> SurfaceEvent {
        SurfaceEvent::Key { key, state }
    }

    #[test]
    fn escape_requests_close_on_process() {
        let mut input = InputState::new();
        input.apply(&key(VirtualKeyCode::Escape, ElementState::Pressed));

        assert!(!input.should_close());
        input.process();
        assert!(input.should_close());
    }

    #[test]
    fn other_keys_do_not_close() {
        let mut input = InputState::new();
        input.apply(&key(VirtualKeyCode::Q, ElementState::Pressed));
        input.process();

        assert!(input.is_pressed(VirtualKeyCode::Q));
        assert!(!input.should_close());
    }

    #[test]
    fn released_escape_is_ignored() {
        let mut input = InputState::new();
        input.apply(&key(VirtualKeyCode::Escape, ElementState::Pressed));
        input.apply(&key(VirtualKeyCode::Escape, ElementState::Released));
        input.process();

        assert!(!input.should_close());
    }

    #[test]
    fn focus_loss_clears_held_keys() {
        let mut input = InputState::new();
        input.apply(&key(VirtualKeyCode::Escape, ElementState::Pressed));
        input.apply(&SurfaceEvent::Focused(false));
        input.process();

        assert!(!input.is_pressed(VirtualKeyCode::Escape));
        assert!(!input.should_close());
    }

    #[test]
    fn close_event_requests_close() {
        let mut input = InputState::new();
        input.apply(&SurfaceEvent::CloseRequested);

        assert!(input.should_close());
    }
}
