use std::collections::HashSet;

use crate::coords::Vec2;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState, PointerMoveEvent};

/// Current input state for a single window.
///
/// The runtime is the only writer; the frame callback only reads it.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Last known pointer position in logical pixels.
    ///
    /// Kept when the pointer leaves the window, so anything following the
    /// pointer stays where it exited. `None` until the first move.
    pub pointer_pos: Option<Vec2>,

    /// Whether the pointer is currently over the window.
    pub pointer_inside: bool,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Avoids stuck keys when focus changes mid-press.
                    self.keys_down.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some(Vec2::new(*x, *y));
                self.pointer_inside = true;
            }

            InputEvent::PointerLeft => {
                self.pointer_inside = false;
            }

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    if self.keys_down.insert(*key) {
                        frame.keys_pressed.insert(*key);
                    }
                }
                KeyState::Released => {
                    if self.keys_down.remove(key) {
                        frame.keys_released.insert(*key);
                    }
                }
            },
        }

        frame.push_event(ev);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(state: &mut InputState, frame: &mut InputFrame, ev: InputEvent) {
        state.apply_event(frame, ev);
    }

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved(PointerMoveEvent { x, y })
    }

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state, repeat: false }
    }

    // ── pointer ───────────────────────────────────────────────────────────

    #[test]
    fn pointer_starts_unknown() {
        let state = InputState::default();
        assert_eq!(state.pointer_pos, None);
        assert!(!state.pointer_inside);
    }

    #[test]
    fn pointer_move_updates_position() {
        let (mut state, mut frame) = (InputState::default(), InputFrame::default());
        apply(&mut state, &mut frame, moved(10.0, 20.0));
        apply(&mut state, &mut frame, moved(30.0, 40.0));
        assert_eq!(state.pointer_pos, Some(Vec2::new(30.0, 40.0)));
        assert!(state.pointer_inside);
        assert!(matches!(frame.events.last(), Some(InputEvent::PointerMoved(_))));
    }

    #[test]
    fn pointer_leave_keeps_last_position() {
        let (mut state, mut frame) = (InputState::default(), InputFrame::default());
        apply(&mut state, &mut frame, moved(5.0, 6.0));
        apply(&mut state, &mut frame, InputEvent::PointerLeft);
        assert_eq!(state.pointer_pos, Some(Vec2::new(5.0, 6.0)));
        assert!(!state.pointer_inside);
    }

    // ── keys ──────────────────────────────────────────────────────────────

    #[test]
    fn key_press_is_recorded_once() {
        let (mut state, mut frame) = (InputState::default(), InputFrame::default());
        apply(&mut state, &mut frame, key(Key::Escape, KeyState::Pressed));
        apply(&mut state, &mut frame, key(Key::Escape, KeyState::Pressed));
        assert!(state.keys_down.contains(&Key::Escape));
        assert!(frame.key_pressed(Key::Escape));
        assert_eq!(frame.events.len(), 2);
    }

    #[test]
    fn focus_loss_releases_keys() {
        let (mut state, mut frame) = (InputState::default(), InputFrame::default());
        apply(&mut state, &mut frame, key(Key::Escape, KeyState::Pressed));
        apply(&mut state, &mut frame, InputEvent::Focused(false));
        assert!(state.keys_down.is_empty());
    }

    #[test]
    fn frame_clear_drops_deltas_only() {
        let (mut state, mut frame) = (InputState::default(), InputFrame::default());
        apply(&mut state, &mut frame, key(Key::Escape, KeyState::Pressed));
        frame.clear();
        assert!(!frame.key_pressed(Key::Escape));
        assert!(state.keys_down.contains(&Key::Escape));
    }
}
