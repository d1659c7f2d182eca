//! Keyboard sampling and the physical-to-logical key bindings.

use car_dodger_rendering::FrameInput;
use macroquad::input::{is_key_down, is_key_pressed, is_quit_requested, KeyCode};

/// Raw keyboard and window observations gathered for a single frame.
///
/// Movement keys are level-triggered (held); confirm and cancel are
/// edge-triggered (pressed this frame).
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyObservations {
    /// The window close button was used.
    pub close_requested: bool,
    /// `Left` arrow is held.
    pub left_arrow_held: bool,
    /// `A` is held.
    pub a_held: bool,
    /// `Right` arrow is held.
    pub right_arrow_held: bool,
    /// `D` is held.
    pub d_held: bool,
    /// `Enter` was pressed this frame.
    pub enter_pressed: bool,
    /// `Escape` was pressed this frame.
    pub escape_pressed: bool,
}

impl KeyObservations {
    pub(crate) fn poll() -> Self {
        Self {
            close_requested: is_quit_requested(),
            left_arrow_held: is_key_down(KeyCode::Left),
            a_held: is_key_down(KeyCode::A),
            right_arrow_held: is_key_down(KeyCode::Right),
            d_held: is_key_down(KeyCode::D),
            enter_pressed: is_key_pressed(KeyCode::Enter),
            escape_pressed: is_key_pressed(KeyCode::Escape),
        }
    }

    /// Maps the physical observations onto logical frame input.
    #[must_use]
    pub fn frame_input(self) -> FrameInput {
        FrameInput {
            quit_requested: self.close_requested,
            move_left: self.left_arrow_held || self.a_held,
            move_right: self.right_arrow_held || self.d_held,
            confirm: self.enter_pressed,
            cancel: self.escape_pressed,
        }
    }
}
