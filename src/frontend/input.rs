//! Mouse polling: turns macroquad's per-frame mouse state into pointer events

use macroquad::prelude::*;

use crate::editor::{PointerButton, PointerEvent};

/// Mouse state sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub left_pressed: bool,  // Just pressed this frame
    pub left_released: bool, // Just released this frame
    pub right_pressed: bool,
    pub right_released: bool,
    pub scroll: f32, // Scroll wheel delta (positive = wheel up)
}

impl MouseState {
    /// Sample the current frame's mouse state from macroquad
    pub fn capture() -> Self {
        let (x, y) = mouse_position();
        Self {
            x,
            y,
            left_pressed: is_mouse_button_pressed(MouseButton::Left),
            left_released: is_mouse_button_released(MouseButton::Left),
            right_pressed: is_mouse_button_pressed(MouseButton::Right),
            right_released: is_mouse_button_released(MouseButton::Right),
            scroll: mouse_wheel().1,
        }
    }

    /// Pointer events for this frame, given the previous frame's sample
    ///
    /// Order is move, press, wheel, release so a click-and-release inside
    /// one frame still runs press before release.
    pub fn events(&self, previous: &MouseState) -> Vec<PointerEvent> {
        let (x, y) = (self.x, self.y);
        let mut events = Vec::new();

        if (x, y) != (previous.x, previous.y) {
            events.push(PointerEvent::Move { x, y });
        }
        if self.left_pressed {
            events.push(PointerEvent::Down { button: PointerButton::Left, x, y });
        }
        if self.right_pressed {
            events.push(PointerEvent::Down { button: PointerButton::Right, x, y });
        }
        let delta = wheel_rows(self.scroll);
        if delta != 0 {
            events.push(PointerEvent::Scroll { x, y, delta });
        }
        if self.left_released {
            events.push(PointerEvent::Up { button: PointerButton::Left, x, y });
        }
        if self.right_released {
            events.push(PointerEvent::Up { button: PointerButton::Right, x, y });
        }
        events
    }
}

/// One palette row per wheel notch: wheel up scrolls toward the first row
fn wheel_rows(scroll: f32) -> i32 {
    if scroll > 0.0 {
        -1
    } else if scroll < 0.0 {
        1
    } else {
        0
    }
}
