//! OS input injection via enigo.

use crate::core::state_machine::{ActionEvent, MouseButton};
use crate::output::{PointerSink, SinkError};
use enigo::{Axis, Button, Coordinate, Direction, Enigo, Mouse, Settings};

/// A [`PointerSink`] that injects real pointer events into the OS.
pub struct EnigoSink {
    enigo: Enigo,
}

impl EnigoSink {
    /// Connect to the OS input layer. Fails when no display/session is
    /// available (e.g. headless CI), which the caller treats as a
    /// startup error.
    pub fn new() -> Result<Self, SinkError> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| SinkError::InjectionFailed(e.to_string()))?;
        Ok(Self { enigo })
    }

    /// The main display size in pixels.
    pub fn display_size(&self) -> Result<(u32, u32), SinkError> {
        let (w, h) = self
            .enigo
            .main_display()
            .map_err(|e| SinkError::InjectionFailed(e.to_string()))?;
        Ok((w.max(0) as u32, h.max(0) as u32))
    }
}

fn button_of(button: MouseButton) -> Button {
    match button {
        MouseButton::Left => Button::Left,
        MouseButton::Right => Button::Right,
    }
}

impl PointerSink for EnigoSink {
    fn apply(&mut self, event: &ActionEvent) -> Result<(), SinkError> {
        let result = match event {
            ActionEvent::Move { x, y } => {
                self.enigo
                    .move_mouse(x.round() as i32, y.round() as i32, Coordinate::Abs)
            }
            ActionEvent::ClickDown(button) => {
                self.enigo.button(button_of(*button), Direction::Press)
            }
            ActionEvent::ClickUp(button) => {
                self.enigo.button(button_of(*button), Direction::Release)
            }
            ActionEvent::ScrollDelta(delta) => self.enigo.scroll(*delta, Axis::Vertical),
            // Exit is handled by the pipeline loop, not the device
            ActionEvent::Exit => return Ok(()),
        };

        result.map_err(|e| SinkError::InjectionFailed(e.to_string()))
    }
}
