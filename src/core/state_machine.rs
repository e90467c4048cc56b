//! Action arbitration: turns the per-frame gesture symbol stream into a
//! serialized action stream.
//!
//! The machine owns the debounce counters and the "which action class is
//! active" decision. At most one of click/scroll can be engaged at any
//! time; cursor movement is orthogonal and emitted every tick a hand is
//! present. All inputs degrade to `Idle` - hand loss closes a held click
//! so the emulated button can never stick.

use crate::core::classifier::GestureSymbol;
use crate::core::region::ScreenPosition;
use serde::{Deserialize, Serialize};

/// Pointer button identifiers for click events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
}

/// One emitted pointer-control action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActionEvent {
    /// Absolute cursor move in screen pixels
    Move { x: f64, y: f64 },
    ClickDown(MouseButton),
    ClickUp(MouseButton),
    /// Signed vertical scroll, in scroll units (positive = down)
    ScrollDelta(i32),
    /// Fail-safe or shutdown; the pipeline terminates after this
    Exit,
}

/// The arbitration state. A tagged variant per mode rules out the
/// "two actions active at once" bug class by construction.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlState {
    /// No hand present
    Idle,
    /// Hand present, cursor tracking only
    Moving,
    /// A non-neutral symbol is being debounced
    Pending { symbol: GestureSymbol, frames: u32 },
    /// A button is held; `neutral_frames` debounces the release
    Clicked {
        button: MouseButton,
        neutral_frames: u32,
    },
    /// Fist scroll mode, delta measured against the last anchor
    Scrolling { anchor_y: f64 },
}

/// Consumes (symbol, smoothed position) observations and emits actions.
pub struct ActionStateMachine {
    state: ControlState,
    debounce_frames: u32,
    scroll_sensitivity: f64,
}

impl ActionStateMachine {
    pub fn new(debounce_frames: u32, scroll_sensitivity: f64) -> Self {
        Self {
            state: ControlState::Idle,
            debounce_frames,
            scroll_sensitivity,
        }
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    /// Advance one tick. `None` means the hand was lost this tick.
    pub fn advance(
        &mut self,
        observation: Option<(GestureSymbol, ScreenPosition)>,
    ) -> Vec<ActionEvent> {
        match observation {
            None => self.hand_lost(),
            Some((symbol, position)) => self.hand_present(symbol, position),
        }
    }

    /// Close any held button immediately. Used on hand loss and at
    /// teardown so a quit never leaves a pressed button behind.
    pub fn force_release(&mut self) -> Option<ActionEvent> {
        if let ControlState::Clicked { button, .. } = self.state {
            self.state = ControlState::Idle;
            Some(ActionEvent::ClickUp(button))
        } else {
            None
        }
    }

    fn hand_lost(&mut self) -> Vec<ActionEvent> {
        let mut events = Vec::new();
        if let Some(up) = self.force_release() {
            events.push(up);
        }
        self.state = ControlState::Idle;
        events
    }

    fn hand_present(&mut self, symbol: GestureSymbol, position: ScreenPosition) -> Vec<ActionEvent> {
        // Cursor tracking is continuous and independent of click/scroll
        // state.
        let mut events = vec![ActionEvent::Move {
            x: position.x,
            y: position.y,
        }];

        self.state = match std::mem::replace(&mut self.state, ControlState::Idle) {
            ControlState::Idle | ControlState::Moving => self.from_moving(symbol, position, &mut events),

            ControlState::Pending { symbol: candidate, frames } => {
                if symbol == candidate {
                    let frames = frames + 1;
                    if frames >= self.debounce_frames {
                        self.activate(candidate, position, &mut events)
                    } else {
                        ControlState::Pending { symbol: candidate, frames }
                    }
                } else {
                    // Candidate broke before the threshold: restart from
                    // whatever this frame shows.
                    self.from_moving(symbol, position, &mut events)
                }
            }

            ControlState::Clicked { button, neutral_frames } => {
                let held = matches!(
                    (button, symbol),
                    (MouseButton::Left, GestureSymbol::PinchIndex)
                        | (MouseButton::Right, GestureSymbol::PinchMiddle)
                );
                if held {
                    ControlState::Clicked {
                        button,
                        neutral_frames: 0,
                    }
                } else {
                    let neutral_frames = neutral_frames + 1;
                    if neutral_frames >= self.debounce_frames {
                        events.push(ActionEvent::ClickUp(button));
                        ControlState::Moving
                    } else {
                        ControlState::Clicked {
                            button,
                            neutral_frames,
                        }
                    }
                }
            }

            ControlState::Scrolling { anchor_y } => {
                if symbol == GestureSymbol::Fist {
                    let delta =
                        ((position.y - anchor_y) * self.scroll_sensitivity / 100.0).round() as i32;
                    if delta != 0 {
                        events.push(ActionEvent::ScrollDelta(delta));
                    }
                    ControlState::Scrolling {
                        anchor_y: position.y,
                    }
                } else {
                    // Scroll exit is immediate; re-entry pays the full
                    // debounce, so flicker degrades to plain movement.
                    self.from_moving(symbol, position, &mut events)
                }
            }
        };

        events
    }

    /// Transition taken from plain tracking (and after any mode ends).
    fn from_moving(
        &self,
        symbol: GestureSymbol,
        position: ScreenPosition,
        events: &mut Vec<ActionEvent>,
    ) -> ControlState {
        match symbol {
            GestureSymbol::Neutral => ControlState::Moving,
            candidate => {
                if self.debounce_frames <= 1 {
                    self.activate(candidate, position, events)
                } else {
                    ControlState::Pending {
                        symbol: candidate,
                        frames: 1,
                    }
                }
            }
        }
    }

    /// A candidate symbol survived the debounce; engage its mode.
    fn activate(
        &self,
        symbol: GestureSymbol,
        position: ScreenPosition,
        events: &mut Vec<ActionEvent>,
    ) -> ControlState {
        match symbol {
            GestureSymbol::PinchIndex => {
                events.push(ActionEvent::ClickDown(MouseButton::Left));
                ControlState::Clicked {
                    button: MouseButton::Left,
                    neutral_frames: 0,
                }
            }
            GestureSymbol::PinchMiddle => {
                events.push(ActionEvent::ClickDown(MouseButton::Right));
                ControlState::Clicked {
                    button: MouseButton::Right,
                    neutral_frames: 0,
                }
            }
            GestureSymbol::Fist => ControlState::Scrolling {
                anchor_y: position.y,
            },
            GestureSymbol::Neutral => ControlState::Moving,
        }
    }
}
