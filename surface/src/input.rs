//! Input model: pointer sources and the stroke recorder state machine.
//!
//! The recorder has two states. A pointer-down moves it from `Idle` to
//! `Drawing` and starts a stroke; moves while `Drawing` extend the most recent
//! stroke; pointer-up, pointer-leave, and touch-end return it to `Idle`. The
//! transition logic lives in [`crate::engine::EngineCore`].

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

/// Kind of device that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerSource {
    /// Mouse or trackpad.
    #[default]
    Mouse,
    /// Finger on a touch screen.
    Touch,
    /// Stylus.
    Pen,
}

impl PointerSource {
    /// Map a DOM `PointerEvent.pointerType` string. Unknown types are treated as mouse.
    #[must_use]
    pub fn from_pointer_type(pointer_type: &str) -> Self {
        match pointer_type {
            "touch" => Self::Touch,
            "pen" => Self::Pen,
            _ => Self::Mouse,
        }
    }
}

/// Recorder state between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputState {
    /// No drag in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A drag is in progress; moves append to the last stroke.
    Drawing {
        /// Device that started the drag.
        source: PointerSource,
    },
}

impl InputState {
    #[must_use]
    pub fn is_drawing(self) -> bool {
        matches!(self, Self::Drawing { .. })
    }
}
