//! Edge detection for one switch, sampled once per control loop iteration.
//!
//! There is no settle timer: the loop period is the debounce window, and an edge is reported the
//! first time a sample disagrees with the last known state.

/// A change in a switch's logical state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Press,
    Release,
}

/// Last known logical state of one switch. Starts released.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SwitchState {
    pressed: bool,
}

impl SwitchState {
    pub const fn new() -> Self {
        SwitchState { pressed: false }
    }

    pub const fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Feed one sample. Returns the edge if the state changed, at most one per call.
    pub fn update(&mut self, actuated: bool) -> Option<Edge> {
        if actuated == self.pressed {
            return None;
        }
        self.pressed = actuated;
        Some(if actuated { Edge::Press } else { Edge::Release })
    }
}
