//! Hands out board pins, each at most once.

use crate::error::Error;
use crate::profile::PinId;

/// Owns every pin of the board until it is claimed.
pub struct PinBank<P, const N: usize> {
    pins: [Option<P>; N],
}

impl<P, const N: usize> PinBank<P, N> {
    pub fn new(pins: [Option<P>; N]) -> Self {
        PinBank { pins }
    }

    /// Claim `pin`. Fails if the board has no such pin or it was claimed before.
    pub fn take(&mut self, pin: PinId) -> Result<P, Error> {
        self.pins
            .get_mut(pin as usize)
            .and_then(Option::take)
            .ok_or(Error::PinUnavailable(pin))
    }

    pub fn is_available(&self, pin: PinId) -> bool {
        matches!(self.pins.get(pin as usize), Some(Some(_)))
    }
}
