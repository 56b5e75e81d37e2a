//! Error types. Nothing here allocates; every variant carries only fixed-size data.

use crate::profile::PinId;

/// Fatal startup errors. Any of these stops the firmware before it begins polling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// No profile is registered under the configured name.
    UnknownProfile,

    /// Two bindings in the same profile use this pin.
    DuplicatePin(PinId),

    /// The pin doesn't exist on the board or has already been claimed.
    PinUnavailable(PinId),

    /// The profile has more bindings than the switch table can hold.
    TooManySwitches,

    /// A `Text` binding contains a character the layout can't type.
    UntypeableText { switch: u8, ch: char },
}

/// Failure to deliver a keyboard event to the host. Never fatal, never retried.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidError {
    /// The host hasn't configured the USB device (yet).
    NotConfigured,

    /// The report queue stayed full for longer than the send timeout.
    Busy,

    /// Six non-modifier keys are already down.
    Rollover,

    /// The layout has no keystroke for this character.
    Untypeable(char),
}
