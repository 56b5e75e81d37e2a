//! Profile tables: for each physical switch, the pin it is wired to and the [Action] it performs.
//!
//! Exactly one profile is active per run, chosen by [crate::config::ACTIVE_PROFILE]. Changing
//! profile means rebooting, since every switch pin is claimed once at startup.

use crate::config::MAX_SWITCHES;
use crate::error::Error;
use crate::keycode::KeyCode::{self, *};
use crate::layout;

/// GPIO number, as printed on the board (`GP8` is 8).
pub type PinId = u8;

/// What a switch does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Held down for as long as the switch is.
    Key(KeyCode),
    /// Pressed together then released together, once per press.
    Combo(&'static [KeyCode]),
    /// Typed out once per press.
    Text(&'static str),
}

/// The fixed association between one physical switch and its [Action].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwitchBinding {
    /// Label printed in diagnostics (`SW3 pressed`).
    pub id: u8,
    pub pin: PinId,
    pub action: Action,
}

const fn key(id: u8, pin: PinId, code: KeyCode) -> SwitchBinding {
    SwitchBinding { id, pin, action: Action::Key(code) }
}

const fn combo(id: u8, pin: PinId, codes: &'static [KeyCode]) -> SwitchBinding {
    SwitchBinding { id, pin, action: Action::Combo(codes) }
}

const fn text(id: u8, pin: PinId, content: &'static str) -> SwitchBinding {
    SwitchBinding { id, pin, action: Action::Text(content) }
}

/// Movement on the left hand, attacks on the right, two space bars.
pub const PROFILE_GAMING: &[SwitchBinding] = &[
    key(1, 8, Space),
    key(2, 7, A),
    key(3, 6, S),
    key(4, 5, D),
    key(5, 15, W),
    key(6, 16, W),
    key(7, 27, J),
    key(8, 26, K),
    key(9, 22, L),
    key(10, 21, Space),
    key(11, 20, M),
    key(12, 19, Comma),
    key(13, 18, Dot),
    key(14, 17, Slash),
];

/// Snippets and editing shortcuts for writing Python.
pub const PROFILE_PYTHON: &[SwitchBinding] = &[
    text(1, 8, "print(\"\")"),
    text(2, 7, "for i in range():\n# TODO: add code here\n"),
    text(3, 6, "def func():\n'''"),
    text(4, 5, "if :\nprint(\"\")"),
    key(5, 15, RShift),
    key(6, 16, Backspace),
    combo(7, 27, &[LCtrl, C]),
    key(8, 26, Up),
    combo(9, 22, &[LCtrl, V]),
    combo(10, 21, &[LCtrl, Slash]),
    key(11, 20, Left),
    key(12, 19, Down),
    key(13, 18, Right),
    key(14, 17, Enter),
];

/// Every profile the firmware knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProfileId {
    Gaming,
    Python,
}

impl ProfileId {
    pub fn from_name(name: &str) -> Result<Self, Error> {
        match name {
            "gaming" => Ok(ProfileId::Gaming),
            "python" => Ok(ProfileId::Python),
            _ => Err(Error::UnknownProfile),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ProfileId::Gaming => "gaming",
            ProfileId::Python => "python",
        }
    }

    pub const fn bindings(self) -> &'static [SwitchBinding] {
        match self {
            ProfileId::Gaming => PROFILE_GAMING,
            ProfileId::Python => PROFILE_PYTHON,
        }
    }
}

/// Resolve a profile by name and check it can be run as-is.
pub fn load(name: &str) -> Result<&'static [SwitchBinding], Error> {
    let profile = ProfileId::from_name(name)?;
    let bindings = profile.bindings();
    validate(bindings)?;
    info!("profile {=str}: {} switches", profile.name(), bindings.len());
    Ok(bindings)
}

/// Load-time invariants: the table fits, no pin is used twice, every text can be typed.
pub fn validate(bindings: &[SwitchBinding]) -> Result<(), Error> {
    if bindings.len() > MAX_SWITCHES {
        return Err(Error::TooManySwitches);
    }

    for (i, binding) in bindings.iter().enumerate() {
        if bindings[..i].iter().any(|earlier| earlier.pin == binding.pin) {
            return Err(Error::DuplicatePin(binding.pin));
        }
        if let Action::Text(content) = binding.action {
            if let Some(ch) = content.chars().find(|&ch| layout::keystroke(ch).is_none()) {
                return Err(Error::UntypeableText { switch: binding.id, ch });
            }
        }
    }

    Ok(())
}
