//! Turns switch edges into keyboard events according to the switch's [Action].

use crate::error::HidError;
use crate::hid::Keyboard;
use crate::indicator;
use crate::layout::type_text;
use crate::profile::{Action, SwitchBinding};
use embedded_hal::digital::OutputPin;

/// Owns the keyboard and the activity LED.
pub struct Dispatcher<K, A> {
    keyboard: K,
    activity_led: A,
}

impl<K: Keyboard, A: OutputPin> Dispatcher<K, A> {
    pub fn new(keyboard: K, mut activity_led: A) -> Self {
        indicator::set(&mut activity_led, false);
        Dispatcher { keyboard, activity_led }
    }

    pub fn keyboard(&self) -> &K {
        &self.keyboard
    }

    /// The switch went down.
    ///
    /// `Key` is held until [Self::on_release]; `Combo` and `Text` complete entirely here.
    pub async fn on_press(&mut self, binding: &SwitchBinding) -> Result<(), HidError> {
        indicator::set(&mut self.activity_led, true);

        match binding.action {
            Action::Key(code) => self.keyboard.press(code).await,
            Action::Combo(codes) => {
                let mut result = Ok(());
                for &code in codes {
                    result = result.and(self.keyboard.press(code).await);
                }
                for &code in codes {
                    result = result.and(self.keyboard.release(code).await);
                }
                result
            }
            Action::Text(content) => type_text(&mut self.keyboard, content).await,
        }
    }

    /// The switch came back up. Only `Key` has anything left to undo.
    pub async fn on_release(&mut self, binding: &SwitchBinding) -> Result<(), HidError> {
        indicator::set(&mut self.activity_led, false);

        match binding.action {
            Action::Key(code) => self.keyboard.release(code).await,
            Action::Combo(_) | Action::Text(_) => Ok(()),
        }
    }
}
