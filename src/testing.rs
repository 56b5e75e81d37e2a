//! Hardware stand-ins for host tests.

use crate::error::HidError;
use crate::hid::{Keyboard, ReportSink};
use crate::keycode::KeyCode;
use core::convert::Infallible;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use std::cell::Cell;
use std::rc::Rc;
use usbd_hid::descriptor::KeyboardReport;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEvent {
    Press(KeyCode),
    Release(KeyCode),
}

/// Records every press/release. Optionally fails each call after recording it.
#[derive(Default)]
pub struct RecordingKeyboard {
    pub events: Vec<KeyEvent>,
    fail_with: Option<HidError>,
}

impl RecordingKeyboard {
    pub fn failing(error: HidError) -> Self {
        RecordingKeyboard { events: Vec::new(), fail_with: Some(error) }
    }

    fn outcome(&self) -> Result<(), HidError> {
        self.fail_with.map_or(Ok(()), Err)
    }
}

impl Keyboard for RecordingKeyboard {
    async fn press(&mut self, code: KeyCode) -> Result<(), HidError> {
        self.events.push(KeyEvent::Press(code));
        self.outcome()
    }

    async fn release(&mut self, code: KeyCode) -> Result<(), HidError> {
        self.events.push(KeyEvent::Release(code));
        self.outcome()
    }
}

/// Keeps `(modifier, keycodes)` of every delivered report, or rejects them all.
#[derive(Default)]
pub struct RecordingSink {
    pub reports: Vec<(u8, [u8; 6])>,
    fail_with: Option<HidError>,
}

impl RecordingSink {
    pub fn failing(error: HidError) -> Self {
        RecordingSink { reports: Vec::new(), fail_with: Some(error) }
    }
}

impl ReportSink for RecordingSink {
    async fn send(&mut self, report: KeyboardReport) -> Result<(), HidError> {
        if let Some(error) = self.fail_with {
            return Err(error);
        }
        self.reports.push((report.modifier, report.keycodes));
        Ok(())
    }
}

/// A switch the test can press. Reads low while pressed, like a pulled-up input.
#[derive(Clone, Default)]
pub struct MockSwitch {
    pressed: Rc<Cell<bool>>,
    broken: Rc<Cell<bool>>,
}

#[derive(Debug)]
pub struct ReadError;

impl embedded_hal::digital::Error for ReadError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

impl MockSwitch {
    pub fn set(&self, pressed: bool) {
        self.pressed.set(pressed);
    }

    /// Make every read fail until cleared.
    pub fn set_broken(&self, broken: bool) {
        self.broken.set(broken);
    }
}

impl ErrorType for MockSwitch {
    type Error = ReadError;
}

impl InputPin for MockSwitch {
    fn is_high(&mut self) -> Result<bool, ReadError> {
        self.is_low().map(|low| !low)
    }

    fn is_low(&mut self) -> Result<bool, ReadError> {
        if self.broken.get() {
            return Err(ReadError);
        }
        Ok(self.pressed.get())
    }
}

/// An LED whose state the test can observe.
#[derive(Clone, Default)]
pub struct MockLed {
    lit: Rc<Cell<bool>>,
}

impl MockLed {
    pub fn is_lit(&self) -> bool {
        self.lit.get()
    }
}

impl ErrorType for MockLed {
    type Error = Infallible;
}

impl OutputPin for MockLed {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.lit.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.lit.set(true);
        Ok(())
    }
}
