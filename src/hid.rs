//! The keyboard side of the firmware: a press/release [Keyboard] interface, and an implementation
//! that turns those calls into boot-protocol [KeyboardReport]s for a [ReportSink].

use crate::error::HidError;
use crate::keycode::KeyCode;
use usbd_hid::descriptor::KeyboardReport;

/// Number of non-modifier keys a boot keyboard report can carry.
pub const ROLLOVER: usize = 6;

/// Press and release logical keys on the host.
///
/// Both are fire-and-forget: an error means this one event was not delivered, and nothing retries
/// it.
#[allow(async_fn_in_trait)]
pub trait Keyboard {
    async fn press(&mut self, code: KeyCode) -> Result<(), HidError>;
    async fn release(&mut self, code: KeyCode) -> Result<(), HidError>;
}

/// Somewhere to deliver a complete keyboard report, usually the USB HID endpoint.
#[allow(async_fn_in_trait)]
pub trait ReportSink {
    async fn send(&mut self, report: KeyboardReport) -> Result<(), HidError>;
}

/// Tracks which keys are down and sends the whole report whenever that changes.
///
/// Each key is reference counted: several switches (or a switch and a typed snippet) may hold the
/// same key, and it only leaves the report when the last of them releases it.
///
/// The tracked state is updated before sending, so a failed delivery never leaves a key logically
/// stuck: the next report that does get through describes the true state.
pub struct ReportKeyboard<S> {
    /// Hold count per modifier bit, `LCtrl` first.
    modifier_holds: [u8; 8],
    /// Usage ID and hold count per report slot. A count of 0 marks a free slot.
    slots: [(u8, u8); ROLLOVER],
    sink: S,
}

impl<S: ReportSink> ReportKeyboard<S> {
    pub fn new(sink: S) -> Self {
        ReportKeyboard { modifier_holds: [0; 8], slots: [(0, 0); ROLLOVER], sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn report(&self) -> KeyboardReport {
        let mut report = KeyboardReport::default();
        for (bit, &holds) in self.modifier_holds.iter().enumerate() {
            if holds > 0 {
                report.modifier |= 1 << bit;
            }
        }
        for (keycode, &(usage, holds)) in report.keycodes.iter_mut().zip(&self.slots) {
            *keycode = if holds > 0 { usage } else { 0 };
        }
        report
    }

    pub fn is_pressed(&self, code: KeyCode) -> bool {
        self.holds(code) > 0
    }

    /// How many presses of `code` are still waiting for their release.
    pub fn holds(&self, code: KeyCode) -> u8 {
        if code.is_modifier() {
            self.modifier_holds[modifier_index(code)]
        } else {
            self.slot_of(code).map_or(0, |i| self.slots[i].1)
        }
    }

    fn slot_of(&self, code: KeyCode) -> Option<usize> {
        self.slots.iter().position(|&(usage, holds)| holds > 0 && usage == code.usage())
    }
}

fn modifier_index(code: KeyCode) -> usize {
    code.modifier_bit().trailing_zeros() as usize
}

impl<S: ReportSink> Keyboard for ReportKeyboard<S> {
    async fn press(&mut self, code: KeyCode) -> Result<(), HidError> {
        if code.is_modifier() {
            let holds = &mut self.modifier_holds[modifier_index(code)];
            *holds = holds.saturating_add(1);
        } else if let Some(i) = self.slot_of(code) {
            self.slots[i].1 = self.slots[i].1.saturating_add(1);
        } else {
            let free = self.slots.iter().position(|&(_, holds)| holds == 0).ok_or(HidError::Rollover)?;
            self.slots[free] = (code.usage(), 1);
        }
        let report = self.report();
        self.sink.send(report).await
    }

    async fn release(&mut self, code: KeyCode) -> Result<(), HidError> {
        if code.is_modifier() {
            let holds = &mut self.modifier_holds[modifier_index(code)];
            *holds = holds.saturating_sub(1);
        } else if let Some(i) = self.slot_of(code) {
            self.slots[i].1 -= 1;
        }
        let report = self.report();
        self.sink.send(report).await
    }
}
