//! Compile-time configuration. Pin assignments, timings and USB identity live here so they can be
//! tuned in one place.

/// Profile selected at boot. Override with `HITBOX_PROFILE=python cargo firmware`.
pub const ACTIVE_PROFILE: &str = match option_env!("HITBOX_PROFILE") {
    Some(name) => name,
    None => "gaming",
};

/// Delay between control loop iterations. Switch bounce is expected to settle within one period,
/// so this doubles as the debounce window.
pub const POLL_PERIOD_MS: u64 = 5;

/// Run time between two session flashes (30 minutes).
pub const SESSION_INTERVAL_SECS: u64 = 1800;

/// How long the session LED stays lit.
pub const SESSION_FLASH_SECS: u64 = 5;

/// On-board LED, lit while an input is active.
pub const ACTIVITY_LED_PIN: u8 = 25;

/// External LED used for the session flash.
pub const SESSION_LED_PIN: u8 = 3;

/// Number of GPIOs on the RP2040.
pub const PIN_COUNT: usize = 30;

/// Capacity of the runtime switch table.
pub const MAX_SWITCHES: usize = 16;

// USB

/// pid.codes test VID/PID.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0001;

pub const USB_MANUFACTURER: &str = "Jayden Ma";
pub const USB_PRODUCT: &str = "Pico Hitbox";
pub const USB_SERIAL_NUMBER: &str = "001";

/// HID interrupt endpoint polling interval (ms).
pub const USB_HID_POLL_MS: u8 = 1;

/// Reports buffered between the control loop and the USB task.
pub const REPORT_QUEUE_DEPTH: usize = 16;

/// How long a report may wait for queue space before it is dropped.
///
/// This is also how long one keyboard event can hold up the control loop while the host has
/// stopped reading. A shifted character sends four reports, so typing it against a stalled host
/// costs up to four times this before switch polling resumes. A suspended bus fails fast instead.
pub const REPORT_SEND_TIMEOUT_MS: u64 = 50;
