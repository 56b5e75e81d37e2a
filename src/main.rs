//! Firmware for a hitbox-style USB keyboard based on the Raspberry Pi Pico, using the
//! [embassy_rp] framework. The logic lives in the [pico_hitbox] library; this file wires it to the
//! board.

#![no_main]
#![no_std]

mod usb;

use defmt::{error, info};
use embassy_executor::Spawner;
use embassy_rp::gpio::{AnyPin, Input, Level, Output, Pin, Pull};
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Instant, Timer};
use pico_hitbox::{
    config,
    dispatch::Dispatcher,
    hid::ReportKeyboard,
    pins::PinBank,
    profile::{self, SwitchBinding},
    session::SessionTimer,
    Error, Hitbox,
};
use usbd_hid::descriptor::KeyboardReport;

use {defmt_rtt as _, panic_reset as _};

macro_rules! pin_bank {
    ($dev:ident; $($pin:ident),*) => { PinBank::new([ $(Some($dev.$pin.degrade())),* ]) }
}

/// Channel for the control loop to hand keyboard reports to [usb], and ultimately to the host.
pub(crate) static REPORTS_CHANNEL: Channel<RawMutex, KeyboardReport, { config::REPORT_QUEUE_DEPTH }> =
    Channel::new();
type RawMutex = embassy_sync::blocking_mutex::raw::ThreadModeRawMutex;

type Board = Hitbox<Input<'static>, ReportKeyboard<usb::ReportQueue>, Output<'static>, Output<'static>>;
type Pins = PinBank<AnyPin, { config::PIN_COUNT }>;

const POLL_PERIOD: Duration = Duration::from_millis(config::POLL_PERIOD_MS);

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    // Nothing is claimed until the profile is known to be good.
    let bindings = match profile::load(config::ACTIVE_PROFILE) {
        Ok(bindings) => bindings,
        Err(e) => halt(e).await,
    };

    let pins: Pins = pin_bank!(p;
        PIN_0, PIN_1, PIN_2, PIN_3, PIN_4, PIN_5, PIN_6, PIN_7, PIN_8, PIN_9,
        PIN_10, PIN_11, PIN_12, PIN_13, PIN_14, PIN_15, PIN_16, PIN_17, PIN_18, PIN_19,
        PIN_20, PIN_21, PIN_22, PIN_23, PIN_24, PIN_25, PIN_26, PIN_27, PIN_28, PIN_29
    );
    let hitbox = match build(bindings, pins) {
        Ok(hitbox) => hitbox,
        Err(e) => halt(e).await,
    };

    let usb_driver = embassy_rp::usb::Driver::new(p.USB, usb::Irqs);
    let (usb_device, hid) = usb::get_device(usb_driver);
    spawner.spawn(usb::run(usb_device, hid)).expect("spawn usb");

    spawner.spawn(run_hitbox(hitbox)).expect("spawn hitbox");
}

/// Claim the LEDs and every switch input, and set up the control loop state.
fn build(bindings: &'static [SwitchBinding], mut pins: Pins) -> Result<Board, Error> {
    let activity_led = Output::new(pins.take(config::ACTIVITY_LED_PIN)?, Level::Low);
    let session_led = Output::new(pins.take(config::SESSION_LED_PIN)?, Level::Low);

    let dispatcher = Dispatcher::new(ReportKeyboard::new(usb::ReportQueue), activity_led);
    let session = SessionTimer::new(
        Duration::from_secs(config::SESSION_INTERVAL_SECS),
        Duration::from_secs(config::SESSION_FLASH_SECS),
        Instant::now(),
    );

    Hitbox::new(
        bindings,
        |pin| {
            let mut input = Input::new(pins.take(pin)?, Pull::Up);
            input.set_schmitt(true);
            Ok(input)
        },
        dispatcher,
        session,
        session_led,
    )
}

/// Refuse to run with a bad configuration: log why and never start polling.
async fn halt(e: Error) -> ! {
    error!("startup failed: {}", e);
    loop {
        Timer::after_secs(3600).await;
    }
}

#[embassy_executor::task]
async fn run_hitbox(mut hitbox: Board) {
    info!("start polling");
    loop {
        hitbox.tick(Instant::now()).await;
        Timer::after(POLL_PERIOD).await;
    }
}
