//! Implements the USB device and task for transporting HID [KeyboardReport]s, and the
//! [ReportSink] the control loop writes them to.
//! Mostly lifted from [embassy_usb] examples.

use crate::REPORTS_CHANNEL;

use defmt::{debug, info, warn};
use embassy_futures::join::join;
use embassy_rp::{
    peripherals::USB,
    usb::{Driver, InterruptHandler},
    bind_interrupts,
};
use embassy_time::{with_timeout, Duration};
use embassy_usb::{
    class::hid::{HidReaderWriter, ReportId, RequestHandler, State as HidState},
    control::OutResponse,
    Builder, Handler, UsbDevice,
};
use pico_hitbox::{config, hid::ReportSink, HidError};
use portable_atomic::{AtomicBool, Ordering};
use usbd_hid::descriptor::{KeyboardReport, SerializedDescriptor};

use static_cell::StaticCell;

type MyDriver = Driver<'static, USB>;
type MyUsbDevice = UsbDevice<'static, MyDriver>;
type MyHidReaderWriter = HidReaderWriter<'static, MyDriver, 1, 8>;

bind_interrupts!(pub(crate) struct Irqs {
    USBCTRL_IRQ => InterruptHandler<USB>;
});

/// Whether the host has configured the device, i.e. whether anyone will read our reports.
static CONFIGURED: AtomicBool = AtomicBool::new(false);
/// Set while the host has suspended the bus; nothing is read until it resumes.
static SUSPENDED: AtomicBool = AtomicBool::new(false);

pub fn get_device(driver: MyDriver) -> (MyUsbDevice, MyHidReaderWriter) {
    let mut usb_config = embassy_usb::Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    static DEVICE_HANDLER: StaticCell<MyDeviceHandler> = StaticCell::new();

    // Create embassy-usb DeviceBuilder using the driver and config.
    static CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
    static BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
    static CONTROL_BUF: StaticCell<[u8; 128]> = StaticCell::new();
    let mut builder = Builder::new(
        driver,
        usb_config,
        &mut CONFIG_DESC.init([0; 256])[..],
        &mut BOS_DESC.init([0; 256])[..],
        &mut [], // no msos descriptors
        &mut CONTROL_BUF.init([0; 128])[..],
    );

    static STATE: StaticCell<HidState> = StaticCell::new();

    builder.handler(DEVICE_HANDLER.init(MyDeviceHandler));

    let hid_config = embassy_usb::class::hid::Config {
        report_descriptor: KeyboardReport::desc(),
        request_handler: None,
        poll_ms: config::USB_HID_POLL_MS,
        max_packet_size: 8,
    };
    let hid = HidReaderWriter::<_, 1, 8>::new(&mut builder, STATE.init(HidState::new()), hid_config);

    (builder.build(), hid)
}

#[embassy_executor::task]
pub async fn run(mut usb: MyUsbDevice, hid: MyHidReaderWriter) {
    let usb_fut = usb.run();

    let (reader, mut writer) = hid.split();

    let in_fut = async {
        loop {
            let report = REPORTS_CHANNEL.receive().await;
            if writer.write_serialize(&report).await.is_err() {
                warn!("USB keyboard write failed");
            }
        }
    };

    let out_fut = async {
        static REQUEST_HANDLER: StaticCell<MyRequestHandler> = StaticCell::new();
        reader.run(false, REQUEST_HANDLER.init(MyRequestHandler)).await;
    };

    join(usb_fut, join(in_fut, out_fut)).await;
}

/// Queues reports for [run]. Fails fast while the device is unconfigured or suspended, and gives
/// up if the queue stays full past [config::REPORT_SEND_TIMEOUT_MS].
pub struct ReportQueue;

impl ReportSink for ReportQueue {
    async fn send(&mut self, report: KeyboardReport) -> Result<(), HidError> {
        if !CONFIGURED.load(Ordering::Relaxed) || SUSPENDED.load(Ordering::Relaxed) {
            return Err(HidError::NotConfigured);
        }
        with_timeout(Duration::from_millis(config::REPORT_SEND_TIMEOUT_MS), REPORTS_CHANNEL.send(report))
            .await
            .map_err(|_| HidError::Busy)
    }
}

struct MyRequestHandler;

impl RequestHandler for MyRequestHandler {
    fn get_report(&mut self, _id: ReportId, _buf: &mut [u8]) -> Option<usize> {
        None
    }

    fn set_report(&mut self, _id: ReportId, data: &[u8]) -> OutResponse {
        // keyboard LEDs (caps lock etc.); the hitbox has nowhere to show them
        debug!("host LED report: {=[u8]}", data);
        OutResponse::Accepted
    }

    fn set_idle_ms(&mut self, _id: Option<ReportId>, dur: u32) {
        debug!("set idle rate to {} ms", dur);
    }

    fn get_idle_ms(&mut self, _id: Option<ReportId>) -> Option<u32> {
        None
    }
}

struct MyDeviceHandler;

impl Handler for MyDeviceHandler {
    fn enabled(&mut self, enabled: bool) {
        CONFIGURED.store(false, Ordering::Relaxed);
        info!("USB device {}", if enabled { "enabled" } else { "disabled" });
    }

    fn reset(&mut self) {
        CONFIGURED.store(false, Ordering::Relaxed);
        SUSPENDED.store(false, Ordering::Relaxed);
        info!("USB bus reset");
    }

    fn addressed(&mut self, addr: u8) {
        CONFIGURED.store(false, Ordering::Relaxed);
        debug!("USB address set to {}", addr);
    }

    fn configured(&mut self, configured: bool) {
        CONFIGURED.store(configured, Ordering::Relaxed);
        info!("USB {}", if configured { "configured" } else { "no longer configured" });
    }

    fn suspended(&mut self, suspended: bool) {
        SUSPENDED.store(suspended, Ordering::Relaxed);
        info!("USB {}", if suspended { "suspended" } else { "resumed" });
    }
}
