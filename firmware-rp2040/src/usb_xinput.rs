//! USB XInput interface: descriptors and endpoint tasks.
//!
//! XInput is not HID. The Xbox 360 driver binds to a vendor-specific
//! interface (class 0xFF, subclass 0x5D, protocol 0x01) carrying one
//! interrupt IN endpoint for input reports and one interrupt OUT endpoint
//! for rumble and LED packets.

use defmt::{error, info, warn};
use embassy_usb::driver::{Direction, Driver, Endpoint, EndpointAddress, EndpointError};
use embassy_usb::driver::{EndpointIn, EndpointOut};
use embassy_usb::{Builder, Config, Handler};
use heapless::Vec;
use portable_atomic::{AtomicBool, Ordering};
use xinput_core::REPORT_SIZE;
use xinput_proto::MAX_FEEDBACK_SIZE;

use crate::transport::{FeedbackChannel, FeedbackFrame, ReportChannel};

/// Microsoft vendor ID.
pub const XBOX_VID: u16 = 0x045E;

/// Xbox 360 wired controller product ID.
pub const XBOX_PID: u16 = 0x028E;

const INTERFACE_CLASS: u8 = 0xFF;
const INTERFACE_SUBCLASS: u8 = 0x5D;
const INTERFACE_PROTOCOL: u8 = 0x01;

/// Endpoint packet size on both directions.
const MAX_PACKET_SIZE: u16 = 32;

/// Class-specific descriptor type the driver expects after the interface.
const XINPUT_DESCRIPTOR_TYPE: u8 = 0x21;

/// Body of the class-specific descriptor (length and type are prepended by
/// the builder). Bytes 4 and 11 repeat the IN and OUT endpoint addresses.
const XINPUT_DESCRIPTOR: &[u8] = &[
    0x00, 0x01, 0x01, 0x25, //
    0x81, 0x14, 0x00, 0x00, 0x00, 0x00, 0x13, //
    0x02, 0x08, 0x00, 0x00,
];

/// Device-level configuration matching a wired Xbox 360 controller.
#[must_use]
pub fn usb_config() -> Config<'static> {
    let mut config = Config::new(XBOX_VID, XBOX_PID);
    config.manufacturer = Some("Rust Gamepad");
    config.product = Some("XInput Controller");
    config.serial_number = Some("001");
    config.device_release = 0x0114;
    config.device_class = 0xFF;
    config.device_sub_class = 0xFF;
    config.device_protocol = 0xFF;
    config.composite_with_iads = false;
    config.max_power = 500;
    config.max_packet_size_0 = 64;
    config
}

/// Tracks whether the host has configured the device.
pub struct DeviceHandler {
    configured: &'static AtomicBool,
}

impl DeviceHandler {
    pub fn new(configured: &'static AtomicBool) -> Self {
        Self { configured }
    }
}

impl Handler for DeviceHandler {
    fn enabled(&mut self, enabled: bool) {
        if !enabled {
            self.configured.store(false, Ordering::Relaxed);
        }
    }

    fn reset(&mut self) {
        self.configured.store(false, Ordering::Relaxed);
    }

    fn configured(&mut self, configured: bool) {
        self.configured.store(configured, Ordering::Relaxed);
        if configured {
            info!("Host configured the XInput interface");
        }
    }
}

/// Writes queued reports to the IN endpoint.
pub struct XInputWriter<'d, D: Driver<'d>> {
    ep_in: D::EndpointIn,
}

/// Reads feedback packets from the OUT endpoint.
pub struct XInputReader<'d, D: Driver<'d>> {
    ep_out: D::EndpointOut,
}

/// Add the XInput interface to the USB builder.
///
/// Returns the writer and reader halves for their tasks.
pub fn configure_usb_xinput<'d, D: Driver<'d>>(
    builder: &mut Builder<'d, D>,
) -> (XInputWriter<'d, D>, XInputReader<'d, D>) {
    let mut function = builder.function(INTERFACE_CLASS, INTERFACE_SUBCLASS, INTERFACE_PROTOCOL);
    let mut interface = function.interface();
    let mut alt = interface.alt_setting(INTERFACE_CLASS, INTERFACE_SUBCLASS, INTERFACE_PROTOCOL, None);
    alt.descriptor(XINPUT_DESCRIPTOR_TYPE, XINPUT_DESCRIPTOR);

    let ep_in = alt.endpoint_interrupt_in(
        Some(EndpointAddress::from_parts(1, Direction::In)),
        MAX_PACKET_SIZE,
        4,
    );
    let ep_out = alt.endpoint_interrupt_out(
        Some(EndpointAddress::from_parts(2, Direction::Out)),
        MAX_PACKET_SIZE,
        8,
    );

    (XInputWriter { ep_in }, XInputReader { ep_out })
}

impl<'d, D: Driver<'d>> XInputWriter<'d, D> {
    /// Forward queued reports to the host, forever.
    pub async fn run(&mut self, reports: &ReportChannel) -> ! {
        loop {
            self.ep_in.wait_enabled().await;
            let report: [u8; REPORT_SIZE] = reports.receive().await;
            match self.ep_in.write(&report).await {
                Ok(()) => {}
                Err(EndpointError::Disabled) => warn!("IN endpoint disabled, report dropped"),
                Err(e) => error!("Report write failed: {:?}", e),
            }
        }
    }
}

impl<'d, D: Driver<'d>> XInputReader<'d, D> {
    /// Queue every feedback packet from the host, forever.
    ///
    /// Packets arriving while the queue is full are dropped.
    pub async fn run(&mut self, feedback: &FeedbackChannel) -> ! {
        let mut buf = [0u8; MAX_PACKET_SIZE as usize];
        loop {
            self.ep_out.wait_enabled().await;
            match self.ep_out.read(&mut buf).await {
                Ok(n) => {
                    let len = n.min(MAX_FEEDBACK_SIZE);
                    let frame: FeedbackFrame = match Vec::from_slice(&buf[..len]) {
                        Ok(frame) => frame,
                        Err(_) => continue,
                    };
                    if feedback.try_send(frame).is_err() {
                        warn!("Feedback queue full, packet dropped");
                    }
                }
                Err(EndpointError::Disabled) => {}
                Err(e) => error!("Feedback read failed: {:?}", e),
            }
        }
    }
}
