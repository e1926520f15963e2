#![no_std]
#![no_main]

use defmt::{debug, error, info};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel as AdcChannel, Config as AdcConfig};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker};
use embassy_usb::Builder;
use portable_atomic::AtomicBool;
use static_cell::StaticCell;
use xinput_rp2040::{
    configure_usb_xinput, usb_config, AnalogStick, ButtonPad, ChannelTransport, Control,
    ControllerConfig, DeviceHandler, Feedback, FeedbackChannel, Range, ReportChannel,
    XInputController, XInputReader, XInputWriter, DEFAULT_CONFIG, SOCD_DPAD,
};

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
    ADC_IRQ_FIFO => embassy_rp::adc::InterruptHandler;
});

type UsbDriver = Driver<'static, USB>;

/// Reports from the pad task to the IN endpoint.
static REPORTS: ReportChannel = ReportChannel::new();

/// Feedback packets from the OUT endpoint to the pad task.
static FEEDBACK: FeedbackChannel = FeedbackChannel::new();

/// Latest decoded feedback for the LED task (latest value wins).
static FEEDBACK_SIGNAL: Signal<CriticalSectionRawMutex, Feedback> = Signal::new();

/// Set while the host has the device configured.
static CONFIGURED: AtomicBool = AtomicBool::new(false);

/// USB device configuration buffer.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static DEVICE_HANDLER: StaticCell<DeviceHandler> = StaticCell::new();

/// Controller set-up: stick in raw ADC counts, one report per sample.
const PAD_CONFIG: ControllerConfig = ControllerConfig {
    joystick_range: match Range::new(0, xinput_rp2040::input::ADC_MAX) {
        Ok(range) => range,
        Err(_) => Range::JOYSTICK_NATIVE,
    },
    auto_send: false,
    ..DEFAULT_CONFIG
};

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("XInput controller starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config(),
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );

    builder.handler(DEVICE_HANDLER.init(DeviceHandler::new(&CONFIGURED)));

    // Configure XInput interface
    let (writer, reader) = configure_usb_xinput(&mut builder);

    // Build the USB device
    let usb_device = builder.build();

    // --- Inputs ---
    let dpad = [
        Input::new(p.PIN_2, Pull::Up),
        Input::new(p.PIN_3, Pull::Up),
        Input::new(p.PIN_4, Pull::Up),
        Input::new(p.PIN_5, Pull::Up),
    ];
    let buttons = [
        (Input::new(p.PIN_6, Pull::Up), Control::ButtonA),
        (Input::new(p.PIN_7, Pull::Up), Control::ButtonB),
        (Input::new(p.PIN_8, Pull::Up), Control::ButtonX),
        (Input::new(p.PIN_9, Pull::Up), Control::ButtonY),
        (Input::new(p.PIN_10, Pull::Up), Control::ButtonStart),
        (Input::new(p.PIN_11, Pull::Up), Control::ButtonBack),
    ];
    let button_pad = ButtonPad::new(dpad, buttons);

    let adc = Adc::new(p.ADC, Irqs, AdcConfig::default());
    let stick = AnalogStick::new(
        adc,
        AdcChannel::new_pin(p.PIN_26, Pull::None),
        AdcChannel::new_pin(p.PIN_27, Pull::None),
    );

    // On-board LED shows whether the host assigned a player slot
    let led = Output::new(p.PIN_25, Level::Low);

    // Spawn tasks (unwrap the SpawnToken, then spawn)
    spawner.spawn(usb_task(usb_device).unwrap());
    spawner.spawn(report_task(writer).unwrap());
    spawner.spawn(feedback_task(reader).unwrap());
    spawner.spawn(led_task(led).unwrap());
    spawner.spawn(pad_task(button_pad, stick).unwrap());

    info!("XInput controller initialized, waiting for host...");
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: embassy_usb::UsbDevice<'static, UsbDriver>) {
    device.run().await;
}

/// Report task - writes queued reports to the IN endpoint.
#[embassy_executor::task]
async fn report_task(mut writer: XInputWriter<'static, UsbDriver>) {
    writer.run(&REPORTS).await
}

/// Feedback task - queues rumble/LED packets from the OUT endpoint.
#[embassy_executor::task]
async fn feedback_task(mut reader: XInputReader<'static, UsbDriver>) {
    reader.run(&FEEDBACK).await
}

/// LED task - lights the on-board LED while a player slot is assigned.
#[embassy_executor::task]
async fn led_task(mut led: Output<'static>) {
    loop {
        let feedback = FEEDBACK_SIGNAL.wait().await;
        if feedback.player == 0 {
            led.set_low();
        } else {
            led.set_high();
        }
    }
}

/// Runs in the pad task after every decoded feedback packet.
fn on_feedback(packet_type: u8, feedback: &Feedback) {
    debug!("Feedback packet {=u8:#x}: {}", packet_type, feedback);
    FEEDBACK_SIGNAL.signal(*feedback);
}

/// Pad task - owns the controller, samples inputs and exchanges packets.
#[embassy_executor::task]
async fn pad_task(buttons: ButtonPad<'static>, mut stick: AnalogStick<'static>) {
    let transport = ChannelTransport::new(&REPORTS, &FEEDBACK, &CONFIGURED);
    let mut pad = XInputController::with_config(transport, PAD_CONFIG);
    pad.set_receive_callback(on_feedback);

    let mut ticker = Ticker::every(Duration::from_millis(1));
    loop {
        ticker.next().await;

        buttons.apply(&mut pad, SOCD_DPAD);
        match stick.read().await {
            Ok((x, y)) => pad.set_joystick(Control::JoyLeft, x, y),
            Err(e) => error!("ADC read failed: {:?}", e),
        }

        if pad.connected() {
            if let Err(e) = pad.send() {
                debug!("Report not queued: {:?}", e);
            }
        }

        while pad.receive() > 0 {}
    }
}
