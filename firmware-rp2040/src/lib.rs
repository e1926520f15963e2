//! Xbox 360 (XInput) controller firmware for RP2040.
//!
//! # Overview
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and:
//! 1. Samples push buttons and an analog stick every millisecond
//! 2. Updates an [`XInputController`] and sends at most one report per sample
//! 3. Decodes rumble and LED packets from the host and lights the on-board
//!    LED once a player slot is assigned
//!
//! # Hardware Configuration
//!
//! | Function      | GPIO  | Description |
//! |---------------|-------|-------------|
//! | D-pad         | 2-5   | Up, down, left, right (active low) |
//! | A / B / X / Y | 6-9   | Face buttons (active low) |
//! | Start / Back  | 10-11 | System buttons (active low) |
//! | Left stick X  | 26    | ADC0 |
//! | Left stick Y  | 27    | ADC1 |
//! | LED           | 25    | On-board LED (player assigned) |
//!
//! # Architecture
//!
//! The firmware uses the Embassy async runtime with five concurrent tasks:
//!
//! - **USB Task**: Manages the USB device stack
//! - **Report Task**: Drains the report channel into the IN endpoint
//! - **Feedback Task**: Queues OUT endpoint packets on the feedback channel
//! - **Pad Task**: Owns the controller, samples inputs, sends and receives
//!   through [`ChannelTransport`]
//! - **LED Task**: Follows the player slot signalled by the feedback callback
//!
//! The controller itself never awaits: [`ChannelTransport`] only touches
//! the channels with `try_send`/`try_receive`.
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//! - **`socd-dpad`** (default): Clean opposing D-pad directions
//!
//! # Re-exports
//!
//! This crate re-exports the controller types from [`xinput_core`] for
//! convenience.

#![no_std]

#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features - they install conflicting panic handlers");

pub use xinput_core::{
    Control, ControllerConfig, Feedback, LedPattern, Range, Transport, TransportError,
    XInputController, DEFAULT_CONFIG,
};

pub mod input;
pub mod transport;
pub mod usb_xinput;

pub use input::{AnalogStick, ButtonPad};
pub use transport::{ChannelTransport, FeedbackChannel, ReportChannel};
pub use usb_xinput::{configure_usb_xinput, usb_config, DeviceHandler, XInputReader, XInputWriter};

/// Whether the D-pad applies SOCD cleaning.
pub const SOCD_DPAD: bool = cfg!(feature = "socd-dpad");
