//! XInput wire format for an emulated Xbox 360 wired controller.
//!
//! This crate is the I/O-free half of the controller:
//!
//! - **Controls**: [`Control`] and the static maps that locate each control in
//!   the report ([`button_map`], [`trigger_map`], [`joystick_map`])
//! - **Report**: the 20-byte input report ([`Report`])
//! - **Feedback**: rumble and LED packets sent by the host
//!   ([`FeedbackPacket`], [`Feedback`], [`LedPattern`])
//! - **Ranges**: clamped linear rescaling into the wire ranges ([`Range`],
//!   [`rescale`])
//! - **SOCD**: cleaning of opposing digital directions ([`Directions`])
//!
//! # Example
//!
//! ```
//! use xinput_proto::{button_map, joystick_map, Control, FeedbackPacket, Report};
//!
//! let mut report = Report::new();
//! report.set_button(button_map(Control::ButtonA).unwrap(), true);
//! report.set_joystick(joystick_map(Control::JoyLeft).unwrap(), 0, i16::MAX);
//! assert_eq!(report.as_bytes()[3], 0x10);
//!
//! let packet = FeedbackPacket::decode(&[0x01, 0x03, 0x06]);
//! assert_eq!(packet, Some(FeedbackPacket::Led(0x06)));
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod control;
pub mod feedback;
pub mod range;
pub mod report;
pub mod socd;

pub use control::{
    button_map, joystick_map, trigger_map, ButtonMap, Control, JoystickMap, TriggerMap,
    UnknownControl,
};
pub use feedback::{
    Feedback, FeedbackPacket, LedPattern, UnknownLedPattern, LED_TYPE, MAX_FEEDBACK_SIZE,
    MIN_FEEDBACK_SIZE, RUMBLE_TYPE,
};
pub use range::{rescale, InvalidRange, Range};
pub use report::{Report, REPORT_SIZE};
pub use socd::Directions;
