//! Platform-agnostic XInput controller state and transport abstraction.
//!
//! This crate provides the controller half of an emulated Xbox 360 wired
//! pad without any platform-specific dependencies. It can be used both in
//! embedded `no_std` environments and on host for testing.
//!
//! # Overview
//!
//! - [`controller`]: The state model ([`XInputController`])
//! - [`transport`]: Transport trait ([`Transport`], [`NullTransport`])
//! - [`config`]: Start-up configuration ([`ControllerConfig`])
//!
//! Wire-format types are re-exported from [`xinput_proto`].
//!
//! # Send Policy
//!
//! A report goes out automatically if and only if a mutation changed it and
//! auto-send is on. With auto-send off, call
//! [`XInputController::send`] yourself; it does nothing when the report is
//! unchanged.
//!
//! # Example
//!
//! ```rust
//! use xinput_core::{Control, NullTransport, XInputController};
//!
//! let mut pad = XInputController::new(NullTransport);
//! pad.set_auto_send(false);
//! pad.set_dpad(true, false, true, true, true);
//! assert!(pad.dpad(Control::DpadUp));
//! assert!(!pad.dpad(Control::DpadLeft));
//! assert_eq!(pad.send(), Ok(20));
//! assert_eq!(pad.send(), Ok(0));
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting and logging (for embedded targets)
//! - **`log`**: Log through the `log` facade instead
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

// Must come first so the logging macros are visible to the modules below
#[macro_use]
mod fmt;

pub mod config;
pub mod controller;
pub mod transport;

// Re-export main types at crate root
pub use config::{ControllerConfig, DEFAULT_CONFIG};
pub use controller::{ReceiveCallback, XInputController};
pub use transport::{NullTransport, Transport, TransportError};
pub use xinput_proto::{
    Control, Directions, Feedback, FeedbackPacket, LedPattern, Range, Report, REPORT_SIZE,
};
