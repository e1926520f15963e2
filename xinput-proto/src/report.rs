//! The 20-byte XInput input report.
//!
//! ```text
//! offset  field
//! 0       message type (0x00)
//! 1       packet length (0x14)
//! 2       d-pad up/down/left/right, start, back, L3, R3 (bit 0..7)
//! 3       LB, RB, guide, -, A, B, X, Y (bit 0..7)
//! 4       left trigger
//! 5       right trigger
//! 6..14   left X, left Y, right X, right Y (i16 little-endian)
//! 14..20  reserved
//! ```

use crate::control::{ButtonMap, JoystickMap, TriggerMap};

/// Size of the report in bytes.
pub const REPORT_SIZE: usize = 20;

/// Message type stamped at offset 0.
pub const MESSAGE_TYPE: u8 = 0x00;

/// Packet length stamped at offset 1.
pub const PACKET_LENGTH: u8 = REPORT_SIZE as u8;

/// Number of header bytes that never change after construction.
pub const HEADER_SIZE: usize = 2;

pub const DPAD_BYTE: usize = 2;
pub const FACE_BYTE: usize = 3;
pub const LEFT_TRIGGER: usize = 4;
pub const RIGHT_TRIGGER: usize = 5;
pub const LEFT_STICK_X: usize = 6;
pub const LEFT_STICK_Y: usize = 8;
pub const RIGHT_STICK_X: usize = 10;
pub const RIGHT_STICK_Y: usize = 12;

/// Outgoing controller report.
///
/// Field accessors take the static maps from [`crate::control`]; the header
/// bytes are only ever written by [`Report::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Report {
    bytes: [u8; REPORT_SIZE],
}

impl Report {
    /// A neutral report with the header stamped.
    #[must_use]
    pub const fn new() -> Self {
        let mut bytes = [0u8; REPORT_SIZE];
        bytes[0] = MESSAGE_TYPE;
        bytes[1] = PACKET_LENGTH;
        Self { bytes }
    }

    /// Zero every field after the header.
    pub fn clear(&mut self) {
        self.bytes[HEADER_SIZE..].fill(0);
    }

    /// True if no control is active.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.bytes[HEADER_SIZE..].iter().all(|&b| b == 0)
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; REPORT_SIZE] {
        &self.bytes
    }

    #[inline]
    #[must_use]
    pub fn button(&self, map: ButtonMap) -> bool {
        self.bytes[map.index] & map.mask != 0
    }

    #[inline]
    pub fn set_button(&mut self, map: ButtonMap, pressed: bool) {
        if pressed {
            self.bytes[map.index] |= map.mask;
        } else {
            self.bytes[map.index] &= !map.mask;
        }
    }

    #[inline]
    #[must_use]
    pub fn trigger(&self, map: TriggerMap) -> u8 {
        self.bytes[map.index]
    }

    #[inline]
    pub fn set_trigger(&mut self, map: TriggerMap, value: u8) {
        self.bytes[map.index] = value;
    }

    /// Joystick position as `(x, y)`.
    #[inline]
    #[must_use]
    pub fn joystick(&self, map: JoystickMap) -> (i16, i16) {
        (
            i16::from_le_bytes([self.bytes[map.x_low], self.bytes[map.x_high]]),
            i16::from_le_bytes([self.bytes[map.y_low], self.bytes[map.y_high]]),
        )
    }

    #[inline]
    pub fn set_joystick(&mut self, map: JoystickMap, x: i16, y: i16) {
        let [x_low, x_high] = x.to_le_bytes();
        let [y_low, y_high] = y.to_le_bytes();
        self.bytes[map.x_low] = x_low;
        self.bytes[map.x_high] = x_high;
        self.bytes[map.y_low] = y_low;
        self.bytes[map.y_high] = y_high;
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<[u8]> for Report {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{button_map, joystick_map, trigger_map, Control};

    #[test]
    fn test_new_report_has_header_only() {
        let report = Report::new();
        let mut expected = [0u8; REPORT_SIZE];
        expected[1] = 0x14;
        assert_eq!(report.as_bytes(), &expected);
        assert!(report.is_neutral());
    }

    #[test]
    fn test_button_bits() {
        let mut report = Report::new();
        report.set_button(button_map(Control::ButtonA).unwrap(), true);
        report.set_button(button_map(Control::DpadLeft).unwrap(), true);
        assert_eq!(report.as_bytes()[2], 0x04);
        assert_eq!(report.as_bytes()[3], 0x10);

        report.set_button(button_map(Control::ButtonA).unwrap(), false);
        assert_eq!(report.as_bytes()[3], 0x00);
        assert!(report.button(button_map(Control::DpadLeft).unwrap()));
    }

    #[test]
    fn test_joystick_little_endian() {
        let mut report = Report::new();
        let map = joystick_map(Control::JoyLeft).unwrap();
        report.set_joystick(map, -2, 0x1234);
        assert_eq!(&report.as_bytes()[6..10], &[0xFE, 0xFF, 0x34, 0x12]);
        assert_eq!(report.joystick(map), (-2, 0x1234));
    }

    #[test]
    fn test_clear_keeps_header() {
        let mut report = Report::new();
        report.set_trigger(trigger_map(Control::TriggerRight).unwrap(), 200);
        report.set_joystick(joystick_map(Control::JoyRight).unwrap(), i16::MIN, i16::MAX);
        assert!(!report.is_neutral());

        report.clear();
        assert_eq!(report, Report::new());
    }
}
