//! Start-up configuration for [`XInputController`](crate::XInputController).

use xinput_proto::Range;

/// Initial input ranges and send policy.
///
/// Customize this at compile-time by creating your own const.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerConfig {
    /// Range trigger values arrive in, for both triggers.
    pub trigger_range: Range,
    /// Range joystick axes arrive in, for both sticks.
    pub joystick_range: Range,
    /// Send a report as soon as a mutation changes it.
    pub auto_send: bool,
}

/// Native ranges, auto-send on.
pub const DEFAULT_CONFIG: ControllerConfig = ControllerConfig {
    trigger_range: Range::TRIGGER_NATIVE,
    joystick_range: Range::JOYSTICK_NATIVE,
    auto_send: true,
};

impl Default for ControllerConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}
