//! XInputController: the controller state model.
//!
//! Mutators edit the report in place. A mutation that changes at least one
//! byte marks the report dirty and, with auto-send on, sends it right away.
//! A mutation that changes nothing is a no-op in every respect.

use xinput_proto::{
    button_map, joystick_map, rescale, trigger_map, ButtonMap, Control, Directions, Feedback,
    FeedbackPacket, JoystickMap, LedPattern, Range, Report, TriggerMap, MAX_FEEDBACK_SIZE,
};

use crate::config::{ControllerConfig, DEFAULT_CONFIG};
use crate::transport::{Transport, TransportError};

/// Called after every decoded feedback packet with the packet type and the
/// feedback state as updated by that packet.
pub type ReceiveCallback = fn(packet_type: u8, feedback: &Feedback);

/// Configured input range of each rescaled axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ranges {
    trigger_left: Range,
    trigger_right: Range,
    joy_left: Range,
    joy_right: Range,
}

impl Ranges {
    const fn new(trigger: Range, joystick: Range) -> Self {
        Self {
            trigger_left: trigger,
            trigger_right: trigger,
            joy_left: joystick,
            joy_right: joystick,
        }
    }

    fn get(&self, control: Control) -> Option<Range> {
        match control {
            Control::TriggerLeft => Some(self.trigger_left),
            Control::TriggerRight => Some(self.trigger_right),
            Control::JoyLeft => Some(self.joy_left),
            Control::JoyRight => Some(self.joy_right),
            _ => None,
        }
    }

    fn get_mut(&mut self, control: Control) -> Option<&mut Range> {
        match control {
            Control::TriggerLeft => Some(&mut self.trigger_left),
            Control::TriggerRight => Some(&mut self.trigger_right),
            Control::JoyLeft => Some(&mut self.joy_left),
            Control::JoyRight => Some(&mut self.joy_right),
            _ => None,
        }
    }
}

const NATIVE_RANGES: Ranges = Ranges::new(TriggerMap::NATIVE, JoystickMap::NATIVE);

/// Emulated Xbox 360 controller on top of a [`Transport`].
///
/// # Example
///
/// ```
/// use xinput_core::{Control, NullTransport, XInputController};
///
/// let mut pad = XInputController::new(NullTransport);
/// pad.press(Control::ButtonA);
/// pad.set_trigger(Control::TriggerLeft, 128);
/// pad.set_joystick_digital(Control::JoyLeft, true, false, false, true, true);
///
/// assert!(pad.button(Control::ButtonA));
/// assert_eq!(pad.joystick(Control::JoyLeft), (i16::MAX, i16::MAX));
/// ```
pub struct XInputController<T> {
    transport: T,
    report: Report,
    feedback: Feedback,
    ranges: Ranges,
    dirty: bool,
    auto_send: bool,
    callback: Option<ReceiveCallback>,
}

impl<T: Transport> XInputController<T> {
    /// Create a controller with native ranges and auto-send on.
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, DEFAULT_CONFIG)
    }

    /// Create a controller with custom initial ranges and send policy.
    pub fn with_config(transport: T, config: ControllerConfig) -> Self {
        Self {
            transport,
            report: Report::new(),
            feedback: Feedback::NONE,
            ranges: Ranges::new(config.trigger_range, config.joystick_range),
            dirty: false,
            auto_send: config.auto_send,
            callback: None,
        }
    }

    /// Return to power-on state.
    ///
    /// Clears every control, forgets all feedback, restores the native
    /// ranges, drops the receive callback and turns auto-send back on. If
    /// any control was active the neutral report is marked dirty and, with
    /// auto-send now on, sent.
    pub fn reset(&mut self) {
        self.feedback = Feedback::NONE;
        self.ranges = NATIVE_RANGES;
        self.callback = None;
        self.auto_send = true;
        self.release_all();
    }

    // --- Buttons ---

    /// Press a button.
    pub fn press(&mut self, control: Control) {
        self.set_button(control, true);
    }

    /// Release a button.
    pub fn release(&mut self, control: Control) {
        self.set_button(control, false);
    }

    /// Press or release a button.
    ///
    /// Triggers act as digital buttons here: pressed drives them to the top
    /// of their configured range, released to the bottom.
    pub fn set_button(&mut self, control: Control, pressed: bool) {
        if let Some(map) = button_map(control) {
            if self.write_button(map, pressed) {
                self.mark_dirty();
            }
        } else if let (Some(_), Some(range)) = (trigger_map(control), self.ranges.get(control)) {
            let value = if pressed { range.max() } else { range.min() };
            self.set_trigger(control, value);
        }
    }

    /// Set one D-pad direction.
    pub fn set_dpad_direction(&mut self, control: Control, pressed: bool) {
        self.set_button(control, pressed);
    }

    /// Set all four D-pad directions as one update.
    ///
    /// With `socd` set, up + down resolves to up and left + right to neutral.
    /// At most one report is sent, after all four directions are written.
    pub fn set_dpad(&mut self, up: bool, down: bool, left: bool, right: bool, socd: bool) {
        self.set_dpad_directions(Directions::new(up, down, left, right), socd);
    }

    /// [`set_dpad`](Self::set_dpad) taking a [`Directions`] value.
    pub fn set_dpad_directions(&mut self, directions: Directions, socd: bool) {
        let d = directions.resolve(socd);
        let mut changed = false;
        for (control, pressed) in [
            (Control::DpadUp, d.up),
            (Control::DpadDown, d.down),
            (Control::DpadLeft, d.left),
            (Control::DpadRight, d.right),
        ] {
            if let Some(map) = button_map(control) {
                changed |= self.write_button(map, pressed);
            }
        }
        if changed {
            self.mark_dirty();
        }
    }

    // --- Triggers ---

    /// Set a trigger from a value in its configured range.
    pub fn set_trigger(&mut self, control: Control, value: i32) {
        let (Some(map), Some(range)) = (trigger_map(control), self.ranges.get(control)) else {
            return;
        };

        // rescale never leaves the native 0..=255 range
        let value = rescale(value, range, TriggerMap::NATIVE) as u8;
        if self.report.trigger(map) == value {
            return;
        }
        self.report.set_trigger(map, value);
        self.mark_dirty();
    }

    // --- Joysticks ---

    /// Set a joystick from values in its configured range.
    pub fn set_joystick(&mut self, control: Control, x: i32, y: i32) {
        let (Some(_), Some(range)) = (joystick_map(control), self.ranges.get(control)) else {
            return;
        };

        let x = rescale(x, range, JoystickMap::NATIVE) as i16;
        let y = rescale(y, range, JoystickMap::NATIVE) as i16;
        self.set_joystick_direct(control, x, y);
    }

    /// Drive a joystick to its extremes from four digital directions.
    ///
    /// With `socd` set the directions are cleaned as in
    /// [`set_dpad`](Self::set_dpad) first. An axis whose two directions are
    /// still both held afterwards sits at 0.
    pub fn set_joystick_digital(
        &mut self,
        control: Control,
        up: bool,
        down: bool,
        left: bool,
        right: bool,
        socd: bool,
    ) {
        let (x, y) = Directions::new(up, down, left, right).resolve(socd).axes();
        self.set_joystick_direct(control, x, y);
    }

    /// Write raw wire values to a joystick, bypassing the configured range.
    pub fn set_joystick_direct(&mut self, control: Control, x: i16, y: i16) {
        let Some(map) = joystick_map(control) else {
            return;
        };
        if self.report.joystick(map) == (x, y) {
            return;
        }
        self.report.set_joystick(map, x, y);
        self.mark_dirty();
    }

    /// Release every button and center every axis.
    pub fn release_all(&mut self) {
        if self.report.is_neutral() {
            return;
        }
        self.report.clear();
        self.mark_dirty();
    }

    // --- Control state ---

    /// Button state. Stick controls read their click button.
    #[must_use]
    pub fn button(&self, control: Control) -> bool {
        button_map(control).is_some_and(|map| self.report.button(map))
    }

    /// D-pad direction state.
    #[must_use]
    pub fn dpad(&self, control: Control) -> bool {
        self.button(control)
    }

    /// Trigger value on the wire (0-255).
    #[must_use]
    pub fn trigger(&self, control: Control) -> u8 {
        trigger_map(control).map_or(0, |map| self.report.trigger(map))
    }

    /// Joystick position on the wire as `(x, y)`.
    #[must_use]
    pub fn joystick(&self, control: Control) -> (i16, i16) {
        joystick_map(control).map_or((0, 0), |map| self.report.joystick(map))
    }

    #[must_use]
    pub fn joystick_x(&self, control: Control) -> i16 {
        self.joystick(control).0
    }

    #[must_use]
    pub fn joystick_y(&self, control: Control) -> i16 {
        self.joystick(control).1
    }

    /// The report as it will be sent.
    #[inline]
    #[must_use]
    pub fn report(&self) -> &Report {
        &self.report
    }

    /// True if the report has changed since the last successful send.
    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // --- Feedback ---

    /// Player slot assigned by the host, 0 if none.
    #[must_use]
    pub fn player(&self) -> u8 {
        self.feedback.player
    }

    /// Both rumble motors as `left << 8 | right`.
    #[must_use]
    pub fn rumble(&self) -> u16 {
        self.feedback.rumble()
    }

    /// Large (left) motor intensity.
    #[must_use]
    pub fn rumble_left(&self) -> u8 {
        self.feedback.rumble_left
    }

    /// Small (right) motor intensity.
    #[must_use]
    pub fn rumble_right(&self) -> u8 {
        self.feedback.rumble_right
    }

    #[must_use]
    pub fn led_pattern(&self) -> LedPattern {
        self.feedback.led
    }

    #[must_use]
    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    // --- Configuration ---

    /// Set the input range of both triggers.
    ///
    /// Ignored if `min >= max`.
    pub fn set_trigger_range(&mut self, min: i32, max: i32) {
        self.set_range(Control::TriggerLeft, min, max);
        self.set_range(Control::TriggerRight, min, max);
    }

    /// Set the input range of both joysticks.
    ///
    /// Ignored if `min >= max`.
    pub fn set_joystick_range(&mut self, min: i32, max: i32) {
        self.set_range(Control::JoyLeft, min, max);
        self.set_range(Control::JoyRight, min, max);
    }

    /// Set the input range of a single trigger or joystick.
    ///
    /// Ignored if `min >= max` or the control has no range.
    pub fn set_range(&mut self, control: Control, min: i32, max: i32) {
        let Some(slot) = self.ranges.get_mut(control) else {
            return;
        };
        match Range::new(min, max) {
            Ok(range) => *slot = range,
            Err(_) => warn!("Ignoring empty range {}..{} for {:?}", min, max, control),
        }
    }

    /// Configured input range of a trigger or joystick.
    #[must_use]
    pub fn range(&self, control: Control) -> Option<Range> {
        self.ranges.get(control)
    }

    /// Turn automatic sending on or off.
    ///
    /// Turning it on does not flush pending changes; the next change will.
    pub fn set_auto_send(&mut self, enabled: bool) {
        self.auto_send = enabled;
    }

    #[must_use]
    pub fn auto_send(&self) -> bool {
        self.auto_send
    }

    /// Register the feedback callback, replacing any previous one.
    pub fn set_receive_callback(&mut self, callback: ReceiveCallback) {
        self.callback = Some(callback);
    }

    pub fn clear_receive_callback(&mut self) {
        self.callback = None;
    }

    // --- I/O ---

    /// Check if the host has configured the device.
    pub fn connected(&self) -> bool {
        self.transport.connected()
    }

    /// Send the report if it has unsent changes.
    ///
    /// Returns the number of bytes handed to the transport, 0 if there was
    /// nothing to send. On error the report stays dirty.
    pub fn send(&mut self) -> Result<usize, TransportError> {
        if !self.dirty {
            return Ok(0);
        }
        let written = self.transport.send(self.report.as_bytes())?;
        self.dirty = false;
        trace!("Sent report: {:?}", self.report);
        Ok(written)
    }

    /// Read and apply one pending feedback packet.
    ///
    /// Returns the number of bytes read, 0 if nothing was pending. Packets
    /// shorter than three bytes are dropped without invoking the callback.
    pub fn receive(&mut self) -> usize {
        if self.transport.available() == 0 {
            return 0;
        }

        let mut buf = [0u8; MAX_FEEDBACK_SIZE];
        let received = self.transport.recv(&mut buf).min(buf.len());

        let Some(packet) = FeedbackPacket::decode(&buf[..received]) else {
            debug!("Dropping {} byte feedback packet", received);
            return received;
        };

        match self.feedback.apply(packet) {
            Ok(true) => trace!("Feedback: {:?}", self.feedback),
            Ok(false) => {}
            Err(e) => debug!("Ignoring unknown LED pattern {}", e.0),
        }

        if let Some(callback) = self.callback {
            callback(packet.packet_type(), &self.feedback);
        }
        received
    }

    // --- Parts ---

    /// Get a reference to the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Get a mutable reference to the transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Decompose the controller into its transport.
    pub fn into_transport(self) -> T {
        self.transport
    }

    fn write_button(&mut self, map: ButtonMap, pressed: bool) -> bool {
        if self.report.button(map) == pressed {
            return false;
        }
        self.report.set_button(map, pressed);
        true
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
        if self.auto_send {
            if let Err(e) = self.send() {
                warn!("Auto-send failed: {:?}", e);
            }
        }
    }
}
