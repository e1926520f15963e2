//! Property-based tests for rescaling, SOCD handling, feedback decoding and
//! the send policy.

use proptest::prelude::*;
use xinput_core::{
    Control, Feedback, NullTransport, Range, Transport, TransportError, XInputController,
};
use xinput_proto::rescale;

/// Transport that only counts reports.
#[derive(Default)]
struct CountingTransport {
    sent: usize,
    inbound: Option<Vec<u8>>,
}

impl Transport for CountingTransport {
    fn connected(&self) -> bool {
        true
    }

    fn send(&mut self, report: &[u8]) -> Result<usize, TransportError> {
        self.sent += 1;
        Ok(report.len())
    }

    fn available(&self) -> usize {
        self.inbound.as_ref().map_or(0, Vec::len)
    }

    fn recv(&mut self, buf: &mut [u8]) -> usize {
        let Some(packet) = self.inbound.take() else {
            return 0;
        };
        let len = packet.len().min(buf.len());
        buf[..len].copy_from_slice(&packet[..len]);
        len
    }
}

fn any_range() -> impl Strategy<Value = Range> {
    (any::<i32>(), any::<i32>())
        .prop_filter("min must be below max", |(a, b)| a != b)
        .prop_map(|(a, b)| Range::new(a.min(b), a.max(b)).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Rescaled values always land inside the output range.
    #[test]
    fn prop_rescale_stays_in_output(value in any::<i32>(), input in any_range()) {
        for output in [Range::TRIGGER_NATIVE, Range::JOYSTICK_NATIVE] {
            let out = rescale(value, input, output);
            prop_assert!(out >= output.min() && out <= output.max(),
                "{value} in {input:?} -> {out} outside {output:?}");
        }
    }

    /// Larger inputs never produce smaller outputs.
    #[test]
    fn prop_rescale_monotone(a in any::<i32>(), b in any::<i32>(), input in any_range()) {
        let (lo, hi) = (a.min(b), a.max(b));
        let output = Range::JOYSTICK_NATIVE;
        prop_assert!(rescale(lo, input, output) <= rescale(hi, input, output));
    }

    /// Input bounds map exactly onto output bounds.
    #[test]
    fn prop_rescale_bounds_exact(input in any_range()) {
        let output = Range::TRIGGER_NATIVE;
        prop_assert_eq!(rescale(input.min(), input, output), 0);
        prop_assert_eq!(rescale(input.max(), input, output), 255);
    }

    /// With native ranges every trigger value is stored unchanged.
    #[test]
    fn prop_native_trigger_is_identity(value in 0i32..=255) {
        let mut pad = XInputController::new(NullTransport);
        pad.set_trigger(Control::TriggerRight, value);
        prop_assert_eq!(i32::from(pad.trigger(Control::TriggerRight)), value);
    }

    /// Raw opposing directions cancel; cleaned ones keep up and drop
    /// left + right.
    #[test]
    fn prop_opposing_directions(
        up in any::<bool>(),
        left in any::<bool>(),
        socd in any::<bool>(),
    ) {
        let mut pad = XInputController::new(NullTransport);
        pad.set_joystick_digital(Control::JoyRight, up, up, left, left, socd);
        let y = if socd && up { i16::MAX } else { 0 };
        prop_assert_eq!(pad.joystick(Control::JoyRight), (0, y));
    }

    /// A D-pad update sends at most one report, and none when repeated.
    #[test]
    fn prop_dpad_sends_at_most_once(
        first in any::<[bool; 4]>(),
        second in any::<[bool; 4]>(),
        socd in any::<bool>(),
    ) {
        let mut pad = XInputController::new(CountingTransport::default());
        let [u, d, l, r] = first;
        pad.set_dpad(u, d, l, r, socd);
        let after_first = pad.transport().sent;
        prop_assert!(after_first <= 1);

        pad.set_dpad(u, d, l, r, socd);
        prop_assert_eq!(pad.transport().sent, after_first);

        let [u, d, l, r] = second;
        pad.set_dpad(u, d, l, r, socd);
        prop_assert!(pad.transport().sent <= after_first + 1);
        prop_assert!(!pad.is_dirty());
    }

    /// Repeating any joystick write never sends a second report.
    #[test]
    fn prop_joystick_write_idempotent(x in any::<i16>(), y in any::<i16>()) {
        let mut pad = XInputController::new(CountingTransport::default());
        pad.set_joystick_direct(Control::JoyLeft, x, y);
        let sent = pad.transport().sent;
        pad.set_joystick_direct(Control::JoyLeft, x, y);
        pad.set_joystick(Control::JoyLeft, i32::from(x), i32::from(y));
        prop_assert_eq!(pad.transport().sent, sent);
        prop_assert_eq!(pad.joystick(Control::JoyLeft), (x, y));
    }

    /// Arbitrary inbound bytes never touch the report and keep the player
    /// slot in 0..=4.
    #[test]
    fn prop_feedback_decoding_is_total(packet in proptest::collection::vec(any::<u8>(), 1..16)) {
        let transport = CountingTransport { sent: 0, inbound: Some(packet.clone()) };
        let mut pad = XInputController::new(transport);
        let read = pad.receive();

        prop_assert_eq!(read, packet.len().min(8));
        prop_assert!(pad.player() <= 4);
        prop_assert_eq!(pad.transport().sent, 0);
        if packet.len() < 3 {
            prop_assert_eq!(pad.feedback(), &Feedback::NONE);
        }
    }
}
