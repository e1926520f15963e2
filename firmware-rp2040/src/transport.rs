//! Channel-backed [`Transport`] between the pad task and the USB tasks.
//!
//! The controller runs in its own task and must never await. Reports are
//! pushed into a bounded channel drained by [`XInputWriter`]; feedback
//! packets arrive through a second channel filled by [`XInputReader`].
//!
//! [`XInputWriter`]: crate::usb_xinput::XInputWriter
//! [`XInputReader`]: crate::usb_xinput::XInputReader

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::Vec;
use portable_atomic::{AtomicBool, Ordering};
use xinput_core::{Transport, TransportError, REPORT_SIZE};
use xinput_proto::MAX_FEEDBACK_SIZE;

/// Reports waiting for the IN endpoint.
pub const REPORT_QUEUE_DEPTH: usize = 4;

/// Feedback packets waiting for the pad task.
pub const FEEDBACK_QUEUE_DEPTH: usize = 4;

/// One feedback packet as read from the OUT endpoint.
pub type FeedbackFrame = Vec<u8, MAX_FEEDBACK_SIZE>;

pub type ReportChannel = Channel<CriticalSectionRawMutex, [u8; REPORT_SIZE], REPORT_QUEUE_DEPTH>;
pub type FeedbackChannel = Channel<CriticalSectionRawMutex, FeedbackFrame, FEEDBACK_QUEUE_DEPTH>;

/// Non-blocking transport over the report and feedback channels.
pub struct ChannelTransport<'a> {
    reports: &'a ReportChannel,
    feedback: &'a FeedbackChannel,
    configured: &'a AtomicBool,
    // Packet pulled off the channel by `available` but not yet read.
    pending: RefCell<Option<FeedbackFrame>>,
}

impl<'a> ChannelTransport<'a> {
    #[must_use]
    pub fn new(
        reports: &'a ReportChannel,
        feedback: &'a FeedbackChannel,
        configured: &'a AtomicBool,
    ) -> Self {
        Self {
            reports,
            feedback,
            configured,
            pending: RefCell::new(None),
        }
    }

    /// Make sure `pending` holds a non-empty packet if one is queued.
    fn fill_pending(&self, pending: &mut Option<FeedbackFrame>) {
        while pending.as_ref().is_none_or(|frame| frame.is_empty()) {
            match self.feedback.try_receive() {
                Ok(frame) => *pending = Some(frame),
                Err(_) => {
                    *pending = None;
                    return;
                }
            }
        }
    }
}

impl Transport for ChannelTransport<'_> {
    fn connected(&self) -> bool {
        self.configured.load(Ordering::Relaxed)
    }

    fn send(&mut self, report: &[u8]) -> Result<usize, TransportError> {
        if !self.connected() {
            return Err(TransportError::NotReady);
        }
        let bytes: [u8; REPORT_SIZE] = report.try_into().map_err(|_| TransportError::Io)?;
        self.reports
            .try_send(bytes)
            .map_err(|_| TransportError::Busy)?;
        Ok(REPORT_SIZE)
    }

    fn available(&self) -> usize {
        let mut pending = self.pending.borrow_mut();
        self.fill_pending(&mut pending);
        pending.as_ref().map_or(0, |frame| frame.len())
    }

    fn recv(&mut self, buf: &mut [u8]) -> usize {
        let frame = {
            let mut pending = self.pending.borrow_mut();
            self.fill_pending(&mut pending);
            pending.take()
        };
        let Some(frame) = frame else {
            return 0;
        };
        let len = frame.len().min(buf.len());
        buf[..len].copy_from_slice(&frame[..len]);
        len
    }
}
