//! Transport trait and error types.

use xinput_proto::REPORT_SIZE;

/// Error type for transport operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// USB/communication I/O error.
    Io,
    /// Device not ready (e.g., USB not configured).
    NotReady,
    /// Endpoint busy, the previous report has not gone out yet.
    Busy,
}

/// Link between the controller and the USB stack.
///
/// Every method must return immediately. Implementations that sit on top of
/// an async USB stack hand the bytes over to another task instead of
/// writing the endpoint themselves.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait Transport {
    /// Check if the host has configured the device.
    fn connected(&self) -> bool;

    /// Queue a report for the IN endpoint.
    ///
    /// Returns the number of bytes accepted.
    fn send(&mut self, report: &[u8]) -> Result<usize, TransportError>;

    /// Number of bytes waiting on the OUT endpoint, 0 if none.
    fn available(&self) -> usize;

    /// Copy the next pending OUT packet into `buf`.
    ///
    /// Returns the number of bytes copied, 0 if nothing was pending.
    fn recv(&mut self, buf: &mut [u8]) -> usize;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn connected(&self) -> bool {
        (**self).connected()
    }

    fn send(&mut self, report: &[u8]) -> Result<usize, TransportError> {
        (**self).send(report)
    }

    fn available(&self) -> usize {
        (**self).available()
    }

    fn recv(&mut self, buf: &mut [u8]) -> usize {
        (**self).recv(buf)
    }
}

/// Transport for builds without a USB device.
///
/// Reports are accepted and thrown away, nothing is ever received, and the
/// device never counts as connected.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTransport;

impl Transport for NullTransport {
    fn connected(&self) -> bool {
        false
    }

    fn send(&mut self, report: &[u8]) -> Result<usize, TransportError> {
        debug_assert!(report.len() <= REPORT_SIZE);
        Ok(report.len())
    }

    fn available(&self) -> usize {
        0
    }

    fn recv(&mut self, _buf: &mut [u8]) -> usize {
        0
    }
}
