//! Radio device contract
//!
//! Protocol code (packet framing, retransmission, channel hopping) programs
//! against [`Radio`] and never sees which chip is underneath. Each chip
//! driver implements it on top of its own [`Hardware`](crate::Hardware).
//!
//! The trait follows the same latch-and-check-later style as the hardware
//! layer: operations do not return errors, and callers inspect
//! [`Radio::error`] after a sequence of calls.

use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

use crate::Fault;

/// A packet radio, independent of the chip that implements it.
pub trait Radio {
    /// Configures the chip to operate at `frequency` hertz, ready to send and
    /// receive.
    fn init(&mut self, frequency: u32);

    /// Returns the chip to a clean operating state without releasing the bus
    /// or interrupt line.
    fn reset(&mut self);

    /// Releases all resources. No further calls are valid afterwards.
    fn close(&mut self);

    /// Current carrier frequency in hertz
    fn frequency(&mut self) -> u32;

    /// Sets the carrier frequency in hertz.
    fn set_frequency(&mut self, frequency: u32);

    /// Transmits `data`.
    fn send(&mut self, data: &[u8]);

    /// Waits up to `timeout` for a packet.
    ///
    /// Returns the payload and a chip-specific signal value such as RSSI.
    /// An empty payload means nothing arrived.
    fn receive(&mut self, timeout: Duration) -> (Vec<u8>, i32);

    /// Transmits `data`, then waits up to `timeout` for a reply.
    fn send_and_receive(&mut self, data: &[u8], timeout: Duration) -> (Vec<u8>, i32) {
        self.send(data);
        self.receive(timeout)
    }

    /// Short diagnostic token for the chip's state, e.g. `"idle"` or `"rx"`
    fn state(&mut self) -> String;

    /// Returns the latched fault, if any.
    fn error(&self) -> Option<&Fault>;

    /// Replaces the latched fault. Passing `None` clears it.
    fn set_error(&mut self, fault: Option<Fault>);

    /// Chip name
    fn name(&self) -> &str;

    /// SPI device path
    fn device(&self) -> &str;
}

/// Amounts of data sent and received
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Counters {
    /// Amount sent
    pub sent: usize,
    /// Amount received
    pub received: usize,
}

/// Byte and packet counts kept by a driver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Statistics {
    /// Payload bytes
    pub bytes: Counters,
    /// Packets
    pub packets: Counters,
}

impl Statistics {
    /// Counts one sent packet of `len` bytes.
    pub fn record_sent(&mut self, len: usize) {
        self.bytes.sent += len;
        self.packets.sent += 1;
    }

    /// Counts one received packet of `len` bytes.
    pub fn record_received(&mut self, len: usize) {
        self.bytes.received += len;
        self.packets.received += 1;
    }
}
