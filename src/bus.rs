//! Bus and signal-line primitives
//!
//! The radio sits behind two host resources: a byte-oriented SPI connection
//! and an edge-triggered interrupt line. This module describes what
//! [`Hardware`](crate::Hardware) needs from each of them.
//!
//! Data movement uses the `embedded-hal` traits directly:
//! - [`embedded_hal::spi::SpiDevice`] for duplex transfers and writes
//!   (or [`embedded_hal_async::spi::SpiDevice`] for the async forms)
//! - [`embedded_hal::digital::InputPin`] for sampling the interrupt level
//!   (or [`embedded_hal_async::digital::Wait`] for async edge waits)
//!
//! The lifecycle pieces that `embedded-hal` leaves out (opening a device by
//! path, bounding the clock, closing, waiting for an edge with a timeout) are
//! the small traits below. A Linux backend would implement them on top of
//! spidev and the GPIO character device; tests implement them on mocks.

use core::fmt::Debug;
use core::time::Duration;

use embedded_hal::digital::InputPin;
use embedded_hal::spi::ErrorType;

/// Opens SPI connections by device path.
pub trait SpiPort {
    /// Connection handle produced by [`open`](SpiPort::open)
    type Connection: SpiConnection;
    /// Error reported when the device cannot be opened
    type Error: Debug;

    /// Opens the SPI device at `device` with the given clock speed and
    /// chip-select index.
    fn open(
        &mut self,
        device: &str,
        speed_hz: u32,
        chip_select: u8,
    ) -> Result<Self::Connection, Self::Error>;
}

/// An open SPI connection.
///
/// Transfers go through the `embedded-hal` SPI traits; this trait only covers
/// the controls that sit outside them.
pub trait SpiConnection: ErrorType + Sized {
    /// Caps the bus clock at `speed_hz`.
    fn set_max_speed(&mut self, speed_hz: u32) -> Result<(), Self::Error>;

    /// Releases the connection.
    fn close(self) -> Result<(), Self::Error>;
}

/// Signal edge that wakes an [`InterruptLine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Low to high transition
    Rising,
    /// High to low transition
    Falling,
    /// Either transition
    Both,
}

/// Configures GPIO lines as edge-triggered inputs.
pub trait GpioPort {
    /// Configured input line
    type Pin;
    /// Error reported when the line cannot be configured
    type Error: Debug;

    /// Configures `pin` as an input that reports `edge` transitions.
    fn interrupt(&mut self, pin: u32, edge: Edge, active_low: bool)
        -> Result<Self::Pin, Self::Error>;
}

/// An input line that can block until its configured edge occurs.
pub trait InterruptLine: InputPin {
    /// Blocks the calling thread for up to `timeout` waiting for an edge.
    ///
    /// Returns `Ok(true)` if the edge occurred and `Ok(false)` if the
    /// timeout elapsed first.
    fn wait(&mut self, timeout: Duration) -> Result<bool, Self::Error>;
}
