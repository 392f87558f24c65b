//! Chip-family descriptors
//!
//! A [`Flavor`] tells [`Hardware`](crate::Hardware) where a radio lives and
//! how its register addresses are framed on the wire. Chips differ in how
//! they mark reads, writes and burst transfers in the header byte:
//! - flag bits, e.g. bit 7 for read and bit 6 for burst
//! - fixed offsets, e.g. writes at `0x20 + addr`
//!
//! The trait makes no assumption about either scheme. Each of the four
//! address functions is a pure byte-to-byte mapping.

use alloc::string::String;

/// Bus parameters and register-address encoding for one chip family.
pub trait Flavor {
    /// Human-readable chip name
    fn name(&self) -> &str;

    /// SPI device path, e.g. `/dev/spidev0.0`
    fn device(&self) -> &str;

    /// SPI clock speed in hertz
    fn speed(&self) -> u32;

    /// Chip-select index on the bus
    fn chip_select(&self) -> u8;

    /// GPIO line carrying the radio's interrupt output
    fn interrupt_pin(&self) -> u32;

    /// Header byte for a single-register read of `addr`
    fn read_single_address(&self, addr: u8) -> u8;

    /// Header byte for a burst read starting at `addr`
    fn read_burst_address(&self, addr: u8) -> u8;

    /// Header byte for a single-register write of `addr`
    fn write_single_address(&self, addr: u8) -> u8;

    /// Header byte for a burst write starting at `addr`
    fn write_burst_address(&self, addr: u8) -> u8;
}

/// Where a radio is attached.
///
/// Concrete flavors embed one of these and forward the identity half of
/// [`Flavor`] to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusConfig {
    /// Human-readable chip name
    pub name: String,
    /// SPI device path
    pub device: String,
    /// SPI clock speed in hertz
    pub speed_hz: u32,
    /// Chip-select index
    pub chip_select: u8,
    /// Interrupt GPIO line
    pub interrupt_pin: u32,
}

impl BusConfig {
    /// Creates a configuration for `name` on `device`.
    pub fn new(name: impl Into<String>, device: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            device: device.into(),
            speed_hz: 1_000_000,
            chip_select: 0,
            interrupt_pin: 0,
        }
    }

    /// Sets the SPI device path.
    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device = device.into();
        self
    }

    /// Sets the SPI clock speed.
    pub fn with_speed(mut self, speed_hz: u32) -> Self {
        self.speed_hz = speed_hz;
        self
    }

    /// Sets the chip-select index.
    pub fn with_chip_select(mut self, chip_select: u8) -> Self {
        self.chip_select = chip_select;
        self
    }

    /// Sets the interrupt GPIO line.
    pub fn with_interrupt_pin(mut self, pin: u32) -> Self {
        self.interrupt_pin = pin;
        self
    }
}
