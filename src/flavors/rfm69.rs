//! HopeRF RFM69 (Semtech SX1231 core)
//!
//! Bit 7 of the header byte selects the direction (1 = write, 0 = read) and
//! bits 6:0 hold the address. The chip auto-increments the address for as
//! long as chip-select stays asserted, so burst and single headers are the
//! same byte.

use core::convert::Infallible;

use bitflags::bitflags;
use regiface::{register, FromByteArray, ReadableRegister};

use crate::{BusConfig, Flavor};

bitflags! {
    /// Access flags in the RFM69 header byte
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Rfm69Header: u8 {
        /// Write access
        const WRITE = 1 << 7;
    }
}

/// Silicon revision the RFM69 reports in RegVersion
pub const RFM69_VERSION: u16 = 0x24;

/// RFM69 flavor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rfm69 {
    bus: BusConfig,
}

impl Rfm69 {
    /// Creates an RFM69 flavor attached as described by `bus`.
    pub fn new(bus: BusConfig) -> Self {
        Self { bus }
    }

    /// Bus configuration of this flavor
    pub fn bus(&self) -> &BusConfig {
        &self.bus
    }

    fn read(addr: u8) -> u8 {
        addr & !Rfm69Header::WRITE.bits()
    }

    fn write(addr: u8) -> u8 {
        addr | Rfm69Header::WRITE.bits()
    }
}

impl Default for Rfm69 {
    fn default() -> Self {
        Self::new(
            BusConfig::new("RFM69", "/dev/spidev0.1")
                .with_speed(10_000_000)
                .with_chip_select(1)
                .with_interrupt_pin(25),
        )
    }
}

impl Flavor for Rfm69 {
    fn name(&self) -> &str {
        &self.bus.name
    }

    fn device(&self) -> &str {
        &self.bus.device
    }

    fn speed(&self) -> u32 {
        self.bus.speed_hz
    }

    fn chip_select(&self) -> u8 {
        self.bus.chip_select
    }

    fn interrupt_pin(&self) -> u32 {
        self.bus.interrupt_pin
    }

    fn read_single_address(&self, addr: u8) -> u8 {
        Self::read(addr)
    }

    fn read_burst_address(&self, addr: u8) -> u8 {
        Self::read(addr)
    }

    fn write_single_address(&self, addr: u8) -> u8 {
        Self::write(addr)
    }

    fn write_burst_address(&self, addr: u8) -> u8 {
        Self::write(addr)
    }
}

/// RegVersion (address: 0x10)
///
/// Bits 7:4 hold the full revision number and bits 3:0 the metal mask
/// revision.
#[register(0x10u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister)]
pub struct Rfm69Version {
    /// Raw version byte
    pub value: u8,
}

impl Rfm69Version {
    /// Full revision number
    pub fn revision(&self) -> u8 {
        self.value >> 4
    }

    /// Metal mask revision
    pub fn mask(&self) -> u8 {
        self.value & 0x0F
    }
}

impl FromByteArray for Rfm69Version {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self { value: bytes[0] })
    }
}

impl From<Rfm69Version> for u16 {
    fn from(version: Rfm69Version) -> Self {
        u16::from(version.value)
    }
}
