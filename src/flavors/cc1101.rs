//! TI CC1101 and compatible (CC110L, CC1100)
//!
//! The header byte carries the register address in bits 5:0 with two flags:
//! - bit 7: 1 = read, 0 = write
//! - bit 6: 1 = burst, 0 = single
//!
//! Addresses 0x30-0x3D are command strobes when accessed as single
//! registers and read-only status registers when read with the burst bit
//! set, so status registers such as [`Cc1101Version`] must go through the
//! burst-read encoding.

use core::convert::Infallible;

use bitflags::bitflags;
use regiface::{register, FromByteArray, ReadableRegister};

use crate::{BusConfig, Flavor};

bitflags! {
    /// Access flags in the CC1101 header byte
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Cc1101Header: u8 {
        /// Read access
        const READ = 1 << 7;
        /// Burst access
        const BURST = 1 << 6;
    }
}

/// Chip version the CC1101 reports in its VERSION status register
pub const CC1101_VERSION: u16 = 0x14;

/// CC1101 flavor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cc1101 {
    bus: BusConfig,
}

impl Cc1101 {
    /// Creates a CC1101 flavor attached as described by `bus`.
    pub fn new(bus: BusConfig) -> Self {
        Self { bus }
    }

    /// Bus configuration of this flavor
    pub fn bus(&self) -> &BusConfig {
        &self.bus
    }

    fn encode(addr: u8, flags: Cc1101Header) -> u8 {
        (addr & !Cc1101Header::all().bits()) | flags.bits()
    }
}

impl Default for Cc1101 {
    fn default() -> Self {
        Self::new(
            BusConfig::new("CC1101", "/dev/spidev0.0")
                .with_speed(6_000_000)
                .with_interrupt_pin(24),
        )
    }
}

impl Flavor for Cc1101 {
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
        Self::encode(addr, Cc1101Header::READ)
    }

    fn read_burst_address(&self, addr: u8) -> u8 {
        Self::encode(addr, Cc1101Header::READ | Cc1101Header::BURST)
    }

    fn write_single_address(&self, addr: u8) -> u8 {
        Self::encode(addr, Cc1101Header::empty())
    }

    fn write_burst_address(&self, addr: u8) -> u8 {
        Self::encode(addr, Cc1101Header::BURST)
    }
}

/// Part number status register (address: 0x30)
#[register(0x30u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister)]
pub struct Cc1101PartNumber {
    /// Chip part number, 0x00 for the CC1101
    pub value: u8,
}

impl FromByteArray for Cc1101PartNumber {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self { value: bytes[0] })
    }
}

/// Version status register (address: 0x31)
///
/// Reads [`CC1101_VERSION`] on current silicon.
#[register(0x31u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister)]
pub struct Cc1101Version {
    /// Chip version number
    pub value: u8,
}

impl FromByteArray for Cc1101Version {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self { value: bytes[0] })
    }
}

impl From<Cc1101Version> for u16 {
    fn from(version: Cc1101Version) -> Self {
        u16::from(version.value)
    }
}
