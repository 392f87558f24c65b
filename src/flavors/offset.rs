//! Offset-addressed chips
//!
//! Some chips split their command space into fixed ranges instead of flag
//! bits: reads start at one base, writes at another, and burst access to a
//! register lives a fixed distance above its single-access address. The
//! nRF24L01 command set (`R_REGISTER = 0x00 + addr`, `W_REGISTER = 0x20 +
//! addr`) is one example.

use crate::{BusConfig, Flavor};

/// Flavor for chips with range-offset register addressing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offset {
    bus: BusConfig,
    read_base: u8,
    write_base: u8,
    burst_offset: u8,
}

impl Offset {
    /// Creates an offset-addressed flavor.
    ///
    /// # Arguments
    /// * `read_base` - Header byte of a single read of register 0
    /// * `write_base` - Header byte of a single write of register 0
    /// * `burst_offset` - Distance from a single header to its burst header
    pub fn new(bus: BusConfig, read_base: u8, write_base: u8, burst_offset: u8) -> Self {
        Self {
            bus,
            read_base,
            write_base,
            burst_offset,
        }
    }

    /// nRF24L01 command ranges: reads at 0x00, writes at 0x20, no separate
    /// burst range.
    pub fn nrf24(bus: BusConfig) -> Self {
        Self::new(bus, 0x00, 0x20, 0x00)
    }

    /// Bus configuration of this flavor
    pub fn bus(&self) -> &BusConfig {
        &self.bus
    }
}

impl Flavor for Offset {
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
        self.read_base.wrapping_add(addr)
    }

    fn read_burst_address(&self, addr: u8) -> u8 {
        self.read_base
            .wrapping_add(self.burst_offset)
            .wrapping_add(addr)
    }

    fn write_single_address(&self, addr: u8) -> u8 {
        self.write_base.wrapping_add(addr)
    }

    fn write_burst_address(&self, addr: u8) -> u8 {
        self.write_base
            .wrapping_add(self.burst_offset)
            .wrapping_add(addr)
    }
}
