#![cfg_attr(not(test), no_std)]
//! SPI Radio Hardware Layer
//!
//! This crate provides fault-latched register access for sub-GHz radio
//! transceivers attached over SPI with a separate interrupt line, such as the
//! TI CC1101 or the HopeRF RFM69. It sits between the host's bus primitives
//! and chip-specific protocol code.
//!
//! # Architecture
//! The crate is organized into several modules:
//!
//! - [`bus`]: What the layer needs from the host
//!   - Opening and closing SPI connections by device path
//!   - Configuring edge-triggered interrupt lines and waiting with a timeout
//!
//! - [`hardware`]: Register access for one device
//!   - Single and burst reads/writes framed by the chip's flavor
//!   - Typed register access through `regiface`
//!   - Blocking and async forms
//!
//! - [`fault`]: The sticky fault latch
//!
//! - [`flavor`]: The chip-family descriptor contract
//!   - [`flavors`]: CC1101, RFM69 and offset-addressed chips
//!
//! - [`radio`]: The chip-independent contract protocol code programs against
//!
//! - [`frequency`]: Megahertz formatting
//!
//! # Fault handling
//! Operations do not return `Result`. The first failure is latched and:
//! - reads are skipped while a fault is latched, returning `0` or an empty buffer
//! - writes are always attempted, so a chain of writes can be checked once
//! - [`Hardware::set_error`]`(None)` is the only way to clear the latch
//!
//! Passing an odd-length table to [`Hardware::write_each`] is a caller bug and
//! panics rather than latching a fault.
//!
//! # Example
//! ```no_run
//! use core::time::Duration;
//! use spiradio::{Cc1101, Cc1101Version, GpioPort, Hardware, InterruptLine, SpiPort, CC1101_VERSION};
//!
//! fn bring_up<S, G>(spi: &mut S, gpio: &mut G) -> Option<u8>
//! where
//!     S: SpiPort,
//!     S::Connection: embedded_hal::spi::SpiDevice,
//!     G: GpioPort,
//!     G::Pin: InterruptLine,
//! {
//!     let flavor = Cc1101::default();
//!     let mut hw = Hardware::open(&flavor, spi, gpio);
//!
//!     hw.verify_version::<Cc1101Version>(CC1101_VERSION);
//!     hw.write_register(0x02, 0x06);
//!     hw.await_interrupt(Duration::from_millis(500));
//!     let length = hw.read_register(0x3F);
//!
//!     // A timeout only means nothing arrived; anything else is a broken device.
//!     if hw.error().is_some_and(|fault| !fault.is_timeout()) {
//!         hw.close();
//!     }
//!     hw.error().is_none().then_some(length)
//! }
//! ```

extern crate alloc;

pub mod bus;
pub mod fault;
pub mod flavor;
pub mod flavors;
pub mod frequency;
pub mod hardware;
pub mod radio;

pub use bus::*;
pub use fault::{Fault, FaultLatch};
pub use flavor::{BusConfig, Flavor};
pub use flavors::*;
pub use frequency::{mega_hertz, MegaHertz};
pub use hardware::Hardware;
pub use radio::{Counters, Radio, Statistics};
