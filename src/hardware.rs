//! Radio Hardware Interface
//!
//! This module provides register-level access to an SPI-attached radio through the
//! [`Hardware`] struct, which owns:
//! - the open SPI connection
//! - the interrupt line the radio uses to signal pending data
//! - a [`FaultLatch`] holding the most recent failure
//!
//! Register addresses are framed by the chip's [`Flavor`], so the same code drives
//! any chip family once a flavor describes it.
//!
//! Operations do not return errors. Reads are skipped while a fault is latched and
//! yield `0` or an empty buffer, writes always reach the bus, and the caller checks
//! [`Hardware::error`] after a sequence of calls.
//!
//! # Example
//! ```no_run
//! use spiradio::{Cc1101, GpioPort, Hardware, InterruptLine, SpiPort};
//!
//! fn configure<S, G>(spi: &mut S, gpio: &mut G, flavor: &Cc1101)
//! where
//!     S: SpiPort,
//!     S::Connection: embedded_hal::spi::SpiDevice,
//!     G: GpioPort,
//!     G::Pin: InterruptLine,
//! {
//!     let mut hw = Hardware::open(flavor, spi, gpio);
//!
//!     hw.write_each(&[0x0B, 0x06, 0x0C, 0x00, 0x0D, 0x21]);
//!     let _status = hw.read_register(0x35);
//!
//!     if hw.error().is_some() {
//!         hw.close();
//!     }
//! }
//! ```

use alloc::format;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::time::Duration;

use embassy_futures::select::{select, Either};
use embedded_hal::digital::InputPin;
use embedded_hal::spi::SpiDevice;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::digital::Wait;
use regiface::{ByteArray, ReadableRegister, WritableRegister};

use crate::{Edge, Fault, FaultLatch, Flavor, GpioPort, InterruptLine, SpiConnection, SpiPort};

fn transfer_fault(operation: &str, err: impl Debug) -> Fault {
    Fault::Transfer(format!("{operation}: {err:?}"))
}

fn signal_fault(operation: &str, err: impl Debug) -> Fault {
    Fault::Signal(format!("{operation}: {err:?}"))
}

/// Register access to one radio.
///
/// # Type Parameters
/// * `F` - Flavor describing the chip; borrowed for the life of the hardware
/// * `D` - Open SPI connection
/// * `P` - Interrupt input line
pub struct Hardware<'f, F: ?Sized, D, P> {
    flavor: &'f F,
    connection: Option<D>,
    interrupt: Option<P>,
    latch: FaultLatch,
}

impl<'f, F, D, P> Hardware<'f, F, D, P>
where
    F: Flavor + ?Sized,
{
    /// Wraps an already-open SPI connection and interrupt line.
    pub fn new(flavor: &'f F, connection: D, interrupt: P) -> Self {
        Self {
            flavor,
            connection: Some(connection),
            interrupt: Some(interrupt),
            latch: FaultLatch::new(),
        }
    }

    /// Flavor this hardware was opened with
    pub fn flavor(&self) -> &'f F {
        self.flavor
    }

    /// Chip name from the flavor
    pub fn name(&self) -> &'f str {
        self.flavor.name()
    }

    /// SPI device path from the flavor
    pub fn device(&self) -> &'f str {
        self.flavor.device()
    }

    /// Returns the latched fault, if any.
    pub fn error(&self) -> Option<&Fault> {
        self.latch.get()
    }

    /// Replaces the latched fault. Passing `None` clears it and resumes reads.
    pub fn set_error(&mut self, fault: Option<Fault>) {
        self.latch.set(fault);
    }

    /// Returns true while a fault is latched.
    pub fn is_faulted(&self) -> bool {
        self.latch.is_faulted()
    }

    /// Underlying SPI connection, or `None` once closed
    pub fn connection_mut(&mut self) -> Option<&mut D> {
        self.connection.as_mut()
    }

    /// Whether the SPI connection and interrupt line are both held
    pub fn is_open(&self) -> bool {
        self.connection.is_some() && self.interrupt.is_some()
    }
}

impl<'f, F, D, P> Hardware<'f, F, D, P>
where
    F: Flavor + ?Sized,
    D: SpiConnection,
{
    /// Opens the radio described by `flavor`.
    ///
    /// Opens the SPI device, caps its clock at the flavor's speed and configures
    /// the interrupt line for rising edges. If a step fails, everything acquired so
    /// far is released and the returned hardware carries that step's fault. Check
    /// [`error`](Self::error) before use.
    pub fn open<S, G>(flavor: &'f F, spi: &mut S, gpio: &mut G) -> Self
    where
        S: SpiPort<Connection = D>,
        G: GpioPort<Pin = P>,
    {
        let mut hw = Self {
            flavor,
            connection: None,
            interrupt: None,
            latch: FaultLatch::new(),
        };

        let connection = match spi.open(flavor.device(), flavor.speed(), flavor.chip_select()) {
            Ok(connection) => hw.connection.insert(connection),
            Err(err) => {
                hw.latch.latch(transfer_fault("open", err));
                return hw;
            }
        };

        if let Err(err) = connection.set_max_speed(flavor.speed()) {
            hw.latch.latch(transfer_fault("set max speed", err));
            hw.release();
            return hw;
        }

        match gpio.interrupt(flavor.interrupt_pin(), Edge::Rising, false) {
            Ok(pin) => hw.interrupt = Some(pin),
            Err(err) => {
                hw.latch.latch(signal_fault("configure", err));
                hw.release();
                return hw;
            }
        }

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "opened {=str} on {=str} at {=u32} Hz",
            flavor.name(),
            flavor.device(),
            flavor.speed()
        );

        hw
    }

    /// Releases the SPI connection and interrupt line.
    ///
    /// A failure to close the connection is latched. Later operations latch
    /// [`Fault::Closed`].
    pub fn close(&mut self) {
        self.interrupt = None;
        if let Some(connection) = self.connection.take() {
            let result = connection.close().map_err(|err| transfer_fault("close", err));
            self.latch.record(result);

            #[cfg(feature = "defmt")]
            defmt::debug!("closed {=str}", self.flavor.device());
        }
    }

    // Cleanup after a failed open; the failing step's fault stays latched.
    fn release(&mut self) {
        self.interrupt = None;
        if let Some(connection) = self.connection.take() {
            let _ = connection.close();
        }
    }
}

impl<'f, F, D, P> Hardware<'f, F, D, P>
where
    F: Flavor + ?Sized,
    D: SpiDevice,
{
    /// Reads a single register.
    ///
    /// Returns `0` without touching the bus while a fault is latched.
    pub fn read_register(&mut self, addr: u8) -> u8 {
        let header = self.flavor.read_single_address(addr);
        let connection = &mut self.connection;

        self.latch.guarded_read(0, || {
            let connection = connection.as_mut().ok_or(Fault::Closed)?;
            let mut buf = [header, 0];
            connection
                .transfer_in_place(&mut buf)
                .map_err(|err| transfer_fault("transfer", err))?;
            Ok(buf[1])
        })
    }

    /// Reads `n` consecutive registers starting at `addr` in one transaction.
    ///
    /// Returns an empty buffer without touching the bus while a fault is latched.
    pub fn read_burst(&mut self, addr: u8, n: usize) -> Vec<u8> {
        let header = self.flavor.read_burst_address(addr);
        let connection = &mut self.connection;

        self.latch.guarded_read(Vec::new(), || {
            let connection = connection.as_mut().ok_or(Fault::Closed)?;
            let mut buf = vec![0; n + 1];
            buf[0] = header;
            connection
                .transfer_in_place(&mut buf)
                .map_err(|err| transfer_fault("transfer", err))?;
            Ok(buf.split_off(1))
        })
    }

    /// Writes `value` to a single register.
    ///
    /// The write is attempted even while a fault is latched.
    pub fn write_register(&mut self, addr: u8, value: u8) {
        let header = self.flavor.write_single_address(addr);
        let connection = &mut self.connection;

        self.latch.unconditional_write(|| {
            let connection = connection.as_mut().ok_or(Fault::Closed)?;
            connection
                .write(&[header, value])
                .map_err(|err| transfer_fault("write", err))
        });
    }

    /// Writes `data` to consecutive registers starting at `addr` in one transaction.
    ///
    /// The write is attempted even while a fault is latched.
    pub fn write_burst(&mut self, addr: u8, data: &[u8]) {
        let header = self.flavor.write_burst_address(addr);
        let connection = &mut self.connection;

        self.latch.unconditional_write(|| {
            let connection = connection.as_mut().ok_or(Fault::Closed)?;
            let mut buf = Vec::with_capacity(data.len() + 1);
            buf.push(header);
            buf.extend_from_slice(data);
            connection
                .write(&buf)
                .map_err(|err| transfer_fault("write", err))
        });
    }

    /// Writes each `(address, value)` pair of a flat table, in order.
    ///
    /// # Panics
    /// Panics if `data` has an odd length.
    pub fn write_each(&mut self, data: &[u8]) {
        assert!(data.len() % 2 == 0, "odd data length ({})", data.len());
        for pair in data.chunks_exact(2) {
            self.write_register(pair[0], pair[1]);
        }
    }

    /// Writes each `(address, value)` pair, in order.
    pub fn write_pairs(&mut self, pairs: &[(u8, u8)]) {
        for &(addr, value) in pairs {
            self.write_register(addr, value);
        }
    }

    /// Reads a typed register using the flavor's burst-read framing.
    ///
    /// Returns `None` while a fault is latched, or if the transfer or decoding fails.
    pub fn read<R>(&mut self) -> Option<R>
    where
        R: ReadableRegister<IdType = u8>,
    {
        let header = self.flavor.read_burst_address(R::id());
        let connection = &mut self.connection;

        self.latch.guarded_read(None, || {
            let connection = connection.as_mut().ok_or(Fault::Closed)?;
            let mut raw_value = R::Array::new();
            let mut buf = vec![0; raw_value.as_mut().len() + 1];
            buf[0] = header;
            connection
                .transfer_in_place(&mut buf)
                .map_err(|err| transfer_fault("transfer", err))?;
            raw_value.as_mut().copy_from_slice(&buf[1..]);

            R::from_bytes(raw_value)
                .map(Some)
                .map_err(|_| Fault::Decode { register: R::id() })
        })
    }

    /// Writes a typed register using the flavor's burst-write framing.
    pub fn write<R>(&mut self, register: R)
    where
        R: WritableRegister<IdType = u8>,
    {
        match register.to_bytes() {
            Ok(raw_value) => self.write_burst(R::id(), raw_value.as_ref()),
            Err(_) => self.latch.latch(Fault::Encode { register: R::id() }),
        }
    }

    /// Checks the chip identification register `R` against `expected`.
    ///
    /// Latches [`Fault::VersionMismatch`] and returns false on a mismatch. Also
    /// returns false if the register could not be read.
    pub fn verify_version<R>(&mut self, expected: u16) -> bool
    where
        R: ReadableRegister<IdType = u8> + Into<u16>,
    {
        let Some(version) = self.read::<R>() else {
            return false;
        };

        let actual = version.into();
        if actual != expected {
            self.latch.latch(Fault::VersionMismatch { actual, expected });
            return false;
        }
        true
    }
}

impl<'f, F, D, P> Hardware<'f, F, D, P>
where
    F: Flavor + ?Sized,
    P: InputPin,
{
    /// Samples the current level of the interrupt line.
    pub fn read_interrupt(&mut self) -> bool {
        let result = match self.interrupt.as_mut() {
            Some(pin) => pin.is_high().map_err(|err| signal_fault("read", err)),
            None => Err(Fault::Closed),
        };
        self.latch.settle_read(false, result)
    }
}

impl<'f, F, D, P> Hardware<'f, F, D, P>
where
    F: Flavor + ?Sized,
    P: InterruptLine,
{
    /// Blocks for up to `timeout` waiting for a rising edge on the interrupt line.
    ///
    /// A timeout latches [`Fault::Timeout`], which callers can tell apart from a
    /// line failure with [`Fault::is_timeout`].
    pub fn await_interrupt(&mut self, timeout: Duration) {
        let result = match self.interrupt.as_mut() {
            Some(pin) => match pin.wait(timeout) {
                Ok(true) => Ok(()),
                Ok(false) => Err(Fault::Timeout),
                Err(err) => Err(signal_fault("wait", err)),
            },
            None => Err(Fault::Closed),
        };
        self.latch.record(result);
    }
}

impl<'f, F, D, P> Hardware<'f, F, D, P>
where
    F: Flavor + ?Sized,
    D: embedded_hal_async::spi::SpiDevice,
{
    /// Asynchronously reads a single register.
    ///
    /// This is the async version of [`read_register`](Hardware::read_register).
    pub async fn read_register_async(&mut self, addr: u8) -> u8 {
        if self.latch.is_faulted() {
            return 0;
        }

        let mut buf = [self.flavor.read_single_address(addr), 0];
        let result = match self.connection.as_mut() {
            Some(connection) => connection
                .transfer_in_place(&mut buf)
                .await
                .map_err(|err| transfer_fault("transfer", err)),
            None => Err(Fault::Closed),
        };

        self.latch.settle_read(0, result.map(|()| buf[1]))
    }

    /// Asynchronously reads `n` consecutive registers.
    ///
    /// This is the async version of [`read_burst`](Hardware::read_burst).
    pub async fn read_burst_async(&mut self, addr: u8, n: usize) -> Vec<u8> {
        if self.latch.is_faulted() {
            return Vec::new();
        }

        let mut buf = vec![0; n + 1];
        buf[0] = self.flavor.read_burst_address(addr);
        let result = match self.connection.as_mut() {
            Some(connection) => connection
                .transfer_in_place(&mut buf)
                .await
                .map_err(|err| transfer_fault("transfer", err)),
            None => Err(Fault::Closed),
        };

        self.latch.settle_read(Vec::new(), result.map(|()| buf.split_off(1)))
    }

    /// Asynchronously writes a single register.
    ///
    /// This is the async version of [`write_register`](Hardware::write_register).
    pub async fn write_register_async(&mut self, addr: u8, value: u8) {
        let buf = [self.flavor.write_single_address(addr), value];
        let result = match self.connection.as_mut() {
            Some(connection) => connection
                .write(&buf)
                .await
                .map_err(|err| transfer_fault("write", err)),
            None => Err(Fault::Closed),
        };
        self.latch.record(result);
    }

    /// Asynchronously writes consecutive registers.
    ///
    /// This is the async version of [`write_burst`](Hardware::write_burst).
    pub async fn write_burst_async(&mut self, addr: u8, data: &[u8]) {
        let mut buf = Vec::with_capacity(data.len() + 1);
        buf.push(self.flavor.write_burst_address(addr));
        buf.extend_from_slice(data);

        let result = match self.connection.as_mut() {
            Some(connection) => connection
                .write(&buf)
                .await
                .map_err(|err| transfer_fault("write", err)),
            None => Err(Fault::Closed),
        };
        self.latch.record(result);
    }
}

impl<'f, F, D, P> Hardware<'f, F, D, P>
where
    F: Flavor + ?Sized,
    P: Wait,
{
    /// Asynchronously waits for a rising edge, giving up after `timeout` as
    /// measured by `delay`.
    ///
    /// This is the async version of [`await_interrupt`](Hardware::await_interrupt).
    pub async fn await_interrupt_async<T: DelayNs>(&mut self, delay: &mut T, timeout: Duration) {
        let result = match self.interrupt.as_mut() {
            Some(pin) => {
                let timeout_us = u32::try_from(timeout.as_micros()).unwrap_or(u32::MAX);
                match select(pin.wait_for_rising_edge(), delay.delay_us(timeout_us)).await {
                    Either::First(Ok(())) => Ok(()),
                    Either::First(Err(err)) => Err(signal_fault("wait", err)),
                    Either::Second(()) => Err(Fault::Timeout),
                }
            }
            None => Err(Fault::Closed),
        };
        self.latch.record(result);
    }
}
