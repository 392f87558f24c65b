//! Fault reporting
//!
//! Register traffic is usually a long chain of writes followed by a status
//! read. Rather than returning a `Result` from every call, [`Hardware`]
//! records the most recent failure in a [`FaultLatch`] and callers inspect it
//! once at the end of the chain.
//!
//! The latch splits operations into two categories:
//! - guarded reads, which are skipped while a fault is latched and yield a
//!   zero value instead of a misleading result
//! - unconditional writes, which always reach the bus
//!
//! A fault is only ever cleared explicitly with [`FaultLatch::set`]`(None)`.
//!
//! [`Hardware`]: crate::Hardware

use alloc::string::String;

use thiserror::Error;

/// A recoverable hardware or environment failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
    /// The SPI bus could not be opened, configured, written or closed
    #[error("spi: {0}")]
    Transfer(String),

    /// The interrupt line could not be configured or read
    #[error("interrupt line: {0}")]
    Signal(String),

    /// No interrupt edge arrived before the timeout elapsed
    #[error("timed out waiting for interrupt")]
    Timeout,

    /// The chip identification register held an unexpected value
    #[error("unexpected hardware version {actual:04X} (should be {expected:04X})")]
    VersionMismatch {
        /// Value read from the chip
        actual: u16,
        /// Value the driver was built for
        expected: u16,
    },

    /// Bytes read from a register did not decode into its typed form
    #[error("register {register:#04x} holds an invalid value")]
    Decode {
        /// Logical register address
        register: u8,
    },

    /// A typed register value could not be encoded for the bus
    #[error("register {register:#04x} value cannot be encoded")]
    Encode {
        /// Logical register address
        register: u8,
    },

    /// The hardware was used after it was closed or after a failed open
    #[error("device is not open")]
    Closed,
}

impl Fault {
    /// Returns true for [`Fault::Timeout`], which usually means "no data yet"
    /// rather than a broken device.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}

/// Sticky record of the most recent fault.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaultLatch {
    fault: Option<Fault>,
}

impl FaultLatch {
    /// Creates an empty latch.
    pub const fn new() -> Self {
        Self { fault: None }
    }

    /// Returns the latched fault, if any.
    pub fn get(&self) -> Option<&Fault> {
        self.fault.as_ref()
    }

    /// Replaces the latched fault. `set(None)` is the only way to clear it.
    pub fn set(&mut self, fault: Option<Fault>) {
        self.fault = fault;
    }

    /// Returns true while a fault is latched.
    pub fn is_faulted(&self) -> bool {
        self.fault.is_some()
    }

    /// Takes the latched fault, leaving the latch clear.
    pub fn take(&mut self) -> Option<Fault> {
        self.fault.take()
    }

    /// Latches `fault`, replacing any earlier one.
    pub fn latch(&mut self, fault: Fault) {
        #[cfg(feature = "defmt")]
        defmt::warn!("fault latched: {}", defmt::Display2Format(&fault));
        self.fault = Some(fault);
    }

    /// Latches the error of `result`, if any. Success leaves the latch as is.
    pub fn record(&mut self, result: Result<(), Fault>) {
        if let Err(fault) = result {
            self.latch(fault);
        }
    }

    /// Runs `read` unless a fault is latched.
    ///
    /// Returns `zero` without calling `read` while faulted, and also when
    /// `read` itself fails.
    pub fn guarded_read<T>(&mut self, zero: T, read: impl FnOnce() -> Result<T, Fault>) -> T {
        if self.is_faulted() {
            return zero;
        }
        self.settle_read(zero, read())
    }

    /// Latches the outcome of a read that has already run.
    ///
    /// Used by async callers, which check [`is_faulted`](Self::is_faulted)
    /// before starting the transfer, and by interrupt-line sampling, which
    /// runs regardless of the latch.
    pub fn settle_read<T>(&mut self, zero: T, result: Result<T, Fault>) -> T {
        match result {
            Ok(value) => value,
            Err(fault) => {
                self.latch(fault);
                zero
            }
        }
    }

    /// Runs `write` regardless of the latch state and records its outcome.
    pub fn unconditional_write(&mut self, write: impl FnOnce() -> Result<(), Fault>) {
        let result = write();
        self.record(result);
    }
}
