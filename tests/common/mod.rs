//! Recording fakes for the bus and interrupt-line primitives.
//!
//! Every fake shares its state through an `Rc<RefCell<..>>` handle so a test
//! can script responses and failures up front and inspect the recorded calls
//! after the hardware has consumed the fake.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use embedded_hal::digital::{self, InputPin};
use embedded_hal::spi::{self, Operation, SpiDevice};
use spiradio::{Edge, GpioPort, InterruptLine, SpiConnection, SpiPort};

/// Error produced by the fakes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeError(pub &'static str);

impl spi::Error for FakeError {
    fn kind(&self) -> spi::ErrorKind {
        spi::ErrorKind::Other
    }
}

impl digital::Error for FakeError {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

/// One call observed on the SPI side
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusCall {
    Open {
        device: String,
        speed_hz: u32,
        chip_select: u8,
    },
    SetMaxSpeed(u32),
    Transfer(Vec<u8>),
    Write(Vec<u8>),
    Close,
}

#[derive(Debug, Default)]
pub struct BusLog {
    pub calls: Vec<BusCall>,
    /// Bytes clocked back by successive transfers
    pub responses: VecDeque<Vec<u8>>,
    pub fail_open: bool,
    pub fail_speed: bool,
    pub fail_close: bool,
    /// Number of upcoming transfers/writes that fail
    pub fail_transfers: usize,
}

impl BusLog {
    pub fn transfers(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, BusCall::Transfer(_)))
            .count()
    }

    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BusCall::Write(bytes) => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }

    fn take_failure(&mut self) -> bool {
        if self.fail_transfers > 0 {
            self.fail_transfers -= 1;
            true
        } else {
            false
        }
    }
}

/// SPI port handing out [`FakeConnection`]s
#[derive(Clone, Default)]
pub struct FakeSpi {
    pub log: Rc<RefCell<BusLog>>,
}

impl FakeSpi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connection(&self) -> FakeConnection {
        FakeConnection {
            log: self.log.clone(),
        }
    }

    pub fn respond(&self, bytes: &[u8]) {
        self.log.borrow_mut().responses.push_back(bytes.to_vec());
    }
}

impl SpiPort for FakeSpi {
    type Connection = FakeConnection;
    type Error = FakeError;

    fn open(
        &mut self,
        device: &str,
        speed_hz: u32,
        chip_select: u8,
    ) -> Result<Self::Connection, Self::Error> {
        let mut log = self.log.borrow_mut();
        log.calls.push(BusCall::Open {
            device: device.to_owned(),
            speed_hz,
            chip_select,
        });
        if log.fail_open {
            return Err(FakeError("no such device"));
        }
        Ok(FakeConnection {
            log: self.log.clone(),
        })
    }
}

pub struct FakeConnection {
    log: Rc<RefCell<BusLog>>,
}

impl spi::ErrorType for FakeConnection {
    type Error = FakeError;
}

impl SpiDevice for FakeConnection {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), FakeError> {
        let mut log = self.log.borrow_mut();
        for op in operations {
            match op {
                Operation::TransferInPlace(buf) => {
                    log.calls.push(BusCall::Transfer(buf.to_vec()));
                    if log.take_failure() {
                        return Err(FakeError("transfer failed"));
                    }
                    if let Some(response) = log.responses.pop_front() {
                        let n = response.len().min(buf.len());
                        buf[..n].copy_from_slice(&response[..n]);
                    }
                }
                Operation::Write(buf) => {
                    log.calls.push(BusCall::Write(buf.to_vec()));
                    if log.take_failure() {
                        return Err(FakeError("write failed"));
                    }
                }
                _ => unimplemented!("operation not used by the hardware layer"),
            }
        }
        Ok(())
    }
}

impl SpiConnection for FakeConnection {
    fn set_max_speed(&mut self, speed_hz: u32) -> Result<(), FakeError> {
        let mut log = self.log.borrow_mut();
        log.calls.push(BusCall::SetMaxSpeed(speed_hz));
        if log.fail_speed {
            return Err(FakeError("speed not supported"));
        }
        Ok(())
    }

    fn close(self) -> Result<(), FakeError> {
        let mut log = self.log.borrow_mut();
        log.calls.push(BusCall::Close);
        if log.fail_close {
            return Err(FakeError("close failed"));
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct PinLog {
    pub configured: Vec<(u32, Edge, bool)>,
    pub fail_configure: bool,
    /// Levels returned by successive reads; low once exhausted
    pub levels: VecDeque<bool>,
    pub fail_read: bool,
    /// Outcomes of successive waits; edge seen once exhausted
    pub waits: VecDeque<Result<bool, FakeError>>,
    pub wait_timeouts: Vec<Duration>,
    pub reads: usize,
}

/// GPIO port handing out [`FakePin`]s
#[derive(Clone, Default)]
pub struct FakeGpio {
    pub log: Rc<RefCell<PinLog>>,
}

impl FakeGpio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pin(&self) -> FakePin {
        FakePin {
            log: self.log.clone(),
        }
    }
}

impl GpioPort for FakeGpio {
    type Pin = FakePin;
    type Error = FakeError;

    fn interrupt(
        &mut self,
        pin: u32,
        edge: Edge,
        active_low: bool,
    ) -> Result<Self::Pin, Self::Error> {
        let mut log = self.log.borrow_mut();
        if log.fail_configure {
            return Err(FakeError("line busy"));
        }
        log.configured.push((pin, edge, active_low));
        Ok(FakePin {
            log: self.log.clone(),
        })
    }
}

pub struct FakePin {
    log: Rc<RefCell<PinLog>>,
}

impl digital::ErrorType for FakePin {
    type Error = FakeError;
}

impl InputPin for FakePin {
    fn is_high(&mut self) -> Result<bool, FakeError> {
        let mut log = self.log.borrow_mut();
        log.reads += 1;
        if log.fail_read {
            return Err(FakeError("read failed"));
        }
        Ok(log.levels.pop_front().unwrap_or(false))
    }

    fn is_low(&mut self) -> Result<bool, FakeError> {
        self.is_high().map(|level| !level)
    }
}

impl InterruptLine for FakePin {
    fn wait(&mut self, timeout: Duration) -> Result<bool, FakeError> {
        let mut log = self.log.borrow_mut();
        log.wait_timeouts.push(timeout);
        log.waits.pop_front().unwrap_or(Ok(true))
    }
}
