#![allow(dead_code)]

use std::collections::VecDeque;

use ebyte::{Config, Device, OperatingMode, Pins, SerialConfig, Uart};
use embedded_hal::delay::DelayNs;
use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use embedded_io::{ErrorKind, ErrorType, Write};

pub type TestDevice = Device<FakeUart, PinMock, PinMock, PinMock, RecordingDelay>;

/// UART double that records what the driver does and replays canned responses
#[derive(Default)]
pub struct FakeUart {
    pub configs: Vec<SerialConfig>,
    pub written: Vec<u8>,
    pub read_timeouts: Vec<u32>,
    pub fail_writes: bool,
    responses: VecDeque<Vec<u8>>,
}

impl FakeUart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, bytes: &[u8]) -> Self {
        self.responses.push_back(bytes.to_vec());
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn baud_rates(&self) -> Vec<u32> {
        self.configs.iter().map(|c| c.baud_rate).collect()
    }

    pub fn active_baud_rate(&self) -> Option<u32> {
        self.configs.last().map(|c| c.baud_rate)
    }
}

impl ErrorType for FakeUart {
    type Error = ErrorKind;
}

impl Write for FakeUart {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if self.fail_writes {
            return Err(ErrorKind::Other);
        }
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl Uart for FakeUart {
    fn configure(&mut self, config: &SerialConfig) -> Result<(), Self::Error> {
        self.configs.push(*config);
        Ok(())
    }

    fn read_timeout(&mut self, buf: &mut [u8], timeout_ms: u32) -> Result<usize, Self::Error> {
        self.read_timeouts.push(timeout_ms);
        let Some(response) = self.responses.pop_front() else {
            return Ok(0);
        };
        let n = response.len().min(buf.len());
        buf[..n].copy_from_slice(&response[..n]);
        Ok(n)
    }
}

/// Delay that returns immediately and remembers every wait in milliseconds
#[derive(Default)]
pub struct RecordingDelay {
    pub waits_ms: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.waits_ms.push(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.waits_ms.push(ms);
    }
}

/// Expected pin traffic, built in the order the driver produces it
#[derive(Default)]
pub struct Script {
    m0: Vec<PinTransaction>,
    m1: Vec<PinTransaction>,
    aux: Vec<PinTransaction>,
}

fn level(high: bool) -> PinState {
    if high {
        PinState::High
    } else {
        PinState::Low
    }
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mode lines for `mode` followed by an immediate ready on AUX
    pub fn mode(self, mode: OperatingMode) -> Self {
        self.lines(mode).ready()
    }

    /// Mode lines only
    pub fn lines(mut self, mode: OperatingMode) -> Self {
        self.m0.push(PinTransaction::set(level(mode.m0())));
        self.m1.push(PinTransaction::set(level(mode.m1())));
        self
    }

    /// Two high AUX samples
    pub fn ready(self) -> Self {
        self.aux(&[true, true])
    }

    pub fn aux(mut self, samples: &[bool]) -> Self {
        self.aux
            .extend(samples.iter().map(|high| PinTransaction::get(level(*high))));
        self
    }

    pub fn m0(mut self, transaction: PinTransaction) -> Self {
        self.m0.push(transaction);
        self
    }

    pub fn pins(&self) -> Pins<PinMock, PinMock, PinMock> {
        Pins {
            m0: PinMock::new(&self.m0),
            m1: PinMock::new(&self.m1),
            aux: PinMock::new(&self.aux),
        }
    }
}

pub fn device(uart: FakeUart, script: &Script, config: Config) -> TestDevice {
    Device::new(uart, script.pins(), RecordingDelay::default(), config)
}

/// Checks that every expected pin transaction happened and hands back the
/// UART and delay for inspection.
pub fn finish(device: TestDevice) -> (FakeUart, RecordingDelay) {
    let (uart, mut pins, delay) = device.release();
    pins.m0.done();
    pins.m1.done();
    pins.aux.done();
    (uart, delay)
}
