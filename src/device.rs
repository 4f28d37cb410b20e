//! E32 Device Interface
//!
//! This module provides the driver handle for one EBYTE E32 module. The
//! [`Device`] owns the UART, the two mode select lines (M0, M1), the AUX line
//! and a delay source, and provides methods for:
//! - Switching operating modes, including re-clocking the UART
//! - Waiting for the module to signal ready on AUX
//! - Reading and writing the parameter register
//! - Reading the version register and resetting the module
//!
//! All operations block the caller until they complete. The handle is not
//! meant to be shared; wrap it in a mutex if several tasks need it.
//!
//! # Example
//! ```no_run
//! use ebyte::{Config, Device, Pins, Uart};
//! use embedded_hal::{delay::DelayNs, digital::{InputPin, OutputPin}};
//!
//! fn bring_up<U, M0, M1, AUX, D, PE>(uart: U, m0: M0, m1: M1, aux: AUX, delay: D)
//! where
//!     U: Uart,
//!     M0: OutputPin<Error = PE>,
//!     M1: OutputPin<Error = PE>,
//!     AUX: InputPin<Error = PE>,
//!     D: DelayNs,
//! {
//!     let mut device = Device::new(uart, Pins { m0, m1, aux }, delay, Config::default());
//!
//!     if device.initialize().is_ok() {
//!         let channel = device.parameters().map(|cfg| cfg.channel);
//!     }
//! }
//! ```

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin, PinState};
use regiface::{ByteArray, Command, FromByteArray, ToByteArray};

use crate::commands::{ReadParameters, ReadVersion, Reset, COMMAND_REPEAT};
use crate::conf::{Config, PROGRAM_BAUD_RATE, READY_POLL_INTERVAL_MS, READY_SETTLE_MS};
use crate::error::{Error, InitError, InitStep, ProtocolError, Timeout};
use crate::mode::{OperatingMode, Readiness};
use crate::registers::{BaudRate, ConfigurationRegister, VersionInfo};
use crate::uart::{SerialConfig, Uart};

/// GPIO lines wired to the module
pub struct Pins<M0, M1, AUX> {
    /// Mode select, carries bit 1 of the mode code
    pub m0: M0,
    /// Mode select, carries bit 0 of the mode code
    pub m1: M1,
    /// Low while the module is busy, high when it is ready
    pub aux: AUX,
}

/// Driver handle for one E32 module.
pub struct Device<UART, M0, M1, AUX, DELAY> {
    uart: UART,
    pins: Pins<M0, M1, AUX>,
    delay: DELAY,
    config: Config,
    mode: OperatingMode,
    parameters: Option<ConfigurationRegister>,
    version: Option<VersionInfo>,
}

impl<UART, M0, M1, AUX, DELAY> Device<UART, M0, M1, AUX, DELAY> {
    /// Creates a new Device. Nothing is sent to the module until the first
    /// mode change; the module is assumed to be in normal mode.
    pub fn new(uart: UART, pins: Pins<M0, M1, AUX>, delay: DELAY, config: Config) -> Self {
        Self {
            uart,
            pins,
            delay,
            config,
            mode: OperatingMode::Normal,
            parameters: None,
            version: None,
        }
    }

    /// Releases the UART, pins and delay.
    pub fn release(self) -> (UART, Pins<M0, M1, AUX>, DELAY) {
        (self.uart, self.pins, self.delay)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mode last commanded through [`set_mode`](Device::set_mode).
    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    /// Parameter register from the last successful read.
    pub fn parameters(&self) -> Option<&ConfigurationRegister> {
        self.parameters.as_ref()
    }

    /// Version information from the last successful read.
    pub fn version(&self) -> Option<&VersionInfo> {
        self.version.as_ref()
    }

    /// Changes the UART rate used outside program mode. Takes effect on the
    /// next mode change, typically the return to normal mode right after
    /// writing a register with a new `baud_rate`.
    pub fn set_baud_rate(&mut self, baud_rate: BaudRate) {
        self.config.baud_rate = baud_rate;
    }
}

impl<UART, M0, M1, AUX, DELAY, PE> Device<UART, M0, M1, AUX, DELAY>
where
    UART: Uart,
    M0: OutputPin<Error = PE>,
    M1: OutputPin<Error = PE>,
    AUX: InputPin<Error = PE>,
    DELAY: DelayNs,
{
    /// Brings the module into a known state and fills the caches.
    ///
    /// Drives both mode lines to normal mode, then reads the version and
    /// parameter registers.
    ///
    /// # Errors
    /// Any failure is wrapped in an [`InitError`] naming the step.
    pub fn initialize(&mut self) -> Result<(), InitError<UART::Error, PE>> {
        self.set_mode(OperatingMode::Normal)
            .map_err(|error| InitError {
                step: InitStep::Mode,
                error,
            })?;

        self.read_version().map_err(|error| InitError {
            step: InitStep::Version,
            error,
        })?;

        self.read_configuration().map_err(|error| InitError {
            step: InitStep::Parameters,
            error,
        })?;

        Ok(())
    }

    /// Switches the module to `mode`.
    ///
    /// Sets M0 and M1, waits for AUX, then reconfigures the UART to 8N1
    /// without flow control at 9600 baud in program mode and at the
    /// configured rate otherwise.
    ///
    /// # Errors
    /// * `Error::Pin` - driving M0/M1 or sampling AUX failed
    /// * `Error::Timeout(Timeout::Ready)` - AUX did not go high in time
    /// * `Error::Uart` - the UART could not be reconfigured
    pub fn set_mode(&mut self, mode: OperatingMode) -> Result<(), Error<UART::Error, PE>> {
        trace!("e32: mode {} -> {}", self.mode, mode);

        self.pins
            .m0
            .set_state(PinState::from(mode.m0()))
            .map_err(Error::Pin)?;
        self.pins
            .m1
            .set_state(PinState::from(mode.m1()))
            .map_err(Error::Pin)?;
        self.mode = mode;

        self.wait_ready()?;

        let baud_rate = match mode {
            OperatingMode::Program => PROGRAM_BAUD_RATE,
            _ => self.config.baud_rate.bps(),
        };
        self.uart
            .configure(&SerialConfig::new_8n1(baud_rate))
            .map_err(Error::Uart)
    }

    /// Blocks until the module reports ready on AUX.
    ///
    /// # Errors
    /// * `Error::Pin` - sampling AUX failed
    /// * `Error::Timeout(Timeout::Ready)` - the ready budget ran out
    pub fn wait_ready(&mut self) -> Result<(), Error<UART::Error, PE>> {
        match self.poll_ready().map_err(Error::Pin)? {
            Readiness::Ready => Ok(()),
            Readiness::TimedOut => Err(Timeout::Ready.into()),
        }
    }

    /// Samples AUX every 10 ms until it reads high on two consecutive samples,
    /// then waits another 20 ms for the line to settle.
    ///
    /// Gives up after `ready_timeout_ms`, at least two samples are always taken.
    pub fn poll_ready(&mut self) -> Result<Readiness, PE> {
        let polls = (self.config.ready_timeout_ms / READY_POLL_INTERVAL_MS).max(2);
        let mut was_high = false;

        for _ in 0..polls {
            let high = self.pins.aux.is_high()?;
            if high && was_high {
                self.delay.delay_ms(READY_SETTLE_MS);
                return Ok(Readiness::Ready);
            }
            was_high = high;
            self.delay.delay_ms(READY_POLL_INTERVAL_MS);
        }

        warn!("e32: AUX low for {} ms", self.config.ready_timeout_ms);
        Ok(Readiness::TimedOut)
    }

    /// Reads the parameter register and caches it.
    ///
    /// # Errors
    /// * `Error::Timeout(Timeout::Response)` - fewer than 6 bytes arrived
    /// * `Error::Protocol` - the header was not `0xC0`/`0xC2`
    /// * any error of [`set_mode`](Device::set_mode)
    pub fn read_configuration(&mut self) -> Result<ConfigurationRegister, Error<UART::Error, PE>> {
        let parameters = self.execute_command(ReadParameters)?;
        self.parameters = Some(parameters);
        Ok(parameters)
    }

    /// Writes the parameter register.
    ///
    /// The header byte of the encoded register decides whether the module
    /// stores the settings in flash. Nothing is read back; success only means
    /// the bytes left the UART.
    pub fn write_configuration(
        &mut self,
        parameters: &ConfigurationRegister,
    ) -> Result<(), Error<UART::Error, PE>> {
        let frame = parameters.encode();

        self.set_mode(OperatingMode::Program)?;
        let written = self.write_frame(&frame);
        self.set_mode(OperatingMode::Normal)?;

        written
    }

    /// Reads the version register and caches it.
    pub fn read_version(&mut self) -> Result<VersionInfo, Error<UART::Error, PE>> {
        let version = self.execute_command(ReadVersion)?;
        self.version = Some(version);
        Ok(version)
    }

    /// Resets the module.
    ///
    /// The module reboots into program mode, so the driver waits for AUX and
    /// then puts the lines back into program mode as well.
    pub fn reset(&mut self) -> Result<(), Error<UART::Error, PE>> {
        self.set_mode(OperatingMode::Program)?;
        self.exchange(Reset)?;
        self.wait_ready()?;
        self.set_mode(OperatingMode::Program)
    }

    /// Executes a command on the device.
    ///
    /// Enters program mode, sends the command and reads its response,
    /// returns to normal mode and only then decodes. Normal mode is restored
    /// even if the exchange itself failed.
    ///
    /// # Type Parameters
    /// * `C` - Command type implementing the Command trait with u8 ID
    pub fn execute_command<C>(
        &mut self,
        command: C,
    ) -> Result<C::ResponseParameters, Error<UART::Error, PE>>
    where
        C: Command<IdType = u8>,
        C::CommandParameters: ToByteArray<Error = Infallible>,
        ProtocolError: From<<C::ResponseParameters as FromByteArray>::Error>,
    {
        self.set_mode(OperatingMode::Program)?;
        let exchanged = self.exchange(command);
        self.set_mode(OperatingMode::Normal)?;

        C::ResponseParameters::from_bytes(exchanged?)
            .map_err(|err| Error::Protocol(ProtocolError::from(err)))
    }

    fn exchange<C>(
        &mut self,
        command: C,
    ) -> Result<<C::ResponseParameters as FromByteArray>::Array, Error<UART::Error, PE>>
    where
        C: Command<IdType = u8>,
        C::CommandParameters: ToByteArray<Error = Infallible>,
    {
        let request = command
            .invoking_parameters()
            .to_bytes()
            .unwrap_or_else(|never| match never {});

        self.uart
            .write_all(&[C::id(); COMMAND_REPEAT])
            .map_err(Error::Uart)?;
        self.write_frame(request.as_ref())?;

        let mut raw_response = <C::ResponseParameters as FromByteArray>::Array::new();
        let expected = raw_response.as_mut().len();
        if expected > 0 {
            let received = self
                .uart
                .read_timeout(raw_response.as_mut(), self.config.response_timeout_ms)
                .map_err(Error::Uart)?;
            if received < expected {
                return Err(Timeout::Response.into());
            }
        }

        Ok(raw_response)
    }

    fn write_frame(&mut self, bytes: &[u8]) -> Result<(), Error<UART::Error, PE>> {
        self.uart.write_all(bytes).map_err(Error::Uart)?;
        self.uart.flush().map_err(Error::Uart)
    }
}
