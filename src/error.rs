//! Error types for the E32 driver.

use core::convert::Infallible;
use core::fmt;

/// A response frame the driver could not make sense of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// The header byte is not one the command expects.
    UnrecognizedHeader(u8),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::UnrecognizedHeader(head) => write!(f, "unrecognized header {:#04x}", head),
        }
    }
}

impl From<Infallible> for ProtocolError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// Which wait ran out of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Timeout {
    /// AUX stayed low for the whole ready budget.
    Ready,
    /// The module sent fewer bytes than the command answers with.
    Response,
}

/// The main error type for the E32 driver.
///
/// `Uart` and `Pin` carry failures of the underlying transport and GPIO
/// layer untouched. Nothing is retried internally.
#[derive(Debug, PartialEq, Eq)]
pub enum Error<UE, PE> {
    /// A serial operation failed.
    Uart(UE),
    /// A GPIO operation failed.
    Pin(PE),
    /// A bounded wait expired.
    Timeout(Timeout),
    /// A response was received but not understood.
    Protocol(ProtocolError),
}

impl<UE, PE> From<ProtocolError> for Error<UE, PE> {
    fn from(err: ProtocolError) -> Self {
        Self::Protocol(err)
    }
}

impl<UE, PE> From<Timeout> for Error<UE, PE> {
    fn from(timeout: Timeout) -> Self {
        Self::Timeout(timeout)
    }
}

impl<UE: fmt::Debug, PE: fmt::Debug> fmt::Display for Error<UE, PE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uart(e) => write!(f, "uart error: {:?}", e),
            Self::Pin(e) => write!(f, "pin error: {:?}", e),
            Self::Timeout(Timeout::Ready) => write!(f, "timed out waiting for AUX"),
            Self::Timeout(Timeout::Response) => write!(f, "timed out waiting for a response"),
            Self::Protocol(e) => fmt::Display::fmt(e, f),
        }
    }
}

/// Step of [`Device::initialize`](crate::Device::initialize) that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitStep {
    /// Driving the mode lines to normal mode.
    Mode,
    /// Reading the version register.
    Version,
    /// Reading the parameter register.
    Parameters,
}

/// A failure during the startup sequence, with the step it happened in.
#[derive(Debug, PartialEq, Eq)]
pub struct InitError<UE, PE> {
    pub step: InitStep,
    pub error: Error<UE, PE>,
}

impl<UE: fmt::Debug, PE: fmt::Debug> fmt::Display for InitError<UE, PE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "initialization failed at {:?}: {}", self.step, self.error)
    }
}
