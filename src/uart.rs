//! Serial transport seam
//!
//! embedded-hal has no notion of re-clocking a UART at runtime, and the
//! module has to be talked to at 9600 baud in program mode and at its own
//! rate otherwise. [`Uart`] adds that, plus a read with a deadline, on top of
//! [`embedded_io::Write`].

use crate::registers::Parity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlowControl {
    None,
    RtsCts,
}

/// Line settings applied by [`Uart::configure`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialConfig {
    pub baud_rate: u32,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
    pub flow_control: FlowControl,
}

impl SerialConfig {
    /// 8 data bits, no parity, one stop bit, no flow control
    pub fn new_8n1(baud_rate: u32) -> Self {
        Self {
            baud_rate,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
            flow_control: FlowControl::None,
        }
    }
}

/// UART connected to the module's RXD/TXD
pub trait Uart: embedded_io::Write {
    /// Applies new line settings. Implementations may close and reopen the
    /// port; anything buffered at that point can be dropped.
    fn configure(&mut self, config: &SerialConfig) -> Result<(), Self::Error>;

    /// Reads until `buf` is full or `timeout_ms` has elapsed, returning the
    /// number of bytes received. Running out of time is not an error here.
    fn read_timeout(&mut self, buf: &mut [u8], timeout_ms: u32) -> Result<usize, Self::Error>;
}
