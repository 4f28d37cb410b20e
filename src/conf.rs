//! Driver configuration.

use crate::registers::BaudRate;

/// Baud rate the module listens on in program mode.
pub const PROGRAM_BAUD_RATE: u32 = 9600;

/// Interval between two AUX samples.
pub const READY_POLL_INTERVAL_MS: u32 = 10;

/// Extra wait after AUX went high, covers the bounce right after a transition.
pub const READY_SETTLE_MS: u32 = 20;

/// Settings of one module instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// UART rate of the module outside program mode. Has to match the
    /// `baud_rate` stored in its parameter register.
    pub baud_rate: BaudRate,
    /// Longest time to wait for AUX after a mode change or reset
    pub ready_timeout_ms: u32,
    /// Window for the response to a read command
    pub response_timeout_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            baud_rate: BaudRate::Bps9600,
            ready_timeout_ms: 1000,
            response_timeout_ms: 20,
        }
    }
}

impl Config {
    pub fn with_baud_rate(self, baud_rate: BaudRate) -> Self {
        Self { baud_rate, ..self }
    }
}
