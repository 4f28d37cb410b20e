#![cfg_attr(not(test), no_std)]
//! EBYTE E32 Radio Driver
//!
//! This crate provides a type-safe interface for the EBYTE E32 family of
//! sub-GHz UART radio modules (E32-433T20D, E32-868T30D, ...). The modules
//! wrap a LoRa transceiver behind a UART and three GPIO lines:
//!
//! - M0/M1: select one of four operating modes
//! - AUX: low while the module is busy, high when it is ready
//! - TXD/RXD: payload in normal modes, configuration commands in program mode
//!
//! # Architecture
//! The driver is organized into several modules:
//!
//! - [`device`]: Main device interface for hardware interaction
//!   - Drives the mode state machine and waits for AUX
//!   - Re-clocks the UART between program mode (9600 baud) and the
//!     module's own rate
//!   - Reads and writes the configuration registers
//!
//! - [`registers`]: Pure encode/decode of the on-wire registers
//!   - [`registers::ConfigurationRegister`]: the 6-byte parameter register
//!   - [`registers::VersionInfo`]: the version frame
//!   - [`registers::Response`]: header byte classification
//!
//! - [`commands`]: The program mode command set
//!
//! - [`uart`]: The serial transport seam, implemented by the host HAL
//!
//! # Usage
//! Commands implement [`regiface::Command`] and responses
//! [`regiface::FromByteArray`], so every exchange goes through
//! [`Device::execute_command`].
//!
//! A typical bring-up:
//!
//! 1. Create a [`Device`] with the UART, [`Pins`], a delay and a [`Config`]
//! 2. Call [`Device::initialize`] to reach normal mode and cache the registers
//! 3. Modify the cached [`ConfigurationRegister`] and write it back with
//!    [`Device::write_configuration`]
//! 4. If the UART rate changed, follow up with [`Device::set_baud_rate`]
//!
//! # Important Notes
//! - Program mode always talks 9600 8N1, whatever the register says
//! - Writing the register is not verified, read it back if that matters
//! - Every mode change waits for AUX, bounded by `Config::ready_timeout_ms`
//!
//! # Features
//! - `defmt`: `defmt::Format` for the public types and trace logging of
//!   mode transitions

#[macro_use]
mod fmt;

pub mod commands;
pub mod conf;
pub mod device;
pub mod error;
pub mod mode;
pub mod registers;
pub mod uart;

pub use commands::*;
pub use conf::Config;
pub use device::{Device, Pins};
pub use error::{Error, InitError, InitStep, ProtocolError, Timeout};
pub use mode::{OperatingMode, Readiness};
pub use registers::*;
pub use uart::{SerialConfig, Uart};
