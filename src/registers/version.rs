//! Version register
//!
//! Answer to `C3 C3 C3`: a `0xC3` header followed by the model, firmware
//! version and feature bytes. The last two bytes of the frame are unused.

use regiface::FromByteArray;

use super::Response;
use crate::error::ProtocolError;

/// Length of the version response on the wire.
pub const VERSION_LEN: usize = 6;

/// Module identification as reported by the firmware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VersionInfo {
    /// Model code, e.g. `0x32` for the E32 series
    pub model: u8,
    /// Firmware version
    pub version: u8,
    /// Vendor feature bitmap, passed through verbatim
    pub features: u8,
}

impl VersionInfo {
    /// # Errors
    /// * `ProtocolError::UnrecognizedHeader` - byte 0 is not `0xC3`
    pub fn decode(bytes: [u8; VERSION_LEN]) -> Result<Self, ProtocolError> {
        match Response::parse(bytes[0]) {
            Response::Version => Ok(Self {
                model: bytes[1],
                version: bytes[2],
                features: bytes[3],
            }),
            _ => Err(ProtocolError::UnrecognizedHeader(bytes[0])),
        }
    }
}

impl FromByteArray for VersionInfo {
    type Error = ProtocolError;
    type Array = [u8; VERSION_LEN];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Self::decode(bytes)
    }
}
