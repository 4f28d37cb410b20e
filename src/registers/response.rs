//! Response framing
//!
//! Every answer from the module in program mode starts with a header byte
//! naming what follows. [`Response::parse`] is the one place those bytes are
//! interpreted.

use super::{HEAD_PERSISTENT, HEAD_VOLATILE};

/// Header byte of a version response.
pub const HEAD_VERSION: u8 = 0xC3;

/// Kind of response announced by a header byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response {
    /// Parameter register, `0xC0` (persistent) or `0xC2` (volatile)
    Parameters { persistent: bool },
    /// Version information, `0xC3`
    Version,
    /// Anything else
    Unrecognized(u8),
}

impl Response {
    pub fn parse(header: u8) -> Self {
        match header {
            HEAD_PERSISTENT => Self::Parameters { persistent: true },
            HEAD_VOLATILE => Self::Parameters { persistent: false },
            HEAD_VERSION => Self::Version,
            other => Self::Unrecognized(other),
        }
    }
}

impl From<u8> for Response {
    fn from(header: u8) -> Self {
        Self::parse(header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_headers() {
        assert_eq!(Response::parse(0xC0), Response::Parameters { persistent: true });
        assert_eq!(Response::parse(0xC2), Response::Parameters { persistent: false });
        assert_eq!(Response::parse(0xC3), Response::Version);
    }

    #[test]
    fn keeps_unknown_header_byte() {
        assert_eq!(Response::from(0x00), Response::Unrecognized(0x00));
        assert_eq!(Response::from(0xC1), Response::Unrecognized(0xC1));
        assert_eq!(Response::from(0xFF), Response::Unrecognized(0xFF));
    }
}
