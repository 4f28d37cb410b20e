//! Program mode command set
//!
//! The E32 understands three commands, each sent as its command byte
//! repeated three times while the module is in program mode at 9600 baud:
//!
//! - [`ReadParameters`] (`C1 C1 C1`): answers with the 6-byte parameter register
//! - [`ReadVersion`] (`C3 C3 C3`): answers with the 6-byte version frame
//! - [`Reset`] (`C4 C4 C4`): no answer, the module reboots and pulls AUX low
//!   until it is done
//!
//! Writing parameters has no command byte of its own; the encoded register is
//! sent as is and its header selects persistence. See
//! [`Device::write_configuration`](crate::Device::write_configuration).
//!
//! # Common Patterns
//! 1. Enter program mode and wait for AUX
//! 2. Send the command
//! 3. Read the response, if any, within the response window
//! 4. Return to normal mode and wait for AUX
//! 5. Decode the response

mod program;

pub use program::*;
