//! Commands accepted in program mode

use regiface::{Command, NoParameters};

use crate::registers::{ConfigurationRegister, VersionInfo};

/// Number of times a command byte is sent back to back.
pub const COMMAND_REPEAT: usize = 3;

/// Read parameters command (0xC1)
///
/// Answers with the current parameter register, `0xC0` header if the
/// settings are stored in flash, `0xC2` otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadParameters;

impl Command for ReadParameters {
    type IdType = u8;
    type CommandParameters = NoParameters;
    type ResponseParameters = ConfigurationRegister;

    fn id() -> Self::IdType {
        0xC1
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        NoParameters::default()
    }
}

/// Read version command (0xC3)
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadVersion;

impl Command for ReadVersion {
    type IdType = u8;
    type CommandParameters = NoParameters;
    type ResponseParameters = VersionInfo;

    fn id() -> Self::IdType {
        0xC3
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        NoParameters::default()
    }
}

/// Reset command (0xC4)
///
/// # Important Notes
/// - The module does not answer
/// - AUX goes low while it reboots, wait for it before the next command
/// - The module comes back up still in program mode
#[derive(Debug, Clone, Copy, Default)]
pub struct Reset;

impl Command for Reset {
    type IdType = u8;
    type CommandParameters = NoParameters;
    type ResponseParameters = NoParameters;

    fn id() -> Self::IdType {
        0xC4
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        NoParameters::default()
    }
}
