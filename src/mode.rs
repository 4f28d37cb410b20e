//! Operating modes
//!
//! The module's mode is selected by the two M lines. Mode changes are only
//! complete once AUX reports ready again; see
//! [`Device::set_mode`](crate::Device::set_mode).

/// Operating mode of the module
///
/// The discriminant is the 2-bit mode code: bit 1 goes out on M0, bit 0 on M1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperatingMode {
    /// UART and wireless channel open, transparent transmission.
    /// Assumed at power-up.
    #[default]
    Normal = 0b00,
    /// Like normal, but every packet is preceded by a wake-up preamble so
    /// receivers in power saving mode pick it up.
    Wakeup = 0b01,
    /// UART closed, the radio listens periodically for a wake-up preamble.
    PowerSaving = 0b10,
    /// Sleep/configuration mode. Accepts parameter, version and reset
    /// commands at 9600 baud 8N1.
    Program = 0b11,
}

impl OperatingMode {
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Level of the M0 line, `true` for high
    pub fn m0(self) -> bool {
        self.bits() & 0b10 != 0
    }

    /// Level of the M1 line, `true` for high
    pub fn m1(self) -> bool {
        self.bits() & 0b01 != 0
    }
}

/// Outcome of waiting for AUX
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Readiness {
    /// AUX read high on two consecutive polls and the settle delay passed.
    Ready,
    /// The ready budget ran out first.
    TimedOut,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_lines_follow_code() {
        let lines = |mode: OperatingMode| (mode.m0(), mode.m1());

        assert_eq!(lines(OperatingMode::Normal), (false, false));
        assert_eq!(lines(OperatingMode::Wakeup), (false, true));
        assert_eq!(lines(OperatingMode::PowerSaving), (true, false));
        assert_eq!(lines(OperatingMode::Program), (true, true));
    }
}
