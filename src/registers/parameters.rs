//! Parameter register
//!
//! The E32 keeps its whole configuration in a single 6-byte register that is
//! read with `C1 C1 C1` and written by sending the encoded register itself
//! while the module sits in program mode:
//!
//! | Byte | Name   | Content                                              |
//! |------|--------|------------------------------------------------------|
//! | 0    | HEAD   | `0xC0` save to flash, `0xC2` volatile                |
//! | 1    | ADDH   | Module address, high byte                            |
//! | 2    | ADDL   | Module address, low byte                             |
//! | 3    | SPED   | Parity (7:6), UART baud (5:3), air data rate (2:0)   |
//! | 4    | CHAN   | Channel                                              |
//! | 5    | OPTION | Fixed (7), pull-up (6), wake-up (5:3), FEC (2), power (1:0) |
//!
//! Decoding is permissive: any bit pattern inside a field maps to a value,
//! with reserved patterns folding onto a documented fallback. Only the header
//! byte is validated.

use core::convert::Infallible;

use bitflags::bitflags;
use regiface::{FromByteArray, ToByteArray};

use super::Response;
use crate::error::ProtocolError;

/// Length of the parameter register on the wire.
pub const PARAMETERS_LEN: usize = 6;

/// Header byte for a register that survives power loss.
pub const HEAD_PERSISTENT: u8 = 0xC0;

/// Header byte for a register that is lost on power down.
pub const HEAD_VOLATILE: u8 = 0xC2;

const PARITY_MASK: u8 = 0b1100_0000;
const BAUD_RATE_MASK: u8 = 0b0011_1000;
const AIR_DATA_RATE_MASK: u8 = 0b0000_0111;
const WAKE_UP_TIME_MASK: u8 = 0b0011_1000;
const TRANSMIT_POWER_MASK: u8 = 0b0000_0011;

bitflags! {
    /// Single-bit switches of the OPTION byte
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OptionFlags: u8 {
        /// Fixed (point-to-point) transmission, the first three bytes of
        /// each payload carry the target address and channel
        const FIXED_TRANSMISSION = 1 << 7;
        /// TXD, RXD and AUX driven push-pull with internal pull-ups
        /// instead of open collector
        const PULL_UP = 1 << 6;
        /// Forward error correction
        const FEC = 1 << 2;
    }
}

/// UART parity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    /// 8N1
    #[default]
    None,
    /// 8O1
    Odd,
    /// 8E1
    Even,
}

impl Parity {
    /// Decodes the two parity bits. `0b11` is documented as a second 8N1.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Self::None,
            0b01 => Self::Odd,
            0b10 => Self::Even,
            _ => Self::None,
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            Self::None => 0b00,
            Self::Odd => 0b01,
            Self::Even => 0b10,
        }
    }
}

/// UART interface baud rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BaudRate {
    Bps1200,
    Bps2400,
    Bps4800,
    #[default]
    Bps9600,
    Bps19200,
    Bps38400,
    Bps57600,
    Bps115200,
}

impl BaudRate {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0b000 => Self::Bps1200,
            0b001 => Self::Bps2400,
            0b010 => Self::Bps4800,
            0b011 => Self::Bps9600,
            0b100 => Self::Bps19200,
            0b101 => Self::Bps38400,
            0b110 => Self::Bps57600,
            0b111 => Self::Bps115200,
            _ => Self::Bps9600,
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            Self::Bps1200 => 0b000,
            Self::Bps2400 => 0b001,
            Self::Bps4800 => 0b010,
            Self::Bps9600 => 0b011,
            Self::Bps19200 => 0b100,
            Self::Bps38400 => 0b101,
            Self::Bps57600 => 0b110,
            Self::Bps115200 => 0b111,
        }
    }

    /// Rate in bits per second
    pub fn bps(self) -> u32 {
        match self {
            Self::Bps1200 => 1200,
            Self::Bps2400 => 2400,
            Self::Bps4800 => 4800,
            Self::Bps9600 => 9600,
            Self::Bps19200 => 19200,
            Self::Bps38400 => 38400,
            Self::Bps57600 => 57600,
            Self::Bps115200 => 115200,
        }
    }

    /// Returns `None` for rates the module does not support.
    pub fn from_bps(bps: u32) -> Option<Self> {
        match bps {
            1200 => Some(Self::Bps1200),
            2400 => Some(Self::Bps2400),
            4800 => Some(Self::Bps4800),
            9600 => Some(Self::Bps9600),
            19200 => Some(Self::Bps19200),
            38400 => Some(Self::Bps38400),
            57600 => Some(Self::Bps57600),
            115200 => Some(Self::Bps115200),
            _ => None,
        }
    }
}

/// Over-the-air data rate
///
/// Codes `0b101`, `0b110` and `0b111` all select 19.2 kbps. Only `0b101` is
/// ever written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AirDataRate {
    Bps300,
    Bps1200,
    #[default]
    Bps2400,
    Bps4800,
    Bps9600,
    Bps19200,
}

impl AirDataRate {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0b000 => Self::Bps300,
            0b001 => Self::Bps1200,
            0b010 => Self::Bps2400,
            0b011 => Self::Bps4800,
            0b100 => Self::Bps9600,
            0b101 | 0b110 | 0b111 => Self::Bps19200,
            _ => Self::Bps2400,
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            Self::Bps300 => 0b000,
            Self::Bps1200 => 0b001,
            Self::Bps2400 => 0b010,
            Self::Bps4800 => 0b011,
            Self::Bps9600 => 0b100,
            Self::Bps19200 => 0b101,
        }
    }

    pub fn bps(self) -> u32 {
        match self {
            Self::Bps300 => 300,
            Self::Bps1200 => 1200,
            Self::Bps2400 => 2400,
            Self::Bps4800 => 4800,
            Self::Bps9600 => 9600,
            Self::Bps19200 => 19200,
        }
    }

    pub fn from_bps(bps: u32) -> Option<Self> {
        match bps {
            300 => Some(Self::Bps300),
            1200 => Some(Self::Bps1200),
            2400 => Some(Self::Bps2400),
            4800 => Some(Self::Bps4800),
            9600 => Some(Self::Bps9600),
            19200 => Some(Self::Bps19200),
            _ => None,
        }
    }
}

/// Wireless wake-up preamble duration
///
/// Only relevant in wake-up mode on the transmitter and in power saving mode
/// on the receiver, where it is the listening interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WakeUpTime {
    #[default]
    Ms250,
    Ms500,
    Ms750,
    Ms1000,
    Ms1250,
    Ms1500,
    Ms1750,
    Ms2000,
}

impl WakeUpTime {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0b000 => Self::Ms250,
            0b001 => Self::Ms500,
            0b010 => Self::Ms750,
            0b011 => Self::Ms1000,
            0b100 => Self::Ms1250,
            0b101 => Self::Ms1500,
            0b110 => Self::Ms1750,
            0b111 => Self::Ms2000,
            _ => Self::Ms250,
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            Self::Ms250 => 0b000,
            Self::Ms500 => 0b001,
            Self::Ms750 => 0b010,
            Self::Ms1000 => 0b011,
            Self::Ms1250 => 0b100,
            Self::Ms1500 => 0b101,
            Self::Ms1750 => 0b110,
            Self::Ms2000 => 0b111,
        }
    }

    pub fn millis(self) -> u16 {
        (self.bits() as u16 + 1) * 250
    }

    pub fn from_millis(ms: u16) -> Option<Self> {
        match ms {
            250 => Some(Self::Ms250),
            500 => Some(Self::Ms500),
            750 => Some(Self::Ms750),
            1000 => Some(Self::Ms1000),
            1250 => Some(Self::Ms1250),
            1500 => Some(Self::Ms1500),
            1750 => Some(Self::Ms1750),
            2000 => Some(Self::Ms2000),
            _ => None,
        }
    }
}

/// Output power class of a module variant
///
/// 1 W parts (E32-xxxT30) top out at 30 dBm, 100 mW parts (E32-xxxT20) at
/// 20 dBm. The register encoding is the same for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerClass {
    #[default]
    Dbm30,
    Dbm20,
}

/// Transmit power step, named after the 30 dBm class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransmitPower {
    #[default]
    Dbm30,
    Dbm27,
    Dbm24,
    Dbm21,
}

impl TransmitPower {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Self::Dbm30,
            0b01 => Self::Dbm27,
            0b10 => Self::Dbm24,
            0b11 => Self::Dbm21,
            _ => Self::Dbm30,
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            Self::Dbm30 => 0b00,
            Self::Dbm27 => 0b01,
            Self::Dbm24 => 0b10,
            Self::Dbm21 => 0b11,
        }
    }

    /// Output power in dBm for the given module class
    pub fn dbm(self, class: PowerClass) -> u8 {
        match (class, self) {
            (PowerClass::Dbm30, Self::Dbm30) => 30,
            (PowerClass::Dbm30, Self::Dbm27) => 27,
            (PowerClass::Dbm30, Self::Dbm24) => 24,
            (PowerClass::Dbm30, Self::Dbm21) => 21,
            (PowerClass::Dbm20, Self::Dbm30) => 20,
            (PowerClass::Dbm20, Self::Dbm27) => 17,
            (PowerClass::Dbm20, Self::Dbm24) => 14,
            (PowerClass::Dbm20, Self::Dbm21) => 10,
        }
    }

    /// Accepts the dBm steps of either power class.
    pub fn from_dbm(dbm: u8) -> Option<Self> {
        match dbm {
            30 | 20 => Some(Self::Dbm30),
            27 | 17 => Some(Self::Dbm27),
            24 | 14 => Some(Self::Dbm24),
            21 | 10 => Some(Self::Dbm21),
            _ => None,
        }
    }
}

/// Decoded parameter register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigurationRegister {
    /// Keep the settings across power loss (`0xC0` header)
    pub persistent: bool,
    /// Module address, `0xFFFF` listens to every address
    pub address: u16,
    pub parity: Parity,
    pub baud_rate: BaudRate,
    pub air_data_rate: AirDataRate,
    /// Channel offset within the module's frequency plan
    pub channel: u8,
    /// Point-to-point instead of transparent (broadcast) addressing
    pub fixed_transmission: bool,
    pub pull_up: bool,
    pub wake_up_time: WakeUpTime,
    pub fec: bool,
    pub transmit_power: TransmitPower,
}

/// Factory settings: `C0 00 00 1A 17 44`
impl Default for ConfigurationRegister {
    fn default() -> Self {
        Self {
            persistent: true,
            address: 0x0000,
            parity: Parity::None,
            baud_rate: BaudRate::Bps9600,
            air_data_rate: AirDataRate::Bps2400,
            channel: 0x17,
            fixed_transmission: false,
            pull_up: true,
            wake_up_time: WakeUpTime::Ms250,
            fec: true,
            transmit_power: TransmitPower::Dbm30,
        }
    }
}

impl ConfigurationRegister {
    /// Decodes a register as returned by the read parameters command.
    ///
    /// # Errors
    /// * `ProtocolError::UnrecognizedHeader` - byte 0 is neither `0xC0` nor `0xC2`
    pub fn decode(bytes: [u8; PARAMETERS_LEN]) -> Result<Self, ProtocolError> {
        let persistent = match Response::parse(bytes[0]) {
            Response::Parameters { persistent } => persistent,
            _ => return Err(ProtocolError::UnrecognizedHeader(bytes[0])),
        };

        let sped = bytes[3];
        let option = bytes[5];
        let flags = OptionFlags::from_bits_truncate(option);

        Ok(Self {
            persistent,
            address: u16::from_be_bytes([bytes[1], bytes[2]]),
            parity: Parity::from_bits((sped & PARITY_MASK) >> 6),
            baud_rate: BaudRate::from_bits((sped & BAUD_RATE_MASK) >> 3),
            air_data_rate: AirDataRate::from_bits(sped & AIR_DATA_RATE_MASK),
            channel: bytes[4],
            fixed_transmission: flags.contains(OptionFlags::FIXED_TRANSMISSION),
            pull_up: flags.contains(OptionFlags::PULL_UP),
            wake_up_time: WakeUpTime::from_bits((option & WAKE_UP_TIME_MASK) >> 3),
            fec: flags.contains(OptionFlags::FEC),
            transmit_power: TransmitPower::from_bits(option & TRANSMIT_POWER_MASK),
        })
    }

    /// Encodes the register in the form accepted by the module in program mode.
    pub fn encode(&self) -> [u8; PARAMETERS_LEN] {
        let head = if self.persistent {
            HEAD_PERSISTENT
        } else {
            HEAD_VOLATILE
        };
        let [addh, addl] = self.address.to_be_bytes();

        let sped = (self.parity.bits() << 6)
            | (self.baud_rate.bits() << 3)
            | self.air_data_rate.bits();

        let mut flags = OptionFlags::empty();
        flags.set(OptionFlags::FIXED_TRANSMISSION, self.fixed_transmission);
        flags.set(OptionFlags::PULL_UP, self.pull_up);
        flags.set(OptionFlags::FEC, self.fec);
        let option =
            flags.bits() | (self.wake_up_time.bits() << 3) | self.transmit_power.bits();

        [head, addh, addl, sped, self.channel, option]
    }
}

impl FromByteArray for ConfigurationRegister {
    type Error = ProtocolError;
    type Array = [u8; PARAMETERS_LEN];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Self::decode(bytes)
    }
}

impl ToByteArray for ConfigurationRegister {
    type Error = Infallible;
    type Array = [u8; PARAMETERS_LEN];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok(self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_reference_register() {
        let cfg = ConfigurationRegister::decode([0xC0, 0x00, 0x01, 0x18, 0x17, 0x00]).unwrap();

        assert!(cfg.persistent);
        assert_eq!(cfg.address, 1);
        assert_eq!(cfg.parity, Parity::None);
        assert_eq!(cfg.baud_rate.bps(), 9600);
        assert_eq!(cfg.air_data_rate.bps(), 300);
        assert_eq!(cfg.channel, 23);
        assert!(!cfg.fixed_transmission);
        assert!(!cfg.pull_up);
        assert_eq!(cfg.wake_up_time.millis(), 250);
        assert!(!cfg.fec);
        assert_eq!(cfg.transmit_power.dbm(PowerClass::Dbm30), 30);
    }

    #[test]
    fn volatile_header_clears_persistence() {
        let cfg = ConfigurationRegister::decode([0xC2, 0x12, 0x34, 0x1A, 0x05, 0x44]).unwrap();

        assert!(!cfg.persistent);
        assert_eq!(cfg.address, 0x1234);
    }

    #[test]
    fn rejects_unknown_headers() {
        for head in (0u8..=0xFF).filter(|h| *h != HEAD_PERSISTENT && *h != HEAD_VOLATILE) {
            assert_eq!(
                ConfigurationRegister::decode([head, 0, 0, 0x1A, 0x17, 0x44]),
                Err(ProtocolError::UnrecognizedHeader(head))
            );
        }
    }

    #[test]
    fn every_sped_byte_decodes() {
        for sped in 0u8..=0xFF {
            let cfg = ConfigurationRegister::decode([0xC0, 0, 0, sped, 0, 0]).unwrap();

            assert_eq!(cfg.baud_rate.bits(), (sped >> 3) & 0b111);
            match sped & 0b111 {
                0b101..=0b111 => assert_eq!(cfg.air_data_rate, AirDataRate::Bps19200),
                code => assert_eq!(cfg.air_data_rate.bits(), code),
            }
            match sped >> 6 {
                0b11 => assert_eq!(cfg.parity, Parity::None),
                code => assert_eq!(cfg.parity.bits(), code),
            }
        }
    }

    #[test]
    fn canonical_registers_round_trip() {
        for sped in 0u8..=0xFF {
            let air = sped & 0b111;
            let parity = sped >> 6;
            if air > 0b101 || parity == 0b11 {
                continue;
            }
            for option in 0u8..=0xFF {
                // every OPTION bit belongs to a field with no reserved codes
                let bytes = [0xC2, 0xAB, 0xCD, sped, 0x42, option];
                let cfg = ConfigurationRegister::decode(bytes).unwrap();
                assert_eq!(cfg.encode(), bytes);
            }
        }
    }

    #[test]
    fn non_canonical_codes_collapse() {
        let cfg = ConfigurationRegister::decode([0xC0, 0, 0, 0b1100_0111, 0, 0]).unwrap();

        assert_eq!(cfg.encode()[3], 0b0000_0101);
    }

    #[test]
    fn fec_lives_in_bit_two() {
        let on = ConfigurationRegister::decode([0xC0, 0, 0, 0, 0, 0b0000_0100]).unwrap();
        let off = ConfigurationRegister::decode([0xC0, 0, 0, 0, 0, 0b0000_0011]).unwrap();

        assert!(on.fec);
        assert!(!off.fec);
        assert_eq!(off.transmit_power, TransmitPower::Dbm21);
    }

    #[test]
    fn factory_defaults_encode() {
        assert_eq!(
            ConfigurationRegister::default().encode(),
            [0xC0, 0x00, 0x00, 0x1A, 0x17, 0x44]
        );
    }

    #[test]
    fn power_steps_map_per_class() {
        assert_eq!(TransmitPower::from_dbm(17), Some(TransmitPower::Dbm27));
        assert_eq!(TransmitPower::Dbm27.dbm(PowerClass::Dbm20), 17);
        assert_eq!(TransmitPower::Dbm21.dbm(PowerClass::Dbm20), 10);
        assert_eq!(TransmitPower::from_dbm(22), None);
    }

    #[test]
    fn numeric_constructors_reject_unsupported_values() {
        assert_eq!(BaudRate::from_bps(57600), Some(BaudRate::Bps57600));
        assert_eq!(BaudRate::from_bps(14400), None);
        assert_eq!(AirDataRate::from_bps(19200), Some(AirDataRate::Bps19200));
        assert_eq!(AirDataRate::from_bps(38400), None);
        assert_eq!(WakeUpTime::from_millis(1750), Some(WakeUpTime::Ms1750));
        assert_eq!(WakeUpTime::Ms2000.millis(), 2000);
        assert_eq!(WakeUpTime::from_millis(100), None);
    }
}
