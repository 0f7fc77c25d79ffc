//! Bridge configuration.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use wbaxi::{flog2, is_pow2};

use crate::constants::{self, DATA_WIDTHS, MAX_LGFIFO, MAX_RATIO};

#[allow(missing_docs)]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported Wishbone data width {0}: expected one of 8, 16, 32 or 64")]
    DataWidth(usize),

    #[error("AXI data width {axi} is not 1, 2, 4, 8, 16 or 32 times the Wishbone data width {wb}")]
    Ratio { wb: usize, axi: usize },

    #[error("AXI address width {axi} must be the Wishbone address width {wb} plus {shift}")]
    AddrWidth { wb: usize, axi: usize, shift: usize },

    #[error("AXI address width {0} exceeds 64 bits")]
    AddrTooWide(usize),

    #[error("Wishbone address width {wb} cannot select one of {ratio} words in an AXI beat")]
    AddrTooNarrow { wb: usize, ratio: usize },

    #[error("log2 of the pending queue depth must be within 1..={max}, got {lgfifo}")]
    Depth { lgfifo: usize, max: usize },

    #[error("unknown preset `{0}`")]
    UnknownPreset(String),
}

/// Immutable parameters of one bridge instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    data_width: usize,
    addr_width: usize,
    axi_data_width: usize,
    axi_addr_width: usize,
    lgfifo: usize,
    write_id: u32,
    read_id: u32,
}

impl Config {
    /// Validates and creates a configuration.
    ///
    /// `data_width`/`addr_width` describe the Wishbone side (word addresses), `axi_data_width`/
    /// `axi_addr_width` the AXI side (byte addresses). The pending queue holds `2^lgfifo`
    /// transactions.
    pub fn new(
        data_width: usize, addr_width: usize, axi_data_width: usize, axi_addr_width: usize, lgfifo: usize,
    ) -> Result<Self, ConfigError> {
        if !DATA_WIDTHS.contains(&data_width) {
            return Err(ConfigError::DataWidth(data_width));
        }

        let ratio = axi_data_width / data_width;
        if axi_data_width % data_width != 0 || !is_pow2(ratio) || ratio > MAX_RATIO {
            return Err(ConfigError::Ratio { wb: data_width, axi: axi_data_width });
        }

        let shift = flog2(data_width / 8);
        if axi_addr_width != addr_width + shift {
            return Err(ConfigError::AddrWidth { wb: addr_width, axi: axi_addr_width, shift });
        }
        if axi_addr_width > 64 {
            return Err(ConfigError::AddrTooWide(axi_addr_width));
        }
        if addr_width < flog2(ratio) || addr_width == 0 {
            return Err(ConfigError::AddrTooNarrow { wb: addr_width, ratio });
        }

        if !(1..=MAX_LGFIFO).contains(&lgfifo) {
            return Err(ConfigError::Depth { lgfifo, max: MAX_LGFIFO });
        }

        Ok(Self { data_width, addr_width, axi_data_width, axi_addr_width, lgfifo, write_id: 0, read_id: 0 })
    }

    /// Creates a preset configuration.
    pub fn preset(preset: Preset) -> Self {
        macro_rules! from_constants {
            ($preset:ident) => {
                Self {
                    data_width: constants::$preset::DATA_WIDTH,
                    addr_width: constants::$preset::ADDR_WIDTH,
                    axi_data_width: constants::$preset::AXI_DATA_WIDTH,
                    axi_addr_width: constants::$preset::AXI_ADDR_WIDTH,
                    lgfifo: constants::$preset::LGFIFO,
                    write_id: 0,
                    read_id: 0,
                }
            };
        }

        match preset {
            Preset::Wb32Axi32 => from_constants!(wb32_axi32),
            Preset::Wb32Axi128 => from_constants!(wb32_axi128),
            Preset::Wb8Axi256 => from_constants!(wb8_axi256),
            Preset::Wb64Axi512 => from_constants!(wb64_axi512),
        }
    }

    /// Sets the IDs driven on `awid` and `arid`.
    pub fn with_ids(self, write_id: u32, read_id: u32) -> Self { Self { write_id, read_id, ..self } }

    /// Wishbone data width in bits.
    pub fn data_width(&self) -> usize { self.data_width }

    /// Wishbone address width in bits.
    pub fn addr_width(&self) -> usize { self.addr_width }

    /// AXI data width in bits.
    pub fn axi_data_width(&self) -> usize { self.axi_data_width }

    /// AXI address width in bits.
    pub fn axi_addr_width(&self) -> usize { self.axi_addr_width }

    /// log2 of the pending queue depth.
    pub fn lgfifo(&self) -> usize { self.lgfifo }

    /// Maximum number of transactions in flight.
    pub fn capacity(&self) -> usize { 1 << self.lgfifo }

    /// Wishbone words per AXI beat.
    pub fn ratio(&self) -> usize { self.axi_data_width / self.data_width }

    /// Bytes per Wishbone word.
    pub fn data_bytes(&self) -> usize { self.data_width / 8 }

    /// Bytes per AXI beat.
    pub fn axi_data_bytes(&self) -> usize { self.axi_data_width / 8 }

    /// AxSIZE: log2 of the bytes per AXI beat.
    pub fn axi_size(&self) -> u8 { flog2(self.axi_data_bytes()) as u8 }

    /// Whether responses need the sub-word address queue.
    pub fn has_subword_queue(&self) -> bool { self.ratio() > 1 }

    /// ID of every write.
    pub fn write_id(&self) -> u32 { self.write_id }

    /// ID of every read.
    pub fn read_id(&self) -> u32 { self.read_id }
}

/// Named configurations from [`constants`].
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Wb32Axi32,
    Wb32Axi128,
    Wb8Axi256,
    Wb64Axi512,
}

impl Preset {
    /// Every preset.
    pub const ALL: [Preset; 4] = [Preset::Wb32Axi32, Preset::Wb32Axi128, Preset::Wb8Axi256, Preset::Wb64Axi512];

    /// Preset name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Wb32Axi32 => "wb32-axi32",
            Self::Wb32Axi128 => "wb32-axi128",
            Self::Wb8Axi256 => "wb8-axi256",
            Self::Wb64Axi512 => "wb64-axi512",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| ConfigError::UnknownPreset(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test]
    fn derived_parameters() {
        let config = Config::new(32, 30, 128, 32, 6).unwrap();
        assert_eq!(config.ratio(), 4);
        assert_eq!(config.capacity(), 64);
        assert_eq!(config.axi_size(), 4);
        assert_eq!(config.data_bytes(), 4);
        assert!(config.has_subword_queue());
        assert!(!Config::new(32, 30, 32, 32, 6).unwrap().has_subword_queue());
    }

    #[test_case(24, 30, 96, 32, 6, ConfigError::DataWidth(24); "narrow width")]
    #[test_case(32, 30, 96, 32, 6, ConfigError::Ratio { wb: 32, axi: 96 }; "non power of two ratio")]
    #[test_case(32, 30, 2048, 32, 6, ConfigError::Ratio { wb: 32, axi: 2048 }; "ratio above 32")]
    #[test_case(32, 30, 16, 32, 6, ConfigError::Ratio { wb: 32, axi: 16 }; "axi narrower than wishbone")]
    #[test_case(32, 30, 128, 31, 6, ConfigError::AddrWidth { wb: 30, axi: 31, shift: 2 }; "address width relation")]
    #[test_case(32, 63, 128, 65, 6, ConfigError::AddrTooWide(65); "address above 64 bits")]
    #[test_case(8, 4, 256, 4, 6, ConfigError::AddrTooNarrow { wb: 4, ratio: 32 }; "no sub-word select bits")]
    #[test_case(32, 30, 128, 32, 0, ConfigError::Depth { lgfifo: 0, max: MAX_LGFIFO }; "depth zero")]
    #[test_case(32, 30, 128, 32, 9, ConfigError::Depth { lgfifo: 9, max: MAX_LGFIFO }; "depth too large")]
    fn rejects(dw: usize, aw: usize, wdw: usize, waw: usize, lgfifo: usize, expected: ConfigError) {
        assert_eq!(Config::new(dw, aw, wdw, waw, lgfifo), Err(expected));
    }

    #[test]
    fn presets_match_validation() {
        for preset in Preset::ALL {
            let config = Config::preset(preset);
            let validated = Config::new(
                config.data_width(),
                config.addr_width(),
                config.axi_data_width(),
                config.axi_addr_width(),
                config.lgfifo(),
            );
            assert_eq!(validated, Ok(config));
            assert_eq!(preset.to_string().parse::<Preset>(), Ok(preset));
        }
        assert_eq!("wb16".parse::<Preset>(), Err(ConfigError::UnknownPreset("wb16".to_string())));
    }

    #[test]
    fn ids() {
        let config = Config::preset(Preset::Wb32Axi32).with_ids(3, 5);
        assert_eq!((config.write_id(), config.read_id()), (3, 5));
    }
}
