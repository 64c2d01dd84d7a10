// Unit tables and pure conversion helpers for bytes and frequencies.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

const KIB: f64 = 1024.0;

/// Binary byte units used for memory and disk figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ByteUnit {
    B,
    KB,
    MB,
    GB,
}

impl ByteUnit {
    const TIERS: [ByteUnit; 4] = [ByteUnit::B, ByteUnit::KB, ByteUnit::MB, ByteUnit::GB];

    pub fn divisor(self) -> f64 {
        match self {
            ByteUnit::B => 1.0,
            ByteUnit::KB => KIB,
            ByteUnit::MB => KIB * KIB,
            ByteUnit::GB => KIB * KIB * KIB,
        }
    }

    /// Symbol used when the user pins a unit (`"GB"`).
    pub fn symbol(self) -> &'static str {
        match self {
            ByteUnit::B => "B",
            ByteUnit::KB => "KB",
            ByteUnit::MB => "MB",
            ByteUnit::GB => "GB",
        }
    }

    /// Single-letter symbol used by largest-unit output (`"G"`).
    pub fn short_symbol(self) -> &'static str {
        match self {
            ByteUnit::B => "B",
            ByteUnit::KB => "K",
            ByteUnit::MB => "M",
            ByteUnit::GB => "G",
        }
    }

    fn next(self) -> Option<ByteUnit> {
        let idx = Self::TIERS.iter().position(|u| *u == self)?;
        Self::TIERS.get(idx + 1).copied()
    }
}

impl FromStr for ByteUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "B" => Ok(ByteUnit::B),
            "KB" => Ok(ByteUnit::KB),
            "MB" => Ok(ByteUnit::MB),
            "GB" => Ok(ByteUnit::GB),
            other => Err(Error::UnknownUnit {
                kind: "memory",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ByteUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Decimal frequency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreqUnit {
    Hz,
    KHz,
    MHz,
    GHz,
}

impl FreqUnit {
    pub fn divisor(self) -> f64 {
        match self {
            FreqUnit::Hz => 1.0,
            FreqUnit::KHz => 1e3,
            FreqUnit::MHz => 1e6,
            FreqUnit::GHz => 1e9,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            FreqUnit::Hz => "Hz",
            FreqUnit::KHz => "KHz",
            FreqUnit::MHz => "MHz",
            FreqUnit::GHz => "GHz",
        }
    }
}

impl FromStr for FreqUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Hz" => Ok(FreqUnit::Hz),
            "KHz" => Ok(FreqUnit::KHz),
            "MHz" => Ok(FreqUnit::MHz),
            "GHz" => Ok(FreqUnit::GHz),
            other => Err(Error::UnknownUnit {
                kind: "frequency",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for FreqUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Temperature scale. Provider readings are always Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempUnit {
    Celsius,
    Fahrenheit,
}

impl TempUnit {
    pub fn convert(self, celsius: f64) -> f64 {
        match self {
            TempUnit::Celsius => celsius,
            TempUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TempUnit::Celsius => "C",
            TempUnit::Fahrenheit => "F",
        }
    }
}

impl FromStr for TempUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "C" => Ok(TempUnit::Celsius),
            "F" => Ok(TempUnit::Fahrenheit),
            other => Err(Error::UnknownUnit {
                kind: "temperature",
                value: other.to_string(),
            }),
        }
    }
}

/// Scale `bytes` to the largest tier (up to giga) that keeps it below 1024.
///
/// Returns values like `"1.50 K"` or `"5.00 G"`. Values past 1024 G stay in G.
pub fn to_largest_unit(bytes: f64, precision: usize) -> String {
    let mut unit = ByteUnit::B;
    while bytes / unit.divisor() >= KIB {
        match unit.next() {
            Some(next) => unit = next,
            None => break,
        }
    }
    format!(
        "{:.*} {}",
        precision,
        bytes / unit.divisor(),
        unit.short_symbol()
    )
}

/// Divide by a pinned unit's divisor and format with `precision` decimals.
pub fn to_fixed_unit(value: f64, divisor: f64, precision: usize) -> String {
    format!("{:.*}", precision, value / divisor)
}
