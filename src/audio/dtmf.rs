//! DTMF frequency table
//!
//! The standard 4x4 keypad matrix: four low-group (row) frequencies crossed
//! with four high-group (column) frequencies. Each of the sixteen symbols
//! maps to exactly one (low, high) pair. The table is immutable and fully
//! const.

use thiserror::Error;

/// Low-group (row) frequencies in Hz.
pub const LOW_GROUP: [u32; 4] = [697, 770, 852, 941];

/// High-group (column) frequencies in Hz.
pub const HIGH_GROUP: [u32; 4] = [1209, 1336, 1477, 1633];

/// Reference tone used for dial, ring and busy signals, in Hz.
pub const REFERENCE_TONE_HZ: u32 = 425;

/// Error returned when a character is not one of the sixteen keypad symbols.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unknown keypad symbol: {0:?}")]
pub struct UnknownSymbolError(pub char);

/// Closed set of keypad symbols. Invalid symbols are unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    D1, D2, D3, A,
    D4, D5, D6, B,
    D7, D8, D9, C,
    Star, D0, Hash, D,
}

impl Symbol {
    /// All sixteen symbols in keypad layout order (row-major).
    pub const ALL: [Symbol; 16] = [
        Self::D1, Self::D2, Self::D3, Self::A,
        Self::D4, Self::D5, Self::D6, Self::B,
        Self::D7, Self::D8, Self::D9, Self::C,
        Self::Star, Self::D0, Self::Hash, Self::D,
    ];

    /// Row (low-group) and column (high-group) indices in the 4x4 matrix.
    const fn position(self) -> (usize, usize) {
        match self {
            Self::D1 => (0, 0), Self::D2 => (0, 1), Self::D3 => (0, 2), Self::A => (0, 3),
            Self::D4 => (1, 0), Self::D5 => (1, 1), Self::D6 => (1, 2), Self::B => (1, 3),
            Self::D7 => (2, 0), Self::D8 => (2, 1), Self::D9 => (2, 2), Self::C => (2, 3),
            Self::Star => (3, 0), Self::D0 => (3, 1), Self::Hash => (3, 2), Self::D => (3, 3),
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            Self::D0 => '0', Self::D1 => '1', Self::D2 => '2', Self::D3 => '3',
            Self::D4 => '4', Self::D5 => '5', Self::D6 => '6', Self::D7 => '7',
            Self::D8 => '8', Self::D9 => '9',
            Self::Star => '*', Self::Hash => '#',
            Self::A => 'A', Self::B => 'B', Self::C => 'C', Self::D => 'D',
        }
    }

    /// Label for the on-screen keypad button.
    pub fn label(self) -> String {
        self.to_char().to_string()
    }
}

impl TryFrom<char> for Symbol {
    type Error = UnknownSymbolError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '0' => Ok(Self::D0), '1' => Ok(Self::D1), '2' => Ok(Self::D2),
            '3' => Ok(Self::D3), '4' => Ok(Self::D4), '5' => Ok(Self::D5),
            '6' => Ok(Self::D6), '7' => Ok(Self::D7), '8' => Ok(Self::D8),
            '9' => Ok(Self::D9),
            '*' => Ok(Self::Star), '#' => Ok(Self::Hash),
            'A' => Ok(Self::A), 'B' => Ok(Self::B), 'C' => Ok(Self::C),
            'D' => Ok(Self::D),
            other => Err(UnknownSymbolError(other)),
        }
    }
}

/// A DTMF tone: one low-group and one high-group frequency, in Hz.
///
/// The pair packs into a single `u64` (low in the high half) so the audio
/// and UI threads can share it through one atomic without tearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrequencyPair {
    pub low: u32,
    pub high: u32,
}

impl FrequencyPair {
    pub const fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    pub const fn pack(self) -> u64 {
        ((self.low as u64) << 32) | self.high as u64
    }

    pub const fn unpack(bits: u64) -> Self {
        Self {
            low: (bits >> 32) as u32,
            high: bits as u32,
        }
    }
}

/// Look up the DTMF frequency pair for a keypad symbol.
pub const fn lookup(symbol: Symbol) -> FrequencyPair {
    let (row, col) = symbol.position();
    FrequencyPair::new(LOW_GROUP[row], HIGH_GROUP[col])
}
