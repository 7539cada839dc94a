//! Enum decode tables for lamedb numeric codes.

use std::fmt;

use serde::Serialize;

/// Satellite signal polarization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Polarization {
    Horizontal = 0,
    Vertical = 1,
    CircularLeft = 2,
    CircularRight = 3,
}

impl Polarization {
    /// Decode a lamedb polarization code (0-3).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Polarization::Horizontal),
            1 => Some(Polarization::Vertical),
            2 => Some(Polarization::CircularLeft),
            3 => Some(Polarization::CircularRight),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// One-letter code used in transponder signatures.
    pub fn short_code(self) -> &'static str {
        match self {
            Polarization::Horizontal => "H",
            Polarization::Vertical => "V",
            Polarization::CircularLeft => "L",
            Polarization::CircularRight => "R",
        }
    }

    pub fn long_name(self) -> &'static str {
        match self {
            Polarization::Horizontal => "Horizontal",
            Polarization::Vertical => "Vertical",
            Polarization::CircularLeft => "Circular Left",
            Polarization::CircularRight => "Circular Right",
        }
    }
}

impl fmt::Display for Polarization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_code())
    }
}

/// Forward error correction inner code rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Fec {
    Auto = 0,
    Fec1_2 = 1,
    Fec2_3 = 2,
    Fec3_4 = 3,
    Fec5_6 = 4,
    Fec7_8 = 5,
    Fec8_9 = 6,
    Fec3_5 = 7,
    Fec4_5 = 8,
    Fec9_10 = 9,
}

impl Fec {
    /// Decode a lamedb FEC code (0-9).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Fec::Auto),
            1 => Some(Fec::Fec1_2),
            2 => Some(Fec::Fec2_3),
            3 => Some(Fec::Fec3_4),
            4 => Some(Fec::Fec5_6),
            5 => Some(Fec::Fec7_8),
            6 => Some(Fec::Fec8_9),
            7 => Some(Fec::Fec3_5),
            8 => Some(Fec::Fec4_5),
            9 => Some(Fec::Fec9_10),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Code rate as written in transponder signatures, e.g. `"3/4"`.
    pub fn fraction(self) -> &'static str {
        match self {
            Fec::Auto => "Auto",
            Fec::Fec1_2 => "1/2",
            Fec::Fec2_3 => "2/3",
            Fec::Fec3_4 => "3/4",
            Fec::Fec5_6 => "5/6",
            Fec::Fec7_8 => "7/8",
            Fec::Fec8_9 => "8/9",
            Fec::Fec3_5 => "3/5",
            Fec::Fec4_5 => "4/5",
            Fec::Fec9_10 => "9/10",
        }
    }
}

impl fmt::Display for Fec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fraction())
    }
}

/// Satellite delivery system generation.
///
/// Only present on descriptors that carry the trailing
/// system/modulation/rolloff/pilot fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DeliverySystem {
    /// DVB-S
    DvbS,
    /// DVB-S2
    DvbS2,
    Other(u8),
}

impl DeliverySystem {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => DeliverySystem::DvbS,
            1 => DeliverySystem::DvbS2,
            other => DeliverySystem::Other(other),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            DeliverySystem::DvbS => 0,
            DeliverySystem::DvbS2 => 1,
            DeliverySystem::Other(code) => code,
        }
    }
}

/// Service classification from the lamedb service type field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ServiceType {
    Tv,
    Radio,
    Hdtv,
    /// Data services and anything unassigned.
    Other(u16),
}

impl ServiceType {
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => ServiceType::Tv,
            2 => ServiceType::Radio,
            25 => ServiceType::Hdtv,
            other => ServiceType::Other(other),
        }
    }

    pub fn code(self) -> u16 {
        match self {
            ServiceType::Tv => 1,
            ServiceType::Radio => 2,
            ServiceType::Hdtv => 25,
            ServiceType::Other(code) => code,
        }
    }

    /// Standard-definition television (type 1).
    pub fn is_tv(self) -> bool {
        self == ServiceType::Tv
    }

    pub fn name(self) -> &'static str {
        match self {
            ServiceType::Tv => "TV",
            ServiceType::Radio => "Radio",
            ServiceType::Hdtv => "HDTV",
            ServiceType::Other(_) => "Data",
        }
    }
}
