//! Format version dispatch.
//!
//! Each supported lamedb version maps to a fixed [`Grammar`]: a record of
//! plain parsing functions for its transponder and service records.

use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::service::{self, Service};
use crate::transponder::{self, Transponder};

/// Parses a transponder record: identity line, descriptor line, line number.
pub(crate) type TransponderRule = fn(&str, &str, usize) -> Result<Transponder>;
/// Parses a service record: id line, display name, tag line, line number.
pub(crate) type ServiceRule = fn(&str, String, &str, usize) -> Result<Service>;

/// Record parsers for one format version.
#[derive(Debug)]
pub(crate) struct Grammar {
    pub transponder: TransponderRule,
    pub service: ServiceRule,
}

static V4_GRAMMAR: Grammar = Grammar {
    transponder: transponder::parse_v4,
    service: service::parse_v4,
};

/// Supported lamedb format versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FormatVersion {
    V4,
}

impl FormatVersion {
    /// Select the version registered for a header number.
    pub fn from_number(number: u32) -> Option<Self> {
        match number {
            4 => Some(FormatVersion::V4),
            _ => None,
        }
    }

    pub fn number(self) -> u32 {
        match self {
            FormatVersion::V4 => 4,
        }
    }

    pub(crate) fn grammar(self) -> &'static Grammar {
        match self {
            FormatVersion::V4 => &V4_GRAMMAR,
        }
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}
