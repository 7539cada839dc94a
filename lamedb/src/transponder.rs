//! Transponder records.
//!
//! A transponder record spans three lines:
//!
//! ```text
//! 00c00000:0437:0001
//!         s 11778000:27500000:1:3:192:2:0
//! /
//! ```
//!
//! The first line is the identity, the second a delivery descriptor whose
//! first character selects the grammar (`s` = satellite), the third the
//! record terminator. Second-generation satellite descriptors append
//! system, modulation, rolloff and pilot.

use std::str::FromStr;

use serde::Serialize;

use crate::error::{ParseError, Result};
use crate::types::{DeliverySystem, Fec, Polarization};

/// Maximum number of fields in a satellite descriptor.
pub const MAX_SATELLITE_FIELDS: usize = 11;
/// Fields every satellite descriptor must carry (frequency through flags).
pub const MIN_SATELLITE_FIELDS: usize = 7;

/// A tunable satellite carrier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transponder {
    /// DVB namespace (hex).
    pub namespace: String,
    /// Transport stream ID (hex).
    pub transponder_id: String,
    /// Original network ID (hex).
    pub network_id: String,
    /// Frequency in kHz.
    pub frequency: u32,
    pub symbol_rate: u32,
    /// Raw polarization code, see [`Transponder::polarization`].
    pub polarization_code: u8,
    /// Raw FEC code, see [`Transponder::fec`].
    pub fec_code: u8,
    /// Orbital position in tenths of a degree, negative for west.
    pub orbital_position: i32,
    pub inversion: u8,
    pub flags: u32,
    pub delivery_system: Option<DeliverySystem>,
    pub modulation: Option<u8>,
    pub rolloff: Option<u8>,
    pub pilot: Option<u8>,
}

impl Transponder {
    /// Map key: `NAMESPACE:TSID:ONID`, upper-cased.
    pub fn key(&self) -> String {
        transponder_key(&self.namespace, &self.transponder_id, &self.network_id)
    }

    /// Decoded polarization, `None` for codes outside 0-3.
    pub fn polarization(&self) -> Option<Polarization> {
        Polarization::from_code(self.polarization_code)
    }

    /// Decoded FEC rate, `None` for codes outside 0-9 (e.g. 15, "none").
    pub fn fec(&self) -> Option<Fec> {
        Fec::from_code(self.fec_code)
    }

    /// Physical signature `position,frequency,polarization,fec`, e.g.
    /// `192,11778000,V,3/4`.
    ///
    /// `None` when the polarization or FEC code has no decoded form.
    pub fn signature(&self) -> Option<String> {
        let polarization = self.polarization()?;
        let fec = self.fec()?;
        Some(format!(
            "{},{},{},{}",
            self.orbital_position,
            self.frequency,
            polarization.short_code(),
            fec.fraction()
        ))
    }

    /// True for DVB-S2 carriers.
    pub fn is_second_generation(&self) -> bool {
        self.delivery_system == Some(DeliverySystem::DvbS2)
    }

    /// True for carriers without a delivery system field or with DVB-S.
    pub fn is_first_generation(&self) -> bool {
        matches!(self.delivery_system, None | Some(DeliverySystem::DvbS))
    }
}

pub(crate) fn transponder_key(namespace: &str, transponder_id: &str, network_id: &str) -> String {
    format!("{}:{}:{}", namespace, transponder_id, network_id).to_uppercase()
}

/// Parse a version 4 transponder record from its identity and descriptor
/// lines. `line` is the line number of the identity line.
pub(crate) fn parse_v4(identity: &str, descriptor: &str, line: usize) -> Result<Transponder> {
    let ids: Vec<&str> = identity.split(':').collect();
    if ids.len() != 3 || !ids.iter().all(|id| is_hex(id)) {
        return Err(ParseError::MalformedTransponderKey {
            line,
            value: identity.to_string(),
        });
    }

    let descriptor_line = line + 1;
    let mut chars = descriptor.chars();
    match chars.next() {
        Some('s') => {}
        Some(selector) => {
            return Err(ParseError::UnknownTransponderRecordType {
                line: descriptor_line,
                selector,
            })
        }
        None => {
            return Err(ParseError::UnknownTransponderRecordType {
                line: descriptor_line,
                selector: ' ',
            })
        }
    }

    let fields: Vec<&str> = chars.as_str().trim().split(':').map(str::trim).collect();
    if fields.len() > MAX_SATELLITE_FIELDS {
        return Err(ParseError::TooManyTransponderFields {
            line: descriptor_line,
            count: fields.len(),
            max: MAX_SATELLITE_FIELDS,
        });
    }
    if fields.len() < MIN_SATELLITE_FIELDS {
        return Err(ParseError::TooFewTransponderFields {
            line: descriptor_line,
            count: fields.len(),
            min: MIN_SATELLITE_FIELDS,
        });
    }

    let numeric = |idx: usize, name: &'static str| -> Result<u8> {
        number(fields[idx], name, descriptor_line)
    };
    let optional = |idx: usize, name: &'static str| -> Result<Option<u8>> {
        fields
            .get(idx)
            .map(|raw| number::<u8>(raw, name, descriptor_line))
            .transpose()
    };

    Ok(Transponder {
        namespace: ids[0].to_string(),
        transponder_id: ids[1].to_string(),
        network_id: ids[2].to_string(),
        frequency: number(fields[0], "frequency", descriptor_line)?,
        symbol_rate: number(fields[1], "symbol_rate", descriptor_line)?,
        polarization_code: numeric(2, "polarization")?,
        fec_code: numeric(3, "fec")?,
        orbital_position: number(fields[4], "orbital_position", descriptor_line)?,
        inversion: numeric(5, "inversion")?,
        flags: number(fields[6], "flags", descriptor_line)?,
        delivery_system: optional(7, "delivery_system")?.map(DeliverySystem::from_code),
        modulation: optional(8, "modulation")?,
        rolloff: optional(9, "rolloff")?,
        pilot: optional(10, "pilot")?,
    })
}

fn number<T: FromStr>(raw: &str, field: &'static str, line: usize) -> Result<T> {
    raw.parse().map_err(|_| ParseError::InvalidTransponderField {
        line,
        field,
        value: raw.to_string(),
    })
}

fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_first_generation() {
        let t = parse_v4("00c00000:0437:0001", "s11778000:27500000:1:3:192:2:0", 1).unwrap();
        assert_eq!(t.key(), "00C00000:0437:0001");
        assert_eq!(t.frequency, 11778000);
        assert_eq!(t.symbol_rate, 27500000);
        assert_eq!(t.polarization(), Some(Polarization::Vertical));
        assert_eq!(t.fec(), Some(Fec::Fec3_4));
        assert_eq!(t.orbital_position, 192);
        assert_eq!(t.inversion, 2);
        assert_eq!(t.flags, 0);
        assert_eq!(t.delivery_system, None);
        assert_eq!(t.modulation, None);
        assert_eq!(t.pilot, None);
        assert!(!t.is_second_generation());
        assert!(t.is_first_generation());
        assert_eq!(t.signature().as_deref(), Some("192,11778000,V,3/4"));
    }

    #[test]
    fn test_parse_second_generation() {
        let t = parse_v4("011a0000:03ef:0001", "s 11493750:22000000:0:2:282:2:0:1:2:0:2", 1).unwrap();
        assert_eq!(t.delivery_system, Some(DeliverySystem::DvbS2));
        assert_eq!(t.modulation, Some(2));
        assert_eq!(t.rolloff, Some(0));
        assert_eq!(t.pilot, Some(2));
        assert!(t.is_second_generation());
        assert!(!t.is_first_generation());
    }

    #[test]
    fn test_partial_trailing_fields_stay_unset() {
        let t = parse_v4("1:2:3", "s12000:27500:0:0:192:0:0:0:1", 1).unwrap();
        assert_eq!(t.delivery_system, Some(DeliverySystem::DvbS));
        assert!(t.is_first_generation());
        assert_eq!(t.modulation, Some(1));
        assert_eq!(t.rolloff, None);
        assert_eq!(t.pilot, None);
    }

    #[test]
    fn test_negative_orbital_position() {
        let t = parse_v4("1:2:3", "s12000:27500:0:0:-300:0:0", 1).unwrap();
        assert_eq!(t.orbital_position, -300);
        assert_eq!(t.signature().as_deref(), Some("-300,12000,H,Auto"));
    }

    #[test]
    fn test_too_many_fields() {
        let err = parse_v4("1:2:3", "s1:2:0:0:5:6:7:8:9:10:11:12", 4).unwrap_err();
        assert!(matches!(
            err,
            ParseError::TooManyTransponderFields { line: 5, count: 12, max: 11 }
        ));
    }

    #[test]
    fn test_too_few_fields() {
        let err = parse_v4("1:2:3", "s12000:27500:0", 1).unwrap_err();
        assert!(matches!(err, ParseError::TooFewTransponderFields { count: 3, .. }));
    }

    #[test]
    fn test_unknown_selector() {
        let err = parse_v4("1:2:3", "t 474000000:0:0:0:0:0:0", 1).unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnknownTransponderRecordType { selector: 't', .. }
        ));
    }

    #[test]
    fn test_malformed_identity() {
        assert!(matches!(
            parse_v4("1:2", "s12000:27500:0:0:192:0:0", 1),
            Err(ParseError::MalformedTransponderKey { .. })
        ));
        assert!(matches!(
            parse_v4("1:2:zz", "s12000:27500:0:0:192:0:0", 1),
            Err(ParseError::MalformedTransponderKey { .. })
        ));
    }

    #[test]
    fn test_unknown_delivery_system_is_not_first_generation() {
        let t = parse_v4("1:2:3", "s12000:27500:0:0:192:0:0:5", 1).unwrap();
        assert_eq!(t.delivery_system, Some(DeliverySystem::Other(5)));
        assert!(!t.is_first_generation());
        assert!(!t.is_second_generation());
    }

    #[test]
    fn test_undecoded_codes_are_kept() {
        let t = parse_v4("1:2:3", "s11778000:27500000:1:15:192:2:0", 1).unwrap();
        assert_eq!(t.fec_code, 15);
        assert_eq!(t.fec(), None);
        assert_eq!(t.polarization(), Some(Polarization::Vertical));
        assert_eq!(t.signature(), None);

        let t = parse_v4("1:2:3", "s12000:27500:4:0:192:0:0", 1).unwrap();
        assert_eq!(t.polarization_code, 4);
        assert_eq!(t.polarization(), None);
        assert_eq!(t.signature(), None);
    }

    #[test]
    fn test_non_numeric_field_rejected() {
        assert!(matches!(
            parse_v4("1:2:3", "sabc:27500:0:0:192:0:0", 1),
            Err(ParseError::InvalidTransponderField { field: "frequency", .. })
        ));
        assert!(matches!(
            parse_v4("1:2:3", "s12000:27500:0:x:192:0:0", 1),
            Err(ParseError::InvalidTransponderField { field: "fec", .. })
        ));
    }
}
