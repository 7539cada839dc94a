//! Bouquet service references.
//!
//! Bouquet files (`userbouquet.*.tv`) list services as enigma2 references:
//!
//! ```text
//! #NAME Favourites (TV)
//! #SERVICE 1:0:19:283D:3FB:1:C00000:0:0:0:
//! #SERVICE 1:64:0:0:0:0:0:0:0:0::News
//! #DESCRIPTION News
//! ```
//!
//! Fields are `type:flags:service_type:sid:tsid:onid:namespace:...`. Flags
//! are decimal, the remaining ids hexadecimal.

use crate::error::ReferenceError;
use crate::service::service_key;

const SERVICE_PREFIX: &str = "#SERVICE ";
const NAME_PREFIX: &str = "#NAME ";
const MIN_FIELDS: usize = 7;

/// Flag bit set on bouquet markers (section labels).
const FLAG_MARKER: u32 = 64;
/// Flags value of numbered marker / spacer entries.
const FLAG_SPACER: u32 = 134;

/// A parsed enigma2 service reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceReference {
    raw: String,
    pub flags: u32,
    pub service_id: String,
    pub transponder_id: String,
    pub network_id: String,
    pub namespace: String,
}

impl ServiceReference {
    /// Parse a `#SERVICE <ref>` line or a bare reference.
    pub fn parse(line: &str) -> Result<Self, ReferenceError> {
        let line = line.trim();
        let reference = match line.strip_prefix(SERVICE_PREFIX) {
            Some(rest) => rest.trim(),
            None if line.starts_with('#') => {
                return Err(ReferenceError::MissingPrefix(line.to_string()))
            }
            None => line,
        };

        let fields: Vec<&str> = reference.split(':').collect();
        if fields.len() < MIN_FIELDS {
            return Err(ReferenceError::TooFewFields {
                count: fields.len(),
            });
        }
        let flags = fields[1]
            .parse::<u32>()
            .map_err(|_| ReferenceError::InvalidFlags(fields[1].to_string()))?;

        Ok(Self {
            raw: reference.to_string(),
            flags,
            service_id: fields[3].to_string(),
            transponder_id: fields[4].to_string(),
            network_id: fields[5].to_string(),
            namespace: fields[6].to_string(),
        })
    }

    /// The reference text without the `#SERVICE` prefix.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Markers and spacers carry no service and should be skipped.
    pub fn is_marker(&self) -> bool {
        self.flags & FLAG_MARKER != 0 || self.flags == FLAG_SPACER
    }

    /// Catalog service key, with namespace padded to 8 and ids to 4 digits.
    pub fn service_key(&self) -> String {
        service_key(
            &format!("{:0>8}", self.namespace),
            &format!("{:0>4}", self.service_id),
            &format!("{:0>4}", self.transponder_id),
        )
    }
}

/// A `#SERVICE` line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// 1-based line number in the bouquet text.
    pub line: usize,
    pub error: ReferenceError,
}

/// A bouquet file: its display name and entries in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bouquet {
    pub name: Option<String>,
    pub entries: Vec<ServiceReference>,
    /// Malformed `#SERVICE` lines, kept out of `entries`.
    pub skipped: Vec<SkippedEntry>,
}

impl Bouquet {
    /// Parse bouquet text. Lines other than `#NAME` and `#SERVICE` are
    /// ignored; a malformed `#SERVICE` line is recorded in `skipped` and
    /// the remaining lines are still read.
    pub fn parse(content: &str) -> Self {
        let mut bouquet = Bouquet::default();
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if let Some(name) = line.strip_prefix(NAME_PREFIX) {
                if bouquet.name.is_none() {
                    bouquet.name = Some(name.trim().to_string());
                }
            } else if line.starts_with(SERVICE_PREFIX) {
                match ServiceReference::parse(line) {
                    Ok(reference) => bouquet.entries.push(reference),
                    Err(error) => bouquet.skipped.push(SkippedEntry {
                        line: idx + 1,
                        error,
                    }),
                }
            }
        }
        bouquet
    }
}
