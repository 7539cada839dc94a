//! Service records.

use serde::Serialize;

use crate::error::{ParseError, Result};
use crate::transponder::transponder_key;
use crate::types::ServiceType;

/// Package name used when a record has no provider tag.
pub const NO_PACKAGE: &str = "no-package";
/// Package name used when the provider tag is present but empty.
pub const NO_PROVIDER: &str = "no-provider";

/// Minimum number of fields on the first line of a service record.
const SERVICE_ID_FIELDS: usize = 6;

/// A channel carried on a transponder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Service {
    /// Service ID (hex).
    pub service_id: String,
    /// DVB namespace (hex).
    pub namespace: String,
    /// Transport stream ID (hex).
    pub transponder_id: String,
    /// Original network ID (hex).
    pub network_id: String,
    pub service_type: ServiceType,
    /// Opaque sixth id field; carries cache/alternate service hints.
    pub discriminator: String,
    /// Display name as authored.
    pub name: String,
    /// Provider name from the `p:` tag.
    pub package_name: String,
}

impl Service {
    /// Catalog key: `NAMESPACE#SID#TSID`, upper-cased.
    pub fn key(&self) -> String {
        service_key(&self.namespace, &self.service_id, &self.transponder_id)
    }

    /// Key of the transponder this service is carried on.
    pub fn transponder_key(&self) -> String {
        transponder_key(&self.namespace, &self.transponder_id, &self.network_id)
    }
}

pub(crate) fn service_key(namespace: &str, service_id: &str, transponder_id: &str) -> String {
    format!("{}#{}#{}", namespace, service_id, transponder_id).to_uppercase()
}

/// Parse a version 4 service record from its three lines. `line` is the
/// line number of the id line.
pub(crate) fn parse_v4(ids: &str, name: String, tags: &str, line: usize) -> Result<Service> {
    let fields: Vec<&str> = ids.split(':').collect();
    if fields.len() < SERVICE_ID_FIELDS {
        return Err(ParseError::MalformedServiceRecord {
            line,
            reason: format!(
                "expected {} fields, got {}: {:?}",
                SERVICE_ID_FIELDS,
                fields.len(),
                ids
            ),
        });
    }

    let service_type = fields[4]
        .trim()
        .parse::<u16>()
        .map(ServiceType::from_code)
        .map_err(|_| ParseError::MalformedServiceRecord {
            line,
            reason: format!("invalid service type {:?}", fields[4]),
        })?;

    Ok(Service {
        service_id: fields[0].to_string(),
        namespace: fields[1].to_string(),
        transponder_id: fields[2].to_string(),
        network_id: fields[3].to_string(),
        service_type,
        discriminator: fields[5].to_string(),
        name,
        package_name: package_name(tags),
    })
}

/// Extract the provider from a comma-separated tag line.
///
/// The last `p:` tag wins. Other tags (cache ids, flags) are not modelled.
fn package_name(tags: &str) -> String {
    let mut package = None;
    for tag in tags.split(',') {
        if let Some(provider) = tag.strip_prefix("p:") {
            let provider = provider.trim();
            package = Some(if provider.is_empty() {
                NO_PROVIDER.to_string()
            } else {
                provider.to_string()
            });
        }
    }
    package.unwrap_or_else(|| NO_PACKAGE.to_string())
}
