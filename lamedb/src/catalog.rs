//! The loaded lamedb catalog and its lookup API.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, trace};
use serde::Serialize;

use crate::error::{ParseError, Result};
use crate::header::parse_version;
use crate::line_source::LineSource;
use crate::name_index::NameIndex;
use crate::reference::ServiceReference;
use crate::service::Service;
use crate::soundex::soundex;
use crate::transponder::Transponder;
use crate::version::FormatVersion;

const SECTION_END: &str = "end";
const TRANSPONDER_TERMINATOR: &str = "/";

/// Sections of a lamedb file, in load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Transponders,
    Services,
}

impl Section {
    fn sentinel(self) -> &'static str {
        match self {
            Section::Transponders => "transponders",
            Section::Services => "services",
        }
    }
}

/// One row of the tabular service export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub key: String,
    pub network_id: String,
    pub package_name: String,
    pub name: String,
    pub service_id: String,
    pub service_type: u16,
    /// Signature of the resolved transponder, if it is in the catalog.
    pub signature: Option<String>,
}

/// Transponders and services loaded from a lamedb stream.
///
/// Read-only once loaded; `&Catalog` can be shared across threads.
#[derive(Debug, Clone)]
pub struct Catalog {
    version: FormatVersion,
    transponders: BTreeMap<String, Transponder>,
    services: HashMap<String, Service>,
    /// Retained service keys in load order.
    service_order: Vec<String>,
    names: NameIndex,
}

impl Catalog {
    fn empty(version: FormatVersion) -> Self {
        Self {
            version,
            transponders: BTreeMap::new(),
            services: HashMap::new(),
            service_order: Vec::new(),
            names: NameIndex::default(),
        }
    }

    /// Open and load a lamedb file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading lamedb from {}", path.display());
        let file = File::open(path)?;
        Self::load(BufReader::new(file))
    }

    /// Load a catalog from a lamedb stream.
    ///
    /// Reads the header, selects the grammar for its version, then reads
    /// the transponders section followed by the services section.
    pub fn load<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = LineSource::new(reader);

        let header = lines.next_line()?.ok_or(ParseError::EmptyInput)?;
        let header = header.trim();
        let number =
            parse_version(header).ok_or_else(|| ParseError::HeaderMismatch(header.to_string()))?;
        let version =
            FormatVersion::from_number(number).ok_or(ParseError::UnsupportedVersion(number))?;
        debug!("lamedb format version {}", version);

        let mut catalog = Self::empty(version);
        catalog.load_transponders(&mut lines)?;
        catalog.load_services(&mut lines)?;

        debug!(
            "Loaded {} transponders, {} services, {} names",
            catalog.transponders.len(),
            catalog.services.len(),
            catalog.names.len()
        );
        Ok(catalog)
    }

    fn load_transponders<R: BufRead>(&mut self, lines: &mut LineSource<R>) -> Result<()> {
        let section = Section::Transponders;
        seek_section(lines, section)?;
        let parse = self.version.grammar().transponder;

        loop {
            let identity = required_line(lines, section)?;
            let identity = identity.trim();
            if identity == SECTION_END {
                break;
            }
            let line = lines.line_number();
            let descriptor = required_line(lines, section)?;
            let terminator = required_line(lines, section)?;
            if terminator.trim() != TRANSPONDER_TERMINATOR {
                return Err(ParseError::TransponderTerminatorMissing {
                    line: lines.line_number(),
                    found: terminator.trim().to_string(),
                });
            }

            let transponder = parse(identity, descriptor.trim(), line)?;
            let key = transponder.key();
            trace!("transponder {}", key);
            if self.transponders.insert(key.clone(), transponder).is_some() {
                debug!("Transponder {} redefined at line {}, keeping the later one", key, line);
            }
        }
        Ok(())
    }

    fn load_services<R: BufRead>(&mut self, lines: &mut LineSource<R>) -> Result<()> {
        let section = Section::Services;
        seek_section(lines, section)?;
        let parse = self.version.grammar().service;

        loop {
            let ids = required_line(lines, section)?;
            let ids = ids.trim();
            if ids == SECTION_END {
                break;
            }
            let line = lines.line_number();
            let name = required_line(lines, section)?;
            let tags = required_line(lines, section)?;

            let service = parse(ids, name, tags.trim(), line)?;
            let key = service.key();
            trace!("service {} {:?}", key, service.name);

            // Indexed per parsed record, including duplicates that are dropped below.
            self.names
                .insert(&service.name, &service.package_name, key.clone());

            if self.services.contains_key(&key) {
                debug!("Service {} redefined at line {}, keeping the first one", key, line);
            } else {
                self.service_order.push(key.clone());
                self.services.insert(key, service);
            }
        }
        Ok(())
    }

    pub fn version(&self) -> FormatVersion {
        self.version
    }

    /// Look up a service by its `NAMESPACE#SID#TSID` key.
    pub fn get_service(&self, key: &str) -> Option<&Service> {
        self.services.get(key)
    }

    /// Look up a transponder by its `NAMESPACE:TSID:ONID` key.
    pub fn get_transponder(&self, key: &str) -> Option<&Transponder> {
        self.transponders.get(key)
    }

    /// The transponder a service is carried on, if it was loaded.
    pub fn transponder_for(&self, service: &Service) -> Option<&Transponder> {
        self.transponders.get(&service.transponder_key())
    }

    /// Resolve a service key by provider and display name.
    ///
    /// See [`NameIndex::resolve`] for the provider selection rules.
    pub fn get_key_by_package_service_name(&self, package: &str, name: &str) -> Option<&str> {
        self.names.resolve(package, name)
    }

    /// Indexed names that sound like `name`, as `PACKAGE/NAME` strings.
    ///
    /// Meant for diagnostics when an exact name lookup fails.
    pub fn get_similar(&self, name: &str) -> Vec<String> {
        let Some(code) = soundex(name) else {
            return Vec::new();
        };
        self.names
            .iter()
            .filter(|(candidate, _)| soundex(candidate).as_deref() == Some(code.as_str()))
            .flat_map(|(candidate, providers)| {
                providers
                    .iter()
                    .map(move |p| format!("{}/{}", p.package(), candidate))
            })
            .collect()
    }

    /// First service (in load order) whose transponder signature matches
    /// `signature` case-insensitively. Transponders without a decodable
    /// signature never match.
    pub fn get_key_by_frequency(&self, signature: &str) -> Option<&str> {
        self.service_order
            .iter()
            .find(|key| {
                self.services
                    .get(key.as_str())
                    .and_then(|service| self.transponder_for(service))
                    .and_then(Transponder::signature)
                    .map_or(false, |sig| sig.eq_ignore_ascii_case(signature))
            })
            .map(String::as_str)
    }

    /// Resolve a bouquet entry to its service and, when loaded, transponder.
    pub fn resolve_reference(
        &self,
        reference: &ServiceReference,
    ) -> Option<(&Service, Option<&Transponder>)> {
        let service = self.get_service(&reference.service_key())?;
        Some((service, self.transponder_for(service)))
    }

    /// Retained services in load order.
    pub fn services(&self) -> impl Iterator<Item = &Service> {
        self.service_order
            .iter()
            .filter_map(move |key| self.services.get(key))
    }

    /// Transponders ordered by key.
    pub fn transponders(&self) -> impl Iterator<Item = &Transponder> {
        self.transponders.values()
    }

    pub fn service_count(&self) -> usize {
        self.services.len()
    }

    pub fn transponder_count(&self) -> usize {
        self.transponders.len()
    }

    pub fn name_index(&self) -> &NameIndex {
        &self.names
    }

    /// One export row per retained service, in load order.
    pub fn export_rows(&self) -> Vec<ExportRow> {
        self.services()
            .map(|service| ExportRow {
                key: service.key(),
                network_id: service.network_id.clone(),
                package_name: service.package_name.clone(),
                name: service.name.clone(),
                service_id: service.service_id.clone(),
                service_type: service.service_type.code(),
                signature: self.transponder_for(service).and_then(Transponder::signature),
            })
            .collect()
    }
}

/// Skip lines until one equals the section sentinel.
fn seek_section<R: BufRead>(lines: &mut LineSource<R>, section: Section) -> Result<()> {
    while let Some(line) = lines.next_line()? {
        if line.trim() == section.sentinel() {
            debug!("Section '{}' at line {}", section.sentinel(), lines.line_number());
            return Ok(());
        }
    }
    Err(ParseError::MissingSection(section.sentinel()))
}

fn required_line<R: BufRead>(lines: &mut LineSource<R>, section: Section) -> Result<String> {
    lines
        .next_line()?
        .ok_or(ParseError::UnexpectedEndOfInput {
            section: section.sentinel(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Fec, Polarization, ServiceType};

    const DEMO: &str = "eDVB services /4/\n\
                        transponders\n\
                        1:2:3\n\
                        \ts12000:27500:0:0:192:0:0\n\
                        /\n\
                        end\n\
                        services\n\
                        A:1:2:3:1:0\n\
                        Demo\n\
                        p:DemoProv\n\
                        end\n";

    fn load(text: &str) -> Result<Catalog> {
        Catalog::load(text.as_bytes())
    }

    #[test]
    fn test_demo_catalog() {
        let catalog = load(DEMO).unwrap();
        assert_eq!(catalog.version(), FormatVersion::V4);
        assert_eq!(catalog.transponder_count(), 1);
        assert_eq!(catalog.service_count(), 1);

        let t = catalog.get_transponder("1:2:3").unwrap();
        assert_eq!(t.frequency, 12000);
        assert_eq!(t.polarization(), Some(Polarization::Horizontal));
        assert_eq!(t.fec(), Some(Fec::Auto));

        let s = catalog.get_service("1#A#2").unwrap();
        assert_eq!(s.package_name, "DemoProv");
        assert_eq!(s.service_type, ServiceType::Tv);
        assert_eq!(catalog.transponder_for(s), Some(t));

        let providers = catalog.name_index().providers("DEMO").unwrap();
        assert_eq!(providers.len(), 1);
        assert_eq!(providers[0].package(), "DEMOPROV");
        assert_eq!(providers[0].keys(), ["1#A#2"]);
    }

    #[test]
    fn test_keys_are_deterministic() {
        let a = load(DEMO).unwrap();
        let b = load(DEMO).unwrap();
        let keys_a: Vec<_> = a.services().map(Service::key).collect();
        let keys_b: Vec<_> = b.services().map(Service::key).collect();
        assert_eq!(keys_a, keys_b);
        assert!(keys_a.iter().all(|k| *k == k.to_uppercase()));
    }

    #[test]
    fn test_lines_before_sentinels_ignored() {
        let text = "eDVB services /4/\n\
                    garbage\n\
                    transponders\n\
                    end\n\
                    more garbage\n\
                    services\n\
                    end\n";
        let catalog = load(text).unwrap();
        assert_eq!(catalog.transponder_count(), 0);
        assert_eq!(catalog.service_count(), 0);
    }

    #[test]
    fn test_header_errors() {
        assert!(matches!(load(""), Err(ParseError::EmptyInput)));
        assert!(matches!(
            load("not a lamedb\ntransponders\nend\n"),
            Err(ParseError::HeaderMismatch(_))
        ));
        assert!(matches!(
            load("eDVB services /9/\ntransponders\nend\nservices\nend\n"),
            Err(ParseError::UnsupportedVersion(9))
        ));
    }

    #[test]
    fn test_terminator_missing() {
        let text = "eDVB services /4/\n\
                    transponders\n\
                    1:2:3\n\
                    s12000:27500:0:0:192:0:0\n\
                    end\n";
        assert!(matches!(
            load(text),
            Err(ParseError::TransponderTerminatorMissing { line: 5, .. })
        ));
    }

    #[test]
    fn test_too_many_fields_aborts_load() {
        let text = "eDVB services /4/\n\
                    transponders\n\
                    1:2:3\n\
                    s1:2:0:0:5:6:7:8:9:10:11:12\n\
                    /\n\
                    end\n";
        assert!(matches!(
            load(text),
            Err(ParseError::TooManyTransponderFields { count: 12, .. })
        ));
    }

    #[test]
    fn test_truncated_input() {
        assert!(matches!(
            load("eDVB services /4/\n"),
            Err(ParseError::MissingSection("transponders"))
        ));
        assert!(matches!(
            load("eDVB services /4/\ntransponders\nend\n"),
            Err(ParseError::MissingSection("services"))
        ));
        assert!(matches!(
            load("eDVB services /4/\ntransponders\n1:2:3\n"),
            Err(ParseError::UnexpectedEndOfInput { section: "transponders" })
        ));
        assert!(matches!(
            load("eDVB services /4/\ntransponders\nend\nservices\nA:1:2:3:1:0\nDemo\n"),
            Err(ParseError::UnexpectedEndOfInput { section: "services" })
        ));
    }

    #[test]
    fn test_undecoded_fec_still_loads() {
        let text = "eDVB services /4/\n\
                    transponders\n\
                    00c00000:0437:0001\n\
                    \ts 11778000:27500000:1:15:192:2:0\n\
                    /\n\
                    end\n\
                    services\n\
                    6d66:00c00000:0437:0001:1:0\n\
                    Das Erste HD\n\
                    p:ARD\n\
                    end\n";
        let catalog = load(text).unwrap();
        assert_eq!(catalog.transponder_count(), 1);
        assert_eq!(catalog.service_count(), 1);

        let t = catalog.get_transponder("00C00000:0437:0001").unwrap();
        assert_eq!(t.fec_code, 15);
        assert_eq!(t.fec(), None);
        assert_eq!(catalog.get_key_by_frequency("192,11778000,V,Auto"), None);

        let rows = catalog.export_rows();
        assert_eq!(rows[0].key, "00C00000#6D66#0437");
        assert_eq!(rows[0].signature, None);
    }

    #[test]
    fn test_get_similar() {
        let catalog = load(DEMO).unwrap();
        assert_eq!(catalog.get_similar("demmo"), vec!["DEMOPROV/DEMO".to_string()]);
        assert!(catalog.get_similar("Zulu").is_empty());
        assert!(catalog.get_similar("").is_empty());
    }

    #[test]
    fn test_get_key_by_frequency() {
        let catalog = load(DEMO).unwrap();
        assert_eq!(catalog.get_key_by_frequency("192,12000,h,auto"), Some("1#A#2"));
        assert_eq!(catalog.get_key_by_frequency("192,12000,V,auto"), None);
    }

    #[test]
    fn test_export_rows() {
        let rows = load(DEMO).unwrap().export_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].key, "1#A#2");
        assert_eq!(rows[0].package_name, "DemoProv");
        assert_eq!(rows[0].service_type, 1);
        assert_eq!(rows[0].signature.as_deref(), Some("192,12000,H,Auto"));
    }

    #[test]
    fn test_catalog_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Catalog>();
    }
}
