//! Command handlers for info, export, lookup, frequency and resolve.

use std::path::{Path, PathBuf};

use lamedb::{Bouquet, Catalog, ExportRow, ParseError, Service, Transponder};
use log::{debug, error, info, warn};
use serde::Serialize;

use crate::config::ConfigFile;
use crate::context::OutputFormat;

/// Path used when neither the command line nor the config names a lamedb.
const DEFAULT_LAMEDB: &str = "lamedb";

fn catalog_path(arg: Option<PathBuf>, config: &ConfigFile) -> PathBuf {
    arg.or_else(|| config.catalog.path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LAMEDB))
}

fn open_catalog(path: &Path) -> Result<Catalog, ParseError> {
    info!("Using lamedb: {}", path.display());
    Catalog::open(path)
}

/// Load the catalog, logging the failure. `None` means exit with 1.
fn load_or_report(arg: Option<PathBuf>, config: &ConfigFile) -> Option<Catalog> {
    let path = catalog_path(arg, config);
    match open_catalog(&path) {
        Ok(catalog) => Some(catalog),
        Err(e) => {
            error!("Failed to load {}: {}", path.display(), e);
            None
        }
    }
}

/// Info command implementation.
pub(crate) fn cmd_info(lamedb: Option<PathBuf>, config: &ConfigFile) -> i32 {
    let Some(catalog) = load_or_report(lamedb, config) else {
        return 1;
    };

    let unresolved = catalog
        .services()
        .filter(|s| catalog.transponder_for(s).is_none())
        .count();

    println!("Format version: {}", catalog.version());
    println!("Transponders:   {}", catalog.transponder_count());
    println!("Services:       {}", catalog.service_count());
    println!("Names:          {}", catalog.name_index().len());
    println!("Unresolved:     {}", unresolved);
    0
}

/// Export command implementation.
pub(crate) fn cmd_export(
    lamedb: Option<PathBuf>,
    format: Option<OutputFormat>,
    config: &ConfigFile,
) -> i32 {
    let Some(catalog) = load_or_report(lamedb, config) else {
        return 1;
    };
    let rows = catalog.export_rows();

    match format.or(config.output.format).unwrap_or_default() {
        OutputFormat::Table => print_rows_table(&rows),
        OutputFormat::Json => return print_json(&rows),
        OutputFormat::Csv => print_rows_csv(&rows),
    }
    0
}

/// Lookup command implementation.
pub(crate) fn cmd_lookup(
    lamedb: Option<PathBuf>,
    name: String,
    package: String,
    config: &ConfigFile,
) -> i32 {
    let Some(catalog) = load_or_report(lamedb, config) else {
        return 1;
    };

    match catalog.get_key_by_package_service_name(&package, &name) {
        Some(key) => {
            println!("{}", key);
            0
        }
        None => {
            warn!("Channel '{}/{}' not found", package, name);
            let similar = catalog.get_similar(&name);
            if !similar.is_empty() {
                println!("Similar names:");
                for candidate in similar {
                    println!("  {}", candidate);
                }
            }
            1
        }
    }
}

/// Frequency command implementation.
pub(crate) fn cmd_frequency(lamedb: Option<PathBuf>, signature: String, config: &ConfigFile) -> i32 {
    let Some(catalog) = load_or_report(lamedb, config) else {
        return 1;
    };

    match catalog.get_key_by_frequency(&signature) {
        Some(key) => {
            println!("{}", key);
            0
        }
        None => {
            warn!("No service on transponder '{}'", signature);
            1
        }
    }
}

/// One resolved bouquet entry.
#[derive(Debug, Serialize)]
struct ResolvedEntry<'a> {
    reference: &'a str,
    key: String,
    name: &'a str,
    package_name: &'a str,
    signature: Option<String>,
}

/// Resolve command implementation.
pub(crate) fn cmd_resolve(
    lamedb: Option<PathBuf>,
    bouquet_path: PathBuf,
    sd_tv_only: bool,
    format: Option<OutputFormat>,
    config: &ConfigFile,
) -> i32 {
    let Some(catalog) = load_or_report(lamedb, config) else {
        return 1;
    };

    let bouquet = match std::fs::read_to_string(&bouquet_path) {
        Ok(text) => Bouquet::parse(&text),
        Err(e) => {
            error!("Failed to read bouquet {}: {}", bouquet_path.display(), e);
            return 1;
        }
    };
    info!(
        "Processing bouquet {} ({} entries)",
        bouquet.name.as_deref().unwrap_or("<unnamed>"),
        bouquet.entries.len()
    );
    for skipped in &bouquet.skipped {
        warn!("Skipping bouquet line {}: {}", skipped.line, skipped.error);
    }

    let mut resolved = Vec::new();
    let mut missing = 0usize;
    for reference in &bouquet.entries {
        if reference.is_marker() {
            debug!("Skipping marker {}", reference.as_str());
            continue;
        }
        let key = reference.service_key();
        let Some((service, transponder)) = catalog.resolve_reference(reference) else {
            warn!("Channel '{}' not found", key);
            missing += 1;
            continue;
        };
        if sd_tv_only && !is_sd_tv(service, transponder) {
            debug!("Skipping {} ({})", key, service.service_type.name());
            continue;
        }
        resolved.push(ResolvedEntry {
            reference: reference.as_str(),
            key,
            name: &service.name,
            package_name: &service.package_name,
            signature: transponder.and_then(Transponder::signature),
        });
    }

    match format.or(config.output.format).unwrap_or_default() {
        OutputFormat::Table => print_resolved_table(&resolved),
        OutputFormat::Json => {
            if print_json(&resolved) != 0 {
                return 1;
            }
        }
        OutputFormat::Csv => print_resolved_csv(&resolved),
    }

    if missing > 0 {
        warn!("{} bouquet entries could not be resolved", missing);
    }
    0
}

/// Standard-definition TV on a first-generation carrier. Services whose
/// transponder is not in the catalog pass on service type alone.
fn is_sd_tv(service: &Service, transponder: Option<&Transponder>) -> bool {
    service.service_type.is_tv() && transponder.map_or(true, Transponder::is_first_generation)
}

// Output formatting functions

fn print_json<T: Serialize + ?Sized>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            error!("Failed to serialize output: {}", e);
            1
        }
    }
}

fn truncate(s: &str, width: usize) -> String {
    s.chars().take(width).collect()
}

/// Quote a CSV field when it contains a separator, quote or newline.
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn print_rows_table(rows: &[ExportRow]) {
    if rows.is_empty() {
        println!("No services found.");
        return;
    }

    println!(
        "{:<20} {:<6} {:<16} {:<24} {:<4} {}",
        "Key", "ONID", "Package", "Name", "Type", "Transponder"
    );
    println!("{}", "-".repeat(96));

    for row in rows {
        println!(
            "{:<20} {:<6} {:<16} {:<24} {:<4} {}",
            row.key,
            row.network_id,
            truncate(&row.package_name, 16),
            truncate(&row.name, 24),
            row.service_type,
            row.signature.as_deref().unwrap_or("-")
        );
    }

    println!("\nTotal: {} services", rows.len());
}

fn print_rows_csv(rows: &[ExportRow]) {
    println!("key,network_id,package,name,service_id,service_type,signature");
    for row in rows {
        println!(
            "{},{},{},{},{},{},{}",
            row.key,
            row.network_id,
            csv_field(&row.package_name),
            csv_field(&row.name),
            row.service_id,
            row.service_type,
            row.signature.as_deref().map(csv_field).unwrap_or_default()
        );
    }
}

fn print_resolved_table(entries: &[ResolvedEntry<'_>]) {
    if entries.is_empty() {
        println!("No services resolved.");
        return;
    }

    println!(
        "{:<20} {:<24} {:<16} {}",
        "Key", "Name", "Package", "Transponder"
    );
    println!("{}", "-".repeat(84));

    for entry in entries {
        println!(
            "{:<20} {:<24} {:<16} {}",
            entry.key,
            truncate(entry.name, 24),
            truncate(entry.package_name, 16),
            entry.signature.as_deref().unwrap_or("-")
        );
    }

    println!("\nTotal: {} services", entries.len());
}

fn print_resolved_csv(entries: &[ResolvedEntry<'_>]) {
    println!("reference,key,name,package,signature");
    for entry in entries {
        println!(
            "{},{},{},{},{}",
            csv_field(entry.reference),
            entry.key,
            csv_field(entry.name),
            csv_field(entry.package_name),
            entry.signature.as_deref().map(csv_field).unwrap_or_default()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lamedb::{DeliverySystem, ServiceType};

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("Das Erste"), "Das Erste");
        assert_eq!(csv_field("192,11778000,V,3/4"), "\"192,11778000,V,3/4\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_catalog_path_precedence() {
        let mut config = ConfigFile::default();
        assert_eq!(catalog_path(None, &config), PathBuf::from("lamedb"));

        config.catalog.path = Some(PathBuf::from("/etc/enigma2/lamedb"));
        assert_eq!(
            catalog_path(None, &config),
            PathBuf::from("/etc/enigma2/lamedb")
        );
        assert_eq!(
            catalog_path(Some(PathBuf::from("local")), &config),
            PathBuf::from("local")
        );
    }

    #[test]
    fn test_sd_tv_filter() {
        let tv = Service {
            service_id: "283D".to_string(),
            namespace: "00C00000".to_string(),
            transponder_id: "03FB".to_string(),
            network_id: "0001".to_string(),
            service_type: ServiceType::Tv,
            discriminator: "0".to_string(),
            name: "Channel1".to_string(),
            package_name: "ProviderA".to_string(),
        };
        let hdtv = Service {
            service_type: ServiceType::Hdtv,
            ..tv.clone()
        };
        let carrier = |system: Option<DeliverySystem>| Transponder {
            namespace: "00C00000".to_string(),
            transponder_id: "03FB".to_string(),
            network_id: "0001".to_string(),
            frequency: 10744000,
            symbol_rate: 22000000,
            polarization_code: 0,
            fec_code: 4,
            orbital_position: 192,
            inversion: 2,
            flags: 0,
            delivery_system: system,
            modulation: None,
            rolloff: None,
            pilot: None,
        };

        assert!(is_sd_tv(&tv, None));
        assert!(is_sd_tv(&tv, Some(&carrier(None))));
        assert!(is_sd_tv(&tv, Some(&carrier(Some(DeliverySystem::DvbS)))));
        assert!(!is_sd_tv(&tv, Some(&carrier(Some(DeliverySystem::DvbS2)))));
        assert!(!is_sd_tv(&tv, Some(&carrier(Some(DeliverySystem::Other(3))))));
        assert!(!is_sd_tv(&hdtv, Some(&carrier(None))));
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("Ö1 Österreich", 4), "Ö1 Ö");
    }
}
