//! Secondary index from display name to provider to service keys.

use std::collections::BTreeMap;

/// Service keys listed under one provider for a given name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEntry {
    package: String,
    keys: Vec<String>,
}

impl ProviderEntry {
    /// Upper-cased package name.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Service keys in insertion order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}

/// Non-unique index: `NAME -> PACKAGE -> [service keys]`.
///
/// Names and packages are stored upper-cased. Providers keep the order in
/// which they were first seen for a name.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    names: BTreeMap<String, Vec<ProviderEntry>>,
}

impl NameIndex {
    pub fn insert(&mut self, name: &str, package: &str, key: String) {
        let package = package.to_uppercase();
        let providers = self.names.entry(name.to_uppercase()).or_default();
        match providers.iter_mut().find(|p| p.package == package) {
            Some(entry) => entry.keys.push(key),
            None => providers.push(ProviderEntry {
                package,
                keys: vec![key],
            }),
        }
    }

    /// Providers indexing `name` (case-insensitive), in first-seen order.
    pub fn providers(&self, name: &str) -> Option<&[ProviderEntry]> {
        self.names.get(&name.to_uppercase()).map(Vec::as_slice)
    }

    /// Resolve a name to a single service key.
    ///
    /// A lone provider wins regardless of `package`. With several providers
    /// an exact package match is preferred, else the first provider seen.
    /// The first key of the chosen provider is returned.
    pub fn resolve(&self, package: &str, name: &str) -> Option<&str> {
        let providers = self.providers(name)?;
        let chosen = if providers.len() == 1 {
            &providers[0]
        } else {
            let package = package.to_uppercase();
            providers
                .iter()
                .find(|p| p.package == package)
                .or_else(|| providers.first())?
        };
        chosen.keys.first().map(String::as_str)
    }

    /// All indexed names with their providers, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ProviderEntry])> {
        self.names
            .iter()
            .map(|(name, providers)| (name.as_str(), providers.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
