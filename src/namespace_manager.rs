use std::collections::BTreeMap;

use crate::xstypes::{
    SOAP12_ENCODING_NAMESPACE, SOAP12_ENVELOPE_NAMESPACE, SOAP_ENCODING_NAMESPACE,
    SOAP_ENVELOPE_NAMESPACE, WSDL_NAMESPACE, XSI_NAMESPACE, XS_NAMESPACE,
};

/// Hands out the prefix a namespace is known by in generated code.
pub trait PrefixResolver {
    fn prefix(&self, namespace: &str) -> Option<String>;
}

/// Bidirectional prefix <-> namespace map filled while reading the schema documents.
#[derive(Clone, Debug, Default)]
pub struct NamespaceManager {
    by_prefix: BTreeMap<String, String>,
    // Insertion order of namespaces, so that dumps and generated prefixes are deterministic.
    order: Vec<(String, String)>,
}

impl NamespaceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// A manager with the conventional prefixes of the schema, SOAP and WSDL namespaces bound.
    pub fn with_standard_prefixes() -> Self {
        let mut manager = Self::new();
        for (prefix, uri) in [
            ("xsd", XS_NAMESPACE),
            ("xsi", XSI_NAMESPACE),
            ("soap", SOAP_ENVELOPE_NAMESPACE),
            ("soap-enc", SOAP_ENCODING_NAMESPACE),
            ("soap12", SOAP12_ENVELOPE_NAMESPACE),
            ("soap12-enc", SOAP12_ENCODING_NAMESPACE),
            ("wsdl", WSDL_NAMESPACE),
        ] {
            manager.set_prefix(prefix, uri);
        }
        manager
    }

    /// Binds `prefix` to `uri`. A prefix that was bound before is moved to the new namespace.
    pub fn set_prefix(&mut self, prefix: impl Into<String>, uri: impl Into<String>) {
        let (prefix, uri) = (prefix.into(), uri.into());
        if let Some(previous) = self.by_prefix.insert(prefix.clone(), uri.clone()) {
            if previous != uri {
                log::warn!("prefix {prefix} moves from namespace {previous} to {uri}");
            }
            self.order.retain(|(p, u)| !(p == &prefix && u == &previous));
        }
        self.order.push((prefix, uri));
    }

    /// The prefix that was bound last for `uri`.
    pub fn prefix(&self, uri: &str) -> Option<&str> {
        self.order
            .iter()
            .rev()
            .find(|(_, u)| u == uri)
            .map(|(p, _)| p.as_str())
    }

    pub fn uri(&self, prefix: &str) -> Option<&str> {
        self.by_prefix.get(prefix).map(String::as_str)
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|(p, _)| p.as_str())
    }

    pub fn uris(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|(_, u)| u.as_str())
    }

    /// Returns the prefix of `uri`, generating `ns1`, `ns2`, ... for namespaces without one.
    pub fn assign_prefix(&mut self, uri: &str) -> String {
        if let Some(prefix) = self.prefix(uri) {
            return prefix.to_string();
        }
        let mut n = 1;
        let prefix = loop {
            let candidate = format!("ns{n}");
            if !self.by_prefix.contains_key(&candidate) {
                break candidate;
            }
            n += 1;
        };
        log::debug!("assigning prefix {prefix} to namespace {uri}");
        self.set_prefix(prefix.clone(), uri);
        prefix
    }
}

impl PrefixResolver for NamespaceManager {
    fn prefix(&self, namespace: &str) -> Option<String> {
        NamespaceManager::prefix(self, namespace).map(str::to_string)
    }
}
