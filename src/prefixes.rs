//! Namespace prefixes of one outgoing document.
//!
//! A [`NamespacePrefixes`] is created per document write. Namespaces are declared once, usually on
//! the root element, and every qualified name written afterwards is rendered through
//! [`NamespacePrefixes::resolve`].

use std::collections::BTreeMap;

use quick_xml::events::BytesStart;

use crate::error::{PrefixError, UnresolvedNamespace};
use crate::xstypes::{
    SOAP12_ENCODING_NAMESPACE, SOAP12_ENVELOPE_NAMESPACE, SOAP_ENCODING_NAMESPACE,
    SOAP_ENVELOPE_NAMESPACE, XSI_1999_NAMESPACE, XSI_NAMESPACE, XS_1999_NAMESPACE, XS_NAMESPACE,
};

/// Receives the `xmlns:prefix="namespace"` declarations.
pub trait NamespaceSink {
    fn declare_namespace(&mut self, namespace: &str, prefix: &str);
}

impl NamespaceSink for BytesStart<'_> {
    fn declare_namespace(&mut self, namespace: &str, prefix: &str) {
        let key = format!("xmlns:{prefix}");
        self.push_attribute((key.as_str(), namespace));
    }
}

/// Collects `(namespace, prefix)` pairs instead of writing them.
impl NamespaceSink for Vec<(String, String)> {
    fn declare_namespace(&mut self, namespace: &str, prefix: &str) {
        self.push((namespace.to_string(), prefix.to_string()));
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SoapVersion {
    #[default]
    Soap11,
    Soap12,
}

impl SoapVersion {
    pub fn envelope_namespace(self) -> &'static str {
        match self {
            Self::Soap11 => SOAP_ENVELOPE_NAMESPACE,
            Self::Soap12 => SOAP12_ENVELOPE_NAMESPACE,
        }
    }

    pub fn encoding_namespace(self) -> &'static str {
        match self {
            Self::Soap11 => SOAP_ENCODING_NAMESPACE,
            Self::Soap12 => SOAP12_ENCODING_NAMESPACE,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct NamespacePrefixes {
    prefixes: BTreeMap<String, String>,
    // Only declared namespaces; aliases share a prefix and are left out.
    declared: BTreeMap<String, String>,
}

impl NamespacePrefixes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `prefix` to `namespace` for the rest of the document and declares it on `sink`.
    ///
    /// Binding the same pair twice is a no-op and declares nothing the second time. A namespace
    /// never changes its prefix, and a declared prefix never moves to another namespace.
    pub fn write_namespace(
        &mut self,
        sink: &mut impl NamespaceSink,
        namespace: &str,
        prefix: &str,
    ) -> Result<(), PrefixError> {
        if prefix.is_empty() {
            return Err(PrefixError::EmptyPrefix(namespace.to_string()));
        }
        if let Some(bound) = self.prefixes.get(namespace) {
            if bound == prefix {
                return Ok(());
            }
            return Err(PrefixError::Rebind {
                namespace: namespace.to_string(),
                bound: bound.clone(),
                requested: prefix.to_string(),
            });
        }
        if let Some(other) = self.declared.get(prefix) {
            return Err(PrefixError::PrefixInUse {
                prefix: prefix.to_string(),
                namespace: other.clone(),
            });
        }

        self.prefixes.insert(namespace.to_string(), prefix.to_string());
        self.declared.insert(prefix.to_string(), namespace.to_string());
        sink.declare_namespace(namespace, prefix);
        Ok(())
    }

    /// Lets `namespace` be written with an already declared `prefix`, without declaring it.
    ///
    /// Used for namespace variants a peer treats as equivalent, like the 1999 schema drafts.
    pub fn insert_alias(&mut self, namespace: &str, prefix: &str) -> Result<(), PrefixError> {
        match self.prefixes.get(namespace) {
            Some(bound) if bound == prefix => Ok(()),
            Some(bound) => Err(PrefixError::Rebind {
                namespace: namespace.to_string(),
                bound: bound.clone(),
                requested: prefix.to_string(),
            }),
            None => {
                self.prefixes.insert(namespace.to_string(), prefix.to_string());
                Ok(())
            }
        }
    }

    /// Declares the schema, schema-instance and SOAP namespaces with their usual prefixes.
    pub fn write_standard_namespaces(
        &mut self,
        sink: &mut impl NamespaceSink,
        version: SoapVersion,
    ) -> Result<(), PrefixError> {
        self.write_namespace(sink, version.envelope_namespace(), "soap")?;
        self.write_namespace(sink, version.encoding_namespace(), "soap-enc")?;
        self.write_namespace(sink, XS_NAMESPACE, "xsd")?;
        self.write_namespace(sink, XSI_NAMESPACE, "xsi")?;

        self.insert_alias(XS_1999_NAMESPACE, "xsd")?;
        self.insert_alias(XSI_1999_NAMESPACE, "xsi")?;
        Ok(())
    }

    pub fn prefix(&self, namespace: &str) -> Option<&str> {
        self.prefixes.get(namespace).map(String::as_str)
    }

    pub fn contains(&self, namespace: &str) -> bool {
        self.prefixes.contains_key(namespace)
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// `(namespace, prefix)` pairs, aliases included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(n, p)| (n.as_str(), p.as_str()))
    }

    /// Renders `prefix:localName`.
    pub fn resolve(
        &self,
        namespace: &str,
        local_name: &str,
    ) -> Result<String, UnresolvedNamespace> {
        match self.prefix(namespace) {
            Some(prefix) => Ok(format!("{prefix}:{local_name}")),
            None => Err(UnresolvedNamespace {
                namespace: namespace.to_string(),
                local_name: local_name.to_string(),
                degraded: format!(":{local_name}"),
            }),
        }
    }

    /// Like [`resolve`](Self::resolve), but logs an unbound namespace and returns `:localName`.
    pub fn resolve_or_degraded(&self, namespace: &str, local_name: &str) -> String {
        self.resolve(namespace, local_name).unwrap_or_else(|e| {
            log::warn!("{e}");
            e.degraded
        })
    }
}
