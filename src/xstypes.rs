use std::fmt;

use lazy_static::lazy_static;

pub type NCName = String;
pub type AnyURI = String;

// Namespaces of the 2001 schema recommendation and their 1999 drafts, which older SOAP stacks
// still send.
pub const XS_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const XS_1999_NAMESPACE: &str = "http://www.w3.org/1999/XMLSchema";
pub const XSI_1999_NAMESPACE: &str = "http://www.w3.org/1999/XMLSchema-instance";

pub const SOAP_ENVELOPE_NAMESPACE: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const SOAP_ENCODING_NAMESPACE: &str = "http://schemas.xmlsoap.org/soap/encoding/";
pub const SOAP12_ENVELOPE_NAMESPACE: &str = "http://www.w3.org/2003/05/soap-envelope";
pub const SOAP12_ENCODING_NAMESPACE: &str = "http://www.w3.org/2003/05/soap-encoding";

pub const WSDL_NAMESPACE: &str = "http://schemas.xmlsoap.org/wsdl/";

lazy_static! {
    /// The `xs:string` qualified name
    pub static ref XS_STRING_NAME: QName = QName::with_namespace(XS_NAMESPACE, "string");
    /// The `xs:boolean` qualified name
    pub static ref XS_BOOLEAN_NAME: QName = QName::with_namespace(XS_NAMESPACE, "boolean");
    pub static ref XS_INT_NAME: QName = QName::with_namespace(XS_NAMESPACE, "int");
}

/// A namespace-qualified name. An empty namespace stands for "no namespace", which is what an
/// unqualified schema (one without `targetNamespace`) produces.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QName {
    pub namespace_name: AnyURI,
    pub local_name: NCName,
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace_name.is_empty() {
            write!(f, "{}", self.local_name)
        } else {
            write!(f, "{{{}}}:{}", self.namespace_name, self.local_name)
        }
    }
}

impl QName {
    pub fn with_namespace(
        namespace_name: impl Into<String>,
        local_name: impl Into<String>,
    ) -> Self {
        Self {
            namespace_name: namespace_name.into(),
            local_name: local_name.into(),
        }
    }

    pub fn unqualified(local_name: impl Into<String>) -> Self {
        Self::with_namespace(String::new(), local_name)
    }

    /// Shorthand for a name in the XML Schema namespace.
    pub fn xs(local_name: impl Into<String>) -> Self {
        Self::with_namespace(XS_NAMESPACE, local_name)
    }

    pub fn matches(&self, namespace_name: &str, local_name: &str) -> bool {
        self.local_name == local_name && self.namespace_name == namespace_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_namespace() {
        assert_eq!(XS_STRING_NAME.to_string(), format!("{{{XS_NAMESPACE}}}:string"));
        assert_eq!(QName::unqualified("foo").to_string(), "foo");
    }

    #[test]
    fn xs_shorthand() {
        assert_eq!(QName::xs("boolean"), *XS_BOOLEAN_NAME);
        assert!(XS_INT_NAME.matches(XS_NAMESPACE, "int"));
        assert!(!XS_INT_NAME.matches(XSI_NAMESPACE, "int"));
    }
}
