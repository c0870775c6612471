use thiserror::Error;

use crate::xstypes::QName;

/// A lookup found no entry. Callers usually log it and carry on with an empty representation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("unknown type {0}")]
    UnknownType(QName),
}

/// Fatal problems during bulk registration. These point at the driver setting things up in the
/// wrong order, not at bad schema data.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("no namespace prefix resolver is configured")]
    MissingPrefixResolver,
    #[error("the prefix resolver has no prefix for namespace {0:?}")]
    NoPrefixForNamespace(String),
}

/// No prefix is bound for a namespace. `degraded` is the `:localName` string a writer can still
/// emit.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("namespace not found: {namespace} (for localName {local_name})")]
pub struct UnresolvedNamespace {
    pub namespace: String,
    pub local_name: String,
    pub degraded: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PrefixError {
    #[error("namespace {namespace:?} is already bound to prefix {bound:?}, refusing {requested:?}")]
    Rebind {
        namespace: String,
        bound: String,
        requested: String,
    },
    #[error("prefix {prefix:?} is already declared for namespace {namespace:?}")]
    PrefixInUse { prefix: String, namespace: String },
    #[error("empty prefix for namespace {0:?}")]
    EmptyPrefix(String),
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("top-level <{0}> without a name attribute")]
    MissingName(String),
    #[error("the document failed to parse")]
    Xml(#[from] roxmltree::Error),
}
