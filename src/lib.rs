pub mod error;
pub mod namespace_manager;
pub mod prefixes;
pub mod schema;
pub mod type_map;
pub mod xstypes;

pub use error::{LookupError, PrefixError, RegistryError, SchemaError, UnresolvedNamespace};
pub use namespace_manager::{NamespaceManager, PrefixResolver};
pub use prefixes::{NamespacePrefixes, NamespaceSink, SoapVersion};
pub use schema::{ComplexType, SchemaItem, SchemaTypes};
pub use type_map::{input_type, passes_by_reference, Classification, Entry, Table, TypeMap};
pub use xstypes::QName;
