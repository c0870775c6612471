//! Maps schema types, attributes and elements to their C++/Qt representation.
//!
//! The [`TypeMap`] starts out with the builtin XML Schema types and is then extended once per
//! schema with [`TypeMap::add_schema_types`]. After that it is only read.

mod builtins;
pub mod naming;

use std::fmt;
use std::sync::Arc;

use crate::error::{LookupError, RegistryError};
use crate::namespace_manager::PrefixResolver;
use crate::schema::SchemaTypes;
use crate::xstypes::QName;

/// Which of the three independent tables to search.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Table {
    Type,
    Attribute,
    Element,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub namespace: String,
    pub type_name: String,
    /// Scalar representation that is passed by value.
    pub is_basic: bool,
    pub is_builtin: bool,
    pub local_type: String,
    pub headers: Vec<String>,
    pub header_includes: Vec<String>,
    pub forward_declarations: Vec<String>,
}

impl Entry {
    fn matches(&self, name: &QName) -> bool {
        name.matches(&self.namespace, &self.type_name)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Classification {
    pub is_basic: bool,
    pub is_builtin: bool,
}

pub struct TypeMap {
    types: Vec<Entry>,
    attributes: Vec<Entry>,
    elements: Vec<Entry>,
    prefix_resolver: Option<Arc<dyn PrefixResolver + Send + Sync>>,
}

impl Default for TypeMap {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TypeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeMap")
            .field("types", &self.types)
            .field("attributes", &self.attributes)
            .field("elements", &self.elements)
            .field("prefix_resolver", &self.prefix_resolver.is_some())
            .finish()
    }
}

impl TypeMap {
    pub fn new() -> Self {
        Self {
            types: builtins::builtin_entries(),
            attributes: Vec::new(),
            elements: Vec::new(),
            prefix_resolver: None,
        }
    }

    pub fn set_prefix_resolver(&mut self, resolver: Arc<dyn PrefixResolver + Send + Sync>) {
        self.prefix_resolver = Some(resolver);
    }

    /// All entries of `table` in registration order.
    pub fn entries(&self, table: Table) -> &[Entry] {
        match table {
            Table::Type => &self.types,
            Table::Attribute => &self.attributes,
            Table::Element => &self.elements,
        }
    }

    /// The first entry registered under `name`. Builtins are registered first and therefore can't
    /// be shadowed by a schema reusing the XML Schema namespace.
    pub fn entry(&self, table: Table, name: &QName) -> Option<&Entry> {
        self.entries(table).iter().find(|entry| entry.matches(name))
    }

    /// Registers every simple type, non-empty complex type, attribute and element of one schema.
    ///
    /// Nothing is appended if the prefix resolver is missing or lacks a prefix for one of the
    /// namespaces involved.
    pub fn add_schema_types(&mut self, schema: &SchemaTypes) -> Result<(), RegistryError> {
        let resolver = self
            .prefix_resolver
            .as_ref()
            .ok_or(RegistryError::MissingPrefixResolver)?;

        let items = schema
            .simple_types
            .iter()
            .map(|simple_type| (Table::Type, &simple_type.name))
            .chain(
                schema
                    .complex_types
                    .iter()
                    // Empty complex types generate nothing, so there is nothing to refer to.
                    .filter(|complex_type| !complex_type.is_empty)
                    .map(|complex_type| (Table::Type, &complex_type.name)),
            )
            .chain(schema.attributes.iter().map(|a| (Table::Attribute, &a.name)))
            .chain(schema.elements.iter().map(|e| (Table::Element, &e.name)));

        let mut pending = Vec::new();
        for (table, name) in items {
            let prefix = resolver.prefix(&name.namespace_name).ok_or_else(|| {
                RegistryError::NoPrefixForNamespace(name.namespace_name.clone())
            })?;
            let local_type = naming::mangle(&prefix, &name.local_name, table);
            pending.push((
                table,
                Entry {
                    namespace: name.namespace_name.clone(),
                    type_name: name.local_name.clone(),
                    is_basic: false,
                    is_builtin: false,
                    headers: vec![naming::header_name(&name.local_name, table)],
                    header_includes: Vec::new(),
                    forward_declarations: vec![local_type.clone()],
                    local_type,
                },
            ));
        }

        log::debug!("registering {} schema entries", pending.len());
        for (table, entry) in pending {
            match table {
                Table::Type => self.types.push(entry),
                Table::Attribute => self.attributes.push(entry),
                Table::Element => self.elements.push(entry),
            }
        }
        Ok(())
    }

    pub fn classify(&self, table: Table, name: &QName) -> Classification {
        self.entry(table, name)
            .map(|entry| Classification {
                is_basic: entry.is_basic,
                is_builtin: entry.is_builtin,
            })
            .unwrap_or_default()
    }

    pub fn is_basic_type(&self, name: &QName) -> bool {
        self.classify(Table::Type, name).is_basic
    }

    pub fn is_builtin_type(&self, name: &QName) -> bool {
        self.classify(Table::Type, name).is_builtin
    }

    pub fn local_type(&self, table: Table, name: &QName) -> Result<&str, LookupError> {
        self.entry(table, name)
            .map(|entry| entry.local_type.as_str())
            .ok_or_else(|| LookupError::UnknownType(name.clone()))
    }

    /// Logs an unknown name and falls back to an empty representation, so generation can go on
    /// and the broken spot shows up in the output.
    pub fn local_type_or_empty(&self, table: Table, name: &QName) -> &str {
        self.local_type(table, name).unwrap_or_else(|e| {
            log::debug!("{:?} lookup: {e}", table);
            ""
        })
    }

    pub fn headers(&self, table: Table, name: &QName) -> &[String] {
        self.entry(table, name)
            .map(|entry| entry.headers.as_slice())
            .unwrap_or_default()
    }

    pub fn header_includes(&self, table: Table, name: &QName) -> &[String] {
        self.entry(table, name)
            .map(|entry| entry.header_includes.as_slice())
            .unwrap_or_default()
    }

    pub fn forward_declarations(&self, table: Table, name: &QName) -> &[String] {
        self.entry(table, name)
            .map(|entry| entry.forward_declarations.as_slice())
            .unwrap_or_default()
    }

    pub fn local_type_for_attribute(&self, name: &QName) -> Result<&str, LookupError> {
        self.local_type(Table::Attribute, name)
    }

    pub fn headers_for_attribute(&self, name: &QName) -> &[String] {
        self.headers(Table::Attribute, name)
    }

    pub fn forward_declarations_for_attribute(&self, name: &QName) -> &[String] {
        self.forward_declarations(Table::Attribute, name)
    }

    pub fn local_type_for_element(&self, name: &QName) -> Result<&str, LookupError> {
        self.local_type(Table::Element, name)
    }

    pub fn headers_for_element(&self, name: &QName) -> &[String] {
        self.headers(Table::Element, name)
    }

    pub fn forward_declarations_for_element(&self, name: &QName) -> &[String] {
        self.forward_declarations(Table::Element, name)
    }

    /// Writes the three tables to the debug log.
    pub fn dump(&self) {
        for line in self.to_string().lines() {
            log::debug!("{line}");
        }
    }
}

/// Qt classes are implicitly shared and passed as `const T&`; everything else is a scalar.
pub fn passes_by_reference(local_type: &str, is_element: bool) -> bool {
    is_element || local_type.starts_with('Q')
}

/// The C++ type of a generated function parameter holding `local_type`.
pub fn input_type(local_type: &str, is_element: bool) -> String {
    if passes_by_reference(local_type, is_element) {
        format!("const {local_type}&")
    } else {
        local_type.to_string()
    }
}

impl fmt::Display for TypeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (title, table) in [
            ("Types", Table::Type),
            ("Attributes", Table::Attribute),
            ("Elements", Table::Element),
        ] {
            writeln!(f, "--------------------------------")?;
            writeln!(f, "{title}:")?;
            for entry in self.entries(table) {
                writeln!(
                    f,
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    if entry.is_basic { "basic" } else { "not basic" },
                    entry.namespace,
                    entry.type_name,
                    entry.local_type,
                    entry.headers.join(","),
                    entry.header_includes.join(","),
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace_manager::NamespaceManager;
    use crate::schema::{ComplexType, SchemaItem};
    use crate::xstypes::{XS_BOOLEAN_NAME, XS_NAMESPACE, XS_STRING_NAME};

    const TNS: &str = "urn:example:orders";

    fn type_map() -> TypeMap {
        let mut manager = NamespaceManager::new();
        manager.set_prefix("ns1", TNS);
        let mut map = TypeMap::new();
        map.set_prefix_resolver(Arc::new(manager));
        map
    }

    fn item(name: &str) -> SchemaItem {
        SchemaItem {
            name: QName::with_namespace(TNS, name),
        }
    }

    #[test]
    fn builtin_classification() {
        let map = TypeMap::new();
        let expected = [
            ("boolean", true),
            ("byte", true),
            ("short", true),
            ("float", true),
            ("double", true),
            ("decimal", true),
            ("integer", true),
            ("int", true),
            ("nonPositiveInteger", true),
            ("positiveInteger", true),
            ("nonNegativeInteger", true),
            ("unsignedInt", true),
            ("unsignedByte", true),
            ("unsignedLong", true),
            ("token", true),
            ("any", false),
            ("anyURI", false),
            ("base64Binary", false),
            ("binary", false),
            ("date", false),
            ("dateTime", false),
            ("duration", false),
            ("language", false),
            ("string", false),
            ("time", false),
        ];
        for (name, is_basic) in expected {
            assert_eq!(
                map.classify(Table::Type, &QName::xs(name)),
                Classification {
                    is_basic,
                    is_builtin: true
                },
                "{name}"
            );
        }
        assert!(map.is_basic_type(&XS_BOOLEAN_NAME));
        assert!(!map.is_basic_type(&XS_STRING_NAME));
        assert!(map.is_builtin_type(&XS_STRING_NAME));
    }

    #[test]
    fn builtin_representations() {
        let map = TypeMap::new();
        assert_eq!(map.local_type(Table::Type, &XS_STRING_NAME), Ok("QString"));
        assert_eq!(map.headers(Table::Type, &XS_STRING_NAME), ["QString"]);
        assert_eq!(map.local_type(Table::Type, &QName::xs("base64Binary")), Ok("QByteArray"));
        assert_eq!(map.local_type(Table::Type, &QName::xs("dateTime")), Ok("QDateTime"));
        assert_eq!(map.local_type(Table::Type, &QName::xs("unsignedInt")), Ok("unsigned int"));
        assert!(map.headers(Table::Type, &QName::xs("int")).is_empty());
        assert!(map.header_includes(Table::Type, &QName::xs("int")).is_empty());
        assert_eq!(map.header_includes(Table::Type, &XS_STRING_NAME), ["QString"]);
        assert_eq!(
            map.header_includes(Table::Type, &QName::xs("base64Binary")),
            ["QByteArray"]
        );
        assert_eq!(map.header_includes(Table::Type, &QName::xs("time")), ["QTime"]);
        assert!(map.forward_declarations(Table::Type, &XS_STRING_NAME).is_empty());
    }

    #[test]
    fn token_is_basic_but_needs_the_qstring_header() {
        let map = TypeMap::new();
        let token = QName::xs("token");
        assert!(map.is_basic_type(&token));
        assert_eq!(map.local_type(Table::Type, &token), Ok("QString"));
        assert_eq!(map.headers(Table::Type, &token), ["QString"]);
        assert!(map.header_includes(Table::Type, &token).is_empty());
    }

    #[test]
    fn aliases_share_a_representation() {
        let map = TypeMap::new();
        for name in ["integer", "int", "nonPositiveInteger"] {
            assert_eq!(map.local_type(Table::Type, &QName::xs(name)), Ok("int"));
        }
    }

    #[test]
    fn unknown_names() {
        let map = TypeMap::new();
        let name = QName::with_namespace(TNS, "Missing");
        assert_eq!(
            map.local_type(Table::Type, &name),
            Err(LookupError::UnknownType(name.clone()))
        );
        assert_eq!(map.local_type_or_empty(Table::Element, &name), "");
        assert_eq!(map.classify(Table::Type, &name), Classification::default());
        assert!(map.headers(Table::Type, &name).is_empty());
        assert!(map.header_includes(Table::Type, &name).is_empty());
        assert!(map.forward_declarations(Table::Type, &name).is_empty());
        // Builtins only live in the type table.
        assert!(map.local_type(Table::Attribute, &XS_STRING_NAME).is_err());
    }

    #[test]
    fn registers_schema_items() {
        let mut map = type_map();
        let schema = SchemaTypes {
            simple_types: vec![item("Foo")],
            ..Default::default()
        };
        map.add_schema_types(&schema).unwrap();
        let name = QName::with_namespace(TNS, "Foo");
        assert_eq!(map.local_type(Table::Type, &name), Ok("NS1__Foo"));
        assert_eq!(map.headers(Table::Type, &name), ["foo.h"]);
        assert_eq!(map.forward_declarations(Table::Type, &name), ["NS1__Foo"]);
        assert_eq!(map.classify(Table::Type, &name), Classification::default());
    }

    #[test]
    fn array_marker_is_stripped() {
        let mut map = type_map();
        let schema = SchemaTypes {
            simple_types: vec![item("Bar[]")],
            ..Default::default()
        };
        map.add_schema_types(&schema).unwrap();
        let name = QName::with_namespace(TNS, "Bar[]");
        assert_eq!(map.local_type(Table::Type, &name), Ok("NS1__Bar"));
    }

    #[test]
    fn array_named_attribute_and_element() {
        let mut map = type_map();
        let schema = SchemaTypes {
            attributes: vec![item("Bar[]")],
            elements: vec![item("Bar[]")],
            ..Default::default()
        };
        map.add_schema_types(&schema).unwrap();
        let name = QName::with_namespace(TNS, "Bar[]");
        assert_eq!(map.local_type_for_attribute(&name), Ok("NS1__BarAttribute"));
        assert_eq!(map.headers_for_attribute(&name), ["barattribute.h"]);
        assert_eq!(map.local_type_for_element(&name), Ok("NS1__BarElement"));
        assert_eq!(map.headers_for_element(&name), ["barelement.h"]);
    }

    #[test]
    fn empty_complex_types_are_skipped() {
        let mut map = type_map();
        let schema = SchemaTypes {
            complex_types: vec![
                ComplexType {
                    name: QName::with_namespace(TNS, "Empty"),
                    is_empty: true,
                },
                ComplexType {
                    name: QName::with_namespace(TNS, "order"),
                    is_empty: false,
                },
            ],
            ..Default::default()
        };
        let before = map.entries(Table::Type).len();
        map.add_schema_types(&schema).unwrap();
        assert_eq!(map.entries(Table::Type).len(), before + 1);
        assert!(map.entry(Table::Type, &QName::with_namespace(TNS, "Empty")).is_none());
        assert_eq!(
            map.local_type(Table::Type, &QName::with_namespace(TNS, "order")),
            Ok("NS1__Order")
        );
    }

    #[test]
    fn attribute_and_element_stay_apart() {
        let mut map = type_map();
        let schema = SchemaTypes {
            attributes: vec![item("id")],
            elements: vec![item("id")],
            ..Default::default()
        };
        map.add_schema_types(&schema).unwrap();
        let name = QName::with_namespace(TNS, "id");
        assert_eq!(map.local_type_for_attribute(&name), Ok("NS1__IdAttribute"));
        assert_eq!(map.local_type_for_element(&name), Ok("NS1__IdElement"));
        assert_eq!(map.headers_for_attribute(&name), ["idattribute.h"]);
        assert_eq!(map.headers_for_element(&name), ["idelement.h"]);
        assert_eq!(map.forward_declarations_for_element(&name), ["NS1__IdElement"]);
        assert_eq!(map.forward_declarations_for_attribute(&name), ["NS1__IdAttribute"]);
        assert!(map.local_type(Table::Type, &name).is_err());
    }

    #[test]
    fn builtins_are_not_shadowed() {
        let mut manager = NamespaceManager::new();
        manager.set_prefix("xsd", XS_NAMESPACE);
        let mut map = TypeMap::new();
        map.set_prefix_resolver(Arc::new(manager));
        let schema = SchemaTypes {
            simple_types: vec![SchemaItem {
                name: XS_STRING_NAME.clone(),
            }],
            ..Default::default()
        };
        map.add_schema_types(&schema).unwrap();
        assert_eq!(map.local_type(Table::Type, &XS_STRING_NAME), Ok("QString"));
        let duplicates = map
            .entries(Table::Type)
            .iter()
            .filter(|entry| entry.matches(&XS_STRING_NAME))
            .count();
        assert_eq!(duplicates, 2);
    }

    #[test]
    fn missing_resolver_fails() {
        let mut map = TypeMap::new();
        let schema = SchemaTypes {
            simple_types: vec![item("Foo")],
            ..Default::default()
        };
        assert_eq!(
            map.add_schema_types(&schema),
            Err(RegistryError::MissingPrefixResolver)
        );
    }

    #[test]
    fn unprefixed_namespace_appends_nothing() {
        let mut map = type_map();
        let schema = SchemaTypes {
            simple_types: vec![item("Foo")],
            elements: vec![SchemaItem {
                name: QName::with_namespace("urn:other", "bar"),
            }],
            ..Default::default()
        };
        assert_eq!(
            map.add_schema_types(&schema),
            Err(RegistryError::NoPrefixForNamespace("urn:other".into()))
        );
        assert!(map.entry(Table::Type, &QName::with_namespace(TNS, "Foo")).is_none());
    }

    #[test]
    fn parameter_passing() {
        assert_eq!(input_type("int", false), "int");
        assert_eq!(input_type("unsigned long", false), "unsigned long");
        assert_eq!(input_type("QString", false), "const QString&");
        assert_eq!(input_type("NS1__Foo", true), "const NS1__Foo&");
        assert!(!passes_by_reference("bool", false));
    }

    #[test]
    fn dump_lists_all_tables() {
        let mut map = type_map();
        let schema = SchemaTypes {
            elements: vec![item("order")],
            ..Default::default()
        };
        map.add_schema_types(&schema).unwrap();
        let dump = map.to_string();
        assert!(dump.contains("Types:"));
        assert!(dump.contains("basic\thttp://www.w3.org/2001/XMLSchema\tboolean\tbool\t\t"));
        assert!(dump.contains("not basic\turn:example:orders\torder\tNS1__OrderElement\torderelement.h\t"));
    }
}
