//! The top-level declarations of a schema, as handed to [`TypeMap::add_schema_types`].
//!
//! [`TypeMap::add_schema_types`]: crate::type_map::TypeMap::add_schema_types

use roxmltree::{Document, Node};

use crate::error::SchemaError;
use crate::namespace_manager::NamespaceManager;
use crate::xstypes::{QName, XS_NAMESPACE};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaItem {
    pub name: QName,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComplexType {
    pub name: QName,
    /// No content model and no attributes; such a type maps to nothing.
    pub is_empty: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SchemaTypes {
    pub simple_types: Vec<SchemaItem>,
    pub complex_types: Vec<ComplexType>,
    pub attributes: Vec<SchemaItem>,
    pub elements: Vec<SchemaItem>,
}

fn is_xs(node: Node, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(XS_NAMESPACE)
}

/// Child elements that carry content, i.e. everything but annotations.
fn content_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(|c| c.is_element() && !is_xs(*c, "annotation"))
}

/// A model group without particles, possibly nested, like `<xs:sequence/>`.
fn model_group_is_empty(group: Node) -> bool {
    content_children(group).all(|particle| {
        ["sequence", "choice", "all"]
            .iter()
            .any(|compositor| is_xs(particle, compositor))
            && model_group_is_empty(particle)
    })
}

/// No attributes, no particles and no derivation. WSDLs use such types for void messages.
fn complex_type_is_empty(complex_type: Node) -> bool {
    content_children(complex_type).all(|child| {
        if ["sequence", "choice", "all"]
            .iter()
            .any(|compositor| is_xs(child, compositor))
        {
            model_group_is_empty(child)
        } else {
            // attribute, attributeGroup, anyAttribute, group, simpleContent, complexContent
            false
        }
    })
}

fn top_level_name(node: Node, target_namespace: &str) -> Result<QName, SchemaError> {
    let name = node
        .attribute("name")
        .ok_or_else(|| SchemaError::MissingName(node.tag_name().name().to_string()))?;
    Ok(QName::with_namespace(target_namespace, name))
}

impl SchemaTypes {
    /// Collects the top-level declarations of every `<xs:schema>` in `document`, which may be a
    /// bare schema or a WSDL carrying schemas in its `<types>` section.
    pub fn from_document(document: &Document) -> Result<Self, SchemaError> {
        let mut types = Self::default();
        for schema in document.descendants().filter(|n| is_xs(*n, "schema")) {
            types.add_schema(schema)?;
        }
        Ok(types)
    }

    pub fn parse(text: &str) -> Result<Self, SchemaError> {
        let document = Document::parse(text)?;
        Self::from_document(&document)
    }

    fn add_schema(&mut self, schema: Node) -> Result<(), SchemaError> {
        let target_namespace = schema.attribute("targetNamespace").unwrap_or_default();

        for child in schema.children().filter(Node::is_element) {
            if child.tag_name().namespace() != Some(XS_NAMESPACE) {
                continue;
            }
            match child.tag_name().name() {
                "simpleType" => self.simple_types.push(SchemaItem {
                    name: top_level_name(child, target_namespace)?,
                }),
                "complexType" => self.complex_types.push(ComplexType {
                    name: top_level_name(child, target_namespace)?,
                    is_empty: complex_type_is_empty(child),
                }),
                "attribute" => self.attributes.push(SchemaItem {
                    name: top_level_name(child, target_namespace)?,
                }),
                "element" => self.elements.push(SchemaItem {
                    name: top_level_name(child, target_namespace)?,
                }),
                _ => {}
            }
        }
        Ok(())
    }

    /// Distinct namespaces of all items, in encounter order.
    pub fn namespaces(&self) -> Vec<&str> {
        let names = self
            .simple_types
            .iter()
            .map(|s| &s.name)
            .chain(self.complex_types.iter().map(|c| &c.name))
            .chain(self.attributes.iter().map(|a| &a.name))
            .chain(self.elements.iter().map(|e| &e.name));
        let mut namespaces: Vec<&str> = Vec::new();
        for name in names {
            if !namespaces.contains(&name.namespace_name.as_str()) {
                namespaces.push(&name.namespace_name);
            }
        }
        namespaces
    }
}

/// Adopts the prefixes the document itself declares, unless the manager already uses them.
pub fn collect_prefixes(document: &Document, manager: &mut NamespaceManager) {
    for node in document.descendants().filter(Node::is_element) {
        for namespace in node.namespaces() {
            let Some(prefix) = namespace.name() else {
                continue;
            };
            if prefix == "xml" || manager.uri(prefix).is_some() {
                continue;
            }
            if manager.prefix(namespace.uri()).is_none() {
                manager.set_prefix(prefix, namespace.uri());
            }
        }
    }
}
