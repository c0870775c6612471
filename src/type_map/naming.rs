use super::Table;

const ARRAY_MARKER: &str = "[]";

/// Capitalizes the first character of a schema local name and strips a trailing `[]`.
///
/// The "sequence of" part of an array type is encoded by the caller, not in the name.
pub fn adapt_local_type_name(name: &str) -> String {
    let name = name.strip_suffix(ARRAY_MARKER).unwrap_or(name);
    let mut chars = name.chars();
    let mut result = String::with_capacity(name.len());
    if let Some(first) = chars.next() {
        first.to_uppercase().for_each(|c| result.push(c));
    }
    result.extend(chars);
    result
}

impl Table {
    /// Appended to attribute and element names so they never collide with each other or with a
    /// type of the same name.
    pub fn role_suffix(self) -> &'static str {
        match self {
            Table::Type => "",
            Table::Attribute => "Attribute",
            Table::Element => "Element",
        }
    }
}

/// Builds the generated identifier for a schema item, e.g. `NS1__Foo` or `NS1__FooElement`.
pub fn mangle(prefix: &str, name: &str, table: Table) -> String {
    let local = adapt_local_type_name(name);
    format!("{}__{}{}", prefix.to_uppercase(), local, table.role_suffix())
}

/// Name of the generated header declaring the item, e.g. `foo.h` or `fooelement.h`.
pub fn header_name(name: &str, table: Table) -> String {
    let name = name.strip_suffix(ARRAY_MARKER).unwrap_or(name);
    format!("{}{}.h", name.to_lowercase(), table.role_suffix().to_lowercase())
}
