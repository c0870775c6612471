use super::Entry;
use crate::xstypes::XS_NAMESPACE;

/// One row of the builtin table. All rows live in the XML Schema namespace.
pub(super) struct Builtin {
    pub name: &'static str,
    pub local_type: &'static str,
    pub basic: bool,
    pub headers: &'static [&'static str],
    pub header_includes: &'static [&'static str],
}

const fn basic(name: &'static str, local_type: &'static str) -> Builtin {
    Builtin {
        name,
        local_type,
        basic: true,
        headers: &[],
        header_includes: &[],
    }
}

/// A Qt class, which needs its own header both where it's declared and where it's used.
const fn qt_class(name: &'static str, class: &'static [&'static str; 1]) -> Builtin {
    Builtin {
        name,
        local_type: class[0],
        basic: false,
        headers: class,
        header_includes: class,
    }
}

// Order matters: lookups return the first match.
pub(super) const BUILTINS: &[Builtin] = &[
    qt_class("any", &["QString"]),
    qt_class("anyURI", &["QString"]),
    qt_class("base64Binary", &["QByteArray"]),
    qt_class("binary", &["QByteArray"]),
    basic("boolean", "bool"),
    basic("byte", "char"),
    qt_class("date", &["QDate"]),
    qt_class("dateTime", &["QDateTime"]),
    basic("decimal", "float"),
    basic("double", "double"),
    // TODO: map to a dedicated duration class once the runtime has one
    qt_class("duration", &["QString"]),
    basic("float", "float"),
    basic("integer", "int"),
    basic("int", "int"),
    basic("nonPositiveInteger", "int"),
    qt_class("language", &["QString"]),
    basic("short", "short"),
    qt_class("string", &["QString"]),
    qt_class("time", &["QTime"]),
    basic("unsignedByte", "unsigned char"),
    basic("unsignedLong", "unsigned long"),
    basic("positiveInteger", "unsigned int"),
    basic("nonNegativeInteger", "unsigned int"),
    basic("unsignedInt", "unsigned int"),
    // Classified as basic, but still needs the QString header wherever it's used.
    Builtin {
        name: "token",
        local_type: "QString",
        basic: true,
        headers: &["QString"],
        header_includes: &[],
    },
];

impl Builtin {
    pub(super) fn to_entry(&self) -> Entry {
        Entry {
            namespace: XS_NAMESPACE.to_string(),
            type_name: self.name.to_string(),
            is_basic: self.basic,
            is_builtin: true,
            local_type: self.local_type.to_string(),
            headers: self.headers.iter().map(|h| h.to_string()).collect(),
            header_includes: self.header_includes.iter().map(|h| h.to_string()).collect(),
            forward_declarations: Vec::new(),
        }
    }
}

pub(super) fn builtin_entries() -> Vec<Entry> {
    BUILTINS.iter().map(Builtin::to_entry).collect()
}
