//! Scalar type classification and package-aware name qualification.

use std::fmt;

/// One of the built-in protobuf scalar types.
///
/// See <https://protobuf.dev/programming-guides/proto3/#scalar>.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Double,
    Float,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Sint32,
    Sint64,
    Fixed32,
    Fixed64,
    Sfixed32,
    Sfixed64,
    Bool,
    String,
    Bytes,
}

impl ScalarType {
    /// All scalar types, in the order they are listed by the protobuf language guide.
    pub const ALL: [ScalarType; 15] = [
        ScalarType::Double,
        ScalarType::Float,
        ScalarType::Int32,
        ScalarType::Int64,
        ScalarType::Uint32,
        ScalarType::Uint64,
        ScalarType::Sint32,
        ScalarType::Sint64,
        ScalarType::Fixed32,
        ScalarType::Fixed64,
        ScalarType::Sfixed32,
        ScalarType::Sfixed64,
        ScalarType::Bool,
        ScalarType::String,
        ScalarType::Bytes,
    ];

    /// Looks up a scalar type by its keyword. Matching is exact and case-sensitive.
    pub fn from_name(name: &str) -> Option<ScalarType> {
        match name {
            "double" => Some(ScalarType::Double),
            "float" => Some(ScalarType::Float),
            "int32" => Some(ScalarType::Int32),
            "int64" => Some(ScalarType::Int64),
            "uint32" => Some(ScalarType::Uint32),
            "uint64" => Some(ScalarType::Uint64),
            "sint32" => Some(ScalarType::Sint32),
            "sint64" => Some(ScalarType::Sint64),
            "fixed32" => Some(ScalarType::Fixed32),
            "fixed64" => Some(ScalarType::Fixed64),
            "sfixed32" => Some(ScalarType::Sfixed32),
            "sfixed64" => Some(ScalarType::Sfixed64),
            "bool" => Some(ScalarType::Bool),
            "string" => Some(ScalarType::String),
            "bytes" => Some(ScalarType::Bytes),
            _ => None,
        }
    }

    /// The keyword used for this type in protobuf source files.
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarType::Double => "double",
            ScalarType::Float => "float",
            ScalarType::Int32 => "int32",
            ScalarType::Int64 => "int64",
            ScalarType::Uint32 => "uint32",
            ScalarType::Uint64 => "uint64",
            ScalarType::Sint32 => "sint32",
            ScalarType::Sint64 => "sint64",
            ScalarType::Fixed32 => "fixed32",
            ScalarType::Fixed64 => "fixed64",
            ScalarType::Sfixed32 => "sfixed32",
            ScalarType::Sfixed64 => "sfixed64",
            ScalarType::Bool => "bool",
            ScalarType::String => "string",
            ScalarType::Bytes => "bytes",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns `true` if `name` is exactly one of the protobuf scalar type keywords.
pub fn is_scalar(name: &str) -> bool {
    ScalarType::from_name(name).is_some()
}

/// Returns the fully qualified form of `name` within `namespace`.
///
/// The name is returned unchanged if any of the following hold:
///   - `namespace` is absent or empty
///   - `name` already contains a `.` and so is treated as fully qualified
///   - `name` is a scalar type keyword
pub fn qualify(namespace: Option<&str>, name: &str) -> String {
    match namespace {
        None | Some("") => name.to_owned(),
        Some(_) if name.contains('.') => name.to_owned(),
        Some(_) if is_scalar(name) => name.to_owned(),
        Some(namespace) => format!("{}.{}", namespace, name),
    }
}

#[test]
fn scalar_keywords() {
    for ty in ScalarType::ALL {
        assert!(is_scalar(ty.as_str()), "{} should be scalar", ty);
        assert_eq!(ScalarType::from_name(&ty.to_string()), Some(ty));
    }

    assert!(!is_scalar("MyMessage"));
    assert!(!is_scalar("Int32"));
    assert!(!is_scalar("int32 "));
    assert!(!is_scalar(""));
    assert!(!is_scalar("google.protobuf.Int32Value"));
}

#[test]
fn qualify_names() {
    assert_eq!(qualify(None, "MyMessage"), "MyMessage");
    assert_eq!(qualify(Some(""), "MyMessage"), "MyMessage");
    assert_eq!(qualify(Some("my.package"), "MyMessage"), "my.package.MyMessage");
    assert_eq!(qualify(Some("my.package"), "uint32"), "uint32");
    assert_eq!(qualify(Some("my.package"), "other.Type"), "other.Type");
    assert_eq!(qualify(Some("pkg"), "Uint32"), "pkg.Uint32");
}

#[test]
fn qualify_is_stable() {
    let once = qualify(Some("my.package"), "MyMessage");
    assert_eq!(qualify(Some("my.package"), &once), once);
}
