//! The element tree of a parsed protobuf schema file.
//!
//! A [`Definition`] is normally produced by converting a compiled file descriptor (see
//! [`Definition::from_file_descriptor`]), but it can also be assembled by hand.

mod descriptor;

pub use crate::comment::Comment;

/// A single parsed schema file.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Definition {
    /// The name of the file this definition was parsed from, if known.
    pub name: Option<String>,
    /// The top-level elements of the file, in declaration order.
    pub elements: Vec<Element>,
}

/// A top-level declaration in a schema file.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// An `import` statement.
    Import(Import),
    /// The `package` statement.
    Package(Package),
    /// A `service` definition.
    Service(Service),
    /// A `message` definition.
    Message(Message),
    /// An `enum` definition.
    Enum(Enum),
}

/// An `import` statement.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Import {
    /// The imported file path.
    pub path: String,
    /// The comment attached to the statement.
    pub comment: Option<Comment>,
}

/// The `package` statement of a file.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Package {
    /// The dot-separated package name.
    pub name: String,
    /// The comment attached to the statement.
    pub comment: Option<Comment>,
}

/// A `service` definition.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Service {
    /// The service name.
    pub name: String,
    /// The comment attached to the service.
    pub comment: Option<Comment>,
    /// The methods of the service, in declaration order.
    pub rpcs: Vec<Rpc>,
}

/// A remote call declared in a service.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Rpc {
    /// The method name.
    pub name: String,
    /// The declared request type name.
    pub request_type: String,
    /// The declared response type name.
    pub response_type: String,
    /// Whether the client sends a stream of requests.
    pub client_streaming: bool,
    /// Whether the server sends a stream of responses.
    pub server_streaming: bool,
    /// The comment attached to the method.
    pub comment: Option<Comment>,
}

/// A `message` definition.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Message {
    /// The message name.
    pub name: String,
    /// The comment attached to the message.
    pub comment: Option<Comment>,
    /// The members of the message, in declaration order.
    pub elements: Vec<MessageElement>,
}

/// A member of a message body.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageElement {
    /// A plain field.
    Field(Field),
    /// A `map<K, V>` field.
    Map(MapField),
    /// A `oneof` group.
    Oneof(Oneof),
    /// A nested message.
    Message(Message),
    /// A nested enum.
    Enum(Enum),
}

/// A plain message field.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Field {
    /// The field name.
    pub name: String,
    /// The declared type, either a scalar keyword or a (possibly qualified) type name.
    pub type_name: String,
    /// Whether the field is declared `repeated`.
    pub repeated: bool,
    /// The declared field number.
    pub number: i32,
    /// The comment attached to the field.
    pub comment: Option<Comment>,
}

/// A `map<K, V>` field.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MapField {
    /// The field name.
    pub name: String,
    /// The key type.
    pub key_type: String,
    /// The value type.
    pub value_type: String,
    /// The declared field number.
    pub number: i32,
    /// The comment attached to the field.
    pub comment: Option<Comment>,
}

/// A `oneof` group of fields.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Oneof {
    /// The oneof name.
    pub name: String,
    /// The fields of the group.
    pub fields: Vec<Field>,
    /// The comment attached to the group.
    pub comment: Option<Comment>,
}

/// An `enum` definition.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Enum {
    /// The enum name.
    pub name: String,
    /// The comment attached to the enum.
    pub comment: Option<Comment>,
    /// The members of the enum, in declaration order.
    pub elements: Vec<EnumElement>,
}

/// A member of an enum body.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumElement {
    /// A named value.
    Value(EnumField),
    /// A `reserved` statement listing names which may not be used.
    Reserved(Vec<String>),
}

/// A named enum value.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EnumField {
    /// The value name.
    pub name: String,
    /// The declared integer value.
    pub value: i32,
    /// The comment attached to the value.
    pub comment: Option<Comment>,
}

impl Definition {
    /// Creates an empty definition with the given file name.
    pub fn new(name: impl Into<String>) -> Self {
        Definition {
            name: Some(name.into()),
            elements: Vec::new(),
        }
    }

    /// Appends a top-level element.
    pub fn with_element(mut self, element: impl Into<Element>) -> Self {
        self.elements.push(element.into());
        self
    }

    /// The package declared by this file, if any.
    pub fn package(&self) -> Option<&str> {
        self.elements.iter().find_map(|element| match element {
            Element::Package(package) => Some(package.name.as_str()),
            _ => None,
        })
    }
}

impl Import {
    /// Creates an import of the given file.
    pub fn new(path: impl Into<String>) -> Self {
        Import {
            path: path.into(),
            comment: None,
        }
    }
}

impl Package {
    /// Creates a package statement.
    pub fn new(name: impl Into<String>) -> Self {
        Package {
            name: name.into(),
            comment: None,
        }
    }
}

impl Service {
    /// Creates a service with no methods.
    pub fn new(name: impl Into<String>) -> Self {
        Service {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the attached comment.
    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comment = Some(comment);
        self
    }

    /// Appends a method.
    pub fn with_rpc(mut self, rpc: Rpc) -> Self {
        self.rpcs.push(rpc);
        self
    }
}

impl Rpc {
    /// Creates a unary method.
    pub fn new(
        name: impl Into<String>,
        request_type: impl Into<String>,
        response_type: impl Into<String>,
    ) -> Self {
        Rpc {
            name: name.into(),
            request_type: request_type.into(),
            response_type: response_type.into(),
            ..Default::default()
        }
    }

    /// Sets the attached comment.
    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comment = Some(comment);
        self
    }
}

impl Message {
    /// Creates an empty message.
    pub fn new(name: impl Into<String>) -> Self {
        Message {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the attached comment.
    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comment = Some(comment);
        self
    }

    /// Appends a member.
    pub fn with_element(mut self, element: impl Into<MessageElement>) -> Self {
        self.elements.push(element.into());
        self
    }
}

impl Field {
    /// Creates a singular field.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, number: i32) -> Self {
        Field {
            name: name.into(),
            type_name: type_name.into(),
            repeated: false,
            number,
            comment: None,
        }
    }

    /// Marks the field as `repeated`.
    pub fn repeated(mut self) -> Self {
        self.repeated = true;
        self
    }

    /// Sets the attached comment.
    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comment = Some(comment);
        self
    }
}

impl Enum {
    /// Creates an empty enum.
    pub fn new(name: impl Into<String>) -> Self {
        Enum {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the attached comment.
    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comment = Some(comment);
        self
    }

    /// Appends a member.
    pub fn with_element(mut self, element: impl Into<EnumElement>) -> Self {
        self.elements.push(element.into());
        self
    }
}

impl EnumField {
    /// Creates a named value.
    pub fn new(name: impl Into<String>, value: i32) -> Self {
        EnumField {
            name: name.into(),
            value,
            comment: None,
        }
    }

    /// Sets the attached comment.
    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comment = Some(comment);
        self
    }
}

macro_rules! impl_from {
    ($target:ident: $($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for $target {
                fn from(value: $ty) -> Self {
                    $target::$variant(value)
                }
            }
        )*
    };
}

impl_from!(Element: Import(Import), Package(Package), Service(Service), Message(Message), Enum(Enum));
impl_from!(MessageElement: Field(Field), Map(MapField), Oneof(Oneof), Message(Message), Enum(Enum));
impl_from!(EnumElement: Value(EnumField));
