//! The documentation model produced by [`ModelBuilder`](crate::ModelBuilder).

use serde::Serialize;

use crate::comment::Markup;

/// All services, messages and enums collected from a set of definitions.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct DocModel {
    /// Services, in input order.
    pub services: Vec<ServiceDoc>,
    /// Top-level messages, in input order.
    pub messages: Vec<MessageDoc>,
    /// Top-level enums, in input order.
    pub enums: Vec<EnumDoc>,
}

/// A documented service.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDoc {
    /// The package-qualified service name.
    pub name: String,
    /// The first paragraph of the service comment.
    pub summary: Markup,
    /// The full service comment.
    pub description: Markup,
    /// The methods of the service, in declaration order.
    pub methods: Vec<MethodDoc>,
}

/// A documented service method.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDoc {
    /// The method name.
    pub name: String,
    /// The first paragraph of the method comment.
    pub description: Markup,
    /// The fully qualified request type.
    pub input_type: String,
    /// The fully qualified response type.
    pub output_type: String,
    /// Whether the method accepts a stream of requests.
    pub client_streaming: bool,
    /// Whether the method returns a stream of responses.
    pub server_streaming: bool,
}

/// A documented message.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct MessageDoc {
    /// The package-qualified message name.
    pub name: String,
    /// The first paragraph of the message comment.
    pub summary: Markup,
    /// The full message comment.
    pub description: Markup,
    /// The plain fields of the message, in declaration order.
    pub fields: Vec<FieldDoc>,
}

/// A documented enum.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct EnumDoc {
    /// The package-qualified enum name.
    pub name: String,
    /// The first paragraph of the enum comment.
    pub summary: Markup,
    /// The full enum comment.
    pub description: Markup,
    /// The values of the enum, in declaration order.
    pub fields: Vec<FieldDoc>,
}

/// A documented message field or enum value.
///
/// For enum values, `position` holds the value itself and `type_name`, `is_scalar` and
/// `is_repeated` are left empty.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDoc {
    /// The field number, or the enum value.
    pub position: u8,
    /// The field name.
    pub name: String,
    /// The first paragraph of the field comment.
    pub description: Markup,
    /// The scalar keyword or fully qualified type of a message field.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Whether `type_name` is a scalar type.
    pub is_scalar: bool,
    /// Whether the field is declared `repeated`.
    pub is_repeated: bool,
}

impl DocModel {
    /// Returns `true` if nothing was documented.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty() && self.messages.is_empty() && self.enums.is_empty()
    }
}
