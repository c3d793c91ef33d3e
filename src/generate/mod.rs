#[cfg(test)]
mod tests;

use crate::{
    comment::{format, Comment, CommentMode, Markup},
    error::{Error, PositionKind},
    model::{DocModel, EnumDoc, FieldDoc, MessageDoc, MethodDoc, ServiceDoc},
    names::{is_scalar, qualify},
    schema::{Definition, Element, Enum, EnumElement, Message, MessageElement, Service},
};

/// Builds a [`DocModel`] from one or more schema definitions.
///
/// # Examples
///
/// ```
/// # use protodoc::{ModelBuilder, schema::{Definition, Message, Package, Field}};
/// let definition = Definition::new("root.proto")
///     .with_element(Package::new("my.package"))
///     .with_element(Message::new("Foo").with_element(Field::new("bar", "Bar", 1)));
///
/// let model = ModelBuilder::new().add_definition(&definition)?.build();
/// assert_eq!(model.messages[0].name, "my.package.Foo");
/// assert_eq!(model.messages[0].fields[0].type_name, "my.package.Bar");
/// # Ok::<(), protodoc::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct ModelBuilder {
    model: DocModel,
}

impl ModelBuilder {
    /// Creates a new builder with an empty model.
    pub fn new() -> Self {
        ModelBuilder::default()
    }

    /// Adds the services, messages and enums of a single definition to the model.
    ///
    /// Type names are qualified against the package declared in `definition`, if any. The package
    /// of one definition never affects another.
    ///
    /// If a field number or enum value is outside the range `0..=255`, an error is returned and
    /// the model is left unchanged.
    pub fn add_definition(&mut self, definition: &Definition) -> Result<&mut Self, Error> {
        let file_name = definition.name.as_deref().unwrap_or("<unnamed>");
        let mut namespace: Option<&str> = None;
        let mut added = DocModel::default();

        for element in &definition.elements {
            match element {
                Element::Import(import) => {
                    tracing::debug!(file = file_name, import = %import.path, "observed import");
                }
                Element::Package(package) => {
                    tracing::debug!(file = file_name, package = %package.name, "observed package");
                    namespace = Some(package.name.as_str());
                }
                Element::Service(service) => added.services.push(service_doc(namespace, service)),
                Element::Message(message) => {
                    added.messages.push(message_doc(namespace, message)?)
                }
                Element::Enum(enum_) => added.enums.push(enum_doc(namespace, enum_)?),
            }
        }

        tracing::debug!(
            file = file_name,
            services = added.services.len(),
            messages = added.messages.len(),
            enums = added.enums.len(),
            "documented definition"
        );

        self.model.services.append(&mut added.services);
        self.model.messages.append(&mut added.messages);
        self.model.enums.append(&mut added.enums);
        Ok(self)
    }

    /// Adds each definition in turn. See [`add_definition`](ModelBuilder::add_definition).
    pub fn add_definitions<'a>(
        &mut self,
        definitions: impl IntoIterator<Item = &'a Definition>,
    ) -> Result<&mut Self, Error> {
        for definition in definitions {
            self.add_definition(definition)?;
        }
        Ok(self)
    }

    /// A reference to the model built so far.
    pub fn model(&self) -> &DocModel {
        &self.model
    }

    /// Takes the model out of the builder, leaving it empty.
    pub fn build(&mut self) -> DocModel {
        std::mem::take(&mut self.model)
    }
}

/// Builds a documentation model from a set of definitions.
///
/// This is equivalent to:
///
/// ```rust
/// # use protodoc::{ModelBuilder, schema::Definition};
/// # fn main() -> Result<(), protodoc::Error> {
/// # let definitions: Vec<Definition> = vec![];
/// let model = ModelBuilder::new()
///     .add_definitions(&definitions)?
///     .build();
/// # Ok(())
/// # }
/// ```
pub fn build_model<'a>(
    definitions: impl IntoIterator<Item = &'a Definition>,
) -> Result<DocModel, Error> {
    Ok(ModelBuilder::new().add_definitions(definitions)?.build())
}

fn service_doc(namespace: Option<&str>, service: &Service) -> ServiceDoc {
    let methods = service
        .rpcs
        .iter()
        .map(|rpc| MethodDoc {
            name: rpc.name.clone(),
            description: summary(rpc.comment.as_ref()),
            input_type: qualify(namespace, &rpc.request_type),
            output_type: qualify(namespace, &rpc.response_type),
            client_streaming: rpc.client_streaming,
            server_streaming: rpc.server_streaming,
        })
        .collect();

    ServiceDoc {
        name: qualify(namespace, &service.name),
        summary: summary(service.comment.as_ref()),
        description: full_text(service.comment.as_ref()),
        methods,
    }
}

fn message_doc(namespace: Option<&str>, message: &Message) -> Result<MessageDoc, Error> {
    let mut fields = Vec::with_capacity(message.elements.len());
    for element in &message.elements {
        let field = match element {
            MessageElement::Field(field) => field,
            MessageElement::Map(_)
            | MessageElement::Oneof(_)
            | MessageElement::Message(_)
            | MessageElement::Enum(_) => {
                tracing::trace!(message = %message.name, "skipping non-plain message member");
                continue;
            }
        };

        fields.push(FieldDoc {
            position: position(PositionKind::Field, &message.name, &field.name, field.number)?,
            name: field.name.clone(),
            description: summary(field.comment.as_ref()),
            type_name: qualify(namespace, &field.type_name),
            is_scalar: is_scalar(&field.type_name),
            is_repeated: field.repeated,
        });
    }

    Ok(MessageDoc {
        name: qualify(namespace, &message.name),
        summary: summary(message.comment.as_ref()),
        description: full_text(message.comment.as_ref()),
        fields,
    })
}

fn enum_doc(namespace: Option<&str>, enum_: &Enum) -> Result<EnumDoc, Error> {
    let mut fields = Vec::with_capacity(enum_.elements.len());
    for element in &enum_.elements {
        let value = match element {
            EnumElement::Value(value) => value,
            EnumElement::Reserved(_) => continue,
        };

        fields.push(FieldDoc {
            position: position(PositionKind::EnumValue, &enum_.name, &value.name, value.value)?,
            name: value.name.clone(),
            description: summary(value.comment.as_ref()),
            ..Default::default()
        });
    }

    Ok(EnumDoc {
        name: qualify(namespace, &enum_.name),
        summary: summary(enum_.comment.as_ref()),
        description: full_text(enum_.comment.as_ref()),
        fields,
    })
}

fn position(kind: PositionKind, container: &str, name: &str, value: i32) -> Result<u8, Error> {
    u8::try_from(value).map_err(|_| Error::position_out_of_range(kind, container, name, value))
}

fn summary(comment: Option<&Comment>) -> Markup {
    format(comment, CommentMode::FirstParagraph)
}

fn full_text(comment: Option<&Comment>) -> Markup {
    format(comment, CommentMode::FullText)
}
