use std::collections::HashMap;

use prost_types::{
    field_descriptor_proto::{Label, Type},
    source_code_info::Location,
    DescriptorProto, EnumDescriptorProto, FieldDescriptorProto, FileDescriptorProto,
    FileDescriptorSet, ServiceDescriptorProto,
};

use super::{
    Comment, Definition, Element, Enum, EnumElement, EnumField, Field, Import, MapField, Message,
    MessageElement, Oneof, Package, Rpc, Service,
};
use crate::names::ScalarType;

// Field numbers from descriptor.proto, used to build source location paths.
const FILE_PACKAGE: i32 = 2;
const FILE_DEPENDENCY: i32 = 3;
const FILE_MESSAGE_TYPE: i32 = 4;
const FILE_ENUM_TYPE: i32 = 5;
const FILE_SERVICE: i32 = 6;

const MESSAGE_FIELD: i32 = 2;
const MESSAGE_NESTED_TYPE: i32 = 3;
const MESSAGE_ENUM_TYPE: i32 = 4;
const MESSAGE_ONEOF_DECL: i32 = 8;

const ENUM_VALUE: i32 = 2;
const ENUM_RESERVED_NAME: i32 = 5;

const SERVICE_METHOD: i32 = 2;

type Start = Option<(i32, i32)>;

impl Definition {
    /// Converts a compiled file descriptor into a definition.
    ///
    /// The package statement, if any, is always the first element since it applies to the whole
    /// file. If the descriptor includes source code info, comments are taken from it and the
    /// remaining elements are ordered by their position in the source file. Otherwise they are
    /// ordered as imports, messages, enums and then services.
    pub fn from_file_descriptor(file: &FileDescriptorProto) -> Self {
        let locations = Locations::new(file);
        let mut elements: Vec<(Start, Element)> = Vec::new();

        for (index, dependency) in file.dependency.iter().enumerate() {
            let path = [FILE_DEPENDENCY, index_to_i32(index)];
            elements.push((
                locations.start(&path),
                Element::Import(Import {
                    path: dependency.clone(),
                    comment: locations.comment(&path),
                }),
            ));
        }

        for (index, message) in file.message_type.iter().enumerate() {
            let path = [FILE_MESSAGE_TYPE, index_to_i32(index)];
            elements.push((
                locations.start(&path),
                Element::Message(locations.message(message, &path)),
            ));
        }

        for (index, enum_) in file.enum_type.iter().enumerate() {
            let path = [FILE_ENUM_TYPE, index_to_i32(index)];
            elements.push((
                locations.start(&path),
                Element::Enum(locations.enum_(enum_, &path)),
            ));
        }

        for (index, service) in file.service.iter().enumerate() {
            let path = [FILE_SERVICE, index_to_i32(index)];
            elements.push((
                locations.start(&path),
                Element::Service(locations.service(service, &path)),
            ));
        }

        // The package scopes the whole file, wherever it is declared.
        let mut elements = sorted(elements);
        if let Some(name) = &file.package {
            let path = [FILE_PACKAGE];
            elements.insert(
                0,
                Element::Package(Package {
                    name: name.clone(),
                    comment: locations.comment(&path),
                }),
            );
        }

        Definition {
            name: file.name.clone(),
            elements,
        }
    }

    /// Converts every file in a descriptor set, preserving the order of the set.
    pub fn from_file_descriptor_set(files: &FileDescriptorSet) -> Vec<Self> {
        files.file.iter().map(Definition::from).collect()
    }
}

impl From<&FileDescriptorProto> for Definition {
    fn from(file: &FileDescriptorProto) -> Self {
        Definition::from_file_descriptor(file)
    }
}

struct Locations<'a> {
    map: HashMap<&'a [i32], &'a Location>,
}

impl<'a> Locations<'a> {
    fn new(file: &'a FileDescriptorProto) -> Self {
        let mut map = HashMap::new();
        if let Some(info) = &file.source_code_info {
            for location in &info.location {
                map.entry(location.path.as_slice()).or_insert(location);
            }
        }
        Locations { map }
    }

    fn start(&self, path: &[i32]) -> Start {
        let location = self.map.get(path)?;
        match location.span.as_slice() {
            [line, column, ..] => Some((*line, *column)),
            _ => None,
        }
    }

    fn comment(&self, path: &[i32]) -> Option<Comment> {
        let location = self.map.get(path)?;
        let text = location
            .leading_comments
            .as_deref()
            .or(location.trailing_comments.as_deref())?;
        let comment = Comment::from_lines(strip_block_decoration(text));
        if comment.is_empty() {
            None
        } else {
            Some(comment)
        }
    }

    fn message(&self, message: &DescriptorProto, path: &[i32]) -> Message {
        let mut elements: Vec<(Start, MessageElement)> = Vec::new();
        let mut oneofs: Vec<Option<usize>> = vec![None; message.oneof_decl.len()];

        for (index, field) in message.field.iter().enumerate() {
            let field_path = child(path, MESSAGE_FIELD, index);
            let start = self.start(&field_path);

            if let Some(entry) = map_entry(message, field) {
                elements.push((
                    start,
                    MessageElement::Map(MapField {
                        name: field.name().to_owned(),
                        key_type: entry_type(entry, 1),
                        value_type: entry_type(entry, 2),
                        number: field.number(),
                        comment: self.comment(&field_path),
                    }),
                ));
                continue;
            }

            let plain = self.field(field, &field_path);
            let oneof_index = match real_oneof_index(field) {
                Some(oneof_index) if oneof_index < oneofs.len() => oneof_index,
                _ => {
                    elements.push((start, MessageElement::Field(plain)));
                    continue;
                }
            };

            match oneofs[oneof_index] {
                Some(position) => {
                    if let MessageElement::Oneof(oneof) = &mut elements[position].1 {
                        oneof.fields.push(plain);
                    }
                }
                None => {
                    let oneof_path = child(path, MESSAGE_ONEOF_DECL, oneof_index);
                    oneofs[oneof_index] = Some(elements.len());
                    elements.push((
                        self.start(&oneof_path).or(start),
                        MessageElement::Oneof(Oneof {
                            name: message.oneof_decl[oneof_index].name().to_owned(),
                            fields: vec![plain],
                            comment: self.comment(&oneof_path),
                        }),
                    ));
                }
            }
        }

        for (index, nested) in message.nested_type.iter().enumerate() {
            if is_map_entry(nested) {
                continue;
            }
            let nested_path = child(path, MESSAGE_NESTED_TYPE, index);
            elements.push((
                self.start(&nested_path),
                MessageElement::Message(self.message(nested, &nested_path)),
            ));
        }

        for (index, nested) in message.enum_type.iter().enumerate() {
            let nested_path = child(path, MESSAGE_ENUM_TYPE, index);
            elements.push((
                self.start(&nested_path),
                MessageElement::Enum(self.enum_(nested, &nested_path)),
            ));
        }

        Message {
            name: message.name().to_owned(),
            comment: self.comment(path),
            elements: sorted(elements),
        }
    }

    fn field(&self, field: &FieldDescriptorProto, path: &[i32]) -> Field {
        Field {
            name: field.name().to_owned(),
            type_name: field_type(field),
            repeated: field.label() == Label::Repeated,
            number: field.number(),
            comment: self.comment(path),
        }
    }

    fn enum_(&self, enum_: &EnumDescriptorProto, path: &[i32]) -> Enum {
        let mut elements: Vec<(Start, EnumElement)> = enum_
            .value
            .iter()
            .enumerate()
            .map(|(index, value)| {
                let value_path = child(path, ENUM_VALUE, index);
                (
                    self.start(&value_path),
                    EnumElement::Value(EnumField {
                        name: value.name().to_owned(),
                        value: value.number(),
                        comment: self.comment(&value_path),
                    }),
                )
            })
            .collect();

        if !enum_.reserved_name.is_empty() {
            elements.push((
                self.start(&child(path, ENUM_RESERVED_NAME, 0)),
                EnumElement::Reserved(enum_.reserved_name.clone()),
            ));
        }

        Enum {
            name: enum_.name().to_owned(),
            comment: self.comment(path),
            elements: sorted(elements),
        }
    }

    fn service(&self, service: &ServiceDescriptorProto, path: &[i32]) -> Service {
        let rpcs = service
            .method
            .iter()
            .enumerate()
            .map(|(index, method)| Rpc {
                name: method.name().to_owned(),
                request_type: strip_leading_dot(method.input_type()).to_owned(),
                response_type: strip_leading_dot(method.output_type()).to_owned(),
                client_streaming: method.client_streaming(),
                server_streaming: method.server_streaming(),
                comment: self.comment(&child(path, SERVICE_METHOD, index)),
            })
            .collect();

        Service {
            name: service.name().to_owned(),
            comment: self.comment(path),
            rpcs,
        }
    }
}

// A `/** ... */` comment keeps the second `*` of its opener. Descriptors built by other tools may
// also keep the `*` decoration at the start of every line.
fn strip_block_decoration(text: &str) -> Vec<&str> {
    let text = text.strip_prefix('*').unwrap_or(text);
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let decorated = lines
        .iter()
        .filter(|line| !line.is_empty())
        .all(|line| line.starts_with('*'));
    if !decorated {
        return lines;
    }

    lines
        .into_iter()
        .map(|line| line.strip_prefix('*').unwrap_or(line))
        .collect()
}

fn sorted<T>(mut elements: Vec<(Start, T)>) -> Vec<T> {
    elements.sort_by_key(|&(start, _)| start);
    elements.into_iter().map(|(_, element)| element).collect()
}

fn child(path: &[i32], field: i32, index: usize) -> Vec<i32> {
    let mut path = path.to_vec();
    path.push(field);
    path.push(index_to_i32(index));
    path
}

fn index_to_i32(index: usize) -> i32 {
    i32::try_from(index).unwrap_or(i32::MAX)
}

fn strip_leading_dot(name: &str) -> &str {
    name.strip_prefix('.').unwrap_or(name)
}

fn is_map_entry(message: &DescriptorProto) -> bool {
    message
        .options
        .as_ref()
        .map_or(false, |options| options.map_entry())
}

fn map_entry<'a>(
    message: &'a DescriptorProto,
    field: &FieldDescriptorProto,
) -> Option<&'a DescriptorProto> {
    if field.label() != Label::Repeated || field.r#type() != Type::Message {
        return None;
    }

    let entry_name = field.type_name().rsplit('.').next()?;
    message
        .nested_type
        .iter()
        .find(|nested| is_map_entry(nested) && nested.name() == entry_name)
}

fn entry_type(entry: &DescriptorProto, number: i32) -> String {
    entry
        .field
        .iter()
        .find(|field| field.number() == number)
        .map(field_type)
        .unwrap_or_default()
}

// Synthetic oneofs generated for proto3 `optional` fields are not real groups.
fn real_oneof_index(field: &FieldDescriptorProto) -> Option<usize> {
    if field.proto3_optional() {
        return None;
    }
    usize::try_from(field.oneof_index?).ok()
}

fn field_type(field: &FieldDescriptorProto) -> String {
    match field.r#type.and_then(|_| scalar_type(field.r#type())) {
        Some(scalar) => scalar.as_str().to_owned(),
        None => strip_leading_dot(field.type_name()).to_owned(),
    }
}

fn scalar_type(ty: Type) -> Option<ScalarType> {
    match ty {
        Type::Double => Some(ScalarType::Double),
        Type::Float => Some(ScalarType::Float),
        Type::Int64 => Some(ScalarType::Int64),
        Type::Uint64 => Some(ScalarType::Uint64),
        Type::Int32 => Some(ScalarType::Int32),
        Type::Fixed64 => Some(ScalarType::Fixed64),
        Type::Fixed32 => Some(ScalarType::Fixed32),
        Type::Bool => Some(ScalarType::Bool),
        Type::String => Some(ScalarType::String),
        Type::Bytes => Some(ScalarType::Bytes),
        Type::Uint32 => Some(ScalarType::Uint32),
        Type::Sfixed32 => Some(ScalarType::Sfixed32),
        Type::Sfixed64 => Some(ScalarType::Sfixed64),
        Type::Sint32 => Some(ScalarType::Sint32),
        Type::Sint64 => Some(ScalarType::Sint64),
        Type::Group | Type::Message | Type::Enum => None,
    }
}
