use similar_asserts::assert_eq;

use super::*;
use crate::{
    error::ErrorKind,
    schema::{EnumField, Field, Import, MapField, Oneof, Package, Rpc},
};

fn build(definitions: &[Definition]) -> DocModel {
    build_model(definitions).unwrap()
}

fn markup(text: &str) -> Markup {
    Markup::from_safe(text)
}

#[test]
fn empty_input() {
    assert_eq!(build(&[]), DocModel::default());
    assert!(build(&[Definition::new("empty.proto")]).is_empty());
}

#[test]
fn service_without_package() {
    let definition = Definition::new("root.proto").with_element(
        Service::new("Greeter")
            .with_comment(Comment::from_lines(["Greets people.", "", "Politely."]))
            .with_rpc(
                Rpc::new("SayHello", "HelloRequest", "HelloReply")
                    .with_comment(Comment::from_lines(["Says hello.", "", "Loudly."])),
            ),
    );

    assert_eq!(
        build(&[definition]).services,
        vec![ServiceDoc {
            name: "Greeter".to_owned(),
            summary: markup("<p>Greets people.</p>\n"),
            description: markup("<p>Greets people.</p>\n<p>Politely.</p>\n"),
            methods: vec![MethodDoc {
                name: "SayHello".to_owned(),
                description: markup("<p>Says hello.</p>\n"),
                input_type: "HelloRequest".to_owned(),
                output_type: "HelloReply".to_owned(),
                client_streaming: false,
                server_streaming: false,
            }],
        }]
    );
}

#[test]
fn service_types_are_qualified() {
    let definition = Definition::new("root.proto")
        .with_element(Package::new("my.pkg"))
        .with_element(
            Service::new("Store")
                .with_rpc(Rpc::new("Get", "GetRequest", "google.protobuf.Empty"))
                .with_rpc(Rpc {
                    client_streaming: true,
                    server_streaming: true,
                    ..Rpc::new("Sync", "SyncRequest", "SyncResponse")
                }),
        );

    let model = build(&[definition]);
    let service = &model.services[0];
    assert_eq!(service.name, "my.pkg.Store");
    assert_eq!(service.description, "");
    assert_eq!(service.methods[0].input_type, "my.pkg.GetRequest");
    assert_eq!(service.methods[0].output_type, "google.protobuf.Empty");
    assert_eq!(service.methods[1].input_type, "my.pkg.SyncRequest");
    assert!(service.methods[1].client_streaming);
    assert!(service.methods[1].server_streaming);
}

#[test]
fn message_fields() {
    let definition = Definition::new("root.proto")
        .with_element(Package::new("shop"))
        .with_element(
            Message::new("Order")
                .with_comment(Comment::from_lines(["An order.", "", "Immutable once placed."]))
                .with_element(
                    Field::new("id", "uint64", 1)
                        .with_comment(Comment::from_lines(["Unique id.", "", "Never reused."])),
                )
                .with_element(Field::new("items", "Item", 2).repeated())
                .with_element(Field::new("placed", "google.protobuf.Timestamp", 15)),
        );

    assert_eq!(
        build(&[definition]).messages,
        vec![MessageDoc {
            name: "shop.Order".to_owned(),
            summary: markup("<p>An order.</p>\n"),
            description: markup("<p>An order.</p>\n<p>Immutable once placed.</p>\n"),
            fields: vec![
                FieldDoc {
                    position: 1,
                    name: "id".to_owned(),
                    description: markup("<p>Unique id.</p>\n"),
                    type_name: "uint64".to_owned(),
                    is_scalar: true,
                    is_repeated: false,
                },
                FieldDoc {
                    position: 2,
                    name: "items".to_owned(),
                    description: Markup::default(),
                    type_name: "shop.Item".to_owned(),
                    is_scalar: false,
                    is_repeated: true,
                },
                FieldDoc {
                    position: 15,
                    name: "placed".to_owned(),
                    description: Markup::default(),
                    type_name: "google.protobuf.Timestamp".to_owned(),
                    is_scalar: false,
                    is_repeated: false,
                },
            ],
        }]
    );
}

#[test]
fn non_plain_members_are_omitted() {
    let definition = Definition::new("root.proto").with_element(
        Message::new("Msg")
            .with_element(Field::new("a", "string", 1))
            .with_element(MapField {
                name: "labels".to_owned(),
                key_type: "string".to_owned(),
                value_type: "string".to_owned(),
                number: 2,
                comment: None,
            })
            .with_element(Oneof {
                name: "choice".to_owned(),
                fields: vec![Field::new("b", "int32", 3)],
                comment: None,
            })
            .with_element(Message::new("Nested").with_element(Field::new("c", "bool", 1)))
            .with_element(Enum::new("Kind").with_element(EnumField::new("K", 0)))
            .with_element(Field::new("d", "bytes", 4)),
    );

    let model = build(&[definition]);
    let names: Vec<_> = model.messages[0]
        .fields
        .iter()
        .map(|field| field.name.as_str())
        .collect();
    assert_eq!(names, ["a", "d"]);
    assert_eq!(model.messages.len(), 1);
    assert!(model.enums.is_empty());
}

#[test]
fn enum_values() {
    let definition = Definition::new("root.proto")
        .with_element(Package::new("shop"))
        .with_element(
            Enum::new("Status")
                .with_comment(Comment::parse("Order status."))
                .with_element(EnumField::new("STATUS_UNKNOWN", 0))
                .with_element(EnumElement::Reserved(vec!["STATUS_LOST".to_owned()]))
                .with_element(
                    EnumField::new("STATUS_SHIPPED", 255)
                        .with_comment(Comment::parse("On its way.")),
                ),
        );

    assert_eq!(
        build(&[definition]).enums,
        vec![EnumDoc {
            name: "shop.Status".to_owned(),
            summary: markup("<p>Order status.</p>\n"),
            description: markup("<p>Order status.</p>\n"),
            fields: vec![
                FieldDoc {
                    position: 0,
                    name: "STATUS_UNKNOWN".to_owned(),
                    ..Default::default()
                },
                FieldDoc {
                    position: 255,
                    name: "STATUS_SHIPPED".to_owned(),
                    description: markup("<p>On its way.</p>\n"),
                    ..Default::default()
                },
            ],
        }]
    );
}

#[test]
fn enum_fields_have_no_type() {
    let definition = Definition::new("root.proto")
        .with_element(Package::new("pkg"))
        .with_element(Enum::new("E").with_element(EnumField::new("string", 1)));

    let model = build(&[definition]);
    let field = &model.enums[0].fields[0];
    assert_eq!(field.type_name, "");
    assert!(!field.is_scalar);
    assert!(!field.is_repeated);
}

#[test]
fn package_applies_to_later_elements_only() {
    let definition = Definition::new("root.proto")
        .with_element(Message::new("Before"))
        .with_element(Import::new("dep.proto"))
        .with_element(Package::new("pkg"))
        .with_element(Message::new("After"));

    let names: Vec<_> = build(&[definition])
        .messages
        .into_iter()
        .map(|message| message.name)
        .collect();
    assert_eq!(names, ["Before", "pkg.After"]);
}

#[test]
fn package_does_not_leak_between_definitions() {
    let first = Definition::new("a.proto")
        .with_element(Package::new("a"))
        .with_element(Message::new("A").with_element(Field::new("b", "B", 1)));
    let second = Definition::new("b.proto")
        .with_element(Message::new("B").with_element(Field::new("a", "A", 1)));

    let model = build(&[first, second]);
    assert_eq!(model.messages.len(), 2);
    assert_eq!(model.messages[0].name, "a.A");
    assert_eq!(model.messages[0].fields[0].type_name, "a.B");
    assert_eq!(model.messages[1].name, "B");
    assert_eq!(model.messages[1].fields[0].type_name, "A");
}

#[test]
fn field_number_out_of_range() {
    let definition = Definition::new("root.proto")
        .with_element(Message::new("Msg").with_element(Field::new("big", "int32", 256)));

    let err = build_model([&definition]).unwrap_err();
    assert!(err.is_position_out_of_range());
    assert_eq!(err.position(), Some(256));
    assert!(matches!(
        err.kind(),
        ErrorKind::PositionOutOfRange {
            kind: PositionKind::Field,
            container,
            name,
            value: 256,
            ..
        } if container == "Msg" && name == "big"
    ));
    assert_eq!(
        err.to_string(),
        "field 'big' in 'Msg' has number 256, which is out of range"
    );
}

#[test]
fn negative_enum_value() {
    let definition = Definition::new("root.proto")
        .with_element(Enum::new("Sign").with_element(EnumField::new("NEGATIVE", -1)));

    let err = build_model([&definition]).unwrap_err();
    assert_eq!(err.position(), Some(-1));
    assert_eq!(
        err.to_string(),
        "enum value 'NEGATIVE' in 'Sign' has value -1, which is out of range"
    );
}

#[test]
fn failed_definition_leaves_model_unchanged() {
    let good = Definition::new("good.proto").with_element(Message::new("Good"));
    let bad = Definition::new("bad.proto")
        .with_element(Service::new("Svc"))
        .with_element(Message::new("Bad").with_element(Field::new("f", "int32", 1000)));

    let mut builder = ModelBuilder::new();
    builder.add_definition(&good).unwrap();
    assert!(builder.add_definition(&bad).is_err());
    assert_eq!(builder.model().messages.len(), 1);
    assert!(builder.model().services.is_empty());
}

#[test]
fn build_is_repeatable() {
    let definition = Definition::new("root.proto")
        .with_element(Package::new("pkg"))
        .with_element(Service::new("Svc").with_rpc(Rpc::new("M", "Req", "Resp")))
        .with_element(Message::new("Req").with_element(Field::new("x", "int32", 1)));

    let mut builder = ModelBuilder::new();
    let first = builder.add_definition(&definition).unwrap().build();
    let second = builder.add_definition(&definition).unwrap().build();
    assert_eq!(first, second);
    assert_eq!(first, build(&[definition]));
}
