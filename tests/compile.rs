use std::fs;

use protodoc::{build_model, generate_doc, schema::Definition, DocModel, RenderOptions};

fn compile(files: &[(&str, &str)]) -> Vec<Definition> {
    let tempdir = tempfile::tempdir().unwrap();
    for (name, source) in files {
        fs::write(tempdir.path().join(name), source).unwrap();
    }

    let mut compiler = protox::Compiler::new([tempdir.path()]).unwrap();
    compiler.include_source_info(true);
    for (name, _) in files {
        compiler.open_file(tempdir.path().join(name)).unwrap();
    }

    Definition::from_file_descriptor_set(&compiler.file_descriptor_set())
}

fn model(files: &[(&str, &str)]) -> DocModel {
    build_model(&compile(files)).unwrap()
}

const GREETER: &str = r#"
syntax = "proto3";

// Greeting API.
package greet.v1;

// A friendly service.
//
// It never says goodbye.
service Greeter {
    // Says hello.
    rpc SayHello(HelloRequest) returns (HelloReply);
    // Streams greetings.
    rpc Stream(stream HelloRequest) returns (stream HelloReply);
}

// The request.
message HelloRequest {
    // Who to greet.
    string name = 1;
    repeated Mood moods = 2;
    map<string, string> labels = 3;
    oneof choice {
        int32 count = 4;
        bool forever = 5;
    }
    optional string note = 6;
}

message HelloReply {
    string message = 1;
}

// How the caller feels.
enum Mood {
    MOOD_UNSPECIFIED = 0;
    // Very happy.
    MOOD_HAPPY = 1;
}
"#;

#[test]
fn greeter() {
    let model = model(&[("greeter.proto", GREETER)]);

    assert_eq!(model.services.len(), 1);
    let service = &model.services[0];
    assert_eq!(service.name, "greet.v1.Greeter");
    assert_eq!(service.summary, "<p>A friendly service.</p>\n");
    assert_eq!(
        service.description,
        "<p>A friendly service.</p>\n<p>It never says goodbye.</p>\n"
    );

    let methods: Vec<_> = service
        .methods
        .iter()
        .map(|method| {
            (
                method.name.as_str(),
                method.input_type.as_str(),
                method.output_type.as_str(),
                method.client_streaming,
                method.server_streaming,
            )
        })
        .collect();
    assert_eq!(
        methods,
        [
            (
                "SayHello",
                "greet.v1.HelloRequest",
                "greet.v1.HelloReply",
                false,
                false
            ),
            (
                "Stream",
                "greet.v1.HelloRequest",
                "greet.v1.HelloReply",
                true,
                true
            ),
        ]
    );
    assert_eq!(service.methods[0].description, "<p>Says hello.</p>\n");

    let names: Vec<_> = model.messages.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["greet.v1.HelloRequest", "greet.v1.HelloReply"]);

    let request = &model.messages[0];
    assert_eq!(request.description, "<p>The request.</p>\n");
    let fields: Vec<_> = request
        .fields
        .iter()
        .map(|field| {
            (
                field.position,
                field.name.as_str(),
                field.type_name.as_str(),
                field.is_scalar,
                field.is_repeated,
            )
        })
        .collect();
    assert_eq!(
        fields,
        [
            (1, "name", "string", true, false),
            (2, "moods", "greet.v1.Mood", false, true),
            (6, "note", "string", true, false),
        ]
    );
    assert_eq!(request.fields[0].description, "<p>Who to greet.</p>\n");

    assert_eq!(model.enums.len(), 1);
    let mood = &model.enums[0];
    assert_eq!(mood.name, "greet.v1.Mood");
    assert_eq!(mood.description, "<p>How the caller feels.</p>\n");
    assert_eq!(mood.fields.len(), 2);
    assert_eq!(mood.fields[1].position, 1);
    assert_eq!(mood.fields[1].name, "MOOD_HAPPY");
    assert_eq!(mood.fields[1].description, "<p>Very happy.</p>\n");
    assert_eq!(mood.fields[1].type_name, "");
}

#[test]
fn multiple_files() {
    let model = model(&[
        (
            "a.proto",
            "syntax = 'proto3'; package a; message A { int64 x = 1; }",
        ),
        (
            "b.proto",
            "syntax = 'proto3'; import 'a.proto'; message B { a.A a = 1; }",
        ),
    ]);

    let names: Vec<_> = model.messages.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["a.A", "B"]);
    assert_eq!(model.messages[1].fields[0].type_name, "a.A");
}

#[test]
fn field_number_too_large() {
    let definitions = compile(&[(
        "big.proto",
        "syntax = 'proto3'; message Big { string s = 1000; }",
    )]);

    let err = build_model(&definitions).unwrap_err();
    assert!(err.is_position_out_of_range());
    assert_eq!(err.position(), Some(1000));
}

#[test]
fn render_page() {
    let definitions = compile(&[("greeter.proto", GREETER)]);
    let html = generate_doc(&definitions, &RenderOptions::default().title("Greeter")).unwrap();

    assert!(html.contains("<title>Greeter</title>"));
    assert!(html.contains("id=\"greet.v1.Greeter\""));
    assert!(html.contains("<p>It never says goodbye.</p>"));
    assert!(html.contains("href=\"#greet.v1.Mood\""));
}

#[test]
fn block_comments() {
    let model = model(&[(
        "doc.proto",
        "syntax = 'proto3';\n\n/**\n * First para\n * continues.\n *\n * Second para.\n */\nmessage Doc {\n  /** The body. */\n  string body = 1;\n}\n",
    )]);

    let message = &model.messages[0];
    assert_eq!(message.summary, "<p>First para continues.</p>\n");
    assert_eq!(
        message.description,
        "<p>First para continues.</p>\n<p>Second para.</p>\n"
    );
    assert_eq!(message.fields[0].description, "<p>The body.</p>\n");
}

#[test]
fn package_after_message() {
    let model = model(&[(
        "late.proto",
        "syntax = 'proto3'; message A { B b = 1; } package p; message B { A a = 1; }",
    )]);

    let names: Vec<_> = model.messages.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["p.A", "p.B"]);
    assert_eq!(model.messages[0].fields[0].type_name, "p.B");
    assert_eq!(model.messages[1].fields[0].type_name, "p.A");
}
