//! Generate documentation from protobuf schema definitions.
//!
//! The crate turns one or more parsed schema files ([`schema::Definition`]) into a flat
//! [`DocModel`] describing their services, messages and enums, with type references qualified
//! against each file's package and comments converted to HTML paragraphs. The model can then be
//! rendered with [`render_html()`], or serialized and handed to any other renderer.
//!
//! # Examples
//!
//! Building a model from a hand-written definition:
//!
//! ```
//! use protodoc::schema::{Comment, Definition, Field, Message, Package};
//!
//! let definition = Definition::new("user.proto")
//!     .with_element(Package::new("acme.user"))
//!     .with_element(
//!         Message::new("User")
//!             .with_comment(Comment::from_lines(["A registered user.", "", "Users are never deleted."]))
//!             .with_element(Field::new("id", "uint64", 1))
//!             .with_element(Field::new("groups", "Group", 2).repeated()),
//!     );
//!
//! let model = protodoc::build_model([&definition])?;
//! let user = &model.messages[0];
//! assert_eq!(user.name, "acme.user.User");
//! assert_eq!(user.summary.as_str(), "<p>A registered user.</p>\n");
//! assert_eq!(user.fields[0].type_name, "uint64");
//! assert!(user.fields[0].is_scalar);
//! assert_eq!(user.fields[1].type_name, "acme.user.Group");
//! assert!(user.fields[1].is_repeated);
//! # Ok::<(), protodoc::Error>(())
//! ```
//!
//! Definitions are usually obtained from a compiled file descriptor, for example one produced by
//! [`protox`](https://crates.io/crates/protox) with source info enabled:
//!
//! ```
//! # use prost_types::FileDescriptorProto;
//! # use protodoc::schema::Definition;
//! # let file = FileDescriptorProto::default();
//! let definition = Definition::from_file_descriptor(&file);
//! let html = protodoc::generate_doc([&definition], &protodoc::RenderOptions::default())?;
//! # Ok::<(), protodoc::Error>(())
//! ```
//!
//! ### Error messages
//!
//! The only error raised while building a model is a field number or enum value which does not
//! fit in the range `0..=255`. Errors implement [`miette::Diagnostic`].
#![warn(missing_debug_implementations, missing_docs)]
#![deny(unsafe_code)]
#![doc(html_root_url = "https://docs.rs/protodoc/0.1.0/")]

pub mod comment;
pub mod model;
pub mod names;
pub mod schema;

mod error;
mod generate;
#[cfg(feature = "render")]
mod render;

pub use prost_types;

pub use self::comment::{Comment, CommentMode, Markup};
pub use self::error::Error;
pub use self::generate::{build_model, ModelBuilder};
pub use self::model::{DocModel, EnumDoc, FieldDoc, MessageDoc, MethodDoc, ServiceDoc};
#[cfg(feature = "render")]
pub use self::render::{generate_doc, render_html, RenderOptions, DEFAULT_STYLE, DEFAULT_TITLE};
