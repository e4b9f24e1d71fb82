//! # Using Schema Definitions
//!
//! The `graphql_query_builder::schema` module contains utilities to create a client-side GraphQL
//! Schema, either from introspection data or from schema definition language text. The schema is
//! then used to resolve [SchemaPath]s, which address fields by the names that lead to them from an
//! operation's root type.
//!
//! The [BuildClientSchema] trait may be used to convert introspection data into a usable [Schema],
//! while [Schema::parse] reads the schema definition language:
//!
//! ```
//! use graphql_query_builder::{ast::ASTContext, schema::*};
//!
//! let ctx = ASTContext::new();
//!
//! let introspection_json = include_str!("../../fixture/introspection_query.json");
//! let introspection: IntrospectionQuery = serde_json::from_str(introspection_json).unwrap();
//! let schema = introspection.build_client_schema(&ctx);
//!
//! let path = SchemaPath::parse("query.user.friends").unwrap();
//! let friends = resolve_field_type(&path, schema).unwrap();
//! assert_eq!(friends.name(), "User");
//!
//! let schema = Schema::parse(&ctx, "type Query { version: String! }").unwrap();
//! let version = resolve_field(&SchemaPath::parse("query.version").unwrap(), schema).unwrap();
//! assert_eq!(version.output_type.to_string(), "String!");
//! ```
//!
//! [More information on the Schema struct.](Schema)

pub mod build_client_schema;
pub mod introspection;
#[allow(clippy::module_inception)]
pub mod schema;
mod schema_path;
mod schema_reference;
mod sdl;
mod walk;

pub use build_client_schema::BuildClientSchema;
pub use introspection::{IntrospectionQuery, IntrospectionSchema};
pub use schema::*;
pub use schema_path::SchemaPath;
pub use schema_reference::*;
pub use walk::{resolve_field, resolve_field_type};
