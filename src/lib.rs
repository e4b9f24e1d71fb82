//! `graphql_query_builder`
//! =========
//!
//! _Path-addressed, idempotent editing of GraphQL query documents._
//!
//! The **`graphql_query_builder`** library is the engine behind point-and-click GraphQL query
//! builders, where a user ticks fields in a schema explorer and expects the query text to follow
//! along. It follows two goals:
//!
//! - To turn every click into a plain function from query text to new query text
//! - To keep that text stable, so that repeating an edit never changes anything
//!
//! Every edit addresses a field with a schema path, like `query.user.friends.name`, that leads
//! from an operation's root type through the schema's type graph. Adding a field selects all
//! fields along its path and defines variables for their required arguments, while removing the
//! last field of an operation leaves the operation behind as `query {}`, ready for the next click.
//!
//! The crate ships its own arena-allocated query AST, parser and printer, so that a document can
//! be parsed, edited and printed within a single allocation arena that's dropped after each edit.
//! Schemas are loaded from introspection results or from the GraphQL Schema Definition Language.
//!
//! [A good place to start learning more about this crate is the `editor` module...](editor)

pub mod ast;
pub mod editor;
pub mod error;
pub mod schema;

pub use bumpalo;

#[cfg(feature = "json")]
pub mod json;
