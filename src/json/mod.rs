//! # Variables Buffer Helpers
//!
//! The `graphql_query_builder::json` module contains utilities for the JSON variables that are sent
//! along with a query. Edits that add fields with required arguments define new variables and
//! return a [`VariableStub`](crate::editor::VariableStub) for each of them; these helpers turn
//! those stubs into starting values using `serde_json`.
//!
//! - [default_value_for_type] returns the starting value for a variable's type.
//! - [merge_variable_stubs] adds starting values to a variables object for any new stubs.
//! - [merge_variable_stubs_into_text] does the same for the text of a variables buffer.

#[cfg(feature = "json")]
extern crate serde_json;

#[cfg(feature = "json")]
extern crate serde;

mod variables;

pub use variables::*;
