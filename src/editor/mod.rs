//! # Editing Query Documents
//!
//! The `graphql_query_builder::editor` module contains the [`QueryEditor`], which edits query text
//! the way a point-and-click query builder does. Every edit addresses a field by a
//! [`SchemaPath`], like `query.user.friends`, which names an operation kind followed by the
//! fields leading from that operation's root type to the field.
//!
//! Edits are plain functions from query text to new query text. They parse the text, change the
//! document, and print it again:
//!
//! - Additions create missing fields along the path and define variables for their required
//!   arguments. They return an [`EditResult`] that lists the new variables.
//! - Removals drop fields or arguments and return the new text.
//! - Presence checks tell whether a field or argument is already selected.
//!
//! Edits are idempotent and never fail. Text that doesn't parse is replaced by a new operation
//! when something is added to it, while a path that doesn't exist in the schema turns an edit
//! into a no-op that returns the query text unchanged.
//!
//! ```
//! use graphql_query_builder::{ast::ASTContext, editor::*, schema::Schema};
//!
//! let ctx = ASTContext::new();
//! let schema = Schema::parse(
//!     &ctx,
//!     "type Query { user(id: ID!): User } type User { name: String friends: [User] }",
//! )
//! .unwrap();
//! let editor = QueryEditor::new(schema);
//!
//! let result = editor.add_field("query {}", "query.user.name", None);
//! assert_eq!(result.query, "query ($id: ID) {\n  user(id: $id) {\n    name\n  }\n}");
//! assert_eq!(result.variables[0].name, "id");
//! assert!(editor.is_field_in_query(&result.query, "query.user.name", None));
//!
//! let query = editor.remove_field(&result.query, "query.user", None);
//! assert_eq!(query, "query {}");
//! ```

use crate::ast::{
    ASTContext, DefaultIn, Document, OperationDefinition, OperationKind, ParseNode, PrintNode,
};
use crate::error::Result;
use crate::schema::Schema;
use tracing::debug;

mod argument;
mod bulk;
mod field;
mod heal;
mod matcher;
mod options;
mod presence;
mod variables;

pub use crate::schema::SchemaPath;
pub use heal::heal;
pub use options::{EditorOptions, VisitedTypes, MAX_RECURSION_DEPTH};
pub use variables::VariableStub;

/// The outcome of an edit that may add variables to an operation.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct EditResult {
    /// The edited query text.
    pub query: String,
    /// The variables that the edit defined, in the order they were added.
    pub variables: Vec<VariableStub>,
}

impl EditResult {
    /// Creates a result for an edit that didn't change anything.
    #[inline]
    pub fn unchanged(query: &str) -> Self {
        EditResult {
            query: query.to_string(),
            variables: Vec::new(),
        }
    }

    /// Checks whether the edit defined any new variables.
    #[inline]
    pub fn has_variables(&self) -> bool {
        !self.variables.is_empty()
    }
}

/// Edits query text against a schema.
///
/// The editor only borrows the schema and holds no other state, so it's cheap to copy and a
/// single editor may be shared for any number of edits.
#[derive(Clone, Copy)]
pub struct QueryEditor<'s> {
    schema: &'s Schema<'s>,
    options: EditorOptions,
}

impl<'s> QueryEditor<'s> {
    /// Creates an editor for a schema using the default [`EditorOptions`].
    #[inline]
    pub fn new(schema: &'s Schema<'s>) -> Self {
        Self::with_options(schema, EditorOptions::default())
    }

    /// Creates an editor for a schema with the given options.
    #[inline]
    pub fn with_options(schema: &'s Schema<'s>, options: EditorOptions) -> Self {
        QueryEditor { schema, options }
    }

    /// Returns the schema that edits are checked against.
    #[inline]
    pub fn schema(&self) -> &'s Schema<'s> {
        self.schema
    }

    /// Returns the options this editor was created with.
    #[inline]
    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub(crate) fn parse_path<'p>(&self, path: &'p str) -> Option<SchemaPath<'p>> {
        match SchemaPath::parse(path) {
            Ok(path) => Some(path),
            Err(error) => {
                debug!(error = %error, "invalid schema path");
                None
            }
        }
    }

    /// Parses query text, and if that fails and healing is enabled, parses it again with its
    /// empty blocks removed.
    pub(crate) fn parse_document<'a>(
        &self,
        ctx: &'a ASTContext,
        query: &str,
    ) -> Option<Document<'a>> {
        let error = match Document::parse_owned(ctx, query) {
            Ok(document) => return Some(document),
            Err(error) => error,
        };
        if self.options.heal_fallback {
            let healed = heal(query);
            if healed != query {
                if let Ok(document) = Document::parse_owned(ctx, &*healed) {
                    debug!(error = %error, "parsed query text after healing it");
                    return Some(document);
                }
            }
        }
        debug!(error = %error, "query text doesn't parse");
        None
    }

    /// Applies an edit to the operation of the given kind and name, which is created first if
    /// needed.
    ///
    /// Unparsable text is replaced by an empty document. The edit reports whether it changed the
    /// operation and, when neither it nor the operation's creation changed anything, or when it
    /// fails, the original text is returned.
    pub(crate) fn edit_operation<F>(
        &self,
        query: &str,
        operation: OperationKind,
        operation_name: Option<&str>,
        edit: F,
    ) -> EditResult
    where
        F: for<'a> FnOnce(
            &'a ASTContext,
            &mut OperationDefinition<'a>,
            &mut Vec<VariableStub>,
        ) -> Result<bool>,
    {
        let ctx = ASTContext::new();
        let mut document = self
            .parse_document(&ctx, query)
            .unwrap_or_else(|| Document::default_in(&ctx.arena));
        let (definition, created) =
            match matcher::ensure_operation(&ctx, &mut document, operation, operation_name) {
                Some(found) => found,
                None => return EditResult::unchanged(query),
            };

        let mut variables = Vec::new();
        match edit(&ctx, definition, &mut variables) {
            Ok(changed) if changed || created => EditResult {
                query: document.print(),
                variables,
            },
            Ok(_) => EditResult::unchanged(query),
            Err(error) => {
                debug!(error = %error, "edit didn't apply");
                EditResult::unchanged(query)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const USER_SCHEMA: &str =
        "type Query { user(id: ID!): User } type User { name: String friends: [User] }";

    #[test]
    fn parses_or_heals_documents() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, USER_SCHEMA).unwrap();
        let editor = QueryEditor::new(schema);

        let query_ctx = ASTContext::new();
        assert!(editor.parse_document(&query_ctx, "query {}").is_some());
        assert!(editor.parse_document(&query_ctx, "").is_some());
        // A stray `{}` after a selection doesn't parse, until it's healed away
        let document = editor.parse_document(&query_ctx, "{ user {} {} }").unwrap();
        assert_eq!(document.print(), "{\n  user\n}");
        assert!(editor.parse_document(&query_ctx, "query {").is_none());

        let editor = QueryEditor::with_options(
            schema,
            EditorOptions {
                heal_fallback: false,
                ..EditorOptions::default()
            },
        );
        assert!(editor.parse_document(&query_ctx, "{ user {} {} }").is_none());
    }

    #[test]
    fn paths_must_name_an_operation() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, USER_SCHEMA).unwrap();
        let editor = QueryEditor::new(schema);
        assert!(editor.parse_path("query.user").is_some());
        assert!(editor.parse_path("user.name").is_none());
    }
}
