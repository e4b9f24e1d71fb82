//! Resolution of [SchemaPath]s against a [Schema].
//!
//! Both functions walk from the root type of the path's operation kind through every field
//! segment, unwrapping list and non-null wrappers of each field's type on the way down.

use super::{OutputType, Schema, SchemaField, SchemaPath, SchemaReference};
use crate::error::Result;
use tracing::debug;

fn walk_to_parent<'a>(
    path: &SchemaPath<'_>,
    schema: &'a Schema<'a>,
) -> Result<SchemaReference<'a>> {
    let mut schema_ref = SchemaReference::from_schema(schema, path.operation)?;
    if let Some((_, parents)) = path.segments.split_last() {
        for segment in parents {
            schema_ref.select_field(segment)?;
        }
    }
    Ok(schema_ref)
}

/// Resolves the type that the field at `path` returns.
///
/// A path without field segments resolves to the root type of its operation kind. When the root
/// type or any field along the path is unknown, `None` is returned.
pub fn resolve_field_type<'a>(
    path: &SchemaPath<'_>,
    schema: &'a Schema<'a>,
) -> Option<OutputType<'a>> {
    let resolved = walk_to_parent(path, schema).and_then(|mut schema_ref| {
        match path.field_name() {
            Some(field_name) => schema_ref.select_field(field_name),
            None => Ok(schema_ref.output_type()),
        }
    });
    match resolved {
        Ok(output_type) => Some(output_type),
        Err(error) => {
            debug!(path = %path, error = %error, "path does not resolve");
            None
        }
    }
}

/// Resolves the definition of the field at `path`, including its arguments.
///
/// A path without field segments doesn't address any field and resolves to `None`.
pub fn resolve_field<'a>(
    path: &SchemaPath<'_>,
    schema: &'a Schema<'a>,
) -> Option<&'a SchemaField<'a>> {
    let field_name = path.field_name()?;
    match walk_to_parent(path, schema) {
        Ok(schema_ref) => schema_ref.get_field(field_name),
        Err(error) => {
            debug!(path = %path, error = %error, "path does not resolve");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ASTContext, OperationKind};
    use crate::schema::{BuildClientSchema, IntrospectionQuery};

    fn load(ctx: &ASTContext) -> &Schema<'_> {
        let introspection_json = include_str!("../../fixture/introspection_query.json");
        let introspection: IntrospectionQuery = serde_json::from_str(introspection_json).unwrap();
        introspection.build_client_schema(ctx)
    }

    fn path(path: &str) -> SchemaPath<'_> {
        SchemaPath::parse(path).unwrap()
    }

    #[test]
    fn resolves_types_through_wrappers() {
        let ctx = ASTContext::new();
        let schema = load(&ctx);

        let resolve = |p: &str| resolve_field_type(&path(p), schema).map(|t| t.name());
        assert_eq!(resolve("query"), Some("Query"));
        assert_eq!(resolve("mutation"), Some("Mutation"));
        assert_eq!(resolve("query.users"), Some("User"));
        assert_eq!(resolve("query.users.friends.posts"), Some("Post"));
        assert_eq!(resolve("query.users.name"), Some("String"));
        assert_eq!(resolve("query.search"), Some("SearchResult"));
        assert_eq!(resolve("query.node.id"), Some("ID"));
    }

    #[test]
    fn misses_resolve_to_none() {
        let ctx = ASTContext::new();
        let schema = load(&ctx);

        assert!(resolve_field_type(&path("query.missing"), schema).is_none());
        assert!(resolve_field_type(&path("query.users.missing.name"), schema).is_none());
        assert!(resolve_field_type(&path("query.users.name.length"), schema).is_none());
        // Union members can't be selected without a fragment
        assert!(resolve_field_type(&path("query.search.id"), schema).is_none());
    }

    #[test]
    fn missing_root_type() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, "type Query { version: String }").unwrap();
        assert!(resolve_field_type(&SchemaPath::root(OperationKind::Mutation), schema).is_none());
        assert!(resolve_field(&path("mutation.version"), schema).is_none());
    }

    #[test]
    fn resolves_field_definitions() {
        let ctx = ASTContext::new();
        let schema = load(&ctx);

        assert!(resolve_field(&path("query"), schema).is_none());

        let field = resolve_field(&path("query.user"), schema).unwrap();
        assert_eq!(field.name, "user");
        assert_eq!(field.output_type.to_string(), "User");
        let arguments = field.arguments.iter().map(|arg| arg.name).collect::<Vec<_>>();
        assert_eq!(arguments, vec!["id"]);

        let field = resolve_field(&path("query.user.friends"), schema).unwrap();
        assert_eq!(field.output_type.to_string(), "[User]");

        assert!(resolve_field(&path("query.user.missing"), schema).is_none());
        assert!(resolve_field(&path("query.missing.name"), schema).is_none());
    }
}
