use crate::{
    ast::OperationKind,
    error::{Error, ErrorType, Result},
};

use super::{OutputType, Schema, SchemaField, SchemaObject};

/// Schema Reference
///
/// A stateful traverser that follows the fields of a schema path from an operation's root type.
/// Every selected field pushes the type it returns, so that the current pointer is always the type
/// whose fields the next path segment is looked up on.
#[derive(Clone)]
pub struct SchemaReference<'a> {
    output_stack: Vec<OutputType<'a>>,
    pointer: OutputType<'a>,
    schema: &'a Schema<'a>,
}

impl<'a> SchemaReference<'a> {
    /// Create a schema reference pointer from a given [SchemaObject] type to start from.
    #[inline]
    pub fn from_object_type(schema: &'a Schema<'a>, object: &'a SchemaObject<'a>) -> Self {
        SchemaReference {
            schema,
            output_stack: Vec::with_capacity(8),
            pointer: OutputType::Object(object),
        }
    }

    /// Create a schema reference pointer from a schema and selected root operation kind.
    #[inline]
    pub fn from_schema(schema: &'a Schema<'a>, operation_kind: OperationKind) -> Result<Self> {
        let root_type = schema.get_root_type(operation_kind).ok_or_else(|| {
            Error::new(
                "Schema does not support selected root operation type.",
                Some(ErrorType::Path),
            )
        })?;
        Ok(SchemaReference::from_object_type(schema, root_type))
    }

    #[inline(always)]
    fn push_pointer(&mut self, pointer: OutputType<'a>) {
        self.output_stack.push(self.pointer);
        self.pointer = pointer;
    }

    /// Resolves a named type that's known to be an output type.
    #[inline]
    fn resolve(&self, type_name: &str) -> Option<OutputType<'a>> {
        self.schema
            .get_type(type_name)
            .and_then(|schema_type| schema_type.output_type())
    }

    /// Returns the current pointer's referenced [OutputType].
    #[inline]
    pub fn output_type(&self) -> OutputType<'a> {
        self.pointer
    }

    /// Returns how many types have been entered since the starting type.
    #[inline]
    pub fn depth(&self) -> usize {
        self.output_stack.len()
    }

    /// Returns a field, if possible, on the current [OutputType].
    #[inline]
    pub fn get_field(&self, field_name: &str) -> Option<&'a SchemaField<'a>> {
        self.pointer.field(field_name)
    }

    /// Traverse deeper by selecting a field on the current [OutputType] and return the next
    /// [OutputType].
    #[inline]
    pub fn select_field(&mut self, field_name: &str) -> Result<OutputType<'a>> {
        if self.pointer.fields().is_none() {
            return Err(Error::new(
                "Cannot select fields on non-object/interface type.",
                Some(ErrorType::Path),
            ));
        }
        let field = self.get_field(field_name).ok_or_else(|| {
            Error::new(
                format!(
                    "Cannot select unknown field \"{}\" on \"{}\".",
                    field_name,
                    self.pointer.name()
                ),
                Some(ErrorType::Path),
            )
        })?;
        let output_type = self.resolve(field.output_type.name()).ok_or_else(|| {
            Error::new(
                format!(
                    "Field \"{}\" returns unknown type \"{}\".",
                    field_name,
                    field.output_type.name()
                ),
                Some(ErrorType::Path),
            )
        })?;
        self.push_pointer(output_type);
        Ok(output_type)
    }
}

#[cfg(test)]
mod tests {
    use super::super::{BuildClientSchema, IntrospectionQuery};
    use super::*;
    use crate::ast::ASTContext;

    fn load(ctx: &ASTContext) -> &Schema<'_> {
        let introspection_json = include_str!("../../fixture/introspection_query.json");
        let introspection: IntrospectionQuery = serde_json::from_str(introspection_json).unwrap();
        introspection.build_client_schema(ctx)
    }

    #[test]
    fn walk_schema() {
        let ctx = ASTContext::new();
        let schema = load(&ctx);

        let mut schema_ref = SchemaReference::from_schema(schema, OperationKind::Query).unwrap();
        assert_eq!(schema_ref.output_type().name(), "Query");
        assert_eq!(schema_ref.depth(), 0);

        let user_type = schema_ref.select_field("users").unwrap();
        assert_eq!(user_type.name(), "User");

        let post_type = schema_ref.select_field("posts").unwrap();
        assert_eq!(post_type.name(), "Post");
        assert_eq!(schema_ref.depth(), 2);
        assert!(schema_ref.get_field("author").is_some());
    }

    #[test]
    fn select_unknown_or_leaf_fields() {
        let ctx = ASTContext::new();
        let schema = load(&ctx);

        let mut schema_ref = SchemaReference::from_schema(schema, OperationKind::Query).unwrap();
        let error = schema_ref.select_field("missing").unwrap_err();
        assert_eq!(error.error_type(), ErrorType::Path);
        assert_eq!(schema_ref.output_type().name(), "Query");

        assert_eq!(schema_ref.select_field("version").unwrap().name(), "String");
        assert!(schema_ref.select_field("length").is_err());
        assert!(schema_ref.get_field("length").is_none());
        assert_eq!(schema_ref.depth(), 1);
    }

    #[test]
    fn abstract_types() {
        let ctx = ASTContext::new();
        let schema = load(&ctx);

        let mut schema_ref = SchemaReference::from_schema(schema, OperationKind::Query).unwrap();
        assert_eq!(schema_ref.select_field("node").unwrap().name(), "Node");
        assert!(schema_ref.get_field("id").is_some());

        let mut schema_ref = SchemaReference::from_schema(schema, OperationKind::Query).unwrap();
        assert_eq!(schema_ref.select_field("search").unwrap().name(), "SearchResult");
        assert!(schema_ref.select_field("id").is_err());
    }

    #[test]
    fn unsupported_root_types() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, "type Query { a: Int }").unwrap();
        assert!(SchemaReference::from_schema(schema, OperationKind::Query).is_ok());
        let error = SchemaReference::from_schema(schema, OperationKind::Mutation).err().unwrap();
        assert_eq!(error.error_type(), ErrorType::Path);
    }
}
