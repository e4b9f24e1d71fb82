use super::{EditResult, QueryEditor, VariableStub, VisitedTypes};
use crate::ast::*;
use crate::error::Result;
use crate::schema::{resolve_field_type, OutputType, SchemaField, SchemaPath, SchemaType};
use tracing::{debug, trace};

impl<'s> QueryEditor<'s> {
    fn fields_below(&self, path: &SchemaPath<'_>) -> Option<&'s [&'s SchemaField<'s>]> {
        let fields =
            resolve_field_type(path, self.schema).and_then(|output_type| output_type.fields());
        if fields.is_none() {
            debug!(path = %path, "path doesn't resolve to a type with fields");
        }
        fields
    }

    fn add_fields_where<F>(
        &self,
        query: &str,
        path: &str,
        operation_name: Option<&str>,
        filter: F,
    ) -> EditResult
    where
        F: Fn(&SchemaField<'s>) -> bool,
    {
        let path = match self.parse_path(path) {
            Some(path) => path,
            None => return EditResult::unchanged(query),
        };
        let fields = match self.fields_below(&path) {
            Some(fields) => fields,
            None => return EditResult::unchanged(query),
        };
        self.edit_operation(query, path.operation, operation_name, |ctx, operation, variables| {
            let mut changed = false;
            for field in fields.iter().filter(|&&field| filter(field)) {
                changed |= self.select_path(ctx, operation, &path.child(field.name), variables)?;
            }
            Ok(changed)
        })
    }

    /// Selects every field of the type at `path`, as if [`QueryEditor::add_field`] was called for
    /// each of them.
    pub fn add_all_fields(
        &self,
        query: &str,
        path: &str,
        operation_name: Option<&str>,
    ) -> EditResult {
        self.add_fields_where(query, path, operation_name, |_| true)
    }

    /// Selects every field of the type at `path` that returns a scalar, possibly wrapped in lists
    /// or non-null types. Fields returning enums aren't considered scalar fields.
    pub fn add_all_scalar_fields(
        &self,
        query: &str,
        path: &str,
        operation_name: Option<&str>,
    ) -> EditResult {
        self.add_fields_where(query, path, operation_name, |field| {
            matches!(self.schema.get_type(field.output_type.name()), Some(SchemaType::Scalar(_)))
        })
    }

    /// Selects every field of the type at `path` and keeps descending into the fields' types, up
    /// to [`EditorOptions::recursion_depth`](super::EditorOptions) levels below `path`.
    ///
    /// Each type is only expanded once along a branch, so cycles in the schema end in a leaf
    /// field. Whether a type expanded below one field is expanded again below its siblings is
    /// decided by [`EditorOptions::visited_types`](super::EditorOptions).
    pub fn add_all_fields_recursively(
        &self,
        query: &str,
        path: &str,
        operation_name: Option<&str>,
    ) -> EditResult {
        let path = match self.parse_path(path) {
            Some(path) => path,
            None => return EditResult::unchanged(query),
        };
        let output_type = match resolve_field_type(&path, self.schema) {
            Some(output_type) if output_type.fields().is_some() => output_type,
            _ => {
                debug!(path = %path, "path doesn't resolve to a type with fields");
                return EditResult::unchanged(query);
            }
        };
        self.edit_operation(query, path.operation, operation_name, |ctx, operation, variables| {
            let depth = self.options.max_depth();
            let visited = &mut Vec::new();
            self.select_recursively(ctx, operation, &path, output_type, depth, visited, variables)
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn select_recursively<'a>(
        &self,
        ctx: &'a ASTContext,
        operation: &mut OperationDefinition<'a>,
        path: &SchemaPath<'_>,
        output_type: OutputType<'s>,
        depth: usize,
        visited: &mut Vec<&'s str>,
        variables: &mut Vec<VariableStub>,
    ) -> Result<bool> {
        let fields = match output_type.fields() {
            Some(fields) if depth > 0 => fields,
            _ => return Ok(false),
        };
        visited.push(output_type.name());

        let mut changed = false;
        for field in fields.iter() {
            let field_path = path.child(field.name);
            changed |= self.select_path(ctx, operation, &field_path, variables)?;

            let field_type = match self
                .schema
                .get_type(field.output_type.name())
                .and_then(|schema_type| schema_type.output_type())
            {
                Some(field_type) if field_type.fields().is_some() => field_type,
                _ => continue,
            };
            if depth == 1 {
                trace!(path = %field_path, "reached maximum depth");
                continue;
            }
            if visited.contains(&field_type.name()) {
                trace!(path = %field_path, type_name = field_type.name(), "type already expanded");
                continue;
            }

            changed |= match self.options.visited_types {
                VisitedTypes::Shared => self.select_recursively(
                    ctx,
                    operation,
                    &field_path,
                    field_type,
                    depth - 1,
                    visited,
                    variables,
                )?,
                VisitedTypes::PerBranch => {
                    let mut branch = visited.clone();
                    self.select_recursively(
                        ctx,
                        operation,
                        &field_path,
                        field_type,
                        depth - 1,
                        &mut branch,
                        variables,
                    )?
                }
            };
        }
        Ok(changed)
    }

    /// Removes every field that the type at `path` defines from the selection set at `path`.
    ///
    /// This is the same as calling [`QueryEditor::remove_field`] for each field, so a field's
    /// selection set ends up as `{}` and an operation is kept as an empty anchor.
    pub fn remove_all_fields(
        &self,
        query: &str,
        path: &str,
        operation_name: Option<&str>,
    ) -> String {
        let path = match self.parse_path(path) {
            Some(path) => path,
            None => return query.to_string(),
        };
        let field_names = match self.fields_below(&path) {
            Some(fields) => fields.iter().map(|field| field.name).collect::<Vec<_>>(),
            None => return query.to_string(),
        };
        self.remove_fields(query, &path, &field_names, operation_name)
    }
}

#[cfg(test)]
mod tests {
    use super::super::EditorOptions;
    use super::*;
    use crate::schema::Schema;
    use indoc::indoc;

    const CYCLIC_SCHEMA: &str = "
        type Query { a: A }
        type A { name: String b: B c: C }
        type B { name: String c: C a: A }
        type C { name: String }
    ";

    fn load(ctx: &ASTContext) -> &Schema<'_> {
        Schema::parse(ctx, include_str!("../../fixture/schema.graphql")).unwrap()
    }

    #[test]
    fn add_all_fields_of_type() {
        let ctx = ASTContext::new();
        let editor = QueryEditor::new(load(&ctx));

        let result = editor.add_all_fields("query {}", "query.users", None);
        assert_eq!(
            result.query,
            indoc! {"
                {
                  users {
                    id
                    name
                    email
                    role
                    createdAt
                    friends
                    posts
                    profile
                  }
                }"}
        );
        assert!(!result.has_variables());
        assert!(editor.are_all_fields_in_query(&result.query, "query.users", None));

        let again = editor.add_all_fields(&result.query, "query.users", None);
        assert_eq!(again, EditResult::unchanged(&result.query));
    }

    #[test]
    fn add_all_fields_binds_arguments() {
        let ctx = ASTContext::new();
        let editor = QueryEditor::new(load(&ctx));

        let result = editor.add_all_fields("", "query.viewer.profile", None);
        assert_eq!(
            result.query,
            indoc! {"
                query ($size: Int) {
                  viewer {
                    profile {
                      bio
                      avatar(size: $size)
                    }
                  }
                }"}
        );
        assert_eq!(result.variables.len(), 1);
        assert_eq!(result.variables[0].of_type, "Int");
    }

    #[test]
    fn add_all_scalar_fields_skips_other_types() {
        let ctx = ASTContext::new();
        let editor = QueryEditor::new(load(&ctx));

        let result = editor.add_all_scalar_fields("{ users { name } }", "query.users", None);
        assert_eq!(
            result.query,
            indoc! {"
                {
                  users {
                    name
                    id
                    email
                    createdAt
                  }
                }"}
        );
        assert!(!editor.are_all_fields_in_query(&result.query, "query.users", None));

        let query = "{ version }";
        assert_eq!(editor.add_all_scalar_fields(query, "query.version", None).query, query);
        assert_eq!(editor.add_all_scalar_fields(query, "query.search", None).query, query);
    }

    #[test]
    fn add_fields_recursively_with_shared_visited_types() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, CYCLIC_SCHEMA).unwrap();
        let editor = QueryEditor::new(schema);

        let result = editor.add_all_fields_recursively("query {}", "query.a", None);
        assert_eq!(
            result.query,
            indoc! {"
                {
                  a {
                    name
                    b {
                      name
                      c {
                        name
                      }
                      a
                    }
                    c
                  }
                }"}
        );
    }

    #[test]
    fn add_fields_recursively_per_branch() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, CYCLIC_SCHEMA).unwrap();
        let options = EditorOptions {
            visited_types: VisitedTypes::PerBranch,
            ..EditorOptions::default()
        };

        let editor = QueryEditor::with_options(schema, options);
        let result = editor.add_all_fields_recursively("", "query.a", None);
        assert_eq!(
            result.query,
            indoc! {"
                {
                  a {
                    name
                    b {
                      name
                      c {
                        name
                      }
                      a
                    }
                    c {
                      name
                    }
                  }
                }"}
        );
    }

    #[test]
    fn add_fields_recursively_up_to_depth() {
        let ctx = ASTContext::new();
        let mut source = String::from("type Query { t1: T1 }");
        for level in 1..8 {
            source.push_str(&format!(" type T{} {{ v: Int next: T{} }}", level, level + 1));
        }
        source.push_str(" type T8 { v: Int }");
        let schema = Schema::parse(&ctx, source).unwrap();

        let editor = QueryEditor::new(schema);
        let query = editor.add_all_fields_recursively("", "query.t1", None).query;
        let sixth = format!("query.t1{}", ".next".repeat(5));
        assert!(editor.is_field_in_query(&query, &format!("{}.v", sixth), None));
        assert!(editor.is_field_in_query(&query, &format!("{}.next", sixth), None));
        assert!(!editor.is_field_in_query(&query, &format!("{}.next.v", sixth), None));

        let options = EditorOptions {
            recursion_depth: 1,
            ..EditorOptions::default()
        };
        let editor = QueryEditor::with_options(schema, options);
        let result = editor.add_all_fields_recursively("", "query.t1", None);
        assert_eq!(result.query, "{\n  t1 {\n    v\n    next\n  }\n}");
    }

    #[test]
    fn remove_all_fields_of_type() {
        let ctx = ASTContext::new();
        let editor = QueryEditor::new(load(&ctx));

        let query = "{ version users { id name ... on User { email } } }";
        assert_eq!(
            editor.remove_all_fields(query, "query.users", None),
            indoc! {"
                {
                  version
                  users {
                    ... on User {
                      email
                    }
                  }
                }"}
        );
        assert_eq!(editor.remove_all_fields(query, "query", None), "query {}");
        assert_eq!(editor.remove_all_fields(query, "query.viewer", None), query);
        assert_eq!(editor.remove_all_fields(query, "query.version", None), query);
    }
}
