use super::{matcher, variables::*, EditResult, QueryEditor};
use crate::ast::*;
use crate::error::Result;
use crate::schema::{resolve_field_type, SchemaPath, SchemaReference};
use tracing::{debug, trace};

impl<'s> QueryEditor<'s> {
    /// Adds the field at `path` to the query, along with all fields leading up to it.
    ///
    /// Fields that have to be created are selected with all of their required arguments, each of
    /// which is passed a new variable. The variables are defined on the operation and listed in
    /// the returned [`EditResult`]. When the operation doesn't exist yet, an operation of the
    /// path's kind and the given `operation_name` is added to the query first, which is how a
    /// path without any fields, like `mutation`, adds an empty operation.
    ///
    /// Paths that the schema doesn't define, or fields that are already selected, leave the query
    /// unchanged, so adding the same field twice is safe.
    pub fn add_field(&self, query: &str, path: &str, operation_name: Option<&str>) -> EditResult {
        let path = match self.parse_path(path) {
            Some(path) => path,
            None => return EditResult::unchanged(query),
        };
        if resolve_field_type(&path, self.schema).is_none() {
            debug!(path = %path, "can't add a field the schema doesn't define");
            return EditResult::unchanged(query);
        }
        self.edit_operation(
            query,
            path.operation,
            operation_name,
            |ctx, operation, variables| self.select_path(ctx, operation, &path, variables),
        )
    }

    /// Removes the field at `path` from the query.
    ///
    /// A field whose last selection is removed keeps an empty `{}` selection set. When an
    /// operation's last field is removed, the operation stays behind as `query Name {}`, with its
    /// variables and directives removed, so that fields may be added to it again.
    pub fn remove_field(&self, query: &str, path: &str, operation_name: Option<&str>) -> String {
        let path = match self.parse_path(path) {
            Some(path) => path,
            None => return query.to_string(),
        };
        match path.segments.split_last() {
            Some((field_name, parents)) => {
                let parent = SchemaPath {
                    operation: path.operation,
                    segments: parents.to_vec(),
                };
                self.remove_fields(query, &parent, &[field_name], operation_name)
            }
            None => query.to_string(),
        }
    }

    /// Makes sure every field along `path` is selected and returns whether any had to be added.
    pub(crate) fn select_path<'a>(
        &self,
        ctx: &'a ASTContext,
        operation: &mut OperationDefinition<'a>,
        path: &SchemaPath<'_>,
        variables: &mut Vec<VariableStub>,
    ) -> Result<bool> {
        let mut schema_ref = SchemaReference::from_schema(self.schema, path.operation)?;
        let variable_definitions = &mut operation.variable_definitions;
        let mut selection_set = &mut operation.selection_set;
        let mut changed = false;
        for segment in path.segments.iter() {
            let definition = schema_ref.get_field(segment);
            schema_ref.select_field(segment)?;
            if selection_set.field(segment).is_none() {
                let mut field = Field::new_leaf(ctx, ctx.alloc_str(segment));
                if let Some(definition) = definition {
                    for argument in definition.required_arguments() {
                        let (argument, stub) = bind_variable(ctx, variable_definitions, argument);
                        field.arguments.children.push(argument);
                        variables.push(stub);
                    }
                }
                trace!(field = *segment, depth = schema_ref.depth(), "added field");
                selection_set.push(field.into());
                changed = true;
            }
            selection_set = match selection_set.field_mut(segment) {
                Some(field) => &mut field.selection_set,
                None => break,
            };
        }
        Ok(changed)
    }

    /// Removes every field in `field_names` from the selection set at `parent`.
    pub(crate) fn remove_fields(
        &self,
        query: &str,
        parent: &SchemaPath<'_>,
        field_names: &[&str],
        operation_name: Option<&str>,
    ) -> String {
        let ctx = ASTContext::new();
        let mut document = match self.parse_document(&ctx, query) {
            Some(document) => document,
            None => return query.to_string(),
        };
        let index = match document.operation_position(parent.operation, operation_name) {
            Some(index) => index,
            None => return query.to_string(),
        };
        let operation = match &mut document.definitions[index] {
            Definition::Operation(operation) => operation,
            Definition::Fragment(_) => return query.to_string(),
        };
        let selection_set =
            match matcher::find_selection_set_mut(&mut operation.selection_set, &parent.segments) {
                Some(selection_set) => selection_set,
                None => return query.to_string(),
            };

        let mut removed = false;
        for field_name in field_names {
            if selection_set.remove_field(field_name) {
                trace!(parent = %parent, field = *field_name, "removed field");
                removed = true;
            }
        }
        if !removed {
            return query.to_string();
        }

        if operation.selection_set.is_empty() {
            // The emptied operation is kept as an anchor for the next addition
            operation.variable_definitions.children.clear();
            operation.directives.children.clear();
            operation.selection_set.placeholder = true;
        } else if self.options.prune_unused_variables {
            prune_unused_variables(&mut document, index);
        }
        document.print()
    }
}

#[cfg(test)]
mod tests {
    use super::super::{tests::USER_SCHEMA, EditorOptions};
    use super::*;
    use crate::schema::Schema;
    use indoc::indoc;

    fn load(ctx: &ASTContext) -> &Schema<'_> {
        Schema::parse(ctx, include_str!("../../fixture/schema.graphql")).unwrap()
    }

    fn stub(name: &str, of_type: &str) -> VariableStub {
        VariableStub {
            name: name.to_string(),
            of_type: of_type.to_string(),
        }
    }

    #[test]
    fn add_field_with_required_arguments() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, USER_SCHEMA).unwrap();
        let editor = QueryEditor::new(schema);

        let result = editor.add_field("query {}", "query.user", None);
        assert_eq!(result.query, "query ($id: ID) {\n  user(id: $id)\n}");
        assert_eq!(result.variables, vec![stub("id", "ID")]);

        let result = editor.add_field(&result.query, "query.user.name", None);
        assert_eq!(
            result.query,
            indoc! {"
                query ($id: ID) {
                  user(id: $id) {
                    name
                  }
                }"}
        );
        assert!(result.variables.is_empty());
    }

    #[test]
    fn add_field_is_idempotent() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, USER_SCHEMA).unwrap();
        let editor = QueryEditor::new(schema);

        let first = editor.add_field("", "query.user.friends.name", None);
        let second = editor.add_field(&first.query, "query.user.friends.name", None);
        assert_eq!(first.query, second.query);
        assert_eq!(first.variables, vec![stub("id", "ID")]);
        assert!(second.variables.is_empty());

        // Unchanged text is returned as is, including its formatting
        let query = "query { user(id: 1) {name} }";
        assert_eq!(editor.add_field(query, "query.user.name", None).query, query);
    }

    #[test]
    fn add_field_suffixes_variable_names() {
        let ctx = ASTContext::new();
        let editor = QueryEditor::new(load(&ctx));

        let result = editor.add_field("", "query.user", None);
        let result = editor.add_field(&result.query, "query.node", None);
        assert_eq!(
            result.query,
            indoc! {"
                query ($id: ID, $id2: ID) {
                  user(id: $id)
                  node(id: $id2)
                }"}
        );
        assert_eq!(result.variables, vec![stub("id2", "ID")]);

        // Variables the user defined are never reused
        let result = editor.add_field("query Q($id: String) { version }", "query.user", None);
        assert_eq!(
            result.query,
            indoc! {"
                query Q($id: String, $id2: ID) {
                  version
                  user(id: $id2)
                }"}
        );
    }

    #[test]
    fn add_field_creates_operations() {
        let ctx = ASTContext::new();
        let editor = QueryEditor::new(load(&ctx));

        let result = editor.add_field("", "mutation", Some("Save"));
        assert_eq!(result.query, "mutation Save {}");
        assert_eq!(
            editor.add_field(&result.query, "mutation", Some("Save")).query,
            "mutation Save {}"
        );

        let result = editor.add_field(&result.query, "mutation.createUser", Some("Save"));
        assert_eq!(
            result.query,
            indoc! {"
                mutation Save($input: CreateUserInput) {
                  createUser(input: $input)
                }"}
        );
        assert_eq!(result.variables, vec![stub("input", "CreateUserInput")]);

        let result = editor.add_field(&result.query, "query.version", None);
        assert_eq!(
            result.query,
            indoc! {"
                mutation Save($input: CreateUserInput) {
                  createUser(input: $input)
                }

                {
                  version
                }"}
        );
    }

    #[test]
    fn add_field_to_named_operation() {
        let ctx = ASTContext::new();
        let editor = QueryEditor::new(load(&ctx));

        let query = "query A { version } query B { viewer { name } }";
        let result = editor.add_field(query, "query.viewer.email", Some("B"));
        assert_eq!(
            result.query,
            indoc! {"
                query A {
                  version
                }

                query B {
                  viewer {
                    name
                    email
                  }
                }"}
        );
    }

    #[test]
    fn add_field_recovers_from_invalid_text() {
        let ctx = ASTContext::new();
        let editor = QueryEditor::new(load(&ctx));

        let result = editor.add_field("query {", "query.version", None);
        assert_eq!(result.query, "{\n  version\n}");

        // Healing keeps as much of the text as possible
        let result = editor.add_field("{ viewer {} {} }", "query.viewer.name", None);
        assert_eq!(result.query, "{\n  viewer {\n    name\n  }\n}");

        // Text that's nested too deeply is treated like any other invalid text
        let deep = "{ a ".repeat(2000) + &"}".repeat(2000);
        assert_eq!(editor.add_field(&deep, "query.version", None).query, "{\n  version\n}");
        assert_eq!(editor.remove_field(&deep, "query.version", None), deep);
        assert!(!editor.is_field_in_query(&deep, "query.a", None));
    }

    #[test]
    fn add_field_skips_byte_order_mark() {
        let ctx = ASTContext::new();
        let editor = QueryEditor::new(load(&ctx));

        let result = editor.add_field("\u{feff}{ viewer { id } }", "query.version", None);
        assert_eq!(result.query, "{\n  viewer {\n    id\n  }\n  version\n}");
    }

    #[test]
    fn add_field_ignores_unknown_paths() {
        let ctx = ASTContext::new();
        let editor = QueryEditor::new(load(&ctx));

        let query = "{ version }";
        for path in ["query.missing", "query.search.id", "query.version.length", "user.name"] {
            let result = editor.add_field(query, path, None);
            assert_eq!(result, EditResult::unchanged(query), "{}", path);
        }
        // Known leading fields aren't selected when a later one is unknown
        let result = editor.add_field(query, "query.user.bogus", None);
        assert_eq!(result, EditResult::unchanged(query));
        // Unknown paths don't replace invalid text either
        assert_eq!(editor.add_field("query {", "query.missing", None).query, "query {");
    }

    #[test]
    fn remove_last_field_keeps_operation() {
        let ctx = ASTContext::new();
        let editor = QueryEditor::new(load(&ctx));

        assert_eq!(editor.remove_field("query { version }", "query.version", None), "query {}");
        assert_eq!(
            editor.remove_field("query Foo { version }", "query.version", None),
            "query Foo {}"
        );
        assert_eq!(
            editor.remove_field(
                "query Foo($id: ID!) @cached { user(id: $id) { name } }",
                "query.user",
                None
            ),
            "query Foo {}"
        );

        let query = "query A { version }\n\nmutation B { deleteUser(id: 1) }";
        assert_eq!(
            editor.remove_field(query, "query.version", None),
            indoc! {"
                query A {}

                mutation B {
                  deleteUser(id: 1)
                }"}
        );
    }

    #[test]
    fn remove_nested_field() {
        let ctx = ASTContext::new();
        let editor = QueryEditor::new(load(&ctx));

        let query = editor.remove_field("{ user(id: 1) { name } }", "query.user.name", None);
        assert_eq!(query, "{\n  user(id: 1) {}\n}");

        let result = editor.add_field(&query, "query.user.email", None);
        assert_eq!(result.query, "{\n  user(id: 1) {\n    email\n  }\n}");
        assert!(result.variables.is_empty());
    }

    #[test]
    fn add_then_remove_field() {
        let ctx = ASTContext::new();
        let editor = QueryEditor::new(load(&ctx));

        let path = "query.user.friends.name";
        let added = editor.add_field("{ version }", path, None);
        assert!(editor.is_field_in_query(&added.query, path, None));
        assert!(editor.is_field_in_query(&added.query, "query.version", None));

        let removed = editor.remove_field(&added.query, path, None);
        assert!(!editor.is_field_in_query(&removed, path, None));
        assert!(editor.is_field_in_query(&removed, "query.user.friends", None));
    }

    #[test]
    fn remove_missing_field() {
        let ctx = ASTContext::new();
        let editor = QueryEditor::new(load(&ctx));

        let query = "{ user(id: 1) {name} }";
        assert_eq!(editor.remove_field(query, "query.viewer", None), query);
        assert_eq!(editor.remove_field(query, "query.user.email", None), query);
        assert_eq!(editor.remove_field(query, "mutation.deleteUser", None), query);
        assert_eq!(editor.remove_field(query, "query", None), query);
        assert_eq!(editor.remove_field("query {", "query.user", None), "query {");
    }

    #[test]
    fn remove_field_prunes_variables() {
        let ctx = ASTContext::new();
        let schema = load(&ctx);
        let query =
            "query ($id: ID, $first: Int) { user(id: $id) { name } users(first: $first) { id } }";

        let editor = QueryEditor::new(schema);
        assert_eq!(
            editor.remove_field(query, "query.user", None),
            indoc! {"
                query ($id: ID, $first: Int) {
                  users(first: $first) {
                    id
                  }
                }"}
        );

        let editor = QueryEditor::with_options(
            schema,
            EditorOptions {
                prune_unused_variables: true,
                ..EditorOptions::default()
            },
        );
        assert_eq!(
            editor.remove_field(query, "query.user", None),
            indoc! {"
                query ($first: Int) {
                  users(first: $first) {
                    id
                  }
                }"}
        );
    }
}
