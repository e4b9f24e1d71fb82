use super::{matcher, variables::*, EditResult, QueryEditor};
use crate::ast::*;
use crate::error::{Error, ErrorType};
use crate::schema::resolve_field;
use tracing::{debug, trace};

impl<'s> QueryEditor<'s> {
    /// Passes a new variable to the argument `argument_name` of the field at `path`.
    ///
    /// The field is selected first, as with [`QueryEditor::add_field`], so adding an argument to
    /// a field that isn't in the query yet adds the field too. An argument that the field already
    /// receives, with any value, is left alone.
    pub fn add_argument(
        &self,
        query: &str,
        path: &str,
        argument_name: &str,
        operation_name: Option<&str>,
    ) -> EditResult {
        let path = match self.parse_path(path) {
            Some(path) => path,
            None => return EditResult::unchanged(query),
        };
        let definition = match resolve_field(&path, self.schema)
            .and_then(|field| field.get_argument(argument_name))
        {
            Some(definition) => definition,
            None => {
                debug!(path = %path, argument = argument_name, "can't add an unknown argument");
                return EditResult::unchanged(query);
            }
        };

        self.edit_operation(query, path.operation, operation_name, |ctx, operation, variables| {
            let mut changed = self.select_path(ctx, operation, &path, variables)?;
            let field = matcher::find_field_mut(&mut operation.selection_set, &path.segments)
                .ok_or_else(|| {
                    Error::new("Field is not selected directly.", Some(ErrorType::Path))
                })?;
            if field.arguments.get(argument_name).is_none() {
                let (argument, stub) =
                    bind_variable(ctx, &mut operation.variable_definitions, definition);
                field.arguments.children.push(argument);
                variables.push(stub);
                trace!(path = %path, argument = argument_name, "added argument");
                changed = true;
            }
            Ok(changed)
        })
    }

    /// Removes the argument `argument_name` from the field at `path`.
    ///
    /// The variable that was passed to the argument stays defined, unless
    /// [`EditorOptions::prune_unused_variables`](super::EditorOptions) is set.
    pub fn remove_argument(
        &self,
        query: &str,
        path: &str,
        argument_name: &str,
        operation_name: Option<&str>,
    ) -> String {
        let path = match self.parse_path(path) {
            Some(path) => path,
            None => return query.to_string(),
        };
        let ctx = ASTContext::new();
        let mut document = match self.parse_document(&ctx, query) {
            Some(document) => document,
            None => return query.to_string(),
        };
        let index = match document.operation_position(path.operation, operation_name) {
            Some(index) => index,
            None => return query.to_string(),
        };

        let removed = match &mut document.definitions[index] {
            Definition::Operation(operation) => {
                matcher::find_field_mut(&mut operation.selection_set, &path.segments)
                    .map_or(false, |field| field.arguments.remove(argument_name))
            }
            Definition::Fragment(_) => false,
        };
        if !removed {
            return query.to_string();
        }
        trace!(path = %path, argument = argument_name, "removed argument");

        if self.options.prune_unused_variables {
            prune_unused_variables(&mut document, index);
        }
        document.print()
    }
}

#[cfg(test)]
mod tests {
    use super::super::EditorOptions;
    use super::*;
    use crate::schema::Schema;
    use indoc::indoc;

    fn load(ctx: &ASTContext) -> &Schema<'_> {
        Schema::parse(ctx, include_str!("../../fixture/schema.graphql")).unwrap()
    }

    #[test]
    fn add_optional_argument() {
        let ctx = ASTContext::new();
        let editor = QueryEditor::new(load(&ctx));

        let result = editor.add_argument("{ users { id } }", "query.users", "first", None);
        assert_eq!(
            result.query,
            indoc! {"
                query ($first: Int) {
                  users(first: $first) {
                    id
                  }
                }"}
        );
        assert_eq!(result.variables.len(), 1);
        assert_eq!(result.variables[0].name, "first");
        assert_eq!(result.variables[0].of_type, "Int");

        let again = editor.add_argument(&result.query, "query.users", "first", None);
        assert_eq!(again, EditResult::unchanged(&result.query));

        // Arguments with literal values count as present
        let query = "{ users(first: 5) { id } }";
        assert_eq!(editor.add_argument(query, "query.users", "first", None).query, query);
    }

    #[test]
    fn add_argument_selects_field() {
        let ctx = ASTContext::new();
        let editor = QueryEditor::new(load(&ctx));

        let result = editor.add_argument("query {}", "query.user.friends", "first", None);
        assert_eq!(
            result.query,
            indoc! {"
                query ($id: ID, $first: Int) {
                  user(id: $id) {
                    friends(first: $first)
                  }
                }"}
        );
        let names = result.variables.iter().map(|v| v.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["id", "first"]);

        // Required arguments are already passed when the field is created
        let result = editor.add_argument("", "query.user", "id", None);
        assert_eq!(result.query, "query ($id: ID) {\n  user(id: $id)\n}");
        assert_eq!(result.variables.len(), 1);
    }

    #[test]
    fn add_unknown_argument() {
        let ctx = ASTContext::new();
        let editor = QueryEditor::new(load(&ctx));

        let query = "{ users { id } }";
        assert_eq!(editor.add_argument(query, "query.users", "last", None).query, query);
        assert_eq!(editor.add_argument(query, "query.missing", "first", None).query, query);
        assert_eq!(editor.add_argument(query, "query", "first", None).query, query);
    }

    #[test]
    fn remove_argument_keeps_variables() {
        let ctx = ASTContext::new();
        let query = "query ($first: Int) { users(first: $first) { id } }";

        let editor = QueryEditor::new(load(&ctx));
        assert_eq!(
            editor.remove_argument(query, "query.users", "first", None),
            indoc! {"
                query ($first: Int) {
                  users {
                    id
                  }
                }"}
        );
        assert_eq!(editor.remove_argument(query, "query.users", "after", None), query);
        assert_eq!(editor.remove_argument(query, "query.viewer", "first", None), query);

        let editor = QueryEditor::with_options(
            load(&ctx),
            EditorOptions {
                prune_unused_variables: true,
                ..EditorOptions::default()
            },
        );
        assert_eq!(
            editor.remove_argument(query, "query.users", "first", None),
            "{\n  users {\n    id\n  }\n}"
        );
    }
}
