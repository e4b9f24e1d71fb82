use super::matcher::find_field;
use super::QueryEditor;
use crate::ast::*;
use crate::schema::resolve_field_type;
use tracing::debug;

impl<'s> QueryEditor<'s> {
    /// Checks whether the field at `path` is selected in the query.
    ///
    /// Only fields that are selected directly count, since fields inside of fragments can't be
    /// edited. A path without any fields checks whether the operation exists.
    pub fn is_field_in_query(&self, query: &str, path: &str, operation_name: Option<&str>) -> bool {
        let path = match self.parse_path(path) {
            Some(path) => path,
            None => return false,
        };
        let ctx = ASTContext::new();
        let document = match self.parse_document(&ctx, query) {
            Some(document) => document,
            None => return false,
        };
        match document.operation(path.operation, operation_name) {
            Some(operation) => {
                path.is_root() || find_field(&operation.selection_set, &path.segments).is_some()
            }
            None => false,
        }
    }

    /// Checks whether the field at `path` is selected and receives the argument `argument_name`.
    pub fn is_argument_in_query(
        &self,
        query: &str,
        path: &str,
        argument_name: &str,
        operation_name: Option<&str>,
    ) -> bool {
        let path = match self.parse_path(path) {
            Some(path) if !path.is_root() => path,
            _ => return false,
        };
        let ctx = ASTContext::new();
        let document = match self.parse_document(&ctx, query) {
            Some(document) => document,
            None => return false,
        };
        document
            .operation(path.operation, operation_name)
            .and_then(|operation| find_field(&operation.selection_set, &path.segments))
            .map_or(false, |field| field.arguments.get(argument_name).is_some())
    }

    /// Checks whether every field that the type at `path` defines is selected below `path`.
    ///
    /// Paths that don't resolve to a type with fields are never complete.
    pub fn are_all_fields_in_query(
        &self,
        query: &str,
        path: &str,
        operation_name: Option<&str>,
    ) -> bool {
        let path = match self.parse_path(path) {
            Some(path) => path,
            None => return false,
        };
        let fields = match resolve_field_type(&path, self.schema).and_then(|ty| ty.fields()) {
            Some(fields) => fields,
            None => {
                debug!(path = %path, "path doesn't resolve to a type with fields");
                return false;
            }
        };
        let ctx = ASTContext::new();
        let document = match self.parse_document(&ctx, query) {
            Some(document) => document,
            None => return false,
        };
        let operation = match document.operation(path.operation, operation_name) {
            Some(operation) => operation,
            None => return false,
        };
        let selection_set = &operation.selection_set;
        fields
            .iter()
            .all(|field| find_field(selection_set, &path.child(field.name).segments).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;
    use indoc::indoc;

    fn load(ctx: &ASTContext) -> &Schema<'_> {
        Schema::parse(ctx, include_str!("../../fixture/schema.graphql")).unwrap()
    }

    #[test]
    fn finds_selected_fields() {
        let ctx = ASTContext::new();
        let editor = QueryEditor::new(load(&ctx));

        let query = "{ user(id: 1) { name ... on User { email } friends { name } } }";
        assert!(editor.is_field_in_query(query, "query.user", None));
        assert!(editor.is_field_in_query(query, "query.user.name", None));
        assert!(editor.is_field_in_query(query, "query.user.friends.name", None));
        assert!(!editor.is_field_in_query(query, "query.name", None));
        assert!(!editor.is_field_in_query(query, "query.user.role", None));
        assert!(!editor.is_field_in_query(query, "query.user.name.name", None));

        assert!(editor.is_field_in_query(query, "query", None));
        assert!(!editor.is_field_in_query(query, "mutation", None));
        assert!(!editor.is_field_in_query(query, "mutation.createUser", None));
        assert!(!editor.is_field_in_query("query {", "query", None));
    }

    #[test]
    fn ignores_fragments() {
        let ctx = ASTContext::new();
        let editor = QueryEditor::new(load(&ctx));

        let query = "{ viewer { ...Viewer } } fragment Viewer on User { name }";
        assert!(editor.is_field_in_query(query, "query.viewer", None));
        assert!(!editor.is_field_in_query(query, "query.viewer.name", None));

        let query = "{ users { id ... on User { email } } }";
        assert!(editor.is_field_in_query(query, "query.users.id", None));
        assert!(!editor.is_field_in_query(query, "query.users.email", None));
    }

    #[test]
    fn agrees_with_edits_around_inline_fragments() {
        let ctx = ASTContext::new();
        let editor = QueryEditor::new(load(&ctx));

        let query = "{ users { id ... on User { email } } }";
        let added = editor.add_field(query, "query.users.email", None).query;
        assert!(editor.is_field_in_query(&added, "query.users.email", None));

        let removed = editor.remove_field(&added, "query.users.email", None);
        assert!(!editor.is_field_in_query(&removed, "query.users.email", None));
        assert_eq!(
            removed,
            indoc! {"
                {
                  users {
                    id
                    ... on User {
                      email
                    }
                  }
                }"}
        );
    }

    #[test]
    fn checks_named_operations() {
        let ctx = ASTContext::new();
        let editor = QueryEditor::new(load(&ctx));

        let query = "query A { version } query B { viewer { name } }";
        assert!(editor.is_field_in_query(query, "query.viewer", Some("B")));
        assert!(!editor.is_field_in_query(query, "query.viewer", Some("A")));
        assert!(!editor.is_field_in_query(query, "query.viewer", None));
        assert!(!editor.is_field_in_query(query, "query.version", Some("C")));
    }

    #[test]
    fn finds_arguments() {
        let ctx = ASTContext::new();
        let editor = QueryEditor::new(load(&ctx));

        let query = "query ($first: Int) { users(first: $first) { friends(first: 2) { id } } }";
        assert!(editor.is_argument_in_query(query, "query.users", "first", None));
        assert!(editor.is_argument_in_query(query, "query.users.friends", "first", None));
        assert!(!editor.is_argument_in_query(query, "query.users", "after", None));
        assert!(!editor.is_argument_in_query(query, "query.viewer", "first", None));
        assert!(!editor.is_argument_in_query(query, "query", "first", None));
    }

    #[test]
    fn checks_all_fields() {
        let ctx = ASTContext::new();
        let editor = QueryEditor::new(load(&ctx));

        let query = "{ viewer { profile { bio avatar(size: 64) } } }";
        assert!(editor.are_all_fields_in_query(query, "query.viewer.profile", None));
        assert!(!editor.are_all_fields_in_query(query, "query.viewer", None));
        assert!(!editor.are_all_fields_in_query(query, "query.viewer.profile.bio", None));
        assert!(!editor.are_all_fields_in_query(query, "query.missing", None));
    }
}
