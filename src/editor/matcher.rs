//! Locating fields in selection sets by the field segments of a schema path.
//!
//! Only fields that are selected directly are matched. Fields inside of fragments are never
//! edited, so a path leading through a fragment is treated as a miss.

use crate::ast::*;

/// Returns the operation of the given kind and name, appending a placeholder operation to the
/// document first if it doesn't contain one yet.
///
/// The returned flag is set when the operation had to be created.
pub(crate) fn ensure_operation<'d, 'a>(
    ctx: &'a ASTContext,
    document: &'d mut Document<'a>,
    operation: OperationKind,
    name: Option<&str>,
) -> Option<(&'d mut OperationDefinition<'a>, bool)> {
    let created = document.operation_position(operation, name).is_none();
    if created {
        let name = name.map(|name| ctx.alloc_str(name));
        let placeholder = OperationDefinition::new_placeholder(&ctx.arena, operation, name);
        document.definitions.push(placeholder.into());
    }
    document
        .operation_mut(operation, name)
        .map(|definition| (definition, created))
}

/// Follows `segments` through nested selection sets and returns the one selected below the last
/// segment's field.
///
/// Without any segments the passed selection set itself is returned.
pub(crate) fn find_selection_set_mut<'d, 'a>(
    mut selection_set: &'d mut SelectionSet<'a>,
    segments: &[&str],
) -> Option<&'d mut SelectionSet<'a>> {
    for segment in segments {
        selection_set = &mut selection_set.field_mut(segment)?.selection_set;
    }
    Some(selection_set)
}

/// Returns the field at the end of `segments`.
pub(crate) fn find_field<'d, 'a>(
    mut selection_set: &'d SelectionSet<'a>,
    segments: &[&str],
) -> Option<&'d Field<'a>> {
    let (field_name, parents) = segments.split_last()?;
    for segment in parents {
        selection_set = &selection_set.field(segment)?.selection_set;
    }
    selection_set.field(field_name)
}

/// Returns the field at the end of `segments` for editing.
pub(crate) fn find_field_mut<'d, 'a>(
    selection_set: &'d mut SelectionSet<'a>,
    segments: &[&str],
) -> Option<&'d mut Field<'a>> {
    let (field_name, parents) = segments.split_last()?;
    find_selection_set_mut(selection_set, parents)?.field_mut(field_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn finds_nested_fields() {
        let ctx = ASTContext::new();
        let document = Document::parse(
            &ctx,
            "{ user(id: 1) { name friends { name } ... on User { email } } }",
        )
        .unwrap();
        let operation = document.operation(OperationKind::Query, None).unwrap();

        let field = find_field(&operation.selection_set, &["user", "friends"]).unwrap();
        assert_eq!(field.name, "friends");
        assert!(find_field(&operation.selection_set, &["user", "friends", "name"]).is_some());
        assert!(find_field(&operation.selection_set, &["user", "email"]).is_none());
        assert!(find_field(&operation.selection_set, &["name"]).is_none());
        assert!(find_field(&operation.selection_set, &[]).is_none());
    }

    #[test]
    fn edits_nested_fields() {
        let ctx = ASTContext::new();
        let mut document = Document::parse_owned(&ctx, "{ user { friends { name } } }").unwrap();
        let operation = document.operation_mut(OperationKind::Query, None).unwrap();

        let friends =
            find_selection_set_mut(&mut operation.selection_set, &["user", "friends"]).unwrap();
        assert!(friends.remove_field("name"));

        let user = find_field_mut(&mut operation.selection_set, &["user"]).unwrap();
        user.selection_set.push(Field::new_leaf(&ctx, "id").into());
        assert!(find_selection_set_mut(&mut operation.selection_set, &["missing"]).is_none());

        assert_eq!(
            document.print(),
            indoc! {"
                {
                  user {
                    friends {}
                    id
                  }
                }"}
        );
    }

    #[test]
    fn creates_missing_operations() {
        let ctx = ASTContext::new();
        let mut document = Document::parse_owned(&ctx, "query A { a }").unwrap();

        let (operation, created) =
            ensure_operation(&ctx, &mut document, OperationKind::Query, None).unwrap();
        assert!(!created);
        assert_eq!(operation.name.map(|name| name.name), Some("A"));

        let (operation, created) =
            ensure_operation(&ctx, &mut document, OperationKind::Mutation, Some("Save")).unwrap();
        assert!(created);
        assert!(operation.selection_set.is_placeholder());

        let (_, created) =
            ensure_operation(&ctx, &mut document, OperationKind::Mutation, Some("Save")).unwrap();
        assert!(!created);
        assert_eq!(document.print(), "query A {\n  a\n}\n\nmutation Save {}");
    }
}
