use crate::ast::*;
use crate::schema::SchemaInputField;
use hashbrown::HashSet;
use tracing::trace;

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

/// A variable that an edit has added to an operation.
///
/// Stubs are returned so that a caller may add a default value for each new variable to the
/// variables it sends along with the query.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
#[cfg_attr(feature = "json", derive(Deserialize, Serialize))]
pub struct VariableStub {
    /// The variable's name, without its `$` prefix.
    pub name: String,
    /// The variable's type, as written in its definition, e.g. `[ID!]`.
    #[cfg_attr(feature = "json", serde(rename = "type"))]
    pub of_type: String,
}

/// Returns `name` if no variable of that name is defined yet, and otherwise the first of `name2`,
/// `name3`, and so on that's still free.
pub(crate) fn unique_variable_name<'a>(
    ctx: &'a ASTContext,
    variable_definitions: &VariableDefinitions<'a>,
    name: &str,
) -> &'a str {
    if variable_definitions.get(name).is_none() {
        return ctx.alloc_str(name);
    }
    let mut suffix = 2;
    loop {
        let candidate = format!("{}{}", name, suffix);
        if variable_definitions.get(&candidate).is_none() {
            return ctx.alloc_string(candidate);
        }
        suffix += 1;
    }
}

/// Defines a new variable for a schema argument and returns an argument that passes it on.
///
/// The variable is named after the argument and typed as the argument's nullable type, since
/// the variables that are sent along with a query are filled in later.
pub(crate) fn bind_variable<'a>(
    ctx: &'a ASTContext,
    variable_definitions: &mut VariableDefinitions<'a>,
    argument: &SchemaInputField<'_>,
) -> (Argument<'a>, VariableStub) {
    let name = unique_variable_name(ctx, variable_definitions, argument.name);
    let of_type = argument.input_type.nullable();
    variable_definitions.children.push(VariableDefinition {
        variable: Variable { name },
        of_type: of_type.to_ast_type(ctx),
        default_value: Value::Null,
        directives: Directives::default_in(&ctx.arena),
    });
    trace!(variable = name, of_type = %of_type, "defined variable");

    let argument = Argument {
        name: ctx.alloc_str(argument.name),
        value: Value::Variable(Variable { name }),
    };
    let stub = VariableStub {
        name: name.to_string(),
        of_type: of_type.to_string(),
    };
    (argument, stub)
}

fn collect_from_arguments<'a>(arguments: &Arguments<'a>, used: &mut HashSet<&'a str>) {
    for argument in arguments.children.iter() {
        argument.value.for_each_variable(&mut |name| {
            used.insert(name);
        });
    }
}

fn collect_from_directives<'a>(directives: &Directives<'a>, used: &mut HashSet<&'a str>) {
    for directive in directives.children.iter() {
        collect_from_arguments(&directive.arguments, used);
    }
}

fn collect_from_selection_set<'a>(selection_set: &SelectionSet<'a>, used: &mut HashSet<&'a str>) {
    for selection in selection_set.selections.iter() {
        match selection {
            Selection::Field(field) => {
                collect_from_arguments(&field.arguments, used);
                collect_from_directives(&field.directives, used);
                collect_from_selection_set(&field.selection_set, used);
            }
            Selection::FragmentSpread(spread) => collect_from_directives(&spread.directives, used),
            Selection::InlineFragment(fragment) => {
                collect_from_directives(&fragment.directives, used);
                collect_from_selection_set(&fragment.selection_set, used);
            }
        }
    }
}

/// Removes the definitions of variables that the operation at `index` no longer uses.
///
/// Variables used inside of any fragment definition are kept, since the operation may spread
/// those fragments.
pub(crate) fn prune_unused_variables(document: &mut Document<'_>, index: usize) {
    let mut used = HashSet::new();
    for (position, definition) in document.definitions.iter().enumerate() {
        match definition {
            Definition::Operation(operation) if position == index => {
                collect_from_directives(&operation.directives, &mut used);
                collect_from_selection_set(&operation.selection_set, &mut used);
            }
            Definition::Operation(_) => {}
            Definition::Fragment(fragment) => {
                collect_from_directives(&fragment.directives, &mut used);
                collect_from_selection_set(&fragment.selection_set, &mut used);
            }
        }
    }

    if let Some(Definition::Operation(operation)) = document.definitions.get_mut(index) {
        operation.variable_definitions.children.retain(|var_def| {
            let is_used = used.contains(var_def.variable.name);
            if !is_used {
                trace!(variable = var_def.variable.name, "removed unused variable");
            }
            is_used
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TypeRef;

    #[test]
    fn suffixes_taken_names() {
        let ctx = ASTContext::new();
        let operation =
            OperationDefinition::parse(&ctx, "query ($id: ID, $id2: ID, $id4: ID) { a }").unwrap();
        let var_defs = &operation.variable_definitions;
        assert_eq!(unique_variable_name(&ctx, var_defs, "first"), "first");
        assert_eq!(unique_variable_name(&ctx, var_defs, "id"), "id3");
    }

    #[test]
    fn binds_nullable_variables() {
        let ctx = ASTContext::new();
        let id = TypeRef::Type("ID");
        let non_null_id = TypeRef::NonNullType(&id);
        let list = TypeRef::ListType(&non_null_id);
        let input_type = TypeRef::NonNullType(&list);
        let argument = SchemaInputField::new("ids", &input_type);

        let mut var_defs = VariableDefinitions::default_in(&ctx.arena);
        let (first, stub) = bind_variable(&ctx, &mut var_defs, &argument);
        assert_eq!(first.print(), "ids: $ids");
        assert_eq!(
            stub,
            VariableStub {
                name: "ids".to_string(),
                of_type: "[ID!]".to_string(),
            }
        );

        let (second, stub) = bind_variable(&ctx, &mut var_defs, &argument);
        assert_eq!(second.print(), "ids: $ids2");
        assert_eq!(stub.name, "ids2");
        assert_eq!(var_defs.print(), "($ids: [ID!], $ids2: [ID!])");
    }

    #[test]
    fn prunes_only_unused_variables() {
        let ctx = ASTContext::new();
        let mut document = Document::parse_owned(
            &ctx,
            "query ($a: ID, $b: ID, $c: ID, $d: Boolean) { x(id: $a) { ...F } y @include(if: $d) }
            fragment F on X { z(id: $c) }",
        )
        .unwrap();
        prune_unused_variables(&mut document, 0);
        let operation = document.operation(OperationKind::Query, None).unwrap();
        let names = operation
            .variable_definitions
            .children
            .iter()
            .map(|var_def| var_def.variable.name)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["a", "c", "d"]);
    }
}
