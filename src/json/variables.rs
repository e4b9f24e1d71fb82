use serde_json::{json, map::Map as JSMap, Value as JSValue};

use crate::ast::*;
use crate::editor::VariableStub;
use crate::error::{Error, Result};
use crate::schema::{Schema, SchemaType, TypeRef};

fn default_for_named<'s>(
    schema: &'s Schema<'s>,
    name: &str,
    visited: &mut Vec<&'s str>,
) -> JSValue {
    match name {
        "Int" | "Float" => return json!(0),
        "Boolean" => return JSValue::Bool(false),
        "String" | "ID" => return JSValue::String(String::new()),
        _ => {}
    }
    match schema.get_type(name) {
        Some(SchemaType::Scalar(_)) => JSValue::String(String::new()),
        Some(SchemaType::Enum(schema_enum)) => schema_enum
            .values
            .first()
            .map_or(JSValue::Null, |value| JSValue::String(value.to_string())),
        Some(SchemaType::InputObject(input)) => {
            // Required fields may refer back to an input object that's being filled in
            if visited.contains(&input.name) {
                return JSValue::Null;
            }
            visited.push(input.name);
            let mut object = JSMap::new();
            for field in input.fields.iter() {
                if field.input_type.is_non_null() {
                    let value = default_for_type_ref(schema, field.input_type, visited);
                    object.insert(field.name.to_string(), value);
                }
            }
            visited.pop();
            JSValue::Object(object)
        }
        _ => JSValue::Null,
    }
}

fn default_for_type_ref<'s>(
    schema: &'s Schema<'s>,
    of_type: &TypeRef<'_>,
    visited: &mut Vec<&'s str>,
) -> JSValue {
    match of_type {
        TypeRef::NonNullType(of_type) => default_for_type_ref(schema, of_type, visited),
        TypeRef::ListType(_) => JSValue::Array(Vec::new()),
        TypeRef::Type(name) => default_for_named(schema, name, visited),
    }
}

fn default_for_type<'s>(schema: &'s Schema<'s>, of_type: &Type<'_>) -> JSValue {
    match of_type {
        Type::NonNullType(of_type) => default_for_type(schema, of_type),
        Type::ListType(_) => JSValue::Array(Vec::new()),
        Type::NamedType(named) => default_for_named(schema, named.name, &mut Vec::new()),
    }
}

/// Returns the value that a variable of the given type starts out with in a variables buffer.
///
/// The type is passed as written in a variable definition, e.g. `[ID!]` or `CreateUserInput!`.
/// Scalars start out empty, as `""`, `0` or `false`, enums as their first value and lists as
/// `[]`. Input objects are filled in with defaults for their required fields. Types the schema
/// doesn't know start out as `null`.
///
/// ```
/// use graphql_query_builder::{ast::ASTContext, json::default_value_for_type, schema::Schema};
/// use serde_json::json;
///
/// let ctx = ASTContext::new();
/// let schema = Schema::parse(&ctx, "type Query { a: Int } enum Role { ADMIN USER }").unwrap();
/// assert_eq!(default_value_for_type(schema, "ID!").unwrap(), json!(""));
/// assert_eq!(default_value_for_type(schema, "Role").unwrap(), json!("ADMIN"));
/// assert_eq!(default_value_for_type(schema, "[Int]").unwrap(), json!([]));
/// ```
pub fn default_value_for_type<'s>(schema: &'s Schema<'s>, type_text: &str) -> Result<JSValue> {
    let ctx = ASTContext::new();
    let of_type = Type::parse(&ctx, type_text)?;
    Ok(default_for_type(schema, of_type))
}

/// Adds a default value for every variable stub that the variables object doesn't contain yet.
///
/// Values that are already present are never replaced, so the same stubs may be merged twice.
pub fn merge_variable_stubs<'s>(
    variables: &mut JSMap<String, JSValue>,
    stubs: &[VariableStub],
    schema: &'s Schema<'s>,
) -> Result<()> {
    for stub in stubs {
        if !variables.contains_key(&stub.name) {
            let value = default_value_for_type(schema, &stub.of_type)?;
            variables.insert(stub.name.clone(), value);
        }
    }
    Ok(())
}

/// Merges variable stubs into the text of a variables buffer and returns the new, pretty-printed
/// text. Empty text is treated as an empty object.
pub fn merge_variable_stubs_into_text<'s>(
    text: &str,
    stubs: &[VariableStub],
    schema: &'s Schema<'s>,
) -> Result<String> {
    let mut variables = if text.trim().is_empty() {
        JSMap::new()
    } else {
        match serde_json::from_str::<JSValue>(text) {
            Ok(JSValue::Object(variables)) => variables,
            Ok(_) => {
                return Err(Error::new(
                    "Variables expected but received non-object value",
                    None,
                ))
            }
            Err(error) => {
                return Err(Error::new(format!("Invalid variables JSON: {}", error), None))
            }
        }
    };
    merge_variable_stubs(&mut variables, stubs, schema)?;
    serde_json::to_string_pretty(&JSValue::Object(variables))
        .map_err(|error| Error::new(format!("Invalid variables JSON: {}", error), None))
}
