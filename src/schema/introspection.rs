//! Types mirroring the JSON result of a standard introspection query.
//!
//! Only what a client schema needs is kept: type names, fields with their arguments and types,
//! enum values, input fields and the relationships between abstract and object types. Anything
//! else in the result, like descriptions or deprecations, is skipped while deserializing.
#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

/// The `data` of an introspection query's result.
#[derive(Debug)]
#[cfg_attr(feature = "json", derive(Deserialize, Serialize))]
pub struct IntrospectionQuery<'a> {
    #[cfg_attr(feature = "json", serde(rename = "__schema", borrow))]
    pub schema: IntrospectionSchema<'a>,
}

#[derive(Debug, Default)]
#[cfg_attr(feature = "json", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "camelCase"))]
pub struct IntrospectionSchema<'a> {
    #[cfg_attr(feature = "json", serde(borrow))]
    pub query_type: Option<IntrospectionTypeName<'a>>,
    #[cfg_attr(feature = "json", serde(borrow))]
    pub mutation_type: Option<IntrospectionTypeName<'a>>,
    #[cfg_attr(feature = "json", serde(borrow))]
    pub subscription_type: Option<IntrospectionTypeName<'a>>,
    #[cfg_attr(feature = "json", serde(borrow))]
    pub types: Vec<IntrospectionType<'a>>,
}

/// Any object in the result that's only referenced for its name, like root types, interfaces,
/// possible types and enum values.
#[derive(Debug)]
#[cfg_attr(feature = "json", derive(Deserialize, Serialize))]
pub struct IntrospectionTypeName<'a> {
    #[cfg_attr(feature = "json", serde(borrow))]
    pub name: &'a str,
}

/// A named type of the introspected schema, tagged by its `kind`.
#[derive(Debug)]
#[cfg_attr(feature = "json", derive(Deserialize, Serialize))]
#[cfg_attr(
    feature = "json",
    serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum IntrospectionType<'a> {
    #[cfg_attr(feature = "json", serde(borrow))]
    Scalar(IntrospectionTypeName<'a>),
    Object(IntrospectionCompositeType<'a>),
    Interface(IntrospectionCompositeType<'a>),
    Union(IntrospectionCompositeType<'a>),
    Enum(IntrospectionEnumType<'a>),
    InputObject(IntrospectionInputObjectType<'a>),
}

impl<'a> IntrospectionType<'a> {
    #[inline]
    pub fn name(&self) -> &'a str {
        match self {
            IntrospectionType::Scalar(scalar) => scalar.name,
            IntrospectionType::Object(composite)
            | IntrospectionType::Interface(composite)
            | IntrospectionType::Union(composite) => composite.name,
            IntrospectionType::Enum(enum_type) => enum_type.name,
            IntrospectionType::InputObject(input) => input.name,
        }
    }
}

/// An object, interface or union type.
///
/// Introspection returns `null` for the lists that don't apply to a kind, e.g. `fields` on unions
/// or `possibleTypes` on objects, so all of them are optional.
#[derive(Debug)]
#[cfg_attr(feature = "json", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "camelCase"))]
pub struct IntrospectionCompositeType<'a> {
    #[cfg_attr(feature = "json", serde(borrow))]
    pub name: &'a str,
    #[cfg_attr(feature = "json", serde(borrow, default))]
    pub fields: Option<Vec<IntrospectionField<'a>>>,
    #[cfg_attr(feature = "json", serde(borrow, default))]
    pub interfaces: Option<Vec<IntrospectionTypeName<'a>>>,
    #[cfg_attr(feature = "json", serde(borrow, default))]
    pub possible_types: Option<Vec<IntrospectionTypeName<'a>>>,
}

#[derive(Debug)]
#[cfg_attr(feature = "json", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "camelCase"))]
pub struct IntrospectionEnumType<'a> {
    #[cfg_attr(feature = "json", serde(borrow))]
    pub name: &'a str,
    #[cfg_attr(feature = "json", serde(borrow))]
    pub enum_values: Vec<IntrospectionTypeName<'a>>,
}

#[derive(Debug)]
#[cfg_attr(feature = "json", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "camelCase"))]
pub struct IntrospectionInputObjectType<'a> {
    #[cfg_attr(feature = "json", serde(borrow))]
    pub name: &'a str,
    #[cfg_attr(feature = "json", serde(borrow))]
    pub input_fields: Vec<IntrospectionInputValue<'a>>,
}

#[derive(Debug)]
#[cfg_attr(feature = "json", derive(Deserialize, Serialize))]
pub struct IntrospectionField<'a> {
    #[cfg_attr(feature = "json", serde(borrow))]
    pub name: &'a str,
    #[cfg_attr(feature = "json", serde(borrow))]
    pub args: Vec<IntrospectionInputValue<'a>>,
    #[cfg_attr(feature = "json", serde(rename = "type", borrow))]
    pub of_type: IntrospectionTypeRef<'a>,
}

/// An argument or an input object's field.
#[derive(Debug)]
#[cfg_attr(feature = "json", derive(Deserialize, Serialize))]
pub struct IntrospectionInputValue<'a> {
    #[cfg_attr(feature = "json", serde(borrow))]
    pub name: &'a str,
    #[cfg_attr(feature = "json", serde(rename = "type", borrow))]
    pub of_type: IntrospectionTypeRef<'a>,
}

/// A type reference as introspection nests it, e.g. `[ID!]` arrives as a `LIST` wrapping a
/// `NON_NULL` wrapping the named `SCALAR` type `ID`.
///
/// Wrappers carry no name and named types carry no `ofType`.
#[derive(Debug)]
#[cfg_attr(feature = "json", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "camelCase"))]
pub struct IntrospectionTypeRef<'a> {
    #[cfg_attr(feature = "json", serde(borrow))]
    pub kind: &'a str,
    #[cfg_attr(feature = "json", serde(borrow, default))]
    pub name: Option<&'a str>,
    #[cfg_attr(feature = "json", serde(borrow, default))]
    pub of_type: Option<Box<IntrospectionTypeRef<'a>>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_type_refs() {
        let json = r#"{
            "kind": "LIST",
            "name": null,
            "ofType": { "kind": "NON_NULL", "ofType": { "kind": "SCALAR", "name": "ID" } }
        }"#;
        let type_ref: IntrospectionTypeRef = serde_json::from_str(json).unwrap();
        assert_eq!(type_ref.kind, "LIST");
        assert!(type_ref.name.is_none());
        let inner = type_ref.of_type.unwrap().of_type.unwrap();
        assert_eq!((inner.kind, inner.name), ("SCALAR", Some("ID")));
    }

    #[test]
    fn deserializes_composite_types() {
        let json = r#"[
            {
                "kind": "UNION",
                "name": "Result",
                "fields": null,
                "possibleTypes": [{ "kind": "OBJECT", "name": "User" }]
            },
            { "kind": "SCALAR", "name": "Date", "description": "A day" }
        ]"#;
        let types: Vec<IntrospectionType> = serde_json::from_str(json).unwrap();
        match &types[0] {
            IntrospectionType::Union(union_type) => {
                assert!(union_type.fields.is_none());
                assert!(union_type.interfaces.is_none());
                assert_eq!(union_type.possible_types.as_ref().map(Vec::len), Some(1));
            }
            other => panic!("Expected union, got {:?}", other),
        }
        assert_eq!(types[1].name(), "Date");
    }
}
