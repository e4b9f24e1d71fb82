use hashbrown::{hash_map::DefaultHashBuilder, HashMap};
use tracing::trace;

use super::introspection::*;
use super::schema::*;
use crate::ast::ASTContext;

/// Converts a nested introspection type reference into a [TypeRef].
///
/// Wrappers without an `ofType` and named types without a name are malformed and yield `None`.
fn build_type_ref<'a>(
    ctx: &'a ASTContext,
    introspected: &IntrospectionTypeRef<'_>,
) -> Option<&'a TypeRef<'a>> {
    let type_ref = match (introspected.kind, introspected.of_type.as_deref()) {
        ("LIST", Some(of_type)) => TypeRef::ListType(build_type_ref(ctx, of_type)?),
        ("NON_NULL", Some(of_type)) => TypeRef::NonNullType(build_type_ref(ctx, of_type)?),
        ("LIST" | "NON_NULL", None) => return None,
        _ => TypeRef::Type(ctx.alloc_str(introspected.name?)),
    };
    Some(ctx.alloc(type_ref))
}

fn build_input_field<'a>(
    ctx: &'a ASTContext,
    value: &IntrospectionInputValue<'_>,
) -> Option<SchemaInputField<'a>> {
    let input_type = build_type_ref(ctx, &value.of_type)?;
    Some(SchemaInputField::new(ctx.alloc_str(value.name), input_type))
}

fn build_field<'a>(ctx: &'a ASTContext, field: &IntrospectionField<'_>) -> Option<SchemaField<'a>> {
    let output_type = build_type_ref(ctx, &field.of_type)?;
    let mut schema_field = SchemaField::new(ctx, ctx.alloc_str(field.name), output_type);
    for arg in field.args.iter() {
        match build_input_field(ctx, arg) {
            Some(input_field) => schema_field.add_argument(ctx, input_field),
            None => trace!(field = field.name, arg = arg.name, "skipped malformed argument"),
        }
    }
    Some(schema_field)
}

/// Adds the fields and implemented interfaces of an object or interface type.
fn add_composite_members<'a, T>(
    ctx: &'a ASTContext,
    target: &mut T,
    composite: &IntrospectionCompositeType<'_>,
) where
    T: SchemaFields<'a> + SchemaInterfaces<'a>,
{
    for field in composite.fields.iter().flatten() {
        match build_field(ctx, field) {
            Some(schema_field) => target.add_field(ctx, schema_field),
            None => trace!(owner = composite.name, field = field.name, "skipped malformed field"),
        }
    }
    for interface in composite.interfaces.iter().flatten() {
        target.add_interface(ctx, ctx.alloc_str(interface.name));
    }
}

fn build_type<'a>(ctx: &'a ASTContext, introspected: &IntrospectionType<'_>) -> SchemaType<'a> {
    let name = ctx.alloc_str(introspected.name());
    match introspected {
        IntrospectionType::Scalar(_) => SchemaType::Scalar(ctx.alloc(SchemaScalar::new(name))),
        IntrospectionType::Object(composite) => {
            let mut object = SchemaObject::new(ctx, name);
            add_composite_members(ctx, &mut object, composite);
            SchemaType::Object(ctx.alloc(object))
        }
        IntrospectionType::Interface(composite) => {
            let mut interface = SchemaInterface::new(ctx, name);
            add_composite_members(ctx, &mut interface, composite);
            for possible_type in composite.possible_types.iter().flatten() {
                interface.add_possible_type(ctx, ctx.alloc_str(possible_type.name));
            }
            SchemaType::Interface(ctx.alloc(interface))
        }
        IntrospectionType::Union(composite) => {
            let mut union_type = SchemaUnion::new(ctx, name);
            for possible_type in composite.possible_types.iter().flatten() {
                union_type.add_possible_type(ctx, ctx.alloc_str(possible_type.name));
            }
            SchemaType::Union(ctx.alloc(union_type))
        }
        IntrospectionType::Enum(enum_type) => {
            let mut schema_enum = SchemaEnum::new(ctx, name);
            for value in enum_type.enum_values.iter() {
                schema_enum.add_value(ctx, ctx.alloc_str(value.name));
            }
            SchemaType::Enum(ctx.alloc(schema_enum))
        }
        IntrospectionType::InputObject(input) => {
            let mut input_object = SchemaInputObject::new(ctx, name);
            for value in input.input_fields.iter() {
                match build_input_field(ctx, value) {
                    Some(input_field) => input_object.add_field(ctx, input_field),
                    None => {
                        trace!(owner = input.name, field = value.name, "skipped malformed field")
                    }
                }
            }
            SchemaType::InputObject(ctx.alloc(input_object))
        }
    }
}

pub trait BuildClientSchema<'arena> {
    /// Converts the introspected data to a [Schema].
    fn build_client_schema(&self, ctx: &'arena ASTContext) -> &'arena Schema<'arena>;
}

impl<'arena> BuildClientSchema<'arena> for IntrospectionSchema<'arena> {
    /// Converts the introspected data to a [Schema].
    ///
    /// Types only refer to each other by name, so each one is built on its own and resolved
    /// lazily through the schema's type map. Root types that don't name an object are left unset.
    fn build_client_schema(&self, ctx: &'arena ASTContext) -> &'arena Schema<'arena> {
        let mut types: HashMap<_, _, DefaultHashBuilder, &bumpalo::Bump> =
            HashMap::new_in(&ctx.arena);
        for introspected in self.types.iter() {
            let schema_type = ctx.alloc(build_type(ctx, introspected));
            types.insert(schema_type.name(), schema_type);
        }
        trace!(types = types.len(), "built client schema types");

        let root_type = |root: &Option<IntrospectionTypeName<'_>>| {
            root.as_ref()
                .and_then(|root| types.get(root.name))
                .and_then(|schema_type| schema_type.object())
        };
        let query_type = root_type(&self.query_type);
        let mutation_type = root_type(&self.mutation_type);
        let subscription_type = root_type(&self.subscription_type);

        ctx.alloc(Schema {
            query_type,
            mutation_type,
            subscription_type,
            types,
        })
    }
}

impl<'arena> BuildClientSchema<'arena> for IntrospectionQuery<'arena> {
    /// Converts the introspected data to a [Schema].
    fn build_client_schema(&self, ctx: &'arena ASTContext) -> &'arena Schema<'arena> {
        self.schema.build_client_schema(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(ctx: &ASTContext) -> &Schema<'_> {
        let introspection_json = include_str!("../../fixture/introspection_query.json");
        let introspection: IntrospectionQuery = serde_json::from_str(introspection_json).unwrap();
        introspection.build_client_schema(ctx)
    }

    #[test]
    fn build_schema() {
        let ctx = ASTContext::new();
        let schema = load(&ctx);

        let query_root_name = schema.query_type.map(|obj| obj.name).unwrap();
        assert_eq!(query_root_name, "Query");
        assert_eq!(schema.mutation_type.map(|obj| obj.name), Some("Mutation"));
        assert_eq!(
            schema.subscription_type.map(|obj| obj.name),
            Some("Subscription")
        );

        assert!(std::ptr::eq(
            schema
                .get_type(query_root_name)
                .and_then(|t| t.object())
                .unwrap(),
            schema.query_type.unwrap()
        ));
    }

    #[test]
    fn schema_fields() {
        let ctx = ASTContext::new();
        let schema = load(&ctx);

        let user_type = schema.get_type("User").and_then(|t| t.object()).unwrap();
        let names = user_type
            .get_fields()
            .iter()
            .map(|field| field.name)
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec!["id", "name", "email", "role", "createdAt", "friends", "posts", "profile"]
        );

        let friends = user_type.get_field("friends").unwrap();
        assert_eq!(friends.output_type.to_string(), "[User]");
        assert_eq!(friends.get_argument("first").unwrap().input_type.to_string(), "Int");

        let query_type = schema.query_type().unwrap();
        let search = query_type.get_field("search").unwrap();
        let required = search.required_arguments().map(|arg| arg.name).collect::<Vec<_>>();
        assert_eq!(required, vec!["text"]);
    }

    #[test]
    fn schema_enums_and_inputs() {
        let ctx = ASTContext::new();
        let schema = load(&ctx);

        let role = match schema.get_type("Role") {
            Some(SchemaType::Enum(role)) => role,
            other => panic!("Expected enum, got {:?}", other),
        };
        assert_eq!(role.values.as_slice(), &["ADMIN", "EDITOR", "VIEWER"]);

        let input = match schema.get_type("CreateUserInput") {
            Some(SchemaType::InputObject(input)) => input,
            other => panic!("Expected input object, got {:?}", other),
        };
        assert_eq!(input.fields.len(), 5);
        assert_eq!(
            input.get_field("address").unwrap().input_type.to_string(),
            "AddressInput!"
        );
        assert!(matches!(
            schema.get_type("DateTime"),
            Some(SchemaType::Scalar(_))
        ));
    }

    #[test]
    fn schema_abstract_types() {
        let ctx = ASTContext::new();
        let schema = load(&ctx);

        match schema.get_type("SearchResult") {
            Some(SchemaType::Union(search)) => {
                assert_eq!(search.get_possible_types(), &["User", "Post"])
            }
            other => panic!("Expected union, got {:?}", other),
        }
        match schema.get_type("Node") {
            Some(SchemaType::Interface(node)) => {
                assert_eq!(node.get_possible_types(), &["User", "Post"]);
                assert_eq!(node.get_fields().len(), 1);
            }
            other => panic!("Expected interface, got {:?}", other),
        }
        let user_type = schema.get_type("User").and_then(|t| t.object()).unwrap();
        assert_eq!(user_type.get_interfaces(), &["Node"]);
    }

    #[test]
    fn skips_malformed_type_refs() {
        let ctx = ASTContext::new();
        let json = r#"{
            "__schema": {
                "queryType": { "name": "Query" },
                "mutationType": { "name": "Missing" },
                "types": [{
                    "kind": "OBJECT",
                    "name": "Query",
                    "fields": [
                        { "name": "a", "args": [], "type": { "kind": "LIST", "ofType": null } },
                        { "name": "b", "args": [], "type": { "kind": "SCALAR", "name": "Int" } }
                    ],
                    "interfaces": []
                }]
            }
        }"#;
        let introspection: IntrospectionQuery = serde_json::from_str(json).unwrap();
        let schema = introspection.build_client_schema(&ctx);
        let query_type = schema.query_type().unwrap();
        assert!(query_type.get_field("a").is_none());
        assert!(query_type.get_field("b").is_some());
        assert!(schema.mutation_type().is_none());
    }
}
