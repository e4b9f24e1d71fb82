//! Parsing of schema definition language (SDL) text into a client [Schema].
//!
//! Only what a client schema holds is kept. Descriptions, directive usages, default values and
//! directive definitions are parsed and then skipped.

use super::schema::*;
use crate::ast::lexer::Token;
use crate::ast::parser::private::{ParseNode, ParserContext};
use crate::ast::{ASTContext, ASTKind, DefaultIn, Directives, OperationKind, Type, Value};
use crate::error::{get_location, print_span, Error, ErrorType, Result};
use bumpalo::collections::Vec;
use bumpalo::Bump;
use hashbrown::HashMap;
use tracing::trace;

type ParseResult<T> = std::result::Result<T, ASTKind>;

const BUILT_IN_SCALARS: [&str; 5] = ["String", "Int", "Float", "Boolean", "ID"];

/// Root operation type names, as named by a `schema` definition.
#[derive(Default)]
struct RootTypeNames<'a> {
    defined: bool,
    query: Option<&'a str>,
    mutation: Option<&'a str>,
    subscription: Option<&'a str>,
}

impl<'a> RootTypeNames<'a> {
    fn get(&self, operation: OperationKind) -> Option<&'a str> {
        let (name, default) = match operation {
            OperationKind::Query => (self.query, "Query"),
            OperationKind::Mutation => (self.mutation, "Mutation"),
            OperationKind::Subscription => (self.subscription, "Subscription"),
        };
        if self.defined {
            name
        } else {
            Some(default)
        }
    }
}

/// Type definitions in the order they were first defined, with extensions merged into them.
struct TypeDefinitions<'a> {
    roots: RootTypeNames<'a>,
    types: std::vec::Vec<OwnedSchemaType<'a>>,
    by_name: HashMap<&'a str, usize>,
}

impl<'a> TypeDefinitions<'a> {
    fn new() -> Self {
        TypeDefinitions {
            roots: RootTypeNames::default(),
            types: std::vec::Vec::new(),
            by_name: HashMap::new(),
        }
    }

    fn define(&mut self, definition: OwnedSchemaType<'a>) {
        match self.by_name.get(definition.name()) {
            Some(index) => self.types[*index] = definition,
            None => {
                self.by_name.insert(definition.name(), self.types.len());
                self.types.push(definition);
            }
        }
    }

    fn extend(&mut self, ctx: &'a ASTContext, extension: OwnedSchemaType<'a>) {
        let index = match self.by_name.get(extension.name()) {
            Some(index) => *index,
            None => return self.define(extension),
        };
        let replacement = match (&mut self.types[index], extension) {
            (OwnedSchemaType::Object(existing), OwnedSchemaType::Object(extension)) => {
                for field in extension.fields.as_slice() {
                    existing.fields.insert(*field);
                }
                for interface in extension.interfaces.iter() {
                    existing.add_interface(ctx, *interface);
                }
                return;
            }
            (OwnedSchemaType::Interface(existing), OwnedSchemaType::Interface(extension)) => {
                for field in extension.fields.as_slice() {
                    existing.fields.insert(*field);
                }
                for interface in extension.interfaces.iter() {
                    existing.add_interface(ctx, *interface);
                }
                return;
            }
            (OwnedSchemaType::Union(existing), OwnedSchemaType::Union(extension)) => {
                for possible_type in extension.get_possible_types() {
                    existing.add_possible_type(ctx, *possible_type);
                }
                return;
            }
            (OwnedSchemaType::Enum(existing), OwnedSchemaType::Enum(extension)) => {
                for value in extension.values.iter() {
                    existing.add_value(ctx, *value);
                }
                return;
            }
            (OwnedSchemaType::InputObject(existing), OwnedSchemaType::InputObject(extension)) => {
                for field in extension.fields.iter() {
                    existing.add_field(ctx, *field);
                }
                return;
            }
            (_, extension) => extension,
        };
        trace!(
            name = replacement.name(),
            "extension replaces a type of another kind"
        );
        self.types[index] = replacement;
    }

    fn into_schema(mut self, ctx: &'a ASTContext) -> Schema<'a> {
        // Only objects become possible types of the interfaces they implement
        let mut implementations = std::vec::Vec::new();
        for definition in self.types.iter() {
            if let OwnedSchemaType::Object(object) = definition {
                for interface in object.interfaces.iter() {
                    implementations.push((*interface, object.name));
                }
            }
        }
        for (interface, object) in implementations {
            let index = match self.by_name.get(interface) {
                Some(index) => *index,
                None => continue,
            };
            if let OwnedSchemaType::Interface(interface) = &mut self.types[index] {
                interface.add_possible_type(ctx, object);
            }
        }

        for scalar in BUILT_IN_SCALARS {
            if !self.by_name.contains_key(scalar) {
                self.define(OwnedSchemaType::Scalar(SchemaScalar::new(scalar)));
            }
        }

        let mut schema = Schema::default_in(&ctx.arena);
        for definition in self.types {
            let name = definition.name();
            let schema_type = definition.into_schema_type(ctx);
            schema.types.insert(name, ctx.alloc(schema_type));
        }

        let root_type = |operation: OperationKind| {
            self.roots
                .get(operation)
                .and_then(|name| schema.get_type(name))
                .and_then(|schema_type| schema_type.object())
        };
        let query_type = root_type(OperationKind::Query);
        let mutation_type = root_type(OperationKind::Mutation);
        let subscription_type = root_type(OperationKind::Subscription);
        schema.query_type = query_type;
        schema.mutation_type = mutation_type;
        schema.subscription_type = subscription_type;
        schema
    }
}

#[inline]
fn skip_description(ctx: &mut ParserContext<'_>) {
    if let Token::String(_) = ctx.peek() {
        ctx.next();
    }
}

#[inline]
fn expect(ctx: &mut ParserContext<'_>, token: Token<'_>, kind: ASTKind) -> ParseResult<()> {
    if ctx.next() == token {
        Ok(())
    } else {
        Err(kind)
    }
}

#[inline]
fn parse_name<'a>(ctx: &mut ParserContext<'a>, kind: ASTKind) -> ParseResult<&'a str> {
    match ctx.next() {
        Token::Name(name) => Ok(name),
        _ => Err(kind),
    }
}

fn type_ref<'a>(arena: &'a Bump, of_type: &Type<'a>) -> &'a TypeRef<'a> {
    let type_ref = match *of_type {
        Type::NamedType(named_type) => TypeRef::Type(named_type.name),
        Type::ListType(of_type) => TypeRef::ListType(type_ref(arena, of_type)),
        Type::NonNullType(of_type) => TypeRef::NonNullType(type_ref(arena, of_type)),
    };
    arena.alloc(type_ref)
}

impl<'a> ParseNode<'a> for SchemaInputField<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<SchemaInputField<'a>> {
        skip_description(ctx);
        let name = parse_name(ctx, ASTKind::InputValueDefinition)?;
        expect(ctx, Token::Colon, ASTKind::InputValueDefinition)?;
        let of_type = Type::new_with_ctx(ctx)?;
        if let Token::Equal = ctx.peek() {
            ctx.next();
            ctx.in_var_def = true;
            Value::new_with_ctx(ctx)?;
            ctx.in_var_def = false;
        }
        Directives::new_with_ctx(ctx)?;
        Ok(SchemaInputField::new(name, type_ref(ctx.arena, &of_type)))
    }
}

impl<'a> ParseNode<'a> for SchemaField<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<SchemaField<'a>> {
        skip_description(ctx);
        let name = parse_name(ctx, ASTKind::FieldDefinition)?;
        let mut arguments = Vec::new_in(ctx.arena);
        if let Token::ParenOpen = ctx.peek() {
            ctx.next();
            while !matches!(ctx.peek(), Token::ParenClose | Token::End) {
                arguments.push(SchemaInputField::new_with_ctx(ctx)?);
            }
            expect(ctx, Token::ParenClose, ASTKind::FieldDefinition)?;
        }
        expect(ctx, Token::Colon, ASTKind::FieldDefinition)?;
        let output_type = Type::new_with_ctx(ctx)?;
        Directives::new_with_ctx(ctx)?;
        Ok(SchemaField {
            name,
            arguments,
            output_type: type_ref(ctx.arena, &output_type),
        })
    }
}

fn parse_root_types<'a>(
    ctx: &mut ParserContext<'a>,
    roots: &mut RootTypeNames<'a>,
) -> ParseResult<()> {
    roots.defined = true;
    expect(ctx, Token::BraceOpen, ASTKind::SchemaDefinition)?;
    while !matches!(ctx.peek(), Token::BraceClose | Token::End) {
        let keyword = parse_name(ctx, ASTKind::SchemaDefinition)?;
        let operation = OperationKind::from_keyword(keyword).ok_or(ASTKind::SchemaDefinition)?;
        expect(ctx, Token::Colon, ASTKind::SchemaDefinition)?;
        let type_name = Some(parse_name(ctx, ASTKind::SchemaDefinition)?);
        match operation {
            OperationKind::Query => roots.query = type_name,
            OperationKind::Mutation => roots.mutation = type_name,
            OperationKind::Subscription => roots.subscription = type_name,
        }
    }
    expect(ctx, Token::BraceClose, ASTKind::SchemaDefinition)
}

fn parse_interfaces<'a>(ctx: &mut ParserContext<'a>) -> ParseResult<std::vec::Vec<&'a str>> {
    let mut interfaces = std::vec::Vec::new();
    if let Token::Name("implements") = ctx.peek() {
        ctx.next();
        if let Token::Ampersand = ctx.peek() {
            ctx.next();
        }
        loop {
            interfaces.push(parse_name(ctx, ASTKind::ImplementsInterfaces)?);
            if let Token::Ampersand = ctx.peek() {
                ctx.next();
            } else {
                break;
            }
        }
    }
    Ok(interfaces)
}

fn parse_fields<'a>(ctx: &mut ParserContext<'a>) -> ParseResult<std::vec::Vec<SchemaField<'a>>> {
    let mut fields = std::vec::Vec::new();
    if let Token::BraceOpen = ctx.peek() {
        ctx.next();
        while !matches!(ctx.peek(), Token::BraceClose | Token::End) {
            fields.push(SchemaField::new_with_ctx(ctx)?);
        }
        expect(ctx, Token::BraceClose, ASTKind::FieldDefinition)?;
    }
    Ok(fields)
}

fn parse_type_definition<'a>(
    ast_ctx: &'a ASTContext,
    ctx: &mut ParserContext<'a>,
) -> ParseResult<OwnedSchemaType<'a>> {
    let keyword = parse_name(ctx, ASTKind::TypeDefinition)?;
    let type_name = parse_name(ctx, ASTKind::TypeDefinition)?;
    let definition = match keyword {
        "type" => {
            let mut object = SchemaObject::new(ast_ctx, type_name);
            for interface in parse_interfaces(ctx)? {
                object.add_interface(ast_ctx, interface);
            }
            Directives::new_with_ctx(ctx)?;
            for field in parse_fields(ctx)? {
                object.add_field(ast_ctx, field);
            }
            OwnedSchemaType::Object(object)
        }
        "interface" => {
            let mut interface = SchemaInterface::new(ast_ctx, type_name);
            for implemented in parse_interfaces(ctx)? {
                interface.add_interface(ast_ctx, implemented);
            }
            Directives::new_with_ctx(ctx)?;
            for field in parse_fields(ctx)? {
                interface.add_field(ast_ctx, field);
            }
            OwnedSchemaType::Interface(interface)
        }
        "union" => {
            let mut union_type = SchemaUnion::new(ast_ctx, type_name);
            Directives::new_with_ctx(ctx)?;
            if let Token::Equal = ctx.peek() {
                ctx.next();
                if let Token::Pipe = ctx.peek() {
                    ctx.next();
                }
                loop {
                    let member = parse_name(ctx, ASTKind::UnionMemberTypes)?;
                    union_type.add_possible_type(ast_ctx, member);
                    if let Token::Pipe = ctx.peek() {
                        ctx.next();
                    } else {
                        break;
                    }
                }
            }
            OwnedSchemaType::Union(union_type)
        }
        "enum" => {
            let mut enum_type = SchemaEnum::new(ast_ctx, type_name);
            Directives::new_with_ctx(ctx)?;
            if let Token::BraceOpen = ctx.peek() {
                ctx.next();
                loop {
                    skip_description(ctx);
                    match ctx.next() {
                        Token::BraceClose => break,
                        Token::Name(value) => {
                            Directives::new_with_ctx(ctx)?;
                            enum_type.add_value(ast_ctx, value);
                        }
                        _ => return Err(ASTKind::EnumValues),
                    }
                }
            }
            OwnedSchemaType::Enum(enum_type)
        }
        "scalar" => {
            Directives::new_with_ctx(ctx)?;
            OwnedSchemaType::Scalar(SchemaScalar::new(type_name))
        }
        "input" => {
            let mut input_object = SchemaInputObject::new(ast_ctx, type_name);
            Directives::new_with_ctx(ctx)?;
            if let Token::BraceOpen = ctx.peek() {
                ctx.next();
                while !matches!(ctx.peek(), Token::BraceClose | Token::End) {
                    input_object.add_field(ast_ctx, SchemaInputField::new_with_ctx(ctx)?);
                }
                expect(ctx, Token::BraceClose, ASTKind::InputValueDefinition)?;
            }
            OwnedSchemaType::InputObject(input_object)
        }
        _ => return Err(ASTKind::TypeDefinition),
    };
    Ok(definition)
}

/// Skips over `directive @name(args) repeatable on LOCATION | LOCATION`.
fn skip_directive_definition(ctx: &mut ParserContext<'_>) -> ParseResult<()> {
    expect(ctx, Token::Name("directive"), ASTKind::DirectiveDefinition)?;
    if !matches!(ctx.next(), Token::DirectiveName(_)) {
        return Err(ASTKind::DirectiveDefinition);
    }
    if let Token::ParenOpen = ctx.peek() {
        ctx.next();
        while !matches!(ctx.peek(), Token::ParenClose | Token::End) {
            SchemaInputField::new_with_ctx(ctx)?;
        }
        expect(ctx, Token::ParenClose, ASTKind::DirectiveDefinition)?;
    }
    if let Token::Name("repeatable") = ctx.peek() {
        ctx.next();
    }
    expect(ctx, Token::Name("on"), ASTKind::DirectiveDefinition)?;
    if let Token::Pipe = ctx.peek() {
        ctx.next();
    }
    loop {
        parse_name(ctx, ASTKind::DirectiveDefinition)?;
        if let Token::Pipe = ctx.peek() {
            ctx.next();
        } else {
            return Ok(());
        }
    }
}

fn parse_definitions<'a>(
    ast_ctx: &'a ASTContext,
    ctx: &mut ParserContext<'a>,
) -> ParseResult<TypeDefinitions<'a>> {
    let mut definitions = TypeDefinitions::new();
    loop {
        skip_description(ctx);
        match ctx.peek() {
            Token::End => return Ok(definitions),
            Token::Name("schema") => {
                ctx.next();
                Directives::new_with_ctx(ctx)?;
                parse_root_types(ctx, &mut definitions.roots)?;
            }
            Token::Name("directive") => skip_directive_definition(ctx)?,
            Token::Name("extend") => {
                ctx.next();
                if let Token::Name("schema") = ctx.peek() {
                    ctx.next();
                    Directives::new_with_ctx(ctx)?;
                    if let Token::BraceOpen = ctx.peek() {
                        parse_root_types(ctx, &mut definitions.roots)?;
                    }
                } else {
                    let extension = parse_type_definition(ast_ctx, ctx)?;
                    definitions.extend(ast_ctx, extension);
                }
            }
            Token::Name(_) => {
                let definition = parse_type_definition(ast_ctx, ctx)?;
                definitions.define(definition);
            }
            _ => return Err(ASTKind::TypeDefinition),
        }
    }
}

impl<'a> Schema<'a> {
    /// Parses a schema from schema definition language text.
    ///
    /// The root types are taken from a `schema` definition or default to the `Query`, `Mutation`
    /// and `Subscription` types. The built-in scalars are always defined.
    pub fn parse<T: ToString>(ctx: &'a ASTContext, source: T) -> Result<&'a Schema<'a>> {
        let source = ctx.alloc_string(source.to_string());
        let mut parser_ctx = ParserContext::new(ctx, source);
        let definitions = parse_definitions(ctx, &mut parser_ctx).map_err(|error| {
            let span = print_span(parser_ctx.source(), parser_ctx.span());
            let location = get_location(parser_ctx.source(), parser_ctx.span());
            Error::new_with_context(
                format!("Invalid {}", error),
                Some(location),
                span,
                Some(ErrorType::Syntax),
            )
        })?;
        trace!(types = definitions.types.len(), "parsed schema definitions");
        Ok(ctx.alloc(definitions.into_schema(ctx)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{BuildClientSchema, IntrospectionQuery};
    use indoc::indoc;

    #[test]
    fn parse_fixture() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, include_str!("../../fixture/schema.graphql")).unwrap();

        assert_eq!(schema.query_type().map(|t| t.name), Some("Query"));
        assert_eq!(schema.mutation_type().map(|t| t.name), Some("Mutation"));
        assert_eq!(schema.subscription_type().map(|t| t.name), Some("Subscription"));

        let user = schema.get_type("User").and_then(|t| t.object()).unwrap();
        let names = user
            .get_fields()
            .iter()
            .map(|field| field.name)
            .collect::<std::vec::Vec<_>>();
        assert_eq!(
            names,
            vec!["id", "name", "email", "role", "createdAt", "friends", "posts", "profile"]
        );
        assert_eq!(user.get_interfaces(), &["Node"]);

        match schema.get_type("Node") {
            Some(SchemaType::Interface(node)) => {
                assert_eq!(node.get_possible_types(), &["User", "Post"])
            }
            other => panic!("Expected interface, got {:?}", other),
        }
        match schema.get_type("SearchResult") {
            Some(SchemaType::Union(search)) => {
                assert_eq!(search.get_possible_types(), &["User", "Post"])
            }
            other => panic!("Expected union, got {:?}", other),
        }

        for scalar in BUILT_IN_SCALARS {
            assert!(matches!(schema.get_type(scalar), Some(SchemaType::Scalar(_))));
        }
    }

    #[test]
    fn matches_introspection_fixture() {
        let ctx = ASTContext::new();
        let from_sdl = Schema::parse(&ctx, include_str!("../../fixture/schema.graphql")).unwrap();
        let introspection: IntrospectionQuery =
            serde_json::from_str(include_str!("../../fixture/introspection_query.json")).unwrap();
        let from_introspection = introspection.build_client_schema(&ctx);

        for name in ["Query", "Mutation", "User", "Post", "Profile"] {
            let left = from_sdl.get_type(name).and_then(|t| t.object()).unwrap();
            let right = from_introspection.get_type(name).and_then(|t| t.object()).unwrap();
            assert_eq!(left, right, "{}", name);
        }
        for name in ["CreateUserInput", "AddressInput"] {
            assert_eq!(from_sdl.get_type(name), from_introspection.get_type(name), "{}", name);
        }
    }

    #[test]
    fn skips_descriptions_and_directives() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(
            &ctx,
            indoc! {r#"
                """
                Block description
                """
                type Query @cacheControl(maxAge: 10) {
                  "Field description"
                  items(
                    "Argument description"
                    first: Int = 10 @deprecated
                    filter: Filter = { tags: ["a", "b"] }
                  ): [Item!]! @deprecated(reason: "No longer supported")
                }

                directive @cacheControl(maxAge: Int) repeatable on | FIELD_DEFINITION | OBJECT

                type Item { id: ID! }
                input Filter { tags: [String!] }
                enum Kind { "Value description" A @deprecated B }
            "#},
        )
        .unwrap();

        let items = schema.query_type().and_then(|t| t.get_field("items")).unwrap();
        assert_eq!(items.output_type.to_string(), "[Item!]!");
        let arguments = items
            .arguments
            .iter()
            .map(|arg| (arg.name, arg.input_type.to_string()))
            .collect::<std::vec::Vec<_>>();
        assert_eq!(
            arguments,
            vec![
                ("first", "Int".to_string()),
                ("filter", "Filter".to_string())
            ]
        );
        match schema.get_type("Kind") {
            Some(SchemaType::Enum(kind)) => assert_eq!(kind.values.as_slice(), &["A", "B"]),
            other => panic!("Expected enum, got {:?}", other),
        }
    }

    #[test]
    fn extensions_and_root_types() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(
            &ctx,
            indoc! {"
                schema { query: Root }
                type Root { a: String }
                extend type Root implements Node { b: Int }
                interface Node { id: ID! }
                extend schema { mutation: Root }
                type Mutation { ignored: String }
                enum Kind { A }
                extend enum Kind { B A }
            "},
        )
        .unwrap();

        let root = schema.query_type().unwrap();
        assert_eq!(root.name, "Root");
        assert_eq!(root.get_fields().len(), 2);
        assert!(root.get_field("b").is_some());
        assert_eq!(schema.mutation_type().map(|t| t.name), Some("Root"));
        assert!(schema.subscription_type().is_none());

        match schema.get_type("Node") {
            Some(SchemaType::Interface(node)) => assert_eq!(node.get_possible_types(), &["Root"]),
            other => panic!("Expected interface, got {:?}", other),
        }

        match schema.get_type("Kind") {
            Some(SchemaType::Enum(kind)) => assert_eq!(kind.values.as_slice(), &["A", "B"]),
            other => panic!("Expected enum, got {:?}", other),
        }
    }

    #[test]
    fn interfaces_implementing_interfaces() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(
            &ctx,
            indoc! {"
                interface Node { id: ID! }
                interface Entity implements & Node { id: ID! }
                type Query { node: Node }
            "},
        )
        .unwrap();
        match schema.get_type("Entity") {
            Some(SchemaType::Interface(entity)) => assert_eq!(entity.get_interfaces(), &["Node"]),
            other => panic!("Expected interface, got {:?}", other),
        }
        match schema.get_type("Node") {
            Some(SchemaType::Interface(node)) => assert!(node.get_possible_types().is_empty()),
            other => panic!("Expected interface, got {:?}", other),
        }
    }

    #[test]
    fn syntax_errors() {
        let ctx = ASTContext::new();
        let error = Schema::parse(&ctx, "type Query {\n  user(id: ID!) User\n}").unwrap_err();
        assert_eq!(error.error_type(), ErrorType::Syntax);
        assert_eq!(error.message(), "Invalid Field Definition");

        let error = Schema::parse(&ctx, "schema { root: Query }").unwrap_err();
        assert_eq!(error.message(), "Invalid Schema Definition");

        let error = Schema::parse(&ctx, "type Query { a: String } 123").unwrap_err();
        assert_eq!(error.message(), "Invalid Type Definition");
    }
}
