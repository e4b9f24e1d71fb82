use crate::ast::{ASTContext, DefaultIn, NamedType, OperationKind, Type};
use bumpalo::collections::Vec;
use bumpalo::Bump;
use hashbrown::hash_map::DefaultHashBuilder;
use hashbrown::HashMap;
use std::fmt;

/// Schema Definition
///
/// A schema is created from root types for each kind of operation and is then used to resolve
/// paths of fields against it. In this library the schema is never executable and serves only
/// for metadata and type information. It is hence a "Client Schema".
/// [Reference](https://spec.graphql.org/October2021/#sec-Schema)
#[derive(Debug, Clone, PartialEq)]
pub struct Schema<'a> {
    pub(crate) query_type: Option<&'a SchemaObject<'a>>,
    pub(crate) mutation_type: Option<&'a SchemaObject<'a>>,
    pub(crate) subscription_type: Option<&'a SchemaObject<'a>>,
    pub(crate) types: HashMap<&'a str, &'a SchemaType<'a>, DefaultHashBuilder, &'a Bump>,
}

impl<'a> DefaultIn<'a> for Schema<'a> {
    fn default_in(arena: &'a Bump) -> Self {
        Schema {
            query_type: None,
            mutation_type: None,
            subscription_type: None,
            types: HashMap::new_in(arena),
        }
    }
}

impl<'a> Schema<'a> {
    /// Returns the root object type for query operations
    #[inline]
    pub fn query_type(&self) -> Option<&'a SchemaObject<'a>> {
        self.query_type
    }

    /// Returns the root object type for mutation operations
    #[inline]
    pub fn mutation_type(&self) -> Option<&'a SchemaObject<'a>> {
        self.mutation_type
    }

    /// Returns the root object type for subscription operations
    #[inline]
    pub fn subscription_type(&self) -> Option<&'a SchemaObject<'a>> {
        self.subscription_type
    }

    /// Returns the appropriate object type depending on the passed operation kind
    #[inline]
    pub fn get_root_type(&self, operation_kind: OperationKind) -> Option<&'a SchemaObject<'a>> {
        match operation_kind {
            OperationKind::Query => self.query_type,
            OperationKind::Mutation => self.mutation_type,
            OperationKind::Subscription => self.subscription_type,
        }
    }

    /// Retrieves a kind by name from known schema types.
    #[inline]
    pub fn get_type(&self, name: &str) -> Option<&'a SchemaType<'a>> {
        self.types.get(name).copied()
    }

}

/// Fields of an object or interface, kept in the order they were declared in.
///
/// The declaration order decides the order in which fields are added when a type's fields are
/// selected all at once, hence lookups by name go through a separate index.
#[derive(Debug, Clone)]
pub struct SchemaFieldMap<'a> {
    ordered: Vec<'a, &'a SchemaField<'a>>,
    by_name: HashMap<&'a str, usize, DefaultHashBuilder, &'a Bump>,
}

impl<'a> SchemaFieldMap<'a> {
    #[inline]
    pub fn new_in(arena: &'a Bump) -> Self {
        SchemaFieldMap {
            ordered: Vec::new_in(arena),
            by_name: HashMap::new_in(arena),
        }
    }

    /// Adds a field, replacing a previous field of the same name in its original position.
    pub fn insert(&mut self, field: &'a SchemaField<'a>) {
        match self.by_name.get(field.name) {
            Some(index) => self.ordered[*index] = field,
            None => {
                self.by_name.insert(field.name, self.ordered.len());
                self.ordered.push(field);
            }
        }
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&'a SchemaField<'a>> {
        self.by_name.get(name).map(|index| self.ordered[*index])
    }

    #[inline]
    pub fn as_slice(&self) -> &[&'a SchemaField<'a>] {
        &self.ordered
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

impl<'a> PartialEq for SchemaFieldMap<'a> {
    fn eq(&self, other: &Self) -> bool {
        self.ordered == other.ordered
    }
}

/// Generic trait for any schema type that implements fields
pub trait SchemaFields<'a>: Sized {
    /// Add a new [SchemaField] to the list of fields
    fn add_field(&mut self, ctx: &'a ASTContext, field: SchemaField<'a>);

    /// Get all fields in declaration order
    fn get_fields(&self) -> &[&'a SchemaField<'a>];

    /// Get a known field by name
    fn get_field(&self, name: &str) -> Option<&'a SchemaField<'a>>;
}

/// Generic trait for any schema type that implements interfaces
pub trait SchemaInterfaces<'a>: Sized {
    /// Add a new [SchemaInterface] to the list of implemented interfaces
    fn add_interface(&mut self, ctx: &'a ASTContext, interface: &'a str);

    /// Get list of implemented [SchemaInterface]s
    fn get_interfaces(&self) -> &[&'a str];
}

/// Generic trait for any schema type that has possible object types
pub trait SchemaPossibleTypes<'a>: Sized {
    /// Add a new [SchemaObject] to the list of possible types
    fn add_possible_type(&mut self, ctx: &'a ASTContext, object: &'a str);

    /// Get list of possible [SchemaObject] types
    fn get_possible_types(&self) -> &[&'a str];
}

/// An Object type definition.
///
/// Most types in GraphQL are objects and define a set of fields and the interfaces they implement.
/// [Reference](https://spec.graphql.org/October2021/#sec-Objects)
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaObject<'a> {
    pub name: &'a str,
    pub(crate) fields: SchemaFieldMap<'a>,
    pub(crate) interfaces: Vec<'a, &'a str>,
}

impl<'a> SchemaObject<'a> {
    #[inline]
    pub fn new(ctx: &'a ASTContext, name: &'a str) -> Self {
        SchemaObject {
            name,
            fields: SchemaFieldMap::new_in(&ctx.arena),
            interfaces: Vec::new_in(&ctx.arena),
        }
    }
}

impl<'a> SchemaFields<'a> for SchemaObject<'a> {
    fn add_field(&mut self, ctx: &'a ASTContext, field: SchemaField<'a>) {
        self.fields.insert(ctx.alloc(field));
    }

    #[inline]
    fn get_fields(&self) -> &[&'a SchemaField<'a>] {
        self.fields.as_slice()
    }

    #[inline]
    fn get_field(&self, name: &str) -> Option<&'a SchemaField<'a>> {
        self.fields.get(name)
    }
}

impl<'a> SchemaInterfaces<'a> for SchemaObject<'a> {
    fn add_interface(&mut self, _ctx: &'a ASTContext, interface: &'a str) {
        if !self.interfaces.contains(&interface) {
            self.interfaces.push(interface);
        }
    }

    #[inline]
    fn get_interfaces(&self) -> &[&'a str] {
        &self.interfaces
    }
}

/// An Interface type definition.
///
/// Objects and other interfaces implement interfaces. Only implementing objects are tracked as an
/// interface's possible types, since only objects may be returned in its stead.
/// [Reference](https://spec.graphql.org/October2021/#sec-Interfaces)
#[derive(Clone, Debug, PartialEq)]
pub struct SchemaInterface<'a> {
    pub name: &'a str,
    pub(crate) fields: SchemaFieldMap<'a>,
    pub(crate) interfaces: Vec<'a, &'a str>,
    pub(crate) possible_types: Vec<'a, &'a str>,
}

impl<'a> SchemaInterface<'a> {
    #[inline]
    pub fn new(ctx: &'a ASTContext, name: &'a str) -> Self {
        SchemaInterface {
            name,
            fields: SchemaFieldMap::new_in(&ctx.arena),
            interfaces: Vec::new_in(&ctx.arena),
            possible_types: Vec::new_in(&ctx.arena),
        }
    }
}

impl<'a> SchemaFields<'a> for SchemaInterface<'a> {
    fn add_field(&mut self, ctx: &'a ASTContext, field: SchemaField<'a>) {
        self.fields.insert(ctx.alloc(field));
    }

    #[inline]
    fn get_fields(&self) -> &[&'a SchemaField<'a>] {
        self.fields.as_slice()
    }

    #[inline]
    fn get_field(&self, name: &str) -> Option<&'a SchemaField<'a>> {
        self.fields.get(name)
    }
}

impl<'a> SchemaInterfaces<'a> for SchemaInterface<'a> {
    fn add_interface(&mut self, _ctx: &'a ASTContext, interface: &'a str) {
        if !self.interfaces.contains(&interface) {
            self.interfaces.push(interface);
        }
    }

    #[inline]
    fn get_interfaces(&self) -> &[&'a str] {
        &self.interfaces
    }
}

impl<'a> SchemaPossibleTypes<'a> for SchemaInterface<'a> {
    fn add_possible_type(&mut self, _ctx: &'a ASTContext, object: &'a str) {
        if !self.possible_types.contains(&object) {
            self.possible_types.push(object);
        }
    }

    #[inline]
    fn get_possible_types(&self) -> &[&'a str] {
        &self.possible_types
    }
}

/// An object Field type definition.
///
/// A field is like a function that given its arguments as input values produces an output value.
/// Its arguments are kept in declaration order.
/// [Reference](https://spec.graphql.org/October2021/#FieldsDefinition)
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaField<'a> {
    pub name: &'a str,
    pub arguments: Vec<'a, SchemaInputField<'a>>,
    pub output_type: &'a TypeRef<'a>,
}

impl<'a> SchemaField<'a> {
    #[inline]
    pub fn new(ctx: &'a ASTContext, name: &'a str, output_type: &'a TypeRef<'a>) -> Self {
        SchemaField {
            name,
            arguments: Vec::new_in(&ctx.arena),
            output_type,
        }
    }

    pub fn add_argument(&mut self, _ctx: &'a ASTContext, arg: SchemaInputField<'a>) {
        match self.arguments.iter_mut().find(|known| known.name == arg.name) {
            Some(known) => *known = arg,
            None => self.arguments.push(arg),
        }
    }

    #[inline]
    pub fn get_argument(&self, name: &str) -> Option<&SchemaInputField<'a>> {
        self.arguments.iter().find(|arg| arg.name == name)
    }

    /// Iterates over the arguments that must always be passed, in declaration order.
    #[inline]
    pub fn required_arguments(&self) -> impl Iterator<Item = &SchemaInputField<'a>> {
        self.arguments.iter().filter(|arg| arg.input_type.is_non_null())
    }
}

/// A Union type definition.
///
/// A union contains a list of possible types that can be returned in its stead when its defined as
/// an output type.
/// [Reference](https://spec.graphql.org/October2021/#sec-Unions)
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaUnion<'a> {
    pub name: &'a str,
    possible_types: Vec<'a, &'a str>,
}

impl<'a> SchemaUnion<'a> {
    #[inline]
    pub fn new(ctx: &'a ASTContext, name: &'a str) -> Self {
        SchemaUnion {
            name,
            possible_types: Vec::new_in(&ctx.arena),
        }
    }
}

impl<'a> SchemaPossibleTypes<'a> for SchemaUnion<'a> {
    fn add_possible_type(&mut self, _ctx: &'a ASTContext, object: &'a str) {
        if !self.possible_types.contains(&object) {
            self.possible_types.push(object);
        }
    }

    #[inline]
    fn get_possible_types(&self) -> &[&'a str] {
        &self.possible_types
    }
}

/// A Scalar type definition.
///
/// Scalars represent primitive leaf values in GraphQL that are represented with a specific
/// serializer and deserializer, which makes the values returnable to a GraphQL client or readable
/// by a GraphQL API.
/// [Reference](https://spec.graphql.org/October2021/#sec-Scalars)
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaScalar<'a> {
    pub name: &'a str,
}

impl<'a> SchemaScalar<'a> {
    #[inline]
    pub fn new(name: &'a str) -> Self {
        SchemaScalar { name }
    }
}

/// An Enum type definition with its values in declaration order.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Enums)
#[derive(Debug, PartialEq, Clone)]
pub struct SchemaEnum<'a> {
    pub name: &'a str,
    pub values: Vec<'a, &'a str>,
}

impl<'a> SchemaEnum<'a> {
    #[inline]
    pub fn new(ctx: &'a ASTContext, name: &'a str) -> Self {
        SchemaEnum {
            name,
            values: Vec::new_in(&ctx.arena),
        }
    }

    pub fn add_value(&mut self, _ctx: &'a ASTContext, value: &'a str) {
        if !self.values.contains(&value) {
            self.values.push(value);
        }
    }
}

/// An Input Object type definition.
///
/// Inputs, such as arguments, may sometimes be nested and accept objects that must adhere to the
/// shape of an Input Object definition. This is often used to represent more complex inputs.
/// [Reference](https://spec.graphql.org/October2021/#sec-Input-Objects)
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaInputObject<'a> {
    pub name: &'a str,
    pub fields: Vec<'a, SchemaInputField<'a>>,
}

impl<'a> SchemaInputObject<'a> {
    #[inline]
    pub fn new(ctx: &'a ASTContext, name: &'a str) -> Self {
        SchemaInputObject {
            name,
            fields: Vec::new_in(&ctx.arena),
        }
    }

    pub fn add_field(&mut self, _ctx: &'a ASTContext, field: SchemaInputField<'a>) {
        match self.fields.iter_mut().find(|known| known.name == field.name) {
            Some(known) => *known = field,
            None => self.fields.push(field),
        }
    }

    #[inline]
    pub fn get_field(&self, name: &str) -> Option<&SchemaInputField<'a>> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// An argument or input object field definition.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct SchemaInputField<'a> {
    pub name: &'a str,
    pub input_type: &'a TypeRef<'a>,
}

impl<'a> SchemaInputField<'a> {
    #[inline]
    pub fn new(name: &'a str, input_type: &'a TypeRef<'a>) -> Self {
        SchemaInputField { name, input_type }
    }
}

/// A named type enum that represents all possible GraphQL definition types.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Types)
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SchemaType<'a> {
    InputObject(&'a SchemaInputObject<'a>),
    Object(&'a SchemaObject<'a>),
    Union(&'a SchemaUnion<'a>),
    Interface(&'a SchemaInterface<'a>),
    Scalar(&'a SchemaScalar<'a>),
    Enum(&'a SchemaEnum<'a>),
}

impl<'a> SchemaType<'a> {
    #[inline]
    pub fn name(&self) -> &'a str {
        match self {
            SchemaType::InputObject(x) => x.name,
            SchemaType::Object(x) => x.name,
            SchemaType::Union(x) => x.name,
            SchemaType::Interface(x) => x.name,
            SchemaType::Scalar(x) => x.name,
            SchemaType::Enum(x) => x.name,
        }
    }

    pub fn object(&self) -> Option<&'a SchemaObject<'a>> {
        match self {
            SchemaType::Object(x) => Some(x),
            _ => None,
        }
    }

    pub fn output_type(&self) -> Option<OutputType<'a>> {
        match self {
            SchemaType::Object(x) => Some(OutputType::Object(x)),
            SchemaType::Union(x) => Some(OutputType::Union(x)),
            SchemaType::Interface(x) => Some(OutputType::Interface(x)),
            SchemaType::Scalar(x) => Some(OutputType::Scalar(x)),
            SchemaType::Enum(x) => Some(OutputType::Enum(x)),
            SchemaType::InputObject(_) => None,
        }
    }
}

/// A schema type that's still being built up, before it's allocated and frozen.
#[derive(Debug, PartialEq, Clone)]
pub enum OwnedSchemaType<'a> {
    InputObject(SchemaInputObject<'a>),
    Object(SchemaObject<'a>),
    Union(SchemaUnion<'a>),
    Interface(SchemaInterface<'a>),
    Scalar(SchemaScalar<'a>),
    Enum(SchemaEnum<'a>),
}

impl<'a> OwnedSchemaType<'a> {
    #[inline]
    pub fn name(&self) -> &'a str {
        match self {
            OwnedSchemaType::InputObject(x) => x.name,
            OwnedSchemaType::Object(x) => x.name,
            OwnedSchemaType::Union(x) => x.name,
            OwnedSchemaType::Interface(x) => x.name,
            OwnedSchemaType::Scalar(x) => x.name,
            OwnedSchemaType::Enum(x) => x.name,
        }
    }

    /// Moves this type into the arena.
    pub fn into_schema_type(self, ctx: &'a ASTContext) -> SchemaType<'a> {
        match self {
            OwnedSchemaType::InputObject(x) => SchemaType::InputObject(ctx.alloc(x)),
            OwnedSchemaType::Object(x) => SchemaType::Object(ctx.alloc(x)),
            OwnedSchemaType::Union(x) => SchemaType::Union(ctx.alloc(x)),
            OwnedSchemaType::Interface(x) => SchemaType::Interface(ctx.alloc(x)),
            OwnedSchemaType::Scalar(x) => SchemaType::Scalar(ctx.alloc(x)),
            OwnedSchemaType::Enum(x) => SchemaType::Enum(ctx.alloc(x)),
        }
    }
}

/// An output type enum that represents all possible GraphQL definition types that a field may
/// return.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Input-and-Output-Types)
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum OutputType<'a> {
    Object(&'a SchemaObject<'a>),
    Union(&'a SchemaUnion<'a>),
    Interface(&'a SchemaInterface<'a>),
    Scalar(&'a SchemaScalar<'a>),
    Enum(&'a SchemaEnum<'a>),
}

impl<'a> OutputType<'a> {
    #[inline]
    pub fn name(&self) -> &'a str {
        match self {
            OutputType::Object(x) => x.name,
            OutputType::Union(x) => x.name,
            OutputType::Interface(x) => x.name,
            OutputType::Scalar(x) => x.name,
            OutputType::Enum(x) => x.name,
        }
    }

    /// Returns the fields of an object or interface type in declaration order.
    ///
    /// Unions, scalars and enums have no fields that may be selected directly.
    #[inline]
    pub fn fields(&self) -> Option<&'a [&'a SchemaField<'a>]> {
        match *self {
            OutputType::Object(object) => Some(object.fields.as_slice()),
            OutputType::Interface(interface) => Some(interface.fields.as_slice()),
            _ => None,
        }
    }

    /// Returns a field by name on an object or interface type.
    #[inline]
    pub fn field(&self, name: &str) -> Option<&'a SchemaField<'a>> {
        match *self {
            OutputType::Object(object) => object.fields.get(name),
            OutputType::Interface(interface) => interface.fields.get(name),
            _ => None,
        }
    }
}

/// A reference to a named type with its list and non-null wrappers, as used by fields, arguments
/// and input fields.
#[derive(Clone, Copy)]
pub enum TypeRef<'a> {
    Type(&'a str),
    ListType(&'a TypeRef<'a>),
    NonNullType(&'a TypeRef<'a>),
}

impl<'a> TypeRef<'a> {
    /// Returns the name of the type inside of all wrappers.
    #[inline]
    pub fn name(&self) -> &'a str {
        match *self {
            TypeRef::Type(name) => name,
            TypeRef::ListType(of_type) => of_type.name(),
            TypeRef::NonNullType(of_type) => of_type.name(),
        }
    }

    #[inline]
    pub fn is_non_null(&self) -> bool {
        matches!(self, TypeRef::NonNullType(_))
    }

    /// Strips the outermost non-null wrapper, if there's one.
    #[inline]
    pub fn nullable(&self) -> TypeRef<'a> {
        match *self {
            TypeRef::NonNullType(of_type) => *of_type,
            other => other,
        }
    }

    /// Converts this reference into a query language [Type] allocated in the given context.
    ///
    /// The context may be a query's own context rather than the one the schema lives in, which is
    /// why type names are copied over.
    pub fn to_ast_type<'b>(&self, ctx: &'b ASTContext) -> Type<'b> {
        match *self {
            TypeRef::Type(name) => Type::NamedType(NamedType {
                name: ctx.alloc_str(name),
            }),
            TypeRef::ListType(of_type) => of_type.to_ast_type(ctx).into_list(ctx),
            TypeRef::NonNullType(of_type) => of_type.to_ast_type(ctx).into_nonnull(ctx),
        }
    }
}

/// Prints the reference as it'd be written in a variable definition, e.g. `[ID!]!`.
impl<'a> fmt::Display for TypeRef<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Type(name) => f.write_str(name),
            TypeRef::ListType(of_type) => write!(f, "[{}]", of_type),
            TypeRef::NonNullType(of_type) => write!(f, "{}!", of_type),
        }
    }
}

/// Prints the wrappers around a type's name without following the name into the schema.
impl<'a> fmt::Debug for TypeRef<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(arg0) => f.debug_tuple("Type").field(&arg0).finish(),
            Self::ListType(arg0) => f.debug_tuple("ListType").field(arg0).finish(),
            Self::NonNullType(arg0) => f.debug_tuple("NonNullType").field(arg0).finish(),
        }
    }
}

/// Type references are compared by type names only, which is all that's needed to compare them.
impl<'a> PartialEq for TypeRef<'a> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Type(left), Self::Type(right)) => left == right,
            (Self::ListType(left), Self::ListType(right)) => left == right,
            (Self::NonNullType(left), Self::NonNullType(right)) => left == right,
            _ => false,
        }
    }
}
