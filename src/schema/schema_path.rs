use crate::{
    ast::{parser::MAX_NESTING, OperationKind},
    error::{Error, ErrorType, Result},
};
use std::fmt;

/// A dot-delimited address of a field in both the schema and a query, e.g. `query.user.name`.
///
/// The first segment names the kind of operation whose root type the path starts from. Every
/// following segment names a field, never a type, on the type that the previous segment
/// resolved to. A path without any field segments, e.g. `mutation`, addresses the root type
/// itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaPath<'p> {
    pub operation: OperationKind,
    pub segments: Vec<&'p str>,
}

impl<'p> SchemaPath<'p> {
    /// Parses a path from its dot-delimited notation.
    pub fn parse(path: &'p str) -> Result<Self> {
        let mut parts = path.split('.');
        let keyword = parts.next().unwrap_or_default();
        let operation = OperationKind::from_keyword(keyword).ok_or_else(|| {
            Error::new_with_context(
                format!("Unknown operation type \"{}\"", keyword),
                None,
                path.to_string(),
                Some(ErrorType::Path),
            )
        })?;
        let segments = parts.collect::<Vec<_>>();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(Error::new_with_context(
                "Empty path segment".to_string(),
                None,
                path.to_string(),
                Some(ErrorType::Path),
            ));
        }
        // Every field but the last opens a selection set, which a query may only nest so deeply
        if segments.len() > MAX_NESTING {
            return Err(Error::new(
                format!("Path is nested deeper than {} fields", MAX_NESTING),
                Some(ErrorType::Path),
            ));
        }
        Ok(SchemaPath {
            operation,
            segments,
        })
    }

    /// Creates a path that addresses the root type of an operation kind.
    #[inline]
    pub fn root(operation: OperationKind) -> Self {
        SchemaPath {
            operation,
            segments: Vec::new(),
        }
    }

    /// Checks whether this path addresses an operation's root type rather than a field.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the name of the addressed field.
    #[inline]
    pub fn field_name(&self) -> Option<&'p str> {
        self.segments.last().copied()
    }

    /// Returns a new path that addresses the field `name` on the type addressed by this path.
    pub fn child<'c>(&self, name: &'c str) -> SchemaPath<'c>
    where
        'p: 'c,
    {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(name);
        SchemaPath {
            operation: self.operation,
            segments,
        }
    }
}

impl<'p> TryFrom<&'p str> for SchemaPath<'p> {
    type Error = Error;

    #[inline]
    fn try_from(path: &'p str) -> Result<Self> {
        SchemaPath::parse(path)
    }
}

impl<'p> fmt::Display for SchemaPath<'p> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operation.as_str())?;
        for segment in self.segments.iter() {
            write!(f, ".{}", segment)?;
        }
        Ok(())
    }
}
