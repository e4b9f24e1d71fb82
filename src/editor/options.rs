#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

/// The deepest level below a path that recursive additions will ever descend to.
pub const MAX_RECURSION_DEPTH: usize = 6;

/// How the types that a recursive addition already expanded are tracked across sibling fields.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "json", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "camelCase"))]
pub enum VisitedTypes {
    /// One list of expanded types is shared by the entire addition, so a type that's been
    /// expanded below one field is only added as a leaf below every later field.
    #[default]
    Shared,
    /// Every field starts out with the types expanded by its ancestors only, so repeated types are
    /// expanded below every sibling, while cycles are still cut off.
    PerBranch,
}

/// Options that change how a [`QueryEditor`](super::QueryEditor) edits query text.
///
/// With the `json` feature enabled, options may be deserialized from camel-cased keys, with any
/// missing keys falling back to their defaults:
///
/// ```
/// # #[cfg(feature = "json")]
/// # {
/// use graphql_query_builder::editor::{EditorOptions, VisitedTypes};
///
/// let options: EditorOptions =
///     serde_json::from_str(r#"{ "visitedTypes": "perBranch", "recursionDepth": 3 }"#).unwrap();
/// assert_eq!(options.visited_types, VisitedTypes::PerBranch);
/// assert_eq!(options.recursion_depth, 3);
/// assert!(options.heal_fallback);
/// # }
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "json", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "camelCase", default))]
pub struct EditorOptions {
    /// How many levels below a path recursive additions add fields at. Values above
    /// [`MAX_RECURSION_DEPTH`] are clamped.
    pub recursion_depth: usize,
    /// How expanded types are tracked during recursive additions.
    pub visited_types: VisitedTypes,
    /// Whether variable definitions that are no longer used by any argument are removed when
    /// arguments or fields are removed.
    pub prune_unused_variables: bool,
    /// Whether query text that doesn't parse is parsed again after stripping `{}` blocks from it.
    pub heal_fallback: bool,
}

impl EditorOptions {
    /// Returns the recursion depth clamped to [`MAX_RECURSION_DEPTH`].
    #[inline]
    pub fn max_depth(&self) -> usize {
        self.recursion_depth.min(MAX_RECURSION_DEPTH)
    }
}

impl Default for EditorOptions {
    fn default() -> Self {
        EditorOptions {
            recursion_depth: MAX_RECURSION_DEPTH,
            visited_types: VisitedTypes::Shared,
            prune_unused_variables: false,
            heal_fallback: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_depth() {
        let options = EditorOptions {
            recursion_depth: 40,
            ..EditorOptions::default()
        };
        assert_eq!(options.max_depth(), MAX_RECURSION_DEPTH);

        let options = EditorOptions {
            recursion_depth: 2,
            ..EditorOptions::default()
        };
        assert_eq!(options.max_depth(), 2);
    }

    #[cfg(feature = "json")]
    #[test]
    fn deserialize_defaults() {
        let options: EditorOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, EditorOptions::default());

        let options: EditorOptions =
            serde_json::from_str(r#"{ "pruneUnusedVariables": true, "healFallback": false }"#)
                .unwrap();
        assert!(options.prune_unused_variables);
        assert!(!options.heal_fallback);
        assert_eq!(options.visited_types, VisitedTypes::Shared);
    }
}
