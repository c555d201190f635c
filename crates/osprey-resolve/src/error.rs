use miette::{Diagnostic, SourceSpan};
use osprey_syntax::NodeId;
use thiserror::Error;

use crate::Namespace;

/// User-facing resolution errors.
///
/// These never abort resolution; they are collected and the offending
/// path simply stays unresolved.
#[derive(Debug, Error, Diagnostic, Clone, Hash, PartialEq, Eq)]
pub enum ResolveError {
    /// The same path was declared twice in one scope of one namespace.
    #[error("`{name}` redefined multiple times")]
    #[diagnostic(code(osprey_resolve::duplicate_definition))]
    DuplicateDefinition {
        /// Path of the earlier binding, relative to its scope.
        name: String,
        #[label("redefined here")]
        span: SourceSpan,
        #[label("previous definition here")]
        previous_span: SourceSpan,
    },

    /// Two generic parameters of one item share a name.
    #[error("generic param redefined multiple times")]
    #[diagnostic(code(osprey_resolve::generic_param_redefined))]
    GenericParamRedefined {
        /// The repeated parameter name.
        name: String,
        #[label("`{name}` redefined here")]
        span: SourceSpan,
        #[label("first declared here")]
        previous_span: SourceSpan,
    },

    /// `super` used where the current module is the crate root.
    #[error("cannot use `super` at the crate scope")]
    #[diagnostic(
        code(osprey_resolve::super_at_crate_scope),
        help("the crate root has no parent module")
    )]
    SuperAtCrateScope {
        #[label("`super` used here")]
        span: SourceSpan,
    },

    /// A later segment of a multi-segment path is not a child of the
    /// module (or enum, or trait) named by the segments before it.
    #[error("cannot find path `{path}` in this scope")]
    #[diagnostic(code(osprey_resolve::cannot_find_path))]
    CannotFindPath {
        /// Text of the segment that was not found.
        path: String,
        #[label("not found")]
        span: SourceSpan,
    },

    /// The first segment of a path names nothing visible from here.
    #[error("failed to resolve path: `{name}` in this scope")]
    #[diagnostic(
        code(osprey_resolve::failed_to_resolve_path),
        help("Is `{name}` declared in this module or one of its parents?")
    )]
    FailedToResolvePath {
        /// The unresolved name.
        name: String,
        #[label("not found in this scope")]
        span: SourceSpan,
    },

    /// The parser could not make sense of a path segment.
    #[error("segment has error: `{segment}`")]
    #[diagnostic(code(osprey_resolve::segment_has_error))]
    SegmentHasError {
        /// Rendered text of the malformed segment.
        segment: String,
        #[label("malformed segment")]
        span: SourceSpan,
    },

    /// A path names a declaration whose visibility does not reach the
    /// module the path appears in.
    #[error("`{name}` is private")]
    #[diagnostic(code(osprey_resolve::private_item))]
    PrivateItem {
        /// The segment naming the private declaration.
        name: String,
        #[label("private item used here")]
        span: SourceSpan,
        #[label("declared here")]
        declared_span: SourceSpan,
    },
}

impl ResolveError {
    /// Primary location of the error.
    pub fn span(&self) -> SourceSpan {
        match self {
            ResolveError::DuplicateDefinition { span, .. }
            | ResolveError::GenericParamRedefined { span, .. }
            | ResolveError::SuperAtCrateScope { span }
            | ResolveError::CannotFindPath { span, .. }
            | ResolveError::FailedToResolvePath { span, .. }
            | ResolveError::SegmentHasError { span, .. }
            | ResolveError::PrivateItem { span, .. } => *span,
        }
    }
}

/// Internal consistency violations.
///
/// Any of these means an earlier step of the resolver broke one of its own
/// bookkeeping rules. They are fatal and never caused by user input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A module was peeked or popped with no module open.
    #[error("module stack is empty")]
    ModuleStackUnderflow,

    #[error("popped module {found} while {expected} was expected on top")]
    UnbalancedModuleStack { expected: NodeId, found: NodeId },

    #[error("{namespace} scope has no open frame")]
    ScopeStackUnderflow { namespace: Namespace },

    #[error("{namespace} scope popped frame {found} while {expected} was expected on top")]
    UnbalancedScopeStack { namespace: Namespace, expected: NodeId, found: NodeId },

    /// A path resolved to an id that neither scope ever bound.
    #[error("declaration {id} resolved but is registered in neither namespace")]
    UnclassifiedDeclaration { id: NodeId },

    #[error("declaration {id} has no canonical path")]
    MissingCanonicalPath { id: NodeId },

    /// One id was given two different canonical paths.
    #[error("canonical path of {id} re-inserted as `{new}`, already `{existing}`")]
    CanonicalPathConflict { id: NodeId, existing: String, new: String },
}

/// Result of every resolution step. `Err` is reserved for invariant
/// violations; user errors go to the diagnostics collector.
pub type ResolveResult<T> = std::result::Result<T, InvariantViolation>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_the_reported_wording() {
        let dup = ResolveError::DuplicateDefinition {
            name: "g".to_string(),
            span: (10, 1).into(),
            previous_span: (2, 1).into(),
        };
        assert_eq!(dup.to_string(), "`g` redefined multiple times");
        assert_eq!(dup.span(), SourceSpan::from((10, 1)));

        let sup = ResolveError::SuperAtCrateScope { span: (0, 5).into() };
        assert_eq!(sup.to_string(), "cannot use `super` at the crate scope");

        let failed = ResolveError::FailedToResolvePath { name: "nosuch".to_string(), span: (3, 6).into() };
        assert_eq!(failed.to_string(), "failed to resolve path: `nosuch` in this scope");
    }

    #[test]
    fn duplicate_carries_both_locations() {
        let dup = ResolveError::DuplicateDefinition {
            name: "g".to_string(),
            span: (10, 1).into(),
            previous_span: (2, 1).into(),
        };
        let offsets: Vec<usize> = dup.labels().into_iter().flatten().map(|l| l.offset()).collect();
        assert_eq!(offsets, vec![10, 2]);
    }
}
