use miette::SourceSpan;

use super::types::Type;
use crate::NodeId;

/// A (possibly multi-segment) path such as `crate::a::B<T>`.
///
/// The same node shape is used for paths in type position, in trait bounds
/// and in expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub id: NodeId,
    pub segments: Vec<PathSegment>,
    pub span: SourceSpan,
}

impl Path {
    pub fn is_single_segment(&self) -> bool {
        self.segments.len() == 1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathSegment {
    pub id: NodeId,
    pub ident: PathIdent,
    pub generic_args: Option<GenericArgs>,
    pub span: SourceSpan,
}

/// What a single path segment names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathIdent {
    Ident(String),
    /// `crate`
    Crate,
    /// `super`
    Super,
    /// `self` in path position, naming the current module.
    SelfModule,
    /// Parser recovery placeholder for a segment that failed to parse.
    Error,
}

impl PathIdent {
    pub fn as_str(&self) -> &str {
        match self {
            PathIdent::Ident(name) => name,
            PathIdent::Crate => "crate",
            PathIdent::Super => "super",
            PathIdent::SelfModule => "self",
            PathIdent::Error => "<error>",
        }
    }
}

impl PathSegment {
    pub fn is_crate_path_seg(&self) -> bool {
        self.ident == PathIdent::Crate
    }

    pub fn is_super_path_seg(&self) -> bool {
        self.ident == PathIdent::Super
    }

    pub fn is_self_module_seg(&self) -> bool {
        self.ident == PathIdent::SelfModule
    }

    pub fn is_error(&self) -> bool {
        self.ident == PathIdent::Error
    }

    pub fn has_generic_args(&self) -> bool {
        self.generic_args.as_ref().is_some_and(|args| !args.types.is_empty())
    }

    pub fn ident_str(&self) -> &str {
        self.ident.as_str()
    }
}

/// `<A, B>` attached to a path segment.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericArgs {
    pub types: Vec<Type>,
    pub span: SourceSpan,
}

/// The `<Type as Trait>` (or bare `<Type>`) head of a qualified path.
#[derive(Debug, Clone, PartialEq)]
pub struct QualifiedPathType {
    pub id: NodeId,
    pub self_ty: Box<Type>,
    pub as_trait: Option<Path>,
    pub span: SourceSpan,
}

impl QualifiedPathType {
    pub fn has_as_clause(&self) -> bool {
        self.as_trait.is_some()
    }
}

/// `<Type as Trait>::Assoc::More` in type position.
#[derive(Debug, Clone, PartialEq)]
pub struct QualifiedPathInType {
    pub id: NodeId,
    pub qualified: QualifiedPathType,
    /// The mandatory segment right after the qualifier.
    pub associated: PathSegment,
    /// Any further trailing segments.
    pub segments: Vec<PathSegment>,
    pub span: SourceSpan,
}
