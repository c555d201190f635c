use miette::SourceSpan;

use super::common::Ident;
use super::expr::Expr;
use super::path::{Path, QualifiedPathInType};
use crate::NodeId;

#[derive(Debug, Clone, PartialEq)]
pub struct Type {
    pub id: NodeId,
    pub kind: TypeKind,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Path(Path),
    QualifiedPath(QualifiedPathInType),
    /// `()` when empty.
    Tuple(Vec<Type>),
    Array {
        elem: Box<Type>,
        size: Box<Expr>,
    },
    Slice(Box<Type>),
    Reference {
        mutable: bool,
        inner: Box<Type>,
    },
    RawPointer {
        mutability: PointerMutability,
        inner: Box<Type>,
    },
    /// `dyn Trait` with exactly one bound.
    TraitObjectOneBound(TraitBound),
    /// `dyn A + B + 'a`
    TraitObject(Vec<TypeParamBound>),
    BareFunction {
        params: Vec<BareFnParam>,
        ret: Option<Box<Type>>,
    },
    /// `_`
    Inferred,
    /// `!`
    Never,
}

impl Type {
    pub fn is_unit(&self) -> bool {
        matches!(&self.kind, TypeKind::Tuple(elems) if elems.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerMutability {
    Const,
    Mut,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TraitBound {
    pub id: NodeId,
    pub path: Path,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeParamBound {
    Trait(TraitBound),
    Lifetime(Ident),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BareFnParam {
    pub id: NodeId,
    pub name: Option<Ident>,
    pub ty: Type,
}
