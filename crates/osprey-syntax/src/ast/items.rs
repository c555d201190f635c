use miette::SourceSpan;

use super::common::{Ident, Visibility};
use super::expr::{Block, Expr, Pattern};
use super::path::Path;
use super::types::{Type, TypeParamBound};
use crate::NodeId;

/// A whole compilation unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Crate {
    /// Id of the crate root module.
    pub id: NodeId,
    pub items: Vec<Item>,
    /// First id not used by any node of this tree. Later phases allocate
    /// synthetic ids from here on.
    pub id_bound: NodeId,
    pub span: SourceSpan,
}

/// An item in the AST (module, function, type definition, impl, ...)
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: NodeId,
    pub vis: Visibility,
    pub kind: ItemKind,
    pub span: SourceSpan,
}

impl Item {
    pub fn with_vis(mut self, vis: Visibility) -> Self {
        self.vis = vis;
        self
    }

    pub fn public(self) -> Self {
        self.with_vis(Visibility::Public)
    }

    /// Declared name, if the item declares one.
    pub fn name(&self) -> Option<&Ident> {
        match &self.kind {
            ItemKind::Module(m) => Some(&m.name),
            ItemKind::TypeAlias(a) => Some(&a.name),
            ItemKind::Struct(s) => Some(&s.name),
            ItemKind::TupleStruct(s) => Some(&s.name),
            ItemKind::Enum(e) => Some(&e.name),
            ItemKind::Union(u) => Some(&u.name),
            ItemKind::Static(s) => Some(&s.name),
            ItemKind::Const(c) => Some(&c.name),
            ItemKind::Function(f) => Some(&f.name),
            ItemKind::Trait(t) => Some(&t.name),
            ItemKind::InherentImpl(_) | ItemKind::TraitImpl(_) | ItemKind::ExternBlock(_) => None,
        }
    }

    pub fn generics_mut(&mut self) -> Option<&mut Generics> {
        match &mut self.kind {
            ItemKind::TypeAlias(a) => Some(&mut a.generics),
            ItemKind::Struct(s) => Some(&mut s.generics),
            ItemKind::TupleStruct(s) => Some(&mut s.generics),
            ItemKind::Enum(e) => Some(&mut e.generics),
            ItemKind::Union(u) => Some(&mut u.generics),
            ItemKind::Function(f) => Some(&mut f.generics),
            ItemKind::InherentImpl(i) => Some(&mut i.generics),
            ItemKind::TraitImpl(i) => Some(&mut i.generics),
            ItemKind::Trait(t) => Some(&mut t.generics),
            ItemKind::Module(_) | ItemKind::Static(_) | ItemKind::Const(_) | ItemKind::ExternBlock(_) => None,
        }
    }

    /// Attach generics to an item that accepts them; other items are returned unchanged.
    pub fn with_generics(mut self, generics: Generics) -> Self {
        if let Some(slot) = self.generics_mut() {
            *slot = generics;
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    Module(Module),
    TypeAlias(TypeAlias),
    Struct(Struct),
    TupleStruct(TupleStruct),
    Enum(Enum),
    Union(Union),
    Static(Static),
    Const(Const),
    Function(Function),
    InherentImpl(InherentImpl),
    TraitImpl(TraitImpl),
    Trait(Trait),
    ExternBlock(ExternBlock),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub name: Ident,
    pub items: Vec<Item>,
}

/// `type Name<G> = Ty;`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAlias {
    pub name: Ident,
    pub generics: Generics,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Struct {
    pub name: Ident,
    pub generics: Generics,
    pub fields: Vec<StructField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructField {
    pub id: NodeId,
    pub vis: Visibility,
    pub name: Ident,
    pub ty: Type,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TupleStruct {
    pub name: Ident,
    pub generics: Generics,
    pub fields: Vec<TupleField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TupleField {
    pub id: NodeId,
    pub vis: Visibility,
    pub ty: Type,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enum {
    pub name: Ident,
    pub generics: Generics,
    pub variants: Vec<EnumVariant>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumVariant {
    pub id: NodeId,
    pub name: Ident,
    pub kind: VariantKind,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VariantKind {
    Unit,
    Tuple(Vec<TupleField>),
    Struct(Vec<StructField>),
    /// `Name = expr`
    Discriminant(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Union {
    pub name: Ident,
    pub generics: Generics,
    pub fields: Vec<StructField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Static {
    pub name: Ident,
    pub mutable: bool,
    pub ty: Type,
    pub init: Option<Expr>,
}

/// `const NAME: Ty = init;` The initializer is optional inside traits.
#[derive(Debug, Clone, PartialEq)]
pub struct Const {
    pub name: Ident,
    pub ty: Type,
    pub init: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: Ident,
    pub generics: Generics,
    pub self_param: Option<SelfParam>,
    pub params: Vec<Param>,
    pub ret: Option<Type>,
    /// `None` for trait method declarations and extern functions.
    pub body: Option<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelfParam {
    pub id: NodeId,
    pub by_ref: bool,
    pub mutable: bool,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub id: NodeId,
    pub pattern: Pattern,
    pub ty: Type,
    pub span: SourceSpan,
}

/// `impl<G> Type { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct InherentImpl {
    pub generics: Generics,
    pub self_ty: Type,
    pub items: Vec<ImplItem>,
}

/// `impl<G> Trait for Type { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct TraitImpl {
    pub generics: Generics,
    pub trait_path: Path,
    pub self_ty: Type,
    pub items: Vec<ImplItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImplItem {
    pub id: NodeId,
    pub vis: Visibility,
    pub kind: ImplItemKind,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImplItemKind {
    Function(Function),
    Const(Const),
    TypeAlias(TypeAlias),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trait {
    pub name: Ident,
    pub generics: Generics,
    pub supertraits: Vec<TypeParamBound>,
    pub items: Vec<TraitItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TraitItem {
    pub id: NodeId,
    pub kind: TraitItemKind,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TraitItemKind {
    Function(Function),
    Const(Const),
    Type(AssocType),
}

/// `type Name: Bounds;` inside a trait.
#[derive(Debug, Clone, PartialEq)]
pub struct AssocType {
    pub name: Ident,
    pub bounds: Vec<TypeParamBound>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExternBlock {
    pub abi: Option<String>,
    pub items: Vec<ExternItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExternItem {
    pub id: NodeId,
    pub vis: Visibility,
    pub kind: ExternItemKind,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExternItemKind {
    Function(Function),
    Static { name: Ident, mutable: bool, ty: Type },
}

/// Generic parameters plus an optional where clause.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Generics {
    pub params: Vec<GenericParam>,
    pub where_clause: Option<WhereClause>,
}

impl Generics {
    pub fn new(params: Vec<GenericParam>) -> Self {
        Self { params, where_clause: None }
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenericParam {
    pub id: NodeId,
    pub name: Ident,
    pub kind: GenericParamKind,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GenericParamKind {
    Type {
        bounds: Vec<TypeParamBound>,
        default: Option<Type>,
    },
    Const {
        ty: Type,
        default: Option<Expr>,
    },
    Lifetime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    pub predicates: Vec<WherePredicate>,
    pub span: SourceSpan,
}

/// `Ty: Bound + Bound` inside a where clause.
#[derive(Debug, Clone, PartialEq)]
pub struct WherePredicate {
    pub id: NodeId,
    pub ty: Type,
    pub bounds: Vec<TypeParamBound>,
    pub span: SourceSpan,
}
