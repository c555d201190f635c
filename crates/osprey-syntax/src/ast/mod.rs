pub mod common;
pub mod expr;
pub mod items;
pub mod path;
pub mod types;

pub use common::{Ident, Literal, Visibility};
pub use expr::{BinaryOp, Block, Expr, ExprKind, Pattern, PatternKind, Stmt, StmtKind, UnaryOp};
pub use items::{
    AssocType, Const, Crate, Enum, EnumVariant, ExternBlock, ExternItem, ExternItemKind,
    Function, GenericParam, GenericParamKind, Generics, ImplItem, ImplItemKind, InherentImpl,
    Item, ItemKind, Module, Param, SelfParam, Static, Struct, StructField, Trait, TraitImpl,
    TraitItem, TraitItemKind, TupleField, TupleStruct, TypeAlias, Union, VariantKind,
    WhereClause, WherePredicate,
};
pub use path::{GenericArgs, Path, PathIdent, PathSegment, QualifiedPathInType, QualifiedPathType};
pub use types::{BareFnParam, PointerMutability, TraitBound, Type, TypeKind, TypeParamBound};
