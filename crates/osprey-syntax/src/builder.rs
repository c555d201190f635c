//! Programmatic construction of syntax trees.
//!
//! Stands in for the parser when embedding the resolver or writing tests.
//! Every node gets a fresh [`NodeId`] and a distinct span, so diagnostics can
//! be matched back to the exact node that triggered them.

use miette::SourceSpan;

use crate::ast::*;
use crate::{NodeId, NodeIdGen};

#[derive(Debug)]
pub struct AstBuilder {
    ids: NodeIdGen,
    crate_id: NodeId,
    offset: usize,
}

impl Default for AstBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AstBuilder {
    pub fn new() -> Self {
        let mut ids = NodeIdGen::new();
        let crate_id = ids.fresh();
        Self { ids, crate_id, offset: 0 }
    }

    pub fn crate_id(&self) -> NodeId {
        self.crate_id
    }

    pub fn fresh_id(&mut self) -> NodeId {
        self.ids.fresh()
    }

    pub fn span(&mut self) -> SourceSpan {
        let span = SourceSpan::from((self.offset, 1));
        self.offset += 2;
        span
    }

    /// Finish the tree. The crate's id bound covers every id handed out so far.
    pub fn finish(mut self, items: Vec<Item>) -> Crate {
        let span = self.span();
        Crate { id: self.crate_id, items, id_bound: self.ids.bound(), span }
    }

    pub fn ident(&mut self, name: &str) -> Ident {
        Ident { name: name.to_string(), span: self.span() }
    }

    // --- paths ---

    pub fn segment(&mut self, name: &str) -> PathSegment {
        let ident = match name {
            "crate" => PathIdent::Crate,
            "super" => PathIdent::Super,
            "self" => PathIdent::SelfModule,
            other => PathIdent::Ident(other.to_string()),
        };
        PathSegment { id: self.fresh_id(), ident, generic_args: None, span: self.span() }
    }

    pub fn segment_with_args(&mut self, name: &str, args: Vec<Type>) -> PathSegment {
        let mut segment = self.segment(name);
        segment.generic_args = Some(GenericArgs { types: args, span: self.span() });
        segment
    }

    pub fn error_segment(&mut self) -> PathSegment {
        PathSegment { id: self.fresh_id(), ident: PathIdent::Error, generic_args: None, span: self.span() }
    }

    pub fn path(&mut self, names: &[&str]) -> Path {
        let segments = names.iter().map(|name| self.segment(name)).collect();
        self.path_from_segments(segments)
    }

    pub fn path_from_segments(&mut self, segments: Vec<PathSegment>) -> Path {
        Path { id: self.fresh_id(), segments, span: self.span() }
    }

    // --- types ---

    pub fn ty(&mut self, kind: TypeKind) -> Type {
        Type { id: self.fresh_id(), kind, span: self.span() }
    }

    pub fn ty_path(&mut self, names: &[&str]) -> Type {
        let path = self.path(names);
        self.ty_from_path(path)
    }

    pub fn ty_from_path(&mut self, path: Path) -> Type {
        self.ty(TypeKind::Path(path))
    }

    /// Single-segment generic type such as `Vec<T>`.
    pub fn ty_generic(&mut self, name: &str, args: Vec<Type>) -> Type {
        let segment = self.segment_with_args(name, args);
        let path = self.path_from_segments(vec![segment]);
        self.ty_from_path(path)
    }

    pub fn ty_unit(&mut self) -> Type {
        self.ty(TypeKind::Tuple(Vec::new()))
    }

    pub fn ty_tuple(&mut self, elems: Vec<Type>) -> Type {
        self.ty(TypeKind::Tuple(elems))
    }

    pub fn ty_ref(&mut self, mutable: bool, inner: Type) -> Type {
        self.ty(TypeKind::Reference { mutable, inner: Box::new(inner) })
    }

    pub fn ty_ptr(&mut self, mutability: PointerMutability, inner: Type) -> Type {
        self.ty(TypeKind::RawPointer { mutability, inner: Box::new(inner) })
    }

    pub fn ty_slice(&mut self, elem: Type) -> Type {
        self.ty(TypeKind::Slice(Box::new(elem)))
    }

    pub fn ty_array(&mut self, elem: Type, size: Expr) -> Type {
        self.ty(TypeKind::Array { elem: Box::new(elem), size: Box::new(size) })
    }

    pub fn ty_never(&mut self) -> Type {
        self.ty(TypeKind::Never)
    }

    pub fn ty_inferred(&mut self) -> Type {
        self.ty(TypeKind::Inferred)
    }

    /// `dyn Path`
    pub fn ty_dyn(&mut self, path: Path) -> Type {
        let bound = TraitBound { id: self.fresh_id(), path, span: self.span() };
        self.ty(TypeKind::TraitObjectOneBound(bound))
    }

    /// `dyn A + B`
    pub fn ty_dyn_bounds(&mut self, paths: Vec<Path>) -> Type {
        let bounds = paths.into_iter().map(|path| self.trait_bound(path)).collect();
        self.ty(TypeKind::TraitObject(bounds))
    }

    pub fn ty_bare_fn(&mut self, params: Vec<Type>, ret: Option<Type>) -> Type {
        let params = params
            .into_iter()
            .map(|ty| BareFnParam { id: self.fresh_id(), name: None, ty })
            .collect();
        self.ty(TypeKind::BareFunction { params, ret: ret.map(Box::new) })
    }

    /// `<self_ty as as_trait>::assoc::rest...`
    pub fn ty_qualified(
        &mut self,
        self_ty: Type,
        as_trait: Option<Path>,
        assoc: &str,
        rest: &[&str],
    ) -> Type {
        let qualified = QualifiedPathType {
            id: self.fresh_id(),
            self_ty: Box::new(self_ty),
            as_trait,
            span: self.span(),
        };
        let associated = self.segment(assoc);
        let segments = rest.iter().map(|name| self.segment(name)).collect();
        let path = QualifiedPathInType {
            id: self.fresh_id(),
            qualified,
            associated,
            segments,
            span: self.span(),
        };
        self.ty(TypeKind::QualifiedPath(path))
    }

    // --- generics ---

    pub fn trait_bound(&mut self, path: Path) -> TypeParamBound {
        TypeParamBound::Trait(TraitBound { id: self.fresh_id(), path, span: self.span() })
    }

    pub fn lifetime_bound(&mut self, name: &str) -> TypeParamBound {
        TypeParamBound::Lifetime(self.ident(name))
    }

    pub fn type_param(&mut self, name: &str, bounds: Vec<TypeParamBound>) -> GenericParam {
        self.generic_param(name, GenericParamKind::Type { bounds, default: None })
    }

    pub fn type_param_with_default(
        &mut self,
        name: &str,
        bounds: Vec<TypeParamBound>,
        default: Type,
    ) -> GenericParam {
        self.generic_param(name, GenericParamKind::Type { bounds, default: Some(default) })
    }

    pub fn const_param(&mut self, name: &str, ty: Type) -> GenericParam {
        self.generic_param(name, GenericParamKind::Const { ty, default: None })
    }

    fn generic_param(&mut self, name: &str, kind: GenericParamKind) -> GenericParam {
        GenericParam { id: self.fresh_id(), name: self.ident(name), kind, span: self.span() }
    }

    pub fn where_predicate(&mut self, ty: Type, bounds: Vec<TypeParamBound>) -> WherePredicate {
        WherePredicate { id: self.fresh_id(), ty, bounds, span: self.span() }
    }

    pub fn where_clause(&mut self, predicates: Vec<WherePredicate>) -> WhereClause {
        WhereClause { predicates, span: self.span() }
    }

    // --- expressions ---

    pub fn expr(&mut self, kind: ExprKind) -> Expr {
        Expr { id: self.fresh_id(), kind, span: self.span() }
    }

    pub fn lit_int(&mut self, value: i128) -> Expr {
        self.expr(ExprKind::Literal(Literal::Int(value)))
    }

    pub fn expr_path(&mut self, names: &[&str]) -> Expr {
        let path = self.path(names);
        self.expr(ExprKind::Path(path))
    }

    pub fn binary(&mut self, op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
        self.expr(ExprKind::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) })
    }

    pub fn call(&mut self, callee: Expr, args: Vec<Expr>) -> Expr {
        self.expr(ExprKind::Call { callee: Box::new(callee), args })
    }

    pub fn binding(&mut self, name: &str) -> Pattern {
        let name = self.ident(name);
        Pattern { id: self.fresh_id(), kind: PatternKind::Binding { name, mutable: false }, span: self.span() }
    }

    pub fn let_stmt(&mut self, name: &str, ty: Option<Type>, init: Option<Expr>) -> Stmt {
        let pattern = self.binding(name);
        Stmt { id: self.fresh_id(), kind: StmtKind::Let { pattern, ty, init }, span: self.span() }
    }

    pub fn expr_stmt(&mut self, expr: Expr) -> Stmt {
        Stmt { id: self.fresh_id(), kind: StmtKind::Expr(expr), span: self.span() }
    }

    pub fn block(&mut self, stmts: Vec<Stmt>, tail: Option<Expr>) -> Block {
        Block { id: self.fresh_id(), stmts, tail: tail.map(Box::new), span: self.span() }
    }

    // --- items ---

    pub fn item(&mut self, kind: ItemKind) -> Item {
        Item { id: self.fresh_id(), vis: Visibility::Private, kind, span: self.span() }
    }

    pub fn module(&mut self, name: &str, items: Vec<Item>) -> Item {
        let name = self.ident(name);
        self.item(ItemKind::Module(Module { name, items }))
    }

    /// Bodiless function signature with no parameters.
    pub fn function(&mut self, name: &str) -> Function {
        Function {
            name: self.ident(name),
            generics: Generics::default(),
            self_param: None,
            params: Vec::new(),
            ret: None,
            body: None,
        }
    }

    /// `fn name() {}`
    pub fn fn_item(&mut self, name: &str) -> Item {
        let mut function = self.function(name);
        function.body = Some(self.block(Vec::new(), None));
        self.item(ItemKind::Function(function))
    }

    pub fn fn_item_from(&mut self, function: Function) -> Item {
        self.item(ItemKind::Function(function))
    }

    pub fn param(&mut self, name: &str, ty: Type) -> Param {
        let pattern = self.binding(name);
        Param { id: self.fresh_id(), pattern, ty, span: self.span() }
    }

    pub fn self_param(&mut self, by_ref: bool, mutable: bool) -> SelfParam {
        SelfParam { id: self.fresh_id(), by_ref, mutable, span: self.span() }
    }

    pub fn struct_field(&mut self, name: &str, ty: Type) -> StructField {
        StructField {
            id: self.fresh_id(),
            vis: Visibility::Private,
            name: self.ident(name),
            ty,
            span: self.span(),
        }
    }

    fn struct_fields(&mut self, fields: Vec<(&str, Type)>) -> Vec<StructField> {
        fields.into_iter().map(|(name, ty)| self.struct_field(name, ty)).collect()
    }

    pub fn tuple_field(&mut self, ty: Type) -> TupleField {
        TupleField { id: self.fresh_id(), vis: Visibility::Private, ty, span: self.span() }
    }

    fn tuple_fields(&mut self, types: Vec<Type>) -> Vec<TupleField> {
        types.into_iter().map(|ty| self.tuple_field(ty)).collect()
    }

    pub fn struct_item(&mut self, name: &str, fields: Vec<(&str, Type)>) -> Item {
        let name = self.ident(name);
        let fields = self.struct_fields(fields);
        self.item(ItemKind::Struct(Struct { name, generics: Generics::default(), fields }))
    }

    pub fn tuple_struct_item(&mut self, name: &str, fields: Vec<Type>) -> Item {
        let name = self.ident(name);
        let fields = self.tuple_fields(fields);
        self.item(ItemKind::TupleStruct(TupleStruct { name, generics: Generics::default(), fields }))
    }

    pub fn union_item(&mut self, name: &str, fields: Vec<(&str, Type)>) -> Item {
        let name = self.ident(name);
        let fields = self.struct_fields(fields);
        self.item(ItemKind::Union(Union { name, generics: Generics::default(), fields }))
    }

    pub fn enum_item(&mut self, name: &str, variants: Vec<EnumVariant>) -> Item {
        let name = self.ident(name);
        self.item(ItemKind::Enum(Enum { name, generics: Generics::default(), variants }))
    }

    fn variant(&mut self, name: &str, kind: VariantKind) -> EnumVariant {
        EnumVariant { id: self.fresh_id(), name: self.ident(name), kind, span: self.span() }
    }

    pub fn unit_variant(&mut self, name: &str) -> EnumVariant {
        self.variant(name, VariantKind::Unit)
    }

    pub fn tuple_variant(&mut self, name: &str, types: Vec<Type>) -> EnumVariant {
        let fields = self.tuple_fields(types);
        self.variant(name, VariantKind::Tuple(fields))
    }

    pub fn struct_variant(&mut self, name: &str, fields: Vec<(&str, Type)>) -> EnumVariant {
        let fields = self.struct_fields(fields);
        self.variant(name, VariantKind::Struct(fields))
    }

    pub fn discriminant_variant(&mut self, name: &str, value: Expr) -> EnumVariant {
        self.variant(name, VariantKind::Discriminant(value))
    }

    pub fn static_item(&mut self, name: &str, ty: Type, init: Option<Expr>) -> Item {
        let name = self.ident(name);
        self.item(ItemKind::Static(Static { name, mutable: false, ty, init }))
    }

    pub fn const_def(&mut self, name: &str, ty: Type, init: Option<Expr>) -> Const {
        Const { name: self.ident(name), ty, init }
    }

    pub fn const_item(&mut self, name: &str, ty: Type, init: Option<Expr>) -> Item {
        let def = self.const_def(name, ty, init);
        self.item(ItemKind::Const(def))
    }

    pub fn type_alias(&mut self, name: &str, ty: Type) -> TypeAlias {
        TypeAlias { name: self.ident(name), generics: Generics::default(), ty }
    }

    pub fn type_alias_item(&mut self, name: &str, ty: Type) -> Item {
        let alias = self.type_alias(name, ty);
        self.item(ItemKind::TypeAlias(alias))
    }

    pub fn trait_item(&mut self, name: &str, items: Vec<TraitItem>) -> Item {
        let name = self.ident(name);
        self.item(ItemKind::Trait(Trait {
            name,
            generics: Generics::default(),
            supertraits: Vec::new(),
            items,
        }))
    }

    fn trait_member(&mut self, kind: TraitItemKind) -> TraitItem {
        TraitItem { id: self.fresh_id(), kind, span: self.span() }
    }

    pub fn trait_fn(&mut self, function: Function) -> TraitItem {
        self.trait_member(TraitItemKind::Function(function))
    }

    pub fn trait_const(&mut self, name: &str, ty: Type) -> TraitItem {
        let def = self.const_def(name, ty, None);
        self.trait_member(TraitItemKind::Const(def))
    }

    pub fn trait_type(&mut self, name: &str, bounds: Vec<TypeParamBound>) -> TraitItem {
        let name = self.ident(name);
        self.trait_member(TraitItemKind::Type(AssocType { name, bounds }))
    }

    pub fn inherent_impl(&mut self, self_ty: Type, items: Vec<ImplItem>) -> Item {
        self.item(ItemKind::InherentImpl(InherentImpl { generics: Generics::default(), self_ty, items }))
    }

    pub fn trait_impl(&mut self, trait_path: Path, self_ty: Type, items: Vec<ImplItem>) -> Item {
        self.item(ItemKind::TraitImpl(TraitImpl {
            generics: Generics::default(),
            trait_path,
            self_ty,
            items,
        }))
    }

    fn impl_member(&mut self, kind: ImplItemKind) -> ImplItem {
        ImplItem { id: self.fresh_id(), vis: Visibility::Private, kind, span: self.span() }
    }

    pub fn impl_fn(&mut self, function: Function) -> ImplItem {
        self.impl_member(ImplItemKind::Function(function))
    }

    pub fn impl_const(&mut self, name: &str, ty: Type, init: Expr) -> ImplItem {
        let def = self.const_def(name, ty, Some(init));
        self.impl_member(ImplItemKind::Const(def))
    }

    pub fn impl_type(&mut self, name: &str, ty: Type) -> ImplItem {
        let alias = self.type_alias(name, ty);
        self.impl_member(ImplItemKind::TypeAlias(alias))
    }

    pub fn extern_block(&mut self, items: Vec<ExternItem>) -> Item {
        self.item(ItemKind::ExternBlock(ExternBlock { abi: Some("C".to_string()), items }))
    }

    pub fn extern_fn(&mut self, function: Function) -> ExternItem {
        ExternItem {
            id: self.fresh_id(),
            vis: Visibility::Private,
            kind: ExternItemKind::Function(function),
            span: self.span(),
        }
    }

    pub fn extern_static(&mut self, name: &str, ty: Type) -> ExternItem {
        let name = self.ident(name);
        ExternItem {
            id: self.fresh_id(),
            vis: Visibility::Private,
            kind: ExternItemKind::Static { name, mutable: false, ty },
            span: self.span(),
        }
    }
}
