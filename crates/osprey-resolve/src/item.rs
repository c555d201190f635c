//! Second pass: resolve every type and expression inside the items the
//! top-level pass registered.
//!
//! Modules are re-entered so their frames are visible again. Items with
//! generics get a frame of their own, keyed by the item, holding the
//! parameters (and `Self` inside impls and traits).

use miette::SourceSpan;
use osprey_syntax::{
    Crate, ExternItemKind, Function, ImplItem, ImplItemKind, Item, ItemKind, NodeId, StructField,
    TraitItemKind, TupleField, VariantKind,
};

use crate::canonical_path::CanonicalPath;
use crate::context::Resolver;
use crate::error::{ResolveError, ResolveResult};
use crate::scope::Namespace;

impl Resolver<'_> {
    pub(crate) fn resolve_items(&mut self, krate: &Crate) -> ResolveResult<()> {
        self.with_crate_root(|r| {
            for item in &krate.items {
                r.resolve_item(item)?;
            }
            Ok(())
        })
    }

    pub(crate) fn resolve_item(&mut self, item: &Item) -> ResolveResult<()> {
        match &item.kind {
            ItemKind::Module(module) => self.with_module(item.id, |r| {
                for child in &module.items {
                    r.resolve_item(child)?;
                }
                Ok(())
            }),
            ItemKind::TypeAlias(alias) => self.with_ribs(item.id, |r| {
                r.resolve_generics(&alias.generics)?;
                r.resolve_type(&alias.ty)?;
                Ok(())
            }),
            ItemKind::Struct(s) => self.with_ribs(item.id, |r| {
                r.resolve_generics(&s.generics)?;
                r.resolve_struct_fields(&s.fields)
            }),
            ItemKind::TupleStruct(s) => self.with_ribs(item.id, |r| {
                r.resolve_generics(&s.generics)?;
                r.resolve_tuple_fields(&s.fields)
            }),
            ItemKind::Union(u) => self.with_ribs(item.id, |r| {
                r.resolve_generics(&u.generics)?;
                r.resolve_struct_fields(&u.fields)
            }),
            ItemKind::Enum(e) => self.with_ribs(item.id, |r| {
                r.resolve_generics(&e.generics)?;
                for variant in &e.variants {
                    match &variant.kind {
                        VariantKind::Unit => {}
                        VariantKind::Tuple(fields) => r.resolve_tuple_fields(fields)?,
                        VariantKind::Struct(fields) => r.resolve_struct_fields(fields)?,
                        VariantKind::Discriminant(value) => r.resolve_expr(value)?,
                    }
                }
                Ok(())
            }),
            ItemKind::Static(s) => {
                self.resolve_type(&s.ty)?;
                if let Some(init) = &s.init {
                    self.resolve_expr(init)?;
                }
                Ok(())
            }
            ItemKind::Const(c) => {
                self.resolve_type(&c.ty)?;
                if let Some(init) = &c.init {
                    self.resolve_expr(init)?;
                }
                Ok(())
            }
            ItemKind::Function(f) => self.resolve_function(item.id, f),
            ItemKind::InherentImpl(imp) => self.with_ribs(item.id, |r| {
                r.resolve_generics(&imp.generics)?;
                let self_ty = r.resolve_type(&imp.self_ty)?;
                r.bind_self_type(item.id, self_ty, imp.self_ty.span)?;
                for impl_item in &imp.items {
                    r.resolve_impl_item(impl_item)?;
                }
                Ok(())
            }),
            ItemKind::TraitImpl(imp) => self.with_ribs(item.id, |r| {
                r.resolve_generics(&imp.generics)?;
                r.resolve_relative_type_path(&imp.trait_path)?;
                let self_ty = r.resolve_type(&imp.self_ty)?;
                r.bind_self_type(item.id, self_ty, imp.self_ty.span)?;
                for impl_item in &imp.items {
                    r.resolve_impl_item(impl_item)?;
                }
                Ok(())
            }),
            ItemKind::Trait(t) => self.with_ribs(item.id, |r| {
                r.resolve_generics(&t.generics)?;
                r.bind_self_type(item.id, Some(item.id), item.span)?;
                for bound in &t.supertraits {
                    r.resolve_type_bound(bound)?;
                }
                for trait_item in &t.items {
                    match &trait_item.kind {
                        TraitItemKind::Function(f) => r.resolve_function(trait_item.id, f)?,
                        TraitItemKind::Const(c) => {
                            r.resolve_type(&c.ty)?;
                            if let Some(init) = &c.init {
                                r.resolve_expr(init)?;
                            }
                        }
                        TraitItemKind::Type(assoc) => {
                            for bound in &assoc.bounds {
                                r.resolve_type_bound(bound)?;
                            }
                        }
                    }
                }
                Ok(())
            }),
            ItemKind::ExternBlock(block) => {
                for extern_item in &block.items {
                    match &extern_item.kind {
                        ExternItemKind::Function(f) => self.resolve_function(extern_item.id, f)?,
                        ExternItemKind::Static { ty, .. } => {
                            self.resolve_type(ty)?;
                        }
                    }
                }
                Ok(())
            }
        }
    }

    fn resolve_impl_item(&mut self, impl_item: &ImplItem) -> ResolveResult<()> {
        match &impl_item.kind {
            ImplItemKind::Function(f) => self.resolve_function(impl_item.id, f),
            ImplItemKind::Const(c) => {
                self.resolve_type(&c.ty)?;
                if let Some(init) = &c.init {
                    self.resolve_expr(init)?;
                }
                Ok(())
            }
            ImplItemKind::TypeAlias(alias) => self.with_ribs(impl_item.id, |r| {
                r.resolve_generics(&alias.generics)?;
                r.resolve_type(&alias.ty)?;
                Ok(())
            }),
        }
    }

    /// Generics, `self`, parameters and return type share the function's
    /// frame; the body opens its own.
    pub(crate) fn resolve_function(&mut self, owner: NodeId, function: &Function) -> ResolveResult<()> {
        self.with_ribs(owner, |r| {
            r.resolve_generics(&function.generics)?;

            if let Some(self_param) = &function.self_param {
                let path = CanonicalPath::new_seg(self_param.id, "self");
                if r.insert_checked(Namespace::Name, &path, self_param.id, self_param.span)? {
                    r.mappings.insert_canonical_path(self_param.id, path)?;
                }
            }

            for param in &function.params {
                r.resolve_type(&param.ty)?;
                r.declare_pattern(&param.pattern, false)?;
            }
            if let Some(ret) = &function.ret {
                r.resolve_type(ret)?;
            }
            if let Some(body) = &function.body {
                r.resolve_block(body)?;
            }
            Ok(())
        })
    }

    /// Bind `Self` in the innermost type frame. Nothing is bound when the
    /// self type did not resolve; that failure was already reported.
    fn bind_self_type(&mut self, owner: NodeId, self_ty: Option<NodeId>, span: SourceSpan) -> ResolveResult<()> {
        let Some(target) = self_ty else {
            return Ok(());
        };
        let path = CanonicalPath::new_seg(owner, "Self");
        let diagnostics = &mut self.diagnostics;
        self.type_scope.insert(&path, target, span, false, |previous, _, previous_span| {
            diagnostics.push(ResolveError::DuplicateDefinition {
                name: previous.to_string(),
                span,
                previous_span,
            })
        })?;
        Ok(())
    }

    fn resolve_struct_fields(&mut self, fields: &[StructField]) -> ResolveResult<()> {
        for field in fields {
            self.resolve_type(&field.ty)?;
        }
        Ok(())
    }

    fn resolve_tuple_fields(&mut self, fields: &[TupleField]) -> ResolveResult<()> {
        for field in fields {
            self.resolve_type(&field.ty)?;
        }
        Ok(())
    }
}
