//! First pass: register every declaration of the crate.
//!
//! Each declaring item gets a binding in its namespace, a canonical path
//! and, where it can be named through a path, an entry among its parent's
//! children. Nothing is resolved here, so items may refer to each other in
//! any order.

use osprey_syntax::{
    Crate, EnumVariant, ExternItem, ExternItemKind, ImplItem, ImplItemKind, InherentImpl, Item,
    ItemKind, NodeId, TraitImpl, TraitItem, TraitItemKind, Visibility,
};

use crate::canonical_path::CanonicalPath;
use crate::context::{DeclSite, Resolver};
use crate::error::ResolveResult;
use crate::mappings::ContainerKind;
use crate::scope::Namespace;

impl Resolver<'_> {
    pub(crate) fn resolve_toplevel_crate(&mut self, krate: &Crate) -> ResolveResult<()> {
        let prefix = CanonicalPath::create_empty();
        let canonical_prefix = self.crate_prefix.clone();
        self.with_crate_root(|r| {
            for item in &krate.items {
                r.resolve_toplevel(item, &prefix, &canonical_prefix)?;
            }
            Ok(())
        })
    }

    /// Register `item` and everything nested in it.
    ///
    /// `prefix` keys scope bindings and restarts at every module, while
    /// `canonical_prefix` carries the full path from the crate root.
    pub(crate) fn resolve_toplevel(
        &mut self,
        item: &Item,
        prefix: &CanonicalPath,
        canonical_prefix: &CanonicalPath,
    ) -> ResolveResult<()> {
        let current_module = self.modules.peek_current()?;
        let site = DeclSite { vis: item.vis, child_of: Some(current_module) };

        match &item.kind {
            ItemKind::Module(module) => {
                let (_, cpath) =
                    self.declare(Namespace::Name, item.id, &module.name, prefix, canonical_prefix, site)?;
                self.mappings.insert_container(item.id, ContainerKind::Module);
                self.mappings.insert_module_child(current_module, item.id);
                self.mappings.insert_child_item_to_parent_module_mapping(item.id, current_module);

                let inner = CanonicalPath::create_empty();
                self.with_module(item.id, |r| {
                    for child in &module.items {
                        r.resolve_toplevel(child, &inner, &cpath)?;
                    }
                    Ok(())
                })?;
            }
            ItemKind::TypeAlias(alias) => {
                self.declare(Namespace::Type, item.id, &alias.name, prefix, canonical_prefix, site)?;
            }
            ItemKind::Struct(s) => {
                self.declare(Namespace::Type, item.id, &s.name, prefix, canonical_prefix, site)?;
            }
            ItemKind::TupleStruct(s) => {
                self.declare(Namespace::Type, item.id, &s.name, prefix, canonical_prefix, site)?;
            }
            ItemKind::Union(u) => {
                self.declare(Namespace::Type, item.id, &u.name, prefix, canonical_prefix, site)?;
            }
            ItemKind::Enum(e) => {
                let (path, cpath) =
                    self.declare(Namespace::Type, item.id, &e.name, prefix, canonical_prefix, site)?;
                self.mappings.insert_container(item.id, ContainerKind::Enum);
                for variant in &e.variants {
                    self.resolve_toplevel_variant(variant, &path, &cpath, item.vis, item.id)?;
                }
            }
            ItemKind::Static(s) => {
                self.declare(Namespace::Name, item.id, &s.name, prefix, canonical_prefix, site)?;
            }
            ItemKind::Const(c) => {
                self.declare(Namespace::Name, item.id, &c.name, prefix, canonical_prefix, site)?;
            }
            ItemKind::Function(f) => {
                self.declare(Namespace::Name, item.id, &f.name, prefix, canonical_prefix, site)?;
            }
            ItemKind::InherentImpl(imp) => {
                self.resolve_toplevel_inherent_impl(item.id, imp, prefix, canonical_prefix)?;
            }
            ItemKind::TraitImpl(imp) => {
                self.resolve_toplevel_trait_impl(item, imp, prefix, canonical_prefix)?;
            }
            ItemKind::Trait(t) => {
                let (path, cpath) =
                    self.declare(Namespace::Type, item.id, &t.name, prefix, canonical_prefix, site)?;
                self.mappings.insert_container(item.id, ContainerKind::Trait);
                for trait_item in &t.items {
                    self.resolve_toplevel_trait_item(trait_item, &path, &cpath, item.vis, item.id)?;
                }
            }
            ItemKind::ExternBlock(block) => {
                for extern_item in &block.items {
                    self.resolve_toplevel_extern_item(extern_item, prefix, canonical_prefix)?;
                }
            }
        }

        self.mappings.insert_child_item_to_parent_module_mapping(item.id, current_module);
        Ok(())
    }

    fn resolve_toplevel_variant(
        &mut self,
        variant: &EnumVariant,
        enum_path: &CanonicalPath,
        enum_cpath: &CanonicalPath,
        vis: Visibility,
        enum_id: NodeId,
    ) -> ResolveResult<()> {
        let site = DeclSite { vis, child_of: Some(enum_id) };
        self.declare(Namespace::Type, variant.id, &variant.name, enum_path, enum_cpath, site)?;
        let module = self.modules.peek_current()?;
        self.mappings.insert_child_item_to_parent_module_mapping(variant.id, module);
        Ok(())
    }

    /// Items of `impl Type { .. }` live under the type's path. A generic
    /// impl drops the type's generic arguments from that prefix.
    fn resolve_toplevel_inherent_impl(
        &mut self,
        impl_id: NodeId,
        imp: &InherentImpl,
        prefix: &CanonicalPath,
        canonical_prefix: &CanonicalPath,
    ) -> ResolveResult<()> {
        let include_generic_args = imp.generics.is_empty();
        let Some(impl_type) = self.type_to_canonical_path(&imp.self_ty, include_generic_args, false)? else {
            return Ok(());
        };
        let impl_prefix = prefix.append(&impl_type);
        let impl_cprefix = canonical_prefix.append(&impl_type);
        self.mappings.insert_canonical_path(impl_id, impl_cprefix.clone())?;

        for impl_item in &imp.items {
            self.resolve_toplevel_impl_item(impl_item, &impl_prefix, &impl_cprefix)?;
        }
        Ok(())
    }

    /// Items of `impl Trait for Type` live under `<Type as Trait>`. That
    /// projection is itself bound in the name scope, so a second impl of the
    /// same trait for the same type is reported once and its items skipped.
    fn resolve_toplevel_trait_impl(
        &mut self,
        item: &Item,
        imp: &TraitImpl,
        prefix: &CanonicalPath,
        canonical_prefix: &CanonicalPath,
    ) -> ResolveResult<()> {
        let include_generic_args = imp.generics.is_empty();
        let Some(impl_type) = self.type_to_canonical_path(&imp.self_ty, include_generic_args, false)? else {
            return Ok(());
        };
        let Some(trait_seg) = self.path_to_canonical_path(&imp.trait_path, include_generic_args, false)? else {
            return Ok(());
        };

        let projection = CanonicalPath::trait_impl_projection_seg(item.id, &trait_seg, &impl_type);
        let impl_prefix = prefix.append(&projection);
        if !self.insert_checked(Namespace::Name, &impl_prefix, item.id, item.span)? {
            return Ok(());
        }

        let impl_cprefix = canonical_prefix.append(&projection);
        self.mappings.insert_canonical_path(item.id, impl_cprefix.clone())?;
        log::debug!("registered trait impl `{impl_cprefix}`");

        for impl_item in &imp.items {
            self.resolve_toplevel_impl_item(impl_item, &impl_prefix, &impl_cprefix)?;
        }
        Ok(())
    }

    fn resolve_toplevel_impl_item(
        &mut self,
        impl_item: &ImplItem,
        prefix: &CanonicalPath,
        canonical_prefix: &CanonicalPath,
    ) -> ResolveResult<()> {
        // reachable through the type, never as a module child
        let site = DeclSite { vis: impl_item.vis, child_of: None };
        match &impl_item.kind {
            ImplItemKind::Function(f) => {
                self.declare(Namespace::Name, impl_item.id, &f.name, prefix, canonical_prefix, site)?;
            }
            ImplItemKind::Const(c) => {
                self.declare(Namespace::Name, impl_item.id, &c.name, prefix, canonical_prefix, site)?;
            }
            ImplItemKind::TypeAlias(alias) => {
                self.declare(Namespace::Type, impl_item.id, &alias.name, prefix, canonical_prefix, site)?;
            }
        }
        let module = self.modules.peek_current()?;
        self.mappings.insert_child_item_to_parent_module_mapping(impl_item.id, module);
        Ok(())
    }

    fn resolve_toplevel_trait_item(
        &mut self,
        trait_item: &TraitItem,
        trait_path: &CanonicalPath,
        trait_cpath: &CanonicalPath,
        vis: Visibility,
        trait_id: NodeId,
    ) -> ResolveResult<()> {
        let site = DeclSite { vis, child_of: Some(trait_id) };
        match &trait_item.kind {
            TraitItemKind::Function(f) => {
                self.declare(Namespace::Name, trait_item.id, &f.name, trait_path, trait_cpath, site)?;
            }
            TraitItemKind::Const(c) => {
                self.declare(Namespace::Name, trait_item.id, &c.name, trait_path, trait_cpath, site)?;
            }
            TraitItemKind::Type(assoc) => {
                self.declare(Namespace::Type, trait_item.id, &assoc.name, trait_path, trait_cpath, site)?;
            }
        }
        let module = self.modules.peek_current()?;
        self.mappings.insert_child_item_to_parent_module_mapping(trait_item.id, module);
        Ok(())
    }

    /// Extern items are not nested in their block: they register under the
    /// enclosing module's prefix and become children of that module.
    fn resolve_toplevel_extern_item(
        &mut self,
        extern_item: &ExternItem,
        prefix: &CanonicalPath,
        canonical_prefix: &CanonicalPath,
    ) -> ResolveResult<()> {
        let module = self.modules.peek_current()?;
        let site = DeclSite { vis: extern_item.vis, child_of: Some(module) };
        let name = match &extern_item.kind {
            ExternItemKind::Function(f) => &f.name,
            ExternItemKind::Static { name, .. } => name,
        };
        self.declare(Namespace::Name, extern_item.id, name, prefix, canonical_prefix, site)?;
        self.mappings.insert_child_item_to_parent_module_mapping(extern_item.id, module);
        Ok(())
    }
}
