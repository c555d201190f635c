//! Side tables produced by resolution, keyed by [`NodeId`].
//!
//! Later phases (type checking, privacy, codegen) read these; the resolver
//! is the only writer.

use fxhash::FxHashMap;
use indexmap::IndexMap;
use miette::SourceSpan;
use osprey_syntax::{NodeId, Visibility};

use crate::canonical_path::CanonicalPath;
use crate::error::{InvariantViolation, ResolveResult};

/// Declarations whose children can be named with a further path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Module,
    Enum,
    Trait,
}

/// A named child of a module, enum or trait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleChild {
    pub name: String,
    pub id: NodeId,
}

/// Declared visibility of one declaration, as the privacy reporter needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclVisibility {
    /// Visibility written on the declaration, or inherited from its enum or trait.
    pub vis: Visibility,
    /// Module the declaration lives in.
    pub module: NodeId,
    /// Span of the declared name.
    pub span: SourceSpan,
}

/// One resolved path segment, as seen by the privacy reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseSite {
    /// The path segment.
    pub use_id: NodeId,
    /// The declaration it resolved to.
    pub decl: NodeId,
    /// Module the reference appears in.
    pub module: NodeId,
    pub name: String,
    pub span: SourceSpan,
}

/// Registry of everything resolution learns about the crate.
#[derive(Debug, Clone, Default)]
pub struct Mappings {
    /// Declaration to its fully qualified path.
    canonical_paths: FxHashMap<NodeId, CanonicalPath>,
    /// Item (or module) to the module it is declared in.
    parent_modules: FxHashMap<NodeId, NodeId>,
    /// Module to its nested modules, in declaration order.
    child_modules: FxHashMap<NodeId, Vec<NodeId>>,
    /// Container to the children a path segment can name.
    children: FxHashMap<NodeId, Vec<ModuleChild>>,
    containers: FxHashMap<NodeId, ContainerKind>,
    /// Use site to declaration, name namespace.
    resolved_names: IndexMap<NodeId, NodeId>,
    /// Use site to declaration, type namespace.
    resolved_types: IndexMap<NodeId, NodeId>,
    /// Qualified path to its canonical form.
    qualified_paths: FxHashMap<NodeId, CanonicalPath>,
    visibilities: FxHashMap<NodeId, DeclVisibility>,
    /// Segments bound to a declaration that has a visibility, in resolution order.
    use_sites: Vec<UseSite>,
}

impl Mappings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the canonical path of `id`. Re-recording an equal path is a
    /// no-op; a different one is a resolver bug.
    pub fn insert_canonical_path(&mut self, id: NodeId, path: CanonicalPath) -> ResolveResult<()> {
        if let Some(existing) = self.canonical_paths.get(&id) {
            if *existing == path {
                return Ok(());
            }
            return Err(InvariantViolation::CanonicalPathConflict {
                id,
                existing: existing.to_string(),
                new: path.to_string(),
            });
        }
        self.canonical_paths.insert(id, path);
        Ok(())
    }

    pub fn lookup_canonical_path(&self, id: NodeId) -> Option<&CanonicalPath> {
        self.canonical_paths.get(&id)
    }

    pub fn insert_module_child(&mut self, parent: NodeId, child: NodeId) {
        self.child_modules.entry(parent).or_default().push(child);
    }

    pub fn child_modules(&self, parent: NodeId) -> &[NodeId] {
        self.child_modules.get(&parent).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Record `id` as a child of `parent` (a module, enum or trait) named
    /// `name`. The pair is kept once, in first-insertion order.
    pub fn insert_module_child_item(&mut self, parent: NodeId, name: &str, id: NodeId) {
        let children = self.children.entry(parent).or_default();
        if !children.iter().any(|child| child.id == id && child.name == name) {
            children.push(ModuleChild { name: name.to_string(), id });
        }
    }

    /// First child of `parent` called `name`.
    pub fn lookup_module_child(&self, parent: NodeId, name: &str) -> Option<CanonicalPath> {
        self.lookup_module_children(parent, name)
            .next()
            .map(|id| CanonicalPath::new_seg(id, name))
    }

    /// Every child of `parent` called `name`; a module may hold one per namespace.
    pub fn lookup_module_children<'a>(
        &'a self,
        parent: NodeId,
        name: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.module_children(parent)
            .iter()
            .filter(move |child| child.name == name)
            .map(|child| child.id)
    }

    pub fn module_children(&self, parent: NodeId) -> &[ModuleChild] {
        self.children.get(&parent).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn insert_child_item_to_parent_module_mapping(&mut self, item: NodeId, module: NodeId) {
        self.parent_modules.insert(item, module);
    }

    pub fn lookup_parent_module(&self, item: NodeId) -> Option<NodeId> {
        self.parent_modules.get(&item).copied()
    }

    /// Whether `module` is `ancestor` or nested somewhere inside it.
    pub fn is_same_or_descendant(&self, module: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(module);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.lookup_parent_module(id);
        }
        false
    }

    pub fn insert_container(&mut self, id: NodeId, kind: ContainerKind) {
        self.containers.insert(id, kind);
    }

    pub fn container_kind(&self, id: NodeId) -> Option<ContainerKind> {
        self.containers.get(&id).copied()
    }

    pub fn node_is_module(&self, id: NodeId) -> bool {
        self.container_kind(id) == Some(ContainerKind::Module)
    }

    pub fn insert_resolved_name(&mut self, use_id: NodeId, decl: NodeId) {
        self.resolved_names.insert(use_id, decl);
    }

    pub fn lookup_resolved_name(&self, use_id: NodeId) -> Option<NodeId> {
        self.resolved_names.get(&use_id).copied()
    }

    pub fn resolved_names(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.resolved_names.iter().map(|(u, d)| (*u, *d))
    }

    pub fn insert_resolved_type(&mut self, use_id: NodeId, decl: NodeId) {
        self.resolved_types.insert(use_id, decl);
    }

    pub fn lookup_resolved_type(&self, use_id: NodeId) -> Option<NodeId> {
        self.resolved_types.get(&use_id).copied()
    }

    pub fn resolved_types(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.resolved_types.iter().map(|(u, d)| (*u, *d))
    }

    /// Canonical result of a `<T as Trait>::X` path, keyed by the path node.
    pub fn insert_qualified_path(&mut self, path: NodeId, canonical: CanonicalPath) {
        self.qualified_paths.insert(path, canonical);
    }

    pub fn lookup_qualified_path(&self, path: NodeId) -> Option<&CanonicalPath> {
        self.qualified_paths.get(&path)
    }

    pub fn insert_visibility(&mut self, id: NodeId, visibility: DeclVisibility) {
        self.visibilities.insert(id, visibility);
    }

    pub fn lookup_visibility(&self, id: NodeId) -> Option<&DeclVisibility> {
        self.visibilities.get(&id)
    }

    pub fn insert_use_site(&mut self, site: UseSite) {
        self.use_sites.push(site);
    }

    pub fn use_sites(&self) -> &[UseSite] {
        &self.use_sites
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_path_insert_is_write_once() {
        let mut mappings = Mappings::new();
        let path = CanonicalPath::new_seg(NodeId(1), "f");
        mappings.insert_canonical_path(NodeId(1), path.clone()).unwrap();
        mappings.insert_canonical_path(NodeId(1), path.clone()).unwrap();

        let err = mappings
            .insert_canonical_path(NodeId(1), CanonicalPath::new_seg(NodeId(1), "g"))
            .unwrap_err();
        assert!(matches!(err, InvariantViolation::CanonicalPathConflict { .. }));
        assert_eq!(mappings.lookup_canonical_path(NodeId(1)), Some(&path));
    }

    #[test]
    fn module_children_keep_both_namespaces() {
        let mut mappings = Mappings::new();
        mappings.insert_module_child_item(NodeId(0), "S", NodeId(3));
        mappings.insert_module_child_item(NodeId(0), "S", NodeId(4));
        mappings.insert_module_child_item(NodeId(0), "S", NodeId(3));

        let ids: Vec<_> = mappings.lookup_module_children(NodeId(0), "S").collect();
        assert_eq!(ids, vec![NodeId(3), NodeId(4)]);
        assert_eq!(mappings.lookup_module_child(NodeId(0), "S").and_then(|p| p.node_id()), Some(NodeId(3)));
        assert!(mappings.lookup_module_child(NodeId(0), "T").is_none());
    }

    #[test]
    fn ancestry_follows_parent_modules() {
        let mut mappings = Mappings::new();
        mappings.insert_child_item_to_parent_module_mapping(NodeId(2), NodeId(1));
        mappings.insert_child_item_to_parent_module_mapping(NodeId(3), NodeId(2));

        assert!(mappings.is_same_or_descendant(NodeId(3), NodeId(1)));
        assert!(mappings.is_same_or_descendant(NodeId(2), NodeId(2)));
        assert!(!mappings.is_same_or_descendant(NodeId(1), NodeId(3)));
    }
}
