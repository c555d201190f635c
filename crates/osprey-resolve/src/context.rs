//! The resolution session: both symbol tables, the module stack, the side
//! tables and the diagnostics collector, owned together and threaded through
//! every pass.

use miette::SourceSpan;
use osprey_source::ResolveConfig;
use osprey_syntax::{Crate, Ident, NodeId, NodeIdGen, Visibility};

use crate::builtins::{Builtins, PRIMITIVE_TYPES};
use crate::canonical_path::CanonicalPath;
use crate::diagnostics::Diagnostics;
use crate::error::{ResolveError, ResolveResult};
use crate::mappings::{ContainerKind, DeclVisibility, Mappings};
use crate::module_scope::ModuleStack;
use crate::scope::{Namespace, Scope};

/// One resolution session for one crate.
pub struct Resolver<'cfg> {
    pub(crate) config: &'cfg ResolveConfig,
    pub(crate) name_scope: Scope,
    pub(crate) type_scope: Scope,
    pub(crate) modules: ModuleStack,
    pub(crate) mappings: Mappings,
    pub(crate) diagnostics: Diagnostics,
    pub(crate) builtins: Builtins,
    pub(crate) crate_id: NodeId,
    pub(crate) crate_prefix: CanonicalPath,
}

/// How a declaration is attached to the tree besides its scope binding.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DeclSite {
    pub vis: Visibility,
    /// Where the declaration becomes a nameable child, if anywhere.
    pub child_of: Option<NodeId>,
}

impl<'cfg> Resolver<'cfg> {
    pub fn new(krate: &Crate, config: &'cfg ResolveConfig) -> ResolveResult<Self> {
        let mut ids = NodeIdGen::starting_at(krate.id_bound);
        let builtins = Builtins::allocate(&mut ids);
        let crate_prefix = if config.krate.prefix_crate_name {
            CanonicalPath::new_seg(krate.id, config.krate.name.clone())
        } else {
            CanonicalPath::create_empty()
        };

        let mut resolver = Self {
            config,
            name_scope: Scope::new(Namespace::Name),
            type_scope: Scope::new(Namespace::Type),
            modules: ModuleStack::new(),
            mappings: Mappings::new(),
            diagnostics: Diagnostics::with_limit(config.resolve.max_diagnostics),
            builtins,
            crate_id: krate.id,
            crate_prefix,
        };
        resolver.mappings.insert_container(krate.id, ContainerKind::Module);
        resolver.mappings.insert_canonical_path(krate.id, resolver.crate_prefix.clone())?;
        resolver.seed_builtins()?;
        Ok(resolver)
    }

    fn seed_builtins(&mut self) -> ResolveResult<()> {
        let root_span = SourceSpan::from((0, 0));
        let prelude = self.builtins.prelude();
        self.type_scope.push(prelude);
        let primitives: Vec<_> = self.builtins.primitives().collect();
        for (name, id) in primitives {
            let path = CanonicalPath::new_seg(id, name);
            self.type_scope.insert(&path, id, root_span, false, |_, _, _| {})?;
            self.mappings.insert_canonical_path(id, path)?;
        }
        self.type_scope.pop(prelude)?;

        self.mappings.insert_canonical_path(self.builtins.unit(), CanonicalPath::new_seg(self.builtins.unit(), "()"))?;
        self.mappings.insert_canonical_path(self.builtins.never(), CanonicalPath::new_seg(self.builtins.never(), "!"))?;
        self.mappings.insert_canonical_path(self.builtins.inferred(), CanonicalPath::new_seg(self.builtins.inferred(), "_"))?;
        log::debug!("seeded {} builtin types", PRIMITIVE_TYPES.len());
        Ok(())
    }

    pub(crate) fn scope(&self, namespace: Namespace) -> &Scope {
        match namespace {
            Namespace::Name => &self.name_scope,
            Namespace::Type => &self.type_scope,
        }
    }

    pub(crate) fn report(&mut self, error: ResolveError) {
        self.diagnostics.push(error);
    }

    /// Run `f` inside the crate root, with the builtin frame open beneath it.
    pub(crate) fn with_crate_root<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ResolveResult<T>,
    ) -> ResolveResult<T> {
        let prelude = self.builtins.prelude();
        let crate_id = self.crate_id;
        self.with_ribs(prelude, |r| r.with_module(crate_id, f))
    }

    /// Run `f` with `module` open: module stack and both namespaces get a
    /// frame, and all three are closed again whatever `f` returns.
    pub(crate) fn with_module<T>(
        &mut self,
        module: NodeId,
        f: impl FnOnce(&mut Self) -> ResolveResult<T>,
    ) -> ResolveResult<T> {
        self.modules.push(module);
        self.name_scope.push(module);
        self.type_scope.push(module);

        let result = f(self);

        let closed = self
            .type_scope
            .pop(module)
            .and(self.name_scope.pop(module))
            .and(self.modules.pop(module));
        let value = result?;
        closed?;
        Ok(value)
    }

    /// Run `f` with a frame owned by `owner` open in both namespaces.
    pub(crate) fn with_ribs<T>(
        &mut self,
        owner: NodeId,
        f: impl FnOnce(&mut Self) -> ResolveResult<T>,
    ) -> ResolveResult<T> {
        self.name_scope.push(owner);
        self.type_scope.push(owner);

        let result = f(self);

        let closed = self.type_scope.pop(owner).and(self.name_scope.pop(owner));
        let value = result?;
        closed?;
        Ok(value)
    }

    /// Bind `path` in `namespace`, reporting a duplicate against the earlier
    /// binding. Returns whether the binding was added.
    pub(crate) fn insert_checked(
        &mut self,
        namespace: Namespace,
        path: &CanonicalPath,
        id: NodeId,
        locus: SourceSpan,
    ) -> ResolveResult<bool> {
        let diagnostics = &mut self.diagnostics;
        let scope = match namespace {
            Namespace::Name => &mut self.name_scope,
            Namespace::Type => &mut self.type_scope,
        };
        scope.insert(path, id, locus, false, |previous, _, previous_span| {
            diagnostics.push(ResolveError::DuplicateDefinition {
                name: previous.to_string(),
                span: locus,
                previous_span,
            })
        })
    }

    /// Register a named declaration: scope binding under `prefix`, canonical
    /// path under `canonical_prefix`, visibility, and child entry.
    ///
    /// Returns the scope path and the canonical path of the declaration.
    pub(crate) fn declare(
        &mut self,
        namespace: Namespace,
        id: NodeId,
        name: &Ident,
        prefix: &CanonicalPath,
        canonical_prefix: &CanonicalPath,
        site: DeclSite,
    ) -> ResolveResult<(CanonicalPath, CanonicalPath)> {
        let segment = CanonicalPath::new_seg(id, name.as_str());
        let path = prefix.append(&segment);
        let cpath = canonical_prefix.append(&segment);

        let added = self.insert_checked(namespace, &path, id, name.span)?;
        if added {
            if let Some(parent) = site.child_of {
                self.mappings.insert_module_child_item(parent, name.as_str(), id);
            }
        }

        let module = self.modules.peek_current()?;
        self.mappings.insert_visibility(id, DeclVisibility { vis: site.vis, module, span: name.span });
        self.mappings.insert_canonical_path(id, cpath.clone())?;
        log::debug!("declared {namespace} `{cpath}` as {id}");
        Ok((path, cpath))
    }
}
