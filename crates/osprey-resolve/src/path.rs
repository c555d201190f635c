//! Segment-by-segment resolution of paths.

use std::iter;

use osprey_syntax::{NodeId, Path, PathIdent, PathSegment, QualifiedPathInType, QualifiedPathType};

use crate::canonical_path::CanonicalPath;
use crate::context::Resolver;
use crate::error::{InvariantViolation, ResolveError, ResolveResult};
use crate::mappings::UseSite;
use crate::scope::Namespace;
use crate::types::{canonicalize_generic_args, Canonicalize};

impl Resolver<'_> {
    /// Resolve a path in type position. Direct lookups try the type scope
    /// before the name scope.
    pub(crate) fn resolve_relative_type_path(&mut self, path: &Path) -> ResolveResult<Option<NodeId>> {
        self.resolve_path(path, Namespace::Type)
    }

    /// Resolve a path in expression position. Direct lookups try the name
    /// scope before the type scope.
    pub(crate) fn resolve_expr_path(&mut self, path: &Path) -> ResolveResult<Option<NodeId>> {
        self.resolve_path(path, Namespace::Name)
    }

    /// Walk `path` left to right from the current module.
    ///
    /// Returns the declaration the whole path names. `Ok(None)` means the
    /// path failed (and was reported) or ends in an associated item that
    /// only type checking can find (not reported).
    fn resolve_path(&mut self, path: &Path, prefer: Namespace) -> ResolveResult<Option<NodeId>> {
        let current = self.modules.peek_current()?;
        let crate_root = self.modules.peek_crate_root()?;
        let multi_segment = !path.is_single_segment();

        // `self` alone in a method body is the receiver, not the module
        if !multi_segment && prefer == Namespace::Name {
            if let Some(segment) = path.segments.first().filter(|s| s.is_self_module_seg()) {
                let key = CanonicalPath::new_seg(segment.id, "self");
                if let Some(receiver) = self.name_scope.lookup(&key) {
                    self.bind_segment(segment, receiver, Namespace::Name, current);
                    self.mappings.insert_resolved_name(path.id, receiver);
                    return Ok(Some(receiver));
                }
            }
        }

        let mut module_scope = current;
        let mut resolved: Option<NodeId> = None;

        for (i, segment) in path.segments.iter().enumerate() {
            let is_first = i == 0;
            let is_last = i + 1 == path.segments.len();
            log::trace!("segment `{segment}` of `{path}` from {module_scope}");

            if segment.is_error() {
                self.report(ResolveError::SegmentHasError { segment: segment.to_string(), span: segment.span });
                return Ok(None);
            }

            if let Some(previous) = resolved {
                if self.mappings.container_kind(previous).is_none() {
                    log::debug!("`{path}`: `{segment}` left to type checking");
                    return Ok(None);
                }
            }

            match &segment.ident {
                PathIdent::Crate => {
                    if !is_first {
                        self.report_cannot_find(segment);
                        return Ok(None);
                    }
                    module_scope = crate_root;
                    resolved = Some(crate_root);
                    self.bind_segment(segment, crate_root, Namespace::Name, current);
                    continue;
                }
                PathIdent::Super => {
                    if module_scope == crate_root {
                        self.report(ResolveError::SuperAtCrateScope { span: segment.span });
                        return Ok(None);
                    }
                    if !self.mappings.node_is_module(module_scope) {
                        self.report_cannot_find(segment);
                        return Ok(None);
                    }
                    let parent = if module_scope == current {
                        self.modules.peek_parent()
                    } else {
                        self.mappings.lookup_parent_module(module_scope)
                    };
                    let Some(parent) = parent else {
                        self.report(ResolveError::SuperAtCrateScope { span: segment.span });
                        return Ok(None);
                    };
                    module_scope = parent;
                    resolved = Some(parent);
                    self.bind_segment(segment, parent, Namespace::Name, current);
                    continue;
                }
                PathIdent::SelfModule => {
                    if !is_first {
                        self.report_cannot_find(segment);
                        return Ok(None);
                    }
                    module_scope = current;
                    resolved = Some(current);
                    self.bind_segment(segment, current, Namespace::Name, current);
                    continue;
                }
                PathIdent::Ident(_) | PathIdent::Error => {}
            }

            if let Some(args) = &segment.generic_args {
                for arg in &args.types {
                    self.resolve_type(arg)?;
                }
            }

            let name = segment.ident_str();
            let mut found = None;

            if multi_segment {
                let candidates: Vec<NodeId> = self.mappings.lookup_module_children(module_scope, name).collect();
                if let Some(child) = self.pick_child(&candidates, is_last, prefer) {
                    let namespace =
                        self.classify(child).ok_or(InvariantViolation::UnclassifiedDeclaration { id: child })?;
                    self.bind_segment(segment, child, namespace, current);
                    found = Some(child);
                }
            }

            if found.is_none() {
                if !is_first {
                    self.report_cannot_find(segment);
                    return Ok(None);
                }
                let key = CanonicalPath::new_seg(segment.id, name);
                let order = match prefer {
                    Namespace::Type => [Namespace::Type, Namespace::Name],
                    Namespace::Name => [Namespace::Name, Namespace::Type],
                };
                for namespace in order {
                    if let Some(id) = self.scope(namespace).lookup(&key) {
                        self.bind_segment(segment, id, namespace, current);
                        found = Some(id);
                        break;
                    }
                }
            }

            let Some(id) = found else {
                self.report(ResolveError::FailedToResolvePath { name: name.to_string(), span: segment.span });
                return Ok(None);
            };
            if self.mappings.container_kind(id).is_some() {
                module_scope = id;
            }
            resolved = Some(id);
        }

        let Some(id) = resolved else {
            return Ok(None);
        };
        match self.classify(id) {
            Some(Namespace::Name) => self.mappings.insert_resolved_name(path.id, id),
            Some(Namespace::Type) => self.mappings.insert_resolved_type(path.id, id),
            None => return Err(InvariantViolation::UnclassifiedDeclaration { id }),
        }
        Ok(Some(id))
    }

    /// Which namespace declared `id`. Modules always count as names: the
    /// crate root is declared nowhere, and a module rejected as a duplicate
    /// can still be reached through `self` or `super` from inside it.
    pub(crate) fn classify(&self, id: NodeId) -> Option<Namespace> {
        if self.name_scope.decl_was_declared_here(id) || self.mappings.node_is_module(id) {
            Some(Namespace::Name)
        } else if self.type_scope.decl_was_declared_here(id) {
            Some(Namespace::Type)
        } else {
            None
        }
    }

    /// Choose among same-named children: a segment followed by more
    /// segments wants something that has children of its own, the last
    /// segment wants the preferred namespace.
    fn pick_child(&self, candidates: &[NodeId], is_last: bool, prefer: Namespace) -> Option<NodeId> {
        let wanted = |id: &&NodeId| {
            if is_last {
                self.classify(**id) == Some(prefer)
            } else {
                self.mappings.container_kind(**id).is_some()
            }
        };
        candidates.iter().find(wanted).or_else(|| candidates.first()).copied()
    }

    fn bind_segment(&mut self, segment: &PathSegment, decl: NodeId, namespace: Namespace, module: NodeId) {
        match namespace {
            Namespace::Name => self.mappings.insert_resolved_name(segment.id, decl),
            Namespace::Type => self.mappings.insert_resolved_type(segment.id, decl),
        }
        if self.mappings.lookup_visibility(decl).is_some() {
            self.mappings.insert_use_site(UseSite {
                use_id: segment.id,
                decl,
                module,
                name: segment.ident_str().to_string(),
                span: segment.span,
            });
        }
    }

    fn report_cannot_find(&mut self, segment: &PathSegment) {
        self.report(ResolveError::CannotFindPath { path: segment.to_string(), span: segment.span });
    }

    /// Resolve `<T as Trait>::X::Y` to its canonical path.
    ///
    /// The head becomes the projection of the trait's canonical path and the
    /// type's (or just the type's, without `as`); the remaining segments are
    /// appended as written. The result is also recorded against the path.
    pub(crate) fn resolve_relative_qualified_type_path(
        &mut self,
        path: &QualifiedPathInType,
    ) -> ResolveResult<Option<CanonicalPath>> {
        let Some(mut result) = self.resolve_qualified_segment(&path.qualified)? else {
            return Ok(None);
        };

        for segment in iter::once(&path.associated).chain(&path.segments) {
            if segment.is_error() {
                self.report(ResolveError::SegmentHasError { segment: segment.to_string(), span: segment.span });
                return Ok(None);
            }
            let text = match &segment.generic_args {
                Some(args) if segment.has_generic_args() => {
                    for arg in &args.types {
                        self.resolve_type(arg)?;
                    }
                    format!("{}::{}", segment.ident_str(), canonicalize_generic_args(args))
                }
                _ => segment.ident_str().to_string(),
            };
            result = result.append(&CanonicalPath::new_seg(segment.id, text));
        }

        log::debug!("qualified path `{path}` is `{result}`");
        self.mappings.insert_qualified_path(path.id, result.clone());
        Ok(Some(result))
    }

    fn resolve_qualified_segment(&mut self, qualified: &QualifiedPathType) -> ResolveResult<Option<CanonicalPath>> {
        let resolved = self.resolve_type_with(&qualified.self_ty, Canonicalize::Yes { with_generics: true })?;
        let impl_type = match (resolved.canonical, resolved.node) {
            (Some(canonical), _) => canonical,
            (None, Some(id)) => self
                .mappings
                .lookup_canonical_path(id)
                .cloned()
                .ok_or(InvariantViolation::MissingCanonicalPath { id })?,
            (None, None) => return Ok(None),
        };

        let Some(as_trait) = &qualified.as_trait else {
            return Ok(Some(impl_type));
        };
        let Some(trait_id) = self.resolve_relative_type_path(as_trait)? else {
            return Ok(None);
        };
        let trait_path = self
            .mappings
            .lookup_canonical_path(trait_id)
            .cloned()
            .ok_or(InvariantViolation::MissingCanonicalPath { id: trait_id })?;

        Ok(Some(CanonicalPath::trait_impl_projection_seg(qualified.id, &trait_path, &impl_type)))
    }
}
