//! Resolution of type syntax, bounds, generic parameters and where clauses.

use osprey_syntax::{
    GenericArgs, GenericParam, GenericParamKind, Generics, NodeId, Path, PointerMutability,
    TraitBound, Type, TypeKind, TypeParamBound, WhereClause,
};

use crate::canonical_path::CanonicalPath;
use crate::context::Resolver;
use crate::error::{ResolveError, ResolveResult};
use crate::scope::Namespace;

/// Whether a type resolution should also build the type's canonical path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Canonicalize {
    No,
    Yes { with_generics: bool },
}

/// Outcome of resolving one type.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ResolvedType {
    /// Declaration the type names, if it names exactly one.
    pub node: Option<NodeId>,
    pub canonical: Option<CanonicalPath>,
}

/// `<A,B>` from the rendered form of each argument.
pub fn canonicalize_generic_args(args: &GenericArgs) -> String {
    let rendered: Vec<String> = args.types.iter().map(ToString::to_string).collect();
    format!("<{}>", rendered.join(","))
}

impl Resolver<'_> {
    pub(crate) fn resolve_type(&mut self, ty: &Type) -> ResolveResult<Option<NodeId>> {
        Ok(self.resolve_type_with(ty, Canonicalize::No)?.node)
    }

    pub(crate) fn resolve_type_with(
        &mut self,
        ty: &Type,
        canonicalize: Canonicalize,
    ) -> ResolveResult<ResolvedType> {
        let wants_path = canonicalize != Canonicalize::No;
        match &ty.kind {
            TypeKind::Tuple(elems) if elems.is_empty() => Ok(self.builtin_type(ty.id, self.builtins.unit())),
            TypeKind::Tuple(elems) => {
                for elem in elems {
                    self.resolve_type(elem)?;
                }
                Ok(ResolvedType::default())
            }
            TypeKind::Array { elem, size } => {
                let node = self.resolve_type(elem)?;
                self.resolve_expr(size)?;
                Ok(ResolvedType { node, canonical: None })
            }
            TypeKind::Reference { mutable, inner } => {
                let prefix = if *mutable { "&mut " } else { "&" };
                self.resolve_wrapped(ty.id, inner, canonicalize, |inner| format!("{prefix}{inner}"))
            }
            TypeKind::RawPointer { mutability, inner } => {
                let prefix = match mutability {
                    PointerMutability::Const => "*const ",
                    PointerMutability::Mut => "*mut ",
                };
                self.resolve_wrapped(ty.id, inner, canonicalize, |inner| format!("{prefix}{inner}"))
            }
            TypeKind::Slice(elem) => {
                self.resolve_wrapped(ty.id, elem, canonicalize, |inner| format!("[{inner}]"))
            }
            TypeKind::TraitObjectOneBound(bound) => {
                let node = self.resolve_trait_bound(bound)?;
                Ok(ResolvedType { node, canonical: None })
            }
            TypeKind::TraitObject(bounds) => {
                for bound in bounds {
                    self.resolve_type_bound(bound)?;
                }
                Ok(ResolvedType::default())
            }
            TypeKind::BareFunction { params, ret } => {
                for param in params {
                    self.resolve_type(&param.ty)?;
                }
                if let Some(ret) = ret {
                    self.resolve_type(ret)?;
                }
                Ok(ResolvedType::default())
            }
            TypeKind::Inferred => Ok(self.builtin_type(ty.id, self.builtins.inferred())),
            TypeKind::Never => Ok(self.builtin_type(ty.id, self.builtins.never())),
            TypeKind::Path(path) => {
                let node = self.resolve_relative_type_path(path)?;
                let canonical = match (node, canonicalize) {
                    (Some(id), Canonicalize::Yes { with_generics }) => {
                        self.mappings.lookup_canonical_path(id).map(|decl| {
                            match path.segments.last() {
                                Some(last) if with_generics && last.has_generic_args() => {
                                    with_generic_args(decl, last.id, last.generic_args.as_ref())
                                }
                                _ => decl.clone(),
                            }
                        })
                    }
                    _ => None,
                };
                Ok(ResolvedType { node, canonical })
            }
            TypeKind::QualifiedPath(path) => {
                let canonical = self.resolve_relative_qualified_type_path(path)?;
                Ok(ResolvedType { node: None, canonical: canonical.filter(|_| wants_path) })
            }
        }
    }

    fn builtin_type(&mut self, use_id: NodeId, builtin: NodeId) -> ResolvedType {
        self.mappings.insert_resolved_type(use_id, builtin);
        ResolvedType { node: Some(builtin), canonical: self.mappings.lookup_canonical_path(builtin).cloned() }
    }

    /// References, pointers and slices name whatever their inner type names;
    /// their canonical form wraps the inner one.
    fn resolve_wrapped(
        &mut self,
        id: NodeId,
        inner: &Type,
        canonicalize: Canonicalize,
        wrap: impl FnOnce(&CanonicalPath) -> String,
    ) -> ResolveResult<ResolvedType> {
        let inner = self.resolve_type_with(inner, canonicalize)?;
        let canonical = match canonicalize {
            Canonicalize::No => None,
            Canonicalize::Yes { .. } => inner.canonical.as_ref().map(|path| CanonicalPath::new_seg(id, wrap(path))),
        };
        Ok(ResolvedType { node: inner.node, canonical })
    }

    pub(crate) fn resolve_type_bound(&mut self, bound: &TypeParamBound) -> ResolveResult<Option<NodeId>> {
        match bound {
            TypeParamBound::Trait(bound) => self.resolve_trait_bound(bound),
            TypeParamBound::Lifetime(_) => Ok(None),
        }
    }

    pub(crate) fn resolve_trait_bound(&mut self, bound: &TraitBound) -> ResolveResult<Option<NodeId>> {
        self.resolve_relative_type_path(&bound.path)
    }

    pub(crate) fn resolve_generics(&mut self, generics: &Generics) -> ResolveResult<()> {
        for param in &generics.params {
            self.resolve_generic_param(param)?;
        }
        if let Some(where_clause) = &generics.where_clause {
            self.resolve_where_clause(where_clause)?;
        }
        Ok(())
    }

    /// Resolve a parameter's default and bounds, then bind its name in the
    /// innermost frame. Type parameters go into the type scope and const
    /// parameters into the name scope.
    pub(crate) fn resolve_generic_param(&mut self, param: &GenericParam) -> ResolveResult<()> {
        let namespace = match &param.kind {
            GenericParamKind::Type { bounds, default } => {
                if let Some(default) = default {
                    self.resolve_type(default)?;
                }
                for bound in bounds {
                    self.resolve_type_bound(bound)?;
                }
                Namespace::Type
            }
            GenericParamKind::Const { ty, default } => {
                log::debug!("const generic `{}` bound as a value", param.name.as_str());
                self.resolve_type(ty)?;
                if let Some(default) = default {
                    self.resolve_expr(default)?;
                }
                Namespace::Name
            }
            GenericParamKind::Lifetime => return Ok(()),
        };

        let path = CanonicalPath::new_seg(param.id, param.name.as_str());
        let diagnostics = &mut self.diagnostics;
        let scope = match namespace {
            Namespace::Name => &mut self.name_scope,
            Namespace::Type => &mut self.type_scope,
        };
        let added = scope.insert(&path, param.id, param.name.span, false, |_, _, previous_span| {
            diagnostics.push(ResolveError::GenericParamRedefined {
                name: param.name.name.clone(),
                span: param.name.span,
                previous_span,
            })
        })?;
        if added {
            self.mappings.insert_canonical_path(param.id, path)?;
        }
        Ok(())
    }

    pub(crate) fn resolve_where_clause(&mut self, where_clause: &WhereClause) -> ResolveResult<()> {
        for predicate in &where_clause.predicates {
            self.resolve_type(&predicate.ty)?;
            for bound in &predicate.bounds {
                self.resolve_type_bound(bound)?;
            }
        }
        Ok(())
    }

    /// Purely syntactic canonical form of a type, used for impl prefixes.
    ///
    /// Path segments are kept as written (`Ident::<A,B>` when generic
    /// arguments are included); references, pointers and slices wrap their
    /// inner form; anything else is its textual form. A malformed segment is
    /// reported and yields `None`.
    pub(crate) fn type_to_canonical_path(
        &mut self,
        ty: &Type,
        include_generic_args: bool,
        resolve_generic_args: bool,
    ) -> ResolveResult<Option<CanonicalPath>> {
        let (include, resolve) = (include_generic_args, resolve_generic_args);
        match &ty.kind {
            TypeKind::Path(path) => self.path_to_canonical_path(path, include, resolve),
            TypeKind::Reference { mutable: true, inner } => {
                self.wrapped_canonical_path(ty.id, inner, include, resolve, |p| format!("&mut {p}"))
            }
            TypeKind::Reference { mutable: false, inner } => {
                self.wrapped_canonical_path(ty.id, inner, include, resolve, |p| format!("&{p}"))
            }
            TypeKind::RawPointer { mutability: PointerMutability::Const, inner } => {
                self.wrapped_canonical_path(ty.id, inner, include, resolve, |p| format!("*const {p}"))
            }
            TypeKind::RawPointer { mutability: PointerMutability::Mut, inner } => {
                self.wrapped_canonical_path(ty.id, inner, include, resolve, |p| format!("*mut {p}"))
            }
            TypeKind::Slice(elem) => {
                self.wrapped_canonical_path(ty.id, elem, include, resolve, |p| format!("[{p}]"))
            }
            _ => Ok(Some(CanonicalPath::new_seg(ty.id, ty.to_string()))),
        }
    }

    fn wrapped_canonical_path(
        &mut self,
        id: NodeId,
        inner: &Type,
        include_generic_args: bool,
        resolve_generic_args: bool,
        wrap: impl FnOnce(&CanonicalPath) -> String,
    ) -> ResolveResult<Option<CanonicalPath>> {
        Ok(self
            .type_to_canonical_path(inner, include_generic_args, resolve_generic_args)?
            .map(|inner| CanonicalPath::new_seg(id, wrap(&inner))))
    }

    pub(crate) fn path_to_canonical_path(
        &mut self,
        path: &Path,
        include_generic_args: bool,
        resolve_generic_args: bool,
    ) -> ResolveResult<Option<CanonicalPath>> {
        let mut result = CanonicalPath::create_empty();
        for segment in &path.segments {
            if segment.is_error() {
                self.report(ResolveError::SegmentHasError { segment: segment.to_string(), span: segment.span });
                return Ok(None);
            }
            let text = match &segment.generic_args {
                Some(args) if segment.has_generic_args() => {
                    if resolve_generic_args {
                        for arg in &args.types {
                            self.resolve_type(arg)?;
                        }
                    }
                    if include_generic_args {
                        format!("{}::{}", segment.ident_str(), canonicalize_generic_args(args))
                    } else {
                        segment.ident_str().to_string()
                    }
                }
                _ => segment.ident_str().to_string(),
            };
            result = result.append(&CanonicalPath::new_seg(segment.id, text));
        }
        Ok(Some(result))
    }
}

/// `decl` with its innermost segment specialised to `args`.
fn with_generic_args(decl: &CanonicalPath, segment_id: NodeId, args: Option<&GenericArgs>) -> CanonicalPath {
    let Some(args) = args else {
        return decl.clone();
    };
    let mut result = CanonicalPath::create_empty();
    let last = decl.size().saturating_sub(1);
    for (i, (id, text)) in decl.segments().enumerate() {
        let seg = if i == last {
            CanonicalPath::new_seg(segment_id, format!("{text}::{}", canonicalize_generic_args(args)))
        } else {
            CanonicalPath::new_seg(id, text)
        };
        result = result.append(&seg);
    }
    result
}

#[cfg(test)]
mod tests {
    use osprey_syntax::AstBuilder;

    use super::*;

    fn args_of(ty: &Type) -> &GenericArgs {
        match &ty.kind {
            TypeKind::Path(path) => path.segments[0].generic_args.as_ref().unwrap(),
            other => panic!("not a path: {other:?}"),
        }
    }

    #[test]
    fn generic_args_render_without_spaces_between_arguments() {
        let mut b = AstBuilder::new();
        let key = b.ty_path(&["K"]);
        let value = b.ty_path(&["V"]);
        let inner = b.ty_generic("Vec", vec![value]);
        let map = b.ty_generic("Map", vec![key, inner]);
        assert_eq!(canonicalize_generic_args(args_of(&map)), "<K,Vec<V>>");
    }

    #[test]
    fn different_arguments_render_differently() {
        let mut b = AstBuilder::new();
        let a = b.ty_path(&["A"]);
        let c = b.ty_path(&["B"]);
        let vec_a = b.ty_generic("Vec", vec![a]);
        let vec_b = b.ty_generic("Vec", vec![c]);
        assert_ne!(canonicalize_generic_args(args_of(&vec_a)), canonicalize_generic_args(args_of(&vec_b)));
    }
}
