//! Name resolution and canonical paths for the osprey front-end.
//!
//! Resolution runs in two passes over an immutable [`osprey_syntax::Crate`]:
//!
//! 1. the top-level pass registers every declaration in one of two
//!    namespaces (names and types), records its canonical path and links it
//!    to its enclosing module, so declaration order within a module does not
//!    matter;
//! 2. the item pass resolves every type and path in signatures and bodies
//!    against those tables.
//!
//! Results land in [`Mappings`], keyed by [`NodeId`]. User errors are
//! collected, never fatal; `Err` is only returned when the resolver's own
//! bookkeeping is broken.
//!
//! ```
//! use osprey_resolve::resolve_crate;
//! use osprey_source::ResolveConfig;
//! use osprey_syntax::AstBuilder;
//!
//! let mut b = AstBuilder::new();
//! let f = b.fn_item("f");
//! let m = b.module("m", vec![f]);
//! let krate = b.finish(vec![m]);
//!
//! let resolved = resolve_crate(&krate, &ResolveConfig::default()).unwrap();
//! assert!(resolved.diagnostics.is_empty());
//! ```

mod builtins;
mod canonical_path;
mod context;
mod diagnostics;
mod error;
mod expr;
mod item;
mod mappings;
mod module_scope;
mod path;
mod privacy;
mod scope;
mod toplevel;
mod types;

pub use builtins::{Builtins, PRIMITIVE_TYPES};
pub use canonical_path::CanonicalPath;
pub use diagnostics::Diagnostics;
pub use error::{InvariantViolation, ResolveError, ResolveResult};
pub use mappings::{ContainerKind, DeclVisibility, Mappings, ModuleChild, UseSite};
pub use module_scope::ModuleStack;
pub use privacy::is_visible;
pub use scope::{Binding, Namespace, Rib, Scope};
pub use types::canonicalize_generic_args;

use osprey_source::{OspreyError, Report, ResolveConfig};
use osprey_syntax::{Crate, NodeId};

use context::Resolver;

/// Everything resolution produced for one crate.
#[derive(Debug, Clone)]
pub struct ResolvedCrate {
    pub crate_id: NodeId,
    pub mappings: Mappings,
    pub builtins: Builtins,
    /// User errors, in the order they were found.
    pub diagnostics: Vec<ResolveError>,
    /// Errors past the configured limit that were dropped.
    pub dropped_diagnostics: usize,
}

impl ResolvedCrate {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty() || self.dropped_diagnostics > 0
    }

    /// Rendered canonical path of a declaration.
    pub fn canonical_path_of(&self, id: NodeId) -> Option<String> {
        self.mappings.lookup_canonical_path(id).map(CanonicalPath::as_string)
    }

    /// Declaration a use site (path or segment) resolved to, in either namespace.
    pub fn declaration_of(&self, use_id: NodeId) -> Option<NodeId> {
        self.mappings
            .lookup_resolved_name(use_id)
            .or_else(|| self.mappings.lookup_resolved_type(use_id))
    }

    /// One line per diagnostic: message and primary offset.
    pub fn diagnostic_summary(&self) -> String {
        let mut out = String::new();
        for error in &self.diagnostics {
            out.push_str(&format!("{} @{}\n", error, error.span().offset()));
        }
        if self.dropped_diagnostics > 0 {
            out.push_str(&format!("... {} more\n", self.dropped_diagnostics));
        }
        out
    }

    /// Attach `source` to every diagnostic for rendering.
    pub fn reports(&self, name: &str, source: &str) -> Vec<Report> {
        self.diagnostics.iter().cloned().map(|error| error.report(name, source)).collect()
    }
}

/// Resolve every name in `krate`.
pub fn resolve_crate(krate: &Crate, config: &ResolveConfig) -> ResolveResult<ResolvedCrate> {
    log::info!("resolving crate `{}`", config.krate.name);
    let mut resolver = Resolver::new(krate, config)?;

    resolver.resolve_toplevel_crate(krate)?;
    resolver.resolve_items(krate)?;

    if resolver.config.resolve.check_privacy {
        for error in privacy::report_private_uses(&resolver.mappings) {
            resolver.report(error);
        }
    }

    if !resolver.modules.is_empty() {
        return Err(InvariantViolation::UnbalancedModuleStack {
            expected: krate.id,
            found: resolver.modules.peek_current()?,
        });
    }

    let Resolver { crate_id, mappings, builtins, diagnostics, .. } = resolver;
    let (diagnostics, dropped_diagnostics) = diagnostics.into_parts();
    log::info!("resolved crate `{}` with {} error(s)", config.krate.name, diagnostics.len() + dropped_diagnostics);
    Ok(ResolvedCrate { crate_id, mappings, builtins, diagnostics, dropped_diagnostics })
}
