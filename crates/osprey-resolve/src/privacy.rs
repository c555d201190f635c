//! Visibility checks over the resolved use sites.

use osprey_syntax::{NodeId, Visibility};

use crate::error::ResolveError;
use crate::mappings::{DeclVisibility, Mappings};

/// Whether code in `use_module` may name a declaration with `decl`'s
/// visibility.
///
/// - `pub` and `pub(crate)`: everywhere in the crate
/// - private: the declaring module and its descendants
/// - `pub(super)`: the parent of the declaring module and its descendants
pub fn is_visible(mappings: &Mappings, decl: &DeclVisibility, use_module: NodeId) -> bool {
    match decl.vis {
        Visibility::Public | Visibility::Crate => true,
        Visibility::Private => mappings.is_same_or_descendant(use_module, decl.module),
        Visibility::Super => {
            let scope = mappings.lookup_parent_module(decl.module).unwrap_or(decl.module);
            mappings.is_same_or_descendant(use_module, scope)
        }
    }
}

/// Check every recorded use site, in the order they were resolved.
pub fn report_private_uses(mappings: &Mappings) -> Vec<ResolveError> {
    let mut errors = Vec::new();
    for site in mappings.use_sites() {
        let Some(decl) = mappings.lookup_visibility(site.decl) else {
            continue;
        };
        if !is_visible(mappings, decl, site.module) {
            log::debug!("`{}` ({}) is not visible from module {}", site.name, site.decl, site.module);
            errors.push(ResolveError::PrivateItem {
                name: site.name.clone(),
                span: site.span,
                declared_span: decl.span,
            });
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    // root(0) -> a(1) -> b(2); root -> c(3)
    fn tree() -> Mappings {
        let mut mappings = Mappings::new();
        mappings.insert_child_item_to_parent_module_mapping(NodeId(1), NodeId(0));
        mappings.insert_child_item_to_parent_module_mapping(NodeId(2), NodeId(1));
        mappings.insert_child_item_to_parent_module_mapping(NodeId(3), NodeId(0));
        mappings
    }

    fn decl(vis: Visibility, module: u32) -> DeclVisibility {
        DeclVisibility { vis, module: NodeId(module), span: (0, 1).into() }
    }

    #[test]
    fn private_is_visible_below_the_declaring_module() {
        let mappings = tree();
        let private_in_a = decl(Visibility::Private, 1);
        assert!(is_visible(&mappings, &private_in_a, NodeId(1)));
        assert!(is_visible(&mappings, &private_in_a, NodeId(2)));
        assert!(!is_visible(&mappings, &private_in_a, NodeId(0)));
        assert!(!is_visible(&mappings, &private_in_a, NodeId(3)));
    }

    #[test]
    fn super_widens_to_the_parent() {
        let mappings = tree();
        let in_b = decl(Visibility::Super, 2);
        assert!(is_visible(&mappings, &in_b, NodeId(1)));
        assert!(!is_visible(&mappings, &in_b, NodeId(0)));

        let in_a = decl(Visibility::Super, 1);
        assert!(is_visible(&mappings, &in_a, NodeId(3)));
    }

    #[test]
    fn public_and_crate_are_visible_everywhere() {
        let mappings = tree();
        assert!(is_visible(&mappings, &decl(Visibility::Public, 2), NodeId(3)));
        assert!(is_visible(&mappings, &decl(Visibility::Crate, 2), NodeId(3)));
    }
}
