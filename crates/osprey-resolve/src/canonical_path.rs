//! Fully qualified identities of declarations.

use std::fmt;
use std::hash::{Hash, Hasher};

use osprey_syntax::NodeId;

/// An ordered list of `(NodeId, text)` segments, outermost first.
///
/// The crate root is the empty path. Paths are values: [`append`] builds a
/// new path and leaves both operands untouched. Equality and hashing look at
/// the rendered text only, so a use-site key built with the use-site's own
/// ids matches the declaration's key.
///
/// [`append`]: CanonicalPath::append
#[derive(Debug, Clone, Default)]
pub struct CanonicalPath {
    segs: Vec<(NodeId, String)>,
}

impl CanonicalPath {
    pub fn create_empty() -> Self {
        Self::default()
    }

    pub fn new_seg(id: NodeId, text: impl Into<String>) -> Self {
        Self { segs: vec![(id, text.into())] }
    }

    /// `<impl_type as trait>`, the segment under which the items of a trait
    /// impl are registered.
    pub fn trait_impl_projection_seg(
        id: NodeId,
        trait_seg: &CanonicalPath,
        impl_type_seg: &CanonicalPath,
    ) -> Self {
        Self::new_seg(id, format!("<{impl_type_seg} as {trait_seg}>"))
    }

    pub fn append(&self, other: &CanonicalPath) -> Self {
        let mut segs = Vec::with_capacity(self.segs.len() + other.segs.len());
        segs.extend(self.segs.iter().cloned());
        segs.extend(other.segs.iter().cloned());
        Self { segs }
    }

    pub fn is_empty(&self) -> bool {
        self.segs.is_empty()
    }

    pub fn size(&self) -> usize {
        self.segs.len()
    }

    pub fn get(&self, index: usize) -> Option<(NodeId, &str)> {
        self.segs.get(index).map(|(id, text)| (*id, text.as_str()))
    }

    /// Id of the innermost segment.
    pub fn node_id(&self) -> Option<NodeId> {
        self.segs.last().map(|(id, _)| *id)
    }

    pub fn segments(&self) -> impl Iterator<Item = (NodeId, &str)> {
        self.segs.iter().map(|(id, text)| (*id, text.as_str()))
    }

    pub fn as_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (_, text)) in self.segs.iter().enumerate() {
            if i > 0 {
                f.write_str("::")?;
            }
            f.write_str(text)?;
        }
        Ok(())
    }
}

impl PartialEq for CanonicalPath {
    fn eq(&self, other: &Self) -> bool {
        self.segs.len() == other.segs.len()
            && self.segs.iter().zip(&other.segs).all(|((_, a), (_, b))| a == b)
    }
}

impl Eq for CanonicalPath {}

impl Hash for CanonicalPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.segs.len().hash(state);
        for (_, text) in &self.segs {
            text.hash(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    fn seg(id: u32, text: &str) -> CanonicalPath {
        CanonicalPath::new_seg(NodeId(id), text)
    }

    #[test]
    fn append_leaves_operands_alone() {
        let a = seg(1, "a");
        let b = seg(2, "b");
        let ab = a.append(&b);

        assert_eq!(a.to_string(), "a");
        assert_eq!(b.to_string(), "b");
        assert_eq!(ab.to_string(), "a::b");
        assert_eq!(ab.size(), 2);
        assert_eq!(ab.node_id(), Some(NodeId(2)));
    }

    #[test]
    fn empty_path_is_the_crate_root() {
        let root = CanonicalPath::create_empty();
        assert!(root.is_empty());
        assert_eq!(root.to_string(), "");
        assert_eq!(root.node_id(), None);
        assert_eq!(root.append(&seg(3, "f")).to_string(), "f");
    }

    #[test]
    fn projection_segment() {
        let tr = seg(1, "a").append(&seg(2, "Iter"));
        let ty = seg(3, "Foo");
        let projection = CanonicalPath::trait_impl_projection_seg(NodeId(9), &tr, &ty);
        expect!["<Foo as a::Iter>"].assert_eq(&projection.to_string());
        assert_eq!(projection.size(), 1);
        assert_eq!(projection.node_id(), Some(NodeId(9)));
    }

    #[test]
    fn equality_ignores_node_ids() {
        assert_eq!(seg(1, "f"), seg(7, "f"));
        assert_ne!(seg(1, "f"), seg(1, "g"));
        // same text, different segmentation
        assert_ne!(seg(1, "a::b"), seg(1, "a").append(&seg(2, "b")));
    }
}
