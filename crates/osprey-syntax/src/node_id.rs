use std::fmt;

/// Opaque identity of a syntax node.
///
/// Ids are handed out by a [`NodeIdGen`] and are never reused within one
/// compilation unit, so they can key every side table the resolver builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic allocator for [`NodeId`]s.
#[derive(Debug, Clone, Default)]
pub struct NodeIdGen {
    next: u32,
}

impl NodeIdGen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue allocating after `bound`, e.g. past the ids of a finished tree.
    pub fn starting_at(bound: NodeId) -> Self {
        Self { next: bound.0 }
    }

    pub fn fresh(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }

    /// First id that has not been handed out yet.
    pub fn bound(&self) -> NodeId {
        NodeId(self.next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_never_reused() {
        let mut ids = NodeIdGen::new();
        let a = ids.fresh();
        let b = ids.fresh();
        assert_ne!(a, b);
        assert_eq!(ids.bound(), NodeId(2));

        let mut after = NodeIdGen::starting_at(ids.bound());
        assert_eq!(after.fresh(), NodeId(2));
    }
}
