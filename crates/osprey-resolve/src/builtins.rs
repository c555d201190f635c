//! Primitive types every crate can name without declaring them.

use indexmap::IndexMap;
use osprey_syntax::{NodeId, NodeIdGen};

pub const PRIMITIVE_TYPES: [&str; 17] = [
    "bool", "char", "str", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64",
    "u128", "usize", "f32", "f64",
];

/// Ids of the builtin types. They live past the tree's id bound so they can
/// never collide with a real node.
#[derive(Debug, Clone)]
pub struct Builtins {
    primitives: IndexMap<&'static str, NodeId>,
    unit: NodeId,
    never: NodeId,
    inferred: NodeId,
    /// Owner of the frame holding the primitives, opened beneath the crate
    /// root so that crate items shadow them.
    prelude: NodeId,
}

impl Builtins {
    pub fn allocate(ids: &mut NodeIdGen) -> Self {
        let primitives = PRIMITIVE_TYPES.iter().map(|name| (*name, ids.fresh())).collect();
        Self {
            primitives,
            unit: ids.fresh(),
            never: ids.fresh(),
            inferred: ids.fresh(),
            prelude: ids.fresh(),
        }
    }

    pub fn primitive(&self, name: &str) -> Option<NodeId> {
        self.primitives.get(name).copied()
    }

    pub fn primitives(&self) -> impl Iterator<Item = (&'static str, NodeId)> + '_ {
        self.primitives.iter().map(|(name, id)| (*name, *id))
    }

    /// `()`
    pub fn unit(&self) -> NodeId {
        self.unit
    }

    /// `!`
    pub fn never(&self) -> NodeId {
        self.never
    }

    /// `_`
    pub fn inferred(&self) -> NodeId {
        self.inferred
    }

    pub fn prelude(&self) -> NodeId {
        self.prelude
    }

    pub fn is_builtin(&self, id: NodeId) -> bool {
        id == self.unit
            || id == self.never
            || id == self.inferred
            || self.primitives.values().any(|builtin| *builtin == id)
    }
}
