//! Syntax tree for the osprey front-end.
//!
//! The resolver never mutates this tree. Every node that can be declared,
//! referenced or annotated carries a [`NodeId`]; all later phases key their
//! side tables by those ids.
//!
//! Parsing is not part of this crate. Trees are produced by an external parser
//! or, in tests and embedders, by [`AstBuilder`], which hands out ids that are
//! never reused within one crate.

pub mod ast;
mod builder;
mod display;
mod node_id;

pub use ast::*;
pub use builder::AstBuilder;
pub use node_id::{NodeId, NodeIdGen};
