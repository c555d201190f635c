//! Ambient pieces shared by the osprey compiler crates.
//!
//! - [`ResolveConfig`]: TOML-backed settings for a resolution session
//! - [`ConfigError`]: what can go wrong while loading them
//! - [`Report`]: a diagnostic bundled with the source text it points into, so
//!   miette can render labels against real code

mod config;
mod diagnostic;
mod error;

pub use config::{CrateSection, ResolveConfig, ResolveSection};
pub use diagnostic::{OspreyError, Report};
pub use error::ConfigError;
