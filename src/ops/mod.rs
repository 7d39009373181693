//! High-level operations.
//!
//! [`configure`] runs the probes and resolvers; [`assemble`] turns their
//! results into the final document.

pub mod assemble;
pub mod configure;

pub use assemble::{assemble, ResolvedInputs};
pub use configure::{configure, resolve_flavor};
