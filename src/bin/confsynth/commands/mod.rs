//! Command implementations

pub mod configure;
pub mod probe;
