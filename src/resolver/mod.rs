//! Resolvers turning probe results and options into typed decisions.
//!
//! Every resolver is a plain function over already-probed data, except
//! where a subprocess is part of the decision (host architecture on
//! non-Windows flavors, OpenSSL's pkg-config lookup). Nothing here builds
//! the final configuration; that is [`crate::ops::assemble`].

pub mod abi;
pub mod arch;
pub mod errors;
pub mod features;
pub mod platform;

pub use errors::{ConfigureError, Result};
pub use platform::{PlatformFeature, PlatformFeatures, PlatformRequests};
