//! Platform-exclusive features gated on the target flavor.
//!
//! | feature              | on by default | may be requested on |
//! |----------------------|---------------|---------------------|
//! | DTrace               | solaris, mac  | solaris, mac, linux |
//! | ETW                  | win           | win                 |
//! | performance counters | win           | win                 |
//!
//! Linux never gets DTrace itself. `--with-dtrace` there switches on the
//! systemtap backend instead. Flavors with neither report systemtap off.

use std::fmt;
use std::path::Path;

use crate::core::Flavor;
use crate::resolver::errors::{ConfigureError, Result};
use crate::toolchain::EnvSnapshot;
use crate::util::config::ConfigureOptions;

/// A feature only some flavors can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformFeature {
    Dtrace,
    Etw,
    PerfCtr,
}

impl PlatformFeature {
    pub const ALL: [PlatformFeature; 3] = [
        PlatformFeature::Dtrace,
        PlatformFeature::Etw,
        PlatformFeature::PerfCtr,
    ];

    /// Flavors on which an explicit enable request is honored.
    pub fn supported_flavors(&self) -> &'static [Flavor] {
        match self {
            PlatformFeature::Dtrace => &[Flavor::Solaris, Flavor::Mac, Flavor::Linux],
            PlatformFeature::Etw | PlatformFeature::PerfCtr => &[Flavor::Win],
        }
    }

    /// Flavors on which the feature is built unless disabled.
    pub fn default_flavors(&self) -> &'static [Flavor] {
        match self {
            PlatformFeature::Dtrace => &[Flavor::Solaris, Flavor::Mac],
            PlatformFeature::Etw | PlatformFeature::PerfCtr => &[Flavor::Win],
        }
    }

    pub fn supported_description(&self) -> String {
        self.supported_flavors()
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn enable_flag(&self) -> &'static str {
        match self {
            PlatformFeature::Dtrace => "--with-dtrace",
            PlatformFeature::Etw => "--with-etw",
            PlatformFeature::PerfCtr => "--with-perfctr",
        }
    }

    /// The build variable this feature sets.
    pub fn variable(&self) -> &'static str {
        match self {
            PlatformFeature::Dtrace => "node_use_dtrace",
            PlatformFeature::Etw => "node_use_etw",
            PlatformFeature::PerfCtr => "node_use_perfctr",
        }
    }
}

impl fmt::Display for PlatformFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlatformFeature::Dtrace => "DTrace",
            PlatformFeature::Etw => "ETW",
            PlatformFeature::PerfCtr => "performance counters",
        };
        f.write_str(name)
    }
}

/// Explicit `--with-X` / `--without-X` pair for one feature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureRequest {
    pub enable: bool,
    pub disable: bool,
}

/// Requests for every platform feature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlatformRequests {
    pub dtrace: FeatureRequest,
    pub etw: FeatureRequest,
    pub perfctr: FeatureRequest,
}

impl PlatformRequests {
    pub fn from_options(options: &ConfigureOptions) -> Self {
        PlatformRequests {
            dtrace: FeatureRequest {
                enable: options.with_dtrace,
                disable: options.without_dtrace,
            },
            etw: FeatureRequest {
                enable: options.with_etw,
                disable: options.without_etw,
            },
            perfctr: FeatureRequest {
                enable: options.with_perfctr,
                disable: options.without_perfctr,
            },
        }
    }

    pub fn get(&self, feature: PlatformFeature) -> FeatureRequest {
        match feature {
            PlatformFeature::Dtrace => self.dtrace,
            PlatformFeature::Etw => self.etw,
            PlatformFeature::PerfCtr => self.perfctr,
        }
    }
}

/// Resolved platform features.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlatformFeatures {
    pub dtrace: bool,
    /// `None` where DTrace itself can be built.
    pub systemtap: Option<bool>,
    pub etw: bool,
    pub perfctr: bool,
}

impl PlatformFeatures {
    pub fn get(&self, feature: PlatformFeature) -> bool {
        match feature {
            PlatformFeature::Dtrace => self.dtrace,
            PlatformFeature::Etw => self.etw,
            PlatformFeature::PerfCtr => self.perfctr,
        }
    }
}

/// Resolve all platform features for `flavor`.
pub fn resolve(flavor: Flavor, requests: &PlatformRequests) -> Result<PlatformFeatures> {
    let mut features = PlatformFeatures::default();

    for feature in PlatformFeature::ALL {
        let enabled = resolve_one(feature, flavor, requests.get(feature))?;
        match feature {
            PlatformFeature::Dtrace => features.dtrace = enabled,
            PlatformFeature::Etw => features.etw = enabled,
            PlatformFeature::PerfCtr => features.perfctr = enabled,
        }
    }

    features.systemtap = match flavor {
        Flavor::Linux => Some(requests.dtrace.enable),
        _ if PlatformFeature::Dtrace.default_flavors().contains(&flavor) => None,
        _ => Some(false),
    };

    tracing::debug!("platform features for {}: {:?}", flavor, features);
    Ok(features)
}

fn resolve_one(feature: PlatformFeature, flavor: Flavor, request: FeatureRequest) -> Result<bool> {
    if feature.default_flavors().contains(&flavor) {
        return Ok(!request.disable);
    }
    if request.enable && !feature.supported_flavors().contains(&flavor) {
        return Err(ConfigureError::UnsupportedPlatformFeature { feature, flavor });
    }
    Ok(false)
}

/// Whether a Windows SDK with the performance counter preprocessor is
/// installed. Always false off Windows.
pub fn windows_sdk_available(flavor: Flavor, env: &EnvSnapshot) -> bool {
    if !flavor.is_windows() {
        return false;
    }
    let Some(dir) = env.get("WindowsSdkDir") else {
        return false;
    };

    let ctrpp = Path::new(dir).join("bin").join("ctrpp.exe");
    let found = ctrpp.is_file();
    tracing::debug!("ctrpp at {}: {}", ctrpp.display(), found);
    found
}
