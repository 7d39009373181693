//! Floating-point ABI resolution for ARM and MIPS targets.
//!
//! ARM capabilities are read from the compiler's predefined macros. Whether
//! the toolchain targets the hard-float ABI depends on the GCC version:
//!
//! | version        | rule                                                      |
//! |----------------|-----------------------------------------------------------|
//! | >= 4.6         | hard iff `__ARM_PCS_VFP` is defined                       |
//! | < 4.5          | always soft (no hard-float support)                       |
//! | [4.5, 4.6)     | `__ARM_PCS_VFP` => hard; `__ARM_PCS`, `__SOFTFP` or no    |
//! |                | `__VFP_FP__` => soft; otherwise ambiguous (fatal)         |
//!
//! An explicit `--with-arm-float-abi` always wins. MIPS has no probe at all.

use crate::core::{ArmAbi, CompilerIdentity, CompilerMacroSet, MipsAbi};
use crate::resolver::errors::{ConfigureError, Result};

const ARMV7_MACROS: [&str; 4] = [
    "__ARM_ARCH_7__",
    "__ARM_ARCH_7A__",
    "__ARM_ARCH_7R__",
    "__ARM_ARCH_7M__",
];

const NEON_MACRO: &str = "__ARM_NEON__";
const HARD_FLOAT_MACRO: &str = "__ARM_PCS_VFP";
const SOFT_FLOAT_MACROS: [&str; 2] = ["__ARM_PCS", "__SOFTFP"];
const VFP_MACRO: &str = "__VFP_FP__";

const ARM_FLOAT_ABIS: [&str; 3] = ["soft", "softfp", "hard"];
const MIPS_FLOAT_ABIS: [&str; 2] = ["soft", "hard"];

/// Whether the toolchain itself targets the hard-float ABI.
pub fn arm_hard_float_abi(macros: &CompilerMacroSet, identity: &CompilerIdentity) -> Result<bool> {
    let version = &identity.version;

    if version.at_least(4, 6, 0) {
        return Ok(macros.is_defined(HARD_FLOAT_MACRO));
    }
    if !version.at_least(4, 5, 0) {
        return Ok(false);
    }

    if macros.is_defined(HARD_FLOAT_MACRO) {
        Ok(true)
    } else if macros.any_defined(&SOFT_FLOAT_MACROS) || !macros.is_defined(VFP_MACRO) {
        Ok(false)
    } else {
        Err(ConfigureError::AmbiguousAbi {
            version: identity.to_string(),
        })
    }
}

/// Resolve ARM capabilities.
pub fn resolve_arm(
    macros: &CompilerMacroSet,
    identity: &CompilerIdentity,
    arm_float_abi: Option<&str>,
) -> Result<ArmAbi> {
    let hard_float = match arm_float_abi {
        Some(abi) => {
            if !ARM_FLOAT_ABIS.contains(&abi) {
                tracing::warn!(
                    "unrecognized ARM float ABI `{}`, treating it as soft-float",
                    abi
                );
            }
            abi == "hard"
        }
        None => arm_hard_float_abi(macros, identity)?,
    };

    let abi = ArmAbi {
        armv7: macros.any_defined(&ARMV7_MACROS),
        neon: macros.is_defined(NEON_MACRO),
        hard_float,
    };

    tracing::info!(
        "ARM: armv7={} fpu={} neon={} hard_float={}",
        abi.armv7,
        abi.fpu(),
        abi.neon,
        abi.hard_float
    );
    Ok(abi)
}

/// Resolve the MIPS float ABI. Only `soft` and `hard` are accepted; no
/// choice leaves the decision to the build files.
pub fn resolve_mips(mips_float_abi: Option<&str>) -> Result<MipsAbi> {
    match mips_float_abi {
        None => Ok(MipsAbi::default()),
        Some(abi) if MIPS_FLOAT_ABIS.contains(&abi) => Ok(MipsAbi {
            hard_float: Some(abi == "hard"),
        }),
        Some(abi) => Err(ConfigureError::InvalidOption {
            option: "--with-mips-float-abi",
            value: abi.to_string(),
            expected: MIPS_FLOAT_ABIS.join(", "),
        }),
    }
}
