//! Floating-point ABI profiles for ARM and MIPS targets.

use std::fmt;

/// VFP floating-point unit generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fpu {
    Vfpv2,
    Vfpv3,
}

impl Fpu {
    pub fn as_str(&self) -> &'static str {
        match self {
            Fpu::Vfpv2 => "vfpv2",
            Fpu::Vfpv3 => "vfpv3",
        }
    }
}

impl fmt::Display for Fpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved ARM capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmAbi {
    pub armv7: bool,
    pub neon: bool,
    pub hard_float: bool,
}

impl ArmAbi {
    /// VFPv3 ships with ARMv7, so the FPU follows from `armv7`.
    pub fn fpu(&self) -> Fpu {
        if self.armv7 {
            Fpu::Vfpv3
        } else {
            Fpu::Vfpv2
        }
    }
}

/// Resolved MIPS float ABI. `None` leaves the choice to the build files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MipsAbi {
    pub hard_float: Option<bool>,
}

/// ABI details for targets that need them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbiProfile {
    Arm(ArmAbi),
    Mips(MipsAbi),
}

impl AbiProfile {
    /// Hard-float choice, if one was made.
    pub fn hard_float(&self) -> Option<bool> {
        match self {
            AbiProfile::Arm(arm) => Some(arm.hard_float),
            AbiProfile::Mips(mips) => mips.hard_float,
        }
    }
}
