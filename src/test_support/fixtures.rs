//! Canned compiler output for common test scenarios.

/// `gcc -dM -E -` on x86_64 linux (abridged).
pub const LINUX_X64_MACROS: &str = r#"#define __DBL_MIN_EXP__ (-1021)
#define __UINT_LEAST16_MAX__ 65535
#define __x86_64 1
#define __x86_64__ 1
#define __linux 1
#define __linux__ 1
#define __unix__ 1
#define __VERSION__ "4.8.2"
#define __SIZEOF_POINTER__ 8
"#;

/// ARMv7-A hard-float toolchain (`arm-linux-gnueabihf-gcc` 4.8).
pub const ARMV7_HARD_MACROS: &str = r#"#define __arm__ 1
#define __ARM_ARCH_7A__ 1
#define __ARM_EABI__ 1
#define __ARM_NEON__ 1
#define __ARM_PCS_VFP 1
#define __VFP_FP__ 1
#define __VERSION__ "4.8.2"
"#;

/// ARMv6 soft-float toolchain.
pub const ARMV6_SOFT_MACROS: &str = r#"#define __arm__ 1
#define __ARM_ARCH_6__ 1
#define __ARM_EABI__ 1
#define __ARM_PCS 1
#define __SOFTFP__ 1
"#;

/// MIPS little-endian toolchain.
pub const MIPSEL_MACROS: &str = r#"#define __mips__ 1
#define __mips 32
#define __MIPSEL__ 1
"#;

/// First lines of `gcc --version`.
pub const GCC_BANNER: &str = "gcc (Ubuntu 4.8.2-19ubuntu1) 4.8.2\n\
Copyright (C) 2013 Free Software Foundation, Inc.\n";

/// First lines of Apple's `cc --version`.
pub const APPLE_CLANG_BANNER: &str = "Apple LLVM version 5.0 (clang-500.2.79) (based on LLVM 3.3svn)\n\
Target: x86_64-apple-darwin13.0.0\n";
