//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use confsynth::toolchain::DEFAULT_COMPILER;
use confsynth::util::config::{ConfigureOptions, LibraryOptions};

/// confsynth - pre-build configuration synthesizer
#[derive(Parser)]
#[command(name = "confsynth")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// C compiler command, may include arguments
    #[arg(long, global = true, env = "CC", default_value = DEFAULT_COMPILER)]
    pub cc: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe the toolchain and print the build configuration as JSON
    Configure(Box<ConfigureArgs>),

    /// Show what the compiler reports about itself
    Probe(ProbeArgs),
}

#[derive(Args)]
pub struct ConfigureArgs {
    /// Read additional options from this TOML file
    #[arg(long)]
    pub options_file: Option<PathBuf>,

    /// Also build the debug configuration
    #[arg(long)]
    pub debug: bool,

    /// Install prefix (defaults to /usr/local)
    #[arg(long)]
    pub prefix: Option<String>,

    /// Windows subsystem to use
    #[arg(long, value_parser = ["console", "windows"])]
    pub subsystem: Option<String>,

    /// Custom build tag
    #[arg(long)]
    pub tag: Option<String>,

    /// Add gdb JIT support
    #[arg(long)]
    pub gdb: bool,

    /// Use unsafe optimizations
    #[arg(long)]
    pub unsafe_optimizations: bool,

    /// Don't install the bundled npm
    #[arg(long)]
    pub without_npm: bool,

    /// Build without V8 snapshots
    #[arg(long)]
    pub without_snapshot: bool,

    /// Build without SSL
    #[arg(long)]
    pub without_ssl: bool,

    /// Disable OpenSSL v2
    #[arg(long)]
    pub no_ssl2: bool,

    /// Use on SunOS systems without ifaddrs.h
    #[arg(long)]
    pub no_ifaddrs: bool,

    /// CPU architecture to build for (ia32, x64, arm, mips, mipsel)
    #[arg(long)]
    pub dest_cpu: Option<String>,

    /// Operating system to build for (win, mac, solaris, freebsd, openbsd, netbsd, linux, android)
    #[arg(long)]
    pub dest_os: Option<String>,

    /// ARM floating-point ABI (soft, softfp, hard)
    #[arg(long = "with-arm-float-abi")]
    pub arm_float_abi: Option<String>,

    /// MIPS floating-point ABI (soft, hard)
    #[arg(long = "with-mips-float-abi")]
    pub mips_float_abi: Option<String>,

    /// Build with DTrace (systemtap on linux)
    #[arg(long, conflicts_with = "without_dtrace")]
    pub with_dtrace: bool,

    /// Build without DTrace
    #[arg(long)]
    pub without_dtrace: bool,

    /// Build with ETW
    #[arg(long, conflicts_with = "without_etw")]
    pub with_etw: bool,

    /// Build without ETW
    #[arg(long)]
    pub without_etw: bool,

    /// Build with performance counters
    #[arg(long, conflicts_with = "without_perfctr")]
    pub with_perfctr: bool,

    /// Build without performance counters
    #[arg(long)]
    pub without_perfctr: bool,

    /// Directory containing the systemtap headers
    #[arg(long)]
    pub systemtap_includes: Option<PathBuf>,

    /// Link to a shared zlib DLL instead of the static one
    #[arg(long)]
    pub shared_zlib: bool,
    /// Directory containing the zlib headers
    #[arg(long)]
    pub shared_zlib_includes: Option<PathBuf>,
    /// Directory to search for the shared zlib
    #[arg(long)]
    pub shared_zlib_libpath: Option<PathBuf>,
    /// Alternative lib names to link to (default: z)
    #[arg(long)]
    pub shared_zlib_libname: Option<String>,

    /// Link to a shared http_parser DLL instead of the static one
    #[arg(long)]
    pub shared_http_parser: bool,
    /// Directory containing the http_parser headers
    #[arg(long)]
    pub shared_http_parser_includes: Option<PathBuf>,
    /// Directory to search for the shared http_parser
    #[arg(long)]
    pub shared_http_parser_libpath: Option<PathBuf>,
    /// Alternative lib names to link to (default: http_parser)
    #[arg(long)]
    pub shared_http_parser_libname: Option<String>,

    /// Link to a shared cares DLL instead of the static one
    #[arg(long)]
    pub shared_cares: bool,
    /// Directory containing the cares headers
    #[arg(long)]
    pub shared_cares_includes: Option<PathBuf>,
    /// Directory to search for the shared cares
    #[arg(long)]
    pub shared_cares_libpath: Option<PathBuf>,
    /// Alternative lib names to link to (default: cares)
    #[arg(long)]
    pub shared_cares_libname: Option<String>,

    /// Link to a shared libuv DLL instead of the static one
    #[arg(long)]
    pub shared_libuv: bool,
    /// Directory containing the libuv headers
    #[arg(long)]
    pub shared_libuv_includes: Option<PathBuf>,
    /// Directory to search for the shared libuv
    #[arg(long)]
    pub shared_libuv_libpath: Option<PathBuf>,
    /// Alternative lib names to link to (default: uv)
    #[arg(long)]
    pub shared_libuv_libname: Option<String>,

    /// Link to a shared V8 DLL instead of the static one
    #[arg(long)]
    pub shared_v8: bool,
    /// Directory containing the V8 headers
    #[arg(long)]
    pub shared_v8_includes: Option<PathBuf>,
    /// Directory to search for the shared V8
    #[arg(long)]
    pub shared_v8_libpath: Option<PathBuf>,
    /// Alternative lib names to link to (default: v8)
    #[arg(long)]
    pub shared_v8_libname: Option<String>,

    /// Link to a shared OpenSSL DLL instead of the static one
    #[arg(long)]
    pub shared_openssl: bool,
    /// Directory containing the OpenSSL headers
    #[arg(long)]
    pub shared_openssl_includes: Option<PathBuf>,
    /// Directory to search for the shared OpenSSL
    #[arg(long)]
    pub shared_openssl_libpath: Option<PathBuf>,
    /// Alternative lib names to link to (default: ssl,crypto)
    #[arg(long)]
    pub shared_openssl_libname: Option<String>,
}

impl ConfigureArgs {
    /// The command-line layer of the options.
    pub fn to_options(&self) -> ConfigureOptions {
        let mut options = ConfigureOptions {
            debug: self.debug,
            prefix: self.prefix.clone(),
            subsystem: self.subsystem.clone(),
            tag: self.tag.clone(),
            gdb: self.gdb,
            unsafe_optimizations: self.unsafe_optimizations,
            without_npm: self.without_npm,
            without_snapshot: self.without_snapshot,
            without_ssl: self.without_ssl,
            no_ssl2: self.no_ssl2,
            no_ifaddrs: self.no_ifaddrs,
            dest_cpu: self.dest_cpu.clone(),
            dest_os: self.dest_os.clone(),
            arm_float_abi: self.arm_float_abi.clone(),
            mips_float_abi: self.mips_float_abi.clone(),
            with_dtrace: self.with_dtrace,
            without_dtrace: self.without_dtrace,
            with_etw: self.with_etw,
            without_etw: self.without_etw,
            with_perfctr: self.with_perfctr,
            without_perfctr: self.without_perfctr,
            systemtap_includes: self.systemtap_includes.clone(),
            ..ConfigureOptions::default()
        };

        options.shared.zlib = library(
            self.shared_zlib,
            &self.shared_zlib_includes,
            &self.shared_zlib_libpath,
            &self.shared_zlib_libname,
        );
        options.shared.http_parser = library(
            self.shared_http_parser,
            &self.shared_http_parser_includes,
            &self.shared_http_parser_libpath,
            &self.shared_http_parser_libname,
        );
        options.shared.cares = library(
            self.shared_cares,
            &self.shared_cares_includes,
            &self.shared_cares_libpath,
            &self.shared_cares_libname,
        );
        options.shared.libuv = library(
            self.shared_libuv,
            &self.shared_libuv_includes,
            &self.shared_libuv_libpath,
            &self.shared_libuv_libname,
        );
        options.shared.v8 = library(
            self.shared_v8,
            &self.shared_v8_includes,
            &self.shared_v8_libpath,
            &self.shared_v8_libname,
        );
        options.shared.openssl = library(
            self.shared_openssl,
            &self.shared_openssl_includes,
            &self.shared_openssl_libpath,
            &self.shared_openssl_libname,
        );

        options
    }
}

fn library(
    shared: bool,
    includes: &Option<PathBuf>,
    libpath: &Option<PathBuf>,
    libname: &Option<String>,
) -> LibraryOptions {
    LibraryOptions {
        shared,
        includes: includes.clone(),
        libpath: libpath.clone(),
        libname: libname.clone(),
    }
}

#[derive(Args)]
pub struct ProbeArgs {
    /// Operating system to probe for (defaults to the host)
    #[arg(long)]
    pub dest_os: Option<String>,
}
