//! Architecture names and the fixed lookup tables owned by the core.
//!
//! All architecture strings flowing through the resolver use the canonical
//! spelling produced by [`canonicalize`]. The ABI and Debian tables are
//! deliberately closed: an architecture we have no entry for cannot be
//! cross-compiled for, and that is a configuration error, not a lookup miss.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArchError {
    #[error("Unsupported architecture {0}")]
    Unsupported(String),
}

/// Canonicalize an architecture name.
///
/// Same canonicalization as libvirt's `virArchFromHost`.
#[must_use]
pub fn canonicalize(arch: &str) -> &str {
    match arch {
        "i386" | "i486" | "i586" => "i686",
        "amd64" => "x86_64",
        other => other,
    }
}

/// Map an architecture to its GNU ABI triple.
pub fn to_abi(arch: &str) -> Result<&'static str, ArchError> {
    let abi = match arch {
        "aarch64" => "aarch64-linux-gnu",
        "armv6l" => "arm-linux-gnueabi",
        "armv7l" => "arm-linux-gnueabihf",
        "i686" => "i686-linux-gnu",
        "mingw32" => "i686-w64-mingw32",
        "mingw64" => "x86_64-w64-mingw32",
        "mips" => "mips-linux-gnu",
        "mipsel" => "mipsel-linux-gnu",
        "mips64el" => "mips64el-linux-gnuabi64",
        "ppc64le" => "powerpc64le-linux-gnu",
        "s390x" => "s390x-linux-gnu",
        "x86_64" => "x86_64-linux-gnu",
        other => return Err(ArchError::Unsupported(other.to_string())),
    };

    Ok(abi)
}

/// Map an architecture to the spelling Debian's packaging tools use.
///
/// The `mingw*` pseudo-architectures have no entry; Debian-based distros
/// never cross-build for Windows targets.
pub fn to_deb_arch(arch: &str) -> Result<&'static str, ArchError> {
    let deb = match arch {
        "aarch64" => "arm64",
        "armv6l" => "armel",
        "armv7l" => "armhf",
        "i686" => "i386",
        "mips" => "mips",
        "mipsel" => "mipsel",
        "mips64el" => "mips64el",
        "ppc64le" => "ppc64el",
        "s390x" => "s390x",
        "x86_64" => "amd64",
        other => return Err(ArchError::Unsupported(other.to_string())),
    };

    Ok(deb)
}

/// Whether an architecture names a Windows-targeting (`mingw*`) toolchain.
#[must_use]
pub fn is_windows_target(arch: &str) -> bool {
    arch.starts_with("mingw")
}
