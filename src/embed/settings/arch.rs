//! Apple CPU architecture tokens.

use std::{fmt, str::FromStr};

/// CPU architecture as named by Xcode's `ARCHS` / `arch` build settings and by `lipo`.
///
/// The generated script never sees this type: at execution time architectures are
/// plain words compared by substring. The enum exists for the generation side
/// (Mach-O inspection, planning) and is converted back with [`Arch::as_str`] before
/// any comparison that has to agree with the script.
///
/// # Examples
///
/// ```
/// use kodegen_bundler_embed::embed::Arch;
///
/// let arch: Arch = "arm64".parse().unwrap();
/// assert_eq!(arch, Arch::Arm64);
/// assert_eq!(arch.as_str(), "arm64");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Arch {
    /// 64-bit ARM (devices, Apple Silicon, arm64 simulators)
    Arm64,
    /// 64-bit ARM with pointer authentication
    Arm64e,
    /// ILP32 ARM64 (Apple Watch)
    Arm64_32,
    /// 32-bit ARMv7
    Armv7,
    /// 32-bit ARMv7s
    Armv7s,
    /// 64-bit Intel
    X86_64,
    /// 32-bit Intel
    I386,
}

impl Arch {
    /// Every known architecture, in `lipo -info` naming order.
    pub const ALL: [Arch; 7] = [
        Arch::Armv7,
        Arch::Armv7s,
        Arch::Arm64,
        Arch::Arm64e,
        Arch::Arm64_32,
        Arch::I386,
        Arch::X86_64,
    ];

    /// Token used by Xcode and `lipo`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::Arm64 => "arm64",
            Arch::Arm64e => "arm64e",
            Arch::Arm64_32 => "arm64_32",
            Arch::Armv7 => "armv7",
            Arch::Armv7s => "armv7s",
            Arch::X86_64 => "x86_64",
            Arch::I386 => "i386",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Arch::ALL
            .iter()
            .copied()
            .find(|arch| arch.as_str() == s)
            .ok_or_else(|| format!("unknown architecture: {s}"))
    }
}
