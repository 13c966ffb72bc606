//! Mach-O inspection using goblin.
//!
//! Answers the two questions the generator and `plan` ask of a binary on disk:
//! which architectures it carries and whether it is a dynamic library.

use crate::embed::{
    Arch,
    error::{Error, ErrorExt, Result},
};
use goblin::mach::{Mach, MachO, header::MH_DYLIB};
use std::path::Path;

const CPU_ARCH_ABI64: u32 = 0x0100_0000;
const CPU_ARCH_ABI64_32: u32 = 0x0200_0000;
const CPU_TYPE_X86: u32 = 7;
const CPU_TYPE_ARM: u32 = 12;
const CPU_TYPE_X86_64: u32 = CPU_TYPE_X86 | CPU_ARCH_ABI64;
const CPU_TYPE_ARM64: u32 = CPU_TYPE_ARM | CPU_ARCH_ABI64;
const CPU_TYPE_ARM64_32: u32 = CPU_TYPE_ARM | CPU_ARCH_ABI64_32;
const CPU_SUBTYPE_MASK: u32 = 0xff00_0000;
const CPU_SUBTYPE_ARM_V7: u32 = 9;
const CPU_SUBTYPE_ARM_V7S: u32 = 11;
const CPU_SUBTYPE_ARM64E: u32 = 2;

/// Maps a Mach-O cpu type/subtype pair to an [`Arch`].
pub fn arch_from_cpu(cputype: u32, cpusubtype: u32) -> Option<Arch> {
    let subtype = cpusubtype & !CPU_SUBTYPE_MASK;
    match cputype {
        CPU_TYPE_X86_64 => Some(Arch::X86_64),
        CPU_TYPE_X86 => Some(Arch::I386),
        CPU_TYPE_ARM64 if subtype == CPU_SUBTYPE_ARM64E => Some(Arch::Arm64e),
        CPU_TYPE_ARM64 => Some(Arch::Arm64),
        CPU_TYPE_ARM64_32 => Some(Arch::Arm64_32),
        CPU_TYPE_ARM if subtype == CPU_SUBTYPE_ARM_V7 => Some(Arch::Armv7),
        CPU_TYPE_ARM if subtype == CPU_SUBTYPE_ARM_V7S => Some(Arch::Armv7s),
        _ => None,
    }
}

fn read(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).fs_context("reading Mach-O binary", path)
}

fn parse<'a>(bytes: &'a [u8], path: &Path) -> Result<Mach<'a>> {
    Mach::parse(bytes).map_err(|e| {
        Error::GenericError(format!(
            "failed to parse {} as Mach-O: {}",
            path.display(),
            e
        ))
    })
}

/// Architectures contained in the thin or fat binary at `path`, in file order.
///
/// Unknown cpu types are skipped with a warning.
pub fn binary_archs(path: &Path) -> Result<Vec<Arch>> {
    let bytes = read(path)?;
    let mut archs = Vec::new();

    match parse(&bytes, path)? {
        Mach::Binary(macho) => {
            push_arch(&mut archs, macho.header.cputype, macho.header.cpusubtype, path);
        }
        Mach::Fat(multi) => {
            for fat_arch in multi.iter_arches() {
                let fat_arch = fat_arch.map_err(|e| {
                    Error::GenericError(format!(
                        "failed to read fat header of {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                push_arch(&mut archs, fat_arch.cputype, fat_arch.cpusubtype, path);
            }
        }
    }

    Ok(archs)
}

fn push_arch(archs: &mut Vec<Arch>, cputype: u32, cpusubtype: u32, path: &Path) {
    match arch_from_cpu(cputype, cpusubtype) {
        Some(arch) => archs.push(arch),
        None => log::warn!(
            "Unrecognised cpu type {:#x}/{:#x} in {}",
            cputype,
            cpusubtype,
            path.display()
        ),
    }
}

/// Whether the binary at `path` is a dynamic library (`MH_DYLIB`).
///
/// For fat binaries the first slice decides; every slice of a well-formed
/// universal binary has the same file type.
pub fn is_dynamic_library(path: &Path) -> Result<bool> {
    let bytes = read(path)?;

    let filetype = match parse(&bytes, path)? {
        Mach::Binary(macho) => macho.header.filetype,
        Mach::Fat(multi) => {
            let first = multi
                .iter_arches()
                .next()
                .ok_or_else(|| {
                    Error::GenericError(format!("{} is an empty fat binary", path.display()))
                })?
                .map_err(|e| {
                    Error::GenericError(format!(
                        "failed to read fat header of {}: {}",
                        path.display(),
                        e
                    ))
                })?;

            let start = first.offset as usize;
            let end = start.saturating_add(first.size as usize);
            let slice = bytes.get(start..end).ok_or_else(|| {
                Error::GenericError(format!(
                    "fat slice of {} lies outside the file",
                    path.display()
                ))
            })?;

            MachO::parse(slice, 0)
                .map_err(|e| {
                    Error::GenericError(format!(
                        "failed to parse first slice of {}: {}",
                        path.display(),
                        e
                    ))
                })?
                .header
                .filetype
        }
    };

    Ok(filetype == MH_DYLIB)
}
