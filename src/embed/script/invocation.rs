//! Invocation statements placed inside configuration blocks.

use std::fmt;

/// One call of a fixed script routine.
///
/// Arguments are double-quoted but not escaped, so build variables such as
/// `${BUILT_PRODUCTS_DIR}` or `${PODS_ROOT}` expand when the script runs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Invocation {
    /// `install_framework "<path>"`
    InstallFramework(String),
    /// `install_dsym "<path>"`
    InstallDsym(String),
    /// `install_bcsymbolmap "<path>"`
    InstallBcsymbolmap(String),
    /// `install_xcframework "<root>" "<slice>"...`
    InstallXcframework {
        /// Bundle root, already prefixed with `${PODS_ROOT}`.
        root: String,
        /// Candidate slice paths relative to `root`, in match order.
        slices: Vec<String>,
    },
}

impl Invocation {
    /// Name of the routine this statement calls.
    pub fn routine(&self) -> &'static str {
        match self {
            Invocation::InstallFramework(_) => "install_framework",
            Invocation::InstallDsym(_) => "install_dsym",
            Invocation::InstallBcsymbolmap(_) => "install_bcsymbolmap",
            Invocation::InstallXcframework { .. } => "install_xcframework",
        }
    }
}

fn quoted(value: &str) -> String {
    format!("\"{value}\"")
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Invocation::InstallFramework(path)
            | Invocation::InstallDsym(path)
            | Invocation::InstallBcsymbolmap(path) => {
                write!(f, "{} {}", self.routine(), quoted(path))
            }
            Invocation::InstallXcframework { root, slices } => {
                write!(f, "{} {}", self.routine(), quoted(root))?;
                for slice in slices {
                    write!(f, " {}", quoted(slice))?;
                }
                Ok(())
            }
        }
    }
}
