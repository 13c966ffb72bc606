//! Embed frameworks script generation.
//!
//! Turns resolved [`Settings`] into the shell script an Xcode "Embed Pods
//! Frameworks" build phase runs.
//!
//! # Module Organization
//!
//! - `template` - Fixed preamble, routines and the handlebars layout
//! - `invocation` - Routine call statements
//! - `grouper` - Per-configuration statement accumulation and ordering
//! - `slices` - Generation-time xcframework slice selection
//! - `writer` - Writing the script with executable permissions

mod grouper;
mod invocation;
mod slices;
mod template;
mod writer;

pub use grouper::ConfigGroups;
pub use invocation::Invocation;
pub use slices::select_slices;
pub use writer::write_script;

use crate::embed::{
    Settings,
    error::{Error, Result},
    utils::path::relative_path,
};
use grouper::validate_config_name;
use handlebars::Handlebars;
use std::path::Path;
use template::{PARALLEL_SIGN_WAIT, ROUTINES, SCRIPT_TEMPLATE};

/// Permission bits for written scripts (`rwxr-xr-x`).
pub const SCRIPT_MODE: u32 = 0o755;

/// Variable the sandbox root is referenced through at execution time.
pub const SANDBOX_ROOT_VARIABLE: &str = "${PODS_ROOT}";

/// Rendered script text plus the mode it must be written with.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedScript {
    contents: String,
    mode: u32,
}

impl GeneratedScript {
    /// Script text.
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Unix permission bits to apply after writing.
    pub fn mode(&self) -> u32 {
        self.mode
    }

    /// Whether the mode carries any execute bit.
    pub fn is_executable(&self) -> bool {
        self.mode & 0o111 != 0
    }

    /// Consumes the value, returning the text.
    pub fn into_contents(self) -> String {
        self.contents
    }

    /// Writes the script to `path` and marks it executable.
    pub async fn save_as<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_script(self, path.as_ref()).await
    }
}

/// Generator for the embed frameworks script of one target.
///
/// # Examples
///
/// ```
/// use kodegen_bundler_embed::embed::{ArtifactSpec, EmbedFrameworksScript, SettingsBuilder};
///
/// # fn example() -> kodegen_bundler_embed::embed::Result<()> {
/// let settings = SettingsBuilder::new()
///     .sandbox_root("Pods")
///     .platform("ios")
///     .frameworks("Debug", vec![ArtifactSpec::new("${BUILT_PRODUCTS_DIR}/A/A.framework")?])
///     .build()?;
///
/// let script = EmbedFrameworksScript::new(&settings).generate()?;
/// assert!(script.contents().contains(r#"if [[ "$CONFIGURATION" == "Debug" ]]; then"#));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct EmbedFrameworksScript<'a> {
    settings: &'a Settings,
}

impl<'a> EmbedFrameworksScript<'a> {
    /// Creates a generator over `settings`.
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Computes the statements of every configuration without rendering.
    ///
    /// Frameworks of a configuration come first (each followed by its dSYM and
    /// bcsymbolmaps), then its xcframeworks. xcframeworks with no dynamic slice
    /// for the target platform are skipped.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] for an empty configuration name or framework path.
    /// The framework path check repeats the one in [`crate::embed::ArtifactSpec::new`]
    /// so that emission never relies on how its input was built.
    pub fn invocations(&self) -> Result<ConfigGroups> {
        let mut groups = ConfigGroups::new();

        for (config, frameworks) in self.settings.frameworks_by_config() {
            validate_config_name(config)?;
            for framework in frameworks {
                if framework.source_path().is_empty() {
                    return Err(Error::InvalidInput(format!(
                        "framework in configuration {config} has an empty source path"
                    )));
                }
                groups.push(
                    config,
                    Invocation::InstallFramework(framework.source_path().to_string()),
                )?;
                // Vendored frameworks may ship a dSYM; source-built ones get theirs from Xcode.
                if let Some(dsym) = framework.dsym_path() {
                    groups.push(config, Invocation::InstallDsym(dsym.to_string()))?;
                }
                for bcsymbolmap in framework.bcsymbolmap_paths() {
                    groups.push(config, Invocation::InstallBcsymbolmap(bcsymbolmap.clone()))?;
                }
            }
        }

        for (config, xcframeworks) in self.settings.xcframeworks_by_config() {
            validate_config_name(config)?;
            for xcframework in xcframeworks {
                let slices = select_slices(xcframework, self.settings.platform());
                if slices.is_empty() {
                    log::debug!(
                        "Skipping {} for {}: no dynamic {} slice",
                        xcframework.name(),
                        config,
                        self.settings.platform()
                    );
                    continue;
                }

                let root = relative_path(xcframework.root_path(), self.settings.sandbox_root());
                groups.push(
                    config,
                    Invocation::InstallXcframework {
                        root: format!("{SANDBOX_ROOT_VARIABLE}/{}", root.display()),
                        slices: slices
                            .iter()
                            .map(|slice| slice.display().to_string())
                            .collect(),
                    },
                )?;
            }
        }

        Ok(groups)
    }

    /// Renders the complete script.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] as for [`Self::invocations`]; nothing is rendered
    /// in that case.
    pub fn generate(&self) -> Result<GeneratedScript> {
        let groups = self.invocations()?;
        let contents = render(&groups)?;

        log::debug!(
            "Rendered embed frameworks script with {} configuration block(s)",
            groups.iter().count()
        );

        Ok(GeneratedScript {
            contents,
            mode: SCRIPT_MODE,
        })
    }
}

#[derive(serde::Serialize)]
struct Block<'g> {
    name: &'g str,
    statements: Vec<String>,
}

fn render(groups: &ConfigGroups) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("embed_frameworks.sh", SCRIPT_TEMPLATE)
        .map_err(|e| Error::GenericError(format!("failed to register script template: {}", e)))?;

    let blocks: Vec<Block<'_>> = groups
        .iter()
        .map(|(name, statements)| Block {
            name,
            statements: statements.iter().map(ToString::to_string).collect(),
        })
        .collect();

    let data = serde_json::json!({
        "routines": ROUTINES,
        "blocks": blocks,
        "wait": PARALLEL_SIGN_WAIT,
    });

    handlebars
        .render("embed_frameworks.sh", &data)
        .map_err(|e| Error::GenericError(format!("failed to render script template: {}", e)))
}
