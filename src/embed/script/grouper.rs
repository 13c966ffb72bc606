//! Per-configuration accumulation of invocation statements.

use super::Invocation;
use crate::embed::{Error, Result};
use std::collections::BTreeMap;

/// Statements grouped by build configuration.
///
/// Iteration is lexicographic by configuration name, whatever order the
/// statements were pushed in, so identical input always renders identical
/// output. Within one configuration the push order is kept: later copies of a
/// same-named framework overwrite earlier ones when the script runs.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConfigGroups {
    groups: BTreeMap<String, Vec<Invocation>>,
}

impl ConfigGroups {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `invocation` to `config`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] for an empty configuration name.
    pub fn push(&mut self, config: &str, invocation: Invocation) -> Result<()> {
        validate_config_name(config)?;
        self.groups
            .entry(config.to_string())
            .or_default()
            .push(invocation);
        Ok(())
    }

    /// Statements for `config`; empty when none were pushed.
    pub fn statements(&self, config: &str) -> &[Invocation] {
        self.groups.get(config).map(Vec::as_slice).unwrap_or_default()
    }

    /// Non-empty configurations in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Invocation])> {
        self.groups
            .iter()
            .filter(|(_, statements)| !statements.is_empty())
            .map(|(config, statements)| (config.as_str(), statements.as_slice()))
    }

    /// True when no configuration has a statement.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Rejects names that cannot be compared against `$CONFIGURATION`.
pub(crate) fn validate_config_name(config: &str) -> Result<()> {
    if config.is_empty() {
        return Err(Error::InvalidInput(
            "configuration name must not be empty".to_string(),
        ));
    }
    Ok(())
}
