use crate::error::Result;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Settings for a card entry form.
///
/// Passed explicitly to the engines that need it; nothing here is global.
/// Every key is optional in the JSON source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CardFormConfig {
    /// Whether the form renders its own error messages.
    pub supports_custom_errors: bool,
    pub postal_code_enabled: bool,
    pub postal_code_required: bool,
    /// Hide errors for fields the user has not yet edited and left.
    pub ignore_unedited_field_errors: bool,
}

impl Default for CardFormConfig {
    fn default() -> Self {
        Self {
            supports_custom_errors: true,
            postal_code_enabled: true,
            postal_code_required: false,
            ignore_unedited_field_errors: true,
        }
    }
}

impl CardFormConfig {
    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        Ok(serde_json::from_reader(source)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}
