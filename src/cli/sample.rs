//! Built-in sample definition: a small version-control client

use crate::storage::{CommandDef, DefinitionFileError};

const SAMPLE: &str = include_str!("../../demos/vcs.toml");

/// The sample definition as shipped, comments included
pub fn sample_source() -> &'static str {
    SAMPLE
}

pub fn sample_definition() -> Result<CommandDef, DefinitionFileError> {
    SAMPLE.parse()
}
