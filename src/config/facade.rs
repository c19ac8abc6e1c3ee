//! Config loader: assembles sources in precedence order and deserializes.

use super::merge_policy::builder_with_defaults;
use super::sources::{environment, global_file, workspace_file};
use super::ReprocheckConfig;
use config::{ConfigError, File};
use std::path::Path;

/// Loads [`ReprocheckConfig`] from the layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a working directory.
    ///
    /// Precedence (lowest to highest): defaults, global config file,
    /// `reprocheck.toml` in `working_dir`, environment.
    pub fn load(working_dir: &Path) -> Result<ReprocheckConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, working_dir)?;
        let builder = environment::add_to_builder(builder);
        builder.build()?.try_deserialize()
    }

    /// Load configuration from an explicit file, ignoring the file sources.
    ///
    /// Defaults and the environment still apply. The file must exist.
    pub fn load_from_file(path: &Path) -> Result<ReprocheckConfig, ConfigError> {
        let builder = builder_with_defaults()?.add_source(File::from(path).required(true));
        let builder = environment::add_to_builder(builder);
        builder.build()?.try_deserialize()
    }
}
