//! Environment source: REPROCHECK__<SECTION>__<KEY>

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

/// Add the `REPROCHECK__` environment source to builder.
///
/// `REPROCHECK__DIGEST__BUFFER_SIZE=4096` sets `digest.buffer_size`.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("REPROCHECK")
            .separator("__")
            .try_parsing(true),
    )
}
