//! Environment source: COSMOS_EMULATOR__<SECTION>__<KEY>, e.g.
//! `COSMOS_EMULATOR__EMULATOR__PORT=8082`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub const ENV_PREFIX: &str = "COSMOS_EMULATOR";

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    )
}
